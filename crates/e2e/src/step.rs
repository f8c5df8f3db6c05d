//! Browser actions and locators sent to the Playwright driver

use serde::{Deserialize, Serialize};

/// Lazy description of how to find an element.
///
/// Resolved by the driver on every step, so a locator never goes stale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum Locator {
    /// CSS selector, optionally filtered by its text. The filter is a
    /// case-insensitive substring match unless `exact` is set, in which
    /// case the whole trimmed text must equal it.
    Css {
        selector: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        has_text: Option<String>,
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        exact: bool,
    },

    /// Element by visible text
    Text {
        text: String,
        #[serde(default)]
        exact: bool,
    },

    /// ARIA role with optional accessible name
    Role {
        role: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default)]
        exact: bool,
    },

    /// Input by placeholder text
    Placeholder { text: String },

    /// First match of the inner locator
    First { inner: Box<Locator> },

    /// Zero based match of the inner locator
    Nth { inner: Box<Locator>, index: usize },
}

impl Locator {
    pub fn css(selector: impl Into<String>) -> Self {
        Locator::Css {
            selector: selector.into(),
            has_text: None,
            exact: false,
        }
    }

    pub fn css_with_text(selector: impl Into<String>, text: impl Into<String>) -> Self {
        Locator::Css {
            selector: selector.into(),
            has_text: Some(text.into()),
            exact: false,
        }
    }

    /// Elements matching `selector` whose text is exactly `text`
    pub fn css_with_exact_text(selector: impl Into<String>, text: impl Into<String>) -> Self {
        Locator::Css {
            selector: selector.into(),
            has_text: Some(text.into()),
            exact: true,
        }
    }

    /// Substring, case-insensitive text match
    pub fn text(text: impl Into<String>) -> Self {
        Locator::Text {
            text: text.into(),
            exact: false,
        }
    }

    pub fn exact_text(text: impl Into<String>) -> Self {
        Locator::Text {
            text: text.into(),
            exact: true,
        }
    }

    pub fn role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Locator::Role {
            role: role.into(),
            name: Some(name.into()),
            exact: false,
        }
    }

    pub fn exact_role(role: impl Into<String>, name: impl Into<String>) -> Self {
        Locator::Role {
            role: role.into(),
            name: Some(name.into()),
            exact: true,
        }
    }

    pub fn placeholder(text: impl Into<String>) -> Self {
        Locator::Placeholder { text: text.into() }
    }

    pub fn first(self) -> Self {
        Locator::First {
            inner: Box::new(self),
        }
    }

    pub fn nth(self, index: usize) -> Self {
        Locator::Nth {
            inner: Box::new(self),
            index,
        }
    }
}

impl std::fmt::Display for Locator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locator::Css { selector, has_text: None, .. } => write!(f, "{}", selector),
            Locator::Css { selector, has_text: Some(text), exact: false } => {
                write!(f, "{}:has-text({:?})", selector, text)
            }
            Locator::Css { selector, has_text: Some(text), exact: true } => {
                write!(f, "{}:text-is({:?})", selector, text)
            }
            Locator::Text { text, .. } => write!(f, "text={:?}", text),
            Locator::Role { role, name: Some(name), .. } => write!(f, "role={}[name={:?}]", role, name),
            Locator::Role { role, name: None, .. } => write!(f, "role={}", role),
            Locator::Placeholder { text } => write!(f, "placeholder={:?}", text),
            Locator::First { inner } => write!(f, "{} >> first", inner),
            Locator::Nth { inner, index } => write!(f, "{} >> nth={}", inner, index),
        }
    }
}

/// A single browser action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Load an absolute URL
    Navigate { url: String },

    /// Click an element
    Click {
        locator: Locator,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    /// Replace the value of an input
    Fill {
        locator: Locator,
        value: String,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    /// Press a key on an element
    Press { locator: Locator, key: String },

    /// Wait for an element state
    WaitFor {
        locator: Locator,
        #[serde(default)]
        state: WaitState,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    /// Assert an element becomes visible
    ExpectVisible {
        locator: Locator,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    /// Assert an element becomes hidden or detached
    ExpectHidden {
        locator: Locator,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    /// Assert the element's text content
    ExpectText {
        locator: Locator,
        text: String,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    /// Read the current page URL
    Url,

    /// Capture a PNG
    Screenshot {
        path: String,
        #[serde(default)]
        full_page: bool,
    },

    /// Close the browser and end the driver
    Close,
}

impl Step {
    /// Short label used in logs and error messages
    pub fn name(&self) -> String {
        match self {
            Step::Navigate { url } => format!("navigate:{}", url),
            Step::Click { locator, .. } => format!("click:{}", locator),
            Step::Fill { locator, .. } => format!("fill:{}", locator),
            Step::Press { locator, key } => format!("press:{}:{}", locator, key),
            Step::WaitFor { locator, .. } => format!("wait:{}", locator),
            Step::ExpectVisible { locator, .. } => format!("expect_visible:{}", locator),
            Step::ExpectHidden { locator, .. } => format!("expect_hidden:{}", locator),
            Step::ExpectText { locator, .. } => format!("expect_text:{}", locator),
            Step::Url => "url".to_string(),
            Step::Screenshot { path, .. } => format!("screenshot:{}", path),
            Step::Close => "close".to_string(),
        }
    }

    /// Explicit timeout carried by the step, if any
    pub fn timeout_ms(&self) -> Option<u64> {
        match self {
            Step::Click { timeout_ms, .. }
            | Step::Fill { timeout_ms, .. }
            | Step::WaitFor { timeout_ms, .. }
            | Step::ExpectVisible { timeout_ms, .. }
            | Step::ExpectHidden { timeout_ms, .. }
            | Step::ExpectText { timeout_ms, .. } => *timeout_ms,
            _ => None,
        }
    }

    /// Whether a failure of this step is an assertion failure
    pub fn is_expectation(&self) -> bool {
        matches!(
            self,
            Step::ExpectVisible { .. } | Step::ExpectHidden { .. } | Step::ExpectText { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitState {
    #[default]
    Visible,
    Hidden,
    Attached,
    Detached,
}
