//! Error types for E2E scenarios

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Playwright not found. Install with: npm install playwright && npx playwright install")]
    PlaywrightNotFound,

    #[error("Playwright error: {0}")]
    Playwright(String),

    #[error("Step failed: {step} - {reason}")]
    StepFailed { step: String, reason: String },

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Assertion failed: {0}")]
    AssertionFailed(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;

/// How a scenario failed, as reported by the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Observed value did not match the expected one
    Assertion,
    /// Network error, navigation error or missing element
    Transport,
    /// A waited-for condition never became true
    Timeout,
    /// The suite itself could not run the scenario
    Harness,
}

impl E2eError {
    pub fn kind(&self) -> FailureKind {
        match self {
            E2eError::AssertionFailed(_) => FailureKind::Assertion,
            E2eError::Timeout(_) => FailureKind::Timeout,
            E2eError::StepFailed { .. } | E2eError::Navigation(_) => FailureKind::Transport,
            E2eError::Http(e) if e.is_timeout() => FailureKind::Timeout,
            E2eError::Http(_) => FailureKind::Transport,
            E2eError::PlaywrightNotFound
            | E2eError::Playwright(_)
            | E2eError::Config(_)
            | E2eError::Io(_)
            | E2eError::Json(_)
            | E2eError::Toml(_) => FailureKind::Harness,
        }
    }
}

/// Fail the enclosing scenario with [`E2eError::AssertionFailed`] unless
/// the condition holds.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)+) => {
        if !$cond {
            return Err($crate::error::E2eError::AssertionFailed(format!($($arg)+)));
        }
    };
}

/// Equality flavour of [`ensure!`] that prints both sides.
#[macro_export]
macro_rules! ensure_eq {
    ($left:expr, $right:expr, $what:expr) => {
        match (&$left, &$right) {
            (left, right) => {
                if left != right {
                    return Err($crate::error::E2eError::AssertionFailed(format!(
                        "{}: expected {:?}, got {:?}",
                        $what, right, left
                    )));
                }
            }
        }
    };
}
