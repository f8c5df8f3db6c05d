//! Playwright browser automation
//!
//! Each [`Page`] owns one Node.js driver process (see `driver.js`) that keeps
//! a single browser context alive for the whole scenario. Steps are sent as
//! JSON lines on stdin and answered on stdout; waiting is left to
//! Playwright's own polling.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{E2eError, E2eResult};
use crate::step::{Locator, Step, WaitState};

const DRIVER_SCRIPT: &str = include_str!("driver.js");

/// Extra time granted to the driver on top of a step's own timeout
const DRIVER_GRACE: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl std::str::FromStr for Browser {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chromium" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" => Ok(Browser::Webkit),
            other => Err(E2eError::Config(format!("unknown browser: {}", other))),
        }
    }
}

/// Configuration for Playwright
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaywrightConfig {
    pub browser: Browser,
    pub headless: bool,
    pub viewport_width: u32,
    pub viewport_height: u32,

    /// Timeout for actions and expectations without an explicit one
    pub default_timeout_ms: u64,

    /// Timeout for page loads
    pub navigation_timeout_ms: u64,

    /// Time allowed for the browser to launch
    pub startup_timeout_ms: u64,

    /// Node.js executable
    pub node_binary: PathBuf,

    /// Directory from which `require('playwright')` resolves
    pub working_dir: PathBuf,
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            browser: Browser::Chromium,
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            default_timeout_ms: 5_000,
            navigation_timeout_ms: 30_000,
            startup_timeout_ms: 30_000,
            node_binary: PathBuf::from("node"),
            working_dir: PathBuf::from("."),
        }
    }
}

impl PlaywrightConfig {
    fn driver_env(&self) -> E2eResult<String> {
        let value = serde_json::json!({
            "browser": self.browser.as_str(),
            "headless": self.headless,
            "viewport_width": self.viewport_width,
            "viewport_height": self.viewport_height,
            "default_timeout_ms": self.default_timeout_ms,
            "navigation_timeout_ms": self.navigation_timeout_ms,
        });
        Ok(serde_json::to_string(&value)?)
    }
}

/// Check that Node.js can load the `playwright` package
pub async fn check_playwright_installed(config: &PlaywrightConfig) -> E2eResult<()> {
    let status = Command::new(&config.node_binary)
        .args(["-e", "require('playwright')"])
        .current_dir(&config.working_dir)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match status {
        Ok(status) if status.success() => Ok(()),
        _ => Err(E2eError::PlaywrightNotFound),
    }
}

#[derive(Serialize)]
struct DriverRequest<'a> {
    id: u64,
    step: &'a Step,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum ReplyKind {
    Timeout,
    Assertion,
    Navigation,
    Error,
}

/// One line written by the driver
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct DriverReply {
    #[serde(default)]
    pub id: Option<u64>,
    pub ok: bool,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub kind: Option<ReplyKind>,
    #[serde(default)]
    pub message: Option<String>,
}

impl DriverReply {
    /// Map a reply to the step's outcome
    pub(crate) fn into_result(self, step: &str) -> E2eResult<Option<serde_json::Value>> {
        if self.ok {
            return Ok(self.value);
        }

        let reason = self.message.unwrap_or_else(|| "no message from driver".to_string());
        let err = match self.kind.unwrap_or(ReplyKind::Error) {
            ReplyKind::Timeout => E2eError::Timeout(format!("{} - {}", step, reason)),
            ReplyKind::Assertion => E2eError::AssertionFailed(format!("{} - {}", step, reason)),
            ReplyKind::Navigation => E2eError::Navigation(format!("{} - {}", step, reason)),
            ReplyKind::Error => E2eError::StepFailed {
                step: step.to_string(),
                reason,
            },
        };
        Err(err)
    }
}

struct DriverIo {
    stdin: ChildStdin,
    stdout: Lines<BufReader<ChildStdout>>,
    next_id: u64,
    closed: bool,
}

impl DriverIo {
    async fn read_reply(&mut self, id: u64) -> E2eResult<DriverReply> {
        loop {
            let line = self
                .stdout
                .next_line()
                .await?
                .ok_or_else(|| E2eError::Playwright("driver exited unexpectedly".to_string()))?;

            match serde_json::from_str::<DriverReply>(&line) {
                Ok(reply) if reply.id == Some(id) => return Ok(reply),
                Ok(reply) => debug!("Skipping stale driver reply {:?}", reply.id),
                Err(_) => debug!(target: "playwright", "{}", line),
            }
        }
    }
}

struct Session {
    io: Mutex<DriverIo>,
    child: Mutex<Child>,
    config: PlaywrightConfig,
}

/// Handle to one browsing session.
///
/// Cloning is cheap; the driver process is killed when the last clone is
/// dropped.
#[derive(Clone)]
pub struct Page {
    session: Arc<Session>,
}

impl Page {
    /// Spawn a driver and wait until its browser is ready
    pub async fn launch(config: &PlaywrightConfig) -> E2eResult<Self> {
        info!("Launching {} (headless: {})", config.browser.as_str(), config.headless);

        let mut child = Command::new(&config.node_binary)
            .arg("-e")
            .arg(DRIVER_SCRIPT)
            .current_dir(&config.working_dir)
            .env("QAGURU_DRIVER_CONFIG", config.driver_env()?)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => E2eError::PlaywrightNotFound,
                _ => E2eError::Io(e),
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| E2eError::Playwright("driver stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| E2eError::Playwright("driver stdout unavailable".to_string()))?;

        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut lines = BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    warn!(target: "playwright", "{}", line);
                }
            });
        }

        let mut stdout = BufReader::new(stdout).lines();
        let startup = Duration::from_millis(config.startup_timeout_ms);
        let ready = tokio::time::timeout(startup, stdout.next_line())
            .await
            .map_err(|_| E2eError::Timeout("browser launch".to_string()))??;

        match ready {
            Some(line) => {
                let reply: DriverReply = serde_json::from_str(&line)
                    .map_err(|_| E2eError::Playwright(format!("unexpected driver output: {}", line)))?;
                reply.into_result("launch").map_err(|e| E2eError::Playwright(e.to_string()))?;
            }
            None => {
                return Err(E2eError::Playwright(
                    "driver exited before the browser was ready; is the playwright package installed?"
                        .to_string(),
                ));
            }
        }

        debug!("Browser ready");

        Ok(Self {
            session: Arc::new(Session {
                io: Mutex::new(DriverIo {
                    stdin,
                    stdout,
                    next_id: 0,
                    closed: false,
                }),
                child: Mutex::new(child),
                config: config.clone(),
            }),
        })
    }

    /// Execute a single step and return the driver's value
    pub async fn execute(&self, step: &Step) -> E2eResult<Option<serde_json::Value>> {
        let name = step.name();
        let config = &self.session.config;
        let step_timeout = match step {
            Step::Navigate { .. } => config.navigation_timeout_ms,
            _ => step.timeout_ms().unwrap_or(config.default_timeout_ms),
        };

        debug!("Executing step: {}", name);

        let mut io = self.session.io.lock().await;
        if io.closed {
            return Err(E2eError::Playwright("page is closed".to_string()));
        }

        io.next_id += 1;
        let id = io.next_id;
        let mut line = serde_json::to_string(&DriverRequest { id, step })?;
        line.push('\n');
        io.stdin.write_all(line.as_bytes()).await?;
        io.stdin.flush().await?;

        let deadline = Duration::from_millis(step_timeout) + DRIVER_GRACE;
        let reply = tokio::time::timeout(deadline, io.read_reply(id))
            .await
            .map_err(|_| E2eError::Timeout(format!("{} - driver did not answer", name)))??;

        reply.into_result(&name)
    }

    pub async fn goto(&self, url: &str) -> E2eResult<()> {
        self.execute(&Step::Navigate { url: url.to_string() }).await?;
        Ok(())
    }

    pub async fn click(&self, locator: &Locator) -> E2eResult<()> {
        self.execute(&Step::Click {
            locator: locator.clone(),
            timeout_ms: None,
        })
        .await?;
        Ok(())
    }

    pub async fn fill(&self, locator: &Locator, value: &str) -> E2eResult<()> {
        self.execute(&Step::Fill {
            locator: locator.clone(),
            value: value.to_string(),
            timeout_ms: None,
        })
        .await?;
        Ok(())
    }

    pub async fn press(&self, locator: &Locator, key: &str) -> E2eResult<()> {
        self.execute(&Step::Press {
            locator: locator.clone(),
            key: key.to_string(),
        })
        .await?;
        Ok(())
    }

    pub async fn wait_for(&self, locator: &Locator, state: WaitState, timeout: Option<Duration>) -> E2eResult<()> {
        self.execute(&Step::WaitFor {
            locator: locator.clone(),
            state,
            timeout_ms: timeout.map(|t| t.as_millis() as u64),
        })
        .await?;
        Ok(())
    }

    /// Current page URL
    pub async fn url(&self) -> E2eResult<String> {
        match self.execute(&Step::Url).await? {
            Some(serde_json::Value::String(url)) => Ok(url),
            other => Err(E2eError::Playwright(format!("unexpected url reply: {:?}", other))),
        }
    }

    /// Capture a full-page PNG at `path`
    pub async fn screenshot(&self, path: &Path) -> E2eResult<PathBuf> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.execute(&Step::Screenshot {
            path: path.to_string_lossy().to_string(),
            full_page: true,
        })
        .await?;
        Ok(path.to_path_buf())
    }

    /// Start an assertion on `locator`
    pub fn expect(&self, locator: Locator) -> Expectation<'_> {
        Expectation {
            page: self,
            locator,
            timeout: None,
        }
    }

    pub fn get_by_text(&self, text: &str) -> Locator {
        Locator::text(text)
    }

    /// Close the browser and wait for the driver to exit
    pub async fn close(&self) -> E2eResult<()> {
        {
            let mut io = self.session.io.lock().await;
            if io.closed {
                return Ok(());
            }
            io.next_id += 1;
            let id = io.next_id;
            let mut line = serde_json::to_string(&DriverRequest { id, step: &Step::Close })?;
            line.push('\n');
            io.closed = true;

            if io.stdin.write_all(line.as_bytes()).await.is_ok() {
                let _ = tokio::time::timeout(DRIVER_GRACE, io.read_reply(id)).await;
            }
        }

        let mut child = self.session.child.lock().await;
        match tokio::time::timeout(DRIVER_GRACE, child.wait()).await {
            Ok(Ok(status)) => debug!("Driver exited with {}", status),
            Ok(Err(e)) => warn!("Failed to reap driver: {}", e),
            Err(_) => {
                warn!("Driver did not exit, killing it");
                child.kill().await?;
            }
        }
        Ok(())
    }
}

/// Pending assertion on a locator
pub struct Expectation<'a> {
    page: &'a Page,
    locator: Locator,
    timeout: Option<Duration>,
}

impl<'a> Expectation<'a> {
    /// Override the default polling window
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn timeout_ms(&self) -> Option<u64> {
        self.timeout.map(|t| t.as_millis() as u64)
    }

    pub async fn to_be_visible(self) -> E2eResult<()> {
        let timeout_ms = self.timeout_ms();
        self.page
            .execute(&Step::ExpectVisible {
                locator: self.locator,
                timeout_ms,
            })
            .await?;
        Ok(())
    }

    pub async fn to_be_hidden(self) -> E2eResult<()> {
        let timeout_ms = self.timeout_ms();
        self.page
            .execute(&Step::ExpectHidden {
                locator: self.locator,
                timeout_ms,
            })
            .await?;
        Ok(())
    }

    pub async fn to_have_text(self, text: &str) -> E2eResult<()> {
        let timeout_ms = self.timeout_ms();
        self.page
            .execute(&Step::ExpectText {
                locator: self.locator,
                text: text.to_string(),
                timeout_ms,
            })
            .await?;
        Ok(())
    }
}
