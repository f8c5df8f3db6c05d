//! Authenticated page fixture
//!
//! Launches a browser, signs in and hands the page to the scenario body.
//! The session is closed afterwards whatever the outcome; a failing body
//! leaves a screenshot in the output directory.

use std::future::Future;
use std::path::PathBuf;
use tracing::{info, warn};

use qaguru_common::{User, UserBuilder};

use crate::config::SuiteConfig;
use crate::error::E2eResult;
use crate::pages::MainPage;
use crate::playwright::Page;

/// Account the fixture signs in with: the configured one when present,
/// otherwise a freshly generated user that gets registered.
pub fn fixture_user(config: &SuiteConfig) -> (User, bool) {
    match &config.realworld.account {
        Some(account) => (UserBuilder::from(account.clone()).build(), false),
        None => (UserBuilder::new().build(), true),
    }
}

/// Open the application and sign `user` in, registering first when asked
pub async fn authenticate(page: &Page, config: &SuiteConfig, user: &User, register: bool) -> E2eResult<()> {
    let main_page = MainPage::new(page);
    main_page.open(&config.realworld.base_url).await?;

    if register {
        main_page.register(&user.name, &user.email, &user.password).await?;
    } else {
        main_page.login(&user.email, &user.password).await?;
    }

    page.expect(main_page.user_nav_link(&user.name)).to_be_visible().await
}

/// Path of the screenshot taken when scenario `name` fails
pub fn failure_screenshot_path(config: &SuiteConfig, name: &str) -> PathBuf {
    let file: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    config.output_dir.join("screenshots").join(format!("{}.png", file))
}

/// Run `body` with a signed-in page
pub async fn with_authenticated_page<F, Fut>(config: &SuiteConfig, name: &str, body: F) -> E2eResult<()>
where
    F: FnOnce(Page, User) -> Fut,
    Fut: Future<Output = E2eResult<()>>,
{
    let page = Page::launch(&config.playwright).await?;
    let (user, register) = fixture_user(config);
    info!("[{}] signing in as {}", name, user);

    let result = match authenticate(&page, config, &user, register).await {
        Ok(()) => body(page.clone(), user).await,
        Err(e) => Err(e),
    };

    if result.is_err() {
        let path = failure_screenshot_path(config, name);
        match page.screenshot(&path).await {
            Ok(path) => info!("[{}] failure screenshot: {}", name, path.display()),
            Err(e) => warn!("[{}] could not capture screenshot: {}", name, e),
        }
    }

    if let Err(e) = page.close().await {
        warn!("[{}] failed to close browser: {}", name, e);
    }

    result
}
