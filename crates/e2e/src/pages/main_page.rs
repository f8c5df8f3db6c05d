//! Home page, header navigation and the auth forms

use tracing::debug;

use crate::error::E2eResult;
use crate::playwright::Page;
use crate::step::Locator;

pub struct MainPage<'a> {
    page: &'a Page,
}

impl<'a> MainPage<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self { page }
    }

    fn login_link(&self) -> Locator {
        Locator::exact_role("link", "Login")
    }

    fn sign_up_link(&self) -> Locator {
        Locator::exact_role("link", "Sign up")
    }

    fn home_link(&self) -> Locator {
        Locator::exact_role("link", "Home")
    }

    fn global_feed_tab(&self) -> Locator {
        Locator::role("button", "Global Feed")
    }

    fn name_input(&self) -> Locator {
        Locator::placeholder("Your Name")
    }

    fn email_input(&self) -> Locator {
        Locator::placeholder("Email")
    }

    fn password_input(&self) -> Locator {
        Locator::placeholder("Password")
    }

    pub async fn open(&self, url: &str) -> E2eResult<()> {
        self.page.goto(url).await
    }

    pub async fn open_main_page(&self) -> E2eResult<()> {
        self.page.click(&self.home_link()).await
    }

    pub async fn open_global_feed(&self) -> E2eResult<()> {
        self.page.click(&self.global_feed_tab()).await
    }

    pub async fn login(&self, email: &str, password: &str) -> E2eResult<()> {
        debug!("Logging in as {}", email);
        self.page.click(&self.login_link()).await?;
        self.page.fill(&self.email_input(), email).await?;
        self.page.fill(&self.password_input(), password).await?;
        self.page.click(&Locator::role("button", "Login")).await
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> E2eResult<()> {
        debug!("Registering {}", name);
        self.page.click(&self.sign_up_link()).await?;
        self.page.fill(&self.name_input(), name).await?;
        self.page.fill(&self.email_input(), email).await?;
        self.page.fill(&self.password_input(), password).await?;
        self.page.click(&Locator::role("button", "Sign up")).await
    }

    /// Author link of an article preview in the feed
    pub fn author_link(&self, name: &str) -> Locator {
        Locator::css_with_exact_text(".article-meta a.author", name).first()
    }

    /// Header link shown while `name` is signed in
    pub fn user_nav_link(&self, name: &str) -> Locator {
        Locator::css_with_exact_text("nav a.nav-link", name).first()
    }
}

