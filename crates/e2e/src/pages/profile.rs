//! User profile with its article tabs

use crate::error::E2eResult;
use crate::playwright::Page;
use crate::step::Locator;

pub struct ProfilePage<'a> {
    page: &'a Page,
}

impl<'a> ProfilePage<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self { page }
    }

    fn favorited_articles_tab(&self) -> Locator {
        Locator::role("link", "Favorited Articles")
    }

    /// Load `/#/profile/:name/favorites` relative to `base_url`
    pub async fn open_favorites(&self, base_url: &str, user_name: &str) -> E2eResult<()> {
        self.page.goto(&favorites_url(base_url, user_name)).await
    }

    pub async fn goto_favorited_articles(&self) -> E2eResult<()> {
        self.page.click(&self.favorited_articles_tab()).await
    }
}

fn favorites_url(base_url: &str, user_name: &str) -> String {
    format!(
        "{}/profile/{}/favorites",
        base_url.trim_end_matches('/'),
        urlencoding::encode(user_name)
    )
}
