//! Published article with its comments

use crate::error::E2eResult;
use crate::playwright::Page;
use crate::step::Locator;

pub struct ArticleViewPage<'a> {
    page: &'a Page,
}

impl<'a> ArticleViewPage<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self { page }
    }

    fn comment_input(&self) -> Locator {
        Locator::placeholder("Write a comment...")
    }

    fn post_comment_button(&self) -> Locator {
        Locator::role("button", "Post Comment")
    }

    fn edit_article_link(&self) -> Locator {
        Locator::role("link", "Edit Article").first()
    }

    pub fn favorite_button(&self) -> Locator {
        Locator::css_with_text("button", "Favorite").first()
    }

    /// Comment card text, matched exactly
    pub fn comment_by_text(&self, text: &str) -> Locator {
        Locator::exact_text(text)
    }

    pub async fn add_comment(&self, text: &str) -> E2eResult<()> {
        self.page.fill(&self.comment_input(), text).await?;
        self.page.click(&self.post_comment_button()).await
    }

    pub async fn favorite_article(&self) -> E2eResult<()> {
        self.page.click(&self.favorite_button()).await
    }

    pub async fn goto_edit_article(&self) -> E2eResult<()> {
        self.page.click(&self.edit_article_link()).await
    }
}
