//! Article editor, used for both new and existing articles

use crate::error::E2eResult;
use crate::playwright::Page;
use crate::step::Locator;

pub struct ArticleFormPage<'a> {
    page: &'a Page,
}

impl<'a> ArticleFormPage<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self { page }
    }

    fn new_article_link(&self) -> Locator {
        Locator::role("link", "New Article")
    }

    fn title_input(&self) -> Locator {
        Locator::placeholder("Article Title")
    }

    fn description_input(&self) -> Locator {
        Locator::placeholder("What's this article about?")
    }

    fn body_input(&self) -> Locator {
        Locator::placeholder("Write your article (in markdown)")
    }

    fn tags_input(&self) -> Locator {
        Locator::placeholder("Enter tags")
    }

    fn publish_button(&self) -> Locator {
        Locator::role("button", "Publish Article")
    }

    pub async fn goto_new_article(&self) -> E2eResult<()> {
        self.page.click(&self.new_article_link()).await
    }

    /// Fill every field and publish. Tags are committed one by one with Enter.
    pub async fn create_and_publish_article(
        &self,
        title: &str,
        description: &str,
        body: &str,
        tags: &[&str],
    ) -> E2eResult<()> {
        self.page.fill(&self.title_input(), title).await?;
        self.page.fill(&self.description_input(), description).await?;
        self.page.fill(&self.body_input(), body).await?;

        let tags_input = self.tags_input();
        for tag in tags {
            self.page.fill(&tags_input, tag).await?;
            self.page.press(&tags_input, "Enter").await?;
        }

        self.page.click(&self.publish_button()).await
    }
}
