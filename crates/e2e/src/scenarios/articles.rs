//! RealWorld article scenarios
//!
//! Every scenario starts from the authenticated page fixture.

use futures::FutureExt;
use std::time::Duration;

use qaguru_common::{Article, ArticleBuilder, DataGenerator};

use super::{Scenario, ScenarioContext};
use crate::error::E2eResult;
use crate::fixture::with_authenticated_page;
use crate::pages::{ArticleFormPage, ArticleViewPage, MainPage, ProfilePage};
use crate::playwright::Page;

pub const TEST_COMMENT: &str = "Test comment";

/// Wait before asserting the favorite button
pub const FAVORITE_BUTTON_TIMEOUT: Duration = Duration::from_secs(10);

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "ui::create_article",
            description: "User can create a new article",
            tags: &["ui", "smoke"],
            run: |ctx| create_article(ctx).boxed(),
        },
        Scenario {
            name: "ui::article_in_global_feed",
            description: "Created article is shown in the Global Feed",
            tags: &["ui"],
            run: |ctx| article_in_global_feed(ctx).boxed(),
        },
        Scenario {
            name: "ui::comment_article",
            description: "User can comment an article",
            tags: &["ui"],
            run: |ctx| comment_article(ctx).boxed(),
        },
        Scenario {
            name: "ui::edit_article",
            description: "User can edit an article",
            tags: &["ui"],
            run: |ctx| edit_article(ctx).boxed(),
        },
        Scenario {
            name: "ui::favorite_article",
            description: "User can add an article to Favorited Articles",
            tags: &["ui"],
            run: |ctx| favorite_article(ctx).boxed(),
        },
    ]
}

fn generated_article(gen: &mut DataGenerator) -> Article {
    ArticleBuilder::new()
        .with_title(gen.sentence())
        .with_description(gen.paragraph())
        .with_body(gen.paragraphs(2))
        .with_tags([gen.word()])
        .build()
}

async fn publish(page: &Page, article: &Article) -> E2eResult<()> {
    let form = ArticleFormPage::new(page);
    form.goto_new_article().await?;
    form.create_and_publish_article(&article.title, &article.description, &article.body, &article.tag_list())
        .await
}

async fn create_article(ctx: ScenarioContext) -> E2eResult<()> {
    with_authenticated_page(&ctx.config, "ui::create_article", |page, _user| async move {
        let view = ArticleViewPage::new(&page);
        let article = generated_article(&mut DataGenerator::new());

        publish(&page, &article).await?;

        page.expect(page.get_by_text(&article.title).first()).to_be_visible().await?;
        view.add_comment(TEST_COMMENT).await?;
        page.expect(view.comment_by_text(TEST_COMMENT)).to_be_visible().await
    })
    .await
}

async fn article_in_global_feed(ctx: ScenarioContext) -> E2eResult<()> {
    with_authenticated_page(&ctx.config, "ui::article_in_global_feed", |page, user| async move {
        let main_page = MainPage::new(&page);
        let article = generated_article(&mut DataGenerator::new());

        publish(&page, &article).await?;

        main_page.open_main_page().await?;
        main_page.open_global_feed().await?;

        page.expect(page.get_by_text(&article.title).first()).to_be_visible().await?;
        page.expect(main_page.author_link(&user.name)).to_be_visible().await
    })
    .await
}

async fn comment_article(ctx: ScenarioContext) -> E2eResult<()> {
    with_authenticated_page(&ctx.config, "ui::comment_article", |page, _user| async move {
        let view = ArticleViewPage::new(&page);
        let mut gen = DataGenerator::new();
        let article = generated_article(&mut gen);
        let comment = gen.sentence();

        publish(&page, &article).await?;

        view.add_comment(&comment).await?;
        page.expect(view.comment_by_text(&comment)).to_be_visible().await
    })
    .await
}

async fn edit_article(ctx: ScenarioContext) -> E2eResult<()> {
    with_authenticated_page(&ctx.config, "ui::edit_article", |page, _user| async move {
        let form = ArticleFormPage::new(&page);
        let view = ArticleViewPage::new(&page);
        let mut gen = DataGenerator::new();
        let article = generated_article(&mut gen);

        publish(&page, &article).await?;
        page.expect(page.get_by_text(&article.title).first()).to_be_visible().await?;

        view.goto_edit_article().await?;

        // Same title and tags, new description and body
        let updated = ArticleBuilder::new()
            .with_title(article.title.clone())
            .with_description(gen.paragraph())
            .with_body(gen.paragraphs(2))
            .with_tags(article.tags.clone())
            .build();

        form.create_and_publish_article(&updated.title, &updated.description, &updated.body, &updated.tag_list())
            .await?;

        // Markdown renders each line as its own paragraph
        for paragraph in updated.body.lines() {
            page.expect(page.get_by_text(paragraph).first()).to_be_visible().await?;
        }
        Ok(())
    })
    .await
}

async fn favorite_article(ctx: ScenarioContext) -> E2eResult<()> {
    let base_url = ctx.config.realworld.base_url.clone();
    with_authenticated_page(&ctx.config, "ui::favorite_article", |page, user| async move {
        let view = ArticleViewPage::new(&page);
        let profile = ProfilePage::new(&page);
        let article = generated_article(&mut DataGenerator::new());

        publish(&page, &article).await?;

        page.expect(view.favorite_button())
            .with_timeout(FAVORITE_BUTTON_TIMEOUT)
            .to_be_visible()
            .await?;
        view.favorite_article().await?;

        profile.open_favorites(&base_url, &user.name).await?;
        profile.goto_favorited_articles().await?;

        page.expect(page.get_by_text(&article.title).first()).to_be_visible().await
    })
    .await
}
