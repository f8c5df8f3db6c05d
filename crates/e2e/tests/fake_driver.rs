//! Page, page objects and fixture against a scripted stand-in for the
//! Node.js driver. The stand-in answers every step with success, except
//! steps mentioning `Missing` (timeout) and `Wrong` (assertion).

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use qaguru_common::User;
use qaguru_e2e::fixture::with_authenticated_page;
use qaguru_e2e::pages::{ArticleFormPage, ArticleViewPage, MainPage, ProfilePage};
use qaguru_e2e::playwright::PlaywrightConfig;
use qaguru_e2e::step::WaitState;
use qaguru_e2e::{E2eError, Locator, Page, SuiteConfig};

const FAKE_DRIVER: &str = r#"#!/bin/sh
echo '{"ok":true}'
while IFS= read -r line; do
  id=$(printf '%s' "$line" | sed -n 's/^{"id":\([0-9]*\).*/\1/p')
  case "$line" in
    *'"action":"close"'*)
      echo "{\"id\":$id,\"ok\":true}"
      exit 0;;
    *'"action":"url"'*)
      echo "{\"id\":$id,\"ok\":true,\"value\":\"https://realworld.qa.guru/#/editor\"}";;
    *Missing*)
      echo "{\"id\":$id,\"ok\":false,\"kind\":\"timeout\",\"message\":\"locator.waitFor: Timeout 5000ms exceeded\"}";;
    *Wrong*)
      echo "{\"id\":$id,\"ok\":false,\"kind\":\"assertion\",\"message\":\"expected text\"}";;
    *)
      echo "{\"id\":$id,\"ok\":true,\"value\":null}";;
  esac
done
"#;

fn fake_node() -> &'static Path {
    static PATH: OnceLock<PathBuf> = OnceLock::new();
    PATH.get_or_init(|| {
        let dir = tempfile::tempdir().unwrap().into_path();
        let path = dir.join("fake-node");
        std::fs::write(&path, FAKE_DRIVER).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    })
}

fn playwright_config() -> PlaywrightConfig {
    PlaywrightConfig {
        node_binary: fake_node().to_path_buf(),
        startup_timeout_ms: 5_000,
        ..Default::default()
    }
}

#[tokio::test]
async fn page_round_trips_steps() {
    let page = Page::launch(&playwright_config()).await.unwrap();

    page.goto("https://realworld.qa.guru/#/").await.unwrap();
    page.click(&Locator::role("link", "New Article")).await.unwrap();
    assert_eq!(page.url().await.unwrap(), "https://realworld.qa.guru/#/editor");

    page.close().await.unwrap();
    assert!(matches!(page.url().await, Err(E2eError::Playwright(_))));
}

#[tokio::test]
async fn failures_map_to_error_kinds() {
    let page = Page::launch(&playwright_config()).await.unwrap();

    let timeout = page.expect(Locator::text("Missing")).to_be_visible().await;
    assert!(matches!(timeout, Err(E2eError::Timeout(_))));

    let assertion = page.expect(Locator::css("h1")).to_have_text("Wrong").await;
    assert!(matches!(assertion, Err(E2eError::AssertionFailed(_))));

    // The session survives failed steps
    page.expect(Locator::css("h1")).to_be_visible().await.unwrap();
    page.close().await.unwrap();
}

#[tokio::test]
async fn page_waits_for_element_states() {
    let page = Page::launch(&playwright_config()).await.unwrap();

    page.wait_for(&Locator::css(".article-page"), WaitState::Visible, Some(Duration::from_secs(2)))
        .await
        .unwrap();
    page.expect(Locator::exact_text("Test comment")).to_be_hidden().await.unwrap();

    let missing = page.wait_for(&Locator::css("#Missing"), WaitState::Attached, None).await;
    assert!(matches!(missing, Err(E2eError::Timeout(_))));

    page.close().await.unwrap();
}

#[tokio::test]
async fn page_objects_drive_the_session() {
    let page = Page::launch(&playwright_config()).await.unwrap();
    let main_page = MainPage::new(&page);
    let form = ArticleFormPage::new(&page);
    let view = ArticleViewPage::new(&page);
    let profile = ProfilePage::new(&page);

    main_page.open("https://realworld.qa.guru/#/").await.unwrap();
    main_page.login("qa@example.com", "pw").await.unwrap();
    form.goto_new_article().await.unwrap();
    form.create_and_publish_article("Title", "About", "Body", &["rust", "qa"])
        .await
        .unwrap();
    view.add_comment("Test comment").await.unwrap();
    page.expect(view.comment_by_text("Test comment")).to_be_visible().await.unwrap();
    view.favorite_article().await.unwrap();
    profile.open_favorites("https://realworld.qa.guru/#/", "qa").await.unwrap();
    profile.goto_favorited_articles().await.unwrap();
    main_page.open_main_page().await.unwrap();
    main_page.open_global_feed().await.unwrap();
    page.expect(main_page.author_link("qa")).to_be_visible().await.unwrap();

    page.close().await.unwrap();
}

fn suite_config(output_dir: &Path) -> SuiteConfig {
    let mut config = SuiteConfig::default();
    config.playwright = playwright_config();
    config.output_dir = output_dir.to_path_buf();
    config.realworld.account = Some(User {
        name: "qa".into(),
        email: "qa@example.com".into(),
        password: "pw".into(),
    });
    config
}

#[tokio::test]
async fn fixture_passes_signed_in_user_to_body() {
    let dir = tempfile::tempdir().unwrap();
    let config = suite_config(dir.path());

    let result = with_authenticated_page(&config, "fixture::ok", |page, user| async move {
        assert_eq!(user.name, "qa");
        page.goto("https://realworld.qa.guru/#/editor").await
    })
    .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn fixture_returns_body_failure() {
    let dir = tempfile::tempdir().unwrap();
    let config = suite_config(dir.path());

    let result = with_authenticated_page(&config, "fixture::fails", |page, _user| async move {
        page.expect(Locator::text("Missing")).to_be_visible().await
    })
    .await;

    assert!(matches!(result, Err(E2eError::Timeout(_))));
}
