//! Fluent fixture builders
//!
//! Unset fields fall back to generated values when the record is built.
//! Builders do not validate: an empty title is passed through as is.

use std::collections::BTreeSet;

use crate::generator::DataGenerator;
use crate::types::{Article, User};

/// Builder for [`User`]
#[derive(Debug, Clone, Default)]
pub struct UserBuilder {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

impl UserBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn build(self) -> User {
        self.build_with(&mut DataGenerator::new())
    }

    /// Build, drawing defaults from `gen`
    pub fn build_with(self, gen: &mut DataGenerator) -> User {
        User {
            name: self.name.unwrap_or_else(|| gen.username()),
            email: self.email.unwrap_or_else(|| gen.email()),
            password: self.password.unwrap_or_else(|| gen.password()),
        }
    }
}

/// Start from an already registered account
impl From<User> for UserBuilder {
    fn from(user: User) -> Self {
        Self {
            name: Some(user.name),
            email: Some(user.email),
            password: Some(user.password),
        }
    }
}

/// Builder for [`Article`]
#[derive(Debug, Clone, Default)]
pub struct ArticleBuilder {
    title: Option<String>,
    description: Option<String>,
    body: Option<String>,
    tags: Option<BTreeSet<String>>,
}

impl ArticleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Article {
        self.build_with(&mut DataGenerator::new())
    }

    /// Build, drawing defaults from `gen`
    pub fn build_with(self, gen: &mut DataGenerator) -> Article {
        Article {
            title: self.title.unwrap_or_else(|| gen.sentence()),
            description: self.description.unwrap_or_else(|| gen.paragraph()),
            body: self.body.unwrap_or_else(|| gen.paragraphs(2)),
            tags: self
                .tags
                .unwrap_or_else(|| BTreeSet::from([gen.word()])),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_defaults_are_generated() {
        let user = UserBuilder::new().build();
        assert!(!user.name.is_empty());
        assert!(user.email.contains('@'));
        assert_eq!(user.password.len(), 12);
    }

    #[test]
    fn test_user_overrides_win() {
        let user = UserBuilder::new()
            .with_name("reviewer")
            .with_password("hunter2")
            .build();
        assert_eq!(user.name, "reviewer");
        assert_eq!(user.password, "hunter2");
        assert!(user.email.contains('@'));
    }

    #[test]
    fn test_user_from_existing_account() {
        let account = User {
            name: "qa".into(),
            email: "qa@example.com".into(),
            password: "pw".into(),
        };
        let user = UserBuilder::from(account.clone()).build();
        assert_eq!(user, account);
    }

    #[test]
    fn test_article_defaults() {
        let mut gen = DataGenerator::seeded(11);
        let article = ArticleBuilder::new().build_with(&mut gen);
        assert!(article.title.ends_with('.'));
        assert_eq!(article.body.lines().count(), 2);
        assert_eq!(article.tags.len(), 1);
    }

    #[test]
    fn test_article_edit_keeps_title_and_tags() {
        let original = ArticleBuilder::new()
            .with_tags(["rust", "testing"])
            .build();
        let updated = ArticleBuilder::new()
            .with_title(original.title.clone())
            .with_tags(original.tags.clone())
            .build();

        assert_eq!(updated.title, original.title);
        assert_eq!(updated.tags, original.tags);
    }

    #[test]
    fn test_no_validation_on_empty_fields() {
        let article = ArticleBuilder::new()
            .with_title("")
            .with_tags(Vec::<String>::new())
            .build();
        assert_eq!(article.title, "");
        assert!(article.tags.is_empty());
    }

    #[test]
    fn test_seeded_builders_are_deterministic() {
        let a = ArticleBuilder::new().build_with(&mut DataGenerator::seeded(5));
        let b = ArticleBuilder::new().build_with(&mut DataGenerator::seeded(5));
        assert_eq!(a, b);
    }
}
