//! Page objects for the RealWorld application
//!
//! Each page object borrows the active [`Page`](crate::playwright::Page) and
//! nothing else. Callers are responsible for ordering, e.g. navigating
//! before interacting.

pub mod article_form;
pub mod article_view;
pub mod main_page;
pub mod profile;

pub use article_form::ArticleFormPage;
pub use article_view::ArticleViewPage;
pub use main_page::MainPage;
pub use profile::ProfilePage;
