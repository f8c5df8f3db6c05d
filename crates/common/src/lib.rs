//! QA Guru suite common library
//!
//! Fixture records, fluent builders and the data generator shared by the
//! API and UI scenarios.

pub mod builders;
pub mod generator;
pub mod types;

pub use builders::{ArticleBuilder, UserBuilder};
pub use generator::DataGenerator;
pub use types::{Article, User};

/// Suite version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
