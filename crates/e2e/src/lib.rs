//! QA Guru demo-application E2E suite
//!
//! This crate drives two external demo systems and asserts on what they
//! return:
//! - the Airport Gap REST API, through [`airport::AirportFacade`]
//! - the RealWorld web application, through Playwright page objects
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Scenario Runner (Rust)                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestRunner                                                  │
//! │    ├── run(all, selection) -> TestSuiteResult               │
//! │    ├── run_scenario(scenario) -> TestResult                 │
//! │    └── write_results(results) -> test-results.json          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Scenario (api::*, ui::*)                                   │
//! │    ├── builders / DataGenerator   (qaguru-common)           │
//! │    ├── AirportFacade  ──HTTP──▶  airportgap.com/api         │
//! │    └── fixture ─▶ Page objects ─▶ Page                      │
//! │                                     │ JSON lines            │
//! │                                     ▼                       │
//! │                        node driver.js (Playwright)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod config;
pub mod step;
pub mod playwright;
pub mod airport;
pub mod pages;
pub mod fixture;
pub mod scenarios;
pub mod runner;

pub use config::SuiteConfig;
pub use error::{E2eError, E2eResult, FailureKind};
pub use playwright::Page;
pub use runner::TestRunner;
pub use step::{Locator, Step};
