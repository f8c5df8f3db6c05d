//! Scenario registry
//!
//! A scenario is a named async function over a [`ScenarioContext`]. The
//! runner decides which ones run and how many at once.

use futures::future::BoxFuture;
use std::sync::Arc;

use crate::airport::AirportFacade;
use crate::config::SuiteConfig;
use crate::error::E2eResult;

pub mod airport_api;
pub mod articles;

pub type ScenarioFuture = BoxFuture<'static, E2eResult<()>>;

/// Shared, read-only inputs of a scenario
#[derive(Clone)]
pub struct ScenarioContext {
    pub config: Arc<SuiteConfig>,
    pub airport: AirportFacade,
}

/// One registered test case
#[derive(Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
    pub run: fn(ScenarioContext) -> ScenarioFuture,
}

impl Scenario {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(&tag)
    }
}

impl std::fmt::Debug for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .finish()
    }
}

/// Every scenario of the suite, API first
pub fn all() -> Vec<Scenario> {
    let mut scenarios = airport_api::scenarios();
    scenarios.extend(articles::scenarios());
    scenarios
}
