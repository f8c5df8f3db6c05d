//! Airport Gap API scenarios

use futures::FutureExt;

use qaguru_common::DataGenerator;

use super::{Scenario, ScenarioContext};
use crate::airport::f64_attribute;
use crate::error::E2eResult;
use crate::{ensure, ensure_eq};

/// Token issued to the demo account
pub const EXPECTED_TOKEN: &str = "kNwDUV8DK9SF1ZhGx9NjKSSx";

/// Distance reported for KIX -> NRT
pub const KIX_NRT_KILOMETERS: f64 = 490.8053652969214;

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "api::auth_token",
            description: "Issue an authorization token",
            tags: &["api", "smoke"],
            run: |ctx| auth_token(ctx).boxed(),
        },
        Scenario {
            name: "api::list_airports",
            description: "List airports",
            tags: &["api"],
            run: |ctx| list_airports(ctx).boxed(),
        },
        Scenario {
            name: "api::airport_by_id",
            description: "Fetch an airport by id",
            tags: &["api"],
            run: |ctx| airport_by_id(ctx).boxed(),
        },
        Scenario {
            name: "api::distance",
            description: "Distance between two airports",
            tags: &["api"],
            run: |ctx| distance(ctx).boxed(),
        },
        Scenario {
            name: "api::favorite_airport",
            description: "Add an airport to favorites",
            tags: &["api"],
            run: |ctx| favorite_airport(ctx).boxed(),
        },
    ]
}

async fn auth_token(ctx: ScenarioContext) -> E2eResult<()> {
    let token = ctx.airport.get_authenticated_user().await?.token;

    ensure!(!token.is_empty(), "token is empty");
    ensure_eq!(token.as_str(), EXPECTED_TOKEN, "token");
    Ok(())
}

async fn list_airports(ctx: ScenarioContext) -> E2eResult<()> {
    let airports = ctx.airport.get_all_airports().await?;

    ensure!(!airports.data.is_empty(), "airport list is empty");
    Ok(())
}

async fn airport_by_id(ctx: ScenarioContext) -> E2eResult<()> {
    let id = DataGenerator::new().airport_id();
    let airport = ctx.airport.get_airport_by_id(&id).await?;

    for attribute in ["icao", "city"] {
        ensure!(
            airport.data.has_attribute(attribute),
            "airport {} has no {} attribute",
            id,
            attribute
        );
    }
    Ok(())
}

async fn distance(ctx: ScenarioContext) -> E2eResult<()> {
    let distance = ctx.airport.get_distance("KIX", "NRT").await?;

    ensure!(distance.data.has_attribute("kilometers"), "no kilometers attribute");
    ensure_eq!(f64_attribute(&distance.data, "kilometers")?, KIX_NRT_KILOMETERS, "kilometers");
    Ok(())
}

async fn favorite_airport(ctx: ScenarioContext) -> E2eResult<()> {
    let favorite = ctx.airport.add_random_favorite_airport().await?;

    ensure!(!favorite.data.id.is_empty(), "favorite has no id");
    ensure!(favorite.data.has_attribute("note"), "favorite has no note attribute");
    Ok(())
}
