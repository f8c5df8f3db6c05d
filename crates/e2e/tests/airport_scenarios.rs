//! API scenarios end to end against a mock Airport Gap
//!
//! Each scenario runs through its registry entry, so the literal
//! assertions it holds are exercised both for the expected payload and
//! for a payload that drifted from it.

use std::sync::Arc;

use mockito::{Matcher, ServerGuard};
use serde_json::{json, Value};

use qaguru_e2e::airport::AirportFacade;
use qaguru_e2e::config::AirportConfig;
use qaguru_e2e::scenarios::airport_api::{self, EXPECTED_TOKEN, KIX_NRT_KILOMETERS};
use qaguru_e2e::scenarios::ScenarioContext;
use qaguru_e2e::{E2eResult, FailureKind, SuiteConfig};

fn context(server: &ServerGuard) -> ScenarioContext {
    let airport = AirportConfig {
        base_url: server.url(),
        email: Some("qa@example.com".to_string()),
        password: Some("secret".to_string()),
        ..Default::default()
    };
    let config = SuiteConfig {
        airport: airport.clone(),
        ..Default::default()
    };
    ScenarioContext {
        config: Arc::new(config),
        airport: AirportFacade::new(airport).unwrap(),
    }
}

async fn run(name: &str, server: &ServerGuard) -> E2eResult<()> {
    let scenario = airport_api::scenarios()
        .into_iter()
        .find(|s| s.name == name)
        .unwrap_or_else(|| panic!("no scenario named {}", name));
    (scenario.run)(context(server)).await
}

async fn respond(server: &mut ServerGuard, method: &str, path: Matcher, status: usize, body: Value) {
    server
        .mock(method, path)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;
}

fn distance_body(kilometers: f64) -> Value {
    json!({
        "data": {
            "id": "KIX-NRT",
            "type": "airport_distance",
            "attributes": { "kilometers": kilometers, "miles": 304.76, "nautical_miles": 264.83 }
        }
    })
}

#[tokio::test]
async fn auth_token_passes_on_expected_token() {
    let mut server = mockito::Server::new_async().await;
    respond(&mut server, "POST", "/tokens".into(), 200, json!({ "token": EXPECTED_TOKEN })).await;

    run("api::auth_token", &server).await.unwrap();
}

#[tokio::test]
async fn auth_token_fails_on_different_token() {
    let mut server = mockito::Server::new_async().await;
    respond(&mut server, "POST", "/tokens".into(), 200, json!({ "token": "rotatedToken123" })).await;

    let err = run("api::auth_token", &server).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Assertion);
    assert!(err.to_string().contains("rotatedToken123"));
}

#[tokio::test]
async fn auth_token_fails_on_empty_token() {
    let mut server = mockito::Server::new_async().await;
    respond(&mut server, "POST", "/tokens".into(), 200, json!({ "token": "" })).await;

    let err = run("api::auth_token", &server).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Assertion);
}

#[tokio::test]
async fn list_airports_requires_entries() {
    let mut server = mockito::Server::new_async().await;
    respond(
        &mut server,
        "GET",
        "/airports".into(),
        200,
        json!({ "data": [ { "id": "GKA", "type": "airport", "attributes": { "city": "Goroka" } } ] }),
    )
    .await;
    run("api::list_airports", &server).await.unwrap();

    let mut empty = mockito::Server::new_async().await;
    respond(&mut empty, "GET", "/airports".into(), 200, json!({ "data": [] })).await;
    let err = run("api::list_airports", &empty).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Assertion);
}

#[tokio::test]
async fn airport_by_id_requires_icao_and_city() {
    let airport = Matcher::Regex(r"^/airports/[A-Z]{3}$".into());

    let mut server = mockito::Server::new_async().await;
    respond(
        &mut server,
        "GET",
        airport.clone(),
        200,
        json!({ "data": { "id": "KIX", "type": "airport", "attributes": { "icao": "RJBB", "city": "Osaka" } } }),
    )
    .await;
    run("api::airport_by_id", &server).await.unwrap();

    let mut drifted = mockito::Server::new_async().await;
    respond(
        &mut drifted,
        "GET",
        airport,
        200,
        json!({ "data": { "id": "KIX", "type": "airport", "attributes": { "icao": "RJBB" } } }),
    )
    .await;
    let err = run("api::airport_by_id", &drifted).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Assertion);
    assert!(err.to_string().contains("city"));
}

#[tokio::test]
async fn distance_passes_on_exact_kilometers() {
    let mut server = mockito::Server::new_async().await;
    respond(&mut server, "POST", "/airports/distance".into(), 200, distance_body(KIX_NRT_KILOMETERS)).await;

    run("api::distance", &server).await.unwrap();
}

#[tokio::test]
async fn distance_fails_on_rounded_kilometers() {
    let mut server = mockito::Server::new_async().await;
    respond(&mut server, "POST", "/airports/distance".into(), 200, distance_body(490.8)).await;

    let err = run("api::distance", &server).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Assertion);
}

#[tokio::test]
async fn favorite_airport_requires_id_and_note() {
    let mut server = mockito::Server::new_async().await;
    respond(&mut server, "POST", "/tokens".into(), 200, json!({ "token": EXPECTED_TOKEN })).await;
    respond(
        &mut server,
        "POST",
        "/favorites".into(),
        201,
        json!({ "data": { "id": "3057", "type": "favorite", "attributes": { "note": "Layover spot" } } }),
    )
    .await;
    run("api::favorite_airport", &server).await.unwrap();

    let mut drifted = mockito::Server::new_async().await;
    respond(&mut drifted, "POST", "/tokens".into(), 200, json!({ "token": EXPECTED_TOKEN })).await;
    respond(
        &mut drifted,
        "POST",
        "/favorites".into(),
        201,
        json!({ "data": { "id": "3057", "type": "favorite", "attributes": {} } }),
    )
    .await;
    let err = run("api::favorite_airport", &drifted).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Assertion);
    assert!(err.to_string().contains("note"));
}

#[tokio::test]
async fn service_error_is_not_an_assertion() {
    let mut server = mockito::Server::new_async().await;
    respond(&mut server, "POST", "/airports/distance".into(), 500, json!({ "errors": [] })).await;

    let err = run("api::distance", &server).await.unwrap_err();
    assert_eq!(err.kind(), FailureKind::Transport);
}
