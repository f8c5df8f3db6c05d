//! Airport Gap API facade
//!
//! One method per endpoint. Each issues a single request and returns the
//! parsed body as is; non-2xx statuses surface as [`E2eError::Http`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use qaguru_common::DataGenerator;

use crate::config::AirportConfig;
use crate::error::{E2eError, E2eResult};

/// `POST /tokens` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// JSON:API resource object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl Resource {
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }
}

/// `{ "data": ... }` envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
}

pub type SingleDocument = Document<Resource>;
pub type CollectionDocument = Document<Vec<Resource>>;

/// Named access to the Airport Gap endpoints
#[derive(Debug, Clone)]
pub struct AirportFacade {
    client: reqwest::Client,
    config: AirportConfig,
}

impl AirportFacade {
    pub fn new(config: AirportConfig) -> E2eResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: AirportConfig) -> Self {
        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn parse<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> E2eResult<T> {
        let resp = resp.error_for_status()?;
        Ok(resp.json::<T>().await?)
    }

    /// Issue a token for the configured account
    pub async fn get_authenticated_user(&self) -> E2eResult<TokenResponse> {
        let (email, password) = self.config.credentials()?;
        debug!("POST /tokens as {}", email);

        let resp = self
            .client
            .post(self.url("/tokens"))
            .form(&[("email", email), ("password", password)])
            .send()
            .await?;
        Self::parse(resp).await
    }

    pub async fn get_all_airports(&self) -> E2eResult<CollectionDocument> {
        debug!("GET /airports");
        let resp = self.client.get(self.url("/airports")).send().await?;
        Self::parse(resp).await
    }

    pub async fn get_airport_by_id(&self, id: &str) -> E2eResult<SingleDocument> {
        debug!("GET /airports/{}", id);
        let resp = self
            .client
            .get(self.url(&format!("/airports/{}", id)))
            .send()
            .await?;
        Self::parse(resp).await
    }

    /// Distance between two airport codes
    pub async fn get_distance(&self, from: &str, to: &str) -> E2eResult<SingleDocument> {
        debug!("POST /airports/distance {} -> {}", from, to);
        let resp = self
            .client
            .post(self.url("/airports/distance"))
            .form(&[("from", from), ("to", to)])
            .send()
            .await?;
        Self::parse(resp).await
    }

    /// Favorite `airport_id` with `note` on the authenticated account
    pub async fn add_favorite_airport(&self, airport_id: &str, note: &str) -> E2eResult<SingleDocument> {
        let token = self.get_authenticated_user().await?.token;
        debug!("POST /favorites {}", airport_id);

        let resp = self
            .client
            .post(self.url("/favorites"))
            .header(reqwest::header::AUTHORIZATION, bearer(&token))
            .form(&[("airport_id", airport_id), ("note", note)])
            .send()
            .await?;
        Self::parse(resp).await
    }

    /// Favorite a generated airport with a generated note
    pub async fn add_random_favorite_airport(&self) -> E2eResult<SingleDocument> {
        let mut gen = DataGenerator::new();
        let airport_id = gen.airport_id();
        let note = gen.airport_note();
        self.add_favorite_airport(&airport_id, &note).await
    }

    pub async fn list_favorites(&self) -> E2eResult<CollectionDocument> {
        let token = self.get_authenticated_user().await?.token;
        debug!("GET /favorites");

        let resp = self
            .client
            .get(self.url("/favorites"))
            .header(reqwest::header::AUTHORIZATION, bearer(&token))
            .send()
            .await?;
        Self::parse(resp).await
    }

    /// Remove a favorite; the API answers 204 with no body
    pub async fn delete_favorite(&self, favorite_id: &str) -> E2eResult<()> {
        let token = self.get_authenticated_user().await?.token;
        debug!("DELETE /favorites/{}", favorite_id);

        self.client
            .delete(self.url(&format!("/favorites/{}", favorite_id)))
            .header(reqwest::header::AUTHORIZATION, bearer(&token))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer token={}", token)
}

/// Numeric attribute of a resource
pub fn f64_attribute(resource: &Resource, name: &str) -> E2eResult<f64> {
    resource
        .attribute(name)
        .and_then(Value::as_f64)
        .ok_or_else(|| E2eError::AssertionFailed(format!("attribute {} is not a number", name)))
}
