// ABOUTME: FatSecret Platform API client for food search
// ABOUTME: Signs foods.search requests with OAuth 1.0 HMAC-SHA1 and normalizes the reply
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitlog Contributors

//! `FatSecret` Platform API Client
//!
//! Requests are signed with the two-legged OAuth 1.0 flow: every parameter is
//! percent-encoded, sorted by name and folded into a signature base string
//! that is signed with `HMAC-SHA1` under the key `<consumer_secret>&`.
//!
//! # API Reference
//! <https://platform.fatsecret.com/docs/guides/authentication/oauth1/two-legged>

use std::collections::BTreeMap;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use ring::hmac;
use serde::Deserialize;

use super::{FoodSearchHit, FoodSearchProvider};
use crate::config::FatSecretConfig;
use crate::constants::{fatsecret, limits, service_names};
use crate::errors::{external_error, AppError, AppResult};

const NONCE_LENGTH: usize = 16;

/// Search reply envelope; `FatSecret` reports errors with HTTP 200
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    foods: Option<FoodsPage>,
    error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
struct FoodsPage {
    /// Absent when nothing matched, an object for a single hit
    food: Option<OneOrMany<FoodSearchHit>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: i64,
    message: String,
}

/// `FatSecret` Platform API client
pub struct FatSecretClient {
    config: FatSecretConfig,
    http_client: reqwest::Client,
}

impl FatSecretClient {
    /// Create a new `FatSecret` client
    #[must_use]
    pub fn new(config: FatSecretConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    fn credentials(&self) -> AppResult<(&str, &str)> {
        match (&self.config.consumer_key, &self.config.consumer_secret) {
            (Some(key), Some(secret)) => Ok((key, secret)),
            _ => Err(AppError::external_unavailable(service_names::FATSECRET)),
        }
    }

    /// Parameters of a signed `foods.search` call, `oauth_signature` included
    fn signed_search_params(
        &self,
        query: &str,
        max_results: u32,
    ) -> AppResult<BTreeMap<&'static str, String>> {
        let (consumer_key, consumer_secret) = self.credentials()?;

        let nonce: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(NONCE_LENGTH)
            .map(char::from)
            .collect();

        let mut params = BTreeMap::from([
            ("method", fatsecret::FOODS_SEARCH_METHOD.to_owned()),
            ("oauth_consumer_key", consumer_key.to_owned()),
            ("oauth_nonce", nonce),
            ("oauth_timestamp", Utc::now().timestamp().to_string()),
            ("oauth_signature_method", fatsecret::SIGNATURE_METHOD.to_owned()),
            ("oauth_version", fatsecret::OAUTH_VERSION.to_owned()),
            ("format", "json".to_owned()),
            ("search_expression", query.to_owned()),
            ("max_results", max_results.to_string()),
        ]);

        let base_string = signature_base_string("GET", &self.config.base_url, &params);
        params.insert("oauth_signature", sign(&base_string, consumer_secret));
        Ok(params)
    }
}

/// OAuth 1.0 signature base string: `METHOD&enc(url)&enc(sorted params)`
fn signature_base_string(method: &str, url: &str, params: &BTreeMap<&str, String>) -> String {
    let param_string = params
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{method}&{}&{}",
        urlencoding::encode(url),
        urlencoding::encode(&param_string)
    )
}

/// Base64 `HMAC-SHA1` of the base string under `enc(secret)&`
fn sign(base_string: &str, consumer_secret: &str) -> String {
    let signing_key = format!("{}&", urlencoding::encode(consumer_secret));
    let key = hmac::Key::new(hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY, signing_key.as_bytes());
    STANDARD.encode(hmac::sign(&key, base_string.as_bytes()).as_ref())
}

fn hits_from_envelope(envelope: SearchEnvelope) -> AppResult<Vec<FoodSearchHit>> {
    if let Some(error) = envelope.error {
        return Err(AppError::external_service(
            service_names::FATSECRET,
            format!("error {}: {}", error.code, error.message),
        ));
    }

    Ok(envelope
        .foods
        .and_then(|page| page.food)
        .map(OneOrMany::into_vec)
        .unwrap_or_default())
}

#[async_trait]
impl FoodSearchProvider for FatSecretClient {
    async fn search_foods(&self, query: &str, max_results: u32) -> AppResult<Vec<FoodSearchHit>> {
        if query.trim().is_empty() {
            return Err(AppError::invalid_input("Search query cannot be empty"));
        }
        if max_results == 0 || max_results > limits::MAX_FOOD_SEARCH_RESULTS {
            return Err(AppError::out_of_range(format!(
                "max_results must be between 1 and {}",
                limits::MAX_FOOD_SEARCH_RESULTS
            )));
        }

        let params = self.signed_search_params(query, max_results)?;

        tracing::debug!(query, max_results, "Searching FatSecret foods");
        let response = self
            .http_client
            .get(&self.config.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| external_error(service_names::FATSECRET, &e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(
                service_names::FATSECRET,
                format!("HTTP {status}: {body}"),
            ));
        }

        let envelope: SearchEnvelope = response.json().await.map_err(|e| {
            AppError::external_service(service_names::FATSECRET, format!("JSON parse error: {e}"))
        })?;

        hits_from_envelope(envelope)
    }
}
