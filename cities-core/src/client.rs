use async_trait::async_trait;
use reqwest::{
    Client, Response,
    header::{CONTENT_TYPE, HeaderValue},
};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tracing::debug;

use crate::{
    error::LoadError,
    model::{City, Credentials, LoginResponse, SessionToken},
};

pub const LOGIN_PATH: &str = "/api/login";
pub const CITIES_PATH: &str = "/api/cidades";
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// The remote city service: a login call and an authenticated listing call.
#[async_trait]
pub trait CityApi: Send + Sync + Debug {
    async fn login(&self, credentials: &Credentials) -> Result<SessionToken, LoadError>;

    async fn fetch_cities(&self, token: &SessionToken) -> Result<Vec<City>, LoadError>;
}

/// [`CityApi`] over HTTP.
///
/// Uses the default reqwest client, which has no request timeout.
#[derive(Debug, Clone)]
pub struct HttpCityApi {
    base_url: String,
    http: Client,
}

impl HttpCityApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http: Client::new() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl CityApi for HttpCityApi {
    async fn login(&self, credentials: &Credentials) -> Result<SessionToken, LoadError> {
        let url = self.url(LOGIN_PATH);
        debug!(%url, "logging in");

        let res = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .json(credentials)
            .send()
            .await
            .map_err(|source| LoadError::Transport { url: url.clone(), source })?;

        let status = res.status();
        let body = read_body(res, &url).await?;

        if !status.is_success() {
            return Err(LoadError::Authentication { status, body: truncate_body(&body) });
        }

        let parsed: LoginResponse = parse_json(&body, "login")?;
        Ok(SessionToken::from_json(parsed.token))
    }

    async fn fetch_cities(&self, token: &SessionToken) -> Result<Vec<City>, LoadError> {
        let url = self.url(CITIES_PATH);
        debug!(%url, token_present = token.is_present(), "fetching cities");

        let res = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .header(ACCESS_TOKEN_HEADER, token.header_value())
            .send()
            .await
            .map_err(|source| LoadError::Transport { url: url.clone(), source })?;

        let status = res.status();
        let body = read_body(res, &url).await?;

        if !status.is_success() {
            return Err(LoadError::Fetch { status, body: truncate_body(&body) });
        }

        parse_json(&body, "cities")
    }
}

async fn read_body(res: Response, url: &str) -> Result<String, LoadError> {
    res.text().await.map_err(|source| LoadError::Transport { url: url.to_string(), source })
}

fn parse_json<T: DeserializeOwned>(body: &str, what: &'static str) -> Result<T, LoadError> {
    serde_json::from_str(body).map_err(|source| LoadError::Parse { what, source })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
