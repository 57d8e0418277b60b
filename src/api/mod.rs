mod queries;
mod query;

pub use query::{Order, Query};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::config::{ConfigError, EnvConfig};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("network error: {0}")]
    Network(String),
    #[error("request failed ({status}): {body}")]
    Http { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Parse(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    fn network(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }

    fn parse(e: impl std::fmt::Display) -> Self {
        Self::Parse(e.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Client for the PostgREST endpoint at `<SUPABASE_URL>/rest/v1`.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    pub(crate) base_url: String,
    pub(crate) anon_key: String,
}

impl ApiClient {
    pub fn new(base_url: String, anon_key: String) -> Self {
        Self { base_url, anon_key }
    }

    pub fn from_config(config: &EnvConfig) -> Self {
        Self::new(config.rest_url(), config.supabase_anon_key.clone())
    }

    fn with_auth_headers(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let req = req.header("apikey", &self.anon_key);
        if self.anon_key.is_empty() {
            req
        } else {
            req.header("Authorization", format!("Bearer {}", self.anon_key))
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
        let res = self
            .with_auth_headers(req)
            .send()
            .await
            .map_err(ApiError::network)?;

        let status = res.status();
        if status.is_success() {
            Ok(res)
        } else if status.as_u16() == 401 {
            Err(ApiError::Unauthorized)
        } else {
            let body = res.text().await.unwrap_or_default();
            Err(ApiError::Http {
                status: status.as_u16(),
                body,
            })
        }
    }

    pub async fn select<T: DeserializeOwned>(&self, query: &Query) -> ApiResult<Vec<T>> {
        let client = reqwest::Client::new();
        let res = self.send(client.get(self.url(&query.to_path()))).await?;
        res.json().await.map_err(ApiError::parse)
    }

    /// First matching row, if any.
    pub async fn select_one<T: DeserializeOwned>(&self, query: &Query) -> ApiResult<Option<T>> {
        let rows: Vec<T> = self.select(&query.clone().limit(1)).await?;
        Ok(rows.into_iter().next())
    }

    /// Insert one row and return it as stored.
    pub async fn insert<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> ApiResult<T> {
        let client = reqwest::Client::new();
        let req = client
            .post(self.url(table))
            .header("Prefer", "return=representation")
            .json(body);
        let rows: Vec<T> = self
            .send(req)
            .await?
            .json()
            .await
            .map_err(ApiError::parse)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| ApiError::Parse(format!("insert into {table} returned no rows")))
    }

    pub async fn update<B: Serialize>(&self, query: &Query, body: &B) -> ApiResult<()> {
        let client = reqwest::Client::new();
        let url = self.url(&format!("{}?{}", query.table_name(), query.filter_string()));
        let req = client
            .patch(url)
            .header("Prefer", "return=minimal")
            .json(body);
        self.send(req).await.map(|_| ())
    }

    pub async fn delete(&self, query: &Query) -> ApiResult<()> {
        let client = reqwest::Client::new();
        let url = self.url(&format!("{}?{}", query.table_name(), query.filter_string()));
        self.send(client.delete(url)).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_from_config_targets_rest_root() {
        let cfg = EnvConfig {
            supabase_url: "https://abc.supabase.co".to_string(),
            supabase_anon_key: "anon".to_string(),
            ..Default::default()
        };
        let client = ApiClient::from_config(&cfg);
        assert_eq!(
            client.url(&Query::table("students").eq("id", "1").to_path()),
            "https://abc.supabase.co/rest/v1/students?select=*&id=eq.1"
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ApiError::Unauthorized.to_string(), "Unauthorized");
        assert_eq!(
            ApiError::Http {
                status: 404,
                body: "missing".to_string()
            }
            .to_string(),
            "request failed (404): missing"
        );
        let from_config: ApiError = ConfigError::MissingAnonKey.into();
        assert_eq!(from_config.to_string(), "anon key is missing");
    }
}
