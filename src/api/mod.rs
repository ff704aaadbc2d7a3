//! HTTP client for the Spy Cat Agency backend and the breed catalog.
//!
//! Every mutation helper issues exactly one request and returns as soon as
//! the response status is known; resynchronizing local state afterwards is
//! the caller's job. Non-2xx responses are mapped to the human-readable
//! `detail` field of the error body when one is present, else to a fixed
//! per-operation fallback string.

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{
    Breed, CatCreate, Mission, MissionAssign, MissionCreate, SalaryUpdate, SpyCat, TargetUpdate,
};

/// Default backend base URL (uvicorn's default bind).
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Default breed catalog endpoint.
pub const DEFAULT_BREED_API: &str = "https://api.thecatapi.com/v1/breeds";

// Fallback messages used when the error body carries no `detail` field.
const ERR_LIST_CATS: &str = "Failed to load spy cats";
const ERR_CREATE_CAT: &str = "Failed to create spy cat";
const ERR_UPDATE_SALARY: &str = "Failed to update salary";
const ERR_DELETE_CAT: &str = "Failed to delete spy cat";
const ERR_LIST_MISSIONS: &str = "Failed to load missions";
const ERR_CREATE_MISSION: &str = "Failed to create mission";
const ERR_UPDATE_TARGET: &str = "Failed to update target";
const ERR_ASSIGN_CAT: &str = "Failed to assign cat to mission";
const ERR_DELETE_MISSION: &str = "Failed to delete mission";
const ERR_LIST_BREEDS: &str = "Failed to load breed catalog";

/// Errors produced by backend or breed-catalog requests.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status. The string is the
    /// parsed `detail` message or the per-operation fallback.
    #[error("{0}")]
    Backend(String),

    /// Transport-level failure (connection refused, timeout, bad JSON).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Client over the backend REST API plus the external breed catalog.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    breed_api: String,
}

impl ApiClient {
    /// Create a client against the given backend base URL and breed
    /// catalog endpoint. Trailing slashes on the base URL are tolerated.
    pub fn new(base_url: impl Into<String>, breed_api: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            breed_api: breed_api.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET /spy-cats/
    pub async fn list_cats(&self) -> Result<Vec<SpyCat>, ApiError> {
        self.get_json(&self.url("/spy-cats/"), ERR_LIST_CATS).await
    }

    /// POST /spy-cats/
    pub async fn create_cat(&self, payload: &CatCreate) -> Result<(), ApiError> {
        let url = self.url("/spy-cats/");
        tracing::debug!(%url, name = %payload.name, "create cat");
        let resp = self.http.post(&url).json(payload).send().await?;
        check(resp, ERR_CREATE_CAT).await.map(|_| ())
    }

    /// PUT /spy-cats/{id}
    pub async fn update_salary(&self, cat_id: i64, salary: f64) -> Result<(), ApiError> {
        let url = self.url(&format!("/spy-cats/{}", cat_id));
        tracing::debug!(%url, salary, "update salary");
        let body = SalaryUpdate { salary };
        let resp = self.http.put(&url).json(&body).send().await?;
        check(resp, ERR_UPDATE_SALARY).await.map(|_| ())
    }

    /// DELETE /spy-cats/{id}
    pub async fn delete_cat(&self, cat_id: i64) -> Result<(), ApiError> {
        let url = self.url(&format!("/spy-cats/{}", cat_id));
        tracing::debug!(%url, "delete cat");
        let resp = self.http.delete(&url).send().await?;
        check(resp, ERR_DELETE_CAT).await.map(|_| ())
    }

    /// GET /missions/
    pub async fn list_missions(&self) -> Result<Vec<Mission>, ApiError> {
        self.get_json(&self.url("/missions/"), ERR_LIST_MISSIONS)
            .await
    }

    /// POST /missions/
    pub async fn create_mission(&self, payload: &MissionCreate) -> Result<(), ApiError> {
        let url = self.url("/missions/");
        tracing::debug!(%url, targets = payload.targets.len(), "create mission");
        let resp = self.http.post(&url).json(payload).send().await?;
        check(resp, ERR_CREATE_MISSION).await.map(|_| ())
    }

    /// PUT /targets/{id}
    pub async fn update_target(
        &self,
        target_id: i64,
        update: &TargetUpdate,
    ) -> Result<(), ApiError> {
        let url = self.url(&format!("/targets/{}", target_id));
        tracing::debug!(%url, "update target");
        let resp = self.http.put(&url).json(update).send().await?;
        check(resp, ERR_UPDATE_TARGET).await.map(|_| ())
    }

    /// PUT /missions/{id}/assign
    pub async fn assign_cat(&self, mission_id: i64, cat_id: i64) -> Result<(), ApiError> {
        let url = self.url(&format!("/missions/{}/assign", mission_id));
        tracing::debug!(%url, cat_id, "assign cat");
        let body = MissionAssign { cat_id };
        let resp = self.http.put(&url).json(&body).send().await?;
        check(resp, ERR_ASSIGN_CAT).await.map(|_| ())
    }

    /// DELETE /missions/{id}
    pub async fn delete_mission(&self, mission_id: i64) -> Result<(), ApiError> {
        let url = self.url(&format!("/missions/{}", mission_id));
        tracing::debug!(%url, "delete mission");
        let resp = self.http.delete(&url).send().await?;
        check(resp, ERR_DELETE_MISSION).await.map(|_| ())
    }

    /// GET the breed catalog; only names are retained.
    pub async fn list_breeds(&self) -> Result<Vec<String>, ApiError> {
        let breeds: Vec<Breed> = self.get_json(&self.breed_api, ERR_LIST_BREEDS).await?;
        Ok(breeds.into_iter().map(|b| b.name).collect())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        fallback: &str,
    ) -> Result<T, ApiError> {
        tracing::debug!(%url, "fetch");
        let resp = self.http.get(url).send().await?;
        let resp = check(resp, fallback).await?;
        Ok(resp.json().await?)
    }
}

/// Map a non-success response to `ApiError::Backend`, preferring the
/// `detail` message from the body over the fixed fallback.
async fn check(resp: reqwest::Response, fallback: &str) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let message = parse_error_detail(&body)
        .unwrap_or_else(|| format!("{} (HTTP {})", fallback, status.as_u16()));
    tracing::warn!(status = status.as_u16(), %message, "backend error");
    Err(ApiError::Backend(message))
}

/// Extract the human-readable `detail` string from an error body, if the
/// body is JSON and the field is a plain string. FastAPI validation errors
/// put an array there; those fall through to the fallback.
fn parse_error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_detail_string() {
        let body = r#"{"detail": "Invalid cat breed"}"#;
        assert_eq!(
            parse_error_detail(body),
            Some("Invalid cat breed".to_string())
        );
    }

    #[test]
    fn test_parse_error_detail_missing() {
        assert_eq!(parse_error_detail(r#"{"message": "nope"}"#), None);
        assert_eq!(parse_error_detail("not json"), None);
        assert_eq!(parse_error_detail(""), None);
    }

    #[test]
    fn test_parse_error_detail_validation_array() {
        // FastAPI request-validation errors carry an array; we fall back.
        let body =
            r#"{"detail": [{"loc": ["body", "salary"], "msg": "value is not a valid float"}]}"#;
        assert_eq!(parse_error_detail(body), None);
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let client = ApiClient::new("http://localhost:8000/", DEFAULT_BREED_API);
        assert_eq!(client.url("/spy-cats/"), "http://localhost:8000/spy-cats/");
    }

    #[test]
    fn test_entity_urls() {
        let client = ApiClient::new(DEFAULT_BASE_URL, DEFAULT_BREED_API);
        assert_eq!(client.url("/spy-cats/3"), "http://localhost:8000/spy-cats/3");
        assert_eq!(
            client.url("/missions/7/assign"),
            "http://localhost:8000/missions/7/assign"
        );
        assert_eq!(client.url("/targets/9"), "http://localhost:8000/targets/9");
    }
}
