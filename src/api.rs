use std::path::Path;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors returned by the sentiment REST API client
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// HTTP 401; the stored session is no longer valid
    #[error("unauthorized")]
    Unauthorized,

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("backend did not return a report id")]
    MissingReportId,

    #[error("failed to read {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredUser {
    #[serde(default, deserialize_with = "deserialize_loose_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
}

/// One analysis run owned by the user ("version" in the UI)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReportSummary {
    #[serde(deserialize_with = "deserialize_required_id")]
    pub id: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    #[serde(default, deserialize_with = "deserialize_loose_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub sentimental_reports: Vec<ReportSummary>,
}

/// A single classified review as returned by the report endpoint
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReportPrediction {
    #[serde(default, deserialize_with = "deserialize_loose_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default, deserialize_with = "deserialize_label")]
    pub label: i64,
}

#[derive(Debug, Clone, Deserialize)]
struct ReportJsonResponse {
    #[serde(default, deserialize_with = "deserialize_loose_id")]
    id: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    prediction: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
struct ReportUploadResponse {
    #[serde(default, deserialize_with = "deserialize_loose_id")]
    id: Option<String>,
}

/// A report after normalisation: every field is present
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReportData {
    pub id: String,
    pub created_at: String,
    pub prediction: Vec<ReportPrediction>,
}

impl ReportData {
    /// Fill in whatever the server left out of a report payload
    fn normalize(response: ReportJsonResponse, fallback_id: &str) -> Self {
        let prediction = match response.prediction {
            Some(serde_json::Value::Array(rows)) => rows
                .into_iter()
                .filter_map(|row| match serde_json::from_value::<ReportPrediction>(row) {
                    Ok(prediction) => Some(prediction),
                    Err(e) => {
                        tracing::warn!("Skipping malformed prediction row: {}", e);
                        None
                    }
                })
                .collect(),
            _ => Vec::new(),
        };

        Self {
            id: response.id.unwrap_or_else(|| fallback_id.to_string()),
            created_at: response
                .created_at
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
            prediction,
        }
    }
}

/// Model output for a single text; the backend has shipped both forms
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PredictedMark {
    Id(i64),
    Key(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    pub predicted_mark: PredictedMark,
    #[serde(default)]
    pub text: Option<String>,
}

/// Helper function to deserialize null as empty vector
fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

/// Accept string or numeric identifiers
fn deserialize_loose_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn deserialize_required_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_loose_id(deserializer)?
        .ok_or_else(|| serde::de::Error::custom("report id must be a string or number"))
}

/// Class ids arrive as numbers or numeric strings; anything else is neutral (0)
fn deserialize_label<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set or clear the bearer token; shared by every clone of this client
    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token;
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn csv_form(path: &Path) -> Result<Form, ApiError> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ApiError::File {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.csv".to_string());

        let part = Part::bytes(bytes).file_name(file_name).mime_str("text/csv")?;
        Ok(Form::new().part("input_file", part))
    }

    /// Exchange credentials for an access token
    ///
    /// The backend takes credentials as query parameters, not a body.
    pub async fn login(&self, login: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let request = self
            .client
            .post(self.url("/users/login"))
            .query(&[("login", login), ("password", password)]);
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    pub async fn register(&self, login: &str, password: &str) -> Result<RegisteredUser, ApiError> {
        let payload = serde_json::json!({
            "login": login,
            "password": password,
        });
        let request = self.client.post(self.url("/users/")).json(&payload);
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    pub async fn get_user(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        let url = self.url(&format!("/users/{}", urlencoding::encode(user_id)));
        let response = self.send(self.client.get(url)).await?;
        Ok(response.json().await?)
    }

    pub async fn fetch_report(&self, report_id: &str) -> Result<ReportData, ApiError> {
        let url = self.url(&format!("/reports/json/{}", urlencoding::encode(report_id)));
        let response = self.send(self.client.get(url)).await?;
        let body: ReportJsonResponse = response.json().await?;
        Ok(ReportData::normalize(body, report_id))
    }

    /// Upload a CSV of reviews, then fetch the report the backend created
    pub async fn upload_report(&self, path: &Path) -> Result<ReportData, ApiError> {
        let form = Self::csv_form(path).await?;
        let request = self.client.post(self.url("/reports/")).multipart(form);
        let response = self.send(request).await?;
        let body: ReportUploadResponse = response.json().await?;

        let report_id = body
            .id
            .filter(|id| !id.is_empty())
            .ok_or(ApiError::MissingReportId)?;

        self.fetch_report(&report_id).await
    }

    pub async fn delete_report(&self, report_id: &str) -> Result<(), ApiError> {
        let url = self.url(&format!("/reports/{}", urlencoding::encode(report_id)));
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    pub async fn download_report_csv(&self, report_id: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.url(&format!("/reports/csv/{}", urlencoding::encode(report_id)));
        let response = self.send(self.client.get(url)).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub async fn predict_one(&self, text: &str) -> Result<PredictionResponse, ApiError> {
        let payload = serde_json::json!({ "text": text });
        let request = self.client.post(self.url("/predict-one/")).json(&payload);
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    /// Submit a labelled CSV and get per-class precision/recall/F1 back
    pub async fn predict_metrics(&self, path: &Path) -> Result<serde_json::Value, ApiError> {
        let form = Self::csv_form(path).await?;
        let request = self.client.post(self.url("/predict-one/f1")).multipart(form);
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_fills_missing_fields() {
        let response: ReportJsonResponse = serde_json::from_str("{}").unwrap();
        let report = ReportData::normalize(response, "abc");

        assert_eq!(report.id, "abc");
        assert!(!report.created_at.is_empty());
        assert!(report.prediction.is_empty());
    }

    #[test]
    fn test_normalize_ignores_non_array_prediction() {
        let response: ReportJsonResponse =
            serde_json::from_str(r#"{"id": "r1", "prediction": {"text": "x"}}"#).unwrap();
        let report = ReportData::normalize(response, "fallback");

        assert_eq!(report.id, "r1");
        assert!(report.prediction.is_empty());
    }

    #[test]
    fn test_prediction_accepts_numeric_ids_and_string_labels() {
        let prediction: ReportPrediction =
            serde_json::from_str(r#"{"id": 7, "text": "ok", "src": "shop", "label": "2"}"#)
                .unwrap();

        assert_eq!(prediction.id.as_deref(), Some("7"));
        assert_eq!(prediction.label, 2);
    }

    #[test]
    fn test_predicted_mark_accepts_both_forms() {
        let by_id: PredictionResponse =
            serde_json::from_str(r#"{"predicted_mark": 1, "text": "hi"}"#).unwrap();
        let by_key: PredictionResponse =
            serde_json::from_str(r#"{"predicted_mark": "negative", "text": "hi"}"#).unwrap();

        assert_eq!(by_id.predicted_mark, PredictedMark::Id(1));
        assert_eq!(by_key.predicted_mark, PredictedMark::Key("negative".to_string()));
    }

    #[test]
    fn test_user_profile_null_reports() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"id": "u1", "login": "anna", "sentimental_reports": null}"#)
                .unwrap();

        assert!(profile.sentimental_reports.is_empty());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
    }

    #[test]
    fn test_token_shared_between_clones() {
        let client = ApiClient::new("http://localhost:8000", Duration::from_secs(5)).unwrap();
        let clone = client.clone();

        client.set_token(Some("t".to_string()));
        assert_eq!(clone.token().as_deref(), Some("t"));
    }
}
