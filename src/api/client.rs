/// HTTP client for the room analysis backend
///
/// One attempt per call, no retries: every retry in this app is a fresh
/// user action.

use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use super::error::ApiError;
use crate::config::AppConfig;
use crate::state::data::{
    AnalysisResult, HealthStatus, Product, QuizAnswers, QuizResponse, RecommendationsResponse,
    SongResponse, StyleProfile, VibeSongRequest,
};
use crate::upload::UploadedImage;

/// Error body FastAPI-style backends send with non-2xx responses
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Cheap to clone; clones share one connection pool
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    quiz_base_url: String,
    request_timeout: Duration,
    song_timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("room-glow/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("⚠️  Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self {
            http,
            base_url: config.api_base_url.clone(),
            quiz_base_url: config.quiz_base_url().to_string(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            song_timeout: Duration::from_secs(config.song_timeout_secs),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Upload the photo for a full analysis
    pub async fn analyze(
        &self,
        image: &UploadedImage,
        style: &StyleProfile,
    ) -> Result<AnalysisResult, ApiError> {
        log::info!("🔍 Analyzing {} ({} bytes)", image.file_name, image.size());

        let request = self
            .http
            .post(self.url("/api/analyze"))
            .query(&style.query_pairs())
            .multipart(photo_form(image)?)
            .timeout(self.request_timeout);

        let result: AnalysisResult = read_json(send(request).await?).await?;
        log::info!("✅ Analysis ready: {} categories", result.categories.len());
        Ok(result)
    }

    /// Ask for a fresh set of product picks for the same photo
    pub async fn recommendations(
        &self,
        image: &UploadedImage,
        style: &StyleProfile,
    ) -> Result<Vec<Product>, ApiError> {
        log::info!("🛍️  Refreshing recommendations for {}", image.file_name);

        let request = self
            .http
            .post(self.url("/api/recommendations"))
            .query(&style.query_pairs())
            .multipart(photo_form(image)?)
            .timeout(self.request_timeout);

        let body: RecommendationsResponse = read_json(send(request).await?).await?;
        Ok(body.products)
    }

    /// Submit the finished quiz and get a style tag back
    pub async fn submit_quiz(&self, answers: &QuizAnswers) -> Result<QuizResponse, ApiError> {
        let request = self
            .http
            .post(format!("{}/api/quiz", self.quiz_base_url))
            .json(answers)
            .timeout(self.request_timeout);

        read_json(send(request).await?).await
    }

    /// Generate the room anthem; slow, hence the longer timeout
    pub async fn vibe_song(&self, body: &VibeSongRequest<'_>) -> Result<SongResponse, ApiError> {
        log::info!("🎵 Requesting room anthem");

        let request = self
            .http
            .post(self.url("/api/vibe-song"))
            .json(body)
            .timeout(self.song_timeout);

        read_json(send(request).await?).await
    }

    /// Startup probe; only ever logged
    pub async fn health(&self) -> Result<HealthStatus, ApiError> {
        let request = self
            .http
            .get(self.url("/api/health"))
            .timeout(Duration::from_secs(5));

        read_json(send(request).await?).await
    }
}

/// Multipart body with the photo under the `file` field
fn photo_form(image: &UploadedImage) -> Result<Form, ApiError> {
    let part = Part::bytes(image.bytes.clone())
        .file_name(image.file_name.clone())
        .mime_str(&image.mime)
        .map_err(|e| ApiError::Network(format!("Failed to create multipart: {}", e)))?;

    Ok(Form::new().part("file", part))
}

async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
    request.send().await.map_err(|e| {
        log::error!("❌ Request failed: {}", e);
        ApiError::Network(e.to_string())
    })
}

/// Turn a response into `T`, or into a `Server` error carrying `detail`
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();

    if !status.is_success() {
        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail)
            .and_then(|detail| detail.as_str().map(str::to_string))
            .filter(|detail| !detail.trim().is_empty());

        log::error!("❌ Backend returned {}: {:?}", status, detail);
        return Err(ApiError::Server {
            status: status.as_u16(),
            detail,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}
