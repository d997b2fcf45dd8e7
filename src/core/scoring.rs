//! Remote scoring collaborator
//!
//! The trained model lives behind an HTTP service. It is opaque to the
//! engine: features go out under fixed Arabic keys, a predicted price
//! (and optionally a factor breakdown or a judgment key) comes back.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::types::{
    Factor, JudgePriceRequest, JudgePriceResponse, JudgmentCategory, ScoreResponse, ScoringPayload,
};

/// A successful remote score
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteScore {
    pub predicted_price: f64,
    /// Empty when the model sent no breakdown
    pub factors: Vec<Factor>,
}

/// Anything that can score a feature payload
#[async_trait]
pub trait ScoringBackend: Send + Sync {
    /// Predict a price for the payload
    async fn score(&self, payload: &ScoringPayload) -> Result<RemoteScore, ScoringError>;

    /// Judge a listed price. Backends without a judgment endpoint return
    /// `None` and the caller judges locally.
    async fn judge(
        &self,
        payload: &ScoringPayload,
        listed_price: f64,
    ) -> Option<Result<JudgmentCategory, ScoringError>>;

    /// Short description for logs and health output
    fn describe(&self) -> String;
}

/// HTTP client for the scoring service
#[derive(Debug, Clone)]
pub struct HttpScoringClient {
    http: Client,
    base_url: String,
    predict_path: String,
    judge_path: Option<String>,
    timeout: Duration,
}

impl HttpScoringClient {
    /// Build a client from config. Returns `Ok(None)` when no base URL is set.
    pub fn from_config(config: &ScoringConfig) -> Result<Option<Self>, ScoringError> {
        match &config.base_url {
            Some(base_url) => Ok(Some(Self::new(
                base_url,
                &config.predict_path,
                config.judge_path.as_deref(),
                config.timeout(),
            )?)),
            None => Ok(None),
        }
    }

    pub fn new(
        base_url: &str,
        predict_path: &str,
        judge_path: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, ScoringError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            predict_path: predict_path.to_string(),
            judge_path: judge_path.map(str::to_string),
            timeout,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn post<B: Serialize + Sync, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R, ScoringError> {
        let url = self.url(path);
        debug!(%url, "calling scoring service");

        let response = self.http.post(&url).json(body).send().await.map_err(|e| {
            if e.is_timeout() {
                ScoringError::Timeout(self.timeout)
            } else {
                ScoringError::Network(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoringError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ScoringError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl ScoringBackend for HttpScoringClient {
    async fn score(&self, payload: &ScoringPayload) -> Result<RemoteScore, ScoringError> {
        let response: ScoreResponse = self.post(&self.predict_path, payload).await?;
        if !(response.predicted_price.is_finite() && response.predicted_price > 0.0) {
            return Err(ScoringError::InvalidResponse(format!(
                "predicted_price {} is not a positive number",
                response.predicted_price
            )));
        }
        Ok(RemoteScore {
            predicted_price: response.predicted_price,
            factors: response.factor_list(),
        })
    }

    async fn judge(
        &self,
        payload: &ScoringPayload,
        listed_price: f64,
    ) -> Option<Result<JudgmentCategory, ScoringError>> {
        let path = self.judge_path.as_deref()?;
        let request = JudgePriceRequest {
            features: payload.clone(),
            listed_price,
        };
        let result = self
            .post::<_, JudgePriceResponse>(path, &request)
            .await
            .and_then(|response| {
                JudgmentCategory::from_key(&response.judgment_key)
                    .ok_or(ScoringError::UnknownJudgment(response.judgment_key))
            });
        Some(result)
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}
