use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use shared::protocol::{PredictionReply, PredictionRequest, PredictionResponse};
use tracing::{info, warn};
use url::Url;

pub mod controller;
pub mod error;
pub mod interpret;
pub mod mapping;
pub mod validation;

pub use controller::{AssessmentController, AssessmentState, AssessmentView, SubmitOutcome};
pub use error::{AssessmentError, ErrorCategory, PredictionError, ValidationError};
pub use interpret::{interpret, interpret_response, RiskPresentation};
pub use validation::{estimate_max_heart_rate, validate, AssessmentInput, ValidatedAssessment};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
const PREDICT_PATH: &str = "predict";

#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> std::result::Result<PredictionResponse, PredictionError>;
}

/// Talks to the prediction service over HTTP: one POST per call, no retries.
pub struct HttpPredictionClient {
    http: Client,
    predict_url: Url,
}

impl HttpPredictionClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let predict_url = predict_endpoint(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build prediction http client")?;
        Ok(Self { http, predict_url })
    }

    pub fn predict_url(&self) -> &Url {
        &self.predict_url
    }
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> std::result::Result<PredictionResponse, PredictionError> {
        info!(endpoint = %self.predict_url, "prediction: sending request");
        let response = self
            .http
            .post(self.predict_url.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint = %self.predict_url, error = %e, "prediction: request failed");
                PredictionError::transport(e)
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            warn!(%status, error = %e, "prediction: failed to read response body");
            PredictionError::transport(e)
        })?;

        let decoded = decode_reply(status, &body);
        match &decoded {
            Ok(scored) => info!(
                risk = %scored.risk,
                probability = scored.probability,
                "prediction: scored"
            ),
            Err(PredictionError::ServiceRejected(message)) => {
                warn!(%status, %message, "prediction: rejected by service")
            }
            Err(PredictionError::Transport(detail)) => {
                warn!(%status, %detail, "prediction: undecodable reply")
            }
        }
        decoded
    }
}

/// `<base>/predict`, keeping any path prefix on the base URL.
pub fn predict_endpoint(base_url: &str) -> Result<Url> {
    let base = base_url.trim().trim_end_matches('/');
    let url = Url::parse(&format!("{base}/{PREDICT_PATH}"))
        .with_context(|| format!("invalid prediction service url '{base_url}'"))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(anyhow!(
            "prediction service url must use http or https, got '{other}'"
        )),
    }
}

/// Folds a raw HTTP reply into a prediction outcome. An `error` message is a rejection
/// whatever the status; a blank or non-text `error`, any other non-scored shape, a
/// non-success status, or a probability outside `[0, 1]` is a transport failure.
pub fn decode_reply(
    status: StatusCode,
    body: &[u8],
) -> std::result::Result<PredictionResponse, PredictionError> {
    let reply = PredictionReply::from_slice(body).map_err(|e| {
        PredictionError::transport(format!("unusable prediction payload ({status}): {e}"))
    })?;

    match reply {
        PredictionReply::Rejected(rejection) if rejection.error.trim().is_empty() => Err(
            PredictionError::transport(format!("rejection without a message ({status})")),
        ),
        PredictionReply::Rejected(rejection) => {
            Err(PredictionError::ServiceRejected(rejection.error))
        }
        PredictionReply::Scored(_) if !status.is_success() => Err(PredictionError::transport(
            format!("unexpected status {status} for scored reply"),
        )),
        PredictionReply::Scored(scored)
            if !(scored.probability.is_finite() && (0.0..=1.0).contains(&scored.probability)) =>
        {
            Err(PredictionError::transport(format!(
                "probability {} outside [0, 1]",
                scored.probability
            )))
        }
        PredictionReply::Scored(scored) => Ok(scored),
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
