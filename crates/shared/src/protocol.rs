use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::error::{ReplyDecodeError, ServiceError};

/// Canonical body POSTed to `<base>/predict`. Field names are the service's
/// external contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub age: u8,
    pub sex: u8,
    pub cp: u8,
    #[serde(serialize_with = "whole_measurement")]
    pub trestbps: f64,
    #[serde(serialize_with = "whole_measurement")]
    pub chol: f64,
    pub fbs: u8,
    #[serde(serialize_with = "whole_measurement")]
    pub thalach: f64,
    pub exang: u8,
}

/// Whole readings go out as JSON integers (`130`, not `130.0`).
fn whole_measurement<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= u32::MAX as f64 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub probability: f64,
    pub risk: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

impl PredictionResponse {
    pub fn new(probability: f64, risk: impl Into<String>) -> Self {
        Self {
            probability,
            risk: risk.into(),
            prediction: None,
            recommendation: None,
        }
    }
}

/// Everything the service may answer with.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionReply {
    Rejected(ServiceError),
    Scored(PredictionResponse),
}

impl PredictionReply {
    /// Classifies a reply body. Any non-null `error` field decides the outcome, even
    /// next to scoring fields: a string is a rejection, anything else is unusable.
    pub fn from_slice(body: &[u8]) -> Result<Self, ReplyDecodeError> {
        let value: Value = serde_json::from_slice(body)?;
        match value.get("error") {
            None | Some(Value::Null) => Ok(Self::Scored(serde_json::from_value(value)?)),
            Some(Value::String(message)) => {
                Ok(Self::Rejected(ServiceError::new(message.as_str())))
            }
            Some(other) => Err(ReplyDecodeError::UnreadableError(other.to_string())),
        }
    }
}
