//! Shared HTTP protocol types for communication between the dashboard and
//! the Drishti backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::lookup::Lookup;

// ─── Normalized result ───────────────────────────────────────────────────────

/// Uniform wrapper around every backend response.
///
/// When `success` is true `error` is `None` and `data` holds the response
/// body exactly as received.  When `success` is false exactly one of
/// `data` / `error` is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResult {
    pub success: bool,
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResult {
    /// Wrap a parsed response body from one of the `success`-carrying
    /// endpoints.  Returns `None` when the body is not a JSON object.
    pub fn from_body(body: Value) -> Option<Self> {
        let Value::Object(map) = body else {
            return None;
        };

        let success = map.get("success").and_then(Value::as_bool).unwrap_or(false);
        if success {
            return Some(Self {
                success: true,
                data: map,
                error: None,
            });
        }

        Some(match map.get("error").filter(|e| !e.is_null()).map(error_text) {
            Some(message) => Self::failure(message),
            None => Self {
                success: false,
                data: map,
                error: None,
            },
        })
    }

    /// Wrap the health endpoint body, which carries `status` instead of
    /// `success`.  Any object without an `error` key counts as reachable.
    pub fn from_health_body(body: Value) -> Option<Self> {
        let Value::Object(map) = body else {
            return None;
        };

        Some(match map.get("error").filter(|e| !e.is_null()).map(error_text) {
            Some(message) => Self::failure(message),
            None => Self {
                success: true,
                data: map,
                error: None,
            },
        })
    }

    /// A failed call with no payload.
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            "unknown error".to_string()
        } else {
            message
        };
        Self {
            success: false,
            data: Map::new(),
            error: Some(message),
        }
    }

    /// Safe-lookup view over `data`.
    pub fn lookup(&self) -> Lookup<'_> {
        Lookup::object(&self.data)
    }
}

fn error_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ─── Health ──────────────────────────────────────────────────────────────────

/// Backend health as reported by `GET /api/health`.  Refetched on every
/// poll, never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    /// Service name → configured, in the order the backend listed them.
    pub configuration: Vec<(String, bool)>,
}

impl HealthStatus {
    /// Extract the status from a successful health result.
    pub fn from_result(result: &ApiResult) -> Option<Self> {
        if !result.success {
            return None;
        }
        let data = result.lookup();
        let configuration = data
            .node("configuration")
            .entries()
            .map(|(name, value)| (name.clone(), value.as_bool().unwrap_or(false)))
            .collect();

        Some(Self {
            status: data.text("status", "unknown"),
            configuration,
        })
    }

    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

// ─── Request payloads ────────────────────────────────────────────────────────

/// Placeholder for the media the backend would normally receive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockMedia {
    pub mock_data: bool,
}

impl Default for MockMedia {
    fn default() -> Self {
        Self { mock_data: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraMetadata {
    pub camera_id: String,
    pub location: String,
    pub frame_width: u32,
    pub frame_height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_area_sq_meters: Option<u32>,
}

impl CameraMetadata {
    /// Full-HD metadata for a camera.
    pub fn new(camera_id: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            camera_id: camera_id.into(),
            location: location.into(),
            frame_width: 1920,
            frame_height: 1080,
            coverage_area_sq_meters: None,
        }
    }
}

/// Body of `POST /api/analyze-crowd-dynamics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrowdAnalysisRequest {
    pub video_feed: MockMedia,
    pub camera_metadata: CameraMetadata,
}

/// Body of `POST /api/situational-summary`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub query: String,
    pub zone: String,
    pub time_window: String,
    pub special_events: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Body of `POST /api/emergency-incident`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentRequest {
    #[serde(rename = "type")]
    pub incident_type: String,
    pub location: String,
    pub description: String,
    pub priority: String,
    pub coordinates: Coordinates,
}

/// Body of `POST /api/detect-anomalies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyRequest {
    pub video_frame: MockMedia,
    pub camera_metadata: CameraMetadata,
    pub analysis_type: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalDetails {
    pub age_range: String,
    pub clothing_details: String,
    pub distinguishing_features: String,
    pub medical_conditions: String,
}

/// Body of `POST /api/missing-person`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingPersonRequest {
    pub description: String,
    pub last_known_location: String,
    pub urgency_level: String,
    pub contact_info: ContactInfo,
    /// Only whether a photo exists is sent; the image itself stays local.
    pub photo_data: bool,
    pub additional_details: AdditionalDetails,
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Form input rejected before any backend call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter a query")]
    EmptyQuery,
    #[error("Please enter a location")]
    EmptyLocation,
    #[error("Please provide a physical description")]
    EmptyDescription,
}

impl SummaryRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.query.trim().is_empty() {
            return Err(ValidationError::EmptyQuery);
        }
        Ok(())
    }
}

impl IncidentRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.location.trim().is_empty() {
            return Err(ValidationError::EmptyLocation);
        }
        Ok(())
    }
}

impl MissingPersonRequest {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(())
    }
}

// ─── tests ───────────────────────────────────────────────────────────────────
