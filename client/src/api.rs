//! Blocking HTTP client for the Drishti backend.
//!
//! Every call is attempted exactly once with the endpoint's fixed timeout.
//! Transport errors, timeouts and unparsable bodies never escape: they are
//! folded into a failed [`ApiResult`] so callers only ever branch on
//! `success`.

use std::time::{Duration, Instant};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use drishti_common::protocol::{
    AnomalyRequest, ApiResult, CrowdAnalysisRequest, IncidentRequest, MissingPersonRequest,
    SummaryRequest,
};

use crate::endpoint::{Endpoint, Method};

/// Operations the dashboard needs from the backend.
pub trait Backend: Send + Sync {
    /// Service and configuration status.
    fn health_check(&self) -> ApiResult;

    /// Aggregate metrics, alerts and recent activity.
    fn dashboard(&self) -> ApiResult;

    fn analyze_crowd_dynamics(&self, request: &CrowdAnalysisRequest) -> ApiResult;

    fn situational_summary(&self, request: &SummaryRequest) -> ApiResult;

    fn dispatch_emergency(&self, request: &IncidentRequest) -> ApiResult;

    fn detect_anomalies(&self, request: &AnomalyRequest) -> ApiResult;

    fn search_missing_person(&self, request: &MissingPersonRequest) -> ApiResult;
}

/// Internal failure of a single call, flattened to a message at the boundary.
#[derive(Debug, thiserror::Error)]
enum CallError {
    #[error("cannot encode request for {endpoint}: {source}")]
    Encode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },
    #[error("{endpoint} timed out after {}s", .timeout.as_secs_f32())]
    Timeout { endpoint: Endpoint, timeout: Duration },
    #[error("{endpoint} failed: {source}")]
    Transport {
        endpoint: Endpoint,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned malformed JSON (HTTP {status}): {source}")]
    Malformed {
        endpoint: Endpoint,
        status: u16,
        #[source]
        source: serde_json::Error,
    },
    #[error("{endpoint} returned a non-object JSON body (HTTP {status})")]
    NotAnObject { endpoint: Endpoint, status: u16 },
}

/// The backend adapter.  Holds only the base URL and a connection pool, so
/// one instance is shared by every page.
///
/// Must be created and dropped outside an async runtime.
pub struct DrishtiApi {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl DrishtiApi {
    /// `base_url` is expected in normalized form (`http://host:port`).
    pub fn new(base_url: impl Into<String>) -> reqwest::Result<Self> {
        let client = reqwest::blocking::Client::builder().build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, endpoint: Endpoint) -> ApiResult {
        self.call(endpoint, None, endpoint.timeout())
    }

    fn post<T: Serialize>(&self, endpoint: Endpoint, request: &T) -> ApiResult {
        match serde_json::to_value(request) {
            Ok(body) => self.call(endpoint, Some(body), endpoint.timeout()),
            Err(source) => fail(CallError::Encode { endpoint, source }),
        }
    }

    fn call(&self, endpoint: Endpoint, body: Option<Value>, timeout: Duration) -> ApiResult {
        let started = Instant::now();
        debug!("{endpoint} → {}", self.base_url);

        match self.send(endpoint, body.as_ref(), timeout) {
            Ok(result) => {
                debug!(
                    "{endpoint} answered in {:?} (success={})",
                    started.elapsed(),
                    result.success
                );
                result
            }
            Err(e) => fail(e),
        }
    }

    fn send(
        &self,
        endpoint: Endpoint,
        body: Option<&Value>,
        timeout: Duration,
    ) -> Result<ApiResult, CallError> {
        let url = format!("{}{}", self.base_url, endpoint.path());
        let request = match endpoint.method() {
            Method::Get => self.client.get(&url),
            Method::Post => {
                let request = self.client.post(&url);
                match body {
                    Some(body) => request.json(body),
                    None => request,
                }
            }
        };

        let transport = |source: reqwest::Error| {
            if source.is_timeout() {
                CallError::Timeout { endpoint, timeout }
            } else {
                CallError::Transport { endpoint, source }
            }
        };

        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(timeout)
            .send()
            .map_err(transport)?;

        // Application failures arrive as JSON bodies on non-2xx statuses
        // too, so the status only matters for error messages.
        let status = response.status().as_u16();
        let text = response.text().map_err(transport)?;
        let parsed: Value = serde_json::from_str(&text).map_err(|source| CallError::Malformed {
            endpoint,
            status,
            source,
        })?;

        let result = match endpoint {
            Endpoint::Health => ApiResult::from_health_body(parsed),
            _ => ApiResult::from_body(parsed),
        };
        result.ok_or(CallError::NotAnObject { endpoint, status })
    }
}

fn fail(error: CallError) -> ApiResult {
    warn!("{error}");
    ApiResult::failure(error.to_string())
}

impl Backend for DrishtiApi {
    fn health_check(&self) -> ApiResult {
        self.get(Endpoint::Health)
    }

    fn dashboard(&self) -> ApiResult {
        self.get(Endpoint::Dashboard)
    }

    fn analyze_crowd_dynamics(&self, request: &CrowdAnalysisRequest) -> ApiResult {
        self.post(Endpoint::CrowdDynamics, request)
    }

    fn situational_summary(&self, request: &SummaryRequest) -> ApiResult {
        self.post(Endpoint::SituationalSummary, request)
    }

    fn dispatch_emergency(&self, request: &IncidentRequest) -> ApiResult {
        self.post(Endpoint::EmergencyIncident, request)
    }

    fn detect_anomalies(&self, request: &AnomalyRequest) -> ApiResult {
        self.post(Endpoint::DetectAnomalies, request)
    }

    fn search_missing_person(&self, request: &MissingPersonRequest) -> ApiResult {
        self.post(Endpoint::MissingPerson, request)
    }
}

// ─── tests ───────────────────────────────────────────────────────────────────
