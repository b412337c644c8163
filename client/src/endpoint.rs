//! The backend routes the dashboard talks to.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// One backend route with its fixed timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Health,
    Dashboard,
    CrowdDynamics,
    SituationalSummary,
    EmergencyIncident,
    DetectAnomalies,
    MissingPerson,
}

impl Endpoint {
    pub const ALL: [Endpoint; 7] = [
        Self::Health,
        Self::Dashboard,
        Self::CrowdDynamics,
        Self::SituationalSummary,
        Self::EmergencyIncident,
        Self::DetectAnomalies,
        Self::MissingPerson,
    ];

    pub fn method(&self) -> Method {
        match self {
            Self::Health | Self::Dashboard => Method::Get,
            _ => Method::Post,
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Self::Health => "/api/health",
            Self::Dashboard => "/api/dashboard",
            Self::CrowdDynamics => "/api/analyze-crowd-dynamics",
            Self::SituationalSummary => "/api/situational-summary",
            Self::EmergencyIncident => "/api/emergency-incident",
            Self::DetectAnomalies => "/api/detect-anomalies",
            Self::MissingPerson => "/api/missing-person",
        }
    }

    /// Generative and multi-source calls get the longest budget.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(match self {
            Self::Health => 5,
            Self::Dashboard => 10,
            Self::CrowdDynamics | Self::EmergencyIncident | Self::DetectAnomalies => 15,
            Self::SituationalSummary | Self::MissingPerson => 20,
        })
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let method = match self.method() {
            Method::Get => "GET",
            Method::Post => "POST",
        };
        write!(f, "{method} {}", self.path())
    }
}
