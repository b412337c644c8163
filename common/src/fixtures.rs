//! Static display data: map markers, offline sample metrics, side-panel
//! statistics and form option lists.  None of this comes from the backend.

// ─── Map markers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub id: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub name: &'static str,
    pub status: &'static str,
}

impl Camera {
    pub fn marker_color(&self) -> &'static str {
        if self.status == "active" {
            "green"
        } else {
            "orange"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Incident {
    pub id: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub kind: &'static str,
    pub priority: &'static str,
}

impl Incident {
    pub fn marker_color(&self) -> &'static str {
        match self.priority {
            "CRITICAL" => "red",
            "HIGH" => "orange",
            _ => "blue",
        }
    }
}

pub const CAMERAS: [Camera; 5] = [
    Camera { id: "CAM-001", lat: 37.7749, lng: -122.4194, name: "Main Entrance", status: "active" },
    Camera { id: "CAM-002", lat: 37.7849, lng: -122.4094, name: "Food Court", status: "active" },
    Camera { id: "CAM-003", lat: 37.7649, lng: -122.4294, name: "Parking Area A", status: "active" },
    Camera { id: "CAM-004", lat: 37.7549, lng: -122.4394, name: "West Wing", status: "maintenance" },
    Camera { id: "CAM-005", lat: 37.7449, lng: -122.4494, name: "Emergency Exit", status: "active" },
];

pub const INCIDENTS: [Incident; 3] = [
    Incident { id: "INC-001", lat: 37.7699, lng: -122.4144, kind: "MEDICAL", priority: "HIGH" },
    Incident { id: "INC-002", lat: 37.7799, lng: -122.4044, kind: "FIRE", priority: "CRITICAL" },
    Incident { id: "INC-003", lat: 37.7599, lng: -122.4244, kind: "SECURITY", priority: "MEDIUM" },
];

/// Camera by id.
pub fn camera(id: &str) -> Option<&'static Camera> {
    CAMERAS.iter().find(|c| c.id == id)
}

// ─── Offline dashboard ───────────────────────────────────────────────────────

/// Metrics shown when the dashboard endpoint is unreachable.
pub const OFFLINE_METRICS: [(&str, &str); 4] = [
    ("Active Cameras", "12"),
    ("Avg Crowd Density", "45%"),
    ("Active Emergencies", "2"),
    ("Response Time", "6 min"),
];

/// Hourly crowd density for the offline sample chart.
pub const OFFLINE_DENSITY: [f64; 24] = [
    0.3, 0.2, 0.1, 0.1, 0.2, 0.4, 0.6, 0.8, 0.7, 0.6, 0.5, 0.6, //
    0.7, 0.8, 0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.2, 0.3,
];

// ─── Crowd history ───────────────────────────────────────────────────────────

/// One hourly sample of the synthetic 24-hour crowd history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrowdSample {
    pub hours_ago: u32,
    pub people: u32,
    pub density: f64,
}

/// Deterministic 25-point history (24 h ago … now).  People stay within
/// 50..500 and density within 0.2..0.9.
pub fn crowd_history() -> Vec<CrowdSample> {
    (0..=24u32)
        .rev()
        .map(|hours_ago| {
            let hour = (24 - hours_ago) as f64;
            // one daily peak around mid-afternoon plus a small ripple
            let wave = ((hour - 9.0) / 24.0 * std::f64::consts::TAU).sin();
            let ripple = (hour * 1.7).sin() * 0.1;
            let level = ((wave + 1.0) / 2.0 * 0.9 + ripple).clamp(0.0, 1.0);
            CrowdSample {
                hours_ago,
                people: 50 + (level * 449.0).round() as u32,
                density: 0.2 + level * 0.7,
            }
        })
        .collect()
}

// ─── Side-panel statistics ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseUnit {
    pub id: &'static str,
    pub kind: &'static str,
    pub status: &'static str,
    pub location: &'static str,
}

pub const AVAILABLE_UNITS: [ResponseUnit; 4] = [
    ResponseUnit { id: "SEC-001", kind: "Security", status: "Available", location: "Zone A" },
    ResponseUnit { id: "SEC-002", kind: "Security", status: "Busy", location: "Zone B" },
    ResponseUnit { id: "MED-001", kind: "Medical", status: "Available", location: "Zone C" },
    ResponseUnit { id: "FIRE-001", kind: "Fire", status: "Available", location: "Zone D" },
];

/// Average response time (minutes) by unit type.
pub const RESPONSE_TIMES: [(&str, f64); 3] = [("Security", 5.0), ("Medical", 7.0), ("Fire", 4.0)];

/// Anomalies per hour over the last day: (all, critical).
pub const ANOMALY_HISTORY: [(u32, u32); 24] = [
    (2, 0), (1, 0), (0, 0), (1, 0), (0, 0), (0, 0), (1, 0), (3, 1), //
    (5, 1), (4, 0), (6, 1), (8, 2), (7, 1), (9, 1), (8, 0), (6, 0), //
    (7, 1), (5, 0), (4, 0), (3, 0), (2, 0), (1, 0), (1, 0), (0, 0),
];

pub const ANOMALY_TYPES: [(&str, f64); 5] = [
    ("Crowd Surge", 15.0),
    ("Suspicious Behavior", 8.0),
    ("Fire/Smoke", 3.0),
    ("Weapon Detection", 2.0),
    ("Unauthorized Access", 5.0),
];

/// Missing-person cases over the last 30 days by outcome.
pub const SEARCH_CASES: [(&str, f64); 3] = [("Found", 45.0), ("Ongoing", 12.0), ("Closed", 8.0)];

/// Search success rate (%) by urgency.
pub const SEARCH_SUCCESS: [(&str, f64); 4] = [
    ("Critical", 95.0),
    ("High", 87.0),
    ("Medium", 78.0),
    ("Low", 65.0),
];

/// (when, status, location)
pub const RECENT_SEARCHES: [(&str, &str, &str); 3] = [
    ("2 hours ago", "Found", "Food Court"),
    ("5 hours ago", "Ongoing", "Parking A"),
    ("1 day ago", "Found", "Main Gate"),
];

// ─── Form options ────────────────────────────────────────────────────────────

pub const ZONES: [&str; 5] = ["West Zone", "East Zone", "North Zone", "South Zone", "Central Area"];

pub const TIME_WINDOWS: [&str; 4] = [
    "last 15 minutes",
    "last 30 minutes",
    "last hour",
    "last 2 hours",
];

pub const EMERGENCY_TYPES: [&str; 5] = ["MEDICAL", "FIRE", "SECURITY", "CROWD_CONTROL", "EVACUATION"];

/// Used for both incident priority and missing-person urgency.
pub const PRIORITY_LEVELS: [&str; 4] = ["low", "medium", "high", "critical"];

pub const ANALYSIS_TYPES: [&str; 4] = ["multimodal", "video_only", "audio_only", "sensor_fusion"];

pub const AGE_RANGES: [&str; 4] = ["Child (0-12)", "Teen (13-17)", "Adult (18-65)", "Senior (65+)"];

// ─── tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_colors() {
        let colors: Vec<_> = CAMERAS.iter().map(Camera::marker_color).collect();
        assert_eq!(colors, ["green", "green", "green", "orange", "green"]);

        let colors: Vec<_> = INCIDENTS.iter().map(Incident::marker_color).collect();
        assert_eq!(colors, ["orange", "red", "blue"]);
    }

    #[test]
    fn test_camera_lookup() {
        assert_eq!(camera("CAM-004").map(|c| c.name), Some("West Wing"));
        assert!(camera("CAM-999").is_none());
    }

    #[test]
    fn test_crowd_history_bounds() {
        let history = crowd_history();
        assert_eq!(history.len(), 25);
        assert_eq!(history.first().map(|s| s.hours_ago), Some(24));
        assert_eq!(history.last().map(|s| s.hours_ago), Some(0));
        for sample in &history {
            assert!((50..=500).contains(&sample.people), "{sample:?}");
            assert!((0.2..=0.9).contains(&sample.density), "{sample:?}");
        }
        // deterministic
        assert_eq!(history, crowd_history());
    }
}
