pub mod alerts;
pub mod chart;
pub mod map;
pub mod metrics;
pub mod nav;
pub mod status;
pub mod widgets;
