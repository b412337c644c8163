//! Drishti Web – server-rendered situational awareness dashboard.

pub mod app;
pub mod components;
pub mod model;
pub mod pages;
