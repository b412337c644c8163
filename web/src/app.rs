//! HTTP front end: one route per dashboard tab.
//!
//! Routes:
//!   GET        /                 → real-time dashboard
//!   GET|POST   /crowd            → crowd analysis
//!   GET|POST   /summary          → AI situational summary
//!   GET|POST   /dispatch         → emergency dispatch
//!   GET|POST   /anomaly          → anomaly detection
//!   GET|POST   /missing-person   → missing person search
//!   POST       /quick/{action}   → sidebar quick actions
//!   GET        /style.css        → stylesheet
//!
//! Every page carries the health sidebar, so each request makes one health
//! call plus at most one feature call, in that order, on the blocking pool.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Form, Router};
use leptos::prelude::*;
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use drishti_client::Backend;
use drishti_common::config::Config;
use drishti_common::protocol::ApiResult;

use crate::components::nav::{Nav, Tab};
use crate::components::status::{ControlPanel, QuickAction};
use crate::model::Widget;
use crate::pages::anomaly::{AnomalyForm, AnomalyPage};
use crate::pages::crowd::{CrowdForm, CrowdPage};
use crate::pages::dashboard::DashboardPage;
use crate::pages::dispatch::{DispatchForm, DispatchPage};
use crate::pages::missing_person::{MissingPersonForm, MissingPersonPage};
use crate::pages::summary::{SummaryForm, SummaryPage};
use crate::pages::Outcome;

const STYLESHEET: &str = include_str!("../style/main.css");

/// Shared state for route handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn Backend>,
    pub config: Arc<Config>,
}

/// `?auto=1` turns on the browser-side auto refresh.
#[derive(Debug, Default, Deserialize)]
struct RefreshQuery {
    auto: Option<String>,
}

impl RefreshQuery {
    fn auto_refresh(&self) -> bool {
        self.auto.as_deref() == Some("1")
    }
}

/// Page shell: control panel, header, tab bar and the active tab's body.
#[component]
pub fn App(
    active: Tab,
    /// Seconds until the browser reloads the page, when auto refresh is on.
    refresh_secs: Option<u64>,
    sidebar: AnyView,
    children: Children,
) -> impl IntoView {
    let refresh = refresh_secs
        .map(|secs| view! { <meta http-equiv="refresh" content=secs.to_string()/> });

    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                {refresh}
                <title>"Project Drishti - AI Situational Awareness"</title>
                <link rel="stylesheet" href="/style.css"/>
            </head>
            <body>
                <aside class="sidebar">{sidebar}</aside>
                <div class="main">
                    <header class="main-header">
                        <h1>"🎯 Project Drishti - AI Situational Awareness Platform"</h1>
                        <p>"Enhanced AI-Powered Security & Emergency Response System"</p>
                    </header>
                    <Nav active=active/>
                    <main class="content">{children()}</main>
                </div>
            </body>
        </html>
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .route("/crowd", get(crowd_page).post(crowd_submit))
        .route("/summary", get(summary_page).post(summary_submit))
        .route("/dispatch", get(dispatch_page).post(dispatch_submit))
        .route("/anomaly", get(anomaly_page).post(anomaly_submit))
        .route(
            "/missing-person",
            get(missing_person_page).post(missing_person_submit),
        )
        .route("/quick/{action}", post(quick_action))
        .route("/style.css", get(stylesheet))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server. Blocks until shutdown.
pub async fn run(state: AppState, shutdown: Arc<AtomicBool>) -> anyhow::Result<()> {
    let listen_addr = state.config.listen_addr.clone();
    let app = router(state);

    let listener = TcpListener::bind(&listen_addr).await?;
    info!("Drishti dashboard listening on http://{listen_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            loop {
                tokio::time::sleep(std::time::Duration::from_millis(250)).await;
                if shutdown.load(Ordering::Relaxed) {
                    break;
                }
            }
        })
        .await?;

    info!("Drishti dashboard stopped");
    Ok(())
}

// ── backend calls ────────────────────────────────────────────────────────

async fn blocking<T, F>(f: F) -> Result<T, StatusCode>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!("Backend call task failed: {e}");
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

async fn health(state: &AppState) -> Result<ApiResult, StatusCode> {
    let backend = state.backend.clone();
    blocking(move || backend.health_check()).await
}

/// Health call followed by the feature call.
async fn exchange<F>(state: &AppState, feature: F) -> Result<(ApiResult, Outcome), StatusCode>
where
    F: FnOnce(&dyn Backend) -> Outcome + Send + 'static,
{
    let backend = state.backend.clone();
    blocking(move || {
        let health = backend.health_check();
        let outcome = feature(backend.as_ref());
        if let Outcome::Invalid(e) = &outcome {
            debug!("Form rejected before backend call: {e}");
        }
        (health, outcome)
    })
    .await
}

// ── page assembly ────────────────────────────────────────────────────────

/// Render `body` inside the shell for `tab`.
fn render(
    state: &AppState,
    tab: Tab,
    auto: bool,
    health: ApiResult,
    acknowledgement: Option<Widget>,
    body: AnyView,
) -> Html<String> {
    let interval = state.config.auto_refresh_secs;
    let sidebar = view! {
        <ControlPanel
            health_result=health
            api_base_url=state.config.api_base_url.clone()
            path=tab.path()
            auto_refresh=auto
            interval_secs=interval
            acknowledgement=acknowledgement
        />
    }
    .into_any();

    let page = view! {
        <App active=tab refresh_secs={auto.then_some(interval)} sidebar=sidebar>
            {body}
        </App>
    };
    Html(page.to_html())
}

async fn dashboard_with(
    state: &AppState,
    auto: bool,
    acknowledgement: Option<Widget>,
) -> Result<Html<String>, StatusCode> {
    let backend = state.backend.clone();
    let (health, result) =
        blocking(move || (backend.health_check(), backend.dashboard())).await?;
    let body = view! { <DashboardPage result=result config=state.config.clone()/> }.into_any();
    Ok(render(state, Tab::Dashboard, auto, health, acknowledgement, body))
}

// ── route handlers ───────────────────────────────────────────────────────

async fn dashboard_page(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Result<Html<String>, StatusCode> {
    dashboard_with(&state, query.auto_refresh(), None).await
}

async fn quick_action(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, StatusCode> {
    let action = QuickAction::from_slug(&slug).ok_or(StatusCode::NOT_FOUND)?;
    info!("Quick action: {slug}");
    dashboard_with(&state, false, Some(action.acknowledgement())).await
}

async fn crowd_page(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Result<Html<String>, StatusCode> {
    let auto = query.auto_refresh();
    let health = health(&state).await?;
    let body = view! { <CrowdPage input=CrowdForm::default() last=None/> }.into_any();
    Ok(render(&state, Tab::CrowdAnalysis, auto, health, None, body))
}

async fn crowd_submit(
    State(state): State<AppState>,
    Form(input): Form<CrowdForm>,
) -> Result<Html<String>, StatusCode> {
    let request = input.request();
    let (health, outcome) = exchange(&state, move |backend| {
        Outcome::Response(backend.analyze_crowd_dynamics(&request))
    })
    .await?;
    let body = view! { <CrowdPage input=input last=Some(outcome)/> }.into_any();
    Ok(render(&state, Tab::CrowdAnalysis, false, health, None, body))
}

async fn summary_page(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Result<Html<String>, StatusCode> {
    let auto = query.auto_refresh();
    let health = health(&state).await?;
    let body = view! { <SummaryPage input=SummaryForm::default() last=None/> }.into_any();
    Ok(render(&state, Tab::AiSummary, auto, health, None, body))
}

async fn summary_submit(
    State(state): State<AppState>,
    Form(input): Form<SummaryForm>,
) -> Result<Html<String>, StatusCode> {
    let request = input.request();
    let (health, outcome) = exchange(&state, move |backend| match request {
        Ok(request) => Outcome::Response(backend.situational_summary(&request)),
        Err(e) => Outcome::Invalid(e),
    })
    .await?;
    let body = view! { <SummaryPage input=input last=Some(outcome)/> }.into_any();
    Ok(render(&state, Tab::AiSummary, false, health, None, body))
}

async fn dispatch_page(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Result<Html<String>, StatusCode> {
    let auto = query.auto_refresh();
    let health = health(&state).await?;
    let body = view! { <DispatchPage input=DispatchForm::default() last=None/> }.into_any();
    Ok(render(&state, Tab::EmergencyDispatch, auto, health, None, body))
}

async fn dispatch_submit(
    State(state): State<AppState>,
    Form(input): Form<DispatchForm>,
) -> Result<Html<String>, StatusCode> {
    let request = input.request();
    let (health, outcome) = exchange(&state, move |backend| match request {
        Ok(request) => Outcome::Response(backend.dispatch_emergency(&request)),
        Err(e) => Outcome::Invalid(e),
    })
    .await?;
    let body = view! { <DispatchPage input=input last=Some(outcome)/> }.into_any();
    Ok(render(&state, Tab::EmergencyDispatch, false, health, None, body))
}

async fn anomaly_page(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Result<Html<String>, StatusCode> {
    let auto = query.auto_refresh();
    let health = health(&state).await?;
    let body = view! { <AnomalyPage input=AnomalyForm::default() last=None/> }.into_any();
    Ok(render(&state, Tab::AnomalyDetection, auto, health, None, body))
}

async fn anomaly_submit(
    State(state): State<AppState>,
    Form(input): Form<AnomalyForm>,
) -> Result<Html<String>, StatusCode> {
    let request = input.request();
    let (health, outcome) = exchange(&state, move |backend| {
        Outcome::Response(backend.detect_anomalies(&request))
    })
    .await?;
    let body = view! { <AnomalyPage input=input last=Some(outcome)/> }.into_any();
    Ok(render(&state, Tab::AnomalyDetection, false, health, None, body))
}

async fn missing_person_page(
    State(state): State<AppState>,
    Query(query): Query<RefreshQuery>,
) -> Result<Html<String>, StatusCode> {
    let auto = query.auto_refresh();
    let health = health(&state).await?;
    let body =
        view! { <MissingPersonPage input=MissingPersonForm::default() last=None/> }.into_any();
    Ok(render(&state, Tab::MissingPerson, auto, health, None, body))
}

async fn missing_person_submit(
    State(state): State<AppState>,
    Form(input): Form<MissingPersonForm>,
) -> Result<Html<String>, StatusCode> {
    let request = input.request();
    let (health, outcome) = exchange(&state, move |backend| match request {
        Ok(request) => Outcome::Response(backend.search_missing_person(&request)),
        Err(e) => Outcome::Invalid(e),
    })
    .await?;
    let body = view! { <MissingPersonPage input=input last=Some(outcome)/> }.into_any();
    Ok(render(&state, Tab::MissingPerson, false, health, None, body))
}

async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLESHEET)
}
