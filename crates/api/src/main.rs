use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use fundgenius_core::domain::profile::{validate_amount, ClientProfile, Goal, RiskTier};
use fundgenius_core::domain::recommendation::{Allocation, Reconciliation, Selection};
use fundgenius_core::engine::{allocate, build_allocation, Advisor};
use fundgenius_core::error::EngineError;
use fundgenius_core::feeds::{
    manager_notes, IndexQuote, MarketDataSource, NavQuote, NavSource, StaticMarketData,
    StaticNavFeed, StockQuote,
};

const NO_RECOMMENDATION: &str = "no recommendation, consult an advisor";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = fundgenius_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer())
        .init();

    let advisor = match settings.build_advisor() {
        Ok(advisor) => advisor,
        Err(e) => {
            sentry_anyhow::capture_anyhow(&e);
            tracing::error!(error = %e, "catalog load failed");
            return Err(e);
        }
    };
    tracing::info!(
        products = advisor.catalog().len(),
        normalize_weights = settings.normalize_weights,
        "catalog ready"
    );

    let state = AppState {
        advisor: Arc::new(advisor),
        market: Arc::new(StaticMarketData),
        navs: Arc::new(StaticNavFeed),
        notes_seed: settings.manager_notes_seed,
        notes_count: settings.manager_notes_count,
    };

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    tracing::info!(%addr, "api listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/recommendations", post(post_recommendation))
        .route("/v1/allocations", post(post_allocation))
        .route("/v1/market/indices", get(get_market_indices))
        .route("/v1/market/stocks/:ticker", get(get_stock_quote))
        .route("/v1/navs", get(get_navs))
        .route("/v1/notes", get(get_notes))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Clone)]
struct AppState {
    advisor: Arc<Advisor>,
    market: Arc<dyn MarketDataSource>,
    navs: Arc<dyn NavSource>,
    notes_seed: u64,
    notes_count: usize,
}

#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn bad_request(err: EngineError) -> (StatusCode, Json<ApiError>) {
    tracing::debug!(error = %err, "rejected request");
    (
        StatusCode::BAD_REQUEST,
        Json(ApiError {
            error: err.to_string(),
        }),
    )
}

fn internal(err: anyhow::Error) -> (StatusCode, Json<ApiError>) {
    sentry_anyhow::capture_anyhow(&err);
    tracing::error!(error = %err, "collaborator failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError {
            error: "internal error".to_string(),
        }),
    )
}

#[derive(Debug, Deserialize)]
struct RecommendRequest {
    risk_tier: String,
    horizon_years: f64,
    goal: String,
    amount: Option<f64>,
}

#[derive(Debug, Serialize)]
struct AllocationBody {
    lines: Vec<Allocation>,
    reconciliation: Reconciliation,
}

#[derive(Debug, Serialize)]
struct RecommendResponse {
    request_id: Uuid,
    risk_tier: RiskTier,
    category: String,
    selections: Vec<Selection>,
    weight_total: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    advice: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    allocation: Option<AllocationBody>,
}

async fn post_recommendation(
    State(state): State<AppState>,
    Json(req): Json<RecommendRequest>,
) -> ApiResult<RecommendResponse> {
    let risk_tier = RiskTier::parse_or_default(&req.risk_tier);
    let goal = req.goal.parse::<Goal>().map_err(bad_request)?;

    let (recommendation, allocation) = match req.amount {
        Some(amount) => {
            let profile =
                ClientProfile::new(risk_tier, req.horizon_years, goal, amount).map_err(bad_request)?;
            let advice = state.advisor.advise(&profile).map_err(bad_request)?;
            let body = AllocationBody {
                lines: advice.allocations,
                reconciliation: advice.reconciliation,
            };
            (advice.recommendation, Some(body))
        }
        None => {
            let recommendation = state
                .advisor
                .recommend(risk_tier, req.horizon_years, goal)
                .map_err(bad_request)?;
            (recommendation, None)
        }
    };

    let request_id = Uuid::new_v4();
    tracing::info!(
        %request_id,
        %risk_tier,
        %goal,
        selections = recommendation.selections.len(),
        "recommendation served"
    );

    Ok(Json(RecommendResponse {
        request_id,
        risk_tier,
        weight_total: recommendation.weight_total(),
        advice: recommendation.is_empty().then_some(NO_RECOMMENDATION),
        category: recommendation.category,
        selections: recommendation.selections,
        allocation,
    }))
}

#[derive(Debug, Deserialize)]
struct AllocateRequest {
    selections: Vec<Selection>,
    amount: f64,
}

async fn post_allocation(Json(req): Json<AllocateRequest>) -> ApiResult<AllocationBody> {
    validate_amount(req.amount).map_err(bad_request)?;
    if let Some(s) = req.selections.iter().find(|s| s.weight > 100) {
        return Err(bad_request(EngineError::invalid_input(
            "weight",
            format!("must be 0..=100 (product={}, got {})", s.name, s.weight),
        )));
    }

    let lines = build_allocation(&req.selections, req.amount);
    let reconciliation = allocate::reconcile(&lines, req.amount);
    Ok(Json(AllocationBody {
        lines,
        reconciliation,
    }))
}

async fn get_market_indices(State(state): State<AppState>) -> ApiResult<Vec<IndexQuote>> {
    let indices = state.market.market_indices().map_err(internal)?;
    tracing::debug!(source = state.market.source_name(), rows = indices.len(), "served market indices");
    Ok(Json(indices))
}

async fn get_stock_quote(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<StockQuote>, (StatusCode, Json<ApiError>)> {
    let quote = state.market.stock_quote(&ticker).map_err(internal)?;
    tracing::debug!(source = state.market.source_name(), %ticker, found = quote.is_some(), "stock quote lookup");
    match quote {
        Some(quote) => Ok(Json(quote)),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: format!("no quote for {ticker}"),
            }),
        )),
    }
}

async fn get_navs(State(state): State<AppState>) -> ApiResult<Vec<NavQuote>> {
    let today = chrono::Utc::now().date_naive();
    let navs = state.navs.latest_navs(today).map_err(internal)?;
    tracing::debug!(source = state.navs.source_name(), %today, rows = navs.len(), "served navs");
    Ok(Json(navs))
}

#[derive(Debug, Deserialize)]
struct NotesQuery {
    seed: Option<u64>,
}

async fn get_notes(
    State(state): State<AppState>,
    Query(query): Query<NotesQuery>,
) -> Json<Vec<&'static str>> {
    let seed = query.seed.unwrap_or(state.notes_seed);
    Json(manager_notes(seed, state.notes_count))
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

fn init_sentry(settings: &fundgenius_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
