use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use cut_planner::input::{self, Limits, RawDemand};
use cut_planner::solver::Solver;
use cut_planner::types::PackingResult;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

async fn optimize(
    State(limits): State<Limits>,
    Json(req): Json<RawDemand>,
) -> Result<Json<PackingResult>, (StatusCode, String)> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /optimize"
    );

    let job = input::validate(&req, &limits).map_err(|e| {
        tracing::warn!(error = %e, "rejected demand");
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    let result = tokio::task::spawn_blocking(move || {
        Solver::new(job.stock_length, job.requests).solve()
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "packing task failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "packing failed".to_string())
    })?;

    tracing::info!(
        bins = result.bin_count(),
        waste_percent = result.total_waste_percent(),
        "packed"
    );
    Ok(Json(result))
}

fn app(limits: Limits) -> Router {
    Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/optimize", post(optimize))
        .with_state(limits)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

fn limits_from_env() -> Limits {
    std::env::var("MAX_CUTS")
        .ok()
        .and_then(|v| v.parse().ok())
        .map(|max_cuts| Limits { max_cuts })
        .unwrap_or_default()
}

fn main() {
    let _sentry = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    let log_path = std::env::var("LOG_FILE").unwrap_or_else(|_| "development.log".to_string());
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .unwrap_or_else(|e| {
            eprintln!("failed to open {log_path}: {e}");
            std::process::exit(1);
        });

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");
    let limits = limits_from_env();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| {
            eprintln!("failed to start runtime: {e}");
            std::process::exit(1);
        });

    runtime.block_on(async move {
        let listener = match tokio::net::TcpListener::bind(&addr).await {
            Ok(listener) => listener,
            Err(e) => {
                eprintln!("failed to bind {addr}: {e}");
                std::process::exit(1);
            }
        };
        eprintln!("Listening on {addr}");
        tracing::info!(%addr, max_cuts = limits.max_cuts, "server started");
        if let Err(e) = axum::serve(listener, app(limits)).await {
            tracing::error!(error = %e, "server stopped");
        }
    });
}
