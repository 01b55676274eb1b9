//! HTTP front end: serves the single-page dashboard and answers figure
//! requests with JSON.

use crate::config::Config as FileConfig;
use crate::dataset::Dataset;
use crate::interaction::{compute_all_figures, Figures, SelectionEvent};

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use include_dir::{include_dir, Dir};
use ringlog::*;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::decompression::RequestDecompressionLayer;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

mod event;

use event::RawEvent;

static ASSETS: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/src/viewer/assets");

/// Settings for the `serve` subcommand, after merging the optional config
/// file with command line flags.
pub struct Config {
    pub dataset: PathBuf,
    pub listen: SocketAddr,
    pub open_browser: bool,
    pub default_year: i32,
    pub verbose: u8,
}

impl TryFrom<ArgMatches> for Config {
    type Error = String;

    fn try_from(args: ArgMatches) -> Result<Self, String> {
        let file = match args.get_one::<PathBuf>("CONFIG") {
            Some(path) => FileConfig::load(path)
                .map_err(|e| format!("failed to load config {}: {e}", path.display()))?,
            None => FileConfig::default(),
        };

        Ok(Config {
            dataset: args
                .get_one::<PathBuf>("DATASET")
                .cloned()
                .unwrap_or(file.general.dataset),
            listen: args
                .get_one::<SocketAddr>("LISTEN")
                .copied()
                .unwrap_or(file.general.listen),
            open_browser: file.general.open_browser && !args.get_flag("NO_OPEN"),
            default_year: file.dashboard.default_year,
            verbose: *args.get_one::<u8>("VERBOSE").unwrap_or(&0),
        })
    }
}

pub fn command() -> Command {
    Command::new("serve")
        .about("Serve the interactive dashboard")
        .arg(
            Arg::new("DATASET")
                .help("CSV or Parquet dataset")
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("CONFIG")
                .long("config")
                .short('c')
                .help("TOML configuration file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("LISTEN")
                .long("listen")
                .short('l')
                .help("Address to listen on")
                .value_parser(value_parser!(SocketAddr)),
        )
        .arg(
            Arg::new("NO_OPEN")
                .long("no-open")
                .help("Do not launch a browser")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("VERBOSE")
                .long("verbose")
                .short('v')
                .help("Increase verbosity")
                .action(ArgAction::Count),
        )
}

pub fn run(config: Config) -> anyhow::Result<()> {
    let dataset = Dataset::load(&config.dataset)?;
    if dataset.is_empty() {
        warn!("{} contains no rows", config.dataset.display());
    }

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    rt.block_on(serve(config, dataset))
}

async fn serve(config: Config, dataset: Dataset) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        dataset,
        default_year: config.default_year,
    });

    let listener = TcpListener::bind(config.listen).await?;
    let addr = listener.local_addr()?;

    info!("dashboard listening on: http://{addr}");

    if config.open_browser {
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            if open::that(format!("http://{addr}")).is_err() {
                info!("Use your browser to view: http://{addr}");
            } else {
                info!("Launched browser to view: http://{addr}");
            }
        });
    }

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}

pub struct AppState {
    dataset: Dataset,
    default_year: i32,
}

impl AppState {
    pub fn new(dataset: Dataset, default_year: i32) -> Self {
        Self {
            dataset,
            default_year,
        }
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/lib/{file}", get(lib))
        .route("/api/years", get(years))
        .route("/api/figures", get(figures_for_year).post(figures))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(RequestDecompressionLayer::new())
                .layer(CompressionLayer::new()),
        )
}

/// API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success".to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn error(error: String) -> Self {
        Self {
            status: "error".to_string(),
            data: None,
            error: Some(error),
        }
    }
}

fn content_type(file: &str) -> &'static str {
    match file.rsplit('.').next() {
        Some("html") => "text/html; charset=utf-8",
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        _ => "application/octet-stream",
    }
}

fn asset(file: &str) -> Response {
    match ASSETS.get_file(file) {
        Some(asset) => ([(header::CONTENT_TYPE, content_type(file))], asset.contents()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn index() -> Response {
    asset("index.html")
}

async fn lib(Path(file): Path<String>) -> Response {
    asset(&file)
}

#[derive(Debug, Serialize)]
struct Years {
    years: Vec<i32>,
    default_year: i32,
}

async fn years(State(state): State<Arc<AppState>>) -> Json<Years> {
    Json(Years {
        years: state.dataset.years(),
        default_year: state.default_year,
    })
}

fn respond(state: &AppState, event: SelectionEvent) -> (StatusCode, Json<ApiResponse<Figures>>) {
    debug!("computing figures for {event:?}");
    match compute_all_figures(&state.dataset, &event) {
        Ok(figures) => (StatusCode::OK, Json(ApiResponse::success(figures))),
        Err(e) => {
            warn!("figure request failed: {e}");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::error(e.to_string())),
            )
        }
    }
}

async fn figures(
    State(state): State<Arc<AppState>>,
    Json(event): Json<RawEvent>,
) -> (StatusCode, Json<ApiResponse<Figures>>) {
    let event = event.into_selection(state.default_year);
    respond(&state, event)
}

#[derive(Debug, Deserialize)]
struct YearQuery {
    year: Option<i32>,
}

async fn figures_for_year(
    State(state): State<Arc<AppState>>,
    Query(query): Query<YearQuery>,
) -> (StatusCode, Json<ApiResponse<Figures>>) {
    let event = SelectionEvent::year_changed(query.year.unwrap_or(state.default_year));
    respond(&state, event)
}
