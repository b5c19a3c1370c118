use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use board_planner::{
    LayoutResult, Piece, PieceId, SolveError, SolveOptions, Solver, StockBoardSpec,
};
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize, Serialize)]
struct SolveRequest {
    board: StockBoardSpec,
    pieces: Vec<Piece>,
    #[serde(flatten)]
    options: SolveOptions,
}

#[derive(Debug, Serialize)]
struct SolveResponse {
    #[serde(flatten)]
    layout: LayoutResult,
    board_count: usize,
    efficiency: f64,
    waste_percent: f64,
    total_cost: f64,
}

impl From<LayoutResult> for SolveResponse {
    fn from(layout: LayoutResult) -> Self {
        Self {
            board_count: layout.board_count(),
            efficiency: layout.efficiency(),
            waste_percent: layout.total_waste_percent(),
            total_cost: layout.total_cost(),
            layout,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pieces: Vec<PieceId>,
}

struct ApiError(SolveError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            SolveError::Validation(_) => StatusCode::BAD_REQUEST,
            SolveError::Fit { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let body = ErrorBody {
            error: self.0.to_string(),
            pieces: self.0.offending_ids().to_vec(),
        };
        (status, Json(body)).into_response()
    }
}

fn run(req: SolveRequest) -> Result<SolveResponse, SolveError> {
    let layout = Solver::new(req.board, req.pieces)
        .with_options(req.options)
        .solve()?;
    Ok(layout.into())
}

async fn solve(Json(req): Json<SolveRequest>) -> Result<Json<SolveResponse>, ApiError> {
    tracing::info!(
        body = serde_json::to_string(&req).unwrap_or_default(),
        "POST /solve"
    );

    run(req).map(Json).map_err(|e| {
        tracing::warn!(error = %e, "solve rejected");
        ApiError(e)
    })
}

#[tokio::main]
async fn main() {
    let _sentry = sentry::init((
        std::env::var("SENTRY_DSN").ok(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    ));

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/solve", post(solve))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.expect("server error");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults_options() {
        let req: SolveRequest = serde_json::from_str(
            r#"{"board":{"width":120,"height":240,"thickness":18},
                "pieces":[{"id":"a","width":80,"length":200}]}"#,
        )
        .unwrap();
        assert_eq!(req.options, SolveOptions::default());
        assert_eq!(req.board.material, "pine");

        let resp = run(req).unwrap();
        assert_eq!(resp.board_count, 1);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["boards"][0]["pieces"][0]["id"], "a");
    }

    #[test]
    fn test_fit_error_maps_to_422() {
        let req: SolveRequest = serde_json::from_str(
            r#"{"board":{"width":120,"height":240,"thickness":18},
                "pieces":[{"id":"big","width":130,"length":250}],
                "margin":0.5}"#,
        )
        .unwrap();
        assert_eq!(req.options.margin, 0.5);
        let err = run(req).unwrap_err();
        let resp = ApiError(err).into_response();
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_validation_error_maps_to_400() {
        let req = SolveRequest {
            board: StockBoardSpec::new(-1.0, 240.0),
            pieces: vec![],
            options: SolveOptions::default(),
        };
        let resp = ApiError(run(req).unwrap_err()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_negative_thickness_and_price_rejected() {
        let req: SolveRequest = serde_json::from_str(
            r#"{"board":{"width":120,"height":240,"thickness":-5,"price_per_board":-10},
                "pieces":[{"id":"a","width":10,"length":10}]}"#,
        )
        .unwrap();
        let resp = ApiError(run(req).unwrap_err()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
