use axum::{
    Router,
    extract::{Json, Query},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::{
    GoalPlan, ProjectionResult, RetirementPlan, Strategy, plan_goal, plan_retirement,
    run_projection,
};

mod cli;
mod inputs;

pub use cli::{AppError, Cli, Command, run_cli};
pub use inputs::{
    GoalArgs, GoalPayload, InputError, LumpsumArgs, LumpsumPayload, RetirementArgs,
    RetirementPayload, SipArgs, SipPayload, StrategyPayload, SwpArgs, SwpPayload, validate_goal,
    validate_lumpsum, validate_retirement, validate_sip, validate_swp,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SolvedPlan {
    Retirement(RetirementPlan),
    Goal(GoalPlan),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse {
    pub strategy: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<SolvedPlan>,
    pub depletion_year: Option<u32>,
    #[serde(flatten)]
    pub result: ProjectionResult,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn strategy_key(strategy: &Strategy) -> &'static str {
    match strategy {
        Strategy::PeriodicInvestment(_) => "sip",
        Strategy::Lumpsum(_) => "lumpsum",
        Strategy::Retirement(_) => "retirement",
        Strategy::SystematicWithdrawal(_) => "swp",
        Strategy::GoalBased(_) => "goal",
    }
}

pub fn build_projection_response(strategy: &Strategy) -> ProjectionResponse {
    let plan = match strategy {
        Strategy::Retirement(inputs) => plan_retirement(inputs).map(SolvedPlan::Retirement),
        Strategy::GoalBased(inputs) => plan_goal(inputs).map(SolvedPlan::Goal),
        _ => None,
    };
    let result = run_projection(strategy);
    ProjectionResponse {
        strategy: strategy_key(strategy),
        plan,
        depletion_year: result.depletion_year(),
        result,
    }
}

pub fn router() -> Router {
    Router::new()
        .route(
            "/api/sip",
            get(projection_get_handler::<SipPayload>).post(projection_post_handler::<SipPayload>),
        )
        .route(
            "/api/lumpsum",
            get(projection_get_handler::<LumpsumPayload>)
                .post(projection_post_handler::<LumpsumPayload>),
        )
        .route(
            "/api/retirement",
            get(projection_get_handler::<RetirementPayload>)
                .post(projection_post_handler::<RetirementPayload>),
        )
        .route(
            "/api/swp",
            get(projection_get_handler::<SwpPayload>).post(projection_post_handler::<SwpPayload>),
        )
        .route(
            "/api/goal",
            get(projection_get_handler::<GoalPayload>).post(projection_post_handler::<GoalPayload>),
        )
        .fallback(not_found_handler)
}

pub async fn run_http_server(port: u16) -> std::io::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    log::info!("projection API listening on http://{addr}");
    log::info!("local access: http://127.0.0.1:{port}/api/sip");

    axum::serve(listener, router()).await
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn projection_get_handler<P: StrategyPayload>(Query(payload): Query<P>) -> Response {
    projection_handler_impl(payload)
}

async fn projection_post_handler<P: StrategyPayload>(Json(payload): Json<P>) -> Response {
    projection_handler_impl(payload)
}

fn projection_handler_impl<P: StrategyPayload>(payload: P) -> Response {
    let strategy = match payload.into_strategy() {
        Ok(strategy) => strategy,
        Err(err) => {
            log::warn!("rejected projection request: {err}");
            return error_response(StatusCode::BAD_REQUEST, &err.to_string());
        }
    };

    log::debug!("projecting {strategy:?}");
    json_response(StatusCode::OK, build_projection_response(&strategy))
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GoalInputs, RetirementInputs, SwpInputs};
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        serde_json::from_slice(&bytes).expect("body should be json")
    }

    #[test]
    fn response_serialization_contains_expected_fields() {
        let response = build_projection_response(&Strategy::GoalBased(GoalInputs::default()));
        let json = serde_json::to_string(&response).expect("response should serialize");
        assert!(json.contains("\"strategy\":\"goal\""));
        assert!(json.contains("\"plan\""));
        assert!(json.contains("\"monthlyContribution\""));
        assert!(json.contains("\"totalContribution\""));
        assert!(json.contains("\"totalGrowth\""));
        assert!(json.contains("\"finalBalance\""));
        assert!(json.contains("\"projections\""));
        assert!(json.contains("\"cumulativeContribution\""));
        assert!(json.contains("\"cumulativeGrowth\""));
        assert!(json.contains("\"depletionYear\":null"));
    }

    #[test]
    fn plan_is_omitted_for_strategies_without_a_solve_step() {
        let response = build_projection_response(&Strategy::SystematicWithdrawal(
            SwpInputs::default(),
        ));
        assert_eq!(response.strategy, "swp");
        assert!(response.plan.is_none());
        let json = serde_json::to_string(&response).expect("response should serialize");
        assert!(!json.contains("\"plan\""));
    }

    #[test]
    fn retirement_response_carries_solved_plan() {
        let inputs = RetirementInputs::default();
        let response = build_projection_response(&Strategy::Retirement(inputs));
        let Some(SolvedPlan::Retirement(plan)) = response.plan else {
            panic!("expected retirement plan");
        };
        assert_eq!(plan.horizon_years, 30);
        assert_eq!(response.result.projections.len(), 30);
    }

    async fn route_request(request: Request<Body>) -> Response {
        router()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    #[tokio::test]
    async fn router_serves_every_strategy_from_query_string() {
        let cases = [
            ("/api/sip?monthlyInvestment=2500&years=4&expectedReturn=10", "sip", 4),
            ("/api/lumpsum?principal=50000&years=6", "lumpsum", 6),
            (
                "/api/retirement?currentAge=40&retirementAge=55&inflation=5",
                "retirement",
                15,
            ),
            ("/api/swp?years=5&withdrawalRate=3", "swp", 5),
            ("/api/goal?goalAmount=300000&years=2&initialInvestment=0", "goal", 2),
        ];
        for (uri, strategy, years) in cases {
            let request = Request::get(uri)
                .body(Body::empty())
                .expect("request should build");
            let response = route_request(request).await;
            assert_eq!(response.status(), StatusCode::OK, "status for {uri}");

            let body = body_json(response).await;
            assert_eq!(body["strategy"], strategy, "strategy for {uri}");
            assert_eq!(
                body["projections"].as_array().map(|p| p.len()),
                Some(years),
                "projection count for {uri}"
            );
        }
    }

    #[tokio::test]
    async fn router_accepts_json_post() {
        let request = Request::post("/api/swp")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"corpus": 2000000, "withdrawalRate": 20, "years": 10, "expectedReturn": 1}"#,
            ))
            .expect("request should build");
        let response = route_request(request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["strategy"], "swp");
        assert_eq!(body["depletionYear"], 6);
    }

    #[tokio::test]
    async fn router_rejects_out_of_range_query() {
        let request = Request::get("/api/lumpsum?years=99")
            .body(Body::empty())
            .expect("request should build");
        let response = route_request(request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "years must be between 1 and 40");
    }

    #[tokio::test]
    async fn router_falls_back_to_not_found() {
        let request = Request::get("/api/unknown")
            .body(Body::empty())
            .expect("request should build");
        let response = route_request(request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Not found");
    }

    #[tokio::test]
    async fn post_handler_returns_projection() {
        let payload: GoalPayload =
            serde_json::from_str(r#"{"goalAmount": 500000, "years": 3, "initialInvestment": 0}"#)
                .expect("payload should parse");
        let response = projection_post_handler(Json(payload)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::CACHE_CONTROL)
                .and_then(|v| v.to_str().ok()),
            Some("no-store")
        );

        let body = body_json(response).await;
        assert_eq!(body["strategy"], "goal");
        assert_eq!(
            body["projections"].as_array().map(|p| p.len()),
            Some(3)
        );
        let final_balance = body["finalBalance"].as_f64().expect("final balance");
        assert!((final_balance - 500_000.0).abs() < 1e-3);
    }

    #[tokio::test]
    async fn get_handler_rejects_invalid_input() {
        let payload: SipPayload =
            serde_json::from_str(r#"{"years": 60}"#).expect("payload should parse");
        let response = projection_get_handler(Query(payload)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "years must be between 1 and 40");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let response = not_found_handler().await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Not found");
    }
}
