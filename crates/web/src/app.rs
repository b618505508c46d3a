use axum::{Router, middleware};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::features;
use crate::middleware::auth::require_session;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::session::handlers::create_session,
        features::session::handlers::delete_session,
        features::leaderboard::handlers::get_leaderboard,
        features::day1::handlers::list_scores,
        features::day1::handlers::record_score,
        features::day2::handlers::get_scorecard,
        features::day2::handlers::record_hole,
        features::day2::handlers::settle_group,
        features::day2::handlers::list_skins,
        features::courses::handlers::get_course,
    ),
    components(
        schemas(
            features::session::handlers::CreateSessionRequest,
            features::session::handlers::SessionResponse,
            features::leaderboard::handlers::LeaderboardResponse,
            features::day2::services::RecordHoleResponse,
            storage::dto::leaderboard::Leaderboard,
            storage::dto::leaderboard::LeaderboardEntry,
            storage::dto::leaderboard::GroupProgress,
            storage::dto::score::RecordDay1ScoreRequest,
            storage::dto::score::RecordDay2ScoresRequest,
            storage::dto::score::TeamStrokes,
            storage::dto::score::ScorecardResponse,
            storage::dto::score::ScorecardHole,
            storage::dto::course::CourseResponse,
            storage::services::skins::GroupSettlement,
            storage::services::skins::PersistFailure,
            storage::models::Team,
            storage::models::Course,
            storage::models::HoleInfo,
            storage::models::Day1Score,
            storage::models::Day2Score,
            storage::models::SkinResult,
            storage::models::SkinOutcome,
            storage::models::SkinWin,
        )
    ),
    tags(
        (name = "session", description = "Access code gate"),
        (name = "leaderboard", description = "Team standings"),
        (name = "day1", description = "Scramble and alternate shot scoring"),
        (name = "day2", description = "Skins scoring"),
        (name = "courses", description = "Course data"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("Session token")
                        .build(),
                ),
            )
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .nest("/leaderboard", features::leaderboard::routes::routes())
        .nest("/day1", features::day1::routes::routes())
        .nest("/day2", features::day2::routes::routes())
        .nest("/courses", features::courses::routes::routes())
        .route_layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            require_session,
        ));

    let api = Router::new()
        .nest("/session", features::session::routes::routes(&state))
        .merge(protected);

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Method, Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use storage::MemoryStore;
    use tower::ServiceExt;

    use super::*;
    use crate::session::SessionRegistry;

    const CODE: &str = "fore";

    fn app() -> Router {
        build_router(AppState {
            store: Arc::new(MemoryStore::new()),
            sessions: SessionRegistry::new(),
            access_code: Arc::from(CODE),
            leaderboard_refresh_secs: 30,
        })
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn login(app: &Router) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/session",
            None,
            Some(json!({ "access_code": CODE })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_routes_require_session() {
        let app = app();

        let (status, _) = send(&app, Method::GET, "/api/leaderboard", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &app,
            Method::GET,
            "/api/leaderboard",
            Some("not-a-token"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_wrong_access_code_is_rejected() {
        let app = app();
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/session",
            None,
            Some(json!({ "access_code": "slice" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_logout_closes_session() {
        let app = app();
        let token = login(&app).await;

        let (status, _) = send(&app, Method::DELETE, "/api/session", Some(&token), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&app, Method::GET, "/api/leaderboard", Some(&token), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_day2_scoring_settles_and_updates_leaderboard() {
        let app = app();
        let token = login(&app).await;

        for (hole, strokes) in [(1, [4, 4, 5]), (2, [3, 3, 3]), (3, [2, 5, 5])] {
            let (status, body) = send(
                &app,
                Method::PUT,
                &format!("/api/day2/groups/1/holes/{}", hole),
                Some(&token),
                Some(json!({
                    "scores": [
                        { "team": "young-guns", "strokes": strokes[0] },
                        { "team": "ogs", "strokes": strokes[1] },
                        { "team": "mids", "strokes": strokes[2] },
                    ]
                })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["scores"].as_array().unwrap().len(), 3);
        }

        let (status, scorecard) = send(
            &app,
            Method::GET,
            "/api/day2/groups/1/scorecard",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(scorecard["holes"].as_array().unwrap().len(), 9);
        assert_eq!(scorecard["holes"][0]["skin"]["outcome"]["result"], "tied");
        assert_eq!(scorecard["holes"][2]["skin"]["stake_value"], 3);
        assert!(scorecard["holes"][3]["skin"].is_null());

        let (_, skins) = send(&app, Method::GET, "/api/day2/skins", Some(&token), None).await;
        assert_eq!(skins.as_array().unwrap().len(), 1);
        assert_eq!(skins[0]["winner"], "young-guns");

        let (status, board) =
            send(&app, Method::GET, "/api/leaderboard", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(board["entries"][0]["team"], "young-guns");
        assert_eq!(board["entries"][0]["day2_points"], 3);
        assert_eq!(board["day1_released"], false);
        assert_eq!(board["refresh_interval_secs"], 30);
    }

    #[tokio::test]
    async fn test_out_of_range_input_is_rejected() {
        let app = app();
        let token = login(&app).await;

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/day1/teams/mids/holes/3",
            Some(&token),
            Some(json!({ "scramble_strokes": 20, "alt_shot_strokes": 4 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/day1/teams/mids/holes/19",
            Some(&token),
            Some(json!({ "scramble_strokes": 4, "alt_shot_strokes": 4 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/day2/groups/6/holes/1",
            Some(&token),
            Some(json!({ "scores": [{ "team": "ogs", "strokes": 4 }] })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_day1_scores_round_trip() {
        let app = app();
        let token = login(&app).await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/day1/teams/ogs/holes/7",
            Some(&token),
            Some(json!({ "scramble_strokes": 5, "alt_shot_strokes": 6 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["team"], "ogs");

        let (_, scores) = send(
            &app,
            Method::GET,
            "/api/day1/scores?team=ogs",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(scores.as_array().unwrap().len(), 1);
        assert_eq!(scores[0]["alt_shot_strokes"], 6);

        let (_, scores) = send(
            &app,
            Method::GET,
            "/api/day1/scores?team=mids",
            Some(&token),
            None,
        )
        .await;
        assert!(scores.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_course_lookup() {
        let app = app();
        let token = login(&app).await;

        let (status, body) =
            send(&app, Method::GET, "/api/courses/day2", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["holes"].as_array().unwrap().len(), 9);
        assert_eq!(body["total_par"], 36);
    }
}
