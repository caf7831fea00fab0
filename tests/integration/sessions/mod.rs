//! Sessions domain integration tests: TTL behavior, step transitions,
//! journeys, anonymous ids

use axum::http::{Method, StatusCode};
use chrono::{Duration, Utc};
use serde_json::json;
use tower::ServiceExt;

use ally_sessions::{AllySession, SessionStep};

use crate::common::{json_request, parse_body, sessions_router};

mod test_sessions {
    use super::*;

    #[tokio::test]
    async fn test_session_roundtrip() {
        let (app, _state) = sessions_router();

        let put = json_request(
            Method::PUT,
            "/v1/sessions/anon-1",
            Some(json!({
                "persona": "Indie maker",
                "pain_point": "Specs take weeks",
                "solution_idea": "Guided questionnaire"
            })),
        );
        let resp = app.clone().oneshot(put).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let get = json_request(Method::GET, "/v1/sessions/anon-1", None);
        let resp = app.clone().oneshot(get).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = parse_body(resp).await;
        assert_eq!(body["user_id"], "anon-1");
        assert_eq!(body["persona"], "Indie maker");
        assert_eq!(body["step"], "ideation");

        let delete = json_request(Method::DELETE, "/v1/sessions/anon-1", None);
        let resp = app.clone().oneshot(delete).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let get = json_request(Method::GET, "/v1/sessions/anon-1", None);
        let resp = app.oneshot(get).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_session_is_404() {
        let (app, _state) = sessions_router();

        let req = json_request(Method::GET, "/v1/sessions/anon-unknown", None);
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test_log::test(tokio::test)]
    async fn test_expired_session_reads_as_absent_and_is_cleared() {
        let (app, state) = sessions_router();

        // Age a session past the 24-hour window
        state.sessions.insert_at(
            "anon-1",
            AllySession {
                user_id: "anon-1".to_string(),
                project_name: None,
                persona: "maker".to_string(),
                pain_point: String::new(),
                solution_idea: String::new(),
                expert_qa: vec![],
                step: SessionStep::Ideation,
                updated_at: Utc::now() - Duration::hours(25),
            },
            Utc::now() - Duration::hours(25),
        );

        let req = json_request(Method::GET, "/v1/sessions/anon-1", None);
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        // The expired entry was removed, not just hidden
        assert_eq!(state.sessions.len(), 0);
    }

    #[tokio::test]
    async fn test_session_within_window_returned_unchanged() {
        let (app, state) = sessions_router();

        let session = AllySession {
            user_id: "anon-1".to_string(),
            project_name: Some("Ally".to_string()),
            persona: "maker".to_string(),
            pain_point: "slow specs".to_string(),
            solution_idea: "wizard".to_string(),
            expert_qa: vec![],
            step: SessionStep::Questionnaire,
            updated_at: Utc::now() - Duration::hours(23),
        };
        state.sessions.insert_at(
            "anon-1",
            session.clone(),
            Utc::now() - Duration::hours(23),
        );

        let req = json_request(Method::GET, "/v1/sessions/anon-1", None);
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = parse_body(resp).await;
        let returned: AllySession = serde_json::from_value(body).unwrap();
        assert_eq!(returned, session);
    }

    #[tokio::test]
    async fn test_step_cannot_skip_forward() {
        let (app, _state) = sessions_router();

        // A fresh session starts at ideation; jumping straight to design
        // is not a legal transition.
        let req = json_request(
            Method::PUT,
            "/v1/sessions/anon-1",
            Some(json!({"step": "design"})),
        );
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_step_advances_and_restarts() {
        let (app, _state) = sessions_router();

        for step in ["questionnaire", "design", "ideation"] {
            let req = json_request(
                Method::PUT,
                "/v1/sessions/anon-1",
                Some(json!({"step": step})),
            );
            let resp = app.clone().oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK, "step {step} rejected");

            let body = parse_body(resp).await;
            assert_eq!(body["step"], step);
        }
    }
}

mod test_journeys {
    use super::*;

    #[tokio::test]
    async fn test_journey_lifecycle() {
        let (app, _state) = sessions_router();

        let start = json_request(
            Method::POST,
            "/v1/journeys",
            Some(json!({"origin": "landing", "intent": "build-prd"})),
        );
        let resp = app.clone().oneshot(start).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = parse_body(resp).await;
        let id = body["journey_id"].as_str().unwrap().to_string();
        assert_eq!(body["origin"], "landing");

        let event = json_request(
            Method::POST,
            &format!("/v1/journeys/{id}/events"),
            Some(json!({"page": "questionnaire"})),
        );
        let resp = app.clone().oneshot(event).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let get = json_request(Method::GET, &format!("/v1/journeys/{id}"), None);
        let resp = app.oneshot(get).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = parse_body(resp).await;
        assert_eq!(body["intent"], "build-prd");
    }

    #[tokio::test]
    async fn test_journey_requires_origin_and_intent() {
        let (app, _state) = sessions_router();

        let req = json_request(Method::POST, "/v1/journeys", Some(json!({"origin": "x"})));
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_event_against_unknown_journey_is_404() {
        let (app, _state) = sessions_router();

        let req = json_request(
            Method::POST,
            "/v1/journeys/nope/events",
            Some(json!({"page": "anywhere"})),
        );
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}

mod test_users {
    use super::*;

    #[tokio::test]
    async fn test_mint_anonymous_id() {
        let (app, _state) = sessions_router();

        let req = json_request(Method::POST, "/v1/users/anonymous", None);
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = parse_body(resp).await;
        assert!(body["user_id"].as_str().unwrap().starts_with("anon-"));
    }

    #[tokio::test]
    async fn test_minted_ids_are_unique() {
        let (app, _state) = sessions_router();

        let first = parse_body(
            app.clone()
                .oneshot(json_request(Method::POST, "/v1/users/anonymous", None))
                .await
                .unwrap(),
        )
        .await;
        let second = parse_body(
            app.oneshot(json_request(Method::POST, "/v1/users/anonymous", None))
                .await
                .unwrap(),
        )
        .await;

        assert_ne!(first["user_id"], second["user_id"]);
    }
}
