//! Chat domain integration tests: streaming relay, conversations,
//! messages, file uploads

use axum::http::{header, Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use ally_miso::{ConversationSummary, MessageRecord, MockAgentApi};

use crate::common::{body_string, chat_router, json_request, parse_body};

mod test_chat_stream {
    use super::*;

    #[tokio::test]
    async fn test_chat_returns_event_stream() {
        let agent = MockAgentApi::new().with_sse_chunks(vec!["data: {\"answer\":\"hi\"}\n\n"]);
        let app = chat_router(agent);

        let req = json_request(
            Method::POST,
            "/v1/chat",
            Some(json!({"query": "hi", "files": []})),
        );
        let resp = app.oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/event-stream"
        );
    }

    #[tokio::test]
    async fn test_chat_forwards_documented_defaults() {
        // No conversation id and no user on the inbound request must reach
        // the Agent API as a fresh-conversation turn for the shared user.
        let agent = MockAgentApi::new().with_sse_chunks(vec!["data: ok\n\n"]);
        let log = agent.chat_request_log();
        let app = chat_router(agent);

        let req = json_request(
            Method::POST,
            "/v1/chat",
            Some(json!({"query": "hi", "files": []})),
        );
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let recorded = log.lock().unwrap();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].query, "hi");
        assert_eq!(recorded[0].conversation_id, None);
        assert_eq!(recorded[0].user, None);
        assert!(recorded[0].files.is_empty());
    }

    #[tokio::test]
    async fn test_chat_relays_only_complete_data_lines() {
        // Chunk boundaries fall mid-line; the relayed body still carries
        // exactly the complete data lines, re-framed.
        let agent = MockAgentApi::new().with_sse_chunks(vec![
            "data: {\"answer\":\"He",
            "llo\"}\n\nevent: ping\nda",
            "ta: {\"answer\":\"!\"}\n\n",
        ]);
        let app = chat_router(agent);

        let req = json_request(Method::POST, "/v1/chat", Some(json!({"query": "hi"})));
        let resp = app.oneshot(req).await.unwrap();

        let body = body_string(resp).await;
        assert_eq!(
            body,
            "data: {\"answer\":\"Hello\"}\n\ndata: {\"answer\":\"!\"}\n\n"
        );
    }

    #[tokio::test]
    async fn test_chat_missing_query_returns_400() {
        let app = chat_router(MockAgentApi::new());

        let req = json_request(Method::POST, "/v1/chat", Some(json!({})));
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chat_empty_query_returns_400() {
        let app = chat_router(MockAgentApi::new());

        let req = json_request(Method::POST, "/v1/chat", Some(json!({"query": ""})));
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_chat_upstream_failure_forwards_status() {
        let app = chat_router(MockAgentApi::new().failing(503, "agent down"));

        let req = json_request(Method::POST, "/v1/chat", Some(json!({"query": "hi"})));
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let body = parse_body(resp).await;
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
    }
}

mod test_conversations {
    use super::*;

    fn summaries() -> Vec<ConversationSummary> {
        vec![
            ConversationSummary {
                id: "conv-1".to_string(),
                name: "First idea".to_string(),
                updated_at: 1_700_000_000,
            },
            ConversationSummary {
                id: "conv-2".to_string(),
                name: "Second idea".to_string(),
                updated_at: 1_700_000_100,
            },
        ]
    }

    #[tokio::test]
    async fn test_list_conversations_maps_upstream_records() {
        let app = chat_router(MockAgentApi::new().with_conversations(summaries()));

        let req = json_request(Method::GET, "/v1/conversations?user=anon-1", None);
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = parse_body(resp).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["id"], "conv-1");
        assert_eq!(body[0]["name"], "First idea");
        // Unix seconds became an ISO timestamp
        assert!(body[0]["updated_at"].as_str().unwrap().starts_with("2023-"));
    }

    #[tokio::test]
    async fn test_delete_conversation_returns_204() {
        let app = chat_router(MockAgentApi::new().with_conversations(summaries()));

        let req = json_request(Method::DELETE, "/v1/conversations/conv-1", None);
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_delete_unknown_conversation_forwards_404() {
        let app = chat_router(MockAgentApi::new());

        let req = json_request(Method::DELETE, "/v1/conversations/nope", None);
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_rename_requires_name_or_auto_generate() {
        let app = chat_router(MockAgentApi::new());

        let req = json_request(
            Method::POST,
            "/v1/conversations/conv-1/rename",
            Some(json!({})),
        );
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_rename_with_name() {
        let app = chat_router(MockAgentApi::new());

        let req = json_request(
            Method::POST,
            "/v1/conversations/conv-1/rename",
            Some(json!({"name": "Renamed"})),
        );
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = parse_body(resp).await;
        assert_eq!(body["id"], "conv-1");
        assert_eq!(body["name"], "Renamed");
    }

    #[tokio::test]
    async fn test_rename_with_auto_generate() {
        let app = chat_router(MockAgentApi::new());

        let req = json_request(
            Method::POST,
            "/v1/conversations/conv-1/rename",
            Some(json!({"auto_generate": true})),
        );
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

mod test_messages {
    use super::*;

    fn records() -> Vec<MessageRecord> {
        vec![
            MessageRecord {
                id: "msg-1".to_string(),
                conversation_id: "conv-1".to_string(),
                query: "What first?".to_string(),
                answer: "Name the pain point.".to_string(),
                created_at: 1_700_000_000,
                message_files: vec![],
            },
            MessageRecord {
                id: "msg-2".to_string(),
                conversation_id: "conv-1".to_string(),
                query: "Then?".to_string(),
                answer: "Sketch the persona.".to_string(),
                created_at: 1_700_000_060,
                message_files: vec![],
            },
        ]
    }

    #[tokio::test]
    async fn test_messages_require_conversation_id() {
        let app = chat_router(MockAgentApi::new());

        let req = json_request(Method::GET, "/v1/messages", None);
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_messages_flatten_records_into_bubbles() {
        let app = chat_router(MockAgentApi::new().with_messages(records()));

        let req = json_request(Method::GET, "/v1/messages?conversation_id=conv-1", None);
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = parse_body(resp).await;
        let messages = body.as_array().unwrap();
        assert_eq!(messages.len(), 4);

        assert_eq!(messages[0]["role"], "user");
        assert_eq!(messages[0]["content"], "What first?");
        assert_eq!(messages[1]["role"], "assistant");
        assert_eq!(messages[1]["content"], "Name the pain point.");
        assert_eq!(messages[2]["role"], "user");
        assert_eq!(messages[3]["role"], "assistant");
    }

    #[tokio::test]
    async fn test_messages_scoped_to_conversation() {
        let app = chat_router(MockAgentApi::new().with_messages(records()));

        let req = json_request(Method::GET, "/v1/messages?conversation_id=other", None);
        let resp = app.oneshot(req).await.unwrap();

        let body = parse_body(resp).await;
        assert!(body.as_array().unwrap().is_empty());
    }
}

mod test_files {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;

    const BOUNDARY: &str = "ally-test-boundary";

    fn multipart_request(uri: &str, parts: &[(&str, Option<&str>, &str, &str)]) -> Request<Body> {
        // parts: (field name, file name, content type, payload)
        let mut body = String::new();
        for (name, file_name, content_type, payload) in parts {
            body.push_str(&format!("--{BOUNDARY}\r\n"));
            match file_name {
                Some(file_name) => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                )),
                None => body.push_str(&format!(
                    "Content-Disposition: form-data; name=\"{name}\"\r\n\r\n"
                )),
            }
            body.push_str(payload);
            body.push_str("\r\n");
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_upload_returns_attachment_with_upstream_id() {
        let app = chat_router(MockAgentApi::new());

        let req = multipart_request(
            "/v1/files/upload",
            &[
                ("file", Some("notes.txt"), "text/plain", "remember the user"),
                ("user", None, "", "anon-1"),
            ],
        );
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = parse_body(resp).await;
        assert_eq!(body["name"], "notes.txt");
        assert_eq!(body["mime_type"], "text/plain");
        assert_eq!(body["upload_file_id"], "mock-file-id");
        assert_ne!(body["id"], "mock-file-id");
    }

    #[tokio::test]
    async fn test_upload_without_file_returns_400() {
        let app = chat_router(MockAgentApi::new());

        let req = multipart_request("/v1/files/upload", &[("user", None, "", "anon-1")]);
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
