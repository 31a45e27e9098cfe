//! Adapter behaviour against a mock backend.

use agentdesk_client::notifications::{REQUEST_FAILED, SERVER_UNREACHABLE, SESSION_EXPIRED};
use agentdesk_client::{
    ApiClientError, ClientEvent, HttpClient, HttpConfig, MemoryTokenStorage, Session,
};
use agentdesk_core::{ListQuery, LoginRequest, ResourceId, TriggerQuery};
use agentdesk_test_utils::fixtures;
use serde_json::json;
use std::time::Duration;
use tokio::sync::mpsc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

struct Harness {
    server: MockServer,
    client: HttpClient,
    storage: MemoryTokenStorage,
    events: mpsc::UnboundedReceiver<ClientEvent>,
}

async fn harness(storage: MemoryTokenStorage) -> Harness {
    let server = MockServer::start().await;
    let (tx, events) = mpsc::unbounded_channel();
    let session = Session::load(storage.clone());
    let client = HttpClient::new(&HttpConfig::new(server.uri()), session, tx).unwrap();
    Harness {
        server,
        client,
        storage,
        events,
    }
}

fn drain(events: &mut mpsc::UnboundedReceiver<ClientEvent>) -> Vec<ClientEvent> {
    let mut out = Vec::new();
    while let Ok(event) = events.try_recv() {
        out.push(event);
    }
    out
}

fn notification_messages(events: &[ClientEvent]) -> Vec<String> {
    events
        .iter()
        .filter_map(|event| match event {
            ClientEvent::Notify(notification) => Some(notification.message.clone()),
            ClientEvent::SessionExpired => None,
        })
        .collect()
}

fn has_no_authorization(request: &Request) -> bool {
    !request.headers.contains_key("authorization")
}

#[tokio::test]
async fn login_tokens_are_carried_by_later_requests() {
    let mut h = harness(MemoryTokenStorage::new()).await;

    Mock::given(method("POST"))
        .and(path("/api/users/admin/login"))
        .and(body_json(json!({"email": "admin@example.com", "password": "secret-pass"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-1",
            "refresh_token": "ref-1"
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/agents"))
        .and(header("authorization", "Bearer tok-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::page_body(
            "agents",
            &[fixtures::agent("a1", "helper")],
            Default::default(),
        )))
        .expect(1)
        .mount(&h.server)
        .await;

    let credentials = LoginRequest {
        email: "admin@example.com".into(),
        password: "secret-pass".into(),
    };
    let tokens = h
        .client
        .users()
        .admin_login(&credentials)
        .await
        .unwrap()
        .into_tokens()
        .unwrap();
    h.client.session().establish(tokens).unwrap();
    assert_eq!(h.storage.snapshot().unwrap().refresh_token, "ref-1");

    let page = h.client.agents().list(&ListQuery::default()).await.unwrap();
    assert_eq!(page.require_data("x").unwrap().items.len(), 1);
    assert!(drain(&mut h.events).is_empty());
}

#[tokio::test]
async fn unauthorized_clears_session_and_requests_login() {
    let mut h = harness(MemoryTokenStorage::with_tokens(fixtures::tokens())).await;

    Mock::given(method("GET"))
        .and(path("/api/tools"))
        .and(header("authorization", "Bearer access-token-1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "token expired"})))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tools"))
        .and(has_no_authorization)
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::page_body(
            "tools",
            &[fixtures::tool("t1", "search")],
            Default::default(),
        )))
        .expect(1)
        .mount(&h.server)
        .await;

    let err = h.client.tools().list(&ListQuery::default()).await.unwrap_err();
    assert_eq!(err, ApiClientError::Unauthorized);
    assert!(!h.client.session().is_authenticated());
    assert!(h.storage.snapshot().is_none());

    let events = drain(&mut h.events);
    assert!(events.iter().any(|event| matches!(event, ClientEvent::SessionExpired)));
    assert_eq!(notification_messages(&events), vec![SESSION_EXPIRED.to_string()]);

    // No Authorization header until a new login succeeds.
    h.client.tools().list(&ListQuery::default()).await.unwrap();
}

#[tokio::test]
async fn error_status_surfaces_server_detail() {
    let mut h = harness(MemoryTokenStorage::new()).await;
    Mock::given(method("DELETE"))
        .and(path("/api/tools/t1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "tool not found"})))
        .mount(&h.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/tools/t2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&h.server)
        .await;

    let err = h.client.tools().delete(&ResourceId::new("t1")).await.unwrap_err();
    assert_eq!(
        err,
        ApiClientError::Status {
            status: 404,
            message: "tool not found".into()
        }
    );
    let err = h.client.tools().delete(&ResourceId::new("t2")).await.unwrap_err();
    assert_eq!(err.user_message("failed to delete tool"), REQUEST_FAILED);

    let messages = notification_messages(&drain(&mut h.events));
    assert_eq!(messages, vec!["tool not found".to_string(), REQUEST_FAILED.to_string()]);
}

#[tokio::test]
async fn empty_delete_body_is_accepted() {
    let h = harness(MemoryTokenStorage::new()).await;
    Mock::given(method("DELETE"))
        .and(path("/api/model-configs/9"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&h.server)
        .await;

    let body = h.client.models().delete(&ResourceId::from(9)).await.unwrap();
    assert!(body.is_none());
}

#[tokio::test]
async fn invocation_filters_reach_the_query_string() {
    let h = harness(MemoryTokenStorage::new()).await;
    Mock::given(method("GET"))
        .and(path("/api/invocations"))
        .and(query_param("agent_id", "a1"))
        .and(query_param("status", "success"))
        .and(query_param("start_time", "1000"))
        .and(query_param("end_time", "2000"))
        .and(query_param("page", "2"))
        .and(query_param("page_size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "invocations": [fixtures::invocation_json("i1", "helper", agentdesk_core::InvocationStatus::Success)],
                "total": 6
            }
        })))
        .expect(1)
        .mount(&h.server)
        .await;

    let query = TriggerQuery {
        agent_id: Some("a1".into()),
        status: Some(agentdesk_core::InvocationStatus::Success),
        start_time: Some(1000),
        end_time: Some(2000),
        page: 2,
        page_size: 5,
    };
    let page = h.client.triggers().list(&query).await.unwrap().require_data("x").unwrap();
    assert_eq!(page.items[0].agent_name, "helper");
    assert_eq!(page.resolve_pagination(&query.list_query()).total_pages, 2);
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let (tx, mut events) = mpsc::unbounded_channel();
    // Nothing listens on the discard port.
    let config = HttpConfig::new("http://127.0.0.1:9").with_timeout(Duration::from_millis(500));
    let client = HttpClient::new(&config, Session::in_memory(), tx).unwrap();

    let err = client.agents().list(&ListQuery::default()).await.unwrap_err();
    assert!(matches!(err, ApiClientError::Network(_)));
    assert_eq!(notification_messages(&drain(&mut events)), vec![SERVER_UNREACHABLE.to_string()]);
}

#[tokio::test]
async fn malformed_base_url_is_a_request_error() {
    let (tx, mut events) = mpsc::unbounded_channel();
    let client = HttpClient::new(&HttpConfig::new("not a url"), Session::in_memory(), tx).unwrap();

    let err = client.users().get_profile().await.unwrap_err();
    assert!(matches!(err, ApiClientError::Request(_)));
    let messages = notification_messages(&drain(&mut events));
    assert_eq!(messages.len(), 1);
    assert!(messages[0].starts_with("Request error"));
}

#[tokio::test]
async fn success_false_envelope_is_returned_to_the_caller() {
    let h = harness(MemoryTokenStorage::new()).await;
    Mock::given(method("POST"))
        .and(path("/api/tools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::rejected_body("name taken")))
        .mount(&h.server)
        .await;

    let draft = agentdesk_core::ToolDraft::from_form(
        "search",
        agentdesk_core::ToolType::Function,
        "",
        "",
        "",
        true,
    )
    .unwrap();
    let envelope = h.client.tools().create(&draft).await.unwrap();
    let err: ApiClientError = envelope.require_data("failed to create tool").unwrap_err().into();
    assert_eq!(err, ApiClientError::Business("name taken".into()));
}
