//! Store lifecycles driven against a mock backend.

use agentdesk_client::{ClientEvent, HttpClient, HttpConfig, MemoryTokenStorage, Session};
use agentdesk_core::{
    InvocationStatus, ListQuery, LoginRequest, Pagination, ResourceId, TriggerQuery, UserPatch,
};
use agentdesk_store::{CancellationToken, Slice, SliceKey, Store, StoreError, LOGIN_FAILED};
use agentdesk_test_utils::fixtures;
use serde_json::{json, Value};
use std::time::Duration;
use tokio::sync::mpsc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

struct Harness {
    server: MockServer,
    store: Store,
    storage: MemoryTokenStorage,
    _events: mpsc::UnboundedReceiver<ClientEvent>,
}

async fn harness(storage: MemoryTokenStorage) -> Harness {
    let server = MockServer::start().await;
    let (tx, events) = mpsc::unbounded_channel();
    let session = Session::load(storage.clone());
    let client = HttpClient::new(&HttpConfig::new(server.uri()), session, tx).unwrap();
    Harness {
        server,
        store: Store::new(client),
        storage,
        _events: events,
    }
}

fn has_no_authorization(request: &Request) -> bool {
    !request.headers.contains_key("authorization")
}

async fn seed_tools(h: &Harness, ids: &[&str]) {
    let tools: Vec<_> = ids.iter().map(|id| fixtures::tool(id, id)).collect();
    Mock::given(method("GET"))
        .and(path("/api/tools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::page_body(
            "tools",
            &tools,
            Pagination::default(),
        )))
        .up_to_n_times(1)
        .mount(&h.server)
        .await;
    h.store.fetch_tools(ListQuery::default(), None).await.unwrap();
}

#[tokio::test]
async fn agent_list_fills_the_slice() {
    let h = harness(MemoryTokenStorage::new()).await;
    let agents = vec![
        fixtures::agent("a1", "helper"),
        fixtures::agent("a2", "writer"),
        fixtures::agent("a3", "coder"),
    ];
    Mock::given(method("GET"))
        .and(path("/api/agents"))
        .and(query_param("page", "1"))
        .and(query_param("page_size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::page_body(
            "agents",
            &agents,
            Pagination {
                total: 3,
                ..Pagination::default()
            },
        )))
        .expect(1)
        .mount(&h.server)
        .await;

    let mut changes = h.store.subscribe();
    h.store.fetch_agents(ListQuery::default(), None).await.unwrap();

    let state = h.store.snapshot();
    assert_eq!(state.agents.items, agents);
    assert_eq!(state.agents.pagination.total, 3);
    assert!(!state.agents.loading());
    assert_eq!(state.agents.error(), None);

    // Pending then settled.
    assert_eq!(changes.recv().await.unwrap().slice, SliceKey::Agents);
    assert_eq!(changes.recv().await.unwrap().slice, SliceKey::Agents);
}

#[tokio::test]
async fn null_fields_do_not_reject_the_list() {
    let h = harness(MemoryTokenStorage::new()).await;
    Mock::given(method("GET"))
        .and(path("/api/agents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "agents": [
                    {"id": "a1", "name": "helper", "description": null},
                    {"id": "a2", "name": "writer", "description": "drafts"}
                ],
                "total": 2
            }
        })))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/model-configs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "models": [{"id": "m1", "model_name": "gpt", "base_api_url": null, "config": null}],
                "total": 1
            }
        })))
        .mount(&h.server)
        .await;

    h.store.fetch_agents(ListQuery::default(), None).await.unwrap();
    h.store.fetch_models(ListQuery::default(), None).await.unwrap();

    let state = h.store.snapshot();
    assert_eq!(state.agents.items.len(), 2);
    assert_eq!(state.agents.items[0].description, "");
    assert_eq!(state.agents.error(), None);
    assert_eq!(state.models.items.len(), 1);
    assert_eq!(state.models.error(), None);
}

#[tokio::test]
async fn failed_delete_keeps_items_and_reports_server_detail() {
    let h = harness(MemoryTokenStorage::new()).await;
    seed_tools(&h, &["t1", "t2"]).await;

    Mock::given(method("DELETE"))
        .and(path("/api/tools/t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::ok_body(&Value::Null)))
        .up_to_n_times(1)
        .mount(&h.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/tools/t1"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "tool not found"})))
        .mount(&h.server)
        .await;

    let t1 = ResourceId::new("t1");
    h.store.delete_tool(&t1, None).await.unwrap();
    let ids = h.store.read(|s| s.tools.items.iter().map(|t| t.id.clone()).collect::<Vec<_>>());
    assert_eq!(ids, vec![ResourceId::new("t2")]);

    let err = h.store.delete_tool(&t1, None).await.unwrap_err();
    assert_eq!(
        err,
        StoreError::Rejected {
            message: "tool not found".into()
        }
    );
    h.store.read(|s| {
        assert_eq!(s.tools.error(), Some("tool not found"));
        assert!(!s.tools.loading());
        assert_eq!(s.tools.items.len(), 1);
        assert_eq!(s.tools.items[0].id, ResourceId::new("t2"));
    });

    h.store.clear_error(SliceKey::Tools);
    assert_eq!(h.store.read(|s| s.tools.error().map(str::to_string)), None);
}

#[tokio::test]
async fn login_persists_tokens_and_authorizes_later_requests() {
    let h = harness(MemoryTokenStorage::new()).await;
    Mock::given(method("POST"))
        .and(path("/api/users/admin/login"))
        .and(body_json(json!({"email": "admin@example.com", "password": "secret-pass"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"access_token": "tok-1", "refresh_token": "ref-1"}
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
            Pagination::default(),
        )))
        .expect(1)
        .mount(&h.server)
        .await;

    let credentials = LoginRequest {
        email: "admin@example.com".into(),
        password: "secret-pass".into(),
    };
    h.store.login(&credentials).await.unwrap();

    let auth = h.store.auth();
    assert!(auth.is_authenticated);
    assert_eq!(auth.token.as_deref(), Some("tok-1"));
    assert_eq!(auth.refresh_token.as_deref(), Some("ref-1"));
    assert!(!auth.loading);
    assert_eq!(h.storage.snapshot().unwrap().access_token, "tok-1");

    h.store.fetch_agents(ListQuery::default(), None).await.unwrap();
    assert_eq!(h.store.read(|s| s.agents.items.len()), 1);
}

#[tokio::test]
async fn refused_login_is_reported_on_the_auth_slice() {
    let h = harness(MemoryTokenStorage::new()).await;
    Mock::given(method("POST"))
        .and(path("/api/users/admin/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "bad credentials"})))
        .mount(&h.server)
        .await;

    let credentials = LoginRequest {
        email: "admin@example.com".into(),
        password: "wrong-pass".into(),
    };
    let err = h.store.login(&credentials).await.unwrap_err();
    assert!(err.is_reportable());

    let auth = h.store.auth();
    assert!(!auth.is_authenticated);
    assert_eq!(auth.error.as_deref(), Some(LOGIN_FAILED));
    assert!(!auth.loading);
}

#[tokio::test]
async fn unauthorized_response_signs_out_without_slice_error() {
    let h = harness(MemoryTokenStorage::with_tokens(fixtures::tokens())).await;
    Mock::given(method("GET"))
        .and(path("/api/tools"))
        .and(header("authorization", "Bearer access-token-1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tools"))
        .and(has_no_authorization)
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::page_body(
            "tools",
            &[fixtures::tool("t1", "search")],
            Pagination::default(),
        )))
        .expect(1)
        .mount(&h.server)
        .await;

    assert!(h.store.auth().is_authenticated);
    let err = h.store.fetch_tools(ListQuery::default(), None).await.unwrap_err();
    assert_eq!(err, StoreError::Unauthorized);

    let auth = h.store.auth();
    assert!(!auth.is_authenticated);
    assert_eq!(auth.user, None);
    assert!(h.storage.snapshot().is_none());
    h.store.read(|s| {
        assert_eq!(s.tools.error(), None);
        assert!(!s.tools.loading());
    });

    h.store.fetch_tools(ListQuery::default(), None).await.unwrap();
}

#[tokio::test]
async fn loading_is_set_while_a_request_is_in_flight() {
    let h = harness(MemoryTokenStorage::new()).await;
    Mock::given(method("GET"))
        .and(path("/api/model-configs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fixtures::page_body(
                    "models",
                    &[fixtures::model_config("m1", "gpt-4o")],
                    Pagination::default(),
                ))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&h.server)
        .await;

    let probe = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        h.store.read(|s| (s.models.loading(), s.models.error().is_none()))
    };
    let (result, (loading, no_error)) =
        tokio::join!(h.store.fetch_models(ListQuery::default(), None), probe);

    result.unwrap();
    assert!(loading);
    assert!(no_error);
    assert!(!h.store.read(|s| s.models.loading()));
}

#[tokio::test]
async fn stale_list_response_is_discarded() {
    let h = harness(MemoryTokenStorage::new()).await;
    Mock::given(method("GET"))
        .and(path("/api/agents"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fixtures::page_body(
                    "agents",
                    &[fixtures::agent("a1", "old")],
                    Pagination::default(),
                ))
                .set_delay(Duration::from_millis(400)),
        )
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/agents"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(fixtures::page_body(
                    "agents",
                    &[fixtures::agent("a11", "new")],
                    Pagination {
                        page: 2,
                        page_size: 10,
                        total: 11,
                        total_pages: 2,
                    },
                ))
                .set_delay(Duration::from_millis(50)),
        )
        .mount(&h.server)
        .await;

    let (first, second) = tokio::join!(
        h.store.fetch_agents(ListQuery::new(1, 10), None),
        h.store.fetch_agents(ListQuery::new(2, 10), None),
    );

    assert_eq!(first, Err(StoreError::Superseded));
    second.unwrap();
    h.store.read(|s| {
        assert_eq!(s.agents.items[0].name, "new");
        assert_eq!(s.agents.pagination.page, 2);
        assert_eq!(s.agents.query, ListQuery::new(2, 10));
        assert!(!s.agents.loading());
    });
}

#[tokio::test]
async fn cancelled_fetch_only_settles_loading() {
    let h = harness(MemoryTokenStorage::new()).await;
    seed_tools(&h, &["t1"]).await;
    Mock::given(method("GET"))
        .and(path("/api/tools"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"detail": "should never be seen"}))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&h.server)
        .await;

    let token = CancellationToken::new();
    let cancel = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();
    };
    let (result, ()) = tokio::join!(h.store.fetch_tools(ListQuery::new(2, 10), Some(&token)), cancel);

    assert_eq!(result, Err(StoreError::Cancelled));
    h.store.read(|s| {
        assert!(!s.tools.loading());
        assert_eq!(s.tools.error(), None);
        assert_eq!(s.tools.items.len(), 1);
        assert_eq!(s.tools.query, ListQuery::default());
    });
}

#[tokio::test]
async fn created_entity_is_appended() {
    let h = harness(MemoryTokenStorage::new()).await;
    seed_tools(&h, &["t1"]).await;
    let created = fixtures::tool("t9", "browser");
    Mock::given(method("POST"))
        .and(path("/api/tools"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::ok_body(&created)))
        .expect(1)
        .mount(&h.server)
        .await;

    let draft = agentdesk_core::ToolDraft::from_form(
        "browser",
        agentdesk_core::ToolType::Api,
        "https://tools.example.com/browser",
        "",
        "{}",
        true,
    )
    .unwrap();
    let tool = h.store.create_tool(&draft, None).await.unwrap();

    assert_eq!(tool.id, ResourceId::new("t9"));
    h.store.read(|s| {
        assert_eq!(s.tools.items.len(), 2);
        assert_eq!(s.tools.items.last().unwrap().id, ResourceId::new("t9"));
    });
}

#[tokio::test]
async fn toggle_merges_only_the_patched_field() {
    let h = harness(MemoryTokenStorage::new()).await;
    seed_tools(&h, &["t1"]).await;
    Mock::given(method("PUT"))
        .and(path("/api/tools/t1"))
        .and(body_json(json!({"enabled": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::ok_body(
            &fixtures::tool("t1", "renamed-by-server"),
        )))
        .expect(1)
        .mount(&h.server)
        .await;

    h.store.toggle_tool(&ResourceId::new("t1"), None).await.unwrap();
    h.store.read(|s| {
        let tool = &s.tools.items[0];
        assert!(!tool.enabled);
        assert_eq!(tool.name, "t1");
    });
}

#[tokio::test]
async fn partial_update_echo_still_applies_the_patch() {
    let h = harness(MemoryTokenStorage::new()).await;
    seed_tools(&h, &["t1"]).await;
    Mock::given(method("PUT"))
        .and(path("/api/tools/t1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": {"id": "t1", "enabled": false}})),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    h.store.toggle_tool(&ResourceId::new("t1"), None).await.unwrap();
    h.store.read(|s| {
        assert!(!s.tools.items[0].enabled);
        assert_eq!(s.tools.items[0].name, "t1");
        assert_eq!(s.tools.error(), None);
    });
}

#[tokio::test]
async fn update_answered_with_no_content_applies_the_patch() {
    let h = harness(MemoryTokenStorage::new()).await;
    seed_tools(&h, &["t1"]).await;
    Mock::given(method("PUT"))
        .and(path("/api/tools/t1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;

    h.store.toggle_tool(&ResourceId::new("t1"), None).await.unwrap();
    h.store.read(|s| assert!(!s.tools.items[0].enabled));
}

#[tokio::test]
async fn profile_update_with_partial_echo_merges_locally() {
    let h = harness(MemoryTokenStorage::with_tokens(fixtures::tokens())).await;
    Mock::given(method("GET"))
        .and(path("/api/users/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::ok_body(&fixtures::user())))
        .mount(&h.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/users/profile"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": {"username": "root"}})),
        )
        .mount(&h.server)
        .await;

    h.store.fetch_profile(None).await.unwrap();
    let patch = UserPatch {
        username: Some("root".into()),
        ..UserPatch::default()
    };
    h.store.update_profile(&patch, None).await.unwrap();

    let user = h.store.auth().user.unwrap();
    assert_eq!(user.username.as_deref(), Some("root"));
    assert_eq!(user.email, "admin@example.com");
}

#[tokio::test]
async fn toggling_an_unloaded_tool_is_rejected_locally() {
    let h = harness(MemoryTokenStorage::new()).await;
    let err = h.store.toggle_tool(&ResourceId::new("nope"), None).await.unwrap_err();
    assert!(matches!(err, StoreError::Rejected { .. }));
}

#[tokio::test]
async fn empty_invocation_history_is_a_valid_page() {
    let h = harness(MemoryTokenStorage::new()).await;
    Mock::given(method("GET"))
        .and(path("/api/invocations"))
        .and(query_param("agent_id", "a1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"invocations": [], "total": 0}
        })))
        .mount(&h.server)
        .await;

    let query = TriggerQuery {
        agent_id: Some("a1".into()),
        status: Some(InvocationStatus::Failed),
        ..TriggerQuery::default()
    };
    h.store.fetch_agent_triggers(query.clone(), None).await.unwrap();
    h.store.read(|s| {
        assert!(s.agent_triggers.items.is_empty());
        assert_eq!(s.agent_triggers.pagination.total, 0);
        assert_eq!(s.agent_triggers.pagination.total_pages, 1);
        assert_eq!(s.agent_triggers.error(), None);
        assert_eq!(s.agent_triggers.extra, query);
    });
}

#[tokio::test]
async fn agent_prompts_record_their_owner() {
    let h = harness(MemoryTokenStorage::new()).await;
    Mock::given(method("GET"))
        .and(path("/api/agents/a1/prompts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::ok_body(&vec![
            fixtures::prompt("p1", "a1"),
            fixtures::prompt("p2", "a1"),
        ])))
        .mount(&h.server)
        .await;

    h.store.fetch_agent_prompts(&ResourceId::new("a1"), None).await.unwrap();
    h.store.read(|s| {
        assert_eq!(s.prompts.items.len(), 2);
        assert_eq!(s.prompts.extra.agent_id, Some(ResourceId::new("a1")));
        assert_eq!(s.prompts.pagination.total, 2);
    });
}

#[tokio::test]
async fn agent_options_load_both_lists() {
    let h = harness(MemoryTokenStorage::new()).await;
    Mock::given(method("GET"))
        .and(path("/api/agents/visibility/options"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::ok_body(&json!([
            "public", "private"
        ]))))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/agents/status/options"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::ok_body(&json!([
            {"value": "draft", "label": "Draft"},
            {"value": "published", "label": "Published"}
        ]))))
        .mount(&h.server)
        .await;

    h.store.fetch_agent_options(None).await.unwrap();
    h.store.read(|s| {
        assert_eq!(s.agents.extra.visibility.len(), 2);
        assert_eq!(s.agents.extra.visibility[1].value, "private");
        assert_eq!(s.agents.extra.status[0].label, "Draft");
    });
}

#[tokio::test]
async fn profile_update_without_echo_merges_locally() {
    let h = harness(MemoryTokenStorage::with_tokens(fixtures::tokens())).await;
    Mock::given(method("GET"))
        .and(path("/api/users/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::ok_body(&fixtures::user())))
        .mount(&h.server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/users/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&h.server)
        .await;

    h.store.fetch_profile(None).await.unwrap();
    let patch = UserPatch {
        username: Some("root".into()),
        ..UserPatch::default()
    };
    h.store.update_profile(&patch, None).await.unwrap();

    let user = h.store.auth().user.unwrap();
    assert_eq!(user.username.as_deref(), Some("root"));
    assert_eq!(user.email, "admin@example.com");
}

#[tokio::test]
async fn logout_clears_session_and_profile() {
    let h = harness(MemoryTokenStorage::with_tokens(fixtures::tokens())).await;
    Mock::given(method("GET"))
        .and(path("/api/users/profile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::ok_body(&fixtures::user())))
        .mount(&h.server)
        .await;
    h.store.fetch_profile(None).await.unwrap();

    h.store.logout();

    let auth = h.store.auth();
    assert!(!auth.is_authenticated);
    assert_eq!(auth.token, None);
    assert_eq!(auth.user, None);
    assert!(h.storage.snapshot().is_none());
}
