//! Request-path contract: headers, failure normalization, and the single
//! refresh-and-retry on an expired session.

mod common;

use common::{harness, header_values};
use ops_api::{ApiError, ApiRequest, HttpMethod};
use ops_auth::SessionStore;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

fn expired() -> ResponseTemplate {
    ResponseTemplate::new(401).set_body_json(json!({"message": "Access token EXPIRED"}))
}

#[tokio::test]
async fn stored_token_and_scope_are_sent() {
    let h = harness(Some("T"), Some("org_7")).await;
    Mock::given(method("GET"))
        .and(path("/forms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&h.server)
        .await;

    h.client.get("/forms").await.expect("ok");

    assert_eq!(
        header_values(&h.server, "/forms", "authorization").await,
        vec![Some("Bearer T".to_string())]
    );
    assert_eq!(
        header_values(&h.server, "/forms", "x-organization-id").await,
        vec![Some("org_7".to_string())]
    );
    assert_eq!(
        header_values(&h.server, "/forms", "content-type").await,
        vec![Some("application/json".to_string())]
    );
}

#[tokio::test]
async fn missing_token_omits_authorization_and_missing_scope_is_empty() {
    let h = harness(None, None).await;
    Mock::given(method("GET"))
        .and(path("/auth/url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"url": "https://idp"})))
        .mount(&h.server)
        .await;

    h.client.get("/auth/url").await.expect("ok");

    assert_eq!(header_values(&h.server, "/auth/url", "authorization").await, vec![None]);
    assert_eq!(
        header_values(&h.server, "/auth/url", "x-organization-id").await,
        vec![Some(String::new())]
    );
}

#[tokio::test]
async fn explicit_empty_scope_is_sent_verbatim() {
    let h = harness(Some("T"), Some("")).await;
    Mock::given(method("GET"))
        .and(path("/forms"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&h.server)
        .await;

    h.client.get("/forms").await.expect("ok");

    assert_eq!(
        header_values(&h.server, "/forms", "x-organization-id").await,
        vec![Some(String::new())]
    );
}

#[tokio::test]
async fn body_is_sent_as_json() {
    let h = harness(None, None).await;
    Mock::given(method("PUT"))
        .and(path("/things/1"))
        .and(body_json(json!({"name": "x"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(1)
        .mount(&h.server)
        .await;

    let value = h
        .client
        .put("/things/1", &json!({"name": "x"}))
        .await
        .expect("ok");
    assert_eq!(value, json!({"ok": true}));
}

#[tokio::test]
async fn expired_session_refreshes_once_and_retries_once() {
    let h = harness(Some("old"), Some("org_1")).await;
    Mock::given(method("GET"))
        .and(path("/forms"))
        .and(header("authorization", "Bearer old"))
        .respond_with(expired())
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "new"})))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forms"))
        .and(header("authorization", "Bearer new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&h.server)
        .await;

    let value = h.client.get("/forms").await.expect("retry succeeds");
    assert_eq!(value, json!([]));
    assert_eq!(h.store.load_token().as_deref(), Some("new"));
    assert_eq!(
        h.client.session().snapshot().token.as_deref(),
        Some("new")
    );
}

#[tokio::test]
async fn refresh_request_carries_no_bearer() {
    let h = harness(Some("old"), None).await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "abc"})))
        .expect(1)
        .mount(&h.server)
        .await;

    let token = h.client.refresh().await.expect("refresh");
    assert_eq!(token, "abc");
    assert_eq!(
        header_values(&h.server, "/auth/refresh", "authorization").await,
        vec![None]
    );
}

#[tokio::test]
async fn retry_result_is_returned_without_a_second_retry() {
    let h = harness(Some("old"), None).await;
    Mock::given(method("GET"))
        .and(path("/forms"))
        .respond_with(expired())
        .expect(2)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "new"})))
        .expect(1)
        .mount(&h.server)
        .await;

    let err = h.client.get("/forms").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "Failed to GET data: Unauthorized");
}

#[tokio::test]
async fn unauthorized_without_expired_message_is_not_retried() {
    let h = harness(Some("old"), None).await;
    Mock::given(method("GET"))
        .and(path("/forms"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "invalid token"})))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "new"})))
        .expect(0)
        .mount(&h.server)
        .await;

    let err = h.client.get("/forms").await.unwrap_err();
    assert_eq!(err.status(), Some(401));
    assert!(err.requires_login());
    assert_eq!(h.store.load_token().as_deref(), Some("old"));
}

#[tokio::test]
async fn expired_message_on_forbidden_is_not_retried() {
    let h = harness(Some("old"), None).await;
    Mock::given(method("POST"))
        .and(path("/forms"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "token expired"})))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "new"})))
        .expect(0)
        .mount(&h.server)
        .await;

    let err = h.client.post("/forms", &json!({})).await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert_eq!(err.to_string(), "Failed to POST data: Forbidden");
}

#[tokio::test]
async fn non_json_error_body_still_reports_status() {
    let h = harness(None, None).await;
    Mock::given(method("DELETE"))
        .and(path("/forms/1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&h.server)
        .await;

    let err = h.client.delete("/forms/1").await.unwrap_err();
    match err {
        ApiError::Status {
            status,
            message,
            server_message,
        } => {
            assert_eq!(status, 502);
            assert_eq!(message, "Failed to DELETE data: Bad Gateway");
            assert_eq!(server_message, None);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn refreshed_token_is_used_by_later_calls() {
    let h = harness(Some("old"), None).await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"accessToken": "abc"})))
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forms"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&h.server)
        .await;

    h.client.refresh().await.expect("refresh");
    h.client.get("/forms").await.expect("uses new token");
}

#[tokio::test]
async fn refresh_without_string_token_fails_and_keeps_old_token() {
    for body in [json!({}), json!({"accessToken": 42}), json!(["abc"])] {
        let h = harness(Some("old"), None).await;
        Mock::given(method("POST"))
            .and(path("/auth/refresh"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&h.server)
            .await;

        let err = h.client.refresh().await.unwrap_err();
        assert!(matches!(err, ApiError::Refresh { status: None, .. }), "{body}: {err:?}");
        assert_eq!(
            err.to_string(),
            "Invalid response: missing access token on refresh"
        );
        assert_eq!(h.store.load_token().as_deref(), Some("old"));
        assert_eq!(h.client.session().snapshot().token.as_deref(), Some("old"));
    }
}

#[tokio::test]
async fn rejected_refresh_aborts_the_retry() {
    let h = harness(Some("old"), None).await;
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(expired())
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "no cookie"})))
        .expect(1)
        .mount(&h.server)
        .await;

    let err = h.client.get("/auth/me").await.unwrap_err();
    match &err {
        ApiError::Refresh { status, message } => {
            assert_eq!(*status, Some(401));
            assert_eq!(message, "Failed to refresh tokens");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.requires_login());
    assert_eq!(h.store.load_token().as_deref(), Some("old"));
}

#[tokio::test]
async fn transport_failure_is_structured() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };

    let session = std::sync::Arc::new(ops_auth::Session::in_memory(None, None));
    let client =
        ops_api::ApiClient::with_base_url(&format!("http://127.0.0.1:{port}"), session)
            .expect("client");
    let err = client
        .request(&ApiRequest::new(HttpMethod::Get, "/forms"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }), "{err:?}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn invalid_json_success_body_is_a_decode_error() {
    let h = harness(None, None).await;
    Mock::given(method("GET"))
        .and(path("/forms"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&h.server)
        .await;

    let err = h.client.get("/forms").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }), "{err:?}");
}
