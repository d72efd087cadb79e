#![allow(dead_code)]

use std::sync::Arc;

use ops_api::ApiClient;
use ops_auth::{MemoryStore, Session};
use wiremock::MockServer;

pub struct Harness {
    pub server: MockServer,
    pub store: Arc<MemoryStore>,
    pub client: ApiClient,
}

pub async fn harness(token: Option<&str>, scope: Option<&str>) -> Harness {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryStore::with(token, scope));
    let session = Arc::new(Session::load(store.clone()));
    let client = ApiClient::with_base_url(&server.uri(), session).expect("client");
    Harness {
        server,
        store,
        client,
    }
}

/// Value of `name` on every request the server received for `path`.
pub async fn header_values(server: &MockServer, path: &str, name: &str) -> Vec<Option<String>> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .into_iter()
        .filter(|request| request.url.path() == path)
        .map(|request| {
            request
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        })
        .collect()
}
