//! Brewfather client behaviour against a mocked v2 API.

use brewdoc_source::SourceError;
use brewdoc_source::adapters::BatchRecipeSource;
use brewdoc_source::brewfather::{BrewfatherClient, Credentials, DEFAULT_TIMEOUT};
use brewdoc_source::ports::BatchSource;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::net::TcpListener;
use tokio::runtime::{Builder, Runtime};
use wiremock::matchers::{header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// base64("brewer:s3cret")
const BASIC_AUTH: &str = "Basic YnJld2VyOnMzY3JldA==";

/// A mock server driven from synchronous tests; the blocking client must not run on the runtime.
struct MockApi {
    server: MockServer,
    runtime: Runtime,
}

impl MockApi {
    fn start() -> Self {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("tokio runtime");
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    fn verify(&self) {
        self.runtime.block_on(self.server.verify());
    }

    fn client(&self) -> BrewfatherClient {
        client(&format!("{}/v2", self.server.uri()))
    }
}

fn client(base: &str) -> BrewfatherClient {
    let creds = Credentials {
        username: "brewer".to_string(),
        api_key: "s3cret".to_string(),
    };
    let http = reqwest::blocking::Client::builder()
        .no_proxy()
        .timeout(DEFAULT_TIMEOUT)
        .build()
        .expect("http client");
    BrewfatherClient::with_client(http, base, creds)
}

fn listing() -> serde_json::Value {
    json!([
        { "_id": "b1", "name": "Batch", "batchNo": 1, "recipe": { "name": "Oatmeal Stout" } },
        { "_id": "b2", "name": "Batch", "batchNo": 2, "recipe": { "name": "Backyard Pale Ale" } }
    ])
}

fn list_batches_mock(response: ResponseTemplate) -> Mock {
    Mock::given(method("GET"))
        .and(path("/v2/batches/"))
        .and(query_param("limit", "50"))
        .and(header("authorization", BASIC_AUTH))
        .respond_with(response)
}

#[test]
fn batch_for_recipe_lists_then_fetches_the_match() {
    let recipe: serde_json::Value =
        serde_json::from_str(include_str!("../../tests/fixtures/pale_ale/recipe.json")).unwrap();
    let batch = json!({
        "_id": "b2",
        "notes": [{ "note": "Kegged", "timestamp": 1690300800000_i64 }],
        "recipe": recipe,
    });

    let api = MockApi::start();
    api.mount(list_batches_mock(ResponseTemplate::new(200).set_body_json(listing())).expect(1));
    api.mount(
        Mock::given(method("GET"))
            .and(path("/v2/batches/b2"))
            .and(header("authorization", BASIC_AUTH))
            .respond_with(ResponseTemplate::new(200).set_body_json(batch))
            .expect(1),
    );

    let client = api.client();
    let (recipe, batch) = BatchRecipeSource::new(&client, "Backyard Pale Ale")
        .fetch()
        .expect("fetch");
    assert_eq!(recipe.name, "Backyard Pale Ale");
    assert_eq!(batch.id.as_deref(), Some("b2"));
    assert_eq!(batch.notes.len(), 1);
    api.verify();
}

#[test]
fn unknown_recipe_name_fails_lookup_without_fetching() {
    let api = MockApi::start();
    api.mount(list_batches_mock(ResponseTemplate::new(200).set_body_json(listing())).expect(1));
    api.mount(
        Mock::given(method("GET"))
            .and(path_regex(r"^/v2/batches/[^/]+$"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0),
    );

    let err = api.client().batch_for_recipe("IPA #3").unwrap_err();
    match &err {
        SourceError::LookupFailed { name } => assert_eq!(name, "IPA #3"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.exit_code(), 2);
    api.verify();
}

#[test]
fn non_success_status_carries_context() {
    let api = MockApi::start();
    api.mount(list_batches_mock(ResponseTemplate::new(401)).expect(1));

    let err = api.client().list_batches().unwrap_err();
    match &err {
        SourceError::Status { context, status } => {
            assert_eq!(context, "list batches");
            assert_eq!(status.as_u16(), 401);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.exit_code(), 1);
    api.verify();
}

#[test]
fn fetch_status_names_the_batch() {
    let api = MockApi::start();
    api.mount(
        Mock::given(method("GET"))
            .and(path("/v2/batches/b9"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1),
    );

    let err = api.client().fetch_batch("b9").unwrap_err();
    assert_eq!(err.to_string(), "fetch batch b9: HTTP 404 Not Found");
    api.verify();
}

#[test]
fn malformed_listing_names_the_missing_field() {
    let api = MockApi::start();
    api.mount(list_batches_mock(
        ResponseTemplate::new(200).set_body_string(r#"[{"_id":"b1","recipe":{}}]"#),
    ));

    let err = api.client().list_batches().unwrap_err();
    assert_eq!(err.field_path(), Some("[0].recipe.name"));
}

#[test]
fn connection_failure_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let err = client(&format!("http://127.0.0.1:{port}/v2"))
        .fetch_batch("b1")
        .unwrap_err();
    match err {
        SourceError::Transport { context, .. } => assert_eq!(context, "fetch batch b1"),
        other => panic!("unexpected error: {other:?}"),
    }
}
