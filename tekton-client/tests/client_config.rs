mod common;

use common::{MockServer, PIPELINE_ID, pipeline_json};
use std::time::Duration;
use tekton_client::{ClientConfig, TektonPipelineClient};
use tekton_core::dto::RequestOptions;
use tekton_core::dto::pipeline::GetTektonPipelineOptions;
use uuid::Uuid;

fn get_options() -> GetTektonPipelineOptions {
    GetTektonPipelineOptions::new(Uuid::parse_str(PIPELINE_ID).unwrap())
}

fn client(config: ClientConfig) -> TektonPipelineClient {
    TektonPipelineClient::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_default_headers_are_sent() {
    let server = MockServer::start().await;
    server.respond(200, pipeline_json());

    let client = client(ClientConfig::new(server.url()).with_default_header("X-Team", "platform"));
    client.get_tekton_pipeline(&get_options()).await.unwrap();

    let request = server.last_request();
    assert_eq!(request.header("x-team"), Some("platform"));
    assert_eq!(request.header("accept"), Some("application/json"));
}

#[tokio::test]
async fn test_per_call_header_overrides_default_header() {
    let server = MockServer::start().await;
    server.respond(200, pipeline_json());

    let client = client(ClientConfig::new(server.url()).with_default_header("X-Team", "platform"));
    let options = get_options().with_header("X-Team", "release");
    client.get_tekton_pipeline(&options).await.unwrap();

    let request = server.last_request();
    let values: Vec<_> = request
        .headers
        .get_all("x-team")
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(values, vec!["release"]);
}

#[tokio::test]
async fn test_user_agent_names_the_client() {
    let server = MockServer::start().await;
    server.respond(200, pipeline_json());

    client(ClientConfig::new(server.url()))
        .get_tekton_pipeline(&get_options())
        .await
        .unwrap();

    let request = server.last_request();
    assert_eq!(
        request.header("user-agent"),
        Some(concat!("tekton-client/", env!("CARGO_PKG_VERSION")))
    );
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    server.respond_after(Duration::from_secs(2), 200, pipeline_json());

    let client = client(ClientConfig::new(server.url()).with_timeout(Duration::from_millis(200)));
    let err = client.get_tekton_pipeline(&get_options()).await.unwrap_err();

    assert!(err.is_timeout(), "expected a timeout, got {:?}", err);
    assert_eq!(err.status(), None);
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_configured_token_is_attached() {
    let server = MockServer::start().await;
    server.respond(200, pipeline_json());

    client(ClientConfig::new(server.url()).with_bearer_token("configured-token"))
        .get_tekton_pipeline(&get_options())
        .await
        .unwrap();

    let request = server.last_request();
    assert_eq!(request.header("authorization"), Some("Bearer configured-token"));
}
