mod common;

use axum::http::Method;
use common::{MockServer, PIPELINE_ID, pipeline_json};
use serde_json::json;
use tekton_client::{BearerToken, ClientConfig, ClientError, TektonPipelineClient};
use tekton_core::domain::common::WorkerIdentity;
use tekton_core::domain::pipeline::PipelineStatus;
use tekton_core::domain::trigger::TriggerType;
use tekton_core::dto::RequestOptions;
use tekton_core::dto::pipeline::{
    CreateTektonPipelineOptions, DeleteTektonPipelineOptions, GetTektonPipelineOptions,
    PipelinePatch, UpdateTektonPipelineOptions,
};
use uuid::Uuid;

fn pipeline_id() -> Uuid {
    Uuid::parse_str(PIPELINE_ID).unwrap()
}

#[tokio::test]
async fn test_create_pipeline_posts_body() {
    let server = MockServer::start().await;
    server.respond(201, pipeline_json());

    let options = CreateTektonPipelineOptions::new(pipeline_id())
        .with_next_build_number(8)
        .with_notifications(true)
        .with_worker(WorkerIdentity::public());
    let pipeline = server.client().create_tekton_pipeline(&options).await.unwrap();

    assert_eq!(pipeline.id, pipeline_id());
    assert_eq!(pipeline.name, "hello-tekton");
    assert_eq!(pipeline.status, PipelineStatus::Configured);
    assert_eq!(pipeline.triggers.len(), 1);
    assert_eq!(pipeline.triggers[0].trigger_type(), TriggerType::Manual);

    let request = server.last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, "/pipeline/v2/tekton_pipelines");
    assert_eq!(
        request.json(),
        json!({
            "id": PIPELINE_ID,
            "next_build_number": 8,
            "enable_notifications": true,
            "worker": { "id": "public" }
        })
    );
}

#[tokio::test]
async fn test_get_pipeline_sends_auth_and_extra_headers() {
    let server = MockServer::start().await;
    server.respond(200, pipeline_json());

    let client = server
        .client()
        .with_authenticator(BearerToken::new("secret-token").unwrap());
    let options =
        GetTektonPipelineOptions::new(pipeline_id()).with_header("X-Request-Id", "req-42");
    let pipeline = client.get_tekton_pipeline(&options).await.unwrap();
    assert_eq!(pipeline.build_number, 7);

    let request = server.last_request();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, format!("/pipeline/v2/tekton_pipelines/{}", PIPELINE_ID));
    assert_eq!(request.header("authorization"), Some("Bearer secret-token"));
    assert_eq!(request.header("x-request-id"), Some("req-42"));
    assert_eq!(request.header("accept"), Some("application/json"));
}

#[tokio::test]
async fn test_configured_token_replaces_per_call_authorization() {
    let server = MockServer::start().await;
    server.respond(200, pipeline_json());

    let config = ClientConfig::new(server.url()).with_bearer_token("configured-token");
    let client = TektonPipelineClient::from_config(&config).unwrap();
    let options = GetTektonPipelineOptions::new(pipeline_id())
        .with_header("Authorization", "Bearer per-call-token");
    client.get_tekton_pipeline(&options).await.unwrap();

    let request = server.last_request();
    let values: Vec<_> = request
        .headers
        .get_all("authorization")
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert_eq!(values, vec!["Bearer configured-token"]);
}

#[tokio::test]
async fn test_per_call_authorization_is_kept_without_token() {
    let server = MockServer::start().await;
    server.respond(200, pipeline_json());

    let options = GetTektonPipelineOptions::new(pipeline_id())
        .with_header("Authorization", "Bearer per-call-token");
    server.client().get_tekton_pipeline(&options).await.unwrap();

    let request = server.last_request();
    assert_eq!(request.headers.get_all("authorization").iter().count(), 1);
    assert_eq!(request.header("authorization"), Some("Bearer per-call-token"));
}

#[tokio::test]
async fn test_update_pipeline_sends_merge_patch() {
    let server = MockServer::start().await;
    server.respond(200, pipeline_json());

    let options = UpdateTektonPipelineOptions::new(pipeline_id()).with_patch(PipelinePatch {
        enable_partial_cloning: Some(true),
        ..Default::default()
    });
    server.client().update_tekton_pipeline(&options).await.unwrap();

    let request = server.last_request();
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(request.header("content-type"), Some("application/merge-patch+json"));
    assert_eq!(request.json(), json!({ "enable_partial_cloning": true }));
}

#[tokio::test]
async fn test_empty_patch_is_rejected_without_request() {
    let server = MockServer::start().await;

    let options = UpdateTektonPipelineOptions::new(pipeline_id());
    let err = server.client().update_tekton_pipeline(&options).await.unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_delete_pipeline() {
    let server = MockServer::start().await;
    server.respond_empty(204);

    server
        .client()
        .delete_tekton_pipeline(&DeleteTektonPipelineOptions::new(pipeline_id()))
        .await
        .unwrap();

    let request = server.last_request();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.path, format!("/pipeline/v2/tekton_pipelines/{}", PIPELINE_ID));
}

#[tokio::test]
async fn test_api_error_envelope_is_mapped() {
    let server = MockServer::start().await;
    server.respond(
        404,
        json!({
            "errors": [{ "code": "not_found", "message": "Pipeline not found" }],
            "trace": "a1b2c3",
            "status_code": 404
        }),
    );

    let err = server
        .client()
        .get_tekton_pipeline(&GetTektonPipelineOptions::new(pipeline_id()))
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(err.is_client_error());
    match err {
        ClientError::ApiError { status, message, trace } => {
            assert_eq!(status, 404);
            assert_eq!(message, "not_found: Pipeline not found");
            assert_eq!(trace.as_deref(), Some("a1b2c3"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unexpected_body_is_parse_error() {
    let server = MockServer::start().await;
    server.respond(200, json!({ "unexpected": true }));

    let err = server
        .client()
        .get_tekton_pipeline(&GetTektonPipelineOptions::new(pipeline_id()))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::ParseError(_)));
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let server = MockServer::start().await;
    server.respond(503, json!({ "message": "maintenance" }));

    let err = server
        .client()
        .get_tekton_pipeline(&GetTektonPipelineOptions::new(pipeline_id()))
        .await
        .unwrap_err();

    assert!(err.is_server_error());
    assert_eq!(err.status(), Some(503));
}
