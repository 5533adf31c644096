mod common;

use axum::http::Method;
use common::{MockServer, PIPELINE_ID, TRIGGER_ID, trigger_json};
use serde_json::json;
use tekton_client::ClientError;
use tekton_core::domain::trigger::{ScmEvent, TriggerKind, TriggerType};
use tekton_core::dto::trigger::{
    CreateTektonPipelineTriggerOptions, CreateTrigger, DeleteTektonPipelineTriggerOptions,
    DuplicateTektonPipelineTriggerOptions, GetTektonPipelineTriggerOptions,
    ListTektonPipelineTriggersOptions, TriggerFilter, TriggerPatch, TriggerSourcePrototype,
    UpdateTektonPipelineTriggerOptions,
};
use uuid::Uuid;

const COPY_ID: &str = "0e5b6d1c-7d6e-4b43-9f0b-2d3b5a1a6f77";

fn pipeline_id() -> Uuid {
    Uuid::parse_str(PIPELINE_ID).unwrap()
}

fn trigger_id() -> Uuid {
    Uuid::parse_str(TRIGGER_ID).unwrap()
}

fn triggers_path() -> String {
    format!("/pipeline/v2/tekton_pipelines/{}/triggers", PIPELINE_ID)
}

fn timer_trigger_json() -> serde_json::Value {
    json!({
        "type": "timer",
        "id": TRIGGER_ID,
        "name": "Nightly",
        "event_listener": "listener",
        "cron": "0 2 * * *",
        "timezone": "Europe/Paris",
        "enabled": true
    })
}

#[tokio::test]
async fn test_list_triggers_sends_filters() {
    let server = MockServer::start().await;
    server.respond(200, json!({ "triggers": [trigger_json(), timer_trigger_json()] }));

    let options = ListTektonPipelineTriggersOptions::new(pipeline_id()).with_filter(TriggerFilter {
        trigger_type: Some(TriggerType::Timer),
        worker_id: Some("public".to_string()),
        disabled: Some(false),
        tags: vec!["nightly".to_string(), "ci".to_string()],
        ..Default::default()
    });
    let collection = server
        .client()
        .list_tekton_pipeline_triggers(&options)
        .await
        .unwrap();

    assert_eq!(collection.triggers.len(), 2);
    assert_eq!(collection.triggers[1].trigger_type(), TriggerType::Timer);

    let request = server.last_request();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.path, triggers_path());
    assert_eq!(request.query_param("type").as_deref(), Some("timer"));
    assert_eq!(request.query_param("worker.id").as_deref(), Some("public"));
    assert_eq!(request.query_param("disabled").as_deref(), Some("false"));
    assert_eq!(request.query_param("tags").as_deref(), Some("nightly,ci"));
    assert_eq!(request.query_param("name"), None);
}

#[tokio::test]
async fn test_create_scm_trigger_body() {
    let server = MockServer::start().await;
    server.respond(
        201,
        json!({
            "type": "scm",
            "id": TRIGGER_ID,
            "name": "On push",
            "event_listener": "listener",
            "enabled": true,
            "source": {
                "type": "git",
                "properties": {
                    "url": "https://github.com/open-toolchain/hello-tekton.git",
                    "branch": "main",
                    "blind_connection": false,
                    "hook_id": "12345",
                    "tool": { "id": "2d1b4d4e-a8b0-4b86-8a0f-4a8b0f4f9bf1" }
                }
            },
            "events": ["push", "pull_request"]
        }),
    );

    let trigger = CreateTrigger::scm(
        "On push",
        "listener",
        TriggerSourcePrototype::git("https://github.com/open-toolchain/hello-tekton.git")
            .with_branch("main"),
        vec![ScmEvent::Push, ScmEvent::PullRequest],
    )
    .with_max_concurrent_runs(2);
    let created = server
        .client()
        .create_tekton_pipeline_trigger(&CreateTektonPipelineTriggerOptions::new(
            pipeline_id(),
            trigger,
        ))
        .await
        .unwrap();

    match &created.kind {
        TriggerKind::Scm { source, events, .. } => {
            let source = source.as_ref().unwrap();
            assert_eq!(source.properties.hook_id.as_deref(), Some("12345"));
            assert_eq!(events, &vec![ScmEvent::Push, ScmEvent::PullRequest]);
        }
        other => panic!("unexpected trigger kind: {other:?}"),
    }

    let request = server.last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.path, triggers_path());
    assert_eq!(
        request.json(),
        json!({
            "type": "scm",
            "name": "On push",
            "event_listener": "listener",
            "max_concurrent_runs": 2,
            "source": {
                "type": "git",
                "properties": {
                    "url": "https://github.com/open-toolchain/hello-tekton.git",
                    "branch": "main"
                }
            },
            "events": ["push", "pull_request"]
        })
    );
}

#[tokio::test]
async fn test_timer_trigger_requires_cron() {
    let server = MockServer::start().await;

    let options = CreateTektonPipelineTriggerOptions::new(
        pipeline_id(),
        CreateTrigger::timer("Nightly", "listener", ""),
    );
    let err = server
        .client()
        .create_tekton_pipeline_trigger(&options)
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert!(server.requests().is_empty());
}

#[tokio::test]
async fn test_update_trigger_sends_merge_patch() {
    let server = MockServer::start().await;
    server.respond(200, timer_trigger_json());

    let patch = TriggerPatch {
        cron: Some("0 2 * * *".to_string()),
        enabled: Some(false),
        ..Default::default()
    };
    server
        .client()
        .update_tekton_pipeline_trigger(&UpdateTektonPipelineTriggerOptions::new(
            pipeline_id(),
            trigger_id(),
            patch,
        ))
        .await
        .unwrap();

    let request = server.last_request();
    assert_eq!(request.method, Method::PATCH);
    assert_eq!(request.path, format!("{}/{}", triggers_path(), TRIGGER_ID));
    assert_eq!(request.header("content-type"), Some("application/merge-patch+json"));
    assert_eq!(request.json(), json!({ "cron": "0 2 * * *", "enabled": false }));
}

#[tokio::test]
async fn test_get_duplicate_and_delete_trigger() {
    let server = MockServer::start().await;
    server.respond(200, trigger_json());
    let mut copy = trigger_json();
    copy["id"] = json!(COPY_ID);
    copy["name"] = json!("Manual Trigger copy");
    server.respond(201, copy);
    server.respond_empty(204);

    let client = server.client();
    let trigger = client
        .get_tekton_pipeline_trigger(&GetTektonPipelineTriggerOptions::new(
            pipeline_id(),
            trigger_id(),
        ))
        .await
        .unwrap();
    assert_eq!(trigger.name, "Manual Trigger");
    assert_eq!(trigger.max_concurrent_runs, Some(3));

    let duplicate = client
        .duplicate_tekton_pipeline_trigger(&DuplicateTektonPipelineTriggerOptions::new(
            pipeline_id(),
            trigger_id(),
            "Manual Trigger copy",
        ))
        .await
        .unwrap();
    assert_eq!(duplicate.id.to_string(), COPY_ID);

    client
        .delete_tekton_pipeline_trigger(&DeleteTektonPipelineTriggerOptions::new(
            pipeline_id(),
            trigger_id(),
        ))
        .await
        .unwrap();

    let requests = server.requests();
    let trigger_path = format!("{}/{}", triggers_path(), TRIGGER_ID);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].path, trigger_path);
    assert_eq!(requests[1].method, Method::POST);
    assert_eq!(requests[1].path, format!("{}/duplicate", trigger_path));
    assert_eq!(requests[1].json(), json!({ "name": "Manual Trigger copy" }));
    assert_eq!(requests[2].method, Method::DELETE);
    assert_eq!(requests[2].path, trigger_path);
}

#[tokio::test]
async fn test_duplicate_requires_name() {
    let server = MockServer::start().await;

    let err = server
        .client()
        .duplicate_tekton_pipeline_trigger(&DuplicateTektonPipelineTriggerOptions::new(
            pipeline_id(),
            trigger_id(),
            "",
        ))
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation(_)));
    assert!(server.requests().is_empty());
}
