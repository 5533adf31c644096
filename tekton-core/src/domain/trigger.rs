//! Trigger domain types
//!
//! A trigger decides when the pipeline runs: on demand, on a Git event, on a
//! cron schedule or on a webhook call. The kind-specific fields live in
//! [`TriggerKind`], flattened next to the fields every trigger shares.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::common::{Tool, Worker};
use crate::domain::property::Property;

/// Pipeline trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub id: Uuid,
    pub name: String,
    pub href: Option<String>,
    /// Event listener in the definition that handles the trigger
    pub event_listener: String,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Worker override; the pipeline's worker is used when absent
    pub worker: Option<Worker>,
    pub max_concurrent_runs: Option<i64>,
    #[serde(default)]
    pub enabled: bool,
    pub favorite: Option<bool>,
    #[serde(flatten)]
    pub kind: TriggerKind,
}

impl Trigger {
    pub fn trigger_type(&self) -> TriggerType {
        self.kind.trigger_type()
    }
}

/// Kind-specific trigger fields, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriggerKind {
    Manual {},
    Scm {
        #[serde(skip_serializing_if = "Option::is_none")]
        source: Option<TriggerSource>,
        #[serde(default)]
        events: Vec<ScmEvent>,
        #[serde(skip_serializing_if = "Option::is_none")]
        filter: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        enable_events_from_forks: Option<bool>,
    },
    Timer {
        #[serde(skip_serializing_if = "Option::is_none")]
        cron: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        timezone: Option<String>,
    },
    Generic {
        #[serde(skip_serializing_if = "Option::is_none")]
        secret: Option<GenericSecret>,
        #[serde(skip_serializing_if = "Option::is_none")]
        webhook_url: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        filter: Option<String>,
    },
}

impl TriggerKind {
    pub fn trigger_type(&self) -> TriggerType {
        match self {
            TriggerKind::Manual {} => TriggerType::Manual,
            TriggerKind::Scm { .. } => TriggerType::Scm,
            TriggerKind::Timer { .. } => TriggerType::Timer,
            TriggerKind::Generic { .. } => TriggerType::Generic,
        }
    }
}

/// Trigger type, as used in filters and patches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    Manual,
    Scm,
    Timer,
    Generic,
}

impl TriggerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerType::Manual => "manual",
            TriggerType::Scm => "scm",
            TriggerType::Timer => "timer",
            TriggerType::Generic => "generic",
        }
    }
}

impl fmt::Display for TriggerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Git events an SCM trigger listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScmEvent {
    Push,
    PullRequest,
    PullRequestClosed,
}

impl ScmEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScmEvent::Push => "push",
            ScmEvent::PullRequest => "pull_request",
            ScmEvent::PullRequestClosed => "pull_request_closed",
        }
    }
}

/// Repository an SCM trigger listens to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSource {
    #[serde(rename = "type")]
    pub source_type: String,
    pub properties: TriggerSourceProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSourceProperties {
    pub url: String,
    pub branch: Option<String>,
    /// Glob matched against branch names, exclusive with `branch`
    pub pattern: Option<String>,
    /// Repository is reached through a private worker without a webhook
    #[serde(default)]
    pub blind_connection: bool,
    pub hook_id: Option<String>,
    pub tool: Option<Tool>,
}

/// How a generic webhook call is authenticated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericSecret {
    #[serde(rename = "type")]
    pub secret_type: SecretType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SecretSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<SecretAlgorithm>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretType {
    TokenMatches,
    DigestMatches,
    InternalValidation,
}

/// Part of the webhook request the secret is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretSource {
    Header,
    Payload,
    Query,
}

/// Digest algorithm for `digest_matches` secrets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretAlgorithm {
    Md4,
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
    #[serde(rename = "sha512_224")]
    Sha512_224,
    #[serde(rename = "sha512_256")]
    Sha512_256,
    Ripemd160,
}

/// Triggers of a pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggersCollection {
    #[serde(default)]
    pub triggers: Vec<Trigger>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_timer_trigger_deserializes_kind_fields() {
        let trigger: Trigger = serde_json::from_value(json!({
            "type": "timer",
            "id": "1bb892a1-2e04-4768-a369-b1159eace147",
            "name": "nightly",
            "event_listener": "listener",
            "enabled": true,
            "cron": "0 2 * * *",
            "timezone": "Europe/London",
            "tags": ["nightly"]
        }))
        .unwrap();

        assert_eq!(trigger.trigger_type(), TriggerType::Timer);
        assert_eq!(
            trigger.kind,
            TriggerKind::Timer {
                cron: Some("0 2 * * *".to_string()),
                timezone: Some("Europe/London".to_string()),
            }
        );
        assert_eq!(trigger.tags, vec!["nightly".to_string()]);
        assert!(trigger.properties.is_empty());
    }

    #[test]
    fn test_scm_trigger_events_and_source() {
        let trigger: Trigger = serde_json::from_value(json!({
            "type": "scm",
            "id": "1bb892a1-2e04-4768-a369-b1159eace147",
            "name": "on-push",
            "event_listener": "git-listener",
            "enabled": false,
            "events": ["push", "pull_request_closed"],
            "source": {
                "type": "git",
                "properties": {
                    "url": "https://github.com/open-toolchain/hello-tekton.git",
                    "branch": "main",
                    "tool": { "id": "a1b2" }
                }
            },
            "worker": { "id": "public", "name": "IBM Managed workers", "type": "public" }
        }))
        .unwrap();

        match trigger.kind {
            TriggerKind::Scm { source, events, .. } => {
                let source = source.unwrap();
                assert_eq!(source.properties.branch.as_deref(), Some("main"));
                assert!(!source.properties.blind_connection);
                assert_eq!(events, vec![ScmEvent::Push, ScmEvent::PullRequestClosed]);
            }
            other => panic!("expected scm trigger, got {:?}", other),
        }
        assert_eq!(trigger.worker.unwrap().id, "public");
        assert!(!trigger.enabled);
    }

    #[test]
    fn test_manual_trigger_ignores_unknown_fields() {
        let trigger: Trigger = serde_json::from_value(json!({
            "type": "manual",
            "id": "1bb892a1-2e04-4768-a369-b1159eace147",
            "name": "Manual Trigger",
            "event_listener": "listener",
            "enabled": true,
            "something_new": 42
        }))
        .unwrap();

        assert_eq!(trigger.kind, TriggerKind::Manual {});
    }

    #[test]
    fn test_serialized_trigger_carries_type_tag() {
        let kind = TriggerKind::Generic {
            secret: Some(GenericSecret {
                secret_type: SecretType::DigestMatches,
                value: None,
                source: Some(SecretSource::Header),
                key_name: Some("X-Hub-Signature".to_string()),
                algorithm: Some(SecretAlgorithm::Sha512_256),
            }),
            webhook_url: None,
            filter: None,
        };

        let value = serde_json::to_value(&kind).unwrap();
        assert_eq!(value["type"], "generic");
        assert_eq!(value["secret"]["type"], "digest_matches");
        assert_eq!(value["secret"]["algorithm"], "sha512_256");
        assert!(value.get("webhook_url").is_none());
    }
}
