//! Tekton Core
//!
//! Core types for the Tekton pipeline API client.
//!
//! This crate contains:
//! - Domain types: Resources returned by the service (pipelines, runs, triggers, etc.)
//! - DTOs: Per-operation options and request bodies sent to the service
//! - Validation: Required-field checks applied before a request is issued

pub mod domain;
pub mod dto;
pub mod validation;
