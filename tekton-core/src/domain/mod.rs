//! Core domain types
//!
//! This module contains the resources exposed by the Tekton pipeline API.
//! They mirror the JSON payloads returned by the service; the service alone
//! owns their lifecycle.

pub mod common;
pub mod definition;
pub mod pipeline;
pub mod property;
pub mod run;
pub mod trigger;
