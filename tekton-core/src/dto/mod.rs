//! Data Transfer Objects for calls to the Tekton pipeline API
//!
//! Every API operation has an options struct holding its path parameters,
//! query filters, request body and extra headers. Options are created with
//! `new(...)` from their required parameters and refined with `with_*`
//! builder methods.
//!
//! ```
//! use tekton_core::dto::RequestOptions;
//! use tekton_core::dto::run::ListTektonPipelineRunsOptions;
//! use uuid::Uuid;
//!
//! let options = ListTektonPipelineRunsOptions::new(Uuid::new_v4())
//!     .with_limit(10)
//!     .with_header("X-Request-Id", "abc");
//! assert_eq!(options.limit, Some(10));
//! ```

use std::collections::BTreeMap;

/// Extra headers sent with a single call
pub type Headers = BTreeMap<String, String>;

/// Behaviour shared by all per-operation options
pub trait RequestOptions: Sized {
    fn headers(&self) -> &Headers;

    fn headers_mut(&mut self) -> &mut Headers;

    /// Add a header to this call only
    fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers_mut().insert(name.into(), value.into());
        self
    }
}

macro_rules! impl_request_options {
    ($($options:ty),* $(,)?) => {
        $(
            impl $crate::dto::RequestOptions for $options {
                fn headers(&self) -> &$crate::dto::Headers {
                    &self.headers
                }

                fn headers_mut(&mut self) -> &mut $crate::dto::Headers {
                    &mut self.headers
                }
            }
        )*
    };
}

pub mod definition;
pub mod pipeline;
pub mod property;
pub mod run;
pub mod trigger;
