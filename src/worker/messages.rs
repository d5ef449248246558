//! Seed worker message types.
//!
//! Requests flow from the application to the worker thread and responses flow
//! back. Both are serde-serializable so hosts that bridge threads through a
//! string channel can pass them as JSON. Requests carry the caller's trace
//! context so worker spans join the originating trace.

use crate::domain::User;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across threads.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span ids of the current tracing span.
    ///
    /// Returns `None` when no valid OpenTelemetry context is active, e.g.
    /// before [`init_tracing`](crate::observability::init_tracing) ran.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            tracing::trace!("no valid span context to capture");
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Messages sent to the seed worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerMessage {
    /// Fetch users from the configured source, keeping at most `limit`.
    FetchUsers {
        limit: usize,

        /// Echoed back in the response so stale answers can be told apart.
        #[serde(default)]
        request_id: u64,

        /// Trace context for linking spans across threads.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Creates a `FetchUsers` message carrying the current trace context.
    #[must_use]
    pub fn fetch_users(limit: usize, request_id: u64) -> Self {
        Self::FetchUsers {
            limit,
            request_id,
            trace_context: TraceContext::from_current(),
        }
    }

    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::FetchUsers { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Responses sent back from the seed worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkerResponse {
    /// The source answered; `users` is already truncated to the requested limit.
    UsersFetched {
        #[serde(default)]
        request_id: u64,
        users: Vec<User>,
    },

    /// The fetch failed. The collection stays empty for this session.
    Error {
        #[serde(default)]
        request_id: u64,

        /// Human-readable error message.
        message: String,
    },
}

impl WorkerResponse {
    /// Id of the request this answers.
    #[must_use]
    pub const fn request_id(&self) -> u64 {
        match self {
            Self::UsersFetched { request_id, .. } | Self::Error { request_id, .. } => *request_id,
        }
    }
}
