//! Seed worker implementation.
//!
//! The worker owns the [`UserSource`] and runs the one-shot fetch away from the
//! event loop. [`spawn_seed_worker`] starts it on a named thread and returns a
//! [`WorkerHandle`] for posting requests and collecting responses.

use crate::domain::error::{Result, UserDeskError};
use crate::source::UserSource;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

/// Processes seed requests against a user source.
pub struct SeedWorker {
    source: Box<dyn UserSource>,
}

impl SeedWorker {
    #[must_use]
    pub fn new(source: Box<dyn UserSource>) -> Self {
        Self { source }
    }

    /// Attaches the parent trace context carried by `message`, if any.
    ///
    /// The returned guard must be held while the message is processed.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_context = message.trace_context()?;
        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    /// Handles one request and produces its response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);
        let _span = tracing::debug_span!("worker_handle_message", message_type = ?message).entered();

        match message {
            WorkerMessage::FetchUsers { limit, request_id, .. } => self.handle_fetch_users(limit, request_id),
        }
    }

    fn handle_fetch_users(&self, limit: usize, request_id: u64) -> WorkerResponse {
        match self.source.fetch() {
            Ok(mut users) => {
                let fetched = users.len();
                users.truncate(limit);
                tracing::debug!(fetched = fetched, kept = users.len(), "users fetched");
                WorkerResponse::UsersFetched { request_id, users }
            }
            Err(e) => {
                tracing::warn!(error = %e, "user fetch failed");
                WorkerResponse::Error {
                    request_id,
                    message: format!("fetch users: {e}"),
                }
            }
        }
    }

    /// Handles a JSON-encoded request and returns the JSON-encoded response.
    ///
    /// For hosts that bridge threads through string messages. Returns `None`
    /// if the payload cannot be decoded or the response cannot be encoded.
    pub fn handle_payload(&mut self, payload: &str) -> Option<String> {
        let message: WorkerMessage = match serde_json::from_str(payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                return None;
            }
        };

        let response = self.handle_message(message);

        serde_json::to_string(&response)
            .map_err(|e| tracing::debug!(error = %e, "failed to serialize worker response"))
            .ok()
    }
}

/// Channel endpoints of a running seed worker thread.
///
/// Dropping the handle closes the request channel and joins the thread.
pub struct WorkerHandle {
    requests: Option<Sender<WorkerMessage>>,
    responses: Receiver<WorkerResponse>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Queues `message` for the worker.
    ///
    /// # Errors
    ///
    /// Returns [`UserDeskError::Worker`] if the worker thread has exited.
    pub fn post(&self, message: WorkerMessage) -> Result<()> {
        self.requests
            .as_ref()
            .ok_or_else(|| UserDeskError::Worker("worker is shut down".to_string()))?
            .send(message)
            .map_err(|_| UserDeskError::Worker("worker thread has exited".to_string()))
    }

    /// Returns a response if one is ready, without blocking.
    #[must_use]
    pub fn try_recv(&self) -> Option<WorkerResponse> {
        self.responses.try_recv().ok()
    }

    /// Waits up to `timeout` for the next response.
    ///
    /// # Errors
    ///
    /// Returns [`UserDeskError::Worker`] on timeout or if the worker has exited.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<WorkerResponse> {
        self.responses.recv_timeout(timeout).map_err(|e| match e {
            RecvTimeoutError::Timeout => UserDeskError::Worker("timed out waiting for worker".to_string()),
            RecvTimeoutError::Disconnected => UserDeskError::Worker("worker thread has exited".to_string()),
        })
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        drop(self.requests.take());
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                tracing::error!("seed worker thread panicked");
            }
        }
    }
}

/// Starts a seed worker thread serving requests against `source`.
///
/// # Errors
///
/// Returns [`UserDeskError::Io`] if the thread cannot be spawned.
pub fn spawn_seed_worker(source: Box<dyn UserSource>) -> Result<WorkerHandle> {
    let (request_tx, request_rx) = mpsc::channel::<WorkerMessage>();
    let (response_tx, response_rx) = mpsc::channel::<WorkerResponse>();

    let thread = std::thread::Builder::new()
        .name("userdesk-seed".to_string())
        .spawn(move || {
            let mut worker = SeedWorker::new(source);
            for message in request_rx {
                if response_tx.send(worker.handle_message(message)).is_err() {
                    tracing::debug!("response receiver dropped, stopping worker");
                    break;
                }
            }
        })?;

    tracing::debug!("seed worker spawned");

    Ok(WorkerHandle {
        requests: Some(request_tx),
        responses: response_rx,
        thread: Some(thread),
    })
}
