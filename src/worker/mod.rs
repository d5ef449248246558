//! Background worker for the startup seed fetch.
//!
//! The fetch is the only suspension point in the engine. It runs on its own
//! thread; the response is fed back into the event loop as
//! [`Event::WorkerResponse`](crate::app::Event::WorkerResponse).
//!
//! - `messages`: request/response protocol with trace context propagation
//! - `handler`: worker implementation and thread spawning

pub mod handler;
pub mod messages;

pub use handler::{spawn_seed_worker, SeedWorker, WorkerHandle};
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
