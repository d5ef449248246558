//! OpenTelemetry tracing with file-based OTLP export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK TracerProvider → FileSpanExporter → JSON lines
//! ```
//!
//! Traces land in `<data dir>/userdesk-otlp.json`, rotating at 10 MB with
//! three backups. The filter level comes from `RUST_LOG`-style directives in
//! [`Config::trace_level`](crate::Config::trace_level), defaulting to `info`.

mod exporter;
mod file_writer;
mod init;

pub use init::init_tracing;
