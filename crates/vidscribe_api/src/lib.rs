//! Vidscribe API client: typed access to the remote transcription service.
mod client;
mod handle;
mod types;

pub use client::{ApiSettings, HttpTaskApi, SessionContext, TaskApi};
pub use handle::ApiHandle;
pub use types::{ApiError, ApiEvent, DeleteAck, ErrorKind, RequestId, Task};
