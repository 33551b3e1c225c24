//! HTTP API server
//!
//! - POST /process-calls - Run the batch pipeline over the input file
//! - GET / - Human-readable status page
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use handlers::{ErrorResponse, ProcessCallsResponse};
pub use routes::create_router;
pub use state::AppState;
