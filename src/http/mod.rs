//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID assigned / propagated)
//!     → handlers.rs (extract query, call latency executor or fault simulator)
//!     → response.rs (outcome or error → status + JSON body)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, X_REQUEST_ID};
pub use response::ApiError;
pub use server::{AppState, HttpServer};
