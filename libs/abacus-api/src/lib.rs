//! abacus-api - JSON-over-HTTP client for the abacus evaluation service
//!
//! All actual mathematics happens on a remote FastAPI-style service; this
//! crate is the typed client. [`ApiClient::evaluate`] dispatches the state
//! machine's requests (arithmetic and trigonometry); the remaining endpoint
//! methods complete the service surface for other front-ends.
//!
//! Failures classify into [`ApiError`]: a non-2xx response with the
//! service-supplied detail message, a transport failure, a timeout (10 s by
//! default), or anything unclassified. The client never retries and never
//! caches.
//!
//! # Example
//!
//! ```rust,no_run
//! use abacus_api::{ApiClient, dto::ArithmeticRequest};
//!
//! # async fn run() -> abacus_api::Result<()> {
//! let client = ApiClient::new("http://127.0.0.1:8000")?;
//! let response = client
//!     .evaluate_arithmetic(&ArithmeticRequest {
//!         expression: "2 + 3".to_string(),
//!     })
//!     .await?;
//! assert_eq!(response.result, 5.0);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod dto;
pub mod error;

// Re-exports for convenience
pub use client::{ApiClient, DEFAULT_BASE_URL, REQUEST_TIMEOUT};
pub use error::{ApiError, Result};
