#![forbid(unsafe_code)]

// Declare the feature-gated module folders
#[cfg(feature = "net")]
pub mod net;
#[cfg(feature = "storage")]
pub mod storage;

// Re-export everything
#[cfg(feature = "net")]
pub use net::*;
#[cfg(feature = "storage")]
pub use storage::*;
