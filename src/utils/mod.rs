//! Utility modules for the m3u-combiner application
//!
//! Retrieval plumbing used by the combiner: HTTP fetching, body
//! decompression and URL obfuscation for logs.

pub mod decompression;
pub mod http_client;
pub mod url;

// Re-export commonly used types for convenience
pub use decompression::{CompressionFormat, DecompressionService};
pub use http_client::{DecompressingHttpClient, StandardHttpClient};
