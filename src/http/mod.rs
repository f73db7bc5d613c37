//! HTTP protocol layer module
//!
//! Response builders and request body collection, decoupled from the
//! contact form logic.

pub mod body;
pub mod response;

// Re-export commonly used types
pub use body::{check_content_length, collect_limited};
pub use response::{
    build_400_response, build_404_response, build_413_response, build_500_response,
    build_delivered_response, build_options_response,
};
