//! Request handler module
//!
//! Routes each request and runs the contact form submission flow.

pub mod contact;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
