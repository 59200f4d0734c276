//! Request handler module
//!
//! Turns a request into one of three actions (create, upload, show source)
//! and carries them out against the configured working directory.

pub mod actions;
pub mod multipart;
pub mod paths;
pub mod request;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
