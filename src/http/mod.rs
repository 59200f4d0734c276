//! HTTP protocol layer module
//!
//! Response builders and query decoding, decoupled from the action logic.

pub mod query;
pub mod response;

pub use response::{build_405_response, build_options_response, build_text_response};
