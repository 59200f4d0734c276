//! ezupload: a deliberately weak file-upload endpoint for CTF practice.
//!
//! One HTTP handler, three actions selected by the `action` query parameter:
//! `create` writes a fixed script file, `upload` stores a multipart file whose
//! name ends in `.txt`, and anything else returns the handler's own source.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
