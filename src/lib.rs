//! Filebox - a single-connection HTTP/1.1 file server
//!
//! Serves files for GET and stores uploads for PUT, one connection at a time.

pub mod config;
pub mod handler;
pub mod http;
pub mod server;
