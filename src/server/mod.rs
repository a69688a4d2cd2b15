//! Listening socket and accept loop

pub mod listener;
