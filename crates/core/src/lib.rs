//! Domain types shared by the book store and both front-ends.
//!
//! This crate performs no I/O. Everything here is usable from the
//! repository layer, the HTTP server and the chat bot alike.

pub mod book;
pub mod error;
pub mod pagination;
pub mod status;
pub mod types;
