//! HTTP request handlers.
//!
//! - `api` - Health check endpoint
//! - `converse` - The conversation endpoint: audio in, spoken reply out

pub mod api;
pub mod converse;

pub use converse::converse_handler;
