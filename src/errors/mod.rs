//! Error types for the VoiceNest Gateway.
//!
//! Each pipeline concern defines its own `thiserror` enum next to its code;
//! this module holds the application-level error that every stage outcome is
//! ultimately mapped into at the HTTP boundary.

pub mod app_error;

pub use app_error::{AppError, AppResult};
