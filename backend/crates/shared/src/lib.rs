//! Shared Kernel
//!
//! The small vocabulary every feature crate agrees on:
//! - [`error::app_error::AppError`], the user-facing error carried to the HTTP edge
//! - [`error::kind::ErrorKind`], its HTTP classification
//!
//! Feature crates keep their own `thiserror` enums and convert into
//! `AppError` at the presentation boundary.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
