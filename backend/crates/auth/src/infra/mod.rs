//! Infrastructure Layer
//!
//! Back-end implementations.

pub mod supabase;
