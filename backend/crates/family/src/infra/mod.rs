//! Infrastructure Layer

pub mod supabase;
