//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, Base64url, PKCE, random codes)
//! - Cookie management
//! - Path and query-string helpers for redirects
//! - The hosted backend client (`supabase`)

pub mod cookie;
pub mod crypto;
pub mod supabase;
pub mod url;
