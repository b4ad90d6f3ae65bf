//! Domain Layer
//!
//! Family records, value objects and the store trait.

pub mod entity;
pub mod repository;
pub mod value_object;

pub use repository::{Caller, FamilyStore, LocalFamilyStore};
