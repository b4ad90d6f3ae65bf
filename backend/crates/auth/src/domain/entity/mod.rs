pub mod registration;
pub mod session;
