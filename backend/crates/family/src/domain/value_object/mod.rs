//! Value Object Module

pub mod color;
pub mod family_id;
pub mod family_name;
pub mod invitation_code;
pub mod member_role;
