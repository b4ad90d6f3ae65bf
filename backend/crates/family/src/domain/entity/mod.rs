pub mod child;
pub mod family;
pub mod invitation;
pub mod membership;
pub mod profile;
