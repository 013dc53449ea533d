pub mod access;
pub mod errors;
pub mod identity;
pub mod page;
pub mod room;
