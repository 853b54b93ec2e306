pub mod organisation;
pub mod user;
