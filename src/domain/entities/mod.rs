//! Core business entities.

mod click;
mod link;
mod user;

pub use click::{Click, NewClick};
pub use link::{Link, NewLink};
pub use user::User;
