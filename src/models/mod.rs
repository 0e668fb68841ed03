pub mod common;
pub mod inference;
pub mod matches;
