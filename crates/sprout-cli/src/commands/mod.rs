pub mod adopt;
pub mod catalog;
pub mod common;
pub mod environments;
pub mod garden;
pub mod remove;
