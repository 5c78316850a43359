pub mod chance;
pub mod clause;
pub mod composer;
pub mod config;
pub mod expand;
pub mod noun;
pub mod query;
pub mod selection;
pub mod title;
pub mod token;
