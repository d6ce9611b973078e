pub mod config;
pub mod engine;
pub mod error;
pub mod fix;
pub mod schema;
pub mod script;
pub mod stats;
pub mod store;
