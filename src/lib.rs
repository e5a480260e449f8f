pub mod common;
pub mod engine;
pub mod host;
pub mod model;
pub mod server;
