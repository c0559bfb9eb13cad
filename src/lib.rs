// Library root: re-exports all modules so integration tests and external
// consumers can access the crate's public API.

pub mod config;
pub mod fetch;
pub mod http;
pub mod players;
pub mod providers;
pub mod store;
pub mod ws_server;
