// Library root: re-exports all modules so integration tests and the binary
// share the same public API.

pub mod config;
pub mod playoff;
pub mod provider;
pub mod ranking;
pub mod report;
