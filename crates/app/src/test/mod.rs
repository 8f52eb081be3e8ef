//! Shared test infrastructure.

pub mod context;

pub use context::TestContext;
pub use db::TestDb;
