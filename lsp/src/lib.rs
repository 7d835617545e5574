//! Dockerfile language server: editor-facing projections over `dockerls_core`.

pub mod analyzer;
mod server;

pub use server::registry;
pub use server::run;
