mod analysis;
mod cli;
mod config;
mod entry;
mod handlers;
pub mod registry;
mod state;
mod text;
mod utils;

#[cfg(test)]
mod registry_test;
#[cfg(test)]
mod text_test;

pub use entry::run;
