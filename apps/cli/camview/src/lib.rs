// Library exports for testing
// The binary (main.rs) imports these as well

pub mod cli;
pub mod commands;
pub mod context;
pub mod error;
pub mod logger;

#[cfg(test)]
mod tests;
