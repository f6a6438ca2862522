pub mod app;
pub mod board;
pub mod cli;
pub mod config;
pub mod output;
pub mod record;
pub mod runner;
pub mod source;

#[cfg(test)]
mod tests;
