pub mod app;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod fetch;
pub mod output;
pub mod pagination;

#[cfg(test)]
mod tests;
