pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod form;
pub mod model;
pub mod session;
pub mod view;

#[cfg(test)]
mod tests;
