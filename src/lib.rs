pub mod catalog;
pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod navigator;
pub mod retriever;
pub mod session;
pub mod settings;
pub mod ui;
pub mod view;
