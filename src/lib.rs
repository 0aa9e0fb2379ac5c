pub mod cli;
pub mod config;
pub mod datasources;
pub mod error;
pub mod layers;
pub mod logic;
pub mod models;
pub mod report;
