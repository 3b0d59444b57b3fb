pub mod config;
pub mod container;
pub mod provider;
pub mod state;
