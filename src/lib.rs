pub mod config;
pub mod data;
pub mod filter;
pub mod session;
pub mod stats;
pub mod viewer;
