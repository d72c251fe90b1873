pub mod asset;
pub mod config;
pub mod menu;
pub mod panel;
