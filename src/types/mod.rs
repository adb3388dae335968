// WikiSearch shared type definitions
// Each submodule defines types used across the application.

pub mod article;
pub mod config;
pub mod errors;
pub mod history;
pub mod language;
pub mod session;
pub mod settings;
