// WikiSearch services
// Services provide the core functionality: article lookup, searching, settings and theming.

pub mod article_store;
pub mod search_controller;
pub mod settings_engine;
pub mod theme_engine;
