pub mod app;
pub mod settings;
