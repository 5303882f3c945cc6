pub mod app;
pub mod profile;
pub mod render;
pub mod utils;
