pub mod config;
pub mod errors;
pub mod template;
pub mod widget;
