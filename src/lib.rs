// src/lib.rs

pub mod app;
pub mod chat;
pub mod chat_view;
pub mod constants;
pub mod errors;
pub mod key_handlers;
pub mod logging;
pub mod simulator;
pub mod typing_indicator;

pub use app::App;
