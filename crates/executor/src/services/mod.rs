pub mod actions;
pub mod reply;
pub mod signal_service;
pub mod telegram_service;
