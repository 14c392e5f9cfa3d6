pub mod config;
pub mod output;
pub mod planner;
pub mod specials;
pub mod stderr_buffer;
pub mod tui;
