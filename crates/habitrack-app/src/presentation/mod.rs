pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod ipc;
pub mod state;
