pub mod bot_command_handlers;
pub mod constants;
pub mod data_backend;
pub mod data_types;
pub mod shared_main;
