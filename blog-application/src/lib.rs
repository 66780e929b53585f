pub mod attachment;
pub mod command;
pub mod command_bus;
pub mod command_handler;
pub mod comment;
pub mod context;
pub mod dto;
pub mod error;
pub mod inmemory_command_bus;
pub mod lookup;
pub mod mapper;
pub mod pipeline;
pub mod post;
pub mod validation;

pub use command_bus::{BlogCommand, CommandBus};
pub use inmemory_command_bus::InMemoryCommandBus;
