mod channel;
mod channel_command;
mod channel_manager;

pub use channel::*;
pub use channel_command::*;
pub use channel_manager::*;
