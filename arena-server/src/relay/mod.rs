mod socket_handler;
mod socket_relay;

pub use socket_handler::*;
pub use socket_relay::*;
