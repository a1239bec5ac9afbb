
pub use test_server::*;
pub use test_socket::*;
