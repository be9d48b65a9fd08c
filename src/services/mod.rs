pub mod broadcast;
pub mod responder;
pub mod session_registry;
pub mod transport;
