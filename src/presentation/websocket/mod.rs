//! WebSocket Relay
//!
//! Real-time relay over WebSocket connections.

pub mod handler;
pub mod messages;
pub mod relay;

pub use handler::ws_handler;
pub use messages::RelayFrame;
pub use relay::Relay;
