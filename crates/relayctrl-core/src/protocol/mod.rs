//! Relay board wire protocol: query URLs and the JSON state snapshot.

pub mod board;

pub use board::{BoardEndpoint, CurrentState, CurrentStateResponse, ProtocolError, RelayOutput};
