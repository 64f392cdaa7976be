//! Infrastructure layer.
//!
//! Contains OS-facing adapters: the keyboard hook, the relay board HTTP
//! client, file-system storage, and the configuration UI bridge.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `relayctrl_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod input_capture;
pub mod relay_client;
pub mod storage;
pub mod ui_bridge;
