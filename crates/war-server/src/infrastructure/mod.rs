//! Infrastructure layer for the server.
//!
//! Contains OS-facing adapters: TCP sockets and configuration file storage.
//!
//! **Dependency rule**: this layer may depend on `application` and `war_core`,
//! but MUST NOT be imported by the `application` layer.

pub mod network;
pub mod storage;
