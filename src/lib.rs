//! Crypto Price Feed — Library Root
//!
//! Client-side market-data access layer: fetches the tradable-instrument
//! list over HTTP and maintains a live price feed over a persistent
//! WebSocket, normalizing both into stable domain models.
//!
//! Re-exports all modules for integration tests and the wiring binary.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod usecases;
