//! Matrix Backend Library
//!
//! This library exposes modules for testing and external use.
//! The main binary is in `src/main.rs`.

pub mod api;
pub mod broadcast;
pub mod config;
pub mod error;
/// Agent simulation: thought catalogue and the periodic update loop
pub mod simulation;
/// Application state management
///
/// Holds the agent table and the broadcast hub.
pub mod state;
pub mod websocket;
