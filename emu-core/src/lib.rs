//! Core emulator traits and types for LumiEmu
//!
//! This crate provides the fundamental abstractions shared by console-specific
//! emulator cores: a generic memory bus contract, a CPU trait, and the small
//! value types (controller button state, errors) that don't belong to any one
//! console.

pub mod error;
pub mod memory_bus;
pub mod traits;
pub mod types;

pub use error::{EmulatorError, Result};
pub use memory_bus::MemoryBus;
pub use traits::{Cpu, Emulator};
pub use types::{Button, ControllerState};
