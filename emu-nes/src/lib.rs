//! NES Emulator Implementation
//!
//! This crate implements a Nintendo Entertainment System emulator,
//! including the 6502 CPU, PPU, APU, and memory system.

pub mod apu;
pub mod bus;
pub mod cartridge;
pub mod controller;
pub mod cpu;
pub mod palette;
pub mod ppu;
pub mod system;

pub use apu::Apu;
pub use bus::NesBus;
pub use cartridge::Cartridge;
pub use controller::Controller;
pub use cpu::Cpu6502;
pub use palette::{framebuffer_to_rgb, palette_to_rgb, NES_PALETTE};
pub use ppu::Ppu;
pub use system::NesSystem;
