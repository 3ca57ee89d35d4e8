/// Top-level NES System
///
/// Ties together the CPU, bus, and cartridge into a complete NES emulator,
/// and acts as the clock coupler between them: the CPU and PPU run on
/// independent clocks (1 CPU cycle : 3 PPU dots) and this is the only place
/// that owns both, so it's the only place that can keep them in lockstep,
/// service OAM DMA stalls, and route the PPU's NMI line into the CPU.
use crate::bus::NesBus;
use crate::cartridge::Cartridge;
use crate::cpu::Cpu6502;
use emu_core::{Button, Cpu, Result};
use std::path::Path;
use tracing::debug;

/// NES Emulator System
pub struct NesSystem {
    cpu: Cpu6502<NesBus>,
}

impl NesSystem {
    /// Create a new NES system with a cartridge loaded from an iNES file.
    pub fn new(rom_path: &Path) -> Result<Self> {
        let cartridge = Cartridge::load(rom_path)?;
        Self::with_cartridge(cartridge)
    }

    /// Create a new NES system from already-loaded iNES bytes.
    pub fn from_bytes(rom_bytes: &[u8]) -> Result<Self> {
        let cartridge = Cartridge::from_bytes(rom_bytes)?;
        Self::with_cartridge(cartridge)
    }

    fn with_cartridge(cartridge: Cartridge) -> Result<Self> {
        debug!(
            "Loading ROM: mapper={}, PRG={}KB, CHR={}KB",
            cartridge.header().mapper,
            cartridge.header().prg_rom_banks as usize * 16,
            cartridge.header().chr_rom_banks as usize * 8,
        );

        let mut bus = NesBus::new();
        bus.load_cartridge(cartridge);

        let mut cpu = Cpu6502::new(bus);
        cpu.reset();
        debug!("CPU reset to PC=${:04X}", cpu.pc);

        Ok(Self { cpu })
    }

    /// Load a ROM from a file path (convenience method)
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(path.as_ref())
    }

    /// Create a NES system with raw PRG-ROM data, no iNES header (for testing)
    pub fn with_prg_rom(prg_rom: Vec<u8>) -> Result<Self> {
        let mut bus = NesBus::new();
        bus.load_prg_rom(prg_rom);

        let mut cpu = Cpu6502::new(bus);
        cpu.reset();

        Ok(Self { cpu })
    }

    /// Reset the system
    pub fn reset(&mut self) {
        self.cpu.reset();
    }

    /// Step one CPU instruction, including any OAM DMA it triggers, and keep
    /// the PPU/APU clocked in lockstep. Returns the total CPU cycles spent
    /// (instruction cycles plus any DMA stall).
    pub fn step(&mut self) -> Result<u32> {
        let instruction_cycles = self.cpu.step()? as u32;
        self.advance_components(instruction_cycles);

        let mut total_cycles = instruction_cycles;
        if let Some(page) = self.cpu.memory().take_dma_request() {
            // The stall is 513 cycles on an even CPU cycle, 514 on an odd one
            // (one extra alignment cycle before the 256 read/write pairs).
            let stall = if self.cpu.cycles % 2 == 0 { 513 } else { 514 };
            self.cpu.memory().oam_dma_copy(page);
            self.advance_components(stall);
            self.cpu.add_cycles(stall);
            total_cycles += stall;
        }

        Ok(total_cycles)
    }

    /// Clock the PPU 3 dots and the APU once per CPU cycle, routing the
    /// PPU's NMI line into the CPU as it fires.
    fn advance_components(&mut self, cpu_cycles: u32) {
        for _ in 0..cpu_cycles {
            self.cpu.memory().apu_mut().clock();

            for _ in 0..3 {
                self.cpu.memory().ppu_mut().tick();
            }

            if self.cpu.memory().ppu().nmi_interrupt {
                self.cpu.memory().ppu_mut().nmi_interrupt = false;
                self.cpu.nmi();
            }
        }
    }

    /// Run instructions until the PPU reports a new frame has started.
    pub fn run_frame(&mut self) -> Result<()> {
        let start_frame = self.cpu.memory().ppu().frame();
        while self.cpu.memory().ppu().frame() == start_frame {
            self.step()?;
        }
        Ok(())
    }

    /// Get current frame number, as tracked by the PPU
    pub fn frame(&mut self) -> u64 {
        self.cpu.memory().ppu().frame()
    }

    /// Get CPU reference
    pub fn cpu(&self) -> &Cpu6502<NesBus> {
        &self.cpu
    }

    /// Get mutable CPU reference
    pub fn cpu_mut(&mut self) -> &mut Cpu6502<NesBus> {
        &mut self.cpu
    }

    /// Read from the CPU bus
    pub fn read_memory(&mut self, addr: u16) -> u8 {
        self.cpu.memory().read(addr)
    }

    /// Get framebuffer from PPU (256x240 palette indices)
    pub fn framebuffer(&mut self) -> &[u8] {
        self.cpu.memory().ppu().framebuffer()
    }

    /// Get PPU reference
    pub fn ppu(&mut self) -> &crate::ppu::Ppu {
        self.cpu.memory().ppu()
    }

    /// Get APU reference
    pub fn apu(&mut self) -> &crate::apu::Apu {
        self.cpu.memory().apu()
    }

    /// Set controller 1 button state
    pub fn set_button(&mut self, button: Button, pressed: bool) {
        self.cpu.memory().controller1().state().set(button, pressed);
    }

    /// Press controller 1 button
    pub fn press_button(&mut self, button: Button) {
        self.cpu.memory().controller1().state().press(button);
    }

    /// Release controller 1 button
    pub fn release_button(&mut self, button: Button) {
        self.cpu.memory().controller1().state().release(button);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_creation() {
        let mut prg_rom = vec![0xEA; 0x4000]; // NOP instructions
        prg_rom[0x3FFC] = 0x00;
        prg_rom[0x3FFD] = 0x80;

        let system = NesSystem::with_prg_rom(prg_rom).unwrap();
        assert_eq!(system.cpu().pc, 0x8000);
    }

    #[test]
    fn test_system_step() {
        let mut prg_rom = vec![0xEA; 0x4000];
        prg_rom[0] = 0xA9; // LDA #$42
        prg_rom[1] = 0x42;
        prg_rom[2] = 0x85; // STA $00
        prg_rom[3] = 0x00;
        prg_rom[0x3FFC] = 0x00;
        prg_rom[0x3FFD] = 0x80;

        let mut system = NesSystem::with_prg_rom(prg_rom).unwrap();

        system.step().unwrap();
        assert_eq!(system.cpu().a, 0x42);

        system.step().unwrap();
        assert_eq!(system.read_memory(0x00), 0x42);
    }

    #[test]
    fn test_oam_dma_stalls_and_copies() {
        let mut prg_rom = vec![0xEA; 0x4000];
        // LDA #$02 ; STA $4014 (trigger DMA from page $02)
        prg_rom[0] = 0xA9;
        prg_rom[1] = 0x02;
        prg_rom[2] = 0x8D;
        prg_rom[3] = 0x14;
        prg_rom[4] = 0x40;
        prg_rom[0x3FFC] = 0x00;
        prg_rom[0x3FFD] = 0x80;

        let mut system = NesSystem::with_prg_rom(prg_rom).unwrap();
        system.step().unwrap(); // LDA #$02

        let cycles = system.step().unwrap(); // STA $4014, triggers DMA
        assert!(cycles >= 513);
    }

    #[test]
    fn test_rejects_unsupported_mapper() {
        let mut bytes = vec![
            b'N', b'E', b'S', 0x1A, 0x01, 0x01, 0x10, 0x00, 0, 0, 0, 0, 0, 0, 0, 0,
        ];
        bytes.extend(vec![0u8; 0x4000 + 0x2000]);
        assert!(NesSystem::from_bytes(&bytes).is_err());
    }
}
