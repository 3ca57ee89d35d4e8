/// NES APU register file (stub)
///
/// Audio synthesis — duty-cycle waveform generation, envelopes, sweep units,
/// the triangle/noise/DMC generators, and the non-linear mixer — is out of
/// scope for this core (§1 Non-goals): it belongs to a presentation/audio
/// collaborator, not the CPU/PPU/bus core. What the core *does* own is the
/// bus contract: writes to $4000-$4013/$4015/$4017 must not be lost (so
/// probing software reads back what it wrote), and $4015 must report which
/// channels are enabled and whether their length counters are still
/// running, since test ROMs and game code branch on that.
use emu_core::MemoryBus;

/// Length counter load values, indexed by the top 5 bits of $4003/$4007/$400B/$400F
const LENGTH_TABLE: [u8; 32] = [
    10, 254, 20, 2, 40, 4, 80, 6, 160, 8, 60, 10, 14, 12, 26, 14, 12, 16, 24, 18, 48, 20, 96, 22,
    192, 24, 72, 26, 16, 28, 32, 30,
];

/// One of the four length-counter-bearing channels (pulse x2, triangle, noise)
#[derive(Debug, Clone, Copy, Default)]
struct ChannelStub {
    enabled: bool,
    length_counter: u8,
}

impl ChannelStub {
    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.length_counter = 0;
        }
    }

    fn load_length(&mut self, value: u8) {
        if self.enabled {
            self.length_counter = LENGTH_TABLE[(value >> 3) as usize];
        }
    }

    fn status(&self) -> bool {
        self.length_counter > 0
    }
}

/// NES APU register file. See module docs: no waveform synthesis happens here.
#[derive(Debug, Clone)]
pub struct Apu {
    pulse1: ChannelStub,
    pulse2: ChannelStub,
    triangle: ChannelStub,
    noise: ChannelStub,
    dmc_enabled: bool,
    /// Raw register bytes for $4000-$4013, keyed by (addr - 0x4000), for
    /// collaborators that want to read back exactly what was written.
    regs: [u8; 0x14],
    frame_counter_mode: bool,
    irq_inhibit: bool,
    cycle: u64,
}

impl Apu {
    pub fn new() -> Self {
        Self {
            pulse1: ChannelStub::default(),
            pulse2: ChannelStub::default(),
            triangle: ChannelStub::default(),
            noise: ChannelStub::default(),
            dmc_enabled: false,
            regs: [0; 0x14],
            frame_counter_mode: false,
            irq_inhibit: false,
            cycle: 0,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Write to an APU register ($4000-$4013, $4015, $4017)
    pub fn write_register(&mut self, addr: u16, value: u8) {
        match addr {
            0x4000..=0x4013 => {
                self.regs[(addr - 0x4000) as usize] = value;
                match addr {
                    0x4003 => self.pulse1.load_length(value),
                    0x4007 => self.pulse2.load_length(value),
                    0x400B => self.triangle.load_length(value),
                    0x400F => self.noise.load_length(value),
                    _ => {}
                }
            }
            0x4015 => {
                self.pulse1.set_enabled(value & 0x01 != 0);
                self.pulse2.set_enabled(value & 0x02 != 0);
                self.triangle.set_enabled(value & 0x04 != 0);
                self.noise.set_enabled(value & 0x08 != 0);
                self.dmc_enabled = value & 0x10 != 0;
            }
            0x4017 => {
                self.frame_counter_mode = value & 0x80 != 0;
                self.irq_inhibit = value & 0x40 != 0;
            }
            _ => {}
        }
    }

    /// Read $4015 (channel status); all other addresses are write-only (open bus)
    pub fn read_register(&self, addr: u16) -> u8 {
        match addr {
            0x4015 => {
                let mut status = 0u8;
                status |= self.pulse1.status() as u8;
                status |= (self.pulse2.status() as u8) << 1;
                status |= (self.triangle.status() as u8) << 2;
                status |= (self.noise.status() as u8) << 3;
                status |= (self.dmc_enabled as u8) << 4;
                status
            }
            _ => 0,
        }
    }

    /// Advance the APU by one CPU cycle. No samples are produced (§1); this
    /// only keeps the cycle counter live for collaborators that poll it.
    pub fn clock(&mut self) {
        self.cycle = self.cycle.wrapping_add(1);
    }
}

impl Default for Apu {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for Apu {
    fn read(&mut self, addr: u16) -> u8 {
        self.read_register(addr)
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.write_register(addr, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_channels() {
        let mut apu = Apu::new();
        apu.write_register(0x4015, 0x0F);
        assert!(apu.pulse1.enabled);
        assert!(apu.pulse2.enabled);
        assert!(apu.triangle.enabled);
        assert!(apu.noise.enabled);
        assert!(!apu.dmc_enabled);
    }

    #[test]
    fn test_length_counter_load_and_status() {
        let mut apu = Apu::new();
        apu.write_register(0x4015, 0x01); // enable pulse1
        apu.write_register(0x4003, 0x08); // index 1 -> 254
        assert_eq!(apu.read_register(0x4015) & 0x01, 0x01);

        apu.write_register(0x4015, 0x00); // disable clears the counter
        assert_eq!(apu.read_register(0x4015) & 0x01, 0x00);
    }

    #[test]
    fn test_register_readback_via_regs() {
        let mut apu = Apu::new();
        apu.write_register(0x4000, 0x3F);
        assert_eq!(apu.regs[0], 0x3F);
    }

    #[test]
    fn test_clock_does_not_panic() {
        let mut apu = Apu::new();
        for _ in 0..100 {
            apu.clock();
        }
    }
}
