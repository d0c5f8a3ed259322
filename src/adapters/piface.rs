//! PiFace Digital adapter.
//!
//! The board is an MCP23S17 port expander on SPI0/CE0: port A drives the
//! eight open-collector outputs, port B reads the eight inputs.  Inputs are
//! pulled up on-chip, so a closed switch or a grounded sensor line reads 0,
//! which is exactly the active-low convention of [`PinSnapshot`].
//!
//! Only construction can fail.  Transfer errors during the loop are logged
//! and the last good input value is reused.

use log::{info, warn};
use rppal::spi::{Bus, Mode, SlaveSelect, Spi};

use crate::app::ports::{GpioPort, OutputPin};
use crate::error::{Error, Result};
use crate::inputs::PinSnapshot;

// ── MCP23S17 registers (IOCON.BANK = 0) ───────────────────────

const IODIRA: u8 = 0x00;
const IODIRB: u8 = 0x01;
const IOCON: u8 = 0x0a;
const GPPUB: u8 = 0x0d;
const GPIOA: u8 = 0x12;
const GPIOB: u8 = 0x13;

/// Hardware address enable: lets several boards share one chip select.
const IOCON_HAEN: u8 = 0x08;

const CMD_WRITE: u8 = 0x40;
const CMD_READ: u8 = 0x41;

const SPI_CLOCK_HZ: u32 = 10_000_000;

pub struct PiFace {
    spi: Spi,
    /// Hardware address set by the board jumpers (0..=7).
    hw_addr: u8,
    /// Shadow of the output latch.
    outputs: u8,
    last_inputs: PinSnapshot,
}

impl PiFace {
    /// Open the SPI device and configure the expander.
    pub fn open(hw_addr: u8) -> Result<Self> {
        let spi = Spi::new(Bus::Spi0, SlaveSelect::Ss0, SPI_CLOCK_HZ, Mode::Mode0)
            .map_err(|e| Error::Init(format!("SPI0.0: {e}")))?;

        let mut board = Self {
            spi,
            hw_addr: hw_addr & 0x07,
            outputs: 0,
            last_inputs: PinSnapshot::idle(),
        };

        board
            .configure()
            .map_err(|e| Error::Init(format!("MCP23S17 setup: {e}")))?;
        info!("PiFace: board {} configured", board.hw_addr);
        Ok(board)
    }

    fn configure(&mut self) -> Result<()> {
        self.write_reg(IOCON, IOCON_HAEN)?;
        self.write_reg(IODIRA, 0x00)?;
        self.write_reg(IODIRB, 0xff)?;
        self.write_reg(GPPUB, 0xff)?;
        self.write_reg(GPIOA, self.outputs)?;
        Ok(())
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<()> {
        let cmd = CMD_WRITE | (self.hw_addr << 1);
        self.spi
            .write(&[cmd, reg, value])
            .map(|_| ())
            .map_err(|e| Error::Gpio(e.to_string()))
    }

    fn read_reg(&mut self, reg: u8) -> Result<u8> {
        let cmd = CMD_READ | (self.hw_addr << 1);
        let mut rx = [0u8; 3];
        self.spi
            .transfer(&mut rx, &[cmd, reg, 0x00])
            .map_err(|e| Error::Gpio(e.to_string()))?;
        Ok(rx[2])
    }

    fn flush_outputs(&mut self) {
        if let Err(e) = self.write_reg(GPIOA, self.outputs) {
            warn!("PiFace: output write failed: {}", e);
        }
    }
}

impl GpioPort for PiFace {
    fn read_inputs(&mut self) -> PinSnapshot {
        match self.read_reg(GPIOB) {
            Ok(bits) => self.last_inputs = PinSnapshot::from_bits(bits),
            Err(e) => warn!("PiFace: input read failed: {}", e),
        }
        self.last_inputs
    }

    fn write_output(&mut self, pin: OutputPin, on: bool) {
        let mask = crate::pins::pin_bit_mask(pin.pin());
        if on {
            self.outputs |= mask;
        } else {
            self.outputs &= !mask;
        }
        self.flush_outputs();
    }

    fn all_outputs_off(&mut self) {
        self.outputs = 0;
        self.flush_outputs();
    }
}
