//! Buffered UART console
//!
//! Wraps the interrupt-driven `BufferedUartRx`/`BufferedUartTx` halves so
//! the polling loop can ask "is anything waiting?" before reading, and
//! never blocks on an idle line.

use embassy_rp::uart::{self, BufferedUartRx, BufferedUartTx};
use embedded_io::{Read, ReadReady, Write};
use portal_hal::uart::{DataBits, Parity, StopBits};
use portal_hal::{UartConfig, UartRx, UartTx};

/// Console receive/transmit errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsoleError {
    /// RX FIFO overflowed before it was drained
    Overrun,
    /// Line held low longer than a frame
    Break,
    Parity,
    Framing,
    Other,
}

impl From<uart::Error> for ConsoleError {
    fn from(e: uart::Error) -> Self {
        match e {
            uart::Error::Overrun => ConsoleError::Overrun,
            uart::Error::Break => ConsoleError::Break,
            uart::Error::Parity => ConsoleError::Parity,
            uart::Error::Framing => ConsoleError::Framing,
            #[allow(unreachable_patterns)]
            _ => ConsoleError::Other,
        }
    }
}

/// Build the embassy UART config from the shared one
pub fn to_rp_config(config: &UartConfig) -> uart::Config {
    let mut rp = uart::Config::default();
    rp.baudrate = config.baudrate;
    rp.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    rp.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    rp.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    rp
}

/// Receive half of the console
pub struct ConsoleRx {
    inner: BufferedUartRx,
}

impl ConsoleRx {
    pub fn new(inner: BufferedUartRx) -> Self {
        Self { inner }
    }
}

impl UartRx for ConsoleRx {
    type Error = ConsoleError;

    fn bytes_available(&mut self) -> Result<bool, ConsoleError> {
        self.inner.read_ready().map_err(ConsoleError::from)
    }

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, ConsoleError> {
        if buf.is_empty() || !self.bytes_available()? {
            return Ok(0);
        }
        // Data is buffered, so this returns without waiting
        self.inner.read(buf).map_err(ConsoleError::from)
    }

    fn read_byte(&mut self) -> Result<u8, ConsoleError> {
        let mut byte = [0u8; 1];
        // Blocks until the interrupt handler buffers a byte
        self.inner
            .read_exact(&mut byte)
            .map_err(|e| match e {
                embedded_io::ReadExactError::Other(e) => ConsoleError::from(e),
                embedded_io::ReadExactError::UnexpectedEof => ConsoleError::Other,
            })?;
        Ok(byte[0])
    }
}

/// Transmit half of the console
pub struct ConsoleTx {
    inner: BufferedUartTx,
}

impl ConsoleTx {
    pub fn new(inner: BufferedUartTx) -> Self {
        Self { inner }
    }
}

impl UartTx for ConsoleTx {
    type Error = ConsoleError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), ConsoleError> {
        self.inner.write_all(data).map_err(ConsoleError::from)
    }

    fn flush(&mut self) -> Result<(), ConsoleError> {
        self.inner.flush().map_err(ConsoleError::from)
    }
}
