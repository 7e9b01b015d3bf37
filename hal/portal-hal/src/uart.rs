//! UART serial console abstractions
//!
//! The console is a bidirectional text channel: the loop polls it for
//! buffered bytes, reads whatever is there, and writes notification lines
//! back out on the same peripheral.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Check whether received bytes are waiting in the buffer
    ///
    /// Must not block. A `true` result guarantees that the next
    /// [`read_available`](Self::read_available) returns at least one byte.
    fn bytes_available(&mut self) -> Result<bool, Self::Error>;

    /// Read whatever is already buffered, up to `buf.len()` bytes
    ///
    /// Returns the number of bytes copied, 0 if nothing is buffered.
    /// Must not block.
    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Read a single byte from the UART, blocking until one arrives
    ///
    /// The default spins on [`read_available`](Self::read_available);
    /// implementations with a blocking read should override it.
    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        loop {
            if self.read_available(&mut buf)? == 1 {
                return Ok(buf[0]);
            }
        }
    }
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 115200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl UartConfig {
    /// 8N1 at the given baud rate
    pub fn with_baudrate(baudrate: u32) -> Self {
        Self {
            baudrate,
            ..Self::default()
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scripted {
        data: &'static [u8],
        pos: usize,
    }

    impl UartRx for Scripted {
        type Error = ();

        fn bytes_available(&mut self) -> Result<bool, ()> {
            Ok(self.pos < self.data.len())
        }

        fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
            let n = buf.len().min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    #[test]
    fn test_read_byte_uses_read_available() {
        let mut rx = Scripted { data: b"ok", pos: 0 };
        assert_eq!(rx.read_byte(), Ok(b'o'));
        assert_eq!(rx.read_byte(), Ok(b'k'));
        assert_eq!(rx.bytes_available(), Ok(false));
    }

    #[test]
    fn test_default_config_is_115200_8n1() {
        let cfg = UartConfig::default();
        assert_eq!(cfg.baudrate, 115200);
        assert_eq!(cfg.data_bits, DataBits::Eight);
        assert_eq!(cfg.parity, Parity::None);
        assert_eq!(cfg.stop_bits, StopBits::One);
        assert_eq!(UartConfig::with_baudrate(9600).baudrate, 9600);
    }
}
