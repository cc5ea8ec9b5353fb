/*!
Blocking byte transport over the serial link.

The HMI and Control nodes share a single half-duplex serial channel.
The crate never touches the peripheral itself; it talks through this
trait, which real hardware implements over its UART driver and tests
implement with scripted byte queues.
*/

use crate::error::Result;

/// One end of the serial link between the HMI and Control nodes
///
/// Both operations block: `send_byte` until the transmitter accepts the
/// byte, `recv_byte` until a byte arrives. There are no timeouts — a
/// silent peer stalls the calling flow, which is a documented
/// limitation of the device rather than a recoverable condition.
pub trait SerialLink {
    /// Transmit a single byte
    fn send_byte(&mut self, byte: u8) -> Result<()>;

    /// Block until the next byte arrives and return it
    fn recv_byte(&mut self) -> Result<u8>;

    /// Transmit a buffer byte by byte
    fn send_all(&mut self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            self.send_byte(byte)?;
        }
        Ok(())
    }
}

impl<L: SerialLink + ?Sized> SerialLink for &mut L {
    fn send_byte(&mut self, byte: u8) -> Result<()> {
        (**self).send_byte(byte)
    }

    fn recv_byte(&mut self) -> Result<u8> {
        (**self).recv_byte()
    }
}
