/*!
Request/response helper driving the remote Control node.

Every exchange over the half-duplex link follows the same two-phase
pattern:

1. a ready/ready rendezvous — the HMI transmits its ready marker, then
   blocks until the Control node's marker arrives, so neither side can
   run ahead of a peer that is not listening yet;
2. a single operation byte, followed for the password operations by one
   or two PIN payloads, each closed by the terminator byte;
3. for operations that produce a result, a second rendezvous and then
   exactly one result byte.

Every call blocks until the full exchange completes. There are no
timeouts on the link, so a silent peer stalls the session.
*/

use bytes::{BufMut, BytesMut};

use crate::{
    constants::{CONTROL_READY, HMI_READY, PIN_LEN, PIN_TERMINATOR},
    error::{Error, Result},
    link::SerialLink,
    pin::PinBuffer,
    types::{MatchResult, Presence, RequestCode},
};

/// One side of a protocol exchange with the Control node
///
/// Borrows the link for the duration of a single exchange; the caller
/// constructs a fresh helper per operation.
pub struct RemoteHandshake<'a, L: SerialLink> {
    link: &'a mut L,
}

impl<'a, L: SerialLink> RemoteHandshake<'a, L> {
    /// Wrap the serial link for one exchange
    pub fn new(link: &'a mut L) -> Self {
        Self { link }
    }

    /// Ready/ready rendezvous
    ///
    /// Bytes that arrive before the Control-ready marker are skipped;
    /// the marker itself is the synchronization point.
    fn rendezvous(&mut self) -> Result<()> {
        self.link.send_byte(HMI_READY)?;
        while self.link.recv_byte()? != CONTROL_READY {}
        Ok(())
    }

    /// Second rendezvous plus the single result byte
    fn read_result(&mut self) -> Result<MatchResult> {
        self.rendezvous()?;
        let byte = self.link.recv_byte()?;
        MatchResult::from_u8(byte).ok_or(Error::InvalidWireByte(byte))
    }

    /// Assemble one or two PIN payloads into an outbound frame
    fn pin_frame(pins: &[&PinBuffer]) -> BytesMut {
        let mut frame = BytesMut::with_capacity(pins.len() * (PIN_LEN + 1));
        for pin in pins {
            frame.put_slice(pin.digits());
            frame.put_u8(PIN_TERMINATOR);
        }
        frame
    }

    /// Store a new password, comparing it against its confirmation
    pub fn save_and_confirm(
        &mut self,
        pin: &PinBuffer,
        confirm: &PinBuffer,
    ) -> Result<MatchResult> {
        self.rendezvous()?;
        self.link.send_byte(RequestCode::SaveAndConfirm.as_u8())?;
        self.link.send_all(&Self::pin_frame(&[pin, confirm]))?;
        self.read_result()
    }

    /// Compare a candidate password against the stored one
    pub fn check_password(&mut self, pin: &PinBuffer) -> Result<MatchResult> {
        self.rendezvous()?;
        self.link.send_byte(RequestCode::CheckPassword.as_u8())?;
        self.link.send_all(&Self::pin_frame(&[pin]))?;
        self.read_result()
    }

    /// Actuate the door release
    pub fn open_door(&mut self) -> Result<()> {
        self.rendezvous()?;
        self.link.send_byte(RequestCode::OpenDoor.as_u8())
    }

    /// Sound the intrusion alarm
    pub fn trigger_alarm(&mut self) -> Result<()> {
        self.rendezvous()?;
        self.link.send_byte(RequestCode::AlarmTrigger.as_u8())
    }

    /// Ask whether people are in the doorway
    pub fn poll_presence(&mut self) -> Result<Presence> {
        self.rendezvous()?;
        let byte = self.link.recv_byte()?;
        Presence::from_u8(byte).ok_or(Error::InvalidWireByte(byte))
    }

    /// Block until the Control node reports the doorway clear
    pub fn wait_absence(&mut self) -> Result<()> {
        while self.link.recv_byte()? != Presence::NotDetected.as_u8() {}
        Ok(())
    }
}
