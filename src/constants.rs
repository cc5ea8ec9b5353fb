/*!
Constants for the access-control serial protocol.

This module contains the fixed wire bytes shared with the Control node
and the default countdown durations, all in one place.
*/

/// Number of digits in a PIN
pub const PIN_LEN: usize = 5;

/// Glyph echoed to the display for each accepted PIN digit
pub const PIN_MASK: char = '*';

/// Ready marker sent by the HMI node before each exchange phase
pub const HMI_READY: u8 = 0x01;

/// Ready marker sent back by the Control node
pub const CONTROL_READY: u8 = 0x02;

/// Terminator byte closing each PIN payload
///
/// Must stay outside the 0-9 range reserved for raw PIN digits.
pub const PIN_TERMINATOR: u8 = b'#';

/// Default countdown durations, in 1-second ticks
pub mod ticks {
    /// Grace period the door stays released after a successful unlock
    pub const DOOR_GRACE: u32 = 15;

    /// Lockout period after three consecutive failed attempts
    pub const LOCKOUT: u32 = 60;
}
