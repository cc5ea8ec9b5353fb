/*!
Fixed-length PIN entry buffer.

A [`PinBuffer`] collects exactly [`PIN_LEN`] digits for one prompt and
is discarded after the exchange that consumes it. Non-digit input never
reaches the buffer as an error: [`push`](PinBuffer::push) simply
reports whether the value was accepted, matching the keypad filtering
rule of the device.
*/

use crate::constants::PIN_LEN;

/// One prompt's worth of PIN digits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinBuffer {
    digits: [u8; PIN_LEN],
    len: usize,
}

impl PinBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self {
            digits: [0; PIN_LEN],
            len: 0,
        }
    }

    /// Append one digit
    ///
    /// Returns `true` when the value was stored. Values above 9 and
    /// pushes into a full buffer are ignored and return `false`.
    pub fn push(&mut self, digit: u8) -> bool {
        if digit > 9 || self.len == PIN_LEN {
            return false;
        }
        self.digits[self.len] = digit;
        self.len += 1;
        true
    }

    /// Whether all digits of the PIN have been collected
    pub fn is_full(&self) -> bool {
        self.len == PIN_LEN
    }

    /// Number of digits collected so far
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no digit has been collected yet
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The collected digits, in entry order
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.len]
    }
}

impl Default for PinBuffer {
    fn default() -> Self {
        Self::new()
    }
}
