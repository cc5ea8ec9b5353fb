/*!
Wire-level types shared with the Control node.

Every value on the link is a single byte. Raw PIN digits occupy 0-9 and
appear only inside payload positions, where the terminator is the one
byte allowed to follow them; every other code is read in a position
where a digit cannot appear, which is what keeps the digit range free
for payloads.
*/

/// Request codes transmitted by the HMI node
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestCode {
    /// Actuate the door release
    OpenDoor = 0x03,
    /// Store a new password after comparing it with its confirmation
    SaveAndConfirm = 0x05,
    /// Compare a candidate password against the stored one
    CheckPassword = 0x06,
    /// Sound the intrusion alarm
    AlarmTrigger = 0x55,
}

impl RequestCode {
    /// Convert a u8 value to a RequestCode
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x03 => Some(RequestCode::OpenDoor),
            0x05 => Some(RequestCode::SaveAndConfirm),
            0x06 => Some(RequestCode::CheckPassword),
            0x55 => Some(RequestCode::AlarmTrigger),
            _ => None,
        }
    }

    /// Get the u8 value of this RequestCode
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

/// Result byte returned for password operations
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// Passwords did not match
    Unmatched = 0,
    /// Passwords matched
    Matched = 1,
}

impl MatchResult {
    /// Convert a u8 value to a MatchResult
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(MatchResult::Unmatched),
            1 => Some(MatchResult::Matched),
            _ => None,
        }
    }

    /// Get the u8 value of this MatchResult
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}

/// Presence byte returned while the door is released
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Nobody in the doorway
    NotDetected = 0,
    /// People detected in the doorway
    Detected = 1,
}

impl Presence {
    /// Convert a u8 value to a Presence code
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Presence::NotDetected),
            1 => Some(Presence::Detected),
            _ => None,
        }
    }

    /// Get the u8 value of this Presence code
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }
}
