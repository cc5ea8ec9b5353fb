/*!
# hmi-access

Interface-side session controller for a two-node physical access-control
device. An HMI node collects PIN input on a keypad and shows status on a
two-row display; a remote Control node, reachable over a single serial
link, owns the stored password, the door actuator and the alarm. The HMI
never authenticates anything itself — every decision comes back over the
link.

## Overview

- [`SessionController`] — the finite-state machine driving the
  interactive workflow: set password, main menu, authenticate, door
  release, lockout
- [`RemoteHandshake`] — the request/response helper that sequences each
  exchange with the Control node over the half-duplex link
- [`LockoutTimer`] — the single shared countdown that throttles repeated
  failures and times the door-open grace period

The crate contains no hardware code. The keypad, the display and the
serial transceiver enter through the [`panel`] and [`link`] traits, so
the whole workflow runs unchanged against scripted doubles in tests.
Timer ticks are delivered by calling [`LockoutTimer::tick`] once per
second, from a hardware interrupt on the device and synthetically in
tests.
*/

// Wire constants and durations
pub mod constants;

// Error handling
pub mod error;

// Protocol helper over the serial link
pub mod handshake;

// Serial transport trait
pub mod link;

// Keypad and display collaborator traits
pub mod panel;

// PIN entry buffer
pub mod pin;

// The session state machine
pub mod session;

// Shared countdown timer
pub mod timer;

// Wire-level enums
pub mod types;

// Re-export commonly used types for convenience
pub use constants::{PIN_LEN, PIN_MASK, ticks};
pub use error::{Error, Result};
pub use handshake::RemoteHandshake;
pub use link::SerialLink;
pub use panel::{Display, Key, Keypad};
pub use pin::PinBuffer;
pub use session::{Intent, Phase, SessionConfig, SessionController};
pub use timer::{LockoutTimer, TimerCallback};
pub use types::{MatchResult, Presence, RequestCode};
