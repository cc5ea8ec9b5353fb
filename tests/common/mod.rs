//! Scripted collaborator doubles shared by the integration tests.
//!
//! Each double keeps its state behind `Rc<RefCell<_>>` so the test can
//! hold a handle while the session controller owns the other clone.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use hmi_access::{
    Display, Error, Key, Keypad, LockoutTimer, MatchResult, Presence, RequestCode, Result,
    SerialLink, SessionController,
    constants::{CONTROL_READY, HMI_READY, PIN_TERMINATOR},
};

/// Keypad double fed from a scripted key queue
#[derive(Clone, Default)]
pub struct ScriptedKeypad {
    keys: Rc<RefCell<VecDeque<Key>>>,
}

impl ScriptedKeypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, key: Key) {
        self.keys.borrow_mut().push_back(key);
    }

    pub fn press_digits(&self, digits: &[u8]) {
        for &digit in digits {
            self.press(Key::Digit(digit));
        }
    }

    /// Five digits followed by Enter, one full PIN prompt
    pub fn press_pin(&self, digits: &[u8]) {
        self.press_digits(digits);
        self.press(Key::Enter);
    }
}

impl Keypad for ScriptedKeypad {
    fn read_key(&mut self) -> Result<Key> {
        self.keys.borrow_mut().pop_front().ok_or(Error::InputClosed)
    }
}

/// Link double with a scripted receive queue and a recorded send log
#[derive(Clone, Default)]
pub struct ScriptedLink {
    rx: Rc<RefCell<VecDeque<u8>>>,
    sent: Rc<RefCell<Vec<u8>>>,
}

impl ScriptedLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_byte(&self, byte: u8) {
        self.rx.borrow_mut().push_back(byte);
    }

    /// One Control-ready marker, answering a single rendezvous
    pub fn respond_ready(&self) {
        self.push_byte(CONTROL_READY);
    }

    /// Full response script for a password operation: two rendezvous
    /// answers plus the result byte
    pub fn respond_password_op(&self, result: MatchResult) {
        self.respond_ready();
        self.respond_ready();
        self.push_byte(result.as_u8());
    }

    /// Response script for one presence query
    pub fn respond_presence(&self, presence: Presence) {
        self.respond_ready();
        self.push_byte(presence.as_u8());
    }

    pub fn sent(&self) -> Vec<u8> {
        self.sent.borrow().clone()
    }

    /// Number of exchanges whose opcode was `byte`
    ///
    /// Counts opcode positions only, since PIN payload digits may share
    /// a value with an opcode (e.g. digit 3 vs the open-door command).
    pub fn count_sent(&self, byte: u8) -> usize {
        self.parse_sent().1.iter().filter(|&&b| b == byte).count()
    }

    /// Sent bytes with the rendezvous markers stripped, leaving the
    /// opcode/payload stream
    pub fn sent_without_ready(&self) -> Vec<u8> {
        self.parse_sent().0
    }

    /// Split the raw send log into the opcode/payload stream and the
    /// opcode list
    ///
    /// Walks the log with the exchange structure (rendezvous marker,
    /// opcode, then a known number of terminated PIN payloads) so that
    /// payload digit bytes equal to `HMI_READY` or an opcode are never
    /// misclassified.
    fn parse_sent(&self) -> (Vec<u8>, Vec<u8>) {
        let sent = self.sent.borrow();
        let mut stream = Vec::new();
        let mut opcodes = Vec::new();
        let mut bytes = sent.iter().copied();
        while let Some(byte) = bytes.next() {
            if byte == HMI_READY {
                continue;
            }
            stream.push(byte);
            opcodes.push(byte);
            let payloads = if byte == RequestCode::SaveAndConfirm.as_u8() {
                2
            } else if byte == RequestCode::CheckPassword.as_u8() {
                1
            } else {
                0
            };
            for _ in 0..payloads {
                for payload_byte in bytes.by_ref() {
                    stream.push(payload_byte);
                    if payload_byte == PIN_TERMINATOR {
                        break;
                    }
                }
            }
        }
        (stream, opcodes)
    }
}

impl SerialLink for ScriptedLink {
    fn send_byte(&mut self, byte: u8) -> Result<()> {
        self.sent.borrow_mut().push(byte);
        Ok(())
    }

    fn recv_byte(&mut self) -> Result<u8> {
        self.rx
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| Error::Link("receive script exhausted".into()))
    }
}

/// Display double recording everything written to it
#[derive(Clone, Default)]
pub struct RecordingDisplay {
    texts: Rc<RefCell<Vec<String>>>,
    chars: Rc<RefCell<Vec<char>>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the given text was ever written
    pub fn saw(&self, text: &str) -> bool {
        self.texts.borrow().iter().any(|line| line == text)
    }

    /// Number of single characters echoed since the last reset
    pub fn echoed_chars(&self) -> Vec<char> {
        self.chars.borrow().clone()
    }
}

impl Display for RecordingDisplay {
    fn clear(&mut self) {}

    fn move_cursor(&mut self, _row: u8, _col: u8) {}

    fn write_at(&mut self, _row: u8, _col: u8, text: &str) {
        self.texts.borrow_mut().push(text.to_owned());
    }

    fn put_char(&mut self, ch: char) {
        self.chars.borrow_mut().push(ch);
    }
}

/// A controller wired to scripted doubles, with the test-side handles
pub struct Harness {
    pub link: ScriptedLink,
    pub keypad: ScriptedKeypad,
    pub display: RecordingDisplay,
    pub timer: LockoutTimer,
    pub session: SessionController<ScriptedLink, ScriptedKeypad, RecordingDisplay>,
}

impl Harness {
    pub fn new() -> Self {
        let link = ScriptedLink::new();
        let keypad = ScriptedKeypad::new();
        let display = RecordingDisplay::new();
        let timer = LockoutTimer::new();
        let session = SessionController::new(
            link.clone(),
            keypad.clone(),
            display.clone(),
            timer.clone(),
        );
        Self {
            link,
            keypad,
            display,
            timer,
            session,
        }
    }

    /// Script and run a successful first-time password setup, leaving
    /// the session at the main menu
    pub fn complete_setup(&mut self, pin: &[u8]) {
        self.keypad.press_pin(pin);
        self.keypad.press_pin(pin);
        self.link.respond_password_op(MatchResult::Matched);
        let phase = self.session.step().expect("setup step failed");
        assert_eq!(phase, hmi_access::Phase::MainMenu);
    }

    pub fn tick_n(&self, ticks: u32) {
        for _ in 0..ticks {
            self.timer.tick();
        }
    }
}
