/*!
Collaborator interfaces for the keypad and the character display.

These are the thin, branch-free hardware surfaces the session machine
drives. The keypad maps raw scan codes to [`Key`] values in its driver;
anything outside that set never reaches the controller.
*/

use crate::error::Result;

/// A key the session machine reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A digit key, 0-9
    Digit(u8),
    /// The confirmation key
    Enter,
    /// Main-menu selector for the open-door flow
    Plus,
    /// Main-menu selector for the change-password flow
    Minus,
}

/// Blocking keypad input
pub trait Keypad {
    /// Block until the user presses a key
    fn read_key(&mut self) -> Result<Key>;
}

/// Two-row character display
///
/// Mirrors the LCD surface the firmware drives: clear, position the
/// cursor, write text at a position, echo a single glyph at the cursor.
/// Display writes are fire-and-forget; a display cannot fail in a way
/// the session machine could act on.
pub trait Display {
    /// Blank the whole screen
    fn clear(&mut self);

    /// Move the cursor to a row/column position
    fn move_cursor(&mut self, row: u8, col: u8);

    /// Write a string starting at a row/column position
    fn write_at(&mut self, row: u8, col: u8, text: &str);

    /// Write one character at the current cursor position
    fn put_char(&mut self, ch: char);
}
