/*!
The interactive session state machine.

[`SessionController`] owns the whole HMI-side workflow: setting the
password, offering the main menu, authenticating against the Control
node, and sequencing the timed door-open and lockout phases. It drives
three collaborators — the serial link, the keypad and the display —
and the shared [`LockoutTimer`].

The controller advances one phase per [`step`](SessionController::step)
call; [`run`](SessionController::run) loops forever, which is the
production shape of the device. Timer expiries never transition phases
directly: the armed callback raises a flag in interrupt context and the
foreground loop performs the transition on its next pass.
*/

use std::sync::{
    Arc, Weak,
    atomic::{AtomicBool, Ordering},
};

use crate::{
    constants::{PIN_MASK, ticks},
    error::Result,
    handshake::RemoteHandshake,
    link::SerialLink,
    panel::{Display, Key, Keypad},
    pin::PinBuffer,
    timer::{LockoutTimer, TimerCallback},
    types::{MatchResult, Presence},
};

/// Which sensitive flow an authentication belongs to
///
/// Each intent carries its own fault counter, so a run of bad attempts
/// on one flow never penalizes the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Authenticate to release the door
    Open,
    /// Authenticate to choose a new password
    ChangePass,
}

/// The phase the session is currently in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Collecting a new password and its confirmation
    SetPassword,
    /// Showing the two menu options, waiting for a selection
    MainMenu,
    /// Collecting a PIN and checking it against the Control node
    Authenticate(Intent),
    /// Door released; a single presence query is still pending
    DoorOpen,
    /// Waiting out the door grace period before returning to the menu
    DoorWait,
    /// Locked out after three failed attempts
    Lockout,
}

/// Countdown durations for the timed phases
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Ticks the door stays released after a successful unlock
    pub door_grace_ticks: u32,
    /// Ticks the session stays locked after three failed attempts
    pub lockout_ticks: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            door_grace_ticks: ticks::DOOR_GRACE,
            lockout_ticks: ticks::LOCKOUT,
        }
    }
}

/// Bounded failed-attempt counter
///
/// Increments once per failure and resets to zero either on success or
/// on reaching the limit, at which point the caller takes the alarm
/// path.
#[derive(Debug, Default)]
struct FaultCounter {
    count: u8,
}

impl FaultCounter {
    const LIMIT: u8 = 3;

    /// Record one failure; returns `true` when the limit is reached
    /// (the counter resets itself for the next cycle)
    fn record_failure(&mut self) -> bool {
        self.count += 1;
        if self.count >= Self::LIMIT {
            self.count = 0;
            true
        } else {
            false
        }
    }

    fn reset(&mut self) {
        self.count = 0;
    }

    fn count(&self) -> u8 {
        self.count
    }
}

/// Timer callback target that requests a return to the main menu
///
/// Both timed phases (lockout and door wait) end the same way, so one
/// flag target serves both armings. The flag is raised in tick context
/// and consumed by the foreground loop.
struct MenuReturn {
    fired: AtomicBool,
}

impl MenuReturn {
    fn new() -> Self {
        Self {
            fired: AtomicBool::new(false),
        }
    }

    fn clear(&self) {
        self.fired.store(false, Ordering::SeqCst);
    }

    fn take(&self) -> bool {
        self.fired.swap(false, Ordering::SeqCst)
    }
}

impl TimerCallback for MenuReturn {
    fn timer_elapsed(&self) {
        self.fired.store(true, Ordering::SeqCst);
    }
}

/// The HMI-side session controller
pub struct SessionController<L: SerialLink, K: Keypad, D: Display> {
    link: L,
    keypad: K,
    display: D,
    timer: LockoutTimer,
    menu_return: Arc<MenuReturn>,
    config: SessionConfig,
    phase: Phase,
    door_faults: FaultCounter,
    pass_faults: FaultCounter,
}

impl<L: SerialLink, K: Keypad, D: Display> SessionController<L, K, D> {
    /// Create a controller with default durations
    ///
    /// The caller keeps a clone of `timer` and delivers ticks to it
    /// from the periodic interrupt. The session starts in
    /// [`Phase::SetPassword`], matching device power-up.
    pub fn new(link: L, keypad: K, display: D, timer: LockoutTimer) -> Self {
        Self::with_config(link, keypad, display, timer, SessionConfig::default())
    }

    /// Create a controller with explicit durations
    pub fn with_config(
        link: L,
        keypad: K,
        display: D,
        timer: LockoutTimer,
        config: SessionConfig,
    ) -> Self {
        Self {
            link,
            keypad,
            display,
            timer,
            menu_return: Arc::new(MenuReturn::new()),
            config,
            phase: Phase::SetPassword,
            door_faults: FaultCounter::default(),
            pass_faults: FaultCounter::default(),
        }
    }

    /// The phase the session is currently in
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current failed-attempt count for one of the flows
    pub fn fault_count(&self, intent: Intent) -> u8 {
        self.faults(intent).count()
    }

    /// Run the device loop
    ///
    /// The machine has no terminal phase; this returns only when a
    /// collaborator fails.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.step()?;
        }
    }

    /// Advance the session by one phase and return the phase entered
    ///
    /// In the timed phases a step that finds the countdown still
    /// running leaves the phase unchanged.
    pub fn step(&mut self) -> Result<Phase> {
        let next = match self.phase {
            Phase::SetPassword => self.set_password()?,
            Phase::MainMenu => self.main_menu()?,
            Phase::Authenticate(intent) => self.authenticate(intent)?,
            Phase::DoorOpen => self.door_open()?,
            Phase::DoorWait | Phase::Lockout => self.await_menu_return(),
        };
        self.phase = next;
        Ok(next)
    }

    fn faults(&self, intent: Intent) -> &FaultCounter {
        match intent {
            Intent::Open => &self.door_faults,
            Intent::ChangePass => &self.pass_faults,
        }
    }

    fn faults_mut(&mut self, intent: Intent) -> &mut FaultCounter {
        match intent {
            Intent::Open => &mut self.door_faults,
            Intent::ChangePass => &mut self.pass_faults,
        }
    }

    /// Collect one masked PIN, then wait for the Enter key
    ///
    /// Non-digit keys during collection are ignored in place; only
    /// accepted digits echo a mask glyph.
    fn collect_pin(&mut self) -> Result<PinBuffer> {
        let mut pin = PinBuffer::new();
        while !pin.is_full() {
            if let Key::Digit(digit) = self.keypad.read_key()? {
                if pin.push(digit) {
                    self.display.put_char(PIN_MASK);
                }
            }
        }
        while self.keypad.read_key()? != Key::Enter {}
        Ok(pin)
    }

    /// Arm the shared timer to request a menu return after `duration`
    fn arm_menu_return(&mut self, duration: u32) {
        self.menu_return.clear();
        let callback: Weak<dyn TimerCallback> =
            Arc::downgrade(&(Arc::clone(&self.menu_return) as Arc<dyn TimerCallback>));
        self.timer.arm(duration, callback);
    }

    fn set_password(&mut self) -> Result<Phase> {
        self.display.clear();
        self.display.write_at(0, 0, "plz enter pass:");
        self.display.move_cursor(1, 0);
        let pin = self.collect_pin()?;

        self.display.clear();
        self.display.write_at(0, 0, "plz re-enter the");
        self.display.write_at(1, 0, "same pass:");
        let confirm = self.collect_pin()?;

        let result = RemoteHandshake::new(&mut self.link).save_and_confirm(&pin, &confirm)?;
        self.display.clear();
        Ok(match result {
            MatchResult::Matched => Phase::MainMenu,
            // Mismatched confirmation restarts setup from scratch and
            // is never counted as a fault.
            MatchResult::Unmatched => Phase::SetPassword,
        })
    }

    fn main_menu(&mut self) -> Result<Phase> {
        self.timer.disarm();
        self.menu_return.clear();
        self.display.clear();
        self.display.write_at(0, 0, "+ : Open Door");
        self.display.write_at(1, 0, "- : Change Pass");

        loop {
            match self.keypad.read_key()? {
                Key::Plus => return Ok(Phase::Authenticate(Intent::Open)),
                Key::Minus => return Ok(Phase::Authenticate(Intent::ChangePass)),
                _ => {}
            }
        }
    }

    fn authenticate(&mut self, intent: Intent) -> Result<Phase> {
        self.display.clear();
        self.display.write_at(0, 0, "enter door pass:");
        self.display.move_cursor(1, 0);
        let pin = self.collect_pin()?;

        let result = RemoteHandshake::new(&mut self.link).check_password(&pin)?;
        match result {
            MatchResult::Matched => {
                self.faults_mut(intent).reset();
                match intent {
                    Intent::Open => self.unlock_door(),
                    Intent::ChangePass => Ok(Phase::SetPassword),
                }
            }
            MatchResult::Unmatched => {
                if self.faults_mut(intent).record_failure() {
                    self.lock_out()
                } else {
                    // Below the limit: same intent, same counter.
                    Ok(Phase::Authenticate(intent))
                }
            }
        }
    }

    fn unlock_door(&mut self) -> Result<Phase> {
        RemoteHandshake::new(&mut self.link).open_door()?;
        self.display.clear();
        self.display.write_at(0, 0, "Door Unlocking");
        self.display.write_at(1, 3, "please wait..");
        self.arm_menu_return(self.config.door_grace_ticks);
        Ok(Phase::DoorOpen)
    }

    fn lock_out(&mut self) -> Result<Phase> {
        RemoteHandshake::new(&mut self.link).trigger_alarm()?;
        self.display.clear();
        self.display.write_at(0, 1, "System locked");
        self.display.write_at(1, 0, "wait for 1 min");
        self.arm_menu_return(self.config.lockout_ticks);
        Ok(Phase::Lockout)
    }

    /// Single presence query layered onto the door-grace countdown
    ///
    /// With nobody in the doorway the original arming simply runs out.
    /// With people present the countdown is parked until the Control
    /// node reports the doorway clear, then restarted for the relock.
    fn door_open(&mut self) -> Result<Phase> {
        let presence = RemoteHandshake::new(&mut self.link).poll_presence()?;
        if presence == Presence::Detected {
            self.timer.disarm();
            self.display.clear();
            self.display.write_at(0, 0, "wait for people");
            self.display.write_at(1, 2, "to enter");
            RemoteHandshake::new(&mut self.link).wait_absence()?;

            self.display.clear();
            self.display.write_at(0, 2, "Door locking");
            self.arm_menu_return(self.config.door_grace_ticks);
        }
        Ok(Phase::DoorWait)
    }

    /// Poll the flag the timer callback raises
    fn await_menu_return(&mut self) -> Phase {
        if self.menu_return.take() {
            Phase::MainMenu
        } else {
            std::hint::spin_loop();
            self.phase
        }
    }
}
