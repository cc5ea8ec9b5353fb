/*!
Reusable countdown driven by a 1 Hz tick source.

The device owns exactly one hardware timer, configured once at startup
to interrupt every second. [`LockoutTimer`] multiplexes that single
resource between the alarm lockout and the post-unlock door wait: at
most one arming exists at a time, and re-arming replaces whatever was
armed before.

Ticks arrive from interrupt context while the foreground flow arms and
disarms, so the arming state lives behind a mutex that both sides treat
as the critical section. The callback is held as a [`Weak`] trait
object; the timer never keeps the session controller alive, and a
callback whose target has been dropped is silently skipped.
*/

use std::sync::{Arc, Mutex, MutexGuard, Weak};

/// Target invoked when an armed countdown elapses
///
/// The callback runs in tick (interrupt) context and must not block.
/// In this crate the only implementation raises a flag the foreground
/// loop polls; the actual phase transition happens in the foreground.
pub trait TimerCallback: Send + Sync {
    /// The armed duration has fully elapsed
    fn timer_elapsed(&self);
}

/// A single arming: target duration, progress, callback
struct Arming {
    target: u32,
    elapsed: u32,
    callback: Option<Weak<dyn TimerCallback>>,
}

/// The shared countdown timer
///
/// Cloning yields another handle onto the same underlying arming, so
/// the foreground controller and the tick source each hold one.
#[derive(Clone)]
pub struct LockoutTimer {
    inner: Arc<Mutex<Arming>>,
}

impl LockoutTimer {
    /// Create a disarmed timer
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Arming {
                target: 0,
                elapsed: 0,
                callback: None,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Arming> {
        // A poisoned lock only means a callback panicked mid-tick; the
        // arming fields themselves are always valid.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Arm the countdown
    ///
    /// Replaces any previous arming and restarts the elapsed count from
    /// zero. The callback is stored weakly: dropping its target turns a
    /// later expiry into a no-op.
    pub fn arm(&self, duration_ticks: u32, callback: Weak<dyn TimerCallback>) {
        let mut arming = self.lock();
        arming.target = duration_ticks;
        arming.elapsed = 0;
        arming.callback = Some(callback);
    }

    /// Drop the stored callback so pending ticks become no-ops
    ///
    /// The underlying tick source keeps running; only dispatch is gated.
    pub fn disarm(&self) {
        let mut arming = self.lock();
        arming.elapsed = 0;
        arming.callback = None;
    }

    /// Whether a callback is currently armed
    pub fn is_armed(&self) -> bool {
        self.lock().callback.is_some()
    }

    /// Deliver one elapsed second
    ///
    /// Called by the periodic interrupt (or a test harness). When the
    /// armed duration is reached the elapsed count resets and the
    /// callback fires exactly once, outside the critical section so it
    /// may re-arm or disarm without deadlocking. The arming itself
    /// stays in place: an unattended callback fires again after
    /// another full duration.
    pub fn tick(&self) {
        let expired = {
            let mut arming = self.lock();
            if arming.callback.is_some() && arming.target > 0 {
                arming.elapsed += 1;
                if arming.elapsed >= arming.target {
                    arming.elapsed = 0;
                    arming.callback.clone()
                } else {
                    None
                }
            } else {
                None
            }
        };

        if let Some(callback) = expired.and_then(|weak| weak.upgrade()) {
            callback.timer_elapsed();
        }
    }
}

impl Default for LockoutTimer {
    fn default() -> Self {
        Self::new()
    }
}
