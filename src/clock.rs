/// Bounds on the tick interval, in milliseconds.
pub const MIN_SPEED_MS: u64 = 50;
pub const MAX_SPEED_MS: u64 = 1000;

/// Restartable periodic scheduler driving playback.
///
/// The clock is a pure state machine over an explicit logical `now_ms`: the
/// host polls it and performs one engine tick per firing. It owns play/pause
/// state and the frame cursor; it knows nothing about frames themselves.
///
/// Speed changes restart the schedule (next firing is one full new interval
/// after the change) instead of adjusting the in-flight period. Frames are
/// stateless snapshots, so a tick-boundary reset costs nothing, and it rules
/// out both drift and a double fire during the swap.
#[derive(Clone, Debug)]
pub struct PlaybackClock {
    running: bool,
    speed_ms: u64,
    cursor: u64,
    next_due_ms: Option<u64>,
}

impl PlaybackClock {
    pub fn new(speed_ms: u64) -> Self {
        Self {
            running: false,
            speed_ms: speed_ms.clamp(MIN_SPEED_MS, MAX_SPEED_MS),
            cursor: 0,
            next_due_ms: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Begin or resume ticking. Idempotent while already running.
    pub fn start(&mut self, now_ms: u64) {
        if self.running {
            return;
        }
        self.running = true;
        self.next_due_ms = Some(now_ms.saturating_add(self.speed_ms));
    }

    /// Stop ticking. The cursor is preserved for resume.
    pub fn pause(&mut self) {
        self.running = false;
        self.next_due_ms = None;
    }

    /// Flip between running and paused; returns the new running state.
    pub fn toggle(&mut self, now_ms: u64) -> bool {
        if self.running {
            self.pause();
        } else {
            self.start(now_ms);
        }
        self.running
    }

    /// Change the tick interval, clamped to `[MIN_SPEED_MS, MAX_SPEED_MS]`.
    ///
    /// While running, the old schedule is discarded and the next tick is due
    /// one full new interval from `now_ms`; nothing fires during the swap.
    pub fn set_speed(&mut self, speed_ms: u64, now_ms: u64) {
        self.speed_ms = speed_ms.clamp(MIN_SPEED_MS, MAX_SPEED_MS);
        if self.running {
            self.next_due_ms = Some(now_ms.saturating_add(self.speed_ms));
        }
    }

    /// Fire at most one tick if its due time has passed.
    ///
    /// A late poll resynchronizes to `now_ms + speed` rather than bursting
    /// through the backlog, so a stalled host catches up one frame at a time.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if !self.running {
            return false;
        }
        match self.next_due_ms {
            Some(due) if now_ms >= due => {
                self.next_due_ms = Some(now_ms.saturating_add(self.speed_ms));
                true
            }
            _ => false,
        }
    }

    /// Return the current cursor and step it forward.
    ///
    /// Called only when a frame was actually applied; an empty trace leaves
    /// the cursor untouched.
    pub fn advance_cursor(&mut self) -> u64 {
        let cursor = self.cursor;
        self.cursor = self.cursor.wrapping_add(1);
        cursor
    }
}
