/// Which countdown a timer drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum TimerKind {
    #[display("memorize")]
    Memorize,
    #[display("recall")]
    Recall,
}

/// Timer notifications produced by [`TimerController::tick`].
///
/// Within a single tick, `Tick` always precedes `Expired` for the same
/// countdown, and `Expired` fires exactly once per countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum TimerEvent {
    /// A whole-second boundary was reached (including the one at zero).
    Tick {
        kind: TimerKind,
        remaining_secs: u32,
    },
    /// The countdown reached zero and is now inert.
    Expired { kind: TimerKind },
}

/// Remaining time captured when a countdown is paused.
///
/// Consumed exactly once by [`TimerController::resume`]; reading it via
/// [`TimerController::snapshot`] does not consume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSnapshot {
    kind: TimerKind,
    remaining_ticks: u64,
}

impl TimerSnapshot {
    #[must_use]
    pub const fn kind(&self) -> TimerKind {
        self.kind
    }

    /// Whether the countdown had already reached zero when captured.
    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.remaining_ticks == 0
    }

    /// Remaining whole seconds, rounded up.
    #[must_use]
    #[expect(clippy::cast_possible_truncation)]
    pub const fn remaining_secs(&self, ticks_per_sec: u64) -> u32 {
        self.remaining_ticks.div_ceil(ticks_per_sec) as u32
    }
}

#[derive(Debug, Clone)]
struct Countdown {
    kind: TimerKind,
    remaining_ticks: u64,
}

/// Drives the memorize and recall countdowns on a shared tick.
///
/// Durations are stored as tick counts at a fixed ticks-per-second
/// resolution, so pausing and resuming preserves remaining time exactly.
/// Starting a countdown of a kind implicitly cancels any prior countdown of
/// that kind, which is what rules out double expiries.
#[derive(Debug, Clone)]
pub struct TimerController {
    ticks_per_sec: u64,
    slots: [Option<Countdown>; 2],
}

const fn slot_index(kind: TimerKind) -> usize {
    match kind {
        TimerKind::Memorize => 0,
        TimerKind::Recall => 1,
    }
}

impl TimerController {
    #[must_use]
    pub const fn new(ticks_per_sec: u64) -> Self {
        let ticks_per_sec = if ticks_per_sec == 0 { 1 } else { ticks_per_sec };
        Self {
            ticks_per_sec,
            slots: [None, None],
        }
    }

    #[must_use]
    pub const fn ticks_per_sec(&self) -> u64 {
        self.ticks_per_sec
    }

    /// Arms a countdown, replacing any prior countdown of the same kind.
    ///
    /// A zero duration is legal: the next tick reports `Tick(0)` followed by
    /// `Expired`, it is never silently skipped.
    pub fn start(&mut self, kind: TimerKind, duration_secs: u32) {
        self.slots[slot_index(kind)] = Some(Countdown {
            kind,
            remaining_ticks: u64::from(duration_secs) * self.ticks_per_sec,
        });
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.slots[slot_index(kind)] = None;
    }

    #[must_use]
    pub fn is_active(&self, kind: TimerKind) -> bool {
        self.slots[slot_index(kind)].is_some()
    }

    /// Remaining whole seconds (rounded up) of an active countdown.
    #[must_use]
    pub fn remaining_secs(&self, kind: TimerKind) -> Option<u32> {
        self.slots[slot_index(kind)].as_ref().map(|countdown| {
            TimerSnapshot {
                kind,
                remaining_ticks: countdown.remaining_ticks,
            }
            .remaining_secs(self.ticks_per_sec)
        })
    }

    /// Advances all active countdowns by one tick.
    pub fn tick(&mut self) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        for slot in &mut self.slots {
            let Some(countdown) = slot.as_mut() else {
                continue;
            };
            countdown.remaining_ticks = countdown.remaining_ticks.saturating_sub(1);
            if countdown.remaining_ticks.is_multiple_of(self.ticks_per_sec) {
                #[expect(clippy::cast_possible_truncation)]
                let remaining_secs = (countdown.remaining_ticks / self.ticks_per_sec) as u32;
                events.push(TimerEvent::Tick {
                    kind: countdown.kind,
                    remaining_secs,
                });
            }
            if countdown.remaining_ticks == 0 {
                events.push(TimerEvent::Expired {
                    kind: countdown.kind,
                });
                *slot = None;
            }
        }
        events
    }

    /// Non-consuming view of the active countdown, if any.
    #[must_use]
    pub fn snapshot(&self) -> Option<TimerSnapshot> {
        self.slots
            .iter()
            .flatten()
            .map(|countdown| TimerSnapshot {
                kind: countdown.kind,
                remaining_ticks: countdown.remaining_ticks,
            })
            .next()
    }

    /// Atomically stops the active countdown and captures its snapshot.
    pub fn pause(&mut self) -> Option<TimerSnapshot> {
        let snapshot = self.snapshot()?;
        self.cancel(snapshot.kind);
        Some(snapshot)
    }

    /// Re-arms a paused countdown with its exact remaining time.
    ///
    /// If the snapshot was captured at zero remaining, the deferred expiry
    /// is reported immediately instead of restarting a zero-length timer.
    pub fn resume(&mut self, snapshot: TimerSnapshot) -> Vec<TimerEvent> {
        if snapshot.is_expired() {
            return vec![
                TimerEvent::Tick {
                    kind: snapshot.kind,
                    remaining_secs: 0,
                },
                TimerEvent::Expired {
                    kind: snapshot.kind,
                },
            ];
        }
        self.slots[slot_index(snapshot.kind)] = Some(Countdown {
            kind: snapshot.kind,
            remaining_ticks: snapshot.remaining_ticks,
        });
        Vec::new()
    }
}
