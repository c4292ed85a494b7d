use crate::engine::countdown::TimerKind;

/// Discrete session notifications, drained by the presentation layer.
///
/// The engine never blocks on a consumer; events queue up inside the session
/// until [`RoundSession::take_events`](crate::RoundSession::take_events) is
/// called.
#[derive(Debug, Clone, Copy, PartialEq, derive_more::IsVariant)]
pub enum RoundEvent {
    /// A round began at the given level (shape not yet visible).
    RoundStarted { level: u32 },
    /// The pre-reveal delay elapsed; the shape is now showing and the
    /// memorize countdown is running.
    ShapeRevealed,
    /// The memorize countdown expired; selections are now accepted.
    RecallStarted,
    /// A countdown crossed a whole-second boundary.
    CountdownTick {
        kind: TimerKind,
        remaining_secs: u32,
    },
    /// The selection reproduced the shape exactly.
    RoundPassed { accuracy: f64, points: u64 },
    /// The selection missed; a life was spent.
    RoundFailed { accuracy: f64, lives_left: u32 },
    /// The last life was spent. Emitted exactly once per session.
    SessionEnded { score: u64, level: u32 },
    /// A new highest level was reached; persist it write-through.
    RecordReached { level: u32 },
}
