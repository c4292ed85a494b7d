//! Round and session logic for the memorization game.
//!
//! The parts fit together like this:
//!
//! - [`ShapeGenerator`] - random connected polyomino growth on the grid
//! - [`DifficultyPolicy`] - level-indexed shape size and countdown curves
//! - [`TimerController`] - tick-driven memorize/recall countdowns with
//!   pause snapshots
//! - [`RoundSession`] - the phase state machine that owns all of the above
//!   and emits [`RoundEvent`]s for the presentation layer
//!
//! # Round Flow
//!
//! 1. `start_round` generates a shape sized for the current level and enters
//!    `Memorizing` (after a short pre-reveal delay)
//! 2. The memorize countdown expires and the session flips to `Recalling`
//! 3. The player toggles cells and submits, or the recall countdown expires
//!    and submits whatever is selected
//! 4. The selection is scored; a perfect reproduction advances the level,
//!    anything else costs a life
//! 5. At zero lives the session ends; a new one can retry from the level the
//!    player died on
//!
//! # Example
//!
//! ```
//! use afterimage_engine::{RoundSession, SessionConfig};
//!
//! let mut session = RoundSession::new(SessionConfig::default());
//! session.start_round();
//!
//! // Drive the session once per logical tick.
//! session.tick();
//!
//! for event in session.take_events() {
//!     println!("{event:?}");
//! }
//! ```

pub use self::{countdown::*, event::*, policy::*, scoring::*, session::*, shape::*};

mod countdown;
mod event;
mod policy;
mod scoring;
mod session;
mod shape;
