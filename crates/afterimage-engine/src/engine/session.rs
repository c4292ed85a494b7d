use std::mem;

use rand::Rng as _;

use crate::{
    core::{Cell, CellSet, Grid},
    engine::{
        countdown::{TimerController, TimerEvent, TimerKind, TimerSnapshot},
        event::RoundEvent,
        policy::DifficultyPolicy,
        scoring::{self, RoundScore},
        shape::{Shape, ShapeGenerator, ShapeSeed},
    },
};

/// Lives a fresh session starts with.
pub const STARTING_LIVES: u32 = 3;

/// Cosmetic delay between round start and the shape appearing.
const PRE_REVEAL_DELAY_MILLIS: u64 = 500;

/// How a resolved round went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum RoundOutcome {
    Passed,
    Failed,
}

/// The stage a round is currently in.
///
/// Pausing is an orthogonal flag on the session, not a phase: it freezes
/// timers and inputs while preserving whichever phase is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Phase {
    /// Between rounds; waiting for `start_round`.
    Idle,
    /// The shape is (or is about to be) showing.
    Memorizing,
    /// The shape is hidden; the player reproduces it.
    Recalling,
    /// The round resolved; waiting for the feedback popup to be dismissed.
    Feedback(RoundOutcome),
    /// No lives left. Terminal for the session, not the process.
    GameOver,
}

/// Session configuration handed in by the embedding program.
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub grid: Grid,
    pub policy: DifficultyPolicy,
    /// Logical ticks per wall-clock second the session will be driven at.
    pub ticks_per_sec: u64,
    /// Persisted high-water mark loaded at session start.
    pub highest_level: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            grid: Grid::DEFAULT,
            policy: DifficultyPolicy::default(),
            ticks_per_sec: 10,
            highest_level: 0,
        }
    }
}

/// The round state machine and single owner of all session state.
///
/// Driven from one logical timeline: the embedding program calls [`tick`]
/// once per tick interval and forwards player inputs between ticks. Every
/// transition is synchronous; inputs that are illegal from the current phase
/// (or while paused) are ignored rather than failing.
///
/// [`tick`]: RoundSession::tick
#[derive(Debug, Clone)]
pub struct RoundSession {
    grid: Grid,
    policy: DifficultyPolicy,
    generator: ShapeGenerator,
    timers: TimerController,
    phase: Phase,
    paused: bool,
    pause_snapshot: Option<TimerSnapshot>,
    level: u32,
    score: u64,
    lives: u32,
    highest_level: u32,
    level_when_last_died: u32,
    current_shape: Option<Shape>,
    selections: CellSet,
    reveal_delay_ticks: u64,
    last_score: Option<RoundScore>,
    events: Vec<RoundEvent>,
}

impl RoundSession {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self::with_seed(config, rand::rng().random())
    }

    /// Creates a session with a fixed shape seed for reproducible rounds.
    #[must_use]
    pub fn with_seed(config: SessionConfig, seed: ShapeSeed) -> Self {
        Self {
            grid: config.grid,
            policy: config.policy,
            generator: ShapeGenerator::with_seed(config.grid, seed),
            timers: TimerController::new(config.ticks_per_sec),
            phase: Phase::Idle,
            paused: false,
            pause_snapshot: None,
            level: 1,
            score: 0,
            lives: STARTING_LIVES,
            highest_level: config.highest_level,
            level_when_last_died: 1,
            current_shape: None,
            selections: CellSet::new(),
            reveal_delay_ticks: 0,
            last_score: None,
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub fn lives(&self) -> u32 {
        self.lives
    }

    #[must_use]
    pub fn highest_level(&self) -> u32 {
        self.highest_level
    }

    #[must_use]
    pub fn level_when_last_died(&self) -> u32 {
        self.level_when_last_died
    }

    #[must_use]
    pub fn current_shape(&self) -> Option<&Shape> {
        self.current_shape.as_ref()
    }

    #[must_use]
    pub fn selections(&self) -> &CellSet {
        &self.selections
    }

    /// Score of the most recently resolved round, kept through feedback.
    #[must_use]
    pub fn last_score(&self) -> Option<RoundScore> {
        self.last_score
    }

    /// Whether the target shape should currently be drawn.
    #[must_use]
    pub fn is_shape_visible(&self) -> bool {
        self.phase.is_memorizing() && self.reveal_delay_ticks == 0
    }

    /// Remaining whole seconds of the active countdown, also valid while
    /// paused (read from the pause snapshot).
    #[must_use]
    pub fn remaining_secs(&self) -> Option<u32> {
        if let Some(snapshot) = &self.pause_snapshot {
            return Some(snapshot.remaining_secs(self.timers.ticks_per_sec()));
        }
        self.timers
            .remaining_secs(TimerKind::Memorize)
            .or_else(|| self.timers.remaining_secs(TimerKind::Recall))
    }

    /// Drains the queued notifications for the presentation layer.
    pub fn take_events(&mut self) -> Vec<RoundEvent> {
        mem::take(&mut self.events)
    }

    /// Starts the next round. No-op unless idle and unpaused.
    pub fn start_round(&mut self) {
        if !self.phase.is_idle() || self.paused {
            return;
        }
        self.touch_record();
        let size = self.policy.shape_size(self.level, self.grid.capacity());
        self.current_shape = Some(self.generator.generate(size));
        self.selections.clear();
        self.last_score = None;
        self.reveal_delay_ticks =
            self.timers.ticks_per_sec() * PRE_REVEAL_DELAY_MILLIS / 1000;
        self.phase = Phase::Memorizing;
        self.events.push(RoundEvent::RoundStarted { level: self.level });
        if self.reveal_delay_ticks == 0 {
            self.reveal_shape();
        }
    }

    /// Advances the session by one logical tick. Frozen while paused.
    pub fn tick(&mut self) {
        if self.paused {
            return;
        }
        if self.reveal_delay_ticks > 0 {
            self.reveal_delay_ticks -= 1;
            if self.reveal_delay_ticks == 0 {
                self.reveal_shape();
            }
            return;
        }
        for event in self.timers.tick() {
            self.apply_timer_event(event);
        }
    }

    /// Flips membership of a cell in the player's selection.
    ///
    /// Selections are only mutable during recall while unpaused; anything
    /// else is ignored, as is a cell outside the grid.
    pub fn toggle_cell(&mut self, cell: Cell) {
        if !self.phase.is_recalling() || self.paused || !self.grid.contains(cell) {
            return;
        }
        self.selections.toggle(cell);
    }

    /// Submits the current selection for scoring.
    ///
    /// The engine accepts an empty selection (the recall timer submits
    /// whatever exists); keeping the submit button disabled while nothing is
    /// selected is the presentation layer's concern.
    pub fn submit(&mut self) {
        if !self.phase.is_recalling() || self.paused {
            return;
        }
        self.resolve_round();
    }

    /// Freezes timers and inputs. No-op outside memorize/recall.
    pub fn pause(&mut self) {
        if self.paused || !(self.phase.is_memorizing() || self.phase.is_recalling()) {
            return;
        }
        self.paused = true;
        self.pause_snapshot = self.timers.pause();
    }

    /// Unfreezes the session, restarting the paused countdown with its exact
    /// remaining time, or performing the deferred expiry if the countdown
    /// had already hit zero when paused.
    pub fn resume(&mut self) {
        if !self.paused {
            return;
        }
        self.paused = false;
        if let Some(snapshot) = self.pause_snapshot.take() {
            for event in self.timers.resume(snapshot) {
                self.apply_timer_event(event);
            }
        }
    }

    /// Dismisses the feedback popup and returns to idle for the next round.
    pub fn acknowledge_feedback(&mut self) {
        if !matches!(self.phase, Phase::Feedback(_)) {
            return;
        }
        self.finish_round();
    }

    /// Restarts after game over at the level the player died on.
    pub fn retry_level(&mut self) {
        if !self.phase.is_game_over() {
            return;
        }
        self.restart_at(self.level_when_last_died);
    }

    /// Restarts after game over from level 1.
    pub fn new_game(&mut self) {
        if !self.phase.is_game_over() {
            return;
        }
        self.restart_at(1);
    }

    fn reveal_shape(&mut self) {
        self.events.push(RoundEvent::ShapeRevealed);
        self.timers
            .start(TimerKind::Memorize, self.policy.memorize_secs(self.level));
    }

    fn apply_timer_event(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::Tick {
                kind,
                remaining_secs,
            } => {
                self.events.push(RoundEvent::CountdownTick {
                    kind,
                    remaining_secs,
                });
            }
            TimerEvent::Expired { kind } => self.apply_expiry(kind),
        }
    }

    fn apply_expiry(&mut self, kind: TimerKind) {
        match (kind, self.phase) {
            (TimerKind::Memorize, Phase::Memorizing) => self.enter_recall(),
            // Auto-submit whatever is selected, empty included.
            (TimerKind::Recall, Phase::Recalling) => self.resolve_round(),
            // Stale expiry from a phase that already ended.
            _ => {}
        }
    }

    fn enter_recall(&mut self) {
        self.phase = Phase::Recalling;
        self.timers
            .start(TimerKind::Recall, self.policy.recall_secs(self.level));
        self.events.push(RoundEvent::RecallStarted);
    }

    fn resolve_round(&mut self) {
        self.timers.cancel(TimerKind::Recall);
        let Some(shape) = &self.current_shape else {
            return;
        };
        let score = scoring::evaluate(self.level, shape.cells(), &self.selections);
        self.last_score = Some(score);
        if score.passed {
            self.score += score.points;
            self.level += 1;
            self.touch_record();
            self.phase = Phase::Feedback(RoundOutcome::Passed);
            self.events.push(RoundEvent::RoundPassed {
                accuracy: score.accuracy,
                points: score.points,
            });
        } else {
            self.lives = self.lives.saturating_sub(1);
            self.events.push(RoundEvent::RoundFailed {
                accuracy: score.accuracy,
                lives_left: self.lives,
            });
            if self.lives == 0 {
                self.level_when_last_died = self.level;
                self.phase = Phase::GameOver;
                self.events.push(RoundEvent::SessionEnded {
                    score: self.score,
                    level: self.level,
                });
            } else {
                self.phase = Phase::Feedback(RoundOutcome::Failed);
            }
        }
    }

    fn finish_round(&mut self) {
        self.current_shape = None;
        self.selections.clear();
        self.phase = Phase::Idle;
    }

    fn restart_at(&mut self, level: u32) {
        self.lives = STARTING_LIVES;
        self.level = level.max(1);
        self.score = 0;
        self.current_shape = None;
        self.selections.clear();
        self.last_score = None;
        self.paused = false;
        self.pause_snapshot = None;
        self.reveal_delay_ticks = 0;
        self.phase = Phase::Idle;
    }

    fn touch_record(&mut self) {
        if self.level > self.highest_level {
            self.highest_level = self.level;
            self.events
                .push(RoundEvent::RecordReached { level: self.level });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // One tick per second keeps the arithmetic in tests direct; it also
    // makes the pre-reveal delay round down to zero ticks.
    fn session() -> RoundSession {
        session_with_config(SessionConfig {
            ticks_per_sec: 1,
            ..SessionConfig::default()
        })
    }

    fn session_with_config(config: SessionConfig) -> RoundSession {
        let seed = serde_json::from_str("\"00112233445566778899aabbccddeeff\"").unwrap();
        RoundSession::with_seed(config, seed)
    }

    fn enter_recall(session: &mut RoundSession) {
        session.start_round();
        assert!(session.phase().is_memorizing());
        let memorize = session.remaining_secs().unwrap();
        for _ in 0..memorize {
            session.tick();
        }
        assert!(session.phase().is_recalling());
    }

    fn select_target(session: &mut RoundSession) {
        let cells: Vec<Cell> = session.current_shape().unwrap().iter().collect();
        for cell in cells {
            session.toggle_cell(cell);
        }
    }

    fn pass_round(session: &mut RoundSession) {
        enter_recall(session);
        select_target(session);
        session.submit();
        assert_eq!(session.phase(), Phase::Feedback(RoundOutcome::Passed));
        session.acknowledge_feedback();
    }

    fn fail_round(session: &mut RoundSession) {
        enter_recall(session);
        session.submit();
        if matches!(session.phase(), Phase::Feedback(RoundOutcome::Failed)) {
            session.acknowledge_feedback();
        }
    }

    #[test]
    fn test_round_start_generates_shape_and_memorize_countdown() {
        let mut session = session();
        session.start_round();

        assert!(session.phase().is_memorizing());
        assert!(session.is_shape_visible());
        let shape = session.current_shape().unwrap();
        assert_eq!(shape.size(), 3);
        assert!(shape.cells().is_connected());
        assert_eq!(session.remaining_secs(), Some(5));

        let events = session.take_events();
        assert!(events.contains(&RoundEvent::RoundStarted { level: 1 }));
        assert!(events.contains(&RoundEvent::ShapeRevealed));
    }

    #[test]
    fn test_memorize_expiry_enters_recall() {
        let mut session = session();
        enter_recall(&mut session);
        assert!(!session.is_shape_visible());
        assert_eq!(session.remaining_secs(), Some(10));
        assert!(session.take_events().contains(&RoundEvent::RecallStarted));
    }

    #[test]
    fn test_perfect_recall_passes_and_advances_level() {
        let mut session = session();
        enter_recall(&mut session);
        select_target(&mut session);
        session.submit();

        assert_eq!(session.phase(), Phase::Feedback(RoundOutcome::Passed));
        assert_eq!(session.score(), 100);
        assert_eq!(session.level(), 2);
        assert_eq!(session.lives(), STARTING_LIVES);
        let score = session.last_score().unwrap();
        assert!(score.passed);
        assert!((score.accuracy - 1.0).abs() < f64::EPSILON);

        session.acknowledge_feedback();
        assert!(session.phase().is_idle());
        assert!(session.current_shape().is_none());
        assert!(session.selections().is_empty());
    }

    #[test]
    fn test_level_three_pass_awards_three_hundred_points() {
        let mut session = session();
        pass_round(&mut session);
        pass_round(&mut session);
        let score_before = session.score();
        assert_eq!(session.level(), 3);

        pass_round(&mut session);
        assert_eq!(session.level(), 4);
        assert_eq!(session.score(), score_before + 300);
    }

    #[test]
    fn test_failed_round_costs_a_life_and_keeps_level() {
        let mut session = session();
        enter_recall(&mut session);
        session.submit();

        assert_eq!(session.phase(), Phase::Feedback(RoundOutcome::Failed));
        assert_eq!(session.lives(), STARTING_LIVES - 1);
        assert_eq!(session.level(), 1);
        assert_eq!(session.score(), 0);

        session.acknowledge_feedback();
        assert!(session.phase().is_idle());
    }

    #[test]
    fn test_last_life_ends_the_session_exactly_once() {
        let mut session = session();
        pass_round(&mut session);
        fail_round(&mut session);
        fail_round(&mut session);
        assert_eq!(session.lives(), 1);
        let _ = session.take_events();

        fail_round(&mut session);
        assert!(session.phase().is_game_over());
        assert_eq!(session.lives(), 0);
        assert_eq!(session.level_when_last_died(), 2);

        let events = session.take_events();
        let ended: Vec<_> = events
            .iter()
            .filter(|event| event.is_session_ended())
            .collect();
        assert_eq!(
            ended,
            vec![&RoundEvent::SessionEnded {
                score: 100,
                level: 2
            }]
        );
    }

    #[test]
    fn test_recall_expiry_auto_submits_partial_selection() {
        let mut session = session();
        enter_recall(&mut session);
        // Select two of the three target cells.
        let cells: Vec<Cell> = session
            .current_shape()
            .unwrap()
            .iter()
            .take(2)
            .collect();
        for cell in cells {
            session.toggle_cell(cell);
        }
        let recall = session.remaining_secs().unwrap();
        for _ in 0..recall {
            session.tick();
        }

        assert_eq!(session.phase(), Phase::Feedback(RoundOutcome::Failed));
        let score = session.last_score().unwrap();
        assert!((score.accuracy - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_pause_resume_round_trip_preserves_phase_and_time() {
        let mut session = session();
        session.start_round();
        session.tick();
        session.tick();
        let remaining = session.remaining_secs();
        assert_eq!(remaining, Some(3));

        session.pause();
        assert!(session.is_paused());
        assert_eq!(session.remaining_secs(), remaining);
        // Ticks are frozen while paused.
        session.tick();
        session.tick();
        assert_eq!(session.remaining_secs(), remaining);
        assert!(session.phase().is_memorizing());

        session.resume();
        assert!(!session.is_paused());
        assert_eq!(session.remaining_secs(), remaining);
        assert!(session.phase().is_memorizing());
    }

    #[test]
    fn test_selections_are_frozen_while_paused() {
        let mut session = session();
        enter_recall(&mut session);
        session.pause();
        let cell = session.current_shape().unwrap().iter().next().unwrap();
        session.toggle_cell(cell);
        assert!(session.selections().is_empty());
        session.submit();
        assert!(session.phase().is_recalling());
    }

    #[test]
    fn test_retry_resumes_at_death_level_with_fresh_lives() {
        let mut session = session();
        pass_round(&mut session);
        pass_round(&mut session);
        fail_round(&mut session);
        fail_round(&mut session);
        fail_round(&mut session);
        assert!(session.phase().is_game_over());
        assert_eq!(session.level_when_last_died(), 3);

        session.retry_level();
        assert!(session.phase().is_idle());
        assert_eq!(session.level(), 3);
        assert_eq!(session.lives(), STARTING_LIVES);
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_new_game_restarts_from_level_one() {
        let mut session = session();
        pass_round(&mut session);
        fail_round(&mut session);
        fail_round(&mut session);
        fail_round(&mut session);
        assert!(session.phase().is_game_over());

        session.new_game();
        assert!(session.phase().is_idle());
        assert_eq!(session.level(), 1);
        assert_eq!(session.lives(), STARTING_LIVES);
    }

    #[test]
    fn test_record_is_emitted_once_when_exceeding_stored_value() {
        let mut session = session_with_config(SessionConfig {
            ticks_per_sec: 1,
            highest_level: 2,
            ..SessionConfig::default()
        });

        // Levels 1 and 2 do not beat the stored record.
        pass_round(&mut session);
        assert!(
            session
                .take_events()
                .iter()
                .all(|event| !event.is_record_reached())
        );

        // Passing level 2 reaches level 3: one record event, persisted value 3.
        pass_round(&mut session);
        let records: Vec<_> = session
            .take_events()
            .into_iter()
            .filter(RoundEvent::is_record_reached)
            .collect();
        assert_eq!(records, vec![RoundEvent::RecordReached { level: 3 }]);
        assert_eq!(session.highest_level(), 3);

        // Starting the next round does not re-emit it.
        session.start_round();
        assert!(
            session
                .take_events()
                .iter()
                .all(|event| !event.is_record_reached())
        );
    }

    #[test]
    fn test_fresh_profile_records_level_one_on_first_round() {
        let mut session = session();
        session.start_round();
        assert!(
            session
                .take_events()
                .contains(&RoundEvent::RecordReached { level: 1 })
        );
        assert_eq!(session.highest_level(), 1);
    }

    #[test]
    fn test_illegal_inputs_are_ignored() {
        let mut session = session();
        // Nothing is running yet.
        session.submit();
        session.acknowledge_feedback();
        session.retry_level();
        session.toggle_cell(Cell::new(0, 0));
        assert!(session.phase().is_idle());
        assert!(session.selections().is_empty());

        // Selections are rejected during memorize.
        session.start_round();
        session.toggle_cell(Cell::new(0, 0));
        assert!(session.selections().is_empty());

        // A second start_round mid-round does not regenerate the shape.
        let shape = session.current_shape().unwrap().clone();
        session.start_round();
        assert_eq!(session.current_shape(), Some(&shape));
    }

    #[test]
    fn test_shape_size_grows_with_level() {
        let mut session = session();
        for _ in 0..6 {
            pass_round(&mut session);
        }
        assert_eq!(session.level(), 7);
        session.start_round();
        // Default policy: 3 cells at level 1, +1 every 2 levels.
        assert_eq!(session.current_shape().unwrap().size(), 6);
    }

    #[test]
    fn test_pause_before_reveal_keeps_shape_hidden() {
        let mut session = session_with_config(SessionConfig {
            ticks_per_sec: 4,
            ..SessionConfig::default()
        });
        session.start_round();
        // 500 ms at 4 ticks/sec is two ticks of pre-reveal delay.
        assert!(!session.is_shape_visible());
        session.pause();
        session.tick();
        session.tick();
        session.tick();
        assert!(!session.is_shape_visible());

        session.resume();
        session.tick();
        session.tick();
        assert!(session.is_shape_visible());
    }
}
