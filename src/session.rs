//! Game session: the context object owning the round, scores, ledgers,
//! preferences, and the single pending AI task.
//!
//! Execution is single-threaded and cooperative. AI computation runs
//! synchronously inside [`Session::poll`]; the only suspension points
//! are the scheduled delays that pace AI "thinking" for human
//! perception. A single busy flag refuses human input and undo while an
//! AI move is pending, and a fired task re-validates the round before
//! applying its result.
//!
//! Time is supplied by the collaborator: [`Session::poll`] advances
//! the session clock, scheduled delays are measured from that clock,
//! and the clock never moves backwards. The whole lifecycle can
//! therefore run on a simulated timeline.

use crate::config::{GameMode, PreferenceStore, Preferences};
use crate::history::{AnnotationFeed, GameRecord};
use crate::round::{Move, Outcome, Round, RoundStatus};
use crate::rules;
use crate::strategy::{Difficulty, Strategy};
use crate::types::{Board, Mark};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Delay before the AI replies to a human move.
const AI_REPLY_DELAY: Duration = Duration::from_millis(500);
/// Delay before the AI opens a round when it holds X.
const AI_OPENING_DELAY: Duration = Duration::from_millis(450);
/// Delay between moves in AI-vs-AI mode.
const AUTO_PLAY_DELAY: Duration = Duration::from_millis(800);
/// Delay before an AI-vs-AI round restarts after ending.
const AUTO_RESTART_DELAY: Duration = Duration::from_secs(3);

/// Status category for the collaborator to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Active round, human to move.
    YourTurn,
    /// Active round, AI to move or computing.
    AiThinking,
    /// The human's mark won.
    YouWon,
    /// The AI's mark won.
    AiWon,
    /// Round ended in a draw.
    Draw,
    /// An AI-vs-AI round was won by the given mark.
    SystemWon(Mark),
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::YourTurn => write!(f, "Your turn!"),
            Status::AiThinking => write!(f, "AI is thinking..."),
            Status::YouWon => write!(f, "You won!"),
            Status::AiWon => write!(f, "AI won!"),
            Status::Draw => write!(f, "It's a draw!"),
            Status::SystemWon(mark) => write!(f, "System ({mark}) won!"),
        }
    }
}

/// Per-session running scores.
///
/// In player-vs-AI mode the slots track the human and the AI; in
/// AI-vs-AI mode System X lands in the player slot and System O in the
/// AI slot. Mode switches do not reset scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    /// Human wins (System X in AI-vs-AI mode).
    pub player: u32,
    /// AI wins (System O in AI-vs-AI mode).
    pub ai: u32,
}

/// What a scheduled task does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TaskKind {
    /// Compute and apply a move for the given mark.
    AiMove(Mark),
    /// Restart the round (AI-vs-AI, after a round ends).
    Restart,
}

/// The single cancellable scheduled task.
///
/// Scheduling a new task replaces (cancels) any pending one, and the
/// generation stamps out tasks that survived a cancellation point.
#[derive(Debug, Clone, Copy)]
struct PendingTask {
    fire_at: Instant,
    generation: u64,
    kind: TaskKind,
}

/// A tic-tac-toe session: one active round plus session-scoped scores,
/// ledgers, and configuration.
///
/// The collaborator feeds inputs in (cell selections, configuration
/// changes, resets, undo), drives time by calling [`Session::poll`],
/// and renders the outputs (board, status, scores, feed) without
/// interpreting them further.
pub struct Session {
    round: Round,
    prefs: Preferences,
    store: Box<dyn PreferenceStore>,
    scores: Scores,
    log: Vec<GameRecord>,
    feed: AnnotationFeed,
    pending: Option<PendingTask>,
    generation: u64,
    thinking: bool,
    now: Instant,
    rng: StdRng,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("round", &self.round)
            .field("prefs", &self.prefs)
            .field("scores", &self.scores)
            .field("thinking", &self.thinking)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a session, loading preferences from the store.
    ///
    /// If the AI holds the opening mark, its first move is scheduled
    /// immediately; drive it with [`Session::poll`].
    pub fn new(store: Box<dyn PreferenceStore>) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    /// Creates a session with an explicit RNG, for deterministic play.
    #[instrument(skip(store, rng))]
    pub fn with_rng(store: Box<dyn PreferenceStore>, rng: StdRng) -> Self {
        let prefs = Preferences::load(store.as_ref());
        info!(?prefs, "Starting session");
        let mut session = Self {
            round: Round::new(),
            prefs,
            store,
            scores: Scores::default(),
            log: Vec::new(),
            feed: AnnotationFeed::new(),
            pending: None,
            generation: 0,
            thinking: false,
            now: Instant::now(),
            rng,
        };
        session.schedule_opener();
        session
    }

    // ─────────────────────────────────────────────────────────────
    //  Inputs
    // ─────────────────────────────────────────────────────────────

    /// Handles the human selecting a cell.
    ///
    /// Valid only in player-vs-AI mode, on the human's turn, while no
    /// AI move is pending. Invalid selections are logged no-ops. On a
    /// continuation the AI's reply is scheduled.
    #[instrument(skip(self))]
    pub fn select_cell(&mut self, index: usize) {
        if self.prefs.mode == GameMode::AiVsAi {
            debug!("Cell selection ignored in AI-vs-AI mode");
            return;
        }
        if self.thinking {
            debug!("Cell selection refused while AI move is pending");
            return;
        }
        if !self.round.is_active() || self.round.current() != self.prefs.human_mark {
            debug!("Cell selection out of turn");
            return;
        }

        let mark = self.round.current();
        match self.round.apply(index) {
            Ok(status) => {
                self.feed.push(Move::new(index, mark).to_string());
                match status {
                    RoundStatus::Active => {
                        self.schedule(TaskKind::AiMove(self.ai_mark()), AI_REPLY_DELAY);
                    }
                    RoundStatus::Ended(outcome) => self.finish_round(outcome),
                }
            }
            Err(error) => debug!(%error, "Rejected human move"),
        }
    }

    /// Undoes the last AI move and the human move before it.
    ///
    /// Refused in AI-vs-AI mode, while an AI move is pending, when the
    /// round has ended, or with fewer than two recorded moves. Returns
    /// whether the undo was applied.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> bool {
        if self.prefs.mode == GameMode::AiVsAi {
            debug!("Undo unavailable in AI-vs-AI mode");
            return false;
        }
        if self.thinking || self.pending.is_some() {
            debug!("Undo refused while a task is pending");
            return false;
        }

        if self.round.undo_pair(self.prefs.human_mark) {
            self.feed.push("Moves undone");
            true
        } else {
            false
        }
    }

    /// Resets the current round, cancelling any pending task.
    #[instrument(skip(self))]
    pub fn reset_round(&mut self) {
        self.reset_round_inner(false);
    }

    /// Clears both scores and the completed-game log.
    #[instrument(skip(self))]
    pub fn reset_scores(&mut self) {
        self.scores = Scores::default();
        self.log.clear();
        self.feed.push("Scores reset");
    }

    /// Applies and persists a theme choice.
    #[instrument(skip(self))]
    pub fn apply_theme(&mut self, theme: &str) {
        self.prefs.theme = theme.to_string();
        self.persist();
    }

    /// Applies and persists an AI difficulty.
    #[instrument(skip(self))]
    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        self.prefs.difficulty = difficulty;
        self.persist();
    }

    /// Applies and persists the human's mark, silently resetting the
    /// round.
    #[instrument(skip(self))]
    pub fn apply_symbol(&mut self, mark: Mark) {
        self.prefs.human_mark = mark;
        self.persist();
        self.reset_round_inner(true);
    }

    /// Applies and persists the game mode, resetting the round.
    #[instrument(skip(self))]
    pub fn apply_mode(&mut self, mode: GameMode) {
        self.prefs.mode = mode;
        self.persist();
        self.reset_round_inner(false);
    }

    /// Fires the pending task if it is due at `now`.
    ///
    /// Advances the session clock to `now` (an instant earlier than
    /// one already observed is ignored). AI computation, including the
    /// full minimax search, runs synchronously to completion here. A
    /// fired task re-validates that the round is still active and its
    /// mark is still to move; anything stale is dropped. Returns
    /// whether a task fired and changed state.
    #[instrument(skip(self))]
    pub fn poll(&mut self, now: Instant) -> bool {
        if now > self.now {
            self.now = now;
        }
        let due = self.now;
        let Some(task) = self.pending.take_if(|t| t.fire_at <= due) else {
            return false;
        };
        self.thinking = false;

        if task.generation != self.generation {
            debug!("Dropped task from a cancelled generation");
            return false;
        }

        match task.kind {
            TaskKind::Restart => {
                self.reset_round_inner(false);
                true
            }
            TaskKind::AiMove(mark) => self.fire_ai_move(mark),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Outputs
    // ─────────────────────────────────────────────────────────────

    /// Returns the board.
    pub fn board(&self) -> &Board {
        self.round.board()
    }

    /// Returns the active round.
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Returns the status category for the collaborator to render.
    pub fn status(&self) -> Status {
        match self.round.status() {
            RoundStatus::Ended(Outcome::Draw) => Status::Draw,
            RoundStatus::Ended(Outcome::Winner(mark)) => match self.prefs.mode {
                GameMode::AiVsAi => Status::SystemWon(mark),
                GameMode::PlayerVsAi => {
                    if mark == self.prefs.human_mark {
                        Status::YouWon
                    } else {
                        Status::AiWon
                    }
                }
            },
            RoundStatus::Active => match self.prefs.mode {
                GameMode::AiVsAi => Status::AiThinking,
                GameMode::PlayerVsAi => {
                    if self.thinking || self.round.current() != self.prefs.human_mark {
                        Status::AiThinking
                    } else {
                        Status::YourTurn
                    }
                }
            },
        }
    }

    /// Returns the running scores.
    pub fn scores(&self) -> Scores {
        self.scores
    }

    /// Returns the winning line's cell indices after a win.
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        match self.round.status() {
            RoundStatus::Ended(Outcome::Winner(_)) => rules::winning_line(self.round.board()),
            _ => None,
        }
    }

    /// Returns the annotation feed (newest first, capped).
    pub fn feed(&self) -> &AnnotationFeed {
        &self.feed
    }

    /// Returns the completed-game log, oldest first.
    pub fn log(&self) -> &[GameRecord] {
        &self.log
    }

    /// Returns the current preferences.
    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// Returns true while an AI move is pending.
    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    /// When the pending task is due, if any. Collaborators can use
    /// this to decide when to call [`Session::poll`] again.
    pub fn next_fire_at(&self) -> Option<Instant> {
        self.pending.as_ref().map(|t| t.fire_at)
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    fn ai_mark(&self) -> Mark {
        self.prefs.human_mark.opponent()
    }

    /// Schedules a task, replacing (cancelling) any pending one. The
    /// delay is measured from the session clock.
    fn schedule(&mut self, kind: TaskKind, delay: Duration) {
        self.generation += 1;
        self.thinking = matches!(kind, TaskKind::AiMove(_));
        self.pending = Some(PendingTask {
            fire_at: self.now + delay,
            generation: self.generation,
            kind,
        });
        debug!(?kind, ?delay, "Scheduled task");
    }

    /// Cancels any pending task and invalidates its generation.
    fn cancel_pending(&mut self) {
        self.pending = None;
        self.thinking = false;
        self.generation += 1;
    }

    /// Computes and applies a scheduled AI move.
    fn fire_ai_move(&mut self, mark: Mark) -> bool {
        if !self.round.is_active() || self.round.current() != mark {
            debug!(%mark, "Dropped stale AI move");
            return false;
        }

        let strategy = match self.prefs.mode {
            // Both marks play minimax regardless of difficulty.
            GameMode::AiVsAi => Strategy::Minimax,
            GameMode::PlayerVsAi => self.prefs.difficulty.roll_strategy(&mut self.rng),
        };

        let Some(index) = strategy.select(self.round.board(), mark, &mut self.rng) else {
            // No move available means a full board; the state machine
            // ends the round on the filling move, so nothing to apply.
            if rules::is_draw(self.round.board()) {
                warn!("Strategy found a full board on an active round");
            }
            return false;
        };

        match self.round.apply(index) {
            Ok(status) => {
                info!(%mark, index, ?strategy, "AI move applied");
                self.feed.push(Move::new(index, mark).to_string());
                match status {
                    RoundStatus::Active => {
                        if self.prefs.mode == GameMode::AiVsAi {
                            self.schedule(TaskKind::AiMove(self.round.current()), AUTO_PLAY_DELAY);
                        }
                    }
                    RoundStatus::Ended(outcome) => self.finish_round(outcome),
                }
                true
            }
            Err(error) => {
                warn!(%error, index, "Scheduled AI move no longer valid");
                false
            }
        }
    }

    /// Records a finished round and schedules follow-up work.
    fn finish_round(&mut self, outcome: Outcome) {
        self.cancel_pending();

        if let Some(mark) = outcome.winner() {
            let player_slot = match self.prefs.mode {
                GameMode::AiVsAi => mark == Mark::X,
                GameMode::PlayerVsAi => mark == self.prefs.human_mark,
            };
            if player_slot {
                self.scores.player += 1;
            } else {
                self.scores.ai += 1;
            }
        }

        self.log
            .push(GameRecord::new(outcome, self.round.history().to_vec()));
        info!(?outcome, games = self.log.len(), "Round finished");

        if self.prefs.mode == GameMode::AiVsAi {
            self.schedule(TaskKind::Restart, AUTO_RESTART_DELAY);
        }
    }

    fn reset_round_inner(&mut self, silent: bool) {
        self.cancel_pending();
        self.round.reset();
        if !silent {
            self.feed.push("Round reset");
        }
        self.schedule_opener();
    }

    /// Schedules the opening AI move when the AI holds X, or the first
    /// System X move in AI-vs-AI mode.
    fn schedule_opener(&mut self) {
        match self.prefs.mode {
            GameMode::AiVsAi => self.schedule(TaskKind::AiMove(Mark::X), AUTO_PLAY_DELAY),
            GameMode::PlayerVsAi => {
                if self.ai_mark() == Mark::X {
                    self.schedule(TaskKind::AiMove(Mark::X), AI_OPENING_DELAY);
                }
            }
        }
    }

    fn persist(&mut self) {
        let prefs = self.prefs.clone();
        prefs.save(self.store.as_mut());
    }
}
