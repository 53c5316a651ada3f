//! Session state machine
//!
//! The single shared mutable resource of the engine: a state struct mutated
//! exclusively through a closed action enum and one exhaustive transition
//! function. Screens run `Menu → Playing → GameOver`; `Reset` returns to
//! the initial state.
//!
//! Mode scores are tracked with an explicit per-mode accumulator that is
//! zeroed on `StartMode` and incremented by each `AnswerQuestion`, so the
//! sum of recorded mode scores always equals the cumulative score at every
//! `FinishMode` boundary.

use serde::{Deserialize, Serialize};

use crate::question::GameMode;

/// The screen the session is currently on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Mode selection menu
    #[default]
    Menu,
    /// A mode is being played
    Playing,
    /// The session has finished; terminal until `Reset`
    GameOver,
}

/// Recorded outcome of one completed mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeResult {
    /// The mode that was played
    pub mode: GameMode,
    /// Points earned within this mode
    pub score: u64,
    /// Correctly answered questions
    pub correct: usize,
    /// Questions presented
    pub total: usize,
    /// Longest streak observed within this mode
    pub best_streak: u32,
}

/// The mutable session state
///
/// Created at session start on the menu screen, mutated only through
/// [`GameState::apply`], and discarded on `Reset` or on navigating away.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Current screen
    pub screen: Screen,
    /// Active mode while playing
    pub mode: Option<GameMode>,
    /// Cumulative score across the whole session
    pub score: u64,
    /// Consecutive correct answers since the last miss or timeout
    pub streak: u32,
    /// Highest streak observed this session
    pub best_streak: u32,
    /// Index of the question currently presented
    pub question_index: usize,
    /// Questions in the active mode
    pub total_questions: usize,
    /// Correct answers in the active mode
    pub correct_count: usize,
    /// Points earned in the active mode so far
    pub mode_score: u64,
    /// Highest streak observed in the active mode
    pub mode_best_streak: u32,
    /// Completed modes in play order
    pub mode_results: Vec<ModeResult>,
}

/// The closed set of actions that can mutate the session
///
/// Adding a variant forces every consumer through the exhaustive match in
/// [`GameState::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Enter `Playing` for a mode; cumulative score is kept
    StartMode {
        /// Mode to play
        mode: GameMode,
        /// Number of questions the round will present
        total_questions: usize,
    },
    /// Record a graded answer and its pre-computed points
    AnswerQuestion {
        /// Whether the answer was correct
        correct: bool,
        /// Points earned (zero for wrong answers)
        points: u64,
    },
    /// Advance to the next question
    NextQuestion,
    /// The countdown ran out without an answer
    TimeUp,
    /// Record the active mode's result and end the session
    FinishMode,
    /// Return to the initial state
    Reset,
}

impl GameState {
    /// Creates the initial state on the menu screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one action to the state
    ///
    /// This is the only mutation path. The match is exhaustive so a new
    /// action cannot be introduced without deciding its transition here.
    pub fn apply(&mut self, action: GameAction) {
        match action {
            GameAction::StartMode {
                mode,
                total_questions,
            } => {
                self.screen = Screen::Playing;
                self.mode = Some(mode);
                self.question_index = 0;
                self.total_questions = total_questions;
                self.correct_count = 0;
                self.streak = 0;
                self.mode_score = 0;
                self.mode_best_streak = 0;
            }
            GameAction::AnswerQuestion { correct, points } => {
                self.score += points;
                self.mode_score += points;
                if correct {
                    self.correct_count += 1;
                    self.streak += 1;
                } else {
                    self.streak = 0;
                }
                self.best_streak = self.best_streak.max(self.streak);
                self.mode_best_streak = self.mode_best_streak.max(self.streak);
            }
            GameAction::NextQuestion => {
                self.question_index += 1;
            }
            GameAction::TimeUp => {
                self.streak = 0;
            }
            GameAction::FinishMode => {
                if let Some(mode) = self.mode.take() {
                    self.mode_results.push(ModeResult {
                        mode,
                        score: self.mode_score,
                        correct: self.correct_count,
                        total: self.total_questions,
                        best_streak: self.mode_best_streak,
                    });
                }
                self.screen = Screen::GameOver;
            }
            GameAction::Reset => {
                *self = Self::default();
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn answer(state: &mut GameState, correct: bool, points: u64) {
        state.apply(GameAction::AnswerQuestion { correct, points });
    }

    #[test]
    fn test_start_mode_keeps_cumulative_score() {
        let mut state = GameState::new();
        state.apply(GameAction::StartMode {
            mode: GameMode::Awards,
            total_questions: 3,
        });
        answer(&mut state, true, 250);
        state.apply(GameAction::FinishMode);

        state.apply(GameAction::StartMode {
            mode: GameMode::Timeline,
            total_questions: 3,
        });
        assert_eq!(state.score, 250);
        assert_eq!(state.mode_score, 0);
        assert_eq!(state.streak, 0);
        assert_eq!(state.correct_count, 0);
        assert_eq!(state.question_index, 0);
    }

    #[test]
    fn test_wrong_answer_always_zeroes_streak() {
        let mut state = GameState::new();
        state.apply(GameAction::StartMode {
            mode: GameMode::Awards,
            total_questions: 5,
        });
        answer(&mut state, true, 100);
        answer(&mut state, true, 125);
        answer(&mut state, true, 150);
        assert_eq!(state.streak, 3);

        answer(&mut state, false, 0);
        assert_eq!(state.streak, 0);
    }

    #[test]
    fn test_best_streak_is_non_decreasing() {
        let mut state = GameState::new();
        state.apply(GameAction::StartMode {
            mode: GameMode::Awards,
            total_questions: 10,
        });

        let mut seen_best = 0;
        let outcomes = [true, true, false, true, true, true, false, true, false, true];
        for correct in outcomes {
            answer(&mut state, correct, u64::from(correct) * 100);
            assert!(state.best_streak >= seen_best);
            seen_best = state.best_streak;
        }
        assert_eq!(state.best_streak, 3);
    }

    #[test]
    fn test_time_up_resets_streak_only() {
        let mut state = GameState::new();
        state.apply(GameAction::StartMode {
            mode: GameMode::WorldTour,
            total_questions: 4,
        });
        answer(&mut state, true, 200);
        answer(&mut state, true, 250);
        let score_before = state.score;

        state.apply(GameAction::TimeUp);
        assert_eq!(state.streak, 0);
        assert_eq!(state.score, score_before);
        assert_eq!(state.correct_count, 2);
    }

    #[test]
    fn test_next_question_only_moves_the_index() {
        let mut state = GameState::new();
        state.apply(GameAction::StartMode {
            mode: GameMode::Timeline,
            total_questions: 4,
        });
        let before = state.clone();

        state.apply(GameAction::NextQuestion);
        assert_eq!(state.question_index, before.question_index + 1);
        assert_eq!(state.score, before.score);
        assert_eq!(state.streak, before.streak);
    }

    #[test]
    fn test_mode_scores_sum_to_cumulative_across_two_modes() {
        let mut state = GameState::new();

        state.apply(GameAction::StartMode {
            mode: GameMode::Awards,
            total_questions: 2,
        });
        answer(&mut state, true, 250);
        state.apply(GameAction::NextQuestion);
        answer(&mut state, true, 310);
        state.apply(GameAction::FinishMode);

        let recorded: u64 = state.mode_results.iter().map(|r| r.score).sum();
        assert_eq!(recorded, state.score);

        state.apply(GameAction::StartMode {
            mode: GameMode::WorldTour,
            total_questions: 2,
        });
        answer(&mut state, false, 0);
        state.apply(GameAction::NextQuestion);
        answer(&mut state, true, 180);
        state.apply(GameAction::FinishMode);

        let recorded: u64 = state.mode_results.iter().map(|r| r.score).sum();
        assert_eq!(recorded, state.score);
        assert_eq!(state.score, 740);
        assert_eq!(state.mode_results.len(), 2);
    }

    #[test]
    fn test_finish_mode_records_mode_best_streak() {
        let mut state = GameState::new();
        state.apply(GameAction::StartMode {
            mode: GameMode::AudioDna,
            total_questions: 3,
        });
        answer(&mut state, true, 100);
        answer(&mut state, true, 125);
        answer(&mut state, false, 0);
        state.apply(GameAction::FinishMode);

        let result = state.mode_results.last().expect("mode recorded");
        assert_eq!(result.best_streak, 2);
        assert_eq!(result.correct, 2);
        assert_eq!(result.total, 3);
        assert_eq!(state.screen, Screen::GameOver);
    }

    #[test]
    fn test_reset_returns_to_initial_state() {
        let mut state = GameState::new();
        state.apply(GameAction::StartMode {
            mode: GameMode::Awards,
            total_questions: 3,
        });
        answer(&mut state, true, 500);
        state.apply(GameAction::Reset);

        assert_eq!(state, GameState::new());
    }
}
