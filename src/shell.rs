//! Game shell orchestrator
//!
//! Wires the catalog, generators, session state, scoring, and countdown
//! together behind two entry points: [`GameShell::receive_message`] for
//! player input and [`GameShell::receive_alarm`] for scheduled timing
//! callbacks. The shell owns no clock; the embedder supplies a
//! `schedule_message` closure and delivers each alarm back when its delay
//! elapses.
//!
//! Every round carries a generation counter. Starting, advancing, or
//! quitting a round bumps the counter, so alarms scheduled for an earlier
//! round arrive with a stale counter and are discarded instead of firing
//! into the wrong question.

use std::time::Duration;

use enum_map::{EnumMap, enum_map};
use garde::Validate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    catalog::{Catalog, EventId},
    constants,
    question::{
        GameMode, GameQuestion, generate_audio_dna_questions, generate_award_questions,
        generate_timeline_questions, generate_world_tour_questions,
    },
    scoring::{GameResult, ScoreStore, calculate_game_result, calculate_points, record_high_score},
    session::{GameAction, GameState, Screen},
    timer::Countdown,
};

type ValidationResult = garde::Result;

/// Validates that a duration falls within a second-resolution range
fn validate_duration<const MIN_SECONDS: u64, const MAX_SECONDS: u64>(
    field: &'static str,
    val: &Duration,
) -> ValidationResult {
    if (MIN_SECONDS..=MAX_SECONDS).contains(&val.as_secs()) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "{field} is outside of the bounds [{MIN_SECONDS},{MAX_SECONDS}]",
        )))
    }
}

/// Validates the answering window for multiple-choice rounds
fn validate_choice_round(val: &Duration) -> ValidationResult {
    validate_duration::<
        { crate::constants::timing::MIN_ROUND_SECONDS },
        { crate::constants::timing::MAX_ROUND_SECONDS },
    >("choice_round", val)
}

/// Validates the answering window for timeline ordering rounds
fn validate_order_round(val: &Duration) -> ValidationResult {
    validate_duration::<
        { crate::constants::timing::MIN_ROUND_SECONDS },
        { crate::constants::timing::MAX_ROUND_SECONDS },
    >("order_round", val)
}

/// Validates how long the correct answer stays on screen
fn validate_reveal_delay(val: &Duration) -> ValidationResult {
    validate_duration::<
        { crate::constants::timing::MIN_REVEAL_SECONDS },
        { crate::constants::timing::MAX_REVEAL_SECONDS },
    >("reveal_delay", val)
}

/// Timing and round-length configuration for a session
#[serde_with::serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ShellConfig {
    /// Answering window for multiple-choice questions
    #[garde(custom(|v, _| validate_choice_round(v)))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub choice_round: Duration,
    /// Answering window for timeline ordering questions
    #[garde(custom(|v, _| validate_order_round(v)))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub order_round: Duration,
    /// How long the reveal stays on screen before advancing
    #[garde(custom(|v, _| validate_reveal_delay(v)))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    pub reveal_delay: Duration,
    /// Questions requested from the generator per round
    #[garde(range(min = 1, max = crate::constants::question::MAX_QUESTIONS_PER_MODE))]
    pub questions_per_mode: usize,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            choice_round: Duration::from_secs(constants::timing::CHOICE_ROUND_SECONDS),
            order_round: Duration::from_secs(constants::timing::ORDER_ROUND_SECONDS),
            reveal_delay: Duration::from_secs(constants::timing::REVEAL_DELAY_SECONDS),
            questions_per_mode: constants::question::DEFAULT_QUESTIONS_PER_MODE,
        }
    }
}

impl ShellConfig {
    /// Per-mode answering windows; ordering questions get the longer one
    fn round_durations(&self) -> EnumMap<GameMode, Duration> {
        enum_map! {
            GameMode::Timeline => self.order_round,
            GameMode::Awards | GameMode::AudioDna | GameMode::WorldTour => self.choice_round,
        }
    }
}

/// Messages scheduled by the shell for delayed delivery
///
/// The embedder delivers each message back through
/// [`GameShell::receive_alarm`] once its delay elapses. Each variant carries
/// the round counter it was scheduled under so stale deliveries can be
/// discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// One-second countdown heartbeat
    Tick {
        /// Round counter at scheduling time
        round: usize,
    },
    /// End of the reveal pause, time to advance
    Reveal {
        /// Round counter at scheduling time
        round: usize,
    },
}

/// Player input accepted by the shell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IncomingMessage {
    /// Start a round in the given mode
    SelectMode(GameMode),
    /// Answer the current multiple-choice question with an option value
    ChoiceAnswer(String),
    /// Answer the current ordering question with an arrangement of event ids
    OrderAnswer(Vec<EventId>),
    /// Abandon the session and return to the menu
    Quit,
}

/// Errors surfaced to the embedder
#[derive(Error, Debug)]
pub enum GameError {
    /// The catalog is too small or too uniform for the requested mode
    #[error("not enough catalog data to play {mode}")]
    InsufficientCatalog {
        /// The mode that could not be generated
        mode: GameMode,
    },
    /// The shell configuration failed validation
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] garde::Report),
}

/// The session orchestrator
///
/// Owns the session state and the countdown, generates questions on mode
/// selection, grades answers, and drives round progression off delivered
/// alarms. Generic over the high-score store so embedders can persist
/// scores wherever they like.
#[derive(Debug)]
pub struct GameShell<S> {
    config: ShellConfig,
    catalog: Catalog,
    store: S,
    today: chrono::NaiveDate,
    durations: EnumMap<GameMode, Duration>,
    state: GameState,
    countdown: Countdown,
    questions: Vec<GameQuestion>,
    round: usize,
    answered: bool,
    result: Option<GameResult>,
}

impl<S: ScoreStore> GameShell<S> {
    /// Creates a shell over a catalog, evaluating tour history against the
    /// current date
    pub fn new(catalog: Catalog, config: ShellConfig, store: S) -> Result<Self, GameError> {
        Self::with_today(catalog, config, store, chrono::Utc::now().date_naive())
    }

    /// Creates a shell with an explicit evaluation date for tour history
    pub fn with_today(
        catalog: Catalog,
        config: ShellConfig,
        store: S,
        today: chrono::NaiveDate,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let durations = config.round_durations();
        Ok(Self {
            config,
            catalog,
            store,
            today,
            durations,
            state: GameState::new(),
            countdown: Countdown::new(),
            questions: Vec::new(),
            round: 0,
            answered: false,
            result: None,
        })
    }

    /// The current session state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The question currently presented, if a round is active
    pub fn current_question(&self) -> Option<&GameQuestion> {
        if self.state.screen == Screen::Playing {
            self.questions.get(self.state.question_index)
        } else {
            None
        }
    }

    /// Seconds left on the countdown
    pub fn time_left(&self) -> u64 {
        self.countdown.time_left()
    }

    /// Result of the most recently finished round
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// The recorded session high score
    pub fn high_score(&self) -> Option<u64> {
        self.store.get()
    }

    /// Handles one player message
    ///
    /// # Arguments
    ///
    /// * `message` - The player input to process
    /// * `schedule_message` - Function to schedule delayed messages for timing
    pub fn receive_message<F: FnMut(AlarmMessage, Duration)>(
        &mut self,
        message: IncomingMessage,
        schedule_message: &mut F,
    ) -> Result<(), GameError> {
        match message {
            IncomingMessage::SelectMode(mode) => {
                if self.state.screen == Screen::Playing {
                    return Ok(());
                }
                let questions = self.generate(mode);
                if questions.is_empty() {
                    return Err(GameError::InsufficientCatalog { mode });
                }
                self.result = None;
                self.state.apply(GameAction::StartMode {
                    mode,
                    total_questions: questions.len(),
                });
                self.questions = questions;
                self.begin_round(schedule_message);
            }
            IncomingMessage::ChoiceAnswer(value) => {
                if !self.accepting_answers() {
                    return Ok(());
                }
                let Some(question) = self.current_question().and_then(GameQuestion::as_choice)
                else {
                    return Ok(());
                };
                let correct = question.is_correct(&value);
                self.grade(correct, schedule_message);
            }
            IncomingMessage::OrderAnswer(arrangement) => {
                if !self.accepting_answers() {
                    return Ok(());
                }
                let Some(question) = self.current_question().and_then(GameQuestion::as_timeline)
                else {
                    return Ok(());
                };
                let correct = question.is_correct_order(&arrangement);
                self.grade(correct, schedule_message);
            }
            IncomingMessage::Quit => {
                self.countdown.reset();
                self.round += 1;
                self.questions.clear();
                self.result = None;
                self.state.apply(GameAction::Reset);
            }
        }
        Ok(())
    }

    /// Handles one delivered alarm
    ///
    /// Alarms whose round counter no longer matches the current round are
    /// leftovers from an abandoned or already-advanced round and are
    /// silently dropped.
    ///
    /// # Arguments
    ///
    /// * `message` - The alarm to process
    /// * `schedule_message` - Function to schedule delayed messages for timing
    pub fn receive_alarm<F: FnMut(AlarmMessage, Duration)>(
        &mut self,
        message: &AlarmMessage,
        schedule_message: &mut F,
    ) {
        match *message {
            AlarmMessage::Tick { round } => {
                if round != self.round {
                    return;
                }
                if self.countdown.tick().is_some() {
                    if !self.answered {
                        self.answered = true;
                        self.state.apply(GameAction::TimeUp);
                    }
                    schedule_message(
                        AlarmMessage::Reveal { round: self.round },
                        self.config.reveal_delay,
                    );
                } else if self.countdown.is_running() {
                    schedule_message(
                        AlarmMessage::Tick { round: self.round },
                        Duration::from_secs(constants::timing::TICK_SECONDS),
                    );
                }
            }
            AlarmMessage::Reveal { round } => {
                if round != self.round {
                    return;
                }
                if self.state.question_index + 1 < self.state.total_questions {
                    self.state.apply(GameAction::NextQuestion);
                    self.begin_round(schedule_message);
                } else {
                    self.state.apply(GameAction::FinishMode);
                    self.countdown.reset();
                    self.round += 1;
                    let result = calculate_game_result(&self.state);
                    record_high_score(&mut self.store, result.total_score);
                    self.result = Some(result);
                }
            }
        }
    }

    /// Whether an answer to the current question would be accepted
    fn accepting_answers(&self) -> bool {
        self.state.screen == Screen::Playing && !self.answered && !self.countdown.is_expired()
    }

    /// Records a graded answer and schedules the reveal
    fn grade<F: FnMut(AlarmMessage, Duration)>(&mut self, correct: bool, schedule_message: &mut F) {
        let points = if correct {
            calculate_points(self.countdown.time_left(), self.state.streak)
        } else {
            0
        };
        self.state.apply(GameAction::AnswerQuestion { correct, points });
        self.answered = true;
        self.countdown.pause();
        schedule_message(
            AlarmMessage::Reveal { round: self.round },
            self.config.reveal_delay,
        );
    }

    /// Arms the countdown for the current question and starts the heartbeat
    fn begin_round<F: FnMut(AlarmMessage, Duration)>(&mut self, schedule_message: &mut F) {
        let seconds = self
            .state
            .mode
            .map_or(self.config.choice_round, |mode| self.durations[mode])
            .as_secs();
        self.round += 1;
        self.answered = false;
        self.countdown.start(seconds);
        schedule_message(
            AlarmMessage::Tick { round: self.round },
            Duration::from_secs(constants::timing::TICK_SECONDS),
        );
    }

    /// Generates the question list for a mode from the catalog
    fn generate(&self, mode: GameMode) -> Vec<GameQuestion> {
        let desired = self.config.questions_per_mode;
        match mode {
            GameMode::Awards => generate_award_questions(&self.catalog.awards, desired),
            GameMode::AudioDna => generate_audio_dna_questions(&self.catalog.albums, desired),
            GameMode::Timeline => generate_timeline_questions(&self.catalog.events, desired),
            GameMode::WorldTour => {
                generate_world_tour_questions(&self.catalog.concerts, self.today, desired)
            }
        }
    }
}
