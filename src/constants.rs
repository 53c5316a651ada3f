//! Configuration constants for the Encore trivia engine
//!
//! This module contains the scoring parameters, round timings, and corpus
//! diversity quotas used throughout the engine. Generators consult the
//! quotas to decide whether an archetype can be built without guessable
//! or duplicate options.

/// Scoring formula parameters
pub mod scoring {
    /// Points awarded for a correct answer before any bonus
    pub const BASE_POINTS: u64 = 100;
    /// Extra points per full second left on the countdown
    pub const TIME_BONUS_PER_SECOND: u64 = 10;
    /// Multiplier growth per consecutive correct answer
    pub const STREAK_RATE: f64 = 0.25;
    /// Ceiling on the streak multiplier
    pub const STREAK_CAP: f64 = 2.0;
}

/// Round and reveal timings
pub mod timing {
    /// Seconds to answer a multiple-choice question
    pub const CHOICE_ROUND_SECONDS: u64 = 15;
    /// Seconds to arrange a timeline ordering question
    pub const ORDER_ROUND_SECONDS: u64 = 25;
    /// Seconds the correct answer stays on screen before advancing
    pub const REVEAL_DELAY_SECONDS: u64 = 2;
    /// Countdown resolution
    pub const TICK_SECONDS: u64 = 1;
    /// Minimum configurable round duration in seconds
    pub const MIN_ROUND_SECONDS: u64 = 5;
    /// Maximum configurable round duration in seconds
    pub const MAX_ROUND_SECONDS: u64 = 240;
    /// Minimum configurable reveal delay in seconds
    pub const MIN_REVEAL_SECONDS: u64 = 1;
    /// Maximum configurable reveal delay in seconds
    pub const MAX_REVEAL_SECONDS: u64 = 10;
}

/// Question shape constants
pub mod question {
    /// Options presented per multiple-choice question
    pub const OPTION_COUNT: usize = 4;
    /// Wrong options accompanying the single correct one
    pub const WRONG_OPTION_COUNT: usize = 3;
    /// Events sampled into one timeline ordering question
    pub const TIMELINE_PICK_COUNT: usize = 4;
    /// Questions per round when the configuration does not say otherwise
    pub const DEFAULT_QUESTIONS_PER_MODE: usize = 10;
    /// Maximum questions a single mode may be asked to produce
    pub const MAX_QUESTIONS_PER_MODE: usize = 50;
}

/// Corpus diversity quotas per mode and archetype
///
/// Each archetype independently checks its quota and contributes zero
/// questions when the catalog slice is too uniform to build four options
/// that cannot be guessed by elimination.
pub mod corpus {
    /// Won awards required before the Awards mode produces anything
    pub const MIN_WON_AWARDS: usize = 4;
    /// Distinct ceremonies required for ceremony-of-win questions
    pub const MIN_DISTINCT_CEREMONIES: usize = 4;
    /// Distinct win years required for year-of-win questions
    pub const MIN_DISTINCT_YEARS: usize = 4;
    /// Qualifying tracks (preview audio or feature vector) for Audio DNA
    pub const MIN_QUALIFYING_TRACKS: usize = 8;
    /// Distinct albums required for Audio DNA distractors
    pub const MIN_DISTINCT_ALBUMS: usize = 4;
    /// Timeline events required before ordering questions are produced
    pub const MIN_TIMELINE_EVENTS: usize = 5;
    /// Concert records required before the World Tour mode produces anything
    pub const MIN_CONCERTS: usize = 8;
    /// Distinct tours required for tour-identification questions
    pub const MIN_DISTINCT_TOURS: usize = 4;
    /// Distinct countries required for country-identification questions
    pub const MIN_DISTINCT_COUNTRIES: usize = 4;
}

/// Capacity distractor magnitude steps
pub mod capacity {
    /// Granularity the correct capacity is rounded to
    pub const ROUND_TO: u32 = 1_000;
    /// Step above one million seats
    pub const STEP_ABOVE_MILLION: u32 = 100_000;
    /// Step above one hundred thousand seats
    pub const STEP_ABOVE_HUNDRED_K: u32 = 10_000;
    /// Step for everything smaller
    pub const STEP_DEFAULT: u32 = 5_000;
}
