//! Question types and per-mode generators
//!
//! This module defines the shared question shapes (multiple-choice options,
//! timeline orderings) and hosts one submodule per game mode. Each
//! generator is a pure function from a catalog slice to a bounded list of
//! questions; randomness is invoked freshly on every call so replayed modes
//! never show identical rounds.

use std::{fmt::Display, str::FromStr};

use enum_map::Enum;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay, skip_serializing_none};
use uuid::Uuid;

use crate::{
    Localized,
    catalog::{EventId, TimelineEvent},
    constants::question::WRONG_OPTION_COUNT,
    distractor,
};

pub mod audio_dna;
pub mod awards;
pub mod timeline;
pub mod world_tour;

pub use audio_dna::generate_audio_dna_questions;
pub use awards::generate_award_questions;
pub use timeline::generate_timeline_questions;
pub use world_tour::generate_world_tour_questions;

/// The four game modes a session can play
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Enum,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum GameMode {
    /// Award ceremonies, categories, and win years
    #[display("awards")]
    Awards,
    /// Matching tracks to their albums by ear or by name
    #[display("audio-dna")]
    AudioDna,
    /// Arranging career events chronologically
    #[display("timeline")]
    Timeline,
    /// Tour and concert statistics
    #[display("world-tour")]
    WorldTour,
}

/// A unique identifier for a presented answer option
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, DeserializeFromStr, SerializeDisplay,
)]
pub struct OptionId(Uuid);

impl OptionId {
    /// Creates a new random option identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for OptionId {
    /// Creates a new random option identifier (same as `new()`)
    fn default() -> Self {
        Self::new()
    }
}

impl Display for OptionId {
    /// Formats the id as a UUID string
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for OptionId {
    type Err = uuid::Error;

    /// Parses an option id from a UUID string
    ///
    /// # Errors
    ///
    /// Returns a `uuid::Error` if the string is not a valid UUID.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// One selectable answer option
///
/// Within a question no two options may render an identical label in either
/// language; [`ChoiceQuestion::assemble`] enforces this before a question is
/// ever emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Identifier the UI echoes back on selection
    pub id: OptionId,
    /// Bilingual display label
    pub label: Localized,
    /// Canonical value compared against the correct answer
    pub value: String,
}

/// A four-option multiple-choice question
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceQuestion {
    /// Bilingual prompt text
    pub prompt: Localized,
    /// Canonical value of the correct option
    pub correct_answer: String,
    /// The presented options in display order
    pub options: Vec<QuestionOption>,
    /// Playable preview clip, only set by Audio DNA preview questions
    pub preview_url: Option<String>,
}

impl ChoiceQuestion {
    /// Assembles a question from the correct answer and its distractors
    ///
    /// Returns `None` when fewer than the required number of wrong options
    /// were supplied or when any two labels would render identically in
    /// either language; the calling generator treats that as "skip this
    /// question". The assembled options are shuffled so the correct answer
    /// holds no fixed position.
    pub(crate) fn assemble(
        prompt: Localized,
        correct: (Localized, String),
        wrongs: Vec<(Localized, String)>,
        preview_url: Option<String>,
    ) -> Option<Self> {
        if wrongs.len() < WRONG_OPTION_COUNT {
            return None;
        }

        let correct_answer = correct.1.clone();
        let candidates = std::iter::once(correct).chain(wrongs).collect_vec();

        let en_distinct = candidates.iter().map(|(label, _)| &label.en).all_unique();
        let ko_distinct = candidates.iter().map(|(label, _)| &label.ko).all_unique();
        if !en_distinct || !ko_distinct {
            return None;
        }
        if candidates
            .iter()
            .filter(|(_, value)| *value == correct_answer)
            .count()
            != 1
        {
            return None;
        }

        let options = distractor::shuffle(&candidates)
            .into_iter()
            .map(|(label, value)| QuestionOption {
                id: OptionId::new(),
                label,
                value,
            })
            .collect_vec();

        Some(Self {
            prompt,
            correct_answer,
            options,
            preview_url,
        })
    }

    /// Whether the given canonical value is the correct answer
    pub fn is_correct(&self, value: &str) -> bool {
        self.correct_answer == value
    }
}

/// A timeline ordering question
///
/// Carries the four sampled events in their presented (shuffled) order and
/// the ground-truth chronological order of their ids. Grading happens in the
/// shell, position by position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineQuestion {
    /// Bilingual prompt text
    pub prompt: Localized,
    /// The events in presented order, deliberately not chronological
    pub events: Vec<TimelineEvent>,
    /// Event ids sorted ascending by date
    pub correct_order: Vec<EventId>,
}

impl TimelineQuestion {
    /// Grades an arrangement position by position, all or nothing
    pub fn is_correct_order(&self, arrangement: &[EventId]) -> bool {
        arrangement == self.correct_order.as_slice()
    }
}

/// A generated question, tagged by the mode that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GameQuestion {
    /// Awards mode multiple-choice question
    Awards(ChoiceQuestion),
    /// Audio DNA track-to-album question
    AudioDna(ChoiceQuestion),
    /// Timeline ordering question
    Timeline(TimelineQuestion),
    /// World Tour statistics question
    WorldTour(ChoiceQuestion),
}

impl GameQuestion {
    /// The mode this question belongs to
    pub fn mode(&self) -> GameMode {
        match self {
            Self::Awards(_) => GameMode::Awards,
            Self::AudioDna(_) => GameMode::AudioDna,
            Self::Timeline(_) => GameMode::Timeline,
            Self::WorldTour(_) => GameMode::WorldTour,
        }
    }

    /// The multiple-choice payload, when the question has one
    pub fn as_choice(&self) -> Option<&ChoiceQuestion> {
        match self {
            Self::Awards(choice) | Self::AudioDna(choice) | Self::WorldTour(choice) => {
                Some(choice)
            }
            Self::Timeline(_) => None,
        }
    }

    /// The timeline payload, when the question is an ordering round
    pub fn as_timeline(&self) -> Option<&TimelineQuestion> {
        match self {
            Self::Timeline(timeline) => Some(timeline),
            _ => None,
        }
    }
}
