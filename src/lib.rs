//! # Encore Trivia Engine
//!
//! This library provides the core game logic for the Encore fan-trivia
//! mini-game. It turns a static content catalog (albums/tracks, awards,
//! career-timeline events, tour/concert records) into randomized,
//! non-repeating rounds of quiz questions, grades answers, and tracks a
//! multi-round session to completion.
//!
//! Rendering, sound, the underlying content store, and any remote
//! leaderboard are caller concerns; this crate only exposes the question
//! generators, the scoring engine, the session state machine, the countdown
//! timer, and the shell that glues them together.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod constants;
pub mod distractor;
pub mod question;
pub mod scoring;
pub mod session;
pub mod shell;
pub mod timer;

/// A piece of display text carried in both supported languages
///
/// Prompts and option labels are shown in English or Korean depending on
/// the viewer's locale. Proper nouns (album titles, tour names) and numbers
/// usually render identically in both, which [`Localized::same`] covers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Localized {
    /// English rendition
    pub en: String,
    /// Korean rendition
    pub ko: String,
}

impl Localized {
    /// Creates localized text with distinct renditions per language
    pub fn new(en: impl Into<String>, ko: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            ko: ko.into(),
        }
    }

    /// Creates localized text that renders identically in both languages
    ///
    /// Used for proper nouns and formatted numbers.
    pub fn same(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            en: text.clone(),
            ko: text,
        }
    }
}
