//! Content catalog record types
//!
//! This module defines the read-only records the engine consumes: awards,
//! albums with their tracks, career-timeline events, and tour/concert
//! entries. The records are fetched once per session by the caller and
//! passed in by reference; the engine never mutates or persists them.

use std::{fmt::Display, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay, skip_serializing_none};
use uuid::Uuid;

use crate::Localized;

/// Outcome of an award nomination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AwardResult {
    /// The nomination converted into a win
    Won,
    /// Nominated but not awarded
    Nominated,
}

/// A single award nomination or win
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Award {
    /// Name of the awarded work or the artist
    pub title: String,
    /// Ceremony that handed out the award (e.g. "MAMA", "Golden Disc")
    pub ceremony: String,
    /// Category within the ceremony
    pub category: String,
    /// Year the ceremony took place
    pub year: i32,
    /// Whether the nomination was won
    pub result: AwardResult,
}

/// Numeric audio attributes of a track
///
/// All values except `tempo` are normalized to the 0..=1 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    /// Suitability for dancing
    pub danceability: f64,
    /// Perceptual intensity
    pub energy: f64,
    /// Musical positiveness
    pub valence: f64,
    /// Estimated tempo in BPM
    pub tempo: f64,
    /// Confidence the track is acoustic
    pub acousticness: f64,
}

/// A track within an album
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Track title
    pub title: String,
    /// Position within the album, 1-based
    pub number: u32,
    /// Audio attribute vector, when the analysis pipeline produced one
    pub features: Option<AudioFeatures>,
    /// Reference to a playable preview clip, when licensing allows one
    pub preview_url: Option<String>,
    /// Title of the album this track belongs to
    pub album_title: String,
}

impl Track {
    /// Whether the track can appear in an Audio DNA question at all
    ///
    /// Tracks with neither a preview clip nor an audio-feature vector give
    /// the player nothing to reason from and are skipped entirely.
    pub fn qualifies_for_audio_dna(&self) -> bool {
        self.preview_url.is_some() || self.features.is_some()
    }
}

/// An album and its tracks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    /// Album title
    pub title: String,
    /// Tracks in album order
    pub tracks: Vec<Track>,
}

/// A unique identifier for a career-timeline event
///
/// Ids come from the content store and are treated as opaque here; the
/// timeline generator only compares them for equality when grading.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, DeserializeFromStr, SerializeDisplay,
)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random event identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    /// Creates a new random event identifier (same as `new()`)
    fn default() -> Self {
        Self::new()
    }
}

impl Display for EventId {
    /// Formats the id as a UUID string
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for EventId {
    type Err = uuid::Error;

    /// Parses an event id from a UUID string
    ///
    /// # Errors
    ///
    /// Returns a `uuid::Error` if the string is not a valid UUID.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// A dated entry on the career timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineEvent {
    /// Opaque identifier from the content store
    pub id: EventId,
    /// Bilingual event title
    pub title: Localized,
    /// Calendar date of the event
    pub date: NaiveDate,
}

/// A single concert within a tour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Concert {
    /// Tour the show belongs to
    pub tour: String,
    /// Venue name
    pub venue: String,
    /// City of the venue
    pub city: String,
    /// Country of the venue
    pub country: String,
    /// Calendar date of the show
    pub date: NaiveDate,
    /// Venue latitude
    pub lat: f64,
    /// Venue longitude
    pub lng: f64,
    /// Whether the show sold out
    pub sold_out: bool,
    /// Venue capacity in seats
    pub capacity: u32,
}

/// The full content catalog handed to the engine at session start
///
/// Holds the four read-only collections the question generators draw from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    /// Award nominations and wins
    pub awards: Vec<Award>,
    /// Albums with nested tracks
    pub albums: Vec<Album>,
    /// Career-timeline events
    pub events: Vec<TimelineEvent>,
    /// Tour/concert records
    pub concerts: Vec<Concert>,
}

impl Catalog {
    /// Iterates over every track across all albums
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.albums.iter().flat_map(|album| album.tracks.iter())
    }
}
