//! Audio DNA mode question generation
//!
//! Track-to-album matching. Tracks with a playable preview are preferred,
//! so the player guesses from what they hear; feature-only tracks fill the
//! remaining slots with the track named outright in the prompt. Wrong
//! answers are other album titles from the catalog.

use itertools::Itertools;

use crate::{
    Localized,
    catalog::{Album, Track},
    constants::{corpus, question::WRONG_OPTION_COUNT},
    distractor,
    question::{ChoiceQuestion, GameQuestion},
};

/// Generates up to `desired` Audio DNA questions
///
/// Requires at least [`corpus::MIN_QUALIFYING_TRACKS`] tracks carrying a
/// preview clip or a feature vector, spread over at least
/// [`corpus::MIN_DISTINCT_ALBUMS`] albums; otherwise returns an empty list.
pub fn generate_audio_dna_questions(albums: &[Album], desired: usize) -> Vec<GameQuestion> {
    let qualifying = albums
        .iter()
        .flat_map(|album| album.tracks.iter())
        .filter(|track| track.qualifies_for_audio_dna())
        .collect_vec();

    let album_titles = albums
        .iter()
        .map(|album| album.title.clone())
        .unique()
        .collect_vec();

    if qualifying.len() < corpus::MIN_QUALIFYING_TRACKS
        || album_titles.len() < corpus::MIN_DISTINCT_ALBUMS
    {
        return Vec::new();
    }

    let (with_preview, feature_only): (Vec<&Track>, Vec<&Track>) = qualifying
        .into_iter()
        .partition(|track| track.preview_url.is_some());

    // preview tracks first, feature-only tracks as filler
    let candidates = distractor::shuffle(&with_preview)
        .into_iter()
        .chain(distractor::shuffle(&feature_only))
        .take(desired)
        .collect_vec();

    let questions = candidates
        .into_iter()
        .filter_map(|track| track_question(track, &album_titles))
        .collect_vec();

    distractor::shuffle(&questions)
}

/// Builds the question for one track, phrased by preview availability
fn track_question(track: &Track, album_titles: &[String]) -> Option<GameQuestion> {
    let wrongs = distractor::wrong_options(&track.album_title, album_titles, WRONG_OPTION_COUNT)
        .into_iter()
        .map(|title| (Localized::same(&title), title))
        .collect_vec();

    let prompt = if track.preview_url.is_some() {
        Localized::new(
            "Listen to the preview: which album is this track from?",
            "미리듣기를 듣고 어느 앨범의 곡인지 맞혀보세요",
        )
    } else {
        Localized::new(
            format!("Which album is \"{}\" from?", track.title),
            format!("\"{}\"은(는) 어느 앨범에 실려 있을까요?", track.title),
        )
    };

    ChoiceQuestion::assemble(
        prompt,
        (
            Localized::same(&track.album_title),
            track.album_title.clone(),
        ),
        wrongs,
        track.preview_url.clone(),
    )
    .map(GameQuestion::AudioDna)
}
