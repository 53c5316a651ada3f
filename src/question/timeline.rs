//! Timeline mode question generation
//!
//! Ordering rounds: four career events are sampled per question, their true
//! chronological order recorded as ground truth, and the events presented
//! in a deliberately non-chronological order. Grading is done by the shell,
//! position by position against [`TimelineQuestion::correct_order`].
//!
//! [`TimelineQuestion::correct_order`]: crate::question::TimelineQuestion::correct_order

use itertools::Itertools;

use crate::{
    Localized,
    catalog::TimelineEvent,
    constants::{corpus, question::TIMELINE_PICK_COUNT},
    distractor,
    question::{GameQuestion, TimelineQuestion},
};

/// Attempts to reshuffle an already-chronological presentation
const RESHUFFLE_ATTEMPTS: usize = 16;

/// Generates up to `desired` timeline ordering questions
///
/// Requires at least [`corpus::MIN_TIMELINE_EVENTS`] events in the corpus.
/// Each question samples independently, so the same event may appear in
/// more than one question of a round.
pub fn generate_timeline_questions(events: &[TimelineEvent], desired: usize) -> Vec<GameQuestion> {
    if events.len() < corpus::MIN_TIMELINE_EVENTS {
        return Vec::new();
    }

    (0..desired)
        .filter_map(|_| ordering_question(events))
        .collect_vec()
}

/// Builds one ordering question from an independent 4-event sample
fn ordering_question(events: &[TimelineEvent]) -> Option<GameQuestion> {
    let picked = distractor::pick_random(events, TIMELINE_PICK_COUNT);
    if picked.len() < TIMELINE_PICK_COUNT {
        return None;
    }

    let correct_order = picked
        .iter()
        .sorted_by_key(|event| event.date)
        .map(|event| event.id)
        .collect_vec();

    // present the events out of order; give up on pathological samples
    // where every permutation reads as chronological (duplicate dates)
    let mut presented = distractor::shuffle(&picked);
    let mut attempts = 0;
    while presented.iter().map(|event| event.id).collect_vec() == correct_order {
        if attempts >= RESHUFFLE_ATTEMPTS {
            return None;
        }
        presented = distractor::shuffle(&picked);
        attempts += 1;
    }

    Some(GameQuestion::Timeline(TimelineQuestion {
        prompt: Localized::new(
            "Arrange these moments in chronological order",
            "다음 사건들을 시간 순서대로 배열하세요",
        ),
        events: presented,
        correct_order,
    }))
}
