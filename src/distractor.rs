//! Wrong-answer generation utilities
//!
//! This module contains the generic helpers the question generators use to
//! build plausible distractors: unbiased shuffling, random sampling, and
//! numeric distractor generators that avoid producing options whose
//! displayed labels collide with each other or with the correct answer.
//!
//! None of these helpers error. Insufficient source diversity simply yields
//! fewer results, which the calling generator treats as "skip this
//! question".

use itertools::Itertools;

use crate::constants::capacity;

/// Returns a uniformly shuffled copy of the input
///
/// The caller's slice is left untouched; `fastrand::shuffle` performs an
/// unbiased Fisher-Yates permutation on the fresh vector.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    let mut shuffled = items.to_vec();
    fastrand::shuffle(&mut shuffled);
    shuffled
}

/// Picks up to `n` elements uniformly at random
///
/// When `n` exceeds the input length every element is returned (shuffled);
/// this never errors.
pub fn pick_random<T: Clone>(items: &[T], n: usize) -> Vec<T> {
    let mut shuffled = shuffle(items);
    shuffled.truncate(n);
    shuffled
}

/// Samples `count` values from `pool` that differ from `correct`
///
/// Duplicates in the pool are collapsed first so a value can appear at most
/// once. Callers should verify the pool holds at least `count + 1` distinct
/// values, or tolerate receiving fewer.
pub fn wrong_options<T: Clone + PartialEq>(correct: &T, pool: &[T], count: usize) -> Vec<T> {
    let mut distinct: Vec<T> = Vec::with_capacity(pool.len());
    for value in pool.iter().filter(|value| *value != correct) {
        if !distinct.contains(value) {
            distinct.push(value.clone());
        }
    }

    pick_random(&distinct, count)
}

/// Generates `count` wrong numbers near `correct`
///
/// Candidates are taken at the fixed offsets ±1..=5 around the correct
/// value, discarding anything below `min` or equal to the correct value.
pub fn wrong_numbers(correct: i64, count: usize, min: i64) -> Vec<i64> {
    let candidates = (1..=5i64)
        .flat_map(|offset| [correct - offset, correct + offset])
        .filter(|candidate| *candidate >= min && *candidate != correct)
        .unique()
        .collect_vec();

    pick_random(&candidates, count)
}

/// Formats a venue capacity the way the game renders it
///
/// Millions render with one decimal ("1.3M"), thousands as a whole "NK",
/// and anything smaller as the plain number. Distractor generation dedupes
/// by this exact rendering, so the UI must use it unchanged.
pub fn format_capacity(value: u32) -> String {
    if value >= 1_000_000 {
        // half-up to a tenth of a million; `{:.1}` would round ties to even
        let tenths = (value + 50_000) / 100_000;
        format!("{}.{}M", tenths / 10, tenths % 10)
    } else if value >= 1_000 {
        format!("{}K", (value + 500) / 1_000)
    } else {
        value.to_string()
    }
}

/// Magnitude-scaled step between capacity distractor candidates
fn capacity_step(correct: u32) -> u32 {
    if correct > 1_000_000 {
        capacity::STEP_ABOVE_MILLION
    } else if correct > 100_000 {
        capacity::STEP_ABOVE_HUNDRED_K
    } else {
        capacity::STEP_DEFAULT
    }
}

/// Generates `count` wrong capacities whose labels cannot collide
///
/// The correct value is rounded to the nearest thousand, then candidates
/// are laid out at a magnitude-scaled step on both sides. Candidates are
/// deduplicated by their [`format_capacity`] label, and any candidate that
/// formats identically to the correct value is discarded, so the four
/// displayed options are always visually distinct.
pub fn wrong_capacities(correct: u32, count: usize) -> Vec<u32> {
    let rounded =
        (correct + capacity::ROUND_TO / 2) / capacity::ROUND_TO * capacity::ROUND_TO;
    let step = capacity_step(correct);
    let correct_label = format_capacity(correct);

    let candidates = (1..=5u32)
        .flat_map(|k| {
            let delta = k * step;
            [rounded.checked_sub(delta), rounded.checked_add(delta)]
        })
        .flatten()
        .filter(|candidate| *candidate > 0)
        .filter(|candidate| format_capacity(*candidate) != correct_label)
        .unique_by(|candidate| format_capacity(*candidate))
        .collect_vec();

    pick_random(&candidates, count)
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn test_shuffle_returns_same_multiset() {
        let input = vec![3, 1, 4, 1, 5, 9, 2, 6, 5, 3];
        let shuffled = shuffle(&input);

        assert_eq!(shuffled.len(), input.len());
        assert_eq!(
            shuffled.iter().sorted().collect_vec(),
            input.iter().sorted().collect_vec()
        );
    }

    #[test]
    fn test_shuffle_leaves_input_untouched() {
        let input = vec![1, 2, 3];
        let _ = shuffle(&input);
        assert_eq!(input, vec![1, 2, 3]);
    }

    #[test]
    fn test_pick_random_caps_at_length() {
        let input = vec!["a", "b", "c"];
        let picked = pick_random(&input, 10);
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn test_wrong_options_excludes_correct_value() {
        let pool = vec!["MAMA", "MMA", "Golden Disc", "Seoul Music", "MAMA"];
        for _ in 0..50 {
            let wrongs = wrong_options(&"MAMA", &pool, 3);
            assert_eq!(wrongs.len(), 3);
            assert!(!wrongs.contains(&"MAMA"));
            assert_eq!(wrongs.iter().unique().count(), 3);
        }
    }

    #[test]
    fn test_wrong_options_tolerates_small_pool() {
        let pool = vec![2016, 2017];
        let wrongs = wrong_options(&2016, &pool, 3);
        assert_eq!(wrongs, vec![2017]);
    }

    #[test]
    fn test_wrong_numbers_respects_floor_and_correct() {
        for _ in 0..50 {
            let wrongs = wrong_numbers(2, 3, 1);
            assert_eq!(wrongs.len(), 3);
            for wrong in &wrongs {
                assert!(*wrong >= 1);
                assert_ne!(*wrong, 2);
            }
            assert_eq!(wrongs.iter().unique().count(), wrongs.len());
        }
    }

    #[test]
    fn test_format_capacity_three_magnitudes() {
        assert_eq!(format_capacity(500), "500");
        assert_eq!(format_capacity(5_000), "5K");
        assert_eq!(format_capacity(85_000), "85K");
        assert_eq!(format_capacity(1_250_000), "1.3M");
    }

    #[test]
    fn test_format_capacity_rounds_million_ties_up() {
        // exact midpoints must round up, never to the nearest even tenth
        assert_eq!(format_capacity(1_050_000), "1.1M");
        assert_eq!(format_capacity(2_350_000), "2.4M");
        assert_eq!(format_capacity(1_240_000), "1.2M");
        assert_eq!(format_capacity(1_000_000), "1.0M");
    }

    #[test]
    fn test_wrong_capacities_labels_never_collide() {
        for correct in [5_000u32, 85_000, 1_250_000] {
            for _ in 0..20 {
                let wrongs = wrong_capacities(correct, 3);
                assert_eq!(wrongs.len(), 3, "enough distinct labels at {correct}");

                let correct_label = format_capacity(correct);
                let labels = wrongs.iter().map(|w| format_capacity(*w)).collect_vec();
                assert!(!labels.contains(&correct_label));
                assert_eq!(labels.iter().unique().count(), labels.len());
            }
        }
    }

    #[test]
    fn test_wrong_capacities_never_returns_zero() {
        // small capacities would underflow below the step without the guard
        for _ in 0..20 {
            for wrong in wrong_capacities(3_000, 3) {
                assert!(wrong > 0);
            }
        }
    }
}
