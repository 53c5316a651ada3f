//! Scoring engine
//!
//! Point calculation from remaining time and streak, end-of-session
//! aggregation into accuracy/best-streak/fan-tier, and the high-score
//! storage port. The formula parameters live in [`crate::constants::scoring`].

use serde::{Deserialize, Serialize};

use crate::{
    constants::scoring::{BASE_POINTS, STREAK_CAP, STREAK_RATE, TIME_BONUS_PER_SECOND},
    session::{GameState, ModeResult},
};

/// Calculates the points earned by a correct answer
///
/// `round((BASE + seconds_left × TIME_BONUS) × min(1 + streak × RATE, CAP))`.
/// The shell passes the streak value as it stood before the answer; a wrong
/// answer earns zero points and never reaches this function.
pub fn calculate_points(seconds_left: u64, streak: u32) -> u64 {
    let raw = (BASE_POINTS + seconds_left * TIME_BONUS_PER_SECOND) as f64;
    let multiplier = (1.0 + f64::from(streak) * STREAK_RATE).min(STREAK_CAP);
    (raw * multiplier).round() as u64
}

/// Named fan tier assigned to a total score
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum FanLevel {
    /// Scores below the first threshold
    #[display("New Fan")]
    NewFan,
    /// 1,000 points and up
    #[display("Casual Listener")]
    CasualListener,
    /// 2,500 points and up
    #[display("Dedicated Fan")]
    DedicatedFan,
    /// 5,000 points and up
    #[display("Superfan")]
    Superfan,
    /// 8,000 points and up
    #[display("Ultimate Stan")]
    UltimateStan,
}

/// Ascending threshold table mapping total score to a tier
const TIERS: [(u64, FanLevel); 5] = [
    (0, FanLevel::NewFan),
    (1_000, FanLevel::CasualListener),
    (2_500, FanLevel::DedicatedFan),
    (5_000, FanLevel::Superfan),
    (8_000, FanLevel::UltimateStan),
];

impl FanLevel {
    /// Maps a total score to its tier
    ///
    /// Searches from the highest threshold downward and defaults to the
    /// lowest tier.
    pub fn for_score(score: u64) -> Self {
        TIERS
            .iter()
            .rev()
            .find(|(threshold, _)| score >= *threshold)
            .map_or(FanLevel::NewFan, |(_, level)| *level)
    }
}

/// The derived end-of-session summary
///
/// Computed from the session state at game over; never stored back into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResult {
    /// Cumulative score across all completed modes
    pub total_score: u64,
    /// Tier the total score maps to
    pub fan_level: FanLevel,
    /// Per-mode breakdown in completion order
    pub mode_results: Vec<ModeResult>,
    /// Whole-percent accuracy across all completed modes
    pub accuracy: u8,
    /// Highest streak observed anywhere in the session
    pub best_streak: u32,
    /// When the session finished
    pub completed_at: web_time::SystemTime,
}

/// Aggregates the session state into a [`GameResult`]
///
/// Accuracy is the rounded whole percent of correct answers over all
/// completed mode results (zero when no questions were answered); the best
/// streak takes the maximum of the running session value and every mode's
/// recorded best.
pub fn calculate_game_result(state: &GameState) -> GameResult {
    let (correct, total) = state
        .mode_results
        .iter()
        .fold((0usize, 0usize), |(c, t), result| {
            (c + result.correct, t + result.total)
        });

    let accuracy = if total == 0 {
        0
    } else {
        ((correct as f64 / total as f64) * 100.0).round() as u8
    };

    let best_streak = state
        .mode_results
        .iter()
        .map(|result| result.best_streak)
        .chain(std::iter::once(state.best_streak))
        .max()
        .unwrap_or(0);

    GameResult {
        total_score: state.score,
        fan_level: FanLevel::for_score(state.score),
        mode_results: state.mode_results.clone(),
        accuracy,
        best_streak,
        completed_at: web_time::SystemTime::now(),
    }
}

/// Storage port for the persisted high score
///
/// The engine never touches client-local storage directly; embedders
/// provide an implementation and tests substitute [`MemoryScoreStore`].
pub trait ScoreStore {
    /// Reads the persisted high score, if any
    fn get(&self) -> Option<u64>;
    /// Persists a new high score (best effort)
    fn set(&mut self, score: u64);
}

/// In-memory score store for tests and embedders without persistence
#[derive(Debug, Default, Clone)]
pub struct MemoryScoreStore {
    score: Option<u64>,
}

impl ScoreStore for MemoryScoreStore {
    fn get(&self) -> Option<u64> {
        self.score
    }

    fn set(&mut self, score: u64) {
        self.score = Some(score);
    }
}

/// Records a session score, overwriting only on strict improvement
///
/// Returns `true` when the stored high score was overwritten.
pub fn record_high_score<S: ScoreStore>(store: &mut S, score: u64) -> bool {
    let improved = store.get().is_none_or(|best| score > best);
    if improved {
        store.set(score);
    }
    improved
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::question::GameMode;

    #[test]
    fn test_points_without_streak() {
        // 100 base + 150 time bonus, ×1.0 multiplier
        assert_eq!(calculate_points(15, 0), 250);
    }

    #[test]
    fn test_points_with_capped_streak() {
        // 1 + 4×0.25 = 2.0, exactly the cap
        assert_eq!(calculate_points(15, 4), 500);
    }

    #[test]
    fn test_points_streak_beyond_cap_stays_capped() {
        assert_eq!(calculate_points(15, 10), 500);
    }

    #[test]
    fn test_points_with_no_time_left() {
        assert_eq!(calculate_points(0, 0), 100);
    }

    #[test]
    fn test_fan_level_thresholds() {
        assert_eq!(FanLevel::for_score(0), FanLevel::NewFan);
        assert_eq!(FanLevel::for_score(999), FanLevel::NewFan);
        assert_eq!(FanLevel::for_score(1_000), FanLevel::CasualListener);
        assert_eq!(FanLevel::for_score(2_500), FanLevel::DedicatedFan);
        assert_eq!(FanLevel::for_score(7_999), FanLevel::Superfan);
        assert_eq!(FanLevel::for_score(20_000), FanLevel::UltimateStan);
    }

    fn state_with_results(results: Vec<ModeResult>, score: u64, best_streak: u32) -> GameState {
        let mut state = GameState::new();
        state.score = score;
        state.best_streak = best_streak;
        state.mode_results = results;
        state
    }

    #[test]
    fn test_game_result_accuracy_rounds_to_whole_percent() {
        let state = state_with_results(
            vec![
                ModeResult {
                    mode: GameMode::Awards,
                    score: 700,
                    correct: 2,
                    total: 3,
                    best_streak: 2,
                },
                ModeResult {
                    mode: GameMode::Timeline,
                    score: 300,
                    correct: 1,
                    total: 3,
                    best_streak: 1,
                },
            ],
            1_000,
            2,
        );

        let result = calculate_game_result(&state);
        // 3 of 6 correct
        assert_eq!(result.accuracy, 50);
        assert_eq!(result.total_score, 1_000);
        assert_eq!(result.fan_level, FanLevel::CasualListener);
    }

    #[test]
    fn test_game_result_with_no_questions() {
        let state = state_with_results(Vec::new(), 0, 0);
        let result = calculate_game_result(&state);
        assert_eq!(result.accuracy, 0);
        assert_eq!(result.best_streak, 0);
        assert_eq!(result.fan_level, FanLevel::NewFan);
    }

    #[test]
    fn test_game_result_best_streak_takes_mode_maximum() {
        let state = state_with_results(
            vec![ModeResult {
                mode: GameMode::WorldTour,
                score: 500,
                correct: 4,
                total: 5,
                best_streak: 4,
            }],
            500,
            1,
        );
        assert_eq!(calculate_game_result(&state).best_streak, 4);
    }

    #[test]
    fn test_high_score_overwrites_only_on_strict_improvement() {
        let mut store = MemoryScoreStore::default();

        assert!(record_high_score(&mut store, 100));
        assert_eq!(store.get(), Some(100));

        assert!(!record_high_score(&mut store, 100));
        assert_eq!(store.get(), Some(100));

        assert!(!record_high_score(&mut store, 50));
        assert_eq!(store.get(), Some(100));

        assert!(record_high_score(&mut store, 101));
        assert_eq!(store.get(), Some(101));
    }
}
