//! World Tour mode question generation
//!
//! Builds statistics questions from the concert archive. All factual
//! answers are computed only from shows dated on or before the evaluation
//! date; future-dated shows never leak into the numbers, but a tour with
//! both past and future dates is "in progress", which softens the phrasing
//! ("has had so far" instead of "had") without changing the answer.

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;

use crate::{
    Localized,
    catalog::Concert,
    constants::{corpus, question::WRONG_OPTION_COUNT},
    distractor::{self, format_capacity},
    question::{ChoiceQuestion, GameQuestion},
};

/// Aggregate statistics for one tour, past shows only
#[derive(Debug, Clone)]
struct TourStats {
    /// Tour name
    tour: String,
    /// Shows played on or before the evaluation date
    shows: usize,
    /// Distinct countries visited, past shows only
    countries: Vec<String>,
    /// Sold-out shows, past shows only
    sold_out: usize,
    /// Combined venue capacity, past shows only
    capacity: u32,
    /// Year of the first past show
    first_year: i32,
    /// Whether the tour still has future-dated shows
    in_progress: bool,
}

impl TourStats {
    /// Picks the phrasing variant for questions about this tour
    fn tense<'a>(&self, done: &'a str, ongoing: &'a str) -> &'a str {
        if self.in_progress { ongoing } else { done }
    }
}

/// Computes per-tour aggregates from the raw concert list
///
/// Tours whose every show is still in the future have no facts to ask
/// about and are dropped entirely.
fn tour_stats(concerts: &[Concert], today: NaiveDate) -> Vec<TourStats> {
    concerts
        .iter()
        .map(|concert| (concert.tour.clone(), concert))
        .into_group_map()
        .into_iter()
        .filter_map(|(tour, shows)| {
            let (past, future): (Vec<&Concert>, Vec<&Concert>) =
                shows.into_iter().partition(|show| show.date <= today);

            let first = past.iter().map(|show| show.date).min()?;

            Some(TourStats {
                tour,
                shows: past.len(),
                countries: past
                    .iter()
                    .map(|show| show.country.clone())
                    .unique()
                    .collect_vec(),
                sold_out: past.iter().filter(|show| show.sold_out).count(),
                capacity: past.iter().map(|show| show.capacity).sum(),
                first_year: first.year(),
                in_progress: !future.is_empty(),
            })
        })
        .sorted_by(|a, b| a.tour.cmp(&b.tour))
        .collect_vec()
}

/// Generates up to `desired` World Tour questions
///
/// Requires at least [`corpus::MIN_CONCERTS`] concert records. `today` is
/// the evaluation instant: everything dated after it is excluded from every
/// factual answer.
pub fn generate_world_tour_questions(
    concerts: &[Concert],
    today: NaiveDate,
    desired: usize,
) -> Vec<GameQuestion> {
    if concerts.len() < corpus::MIN_CONCERTS {
        return Vec::new();
    }

    let stats = tour_stats(concerts, today);
    if stats.is_empty() {
        return Vec::new();
    }

    let mut questions = Vec::new();
    questions.extend(show_count_questions(&stats));
    questions.extend(country_count_questions(&stats));
    questions.extend(tour_for_country_questions(&stats));
    questions.extend(country_not_visited_questions(&stats));
    questions.extend(sold_out_questions(&stats));
    questions.extend(start_year_questions(&stats));
    questions.extend(capacity_questions(&stats));

    let mut questions = distractor::shuffle(&questions);
    questions.truncate(desired);
    questions
}

/// Turns numeric candidates into plain-label options
fn number_options(values: Vec<i64>) -> Vec<(Localized, String)> {
    values
        .into_iter()
        .map(|value| (Localized::same(value.to_string()), value.to_string()))
        .collect_vec()
}

/// "How many shows?" archetype
fn show_count_questions(stats: &[TourStats]) -> Vec<GameQuestion> {
    stats
        .iter()
        .filter(|tour| tour.shows >= 2)
        .filter_map(|tour| {
            let correct = tour.shows as i64;
            let wrongs = number_options(distractor::wrong_numbers(correct, WRONG_OPTION_COUNT, 1));

            ChoiceQuestion::assemble(
                Localized::new(
                    format!(
                        "How many shows {} the {} tour {}?",
                        tour.tense("did", "has"),
                        tour.tour,
                        tour.tense("play", "played so far"),
                    ),
                    format!(
                        "{} 투어는 {} 몇 번의 공연을 했을까요?",
                        tour.tour,
                        tour.tense("총", "지금까지"),
                    ),
                ),
                (Localized::same(correct.to_string()), correct.to_string()),
                wrongs,
                None,
            )
            .map(GameQuestion::WorldTour)
        })
        .collect_vec()
}

/// "How many countries?" archetype
fn country_count_questions(stats: &[TourStats]) -> Vec<GameQuestion> {
    stats
        .iter()
        .filter(|tour| tour.countries.len() >= 2)
        .filter_map(|tour| {
            let correct = tour.countries.len() as i64;
            let wrongs = number_options(distractor::wrong_numbers(correct, WRONG_OPTION_COUNT, 1));

            ChoiceQuestion::assemble(
                Localized::new(
                    format!(
                        "How many countries {} the {} tour {}?",
                        tour.tense("did", "has"),
                        tour.tour,
                        tour.tense("visit", "visited so far"),
                    ),
                    format!(
                        "{} 투어는 {} 몇 개국을 방문했을까요?",
                        tour.tour,
                        tour.tense("총", "지금까지"),
                    ),
                ),
                (Localized::same(correct.to_string()), correct.to_string()),
                wrongs,
                None,
            )
            .map(GameQuestion::WorldTour)
        })
        .collect_vec()
}

/// "Which tour played in country X?" archetype
///
/// Wrong options are drawn exclusively from tours that did NOT visit the
/// country, so the correct answer is never reachable through a distractor.
fn tour_for_country_questions(stats: &[TourStats]) -> Vec<GameQuestion> {
    if stats.len() < corpus::MIN_DISTINCT_TOURS {
        return Vec::new();
    }

    let countries = stats
        .iter()
        .flat_map(|tour| tour.countries.iter().cloned())
        .unique()
        .collect_vec();

    countries
        .into_iter()
        .filter_map(|country| {
            let (visited, not_visited): (Vec<&TourStats>, Vec<&TourStats>) = stats
                .iter()
                .partition(|tour| tour.countries.contains(&country));

            let correct = distractor::pick_random(&visited, 1).into_iter().next()?;
            let wrongs = distractor::pick_random(&not_visited, WRONG_OPTION_COUNT)
                .into_iter()
                .map(|tour| (Localized::same(&tour.tour), tour.tour.clone()))
                .collect_vec();

            ChoiceQuestion::assemble(
                Localized::new(
                    format!("Which tour played a show in {country}?"),
                    format!("{country}에서 공연한 투어는 무엇일까요?"),
                ),
                (Localized::same(&correct.tour), correct.tour.clone()),
                wrongs,
                None,
            )
            .map(GameQuestion::WorldTour)
        })
        .collect_vec()
}

/// "Which country did tour X NOT visit?" archetype
///
/// Wrong options come only from countries the tour DID visit; the correct
/// answer is a country some other tour reached but this one never did.
fn country_not_visited_questions(stats: &[TourStats]) -> Vec<GameQuestion> {
    let all_countries = stats
        .iter()
        .flat_map(|tour| tour.countries.iter().cloned())
        .unique()
        .collect_vec();

    if all_countries.len() < corpus::MIN_DISTINCT_COUNTRIES {
        return Vec::new();
    }

    stats
        .iter()
        .filter(|tour| tour.countries.len() >= WRONG_OPTION_COUNT)
        .filter_map(|tour| {
            let missed = all_countries
                .iter()
                .filter(|country| !tour.countries.contains(country))
                .cloned()
                .collect_vec();

            let correct = distractor::pick_random(&missed, 1).into_iter().next()?;
            let wrongs = distractor::pick_random(&tour.countries, WRONG_OPTION_COUNT)
                .into_iter()
                .map(|country| (Localized::same(&country), country))
                .collect_vec();

            ChoiceQuestion::assemble(
                Localized::new(
                    format!(
                        "Which country {} the {} tour NOT {}?",
                        tour.tense("did", "has"),
                        tour.tour,
                        tour.tense("visit", "visited yet"),
                    ),
                    format!(
                        "{} 투어가 {} 방문하지 않은 나라는 어디일까요?",
                        tour.tour,
                        tour.tense("끝내", "아직"),
                    ),
                ),
                (Localized::same(&correct), correct.clone()),
                wrongs,
                None,
            )
            .map(GameQuestion::WorldTour)
        })
        .collect_vec()
}

/// "How many shows sold out?" archetype
fn sold_out_questions(stats: &[TourStats]) -> Vec<GameQuestion> {
    stats
        .iter()
        .filter(|tour| tour.sold_out >= 1 && tour.shows >= 2)
        .filter_map(|tour| {
            let correct = tour.sold_out as i64;
            let wrongs = number_options(distractor::wrong_numbers(correct, WRONG_OPTION_COUNT, 0));

            ChoiceQuestion::assemble(
                Localized::new(
                    format!(
                        "How many shows on the {} tour {} sold out{}?",
                        tour.tour,
                        tour.tense("were", "have been"),
                        tour.tense("", " so far"),
                    ),
                    format!(
                        "{} 투어에서 {} 매진된 공연은 몇 번일까요?",
                        tour.tour,
                        tour.tense("총", "지금까지"),
                    ),
                ),
                (Localized::same(correct.to_string()), correct.to_string()),
                wrongs,
                None,
            )
            .map(GameQuestion::WorldTour)
        })
        .collect_vec()
}

/// "Which year did the tour start?" archetype
///
/// The first-show year comes from past shows only, so an in-progress tour
/// still answers with its real opening night.
fn start_year_questions(stats: &[TourStats]) -> Vec<GameQuestion> {
    let distinct_years = stats.iter().map(|tour| tour.first_year).unique().count();
    if distinct_years < 2 {
        return Vec::new();
    }

    stats
        .iter()
        .filter_map(|tour| {
            let correct = i64::from(tour.first_year);
            let wrongs = number_options(distractor::wrong_numbers(correct, WRONG_OPTION_COUNT, 1));

            ChoiceQuestion::assemble(
                Localized::new(
                    format!("In which year did the {} tour begin?", tour.tour),
                    format!("{} 투어가 시작된 해는 언제일까요?", tour.tour),
                ),
                (Localized::same(correct.to_string()), correct.to_string()),
                wrongs,
                None,
            )
            .map(GameQuestion::WorldTour)
        })
        .collect_vec()
}

/// "What was the combined venue capacity?" archetype
///
/// Labels use the game's capacity formatter; the magnitude-aware distractor
/// generator guarantees no two options render identically.
fn capacity_questions(stats: &[TourStats]) -> Vec<GameQuestion> {
    stats
        .iter()
        .filter(|tour| tour.capacity >= 1_000 && tour.shows >= 2)
        .filter_map(|tour| {
            let correct = tour.capacity;
            let wrongs = distractor::wrong_capacities(correct, WRONG_OPTION_COUNT)
                .into_iter()
                .map(|capacity| (Localized::same(format_capacity(capacity)), capacity.to_string()))
                .collect_vec();

            ChoiceQuestion::assemble(
                Localized::new(
                    format!(
                        "What is the combined capacity of every venue the {} tour {}?",
                        tour.tour,
                        tour.tense("played", "has played so far"),
                    ),
                    format!(
                        "{} 투어가 {} 공연한 모든 공연장의 총 수용 인원은 얼마일까요?",
                        tour.tour,
                        tour.tense("총", "지금까지"),
                    ),
                ),
                (Localized::same(format_capacity(correct)), correct.to_string()),
                wrongs,
                None,
            )
            .map(GameQuestion::WorldTour)
        })
        .collect_vec()
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn show(tour: &str, country: &str, date: &str, sold_out: bool, capacity: u32) -> Concert {
        Concert {
            tour: tour.to_owned(),
            venue: format!("{country} Dome"),
            city: "Somewhere".to_owned(),
            country: country.to_owned(),
            date: date.parse().expect("valid iso date"),
            lat: 0.0,
            lng: 0.0,
            sold_out,
            capacity,
        }
    }

    fn today() -> NaiveDate {
        "2024-06-01".parse().expect("valid iso date")
    }

    fn archive() -> Vec<Concert> {
        vec![
            // finished tour, three countries
            show("Wings", "South Korea", "2017-02-18", true, 20_000),
            show("Wings", "Japan", "2017-05-30", true, 40_000),
            show("Wings", "USA", "2017-10-11", false, 25_000),
            // finished tour, two countries
            show("Speak Yourself", "Brazil", "2019-05-25", true, 48_000),
            show("Speak Yourself", "UK", "2019-06-01", true, 90_000),
            show("Speak Yourself", "Japan", "2019-07-06", false, 35_000),
            // in-progress tour: two past shows, two future ones
            show("Neon Nights", "South Korea", "2024-03-01", true, 55_000),
            show("Neon Nights", "Japan", "2024-04-20", false, 42_000),
            show("Neon Nights", "USA", "2024-09-15", true, 60_000),
            show("Neon Nights", "Mexico", "2024-10-02", true, 65_000),
            // small finished tour
            show("Red Bullet", "South Korea", "2015-03-28", false, 3_000),
            show("Red Bullet", "Chile", "2015-08-06", true, 8_000),
        ]
    }

    fn stats_for<'a>(stats: &'a [TourStats], tour: &str) -> &'a TourStats {
        stats.iter().find(|s| s.tour == tour).expect("tour present")
    }

    #[test]
    fn test_too_few_concerts_yields_nothing() {
        let concerts = archive().into_iter().take(5).collect_vec();
        assert!(generate_world_tour_questions(&concerts, today(), 10).is_empty());
    }

    #[test]
    fn test_future_shows_are_excluded_from_aggregates() {
        let stats = tour_stats(&archive(), today());
        let neon = stats_for(&stats, "Neon Nights");

        assert_eq!(neon.shows, 2);
        assert_eq!(neon.countries.len(), 2);
        assert_eq!(neon.sold_out, 1);
        assert_eq!(neon.capacity, 97_000);
        assert_eq!(neon.first_year, 2024);
        assert!(neon.in_progress);
    }

    #[test]
    fn test_finished_tour_is_not_in_progress() {
        let stats = tour_stats(&archive(), today());
        assert!(!stats_for(&stats, "Wings").in_progress);
    }

    #[test]
    fn test_all_future_tour_is_dropped() {
        let mut concerts = archive();
        concerts.push(show("Phantom", "France", "2025-01-01", false, 10_000));
        let stats = tour_stats(&concerts, today());
        assert!(stats.iter().all(|s| s.tour != "Phantom"));
    }

    #[test]
    fn test_in_progress_phrasing_differs_without_changing_answer() {
        let stats = tour_stats(&archive(), today());
        let questions = show_count_questions(&stats);

        let neon = questions
            .iter()
            .filter_map(GameQuestion::as_choice)
            .find(|choice| choice.prompt.en.contains("Neon Nights"))
            .expect("in-progress tour gets a show-count question");
        assert!(neon.prompt.en.contains("so far"));
        assert_eq!(neon.correct_answer, "2");

        let wings = questions
            .iter()
            .filter_map(GameQuestion::as_choice)
            .find(|choice| choice.prompt.en.contains("Wings"))
            .expect("finished tour gets a show-count question");
        assert!(!wings.prompt.en.contains("so far"));
    }

    #[test]
    fn test_not_visited_wrongs_come_from_visited_countries() {
        let stats = tour_stats(&archive(), today());
        for question in country_not_visited_questions(&stats) {
            let choice = question.as_choice().expect("multiple choice");
            let tour_name = stats
                .iter()
                .find(|tour| choice.prompt.en.contains(&tour.tour))
                .expect("prompt names a tour");

            for option in &choice.options {
                if option.value == choice.correct_answer {
                    assert!(!tour_name.countries.contains(&option.value));
                } else {
                    assert!(tour_name.countries.contains(&option.value));
                }
            }
        }
    }

    #[test]
    fn test_tour_for_country_wrongs_never_visited_the_country() {
        let stats = tour_stats(&archive(), today());
        for question in tour_for_country_questions(&stats) {
            let choice = question.as_choice().expect("multiple choice");
            let country = stats
                .iter()
                .flat_map(|tour| tour.countries.iter())
                .unique()
                .find(|country| choice.prompt.en.contains(country.as_str()))
                .expect("prompt names a country");

            for option in &choice.options {
                let tour = stats_for(&stats, &option.value);
                if option.value == choice.correct_answer {
                    assert!(tour.countries.contains(country));
                } else {
                    assert!(!tour.countries.contains(country));
                }
            }
        }
    }

    #[test]
    fn test_capacity_options_use_formatted_labels() {
        let stats = tour_stats(&archive(), today());
        for question in capacity_questions(&stats) {
            let choice = question.as_choice().expect("multiple choice");
            assert!(choice.options.iter().map(|o| &o.label.en).all_unique());
            for option in &choice.options {
                let raw: u32 = option.value.parse().expect("canonical value is numeric");
                assert_eq!(option.label.en, format_capacity(raw));
            }
        }
    }

    #[test]
    fn test_generate_respects_desired_cap() {
        let questions = generate_world_tour_questions(&archive(), today(), 5);
        assert!(questions.len() <= 5);
        assert!(!questions.is_empty());
    }
}
