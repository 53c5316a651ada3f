//! Awards mode question generation
//!
//! Builds multiple-choice questions from the artist's award history: which
//! ceremony hosted a given win, which year a win happened, and how many
//! trophies a given ceremony has handed over. Each archetype checks its own
//! diversity precondition and silently contributes nothing when the award
//! corpus is too uniform.

use itertools::Itertools;

use crate::{
    Localized,
    catalog::{Award, AwardResult},
    constants::{corpus, question::WRONG_OPTION_COUNT},
    distractor,
    question::{ChoiceQuestion, GameQuestion},
};

/// Generates up to `desired` Awards questions
///
/// Requires at least [`corpus::MIN_WON_AWARDS`] won records; otherwise the
/// mode has nothing safe to ask and an empty list is returned so the caller
/// can fall back to a "not enough data" screen.
pub fn generate_award_questions(awards: &[Award], desired: usize) -> Vec<GameQuestion> {
    let wins = awards
        .iter()
        .filter(|award| award.result == AwardResult::Won)
        .collect_vec();

    if wins.len() < corpus::MIN_WON_AWARDS {
        return Vec::new();
    }

    let mut questions = Vec::new();
    questions.extend(ceremony_questions(&wins));
    questions.extend(year_questions(&wins));
    questions.extend(win_count_questions(&wins));

    let mut questions = distractor::shuffle(&questions);
    questions.truncate(desired);
    questions
}

/// "Which ceremony awarded this category?" archetype
///
/// Needs four distinct ceremonies among the wins; wrong options are other
/// ceremonies the artist has actually won at.
fn ceremony_questions(wins: &[&Award]) -> Vec<GameQuestion> {
    let ceremonies = wins
        .iter()
        .map(|win| win.ceremony.clone())
        .unique()
        .collect_vec();

    if ceremonies.len() < corpus::MIN_DISTINCT_CEREMONIES {
        return Vec::new();
    }

    wins.iter()
        .filter_map(|win| {
            let wrongs = distractor::wrong_options(&win.ceremony, &ceremonies, WRONG_OPTION_COUNT)
                .into_iter()
                .map(|ceremony| (Localized::same(&ceremony), ceremony))
                .collect_vec();

            ChoiceQuestion::assemble(
                Localized::new(
                    format!(
                        "Which ceremony awarded \"{}\" in {}?",
                        win.category, win.year
                    ),
                    format!(
                        "{}년 \"{}\" 수상은 어느 시상식에서였을까요?",
                        win.year, win.category
                    ),
                ),
                (Localized::same(&win.ceremony), win.ceremony.clone()),
                wrongs,
                None,
            )
            .map(GameQuestion::Awards)
        })
        .collect_vec()
}

/// "Which year did this win happen?" archetype
///
/// Needs four distinct win years; wrong options are other years the artist
/// won something.
fn year_questions(wins: &[&Award]) -> Vec<GameQuestion> {
    let years = wins.iter().map(|win| win.year).unique().collect_vec();

    if years.len() < corpus::MIN_DISTINCT_YEARS {
        return Vec::new();
    }

    wins.iter()
        .filter_map(|win| {
            let wrongs = distractor::wrong_options(&win.year, &years, WRONG_OPTION_COUNT)
                .into_iter()
                .map(|year| (Localized::same(year.to_string()), year.to_string()))
                .collect_vec();

            ChoiceQuestion::assemble(
                Localized::new(
                    format!(
                        "In which year was \"{}\" won at {}?",
                        win.category, win.ceremony
                    ),
                    format!(
                        "{}에서 \"{}\"을(를) 수상한 해는 언제일까요?",
                        win.ceremony, win.category
                    ),
                ),
                (Localized::same(win.year.to_string()), win.year.to_string()),
                wrongs,
                None,
            )
            .map(GameQuestion::Awards)
        })
        .collect_vec()
}

/// "How many wins at this ceremony?" archetype
///
/// Wrong counts sit at the fixed offsets +1, -1, +3, -3, and -2 around the
/// true count, floored at one so a zero never leaks into the options.
fn win_count_questions(wins: &[&Award]) -> Vec<GameQuestion> {
    wins.iter()
        .map(|win| win.ceremony.clone())
        .counts()
        .into_iter()
        .filter_map(|(ceremony, count)| {
            let count = count as i64;
            let wrong_counts = [count + 1, count - 1, count + 3, count - 3, count - 2]
                .into_iter()
                .map(|candidate| candidate.max(1))
                .filter(|candidate| *candidate != count)
                .unique()
                .collect_vec();

            let wrongs = distractor::pick_random(&wrong_counts, WRONG_OPTION_COUNT)
                .into_iter()
                .map(|candidate| (Localized::same(candidate.to_string()), candidate.to_string()))
                .collect_vec();

            ChoiceQuestion::assemble(
                Localized::new(
                    format!("How many awards have been won at {ceremony}?"),
                    format!("{ceremony}에서 수상한 트로피는 모두 몇 개일까요?"),
                ),
                (Localized::same(count.to_string()), count.to_string()),
                wrongs,
                None,
            )
            .map(GameQuestion::Awards)
        })
        .collect_vec()
}
