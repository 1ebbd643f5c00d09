// src/summary.rs
// Aggregates final grades and timing into the result payload.

use std::time::Duration;

use serde::Serialize;

use crate::deck::Deck;
use crate::session::{Grade, SessionError};

/// One results-screen row: the card's prompt, its answer, and how it went.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardGrade {
    pub word: String,
    pub translation: String,
    pub grade: Grade,
}

/// The immutable outcome of one review pass.
///
/// Computed exactly once, when the last card's grade lands, then handed to
/// the results view and discarded. Nothing is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResult {
    pub elapsed_seconds: u64,
    pub correct_count: usize,
    pub total_count: usize,
    /// Percentage, rounded half-up.
    pub score: u8,
    pub per_card: Vec<CardGrade>,
}

impl SessionResult {
    /// The elapsed time as shown on the results screen, e.g. `"2:05"`.
    pub fn elapsed_display(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }

    /// Encodes the result the way the results view consumes it: the time
    /// display, the correct count, and the JSON-serialized per-card grade
    /// array, as navigation parameter pairs. Escaping is left to whatever
    /// navigation layer carries them.
    pub fn to_nav_params(&self) -> Result<Vec<(&'static str, String)>, serde_json::Error> {
        Ok(vec![
            ("time", self.elapsed_display()),
            ("correct", self.correct_count.to_string()),
            ("grades", serde_json::to_string(&self.per_card)?),
        ])
    }
}

/// Formats whole seconds as `minutes:seconds`, seconds zero-padded.
pub fn format_elapsed(total_seconds: u64) -> String {
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Computes the session result from already-validated in-memory state.
///
/// Every slot must hold a real grade by the time this runs; an `Unset`
/// grade here is an internal-consistency violation, not a user state.
pub fn compute(
    deck: &Deck,
    grades: &[Grade],
    elapsed: Duration,
) -> Result<SessionResult, SessionError> {
    let mut per_card = Vec::with_capacity(grades.len());
    for (index, (card, grade)) in deck.cards.iter().zip(grades.iter()).enumerate() {
        if *grade == Grade::Unset {
            return Err(SessionError::UngradedSlot { index });
        }
        per_card.push(CardGrade {
            word: card.word.clone(),
            translation: card.translation.clone(),
            grade: *grade,
        });
    }

    let correct_count = grades.iter().filter(|g| **g == Grade::Correct).count();
    let total_count = deck.len();
    let score = ((100 * correct_count) as f64 / total_count as f64).round() as u8;

    Ok(SessionResult {
        elapsed_seconds: elapsed.as_secs(),
        correct_count,
        total_count,
        score,
        per_card,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::test_deck;

    fn grades(slots: &[Grade]) -> Vec<Grade> {
        slots.to_vec()
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(65), "1:05");
        assert_eq!(format_elapsed(125), "2:05");
        assert_eq!(format_elapsed(3599), "59:59");
    }

    #[test]
    fn test_score_rounds_half_up() {
        let deck = test_deck(3);
        let result = compute(
            &deck,
            &grades(&[Grade::Correct, Grade::Wrong, Grade::Wrong]),
            Duration::from_secs(10),
        )
        .unwrap();
        // 33.33 rounds down.
        assert_eq!(result.score, 33);

        let deck = test_deck(8);
        let mut g = vec![Grade::Wrong; 8];
        g[0] = Grade::Correct;
        let result = compute(&deck, &g, Duration::from_secs(10)).unwrap();
        // 12.5 rounds up.
        assert_eq!(result.score, 13);
    }

    #[test]
    fn test_counts_add_up() {
        let deck = test_deck(5);
        let g = grades(&[
            Grade::Correct,
            Grade::Wrong,
            Grade::Correct,
            Grade::Correct,
            Grade::Wrong,
        ]);
        let result = compute(&deck, &g, Duration::from_secs(125)).unwrap();
        let wrong_count = result
            .per_card
            .iter()
            .filter(|c| c.grade == Grade::Wrong)
            .count();
        assert_eq!(result.correct_count + wrong_count, result.total_count);
    }

    #[test]
    fn test_unset_grade_is_an_internal_error() {
        let deck = test_deck(2);
        let err = compute(
            &deck,
            &grades(&[Grade::Correct, Grade::Unset]),
            Duration::from_secs(1),
        )
        .unwrap_err();
        assert_eq!(err, SessionError::UngradedSlot { index: 1 });
    }

    #[test]
    fn test_full_scenario() {
        // Deck of 5, graded correct/wrong/correct/correct/wrong in 125s.
        let deck = test_deck(5);
        let g = grades(&[
            Grade::Correct,
            Grade::Wrong,
            Grade::Correct,
            Grade::Correct,
            Grade::Wrong,
        ]);
        let result = compute(&deck, &g, Duration::from_secs(125)).unwrap();

        assert_eq!(result.elapsed_display(), "2:05");
        assert_eq!(result.correct_count, 3);
        assert_eq!(result.total_count, 5);
        assert_eq!(result.score, 60);
        assert_eq!(result.per_card.len(), 5);
        assert_eq!(result.per_card[0].word, "word 0");
        assert_eq!(result.per_card[1].grade, Grade::Wrong);
    }

    #[test]
    fn test_nav_params_hand_off() {
        let deck = test_deck(2);
        let result = compute(
            &deck,
            &grades(&[Grade::Correct, Grade::Wrong]),
            Duration::from_secs(65),
        )
        .unwrap();
        let params = result.to_nav_params().unwrap();

        assert_eq!(params[0], ("time", "1:05".to_string()));
        assert_eq!(params[1], ("correct", "1".to_string()));
        // The grades parameter is a JSON array, one entry per deck slot.
        let parsed: serde_json::Value = serde_json::from_str(&params[2].1).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[0]["grade"], "correct");
        assert_eq!(parsed[1]["grade"], "wrong");
    }
}
