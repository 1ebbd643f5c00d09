// src/deck/mod.rs
// This module handles the reviewable word deck and its remote source.

pub mod fetch;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One reviewable word, as served by the word service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    /// Prompt shown on the front face.
    pub word: String,
    /// Answer shown on the back face.
    pub translation: String,
    /// Romanization, the secondary back-face line.
    pub pronunciation: String,
    /// Base64-encoded image bytes; the UI shows a placeholder when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    /// When the word was captured. Used only for ordering and grouping.
    pub timestamp: DateTime<Utc>,
    /// Source-language tag the word service keys its data by.
    pub language: String,
}

impl Card {
    /// Decodes the picture payload, if any.
    pub fn picture_bytes(&self) -> Result<Option<Vec<u8>>, base64::DecodeError> {
        match &self.picture {
            Some(data) => BASE64.decode(data).map(Some),
            None => Ok(None),
        }
    }
}

/// An ordered review deck. Insertion order is review order; the engine
/// never reorders it once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Builds a review deck from whatever the word service returned:
    /// newest words first, truncated to `limit`. A service that supplies
    /// fewer cards than `limit` yields a correspondingly shorter deck.
    pub fn build(mut cards: Vec<Card>, limit: usize) -> Self {
        cards.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        cards.truncate(limit);
        Deck { cards }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

/// Groups cards by the calendar date they were captured, newest date
/// first, for the "Your words" listing. Cards inside a group stay
/// newest-first as well.
pub fn group_by_date(cards: &[Card]) -> Vec<(NaiveDate, Vec<&Card>)> {
    let mut sorted: Vec<&Card> = cards.iter().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let mut groups: Vec<(NaiveDate, Vec<&Card>)> = Vec::new();
    for card in sorted {
        let date = card.timestamp.date_naive();
        match groups.last_mut() {
            Some((current, group)) if *current == date => group.push(card),
            _ => groups.push((date, vec![card])),
        }
    }
    groups
}

/// Builds a deterministic deck for tests across the crate.
#[cfg(test)]
pub fn test_deck(num_cards: usize) -> Deck {
    use chrono::TimeZone;

    let cards = (0..num_cards)
        .map(|i| Card {
            id: format!("card-{}", i),
            word: format!("word {}", i),
            translation: format!("translation {}", i),
            pronunciation: format!("pronunciation {}", i),
            picture: None,
            timestamp: Utc.with_ymd_and_hms(2025, 7, 13, 9, 0, 0).unwrap()
                + chrono::Duration::minutes(i as i64),
            language: "zh".to_string(),
        })
        .collect();
    Deck { cards }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn card_at(id: &str, timestamp: DateTime<Utc>) -> Card {
        Card {
            id: id.to_string(),
            word: format!("word-{}", id),
            translation: "apple".to_string(),
            pronunciation: "píngguǒ".to_string(),
            picture: None,
            timestamp,
            language: "zh".to_string(),
        }
    }

    #[test]
    fn test_build_orders_newest_first_and_truncates() {
        let base = Utc.with_ymd_and_hms(2025, 7, 12, 8, 0, 0).unwrap();
        let cards = vec![
            card_at("old", base),
            card_at("newest", base + chrono::Duration::days(2)),
            card_at("newer", base + chrono::Duration::days(1)),
        ];
        let deck = Deck::build(cards, 2);

        assert_eq!(deck.len(), 2);
        assert_eq!(deck.cards[0].id, "newest");
        assert_eq!(deck.cards[1].id, "newer");
    }

    #[test]
    fn test_build_accepts_a_short_supply() {
        let base = Utc.with_ymd_and_hms(2025, 7, 12, 8, 0, 0).unwrap();
        let deck = Deck::build(vec![card_at("only", base)], 5);
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_group_by_date() {
        let jul_12 = Utc.with_ymd_and_hms(2025, 7, 12, 9, 0, 0).unwrap();
        let jul_13 = Utc.with_ymd_and_hms(2025, 7, 13, 18, 30, 0).unwrap();
        let cards = vec![
            card_at("a", jul_12),
            card_at("b", jul_13),
            card_at("c", jul_12 + chrono::Duration::hours(3)),
        ];

        let groups = group_by_date(&cards);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, jul_13.date_naive());
        assert_eq!(groups[0].1.len(), 1);
        assert_eq!(groups[1].0, jul_12.date_naive());
        // Within the Jul 12 group the later capture comes first.
        assert_eq!(groups[1].1[0].id, "c");
        assert_eq!(groups[1].1[1].id, "a");
    }

    #[test]
    fn test_picture_payload_roundtrip() {
        let base = Utc.with_ymd_and_hms(2025, 7, 12, 8, 0, 0).unwrap();
        let mut card = card_at("pic", base);
        assert_eq!(card.picture_bytes().unwrap(), None);

        card.picture = Some(BASE64.encode([0x89, b'P', b'N', b'G']));
        assert_eq!(
            card.picture_bytes().unwrap(),
            Some(vec![0x89, b'P', b'N', b'G'])
        );

        card.picture = Some("not base64!!".to_string());
        assert!(card.picture_bytes().is_err());
    }

    #[test]
    fn test_card_schema_roundtrip() {
        let json = r#"{
            "id": "w-17",
            "word": "苹果",
            "translation": "apple",
            "pronunciation": "Píngguǒ",
            "timestamp": "2025-07-13T09:00:00Z",
            "language": "zh"
        }"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.word, "苹果");
        assert_eq!(card.picture, None);

        let back = serde_json::to_string(&card).unwrap();
        // Absent pictures stay absent instead of serializing as null.
        assert!(!back.contains("picture"));
    }
}
