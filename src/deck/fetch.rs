// src/deck/fetch.rs
// Pulls the word list from the remote word service.

use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use log::{debug, info, warn};

use super::{Card, Deck};

/// Messages sent from the fetch thread to the driving thread.
///
/// A pending or failed fetch never touches session state: the driver shows
/// "Fetching words.." until `Complete` arrives, and a `Complete(Err(..))`
/// becomes a visible message rather than a broken session.
pub enum FetchMessage {
    Progress(f32),
    Complete(Result<Deck, String>),
}

/// Fetches one deck's worth of words for `language` and reports through
/// `tx`. Runs to completion on the calling thread; see [`spawn_fetch`] for
/// the background variant.
pub fn fetch_deck(
    endpoint: &str,
    language: &str,
    limit: usize,
    timeout: Duration,
    tx: &Sender<FetchMessage>,
) {
    let result = (|| -> Result<Deck, Box<dyn std::error::Error>> {
        info!("fetching {} words from {}", language, endpoint);

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        let url = format!(
            "{}/words?language={}",
            endpoint.trim_end_matches('/'),
            language
        );

        let response = client.get(&url).send()?.error_for_status()?;
        let _ = tx.send(FetchMessage::Progress(0.5)); // 50% - service answered

        let cards: Vec<Card> = response.json()?;
        let _ = tx.send(FetchMessage::Progress(1.0)); // 100% - words parsed
        debug!("word service returned {} cards", cards.len());

        Ok(Deck::build(cards, limit))
    })();

    if let Err(e) = &result {
        warn!("word fetch failed: {}", e);
    }
    // The receiver may already be gone if the user navigated away; an
    // abandoned fetch is simply dropped.
    let _ = tx.send(FetchMessage::Complete(result.map_err(|e| e.to_string())));
}

/// Spawns `fetch_deck` on its own thread so a slow or failing word service
/// never blocks gesture handling.
pub fn spawn_fetch(
    endpoint: String,
    language: String,
    limit: usize,
    timeout: Duration,
    tx: Sender<FetchMessage>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || fetch_deck(&endpoint, &language, limit, timeout, &tx))
}
