// src/session.rs
// Contains the review session state machine: card sequencing and grading.

use std::time::Instant;

use serde::Serialize;
use thiserror::Error;

use crate::deck::{Card, Deck};
use crate::gesture::GestureOutcome;
use crate::summary::{self, SessionResult};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot start a review session with an empty deck")]
    EmptyDeck,
    #[error("no current card: index {index} is out of range for {total} cards")]
    OutOfRange { index: usize, total: usize },
    #[error("the review session is already complete")]
    SessionCompleted,
    #[error("card slot {index} already holds a grade")]
    SlotAlreadyGraded { index: usize },
    #[error("card slot {index} reached the summary without a grade")]
    UngradedSlot { index: usize },
}

/// The grade held by one deck slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Unset,
    Correct,
    Wrong,
}

/// The user's verdict on a single card, produced by a completed swipe.
/// Rightward means "I knew it", leftward means "I didn't".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Correct,
    Wrong,
}

impl From<Decision> for Grade {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Correct => Grade::Correct,
            Decision::Wrong => Grade::Wrong,
        }
    }
}

/// What recording a grade did with the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Moved on to the next card.
    Next,
    /// The deck is exhausted; the session is over and summarized.
    Done(SessionResult),
}

/// Read-only position report, valid in every state including terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub index: usize,
    pub total: usize,
}

/// One pass over a deck of cards.
///
/// The session walks the deck front to back, one grade per card. There is
/// no undo and no skip: each slot is graded exactly once, and once the last
/// slot is graded the session is terminal.
pub struct ReviewSession {
    deck: Deck,
    grades: Vec<Grade>,
    current_index: usize,
    revealed: bool,
    started_at: Instant,
    completed: bool,
}

impl ReviewSession {
    /// Starts a review pass over `deck`. The deck must hold at least one card.
    pub fn start(deck: Deck) -> Result<Self, SessionError> {
        if deck.is_empty() {
            return Err(SessionError::EmptyDeck);
        }
        let grades = vec![Grade::Unset; deck.len()];
        Ok(ReviewSession {
            deck,
            grades,
            current_index: 0,
            revealed: false,
            started_at: Instant::now(),
            completed: false,
        })
    }

    /// The card currently facing the user.
    pub fn current_card(&self) -> Result<&Card, SessionError> {
        if self.completed {
            return Err(SessionError::OutOfRange {
                index: self.deck.len(),
                total: self.deck.len(),
            });
        }
        Ok(&self.deck.cards[self.current_index])
    }

    /// Whether the current card shows its back face.
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// Flips the current card. New cards always start front-side up.
    pub fn toggle_reveal(&mut self) {
        if !self.completed {
            self.revealed = !self.revealed;
        }
    }

    /// Grades the current card and advances. On the last card this computes
    /// the final summary and moves the session to its terminal state.
    pub fn record_grade(&mut self, decision: Decision) -> Result<Advance, SessionError> {
        if self.completed {
            return Err(SessionError::SessionCompleted);
        }
        if self.grades[self.current_index] != Grade::Unset {
            return Err(SessionError::SlotAlreadyGraded {
                index: self.current_index,
            });
        }
        self.grades[self.current_index] = decision.into();

        if self.current_index + 1 < self.deck.len() {
            self.current_index += 1;
            self.revealed = false;
            Ok(Advance::Next)
        } else {
            self.completed = true;
            self.revealed = false;
            let result = summary::compute(&self.deck, &self.grades, self.started_at.elapsed())?;
            Ok(Advance::Done(result))
        }
    }

    /// Applies one completed gesture: a tap flips the card, a swipe grades it.
    /// Returns `Ok(None)` when the gesture changed nothing but the flip state.
    pub fn apply_gesture(
        &mut self,
        outcome: GestureOutcome,
    ) -> Result<Option<Advance>, SessionError> {
        match outcome {
            GestureOutcome::Flip => {
                self.toggle_reveal();
                Ok(None)
            }
            GestureOutcome::Grade(decision) => self.record_grade(decision).map(Some),
        }
    }

    pub fn progress(&self) -> Progress {
        Progress {
            index: if self.completed {
                self.deck.len()
            } else {
                self.current_index
            },
            total: self.deck.len(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }
}
