// src/lib.rs
// ViewLingo: flashcard review engine plus the thin API proxy backend.

pub mod api;
pub mod config;
pub mod deck;
pub mod gesture;
pub mod languages;
pub mod session;
pub mod summary;

// Re-export the main types for easier access.
pub use deck::{Card, Deck};
pub use gesture::{classify, GestureOutcome, SwipeTracker};
pub use session::{Advance, Decision, Grade, Progress, ReviewSession, SessionError};
pub use summary::{format_elapsed, SessionResult};
