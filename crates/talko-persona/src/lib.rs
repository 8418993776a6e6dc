//! The Talko assistant persona.
//!
//! Pure prompt-composition layer: a fixed system instruction, keyword-based
//! classification of the user's message, and assembly of the final prompt
//! text sent to the model. No I/O and no state beyond static configuration.

pub mod classify;
pub mod compose;
pub mod profile;

pub use classify::{classify, Classification};
pub use compose::{compose, introduction_message, SYSTEM_PROMPT};
pub use profile::{about, founder_profile, FounderProfile};
