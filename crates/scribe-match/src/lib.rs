//! Response classification for sentence-combining answers.
//!
//! A [`Question`] carries a corpus of known responses, some marked optimal,
//! plus optional focus points. [`classify`] runs a student's submission through
//! an ordered cascade of rules and returns either the existing response it
//! equals or a new diagnostic draft (feedback, hint author, parent response and
//! concept tags) describing what is wrong with it.
//!
//! Two lookups sit beside the cascade: [`fuzzy_find`] for approximate nearest
//! responses and [`small_typo_match`] for near-misses of a response that
//! already carries feedback.
//!
//! The crate is pure: no I/O, no shared state. The corpus is read-only during a
//! classification and persisting drafts is left to the caller.

pub mod cascade;
pub mod change_object;
pub mod corpus;
pub mod feedback;
pub mod focus_point;
pub mod fuzzy;
pub mod model;
pub mod normalize;
pub mod question;
pub mod required_words;
pub mod typo;

pub use cascade::{Cascade, RULES, Rule, classify};
pub use corpus::{CorpusError, ResponseCorpus};
pub use fuzzy::{FuzzyIndex, fuzzy_find};
pub use model::{
    ConceptResult, ErrorKind, FocusPoint, MatchMode, MatchResult, MatchedResponse, Outcome,
    QuestionId, Response, ResponseDraft, ResponseId,
};
pub use question::Question;
pub use typo::small_typo_match;
