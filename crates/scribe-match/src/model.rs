//! Data model shared by the matchers and the cascade.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a [`Response`] within its question's corpus.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResponseId(String);

impl ResponseId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResponseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResponseId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Identifier of a question (prompt).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Mastery-tracking tag attached to a diagnosed response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptResult {
    /// Concept the student was assessed on
    pub concept_id: String,
    /// Whether the student demonstrated the concept
    pub correct: bool,
}

impl ConceptResult {
    /// A concept the submission got wrong. Every diagnosis emits these.
    pub fn incorrect(concept_id: impl Into<String>) -> Self {
        Self {
            concept_id: concept_id.into(),
            correct: false,
        }
    }
}

/// A known response to a question, either a model answer or a diagnosed error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Unique within the question
    pub id: ResponseId,
    /// Canonical text shown to students and compared against submissions
    pub text: String,
    /// How many submissions produced exactly this text
    #[serde(default)]
    pub count: u32,
    /// Model answer (acceptance target) when true
    #[serde(default)]
    pub optimal: bool,
    /// Feedback shown when a submission lands on this response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    /// Who (or which hint) wrote the feedback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Optimal response whose feedback this one supplements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ResponseId>,
    /// Concept tags recorded when this response was diagnosed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub concept_results: Vec<ConceptResult>,
    /// Phrases a submission must contain (only meaningful on optimal responses)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_words: Vec<String>,
}

impl Response {
    /// A non-optimal response with no feedback attached.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: ResponseId::new(id),
            text: text.into(),
            count: 0,
            optimal: false,
            feedback: None,
            author: None,
            parent_id: None,
            concept_results: Vec::new(),
            required_words: Vec::new(),
        }
    }

    /// A model answer.
    pub fn optimal(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            optimal: true,
            ..Self::new(id, text)
        }
    }

    /// Attach feedback.
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }

    /// Attach an author label.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Chain this response's feedback to an optimal parent.
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent_id = Some(ResponseId::new(parent));
        self
    }

    /// Declare required phrases.
    pub fn with_required_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Set the submission count.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }
}

/// Instructor-specified substring a submission is expected to contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusPoint {
    /// Required substring, compared case-insensitively
    pub text: String,
    /// Hint shown when the substring is missing
    pub feedback: String,
    /// Concept tagged when the substring is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concept_id: Option<String>,
}

impl FocusPoint {
    /// Create a focus point without a concept tag.
    pub fn new(text: impl Into<String>, feedback: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            feedback: feedback.into(),
            concept_id: None,
        }
    }

    /// Tag the focus point with a concept.
    pub fn with_concept(mut self, concept_id: impl Into<String>) -> Self {
        self.concept_id = Some(concept_id.into());
        self
    }
}

/// The single-word edit a change-object match diagnosed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// One word replaced by another
    IncorrectWord,
    /// One extra word inserted
    AdditionalWord,
    /// One word left out
    MissingWord,
}

/// How strictly a change-object match compares tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Quote unification only; punctuation and case are significant
    Rigid,
    /// Punctuation stripped and lowercased before comparing
    Flexible,
}

/// Which rule of the cascade decided the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Outcome {
    /// Same text as an existing response
    Exact,
    /// A focus point is missing
    FocusPoint,
    /// Matches an optimal response ignoring case
    CaseInsensitive,
    /// Matches an optimal response ignoring punctuation
    PunctuationInsensitive,
    /// Matches an optimal response ignoring punctuation and case
    PunctuationAndCaseInsensitive,
    /// One word away from an optimal response
    ChangeObject {
        /// Comparison strictness that matched
        mode: MatchMode,
        /// Shape of the single-word edit
        kind: ErrorKind,
    },
    /// Matches an optimal response ignoring spaces
    WhitespaceInsensitive,
    /// A required phrase is missing
    RequiredWords,
    /// Shorter than every optimal response by more than a word
    MinLength,
    /// Longer than every optimal response by more than a word
    MaxLength,
    /// Starts with a lowercase letter
    LowercaseStart,
    /// Ends with a letter instead of punctuation
    MissingEndPunctuation,
    /// Nothing matched
    Unmatched,
}

impl Outcome {
    /// Stable label for logs and metrics.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::FocusPoint => "focus_point",
            Self::CaseInsensitive => "case_insensitive",
            Self::PunctuationInsensitive => "punctuation_insensitive",
            Self::PunctuationAndCaseInsensitive => "punctuation_and_case_insensitive",
            Self::ChangeObject {
                mode: MatchMode::Rigid,
                ..
            } => "change_object_rigid",
            Self::ChangeObject {
                mode: MatchMode::Flexible,
                ..
            } => "change_object_flexible",
            Self::WhitespaceInsensitive => "whitespace_insensitive",
            Self::RequiredWords => "required_words",
            Self::MinLength => "min_length",
            Self::MaxLength => "max_length",
            Self::LowercaseStart => "lowercase_start",
            Self::MissingEndPunctuation => "missing_end_punctuation",
            Self::Unmatched => "unmatched",
        }
    }
}

/// A response the caller should persist as a new record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseDraft {
    /// The formatted submission
    pub text: String,
    /// Question the submission answered
    pub question_id: QuestionId,
    /// Always 1 for a fresh draft
    pub count: u32,
    /// Diagnostic feedback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    /// Hint label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Optimal response the diagnosis points at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<ResponseId>,
    /// Concept tags, in the order the rule produced them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub concept_results: Vec<ConceptResult>,
}

impl ResponseDraft {
    /// A bare draft with no diagnosis.
    pub fn bare(text: impl Into<String>, question_id: QuestionId) -> Self {
        Self {
            text: text.into(),
            question_id,
            count: 1,
            feedback: None,
            author: None,
            parent_id: None,
            concept_results: Vec::new(),
        }
    }
}

/// The response a submission resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchedResponse {
    /// An existing corpus record, returned verbatim
    Existing(Response),
    /// A new record synthesized by the cascade
    Candidate(ResponseDraft),
}

/// Outcome of classifying one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// False only when the cascade found nothing to say
    pub found: bool,
    /// The submission after whitespace formatting
    pub submitted: String,
    /// The rule that decided
    pub outcome: Outcome,
    /// Existing record or new draft
    pub response: MatchedResponse,
}

impl MatchResult {
    /// True when the caller should store a new response rather than bump a count.
    pub const fn is_new_response(&self) -> bool {
        matches!(self.response, MatchedResponse::Candidate(_))
    }

    /// Feedback of the resolved response.
    pub fn feedback(&self) -> Option<&str> {
        match &self.response {
            MatchedResponse::Existing(r) => r.feedback.as_deref(),
            MatchedResponse::Candidate(d) => d.feedback.as_deref(),
        }
    }

    /// Author label of the resolved response.
    pub fn author(&self) -> Option<&str> {
        match &self.response {
            MatchedResponse::Existing(r) => r.author.as_deref(),
            MatchedResponse::Candidate(d) => d.author.as_deref(),
        }
    }

    /// Parent of the resolved response.
    pub const fn parent_id(&self) -> Option<&ResponseId> {
        match &self.response {
            MatchedResponse::Existing(r) => r.parent_id.as_ref(),
            MatchedResponse::Candidate(d) => d.parent_id.as_ref(),
        }
    }

    /// Concept tags of the resolved response.
    pub fn concept_results(&self) -> &[ConceptResult] {
        match &self.response {
            MatchedResponse::Existing(r) => &r.concept_results,
            MatchedResponse::Candidate(d) => &d.concept_results,
        }
    }

    /// The change-object error kind, if that is what decided.
    pub const fn error_kind(&self) -> Option<ErrorKind> {
        match self.outcome {
            Outcome::ChangeObject { kind, .. } => Some(kind),
            _ => None,
        }
    }
}
