//! The classification cascade.
//!
//! A submission is run through an ordered list of [`Rule`]s and the first rule
//! with something to say decides the result. Earlier rules diagnose content;
//! the cheap surface checks at the end (length, first letter, final
//! punctuation) only fire once every content check has passed on it.
//!
//! The order is fixed and exposed as [`RULES`]:
//!
//! | # | Rule | Compared against |
//! |---|------|------------------|
//! | 1 | exact | every response |
//! | 2 | focus point | the question's focus points |
//! | 3 | case insensitive | optimal responses |
//! | 4 | punctuation insensitive | optimal responses |
//! | 5 | punctuation and case insensitive | optimal responses |
//! | 6 | rigid change object | optimal responses |
//! | 7 | flexible change object | optimal responses |
//! | 8 | whitespace insensitive | optimal responses |
//! | 9 | required words | optimal responses |
//! | 10 | minimum length | optimal responses (two or more) |
//! | 11 | maximum length | optimal responses (two or more) |
//! | 12 | lowercase start | top optimal response |
//! | 13 | missing end punctuation | top optimal response |

use crate::{
    change_object::diff_against_targets,
    feedback::{authors, concepts, strings},
    focus_point::first_violation,
    model::{
        ConceptResult, ErrorKind, MatchMode, MatchResult, MatchedResponse, Outcome, Response,
        ResponseDraft, ResponseId,
    },
    normalize::{
        collapse_whitespace, flexible, normalize, remove_punctuation, remove_spaces, word_count,
    },
    question::Question,
    required_words::check_missing,
};

/// A formatted submission paired with the question it answers.
#[derive(Debug, Clone, Copy)]
pub struct Submission<'q> {
    /// Question being answered
    pub question: &'q Question,
    /// Submission after trimming and whitespace collapsing
    pub text: &'q str,
}

/// A new diagnostic response synthesized by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnosis {
    /// Rule that produced it
    pub outcome: Outcome,
    /// Student-facing hint
    pub feedback: String,
    /// Hint label
    pub author: &'static str,
    /// Optimal response the hint points at
    pub parent_id: Option<ResponseId>,
    /// Concepts the submission got wrong
    pub concept_results: Vec<ConceptResult>,
}

/// What a rule decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict<'q> {
    /// The submission is an existing response
    Existing(&'q Response),
    /// The submission gets a new diagnostic response
    Diagnosed(Diagnosis),
}

/// One step of the cascade.
pub trait Rule: Sync {
    /// Stable name, used in logs and to assert ordering.
    fn name(&self) -> &'static str;

    /// `None` means "no match, try the next rule".
    fn apply<'q>(&self, submission: &Submission<'q>) -> Option<Verdict<'q>>;
}

fn diagnosed<I, S>(
    outcome: Outcome,
    feedback: impl Into<String>,
    author: &'static str,
    parent: &Response,
    concept_ids: I,
) -> Verdict<'static>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Verdict::Diagnosed(Diagnosis {
        outcome,
        feedback: feedback.into(),
        author,
        parent_id: Some(parent.id.clone()),
        concept_results: concept_ids
            .into_iter()
            .map(ConceptResult::incorrect)
            .collect(),
    })
}

/// Rule 1: same text as any response, after quote unification.
#[derive(Debug)]
pub struct ExactMatch;

impl Rule for ExactMatch {
    fn name(&self) -> &'static str {
        "exact"
    }

    fn apply<'q>(&self, submission: &Submission<'q>) -> Option<Verdict<'q>> {
        let submitted = normalize(submission.text);
        submission
            .question
            .responses
            .iter()
            .find(|r| normalize(&r.text) == submitted)
            .map(Verdict::Existing)
    }
}

/// Rule 2: a focus point is missing from the submission.
#[derive(Debug)]
pub struct FocusPointCheck;

impl Rule for FocusPointCheck {
    fn name(&self) -> &'static str {
        "focus_point"
    }

    fn apply<'q>(&self, submission: &Submission<'q>) -> Option<Verdict<'q>> {
        let question = submission.question;
        let violation = first_violation(submission.text, &question.focus_points)?;
        let top = question.responses.top_optimal()?;
        Some(diagnosed(
            Outcome::FocusPoint,
            violation.feedback.as_str(),
            authors::FOCUS_POINT,
            top,
            violation.concept_id.iter().cloned(),
        ))
    }
}

/// Rules 3, 4, 5 and 8: equal to an optimal response once both sides are
/// reduced to the same comparison key.
#[derive(Debug)]
pub struct KeyedMatch {
    name: &'static str,
    key: fn(&str) -> String,
    outcome: Outcome,
    feedback: &'static str,
    author: &'static str,
    concept_ids: &'static [&'static str],
}

fn case_key(s: &str) -> String {
    normalize(s).to_lowercase()
}

fn punctuation_key(s: &str) -> String {
    remove_punctuation(&normalize(s))
}

fn whitespace_key(s: &str) -> String {
    remove_spaces(&normalize(s))
}

impl Rule for KeyedMatch {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply<'q>(&self, submission: &Submission<'q>) -> Option<Verdict<'q>> {
        let submitted = (self.key)(submission.text);
        let matched = submission
            .question
            .responses
            .optimal()
            .find(|r| (self.key)(&r.text) == submitted)?;
        Some(diagnosed(
            self.outcome,
            self.feedback,
            self.author,
            matched,
            self.concept_ids.iter().copied(),
        ))
    }
}

/// Rule 3
pub static CASE_INSENSITIVE: KeyedMatch = KeyedMatch {
    name: "case_insensitive",
    key: case_key,
    outcome: Outcome::CaseInsensitive,
    feedback: strings::CASE_ERROR,
    author: authors::CAPITALIZATION,
    concept_ids: &[concepts::CAPITALIZATION],
};

/// Rule 4
pub static PUNCTUATION_INSENSITIVE: KeyedMatch = KeyedMatch {
    name: "punctuation_insensitive",
    key: punctuation_key,
    outcome: Outcome::PunctuationInsensitive,
    feedback: strings::PUNCTUATION_ERROR,
    author: authors::PUNCTUATION,
    concept_ids: &[concepts::PUNCTUATION],
};

/// Rule 5
pub static PUNCTUATION_AND_CASE_INSENSITIVE: KeyedMatch = KeyedMatch {
    name: "punctuation_and_case_insensitive",
    key: flexible,
    outcome: Outcome::PunctuationAndCaseInsensitive,
    feedback: strings::PUNCTUATION_AND_CASE_ERROR,
    author: authors::PUNCTUATION_AND_CASE,
    concept_ids: &[concepts::CAPITALIZATION, concepts::PUNCTUATION],
};

/// Rule 8
pub static WHITESPACE_INSENSITIVE: KeyedMatch = KeyedMatch {
    name: "whitespace_insensitive",
    key: whitespace_key,
    outcome: Outcome::WhitespaceInsensitive,
    feedback: strings::WHITESPACE_ERROR,
    author: authors::WHITESPACE,
    concept_ids: &[concepts::WHITESPACE],
};

/// Rules 6 and 7: one word away from an optimal response.
#[derive(Debug)]
pub struct ChangeObjectCheck {
    mode: MatchMode,
}

impl ChangeObjectCheck {
    const fn author(&self, kind: ErrorKind) -> &'static str {
        match (self.mode, kind) {
            (MatchMode::Rigid, ErrorKind::IncorrectWord) => authors::MODIFIED_WORD,
            (MatchMode::Rigid, ErrorKind::AdditionalWord) => authors::ADDITIONAL_WORD,
            (MatchMode::Rigid, ErrorKind::MissingWord) => authors::MISSING_WORD,
            (MatchMode::Flexible, ErrorKind::IncorrectWord) => authors::FLEXIBLE_MODIFIED_WORD,
            (MatchMode::Flexible, ErrorKind::AdditionalWord) => authors::FLEXIBLE_ADDITIONAL_WORD,
            (MatchMode::Flexible, ErrorKind::MissingWord) => authors::FLEXIBLE_MISSING_WORD,
        }
    }
}

const fn change_feedback(kind: ErrorKind) -> (&'static str, &'static str) {
    match kind {
        ErrorKind::IncorrectWord => (strings::MODIFIED_WORD_ERROR, concepts::MODIFIED_WORD),
        ErrorKind::AdditionalWord => (strings::ADDITIONAL_WORD_ERROR, concepts::ADDITIONAL_WORD),
        ErrorKind::MissingWord => (strings::MISSING_WORD_ERROR, concepts::MISSING_WORD),
    }
}

impl Rule for ChangeObjectCheck {
    fn name(&self) -> &'static str {
        match self.mode {
            MatchMode::Rigid => "change_object_rigid",
            MatchMode::Flexible => "change_object_flexible",
        }
    }

    fn apply<'q>(&self, submission: &Submission<'q>) -> Option<Verdict<'q>> {
        let found = diff_against_targets(
            submission.text,
            submission.question.responses.optimal(),
            self.mode,
        )?;
        let (feedback, concept) = change_feedback(found.kind);
        Some(diagnosed(
            Outcome::ChangeObject {
                mode: self.mode,
                kind: found.kind,
            },
            feedback,
            self.author(found.kind),
            found.response,
            [concept],
        ))
    }
}

/// Rule 6
pub static CHANGE_OBJECT_RIGID: ChangeObjectCheck = ChangeObjectCheck {
    mode: MatchMode::Rigid,
};

/// Rule 7
pub static CHANGE_OBJECT_FLEXIBLE: ChangeObjectCheck = ChangeObjectCheck {
    mode: MatchMode::Flexible,
};

/// Rule 9: an optimal response declares a phrase the submission lacks.
#[derive(Debug)]
pub struct RequiredWordsCheck;

impl Rule for RequiredWordsCheck {
    fn name(&self) -> &'static str {
        "required_words"
    }

    fn apply<'q>(&self, submission: &Submission<'q>) -> Option<Verdict<'q>> {
        let responses = &submission.question.responses;
        let missing = check_missing(submission.text, responses.optimal())?;
        let top = responses.top_optimal()?;
        Some(diagnosed(
            Outcome::RequiredWords,
            missing.feedback,
            authors::REQUIRED_WORDS,
            top,
            [concepts::MISSING_WORD],
        ))
    }
}

/// Word counts of the optimal responses, or `None` when there are fewer than
/// two of them and length checks do not apply.
fn optimal_lengths(question: &Question) -> Option<Vec<(&Response, usize, usize)>> {
    let lengths: Vec<_> = question
        .responses
        .optimal()
        .map(|r| {
            let text = normalize(&r.text);
            (r, word_count(&text), text.chars().count())
        })
        .collect();
    (lengths.len() >= 2).then_some(lengths)
}

/// Rule 10: more than one word shorter than the shortest optimal response.
#[derive(Debug)]
pub struct MinLengthCheck;

impl Rule for MinLengthCheck {
    fn name(&self) -> &'static str {
        "min_length"
    }

    fn apply<'q>(&self, submission: &Submission<'q>) -> Option<Verdict<'q>> {
        let lengths = optimal_lengths(submission.question)?;
        let floor = lengths.iter().map(|&(_, words, _)| words).min()?.checked_sub(1)?;
        if word_count(submission.text) >= floor {
            return None;
        }
        // Shortest by characters; the first one wins a tie.
        let (exemplar, _, _) = lengths.iter().min_by_key(|&&(_, _, chars)| chars)?;
        Some(diagnosed(
            Outcome::MinLength,
            strings::MIN_LENGTH_ERROR,
            authors::MISSING_DETAILS,
            exemplar,
            [concepts::MISSING_WORD],
        ))
    }
}

/// Rule 11: more than one word longer than the longest optimal response.
#[derive(Debug)]
pub struct MaxLengthCheck;

impl Rule for MaxLengthCheck {
    fn name(&self) -> &'static str {
        "max_length"
    }

    fn apply<'q>(&self, submission: &Submission<'q>) -> Option<Verdict<'q>> {
        let lengths = optimal_lengths(submission.question)?;
        let ceiling = lengths.iter().map(|&(_, words, _)| words).max()? + 1;
        if word_count(submission.text) <= ceiling {
            return None;
        }
        // Longest by characters; the last one wins a tie.
        let (exemplar, _, _) = lengths.iter().max_by_key(|&&(_, _, chars)| chars)?;
        Some(diagnosed(
            Outcome::MaxLength,
            strings::MAX_LENGTH_ERROR,
            authors::NOT_CONCISE,
            exemplar,
            [concepts::ADDITIONAL_WORD],
        ))
    }
}

/// Rule 12: the first character is a lowercase letter.
#[derive(Debug)]
pub struct LowercaseStartCheck;

impl Rule for LowercaseStartCheck {
    fn name(&self) -> &'static str {
        "lowercase_start"
    }

    fn apply<'q>(&self, submission: &Submission<'q>) -> Option<Verdict<'q>> {
        if !submission.text.chars().next().is_some_and(char::is_lowercase) {
            return None;
        }
        let top = submission.question.responses.top_optimal()?;
        Some(diagnosed(
            Outcome::LowercaseStart,
            strings::CASE_ERROR,
            authors::CAPITALIZATION,
            top,
            [concepts::CAPITALIZATION_START],
        ))
    }
}

/// Rule 13: the last character is a letter, so end punctuation is missing.
#[derive(Debug)]
pub struct MissingEndPunctuationCheck;

impl Rule for MissingEndPunctuationCheck {
    fn name(&self) -> &'static str {
        "missing_end_punctuation"
    }

    fn apply<'q>(&self, submission: &Submission<'q>) -> Option<Verdict<'q>> {
        if !submission
            .text
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphabetic())
        {
            return None;
        }
        let top = submission.question.responses.top_optimal()?;
        Some(diagnosed(
            Outcome::MissingEndPunctuation,
            strings::PUNCTUATION_ERROR,
            authors::PUNCTUATION_END,
            top,
            [concepts::PUNCTUATION_END],
        ))
    }
}

/// The cascade, in evaluation order.
pub static RULES: &[&dyn Rule] = &[
    &ExactMatch,
    &FocusPointCheck,
    &CASE_INSENSITIVE,
    &PUNCTUATION_INSENSITIVE,
    &PUNCTUATION_AND_CASE_INSENSITIVE,
    &CHANGE_OBJECT_RIGID,
    &CHANGE_OBJECT_FLEXIBLE,
    &WHITESPACE_INSENSITIVE,
    &RequiredWordsCheck,
    &MinLengthCheck,
    &MaxLengthCheck,
    &LowercaseStartCheck,
    &MissingEndPunctuationCheck,
];

/// An ordered rule list.
#[derive(Clone, Copy)]
pub struct Cascade<'r> {
    rules: &'r [&'r dyn Rule],
}

impl std::fmt::Debug for Cascade<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|r| r.name()))
            .finish()
    }
}

impl Default for Cascade<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl Cascade<'static> {
    /// The standard thirteen-rule cascade.
    pub const fn standard() -> Self {
        Self { rules: RULES }
    }
}

impl<'r> Cascade<'r> {
    /// A cascade over a custom rule list.
    pub const fn new(rules: &'r [&'r dyn Rule]) -> Self {
        Self { rules }
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Classify a raw submission.
    pub fn classify(&self, question: &Question, raw: &str) -> MatchResult {
        let formatted = collapse_whitespace(raw);
        let submission = Submission {
            question,
            text: &formatted,
        };

        let decided = self
            .rules
            .iter()
            .find_map(|rule| rule.apply(&submission).map(|verdict| (rule.name(), verdict)));
        let rule = decided.as_ref().map_or("none", |(name, _)| *name);

        let result = match decided.map(|(_, verdict)| verdict) {
            Some(Verdict::Existing(response)) => MatchResult {
                found: true,
                submitted: formatted.clone(),
                outcome: Outcome::Exact,
                response: MatchedResponse::Existing(response.clone()),
            },
            Some(Verdict::Diagnosed(diagnosis)) => MatchResult {
                found: true,
                submitted: formatted.clone(),
                outcome: diagnosis.outcome,
                response: MatchedResponse::Candidate(ResponseDraft {
                    feedback: Some(diagnosis.feedback),
                    author: Some(diagnosis.author.to_string()),
                    parent_id: diagnosis.parent_id,
                    concept_results: diagnosis.concept_results,
                    ..ResponseDraft::bare(formatted.clone(), question.id.clone())
                }),
            },
            None => MatchResult {
                found: false,
                submitted: formatted.clone(),
                outcome: Outcome::Unmatched,
                response: MatchedResponse::Candidate(ResponseDraft::bare(
                    formatted.clone(),
                    question.id.clone(),
                )),
            },
        };

        tracing::debug!(
            question_id = %question.id,
            rule,
            outcome = result.outcome.label(),
            found = result.found,
            "submission classified"
        );

        result
    }
}

/// Classify a raw submission against a question with the standard cascade.
pub fn classify(question: &Question, raw: &str) -> MatchResult {
    Cascade::standard().classify(question, raw)
}
