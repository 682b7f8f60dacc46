//! Single-word edit detection.
//!
//! A submission and a model answer are tokenized on whitespace and diffed as
//! word sequences (longest common subsequence, whole tokens only). The diff is
//! then folded into hunks: maximal stretches of tokens that are not shared.
//! Exactly one hunk holding one removed and/or one added token is a
//! single-word edit; anything else is too far from the target to diagnose.

use crate::{
    model::{ErrorKind, MatchMode, Response},
    normalize::{flexible, normalize},
};

/// A model answer the submission is one word away from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeObjectMatch<'a> {
    pub response: &'a Response,
    pub kind: ErrorKind,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Hunk {
    removed: usize,
    added: usize,
}

impl MatchMode {
    /// Canonical form of `s` under this mode.
    pub fn apply(self, s: &str) -> String {
        match self {
            Self::Rigid => normalize(s),
            Self::Flexible => flexible(s),
        }
    }
}

/// Fold a word diff of `target` against `submission` into change hunks.
fn hunks(target: &[&str], submission: &[&str]) -> Vec<Hunk> {
    let mut hunks = Vec::new();
    let mut open: Option<Hunk> = None;

    for step in diff::slice(target, submission) {
        match step {
            diff::Result::Both(..) => {
                if let Some(hunk) = open.take() {
                    hunks.push(hunk);
                }
            }
            diff::Result::Left(_) => open.get_or_insert_with(Hunk::default).removed += 1,
            diff::Result::Right(_) => open.get_or_insert_with(Hunk::default).added += 1,
        }
    }
    if let Some(hunk) = open {
        hunks.push(hunk);
    }

    hunks
}

/// Classify the edit turning `target` into `submission`. Both strings must
/// already be normalized.
///
/// Returns `None` for identical token sequences and for anything larger than a
/// single-word edit.
pub fn classify_edit(target: &str, submission: &str) -> Option<ErrorKind> {
    let target: Vec<&str> = target.split_whitespace().collect();
    let submission: Vec<&str> = submission.split_whitespace().collect();

    match hunks(&target, &submission).as_slice() {
        [Hunk {
            removed: 1,
            added: 1,
        }] => Some(ErrorKind::IncorrectWord),
        [Hunk {
            removed: 0,
            added: 1,
        }] => Some(ErrorKind::AdditionalWord),
        [Hunk {
            removed: 1,
            added: 0,
        }] => Some(ErrorKind::MissingWord),
        _ => None,
    }
}

/// Find the first target the submission is one word away from, normalizing
/// both sides with `normalize_fn`.
pub fn diff_against_targets_with<'a, I, F>(
    submission: &str,
    targets: I,
    normalize_fn: F,
) -> Option<ChangeObjectMatch<'a>>
where
    I: IntoIterator<Item = &'a Response>,
    F: Fn(&str) -> String,
{
    let submitted = normalize_fn(submission);
    targets.into_iter().find_map(|response| {
        classify_edit(&normalize_fn(&response.text), &submitted)
            .map(|kind| ChangeObjectMatch { response, kind })
    })
}

/// Find the first target the submission is one word away from under `mode`.
pub fn diff_against_targets<'a, I>(
    submission: &str,
    targets: I,
    mode: MatchMode,
) -> Option<ChangeObjectMatch<'a>>
where
    I: IntoIterator<Item = &'a Response>,
{
    diff_against_targets_with(submission, targets, |s| mode.apply(s))
}
