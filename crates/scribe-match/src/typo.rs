//! Small-typo lookup against responses that carry their own feedback.

use crate::{corpus::ResponseCorpus, model::Response, normalize::normalize};

/// Characters a record may have beyond the submission and still count as a
/// small typo (exclusive).
const MAX_ADDED_CHARS: usize = 3;

/// True when turning `submission` into `target` only needs characters added in
/// at most one place, fewer than three of them. Characters the submission has
/// and the target lacks are not counted.
pub fn is_low_addition(submission: &str, target: &str) -> bool {
    let mut runs = 0;
    let mut added = 0;
    let mut in_run = false;

    for step in diff::chars(submission, target) {
        match step {
            diff::Result::Right(_) => {
                if !in_run {
                    runs += 1;
                    in_run = true;
                }
                added += 1;
            }
            diff::Result::Left(_) | diff::Result::Both(..) => in_run = false,
        }
    }

    runs <= 1 && added < MAX_ADDED_CHARS
}

/// First non-child response (own feedback, no parent) the submission is a
/// small typo away from. Not part of the classification cascade.
pub fn small_typo_match<'a>(submission: &str, corpus: &'a ResponseCorpus) -> Option<&'a Response> {
    let submitted = normalize(submission);
    corpus
        .non_child()
        .find(|r| is_low_addition(&submitted, &normalize(&r.text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_dropped_letter() {
        assert!(is_low_addition("The dog ran quikly.", "The dog ran quickly."));
    }

    #[test]
    fn test_two_separate_drops_rejected() {
        assert!(!is_low_addition("Th dog ran quikly.", "The dog ran quickly."));
    }

    #[test]
    fn test_three_adjacent_drops_rejected() {
        assert!(!is_low_addition("The dog ran qly.", "The dog ran quickly."));
    }

    #[test]
    fn test_small_typo_match_skips_children_and_silent_records() {
        let corpus = ResponseCorpus::new(vec![
            Response::optimal("o1", "The dog ran quickly."),
            Response::new("c1", "The dog ran quick.")
                .with_feedback("Use an adverb.")
                .with_parent("o1"),
            Response::new("n1", "The dog runs quickly.").with_feedback("Use the past tense."),
        ])
        .unwrap();

        let hit = small_typo_match("The dog run quickly.", &corpus).unwrap();
        assert_eq!(hit.id.as_str(), "n1");

        // o1 has no feedback, c1 is a child: neither is eligible
        assert!(small_typo_match("The dog ran quckly.", &corpus).is_none());
    }
}
