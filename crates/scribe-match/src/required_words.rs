//! Detects required phrases a submission leaves out.

use crate::model::{Response, ResponseId};

/// Required phrases one optimal response declares that the submission lacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingWords {
    /// Optimal response declaring the phrases
    pub response_id: ResponseId,
    /// Missing phrases, in declared order
    pub missing: Vec<String>,
    /// Student-facing hint naming the gap
    pub feedback: String,
}

fn feedback_for(missing: &[String]) -> String {
    match missing {
        [one] => format!(
            "Revise your sentence to include the word \"{one}\". You may have misspelled it."
        ),
        many => {
            let quoted: Vec<String> = many.iter().map(|w| format!("\"{w}\"")).collect();
            format!(
                "Revise your sentence to include the words {}. You may have misspelled them.",
                quoted.join(", ")
            )
        }
    }
}

/// Return the first optimal response with a required phrase absent from the
/// submission. Matching is a case-insensitive substring test.
pub fn check_missing<'a, I>(submission: &str, optimal: I) -> Option<MissingWords>
where
    I: IntoIterator<Item = &'a Response>,
{
    let lowered = submission.to_lowercase();

    optimal.into_iter().find_map(|response| {
        let missing: Vec<String> = response
            .required_words
            .iter()
            .filter(|phrase| !phrase.trim().is_empty())
            .filter(|phrase| !lowered.contains(&phrase.to_lowercase()))
            .cloned()
            .collect();

        (!missing.is_empty()).then(|| MissingWords {
            response_id: response.id.clone(),
            feedback: feedback_for(&missing),
            missing,
        })
    })
}
