//! Approximate nearest-response lookup.
//!
//! [`FuzzyIndex`] is an n-gram index in the style of fuzzyset: every text is
//! lowercased, stripped of non-word characters, padded with `-` and cut into
//! overlapping grams. A query is scored by cosine similarity of gram counts,
//! trying the largest gram size first, and the best 50 candidates are re-ranked
//! by normalized Levenshtein similarity.
//!
//! This is a standalone capability; [`crate::classify`] does not consult it.

use std::collections::HashMap;

use crate::{model::Response, normalize::word_count};

const GRAM_SIZE_LOWER: usize = 2;
const GRAM_SIZE_UPPER: usize = 3;
const RERANK_POOL: usize = 50;

/// Candidates scoring below this are never returned.
pub const DEFAULT_MIN_SCORE: f64 = 0.33;

/// A scored candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyHit<'a> {
    /// Similarity in `[0, 1]`
    pub score: f64,
    /// Candidate text as originally indexed
    pub text: &'a str,
}

#[derive(Debug, Default)]
struct GramTable {
    /// Euclidean norm of each entry's gram-count vector
    norms: Vec<f64>,
    /// gram -> (entry, count in entry)
    postings: HashMap<String, Vec<(usize, usize)>>,
}

/// n-gram similarity index over a set of texts.
#[derive(Debug)]
pub struct FuzzyIndex {
    originals: Vec<String>,
    lowered: Vec<String>,
    exact: HashMap<String, usize>,
    tables: Vec<(usize, GramTable)>,
}

fn grams(value: &str, size: usize) -> Vec<String> {
    let mut simplified: Vec<char> = std::iter::once('-')
        .chain(
            value
                .to_lowercase()
                .chars()
                .filter(|c| c.is_alphanumeric() || *c == ',' || *c == ' '),
        )
        .chain(std::iter::once('-'))
        .collect();
    while simplified.len() < size {
        simplified.push('-');
    }
    simplified
        .windows(size)
        .map(|w| w.iter().collect())
        .collect()
}

fn gram_counts(value: &str, size: usize) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for gram in grams(value, size) {
        *counts.entry(gram).or_insert(0) += 1;
    }
    counts
}

fn norm(counts: &HashMap<String, usize>) -> f64 {
    counts
        .values()
        .map(|&c| (c * c) as f64)
        .sum::<f64>()
        .sqrt()
}

impl FuzzyIndex {
    /// Index the given texts. Texts equal up to case are indexed once, keeping
    /// the first spelling.
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self {
            originals: Vec::new(),
            lowered: Vec::new(),
            exact: HashMap::new(),
            tables: (GRAM_SIZE_LOWER..=GRAM_SIZE_UPPER)
                .map(|size| (size, GramTable::default()))
                .collect(),
        };
        for text in texts {
            index.add(text.as_ref());
        }
        index
    }

    /// Index every response text of a corpus.
    pub fn from_responses<'a, I>(responses: I) -> Self
    where
        I: IntoIterator<Item = &'a Response>,
    {
        Self::new(responses.into_iter().map(|r| r.text.as_str()))
    }

    fn add(&mut self, value: &str) {
        let lowered = value.to_lowercase();
        if self.exact.contains_key(&lowered) {
            return;
        }
        let entry = self.originals.len();

        for (size, table) in &mut self.tables {
            let counts = gram_counts(value, *size);
            table.norms.push(norm(&counts));
            for (gram, count) in counts {
                table.postings.entry(gram).or_default().push((entry, count));
            }
        }

        self.exact.insert(lowered.clone(), entry);
        self.originals.push(value.to_string());
        self.lowered.push(lowered);
    }

    pub fn len(&self) -> usize {
        self.originals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }

    /// Ranked candidates for `query` scoring at least `min_score`, best first.
    pub fn get(&self, query: &str, min_score: f64) -> Vec<FuzzyHit<'_>> {
        let lowered = query.to_lowercase();
        if let Some(&entry) = self.exact.get(&lowered) {
            return vec![FuzzyHit {
                score: 1.0,
                text: &self.originals[entry],
            }];
        }

        for (size, table) in self.tables.iter().rev() {
            let hits = self.lookup(table, *size, query, &lowered, min_score);
            if !hits.is_empty() {
                return hits;
            }
        }
        Vec::new()
    }

    fn lookup(
        &self,
        table: &GramTable,
        size: usize,
        query: &str,
        lowered: &str,
        min_score: f64,
    ) -> Vec<FuzzyHit<'_>> {
        let counts = gram_counts(query, size);
        let query_norm = norm(&counts);

        let mut dot: HashMap<usize, usize> = HashMap::new();
        for (gram, count) in &counts {
            if let Some(postings) = table.postings.get(gram) {
                for &(entry, entry_count) in postings {
                    *dot.entry(entry).or_insert(0) += count * entry_count;
                }
            }
        }

        let mut cosine: Vec<(usize, f64)> = dot
            .into_iter()
            .map(|(entry, product)| (entry, product as f64 / (query_norm * table.norms[entry])))
            .collect();
        // Entry order breaks ties so results are deterministic.
        cosine.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        cosine.truncate(RERANK_POOL);

        let mut reranked: Vec<(usize, f64)> = cosine
            .into_iter()
            .map(|(entry, _)| {
                (
                    entry,
                    strsim::normalized_levenshtein(&self.lowered[entry], lowered),
                )
            })
            .collect();
        reranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        reranked
            .into_iter()
            .filter(|&(_, score)| score >= min_score)
            .map(|(entry, score)| FuzzyHit {
                score,
                text: &self.originals[entry],
            })
            .collect()
    }
}

/// Closest response to `submission`, if it is close enough.
///
/// The top candidate of a [`FuzzyIndex`] over every response is accepted only
/// when its score exceeds `(w - 3) / w`, `w` being the candidate's word count,
/// and the submission has no more words than the candidate.
pub fn fuzzy_find<'a>(submission: &str, responses: &'a [Response]) -> Option<&'a Response> {
    let index = FuzzyIndex::from_responses(responses);
    let best = index.get(submission, DEFAULT_MIN_SCORE).into_iter().next()?;

    let candidate_words = word_count(best.text);
    if candidate_words == 0 {
        return None;
    }
    let threshold = (candidate_words as f64 - 3.0) / candidate_words as f64;
    if best.score <= threshold || word_count(submission) > candidate_words {
        tracing::trace!(score = best.score, threshold, "fuzzy candidate rejected");
        return None;
    }

    responses.iter().find(|r| r.text == best.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grams_are_padded() {
        assert_eq!(grams("a", 3), vec!["-a-"]);
        assert_eq!(grams("Ab!", 2), vec!["-a", "ab", "b-"]);
    }

    #[test]
    fn test_exact_lookup_scores_one() {
        let index = FuzzyIndex::new(["The dog ran quickly."]);
        let hits = index.get("the dog ran quickly.", DEFAULT_MIN_SCORE);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].score, 1.0);
        assert_eq!(hits[0].text, "The dog ran quickly.");
    }

    #[test]
    fn test_close_text_ranks_first() {
        let index = FuzzyIndex::new([
            "The cat slept all day.",
            "The dog ran quickly.",
            "Birds sing at dawn.",
        ]);
        let hits = index.get("The dog ran quikly.", DEFAULT_MIN_SCORE);
        assert_eq!(hits[0].text, "The dog ran quickly.");
        assert!(hits[0].score > 0.9);
    }

    #[test]
    fn test_case_duplicates_indexed_once() {
        let index = FuzzyIndex::new(["Hello there.", "hello there."]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_fuzzy_find_accepts_typo() {
        let responses = vec![
            Response::optimal("o1", "The dog ran quickly."),
            Response::new("e1", "The cat slept all day."),
        ];
        let found = fuzzy_find("The dog ran quikly.", &responses).unwrap();
        assert_eq!(found.id.as_str(), "o1");
    }

    #[test]
    fn test_fuzzy_find_rejects_longer_submission() {
        let responses = vec![Response::optimal("o1", "The dog ran quickly.")];
        assert!(fuzzy_find("The dog ran quickly and far.", &responses).is_none());
    }

    #[test]
    fn test_fuzzy_find_rejects_unrelated() {
        let responses = vec![Response::optimal(
            "o1",
            "Although it was raining, the children played outside in the park.",
        )];
        assert!(fuzzy_find("My uncle repairs old bicycles.", &responses).is_none());
    }

    #[test]
    fn test_fuzzy_find_empty_corpus() {
        assert!(fuzzy_find("Anything.", &[]).is_none());
    }
}
