//! The set of known responses for one question.
//!
//! Responses are stored in insertion order (corpus order matters: "first
//! optimal" and "first qualifying target" are defined by it) with an id index
//! on the side. `parent_id` is only ever a lookup key into the same arena.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Response, ResponseId};

/// Integrity problems found while building a corpus.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CorpusError {
    #[error("duplicate response id: {0}")]
    DuplicateId(ResponseId),
    #[error("response {child} references unknown parent {parent}")]
    UnknownParent {
        child: ResponseId,
        parent: ResponseId,
    },
    #[error("response {child} references parent {parent}, which is not optimal")]
    ParentNotOptimal {
        child: ResponseId,
        parent: ResponseId,
    },
}

/// Arena of responses keyed by id, in corpus order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Response>", into = "Vec<Response>")]
pub struct ResponseCorpus {
    responses: Vec<Response>,
    index: HashMap<ResponseId, usize>,
}

impl ResponseCorpus {
    /// Build a corpus, rejecting duplicate ids and parents that are missing or
    /// not optimal.
    pub fn new(responses: Vec<Response>) -> Result<Self, CorpusError> {
        let mut index = HashMap::with_capacity(responses.len());
        for (position, response) in responses.iter().enumerate() {
            if index.insert(response.id.clone(), position).is_some() {
                return Err(CorpusError::DuplicateId(response.id.clone()));
            }
        }

        for response in &responses {
            let Some(parent) = &response.parent_id else {
                continue;
            };
            match index.get(parent).map(|&i| &responses[i]) {
                None => {
                    return Err(CorpusError::UnknownParent {
                        child: response.id.clone(),
                        parent: parent.clone(),
                    });
                }
                Some(p) if !p.optimal => {
                    return Err(CorpusError::ParentNotOptimal {
                        child: response.id.clone(),
                        parent: parent.clone(),
                    });
                }
                Some(_) => {}
            }
        }

        Ok(Self { responses, index })
    }

    /// Look a response up by id.
    pub fn get(&self, id: &ResponseId) -> Option<&Response> {
        self.index.get(id).map(|&i| &self.responses[i])
    }

    /// All responses in corpus order.
    pub fn iter(&self) -> std::slice::Iter<'_, Response> {
        self.responses.iter()
    }

    /// All responses as a slice.
    pub fn as_slice(&self) -> &[Response] {
        &self.responses
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    /// Model answers in corpus order.
    pub fn optimal(&self) -> impl Iterator<Item = &Response> {
        self.responses.iter().filter(|r| r.optimal)
    }

    /// Model answers collected into a vector.
    pub fn optimal_responses(&self) -> Vec<&Response> {
        self.optimal().collect()
    }

    /// The first optimal response in corpus order, used as the default parent
    /// for generic hints.
    pub fn top_optimal(&self) -> Option<&Response> {
        self.optimal().next()
    }

    /// Responses that carry their own feedback and do not hang off a parent.
    pub fn non_child(&self) -> impl Iterator<Item = &Response> {
        self.responses
            .iter()
            .filter(|r| r.parent_id.is_none() && r.feedback.is_some())
    }

    /// Parent of a response, if it has one.
    pub fn parent_of(&self, response: &Response) -> Option<&Response> {
        response.parent_id.as_ref().and_then(|id| self.get(id))
    }

    /// Feedback of a response followed by its parent's, for display chaining.
    pub fn feedback_chain(&self, id: &ResponseId) -> Vec<&str> {
        let mut chain = Vec::new();
        let mut current = self.get(id);
        // Bounded so a parent cycle cannot loop forever.
        for _ in 0..=self.responses.len() {
            let Some(response) = current else { break };
            if let Some(feedback) = response.feedback.as_deref() {
                chain.push(feedback);
            }
            current = self.parent_of(response);
        }
        chain
    }
}

impl TryFrom<Vec<Response>> for ResponseCorpus {
    type Error = CorpusError;

    fn try_from(responses: Vec<Response>) -> Result<Self, Self::Error> {
        Self::new(responses)
    }
}

impl From<ResponseCorpus> for Vec<Response> {
    fn from(corpus: ResponseCorpus) -> Self {
        corpus.responses
    }
}

impl<'a> IntoIterator for &'a ResponseCorpus {
    type Item = &'a Response;
    type IntoIter = std::slice::Iter<'a, Response>;

    fn into_iter(self) -> Self::IntoIter {
        self.responses.iter()
    }
}
