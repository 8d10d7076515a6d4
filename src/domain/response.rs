use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::{
    domain::{heliogram::Heliogram, samples::sample_responses},
    foundation::clock::Clock,
    foundation::error::{HeliographError, HeliographResult},
    store::{
        ids::{RESPONSE_ID, generate_id},
        local::{LocalStore, StoreConfig},
        storage::KeyValueStorage,
    },
};

/// Default storage key for the response collection.
pub const RESPONSES_KEY: &str = "heliograph.responses";

/// Scalar answer value.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// Rating, scale position or reaction index.
    Number(f64),
    /// Free text or reaction label.
    Text(String),
}

impl AnswerValue {
    /// Numeric value, if any.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(_) => None,
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }
}

/// Answer to one question.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    /// Answered question.
    pub question_id: String,
    /// Answer.
    pub value: AnswerValue,
}

/// Who submitted a response.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Respondent {
    /// Display name.
    pub name: String,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Role or title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Submitted answers to one heliogram. Immutable once created.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeliogramResponse {
    /// `resp_` id.
    pub id: String,
    /// Weak reference to the answered heliogram.
    pub heliogram_id: String,
    /// Answers in submission order.
    pub responses: Vec<QuestionResponse>,
    /// Submitter.
    pub respondent: Respondent,
    /// Submission instant.
    pub submitted_at: DateTime<Utc>,
    /// Where the submission came from (e.g. `"link"`, `"embed"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl HeliogramResponse {
    /// Answer to `question_id`.
    pub fn answer(&self, question_id: &str) -> Option<&AnswerValue> {
        self.responses
            .iter()
            .find(|r| r.question_id == question_id)
            .map(|r| &r.value)
    }
}

/// Input to [`ResponseStore::create`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResponse {
    /// Answered heliogram.
    pub heliogram_id: String,
    /// Answers.
    pub responses: Vec<QuestionResponse>,
    /// Submitter.
    pub respondent: Respondent,
    /// Optional source tag.
    #[serde(default)]
    pub source: Option<String>,
}

/// Per-question aggregate over a set of responses.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSummary {
    /// Question id.
    pub question_id: String,
    /// Question label.
    pub label: String,
    /// Number of non-blank answers.
    pub answered: usize,
    /// Mean of numeric answers, when there are any.
    pub mean: Option<f64>,
}

/// Summarize `responses` against the questions of `heliogram`, in question render order.
pub fn summarize<'a>(
    heliogram: &Heliogram,
    responses: impl IntoIterator<Item = &'a HeliogramResponse>,
) -> Vec<QuestionSummary> {
    let responses: Vec<&HeliogramResponse> = responses
        .into_iter()
        .filter(|r| r.heliogram_id == heliogram.id)
        .collect();

    heliogram
        .ordered_questions()
        .into_iter()
        .map(|q| {
            let answers: Vec<&AnswerValue> = responses
                .iter()
                .filter_map(|r| r.answer(&q.id))
                .filter(|v| !v.is_blank())
                .collect();
            let numbers: Vec<f64> = answers.iter().filter_map(|v| v.as_number()).collect();
            let mean = (!numbers.is_empty())
                .then(|| numbers.iter().sum::<f64>() / numbers.len() as f64);
            QuestionSummary {
                question_id: q.id.clone(),
                label: q.label.clone(),
                answered: answers.len(),
                mean,
            }
        })
        .collect()
}

/// Response collection over a [`LocalStore`].
pub struct ResponseStore {
    inner: LocalStore<HeliogramResponse>,
    clock: Rc<dyn Clock>,
}

impl ResponseStore {
    /// Store under [`RESPONSES_KEY`], seeded with the sample responses.
    pub fn new(storage: Rc<dyn KeyValueStorage>, clock: Rc<dyn Clock>) -> Self {
        Self::with_config(
            storage,
            StoreConfig::new(RESPONSES_KEY),
            sample_responses(),
            clock,
        )
    }

    /// Store with explicit config and default collection.
    pub fn with_config(
        storage: Rc<dyn KeyValueStorage>,
        config: StoreConfig,
        default: Vec<HeliogramResponse>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            inner: LocalStore::new(storage, config, default),
            clock,
        }
    }

    /// Load the persisted collection (first call only).
    pub fn hydrate(&mut self) {
        self.inner.hydrate();
    }

    /// `true` once hydration has run.
    pub fn is_hydrated(&self) -> bool {
        self.inner.is_hydrated()
    }

    /// All responses.
    pub fn list(&self) -> &[HeliogramResponse] {
        self.inner.get()
    }

    /// Response with `id`.
    pub fn get_by_id(&self, id: &str) -> Option<&HeliogramResponse> {
        self.list().iter().find(|r| r.id == id)
    }

    /// Responses submitted for `heliogram_id`, in submission order.
    pub fn list_by_heliogram(&self, heliogram_id: &str) -> Vec<&HeliogramResponse> {
        self.list()
            .iter()
            .filter(|r| r.heliogram_id == heliogram_id)
            .collect()
    }

    /// Number of responses for `heliogram_id`.
    pub fn count_for(&self, heliogram_id: &str) -> usize {
        self.list()
            .iter()
            .filter(|r| r.heliogram_id == heliogram_id)
            .count()
    }

    /// Record a submission.
    pub fn create(&mut self, input: NewResponse) -> HeliographResult<HeliogramResponse> {
        if input.heliogram_id.trim().is_empty() {
            return Err(HeliographError::validation(
                "response must reference a heliogram",
            ));
        }
        if input.respondent.name.trim().is_empty() {
            return Err(HeliographError::validation("respondent name must not be blank"));
        }

        let resp = HeliogramResponse {
            id: generate_id(RESPONSE_ID),
            heliogram_id: input.heliogram_id,
            responses: input.responses,
            respondent: input.respondent,
            submitted_at: self.clock.now(),
            source: input.source,
        };

        let created = resp.clone();
        self.inner.set_with(|prev| {
            let mut next = prev.to_vec();
            next.push(resp);
            next
        })?;
        tracing::debug!(id = %created.id, heliogram = %created.heliogram_id, "recorded response");
        Ok(created)
    }

    /// Remove response `id`. Returns `Ok(false)` when it did not exist.
    pub fn delete(&mut self, id: &str) -> HeliographResult<bool> {
        self.inner.hydrate();
        if self.get_by_id(id).is_none() {
            tracing::debug!(id, "delete of unknown response ignored");
            return Ok(false);
        }
        self.inner
            .set_with(|prev| prev.iter().filter(|r| r.id != id).cloned().collect())?;
        Ok(true)
    }

    /// Remove every response for `heliogram_id`; returns how many were removed.
    pub fn delete_for_heliogram(&mut self, heliogram_id: &str) -> HeliographResult<usize> {
        self.inner.hydrate();
        let n = self.count_for(heliogram_id);
        if n == 0 {
            return Ok(0);
        }
        self.inner.set_with(|prev| {
            prev.iter()
                .filter(|r| r.heliogram_id != heliogram_id)
                .cloned()
                .collect()
        })?;
        Ok(n)
    }

    /// Restore the sample collection.
    pub fn reset(&mut self) -> HeliographResult<()> {
        self.inner.reset()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/domain/response.rs"]
mod tests;
