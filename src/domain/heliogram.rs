use std::rc::Rc;

use chrono::{DateTime, Utc};

use crate::{
    domain::samples::sample_heliograms,
    foundation::clock::{Clock, strictly_after},
    foundation::error::{HeliographError, HeliographResult},
    store::{
        ids::{HELIOGRAM_ID, QUESTION_ID, generate_id},
        local::{LocalStore, StoreConfig},
        storage::KeyValueStorage,
    },
};

/// Default storage key for the heliogram collection.
pub const HELIOGRAMS_KEY: &str = "heliograph.heliograms";

/// Lifecycle state of a heliogram.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeliogramStatus {
    /// Being edited; not accepting responses.
    #[default]
    Draft,
    /// Accepting responses.
    Active,
    /// No longer accepting responses.
    Closed,
}

/// Kind-specific part of a question.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionKind {
    /// Free-form text answer.
    Text {
        /// Hint shown in the empty input.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
        /// Render as a multi-line field.
        #[serde(default)]
        multiline: bool,
    },
    /// Star rating from 1 to `max_rating`.
    #[serde(rename_all = "camelCase")]
    Rating {
        /// Highest selectable rating.
        max_rating: u8,
    },
    /// Pick one reaction (emoji or short label).
    Reaction {
        /// Available reactions, in display order.
        options: Vec<String>,
    },
    /// Numeric scale between `min` and `max`.
    #[serde(rename_all = "camelCase")]
    Scale {
        /// Lowest value.
        min: i32,
        /// Highest value.
        max: i32,
        /// Caption under the low end.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_label: Option<String>,
        /// Caption under the high end.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_label: Option<String>,
    },
}

impl QuestionKind {
    fn validate(&self) -> HeliographResult<()> {
        match self {
            Self::Text { .. } => Ok(()),
            Self::Rating { max_rating } => {
                if *max_rating == 0 {
                    return Err(HeliographError::validation("rating max must be > 0"));
                }
                Ok(())
            }
            Self::Reaction { options } => {
                if options.is_empty() {
                    return Err(HeliographError::validation(
                        "reaction question needs at least one option",
                    ));
                }
                Ok(())
            }
            Self::Scale { min, max, .. } => {
                if min >= max {
                    return Err(HeliographError::validation("scale min must be < max"));
                }
                Ok(())
            }
        }
    }

    /// `true` when a numeric answer is in range for this kind. Text answers always pass.
    pub fn accepts_number(&self, v: f64) -> bool {
        match self {
            Self::Text { .. } => true,
            Self::Rating { max_rating } => {
                v.fract() == 0.0 && (1.0..=f64::from(*max_rating)).contains(&v)
            }
            Self::Reaction { options } => {
                v.fract() == 0.0 && v >= 0.0 && (v as usize) < options.len()
            }
            Self::Scale { min, max, .. } => (f64::from(*min)..=f64::from(*max)).contains(&v),
        }
    }
}

/// One question of a heliogram.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// `q_` id, unique within its heliogram.
    pub id: String,
    /// Prompt text.
    pub label: String,
    /// Answer required before submission.
    #[serde(default)]
    pub required: bool,
    /// Render position; not required to be unique.
    #[serde(default)]
    pub order: u32,
    /// Kind-specific fields.
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// Free-form project/client metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeliogramContext {
    /// Project name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Client name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<String>,
    /// Free tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Survey definition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heliogram {
    /// `hg_` id; immutable after creation.
    pub id: String,
    /// Title.
    pub title: String,
    /// Optional longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Questions, rendered by `order`.
    pub questions: Vec<Question>,
    /// Lifecycle state.
    pub status: HeliogramStatus,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Last modification instant; never before `created_at`.
    pub updated_at: DateTime<Utc>,
    /// Optional metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<HeliogramContext>,
}

impl Heliogram {
    /// Questions sorted by `order`, ties kept in stored order.
    pub fn ordered_questions(&self) -> Vec<&Question> {
        let mut qs: Vec<&Question> = self.questions.iter().collect();
        qs.sort_by_key(|q| q.order);
        qs
    }

    /// Question with `id`.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

/// Question as supplied to [`HeliogramStore::create`]; a missing id is generated.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestion {
    /// Existing id to keep, if any.
    #[serde(default)]
    pub id: Option<String>,
    /// Prompt text.
    pub label: String,
    /// Answer required before submission.
    #[serde(default)]
    pub required: bool,
    /// Render position.
    #[serde(default)]
    pub order: u32,
    /// Kind-specific fields.
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl NewQuestion {
    fn into_question(self) -> Question {
        Question {
            id: self.id.unwrap_or_else(|| generate_id(QUESTION_ID)),
            label: self.label,
            required: self.required,
            order: self.order,
            kind: self.kind,
        }
    }
}

/// Input to [`HeliogramStore::create`].
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHeliogram {
    /// Title; must not be blank.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Questions.
    #[serde(default)]
    pub questions: Vec<NewQuestion>,
    /// Initial status.
    #[serde(default)]
    pub status: HeliogramStatus,
    /// Optional metadata.
    #[serde(default)]
    pub context: Option<HeliogramContext>,
}

/// Partial update; `None` fields are left unchanged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeliogramPatch {
    /// New title.
    pub title: Option<String>,
    /// New description (`Some(None)` clears it).
    pub description: Option<Option<String>>,
    /// Replacement question list.
    pub questions: Option<Vec<Question>>,
    /// New status.
    pub status: Option<HeliogramStatus>,
    /// New context (`Some(None)` clears it).
    pub context: Option<Option<HeliogramContext>>,
}

impl HeliogramPatch {
    /// Patch that only changes the status.
    pub fn status(status: HeliogramStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    fn validate(&self) -> HeliographResult<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(questions) = &self.questions {
            for q in questions {
                q.kind.validate()?;
            }
        }
        Ok(())
    }

    fn apply(self, hg: &mut Heliogram) {
        if let Some(title) = self.title {
            hg.title = title;
        }
        if let Some(description) = self.description {
            hg.description = description;
        }
        if let Some(questions) = self.questions {
            hg.questions = questions;
        }
        if let Some(status) = self.status {
            hg.status = status;
        }
        if let Some(context) = self.context {
            hg.context = context;
        }
    }
}

fn validate_title(title: &str) -> HeliographResult<()> {
    if title.trim().is_empty() {
        return Err(HeliographError::validation("heliogram title must not be blank"));
    }
    Ok(())
}

/// Heliogram collection over a [`LocalStore`].
pub struct HeliogramStore {
    inner: LocalStore<Heliogram>,
    clock: Rc<dyn Clock>,
}

impl HeliogramStore {
    /// Store under [`HELIOGRAMS_KEY`], seeded with the sample heliograms.
    pub fn new(storage: Rc<dyn KeyValueStorage>, clock: Rc<dyn Clock>) -> Self {
        Self::with_config(
            storage,
            StoreConfig::new(HELIOGRAMS_KEY),
            sample_heliograms(),
            clock,
        )
    }

    /// Store with explicit config and default collection.
    pub fn with_config(
        storage: Rc<dyn KeyValueStorage>,
        config: StoreConfig,
        default: Vec<Heliogram>,
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

    /// All heliograms.
    pub fn list(&self) -> &[Heliogram] {
        self.inner.get()
    }

    /// Heliograms with `status`.
    pub fn list_by_status(&self, status: HeliogramStatus) -> Vec<&Heliogram> {
        self.list().iter().filter(|h| h.status == status).collect()
    }

    /// Heliogram with `id`.
    pub fn get_by_id(&self, id: &str) -> Option<&Heliogram> {
        self.list().iter().find(|h| h.id == id)
    }

    /// Create, stamp and append a heliogram.
    pub fn create(&mut self, input: NewHeliogram) -> HeliographResult<Heliogram> {
        validate_title(&input.title)?;
        for q in &input.questions {
            q.kind.validate()?;
        }

        let now = self.clock.now();
        let hg = Heliogram {
            id: generate_id(HELIOGRAM_ID),
            title: input.title,
            description: input.description,
            questions: input
                .questions
                .into_iter()
                .map(NewQuestion::into_question)
                .collect(),
            status: input.status,
            created_at: now,
            updated_at: now,
            context: input.context,
        };

        let created = hg.clone();
        self.inner.set_with(|prev| {
            let mut next = prev.to_vec();
            next.push(hg);
            next
        })?;
        tracing::debug!(id = %created.id, "created heliogram");
        Ok(created)
    }

    /// Apply `patch` to heliogram `id` and refresh `updated_at`.
    ///
    /// Returns `Ok(None)` without touching storage when `id` is unknown.
    pub fn update(
        &mut self,
        id: &str,
        patch: HeliogramPatch,
    ) -> HeliographResult<Option<Heliogram>> {
        patch.validate()?;
        self.inner.hydrate();
        let Some(idx) = self.list().iter().position(|h| h.id == id) else {
            tracing::debug!(id, "update of unknown heliogram ignored");
            return Ok(None);
        };

        let mut next = self.list().to_vec();
        let hg = &mut next[idx];
        patch.apply(hg);
        hg.updated_at = strictly_after(self.clock.as_ref(), hg.updated_at.max(hg.created_at));
        let updated = hg.clone();

        self.inner.set(next)?;
        Ok(Some(updated))
    }

    /// Change only the status.
    pub fn set_status(
        &mut self,
        id: &str,
        status: HeliogramStatus,
    ) -> HeliographResult<Option<Heliogram>> {
        self.update(id, HeliogramPatch::status(status))
    }

    /// Remove heliogram `id`. Returns `Ok(false)` when it did not exist.
    ///
    /// Responses referencing it are left alone; see [`crate::ResponseStore::delete_for_heliogram`].
    pub fn delete(&mut self, id: &str) -> HeliographResult<bool> {
        self.inner.hydrate();
        if self.get_by_id(id).is_none() {
            tracing::debug!(id, "delete of unknown heliogram ignored");
            return Ok(false);
        }
        self.inner
            .set_with(|prev| prev.iter().filter(|h| h.id != id).cloned().collect())?;
        Ok(true)
    }

    /// Copy heliogram `id` as a new draft with fresh ids and timestamps.
    pub fn duplicate(&mut self, id: &str) -> HeliographResult<Option<Heliogram>> {
        self.inner.hydrate();
        let Some(src) = self.get_by_id(id).cloned() else {
            return Ok(None);
        };
        let input = NewHeliogram {
            title: format!("{} (copy)", src.title),
            description: src.description,
            questions: src
                .questions
                .into_iter()
                .map(|q| NewQuestion {
                    id: None,
                    label: q.label,
                    required: q.required,
                    order: q.order,
                    kind: q.kind,
                })
                .collect(),
            status: HeliogramStatus::Draft,
            context: src.context,
        };
        self.create(input).map(Some)
    }

    /// Restore the sample collection.
    pub fn reset(&mut self) -> HeliographResult<()> {
        self.inner.reset()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/domain/heliogram.rs"]
mod tests;
