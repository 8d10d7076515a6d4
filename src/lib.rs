//! Heliograph is the logic core behind the Heliograph marketing site and its demo tools.
//!
//! It has two independent halves:
//!
//! 1. **Scroll-driven animation**: a tracked container's position in the viewport becomes a
//!    normalized progress value (`scroll_progress`), and a data-driven [`Timeline`] maps that
//!    progress through piecewise-linear ranges into visual parameters (angles, offsets,
//!    opacities). [`FaceCycle`] derives which content variant sits on each face of the rotating
//!    cube without flicker at face boundaries.
//! 2. **Local CRUD**: [`LocalStore`] is a hydrate-once, write-through cache over a
//!    [`KeyValueStorage`], specialized as [`HeliogramStore`] and [`ResponseStore`].
//!
//! The design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Scroll is the only clock**: nothing in the animation half reads wall time.
//! - **Nothing is fatal**: storage failures are logged and the last good state is kept.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod domain;
mod foundation;
mod scroll;
mod store;

pub use animation::ease::Ease;
pub use animation::faces::{FaceAssignment, FaceCycle};
pub use animation::interp::{Ranges, interpolate, interpolate_eased};
pub use animation::timeline::{FrameParams, ParamUnit, Timeline, Track};
pub use domain::heliogram::{
    HELIOGRAMS_KEY, Heliogram, HeliogramContext, HeliogramPatch, HeliogramStatus, HeliogramStore,
    NewHeliogram, NewQuestion, Question, QuestionKind,
};
pub use domain::response::{
    AnswerValue, HeliogramResponse, NewResponse, QuestionResponse, QuestionSummary, RESPONSES_KEY,
    Respondent, ResponseStore, summarize,
};
pub use domain::samples::{sample_heliograms, sample_responses};
pub use foundation::clock::{Clock, ManualClock, SystemClock};
pub use foundation::core::{TrackBounds, Vec2, Viewport};
pub use foundation::error::{HeliographError, HeliographResult};
pub use scroll::host::{EventHost, HostEvent, Listener, ListenerId, SimulatedHost};
pub use scroll::observer::{BoundsSource, MotionDriver, ReducedMotionWatch, ScrollObserver};
pub use scroll::progress::scroll_progress;
pub use store::ids::{
    HELIOGRAM_ID, IdSpec, QUESTION_ID, RESPONSE_ID, generate_id, generate_id_with,
};
pub use store::local::{LocalStore, StoreConfig, WritePolicy};
pub use store::storage::{FileStorage, KeyValueStorage, MemoryStorage};
