use chrono::{Duration, TimeZone};

use super::*;
use crate::{
    foundation::clock::ManualClock,
    store::{ids::HELIOGRAM_ID, local::WritePolicy, storage::MemoryStorage},
};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
}

fn fixture() -> (Rc<MemoryStorage>, Rc<ManualClock>, HeliogramStore) {
    let storage = Rc::new(MemoryStorage::new());
    let clock = Rc::new(ManualClock::new(start()));
    let mut store = HeliogramStore::new(storage.clone(), clock.clone());
    store.hydrate();
    (storage, clock, store)
}

fn input() -> NewHeliogram {
    NewHeliogram {
        title: "Retro".to_owned(),
        description: Some("Sprint 12".to_owned()),
        questions: vec![
            NewQuestion {
                id: None,
                label: "Mood".to_owned(),
                required: true,
                order: 1,
                kind: QuestionKind::Rating { max_rating: 5 },
            },
            NewQuestion {
                id: Some("q_keepMe01".to_owned()),
                label: "Notes".to_owned(),
                required: false,
                order: 0,
                kind: QuestionKind::Text {
                    placeholder: None,
                    multiline: true,
                },
            },
        ],
        status: HeliogramStatus::Active,
        context: Some(HeliogramContext {
            project: Some("Atlas".to_owned()),
            client: None,
            tags: vec!["retro".to_owned()],
        }),
    }
}

#[test]
fn starts_with_samples() {
    let storage = Rc::new(MemoryStorage::new());
    let clock = Rc::new(ManualClock::new(start()));
    let store = HeliogramStore::new(storage, clock);
    assert!(!store.is_hydrated());
    assert_eq!(store.list(), sample_heliograms().as_slice());
}

#[test]
fn create_then_get_round_trips() {
    let (storage, _, mut store) = fixture();
    let hg = store.create(input()).unwrap();

    assert!(HELIOGRAM_ID.matches(&hg.id));
    assert_eq!(hg.created_at, start());
    assert_eq!(hg.updated_at, start());
    assert_eq!(store.get_by_id(&hg.id), Some(&hg));

    let src = input();
    assert_eq!(hg.title, src.title);
    assert_eq!(hg.description, src.description);
    assert_eq!(hg.status, src.status);
    assert_eq!(hg.context, src.context);
    assert_eq!(hg.questions.len(), 2);
    assert!(QUESTION_ID.matches(&hg.questions[0].id));
    assert_eq!(hg.questions[1].id, "q_keepMe01");
    assert_eq!(hg.questions[0].kind, src.questions[0].kind);

    let persisted: Vec<Heliogram> =
        serde_json::from_str(&storage.raw(HELIOGRAMS_KEY).unwrap()).unwrap();
    assert_eq!(persisted.last(), Some(&hg));
}

#[test]
fn ordered_questions_sort_by_order() {
    let (_, _, mut store) = fixture();
    let hg = store.create(input()).unwrap();
    let labels: Vec<&str> = hg
        .ordered_questions()
        .iter()
        .map(|q| q.label.as_str())
        .collect();
    assert_eq!(labels, vec!["Notes", "Mood"]);
}

#[test]
fn update_changes_fields_and_bumps_updated_at() {
    let (_, clock, mut store) = fixture();
    let hg = store.create(input()).unwrap();
    clock.advance(Duration::minutes(5));

    let patch = HeliogramPatch {
        title: Some("Retro v2".to_owned()),
        description: Some(None),
        ..HeliogramPatch::default()
    };
    let updated = store.update(&hg.id, patch).unwrap().unwrap();
    assert_eq!(updated.id, hg.id);
    assert_eq!(updated.title, "Retro v2");
    assert_eq!(updated.description, None);
    assert_eq!(updated.created_at, hg.created_at);
    assert!(updated.updated_at > hg.updated_at);
    assert_eq!(store.get_by_id(&hg.id), Some(&updated));
}

#[test]
fn update_is_strictly_later_even_when_clock_stalls() {
    let (_, _, mut store) = fixture();
    let hg = store.create(input()).unwrap();
    let a = store
        .set_status(&hg.id, HeliogramStatus::Closed)
        .unwrap()
        .unwrap();
    let b = store
        .set_status(&hg.id, HeliogramStatus::Active)
        .unwrap()
        .unwrap();
    assert!(a.updated_at > hg.updated_at);
    assert!(b.updated_at > a.updated_at);
}

#[test]
fn unknown_ids_are_noops() {
    let (storage, _, mut store) = fixture();
    assert_eq!(
        store
            .update("hg_doesNotExist", HeliogramPatch::status(HeliogramStatus::Closed))
            .unwrap(),
        None
    );
    assert!(!store.delete("hg_doesNotExist").unwrap());
    assert_eq!(store.duplicate("hg_doesNotExist").unwrap(), None);
    assert_eq!(storage.raw(HELIOGRAMS_KEY), None);
}

#[test]
fn delete_removes() {
    let (_, _, mut store) = fixture();
    let hg = store.create(input()).unwrap();
    assert!(store.delete(&hg.id).unwrap());
    assert_eq!(store.get_by_id(&hg.id), None);
}

#[test]
fn list_by_status_filters() {
    let (_, _, store) = fixture();
    let drafts = store.list_by_status(HeliogramStatus::Draft);
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].id, "hg_SampleOnbrd1");
}

#[test]
fn duplicate_makes_fresh_draft() {
    let (_, _, mut store) = fixture();
    let copy = store.duplicate("hg_SampleLaunch").unwrap().unwrap();
    let src = store.get_by_id("hg_SampleLaunch").unwrap();
    assert_ne!(copy.id, src.id);
    assert_eq!(copy.title, "Launch day pulse (copy)");
    assert_eq!(copy.status, HeliogramStatus::Draft);
    assert_eq!(copy.questions.len(), src.questions.len());
    for (a, b) in copy.questions.iter().zip(&src.questions) {
        assert_ne!(a.id, b.id);
        assert_eq!(a.label, b.label);
    }
}

#[test]
fn invalid_input_is_rejected() {
    let (_, _, mut store) = fixture();
    let mut bad = input();
    bad.title = "   ".to_owned();
    assert!(matches!(
        store.create(bad),
        Err(HeliographError::Validation(_))
    ));

    let mut bad = input();
    bad.questions[0].kind = QuestionKind::Scale {
        min: 5,
        max: 5,
        min_label: None,
        max_label: None,
    };
    assert!(store.create(bad).is_err());
    assert_eq!(store.list().len(), sample_heliograms().len());
}

#[test]
fn failed_write_rolls_back_create() {
    let storage = Rc::new(MemoryStorage::new());
    let clock = Rc::new(ManualClock::new(start()));
    let mut store = HeliogramStore::with_config(
        storage.clone(),
        StoreConfig::new("hg").with_write_policy(WritePolicy::Rollback),
        Vec::new(),
        clock,
    );
    store.hydrate();
    storage.fail_writes(true);
    assert!(store.create(input()).is_err());
    assert!(store.list().is_empty());
}

#[test]
fn question_json_uses_type_tag() {
    let q = Question {
        id: "q_abcdefgh".to_owned(),
        label: "Scale".to_owned(),
        required: true,
        order: 3,
        kind: QuestionKind::Scale {
            min: 0,
            max: 10,
            min_label: None,
            max_label: Some("Max".to_owned()),
        },
    };
    let v = serde_json::to_value(&q).unwrap();
    assert_eq!(v["type"], "scale");
    assert_eq!(v["maxLabel"], "Max");
    assert_eq!(v["order"], 3);
    let back: Question = serde_json::from_value(v).unwrap();
    assert_eq!(back, q);

    let rating: Question = serde_json::from_str(
        r#"{"id":"q_12345678","label":"Stars","type":"rating","maxRating":7}"#,
    )
    .unwrap();
    assert_eq!(rating.kind, QuestionKind::Rating { max_rating: 7 });
    assert!(!rating.required);
}

#[test]
fn heliogram_json_uses_camel_case_timestamps() {
    let hg = &sample_heliograms()[0];
    let v = serde_json::to_value(hg).unwrap();
    assert!(v["createdAt"].as_str().unwrap().starts_with("2024-03-01T08:00:00"));
    assert!(v.get("updatedAt").is_some());
}

#[test]
fn accepts_number_respects_bounds() {
    assert!(QuestionKind::Rating { max_rating: 5 }.accepts_number(5.0));
    assert!(!QuestionKind::Rating { max_rating: 5 }.accepts_number(0.0));
    let scale = QuestionKind::Scale {
        min: -2,
        max: 2,
        min_label: None,
        max_label: None,
    };
    assert!(scale.accepts_number(-2.0));
    assert!(!scale.accepts_number(3.0));
}

#[test]
fn fractional_ratings_and_reactions_are_rejected() {
    let rating = QuestionKind::Rating { max_rating: 5 };
    assert!(rating.accepts_number(3.0));
    assert!(!rating.accepts_number(2.5));

    let reaction = QuestionKind::Reaction {
        options: vec!["a".to_owned(), "b".to_owned()],
    };
    assert!(reaction.accepts_number(1.0));
    assert!(!reaction.accepts_number(0.7));
    assert!(!reaction.accepts_number(2.0));
}

#[test]
fn create_before_hydration_keeps_persisted_heliograms() {
    let storage = Rc::new(MemoryStorage::new());
    let clock = Rc::new(ManualClock::new(start()));
    let mut first = HeliogramStore::new(storage.clone(), clock.clone());
    first.hydrate();
    let kept = first.create(input()).unwrap();

    let mut second = HeliogramStore::new(storage.clone(), clock);
    let added = second.create(input()).unwrap();
    second.hydrate();

    assert!(second.get_by_id(&kept.id).is_some());
    assert!(second.get_by_id(&added.id).is_some());
    assert_eq!(second.list().len(), sample_heliograms().len() + 2);
}

#[test]
fn delete_before_hydration_sees_persisted_heliograms() {
    let storage = Rc::new(MemoryStorage::new());
    let clock = Rc::new(ManualClock::new(start()));
    let mut first = HeliogramStore::new(storage.clone(), clock.clone());
    first.hydrate();
    let hg = first.create(input()).unwrap();

    let mut second = HeliogramStore::new(storage, clock);
    assert!(second.delete(&hg.id).unwrap());
    assert!(second.get_by_id(&hg.id).is_none());
}
