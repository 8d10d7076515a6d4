use chrono::TimeZone;

use super::*;
use crate::{
    domain::heliogram::{HeliogramStatus, Question, QuestionKind},
    foundation::clock::ManualClock,
    store::{ids::RESPONSE_ID, storage::MemoryStorage},
};

fn fixture() -> (Rc<MemoryStorage>, ResponseStore) {
    let storage = Rc::new(MemoryStorage::new());
    let clock = Rc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 6, 2, 10, 30, 0).unwrap(),
    ));
    let mut store = ResponseStore::with_config(
        storage.clone(),
        StoreConfig::new(RESPONSES_KEY),
        Vec::new(),
        clock,
    );
    store.hydrate();
    (storage, store)
}

fn answer(q: &str, value: AnswerValue) -> QuestionResponse {
    QuestionResponse {
        question_id: q.to_owned(),
        value,
    }
}

fn submission(hg: &str, rating: f64) -> NewResponse {
    NewResponse {
        heliogram_id: hg.to_owned(),
        responses: vec![
            answer("q_rate0001", AnswerValue::Number(rating)),
            answer("q_text0001", AnswerValue::Text("fine".to_owned())),
        ],
        respondent: Respondent {
            name: "Ada".to_owned(),
            email: Some("ada@example.com".to_owned()),
            role: None,
        },
        source: Some("embed".to_owned()),
    }
}

fn heliogram() -> Heliogram {
    let at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    Heliogram {
        id: "hg_aaaaaaaaaaaa".to_owned(),
        title: "Pulse".to_owned(),
        description: None,
        questions: vec![
            Question {
                id: "q_text0001".to_owned(),
                label: "Why?".to_owned(),
                required: false,
                order: 2,
                kind: QuestionKind::Text {
                    placeholder: None,
                    multiline: false,
                },
            },
            Question {
                id: "q_rate0001".to_owned(),
                label: "Rate us".to_owned(),
                required: true,
                order: 1,
                kind: QuestionKind::Rating { max_rating: 5 },
            },
        ],
        status: HeliogramStatus::Active,
        created_at: at,
        updated_at: at,
        context: None,
    }
}

#[test]
fn create_then_get_round_trips() {
    let (storage, mut store) = fixture();
    let input = submission("hg_aaaaaaaaaaaa", 4.0);
    let resp = store.create(input.clone()).unwrap();

    assert!(RESPONSE_ID.matches(&resp.id));
    assert_eq!(resp.heliogram_id, input.heliogram_id);
    assert_eq!(resp.responses, input.responses);
    assert_eq!(resp.respondent, input.respondent);
    assert_eq!(resp.source, input.source);
    assert_eq!(
        resp.submitted_at,
        Utc.with_ymd_and_hms(2024, 6, 2, 10, 30, 0).unwrap()
    );
    assert_eq!(store.get_by_id(&resp.id), Some(&resp));
    assert!(storage.raw(RESPONSES_KEY).unwrap().contains(&resp.id));
}

#[test]
fn list_and_count_by_heliogram() {
    let (_, mut store) = fixture();
    store.create(submission("hg_aaaaaaaaaaaa", 4.0)).unwrap();
    store.create(submission("hg_bbbbbbbbbbbb", 2.0)).unwrap();
    store.create(submission("hg_aaaaaaaaaaaa", 5.0)).unwrap();

    assert_eq!(store.count_for("hg_aaaaaaaaaaaa"), 2);
    assert_eq!(store.list_by_heliogram("hg_bbbbbbbbbbbb").len(), 1);
    assert!(store.list_by_heliogram("hg_cccccccccccc").is_empty());
}

#[test]
fn delete_and_unknown_delete() {
    let (_, mut store) = fixture();
    let r = store.create(submission("hg_aaaaaaaaaaaa", 4.0)).unwrap();
    assert!(!store.delete("resp_nothere00000").unwrap());
    assert!(store.delete(&r.id).unwrap());
    assert_eq!(store.get_by_id(&r.id), None);
}

#[test]
fn cascade_is_explicit() {
    let (_, mut store) = fixture();
    store.create(submission("hg_aaaaaaaaaaaa", 4.0)).unwrap();
    store.create(submission("hg_aaaaaaaaaaaa", 3.0)).unwrap();
    store.create(submission("hg_bbbbbbbbbbbb", 1.0)).unwrap();
    assert_eq!(store.delete_for_heliogram("hg_aaaaaaaaaaaa").unwrap(), 2);
    assert_eq!(store.delete_for_heliogram("hg_aaaaaaaaaaaa").unwrap(), 0);
    assert_eq!(store.list().len(), 1);
}

#[test]
fn create_validates_references() {
    let (_, mut store) = fixture();
    let mut bad = submission(" ", 1.0);
    assert!(store.create(bad.clone()).is_err());
    bad.heliogram_id = "hg_aaaaaaaaaaaa".to_owned();
    bad.respondent.name = String::new();
    assert!(store.create(bad).is_err());
    assert!(store.list().is_empty());
}

#[test]
fn summarize_in_question_order() {
    let (_, mut store) = fixture();
    store.create(submission("hg_aaaaaaaaaaaa", 4.0)).unwrap();
    store.create(submission("hg_aaaaaaaaaaaa", 2.0)).unwrap();
    let mut blank = submission("hg_aaaaaaaaaaaa", 3.0);
    blank.responses[1].value = AnswerValue::Text("  ".to_owned());
    store.create(blank).unwrap();
    store.create(submission("hg_bbbbbbbbbbbb", 1.0)).unwrap();

    let hg = heliogram();
    let summary = summarize(&hg, store.list());
    assert_eq!(summary.len(), 2);
    assert_eq!(summary[0].question_id, "q_rate0001");
    assert_eq!(summary[0].answered, 3);
    assert_eq!(summary[0].mean, Some(3.0));
    assert_eq!(summary[1].question_id, "q_text0001");
    assert_eq!(summary[1].answered, 2);
    assert_eq!(summary[1].mean, None);
}

#[test]
fn answer_values_are_untagged_scalars() {
    let r: QuestionResponse =
        serde_json::from_str(r#"{"questionId":"q_x","value":7}"#).unwrap();
    assert_eq!(r.value.as_number(), Some(7.0));
    let r: QuestionResponse =
        serde_json::from_str(r#"{"questionId":"q_x","value":"hi"}"#).unwrap();
    assert_eq!(r.value, AnswerValue::Text("hi".to_owned()));
}
