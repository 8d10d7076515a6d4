//! Collections shown before hydration, and restored by `reset`.

use chrono::{DateTime, Utc};

use crate::domain::{
    heliogram::{Heliogram, HeliogramContext, HeliogramStatus, Question, QuestionKind},
    response::{AnswerValue, HeliogramResponse, QuestionResponse, Respondent},
};

fn at(unix_secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(unix_secs, 0).unwrap_or_default()
}

fn question(id: &str, label: &str, order: u32, kind: QuestionKind) -> Question {
    Question {
        id: id.to_owned(),
        label: label.to_owned(),
        required: order == 0,
        order,
        kind,
    }
}

/// Demo heliograms.
pub fn sample_heliograms() -> Vec<Heliogram> {
    vec![
        Heliogram {
            id: "hg_SampleLaunch".to_owned(),
            title: "Launch day pulse".to_owned(),
            description: Some("How did the new site land with the team?".to_owned()),
            questions: vec![
                question(
                    "q_launch01",
                    "Overall, how did launch go?",
                    0,
                    QuestionKind::Rating { max_rating: 5 },
                ),
                question(
                    "q_launch02",
                    "Your gut reaction to the scroll cube",
                    1,
                    QuestionKind::Reaction {
                        options: vec!["🔥".to_owned(), "🙂".to_owned(), "😐".to_owned()],
                    },
                ),
                question(
                    "q_launch03",
                    "Anything we should fix first?",
                    2,
                    QuestionKind::Text {
                        placeholder: Some("Be blunt".to_owned()),
                        multiline: true,
                    },
                ),
            ],
            status: HeliogramStatus::Active,
            created_at: at(1_709_280_000),
            updated_at: at(1_709_366_400),
            context: Some(HeliogramContext {
                project: Some("Website relaunch".to_owned()),
                client: None,
                tags: vec!["launch".to_owned(), "internal".to_owned()],
            }),
        },
        Heliogram {
            id: "hg_SampleOnbrd1".to_owned(),
            title: "Onboarding check-in".to_owned(),
            description: None,
            questions: vec![
                question(
                    "q_onbrd001",
                    "How clear was your first week?",
                    0,
                    QuestionKind::Scale {
                        min: 1,
                        max: 10,
                        min_label: Some("Lost".to_owned()),
                        max_label: Some("Crystal".to_owned()),
                    },
                ),
                question(
                    "q_onbrd002",
                    "Who helped the most?",
                    1,
                    QuestionKind::Text {
                        placeholder: None,
                        multiline: false,
                    },
                ),
            ],
            status: HeliogramStatus::Draft,
            created_at: at(1_710_000_000),
            updated_at: at(1_710_000_000),
            context: None,
        },
    ]
}

/// Demo responses for [`sample_heliograms`].
pub fn sample_responses() -> Vec<HeliogramResponse> {
    vec![HeliogramResponse {
        id: "resp_SampleResp01".to_owned(),
        heliogram_id: "hg_SampleLaunch".to_owned(),
        responses: vec![
            QuestionResponse {
                question_id: "q_launch01".to_owned(),
                value: AnswerValue::Number(4.0),
            },
            QuestionResponse {
                question_id: "q_launch02".to_owned(),
                value: AnswerValue::Text("🔥".to_owned()),
            },
        ],
        respondent: Respondent {
            name: "Sam Rivera".to_owned(),
            email: None,
            role: Some("Design".to_owned()),
        },
        submitted_at: at(1_709_370_000),
        source: Some("link".to_owned()),
    }]
}
