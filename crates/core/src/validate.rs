//! Validation and normalization of generative model replies.
//!
//! A reply is untrusted text. It is turned into a typed value only when the
//! whole document satisfies the expected shape; any violation rejects the
//! entire reply.

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    error::{EduError, QuestionDefect, Result},
    types::{QuizQuestion, SummaryContent, SummaryPoint},
};

/// Number of points a summary must contain.
pub const SUMMARY_POINTS: usize = 10;
/// Number of questions a quiz must contain.
pub const QUIZ_QUESTIONS: usize = 10;
/// Number of options each quiz question must offer.
pub const QUESTION_OPTIONS: usize = 4;

const OPENING_FENCE: &str = "```json";
const CLOSING_FENCE: &str = "```";

/// Remove surrounding whitespace and a ```` ```json ```` ... ```` ``` ```` wrapper.
///
/// Only the exact lowercase opening marker at the very start and a closing
/// marker at the very end are recognized.
pub fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix(OPENING_FENCE) {
        text = rest.trim_start();
    }
    if let Some(rest) = text.strip_suffix(CLOSING_FENCE) {
        text = rest;
    }

    text.trim()
}

/// Strip fences and parse the remainder as a single JSON document.
pub fn parse_document(raw: &str) -> Result<Value> {
    let cleaned = strip_fences(raw);
    serde_json::from_str(cleaned).map_err(|e| EduError::FailedToParseResponse {
        reason: e.to_string(),
    })
}

pub fn parse_summary_response(raw: &str) -> Result<SummaryContent> {
    debug!(raw, "validating summary response");
    validate_summary(parse_document(raw)?)
}

pub fn parse_quiz_response(raw: &str) -> Result<Vec<QuizQuestion>> {
    debug!(raw, "validating quiz response");
    validate_quiz(parse_document(raw)?)
}

/// Check a parsed summary document and convert it into [`SummaryContent`].
pub fn validate_summary(document: Value) -> Result<SummaryContent> {
    let Value::Object(mut object) = document else {
        return Err(summary_error("expected a JSON object"));
    };

    let title = match object.remove("title") {
        Some(Value::String(title)) if !title.is_empty() => title,
        _ => return Err(summary_error("missing or empty string field `title`")),
    };

    let points = match object.remove("points") {
        Some(Value::Array(points)) => points,
        _ => return Err(summary_error("missing array field `points`")),
    };

    if points.len() != SUMMARY_POINTS {
        return Err(summary_error(format!(
            "expected {} points, got {}",
            SUMMARY_POINTS,
            points.len()
        )));
    }

    let points = points
        .into_iter()
        .enumerate()
        .map(|(index, point)| {
            serde_json::from_value::<SummaryPoint>(point)
                .map_err(|e| summary_error(format!("point {}: {}", index, e)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SummaryContent { title, points })
}

/// Check a parsed quiz document and convert it into exactly ten questions.
pub fn validate_quiz(document: Value) -> Result<Vec<QuizQuestion>> {
    let Value::Array(questions) = document else {
        return Err(EduError::InvalidQuizStructure {
            reason: "expected a JSON array".to_string(),
        });
    };

    if questions.len() != QUIZ_QUESTIONS {
        let (index, defect) = if questions.len() < QUIZ_QUESTIONS {
            (questions.len(), QuestionDefect::Missing)
        } else {
            (QUIZ_QUESTIONS, QuestionDefect::Unexpected)
        };
        return Err(EduError::InvalidQuestionStructure { index, defect });
    }

    let mut seen = HashSet::with_capacity(QUIZ_QUESTIONS);
    questions
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let question = check_question(question)
                .map_err(|defect| EduError::InvalidQuestionStructure { index, defect })?;
            if !seen.insert(question.id) {
                return Err(EduError::InvalidQuestionStructure {
                    index,
                    defect: QuestionDefect::DuplicateId { id: question.id },
                });
            }
            Ok(question)
        })
        .collect()
}

fn check_question(question: &Value) -> std::result::Result<QuizQuestion, QuestionDefect> {
    let Value::Object(fields) = question else {
        return Err(QuestionDefect::NotAnObject);
    };

    let id = question_id(fields).ok_or(QuestionDefect::MissingId)?;

    let text = match fields.get("text") {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        _ => return Err(QuestionDefect::MissingText),
    };

    let options = question_options(fields)?;

    let correct_answer = fields
        .get("correctAnswer")
        .and_then(whole_number)
        .filter(|answer| *answer < QUESTION_OPTIONS as u64)
        .ok_or(QuestionDefect::CorrectAnswer)? as usize;

    Ok(QuizQuestion {
        id,
        text,
        options,
        correct_answer,
    })
}

/// A non-negative JSON number without a fractional part, so `2.0` reads as `2`.
fn whole_number(value: &Value) -> Option<u64> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let n = value.as_f64()?;
    (n >= 0.0 && n.fract() == 0.0 && n < u64::MAX as f64).then_some(n as u64)
}

/// A truthy id: a non-zero whole number.
fn question_id(fields: &Map<String, Value>) -> Option<u32> {
    fields
        .get("id")
        .and_then(whole_number)
        .filter(|id| *id != 0)
        .and_then(|id| u32::try_from(id).ok())
}

fn question_options(
    fields: &Map<String, Value>,
) -> std::result::Result<[String; QUESTION_OPTIONS], QuestionDefect> {
    let Some(Value::Array(options)) = fields.get("options") else {
        return Err(QuestionDefect::Options { found: None });
    };

    let found = Some(options.len());
    let options = options
        .iter()
        .map(|option| option.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or(QuestionDefect::Options { found })?;

    options
        .try_into()
        .map_err(|_| QuestionDefect::Options { found })
}

fn summary_error(reason: impl Into<String>) -> EduError {
    EduError::InvalidSummaryStructure {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::ResourceKind;

    fn question(id: u64) -> Value {
        json!({
            "id": id,
            "text": format!("Question {}?", id),
            "options": ["a", "b", "c", "d"],
            "correctAnswer": id % 4,
        })
    }

    fn quiz(count: u64) -> Value {
        Value::Array((1..=count).map(question).collect())
    }

    fn point(i: usize) -> Value {
        json!({
            "heading": format!("Point {}", i),
            "description": "Details",
            "resources": [
                {"title": "Docs", "url": "https://example.com", "type": "article"}
            ],
        })
    }

    fn summary(count: usize) -> Value {
        json!({
            "title": "Topic",
            "points": (0..count).map(point).collect::<Vec<_>>(),
        })
    }

    fn question_error(result: Result<Vec<QuizQuestion>>) -> (usize, QuestionDefect) {
        match result {
            Err(EduError::InvalidQuestionStructure { index, defect }) => (index, defect),
            other => panic!("expected InvalidQuestionStructure, got {:?}", other),
        }
    }

    #[test]
    fn test_strip_fences() {
        assert_eq!(strip_fences("```json\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(strip_fences("  ```json[1]```  "), "[1]");
        assert_eq!(strip_fences("[1, 2]"), "[1, 2]");
        assert_eq!(strip_fences("```JSON\n[1]\n```"), "```JSON\n[1]");
        assert_eq!(strip_fences("text ```json [1]"), "text ```json [1]");
    }

    #[test]
    fn test_fenced_and_bare_parse_identically() {
        let bare = quiz(10).to_string();
        let fenced = format!("```json\n{}\n```", bare);

        let from_bare = parse_quiz_response(&bare).unwrap();
        let from_fenced = parse_quiz_response(&fenced).unwrap();
        assert_eq!(from_bare, from_fenced);
        assert_eq!(from_bare.len(), 10);
    }

    #[test]
    fn test_non_standard_fence_fails_to_parse() {
        let fenced = format!("```JSON\n{}\n```", quiz(10));
        let err = parse_quiz_response(&fenced).unwrap_err();
        assert!(matches!(err, EduError::FailedToParseResponse { .. }));

        let plain_fence = format!("```\n{}\n```", quiz(10));
        let err = parse_quiz_response(&plain_fence).unwrap_err();
        assert!(matches!(err, EduError::FailedToParseResponse { .. }));
    }

    #[test]
    fn test_malformed_json_fails_to_parse() {
        let err = parse_document("[{\"id\": 1,").unwrap_err();
        assert!(matches!(err, EduError::FailedToParseResponse { .. }));
        let err = parse_document("Sure! Here is your quiz").unwrap_err();
        assert!(matches!(err, EduError::FailedToParseResponse { .. }));
    }

    #[test]
    fn test_validate_quiz_accepts_ten_questions() {
        let questions = validate_quiz(quiz(10)).unwrap();
        assert_eq!(questions.len(), 10);
        assert_eq!(questions[0].id, 1);
        assert_eq!(questions[0].correct_answer, 1);
        assert_eq!(questions[3].correct_option(), "a");
    }

    #[test]
    fn test_validate_quiz_rejects_non_array() {
        let err = validate_quiz(json!({"questions": []})).unwrap_err();
        assert!(matches!(err, EduError::InvalidQuizStructure { .. }));
    }

    #[test]
    fn test_validate_quiz_wrong_count() {
        assert_eq!(
            question_error(validate_quiz(quiz(9))),
            (9, QuestionDefect::Missing)
        );
        assert_eq!(
            question_error(validate_quiz(quiz(11))),
            (10, QuestionDefect::Unexpected)
        );
        assert_eq!(
            question_error(validate_quiz(quiz(0))),
            (0, QuestionDefect::Missing)
        );
    }

    #[test]
    fn test_validate_quiz_three_options() {
        let mut document = quiz(10);
        document[4]["options"] = json!(["a", "b", "c"]);
        assert_eq!(
            question_error(validate_quiz(document)),
            (4, QuestionDefect::Options { found: Some(3) })
        );
    }

    #[test]
    fn test_validate_quiz_correct_answer_out_of_range() {
        let mut document = quiz(10);
        document[7]["correctAnswer"] = json!(4);
        assert_eq!(
            question_error(validate_quiz(document)),
            (7, QuestionDefect::CorrectAnswer)
        );

        let mut document = quiz(10);
        document[2]["correctAnswer"] = json!(-1);
        assert_eq!(question_error(validate_quiz(document)).0, 2);

        let mut document = quiz(10);
        document[2]["correctAnswer"] = json!("1");
        assert_eq!(question_error(validate_quiz(document)).0, 2);

        let mut document = quiz(10);
        document[2]["correctAnswer"] = json!(1.5);
        assert_eq!(
            question_error(validate_quiz(document)),
            (2, QuestionDefect::CorrectAnswer)
        );

        let mut document = quiz(10);
        document[2]["correctAnswer"] = json!(4_294_967_296u64);
        assert_eq!(
            question_error(validate_quiz(document)),
            (2, QuestionDefect::CorrectAnswer)
        );
    }

    #[test]
    fn test_validate_quiz_whole_floats() {
        let mut document = quiz(10);
        for question in document.as_array_mut().unwrap() {
            question["correctAnswer"] = json!(2.0);
        }
        document[4]["id"] = json!(5.0);

        let questions = validate_quiz(document).unwrap();
        assert!(questions.iter().all(|q| q.correct_answer == 2));
        assert_eq!(questions[4].id, 5);

        let mut document = quiz(10);
        document[6]["id"] = json!(7.5);
        assert_eq!(
            question_error(validate_quiz(document)),
            (6, QuestionDefect::MissingId)
        );
    }

    #[test]
    fn test_validate_quiz_duplicate_ids() {
        let mut document = quiz(10);
        document[8]["id"] = json!(3);
        assert_eq!(
            question_error(validate_quiz(document)),
            (8, QuestionDefect::DuplicateId { id: 3 })
        );
    }

    #[test]
    fn test_validate_quiz_falsy_fields() {
        let mut document = quiz(10);
        document[0]["id"] = json!(0);
        assert_eq!(
            question_error(validate_quiz(document)),
            (0, QuestionDefect::MissingId)
        );

        let mut document = quiz(10);
        document[5]["text"] = json!("");
        assert_eq!(
            question_error(validate_quiz(document)),
            (5, QuestionDefect::MissingText)
        );

        let mut document = quiz(10);
        document[9] = json!("question");
        assert_eq!(
            question_error(validate_quiz(document)),
            (9, QuestionDefect::NotAnObject)
        );
    }

    #[test]
    fn test_validate_quiz_first_failure_wins() {
        let mut document = quiz(10);
        document[3]["options"] = json!("abcd");
        document[6]["correctAnswer"] = json!(9);
        assert_eq!(
            question_error(validate_quiz(document)),
            (3, QuestionDefect::Options { found: None })
        );
    }

    #[test]
    fn test_validate_quiz_non_string_option() {
        let mut document = quiz(10);
        document[1]["options"] = json!(["a", 2, "c", "d"]);
        assert_eq!(
            question_error(validate_quiz(document)),
            (1, QuestionDefect::Options { found: Some(4) })
        );
    }

    #[test]
    fn test_validate_summary_accepts_ten_points() {
        let content = validate_summary(summary(10)).unwrap();
        assert_eq!(content.title, "Topic");
        assert_eq!(content.points.len(), 10);
        assert_eq!(content.points[0].resources[0].kind, ResourceKind::Article);
    }

    #[test]
    fn test_validate_summary_wrong_point_count() {
        for count in [0, 9, 11] {
            let err = validate_summary(summary(count)).unwrap_err();
            assert!(
                matches!(err, EduError::InvalidSummaryStructure { .. }),
                "count {count}"
            );
        }
    }

    #[test]
    fn test_validate_summary_missing_fields() {
        let err = validate_summary(json!({"points": []})).unwrap_err();
        assert!(matches!(err, EduError::InvalidSummaryStructure { .. }));

        let mut document = summary(10);
        document["title"] = json!(42);
        let err = validate_summary(document).unwrap_err();
        assert!(matches!(err, EduError::InvalidSummaryStructure { .. }));

        let mut document = summary(10);
        document["title"] = json!("");
        let err = validate_summary(document).unwrap_err();
        assert!(matches!(err, EduError::InvalidSummaryStructure { .. }));

        let err = validate_summary(json!([])).unwrap_err();
        assert!(matches!(err, EduError::InvalidSummaryStructure { .. }));
    }

    #[test]
    fn test_validate_summary_point_without_resources() {
        let mut document = summary(10);
        document["points"][2]
            .as_object_mut()
            .unwrap()
            .remove("resources");

        let content = validate_summary(document).unwrap();
        assert!(content.points[2].resources.is_empty());
    }

    #[test]
    fn test_validate_summary_unknown_resource_kind() {
        let mut document = summary(10);
        document["points"][4]["resources"][0]["type"] = json!("podcast");
        let err = validate_summary(document).unwrap_err();
        match err {
            EduError::InvalidSummaryStructure { reason } => assert!(reason.starts_with("point 4")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_parse_summary_response_fenced() {
        let raw = format!("\n```json\n{}\n```\n", summary(10));
        let content = parse_summary_response(&raw).unwrap();
        assert_eq!(content.points.len(), 10);
    }
}
