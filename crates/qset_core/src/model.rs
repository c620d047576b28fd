use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const FIRST_ROUND: u32 = 1;

/// A named, taggable collection of quiz cards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QSet {
    pub name: String,
    pub choices: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
}

impl QSet {
    pub fn new(name: impl Into<String>, choices: Vec<Value>, tags: Option<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            choices,
            tags: tags.unwrap_or_default(),
        }
    }
}

/// A single quiz item. Only `name` is inspected; every other field is carried
/// through unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub name: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A user's attempt at a card within a round.
///
/// Issued with `answer` unset; the caller fills it in and submits it back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnswerSubmission {
    pub qcard: Card,
    pub user: String,
    pub a_round: u32,
    #[serde(default)]
    pub answer: Option<Value>,
    pub s_name: String,
    /// Client-supplied top-level fields stored alongside the named ones.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnswerSubmission {
    pub fn issue(qcard: Card, set_name: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            qcard,
            user: user.into(),
            a_round: FIRST_ROUND,
            answer: None,
            s_name: set_name.into(),
            extra: Map::new(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn qset_tags_default_to_empty() {
        let qset: QSet = serde_json::from_value(json!({
            "name": "colors",
            "choices": ["red", "blue"]
        }))
        .expect("metadata should parse");

        assert!(qset.tags.is_empty());

        let qset: QSet = serde_json::from_value(json!({
            "name": "colors",
            "choices": [],
            "tags": null
        }))
        .expect("null tags should parse");
        assert!(qset.tags.is_empty());
    }

    #[test]
    fn qset_requires_choices() {
        let error = serde_json::from_value::<QSet>(json!({"name": "colors"}))
            .expect_err("choices are required");
        assert!(error.to_string().contains("choices"));
    }

    #[test]
    fn card_keeps_unknown_fields_in_order() {
        let raw = r#"{"name":"q7","prompt":"Sky?","options":{"a":"blue","b":"green"},"weight":2}"#;
        let card: Card = serde_json::from_str(raw).expect("card should parse");

        assert_eq!(card.name, "q7");
        assert_eq!(card.fields["prompt"], json!("Sky?"));
        assert_eq!(
            serde_json::to_string(&card).expect("card should serialize"),
            raw
        );
    }

    #[test]
    fn card_requires_name() {
        let error = serde_json::from_value::<Card>(json!({"prompt": "Sky?"}))
            .expect_err("name is required");
        assert!(error.to_string().contains("name"));
    }

    #[test]
    fn issued_submission_serializes_null_answer() {
        let card = Card {
            name: "q7".to_string(),
            fields: Map::new(),
        };
        let value = serde_json::to_value(AnswerSubmission::issue(card, "colors", "u1"))
            .expect("submission should serialize");

        assert_eq!(
            value,
            json!({
                "qcard": {"name": "q7"},
                "user": "u1",
                "a_round": 1,
                "answer": null,
                "s_name": "colors"
            })
        );
    }

    #[test]
    fn submission_answer_may_be_omitted() {
        let submission: AnswerSubmission = serde_json::from_value(json!({
            "qcard": {"name": "q7"},
            "user": "u1",
            "a_round": 2,
            "s_name": "colors"
        }))
        .expect("submission should parse");

        assert_eq!(submission.a_round, 2);
        assert!(submission.answer.is_none());
    }
}
