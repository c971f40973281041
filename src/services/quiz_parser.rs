//! Turns the model's loosely structured completion into validated questions.
//!
//! The model is asked for one JSON object per question with `---` lines between them.
//! Nothing enforces that contract, so every block is parsed on its own and a bad block
//! only costs that one question.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::models::domain::{question::answer_index_for, QuestionRecord};

static CODE_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*```[\w+.-]*[ \t]*\r?$\n?").expect("CODE_FENCE is a valid regex")
});

// Fences glued to the first or last object, e.g. "```json {" or "}```".
static OPENING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A\s*```[\w+.-]*").expect("OPENING_FENCE is a valid regex"));
static CLOSING_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```\s*\z").expect("CLOSING_FENCE is a valid regex"));

const BLOCK_DELIMITER: &str = "---";

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed question block: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("correct answer '{0}' is not one of A, B, C or D")]
    InvalidAnswer(String),
}

#[derive(Debug)]
pub struct RejectedBlock {
    pub index: usize,
    pub content: String,
    pub error: ParseError,
}

#[derive(Debug, Default)]
pub struct ParsedQuiz {
    pub questions: Vec<QuestionRecord>,
    pub rejected: Vec<RejectedBlock>,
}

#[derive(Debug, Deserialize)]
struct RawQuestionBlock {
    #[serde(rename = "Q")]
    question: String,
    #[serde(rename = "A", deserialize_with = "option_text")]
    a: String,
    #[serde(rename = "B", deserialize_with = "option_text")]
    b: String,
    #[serde(rename = "C", deserialize_with = "option_text")]
    c: String,
    #[serde(rename = "D", deserialize_with = "option_text")]
    d: String,
    #[serde(rename = "Correct")]
    correct: String,
    #[serde(rename = "Explanation")]
    explanation: String,
}

// Options such as `"A": 4` or `"B": true` are kept as their JSON text.
fn option_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        other => Err(de::Error::custom(format!(
            "answer option must be text or a number, found {}",
            other
        ))),
    }
}

impl TryFrom<RawQuestionBlock> for QuestionRecord {
    type Error = ParseError;

    fn try_from(raw: RawQuestionBlock) -> Result<Self, Self::Error> {
        let answer_index =
            answer_index_for(&raw.correct).ok_or(ParseError::InvalidAnswer(raw.correct))?;

        Ok(QuestionRecord {
            question: raw.question,
            options: [raw.a, raw.b, raw.c, raw.d],
            answer_index,
            explanation: raw.explanation,
        })
    }
}

pub fn strip_code_fences(raw: &str) -> String {
    let text = CODE_FENCE.replace_all(raw, "");
    let text = OPENING_FENCE.replace(&text, "");
    CLOSING_FENCE.replace(&text, "").into_owned()
}

/// Splits on lines consisting solely of `---`; blocks are trimmed and empty ones dropped.
pub fn split_blocks(text: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut start = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if line.trim() == BLOCK_DELIMITER {
            blocks.push(&text[start..offset]);
            start = offset + line.len();
        }
        offset += line.len();
    }
    blocks.push(&text[start..]);

    blocks
        .into_iter()
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .collect()
}

// Tolerates the model wrapping objects in an array or leaving separators behind.
fn normalize_block(block: &str) -> &str {
    let mut block = block.trim();
    if let Some(rest) = block.strip_prefix('[') {
        if rest.trim_start().starts_with('{') {
            block = rest.trim_start();
        }
    }
    let block = block.trim_end_matches(',').trim_end();
    match block.strip_suffix(']') {
        Some(rest) if rest.trim_end().ends_with('}') => rest.trim_end(),
        _ => block,
    }
}

pub fn parse_block(block: &str) -> Result<QuestionRecord, ParseError> {
    let raw: RawQuestionBlock = serde_json::from_str(normalize_block(block))?;
    QuestionRecord::try_from(raw)
}

/// Parses every block independently and keeps the successes in their original order.
pub fn parse_quiz_response(raw: &str) -> ParsedQuiz {
    let cleaned = strip_code_fences(raw);
    let mut parsed = ParsedQuiz::default();

    for (index, block) in split_blocks(&cleaned).into_iter().enumerate() {
        match parse_block(block) {
            Ok(question) => parsed.questions.push(question),
            Err(error) => {
                log::warn!(
                    "Dropping question block {}: {}. Block content: {}",
                    index,
                    error,
                    block
                );
                parsed.rejected.push(RejectedBlock {
                    index,
                    content: block.to_string(),
                    error,
                });
            }
        }
    }

    parsed
}
