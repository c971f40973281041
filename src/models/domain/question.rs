use serde::{Deserialize, Serialize};

pub const OPTION_LETTERS: [char; 4] = ['A', 'B', 'C', 'D'];

/// A single multiple-choice question with exactly four options.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub question: String,
    pub options: [String; 4],
    pub answer_index: u8, // always in 0..=3
    pub explanation: String,
}

impl QuestionRecord {
    pub fn correct_option(&self) -> &str {
        &self.options[self.answer_index as usize]
    }
}

/// Maps an answer letter to its option position, ignoring surrounding whitespace and case.
pub fn answer_index_for(letter: &str) -> Option<u8> {
    let mut chars = letter.trim().chars();
    let first = chars.next()?.to_ascii_uppercase();
    if chars.next().is_some() {
        return None;
    }

    OPTION_LETTERS
        .iter()
        .position(|&l| l == first)
        .map(|i| i as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_letters_map_to_zero_based_positions() {
        assert_eq!(answer_index_for("A"), Some(0));
        assert_eq!(answer_index_for("B"), Some(1));
        assert_eq!(answer_index_for("C"), Some(2));
        assert_eq!(answer_index_for("D"), Some(3));
    }

    #[test]
    fn test_answer_letters_tolerate_case_and_whitespace() {
        assert_eq!(answer_index_for(" b "), Some(1));
        assert_eq!(answer_index_for("d"), Some(3));
    }

    #[test]
    fn test_unknown_answer_letters_are_rejected() {
        assert_eq!(answer_index_for("E"), None);
        assert_eq!(answer_index_for(""), None);
        assert_eq!(answer_index_for("AB"), None);
        assert_eq!(answer_index_for("Option B"), None);
    }

    #[test]
    fn test_question_record_serializes_with_camel_case_answer_index() {
        let record = QuestionRecord {
            question: "2+2?".to_string(),
            options: ["3", "4", "5", "6"].map(String::from),
            answer_index: 1,
            explanation: "Basic arithmetic".to_string(),
        };

        let json = serde_json::to_value(&record).expect("record should serialize");
        assert_eq!(json["answerIndex"], 1);
        assert_eq!(json["options"].as_array().map(|o| o.len()), Some(4));
        assert_eq!(record.correct_option(), "4");
    }
}
