pub const PROMPT_TEMPLATES_VERSION: &str = "2024-06-quiz-v1";

pub const TOPICS_PLACEHOLDER: &str = "{topics}";

pub const TRANSCRIPTION_SYSTEM_PROMPT: &str = "You are a skilled instructor on an EdTech platform where students watch your videos. You have to generate a meaningful quiz for the students' exam from the transcription and topics of the video. The quiz should cover all the topics that are included in the transcription and the topics that are given.";

pub const CONTENT_SYSTEM_PROMPT: &str = "You are a skilled instructor on an EdTech platform where students study your content. You have to generate a meaningful quiz for the students' exam from the given topics. The quiz should cover all the topics that are included in the technology skill and the topics that are given.";

const QUESTION_FORMAT_RULES: &str = r#"1. Create 20-25 questions covering all of the given topics.
2. Each question must have exactly four options, with exactly one correct answer.
3. Provide a short explanation for the correct answer.
4. Randomize the position of the correct answer to avoid patterns.
5. Make the difficulty level hard.
6. Format each question as a JSON object exactly as follows:

{
    "Q": "[Question text]",
    "A": "[Option 1]",
    "B": "[Option 2]",
    "C": "[Option 3]",
    "D": "[Option 4]",
    "Correct": "[A, B, C, or D]",
    "Explanation": "[Brief explanation of the correct answer]"
}

7. Separate each question object with a line containing only "---".
8. Each question object must be valid JSON on its own. Do not wrap the objects in an array and do not add commentary."#;

pub fn transcription_instructions() -> String {
    format!(
        "Convert this transcription into a well-structured quiz. Do not make the quiz about one specific video. Follow these rules:\n\n{}\n\nHere are the topics for this video: {}",
        QUESTION_FORMAT_RULES, TOPICS_PLACEHOLDER
    )
}

pub fn topic_instructions() -> String {
    format!(
        "Create a well-structured exam quiz on the following topics. Follow these rules:\n\n{}\n\nHere are the topics for this quiz exam: {}",
        QUESTION_FORMAT_RULES, TOPICS_PLACEHOLDER
    )
}

pub fn course_instructions() -> String {
    format!(
        "Create a course-completion exam that checks mastery across every topic of the course. Balance the questions so each topic is covered. Follow these rules:\n\n{}\n\nHere are the course topics for this quiz exam: {}",
        QUESTION_FORMAT_RULES, TOPICS_PLACEHOLDER
    )
}
