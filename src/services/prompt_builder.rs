use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    constants::prompts::{
        course_instructions, topic_instructions, transcription_instructions,
        CONTENT_SYSTEM_PROMPT, PROMPT_TEMPLATES_VERSION, TOPICS_PLACEHOLDER,
        TRANSCRIPTION_SYSTEM_PROMPT,
    },
    errors::{AppError, AppResult},
    models::domain::QuizKind,
};

/// System instruction plus the user-facing instruction text for one quiz kind.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PromptTemplate {
    pub system: String,
    pub instructions: String,
}

/// Versioned set of templates, one per quiz kind. Loadable from a JSON file with the same shape.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PromptTemplates {
    pub version: String,
    pub transcription: PromptTemplate,
    pub topic: PromptTemplate,
    pub course: PromptTemplate,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            version: PROMPT_TEMPLATES_VERSION.to_string(),
            transcription: PromptTemplate {
                system: TRANSCRIPTION_SYSTEM_PROMPT.to_string(),
                instructions: transcription_instructions(),
            },
            topic: PromptTemplate {
                system: CONTENT_SYSTEM_PROMPT.to_string(),
                instructions: topic_instructions(),
            },
            course: PromptTemplate {
                system: CONTENT_SYSTEM_PROMPT.to_string(),
                instructions: course_instructions(),
            },
        }
    }
}

impl PromptTemplates {
    pub fn from_json(json: &str) -> AppResult<Self> {
        let templates: PromptTemplates = serde_json::from_str(json)?;
        templates.validate()?;
        Ok(templates)
    }

    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            AppError::InternalError(format!(
                "Failed to read prompt templates from '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&json)
    }

    pub fn template_for(&self, kind: QuizKind) -> &PromptTemplate {
        match kind {
            QuizKind::AdHoc => &self.transcription,
            QuizKind::Topic => &self.topic,
            QuizKind::CourseCompletion => &self.course,
        }
    }

    fn validate(&self) -> AppResult<()> {
        for (name, template) in [
            ("transcription", &self.transcription),
            ("topic", &self.topic),
            ("course", &self.course),
        ] {
            if template.system.trim().is_empty() {
                return Err(AppError::InternalError(format!(
                    "Prompt template '{}' has an empty system instruction",
                    name
                )));
            }
            if !template.instructions.contains(TOPICS_PLACEHOLDER) {
                return Err(AppError::InternalError(format!(
                    "Prompt template '{}' is missing the {} placeholder",
                    name, TOPICS_PLACEHOLDER
                )));
            }
        }
        Ok(())
    }
}

/// Fully rendered prompt ready for the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

#[derive(Clone, Debug, Default)]
pub struct PromptBuilder {
    templates: PromptTemplates,
}

impl PromptBuilder {
    pub fn new(templates: PromptTemplates) -> Self {
        Self { templates }
    }

    pub fn templates_version(&self) -> &str {
        &self.templates.version
    }

    /// Topic names are interpolated verbatim, comma separated, in the order given.
    pub fn build(&self, kind: QuizKind, topics: &[String]) -> Prompt {
        let template = self.templates.template_for(kind);
        Prompt {
            system: template.system.clone(),
            user: template
                .instructions
                .replace(TOPICS_PLACEHOLDER, &topics.join(",")),
        }
    }
}
