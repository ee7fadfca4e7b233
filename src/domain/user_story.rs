use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::error::{AppError, Result};

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct UserStory {
    #[validate(length(min = 1))]
    pub content: String,
}

impl UserStory {
    pub fn parse(raw: &str) -> Result<Self> {
        let story = Self {
            content: raw.trim().to_string(),
        };
        story
            .validate()
            .map_err(|_| AppError::ValidationError("User story cannot be empty.".to_string()))?;
        Ok(story)
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}
