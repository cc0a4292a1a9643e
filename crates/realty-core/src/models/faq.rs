use serde::{Deserialize, Serialize};

use super::required_text;
use crate::RealtyResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqDraft {
    pub question: String,
    pub answer: String,
}

impl FaqDraft {
    pub fn validate(self) -> RealtyResult<Self> {
        Ok(Self {
            question: required_text(&self.question, "question", "Question is required.")?,
            answer: required_text(&self.answer, "answer", "Answer is required.")?,
        })
    }
}

impl From<&Faq> for FaqDraft {
    fn from(f: &Faq) -> Self {
        Self {
            question: f.question.clone(),
            answer: f.answer.clone(),
        }
    }
}
