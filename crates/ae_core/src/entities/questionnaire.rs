//! Questionnaire definition, responses and derived category scores.

use std::collections::BTreeMap;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

wire_enum!(
    ResponseValue, CoreError::UnknownResponse => {
        Met           = "Met",
        NotMet        = "Not Met",
        NotApplicable = "Not Applicable",
    }
);

/// `(sectionIndex, questionIndex)`; wire form `"{section}-{question}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct ResponseKey {
    pub section: u32,
    pub question: u32,
}

impl ResponseKey {
    #[inline]
    pub fn new(section: u32, question: u32) -> Self {
        Self { section, question }
    }
}

impl fmt::Display for ResponseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.section, self.question)
    }
}

impl FromStr for ResponseKey {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (a, b) = s.split_once('-').ok_or(CoreError::BadResponseKey)?;
        let digits = |x: &str| !x.is_empty() && x.bytes().all(|c| c.is_ascii_digit());
        if !digits(a) || !digits(b) {
            return Err(CoreError::BadResponseKey);
        }
        let section = a.parse().map_err(|_| CoreError::BadResponseKey)?;
        let question = b.parse().map_err(|_| CoreError::BadResponseKey)?;
        Ok(Self { section, question })
    }
}

impl TryFrom<String> for ResponseKey {
    type Error = CoreError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ResponseKey> for String {
    fn from(k: ResponseKey) -> String {
        k.to_string()
    }
}

/// Sparse response map. A missing key is a valid state (unanswered).
pub type Responses = BTreeMap<ResponseKey, ResponseValue>;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Section {
    pub heading: String,
    pub questions: Vec<String>,
}

/// Counts for one category (or the whole questionnaire).
/// `applicable_questions = met + not_met`; Not Applicable is excluded from the denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CategoryScore {
    pub met: u32,
    pub not_met: u32,
    pub not_applicable: u32,
    pub total: u32,
    pub applicable_questions: u32,
    pub percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CategoryEntry {
    pub heading: String,
    pub score: CategoryScore,
}

/// Per-section scores in definition order, plus the overall score.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuestionnaireScore {
    pub categories: Vec<CategoryEntry>,
    pub overall: CategoryScore,
}

impl QuestionnaireScore {
    /// First category with `heading`.
    pub fn category(&self, heading: &str) -> Option<&CategoryScore> {
        self.categories.iter().find(|c| c.heading == heading).map(|c| &c.score)
    }
}
