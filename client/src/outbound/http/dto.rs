//! DTOs for decoding roster service JSON responses.
//!
//! The adapter decodes into these transport DTOs first, then maps into domain
//! records in one pass. Any mismatch is a payload-shape failure.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::{StudentId, StudentRecord};

/// Identifier or code that the service may emit as a string or an integer.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ScalarDto {
    Text(String),
    Integer(i64),
}

impl ScalarDto {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Integer(value) => value.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct StudentDto {
    pub(super) student_id: ScalarDto,
    #[serde(default)]
    pub(super) name: Option<String>,
    #[serde(default)]
    pub(super) email: Option<String>,
    #[serde(default)]
    pub(super) status: Option<String>,
    #[serde(default)]
    pub(super) status_code: Option<ScalarDto>,
}

impl StudentDto {
    fn into_domain(self, index: usize) -> Result<StudentRecord, String> {
        let student_id = StudentId::new(self.student_id.into_text())
            .map_err(|error| format!("element {index}: {error}"))?;
        Ok(StudentRecord {
            student_id,
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            status_code: self
                .status_code
                .map(ScalarDto::into_text)
                .unwrap_or_default(),
        })
    }
}

/// Decode a list body into domain records.
///
/// The body must be a JSON array and every element an object with a usable
/// `student_id`. Absent or null text fields decode as empty strings.
pub(super) fn decode_student_list(body: &[u8]) -> Result<Vec<StudentRecord>, String> {
    let value: Value =
        serde_json::from_slice(body).map_err(|error| format!("invalid JSON payload: {error}"))?;
    let elements = match value {
        Value::Array(elements) => elements,
        other => {
            return Err(format!(
                "expected a JSON array of students, found {}",
                json_kind(&other)
            ));
        }
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            serde_json::from_value::<StudentDto>(element)
                .map_err(|error| format!("element {index}: {error}"))
                .and_then(|dto| dto.into_domain(index))
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
