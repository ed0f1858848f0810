//! Student roster data model.
//!
//! Records are owned by the roster service; the client keeps a read-mostly
//! copy. Only [`StudentId`] is required to be unique within a snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Validation errors returned when constructing roster values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    EmptyId,
    IdContainsWhitespace,
    EmptyName,
    EmptyEmail,
    InvalidEmail,
}

impl fmt::Display for StudentValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "student id must not be empty"),
            Self::IdContainsWhitespace => {
                write!(f, "student id must not contain surrounding whitespace")
            }
            Self::EmptyName => write!(f, "student name must not be empty"),
            Self::EmptyEmail => write!(f, "student email must not be empty"),
            Self::InvalidEmail => write!(f, "student email must look like name@domain"),
        }
    }
}

impl std::error::Error for StudentValidationError {}

/// Server-assigned student identifier.
///
/// The roster service may emit identifiers as JSON strings or integers; both
/// are held in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentId(String);

impl StudentId {
    /// Validate and construct a [`StudentId`].
    ///
    /// # Examples
    /// ```
    /// use roster_client::domain::StudentId;
    ///
    /// let id = StudentId::new("S1").expect("valid id");
    /// assert_eq!(id.as_str(), "S1");
    /// assert!(StudentId::new(" S1").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, StudentValidationError> {
        let raw = id.into();
        if raw.trim().is_empty() {
            return Err(StudentValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(StudentValidationError::IdContainsWhitespace);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for StudentId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<StudentId> for String {
    fn from(value: StudentId) -> Self {
        value.0
    }
}

impl TryFrom<String> for StudentId {
    type Error = StudentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// One student as reported by the roster service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Unique key of the collection.
    pub student_id: StudentId,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Human-readable status, e.g. `Active`.
    pub status: String,
    /// Machine code paired with `status`.
    pub status_code: String,
}

/// Payload for creating a student; the server assigns the identifier.
///
/// ## Invariants
/// - `name` and `email` are trimmed and non-empty.
/// - `email` has exactly one `@` with text on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewStudent {
    name: String,
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_code: Option<String>,
}

impl NewStudent {
    /// Validate the required fields of a new student.
    ///
    /// # Examples
    /// ```
    /// use roster_client::domain::NewStudent;
    ///
    /// let student = NewStudent::new("Ann", "a@x.com").expect("valid student");
    /// assert_eq!(student.name(), "Ann");
    /// assert!(NewStudent::new("Ann", "not-an-email").is_err());
    /// ```
    pub fn new(
        name: impl AsRef<str>,
        email: impl AsRef<str>,
    ) -> Result<Self, StudentValidationError> {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(StudentValidationError::EmptyName);
        }
        let email = email.as_ref().trim();
        if email.is_empty() {
            return Err(StudentValidationError::EmptyEmail);
        }
        if !is_plausible_email(email) {
            return Err(StudentValidationError::InvalidEmail);
        }
        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            status: None,
            status_code: None,
        })
    }

    /// Attach a human-readable status and its code. Blank values are dropped.
    pub fn with_status(mut self, status: Option<String>, status_code: Option<String>) -> Self {
        self.status = status.filter(|value| !value.trim().is_empty());
        self.status_code = status_code.filter(|value| !value.trim().is_empty());
        self
    }

    /// Student name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Student email.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Optional status text.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Optional status code.
    pub fn status_code(&self) -> Option<&str> {
        self.status_code.as_deref()
    }
}

fn is_plausible_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty() && !domain.is_empty() && !email.contains(char::is_whitespace)
        }
        _ => false,
    }
}
