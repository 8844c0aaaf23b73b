//! Type definitions for tool submissions.

use crate::error::{AppError, Result};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fields a visitor fills in when suggesting a tool. Everything is optional
/// on the wire; [`SubmissionForm::into_submission`] enforces what is required.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmissionForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub pricing_type: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A stored submission, one element of the submissions log.
///
/// Category and pricing are kept as free text: submissions are reviewed by
/// hand before anything reaches the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    /// UTC, ISO-8601 with a `Z` suffix.
    pub submitted_at: String,
    pub name: String,
    pub url: String,
    pub description: String,
    pub category: String,
    pub pricing_type: String,
    pub email: String,
}

fn trimmed(field: Option<String>) -> String {
    field.map(|s| s.trim().to_string()).unwrap_or_default()
}

impl SubmissionForm {
    /// Trim all fields and stamp the submission.
    ///
    /// # Errors
    /// `ValidationError("missing")` when name or url is blank.
    pub fn into_submission(self) -> Result<Submission> {
        let name = trimmed(self.name);
        let url = trimmed(self.url);

        if name.is_empty() || url.is_empty() {
            return Err(AppError::ValidationError("missing".to_string()));
        }

        Ok(Submission {
            id: Uuid::new_v4(),
            submitted_at: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true),
            name,
            url,
            description: trimmed(self.description),
            category: trimmed(self.category),
            pricing_type: trimmed(self.pricing_type),
            email: trimmed(self.email),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(name: &str, url: &str) -> SubmissionForm {
        SubmissionForm {
            name: Some(name.to_string()),
            url: Some(url.to_string()),
            email: Some("  maker@example.com ".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_fields_are_trimmed() {
        let submission = form("  Painter  ", " https://painter.ai ").into_submission().unwrap();

        assert_eq!(submission.name, "Painter");
        assert_eq!(submission.url, "https://painter.ai");
        assert_eq!(submission.email, "maker@example.com");
        assert_eq!(submission.description, "");
        assert!(submission.submitted_at.ends_with('Z'));
    }

    #[test]
    fn test_name_and_url_required() {
        for (name, url) in [("", "https://x.ai"), ("X", "   "), ("", "")] {
            let err = form(name, url).into_submission().unwrap_err();
            assert!(matches!(err, AppError::ValidationError(ref m) if m == "missing"));
        }

        let err = SubmissionForm::default().into_submission().unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn test_each_submission_gets_own_id() {
        let a = form("A", "https://a.ai").into_submission().unwrap();
        let b = form("A", "https://a.ai").into_submission().unwrap();
        assert_ne!(a.id, b.id);
    }
}
