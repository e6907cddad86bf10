//! Contact submission types and conditional validation.
//!
//! The two form kinds carry different required-field sets, so the validated
//! form is a tagged variant: each variant holds only its own fields, and a
//! record satisfying the wrong set cannot be constructed. Raw payloads come
//! in with every field optional and are converted via
//! [`SubmissionForm::from_payload`], which collects every missing field into
//! one validation error instead of stopping at the first.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;
use validator::Validate;

use crate::classify::{classify, Classification, Priority};
use crate::error::{Error, Result};

/// Discriminator between the two submission forms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormKind {
    #[default]
    GeneralInquiry,
    BusinessProfile,
}

impl FormKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeneralInquiry => "general-inquiry",
            Self::BusinessProfile => "business-profile",
        }
    }
}

/// Submission workflow status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Unread,
    Read,
    Replied,
    Archived,
}

/// Where the submission entered the system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    #[default]
    Website,
    Api,
    Import,
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email regex"))
}

/// A general inquiry from the contact form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GeneralInquiry {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Checked against the email pattern during conversion; stored lowercased.
    pub email: String,
    #[validate(length(max = 20))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}

/// A business profile submitted by a prospective client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BusinessProfile {
    #[validate(length(min = 1, max = 200))]
    pub company_name: String,
    #[validate(length(max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[validate(length(max = 2000))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<String>,
    #[validate(length(max = 1000))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialties: Option<String>,
    #[validate(length(max = 3000))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<String>,
    #[validate(length(max = 2000))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub achievements: Option<String>,
    /// Stored lowercased when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_email: Option<String>,
    #[validate(length(max = 20))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_phone: Option<String>,
    #[validate(length(max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
    #[validate(length(max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

/// Validated submission form, tagged by kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "formKind", rename_all = "kebab-case")]
pub enum SubmissionForm {
    GeneralInquiry(GeneralInquiry),
    BusinessProfile(BusinessProfile),
}

impl SubmissionForm {
    pub fn kind(&self) -> FormKind {
        match self {
            Self::GeneralInquiry(_) => FormKind::GeneralInquiry,
            Self::BusinessProfile(_) => FormKind::BusinessProfile,
        }
    }

    /// Free-text fields fed to the spam classifier: (message, subject, services).
    pub fn classifier_text(&self) -> (&str, &str, &str) {
        match self {
            Self::GeneralInquiry(f) => (f.message.as_str(), f.subject.as_str(), ""),
            Self::BusinessProfile(f) => ("", "", f.services.as_deref().unwrap_or("")),
        }
    }

    /// Convert a raw payload into a validated form.
    ///
    /// The form kind comes from the explicit `formKind` field, defaulting to
    /// general-inquiry. Every missing or malformed required field is
    /// collected before failing.
    pub fn from_payload(payload: SubmissionPayload) -> Result<Self> {
        match payload.form_kind.unwrap_or_default() {
            FormKind::GeneralInquiry => Self::general_inquiry(payload),
            FormKind::BusinessProfile => Self::business_profile(payload),
        }
    }

    fn general_inquiry(payload: SubmissionPayload) -> Result<Self> {
        let mut missing = Vec::new();

        let name = require(payload.name, "name", &mut missing);
        let email = require(payload.email, "email", &mut missing);
        let subject = require(payload.subject, "subject", &mut missing);
        let message = require(payload.message, "message", &mut missing);

        if let Some(email) = &email {
            if !email_regex().is_match(email) {
                missing.push("email".to_string());
            }
        }

        if !missing.is_empty() {
            return Err(Error::validation(missing));
        }

        let form = GeneralInquiry {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default().to_lowercase(),
            phone: payload.phone,
            subject: subject.unwrap_or_default(),
            message: message.unwrap_or_default(),
        };
        form.validate()
            .map_err(|e| Error::validation(violated_fields(e)))?;

        Ok(Self::GeneralInquiry(form))
    }

    fn business_profile(payload: SubmissionPayload) -> Result<Self> {
        let mut missing = Vec::new();

        let company_name = require(payload.company_name, "companyName", &mut missing);

        if let Some(email) = &payload.business_email {
            if !email_regex().is_match(email) {
                missing.push("businessEmail".to_string());
            }
        }

        if !missing.is_empty() {
            return Err(Error::validation(missing));
        }

        let form = BusinessProfile {
            company_name: company_name.unwrap_or_default(),
            industry: payload.industry,
            services: payload.services,
            specialties: payload.specialties,
            projects: payload.projects,
            achievements: payload.achievements,
            business_email: payload.business_email.map(|e| e.to_lowercase()),
            business_phone: payload.business_phone,
            instagram: payload.instagram,
            linkedin: payload.linkedin,
        };
        form.validate()
            .map_err(|e| Error::validation(violated_fields(e)))?;

        Ok(Self::BusinessProfile(form))
    }
}

/// Treat absent and whitespace-only values alike; record the field when missing.
fn require(value: Option<String>, field: &str, missing: &mut Vec<String>) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => {
            missing.push(field.to_string());
            None
        }
    }
}

/// Flatten validator output into field names for the error body.
fn violated_fields(errors: validator::ValidationErrors) -> Vec<String> {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|k| k.to_string())
        .collect();
    fields.sort();
    fields
}

/// Raw inbound payload with every field optional; validated via
/// [`SubmissionForm::from_payload`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub form_kind: Option<FormKind>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub services: Option<String>,
    pub specialties: Option<String>,
    pub projects: Option<String>,
    pub achievements: Option<String>,
    pub business_email: Option<String>,
    pub business_phone: Option<String>,
    pub instagram: Option<String>,
    pub linkedin: Option<String>,
    /// Client-supplied submission time, accepted when present.
    pub submitted_at: Option<DateTime<Utc>>,
}

/// A reply appended to a submission by the agency.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
    #[validate(length(min = 1, max = 100))]
    pub from: String,
    pub timestamp: DateTime<Utc>,
}

/// A stored contact submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub form: SubmissionForm,
    pub status: SubmissionStatus,
    pub priority: Priority,
    /// Set once at creation, never recomputed.
    pub spam_score: u8,
    pub is_spam: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub source: Source,
    pub submitted_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_read_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replied_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replies: Vec<Reply>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl SubmissionRecord {
    /// Build a record from a validated form: stamp metadata, run the
    /// classifier, and carry its output. Scoring completes here, before any
    /// store call, so a record is never stored without its score.
    pub fn intake(
        form: SubmissionForm,
        origin_address: String,
        user_agent: String,
        submitted_at: Option<DateTime<Utc>>,
    ) -> Self {
        let (message, subject, services) = form.classifier_text();
        let Classification {
            score,
            is_spam,
            priority,
        } = classify(message, subject, services);

        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            form,
            status: SubmissionStatus::Unread,
            priority,
            spam_score: score,
            is_spam,
            origin_address: Some(origin_address),
            user_agent: Some(user_agent),
            source: Source::Website,
            submitted_at: submitted_at.unwrap_or(now),
            created_at: now,
            last_read_at: None,
            replied_at: None,
            replies: Vec::new(),
            tags: Vec::new(),
        }
    }

    pub fn form_kind(&self) -> FormKind {
        self.form.kind()
    }

    /// Listing view with origin address and user agent withheld.
    pub fn redacted(mut self) -> Self {
        self.origin_address = None;
        self.user_agent = None;
        self
    }
}
