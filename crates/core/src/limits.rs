//! Field length limits and admission defaults for the intake service.
//!
//! # Usage Note
//!
//! The `#[validate]` derive macro requires literal values in attributes,
//! so field limits are duplicated there. Keep both in sync when modifying.

// === Admission Gate defaults ===

/// Fixed window duration in milliseconds (15 minutes).
pub const RATE_LIMIT_WINDOW_MS: i64 = 15 * 60 * 1000;

/// Maximum write requests per identity per window.
pub const RATE_LIMIT_MAX_REQUESTS: u32 = 5;

// === Contact form limits (chars) ===

/// Sender name max length.
pub const MAX_NAME_LEN: usize = 100;

/// Phone number max length.
pub const MAX_PHONE_LEN: usize = 20;

/// Subject line max length.
pub const MAX_SUBJECT_LEN: usize = 200;

/// Message body max length.
pub const MAX_MESSAGE_LEN: usize = 2000;

// === Business profile limits (chars) ===

/// Company name max length.
pub const MAX_COMPANY_NAME_LEN: usize = 200;

/// Industry max length.
pub const MAX_INDUSTRY_LEN: usize = 100;

/// Services description max length.
pub const MAX_SERVICES_LEN: usize = 2000;

/// Specialties description max length.
pub const MAX_SPECIALTIES_LEN: usize = 1000;

/// Projects description max length.
pub const MAX_PROJECTS_LEN: usize = 3000;

/// Achievements description max length.
pub const MAX_ACHIEVEMENTS_LEN: usize = 2000;

/// Instagram handle max length.
pub const MAX_INSTAGRAM_LEN: usize = 100;

/// LinkedIn URL max length.
pub const MAX_LINKEDIN_LEN: usize = 200;

// === Reply limits (chars) ===

/// Reply message max length.
pub const MAX_REPLY_MESSAGE_LEN: usize = 2000;

/// Reply sender max length.
pub const MAX_REPLY_FROM_LEN: usize = 100;

// === Portfolio limits (chars) ===

/// Project title max length.
pub const MAX_TITLE_LEN: usize = 200;

/// Project description max length.
pub const MAX_DESCRIPTION_LEN: usize = 1000;

/// Duration label max length.
pub const MAX_DURATION_LEN: usize = 50;

/// Client name max length.
pub const MAX_CLIENT_NAME_LEN: usize = 200;

/// Client website URL max length.
pub const MAX_WEBSITE_LEN: usize = 300;

/// Gallery caption max length.
pub const MAX_CAPTION_LEN: usize = 300;

/// Tag max length.
pub const MAX_TAG_LEN: usize = 50;

/// Earliest accepted project year.
pub const MIN_PROJECT_YEAR: i32 = 2000;
