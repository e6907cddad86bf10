//! Portfolio item types and validation.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{Error, Result};
use crate::limits::MIN_PROJECT_YEAR;

/// Work category shown in the gallery filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Branding,
    WebDesign,
    VideoProduction,
    Photography,
    DigitalMarketing,
    MobileApp,
    GraphicDesign,
    SocialMedia,
    ContentCreation,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Branding => "branding",
            Self::WebDesign => "web-design",
            Self::VideoProduction => "video-production",
            Self::Photography => "photography",
            Self::DigitalMarketing => "digital-marketing",
            Self::MobileApp => "mobile-app",
            Self::GraphicDesign => "graphic-design",
            Self::SocialMedia => "social-media",
            Self::ContentCreation => "content-creation",
            Self::Other => "other",
        }
    }
}

/// Publication status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortfolioStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

/// Client shown on a project page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    #[validate(length(max = 200))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[validate(length(max = 300))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// One gallery entry.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    #[validate(length(min = 1))]
    pub url: String,
    #[validate(length(max = 300))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Media attached to a project. The thumbnail is mandatory; the hero video
/// and gallery are not.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[validate(length(min = 1))]
    pub thumbnail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    #[validate(nested)]
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gallery: Vec<GalleryItem>,
}

/// A portfolio entry. Slug uniqueness is the store's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub category: Category,
    pub status: PortfolioStatus,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientInfo>,
    pub media: Media,
    #[serde(default)]
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw create payload for a portfolio item.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPayload {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Derived from the title when absent.
    pub slug: Option<String>,
    #[validate(length(min = 1, max = 1000))]
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub status: PortfolioStatus,
    pub year: i32,
    #[validate(length(max = 50))]
    pub duration: Option<String>,
    #[validate(nested)]
    pub client: Option<ClientInfo>,
    #[validate(nested)]
    pub media: Media,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl PortfolioPayload {
    /// Validate and convert into a storable item.
    pub fn into_item(self) -> Result<PortfolioItem> {
        let mut violations = Vec::new();

        if let Err(errors) = self.validate() {
            violations.extend(errors.field_errors().keys().map(|k| k.to_string()));
        }

        let max_year = Utc::now().year() + 1;
        if self.year < MIN_PROJECT_YEAR || self.year > max_year {
            violations.push("year".to_string());
        }

        if !violations.is_empty() {
            violations.sort();
            violations.dedup();
            return Err(Error::validation(violations));
        }

        let slug = match self.slug {
            Some(slug) if !slug.trim().is_empty() => slug.trim().to_lowercase(),
            _ => slugify(&self.title),
        };

        let now = Utc::now();
        Ok(PortfolioItem {
            id: Uuid::new_v4(),
            title: self.title,
            slug,
            description: self.description,
            category: self.category,
            status: self.status,
            year: self.year,
            duration: self.duration,
            client: self.client,
            media: self.media,
            featured: self.featured,
            tags: self.tags,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Lowercase, alphanumerics kept, everything else collapsed to single dashes.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_dash = true;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}
