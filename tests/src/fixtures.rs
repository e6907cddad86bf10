//! Test fixtures and payload generators.

use serde_json::{json, Value};

/// A valid general-inquiry payload.
pub fn inquiry() -> Value {
    json!({
        "formKind": "general-inquiry",
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "subject": "Brand refresh",
        "message": "We'd like a quote for a full brand refresh."
    })
}

/// A general-inquiry payload with a custom message body.
pub fn inquiry_with_message(message: &str) -> Value {
    let mut payload = inquiry();
    payload["message"] = Value::String(message.to_string());
    payload
}

/// A valid business-profile payload.
pub fn business_profile() -> Value {
    json!({
        "formKind": "business-profile",
        "companyName": "Acme Studio",
        "industry": "Media",
        "services": "Video production and branding"
    })
}

/// A valid portfolio create payload.
pub fn portfolio_item(title: &str) -> Value {
    json!({
        "title": title,
        "description": format!("{} case study", title),
        "category": "video-production",
        "status": "published",
        "year": 2025,
        "media": { "thumbnail": "/media/thumb.jpg" }
    })
}

/// Message built to trip the classifier: one denylist keyword plus four links.
pub fn spam_message() -> &'static str {
    "WIN THE LOTTERY NOW! http://a http://b http://c http://d"
}
