//! Server-rendered pages

use axum::response::Html;
use handlebars::Handlebars;
use serde::Serialize;

use vote_core::Track;

use crate::error::ApiError;

const TEMPLATES: &[(&str, &str)] = &[
    ("login", include_str!("../templates/login.hbs")),
    ("dashboard", include_str!("../templates/dashboard.hbs")),
    ("edit", include_str!("../templates/edit.hbs")),
];

pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn new() -> Result<Self, ApiError> {
        let mut registry = Handlebars::new();
        for (name, source) in TEMPLATES {
            registry
                .register_template_string(name, source)
                .map_err(|e| ApiError::Internal(format!("template {}: {}", name, e)))?;
        }
        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<Html<String>, ApiError> {
        self.registry
            .render(name, data)
            .map(Html)
            .map_err(|e| ApiError::Internal(format!("render {}: {}", name, e)))
    }
}

#[derive(Debug, Serialize)]
pub struct LoginPage {
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DashboardPage {
    pub username: String,
    pub error: Option<String>,
    pub tracks: Vec<TrackRow>,
    pub add_url: String,
    pub logout_url: String,
    /// Hidden form field value in token mode.
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TrackRow {
    pub rank: usize,
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub votes: u32,
    pub edit_url: String,
    pub delete_url: String,
    pub vote_url: String,
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EditPage {
    pub username: String,
    pub track: Track,
    pub action_url: String,
    pub back_url: String,
    pub token: Option<String>,
}
