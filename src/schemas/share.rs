use poem_openapi::{ApiResponse, Object, payload::Json};
use serde::Serialize;

use super::common::InternalServerErrorResponse;
use crate::core::registry::Preset;
use crate::core::share::ShareLink;

#[derive(Object, Serialize)]
pub struct ShareLinkBody {
    /// Public bar URL with the normalized parameters
    pub url: String,

    /// Markdown image snippet
    pub markdown: String,

    /// HTML `<img>` snippet
    pub html: String,

    /// The rendered bar as a base64 `data:` URI
    pub data_uri: String,
}

impl From<ShareLink> for ShareLinkBody {
    fn from(link: ShareLink) -> Self {
        Self {
            url: link.url,
            markdown: link.markdown,
            html: link.html,
            data_uri: link.data_uri,
        }
    }
}

#[derive(ApiResponse)]
pub enum ShareResponse {
    #[oai(status = 200, content_type = "application/json")]
    Ok(Json<ShareLinkBody>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object, Serialize)]
pub struct PresetSchema {
    /// Display name
    pub name: String,

    /// Bar colour (first stop for gradients)
    pub color: String,

    /// `colorGradient` value, present for gradient presets
    pub color_gradient: Option<String>,
}

impl From<&Preset> for PresetSchema {
    fn from(preset: &Preset) -> Self {
        Self {
            name: preset.name.clone(),
            color: preset.color.clone(),
            color_gradient: preset.gradient.clone(),
        }
    }
}

#[derive(ApiResponse)]
pub enum ListPresetsResponse {
    #[oai(status = 200, content_type = "application/json")]
    Ok(Json<Vec<PresetSchema>>),
}
