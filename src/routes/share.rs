use std::sync::Arc;

use poem::{Request, web::Data};
use poem_openapi::{OpenApi, Tags, payload::Json};

use super::query_params;
use crate::{
    AppState,
    core::{params::RenderConfig, registry::PRESET_REGISTRY, share::build_share_link},
    schemas::{
        common::InternalServerErrorResponse,
        share::{ListPresetsResponse, PresetSchema, ShareResponse},
    },
};

#[derive(Tags)]
enum ApiShareTags {
    Share,
}

pub struct ApiShare;

#[OpenApi()]
impl ApiShare {
    /// Share Link
    ///
    /// Normalize the bar parameters and return a shareable URL together with
    /// ready-to-paste Markdown and HTML snippets and an inline data URI.
    /// Accepts the same query parameters as `/bar`.
    #[oai(path = "/share", method = "get", tag = "ApiShareTags::Share")]
    async fn share(&self, req: &Request, state: Data<&Arc<AppState>>) -> ShareResponse {
        let config = RenderConfig::from_query(&query_params(req));

        match build_share_link(&state.config.public_url, &config) {
            Ok(link) => {
                tracing::info!("Built share link: {}", link.url);
                ShareResponse::Ok(Json(link.into()))
            }
            Err(e) => ShareResponse::InternalServerError(Json(InternalServerErrorResponse::new(
                "route.share",
                "share",
                "Building share link failed",
                &format!("{:#}", e),
            ))),
        }
    }

    /// List Presets
    ///
    /// Get the named colour and gradient presets
    #[oai(path = "/presets", method = "get", tag = "ApiShareTags::Share")]
    async fn list_presets(&self) -> ListPresetsResponse {
        let presets = PRESET_REGISTRY.iter().map(PresetSchema::from).collect();

        ListPresetsResponse::Ok(Json(presets))
    }
}
