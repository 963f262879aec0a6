use poem::Request;
use poem_openapi::{OpenApi, Tags, payload::PlainText};

use super::query_params;
use crate::{
    core::{preview::render_preview, renderer::render_bar},
    schemas::bar::SvgResponse,
};

#[derive(Tags)]
enum ApiBarTags {
    Bar,
}

pub struct ApiBar;

#[OpenApi()]
impl ApiBar {
    /// Progress Bar
    ///
    /// Render a progress bar as an SVG document. Every parameter is optional
    /// and malformed values are clamped or defaulted, so this never fails.
    ///
    /// Query parameters: `progress`, `color`, `colorGradient`, `backgroundColor`,
    /// `height`, `width`, `borderRadius`, `striped`, `animated`, `animationSpeed`,
    /// `initialAnimationSpeed`.
    ///
    /// # Example
    /// `/bar?progress=75&color=%2316a34a&striped=true&animated=true`
    #[oai(path = "/bar", method = "get", tag = "ApiBarTags::Bar")]
    async fn bar(&self, req: &Request) -> SvgResponse {
        let params = query_params(req);
        let bar = render_bar(&params);
        tracing::info!("Rendered bar, size: {} bytes", bar.markup.len());

        SvgResponse::Svg(PlainText(bar.markup), bar.cache_control.to_string())
    }

    /// Preview Card
    ///
    /// Render a static, padded preview card suitable for link unfurling.
    /// Accepts `progress`, `color`, `backgroundColor`, `height` and `width`.
    #[oai(path = "/bar/preview", method = "get", tag = "ApiBarTags::Bar")]
    async fn preview(&self, req: &Request) -> SvgResponse {
        let params = query_params(req);
        let card = render_preview(&params);
        tracing::info!("Rendered preview card, size: {} bytes", card.markup.len());

        SvgResponse::Svg(PlainText(card.markup), card.cache_control.to_string())
    }
}
