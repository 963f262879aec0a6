use poem_openapi::{ApiResponse, payload::PlainText};

#[derive(ApiResponse)]
pub enum SvgResponse {
    /// Self-contained SVG document
    #[oai(status = 200, content_type = "image/svg+xml")]
    Svg(
        PlainText<String>,
        #[oai(header = "Cache-Control")] String,
    ),
}
