use crate::core::params::{BACKGROUND_COLOR, COLOR, IntField, PROGRESS, QueryParams};
use crate::core::renderer::RenderedBar;
use crate::core::svg::{Element, SVG_NS, num};

pub const PREVIEW_HEIGHT: IntField = IntField {
    name: "height",
    default: 50,
    min: 50,
    max: 500,
};
pub const PREVIEW_WIDTH: IntField = IntField {
    name: "width",
    default: 200,
    min: 200,
    max: 3000,
};

const PADDING: i64 = 20;
const RADIUS: i64 = 10;

/// Static card used for link previews: a padded, rounded bar with no animation.
pub fn render_preview(params: &QueryParams) -> RenderedBar {
    let progress = PROGRESS.read(params);
    let color = COLOR.read(params);
    let background_color = BACKGROUND_COLOR.read(params);
    let width = PREVIEW_WIDTH.read(params);
    let height = PREVIEW_HEIGHT.read(params);

    let inner_width = width - 2 * PADDING;
    let inner_height = height - 2 * PADDING;
    let fill_width = progress as f64 / 100.0 * inner_width as f64;

    tracing::debug!("Rendering preview: progress={}, size={}x{}", progress, width, height);

    let doc = Element::new("svg")
        .attr("width", width)
        .attr("height", height)
        .attr("viewBox", format!("0 0 {width} {height}"))
        .attr("xmlns", SVG_NS)
        .attr("role", "img")
        .attr("aria-label", format!("Progress: {progress}%"))
        .child(
            Element::new("defs").child(
                Element::new("clipPath").attr("id", "cardClip").child(
                    Element::new("rect")
                        .attr("x", PADDING)
                        .attr("y", PADDING)
                        .attr("width", inner_width)
                        .attr("height", inner_height)
                        .attr("rx", RADIUS)
                        .attr("ry", RADIUS),
                ),
            ),
        )
        .child(
            Element::new("rect")
                .attr("width", width)
                .attr("height", height)
                .attr("fill", &background_color),
        )
        .child(
            Element::new("g")
                .attr("clip-path", "url(#cardClip)")
                .child(
                    Element::new("rect")
                        .attr("x", PADDING)
                        .attr("y", PADDING)
                        .attr("width", inner_width)
                        .attr("height", inner_height)
                        .attr("fill", &background_color),
                )
                .child(
                    Element::new("rect")
                        .attr("x", PADDING)
                        .attr("y", PADDING)
                        .attr("width", num(fill_width))
                        .attr("height", inner_height)
                        .attr("fill", &color),
                ),
        );

    RenderedBar::new(doc.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn preview_uses_card_bounds() {
        let card = render_preview(&params(&[("height", "10"), ("width", "9000")]));
        assert!(card.markup.starts_with(r#"<svg width="3000" height="50""#));
        assert_eq!(card.content_type, "image/svg+xml");
    }

    #[test]
    fn preview_fill_is_share_of_inner_width() {
        let card = render_preview(&params(&[
            ("progress", "50"),
            ("width", "240"),
            ("color", "#16a34a"),
        ]));
        assert!(card.markup.contains(r##"width="100" height="10" fill="#16a34a""##));
    }

    #[test]
    fn preview_progress_is_clamped() {
        let card = render_preview(&params(&[("progress", "400"), ("width", "240")]));
        assert!(card.markup.contains(r##"width="200" height="10" fill="#2563eb""##));
    }
}
