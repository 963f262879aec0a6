use crate::core::color::adjust_color;
use crate::core::params::{QueryParams, RenderConfig};
use crate::core::svg::{Element, SVG_NS, XLINK_NS, num, secs};

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";
pub const CACHE_CONTROL: &str = "public, max-age=60";

/// Brightness offset of the second default gradient stop.
const GRADIENT_LIFT: i32 = 15;

const GRADIENT_ID: &str = "progressGradient";
const PATTERN_ID: &str = "stripePattern";
const CLIP_ID: &str = "progressClip";
const SHADOW_ID: &str = "shadow";

const FILL_CLASS: &str = "bar-fill";
const STRIPES_CLASS: &str = "bar-stripes";

/// A rendered document together with the headers it must be served with.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedBar {
    pub markup: String,
    pub content_type: &'static str,
    pub cache_control: &'static str,
}

impl RenderedBar {
    pub fn new(markup: String) -> Self {
        Self {
            markup,
            content_type: SVG_CONTENT_TYPE,
            cache_control: CACHE_CONTROL,
        }
    }
}

/// Normalizes `params` and renders the bar. Never fails: bad input is clamped
/// or defaulted before it reaches the markup.
pub fn render_bar(params: &QueryParams) -> RenderedBar {
    let config = RenderConfig::from_query(params);
    tracing::debug!(
        "Rendering bar: progress={}, size={}x{}, striped={}, animated={}",
        config.progress,
        config.width,
        config.height,
        config.striped,
        config.animated
    );
    RenderedBar::new(render_markup(&config))
}

pub fn render_markup(config: &RenderConfig) -> String {
    build_document(config).to_string()
}

pub fn build_document(config: &RenderConfig) -> Element {
    let width = config.width as f64;
    let height = config.height as f64;
    let border_radius = config.border_radius as f64;
    let progress_width = config.progress_width();

    let background_radius = border_radius.min(height / 2.0);
    let clip_radius = background_radius.min(progress_width / 2.0);

    let label = format!("Progress: {}%", config.progress);

    let mut defs = Element::new("defs").child(gradient(config));
    if config.striped {
        defs = defs.child(stripe_pattern(config));
    }
    defs = defs
        .child(
            Element::new("clipPath").attr("id", CLIP_ID).child(
                Element::new("rect")
                    .attr("width", num(progress_width))
                    .attr("height", config.height)
                    .attr("rx", num(clip_radius))
                    .attr("ry", num(clip_radius)),
            ),
        )
        .child(
            Element::new("filter")
                .attr("id", SHADOW_ID)
                .attr("x", "-10%")
                .attr("y", "-10%")
                .attr("width", "120%")
                .attr("height", "130%")
                .child(
                    Element::new("feDropShadow")
                        .attr("dx", 0)
                        .attr("dy", 1)
                        .attr("stdDeviation", 1)
                        .attr("flood-opacity", 0.2),
                ),
        );

    let background = Element::new("rect")
        .attr("width", config.width)
        .attr("height", config.height)
        .attr("rx", num(background_radius))
        .attr("ry", num(background_radius))
        .attr("fill", &config.background_color)
        .attr("filter", format!("url(#{SHADOW_ID})"));

    let styles = animation_styles(config);

    let mut fill = Element::new("rect");
    if !styles.fill.is_empty() {
        fill = fill.attr("class", FILL_CLASS);
    }
    let fill = fill
        .attr("width", config.width)
        .attr("height", config.height)
        .attr("fill", format!("url(#{GRADIENT_ID})"));

    let mut bar = Element::new("g")
        .attr("clip-path", format!("url(#{CLIP_ID})"))
        .child(fill);
    if config.striped {
        let mut stripes = Element::new("rect");
        if !styles.stripes.is_empty() {
            stripes = stripes.attr("class", STRIPES_CLASS);
        }
        bar = bar.child(
            stripes
                .attr("width", num(progress_width))
                .attr("height", config.height)
                .attr("fill", format!("url(#{PATTERN_ID})")),
        );
    }

    let outline = Element::new("rect")
        .attr("width", config.width)
        .attr("height", config.height)
        .attr("rx", config.border_radius)
        .attr("ry", config.border_radius)
        .attr("fill", "none")
        .attr("stroke", &config.background_color)
        .attr("stroke-width", 1)
        .attr("opacity", 0.5);

    let mut svg = Element::new("svg")
        .attr("width", config.width)
        .attr("height", config.height)
        .attr("viewBox", format!("0 0 {} {}", num(width), num(height)))
        .attr("xmlns", SVG_NS)
        .attr("xmlns:xlink", XLINK_NS)
        .attr("role", "img")
        .attr("aria-label", &label)
        .child(Element::new("title").text(label))
        .child(defs)
        .child(background)
        .child(bar)
        .child(outline);

    if let Some(css) = styles.to_css() {
        svg = svg.child(Element::new("style").text(css));
    }
    svg
}

fn gradient(config: &RenderConfig) -> Element {
    let colors = match &config.color_gradient {
        Some(tokens) => tokens.clone(),
        None => vec![
            config.color.clone(),
            adjust_color(&config.color, GRADIENT_LIFT),
        ],
    };
    let last = (colors.len() - 1) as f64;
    let stops = colors.iter().enumerate().map(|(i, color)| {
        Element::new("stop")
            .attr("offset", format!("{}%", num(i as f64 / last * 100.0)))
            // `;` would let the value start a second declaration.
            .attr(
                "style",
                format!("stop-color:{}; stop-opacity:1", color.replace(';', "")),
            )
    });

    Element::new("linearGradient")
        .attr("id", GRADIENT_ID)
        .attr("x1", "0%")
        .attr("y1", "0%")
        .attr("x2", "100%")
        .attr("y2", "0%")
        .children(stops)
}

fn stripe_pattern(config: &RenderConfig) -> Element {
    let size = config.stripe_size();
    let half = size / 2.0;

    let mut pattern = Element::new("pattern")
        .attr("id", PATTERN_ID)
        .attr("patternUnits", "userSpaceOnUse")
        .attr("width", num(size))
        .attr("height", num(size))
        .attr("patternTransform", "rotate(45)")
        .child(
            Element::new("rect")
                .attr("x", 0)
                .attr("y", 0)
                .attr("width", num(half))
                .attr("height", num(size))
                .attr("fill", "rgba(255, 255, 255, 0.15)"),
        )
        .child(
            Element::new("rect")
                .attr("x", num(half))
                .attr("y", 0)
                .attr("width", num(half))
                .attr("height", num(size))
                .attr("fill", "transparent"),
        );

    if config.animated {
        pattern = pattern.child(
            Element::new("animateTransform")
                .attr("attributeName", "patternTransform")
                .attr("type", "translate")
                .attr("from", "0 0")
                .attr("to", format!("{} 0", num(size)))
                .attr("dur", format!("{}s", secs(config.animation_duration())))
                .attr("repeatCount", "indefinite")
                .attr("additive", "sum"),
        );
    }
    pattern
}

/// CSS animations attached to the fill and stripe rectangles.
#[derive(Debug, Default)]
struct AnimationStyles {
    fill: Vec<String>,
    stripes: Vec<String>,
    keyframes: Vec<String>,
}

fn animation_styles(config: &RenderConfig) -> AnimationStyles {
    let mut styles = AnimationStyles::default();

    if let Some(duration) = config.initial_animation_duration() {
        let grow = format!("bar-grow {}s ease-out forwards", secs(duration));
        styles.fill.push(grow.clone());
        if config.striped {
            styles.stripes.push(grow);
        }
        styles.keyframes.push(format!(
            "@keyframes bar-grow {{ from {{ width: 0px; }} to {{ width: {}px; }} }}",
            num(config.progress_width())
        ));
    }

    // Striped bars animate through the pattern transform instead.
    if config.animated && !config.striped {
        styles.fill.push(format!(
            "bar-pulse {}s ease-in-out infinite",
            secs(config.animation_duration() * 1.2)
        ));
        styles.keyframes.push(
            "@keyframes bar-pulse { 0% { opacity: 0.8; } 50% { opacity: 1; } 100% { opacity: 0.8; } }"
                .to_string(),
        );
    }

    styles
}

impl AnimationStyles {
    fn to_css(&self) -> Option<String> {
        let mut rules = Vec::new();
        if !self.fill.is_empty() {
            rules.push(format!(".{FILL_CLASS} {{ animation: {}; }}", self.fill.join(", ")));
        }
        if !self.stripes.is_empty() {
            rules.push(format!(
                ".{STRIPES_CLASS} {{ animation: {}; }}",
                self.stripes.join(", ")
            ));
        }
        rules.extend(self.keyframes.iter().cloned());
        (!rules.is_empty()).then(|| rules.join(" "))
    }
}
