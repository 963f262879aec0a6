use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::color::parse_gradient_tokens;

/// Raw query parameters as received from the request. An absent key is `null`.
pub type QueryParams = HashMap<String, String>;

pub const DEFAULT_COLOR: &str = "#2563eb";
pub const DEFAULT_BACKGROUND_COLOR: &str = "#f3f4f6";

/// Slowest speed the timing math accepts.
pub const MIN_ANIMATION_SPEED: f64 = 0.1;

/// Shortest loop duration; SMIL rejects a zero `dur`.
pub const MIN_ANIMATION_DURATION: f64 = 0.01;

static INT_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[+-]?\d+").expect("integer prefix regex"));
static FLOAT_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("float prefix regex")
});

/// Parses the leading base-10 integer of `raw`, falling back to `default` when
/// the value is absent, empty, or has no numeric prefix.
pub fn parse_int_safe(raw: Option<&str>, default: i64) -> i64 {
    let Some(raw) = raw.filter(|v| !v.is_empty()) else {
        return default;
    };
    match INT_PREFIX.find(raw) {
        // `as` saturates, so absurdly long digit runs still clamp sensibly later.
        Some(m) => m.as_str().trim().parse::<f64>().map_or(default, |v| v as i64),
        None => default,
    }
}

/// Floating-point counterpart of [`parse_int_safe`]. Non-finite results are
/// treated as unparseable.
pub fn parse_float_safe(raw: Option<&str>, default: f64) -> f64 {
    let Some(raw) = raw.filter(|v| !v.is_empty()) else {
        return default;
    };
    FLOAT_PREFIX
        .find(raw)
        .and_then(|m| m.as_str().trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

/// Only the literal `"true"` is true.
pub fn parse_bool(raw: Option<&str>) -> bool {
    raw == Some("true")
}

pub struct IntField {
    pub name: &'static str,
    pub default: i64,
    pub min: i64,
    pub max: i64,
}

impl IntField {
    pub fn read(&self, params: &QueryParams) -> i64 {
        parse_int_safe(lookup(params, self.name), self.default).clamp(self.min, self.max)
    }
}

pub struct FloatField {
    pub name: &'static str,
    pub default: f64,
    pub min: f64,
}

impl FloatField {
    pub fn read(&self, params: &QueryParams) -> f64 {
        parse_float_safe(lookup(params, self.name), self.default).max(self.min)
    }
}

pub struct ColorField {
    pub name: &'static str,
    pub default: &'static str,
}

impl ColorField {
    pub fn read(&self, params: &QueryParams) -> String {
        lookup(params, self.name)
            .filter(|v| !v.is_empty())
            .unwrap_or(self.default)
            .to_string()
    }
}

pub struct BoolField {
    pub name: &'static str,
}

impl BoolField {
    pub fn read(&self, params: &QueryParams) -> bool {
        parse_bool(lookup(params, self.name))
    }
}

fn lookup<'a>(params: &'a QueryParams, name: &str) -> Option<&'a str> {
    params.get(name).map(String::as_str)
}

pub const PROGRESS: IntField = IntField {
    name: "progress",
    default: 0,
    min: 0,
    max: 100,
};
pub const HEIGHT: IntField = IntField {
    name: "height",
    default: 20,
    min: 5,
    max: 500,
};
pub const WIDTH: IntField = IntField {
    name: "width",
    default: 200,
    min: 10,
    max: 3000,
};
pub const BORDER_RADIUS: IntField = IntField {
    name: "borderRadius",
    default: 10,
    min: 0,
    max: 1000,
};
pub const ANIMATION_SPEED: FloatField = FloatField {
    name: "animationSpeed",
    default: 1.0,
    min: 0.0,
};
pub const INITIAL_ANIMATION_SPEED: FloatField = FloatField {
    name: "initialAnimationSpeed",
    default: 1.0,
    min: 0.0,
};
pub const COLOR: ColorField = ColorField {
    name: "color",
    default: DEFAULT_COLOR,
};
pub const BACKGROUND_COLOR: ColorField = ColorField {
    name: "backgroundColor",
    default: DEFAULT_BACKGROUND_COLOR,
};
pub const STRIPED: BoolField = BoolField { name: "striped" };
pub const ANIMATED: BoolField = BoolField { name: "animated" };
pub const COLOR_GRADIENT: &str = "colorGradient";

/// Normalized bar configuration, built once per request.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub progress: i64,
    pub color: String,
    /// At least two colour tokens, or `None`.
    pub color_gradient: Option<Vec<String>>,
    pub background_color: String,
    pub height: i64,
    pub width: i64,
    pub border_radius: i64,
    pub striped: bool,
    pub animated: bool,
    pub animation_speed: f64,
    pub initial_animation_speed: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::from_query(&QueryParams::new())
    }
}

impl RenderConfig {
    pub fn from_query(params: &QueryParams) -> Self {
        let color_gradient = lookup(params, COLOR_GRADIENT)
            .map(parse_gradient_tokens)
            .filter(|tokens| tokens.len() >= 2);

        Self {
            progress: PROGRESS.read(params),
            color: COLOR.read(params),
            color_gradient,
            background_color: BACKGROUND_COLOR.read(params),
            height: HEIGHT.read(params),
            width: WIDTH.read(params),
            border_radius: BORDER_RADIUS.read(params),
            striped: STRIPED.read(params),
            animated: ANIMATED.read(params),
            animation_speed: ANIMATION_SPEED.read(params),
            initial_animation_speed: INITIAL_ANIMATION_SPEED.read(params),
        }
    }

    /// Width of the filled portion in pixels.
    pub fn progress_width(&self) -> f64 {
        self.progress as f64 / 100.0 * self.width as f64
    }

    pub fn safe_animation_speed(&self) -> f64 {
        self.animation_speed.max(MIN_ANIMATION_SPEED)
    }

    /// Seconds per loop of the stripe or pulse animation.
    pub fn animation_duration(&self) -> f64 {
        (1.0 / self.safe_animation_speed())
            .powi(2)
            .max(MIN_ANIMATION_DURATION)
    }

    pub fn stripe_size(&self) -> f64 {
        (20.0 * self.safe_animation_speed()).clamp(10.0, 40.0)
    }

    /// Duration of the one-shot grow animation; `None` when it is disabled.
    /// A speed so small that the duration overflows also disables it.
    pub fn initial_animation_duration(&self) -> Option<f64> {
        if self.initial_animation_speed <= 0.0 {
            return None;
        }
        let duration = self.progress as f64 / 100.0 * (1.0 / self.initial_animation_speed);
        duration.is_finite().then_some(duration)
    }

    /// Normalized parameters in the order share links list them.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            (PROGRESS.name, self.progress.to_string()),
            (COLOR.name, self.color.clone()),
            (BACKGROUND_COLOR.name, self.background_color.clone()),
            (HEIGHT.name, self.height.to_string()),
            (WIDTH.name, self.width.to_string()),
            (BORDER_RADIUS.name, self.border_radius.to_string()),
            (STRIPED.name, self.striped.to_string()),
            (ANIMATED.name, self.animated.to_string()),
            (ANIMATION_SPEED.name, self.animation_speed.to_string()),
            (
                INITIAL_ANIMATION_SPEED.name,
                self.initial_animation_speed.to_string(),
            ),
        ];
        if let Some(gradient) = &self.color_gradient {
            pairs.push((COLOR_GRADIENT, gradient.join(",")));
        }
        pairs
    }
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
    fn int_parse_falls_back_on_missing_empty_or_garbage() {
        assert_eq!(parse_int_safe(None, 7), 7);
        assert_eq!(parse_int_safe(Some(""), 7), 7);
        assert_eq!(parse_int_safe(Some("abc"), 7), 7);
        assert_eq!(parse_int_safe(Some("-"), 7), 7);
    }

    #[test]
    fn int_parse_reads_leading_digits() {
        assert_eq!(parse_int_safe(Some("42"), 0), 42);
        assert_eq!(parse_int_safe(Some("-50"), 0), -50);
        assert_eq!(parse_int_safe(Some("12px"), 0), 12);
        assert_eq!(parse_int_safe(Some("3.7"), 0), 3);
        assert_eq!(parse_int_safe(Some(" 8"), 0), 8);
        assert_eq!(parse_int_safe(Some("99999999999999999999999"), 0), i64::MAX);
    }

    #[test]
    fn float_parse_rejects_non_finite() {
        assert_eq!(parse_float_safe(Some("NaN"), 1.0), 1.0);
        assert_eq!(parse_float_safe(Some("inf"), 1.0), 1.0);
        assert_eq!(parse_float_safe(Some(""), 1.0), 1.0);
        assert_eq!(parse_float_safe(Some("1.5x"), 1.0), 1.5);
        assert_eq!(parse_float_safe(Some(".25"), 1.0), 0.25);
        assert_eq!(parse_float_safe(Some("2e1"), 1.0), 20.0);
    }

    #[test]
    fn bool_parse_is_strict() {
        assert!(parse_bool(Some("true")));
        assert!(!parse_bool(Some("TRUE")));
        assert!(!parse_bool(Some("1")));
        assert!(!parse_bool(Some("yes")));
        assert!(!parse_bool(None));
    }

    #[test]
    fn progress_clamps_to_percent_range() {
        for p in -1000..=1000 {
            let config = RenderConfig::from_query(&params(&[("progress", &p.to_string())]));
            assert!((0..=100).contains(&config.progress));
        }
        let over = RenderConfig::from_query(&params(&[("progress", "150")]));
        assert_eq!(over.progress, 100);
        let under = RenderConfig::from_query(&params(&[("progress", "-50")]));
        assert_eq!(under.progress, 0);
    }

    #[test]
    fn dimensions_clamp_to_bounds() {
        let config = RenderConfig::from_query(&params(&[
            ("width", "4000"),
            ("height", "1000"),
            ("borderRadius", "2000"),
        ]));
        assert_eq!(config.width, 3000);
        assert_eq!(config.height, 500);
        assert_eq!(config.border_radius, 1000);

        let config = RenderConfig::from_query(&params(&[("width", "-100"), ("height", "-50")]));
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 5);
    }

    #[test]
    fn defaults_apply_to_empty_strings() {
        let config = RenderConfig::from_query(&params(&[
            ("progress", ""),
            ("color", ""),
            ("backgroundColor", ""),
            ("height", ""),
            ("width", ""),
            ("borderRadius", ""),
            ("animationSpeed", ""),
        ]));
        assert_eq!(config, RenderConfig::default());
        assert_eq!(config.color, DEFAULT_COLOR);
        assert_eq!(config.background_color, DEFAULT_BACKGROUND_COLOR);
        assert_eq!((config.width, config.height, config.border_radius), (200, 20, 10));
    }

    #[test]
    fn slow_speed_is_floored_in_timing_math() {
        let config = RenderConfig::from_query(&params(&[("animationSpeed", "0.01")]));
        assert_eq!(config.animation_speed, 0.01);
        assert_eq!(config.safe_animation_speed(), 0.1);
        assert_eq!(format!("{:.2}", config.animation_duration()), "100.00");
        assert_eq!(config.stripe_size(), 10.0);
    }

    #[test]
    fn stripe_size_scales_with_speed() {
        let config = RenderConfig::from_query(&params(&[("animationSpeed", "1.5")]));
        assert_eq!(config.stripe_size(), 30.0);
        let config = RenderConfig::from_query(&params(&[("animationSpeed", "5")]));
        assert_eq!(config.stripe_size(), 40.0);
    }

    #[test]
    fn initial_animation_can_be_disabled() {
        let config = RenderConfig::from_query(&params(&[
            ("progress", "50"),
            ("initialAnimationSpeed", "2"),
        ]));
        assert_eq!(config.initial_animation_duration(), Some(0.25));

        let config = RenderConfig::from_query(&params(&[("initialAnimationSpeed", "0")]));
        assert_eq!(config.initial_animation_duration(), None);
        let config = RenderConfig::from_query(&params(&[("initialAnimationSpeed", "-3")]));
        assert_eq!(config.initial_animation_duration(), None);
    }

    #[test]
    fn subnormal_initial_speed_never_yields_non_finite_duration() {
        for progress in ["0", "50"] {
            let config = RenderConfig::from_query(&params(&[
                ("progress", progress),
                ("initialAnimationSpeed", "1e-320"),
            ]));
            assert!(config.initial_animation_speed > 0.0);
            assert_eq!(config.initial_animation_duration(), None);
        }
    }

    #[test]
    fn fast_speed_keeps_a_nonzero_loop() {
        let config = RenderConfig::from_query(&params(&[("animationSpeed", "1e200")]));
        assert_eq!(config.animation_duration(), MIN_ANIMATION_DURATION);
        assert_eq!(format!("{:.2}", config.animation_duration()), "0.01");
    }

    #[test]
    fn gradient_needs_two_tokens() {
        let config = RenderConfig::from_query(&params(&[("colorGradient", "#ff0000")]));
        assert_eq!(config.color_gradient, None);

        let config = RenderConfig::from_query(&params(&[(
            "colorGradient",
            "#ff0000 to rgba(0, 0, 255, 0.5)",
        )]));
        assert_eq!(
            config.color_gradient,
            Some(vec!["#ff0000".to_string(), "rgba(0, 0, 255, 0.5)".to_string()])
        );
    }

    #[test]
    fn query_pairs_list_normalized_values() {
        let config = RenderConfig::from_query(&params(&[
            ("progress", "150"),
            ("striped", "true"),
            ("colorGradient", "#111,#222"),
        ]));
        let pairs = config.to_query_pairs();
        assert_eq!(pairs[0], ("progress", "100".to_string()));
        assert_eq!(pairs[6], ("striped", "true".to_string()));
        assert_eq!(pairs[8], ("animationSpeed", "1".to_string()));
        assert_eq!(pairs.last(), Some(&("colorGradient", "#111,#222".to_string())));
    }
}
