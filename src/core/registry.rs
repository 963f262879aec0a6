use once_cell::sync::Lazy;

pub struct Preset {
    pub name: String,
    /// Primary bar colour; for gradients, the first stop.
    pub color: String,
    /// `colorGradient` value reproducing the preset, if it is a gradient.
    pub gradient: Option<String>,
}

impl Preset {
    fn solid(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            gradient: None,
        }
    }

    fn gradient(name: &str, stops: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            color: stops[0].to_string(),
            gradient: Some(stops.join(",")),
        }
    }
}

pub static PRESET_REGISTRY: Lazy<Vec<Preset>> = Lazy::new(|| {
    vec![
        Preset::solid("Blue", "#2563eb"),
        Preset::solid("Green", "#16a34a"),
        Preset::solid("Purple", "#9333ea"),
        Preset::solid("Red", "#dc2626"),
        Preset::solid("Orange", "#ea580c"),
        Preset::solid("Pink", "#db2777"),
        Preset::gradient("Sunset", &["#f97316", "#db2777"]),
        Preset::gradient("Ocean", &["#0ea5e9", "#2563eb", "#4f46e5"]),
        Preset::gradient("Forest", &["#65a30d", "#16a34a"]),
        Preset::gradient("Aurora", &["#22d3ee", "#a855f7", "#ec4899"]),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::parse_gradient_tokens;

    #[test]
    fn gradient_presets_parse_back_to_their_stops() {
        for preset in PRESET_REGISTRY.iter() {
            if let Some(gradient) = &preset.gradient {
                let tokens = parse_gradient_tokens(gradient);
                assert!(tokens.len() >= 2, "{} has too few stops", preset.name);
                assert_eq!(tokens[0], preset.color);
            }
        }
    }

    #[test]
    fn solid_presets_come_first() {
        assert_eq!(PRESET_REGISTRY[0].name, "Blue");
        assert_eq!(PRESET_REGISTRY[0].color, "#2563eb");
        let first_gradient = PRESET_REGISTRY
            .iter()
            .position(|p| p.gradient.is_some())
            .unwrap();
        assert!(PRESET_REGISTRY[first_gradient..].iter().all(|p| p.gradient.is_some()));
    }
}
