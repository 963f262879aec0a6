use once_cell::sync::Lazy;
use regex::Regex;

static COLOR_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"#(?:[0-9a-fA-F]{6}|[0-9a-fA-F]{3})\b|rgba?\([^)]*\)").expect("color token regex")
});

/// Extracts hex and `rgb()`/`rgba()` colours in order of appearance.
pub fn parse_gradient_tokens(text: &str) -> Vec<String> {
    COLOR_TOKEN
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Reads `#rgb` or `#rrggbb` (leading `#` optional) into channels.
pub fn parse_hex(color: &str) -> Option<[u8; 3]> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let mut channels = [0u8; 3];
            for (i, c) in hex.chars().enumerate() {
                let v = c.to_digit(16)? as u8;
                channels[i] = v * 16 + v;
            }
            Some(channels)
        }
        6 => {
            let mut channels = [0u8; 3];
            for (i, channel) in channels.iter_mut().enumerate() {
                *channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
            }
            Some(channels)
        }
        _ => None,
    }
}

/// Shifts every channel by `amount`, saturating at 0 and 255.
///
/// Short hex is expanded first. Anything that is not hex is returned as given.
pub fn adjust_color(color: &str, amount: i32) -> String {
    let Some(channels) = parse_hex(color) else {
        return color.to_string();
    };
    let [r, g, b] = channels.map(|c| (c as i32 + amount).clamp(0, 255));
    format!("#{r:02x}{g:02x}{b:02x}")
}
