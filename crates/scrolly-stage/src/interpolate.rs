//! Easing and attribute value interpolation.
//!
//! Values are strings. Plain numbers, `#rrggbb` colours and strings whose
//! numbers can be paired up (`translate(0,460)` → `translate(140,0)`) are
//! interpolated; anything else keeps its start value until the transition
//! completes.

/// Cubic in-out easing, the default easing of most charting libraries.
#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Interpolates from `from` to `to` at eased progress `t`.
///
/// Returns `None` when the value should be left as it is for now. At
/// `t >= 1.0` the exact target string is returned.
#[must_use]
pub fn interpolate(from: Option<&str>, to: &str, t: f64) -> Option<String> {
    if t >= 1.0 {
        return Some(to.to_owned());
    }
    let from = from?;
    if from == to {
        return None;
    }
    if let (Ok(a), Ok(b)) = (from.trim().parse::<f64>(), to.trim().parse::<f64>()) {
        return Some(format_number(lerp(a, b, t)));
    }
    if let (Some(a), Some(b)) = (parse_hex_color(from), parse_hex_color(to)) {
        return Some(interpolate_color(a, b, t));
    }
    interpolate_embedded(from, to, t)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Formats a number without a trailing `.0` for whole values.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Avoid "-0".
        return "0".to_owned();
    }
    format!("{value}")
}

fn parse_hex_color(value: &str) -> Option<[u8; 3]> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some([channel(0)?, channel(2)?, channel(4)?])
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn interpolate_color(from: [u8; 3], to: [u8; 3], t: f64) -> String {
    let mix = |i: usize| lerp(f64::from(from[i]), f64::from(to[i]), t).round().clamp(0.0, 255.0) as u8;
    format!("#{:02x}{:02x}{:02x}", mix(0), mix(1), mix(2))
}

#[derive(Debug, PartialEq)]
enum Token {
    Text(String),
    Number(f64),
}

fn tokenize(value: &str) -> Vec<Token> {
    let bytes = value.as_bytes();
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut i = 0;
    while i < bytes.len() {
        let starts_number = bytes[i].is_ascii_digit()
            || (bytes[i] == b'-' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
            || (bytes[i] == b'.' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit));
        if !starts_number {
            text.push(char::from(bytes[i]));
            i += 1;
            continue;
        }
        let start = i;
        i += 1;
        while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
            i += 1;
        }
        match value[start..i].parse::<f64>() {
            Ok(number) => {
                if !text.is_empty() {
                    tokens.push(Token::Text(std::mem::take(&mut text)));
                }
                tokens.push(Token::Number(number));
            }
            Err(_) => text.push_str(&value[start..i]),
        }
    }
    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
    tokens
}

fn interpolate_embedded(from: &str, to: &str, t: f64) -> Option<String> {
    if !from.is_ascii() || !to.is_ascii() {
        return None;
    }
    let from = tokenize(from);
    let to = tokenize(to);
    if from.len() != to.len() || !from.iter().any(|token| matches!(token, Token::Number(_))) {
        return None;
    }
    let mut out = String::new();
    for (a, b) in from.iter().zip(&to) {
        match (a, b) {
            (Token::Text(a), Token::Text(b)) if a == b => out.push_str(a),
            (Token::Number(a), Token::Number(b)) => out.push_str(&format_number(lerp(*a, *b, t))),
            _ => return None,
        }
    }
    Some(out)
}
