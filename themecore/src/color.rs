//! Hex colors with an optional alpha byte, as stored in theme settings.

use crate::error::{Error, Result};

/// A `#rrggbb` or `#rrggbbaa` color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColor {
    rgb: String,
    alpha: String,
}

impl ThemeColor {
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| Error::InvalidColor(value.to_string()))?;
        if !(digits.len() == 6 || digits.len() == 8) || !digits.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(Error::InvalidColor(value.to_string()));
        }

        let digits = digits.to_ascii_lowercase();
        let (rgb, alpha) = digits.split_at(6);
        Ok(Self {
            rgb: format!("#{rgb}"),
            alpha: if alpha.is_empty() {
                "ff".to_string()
            } else {
                alpha.to_string()
            },
        })
    }

    /// Opaque black, used where a stored color is missing.
    pub fn black() -> Self {
        Self {
            rgb: "#000000".to_string(),
            alpha: "ff".to_string(),
        }
    }

    /// `#rrggbb` without alpha.
    pub fn rgb(&self) -> &str {
        &self.rgb
    }

    pub fn alpha_hex(&self) -> &str {
        &self.alpha
    }

    /// Alpha as a 0..=100 percentage.
    pub fn opacity_percent(&self) -> f64 {
        let alpha = u8::from_str_radix(&self.alpha, 16).unwrap_or(u8::MAX);
        f64::from(alpha) / 255.0 * 100.0
    }

    /// Same color, alpha replaced by the given opacity percentage.
    pub fn with_opacity(&self, percent: f64) -> String {
        format!("{}{}", self.rgb, hex_for_opacity(percent))
    }

    /// Fully transparent end of the opacity slider track.
    pub fn transparent(&self) -> String {
        format!("{}00", self.rgb)
    }

    /// Fully opaque end of the opacity slider track.
    pub fn opaque(&self) -> String {
        format!("{}ff", self.rgb)
    }
}

impl std::fmt::Display for ThemeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rgb, self.alpha)
    }
}

/// Two lowercase hex digits for an opacity percentage, clamped to 0..=100.
pub fn hex_for_opacity(percent: f64) -> String {
    let alpha = (percent.clamp(0.0, 100.0) / 100.0 * 255.0).round() as u8;
    format!("{alpha:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_alpha() {
        let c = ThemeColor::parse("#AABBCC").unwrap();
        assert_eq!(c.rgb(), "#aabbcc");
        assert_eq!(c.alpha_hex(), "ff");
        assert_eq!(c.opacity_percent(), 100.0);

        let c = ThemeColor::parse("#aabbcc80").unwrap();
        assert_eq!(c.alpha_hex(), "80");
        assert_eq!(c.to_string(), "#aabbcc80");
    }

    #[test]
    fn rejects_malformed() {
        assert!(ThemeColor::parse("aabbcc").is_err());
        assert!(ThemeColor::parse("#abc").is_err());
        assert!(ThemeColor::parse("#gghhii").is_err());
    }

    #[test]
    fn opacity_hex() {
        assert_eq!(hex_for_opacity(100.0), "ff");
        assert_eq!(hex_for_opacity(0.0), "00");
        assert_eq!(hex_for_opacity(50.0), "80");
        assert_eq!(hex_for_opacity(250.0), "ff");

        let c = ThemeColor::parse("#102030").unwrap();
        assert_eq!(c.with_opacity(0.0), "#10203000");
        assert_eq!(c.transparent(), "#10203000");
        assert_eq!(c.opaque(), "#102030ff");
        assert_eq!(ThemeColor::black().to_string(), "#000000ff");
    }
}
