use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub const fn token(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub const fn variant_name(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

/// Screen density buckets, ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Ldpi,
    Mdpi,
    Hdpi,
    Xhdpi,
    Xxhdpi,
    Xxxhdpi,
}

impl Density {
    pub const ALL: [Density; 6] = [
        Density::Ldpi,
        Density::Mdpi,
        Density::Hdpi,
        Density::Xhdpi,
        Density::Xxhdpi,
        Density::Xxxhdpi,
    ];

    pub const fn token(&self) -> &'static str {
        match self {
            Density::Ldpi => "ldpi",
            Density::Mdpi => "mdpi",
            Density::Hdpi => "hdpi",
            Density::Xhdpi => "xhdpi",
            Density::Xxhdpi => "xxhdpi",
            Density::Xxxhdpi => "xxxhdpi",
        }
    }

    pub const fn dpi(&self) -> u32 {
        match self {
            Density::Ldpi => 120,
            Density::Mdpi => 160,
            Density::Hdpi => 240,
            Density::Xhdpi => 320,
            Density::Xxhdpi => 480,
            Density::Xxxhdpi => 640,
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.token() == token)
    }

    pub const fn variant_name(&self) -> &'static str {
        match self {
            Density::Ldpi => "Ldpi",
            Density::Mdpi => "Mdpi",
            Density::Hdpi => "Hdpi",
            Density::Xhdpi => "Xhdpi",
            Density::Xxhdpi => "Xxhdpi",
            Density::Xxxhdpi => "Xxxhdpi",
        }
    }
}

/// One dimension distinguishing physical variants of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Qualifier {
    Language(&'static str),
    Region(&'static str),
    Theme(Theme),
    Density(Density),
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Qualifier::Language(code) => f.write_str(code),
            Qualifier::Region(code) => write!(f, "r{}", code),
            Qualifier::Theme(theme) => f.write_str(theme.token()),
            Qualifier::Density(density) => f.write_str(density.token()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_tokens() {
        for density in Density::ALL {
            assert_eq!(Density::from_token(density.token()), Some(density));
        }
        assert!(Density::Ldpi < Density::Xxxhdpi);
        assert_eq!(Density::Xhdpi.dpi(), 320);
        assert_eq!(Density::from_token("tvdpi"), None);
    }

    #[test]
    fn test_qualifier_display() {
        assert_eq!(Qualifier::Language("en").to_string(), "en");
        assert_eq!(Qualifier::Region("US").to_string(), "rUS");
        assert_eq!(Qualifier::Theme(Theme::Dark).to_string(), "dark");
        assert_eq!(Qualifier::Density(Density::Hdpi).to_string(), "hdpi");
    }
}
