use crate::error::{CatalogError, Result};
use rescat_api::{Density, Theme};
use std::fmt;
use std::path::Path;

/// ISO 639-1 language codes accepted as language qualifiers.
const LANGUAGE_CODES: &[&str] = &[
    "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg", "bh",
    "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv", "cy", "da",
    "de", "dv", "dz", "ee", "el", "en", "eo", "es", "et", "eu", "fa", "ff", "fi", "fj", "fo", "fr",
    "fy", "ga", "gd", "gl", "gn", "gu", "gv", "ha", "he", "hi", "ho", "hr", "ht", "hu", "hy", "hz",
    "ia", "id", "ie", "ig", "ii", "ik", "in", "io", "is", "it", "iu", "iw", "ja", "jv", "ka", "kg",
    "ki", "kj", "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw", "ky", "la", "lb", "lg",
    "li", "ln", "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml", "mn", "mr", "ms", "mt", "my",
    "na", "nb", "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv", "ny", "oc", "oj", "om", "or", "os",
    "pa", "pi", "pl", "ps", "pt", "qu", "rm", "rn", "ro", "ru", "rw", "sa", "sc", "sd", "se", "sg",
    "si", "sk", "sl", "sm", "sn", "so", "sq", "sr", "ss", "st", "su", "sv", "sw", "ta", "te", "tg",
    "th", "ti", "tk", "tl", "tn", "to", "tr", "ts", "tt", "tw", "ty", "ug", "uk", "ur", "uz", "ve",
    "vi", "vo", "wa", "wo", "xh", "yi", "yo", "za", "zh", "zu",
];

/// The dimension a qualifier belongs to. A qualifier set holds at most one
/// qualifier per dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Language,
    Region,
    Theme,
    Density,
}

/// Variant order doubles as the canonical order inside a [`QualifierSet`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Qualifier {
    Language(String),
    Region(String),
    Theme(Theme),
    Density(Density),
}

impl Qualifier {
    pub fn parse_token(token: &str) -> Option<Self> {
        if let Some(theme) = Theme::from_token(token) {
            return Some(Qualifier::Theme(theme));
        }
        if let Some(density) = Density::from_token(token) {
            return Some(Qualifier::Density(density));
        }
        if let Some(region) = token.strip_prefix('r') {
            if region.len() == 2 && region.chars().all(|c| c.is_ascii_uppercase()) {
                return Some(Qualifier::Region(region.to_string()));
            }
        }
        if LANGUAGE_CODES.binary_search(&token).is_ok() {
            return Some(Qualifier::Language(token.to_string()));
        }
        None
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Qualifier::Language(_) => Dimension::Language,
            Qualifier::Region(_) => Dimension::Region,
            Qualifier::Theme(_) => Dimension::Theme,
            Qualifier::Density(_) => Dimension::Density,
        }
    }
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

/// A canonically ordered set of qualifiers, one per dimension at most.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QualifierSet(Vec<Qualifier>);

impl QualifierSet {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Parse qualifier tokens in declaration order. `path` is only used for
    /// error reporting.
    pub fn parse<'a>(tokens: impl IntoIterator<Item = &'a str>, path: &Path) -> Result<Self> {
        let mut parsed: Vec<(&str, Qualifier)> = Vec::new();

        for token in tokens {
            let qualifier =
                Qualifier::parse_token(token).ok_or_else(|| CatalogError::UnknownQualifier {
                    path: path.to_path_buf(),
                    token: token.to_string(),
                })?;

            if let Some((first, _)) = parsed
                .iter()
                .find(|(_, q)| q.dimension() == qualifier.dimension())
            {
                return Err(CatalogError::RepetitiveQualifiers {
                    path: path.to_path_buf(),
                    first: first.to_string(),
                    second: token.to_string(),
                });
            }
            parsed.push((token, qualifier));
        }

        let language_pos = parsed
            .iter()
            .position(|(_, q)| q.dimension() == Dimension::Language);
        let region_pos = parsed
            .iter()
            .position(|(_, q)| q.dimension() == Dimension::Region);

        if let Some(region_pos) = region_pos {
            let Some(language_pos) = language_pos else {
                return Err(CatalogError::RegionWithoutLanguage(path.to_path_buf()));
            };
            if region_pos < language_pos {
                return Err(CatalogError::RegionBeforeLanguage {
                    path: path.to_path_buf(),
                    language: parsed[language_pos].0.to_string(),
                    region: parsed[region_pos].0.trim_start_matches('r').to_string(),
                });
            }
        }

        let mut qualifiers: Vec<Qualifier> = parsed.into_iter().map(|(_, q)| q).collect();
        qualifiers.sort();
        Ok(Self(qualifiers))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Qualifier> {
        self.0.iter()
    }

    /// Combine two sets that were validated separately, re-checking the
    /// one-per-dimension rule across them.
    pub fn merge(&self, other: &QualifierSet, path: &Path) -> Result<QualifierSet> {
        let tokens: Vec<String> = self.iter().chain(other.iter()).map(|q| q.to_string()).collect();
        QualifierSet::parse(tokens.iter().map(String::as_str), path)
    }
}

/// Precedence used to order a resource's variants: the unqualified variant
/// first, then fewer qualifiers before more, then canonical qualifier order.
impl Ord for QualifierSet {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for QualifierSet {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for QualifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("default");
        }
        let tokens: Vec<String> = self.0.iter().map(|q| q.to_string()).collect();
        f.write_str(&tokens.join("-"))
    }
}
