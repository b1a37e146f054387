//! Supported display locales and bilingual field selection.
//!
//! Every bilingual entity stores two parallel fields (`name` / `name_ar`).
//! [`Localized`] pairs them and [`Localized::pick`] selects one for the active
//! locale. There is deliberately no fallback: an empty Arabic name renders as
//! an empty string on `/ar` pages.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unsupported locale code.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    #[error("unsupported locale: {0}")]
    Unsupported(String),
}

/// A display language supported by the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Ar,
}

/// Text direction for the `dir` attribute on `<html>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    /// Value for the HTML `dir` attribute.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ltr => "ltr",
            Self::Rtl => "rtl",
        }
    }
}

impl Locale {
    /// All supported locales, in the order they are offered.
    pub const ALL: [Self; 2] = [Self::En, Self::Ar];

    /// The two-letter code used in URL prefixes and cookies.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    /// Text direction for this locale.
    #[must_use]
    pub const fn direction(&self) -> TextDirection {
        match self {
            Self::En => TextDirection::Ltr,
            Self::Ar => TextDirection::Rtl,
        }
    }

    /// The locale offered by the language toggle.
    #[must_use]
    pub const fn other(&self) -> Self {
        match self {
            Self::En => Self::Ar,
            Self::Ar => Self::En,
        }
    }

    /// Prefix an unprefixed path with this locale (`/cart` -> `/ar/cart`, `/` -> `/ar`).
    #[must_use]
    pub fn prefix(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            format!("/{}", self.code())
        } else {
            format!("/{}/{path}", self.code())
        }
    }

    /// Split a locale prefix off a request path.
    ///
    /// Returns the locale and the remaining path (always starting with `/`),
    /// or `None` when the first segment is not a supported locale.
    #[must_use]
    pub fn strip_prefix(path: &str) -> Option<(Self, String)> {
        let trimmed = path.strip_prefix('/')?;
        let (first, rest) = match trimmed.find('/') {
            Some(idx) => trimmed.split_at(idx),
            None => (trimmed, ""),
        };
        let locale = first.parse::<Self>().ok()?;
        let rest = if rest.is_empty() { "/" } else { rest };
        Some((locale, rest.to_owned()))
    }

    /// Pick the best supported locale from an `Accept-Language` header.
    ///
    /// Honors `q` weights; ties keep header order. Region subtags are ignored
    /// (`ar-SA` selects Arabic).
    #[must_use]
    pub fn negotiate(accept_language: &str) -> Option<Self> {
        let mut best: Option<(Self, f32)> = None;

        for entry in accept_language.split(',') {
            let mut parts = entry.split(';');
            let tag = parts.next().unwrap_or("").trim();
            let quality = parts
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);

            let primary = tag.split('-').next().unwrap_or("");
            let Ok(locale) = primary.parse::<Self>() else {
                continue;
            };

            if quality > 0.0 && best.is_none_or(|(_, q)| quality > q) {
                best = Some((locale, quality));
            }
        }

        best.map(|(locale, _)| locale)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ar" => Ok(Self::Ar),
            _ => Err(LocaleError::Unsupported(s.to_owned())),
        }
    }
}

/// A value stored once per supported locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Localized<T> {
    pub en: T,
    pub ar: T,
}

impl<T> Localized<T> {
    /// Pair an English and an Arabic value.
    pub const fn new(en: T, ar: T) -> Self {
        Self { en, ar }
    }

    /// Select the value for `locale`, without falling back to the other one.
    pub const fn pick(&self, locale: Locale) -> &T {
        match locale {
            Locale::En => &self.en,
            Locale::Ar => &self.ar,
        }
    }
}

impl Localized<String> {
    /// Select the text for `locale` as a string slice.
    #[must_use]
    pub fn text(&self, locale: Locale) -> &str {
        self.pick(locale)
    }
}

impl Localized<Option<String>> {
    /// Select the optional text for `locale`; missing text is an empty string.
    #[must_use]
    pub fn text(&self, locale: Locale) -> &str {
        self.pick(locale).as_deref().unwrap_or("")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_locales() {
        assert_eq!("en".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("AR".parse::<Locale>().unwrap(), Locale::Ar);
        assert!(matches!(
            "fr".parse::<Locale>(),
            Err(LocaleError::Unsupported(_))
        ));
    }

    #[test]
    fn test_direction() {
        assert_eq!(Locale::Ar.direction().as_str(), "rtl");
        assert_eq!(Locale::En.direction().as_str(), "ltr");
    }

    #[test]
    fn test_prefix() {
        assert_eq!(Locale::Ar.prefix("/"), "/ar");
        assert_eq!(Locale::En.prefix("/products/3"), "/en/products/3");
        assert_eq!(Locale::En.prefix("cart"), "/en/cart");
    }

    #[test]
    fn test_strip_prefix() {
        assert_eq!(
            Locale::strip_prefix("/en/products/3"),
            Some((Locale::En, "/products/3".to_owned()))
        );
        assert_eq!(Locale::strip_prefix("/ar"), Some((Locale::Ar, "/".to_owned())));
        assert_eq!(Locale::strip_prefix("/ar/"), Some((Locale::Ar, "/".to_owned())));
        assert_eq!(Locale::strip_prefix("/english/cart"), None);
        assert_eq!(Locale::strip_prefix("/products"), None);
        assert_eq!(Locale::strip_prefix(""), None);
    }

    #[test]
    fn test_negotiate_prefers_highest_quality() {
        assert_eq!(
            Locale::negotiate("fr-FR, en;q=0.5, ar-SA;q=0.9"),
            Some(Locale::Ar)
        );
        assert_eq!(Locale::negotiate("en-US,en;q=0.9"), Some(Locale::En));
    }

    #[test]
    fn test_negotiate_ignores_unsupported_and_zero_weight() {
        assert_eq!(Locale::negotiate("de, fr;q=0.8"), None);
        assert_eq!(Locale::negotiate("ar;q=0, en;q=0.1"), Some(Locale::En));
        assert_eq!(Locale::negotiate(""), None);
    }

    #[test]
    fn test_localized_pick_has_no_fallback() {
        let name = Localized::new("Silk Hijab".to_owned(), String::new());
        assert_eq!(name.text(Locale::En), "Silk Hijab");
        assert_eq!(name.text(Locale::Ar), "");
    }

    #[test]
    fn test_localized_optional_text() {
        let description: Localized<Option<String>> =
            Localized::new(None, Some("حجاب حريري".to_owned()));
        assert_eq!(description.text(Locale::En), "");
        assert_eq!(description.text(Locale::Ar), "حجاب حريري");
    }

    #[test]
    fn test_other_toggles() {
        assert_eq!(Locale::Ar.other(), Locale::En);
        assert_eq!(Locale::En.other(), Locale::Ar);
    }
}
