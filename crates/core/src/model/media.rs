use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use url::Url;

//
// ─── ERRORS (domain validation) ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MediaError {
    #[error("Media location cannot be empty.")]
    Empty,

    #[error("Media location {0:?} cannot be resolved against the backend URL.")]
    Unresolvable(String),
}

//
// ─── MEDIA REFERENCE ───────────────────────────────────────────────────────────
//

/// Location of a slide image or narration track.
///
/// The backend returns absolute URLs for third-party images but serves generated
/// audio from its own static mount, so narration arrives as a path like
/// `/static/audio/<session>_slide_1.mp3`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum MediaRef {
    Url(Url),
    Path(String),
}

impl MediaRef {
    /// Parse a raw media location.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Empty` for blank input.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, MediaError> {
        let s = raw.as_ref().trim();
        if s.is_empty() {
            return Err(MediaError::Empty);
        }
        match Url::parse(s) {
            Ok(url) => Ok(Self::Url(url)),
            Err(_) => Ok(Self::Path(s.to_string())),
        }
    }

    #[must_use]
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            Self::Url(u) => Some(u),
            Self::Path(_) => None,
        }
    }

    #[must_use]
    pub fn is_relative(&self) -> bool {
        matches!(self, Self::Path(_))
    }

    /// Resolve against the backend base URL. Absolute references are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns `MediaError::Unresolvable` if the path cannot be joined onto `base`.
    pub fn resolve(&self, base: &Url) -> Result<Url, MediaError> {
        match self {
            Self::Url(u) => Ok(u.clone()),
            Self::Path(p) => base
                .join(p)
                .map_err(|_| MediaError::Unresolvable(p.clone())),
        }
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(u) => f.write_str(u.as_str()),
            Self::Path(p) => f.write_str(p),
        }
    }
}

impl TryFrom<String> for MediaRef {
    type Error = MediaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<MediaRef> for String {
    fn from(media: MediaRef) -> Self {
        media.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://localhost:8000").unwrap()
    }

    #[test]
    fn absolute_url_is_kept() {
        let media = MediaRef::parse("https://images.example.org/heart.png").unwrap();
        assert!(!media.is_relative());
        assert_eq!(
            media.resolve(&base()).unwrap().as_str(),
            "https://images.example.org/heart.png"
        );
    }

    #[test]
    fn backend_path_joins_base() {
        let media = MediaRef::parse("/static/audio/s1_slide_1.mp3").unwrap();
        assert!(media.is_relative());
        assert_eq!(
            media.resolve(&base()).unwrap().as_str(),
            "http://localhost:8000/static/audio/s1_slide_1.mp3"
        );
    }

    #[test]
    fn blank_is_rejected() {
        assert_eq!(MediaRef::parse("  "), Err(MediaError::Empty));
        assert!(serde_json::from_str::<MediaRef>("\"\"").is_err());
    }
}
