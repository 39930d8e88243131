use serde::{Deserialize, Deserializer};

use crate::model::MediaRef;

/// One slide of a generated lesson. Position in the session is its only identity.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Slide {
    pub title: String,
    #[serde(default)]
    pub bullet_points: Vec<String>,
    pub image_url: MediaRef,
    #[serde(default, deserialize_with = "optional_media")]
    pub audio_url: Option<MediaRef>,
    #[serde(default)]
    pub narration: String,
}

impl Slide {
    #[must_use]
    pub fn has_audio(&self) -> bool {
        self.audio_url.is_some()
    }
}

// Narration synthesis can fail per slide; the backend then sends `null` or "".
fn optional_media<'de, D>(deserializer: D) -> Result<Option<MediaRef>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !raw.trim().is_empty() => MediaRef::parse(raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_slide() {
        let slide: Slide = serde_json::from_value(serde_json::json!({
            "title": "Pathophysiology",
            "bullet_points": ["Alveolar inflammation", "Consolidation"],
            "image_url": "https://images.example.org/lung.png",
            "audio_url": "/static/audio/abc_slide_2.mp3",
            "narration": "Let's look at what happens in the lung."
        }))
        .unwrap();
        assert_eq!(slide.bullet_points.len(), 2);
        assert!(slide.has_audio());
    }

    #[test]
    fn blank_or_null_audio_is_absent() {
        for audio in [serde_json::Value::Null, serde_json::json!("")] {
            let slide: Slide = serde_json::from_value(serde_json::json!({
                "title": "Summary",
                "bullet_points": [],
                "image_url": "https://images.example.org/x.png",
                "audio_url": audio,
                "narration": ""
            }))
            .unwrap();
            assert!(!slide.has_audio());
        }
    }
}
