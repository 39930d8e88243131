use medlearn_core::model::{MediaRef, Session};
use medlearn_core::walker::{PresentationWalker, SlideMark};
use url::Url;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideDotVm {
    pub index: usize,
    pub class: &'static str,
    pub tooltip: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideVm {
    pub index: usize,
    pub title: String,
    pub bullet_points: Vec<String>,
    pub narration: String,
    pub image_src: String,
    pub audio_src: Option<String>,
    pub dots: Vec<SlideDotVm>,
    pub progress_label: String,
    pub progress_percent: u32,
    pub can_go_back: bool,
    pub next_label: &'static str,
}

/// Absolute location for a media reference. Relative paths are served by the
/// backend; without a base they are passed through unchanged.
#[must_use]
pub fn media_src(media: &MediaRef, base: Option<&Url>) -> String {
    match base {
        Some(base) => media
            .resolve(base)
            .map_or_else(|_| media.to_string(), String::from),
        None => media.to_string(),
    }
}

fn dot_class(mark: SlideMark) -> &'static str {
    match mark {
        SlideMark::Seen => "slide-dot slide-dot--seen",
        SlideMark::Current => "slide-dot slide-dot--current",
        SlideMark::Upcoming => "slide-dot",
    }
}

#[must_use]
pub fn map_slide(
    session: &Session,
    walker: &PresentationWalker,
    media_base: Option<&Url>,
) -> Option<SlideVm> {
    let index = walker.current();
    let slide = session.slide(index)?;
    let total = walker.len();

    let dots = session
        .slides()
        .iter()
        .enumerate()
        .map(|(i, s)| SlideDotVm {
            index: i,
            class: dot_class(walker.mark(i)),
            tooltip: format!("Slide {}: {}", i + 1, s.title),
        })
        .collect();

    Some(SlideVm {
        index,
        title: slide.title.clone(),
        bullet_points: slide.bullet_points.clone(),
        narration: slide.narration.clone(),
        image_src: media_src(&slide.image_url, media_base),
        audio_src: slide
            .audio_url
            .as_ref()
            .map(|audio| media_src(audio, media_base)),
        dots,
        progress_label: format!("Slide {} of {total}", index + 1),
        progress_percent: u32::try_from((index + 1) * 100 / total).unwrap_or(100),
        can_go_back: !walker.is_first(),
        next_label: if walker.is_last() { "Take Quiz" } else { "Next" },
    })
}
