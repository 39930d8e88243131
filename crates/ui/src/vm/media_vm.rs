#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageState {
    #[default]
    Loading,
    Loaded,
    Failed,
}

/// Image and audio state of the slide on screen. Any change of the current
/// slide, reported through [`SlideMedia::show`], starts from a fresh state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SlideMedia {
    slide: usize,
    image: ImageState,
    audio_playing: bool,
}

impl SlideMedia {
    fn for_slide(&mut self, slide: usize) -> &mut Self {
        if self.slide != slide {
            *self = Self {
                slide,
                ..Self::default()
            };
        }
        self
    }

    /// The walker moved to `slide`. Returns true if earlier state was dropped.
    pub fn show(&mut self, slide: usize) -> bool {
        if self.slide == slide {
            return false;
        }
        self.for_slide(slide);
        true
    }

    #[must_use]
    pub fn image(&self, slide: usize) -> ImageState {
        if self.slide == slide { self.image } else { ImageState::Loading }
    }

    #[must_use]
    pub fn is_playing(&self, slide: usize) -> bool {
        self.slide == slide && self.audio_playing
    }

    pub fn image_loaded(&mut self, slide: usize) {
        self.for_slide(slide).image = ImageState::Loaded;
    }

    pub fn image_failed(&mut self, slide: usize) {
        self.for_slide(slide).image = ImageState::Failed;
    }

    pub fn set_playing(&mut self, slide: usize, playing: bool) {
        self.for_slide(slide).audio_playing = playing;
    }
}

impl ImageState {
    #[must_use]
    pub fn show_placeholder(self) -> bool {
        self == ImageState::Loading
    }
}
