//! Slide-by-slide navigation over a session's ordered slides.
//!
//! The walker only tracks the current index. Media state for the slide being
//! shown (image loaded, audio playing) belongs to the rendering layer.

use crate::error::WalkerError;

/// Result of pressing "next".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkStep {
    Moved(usize),
    /// Already on the last slide; the index is unchanged.
    Completed,
}

/// How a slide relates to the current position, for progress dots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideMark {
    Seen,
    Current,
    Upcoming,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresentationWalker {
    current: usize,
    len: usize,
}

impl PresentationWalker {
    /// # Errors
    ///
    /// Returns `WalkerError::Empty` for a presentation without slides.
    pub fn new(slide_count: usize) -> Result<Self, WalkerError> {
        if slide_count == 0 {
            return Err(WalkerError::Empty);
        }
        Ok(Self {
            current: 0,
            len: slide_count,
        })
    }

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 == self.len
    }

    pub fn next(&mut self) -> WalkStep {
        if self.is_last() {
            return WalkStep::Completed;
        }
        self.current += 1;
        WalkStep::Moved(self.current)
    }

    /// Step back one slide. Returns false on the first slide.
    pub fn previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Jump directly to a slide.
    ///
    /// # Errors
    ///
    /// Returns `WalkerError::OutOfRange` if `index >= len`; the position is unchanged.
    pub fn select(&mut self, index: usize) -> Result<(), WalkerError> {
        if index >= self.len {
            return Err(WalkerError::OutOfRange {
                index,
                len: self.len,
            });
        }
        self.current = index;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }

    #[must_use]
    pub fn mark(&self, index: usize) -> SlideMark {
        match index.cmp(&self.current) {
            std::cmp::Ordering::Less => SlideMark::Seen,
            std::cmp::Ordering::Equal => SlideMark::Current,
            std::cmp::Ordering::Greater => SlideMark::Upcoming,
        }
    }
}
