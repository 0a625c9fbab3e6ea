//! Full-screen detail viewer with wrap-around navigation.

use std::sync::Arc;

use super::page::{PageHost, ScrollLock};
use crate::models::ArchiveEntry;

/// Minimum horizontal drag, in pixels, that counts as a swipe.
pub const SWIPE_THRESHOLD_PX: f32 = 10.0;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ViewerError {
    #[error("cannot open the viewer on an empty archive")]
    EmptyArchive,
    #[error("index {index} is out of range for {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

impl Direction {
    pub fn step(&self) -> isize {
        match self {
            Direction::Backward => -1,
            Direction::Forward => 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other(String),
}

/// User input the viewer reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerInput {
    Key(Key),
    /// Completed drag gesture, in pixels. Negative `dx` is a left swipe.
    Swipe { dx: f32, dy: f32 },
    Previous,
    Next,
    ToggleExpanded,
    Close,
    BackdropClick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerOutcome {
    Open,
    Closed,
}

/// Classify a drag as a horizontal swipe.
///
/// Left swipes move forward, right swipes move backward. Mostly vertical drags
/// and drags shorter than [`SWIPE_THRESHOLD_PX`] are not swipes.
pub fn swipe_direction(dx: f32, dy: f32) -> Option<Direction> {
    if dx.abs() < SWIPE_THRESHOLD_PX || dx.abs() < dy.abs() {
        return None;
    }
    if dx < 0.0 {
        Some(Direction::Forward)
    } else {
        Some(Direction::Backward)
    }
}

/// Index reached by moving `step` positions from `index` in a list of `len`,
/// wrapping past either end.
pub fn wrap_index(index: usize, step: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let next = index as isize + step;
    if next < 0 {
        len - 1
    } else if next as usize >= len {
        0
    } else {
        next as usize
    }
}

pub struct DetailViewer {
    entries: Arc<[ArchiveEntry]>,
    active_index: usize,
    expanded: bool,
    scroll_lock: Option<ScrollLock>,
}

impl DetailViewer {
    /// Open the viewer on `index`, suspending page scroll until it closes.
    pub fn open(
        entries: Arc<[ArchiveEntry]>,
        index: usize,
        page: Arc<dyn PageHost>,
    ) -> Result<Self, ViewerError> {
        if entries.is_empty() {
            return Err(ViewerError::EmptyArchive);
        }
        if index >= entries.len() {
            return Err(ViewerError::IndexOutOfRange {
                index,
                len: entries.len(),
            });
        }

        Ok(Self {
            entries,
            active_index: index,
            expanded: false,
            scroll_lock: Some(ScrollLock::acquire(page)),
        })
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_open(&self) -> bool {
        self.scroll_lock.is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current(&self) -> &ArchiveEntry {
        &self.entries[self.active_index]
    }

    /// Move one entry in `direction`, wrapping at both ends.
    pub fn advance(&mut self, direction: Direction) {
        let next = wrap_index(self.active_index, direction.step(), self.entries.len());
        self.set_active_index(next);
    }

    fn set_active_index(&mut self, index: usize) {
        if index != self.active_index {
            self.active_index = index;
            self.expanded = false;
        }
    }

    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
    }

    /// Fraction of the list viewed so far, in `(0, 1]`.
    pub fn progress(&self) -> f64 {
        (self.active_index + 1) as f64 / self.entries.len() as f64
    }

    /// Position counter such as `007 / 120`.
    pub fn counter_label(&self) -> String {
        format!("{:03} / {:03}", self.active_index + 1, self.entries.len())
    }

    /// Close the viewer and restore page scrolling.
    pub fn close(&mut self) {
        self.scroll_lock = None;
    }

    /// Apply one input. Inputs after close are ignored.
    pub fn handle(&mut self, input: ViewerInput) -> ViewerOutcome {
        if !self.is_open() {
            return ViewerOutcome::Closed;
        }

        match input {
            ViewerInput::Key(Key::ArrowLeft) | ViewerInput::Previous => {
                self.advance(Direction::Backward)
            }
            ViewerInput::Key(Key::ArrowRight) | ViewerInput::Next => {
                self.advance(Direction::Forward)
            }
            ViewerInput::Swipe { dx, dy } => {
                if let Some(direction) = swipe_direction(dx, dy) {
                    self.advance(direction);
                }
            }
            ViewerInput::ToggleExpanded => self.toggle_expanded(),
            ViewerInput::Key(Key::Escape) | ViewerInput::Close | ViewerInput::BackdropClick => {
                self.close();
                return ViewerOutcome::Closed;
            }
            ViewerInput::Key(Key::Other(_)) => {}
        }
        ViewerOutcome::Open
    }
}
