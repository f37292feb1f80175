//! Spinner animation for loading enrichment badges.

use serde::{Deserialize, Serialize};

/// Braille spinner animation frames.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Alternative spinner using simple characters for compatibility.
const SIMPLE_SPINNER_FRAMES: &[&str] = &["|", "/", "-", "\\"];

/// Dots spinner animation.
const DOTS_SPINNER_FRAMES: &[&str] = &["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"];

/// The type of spinner to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpinnerStyle {
    /// Braille dots spinner (default).
    #[default]
    Braille,
    /// Simple ASCII spinner for compatibility.
    Simple,
    /// Dots spinner.
    Dots,
}

impl SpinnerStyle {
    /// Get the frames for this spinner style.
    pub fn frames(&self) -> &'static [&'static str] {
        match self {
            SpinnerStyle::Braille => SPINNER_FRAMES,
            SpinnerStyle::Simple => SIMPLE_SPINNER_FRAMES,
            SpinnerStyle::Dots => DOTS_SPINNER_FRAMES,
        }
    }
}

/// A free-running spinner shared by every loading badge.
#[derive(Debug, Clone, Default)]
pub struct Spinner {
    state: usize,
    style: SpinnerStyle,
}

impl Spinner {
    /// Create a spinner with the given style.
    pub fn new(style: SpinnerStyle) -> Self {
        Self { state: 0, style }
    }

    /// Advance the animation. Called on each tick.
    pub fn tick(&mut self) {
        self.state = (self.state + 1) % self.style.frames().len();
    }

    /// Get the current frame.
    pub fn frame(&self) -> &'static str {
        self.style.frames()[self.state]
    }
}
