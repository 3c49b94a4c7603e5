//! Volume control
//!
//! Linear level in `0.0..=1.0` with a mute flag that preserves the level.

/// Listener volume
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Volume {
    /// Level (0.0-1.0)
    level: f32,

    /// Mute state (preserves volume level)
    muted: bool,
}

impl Volume {
    /// Create a volume at `level`, clamped to `0.0..=1.0`
    pub fn new(level: f32) -> Self {
        Self {
            level: Self::clamp(level),
            muted: false,
        }
    }

    /// Set the level. Any level above zero also unmutes.
    pub fn set_level(&mut self, level: f32) {
        self.level = Self::clamp(level);
        if self.level > 0.0 {
            self.muted = false;
        }
    }

    /// Current level (0.0-1.0)
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Toggle mute state
    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }

    /// Check if muted
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Gain for the media element: 0.0 if muted, otherwise the level
    pub fn gain(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.level
        }
    }

    fn clamp(level: f32) -> f32 {
        if level.is_nan() {
            0.0
        } else {
            level.clamp(0.0, 1.0)
        }
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self::new(1.0)
    }
}
