//! Platform-agnostic media element trait
//!
//! Abstracts whatever actually renders audio (a desktop player, a browser
//! element, nothing at all in tests).

use crate::error::{PlaybackError, Result};
use std::time::Duration;

/// A single audio output that plays one URL at a time
///
/// Implementors load a URL, play and pause it, and report position and
/// duration. `play` may fail (autoplay policy, network, codec); callers treat
/// that as "not playing" rather than as a hard error.
pub trait MediaElement: Send {
    /// Replace the current source. Resets position and stops playback.
    fn load(&mut self, url: &str);

    /// Drop the current source
    fn unload(&mut self);

    /// Currently loaded URL
    fn src(&self) -> Option<&str>;

    /// Start or resume playback
    ///
    /// # Returns
    /// * `Ok(())` - Playback started
    /// * `Err(_)` - The element refused to play
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping the position
    fn pause(&mut self);

    /// Move to `position`
    fn seek(&mut self, position: Duration);

    /// Current playback position
    fn position(&self) -> Duration;

    /// Source duration, once known
    fn duration(&self) -> Option<Duration>;

    /// Output gain (0.0-1.0)
    fn set_gain(&mut self, gain: f32);

    /// Playback speed multiplier
    fn set_rate(&mut self, rate: f32);
}

/// Media element that renders nothing
///
/// Tracks state so sessions can be driven without an audio device. The CLI
/// uses it to print what would play; tests use it to simulate metadata,
/// progress and refused playback.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessMedia {
    src: Option<String>,
    playing: bool,
    position: Duration,
    duration: Option<Duration>,
    gain: f32,
    rate: f32,
    reject_play: bool,
}

impl HeadlessMedia {
    /// Create an empty element
    pub fn new() -> Self {
        Self {
            src: None,
            playing: false,
            position: Duration::ZERO,
            duration: None,
            gain: 1.0,
            rate: 1.0,
            reject_play: false,
        }
    }

    /// Simulate loaded metadata
    pub fn set_duration(&mut self, duration: Option<Duration>) {
        self.duration = duration;
    }

    /// Make subsequent `play` calls fail
    pub fn set_reject_play(&mut self, reject: bool) {
        self.reject_play = reject;
    }

    /// Advance the position while playing
    ///
    /// Returns true when the end of a known duration was reached.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if !self.playing {
            return false;
        }
        self.position += elapsed;
        match self.duration {
            Some(duration) if self.position >= duration => {
                self.position = duration;
                self.playing = false;
                true
            }
            _ => false,
        }
    }

    /// Whether the element is playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Last gain applied
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Last rate applied
    pub fn rate(&self) -> f32 {
        self.rate
    }
}

impl Default for HeadlessMedia {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaElement for HeadlessMedia {
    fn load(&mut self, url: &str) {
        self.src = Some(url.to_string());
        self.playing = false;
        self.position = Duration::ZERO;
        self.duration = None;
    }

    fn unload(&mut self) {
        self.src = None;
        self.playing = false;
        self.position = Duration::ZERO;
        self.duration = None;
    }

    fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    fn play(&mut self) -> Result<()> {
        if self.src.is_none() {
            return Err(PlaybackError::Media("no source loaded".to_string()));
        }
        if self.reject_play {
            return Err(PlaybackError::Media("playback was refused".to_string()));
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, position: Duration) {
        self.position = match self.duration {
            Some(duration) => position.min(duration),
            None => position,
        };
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
    }

    fn set_rate(&mut self, rate: f32) {
        self.rate = rate;
    }
}
