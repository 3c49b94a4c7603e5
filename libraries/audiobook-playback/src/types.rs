//! Core types for listen sessions

use audiobook_core::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Distance moved by the skip buttons
pub const SKIP_INTERVAL: Duration = Duration::from_secs(10);

/// Where the chapter audio comes from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioSource {
    /// Renditions uploaded by an admin
    #[default]
    Admin,
    /// Audio generated on demand in one of the listener's own voices
    User,
}

impl fmt::Display for AudioSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::User => write!(f, "user"),
        }
    }
}

impl FromStr for AudioSource {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            other => Err(ValidationError::invalid_input(format!(
                "unknown audio source '{other}' (expected admin or user)"
            ))),
        }
    }
}

/// Phase of the current chapter selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListenPhase {
    /// Playing admin renditions
    AdminSource,
    /// User source selected, nothing generated yet
    UserSourceUngenerated,
    /// TTS request in flight
    UserSourceGenerating,
    /// Generated audio loaded
    UserSourceReady,
}

/// Playback speed, restricted to the steps offered by the player
///
/// Stored in hundredths so rates compare exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct PlaybackRate(u16);

impl PlaybackRate {
    /// Rates offered, in hundredths
    const STEPS: [u16; 7] = [50, 75, 100, 125, 150, 175, 200];

    /// Normal speed
    pub const NORMAL: Self = Self(100);

    /// Every selectable rate, slowest first
    pub fn all() -> impl Iterator<Item = Self> {
        Self::STEPS.iter().map(|&s| Self(s))
    }

    /// Validate a rate such as `1.25`
    pub fn new(rate: f32) -> Result<Self, ValidationError> {
        if !rate.is_finite() {
            return Err(ValidationError::UnsupportedRate(rate.to_string()));
        }
        let hundredths = (rate * 100.0).round() as u16;
        if Self::STEPS.contains(&hundredths) {
            Ok(Self(hundredths))
        } else {
            Err(ValidationError::UnsupportedRate(rate.to_string()))
        }
    }

    /// Multiplier handed to the media element
    pub fn as_f32(self) -> f32 {
        f32::from(self.0) / 100.0
    }
}

impl Default for PlaybackRate {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl TryFrom<f32> for PlaybackRate {
    type Error = ValidationError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlaybackRate> for f32 {
    fn from(rate: PlaybackRate) -> Self {
        rate.as_f32()
    }
}

impl FromStr for PlaybackRate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches(['x', 'X']);
        let rate: f32 = trimmed
            .parse()
            .map_err(|_| ValidationError::UnsupportedRate(s.to_string()))?;
        Self::new(rate)
    }
}

impl fmt::Display for PlaybackRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.as_f32())
    }
}

/// Handle for one in-flight TTS request
///
/// Carries everything the caller needs to render the chapter and record the
/// result. The `epoch` ties it to the selection it was issued for; once the
/// chapter, voice or source changes, the session rejects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    /// Selection epoch at issue time
    pub epoch: u64,
    /// Chapter index
    pub chapter_index: usize,
    /// Chapter title
    pub chapter_title: String,
    /// Text to render
    pub chapter_text: String,
    /// Voice sample id
    pub voice_id: i64,
    /// Voice sample name
    pub voice_name: String,
    /// Voice sample URL used for cloning
    pub voice_url: String,
}
