//! Listen events
//!
//! Queued by the session at state changes and drained by the UI layer.

use crate::types::{AudioSource, PlaybackRate};
use serde::Serialize;
use std::time::Duration;

/// Events emitted by a listen session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ListenEvent {
    /// Another chapter was selected
    ChapterChanged {
        /// New chapter index
        index: usize,
        /// Chapter title
        title: String,
    },

    /// Audio source switched
    SourceChanged {
        /// New source
        source: AudioSource,
    },

    /// Another admin rendition was selected
    AdminAudioChanged {
        /// Rendition index within the chapter
        index: usize,
    },

    /// Another personal voice was selected
    VoiceChanged {
        /// Voice sample id
        voice_id: i64,
    },

    /// A TTS request was handed out
    GenerationStarted {
        /// Ticket epoch
        epoch: u64,
    },

    /// Generated audio arrived and was loaded
    AudioGenerated {
        /// Generated audio URL
        url: String,
    },

    /// TTS request failed
    GenerationFailed {
        /// Reason reported by the caller
        reason: String,
    },

    /// A ticket from an earlier selection came back and was dropped
    StaleGenerationDiscarded {
        /// Epoch of the dropped ticket
        epoch: u64,
    },

    /// Playback started
    Playing,

    /// Playback paused
    Paused,

    /// The media element refused to play
    PlayRejected,

    /// Position moved by seek or skip
    Seeked {
        /// New position
        position: Duration,
    },

    /// Volume changed
    VolumeChanged {
        /// New volume level (0.0-1.0)
        level: f32,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Playback rate changed
    RateChanged {
        /// New rate
        rate: PlaybackRate,
    },

    /// The last chapter ended
    Finished,
}
