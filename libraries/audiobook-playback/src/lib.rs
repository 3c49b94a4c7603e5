//! Audiobook Playback
//!
//! Platform-agnostic listening logic for the audiobook client.
//!
//! This crate provides:
//! - Listen sessions: chapter navigation, admin/personal audio sources and
//!   the voice generation state machine
//! - Transport controls (play/pause, seek, skip ±10 s, volume, mute, rate)
//!   locked while no playable audio exists
//! - Stale-result protection for in-flight generation via ticket epochs
//! - Exclusive playback for list screens
//!
//! # Architecture
//!
//! No networking and no audio device: the caller performs TTS requests and
//! history writes, and supplies a [`MediaElement`] that actually renders
//! audio. [`HeadlessMedia`] tracks state without output.
//!
//! # Example
//!
//! ```rust
//! use audiobook_core::{Chapter, VoiceSample};
//! use audiobook_playback::{AudioSource, HeadlessMedia, ListenPhase, ListenSession};
//!
//! let chapters = vec![Chapter {
//!     id: 1,
//!     title: "Chương 1".to_string(),
//!     text: "Ngày xửa ngày xưa".to_string(),
//!     audios: Vec::new(),
//! }];
//! let mut session = ListenSession::new(HeadlessMedia::new(), chapters);
//! session.set_voices(vec![VoiceSample {
//!     id: 7,
//!     name: "Giọng của tôi".to_string(),
//!     url: "http://media/voice.wav".to_string(),
//!     username: "an".to_string(),
//! }]);
//!
//! session.set_source(AudioSource::User);
//! session.select_voice(7).unwrap();
//! let ticket = session.begin_generation().unwrap();
//!
//! // ... render ticket.chapter_text with ticket.voice_url ...
//! session.complete_generation(&ticket, "http://ai/out.wav");
//! assert_eq!(session.phase(), ListenPhase::UserSourceReady);
//! assert!(session.is_playing());
//! ```

mod arbiter;
mod error;
mod events;
mod listen;
mod media;
pub mod types;
mod volume;

// Public exports
pub use arbiter::PlaybackArbiter;
pub use error::{PlaybackError, Result};
pub use events::ListenEvent;
pub use listen::ListenSession;
pub use media::{HeadlessMedia, MediaElement};
pub use types::{AudioSource, GenerationTicket, ListenPhase, PlaybackRate, SKIP_INTERVAL};
pub use volume::Volume;
