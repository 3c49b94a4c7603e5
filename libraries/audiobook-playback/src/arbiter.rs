//! Exclusive playback for list screens
//!
//! History entries and chapter audio lists each offer a play button per row.
//! Only one row may sound at a time: the arbiter owns the single media
//! element and hands it to whichever row asked last.

use crate::media::MediaElement;
use std::fmt::Debug;
use tracing::debug;

/// Single-owner playback over a list of items keyed by `K`
pub struct PlaybackArbiter<K, M: MediaElement> {
    media: M,
    current: Option<K>,
    playing: bool,
}

impl<K: PartialEq + Clone + Debug, M: MediaElement> PlaybackArbiter<K, M> {
    /// Create an idle arbiter
    pub fn new(media: M) -> Self {
        Self {
            media,
            current: None,
            playing: false,
        }
    }

    /// Play `url` for `key`
    ///
    /// If `key` already holds the element its playback is toggled instead.
    /// Otherwise whatever held it is paused and replaced. Returns whether
    /// `key` is now playing; a refused `play` simply leaves it paused.
    pub fn acquire(&mut self, key: K, url: &str) -> bool {
        if self.current.as_ref() == Some(&key) {
            return self.toggle();
        }

        if self.playing {
            debug!(previous = ?self.current, next = ?key, "Handing over playback");
        }
        self.media.pause();
        self.media.load(url);
        self.current = Some(key);
        self.start()
    }

    /// Pause or resume the current holder. Returns whether it is now playing.
    pub fn toggle(&mut self) -> bool {
        if self.current.is_none() {
            return false;
        }
        if self.playing {
            self.media.pause();
            self.playing = false;
            false
        } else {
            self.start()
        }
    }

    /// Stop and forget the current holder
    pub fn release(&mut self) {
        self.media.pause();
        self.media.unload();
        self.current = None;
        self.playing = false;
    }

    /// Item holding the element, playing or paused
    pub fn current(&self) -> Option<&K> {
        self.current.as_ref()
    }

    /// Whether `key` is the item currently sounding
    pub fn is_playing(&self, key: &K) -> bool {
        self.playing && self.current.as_ref() == Some(key)
    }

    /// Handle natural end of audio
    pub fn on_ended(&mut self) {
        self.playing = false;
    }

    /// The media element
    pub fn media(&self) -> &M {
        &self.media
    }

    /// The media element, for platform callbacks
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    fn start(&mut self) -> bool {
        match self.media.play() {
            Ok(()) => self.playing = true,
            Err(e) => {
                debug!(error = %e, item = ?self.current, "Play rejected");
                self.playing = false;
            }
        }
        self.playing
    }
}
