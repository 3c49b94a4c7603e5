//! Listen session: chapter navigation, audio source selection and
//! on-demand voice generation for one book.
//!
//! The session owns the media element and decides what it may do. Network
//! work (fetching the book, calling the TTS service, writing history) stays
//! with the caller, which exchanges a [`GenerationTicket`] for the generated
//! URL.

use crate::error::{PlaybackError, Result};
use crate::events::ListenEvent;
use crate::media::MediaElement;
use crate::types::{AudioSource, GenerationTicket, ListenPhase, PlaybackRate, SKIP_INTERVAL};
use crate::volume::Volume;
use audiobook_core::{Audio, Chapter, VoiceSample};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Generation {
    Idle,
    InFlight { epoch: u64 },
    Ready { url: String },
}

/// Player state for one book
pub struct ListenSession<M: MediaElement> {
    media: M,
    chapters: Vec<Chapter>,
    current: usize,
    source: AudioSource,
    admin_audio: usize,
    voices: Vec<VoiceSample>,
    voice: Option<i64>,
    generation: Generation,
    epoch: u64,
    playing: bool,
    volume: Volume,
    rate: PlaybackRate,
    events: VecDeque<ListenEvent>,
}

impl<M: MediaElement> ListenSession<M> {
    /// Start at the first chapter with the admin source, paused
    pub fn new(media: M, chapters: Vec<Chapter>) -> Self {
        let mut session = Self {
            media,
            chapters,
            current: 0,
            source: AudioSource::Admin,
            admin_audio: 0,
            voices: Vec::new(),
            voice: None,
            generation: Generation::Idle,
            epoch: 0,
            playing: false,
            volume: Volume::default(),
            rate: PlaybackRate::default(),
            events: VecDeque::new(),
        };
        session.media.set_gain(session.volume.gain());
        session.media.set_rate(session.rate.as_f32());
        session.reload();
        session
    }

    // ===== State =====

    /// All chapters of the book
    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Index of the selected chapter
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Selected chapter, `None` for a book without chapters
    pub fn current_chapter(&self) -> Option<&Chapter> {
        self.chapters.get(self.current)
    }

    /// Selected audio source
    pub fn source(&self) -> AudioSource {
        self.source
    }

    /// Phase of the current selection
    pub fn phase(&self) -> ListenPhase {
        match (self.source, &self.generation) {
            (AudioSource::Admin, _) => ListenPhase::AdminSource,
            (AudioSource::User, Generation::Idle) => ListenPhase::UserSourceUngenerated,
            (AudioSource::User, Generation::InFlight { .. }) => ListenPhase::UserSourceGenerating,
            (AudioSource::User, Generation::Ready { .. }) => ListenPhase::UserSourceReady,
        }
    }

    /// Index of the selected admin rendition
    pub fn admin_audio_index(&self) -> usize {
        self.admin_audio
    }

    /// Selected admin rendition of the current chapter
    pub fn current_admin_audio(&self) -> Option<&Audio> {
        self.current_chapter()?.audios.get(self.admin_audio)
    }

    /// Voices the listener can pick from
    pub fn voices(&self) -> &[VoiceSample] {
        &self.voices
    }

    /// Selected personal voice
    pub fn selected_voice(&self) -> Option<&VoiceSample> {
        let id = self.voice?;
        self.voices.iter().find(|v| v.id == id)
    }

    /// URL generated for the current chapter and voice
    pub fn generated_url(&self) -> Option<&str> {
        match &self.generation {
            Generation::Ready { url } => Some(url),
            _ => None,
        }
    }

    /// URL the media element should be playing
    pub fn source_url(&self) -> Option<&str> {
        match self.source {
            AudioSource::Admin => self
                .current_admin_audio()
                .map(|a| a.url.as_str())
                .filter(|url| !url.is_empty()),
            AudioSource::User => self.generated_url(),
        }
    }

    /// Whether transport controls are disabled
    pub fn controls_locked(&self) -> bool {
        matches!(
            self.phase(),
            ListenPhase::UserSourceGenerating | ListenPhase::UserSourceUngenerated
        )
    }

    /// Whether audio is playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Listener volume
    pub fn volume(&self) -> Volume {
        self.volume
    }

    /// Playback rate
    pub fn rate(&self) -> PlaybackRate {
        self.rate
    }

    /// Current position
    pub fn position(&self) -> Duration {
        self.media.position()
    }

    /// Duration of the loaded audio, zero until known
    pub fn duration(&self) -> Duration {
        self.media.duration().unwrap_or(Duration::ZERO)
    }

    /// Whether a following chapter exists
    pub fn has_next(&self) -> bool {
        self.current + 1 < self.chapters.len()
    }

    /// Whether a preceding chapter exists
    pub fn has_previous(&self) -> bool {
        self.current > 0
    }

    /// Selection epoch; bumps whenever chapter, source or voice changes
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The media element
    pub fn media(&self) -> &M {
        &self.media
    }

    /// The media element, for platform callbacks
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<ListenEvent> {
        self.events.drain(..).collect()
    }

    // ===== Selection =====

    /// Replace the listener's voices
    ///
    /// If the selected voice is gone, the selection is cleared and any
    /// generated audio is discarded.
    pub fn set_voices(&mut self, voices: Vec<VoiceSample>) {
        self.voices = voices;
        if let Some(id) = self.voice {
            if !self.voices.iter().any(|v| v.id == id) {
                debug!(voice_id = id, "Selected voice no longer available");
                self.voice = None;
                if self.source == AudioSource::User {
                    self.pause_media();
                    self.reset_selection();
                } else {
                    // Narrated audio keeps playing; only the generated rendition goes
                    self.epoch += 1;
                    self.generation = Generation::Idle;
                }
            }
        }
    }

    /// Select a chapter from the list and start playing it
    ///
    /// Playing only succeeds if the chapter has a playable source.
    pub fn select_chapter(&mut self, index: usize) -> Result<()> {
        if index >= self.chapters.len() {
            return Err(PlaybackError::NoChapter(index));
        }
        if index != self.current {
            self.move_to_chapter(index);
        }
        self.try_play();
        Ok(())
    }

    /// Switch between admin and personal audio. Pauses.
    pub fn set_source(&mut self, source: AudioSource) {
        if source == self.source {
            return;
        }
        self.source = source;
        self.pause_media();
        self.reset_selection();
        self.events.push_back(ListenEvent::SourceChanged { source });
    }

    /// Pick an admin rendition of the current chapter. Pauses.
    pub fn select_admin_audio(&mut self, index: usize) -> Result<()> {
        let available = self.current_chapter().map_or(0, |c| c.audios.len());
        if index >= available {
            return Err(PlaybackError::NoAudio(index));
        }
        self.admin_audio = index;
        self.pause_media();
        self.reload();
        self.events.push_back(ListenEvent::AdminAudioChanged { index });
        Ok(())
    }

    /// Pick a personal voice. Pauses and discards generated audio.
    pub fn select_voice(&mut self, voice_id: i64) -> Result<()> {
        if !self.voices.iter().any(|v| v.id == voice_id) {
            return Err(PlaybackError::UnknownVoice(voice_id));
        }
        if self.voice == Some(voice_id) {
            return Ok(());
        }
        self.voice = Some(voice_id);
        self.pause_media();
        self.reset_selection();
        self.events.push_back(ListenEvent::VoiceChanged { voice_id });
        Ok(())
    }

    // ===== Generation =====

    /// Hand out a ticket for rendering the current chapter in the selected voice
    pub fn begin_generation(&mut self) -> Result<GenerationTicket> {
        if self.source != AudioSource::User {
            return Err(PlaybackError::InvalidOperation(
                "voice generation needs the user audio source".to_string(),
            ));
        }
        match self.generation {
            Generation::InFlight { .. } => {
                return Err(PlaybackError::InvalidOperation(
                    "generation already in progress".to_string(),
                ))
            }
            Generation::Ready { .. } => {
                return Err(PlaybackError::InvalidOperation(
                    "audio already generated for this chapter and voice".to_string(),
                ))
            }
            Generation::Idle => {}
        }

        let chapter = self
            .current_chapter()
            .ok_or(PlaybackError::NoChapter(self.current))?;
        if !chapter.has_text() {
            return Err(PlaybackError::NoChapterText);
        }
        let voice = self.selected_voice().ok_or(PlaybackError::NoVoiceSelected)?;

        let ticket = GenerationTicket {
            epoch: self.epoch,
            chapter_index: self.current,
            chapter_title: chapter.title.clone(),
            chapter_text: chapter.text.clone(),
            voice_id: voice.id,
            voice_name: voice.name.clone(),
            voice_url: voice.url.clone(),
        };

        self.generation = Generation::InFlight { epoch: self.epoch };
        self.events
            .push_back(ListenEvent::GenerationStarted { epoch: self.epoch });
        debug!(epoch = self.epoch, chapter = %ticket.chapter_title, voice = %ticket.voice_name, "Generation started");
        Ok(ticket)
    }

    /// Accept generated audio for `ticket`, load it and start playing
    ///
    /// Returns false if the ticket is stale and was discarded.
    pub fn complete_generation(&mut self, ticket: &GenerationTicket, url: &str) -> bool {
        if !self.is_pending(ticket) {
            self.discard(ticket);
            return false;
        }

        self.generation = Generation::Ready {
            url: url.to_string(),
        };
        self.reload();
        self.events.push_back(ListenEvent::AudioGenerated {
            url: url.to_string(),
        });
        info!(epoch = ticket.epoch, url = %url, "Generated audio ready");

        self.try_play();
        true
    }

    /// Record a failed render for `ticket`
    ///
    /// Returns false if the ticket is stale and was discarded.
    pub fn fail_generation(&mut self, ticket: &GenerationTicket, reason: impl Into<String>) -> bool {
        if !self.is_pending(ticket) {
            self.discard(ticket);
            return false;
        }

        self.generation = Generation::Idle;
        let reason = reason.into();
        debug!(epoch = ticket.epoch, reason = %reason, "Generation failed");
        self.events.push_back(ListenEvent::GenerationFailed { reason });
        true
    }

    fn is_pending(&self, ticket: &GenerationTicket) -> bool {
        self.generation == Generation::InFlight { epoch: ticket.epoch }
    }

    fn discard(&mut self, ticket: &GenerationTicket) {
        debug!(
            ticket_epoch = ticket.epoch,
            current_epoch = self.epoch,
            "Discarding stale generation result"
        );
        self.events.push_back(ListenEvent::StaleGenerationDiscarded {
            epoch: ticket.epoch,
        });
    }

    // ===== Transport =====

    /// Start or resume playback
    pub fn play(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        self.try_play();
        Ok(())
    }

    /// Pause playback
    pub fn pause(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        if self.playing {
            self.pause_media();
            self.events.push_back(ListenEvent::Paused);
        }
        Ok(())
    }

    /// Toggle between playing and paused
    pub fn toggle_play(&mut self) -> Result<()> {
        if self.playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Seek to `position`, clamped to the audio duration
    pub fn seek(&mut self, position: Duration) -> Result<Duration> {
        self.ensure_unlocked()?;
        let target = match self.media.duration() {
            Some(duration) => position.min(duration),
            None => position,
        };
        self.media.seek(target);
        self.events.push_back(ListenEvent::Seeked { position: target });
        Ok(target)
    }

    /// Jump ahead by [`SKIP_INTERVAL`], stopping at the end
    pub fn skip_forward(&mut self) -> Result<Duration> {
        self.ensure_unlocked()?;
        self.seek(self.position() + SKIP_INTERVAL)
    }

    /// Jump back by [`SKIP_INTERVAL`], stopping at zero
    pub fn skip_backward(&mut self) -> Result<Duration> {
        self.ensure_unlocked()?;
        let target = self.position().saturating_sub(SKIP_INTERVAL);
        self.seek(target)
    }

    /// Set volume (0.0-1.0); a level above zero unmutes
    pub fn set_volume(&mut self, level: f32) -> Result<()> {
        self.ensure_unlocked()?;
        self.volume.set_level(level);
        self.apply_volume();
        Ok(())
    }

    /// Toggle mute
    pub fn toggle_mute(&mut self) -> Result<()> {
        self.ensure_unlocked()?;
        self.volume.toggle_mute();
        self.apply_volume();
        Ok(())
    }

    /// Set playback rate
    pub fn set_rate(&mut self, rate: PlaybackRate) -> Result<()> {
        self.ensure_unlocked()?;
        self.rate = rate;
        self.media.set_rate(rate.as_f32());
        self.events.push_back(ListenEvent::RateChanged { rate });
        Ok(())
    }

    /// Go to the next chapter, resuming if playing
    ///
    /// Returns false at the last chapter.
    pub fn next_chapter(&mut self) -> Result<bool> {
        self.ensure_unlocked()?;
        if !self.has_next() {
            return Ok(false);
        }
        let resume = self.playing;
        self.move_to_chapter(self.current + 1);
        if resume {
            self.try_play();
        }
        Ok(true)
    }

    /// Go to the previous chapter, resuming if playing
    ///
    /// Returns false at the first chapter.
    pub fn previous_chapter(&mut self) -> Result<bool> {
        self.ensure_unlocked()?;
        if !self.has_previous() {
            return Ok(false);
        }
        let resume = self.playing;
        self.move_to_chapter(self.current - 1);
        if resume {
            self.try_play();
        }
        Ok(true)
    }

    /// Handle natural end of audio: advance and keep playing, or stop
    pub fn on_ended(&mut self) {
        if self.has_next() {
            self.move_to_chapter(self.current + 1);
            self.try_play();
        } else {
            self.pause_media();
            self.events.push_back(ListenEvent::Finished);
            debug!("Reached end of book");
        }
    }

    // ===== Internals =====

    fn ensure_unlocked(&self) -> Result<()> {
        if self.controls_locked() {
            Err(PlaybackError::ControlsLocked)
        } else {
            Ok(())
        }
    }

    fn move_to_chapter(&mut self, index: usize) {
        self.current = index;
        self.admin_audio = 0;
        self.pause_media();
        self.reset_selection();

        let title = self
            .current_chapter()
            .map(|c| c.title.clone())
            .unwrap_or_default();
        self.events
            .push_back(ListenEvent::ChapterChanged { index, title });
    }

    /// New selection: generated audio for the old one is dropped and any
    /// in-flight ticket becomes stale.
    fn reset_selection(&mut self) {
        self.epoch += 1;
        self.generation = Generation::Idle;
        self.reload();
    }

    fn reload(&mut self) {
        match self.source_url().map(str::to_string) {
            Some(url) => self.media.load(&url),
            None => self.media.unload(),
        }
    }

    fn pause_media(&mut self) {
        self.media.pause();
        self.playing = false;
    }

    fn try_play(&mut self) {
        if self.playing {
            return;
        }
        if self.source_url().is_none() {
            return;
        }
        match self.media.play() {
            Ok(()) => {
                self.playing = true;
                self.events.push_back(ListenEvent::Playing);
            }
            Err(e) => {
                debug!(error = %e, "Play rejected");
                self.pause_media();
                self.events.push_back(ListenEvent::PlayRejected);
            }
        }
    }

    fn apply_volume(&mut self) {
        self.media.set_gain(self.volume.gain());
        self.events.push_back(ListenEvent::VolumeChanged {
            level: self.volume.level(),
            is_muted: self.volume.is_muted(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::HeadlessMedia;

    fn chapter(id: i64, text: &str, audio: Option<&str>) -> Chapter {
        Chapter {
            id,
            title: format!("Chương {id}"),
            text: text.to_string(),
            audios: audio
                .map(|url| {
                    vec![Audio {
                        id: id * 10,
                        name: "Giọng nam".to_string(),
                        url: url.to_string(),
                    }]
                })
                .unwrap_or_default(),
        }
    }

    fn voice(id: i64) -> VoiceSample {
        VoiceSample {
            id,
            name: format!("Giọng {id}"),
            url: format!("http://media/voice-{id}.wav"),
            username: "an".to_string(),
        }
    }

    fn session() -> ListenSession<HeadlessMedia> {
        let mut s = ListenSession::new(
            HeadlessMedia::new(),
            vec![
                chapter(1, "Một", Some("http://media/c1.mp3")),
                chapter(2, "Hai", Some("http://media/c2.mp3")),
                chapter(3, "", None),
            ],
        );
        s.set_voices(vec![voice(1), voice(2)]);
        s
    }

    #[test]
    fn starts_on_admin_source_paused() {
        let s = session();
        assert_eq!(s.phase(), ListenPhase::AdminSource);
        assert!(!s.is_playing());
        assert_eq!(s.media().src(), Some("http://media/c1.mp3"));
        assert!(!s.controls_locked());
    }

    #[test]
    fn selecting_chapter_plays() {
        let mut s = session();
        s.select_chapter(1).unwrap();
        assert!(s.is_playing());
        assert_eq!(s.media().src(), Some("http://media/c2.mp3"));
    }

    #[test]
    fn selecting_chapter_without_audio_stays_paused() {
        let mut s = session();
        s.select_chapter(2).unwrap();
        assert!(!s.is_playing());
        assert_eq!(s.media().src(), None);
    }

    #[test]
    fn select_chapter_out_of_range() {
        let mut s = session();
        assert!(matches!(s.select_chapter(9), Err(PlaybackError::NoChapter(9))));
    }

    #[test]
    fn user_source_locks_until_generated() {
        let mut s = session();
        s.select_chapter(0).unwrap();
        s.set_source(AudioSource::User);

        assert!(!s.is_playing());
        assert!(s.controls_locked());
        assert!(matches!(s.play(), Err(PlaybackError::ControlsLocked)));
        assert!(matches!(s.next_chapter(), Err(PlaybackError::ControlsLocked)));
        assert!(matches!(
            s.set_volume(0.5),
            Err(PlaybackError::ControlsLocked)
        ));
    }

    #[test]
    fn generation_flow() {
        let mut s = session();
        s.set_source(AudioSource::User);

        assert!(matches!(
            s.begin_generation(),
            Err(PlaybackError::NoVoiceSelected)
        ));

        s.select_voice(2).unwrap();
        let ticket = s.begin_generation().unwrap();
        assert_eq!(ticket.chapter_text, "Một");
        assert_eq!(ticket.voice_url, "http://media/voice-2.wav");
        assert_eq!(s.phase(), ListenPhase::UserSourceGenerating);
        assert!(s.controls_locked());

        assert!(s.complete_generation(&ticket, "http://ai/c1-v2.wav"));
        assert_eq!(s.phase(), ListenPhase::UserSourceReady);
        assert!(s.is_playing());
        assert!(!s.controls_locked());
        assert_eq!(s.media().src(), Some("http://ai/c1-v2.wav"));
    }

    #[test]
    fn generation_requires_text() {
        let mut s = session();
        s.select_chapter(2).unwrap();
        s.set_source(AudioSource::User);
        s.select_voice(1).unwrap();
        assert!(matches!(
            s.begin_generation(),
            Err(PlaybackError::NoChapterText)
        ));
    }

    #[test]
    fn generation_only_once_per_selection() {
        let mut s = session();
        s.set_source(AudioSource::User);
        s.select_voice(1).unwrap();
        let ticket = s.begin_generation().unwrap();
        assert!(matches!(
            s.begin_generation(),
            Err(PlaybackError::InvalidOperation(_))
        ));
        s.complete_generation(&ticket, "http://ai/a.wav");
        assert!(matches!(
            s.begin_generation(),
            Err(PlaybackError::InvalidOperation(_))
        ));
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut s = session();
        s.set_source(AudioSource::User);
        s.select_voice(1).unwrap();
        let ticket = s.begin_generation().unwrap();

        // Voice changes while the request is in flight
        s.select_voice(2).unwrap();
        assert!(!s.complete_generation(&ticket, "http://ai/old.wav"));
        assert_eq!(s.phase(), ListenPhase::UserSourceUngenerated);
        assert_eq!(s.generated_url(), None);
        assert!(s
            .drain_events()
            .contains(&ListenEvent::StaleGenerationDiscarded { epoch: ticket.epoch }));
    }

    #[test]
    fn failed_generation_returns_to_ungenerated() {
        let mut s = session();
        s.set_source(AudioSource::User);
        s.select_voice(1).unwrap();
        let ticket = s.begin_generation().unwrap();

        assert!(s.fail_generation(&ticket, "service unavailable"));
        assert_eq!(s.phase(), ListenPhase::UserSourceUngenerated);
        assert!(s.drain_events().contains(&ListenEvent::GenerationFailed {
            reason: "service unavailable".to_string()
        }));

        // A fresh ticket can be requested
        assert!(s.begin_generation().is_ok());
    }

    #[test]
    fn switching_clears_generated_url() {
        let mut s = session();
        s.set_source(AudioSource::User);
        s.select_voice(1).unwrap();
        let ticket = s.begin_generation().unwrap();
        s.complete_generation(&ticket, "http://ai/a.wav");

        s.set_source(AudioSource::Admin);
        s.set_source(AudioSource::User);
        assert_eq!(s.generated_url(), None);
        assert!(s.controls_locked());
        assert!(!s.is_playing());
    }

    #[test]
    fn removed_voice_clears_selection() {
        let mut s = session();
        s.set_source(AudioSource::User);
        s.select_voice(1).unwrap();
        let ticket = s.begin_generation().unwrap();
        s.complete_generation(&ticket, "http://ai/a.wav");

        s.set_voices(vec![voice(2)]);
        assert!(s.selected_voice().is_none());
        assert_eq!(s.generated_url(), None);
        assert!(s.voices().iter().all(|v| v.id != 1));
        assert!(matches!(s.select_voice(1), Err(PlaybackError::UnknownVoice(1))));
    }

    #[test]
    fn removed_voice_keeps_narrated_audio_playing() {
        let mut s = session();
        s.select_voice(1).unwrap();
        s.play().unwrap();
        s.media_mut().advance(Duration::from_secs(12));
        let epoch = s.epoch();

        s.set_voices(vec![voice(2)]);
        assert!(s.selected_voice().is_none());
        assert!(s.is_playing());
        assert_eq!(s.media().src(), Some("http://media/c1.mp3"));
        assert_eq!(s.position(), Duration::from_secs(12));
        assert!(s.epoch() > epoch);
    }

    #[test]
    fn play_rejection_reverts_flag() {
        let mut s = session();
        s.media_mut().set_reject_play(true);
        s.play().unwrap();
        assert!(!s.is_playing());
        assert!(s.drain_events().contains(&ListenEvent::PlayRejected));
    }

    #[test]
    fn skip_clamps_to_bounds() {
        let mut s = session();
        s.media_mut().set_duration(Some(Duration::from_secs(25)));
        s.play().unwrap();

        assert_eq!(s.skip_backward().unwrap(), Duration::ZERO);
        assert_eq!(s.skip_forward().unwrap(), Duration::from_secs(10));
        assert_eq!(s.skip_forward().unwrap(), Duration::from_secs(20));
        assert_eq!(s.skip_forward().unwrap(), Duration::from_secs(25));
        assert_eq!(s.seek(Duration::from_secs(90)).unwrap(), Duration::from_secs(25));
    }

    #[test]
    fn skip_forward_without_known_duration() {
        let mut s = session();
        s.play().unwrap();
        s.media_mut().advance(Duration::from_secs(30));

        assert_eq!(s.skip_forward().unwrap(), Duration::from_secs(40));
        assert_eq!(s.position(), Duration::from_secs(40));
        assert_eq!(s.skip_backward().unwrap(), Duration::from_secs(30));
    }

    #[test]
    fn volume_and_rate_reach_media() {
        let mut s = session();
        s.set_volume(0.4).unwrap();
        assert_eq!(s.media().gain(), 0.4);

        s.toggle_mute().unwrap();
        assert_eq!(s.media().gain(), 0.0);
        assert_eq!(s.volume().level(), 0.4);

        s.set_volume(0.7).unwrap();
        assert!(!s.volume().is_muted());

        s.set_rate(PlaybackRate::new(1.5).unwrap()).unwrap();
        assert_eq!(s.media().rate(), 1.5);
    }

    #[test]
    fn ended_advances_and_plays() {
        let mut s = session();
        s.play().unwrap();
        s.on_ended();
        assert_eq!(s.current_index(), 1);
        assert!(s.is_playing());
    }

    #[test]
    fn ended_on_last_chapter_stops() {
        let mut s = ListenSession::new(
            HeadlessMedia::new(),
            vec![chapter(1, "Một", Some("http://media/c1.mp3"))],
        );
        s.play().unwrap();
        s.on_ended();
        assert_eq!(s.current_index(), 0);
        assert!(!s.is_playing());
        assert!(s.drain_events().contains(&ListenEvent::Finished));
    }

    #[test]
    fn admin_audio_selection_pauses() {
        let mut s = session();
        s.play().unwrap();
        s.select_admin_audio(0).unwrap();
        assert!(!s.is_playing());
        assert!(matches!(s.select_admin_audio(3), Err(PlaybackError::NoAudio(3))));
    }

    #[test]
    fn previous_at_first_chapter_is_noop() {
        let mut s = session();
        assert!(!s.previous_chapter().unwrap());
        assert!(s.next_chapter().unwrap());
        assert!(s.previous_chapter().unwrap());
        assert_eq!(s.current_index(), 0);
    }
}
