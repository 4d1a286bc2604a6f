/// Room anthem state machine
///
/// `idle -> loading -> ready | error`; `ready` and `error` may go back to
/// `loading` to regenerate. Lyrics and audio arrive together as one
/// `Anthem`, so there is no state with one but not the other.

use crate::audio::AudioClip;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SongPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

/// A finished generation: lyrics plus decoded audio
#[derive(Debug, Clone, PartialEq)]
pub struct Anthem {
    pub lyrics: String,
    pub clip: AudioClip,
}

/// What the player should do after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Play,
    Pause,
}

#[derive(Debug, Default)]
pub struct VibeSong {
    phase: SongPhase,
    lyrics: Option<String>,
    playing: bool,
    generation: u64,
}

impl VibeSong {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SongPhase {
        self.phase
    }

    pub fn lyrics(&self) -> Option<&str> {
        self.lyrics.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Start a generation; returns its id, or `None` if one is in flight
    pub fn request(&mut self) -> Option<u64> {
        if self.phase == SongPhase::Loading {
            return None;
        }
        self.generation += 1;
        self.phase = SongPhase::Loading;
        self.lyrics = None;
        self.playing = false;
        Some(self.generation)
    }

    /// Apply a generation's outcome; returns the clip to load on success
    ///
    /// Outcomes of superseded generations are dropped.
    pub fn finish<E: std::fmt::Display>(
        &mut self,
        generation: u64,
        outcome: Result<Anthem, E>,
    ) -> Option<AudioClip> {
        if generation != self.generation || self.phase != SongPhase::Loading {
            log::debug!("Dropping stale anthem #{}", generation);
            return None;
        }

        match outcome {
            Ok(anthem) => {
                self.lyrics = Some(anthem.lyrics);
                self.phase = SongPhase::Ready;
                Some(anthem.clip)
            }
            Err(e) => {
                log::error!("❌ Room anthem failed: {}", e);
                self.phase = SongPhase::Error;
                None
            }
        }
    }

    /// Play/pause; only meaningful once an anthem is ready
    pub fn toggle(&mut self) -> Option<Playback> {
        if self.phase != SongPhase::Ready {
            return None;
        }
        self.playing = !self.playing;
        Some(if self.playing {
            Playback::Play
        } else {
            Playback::Pause
        })
    }

    /// Playback ran to the end (or could not start)
    pub fn playback_ended(&mut self) {
        self.playing = false;
    }

    /// Back to idle for a new result; in-flight generations become stale
    pub fn reset(&mut self) {
        self.generation += 1;
        self.phase = SongPhase::Idle;
        self.lyrics = None;
        self.playing = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::clip::tests::wav_bytes;
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

    fn anthem() -> Anthem {
        let encoded = BASE64.encode(wav_bytes(400));
        Anthem {
            lyrics: "Sage green walls and a velvet chair".to_string(),
            clip: AudioClip::from_base64(&encoded, "wav").unwrap(),
        }
    }

    #[test]
    fn test_generate_then_ready() {
        let mut song = VibeSong::new();
        let id = song.request().unwrap();
        assert_eq!(song.phase(), SongPhase::Loading);

        let clip = song.finish::<String>(id, Ok(anthem()));
        assert!(clip.is_some());
        assert_eq!(song.phase(), SongPhase::Ready);
        assert_eq!(song.lyrics(), Some("Sage green walls and a velvet chair"));
        assert!(!song.is_playing());
    }

    #[test]
    fn test_failure_leaves_no_partial_state() {
        let mut song = VibeSong::new();
        let id = song.request().unwrap();
        assert!(song.finish(id, Err("504 timeout")).is_none());

        assert_eq!(song.phase(), SongPhase::Error);
        assert!(song.lyrics().is_none());
        assert_eq!(song.toggle(), None);
    }

    #[test]
    fn test_no_second_request_while_loading() {
        let mut song = VibeSong::new();
        assert!(song.request().is_some());
        assert!(song.request().is_none());
    }

    #[test]
    fn test_regenerate_from_ready_and_error() {
        let mut song = VibeSong::new();
        let first = song.request().unwrap();
        song.finish::<String>(first, Ok(anthem()));
        song.toggle();

        let second = song.request().unwrap();
        assert_ne!(first, second);
        assert!(song.lyrics().is_none());
        assert!(!song.is_playing());

        song.finish(second, Err("boom"));
        assert!(song.request().is_some());
    }

    #[test]
    fn test_toggle_tracks_playback_and_natural_end() {
        let mut song = VibeSong::new();
        assert_eq!(song.toggle(), None);

        let id = song.request().unwrap();
        song.finish::<String>(id, Ok(anthem()));

        assert_eq!(song.toggle(), Some(Playback::Play));
        assert!(song.is_playing());
        assert_eq!(song.toggle(), Some(Playback::Pause));
        assert!(!song.is_playing());

        song.toggle();
        song.playback_ended();
        assert_eq!(song.phase(), SongPhase::Ready);
        assert!(!song.is_playing());
        assert_eq!(song.toggle(), Some(Playback::Play));
    }

    #[test]
    fn test_reset_makes_in_flight_generation_stale() {
        let mut song = VibeSong::new();
        let id = song.request().unwrap();
        song.reset();

        assert!(song.finish::<String>(id, Ok(anthem())).is_none());
        assert_eq!(song.phase(), SongPhase::Idle);

        // A new request after reset must not collide with the old id
        let next = song.request().unwrap();
        assert_ne!(next, id);
    }
}
