/// One audio output, reused across anthem regenerations
///
/// rodio's `OutputStream` is not `Send`, so the stream and its sink live on
/// a dedicated thread driven by commands. Loading a new clip clears the
/// sink first, which drops the previous source before the new one is queued.

use rodio::{OutputStream, Sink};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use super::{AudioClip, AudioError};

/// How often the audio thread checks for the end of playback
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Playing/ended bookkeeping shared by the shell and the audio thread
///
/// `ended` is raised only when playback stops on its own, and every
/// explicit command lowers it again.
#[derive(Debug, Clone, Default)]
struct PlaybackFlags {
    playing: Arc<AtomicBool>,
    ended: Arc<AtomicBool>,
}

impl PlaybackFlags {
    fn loaded(&self) {
        self.playing.store(false, Ordering::SeqCst);
        self.ended.store(false, Ordering::SeqCst);
    }

    /// `started` is false when nothing could be queued
    fn play_requested(&self, started: bool) {
        self.playing.store(started, Ordering::SeqCst);
        self.ended.store(!started, Ordering::SeqCst);
    }

    fn paused(&self) {
        self.playing.store(false, Ordering::SeqCst);
        self.ended.store(false, Ordering::SeqCst);
    }

    fn stopped(&self) {
        self.paused();
    }

    /// Periodic check while idle on the channel
    fn polled(&self, sink_empty: bool) {
        if sink_empty && self.playing.swap(false, Ordering::SeqCst) {
            self.ended.store(true, Ordering::SeqCst);
        }
    }

    fn take_ended(&self) -> bool {
        self.ended.swap(false, Ordering::SeqCst)
    }
}

enum PlayerCommand {
    Load(AudioClip),
    Play,
    Pause,
    Stop,
}

pub struct AudioPlayer {
    tx: Option<Sender<PlayerCommand>>,
    flags: PlaybackFlags,
}

impl AudioPlayer {
    pub fn new() -> Self {
        Self {
            tx: None,
            flags: PlaybackFlags::default(),
        }
    }

    /// Replace whatever is loaded with `clip`, paused at the start
    pub fn load(&mut self, clip: AudioClip) -> Result<(), AudioError> {
        self.send(PlayerCommand::Load(clip))
    }

    pub fn play(&mut self) -> Result<(), AudioError> {
        self.send(PlayerCommand::Play)
    }

    pub fn pause(&mut self) -> Result<(), AudioError> {
        self.send(PlayerCommand::Pause)
    }

    /// Stop and release the loaded source
    pub fn stop(&mut self) -> Result<(), AudioError> {
        if self.tx.is_none() {
            return Ok(());
        }
        self.send(PlayerCommand::Stop)
    }

    /// True once after playback stopped on its own
    pub fn take_ended(&self) -> bool {
        self.flags.take_ended()
    }

    fn send(&mut self, command: PlayerCommand) -> Result<(), AudioError> {
        let tx = self.ensure_thread()?;
        if tx.send(command).is_err() {
            // The audio thread is gone; start a fresh one next time
            self.tx = None;
            return Err(AudioError::Output("audio thread stopped".to_string()));
        }
        Ok(())
    }

    fn ensure_thread(&mut self) -> Result<Sender<PlayerCommand>, AudioError> {
        if let Some(tx) = &self.tx {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<PlayerCommand>();
        let flags = self.flags.clone();

        thread::Builder::new()
            .name("anthem-audio".to_string())
            .spawn(move || {
                let mut output: Option<(OutputStream, Sink)> = None;
                let mut current: Option<AudioClip> = None;

                fn ensure_output(output: &mut Option<(OutputStream, Sink)>) -> Result<&Sink, AudioError> {
                    if output.is_none() {
                        let (stream, handle) = OutputStream::try_default()
                            .map_err(|e| AudioError::Output(e.to_string()))?;
                        let sink = Sink::try_new(&handle)
                            .map_err(|e| AudioError::Output(e.to_string()))?;
                        *output = Some((stream, sink));
                    }
                    match output {
                        Some((_, sink)) => Ok(&*sink),
                        None => Err(AudioError::Output("no audio output".to_string())),
                    }
                }

                loop {
                    match rx.recv_timeout(POLL_INTERVAL) {
                        Ok(PlayerCommand::Load(clip)) => {
                            flags.loaded();
                            match ensure_output(&mut output) {
                                Ok(sink) => {
                                    // Drops the previous source, leaves the sink paused
                                    sink.clear();
                                    match clip.source() {
                                        Ok(source) => sink.append(source),
                                        Err(e) => log::error!("❌ Cannot queue anthem: {}", e),
                                    }
                                    log::info!(
                                        "🎵 Anthem loaded ({}, {} bytes)",
                                        clip.format().mime_type(),
                                        clip.len()
                                    );
                                    current = Some(clip);
                                }
                                Err(e) => log::error!("❌ {}", e),
                            }
                        }
                        Ok(PlayerCommand::Play) => {
                            let started = match (ensure_output(&mut output), &current) {
                                (Ok(sink), Some(clip)) => {
                                    // Finished clips start over from the beginning
                                    if sink.empty() {
                                        match clip.source() {
                                            Ok(source) => sink.append(source),
                                            Err(e) => log::error!("❌ Cannot queue anthem: {}", e),
                                        }
                                    }
                                    sink.play();
                                    !sink.empty()
                                }
                                (Err(e), _) => {
                                    log::error!("❌ {}", e);
                                    false
                                }
                                (Ok(_), None) => false,
                            };
                            flags.play_requested(started);
                        }
                        Ok(PlayerCommand::Pause) => {
                            if let Some((_, sink)) = &output {
                                sink.pause();
                            }
                            flags.paused();
                        }
                        Ok(PlayerCommand::Stop) => {
                            if let Some((_, sink)) = &output {
                                sink.clear();
                            }
                            current = None;
                            flags.stopped();
                        }
                        Err(RecvTimeoutError::Timeout) => {
                            if let Some((_, sink)) = &output {
                                flags.polled(sink.empty());
                            }
                        }
                        Err(RecvTimeoutError::Disconnected) => break,
                    }
                }

                if let Some((_, sink)) = output.take() {
                    sink.stop();
                }
                log::debug!("Audio thread finished");
            })
            .map_err(|e| AudioError::Output(e.to_string()))?;

        self.tx = Some(tx.clone());
        Ok(tx)
    }
}

impl Default for AudioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        // Closing the channel ends the audio thread, which drops the sink
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(PlayerCommand::Stop);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_player_has_not_ended() {
        let player = AudioPlayer::new();
        assert!(!player.take_ended());
    }

    #[test]
    fn test_natural_end_is_reported_once() {
        let flags = PlaybackFlags::default();
        flags.loaded();
        flags.play_requested(true);

        flags.polled(false);
        assert!(!flags.take_ended());

        flags.polled(true);
        assert!(flags.take_ended());
        assert!(!flags.take_ended());

        // Idle sink while not playing is not an end
        flags.polled(true);
        assert!(!flags.take_ended());
    }

    #[test]
    fn test_replay_after_unseen_end_clears_flag() {
        let flags = PlaybackFlags::default();
        flags.play_requested(true);
        flags.polled(true);

        // Pause then play before the shell saw the end
        flags.paused();
        flags.play_requested(true);

        assert!(!flags.take_ended());
        assert!(flags.playing.load(Ordering::SeqCst));
    }

    #[test]
    fn test_play_that_cannot_start_ends_immediately() {
        let flags = PlaybackFlags::default();
        flags.play_requested(false);
        assert!(flags.take_ended());
        assert!(!flags.playing.load(Ordering::SeqCst));
    }

    #[test]
    fn test_stop_without_thread_is_noop() {
        let mut player = AudioPlayer::new();
        assert!(player.stop().is_ok());
        assert!(player.tx.is_none());
    }
}
