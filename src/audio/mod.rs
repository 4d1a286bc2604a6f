/// Room anthem audio
///
/// - `clip.rs` - base64 payload decoding
/// - `player.rs` - the single reusable audio output

pub mod clip;
pub mod player;

pub use clip::AudioClip;
pub use player::AudioPlayer;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("invalid base64 audio: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("audio payload is empty")]
    Empty,
    #[error("unreadable audio: {0}")]
    Decode(String),
    #[error("audio output unavailable: {0}")]
    Output(String),
}
