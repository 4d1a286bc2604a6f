/// Views, one per screen area
///
/// Each module renders from borrowed state and emits `crate::Message`;
/// none of them own application state except the upload zone's drag state.

pub mod design_tips;
pub mod error_view;
pub mod loading;
pub mod style_quiz;
pub mod theme;
pub mod upload_zone;
pub mod vibe_song;
