/// State management module
///
/// This module handles all application state, including:
/// - Backend payload types (data.rs)
/// - The upload/loading/results/error view machine (session.rs)
/// - Preview handle bookkeeping (preview.rs)
/// - The style quiz (quiz.rs)
/// - The room anthem sub-flow (song.rs)

pub mod data;
pub mod preview;
pub mod quiz;
pub mod session;
pub mod song;
