use iced::widget::{column, container, row, scrollable, text, Column};
use iced::{event, window, Alignment, Element, Event, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;
use std::time::Duration;

mod api;
mod audio;
mod config;
mod links;
mod state;
mod ui;
mod upload;

use api::{ApiClient, ApiError};
use audio::{AudioClip, AudioPlayer};
use config::AppConfig;
use state::data::{AnalysisResult, Category, HealthStatus, Product, QuizResponse, VibeSongRequest};
use state::quiz::{Step, StyleQuiz};
use state::session::{Command, Event as SessionEvent, RequestToken, Session, ViewState};
use state::song::{Anthem, Playback, VibeSong};
use ui::theme;
use ui::upload_zone::UploadZone;
use upload::{UploadedImage, ValidationError, PICKER_EXTENSIONS};

/// How often the shell asks the audio thread whether the anthem ended
const ANTHEM_TICK: Duration = Duration::from_millis(250);

/// Main application state
struct RoomGlow {
    api: ApiClient,
    /// Upload -> loading -> results | error
    session: Session,
    upload: UploadZone,
    /// Open style quiz, drawn instead of the current view
    quiz: Option<StyleQuiz>,
    song: VibeSong,
    player: AudioPlayer,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked the drop zone
    BrowseRequested,
    FileHovered,
    FilesHoveredLeft,
    FileDropped(PathBuf),
    /// Background read + validation of the chosen photo finished
    FileLoaded(Result<UploadedImage, ValidationError>),
    AnalysisFinished(RequestToken, Result<AnalysisResult, ApiError>),
    /// "Analyze another room" or "Try again"
    ResetRequested,
    RecommendationsRequested,
    RecommendationsFinished(RequestToken, Result<Vec<Product>, ApiError>),
    ShopOpened(String),
    QuizOpened,
    QuizAnswered(String),
    QuizClosed,
    QuizSubmitted(Result<QuizResponse, ApiError>),
    AnthemRequested,
    AnthemFinished(u64, Result<Anthem, ApiError>),
    AnthemToggled,
    /// Periodic check for the end of playback
    AnthemTick,
    HealthChecked(Result<HealthStatus, ApiError>),
}

impl RoomGlow {
    fn new() -> (Self, Task<Message>) {
        let config = AppConfig::load();
        log::info!("🏠 RoomGlow talking to {}", config.api_base_url);

        let api = ApiClient::new(&config);
        let probe = api.clone();

        (
            RoomGlow {
                api,
                session: Session::new(),
                upload: UploadZone::new(),
                quiz: None,
                song: VibeSong::new(),
                player: AudioPlayer::new(),
            },
            Task::perform(async move { probe.health().await }, Message::HealthChecked),
        )
    }

    /// Drops and picks only count while the upload zone is on screen
    fn accepts_files(&self) -> bool {
        self.quiz.is_none() && self.session.view() == ViewState::Upload
    }

    /// Turn a session transition into the request it asks for
    fn run(&self, command: Command) -> Task<Message> {
        match command {
            Command::None => Task::none(),
            Command::Analyze { token, image, style } => {
                let api = self.api.clone();
                Task::perform(
                    async move { api.analyze(&image, &style).await },
                    move |result| Message::AnalysisFinished(token, result),
                )
            }
            Command::Refresh { token, image, style } => {
                let api = self.api.clone();
                Task::perform(
                    async move { api.recommendations(&image, &style).await },
                    move |result| Message::RecommendationsFinished(token, result),
                )
            }
        }
    }

    fn load(&self, path: Option<PathBuf>) -> Task<Message> {
        match path {
            Some(path) => Task::perform(upload::load_image(path), Message::FileLoaded),
            None => Task::none(),
        }
    }

    fn stop_anthem(&mut self) {
        if let Err(e) = self.player.stop() {
            log::warn!("⚠️  Could not stop anthem: {}", e);
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::BrowseRequested => {
                if !self.accepts_files() || self.upload.is_busy() {
                    return Task::none();
                }

                let picked = FileDialog::new()
                    .set_title("Choose a room photo")
                    .add_filter("Images", &PICKER_EXTENSIONS[..])
                    .pick_file();

                let path = picked.and_then(|path| self.upload.accept_pick(path));
                self.load(path)
            }
            Message::FileHovered => {
                if self.accepts_files() {
                    self.upload.hovered();
                }
                Task::none()
            }
            Message::FilesHoveredLeft => {
                self.upload.hover_left();
                Task::none()
            }
            Message::FileDropped(path) => {
                if !self.accepts_files() {
                    log::debug!("Ignoring drop outside the upload view: {}", path.display());
                    return Task::none();
                }
                let path = self.upload.accept_drop(path);
                self.load(path)
            }
            Message::FileLoaded(Ok(image)) => {
                self.upload.accepted();
                if !self.accepts_files() {
                    return Task::none();
                }
                log::info!("📷 Uploading {} ({} bytes)", image.file_name, image.size());
                let command = self.session.apply(SessionEvent::Submitted(image));
                self.run(command)
            }
            Message::FileLoaded(Err(e)) => {
                self.upload.rejected(e);
                Task::none()
            }
            Message::AnalysisFinished(token, result) => {
                let event = match result {
                    Ok(analysis) => SessionEvent::AnalysisSucceeded(token, analysis),
                    Err(e) => SessionEvent::AnalysisFailed(token, e),
                };
                let command = self.session.apply(event);
                self.run(command)
            }
            Message::ResetRequested => {
                self.stop_anthem();
                self.song.reset();
                self.upload.reset();
                let command = self.session.apply(SessionEvent::ResetRequested);
                log::debug!("Preview handles live after reset: {}", self.session.live_previews());
                self.run(command)
            }
            Message::RecommendationsRequested => {
                let command = self.session.apply(SessionEvent::RefreshRequested);
                self.run(command)
            }
            Message::RecommendationsFinished(token, result) => {
                let event = match result {
                    Ok(products) => SessionEvent::RefreshSucceeded(token, products),
                    Err(e) => SessionEvent::RefreshFailed(token, e),
                };
                let command = self.session.apply(event);
                self.run(command)
            }
            Message::ShopOpened(url) => {
                if let Err(e) = links::open_in_browser(&url) {
                    log::error!("❌ Could not open {}: {}", url, e);
                }
                Task::none()
            }
            Message::QuizOpened => {
                let reading_photo =
                    self.session.view() == ViewState::Upload && !self.upload.quiz_available();
                if self.session.view() == ViewState::Loading || reading_photo {
                    return Task::none();
                }
                self.quiz = Some(StyleQuiz::new());
                Task::none()
            }
            Message::QuizAnswered(option) => {
                let Some(quiz) = self.quiz.as_mut() else {
                    return Task::none();
                };
                match quiz.select(&option) {
                    Step::Submit(answers) => {
                        let api = self.api.clone();
                        Task::perform(
                            async move { api.submit_quiz(&answers).await },
                            Message::QuizSubmitted,
                        )
                    }
                    Step::Advanced | Step::Ignored => Task::none(),
                }
            }
            Message::QuizSubmitted(result) => {
                let style_tag = match result {
                    Ok(response) => response.style_tag,
                    Err(e) => {
                        // The answers still shape recommendations without a tag
                        log::warn!("⚠️  Style quiz not saved: {}", e.user_message());
                        None
                    }
                };
                if let Some(quiz) = self.quiz.take() {
                    let (style_tag, answers) = quiz.complete(style_tag);
                    let command = self
                        .session
                        .apply(SessionEvent::QuizCompleted { style_tag, answers });
                    return self.run(command);
                }
                Task::none()
            }
            Message::QuizClosed => {
                if self.quiz.as_ref().is_some_and(|quiz| !quiz.is_saving()) {
                    self.quiz = None;
                }
                Task::none()
            }
            Message::AnthemRequested => {
                let Some(result) = self.session.result() else {
                    return Task::none();
                };
                let overall_impression = result.overall_impression.clone();
                let categories = result.categories.clone();

                let Some(generation) = self.song.request() else {
                    return Task::none();
                };
                self.stop_anthem();

                log::info!("🎶 Composing room anthem #{}", generation);
                Task::perform(
                    generate_anthem(self.api.clone(), overall_impression, categories),
                    move |result| Message::AnthemFinished(generation, result),
                )
            }
            Message::AnthemFinished(generation, result) => {
                if let Some(clip) = self.song.finish(generation, result) {
                    if let Err(e) = self.player.load(clip) {
                        log::error!("❌ Could not load anthem: {}", e);
                    }
                }
                Task::none()
            }
            Message::AnthemToggled => {
                let outcome = match self.song.toggle() {
                    Some(Playback::Play) => self.player.play(),
                    Some(Playback::Pause) => self.player.pause(),
                    None => Ok(()),
                };
                if let Err(e) = outcome {
                    log::error!("❌ Playback failed: {}", e);
                    self.song.playback_ended();
                }
                Task::none()
            }
            Message::AnthemTick => {
                if self.player.take_ended() {
                    self.song.playback_ended();
                }
                Task::none()
            }
            Message::HealthChecked(Ok(health)) => {
                log::info!(
                    "✅ Backend status: {} (model configured: {})",
                    health.status,
                    health.openai_configured
                );
                Task::none()
            }
            Message::HealthChecked(Err(e)) if e.is_network() => {
                log::warn!("⚠️  Backend not reachable at startup: {}", e);
                Task::none()
            }
            Message::HealthChecked(Err(e)) => {
                log::warn!("⚠️  Backend health check failed: {}", e.user_message());
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let header: Column<Message> = column![
            row![
                text("Room").size(48).color(theme::pink()),
                text("Glow").size(48).color(theme::cyan()),
            ],
            text("BY STELLAR HAUS").size(12).color(theme::muted()),
            text("Your space deserves better. We'll show you how.")
                .size(14)
                .color(theme::muted()),
        ]
        .spacing(6)
        .align_x(Alignment::Center);

        let body = match (&self.quiz, self.session.view()) {
            (Some(quiz), _) => ui::style_quiz::view(quiz),
            (None, ViewState::Upload) => self.upload.view(),
            (None, ViewState::Loading) => ui::loading::view(self.session.preview()),
            (None, ViewState::Results) => match self.session.result() {
                Some(result) => ui::design_tips::view(
                    result,
                    self.session.preview(),
                    &self.song,
                    self.session.style(),
                    self.session.is_refreshing(),
                ),
                None => self.upload.view(),
            },
            (None, ViewState::Error) => {
                ui::error_view::view(self.session.error().unwrap_or_default())
            }
        };

        let content = column![header, body]
            .spacing(40)
            .padding(40)
            .align_x(Alignment::Center);

        scrollable(container(content).width(Length::Fill).center_x(Length::Fill)).into()
    }

    fn subscription(&self) -> Subscription<Message> {
        let files = event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileHovered(_)) => Some(Message::FileHovered),
            Event::Window(window::Event::FilesHoveredLeft) => Some(Message::FilesHoveredLeft),
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        });

        if self.song.is_playing() {
            Subscription::batch([
                files,
                iced::time::every(ANTHEM_TICK).map(|_| Message::AnthemTick),
            ])
        } else {
            files
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    iced::application("RoomGlow", RoomGlow::update, RoomGlow::view)
        .theme(RoomGlow::theme)
        .subscription(RoomGlow::subscription)
        .centered()
        .run_with(RoomGlow::new)
}

/// Ask the backend for a song and decode its audio off the UI thread
async fn generate_anthem(
    api: ApiClient,
    overall_impression: String,
    categories: Vec<Category>,
) -> Result<Anthem, ApiError> {
    let request = VibeSongRequest {
        overall_impression: &overall_impression,
        categories: &categories,
    };
    let song = api.vibe_song(&request).await?;

    let lyrics = song.lyrics;
    let (encoded, format) = (song.audio_base64, song.format);
    let clip = tokio::task::spawn_blocking(move || AudioClip::from_base64(&encoded, &format))
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))?
        .map_err(|e| ApiError::Decode(e.to_string()))?;

    Ok(Anthem { lyrics, clip })
}
