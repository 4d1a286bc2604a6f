/// Top-level view state machine
///
/// `upload -> loading -> results | error`, back to `upload` on reset.
/// All transitions go through `Session::apply`, which never performs I/O:
/// it returns a `Command` describing the request the shell should start.
///
/// Requests are tagged with the `RequestToken` current when they were
/// issued. Uploads and resets bump the token, so a response that arrives
/// after the user moved on is dropped instead of repopulating the view.

use super::data::{AnalysisResult, Product, QuizAnswers, StyleProfile};
use super::preview::{Preview, PreviewLedger};
use crate::api::ApiError;
use crate::upload::UploadedImage;

/// What the main area shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Upload,
    Loading,
    Results,
    Error,
}

/// Identifies the analysis cycle a request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestToken(u64);

/// Everything that can happen to the session
#[derive(Debug, Clone)]
pub enum Event {
    /// A validated photo was handed over by the upload zone
    Submitted(UploadedImage),
    AnalysisSucceeded(RequestToken, AnalysisResult),
    AnalysisFailed(RequestToken, ApiError),
    /// "Analyze another room" from results, "Try again" from error
    ResetRequested,
    RefreshRequested,
    RefreshSucceeded(RequestToken, Vec<Product>),
    RefreshFailed(RequestToken, ApiError),
    QuizCompleted {
        style_tag: Option<String>,
        answers: QuizAnswers,
    },
}

/// Request the shell should issue after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    None,
    Analyze {
        token: RequestToken,
        image: UploadedImage,
        style: StyleProfile,
    },
    Refresh {
        token: RequestToken,
        image: UploadedImage,
        style: StyleProfile,
    },
}

/// Per-visit state: nothing here outlives the process
#[derive(Debug, Default)]
pub struct Session {
    view: ViewState,
    token: RequestToken,
    image: Option<UploadedImage>,
    preview: Option<Preview>,
    result: Option<AnalysisResult>,
    error: Option<String>,
    refreshing_products: bool,
    style: StyleProfile,
    previews: PreviewLedger,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[cfg(test)]
    pub fn image(&self) -> Option<&UploadedImage> {
        self.image.as_ref()
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing_products
    }

    pub fn style(&self) -> &StyleProfile {
        &self.style
    }

    /// Preview handles currently held (0 or 1 when nothing leaks)
    pub fn live_previews(&self) -> u64 {
        self.previews.live()
    }

    /// Apply one event and return the request it calls for
    pub fn apply(&mut self, event: Event) -> Command {
        match event {
            Event::Submitted(image) => self.submit(image),
            Event::AnalysisSucceeded(token, result) => {
                if self.is_current(token, ViewState::Loading) {
                    self.result = Some(result);
                    self.view = ViewState::Results;
                } else {
                    log::debug!("Dropping stale analysis result");
                }
                Command::None
            }
            Event::AnalysisFailed(token, err) => {
                if self.is_current(token, ViewState::Loading) {
                    log::error!("❌ Analysis failed: {}", err);
                    self.error = Some(err.user_message());
                    self.view = ViewState::Error;
                } else {
                    log::debug!("Dropping stale analysis failure: {}", err);
                }
                Command::None
            }
            Event::ResetRequested => {
                self.reset();
                Command::None
            }
            Event::RefreshRequested => self.refresh(),
            Event::RefreshSucceeded(token, products) => {
                if self.is_current(token, ViewState::Results) {
                    if let Some(result) = self.result.as_mut() {
                        log::info!("🛍️  Got {} fresh product picks", products.len());
                        result.products = Some(products);
                    }
                    self.refreshing_products = false;
                }
                Command::None
            }
            Event::RefreshFailed(token, err) => {
                // Deliberately not surfaced to the user; results stay as they were
                if self.is_current(token, ViewState::Results) {
                    log::warn!("⚠️  Recommendation refresh failed: {}", err);
                    self.refreshing_products = false;
                }
                Command::None
            }
            Event::QuizCompleted { style_tag, answers } => {
                self.style = StyleProfile {
                    style_tag,
                    answers: Some(answers),
                };
                Command::None
            }
        }
    }

    fn is_current(&self, token: RequestToken, view: ViewState) -> bool {
        self.token == token && self.view == view
    }

    fn submit(&mut self, image: UploadedImage) -> Command {
        if self.view != ViewState::Upload {
            log::warn!("⚠️  Ignoring upload while in {:?}", self.view);
            return Command::None;
        }

        // Replacing a photo releases the previous handle first
        if let Some(old) = self.preview.take() {
            self.previews.release(old);
        }
        self.preview = Some(self.previews.create(&image.preview));

        self.token = RequestToken(self.token.0 + 1);
        self.result = None;
        self.error = None;
        self.refreshing_products = false;
        self.image = Some(image.clone());
        self.view = ViewState::Loading;

        Command::Analyze {
            token: self.token,
            image,
            style: self.style.clone(),
        }
    }

    fn refresh(&mut self) -> Command {
        if self.view != ViewState::Results || self.refreshing_products {
            return Command::None;
        }
        let Some(image) = self.image.clone() else {
            return Command::None;
        };

        self.refreshing_products = true;
        Command::Refresh {
            token: self.token,
            image,
            style: self.style.clone(),
        }
    }

    fn reset(&mut self) {
        if let Some(preview) = self.preview.take() {
            self.previews.release(preview);
        }
        self.token = RequestToken(self.token.0 + 1);
        self.view = ViewState::Upload;
        self.image = None;
        self.result = None;
        self.error = None;
        self.refreshing_products = false;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(preview) = self.preview.take() {
            self.previews.release(preview);
        }
    }
}
