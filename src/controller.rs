//! Upload controller - the session state machine
//!
//! The controller is the only writer of [`SessionState`]. User intents and
//! the settled network call arrive as [`Msg`] values; each dispatch returns
//! an [`Effect`] for the caller to carry out (start the request, show a
//! notification, reveal the results).

use tracing::{debug, info, warn};

use crate::animator::{AnimationTiming, ScoreAnimator};
use crate::error::{SubmitError, ValidationError};
use crate::i18n::Locale;
use crate::model::AnalysisResult;
use crate::render::{render, RenderedResults};
use crate::selector::{FileSelector, SelectedFile};
use crate::service::AnalysisService;

/// Session phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing chosen
    Idle,
    /// A file is recorded, not yet validated
    FileSelected,
    /// Request in flight; submit disabled, busy indicator shown
    Submitting,
    /// Results on screen
    Displaying,
    /// Request failed; left again as soon as the failure is surfaced
    Error,
}

/// Inputs to the state machine
#[derive(Debug)]
pub enum Msg {
    FileChosen(SelectedFile),
    FileDropped(SelectedFile),
    Submit,
    Settled(Result<AnalysisResult, SubmitError>),
    Reset,
}

/// User-facing notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Invalid(ValidationError),
    Failed(SubmitError),
}

impl Notification {
    pub fn message(&self, locale: Locale) -> String {
        match self {
            Notification::Invalid(e) => e.user_message(locale),
            Notification::Failed(e) => e.user_message(locale),
        }
    }
}

/// What the caller must do after a dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Send this file to the analysis service, then dispatch `Msg::Settled`
    StartRequest(SelectedFile),
    Notify(Notification),
    /// Results are ready: show the results region and bring it into view
    RevealResults,
    /// Session cleared: return the view to the top
    ScrollToTop,
}

/// Owns the session: chosen file, result, rendered view and animation
#[derive(Debug)]
pub struct UploadController {
    locale: Locale,
    state: SessionState,
    selector: FileSelector,
    result: Option<AnalysisResult>,
    view: Option<RenderedResults>,
    animator: ScoreAnimator,
    busy: bool,
}

impl UploadController {
    pub fn new(locale: Locale, timing: AnimationTiming) -> Self {
        Self {
            locale,
            state: SessionState::Idle,
            selector: FileSelector::new(),
            result: None,
            view: None,
            animator: ScoreAnimator::new(timing),
            busy: false,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Busy indicator visible and submit disabled
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn can_submit(&self) -> bool {
        !self.busy
    }

    pub fn selector(&self) -> &FileSelector {
        &self.selector
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selector.current()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn view(&self) -> Option<&RenderedResults> {
        self.view.as_ref()
    }

    pub fn animator(&self) -> &ScoreAnimator {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut ScoreAnimator {
        &mut self.animator
    }

    /// Dispatch one message
    pub fn update(&mut self, msg: Msg) -> Effect {
        match msg {
            Msg::FileChosen(file) => self.select_file(file),
            Msg::FileDropped(file) => self.drop_file(file),
            Msg::Submit => self.begin_submit(),
            Msg::Settled(outcome) => self.settle(outcome),
            Msg::Reset => self.reset(),
        }
    }

    pub fn select_file(&mut self, file: SelectedFile) -> Effect {
        if self.busy {
            debug!("ignoring selection while submitting");
            return Effect::None;
        }
        self.selector.select(file);
        self.enter_file_selected();
        Effect::None
    }

    pub fn drop_file(&mut self, file: SelectedFile) -> Effect {
        if self.busy {
            debug!("ignoring drop while submitting");
            return Effect::None;
        }
        self.selector.drop_file(file);
        self.enter_file_selected();
        Effect::None
    }

    fn enter_file_selected(&mut self) {
        if self.state == SessionState::Displaying {
            self.clear_results();
        }
        self.transition(SessionState::FileSelected);
    }

    /// Validate and, if the file passes, enter Submitting
    pub fn begin_submit(&mut self) -> Effect {
        if self.busy {
            debug!("submit ignored: request already in flight");
            return Effect::None;
        }

        let file = match self.selector.validate() {
            Ok(file) => file.clone(),
            Err(e) => {
                debug!("submit rejected: {}", e);
                return Effect::Notify(Notification::Invalid(e));
            }
        };

        self.clear_results();
        self.busy = true;
        self.transition(SessionState::Submitting);
        info!("submitting {} ({})", file.name, file.human_size());
        Effect::StartRequest(file)
    }

    /// Apply the outcome of the request started by `begin_submit`
    pub fn settle(&mut self, outcome: Result<AnalysisResult, SubmitError>) -> Effect {
        if self.state != SessionState::Submitting {
            warn!("dropping settled response outside of Submitting");
            return Effect::None;
        }

        // cleared on every outcome
        self.busy = false;

        match outcome {
            Ok(result) => {
                info!(
                    "analysis complete: score {}, {} words",
                    result.score, result.word_count
                );
                self.view = Some(render(&result, self.locale));
                self.animator.start(result.score);
                self.result = Some(result);
                self.transition(SessionState::Displaying);
                Effect::RevealResults
            }
            Err(e) => {
                warn!("submission failed: {}", e);
                self.transition(SessionState::Error);
                let next = if self.selector.current().is_some() {
                    SessionState::FileSelected
                } else {
                    SessionState::Idle
                };
                self.transition(next);
                Effect::Notify(Notification::Failed(e))
            }
        }
    }

    /// Clear everything and return to Idle. Not available mid-request.
    pub fn reset(&mut self) -> Effect {
        if self.busy {
            debug!("reset ignored while submitting");
            return Effect::None;
        }
        self.selector.clear();
        self.clear_results();
        self.transition(SessionState::Idle);
        Effect::ScrollToTop
    }

    /// Validate, call the service, settle. The busy flag is restored on
    /// every path out of the call.
    pub async fn submit<S>(&mut self, service: &S) -> Effect
    where
        S: AnalysisService + ?Sized,
    {
        let file = match self.begin_submit() {
            Effect::StartRequest(file) => file,
            other => return other,
        };
        let outcome = service.analyze(&file).await;
        self.settle(outcome)
    }

    fn clear_results(&mut self) {
        self.result = None;
        self.view = None;
        self.animator.reset();
    }

    fn transition(&mut self, next: SessionState) {
        if self.state != next {
            debug!("session {:?} -> {:?}", self.state, next);
        }
        self.state = next;
    }
}

impl Default for UploadController {
    fn default() -> Self {
        Self::new(Locale::default(), AnimationTiming::default())
    }
}
