//! Validation Session Controller
//!
//! Owns everything one validate-request-render cycle touches: the response
//! timer, the highlight marker, the editor, both buttons and the page view.
//! Callers drive it with `begin`, then `on_timeout` and/or `on_response`.

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::config::Config;
use crate::editor::{EditorSettings, MarkerId, SourceEditor, TextBuffer, SELECTION_MARKER_CLASS};
use crate::highlight::{CurrentError, HighlightRange};
use crate::indicator::{BusyIndicator, SpinnerButton};
use crate::request::{AddressBar, DocumentRef, OutboundRequest, RequestBuilder, ValidationRequest};
use crate::response::ValidationResult;
use crate::save::SaveArtifact;
use crate::schema::SchemaCatalog;
use crate::transport::TransportError;
use crate::view::{render_result, timeout_banner, transport_banner, SessionState, Tab, View};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no validation result to select from")]
    NoResult,
    #[error("there is no diagnostic number {0}")]
    UnknownDiagnostic(usize),
}

/// What started a validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Button,
    EnterKey,
    StartupLink,
    FileChanged,
}

/// A request the caller must now send, tagged with its sequence number
#[derive(Debug, Clone, PartialEq)]
pub struct Attempt {
    pub seq: u64,
    pub request: OutboundRequest,
}

/// The armed response timer for one attempt
#[derive(Debug, Clone, Copy)]
struct ResponseTimer {
    seq: u64,
    armed_at: Instant,
}

pub struct ValidationSession<E = TextBuffer, B = SpinnerButton> {
    endpoint: String,
    timeout: Duration,
    catalog: SchemaCatalog,
    schema_version: String,
    address: AddressBar,
    validate_button: B,
    save_button: B,
    editor_settings: EditorSettings,
    editor: Option<E>,
    marker: Option<MarkerId>,
    timer: Option<ResponseTimer>,
    result: Option<ValidationResult>,
    latest_seq: u64,
    view: View,
}

impl<E, B> ValidationSession<E, B>
where
    E: SourceEditor + Default,
    B: BusyIndicator + Default,
{
    pub fn new(config: &Config) -> Self {
        let mut save_button = B::default();
        save_button.disable();

        Self {
            endpoint: config.endpoint.clone(),
            timeout: config.timeout,
            catalog: config.catalog.clone(),
            schema_version: config.effective_schema_version(),
            address: AddressBar::new(config.page_url.clone()),
            validate_button: B::default(),
            save_button,
            editor_settings: EditorSettings::default(),
            editor: None,
            marker: None,
            timer: None,
            result: None,
            latest_seq: 0,
            view: View::default(),
        }
    }

    /// Apply the page link's startup parameters.
    ///
    /// A known `version` becomes the selected schema version; a `url` yields the
    /// request to run right away.
    pub fn startup(&mut self) -> Option<ValidationRequest> {
        let params = self.address.startup_params();

        if let Some(version) = params.version {
            if self.catalog.is_known_version(&version) {
                self.schema_version = version;
            } else {
                log::warn!("Ignoring unknown schema version '{}' from page link", version);
            }
        }

        params
            .url
            .map(|url| ValidationRequest::new(DocumentRef::Url(url), self.schema_version.clone()))
    }

    /// Enter Validating. Returns `None` when there is nothing to send, in which
    /// case the session is already back to idle.
    pub fn begin(&mut self, request: ValidationRequest, trigger: Trigger) -> Option<Attempt> {
        log::info!(
            "Validating {} document against schema {} ({:?})",
            request.method(),
            request.schema_version,
            trigger
        );

        self.latest_seq += 1;
        let seq = self.latest_seq;

        self.view.errors_tab_enabled = true;
        self.clear_results();
        self.validate_button.start();
        self.view.active_tab = Tab::Source;
        self.view.state = SessionState::Validating;
        self.arm_timer(seq);

        self.schema_version = request.schema_version.clone();
        self.address.sync(&request);

        let outbound = RequestBuilder::new(&self.endpoint, &self.catalog).build(&request);
        match outbound {
            Some(request) => {
                self.sync_chrome();
                Some(Attempt { seq, request })
            }
            None => {
                log::debug!("Empty document URL, nothing to validate");
                self.disarm_timer();
                self.validate_button.stop();
                self.view.state = SessionState::Idle;
                self.sync_chrome();
                None
            }
        }
    }

    /// The response timer for `seq` fired. Returns false if it was stale.
    pub fn on_timeout(&mut self, seq: u64) -> bool {
        match self.timer {
            Some(timer) if timer.seq == seq => {}
            _ => return false,
        }
        self.timer = None;

        log::warn!(
            "Call to {} timed out after {}ms",
            self.endpoint,
            self.timeout.as_millis()
        );
        self.validate_button.stop();
        self.view.state = SessionState::TimedOut;
        self.view
            .inserted
            .banners
            .push(timeout_banner(self.timeout, &self.endpoint));
        self.sync_chrome();
        true
    }

    /// A response for `seq` arrived. Responses to superseded attempts are
    /// dropped and false is returned.
    pub fn on_response(
        &mut self,
        seq: u64,
        outcome: Result<ValidationResult, TransportError>,
    ) -> bool {
        if seq != self.latest_seq {
            log::warn!(
                "Discarding response for attempt {} (latest is {})",
                seq,
                self.latest_seq
            );
            return false;
        }

        if let Some(timer) = self.timer.take() {
            log::info!(
                "Received response from {} after {}ms",
                self.endpoint,
                timer.armed_at.elapsed().as_millis()
            );
        } else {
            log::info!("Received late response from {}", self.endpoint);
        }

        self.clear_results();

        match outcome {
            Ok(result) => self.apply_result(result),
            Err(e) => {
                log::error!("Validation request failed: {}", e);
                let reason = e.to_string();
                self.view.inserted.banners.push(transport_banner(&reason));
                self.view.state = SessionState::TransportFailure(reason);
            }
        }

        self.validate_button.stop();
        self.sync_chrome();
        true
    }

    fn apply_result(&mut self, result: ValidationResult) {
        let state = SessionState::for_result(&result);
        if state == SessionState::Success {
            self.view.errors_tab_enabled = false;
        }
        self.view.inserted = render_result(&result);
        self.view.state = state;

        if result.has_source() {
            let mut editor = E::default();
            editor.configure(&self.editor_settings);
            editor.load(&result.normalized_source);
            self.editor = Some(editor);
            self.save_button.enable();
        } else {
            self.save_button.disable();
        }

        self.result = Some(result);
    }

    /// Show diagnostic `index` (1-based) in the source view and highlight its span
    pub fn select_diagnostic(&mut self, index: usize) -> Result<HighlightRange, SessionError> {
        let result = self.result.as_ref().ok_or(SessionError::NoResult)?;
        let diagnostic = result
            .diagnostic(index)
            .ok_or(SessionError::UnknownDiagnostic(index))?;

        let range = HighlightRange::from(diagnostic);
        let first_line = diagnostic.first_line;

        self.view.active_tab = Tab::Source;
        self.view.inserted.current_error = Some(CurrentError::from(diagnostic));

        if let Some(editor) = self.editor.as_mut() {
            editor.scroll_to_line(first_line);
            editor.goto_line(first_line, 0);
            if let Some(previous) = self.marker.take() {
                editor.remove_marker(previous);
            }
            self.marker = Some(editor.add_marker(range, SELECTION_MARKER_CLASS));
        }

        Ok(range)
    }

    /// Package the editor buffer, if saving is currently possible
    pub fn save(&self) -> Option<SaveArtifact> {
        if !self.save_button.is_enabled() {
            return None;
        }
        let editor = self.editor.as_ref()?;
        Some(SaveArtifact::from_buffer(&editor.text()))
    }

    /// Drop everything the previous result put on the page
    fn clear_results(&mut self) {
        self.view.inserted = Default::default();
        self.marker = None;
        self.editor = None;
        self.result = None;
        self.save_button.disable();
    }

    fn arm_timer(&mut self, seq: u64) {
        if let Some(previous) = self.timer.take() {
            log::debug!("Releasing response timer of attempt {}", previous.seq);
        }
        self.timer = Some(ResponseTimer {
            seq,
            armed_at: Instant::now(),
        });
    }

    fn disarm_timer(&mut self) {
        self.timer = None;
    }

    fn sync_chrome(&mut self) {
        self.view.busy = self.validate_button.is_busy();
        self.view.save_enabled = self.save_button.is_enabled();
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn state(&self) -> &SessionState {
        &self.view.state
    }

    pub fn result(&self) -> Option<&ValidationResult> {
        self.result.as_ref()
    }

    pub fn editor(&self) -> Option<&E> {
        self.editor.as_ref()
    }

    pub fn marker(&self) -> Option<MarkerId> {
        self.marker
    }

    pub fn address(&self) -> &AddressBar {
        &self.address
    }

    pub fn validate_button(&self) -> &B {
        &self.validate_button
    }

    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn is_timer_armed(&self) -> bool {
        self.timer.is_some()
    }
}
