//! End-to-end session flows against a scripted transport on a paused clock.

mod common;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use common::{clean_body, non_document_body, two_errors_body, Reply, ScriptedTransport};
use csl_validator::config::Config;
use csl_validator::editor::TextBuffer;
use csl_validator::indicator::{BusyIndicator, SpinnerButton};
use csl_validator::request::{DocumentRef, ValidationRequest};
use csl_validator::save::XML_DECLARATION;
use csl_validator::session::{run_validation, spawn_validation, SharedSession, Trigger};
use csl_validator::view::{BannerLevel, Tab};
use csl_validator::{SessionState, ValidationSession};

const STYLE_URL: &str = "https://example.org/apa.csl";

fn config() -> Config {
    Config {
        endpoint: "http://validator.test/validate/".to_string(),
        timeout: Duration::from_secs(10),
        ..Config::default()
    }
}

fn shared_session() -> SharedSession<TextBuffer, SpinnerButton> {
    Arc::new(Mutex::new(ValidationSession::new(&config())))
}

fn url_request(url: &str) -> ValidationRequest {
    ValidationRequest::new(DocumentRef::Url(url.to_string()), "1.0.1")
}

#[tokio::test(start_paused = true)]
async fn test_errors_render_and_selection_highlights() {
    let session = shared_session();
    let transport = ScriptedTransport::new().reply(
        STYLE_URL,
        Duration::from_millis(300),
        Reply::Body(two_errors_body()),
    );

    let seq = run_validation(&session, &transport, url_request(STYLE_URL), Trigger::Button).await;
    assert_eq!(seq, Some(1));

    let mut session = session.lock().await;
    assert_eq!(session.state(), &SessionState::Errors(2));
    assert!(!session.view().busy);
    assert!(session.view().save_enabled);
    assert!(session.view().errors_tab_enabled);

    let banners = &session.view().inserted.banners;
    assert_eq!(banners.len(), 1);
    assert_eq!(banners[0].level, BannerLevel::Danger);
    assert_eq!(banners[0].message, "Oops, I found 2 errors.");

    let panel = session.view().inserted.errors_panel.as_ref().unwrap();
    assert_eq!(panel.entries.len(), 2);
    assert_eq!(panel.entries[0].label, "Line 4");
    assert_eq!(panel.entries[1].label, "Lines 6-8");

    let range = session.select_diagnostic(2).unwrap();
    assert_eq!(
        (range.start_line, range.start_column, range.end_line, range.end_column),
        (5, 2, 7, 13)
    );
    assert_eq!(session.view().active_tab, Tab::Source);
    let current = session.view().inserted.current_error.as_ref().unwrap();
    assert_eq!(current.to_string(), "ERROR @ Lines 6-8: element \"citation\" incomplete");

    let editor = session.editor().unwrap();
    assert_eq!(editor.marker_count(), 1);
    assert_eq!(editor.cursor(), (6, 0));
}

#[tokio::test(start_paused = true)]
async fn test_request_carries_url_and_schema() {
    let session = shared_session();
    let transport =
        ScriptedTransport::new().reply(STYLE_URL, Duration::ZERO, Reply::Body(clean_body()));

    run_validation(&session, &transport, url_request(STYLE_URL), Trigger::Button).await;

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].endpoint(), "http://validator.test/validate/");
    assert_eq!(calls[0].parameter("doc"), Some(STYLE_URL));
    assert_eq!(
        calls[0].parameter("schema"),
        Some("https://raw.githubusercontent.com/citation-style-language/schema/v1.0.1/csl.rnc")
    );
    assert_eq!(calls[0].parameter("out"), Some("json"));

    let session = session.lock().await;
    assert_eq!(session.state(), &SessionState::Success);
    assert!(!session.view().errors_tab_enabled);
    let address = session.address().current();
    assert!(address.query_pairs().any(|(k, v)| k == "url" && v == STYLE_URL));
    assert!(address.query_pairs().any(|(k, v)| k == "version" && v == "1.0.1"));
}

#[tokio::test(start_paused = true)]
async fn test_timeout_then_late_response_renders_results() {
    let session = shared_session();
    let transport = Arc::new(ScriptedTransport::new().reply(
        STYLE_URL,
        Duration::from_secs(15),
        Reply::Body(two_errors_body()),
    ));

    let handle = spawn_validation(
        session.clone(),
        transport.clone(),
        url_request(STYLE_URL),
        Trigger::Button,
    );

    tokio::time::sleep(Duration::from_secs(11)).await;
    {
        let session = session.lock().await;
        assert_eq!(session.state(), &SessionState::TimedOut);
        assert!(!session.validate_button().is_busy());
        let banners = &session.view().inserted.banners;
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].level, BannerLevel::Warning);
        assert!(banners[0].message.contains("more than 10 seconds"));
    }

    assert_eq!(handle.await.unwrap(), Some(1));

    let session = session.lock().await;
    assert_eq!(session.state(), &SessionState::Errors(2));
    let banners = &session.view().inserted.banners;
    assert_eq!(banners.len(), 1);
    assert_eq!(banners[0].level, BannerLevel::Danger);
    assert!(!session.is_timer_armed());
}

#[tokio::test(start_paused = true)]
async fn test_repeated_validations_leave_single_banner() {
    let session = shared_session();
    let transport = ScriptedTransport::new().reply(
        STYLE_URL,
        Duration::from_millis(50),
        Reply::Body(two_errors_body()),
    );

    for _ in 0..5 {
        run_validation(&session, &transport, url_request(STYLE_URL), Trigger::Button).await;
    }

    let mut session = session.lock().await;
    assert_eq!(session.latest_seq(), 5);
    assert_eq!(session.view().inserted.banners.len(), 1);
    assert_eq!(
        session.view().inserted.errors_panel.as_ref().unwrap().entries.len(),
        2
    );

    session.select_diagnostic(1).unwrap();
    session.select_diagnostic(2).unwrap();
    session.select_diagnostic(1).unwrap();
    assert_eq!(session.editor().unwrap().marker_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_blank_url_sends_nothing() {
    let session = shared_session();
    let transport = ScriptedTransport::new();

    let seq = run_validation(&session, &transport, url_request(""), Trigger::EnterKey).await;
    assert_eq!(seq, None);
    assert!(transport.calls().is_empty());

    let session = session.lock().await;
    assert_eq!(session.state(), &SessionState::Idle);
    assert!(!session.view().busy);
    assert!(!session.is_timer_armed());
    assert!(session.view().inserted.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_stale_response_is_discarded() {
    let session = shared_session();
    let transport = ScriptedTransport::new()
        .reply(
            "https://example.org/slow.csl",
            Duration::from_secs(5),
            Reply::Body(two_errors_body()),
        )
        .reply(
            "https://example.org/fast.csl",
            Duration::from_secs(1),
            Reply::Body(clean_body()),
        );

    let (slow, fast) = tokio::join!(
        run_validation(
            &session,
            &transport,
            url_request("https://example.org/slow.csl"),
            Trigger::Button
        ),
        run_validation(
            &session,
            &transport,
            url_request("https://example.org/fast.csl"),
            Trigger::Button
        ),
    );
    assert_eq!((slow, fast), (Some(1), Some(2)));

    let session = session.lock().await;
    assert_eq!(session.latest_seq(), 2);
    assert_eq!(session.state(), &SessionState::Success);
    assert!(session.result().unwrap().diagnostics.is_empty());
    assert_eq!(session.view().inserted.banners.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_non_document_error_wins() {
    let session = shared_session();
    let transport = ScriptedTransport::new().reply(
        STYLE_URL,
        Duration::ZERO,
        Reply::Body(non_document_body()),
    );

    run_validation(&session, &transport, url_request(STYLE_URL), Trigger::StartupLink).await;

    let session = session.lock().await;
    assert!(matches!(session.state(), SessionState::NonDocumentFailure(reason) if reason.contains("404")));
    assert!(session.view().inserted.errors_panel.is_none());
    assert!(session.editor().is_none());
    assert!(!session.view().save_enabled);
}

#[tokio::test(start_paused = true)]
async fn test_transport_failures_reach_the_page() {
    let session = shared_session();
    let transport = ScriptedTransport::new()
        .reply(STYLE_URL, Duration::ZERO, Reply::Status(503))
        .reply(
            "https://example.org/garbage.csl",
            Duration::ZERO,
            Reply::Body("<html>not json</html>".to_string()),
        );

    run_validation(&session, &transport, url_request(STYLE_URL), Trigger::Button).await;
    {
        let session = session.lock().await;
        assert!(
            matches!(session.state(), SessionState::TransportFailure(reason) if reason.contains("503"))
        );
        let banners = &session.view().inserted.banners;
        assert_eq!(banners.len(), 1);
        assert!(banners[0]
            .message
            .starts_with("Validation failed: could not get a response from the validator"));
        assert!(!session.view().busy);
    }

    run_validation(
        &session,
        &transport,
        url_request("https://example.org/garbage.csl"),
        Trigger::Button,
    )
    .await;

    let session = session.lock().await;
    assert!(matches!(session.state(), SessionState::TransportFailure(_)));
    assert_eq!(session.view().inserted.banners.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_pasted_text_is_posted_and_saved() {
    let session = shared_session();
    let text = common::STYLE_SOURCE.to_string();
    let transport =
        ScriptedTransport::new().reply(&text, Duration::ZERO, Reply::Body(clean_body()));

    let request = ValidationRequest::new(DocumentRef::Text(text.clone()), "1.0.2-mlz1");
    run_validation(&session, &transport, request, Trigger::Button).await;

    let calls = transport.calls();
    assert_eq!(
        calls[0].parameter("schema"),
        Some("https://raw.githubusercontent.com/fbennett/schema/v1.0.2-mlz1/csl-mlz.rnc")
    );

    let session = session.lock().await;
    let address = session.address().current();
    assert!(address.query().is_none());

    let artifact = session.save().unwrap();
    assert_eq!(artifact.file_name, "apa.csl");
    assert!(artifact.contents.starts_with(XML_DECLARATION));
    assert!(artifact.contents.contains("<foo/>"));
}
