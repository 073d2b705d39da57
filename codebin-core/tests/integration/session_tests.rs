//! Integration tests for a full playground session
//!
//! Every test starts a session over the in-memory hosts and drives it the
//! way a UI would: edits, timer expiry, toggles, drags and service calls.

use std::time::{Duration, Instant};

use codebin_core::config::AppSettings;
use codebin_core::editor::EditorSurface;
use codebin_core::error::{ApiError, RenderError};
use codebin_core::layout::{ListenerSet, WidthSpec};
use codebin_core::models::{DocumentId, Documents, Snippet};
use codebin_core::notification::{NotificationKind, messages};
use codebin_core::preview::RenderOutcome;
use codebin_core::session::{LoadOutcome, PlaygroundSession, SaveOutcome, SessionParts};
use codebin_core::testing::{
    MemoryClipboard, MemoryPanel, MemorySandbox, MemoryTokenStore, NotificationLog, SharedListeners,
    StubSnippetApi,
};
use secrecy::SecretString;

type Session = PlaygroundSession<MemoryPanel, MemorySandbox>;

fn start(settings: &AppSettings, store: MemoryTokenStore) -> (Session, NotificationLog) {
    let log = NotificationLog::new();
    let session = Session::start(
        settings,
        SessionParts {
            panel: MemoryPanel::new(),
            sandbox: MemorySandbox::new(),
            listeners: ListenerSet::new(),
            token_store: Box::new(store),
            notifier: Box::new(log.clone()),
            container_width: 1000.0,
        },
    )
    .expect("session starts");
    (session, log)
}

fn logged_out() -> (Session, NotificationLog) {
    start(&AppSettings::default(), MemoryTokenStore::new())
}

fn logged_in() -> (Session, NotificationLog) {
    start(&AppSettings::default(), MemoryTokenStore::with_token("tok"))
}

fn shared_snippet() -> Snippet {
    Snippet {
        title: "Demo".to_string(),
        markup: "<h1>Demo</h1>".to_string(),
        style: "h1{color:teal}".to_string(),
        script: "console.log('demo')".to_string(),
        share_id: Some("abc123".to_string()),
    }
}

/// Polls until the pending update has fired, returning how many renders ran
fn drain(session: &mut Session) -> usize {
    let mut renders = 0;
    while let Some(deadline) = session.next_render_deadline() {
        if session.poll_scheduled_render(deadline).is_some() {
            renders += 1;
        }
    }
    renders
}

#[test]
fn burst_of_edits_renders_once() {
    let (mut session, _) = logged_out();
    let t0 = Instant::now();

    for i in 0..20u64 {
        let now = t0 + Duration::from_millis(i * 100);
        session.on_content_changed(DocumentId::Script, format!("let x = {i};"), now);
        assert!(session.poll_scheduled_render(now).is_none());
    }

    assert_eq!(drain(&mut session), 1);
    assert_eq!(session.sandbox().contexts_created(), 1);
    assert!(session.sandbox().document().unwrap().contains("let x = 19;"));
}

#[test]
fn edits_spaced_past_quiet_period_render_each_time() {
    let (mut session, _) = logged_out();
    let t0 = Instant::now();

    session.on_content_changed(DocumentId::Style, "a{}", t0);
    let first = session.next_render_deadline().unwrap();
    assert!(session.poll_scheduled_render(first).is_some());

    session.on_content_changed(DocumentId::Style, "b{}", first + Duration::from_millis(10));
    assert_eq!(drain(&mut session), 1);
    assert_eq!(session.sandbox().contexts_created(), 2);
}

#[test]
fn pause_edit_resume_renders_once() {
    let (mut session, _) = logged_out();
    let t0 = Instant::now();

    assert!(session.toggle_pause().is_none());
    assert!(session.preview().is_paused());

    for i in 0..5u64 {
        let armed = session.on_content_changed(
            DocumentId::Markup,
            format!("<p>{i}</p>"),
            t0 + Duration::from_millis(i),
        );
        assert!(armed.is_none());
    }
    assert!(session.next_render_deadline().is_none());
    assert_eq!(session.sandbox().contexts_created(), 0);

    let outcome = session.toggle_pause().expect("resume renders");
    assert!(outcome.is_mounted());
    assert_eq!(session.sandbox().contexts_created(), 1);
    assert!(session.sandbox().document().unwrap().contains("<p>4</p>"));
    assert_eq!(drain(&mut session), 0);
}

#[test]
fn pausing_drops_pending_update() {
    let (mut session, _) = logged_out();
    let t0 = Instant::now();

    session.on_content_changed(DocumentId::Script, "1", t0);
    let deadline = session.next_render_deadline().unwrap();
    session.toggle_pause();

    assert!(session.poll_scheduled_render(deadline).is_none());
    assert_eq!(session.sandbox().contexts_created(), 0);
}

#[test]
fn console_toggle_renders_even_while_paused() {
    let (mut session, _) = logged_out();
    session.toggle_pause();

    let outcome = session.toggle_console();
    assert!(outcome.is_mounted());
    assert!(!session.preview().is_console_visible());
    assert!(!session.sandbox().document().unwrap().contains("eruda.init"));

    let outcome = session.toggle_console();
    assert!(outcome.is_mounted());
    assert!(session.sandbox().document().unwrap().contains("eruda.init"));
    assert_eq!(session.sandbox().contexts_created(), 2);
}

#[test]
fn every_render_uses_a_fresh_context() {
    let (mut session, _) = logged_out();
    let first = session.render_now().and_then(|outcome| outcome.context());
    let second = session.render_now().and_then(|outcome| outcome.context());

    assert!(first.is_some());
    assert_ne!(first, second);
    assert_eq!(session.sandbox().current(), second);
}

#[tokio::test]
async fn load_replaces_documents_and_renders_once() {
    let (mut session, log) = logged_out();
    let api = StubSnippetApi::new().with_load(Ok(shared_snippet()));

    session.on_content_changed(DocumentId::Script, "stale()", Instant::now());
    let outcome = session.load_shared(&api, "abc123").await;

    let LoadOutcome::Loaded { render: Some(render) } = outcome else {
        panic!("expected a rendered load");
    };
    assert!(render.is_mounted());
    assert_eq!(session.title(), "Demo");
    assert_eq!(session.share_id(), Some("abc123"));
    assert_eq!(session.documents().content(DocumentId::Markup), "<h1>Demo</h1>");
    assert_eq!(session.documents().content(DocumentId::Style), "h1{color:teal}");
    assert_eq!(session.documents().content(DocumentId::Script), "console.log('demo')");

    assert_eq!(session.sandbox().contexts_created(), 1);
    assert_eq!(drain(&mut session), 0);

    let surface = session.router().surface(DocumentId::Style);
    assert_eq!(surface.value(), "h1{color:teal}");

    let last = log.last().unwrap();
    assert_eq!(last.kind, NotificationKind::Success);
    assert_eq!(last.message, messages::LOAD_SUCCEEDED);
}

#[tokio::test]
async fn load_while_paused_does_not_render() {
    let (mut session, _) = logged_out();
    session.toggle_pause();
    let api = StubSnippetApi::new().with_load(Ok(shared_snippet()));

    let outcome = session.load_shared(&api, "abc123").await;

    assert_eq!(outcome, LoadOutcome::Loaded { render: None });
    assert_eq!(session.title(), "Demo");
    assert_eq!(session.sandbox().contexts_created(), 0);
}

#[tokio::test]
async fn failed_load_keeps_documents() {
    let (mut session, log) = logged_out();
    let before = session.documents().clone();
    let api = StubSnippetApi::new().with_load(Err(ApiError::Status {
        status: 404,
        reason: "Not Found".to_string(),
    }));

    let outcome = session.load_shared(&api, "missing").await;

    assert!(matches!(outcome, LoadOutcome::Failed(ApiError::Status { status: 404, .. })));
    assert_eq!(session.documents(), &before);
    assert_eq!(session.share_id(), None);
    assert_eq!(log.last().unwrap().message, messages::LOAD_FAILED);
}

#[tokio::test]
async fn save_without_token_sends_nothing() {
    let (mut session, log) = logged_out();
    let api = StubSnippetApi::new().with_save(Ok("never"));

    assert_eq!(session.save(&api).await, SaveOutcome::LoginRequired);
    assert_eq!(api.calls(), 0);
    assert!(log.entries().is_empty());
}

#[tokio::test]
async fn save_sends_documents_and_title() {
    let (mut session, log) = logged_in();
    let api = StubSnippetApi::new().with_save(Ok("s1"));

    session.set_title("My pen");
    session.on_content_changed(DocumentId::Style, "body{margin:0}", Instant::now());
    let outcome = session.save(&api).await;

    assert_eq!(
        outcome,
        SaveOutcome::Saved {
            share_id: "s1".to_string(),
            share_url: "http://localhost:3000/?share=s1".to_string(),
        }
    );
    assert_eq!(session.share_id(), Some("s1"));

    let saved = api.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].0, "tok");
    assert_eq!(saved[0].1.title, "My pen");
    assert_eq!(saved[0].1.style, "body{margin:0}");
    assert_eq!(log.last().unwrap().message, messages::SAVE_SUCCEEDED);
}

#[tokio::test]
async fn failed_save_leaves_documents_unchanged() {
    let (mut session, log) = logged_in();
    session.on_content_changed(DocumentId::Script, "keep()", Instant::now());
    let before = session.documents().clone();
    let api = StubSnippetApi::new().with_save(Err(ApiError::Status {
        status: 500,
        reason: "Internal Server Error".to_string(),
    }));

    let outcome = session.save(&api).await;

    assert!(matches!(outcome, SaveOutcome::Failed(_)));
    assert_eq!(session.documents(), &before);
    assert_eq!(session.share_id(), None);
    let last = log.last().unwrap();
    assert_eq!(last.kind, NotificationKind::Error);
    assert_eq!(last.message, messages::SAVE_FAILED);
}

#[tokio::test]
async fn login_then_save_uses_new_token() {
    let (mut session, log) = logged_out();
    let api = StubSnippetApi::new()
        .with_login(Ok("fresh"))
        .with_save(Ok("s2"));
    let password = SecretString::from("pw".to_string());

    assert!(session.login(&api, "me@example.org", &password).await);
    assert!(session.is_logged_in());
    assert_eq!(log.last().unwrap().message, messages::LOGIN_SUCCEEDED);

    assert!(matches!(session.save(&api).await, SaveOutcome::Saved { .. }));
    assert_eq!(api.saved()[0].0, "fresh");
}

#[tokio::test]
async fn failed_login_keeps_logged_out() {
    let (mut session, log) = logged_out();
    let api = StubSnippetApi::new().with_login(Err(ApiError::Status {
        status: 401,
        reason: "Unauthorized".to_string(),
    }));
    let password = SecretString::from("wrong".to_string());

    assert!(!session.login(&api, "me@example.org", &password).await);
    assert!(!session.is_logged_in());
    assert_eq!(log.last().unwrap().message, messages::LOGIN_FAILED);
}

#[test]
fn logout_forgets_token() {
    let (mut session, log) = logged_in();
    assert!(session.is_logged_in());

    session.logout();

    assert!(!session.is_logged_in());
    assert_eq!(log.last().unwrap().message, messages::LOGGED_OUT);
}

#[tokio::test]
async fn copy_share_link_reports_outcome() {
    let (mut session, log) = logged_in();
    let api = StubSnippetApi::new().with_save(Ok("s3"));
    session.save(&api).await;

    let mut clipboard = MemoryClipboard::new();
    assert!(session.copy_share_url(&mut clipboard));
    assert_eq!(clipboard.text(), Some("http://localhost:3000/?share=s3"));
    assert_eq!(log.last().unwrap().message, messages::COPY_SUCCEEDED);

    let mut broken = MemoryClipboard::unavailable();
    assert!(!session.copy_share_url(&mut broken));
    assert_eq!(log.last().unwrap().message, messages::COPY_FAILED);
}

#[tokio::test]
async fn share_origin_overrides_service_url() {
    let mut settings = AppSettings::default();
    settings.api.share_origin = Some("https://codebin.example".to_string());
    let (mut session, _) = start(&settings, MemoryTokenStore::with_token("tok"));
    let api = StubSnippetApi::new().with_save(Ok("z9"));

    let SaveOutcome::Saved { share_url, .. } = session.save(&api).await else {
        panic!("save failed");
    };
    assert_eq!(share_url, "https://codebin.example/?share=z9");
}

#[test]
fn drag_listeners_released_on_every_exit() {
    let listeners = SharedListeners::default();
    let session = PlaygroundSession::start(
        &AppSettings::default(),
        SessionParts {
            panel: MemoryPanel::new(),
            sandbox: MemorySandbox::new(),
            listeners: listeners.clone(),
            token_store: Box::new(MemoryTokenStore::new()),
            notifier: Box::new(NotificationLog::new()),
            container_width: 1000.0,
        },
    );
    let mut session = session.expect("session starts");

    assert!(session.start_drag(500.0, 500.0));
    assert!(!session.start_drag(510.0, 500.0));
    assert_eq!(listeners.active_count(), 4);
    assert_eq!(listeners.total_registrations(), 4);

    assert_eq!(session.drag_to(2000.0), Some(WidthSpec::Pixels(2000.0)));
    assert_eq!(session.drag_to(200.0), Some(WidthSpec::Pixels(200.0)));
    assert_eq!(session.drag_to(-500.0), Some(WidthSpec::Pixels(0.0)));
    assert!(session.end_drag());
    assert_eq!(listeners.active_count(), 0);

    session.start_drag(300.0, 300.0);
    drop(session);
    assert_eq!(listeners.active_count(), 0);
}

#[test]
fn showing_preview_restores_default_split() {
    let (mut session, _) = logged_out();
    session.start_drag(500.0, 500.0);
    session.drag_to(620.0);
    session.end_drag();
    assert_eq!(session.layout().editor_width(), WidthSpec::Pixels(620.0));

    assert!(!session.toggle_preview());
    assert_eq!(session.layout().editor_width(), WidthSpec::FULL);
    assert!(session.toggle_preview());
    assert_eq!(session.layout().editor_width(), WidthSpec::DEFAULT);
    assert!(session.sandbox().is_visible());
}

#[test]
fn viewport_resize_keeps_width_and_updates_bounds() {
    let (mut session, _) = logged_out();
    session.viewport_resized(600.0);

    assert_eq!(session.layout().editor_width(), WidthSpec::DEFAULT);
    assert_eq!(session.layout().container_width(), Some(600.0));
}

#[test]
fn tab_switch_shows_exactly_one_surface() {
    let (mut session, _) = logged_out();
    session.switch_tab(DocumentId::Script);

    assert_eq!(session.active_tab(), DocumentId::Script);
    for id in DocumentId::ALL {
        let visible = session.router().surface(id).is_visible();
        assert_eq!(visible, id == DocumentId::Script);
    }
}

#[test]
fn failed_render_keeps_session_usable() {
    let documents = Documents::from_contents("<b>x</b>", "", "");
    let mut sandbox = MemorySandbox::new();
    sandbox.fail_next_write(RenderError::Write("disk full".to_string()));
    let mut failing = Session::start_with(
        &AppSettings::default(),
        SessionParts {
            panel: MemoryPanel::new(),
            sandbox,
            listeners: ListenerSet::new(),
            token_store: Box::new(MemoryTokenStore::new()),
            notifier: Box::new(NotificationLog::new()),
            container_width: 800.0,
        },
        documents,
    )
    .expect("session starts");

    assert!(matches!(failing.render_now(), Some(RenderOutcome::Failed { .. })));
    assert!(failing.render_now().unwrap().is_mounted());
    assert!(failing.sandbox().document().unwrap().contains("<b>x</b>"));
}
