//! The playground session
//!
//! [`PlaygroundSession`] is the single owner of all session state: the three
//! documents, title and share id, the preview state with its scheduler, the
//! sandbox renderer, the resize engine, the tab router and the login state.
//! Hosts feed it events (edits, pointer gestures, toggles, timer expiry) and
//! give it the collaborators it needs for network and clipboard calls.

use std::time::Instant;

use secrecy::SecretString;

use crate::api::SnippetApi;
use crate::auth::{AuthState, TokenStore};
use crate::clipboard::Clipboard;
use crate::config::AppSettings;
use crate::editor::{EditorPanel, EditorTheme};
use crate::error::{ApiError, EditorResult};
use crate::layout::{LayoutHost, LayoutState, ListenerRegistry, ListenerSet, PreviewWidth, ResizeEngine, WidthSpec};
use crate::models::{DocumentId, Documents, Snippet};
use crate::notification::{Notification, Notifier, messages};
use crate::preview::{PreviewState, RenderOutcome, SandboxHost, SandboxRenderer, TimerId};
use crate::router::TabRouter;
use crate::share;

/// Collaborators a session is started with
pub struct SessionParts<P, H, R = ListenerSet> {
    /// Container for the editing surfaces
    pub panel: P,
    /// Container for the preview context
    pub sandbox: H,
    /// Where drag listeners are attached
    pub listeners: R,
    /// Durable token storage
    pub token_store: Box<dyn TokenStore>,
    /// Where notifications go
    pub notifier: Box<dyn Notifier>,
    /// Width of the editor/preview container at startup
    pub container_width: f64,
}

/// Result of [`PlaygroundSession::save`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No token; nothing was sent
    LoginRequired,
    /// Stored by the service
    Saved {
        /// Assigned share id
        share_id: String,
        /// Public link to the snippet
        share_url: String,
    },
    /// The service call failed; documents are unchanged
    Failed(ApiError),
}

/// Result of [`PlaygroundSession::load_shared`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Documents and title replaced
    Loaded {
        /// Render triggered by the load, `None` while paused
        render: Option<RenderOutcome>,
    },
    /// The service call failed; documents are unchanged
    Failed(ApiError),
}

/// Routes layout propagation to the editor panel and the sandbox
struct LayoutBridge<P: EditorPanel, H: SandboxHost> {
    router: TabRouter<P>,
    renderer: SandboxRenderer<H>,
}

impl<P: EditorPanel, H: SandboxHost> LayoutHost for LayoutBridge<P, H> {
    fn set_preview_interactive(&mut self, interactive: bool) {
        self.renderer.host_mut().set_interactive(interactive);
    }

    fn apply_widths(&mut self, editor: &WidthSpec, preview: &PreviewWidth) {
        self.router.panel_mut().set_width(editor);
        self.renderer.host_mut().apply_width(preview);
    }

    fn set_panel_visibility(&mut self, editor_visible: bool, preview_visible: bool) {
        self.router.panel_mut().set_visible(editor_visible);
        self.renderer.host_mut().set_visible(preview_visible);
    }

    fn relayout_editors(&mut self) {
        self.router.relayout_all();
    }
}

/// One playground session
pub struct PlaygroundSession<P: EditorPanel, H: SandboxHost, R: ListenerRegistry = ListenerSet> {
    documents: Documents,
    title: String,
    share_id: Option<String>,
    share_origin: String,
    preview: PreviewState,
    bridge: LayoutBridge<P, H>,
    layout: ResizeEngine<R>,
    auth: AuthState,
    notifier: Box<dyn Notifier>,
    shut_down: bool,
}

impl<P: EditorPanel, H: SandboxHost, R: ListenerRegistry> PlaygroundSession<P, H, R> {
    /// Starts a session with the default documents.
    ///
    /// Creates the editor surfaces, restores the login token and lays out
    /// the panels. No render happens until the host asks for one.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor surfaces cannot be created.
    pub fn start(settings: &AppSettings, parts: SessionParts<P, H, R>) -> EditorResult<Self> {
        Self::start_with(settings, parts, Documents::new())
    }

    /// Starts a session with explicit documents
    ///
    /// # Errors
    ///
    /// Returns an error if the editor surfaces cannot be created.
    pub fn start_with(
        settings: &AppSettings,
        parts: SessionParts<P, H, R>,
        documents: Documents,
    ) -> EditorResult<Self> {
        let router = TabRouter::new(parts.panel, &documents, &settings.editor)?;
        let renderer = SandboxRenderer::new(parts.sandbox, settings.preview.console.clone());
        let mut bridge = LayoutBridge { router, renderer };

        let mut layout = ResizeEngine::new(&settings.layout, parts.listeners);
        layout.initialize(parts.container_width, &mut bridge);

        let preview = PreviewState::from_settings(&settings.preview);
        tracing::info!(
            paused = preview.is_paused(),
            console = preview.is_console_visible(),
            "Playground session started"
        );

        Ok(Self {
            documents,
            title: String::new(),
            share_id: None,
            share_origin: settings.api.share_origin().to_string(),
            preview,
            bridge,
            layout,
            auth: AuthState::restore(parts.token_store),
            notifier: parts.notifier,
            shut_down: false,
        })
    }

    /// The share id carried by a page URL, read once at startup
    #[must_use]
    pub fn startup_share_id(url: &str) -> Option<String> {
        reqwest::Url::parse(url)
            .ok()
            .and_then(|url| share::share_id_from_url(&url))
    }

    /// The three documents
    #[must_use]
    pub const fn documents(&self) -> &Documents {
        &self.documents
    }

    /// Snippet title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Renames the snippet
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Share id of the last save or load
    #[must_use]
    pub fn share_id(&self) -> Option<&str> {
        self.share_id.as_deref()
    }

    /// Public link for the current share id
    #[must_use]
    pub fn share_url(&self) -> Option<String> {
        self.share_id.as_deref().map(|id| self.link_for(id))
    }

    fn link_for(&self, share_id: &str) -> String {
        match share::share_url(&self.share_origin, share_id) {
            Ok(url) => url.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Share origin unusable, building link verbatim");
                format!(
                    "{}/?{}={share_id}",
                    self.share_origin.trim_end_matches('/'),
                    share::SHARE_QUERY_PARAM
                )
            }
        }
    }

    /// Preview flags and scheduler
    #[must_use]
    pub const fn preview(&self) -> &PreviewState {
        &self.preview
    }

    /// Split layout
    #[must_use]
    pub const fn layout(&self) -> &LayoutState {
        self.layout.state()
    }

    /// The drag listener registry
    #[must_use]
    pub const fn listeners(&self) -> &R {
        self.layout.listeners()
    }

    /// The tab router
    #[must_use]
    pub const fn router(&self) -> &TabRouter<P> {
        &self.bridge.router
    }

    /// The sandbox renderer
    #[must_use]
    pub const fn renderer(&self) -> &SandboxRenderer<H> {
        &self.bridge.renderer
    }

    /// The sandbox host
    #[must_use]
    pub const fn sandbox(&self) -> &H {
        self.bridge.renderer.host()
    }

    /// The active tab
    #[must_use]
    pub const fn active_tab(&self) -> DocumentId {
        self.bridge.router.active()
    }

    /// Returns true while a token is held
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.auth.is_logged_in()
    }

    /// Editor change callback.
    ///
    /// Returns the armed timer, or `None` when the content did not change
    /// or execution is paused.
    pub fn on_content_changed(
        &mut self,
        id: DocumentId,
        content: impl Into<String>,
        now: Instant,
    ) -> Option<TimerId> {
        if !self.documents.set(id, content) {
            return None;
        }
        self.preview.notify_changed(now)
    }

    /// When the pending update is due
    #[must_use]
    pub fn next_render_deadline(&self) -> Option<Instant> {
        self.preview.deadline()
    }

    /// Renders if the pending update is due
    pub fn poll_scheduled_render(&mut self, now: Instant) -> Option<RenderOutcome> {
        if self.preview.poll_expired(now) {
            Some(self.render())
        } else {
            None
        }
    }

    /// Renders right away unless paused
    pub fn render_now(&mut self) -> Option<RenderOutcome> {
        if self.preview.is_paused() {
            tracing::debug!("Render suppressed while paused");
            return None;
        }
        Some(self.render_immediately())
    }

    fn render_immediately(&mut self) -> RenderOutcome {
        self.preview.cancel_pending();
        self.render()
    }

    fn render(&mut self) -> RenderOutcome {
        self.bridge
            .renderer
            .render(&self.documents, self.preview.is_console_visible())
    }

    /// Pauses or resumes execution; resuming renders once
    pub fn toggle_pause(&mut self) -> Option<RenderOutcome> {
        if self.preview.toggle_pause().is_immediate() {
            Some(self.render_immediately())
        } else {
            None
        }
    }

    /// Shows or hides the debug console and renders, paused or not
    pub fn toggle_console(&mut self) -> RenderOutcome {
        self.preview.toggle_console();
        self.render_immediately()
    }

    /// Activates a tab
    pub fn switch_tab(&mut self, id: DocumentId) {
        self.bridge.router.switch_to(id);
    }

    /// Follows the system colour scheme
    pub fn set_dark_mode(&mut self, dark: bool) {
        self.bridge.router.apply_theme(EditorTheme::from_dark_mode(dark));
    }

    /// Pointer-down on the splitter
    pub fn start_drag(&mut self, pointer_x: f64, editor_width_px: f64) -> bool {
        self.layout.start_drag(pointer_x, editor_width_px, &mut self.bridge)
    }

    /// Pointer move
    pub fn drag_to(&mut self, pointer_x: f64) -> Option<WidthSpec> {
        self.layout.drag_to(pointer_x, &mut self.bridge)
    }

    /// Pointer release
    pub fn end_drag(&mut self) -> bool {
        self.layout.end_drag(&mut self.bridge)
    }

    /// Shows or hides the preview panel
    pub fn toggle_preview(&mut self) -> bool {
        self.layout.toggle_preview(&mut self.bridge)
    }

    /// Shows or hides the editor panel
    pub fn toggle_editor(&mut self) -> bool {
        self.layout.toggle_editor(&mut self.bridge)
    }

    /// Viewport size change
    pub fn viewport_resized(&mut self, container_width: f64) {
        self.layout.viewport_resized(container_width, &mut self.bridge);
    }

    /// Logs in; the outcome is reported as a notification
    pub async fn login(&mut self, api: &dyn SnippetApi, email: &str, password: &SecretString) -> bool {
        self.auth
            .login(api, email, password, self.notifier.as_mut())
            .await
    }

    /// Logs out and clears the stored token
    pub fn logout(&mut self) {
        self.auth.logout(self.notifier.as_mut());
    }

    /// Saves the documents under the current title.
    ///
    /// Without a token nothing is sent. Failures are reported as a
    /// notification and leave the documents untouched.
    pub async fn save(&mut self, api: &dyn SnippetApi) -> SaveOutcome {
        let Some(token) = self.auth.token().cloned() else {
            tracing::debug!("Save requested without a token");
            return SaveOutcome::LoginRequired;
        };

        let snippet = Snippet::from_documents(self.title.clone(), &self.documents);
        match api.save_snippet(&token, &snippet).await {
            Ok(share_id) => {
                let share_url = self.link_for(&share_id);
                tracing::info!(share_id = %share_id, "Snippet saved");
                self.share_id = Some(share_id.clone());
                self.notifier
                    .notify(Notification::success(messages::SAVE_SUCCEEDED));
                SaveOutcome::Saved {
                    share_id,
                    share_url,
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save snippet");
                self.notifier
                    .notify(Notification::error(messages::SAVE_FAILED));
                SaveOutcome::Failed(e)
            }
        }
    }

    /// Loads a shared snippet, replacing documents and title at once.
    ///
    /// The editors receive the new content, any pending update is dropped
    /// and exactly one render follows unless execution is paused.
    pub async fn load_shared(&mut self, api: &dyn SnippetApi, share_id: &str) -> LoadOutcome {
        let snippet = match api.load_shared(share_id).await {
            Ok(snippet) => snippet,
            Err(e) => {
                tracing::error!(share_id = %share_id, error = %e, "Failed to load shared snippet");
                self.notifier
                    .notify(Notification::error(messages::LOAD_FAILED));
                return LoadOutcome::Failed(e);
            }
        };

        self.documents.replace_all(snippet.to_documents());
        self.title = snippet.title;
        self.share_id = Some(snippet.share_id.unwrap_or_else(|| share_id.to_string()));
        self.bridge.router.set_all_content(&self.documents);
        self.preview.cancel_pending();

        let render = self.render_now();
        tracing::info!(share_id = %share_id, rendered = render.is_some(), "Shared snippet loaded");
        self.notifier
            .notify(Notification::success(messages::LOAD_SUCCEEDED));
        LoadOutcome::Loaded { render }
    }

    /// Copies the share link; the outcome is reported as a notification.
    ///
    /// Returns false when there is nothing to copy or the copy failed.
    pub fn copy_share_url(&mut self, clipboard: &mut dyn Clipboard) -> bool {
        let Some(url) = self.share_url() else {
            return false;
        };
        match clipboard.set_text(&url) {
            Ok(()) => {
                self.notifier
                    .notify(Notification::success(messages::COPY_SUCCEEDED));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to copy share link");
                self.notifier
                    .notify(Notification::error(messages::COPY_FAILED));
                false
            }
        }
    }

    /// Tears the session down: drops the pending update, ends any drag and
    /// disposes the editors. Later calls do nothing.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.preview.cancel_pending();
        self.layout.end_drag(&mut self.bridge);
        self.bridge.router.dispose_all();
        tracing::info!("Playground session closed");
    }

    /// Returns true after [`Self::shutdown`]
    #[must_use]
    pub const fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}
