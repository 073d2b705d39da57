//! In-memory hosts for driving the playground without a UI.
//!
//! Every host records what the core asked of it, so unit, property and
//! integration tests can assert on renders, layout propagation and editor
//! calls. Headless tools can use them too.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::api::SnippetApi;
use crate::clipboard::Clipboard;
use crate::editor::{EditorOptions, EditorPanel, EditorSurface, EditorTheme};
use crate::error::{ApiError, ApiResult, ClipboardError, ClipboardResult, EditorError, EditorResult, RenderError, RenderResult};
use crate::layout::{LayoutHost, ListenerRegistry, ListenerSet, PointerListener, PreviewWidth, WidthSpec};
use crate::models::{DocumentId, Snippet};
use crate::preview::{ContextId, SandboxHost};

pub use crate::auth::MemoryTokenStore;
pub use crate::notification::NotificationLog;

/// Sandbox that keeps the mounted document in memory
#[derive(Debug, Default)]
pub struct MemorySandbox {
    current: Option<ContextId>,
    document: Option<String>,
    contexts_created: usize,
    writes: usize,
    interactive: bool,
    visible: bool,
    width: Option<PreviewWidth>,
    fail_create: Option<RenderError>,
    fail_write: Option<RenderError>,
}

impl MemorySandbox {
    /// Creates an empty, interactive, visible sandbox
    #[must_use]
    pub fn new() -> Self {
        Self {
            interactive: true,
            visible: true,
            ..Self::default()
        }
    }

    /// Number of contexts created so far
    #[must_use]
    pub const fn contexts_created(&self) -> usize {
        self.contexts_created
    }

    /// Number of documents successfully written
    #[must_use]
    pub const fn writes(&self) -> usize {
        self.writes
    }

    /// The live context
    #[must_use]
    pub const fn current(&self) -> Option<ContextId> {
        self.current
    }

    /// Document mounted in the live context
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Whether pointer interaction is enabled
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Whether the preview panel is shown
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Last applied preview width
    #[must_use]
    pub const fn width(&self) -> Option<PreviewWidth> {
        self.width
    }

    /// Makes the next `create_context` fail
    pub fn fail_next_create(&mut self, error: RenderError) {
        self.fail_create = Some(error);
    }

    /// Makes the next `write_document` fail
    pub fn fail_next_write(&mut self, error: RenderError) {
        self.fail_write = Some(error);
    }
}

impl SandboxHost for MemorySandbox {
    fn create_context(&mut self, id: ContextId) -> RenderResult<()> {
        self.current = None;
        self.document = None;
        if let Some(error) = self.fail_create.take() {
            return Err(error);
        }
        self.current = Some(id);
        self.contexts_created += 1;
        Ok(())
    }

    fn write_document(&mut self, id: ContextId, document: &str) -> RenderResult<()> {
        if let Some(error) = self.fail_write.take() {
            return Err(error);
        }
        if self.current != Some(id) {
            return Err(RenderError::Write(format!("{id} is not the live context")));
        }
        self.document = Some(document.to_string());
        self.writes += 1;
        Ok(())
    }

    fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    fn apply_width(&mut self, width: &PreviewWidth) {
        self.width = Some(*width);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// Layout call recorded by [`RecordingLayoutHost`]
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutEvent {
    /// Preview pointer interaction toggled
    Interactive(bool),
    /// Widths applied
    Widths {
        /// Editor width
        editor: WidthSpec,
        /// Derived preview width
        preview: PreviewWidth,
    },
    /// Panel visibility changed
    Visibility {
        /// Editor panel shown
        editor: bool,
        /// Preview panel shown
        preview: bool,
    },
    /// Editors relayouted
    Relayout,
}

/// Layout host that only records calls
#[derive(Debug, Default)]
pub struct RecordingLayoutHost {
    events: Vec<LayoutEvent>,
}

impl RecordingLayoutHost {
    /// Recorded calls, oldest first
    #[must_use]
    pub fn events(&self) -> &[LayoutEvent] {
        &self.events
    }

    /// Last interaction state set, if any
    #[must_use]
    pub fn interactive(&self) -> Option<bool> {
        self.events.iter().rev().find_map(|event| match event {
            LayoutEvent::Interactive(value) => Some(*value),
            _ => None,
        })
    }

    /// Last widths applied, if any
    #[must_use]
    pub fn widths(&self) -> Option<(WidthSpec, PreviewWidth)> {
        self.events.iter().rev().find_map(|event| match event {
            LayoutEvent::Widths { editor, preview } => Some((*editor, *preview)),
            _ => None,
        })
    }

    /// Forgets recorded calls
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl LayoutHost for RecordingLayoutHost {
    fn set_preview_interactive(&mut self, interactive: bool) {
        self.events.push(LayoutEvent::Interactive(interactive));
    }

    fn apply_widths(&mut self, editor: &WidthSpec, preview: &PreviewWidth) {
        self.events.push(LayoutEvent::Widths {
            editor: *editor,
            preview: *preview,
        });
    }

    fn set_panel_visibility(&mut self, editor_visible: bool, preview_visible: bool) {
        self.events.push(LayoutEvent::Visibility {
            editor: editor_visible,
            preview: preview_visible,
        });
    }

    fn relayout_editors(&mut self) {
        self.events.push(LayoutEvent::Relayout);
    }
}

/// Listener registry whose clones share one [`ListenerSet`]
#[derive(Debug, Clone, Default)]
pub struct SharedListeners {
    inner: Rc<RefCell<ListenerSet>>,
}

impl SharedListeners {
    /// Number of listeners currently attached
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.inner.borrow().active_count()
    }

    /// Number of successful attachments since creation
    #[must_use]
    pub fn total_registrations(&self) -> usize {
        self.inner.borrow().total_registrations()
    }
}

impl ListenerRegistry for SharedListeners {
    fn register(&mut self, listener: PointerListener) {
        self.inner.borrow_mut().register(listener);
    }

    fn deregister(&mut self, listener: PointerListener) {
        self.inner.borrow_mut().deregister(listener);
    }
}

/// Editor call recorded by [`MemorySurface`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Content replaced
    SetValue(String),
    /// Shown or hidden
    Visible(bool),
    /// Focused
    Focus,
    /// Relayouted
    Relayout,
    /// Theme changed
    Theme(EditorTheme),
    /// Released
    Dispose,
}

/// Editing surface backed by a string
#[derive(Debug)]
pub struct MemorySurface {
    document: DocumentId,
    value: String,
    visible: bool,
    theme: EditorTheme,
    events: Vec<SurfaceEvent>,
    disposals: Rc<Cell<usize>>,
}

impl MemorySurface {
    /// Document this surface edits
    #[must_use]
    pub const fn document(&self) -> DocumentId {
        self.document
    }

    /// Current theme
    #[must_use]
    pub const fn theme(&self) -> EditorTheme {
        self.theme
    }

    /// Recorded calls, oldest first
    #[must_use]
    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }
}

impl EditorSurface for MemorySurface {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
        self.events.push(SurfaceEvent::SetValue(value.to_string()));
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        self.events.push(SurfaceEvent::Visible(visible));
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn focus(&mut self) {
        self.events.push(SurfaceEvent::Focus);
    }

    fn relayout(&mut self) {
        self.events.push(SurfaceEvent::Relayout);
    }

    fn set_theme(&mut self, theme: EditorTheme) {
        self.theme = theme;
        self.events.push(SurfaceEvent::Theme(theme));
    }

    fn dispose(&mut self) {
        self.disposals.set(self.disposals.get() + 1);
        self.events.push(SurfaceEvent::Dispose);
    }
}

/// Editor panel creating [`MemorySurface`]s
#[derive(Debug)]
pub struct MemoryPanel {
    width: Option<WidthSpec>,
    visible: bool,
    fail_on: Option<DocumentId>,
    disposals: Rc<Cell<usize>>,
}

impl MemoryPanel {
    /// Creates a visible panel
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: None,
            visible: true,
            fail_on: None,
            disposals: Rc::new(Cell::new(0)),
        }
    }

    /// Makes surface creation fail for one document
    pub fn fail_on(&mut self, document: DocumentId) {
        self.fail_on = Some(document);
    }

    /// Shared counter of surface disposals
    #[must_use]
    pub fn disposals(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.disposals)
    }

    /// Last applied width
    #[must_use]
    pub const fn width(&self) -> Option<WidthSpec> {
        self.width
    }

    /// Whether the panel is shown
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Default for MemoryPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorPanel for MemoryPanel {
    type Surface = MemorySurface;

    fn create_surface(&mut self, options: &EditorOptions) -> EditorResult<MemorySurface> {
        if self.fail_on == Some(options.document) {
            return Err(EditorError::CreateFailed {
                document: options.document.to_string(),
                reason: "refused by test panel".to_string(),
            });
        }
        Ok(MemorySurface {
            document: options.document,
            value: options.content.clone(),
            visible: false,
            theme: options.theme,
            events: Vec::new(),
            disposals: Rc::clone(&self.disposals),
        })
    }

    fn set_width(&mut self, width: &WidthSpec) {
        self.width = Some(*width);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// Clipboard holding its text in memory
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
    unavailable: bool,
}

impl MemoryClipboard {
    /// A working clipboard
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that rejects every write
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            text: None,
            unavailable: true,
        }
    }

    /// Current contents
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> ClipboardResult<()> {
        if self.unavailable {
            return Err(ClipboardError::Unavailable("no clipboard in test".to_string()));
        }
        self.text = Some(text.to_string());
        Ok(())
    }
}

/// Scripted [`SnippetApi`].
///
/// Answers are queued per call kind; an empty queue answers with a
/// transport error. Calls are counted so tests can assert that nothing was
/// sent.
#[derive(Debug, Default)]
pub struct StubSnippetApi {
    logins: Mutex<VecDeque<ApiResult<String>>>,
    saves: Mutex<VecDeque<ApiResult<String>>>,
    loads: Mutex<VecDeque<ApiResult<Snippet>>>,
    saved: Mutex<Vec<(String, Snippet)>>,
    calls: AtomicUsize,
}

impl StubSnippetApi {
    /// Creates a stub with no queued answers
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the answer to the next login
    #[must_use]
    pub fn with_login(self, answer: ApiResult<&str>) -> Self {
        push(&self.logins, answer.map(str::to_string));
        self
    }

    /// Queues the answer to the next save
    #[must_use]
    pub fn with_save(self, answer: ApiResult<&str>) -> Self {
        push(&self.saves, answer.map(str::to_string));
        self
    }

    /// Queues the answer to the next load
    #[must_use]
    pub fn with_load(self, answer: ApiResult<Snippet>) -> Self {
        push(&self.loads, answer);
        self
    }

    /// Total calls received
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Token and snippet of every save received
    #[must_use]
    pub fn saved(&self) -> Vec<(String, Snippet)> {
        self.saved.lock().map(|saved| saved.clone()).unwrap_or_default()
    }

    fn next<T>(&self, queue: &Mutex<VecDeque<ApiResult<T>>>) -> ApiResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        queue
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted answer".to_string())))
    }
}

fn push<T>(queue: &Mutex<VecDeque<T>>, value: T) {
    if let Ok(mut queue) = queue.lock() {
        queue.push_back(value);
    }
}

#[async_trait]
impl SnippetApi for StubSnippetApi {
    async fn login(&self, _email: &str, _password: &SecretString) -> ApiResult<SecretString> {
        self.next(&self.logins).map(SecretString::from)
    }

    async fn save_snippet(&self, token: &SecretString, snippet: &Snippet) -> ApiResult<String> {
        if let Ok(mut saved) = self.saved.lock() {
            saved.push((token.expose_secret().to_string(), snippet.clone()));
        }
        self.next(&self.saves)
    }

    async fn load_shared(&self, _share_id: &str) -> ApiResult<Snippet> {
        self.next(&self.loads)
    }
}
