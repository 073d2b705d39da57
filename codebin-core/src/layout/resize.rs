//! Editor/preview split resizing
//!
//! The engine is a two-state machine (Idle, Dragging) driven by pointer
//! events on the splitter. Everything it changes on screen goes through a
//! [`LayoutHost`], so the arithmetic and the listener bookkeeping can be
//! exercised without a UI toolkit.

use crate::config::LayoutSettings;
use crate::tracing::span_names;

use super::listeners::{ListenerRegistry, ListenerSet, acquire_drag_listeners, release_drag_listeners};
use super::width::{PreviewWidth, WidthSpec};

/// Surfaces affected by layout changes
pub trait LayoutHost {
    /// Enables or disables pointer interaction with the preview context
    fn set_preview_interactive(&mut self, interactive: bool);

    /// Applies the editor width and the derived preview width
    fn apply_widths(&mut self, editor: &WidthSpec, preview: &PreviewWidth);

    /// Shows or hides the two panels
    fn set_panel_visibility(&mut self, editor_visible: bool, preview_visible: bool);

    /// Asks the text-editing component to recompute its viewport
    fn relayout_editors(&mut self);
}

/// Where a drag started
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOrigin {
    /// Pointer x coordinate at pointer-down
    pub start_x: f64,
    /// Editor panel width in pixels at pointer-down
    pub start_width: f64,
}

/// Resize gesture state
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No gesture in progress
    #[default]
    Idle,
    /// Splitter is being dragged
    Dragging(DragOrigin),
}

/// Persisted split state
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    editor_width: WidthSpec,
    default_width: WidthSpec,
    container_width: Option<f64>,
    drag: DragState,
    editor_visible: bool,
    preview_visible: bool,
}

impl LayoutState {
    /// Creates the startup layout
    #[must_use]
    pub fn new(settings: &LayoutSettings) -> Self {
        Self {
            editor_width: settings.default_editor_width,
            default_width: settings.default_editor_width,
            container_width: None,
            drag: DragState::Idle,
            editor_visible: true,
            preview_visible: true,
        }
    }

    /// Current editor width specification
    #[must_use]
    pub const fn editor_width(&self) -> WidthSpec {
        self.editor_width
    }

    /// Preview width, derived from the editor width
    #[must_use]
    pub fn preview_width(&self) -> PreviewWidth {
        self.editor_width.preview_width()
    }

    /// Measured container width
    #[must_use]
    pub const fn container_width(&self) -> Option<f64> {
        self.container_width
    }

    /// Current gesture state
    #[must_use]
    pub const fn drag(&self) -> DragState {
        self.drag
    }

    /// Returns true while the splitter is being dragged
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging(_))
    }

    /// Whether the editor panel is shown
    #[must_use]
    pub const fn is_editor_visible(&self) -> bool {
        self.editor_visible
    }

    /// Whether the preview panel is shown
    #[must_use]
    pub const fn is_preview_visible(&self) -> bool {
        self.preview_visible
    }

    fn measure(&mut self, container_width: f64) {
        self.container_width = Some(container_width.max(0.0));
    }
}

/// Tracks resize gestures and owns the drag listener lifecycle.
///
/// Listeners are attached on drag start and detached on drag end, and also
/// when the engine is dropped mid-drag.
#[derive(Debug)]
pub struct ResizeEngine<R: ListenerRegistry = ListenerSet> {
    state: LayoutState,
    listeners: R,
}

impl<R: ListenerRegistry> ResizeEngine<R> {
    /// Creates an idle engine
    #[must_use]
    pub fn new(settings: &LayoutSettings, listeners: R) -> Self {
        Self {
            state: LayoutState::new(settings),
            listeners,
        }
    }

    /// Current layout state
    #[must_use]
    pub const fn state(&self) -> &LayoutState {
        &self.state
    }

    /// The listener registry
    #[must_use]
    pub const fn listeners(&self) -> &R {
        &self.listeners
    }

    /// Measures the container and applies the startup layout
    pub fn initialize(&mut self, container_width: f64, host: &mut dyn LayoutHost) {
        self.state.measure(container_width);
        tracing::debug!(
            container_width,
            "Layout initialized"
        );
        self.apply(host);
    }

    /// Pointer-down on the splitter.
    ///
    /// Returns `false` if a drag is already in progress; listeners are never
    /// attached twice.
    pub fn start_drag(
        &mut self,
        pointer_x: f64,
        editor_width_px: f64,
        host: &mut dyn LayoutHost,
    ) -> bool {
        if self.state.is_dragging() {
            tracing::debug!("Resize already in progress, ignoring pointer-down");
            return false;
        }

        let origin = DragOrigin {
            start_x: pointer_x,
            start_width: editor_width_px.max(0.0),
        };
        self.state.drag = DragState::Dragging(origin);
        host.set_preview_interactive(false);
        acquire_drag_listeners(&mut self.listeners);

        let span = crate::trace_operation_debug!(span_names::LAYOUT_DRAG);
        let _guard = span.enter();
        tracing::debug!(start_x = origin.start_x, start_width = origin.start_width, "Resize started");
        true
    }

    /// Pointer move during a drag.
    ///
    /// Sets the editor width to the start width plus the pointer delta.
    /// Pointer coordinates can leave the container, so the width is floored
    /// at zero. Returns the new width, or `None` when idle.
    pub fn drag_to(&mut self, pointer_x: f64, host: &mut dyn LayoutHost) -> Option<WidthSpec> {
        let DragState::Dragging(origin) = self.state.drag else {
            return None;
        };

        let delta = pointer_x - origin.start_x;
        let width = WidthSpec::pixels(origin.start_width + delta);
        self.state.editor_width = width;
        self.apply(host);
        Some(width)
    }

    /// Pointer release, from mouse or touch.
    ///
    /// Returns `false` if no drag was in progress. Listener teardown runs
    /// either way and is idempotent.
    pub fn end_drag(&mut self, host: &mut dyn LayoutHost) -> bool {
        release_drag_listeners(&mut self.listeners);
        if !self.state.is_dragging() {
            return false;
        }

        self.state.drag = DragState::Idle;
        host.set_preview_interactive(true);
        host.relayout_editors();
        tracing::debug!(width = %self.state.editor_width, "Resize finished");
        true
    }

    /// Shows or hides the preview.
    ///
    /// Hiding gives the editor the full width; showing resets the split to
    /// the default, discarding any dragged width. Returns the new visibility.
    pub fn toggle_preview(&mut self, host: &mut dyn LayoutHost) -> bool {
        self.state.preview_visible = !self.state.preview_visible;
        self.state.editor_width = if self.state.preview_visible {
            self.state.default_width
        } else {
            WidthSpec::FULL
        };
        host.set_panel_visibility(self.state.editor_visible, self.state.preview_visible);
        self.apply(host);
        self.state.preview_visible
    }

    /// Shows or hides the editor panel. Returns the new visibility.
    pub fn toggle_editor(&mut self, host: &mut dyn LayoutHost) -> bool {
        self.state.editor_visible = !self.state.editor_visible;
        host.set_panel_visibility(self.state.editor_visible, self.state.preview_visible);
        host.relayout_editors();
        self.state.editor_visible
    }

    /// Viewport size change.
    ///
    /// Re-measures the container and relayouts the editors; the stored
    /// width specification is left alone.
    pub fn viewport_resized(&mut self, container_width: f64, host: &mut dyn LayoutHost) {
        self.state.measure(container_width);
        host.relayout_editors();
    }

    fn apply(&self, host: &mut dyn LayoutHost) {
        let editor = self.state.editor_width;
        host.apply_widths(&editor, &editor.preview_width());
        host.relayout_editors();
    }
}

impl<R: ListenerRegistry> Drop for ResizeEngine<R> {
    fn drop(&mut self) {
        if self.state.is_dragging() {
            tracing::debug!("Resize engine dropped mid-drag, releasing listeners");
            release_drag_listeners(&mut self.listeners);
        }
    }
}
