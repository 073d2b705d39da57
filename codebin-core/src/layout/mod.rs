//! Editor/preview split layout
//!
//! # Module Structure
//!
//! - `width` - Editor width specification and the derived preview width
//! - `listeners` - Drag-scoped pointer listener registry
//! - `resize` - The resize state machine (`ResizeEngine`)

mod listeners;
mod resize;
mod width;

pub use listeners::{ListenerRegistry, ListenerSet, PointerListener};
pub use resize::{DragOrigin, DragState, LayoutHost, LayoutState, ResizeEngine};
pub use width::{ParseWidthError, PreviewWidth, WidthSpec};
