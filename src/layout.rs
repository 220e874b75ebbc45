//! Contact list pane sizing and drag-to-resize.

use std::cell::Cell;
use std::rc::Rc;

use log::debug;
use themecore::layout::{AsideStyle, ResizeDrag, aside_override};

use crate::dom::ContactPane;

pub fn apply_aside_style(pane: &dyn ContactPane, style: &AsideStyle) {
    for (name, value) in &style.properties {
        pane.set_property(name, value);
    }
    pane.set_width(&style.width);
    if let Some(basis) = &style.flex_basis {
        pane.set_flex_basis(basis);
    }
}

/// Replaces the host's resize behavior for the aside pane.
pub struct ContactResizer {
    pane: Rc<dyn ContactPane>,
    drag: Cell<Option<ResizeDrag>>,
}

impl ContactResizer {
    /// Only the main window has a contact pane.
    pub fn applies_to(route_hash: &str) -> bool {
        route_hash.contains("#/main")
    }

    pub fn attach(pane: Rc<dyn ContactPane>) -> Self {
        let resizer = Self {
            pane,
            drag: Cell::new(None),
        };
        resizer.refresh();
        resizer
    }

    /// Swap the resize handle and re-apply the width override. Called on
    /// attach and after every window resize, since the host re-renders the
    /// pane on resize.
    pub fn refresh(&self) {
        if !self.pane.replace_resize_handle() {
            debug!(target: "Theme/Layout", "Resize handle not rendered, keeping host handle");
        }
        self.drag.set(None);
        apply_aside_style(self.pane.as_ref(), &aside_override(self.pane.is_main_visible()));
    }

    pub fn on_mouse_down(&self, client_x: f64) {
        let Some(start_width) = self.pane.computed_width() else {
            return;
        };
        self.drag.set(Some(ResizeDrag {
            start_x: client_x,
            start_width,
        }));
    }

    /// Returns whether the pane was resized.
    pub fn on_mouse_move(&self, client_x: f64) -> bool {
        let Some(drag) = self.drag.get() else {
            return false;
        };
        apply_aside_style(self.pane.as_ref(), &drag.style_at(client_x));
        true
    }

    pub fn on_mouse_up(&self) {
        self.drag.set(None);
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.get().is_some()
    }
}
