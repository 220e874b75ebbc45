//! Host DOM seams.
//!
//! The plugin never touches the host document directly. Everything it reads
//! or writes goes through these traits, so the same logic runs against the
//! real renderer or the in-memory document in [`memory`].
//!
//! All methods take `&self`: DOM handles are shared, interior-mutable
//! references on the single UI thread.

pub mod memory;

use themecore::types::MessageAttrs;

use crate::error::DomError;

/// The rendered message list container (`#ml-root .ml-list`).
pub trait MessageListView {
    /// Ids of the message nodes currently rendered, in host order.
    fn message_ids(&self) -> Vec<String>;

    /// Query sender/self/gray/timestamp facts for one node.
    fn read_attrs(&self, id: &str) -> Result<MessageAttrs, DomError>;

    /// Layout height of the node's content wrapper, if it is rendered.
    fn content_height(&self, id: &str) -> Option<f64>;

    fn class_name(&self, id: &str) -> Result<String, DomError>;

    fn set_class_name(&self, id: &str, class_name: &str) -> Result<(), DomError>;

    fn set_avatar_height(&self, id: &str, height: &str) -> Result<(), DomError>;

    /// One-on-one chats render no sender names.
    fn is_private_chat(&self) -> bool;
}

/// An element whose inline style can carry CSS custom properties.
pub trait StyleTarget {
    fn set_property(&self, name: &str, value: &str);
}

/// The contact list pane (`.two-col-layout__aside`) and its sibling main pane.
pub trait ContactPane: StyleTarget {
    fn set_width(&self, value: &str);

    fn set_flex_basis(&self, value: &str);

    fn computed_width(&self) -> Option<f64>;

    /// Whether the main (chat) column is displayed next to the pane.
    fn is_main_visible(&self) -> bool;

    /// Swap the host's resize handle for a fresh one without listeners.
    /// Returns false when the handle is not rendered.
    fn replace_resize_handle(&self) -> bool;
}

/// One notification from the host's mutation observer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationRecord {
    pub added_nodes: usize,
    pub removed_nodes: usize,
}

impl MutationRecord {
    pub fn added(count: usize) -> Self {
        Self {
            added_nodes: count,
            removed_nodes: 0,
        }
    }

    pub fn removed(count: usize) -> Self {
        Self {
            added_nodes: 0,
            removed_nodes: count,
        }
    }
}
