//! In-memory document used by tests and the inspector binary.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use themecore::types::MessageAttrs;

use super::{ContactPane, MessageListView, MutationRecord, StyleTarget};
use crate::error::DomError;

#[derive(Debug, Clone)]
pub struct MemoryMessage {
    pub id: String,
    pub attrs: MessageAttrs,
    pub content_height: Option<f64>,
    pub class_name: String,
    pub avatar_height: Option<String>,
    pub has_avatar: bool,
}

impl MemoryMessage {
    pub fn new(id: impl Into<String>, attrs: MessageAttrs) -> Self {
        Self {
            id: id.into(),
            attrs,
            content_height: None,
            class_name: "ml-item".to_string(),
            avatar_height: None,
            has_avatar: true,
        }
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.content_height = Some(height);
        self
    }
}

/// Message list kept in host order, with counters for DOM traffic.
#[derive(Debug, Default)]
pub struct MemoryMessageList {
    messages: RefCell<Vec<MemoryMessage>>,
    private_chat: Cell<bool>,
    attr_reads: Cell<usize>,
    class_writes: Cell<usize>,
}

impl MemoryMessageList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn private() -> Self {
        let list = Self::default();
        list.private_chat.set(true);
        list
    }

    /// Append nodes at the end, returning the record the observer would see.
    pub fn append(&self, messages: impl IntoIterator<Item = MemoryMessage>) -> MutationRecord {
        let mut list = self.messages.borrow_mut();
        let before = list.len();
        list.extend(messages);
        MutationRecord::added(list.len() - before)
    }

    /// Insert nodes at the front, as the host does when older history loads.
    pub fn prepend(&self, messages: impl IntoIterator<Item = MemoryMessage>) -> MutationRecord {
        let mut list = self.messages.borrow_mut();
        let incoming: Vec<MemoryMessage> = messages.into_iter().collect();
        let count = incoming.len();
        list.splice(0..0, incoming);
        MutationRecord::added(count)
    }

    pub fn remove(&self, id: &str) -> MutationRecord {
        let mut list = self.messages.borrow_mut();
        let before = list.len();
        list.retain(|m| m.id != id);
        MutationRecord::removed(before - list.len())
    }

    pub fn set_private_chat(&self, private: bool) {
        self.private_chat.set(private);
    }

    pub fn set_content_height(&self, id: &str, height: Option<f64>) {
        if let Some(m) = self.messages.borrow_mut().iter_mut().find(|m| m.id == id) {
            m.content_height = height;
        }
    }

    pub fn get(&self, id: &str) -> Option<MemoryMessage> {
        self.messages.borrow().iter().find(|m| m.id == id).cloned()
    }

    /// Class names in host order.
    pub fn classes(&self) -> Vec<String> {
        self.messages
            .borrow()
            .iter()
            .map(|m| m.class_name.clone())
            .collect()
    }

    pub fn avatar_heights(&self) -> Vec<Option<String>> {
        self.messages
            .borrow()
            .iter()
            .map(|m| m.avatar_height.clone())
            .collect()
    }

    pub fn attr_reads(&self) -> usize {
        self.attr_reads.get()
    }

    pub fn class_writes(&self) -> usize {
        self.class_writes.get()
    }

    fn with_node<T>(
        &self,
        id: &str,
        f: impl FnOnce(&mut MemoryMessage) -> Result<T, DomError>,
    ) -> Result<T, DomError> {
        let mut list = self.messages.borrow_mut();
        let node = list
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| DomError::NodeMissing(id.to_string()))?;
        f(node)
    }
}

impl MessageListView for MemoryMessageList {
    fn message_ids(&self) -> Vec<String> {
        self.messages.borrow().iter().map(|m| m.id.clone()).collect()
    }

    fn read_attrs(&self, id: &str) -> Result<MessageAttrs, DomError> {
        self.attr_reads.set(self.attr_reads.get() + 1);
        self.with_node(id, |m| Ok(m.attrs.clone()))
    }

    fn content_height(&self, id: &str) -> Option<f64> {
        self.messages
            .borrow()
            .iter()
            .find(|m| m.id == id)
            .and_then(|m| m.content_height)
    }

    fn class_name(&self, id: &str) -> Result<String, DomError> {
        self.with_node(id, |m| Ok(m.class_name.clone()))
    }

    fn set_class_name(&self, id: &str, class_name: &str) -> Result<(), DomError> {
        self.with_node(id, |m| {
            m.class_name = class_name.to_string();
            Ok(())
        })?;
        self.class_writes.set(self.class_writes.get() + 1);
        Ok(())
    }

    fn set_avatar_height(&self, id: &str, height: &str) -> Result<(), DomError> {
        self.with_node(id, |m| {
            if !m.has_avatar {
                return Err(DomError::AvatarMissing(m.id.clone()));
            }
            m.avatar_height = Some(height.to_string());
            Ok(())
        })
    }

    fn is_private_chat(&self) -> bool {
        self.private_chat.get()
    }
}

/// Inline style of a single element.
#[derive(Debug, Default)]
pub struct MemoryStyle {
    properties: RefCell<BTreeMap<String, String>>,
}

impl MemoryStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.properties.borrow().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.properties.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.borrow().is_empty()
    }
}

impl StyleTarget for MemoryStyle {
    fn set_property(&self, name: &str, value: &str) {
        self.properties
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }
}

#[derive(Debug)]
pub struct MemoryPane {
    pub style: MemoryStyle,
    width: RefCell<String>,
    flex_basis: RefCell<String>,
    main_visible: Cell<bool>,
    has_handle: Cell<bool>,
    handle_replacements: Cell<usize>,
}

impl MemoryPane {
    pub fn new(main_visible: bool) -> Self {
        Self {
            style: MemoryStyle::new(),
            width: RefCell::new(String::new()),
            flex_basis: RefCell::new(String::new()),
            main_visible: Cell::new(main_visible),
            has_handle: Cell::new(true),
            handle_replacements: Cell::new(0),
        }
    }

    pub fn width(&self) -> String {
        self.width.borrow().clone()
    }

    pub fn flex_basis(&self) -> String {
        self.flex_basis.borrow().clone()
    }

    pub fn set_main_visible(&self, visible: bool) {
        self.main_visible.set(visible);
    }

    pub fn set_has_handle(&self, present: bool) {
        self.has_handle.set(present);
    }

    pub fn handle_replacements(&self) -> usize {
        self.handle_replacements.get()
    }
}

impl StyleTarget for MemoryPane {
    fn set_property(&self, name: &str, value: &str) {
        self.style.set_property(name, value);
    }
}

impl ContactPane for MemoryPane {
    fn set_width(&self, value: &str) {
        *self.width.borrow_mut() = value.to_string();
    }

    fn set_flex_basis(&self, value: &str) {
        *self.flex_basis.borrow_mut() = value.to_string();
    }

    fn computed_width(&self) -> Option<f64> {
        self.width.borrow().strip_suffix("px")?.parse().ok()
    }

    fn is_main_visible(&self) -> bool {
        self.main_visible.get()
    }

    fn replace_resize_handle(&self) -> bool {
        if !self.has_handle.get() {
            return false;
        }
        self.handle_replacements
            .set(self.handle_replacements.get() + 1);
        true
    }
}
