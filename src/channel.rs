//! Cross-window mirroring of style edits.
//!
//! The settings window publishes every edit here so open chat windows can
//! apply it immediately instead of waiting for the settings round trip.

use log::trace;
use tokio::sync::broadcast;

use crate::dom::StyleTarget;

const CHANNEL_CAPACITY: usize = 100;

/// Routes whose windows mirror edits.
pub const MIRROR_ROUTES: [&str; 3] = ["#/main/message", "#/main/contact/profile", "#/chat"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEdit {
    pub key: String,
    pub value: String,
}

impl StyleEdit {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn apply(&self, target: &dyn StyleTarget) {
        target.set_property(&self.key, &self.value);
    }
}

#[derive(Debug, Clone)]
pub struct StyleChannel {
    tx: broadcast::Sender<StyleEdit>,
}

impl Default for StyleChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleChannel {
    pub fn new() -> Self {
        Self {
            tx: broadcast::channel(CHANNEL_CAPACITY).0,
        }
    }

    /// Fire-and-forget; an edit with no listening window is dropped.
    pub fn publish(&self, edit: StyleEdit) {
        trace!(target: "Theme/Channel", "Publishing {} = {}", edit.key, edit.value);
        let _ = self.tx.send(edit);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StyleEdit> {
        self.tx.subscribe()
    }
}

pub fn mirrors_edits(hash: &str) -> bool {
    MIRROR_ROUTES.contains(&hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryStyle;

    #[tokio::test]
    async fn subscribers_receive_edits() {
        let channel = StyleChannel::new();
        let mut rx = channel.subscribe();
        channel.publish(StyleEdit::new("--tg-bg", "#000000ff"));

        let edit = rx.recv().await.unwrap();
        let body = MemoryStyle::new();
        edit.apply(&body);
        assert_eq!(body.get("--tg-bg").as_deref(), Some("#000000ff"));
    }

    #[test]
    fn publishing_without_listeners_is_fine() {
        StyleChannel::new().publish(StyleEdit::new("--x", "1"));
    }

    #[test]
    fn mirror_routes() {
        assert!(mirrors_edits("#/chat"));
        assert!(mirrors_edits("#/main/message"));
        assert!(!mirrors_edits("#/setting"));
    }
}
