//! Applying theme settings as CSS custom properties on the window body.

use log::{debug, warn};
use themecore::settings::Settings;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::bridge::{SettingsBridge, SettingsEvent, fetch_settings};
use crate::channel::{StyleEdit, mirrors_edits};
use crate::dom::StyleTarget;

/// Write every non-empty setting value. Returns the number written.
pub fn apply_settings(settings: &Settings, target: &dyn StyleTarget) -> usize {
    let mut written = 0;
    for (key, value) in settings.css_variables() {
        target.set_property(key, value);
        written += 1;
    }
    written
}

/// Fetch and apply everything. Skips the update when the bridge has nothing.
pub async fn apply_all(bridge: &dyn SettingsBridge, target: &dyn StyleTarget) -> Option<usize> {
    let settings = fetch_settings(bridge).await?;
    let written = apply_settings(&settings, target);
    debug!(target: "Theme/Style", "Applied {written} CSS variables");
    Some(written)
}

pub async fn handle_settings_event(
    event: SettingsEvent,
    bridge: &dyn SettingsBridge,
    target: &dyn StyleTarget,
) {
    match event {
        SettingsEvent::Updated { key, value } => target.set_property(&key, &value),
        SettingsEvent::ThemeChanged => {
            apply_all(bridge, target).await;
        }
    }
}

/// Follow host pushes until the bridge goes away.
pub async fn follow_settings(
    mut events: broadcast::Receiver<SettingsEvent>,
    bridge: &dyn SettingsBridge,
    target: &dyn StyleTarget,
) {
    loop {
        match events.recv().await {
            Ok(event) => handle_settings_event(event, bridge, target).await,
            Err(RecvError::Lagged(missed)) => {
                warn!(target: "Theme/Style", "Missed {missed} settings events, reloading all");
                apply_all(bridge, target).await;
            }
            Err(RecvError::Closed) => return,
        }
    }
}

/// Apply edits mirrored from the settings window while on a chat route.
pub async fn follow_mirrored_edits(
    mut edits: broadcast::Receiver<StyleEdit>,
    route_hash: impl Fn() -> String,
    target: &dyn StyleTarget,
) {
    loop {
        match edits.recv().await {
            Ok(edit) => {
                if mirrors_edits(&route_hash()) {
                    edit.apply(target);
                }
            }
            Err(RecvError::Lagged(missed)) => {
                warn!(target: "Theme/Style", "Dropped {missed} mirrored edits");
            }
            Err(RecvError::Closed) => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::memory::MemoryBridge;
    use crate::dom::memory::MemoryStyle;

    fn settings() -> Settings {
        Settings::from_json(
            r##"{"--a": {"value": "#111111"}, "--b": {"value": ""}, "--c": {"value": "12px"}}"##,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn apply_all_skips_empty_values() {
        let bridge = MemoryBridge::new(settings());
        let body = MemoryStyle::new();
        assert_eq!(apply_all(&bridge, &body).await, Some(2));
        assert_eq!(body.get("--c").as_deref(), Some("12px"));
        assert_eq!(body.get("--b"), None);
    }

    #[tokio::test]
    async fn unavailable_bridge_leaves_style_untouched() {
        let bridge = MemoryBridge::failing();
        let body = MemoryStyle::new();
        assert_eq!(apply_all(&bridge, &body).await, None);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn theme_change_reapplies_everything() {
        let bridge = MemoryBridge::new(settings());
        let body = MemoryStyle::new();

        handle_settings_event(
            SettingsEvent::Updated {
                key: "--a".into(),
                value: "#222222".into(),
            },
            &bridge,
            &body,
        )
        .await;
        assert_eq!(body.get("--a").as_deref(), Some("#222222"));

        handle_settings_event(SettingsEvent::ThemeChanged, &bridge, &body).await;
        assert_eq!(body.get("--a").as_deref(), Some("#111111"));
    }
}
