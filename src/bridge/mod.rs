//! The host settings bridge: an asynchronous key/value round trip to the
//! host's main process.

pub mod memory;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use themecore::settings::Settings;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::error::BridgeError;

/// Pushed by the host when settings change outside this window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsEvent {
    /// One CSS variable changed.
    Updated { key: String, value: String },
    /// The whole theme was switched; every variable may have changed.
    ThemeChanged,
}

#[async_trait(?Send)]
pub trait SettingsBridge {
    async fn get_setting(&self) -> Result<Settings, BridgeError>;

    async fn set_setting(&self, key: &str, value: &str) -> Result<(), BridgeError>;

    /// Open the host's image picker. The result reaches the plugin as a
    /// [`SettingsEvent`], not as a return value.
    fn choose_image(&self);

    fn subscribe(&self) -> broadcast::Receiver<SettingsEvent>;
}

/// Fetch all settings, treating any bridge failure as "nothing available".
pub async fn fetch_settings(bridge: &dyn SettingsBridge) -> Option<Settings> {
    match bridge.get_setting().await {
        Ok(settings) => Some(settings),
        Err(e) => {
            error!(target: "Theme/Bridge", "getSetting failed: {e}");
            None
        }
    }
}

/// Coalesces rapid writes of the same key (a slider drag, typing) into one
/// bridge call issued after the input settles.
///
/// Must be used from within a `LocalSet`.
pub struct DebouncedSetter {
    bridge: Rc<dyn SettingsBridge>,
    delay: Duration,
    pending: RefCell<HashMap<String, JoinHandle<()>>>,
}

impl DebouncedSetter {
    pub fn new(bridge: Rc<dyn SettingsBridge>, delay: Duration) -> Self {
        Self {
            bridge,
            delay,
            pending: RefCell::new(HashMap::new()),
        }
    }

    pub fn set(&self, key: &str, value: &str) {
        let mut pending = self.pending.borrow_mut();
        pending.retain(|_, task| !task.is_finished());
        if let Some(previous) = pending.remove(key) {
            previous.abort();
        }

        let bridge = self.bridge.clone();
        let delay = self.delay;
        let (key, value) = (key.to_string(), value.to_string());
        let task_key = key.clone();
        let task = tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            debug!(target: "Theme/Bridge", "setSetting {key} = {value}");
            if let Err(e) = bridge.set_setting(&key, &value).await {
                error!(target: "Theme/Bridge", "setSetting {key} failed: {e}");
            }
        });
        pending.insert(task_key, task);
    }

    /// Keys with a write still waiting for its delay.
    pub fn pending_keys(&self) -> Vec<String> {
        self.pending
            .borrow()
            .iter()
            .filter(|(_, task)| !task.is_finished())
            .map(|(key, _)| key.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryBridge;
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn rapid_writes_to_one_key_coalesce() {
        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                let bridge = Rc::new(MemoryBridge::new(Settings::default()));
                let setter = DebouncedSetter::new(bridge.clone(), Duration::from_millis(100));

                for pct in ["10", "20", "30"] {
                    setter.set("--opacity", pct);
                    tokio::time::sleep(Duration::from_millis(30)).await;
                }
                setter.set("--font", "serif");
                assert!(bridge.writes().is_empty());

                tokio::time::sleep(Duration::from_millis(150)).await;
                let mut writes = bridge.writes();
                writes.sort();
                assert_eq!(
                    writes,
                    vec![
                        ("--font".to_string(), "serif".to_string()),
                        ("--opacity".to_string(), "30".to_string()),
                    ]
                );
                assert!(setter.pending_keys().is_empty());
            })
            .await;
    }

    #[tokio::test]
    async fn fetch_failure_yields_none() {
        let bridge = MemoryBridge::failing();
        assert!(fetch_settings(&bridge).await.is_none());
    }
}
