//! Wiring of the theme into host windows.

use std::future::Future;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, info};
use tokio::task::JoinHandle;

use crate::bridge::{DebouncedSetter, SettingsBridge, fetch_settings};
use crate::channel::StyleChannel;
use crate::config::ThemeConfig;
use crate::dom::{MessageListView, StyleTarget};
use crate::error::{Result, ThemeError};
use crate::panel::{EditSink, SettingsPanel};
use crate::recompute::{RecomputePass, SharedAttrCache, new_attr_cache};
use crate::scheduler::FrameScheduler;
use crate::style;
use crate::watcher::MutationWatcher;

pub const RENDERER_PATH: &str = "/renderer/index.html";
pub const THEME_STYLESHEET: &str = "src/style/telegram.css";
pub const SETTINGS_STYLESHEET: &str = "src/style/telegram-setting.css";

/// Which host window a renderer page is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Not yet navigated; the real route arrives with the first navigation.
    Blank,
    /// Main window or a standalone chat window.
    Chat,
    Other,
}

impl Route {
    pub fn parse(pathname: &str, hash: &str) -> Self {
        if pathname != RENDERER_PATH {
            return Self::Other;
        }
        if hash == "#/blank" {
            Self::Blank
        } else if hash.contains("#/main") || hash.contains("#/chat") {
            Self::Chat
        } else {
            Self::Other
        }
    }
}

pub struct ThemePlugin {
    config: ThemeConfig,
    bridge: Rc<dyn SettingsBridge>,
    channel: StyleChannel,
    cache: SharedAttrCache,
}

impl ThemePlugin {
    pub fn new(config: ThemeConfig, bridge: Rc<dyn SettingsBridge>, channel: StyleChannel) -> Self {
        let cache = new_attr_cache(config.cache_capacity);
        Self {
            config,
            bridge,
            channel,
            cache,
        }
    }

    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }

    pub fn channel(&self) -> &StyleChannel {
        &self.channel
    }

    pub fn cache(&self) -> &SharedAttrCache {
        &self.cache
    }

    /// `local:///` URL of a stylesheet shipped with the plugin.
    pub fn stylesheet_href(&self, relative: &str) -> String {
        let root = self.config.plugin_path.replace('\\', "/");
        format!("local:///{}/{}", root.trim_end_matches('/'), relative)
    }

    /// Start grouping a freshly rendered message list. Keep the returned
    /// watcher alive for as long as the container exists and feed it the
    /// container's mutation records. An initial pass is scheduled at once.
    pub fn attach_message_list<V>(
        &self,
        view: Rc<V>,
        scheduler: Rc<dyn FrameScheduler>,
    ) -> MutationWatcher
    where
        V: MessageListView + 'static,
    {
        let pass = RecomputePass::from_config(&self.config, self.cache.clone());
        let watcher = MutationWatcher::new(scheduler, move || pass.run(view.as_ref()));
        watcher.schedule();
        debug!(target: "Theme/Plugin", "Message list attached");
        watcher
    }

    pub async fn apply_all_settings(&self, body: &dyn StyleTarget) -> Option<usize> {
        style::apply_all(self.bridge.as_ref(), body).await
    }

    /// Keep `body` in sync with host pushes. Must run inside a `LocalSet`.
    pub fn spawn_settings_listener(&self, body: Rc<dyn StyleTarget>) -> JoinHandle<()> {
        let bridge = self.bridge.clone();
        let events = bridge.subscribe();
        tokio::task::spawn_local(async move {
            style::follow_settings(events, bridge.as_ref(), body.as_ref()).await;
        })
    }

    /// Apply edits mirrored from the settings window. `route_hash` reports
    /// the window's current location hash. Must run inside a `LocalSet`.
    pub fn spawn_mirror_listener(
        &self,
        route_hash: impl Fn() -> String + 'static,
        body: Rc<dyn StyleTarget>,
    ) -> JoinHandle<()> {
        let edits = self.channel.subscribe();
        tokio::task::spawn_local(async move {
            style::follow_mirrored_edits(edits, route_hash, body.as_ref()).await;
        })
    }

    pub async fn build_settings_panel(&self) -> Result<SettingsPanel> {
        let settings = fetch_settings(self.bridge.as_ref())
            .await
            .filter(|s| !s.is_empty())
            .ok_or(ThemeError::SettingsUnavailable)?;
        let panel = SettingsPanel::build(&settings);
        info!(target: "Theme/Plugin", "Settings panel built with {} items", panel.item_count());
        Ok(panel)
    }

    /// Sink for panel edits, debounced per the configured delay. Must be used
    /// inside a `LocalSet`.
    pub fn edit_sink(&self) -> EditSink {
        EditSink::new(
            self.channel.clone(),
            DebouncedSetter::new(self.bridge.clone(), self.config.setting_debounce()),
        )
    }

    pub fn bridge(&self) -> &dyn SettingsBridge {
        self.bridge.as_ref()
    }
}

/// Poll `ready` every `interval` until it holds, then run `then`. The first
/// poll happens one interval after the call. The host renders its containers
/// lazily, so the plugin waits for them before attaching.
pub async fn wait_for<T, F>(ready: impl Fn() -> bool, interval: Duration, then: impl FnOnce() -> F) -> T
where
    F: Future<Output = T>,
{
    let mut ticker = tokio::time::interval(interval);
    // The first tick completes immediately
    ticker.tick().await;
    loop {
        ticker.tick().await;
        if ready() {
            return then().await;
        }
    }
}
