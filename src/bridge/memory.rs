//! Bridge backed by an in-process settings map.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use themecore::settings::Settings;
use tokio::sync::broadcast;

use super::{SettingsBridge, SettingsEvent};
use crate::error::BridgeError;

const EVENT_CAPACITY: usize = 64;

pub struct MemoryBridge {
    settings: RefCell<Settings>,
    writes: RefCell<Vec<(String, String)>>,
    image_requests: Cell<usize>,
    failing: bool,
    events: broadcast::Sender<SettingsEvent>,
}

impl MemoryBridge {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: RefCell::new(settings),
            writes: RefCell::new(Vec::new()),
            image_requests: Cell::new(0),
            failing: false,
            events: broadcast::channel(EVENT_CAPACITY).0,
        }
    }

    /// Every call fails, as when the host preload script is missing.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new(Settings::default())
        }
    }

    /// Simulate a push from the host. Returns the number of live subscribers.
    pub fn emit(&self, event: SettingsEvent) -> usize {
        self.events.send(event).unwrap_or(0)
    }

    /// Replace the stored settings, as a theme switch would.
    pub fn replace(&self, settings: Settings) {
        *self.settings.borrow_mut() = settings;
    }

    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.borrow().clone()
    }

    pub fn image_requests(&self) -> usize {
        self.image_requests.get()
    }
}

#[async_trait(?Send)]
impl SettingsBridge for MemoryBridge {
    async fn get_setting(&self) -> Result<Settings, BridgeError> {
        if self.failing {
            return Err(BridgeError::Unavailable);
        }
        Ok(self.settings.borrow().clone())
    }

    async fn set_setting(&self, key: &str, value: &str) -> Result<(), BridgeError> {
        if self.failing {
            return Err(BridgeError::Unavailable);
        }
        self.settings.borrow_mut().set_value(key, value);
        self.writes
            .borrow_mut()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn choose_image(&self) {
        self.image_requests.set(self.image_requests.get() + 1);
    }

    fn subscribe(&self) -> broadcast::Receiver<SettingsEvent> {
        self.events.subscribe()
    }
}
