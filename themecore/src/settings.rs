//! Theme settings as served by the host settings bridge.
//!
//! The host returns a JSON object keyed by CSS variable name. Key order is
//! meaningful (it is the order items appear in the settings panel), so the
//! mapping is kept as an ordered list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SettingKind {
    Color,
    Text,
    Button,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingEntry {
    pub value: String,
    pub title: String,
    pub description: String,
    pub default_value: String,
    #[serde(rename = "type")]
    pub kind: SettingKind,
    pub group: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Settings {
    entries: Vec<(String, SettingEntry)>,
}

impl Settings {
    pub fn from_json(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(map) = value else {
            return Err(Error::NotAMapping);
        };
        let mut entries = Vec::with_capacity(map.len());
        for (key, raw) in map {
            let entry: SettingEntry = serde_json::from_value(raw)?;
            entries.push((key, entry));
        }
        Ok(Self { entries })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SettingEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, key: &str) -> Option<&SettingEntry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Update a value in place, appending a bare entry for unknown keys.
    pub fn set_value(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, entry)) => entry.value = value,
            None => self.entries.push((
                key.to_string(),
                SettingEntry {
                    value,
                    ..Default::default()
                },
            )),
        }
    }

    /// CSS variables to apply: every entry with a non-empty value.
    pub fn css_variables(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter()
            .filter(|(_, e)| !e.value.is_empty())
            .map(|(k, e)| (k, e.value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Sections of the settings panel, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingGroup {
    Wallpaper,
    OwnMessages,
    OthersMessages,
    ContactList,
    Sidebar,
    Other,
}

impl SettingGroup {
    pub const ALL: [SettingGroup; 6] = [
        Self::Wallpaper,
        Self::OwnMessages,
        Self::OthersMessages,
        Self::ContactList,
        Self::Sidebar,
        Self::Other,
    ];

    /// Title the host uses to tag entries with this group.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Wallpaper => "壁纸设定",
            Self::OwnMessages => "自己的消息",
            Self::OthersMessages => "他人的消息",
            Self::ContactList => "会话列表",
            Self::Sidebar => "侧边栏",
            Self::Other => "其他设定",
        }
    }

    pub fn from_title(title: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.title() == title)
    }
}
