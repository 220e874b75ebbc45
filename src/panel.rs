//! Settings panel model.
//!
//! Items are built from the host settings and grouped into the fixed panel
//! sections. Every edit is mirrored to open chat windows at once and written
//! back to the host after the input settles.

use log::warn;
use themecore::color::{ThemeColor, hex_for_opacity};
use themecore::settings::{SettingEntry, SettingGroup, SettingKind, Settings};

use crate::bridge::{DebouncedSetter, SettingsBridge};
use crate::channel::{StyleChannel, StyleEdit};

/// Where panel edits go.
pub struct EditSink {
    channel: StyleChannel,
    setter: DebouncedSetter,
}

impl EditSink {
    pub fn new(channel: StyleChannel, setter: DebouncedSetter) -> Self {
        Self { channel, setter }
    }

    pub fn publish(&self, key: &str, value: &str) {
        self.channel.publish(StyleEdit::new(key, value));
        self.setter.set(key, value);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColorPickerItem {
    pub key: String,
    pub title: String,
    pub description: String,
    color: ThemeColor,
    opacity: f64,
    default_color: ThemeColor,
}

impl ColorPickerItem {
    /// Never fails: an empty or malformed `value` falls back to the default
    /// and vice versa, and to opaque black when neither parses.
    pub fn from_entry(key: &str, entry: &SettingEntry) -> Self {
        let value = ThemeColor::parse(&entry.value).ok();
        let default = ThemeColor::parse(&entry.default_value).ok();
        if value.is_none() || default.is_none() {
            warn!(
                target: "Theme/Panel",
                "Color item {key} has value {:?} and default {:?}, filling in",
                entry.value, entry.default_value
            );
        }
        let color = value
            .clone()
            .or_else(|| default.clone())
            .unwrap_or_else(ThemeColor::black);
        let default_color = default.or(value).unwrap_or_else(ThemeColor::black);
        Self {
            key: key.to_string(),
            title: entry.title.clone(),
            description: entry.description.clone(),
            opacity: color.opacity_percent(),
            color,
            default_color,
        }
    }

    /// `#rrggbb` shown in the color input.
    pub fn rgb(&self) -> &str {
        self.color.rgb()
    }

    /// 0..=100 shown on the opacity slider.
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn value(&self) -> String {
        format!("{}{}", self.color.rgb(), hex_for_opacity(self.opacity))
    }

    /// `--opacity-0` and `--opacity-100` for the slider track.
    pub fn opacity_track(&self) -> [(&'static str, String); 2] {
        [
            ("--opacity-0", self.color.transparent()),
            ("--opacity-100", self.color.opaque()),
        ]
    }

    pub fn on_color_input(&mut self, rgb: &str, sink: &EditSink) -> themecore::Result<()> {
        self.color = ThemeColor::parse(rgb)?;
        sink.publish(&self.key, &self.value());
        Ok(())
    }

    pub fn on_opacity_input(&mut self, percent: f64, sink: &EditSink) {
        self.opacity = percent.clamp(0.0, 100.0);
        sink.publish(&self.key, &self.value());
    }

    pub fn reset(&mut self, sink: &EditSink) {
        self.color = self.default_color.clone();
        self.opacity = self.default_color.opacity_percent();
        sink.publish(&self.key, &self.value());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextItem {
    pub key: String,
    pub title: String,
    pub description: String,
    pub value: String,
    pub default_value: String,
}

impl TextItem {
    pub fn from_entry(key: &str, entry: &SettingEntry) -> Self {
        Self {
            key: key.to_string(),
            title: entry.title.clone(),
            description: entry.description.clone(),
            value: entry.value.clone(),
            default_value: entry.default_value.clone(),
        }
    }

    pub fn on_input(&mut self, value: &str, sink: &EditSink) {
        self.value = value.to_string();
        sink.publish(&self.key, value);
    }

    pub fn reset(&mut self, sink: &EditSink) {
        self.value = self.default_value.clone();
        sink.publish(&self.key, &self.value);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageButtonItem {
    pub key: String,
    pub title: String,
    pub description: String,
}

impl ImageButtonItem {
    pub fn on_click(&self, bridge: &dyn SettingsBridge) {
        bridge.choose_image();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingItem {
    Color(ColorPickerItem),
    Text(TextItem),
    ImageButton(ImageButtonItem),
}

impl SettingItem {
    /// `None` for kinds the panel cannot render.
    pub fn from_entry(key: &str, entry: &SettingEntry) -> Option<Self> {
        match entry.kind {
            SettingKind::Color => Some(Self::Color(ColorPickerItem::from_entry(key, entry))),
            SettingKind::Text => Some(Self::Text(TextItem::from_entry(key, entry))),
            SettingKind::Button => Some(Self::ImageButton(ImageButtonItem {
                key: key.to_string(),
                title: entry.title.clone(),
                description: entry.description.clone(),
            })),
            SettingKind::Unknown => None,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::Color(item) => &item.key,
            Self::Text(item) => &item.key,
            Self::ImageButton(item) => &item.key,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingList {
    pub group: SettingGroup,
    pub items: Vec<SettingItem>,
}

impl SettingList {
    pub fn title(&self) -> &'static str {
        self.group.title()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettingsPanel {
    pub lists: Vec<SettingList>,
}

impl SettingsPanel {
    /// One list per section, in section order, even when empty. Entries
    /// tagged with an unknown section are dropped.
    pub fn build(settings: &Settings) -> Self {
        let mut lists: Vec<SettingList> = SettingGroup::ALL
            .into_iter()
            .map(|group| SettingList {
                group,
                items: Vec::new(),
            })
            .collect();

        for (key, entry) in settings.iter() {
            let Some(group) = SettingGroup::from_title(&entry.group) else {
                continue;
            };
            if let Some(item) = SettingItem::from_entry(key, entry) {
                if let Some(list) = lists.iter_mut().find(|l| l.group == group) {
                    list.items.push(item);
                }
            }
        }
        Self { lists }
    }

    pub fn item_mut(&mut self, key: &str) -> Option<&mut SettingItem> {
        self.lists
            .iter_mut()
            .flat_map(|l| l.items.iter_mut())
            .find(|item| item.key() == key)
    }

    pub fn item_count(&self) -> usize {
        self.lists.iter().map(|l| l.items.len()).sum()
    }
}
