use serde::{Deserialize, Serialize};
use std::fmt;

/// Host builds older than this render the message list bottom-up.
pub const LEGACY_ORDER_BUILD: u32 = 28788;

/// Host message types rendered without bubble chrome (notification, call).
const GRAY_MESSAGE_TYPES: [u32; 2] = [5, 19];

/// Structural facts about a rendered message.
///
/// None of these can change once the message is on screen, which is what
/// makes them safe to cache by message id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAttrs {
    pub sender_id: Option<String>,
    pub is_self: bool,
    pub is_gray: bool,
    pub has_timestamp_header: bool,
}

impl MessageAttrs {
    pub fn new(sender_id: impl Into<String>, is_self: bool) -> Self {
        Self {
            sender_id: Some(sender_id.into()),
            is_self,
            ..Default::default()
        }
    }

    /// A system/notification/call message. Carries no sender.
    pub fn gray() -> Self {
        Self {
            is_gray: true,
            ..Default::default()
        }
    }

    pub fn with_timestamp(mut self) -> Self {
        self.has_timestamp_header = true;
        self
    }

    pub fn is_gray_type(msg_type: u32) -> bool {
        GRAY_MESSAGE_TYPES.contains(&msg_type)
    }

    pub fn polarity(&self) -> Polarity {
        if self.is_self {
            Polarity::Own
        } else {
            Polarity::Others
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Own,
    Others,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Single,
    Head,
    Body,
    Tail,
}

/// Where a message sits inside its visual group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupPosition {
    pub polarity: Polarity,
    pub shape: Shape,
}

impl GroupPosition {
    pub const fn new(polarity: Polarity, shape: Shape) -> Self {
        Self { polarity, shape }
    }

    pub fn as_class(&self) -> &'static str {
        match (self.polarity, self.shape) {
            (Polarity::Own, Shape::Single) => "self-single",
            (Polarity::Own, Shape::Head) => "self-head",
            (Polarity::Own, Shape::Body) => "self-body",
            (Polarity::Own, Shape::Tail) => "self-tail",
            (Polarity::Others, Shape::Single) => "others-single",
            (Polarity::Others, Shape::Head) => "others-head",
            (Polarity::Others, Shape::Body) => "others-body",
            (Polarity::Others, Shape::Tail) => "others-tail",
        }
    }

    /// Part of a multi-message group of incoming messages.
    pub fn is_grouped_other(&self) -> bool {
        self.polarity == Polarity::Others && self.shape != Shape::Single
    }
}

impl fmt::Display for GroupPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_class())
    }
}

/// Order in which the host lists rendered messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MessageOrder {
    #[default]
    Chronological,
    Reversed,
}

impl MessageOrder {
    /// Unknown builds are assumed to be current.
    pub fn for_build(build: Option<u32>) -> Self {
        match build {
            Some(b) if b < LEGACY_ORDER_BUILD => Self::Reversed,
            _ => Self::Chronological,
        }
    }

    /// Puts host-ordered items into chronological order.
    pub fn normalize<T>(&self, mut items: Vec<T>) -> Vec<T> {
        if *self == Self::Reversed {
            items.reverse();
        }
        items
    }
}
