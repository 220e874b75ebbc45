pub mod message;

pub use message::{GroupPosition, MessageAttrs, MessageOrder, Polarity, Shape};
