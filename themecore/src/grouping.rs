//! Splits an ordered message list into visual groups.
//!
//! A group (run) is a maximal stretch of consecutive messages from the same
//! sender that is not interrupted by a timestamp header or a gray message.
//! Boundaries are expressed as gap markers: for `n` messages there are
//! `n + 1` gaps, and `gaps[i]` is set when a new run starts at message `i`.

use std::ops::Range;

use crate::types::{GroupPosition, MessageAttrs, Shape};

/// Compute the gap markers for `messages`, comparing each message with its predecessor.
pub fn boundaries(messages: &[MessageAttrs]) -> Vec<bool> {
    let n = messages.len();
    let mut gaps = vec![false; n + 1];

    for (i, msg) in messages.iter().enumerate() {
        if msg.is_gray {
            gaps[i] = true;
            gaps[i + 1] = true;
            continue;
        }

        let starts_run = match i.checked_sub(1).map(|p| &messages[p]) {
            None => true,
            Some(prev) => {
                msg.has_timestamp_header
                    || prev.sender_id != msg.sender_id
                    || prev.is_self != msg.is_self
            }
        };
        if starts_run {
            gaps[i] = true;
        }
    }
    gaps[n] = true;
    gaps
}

/// Carve `0..n` into runs according to the gap markers.
pub fn runs(gaps: &[bool]) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut start = 0;
    for (q, &gap) in gaps.iter().enumerate().skip(1) {
        if gap {
            out.push(start..q);
            start = q;
        }
    }
    out
}

/// Assign a group position to every message.
pub fn classify(messages: &[MessageAttrs]) -> Vec<GroupPosition> {
    let gaps = boundaries(messages);
    let mut positions = Vec::with_capacity(messages.len());

    for run in runs(&gaps) {
        let (head, tail) = (run.start, run.end - 1);
        // Sender and self-flag never change inside a run.
        let polarity = messages[head].polarity();
        for i in run {
            let shape = if head == tail {
                Shape::Single
            } else if i == head {
                Shape::Head
            } else if i == tail {
                Shape::Tail
            } else {
                Shape::Body
            };
            positions.push(GroupPosition::new(polarity, shape));
        }
    }
    positions
}
