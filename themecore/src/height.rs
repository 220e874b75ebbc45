//! Avatar float height for grouped incoming messages.
//!
//! Only the last message of a group of incoming bubbles gets an explicit
//! avatar height; it has to span every bubble of the group so the avatar
//! floats alongside the whole stack.

use crate::types::{GroupPosition, Polarity, Shape};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightParams {
    /// Gap between two bubbles of a group.
    pub spacing: f64,
    /// Added once per group.
    pub offset: f64,
}

impl Default for HeightParams {
    fn default() -> Self {
        Self {
            spacing: 3.0,
            offset: 20.0,
        }
    }
}

/// Single left-to-right pass over the classified messages.
///
/// `heights[i]` is the rendered content height of message `i`, or `None` when
/// it could not be measured; unmeasured messages add nothing to their group.
pub fn accumulate(
    positions: &[GroupPosition],
    heights: &[Option<f64>],
    params: HeightParams,
) -> Vec<Option<f64>> {
    let mut out = vec![None; positions.len()];
    let mut sum = 0.0;

    for (i, position) in positions.iter().enumerate() {
        if position.polarity != Polarity::Others || position.shape == Shape::Single {
            continue;
        }
        if position.shape == Shape::Head {
            sum = 0.0;
        }
        if let Some(h) = heights.get(i).copied().flatten() {
            sum += h + params.spacing;
        }
        if position.shape == Shape::Tail {
            out[i] = Some(sum + params.offset);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::classify;
    use crate::types::MessageAttrs;

    #[test]
    fn only_tail_receives_height() {
        let msgs = [
            MessageAttrs::new("A", true),
            MessageAttrs::new("B", false),
            MessageAttrs::new("B", false),
            MessageAttrs::new("B", false),
        ];
        let positions = classify(&msgs);
        let heights = [Some(40.0), Some(10.0), Some(20.0), Some(30.0)];
        let out = accumulate(&positions, &heights, HeightParams::default());

        assert_eq!(out, vec![None, None, None, Some(10.0 + 20.0 + 30.0 + 9.0 + 20.0)]);
    }

    #[test]
    fn resets_at_each_head() {
        let msgs = [
            MessageAttrs::new("B", false),
            MessageAttrs::new("B", false),
            MessageAttrs::new("C", false),
            MessageAttrs::new("C", false),
        ];
        let positions = classify(&msgs);
        let heights = [Some(100.0), Some(100.0), Some(1.0), Some(2.0)];
        let params = HeightParams {
            spacing: 0.0,
            offset: 0.0,
        };
        let out = accumulate(&positions, &heights, params);

        assert_eq!(out, vec![None, Some(200.0), None, Some(3.0)]);
    }

    #[test]
    fn singles_and_missing_heights() {
        let msgs = [
            MessageAttrs::new("B", false),
            MessageAttrs::gray(),
            MessageAttrs::new("B", false),
            MessageAttrs::new("B", false),
        ];
        let positions = classify(&msgs);
        let heights = [Some(50.0), Some(50.0), None, Some(5.0)];
        let out = accumulate(&positions, &heights, HeightParams::default());

        assert_eq!(out, vec![None, None, None, Some(5.0 + 3.0 + 20.0)]);
    }
}
