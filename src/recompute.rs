//! One end-to-end grouping pass over the rendered message list.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, trace};
use themecore::cache::BoundedRecentCache;
use themecore::grouping::classify;
use themecore::height::{HeightParams, accumulate};
use themecore::layout::px;
use themecore::types::{MessageAttrs, MessageOrder};

use crate::config::ThemeConfig;
use crate::dom::MessageListView;
use crate::error::{DomError, Result};

/// Attribute snapshots shared by every message list the plugin watches.
pub type SharedAttrCache = Rc<RefCell<BoundedRecentCache<MessageAttrs>>>;

pub fn new_attr_cache(capacity: usize) -> SharedAttrCache {
    Rc::new(RefCell::new(BoundedRecentCache::new(capacity)))
}

/// What a pass did, for logging and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    pub messages: usize,
    pub cache_hits: usize,
    pub classes_written: usize,
    pub heights_written: usize,
    /// Nodes that disappeared or lacked an element mid-pass.
    pub skipped: usize,
}

pub struct RecomputePass {
    cache: SharedAttrCache,
    order: MessageOrder,
    params: HeightParams,
}

impl RecomputePass {
    pub fn new(cache: SharedAttrCache, order: MessageOrder, params: HeightParams) -> Self {
        Self {
            cache,
            order,
            params,
        }
    }

    pub fn from_config(config: &ThemeConfig, cache: SharedAttrCache) -> Self {
        Self::new(cache, config.message_order(), config.height_params())
    }

    /// Reads everything first, then writes only what changed.
    pub fn run(&self, view: &dyn MessageListView) -> Result<PassReport> {
        let mut report = PassReport::default();
        let ids = self.order.normalize(view.message_ids());
        if ids.is_empty() {
            return Ok(report);
        }

        let mut live_ids = Vec::with_capacity(ids.len());
        let mut attrs = Vec::with_capacity(ids.len());
        {
            let mut cache = self.cache.borrow_mut();
            for id in ids {
                if let Some(known) = cache.get(&id) {
                    report.cache_hits += 1;
                    attrs.push(known.clone());
                    live_ids.push(id);
                    continue;
                }
                match view.read_attrs(&id) {
                    Ok(fresh) => {
                        cache.set(id.clone(), fresh.clone());
                        attrs.push(fresh);
                        live_ids.push(id);
                    }
                    Err(e) => {
                        debug!(target: "Theme/Pass", "Skipping message: {e}");
                        report.skipped += 1;
                    }
                }
            }
        }
        if live_ids.is_empty() {
            return Err(DomError::ElementMissing("message nodes").into());
        }
        report.messages = live_ids.len();

        let positions = classify(&attrs);

        let heights = if view.is_private_chat() {
            vec![None; positions.len()]
        } else {
            let measured: Vec<Option<f64>> = positions
                .iter()
                .zip(&live_ids)
                .map(|(pos, id)| {
                    if pos.is_grouped_other() {
                        view.content_height(id)
                    } else {
                        None
                    }
                })
                .collect();
            accumulate(&positions, &measured, self.params)
        };

        let current: Vec<Option<String>> =
            live_ids.iter().map(|id| view.class_name(id).ok()).collect();

        for (i, id) in live_ids.iter().enumerate() {
            let Some(existing) = &current[i] else {
                report.skipped += 1;
                continue;
            };
            let wanted = format!("ml-item {}", positions[i]);
            if *existing != wanted {
                match view.set_class_name(id, &wanted) {
                    Ok(()) => report.classes_written += 1,
                    Err(e) => {
                        debug!(target: "Theme/Pass", "Class write skipped: {e}");
                        report.skipped += 1;
                    }
                }
            }

            if let Some(height) = heights[i] {
                match view.set_avatar_height(id, &px(height)) {
                    Ok(()) => report.heights_written += 1,
                    Err(e) => {
                        debug!(target: "Theme/Pass", "Avatar write skipped: {e}");
                        report.skipped += 1;
                    }
                }
            }
        }

        trace!(target: "Theme/Pass", "{report:?}");
        Ok(report)
    }
}
