//! Priority-ordered filter pipeline.

use std::collections::BTreeMap;

use strata_store::Resource;

use crate::filter::Filter;

/// Priority assigned by [`FilterPipeline::add_filter`].
pub const DEFAULT_PRIORITY: u32 = 50;

/// An ordered list of filters, applied in ascending priority order.
///
/// Each filter whose kind scope matches the resource sees the previous
/// filter's output. Filters at an occupied priority probe forward to the
/// next free slot, so insertion order breaks ties.
#[derive(Default)]
pub struct FilterPipeline {
    filters: BTreeMap<u32, Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter at the default priority (probing forward on collision).
    pub fn add_filter(&mut self, filter: Box<dyn Filter>) {
        self.add_filter_with_priority(filter, DEFAULT_PRIORITY);
    }

    /// Adds a filter at the given priority, probing forward (`+1, +2, …`)
    /// until a free slot is found.
    pub fn add_filter_with_priority(&mut self, filter: Box<dyn Filter>, priority: u32) {
        let mut slot = priority;
        while self.filters.contains_key(&slot) {
            slot += 1;
        }
        self.filters.insert(slot, filter);
    }

    /// Number of registered filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns whether no filters are registered.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Effective `(priority, name)` pairs in application order.
    pub fn entries(&self) -> Vec<(u32, &str)> {
        self.filters
            .iter()
            .map(|(p, f)| (*p, f.name()))
            .collect()
    }

    /// Runs every filter matching the resource's kind, in priority order,
    /// replacing the content buffer with each filter's output.
    ///
    /// A resource with no content, or of a kind no filter claims, passes
    /// through unchanged.
    pub fn apply(&self, resource: &mut Resource) {
        for filter in self.filters.values() {
            if !filter.applies_to(resource.kind()) {
                continue;
            }
            if let Some(content) = resource.content() {
                let filtered = filter.apply(content);
                resource.set_content(filtered);
            }
        }
    }
}
