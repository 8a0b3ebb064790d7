//! Tool Registry - the source of truth for which tools exist.
//!
//! The registry maps tool ids to descriptors. Registration replaces any
//! previous descriptor with the same id (last write wins): catalogs are
//! registered in a fixed order and a later catalog may deliberately override
//! an earlier tool. A replaced tool keeps its original listing position, so
//! `list()` stays in first-registration order.
//!
//! Reads vastly outnumber writes, so the map sits behind a read-write lock;
//! late registration is safe while executions are in flight.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info};

use super::descriptor::ToolDescriptor;

#[derive(Default)]
struct Entries {
    order: Vec<Arc<ToolDescriptor>>,
    index: HashMap<String, usize>,
}

/// Registry of all available tools.
#[derive(Default)]
pub struct ToolRegistry {
    entries: RwLock<Entries>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the descriptor registered under `descriptor.id`.
    ///
    /// Returns the replaced descriptor, if any. Replacement is not an error.
    pub fn register(&self, descriptor: ToolDescriptor) -> Option<Arc<ToolDescriptor>> {
        let descriptor = Arc::new(descriptor);
        let mut entries = self.entries.write();

        match entries.index.get(&descriptor.id).copied() {
            Some(slot) => {
                info!("Replacing tool: {}", descriptor.id);
                Some(std::mem::replace(&mut entries.order[slot], descriptor))
            }
            None => {
                debug!("Registering tool: {}", descriptor.id);
                let slot = entries.order.len();
                entries.index.insert(descriptor.id.clone(), slot);
                entries.order.push(descriptor);
                None
            }
        }
    }

    /// Register every descriptor in order.
    pub fn register_all<I>(&self, descriptors: I)
    where
        I: IntoIterator<Item = ToolDescriptor>,
    {
        for descriptor in descriptors {
            self.register(descriptor);
        }
    }

    /// All registered descriptors, in first-registration order.
    pub fn list(&self) -> Vec<Arc<ToolDescriptor>> {
        self.entries.read().order.clone()
    }

    /// The descriptor registered under `id`, if any.
    pub fn get(&self, id: &str) -> Option<Arc<ToolDescriptor>> {
        let entries = self.entries.read();
        entries
            .index
            .get(id)
            .map(|&slot| entries.order[slot].clone())
    }

    /// Whether a tool with this id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.read().index.contains_key(id)
    }

    /// All registered tool ids, in listing order.
    pub fn tool_ids(&self) -> Vec<String> {
        self.entries
            .read()
            .order
            .iter()
            .map(|d| d.id.clone())
            .collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.entries.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
