use std::collections::BTreeMap;

use crate::config::CategoryConfig;

#[derive(Debug, Clone, Copy)]
struct Pool {
    capacity: u32,
    busy: u32,
}

/// Per-category machine capacity and busy counts.
///
/// `busy <= capacity` holds for every category after every call.
#[derive(Debug, Clone, Default)]
pub struct MachinePool {
    pools: BTreeMap<String, Pool>,
}

impl MachinePool {
    pub fn from_categories(categories: &[CategoryConfig]) -> Self {
        let pools = categories
            .iter()
            .map(|c| (c.item.clone(), Pool { capacity: c.machines, busy: 0 }))
            .collect();
        Self { pools }
    }

    /// Claim a machine; `false` if the category is full or unknown.
    pub fn try_acquire(&mut self, item: &str) -> bool {
        match self.pools.get_mut(item) {
            Some(p) if p.busy < p.capacity => {
                p.busy += 1;
                true
            }
            _ => false,
        }
    }

    pub fn release(&mut self, item: &str) {
        match self.pools.get_mut(item) {
            Some(p) if p.busy > 0 => p.busy -= 1,
            _ => tracing::warn!(item, "machine release without a matching acquire"),
        }
    }

    pub fn busy(&self, item: &str) -> u32 {
        self.pools.get(item).map_or(0, |p| p.busy)
    }

    pub fn capacity(&self, item: &str) -> u32 {
        self.pools.get(item).map_or(0, |p| p.capacity)
    }

    pub fn total_busy(&self) -> u32 {
        self.pools.values().map(|p| p.busy).sum()
    }

    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.pools.keys().map(String::as_str)
    }
}
