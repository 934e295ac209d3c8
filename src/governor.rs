//! Heap-pressure governor.
//!
//! The station pools are the only meaningful heap consumers, so shedding
//! them is how the system survives on a small heap. Dormant stations go
//! first; the active pool is only cut when memory gets critical.

use crate::config::Config;
use crate::devices::SwarmPools;

const DORMANT_SHED_FRACTION: f32 = 0.30;
const ACTIVE_SHED_FRACTION: f32 = 0.15;

#[derive(Debug, Default)]
pub struct ResourceGovernor {
    pub low_memory: bool,
    pub learning_paused: bool,
    /// Stations shed over the process lifetime, for the dashboard.
    pub total_shed: u64,
}

impl ResourceGovernor {
    pub fn new() -> ResourceGovernor {
        ResourceGovernor::default()
    }

    /// Inspect the free-heap figure and shed pool entries as needed. Runs
    /// opportunistically from the scheduler loop; cheap when memory is fine.
    pub fn tick(&mut self, free_heap: u32, config: &Config, pools: &mut SwarmPools) {
        if free_heap < config.heap_low_watermark {
            self.low_memory = true;
            self.total_shed += pools.shed_dormant(DORMANT_SHED_FRACTION) as u64;

            if free_heap < config.heap_critical_watermark {
                self.total_shed += pools.shed_active(ACTIVE_SHED_FRACTION) as u64;
                self.learning_paused = true;
            }
        } else {
            self.low_memory = false;
            self.learning_paused = false;
        }
    }
}
