//! The virtual station population.
//!
//! Every phantom station carries enough state to stay self-consistent over
//! its whole observable lifetime: a hardware era, a sticky transmit power,
//! a monotonic sequence counter, and a BSS it pretends to care about.

use libchaff::frame::components::MacAddress;
use rand::Rng;

use crate::config::{Config, MAX_TX_POWER, MIN_TX_POWER};
use crate::identity;
use crate::ssid::SsidStore;

/// The hardware era a station advertises. Capability elements must never
/// contradict this: a Legacy station advertising VHT is an instant tell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeviceGeneration {
    /// 802.11n (WiFi 4)
    Legacy,
    /// 802.11ac (WiFi 5)
    Common,
    /// 802.11ax (WiFi 6)
    Modern,
}

impl DeviceGeneration {
    pub fn supports_vht(self) -> bool {
        !matches!(self, DeviceGeneration::Legacy)
    }

    pub fn supports_he(self) -> bool {
        matches!(self, DeviceGeneration::Modern)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android,
    Other,
}

/// One simulated station.
#[derive(Clone, Copy, Debug)]
pub struct VirtualDevice {
    pub mac: MacAddress,
    /// The BSS this station directs auth/assoc/data frames at. Fixed for
    /// the station's lifetime.
    pub bssid_target: MacAddress,
    /// 12-bit counter, monotonic modulo 4096.
    pub sequence_number: u16,
    /// Index into the SSID store. May go stale after cap-driven
    /// replacement; consumers treat out-of-range as "no preference".
    pub preferred_ssid: Option<usize>,
    pub generation: DeviceGeneration,
    pub platform: Platform,
    pub has_connected: bool,
    /// Sticky preferred transmit power. A real radio does not re-roll its
    /// power per packet, and neither do we.
    pub tx_power: i8,
}

impl VirtualDevice {
    pub fn bump_sequence(&mut self, step: u16) {
        self.sequence_number = (self.sequence_number + step) % 4096;
    }
}

/// Two-tier station population: `active` stations transmit, `dormant`
/// stations wait off the air and may re-arrive later with believable state.
pub struct SwarmPools {
    pub active: Vec<VirtualDevice>,
    pub dormant: Vec<VirtualDevice>,
}

impl SwarmPools {
    pub fn new(config: &Config) -> SwarmPools {
        SwarmPools {
            active: Vec::with_capacity(config.target_active_pool),
            dormant: Vec::with_capacity(config.target_dormant_pool),
        }
    }

    /// Fill the active pool up to target. `free_heap` is polled between
    /// pushes; population stops early rather than running the device into
    /// the ground.
    pub fn populate(
        &mut self,
        rng: &mut impl Rng,
        config: &Config,
        ssids: &SsidStore,
        mut free_heap: impl FnMut() -> u32,
    ) {
        while self.active.len() < config.target_active_pool {
            let device = identity::generate(rng, &config.identity_mix, ssids.len());
            self.active.push(device);
            if free_heap() < config.heap_low_watermark.saturating_sub(5000) {
                break;
            }
        }
    }

    /// One churn step: a random station leaves the air, and an arrival takes
    /// its place. The arrival is either a dormant station waking up with
    /// perturbed state, or a brand-new identity.
    ///
    /// While the governor holds `low_memory`, departures still happen but
    /// arrivals stop once the active pool is down to the configured floor.
    pub fn rotate_once(
        &mut self,
        rng: &mut impl Rng,
        config: &Config,
        ssids: &SsidStore,
        low_memory: bool,
    ) {
        if !self.active.is_empty() {
            let idx = rng.gen_range(0..self.active.len());
            let leaving = self.active.remove(idx);
            if self.dormant.len() < config.target_dormant_pool && !low_memory {
                self.dormant.push(leaving);
            }
        }

        if low_memory && self.active.len() > config.low_memory_active_floor {
            return;
        }

        let mut arriving = if !self.dormant.is_empty() && rng.gen_range(0..100) < 50 {
            let idx = rng.gen_range(0..self.dormant.len());
            let mut device = self.dormant.remove(idx);

            // A returning station has been elsewhere in the meantime: its
            // counter moved on, its radio may sit slightly differently.
            device.bump_sequence(rng.gen_range(50..500));
            if rng.gen_range(0..100) < 30 {
                device.tx_power += (rng.gen_range(0..3) as i8 - 1) * 2;
            }
            device.has_connected = false;
            device
        } else {
            identity::generate(rng, &config.identity_mix, ssids.len())
        };

        arriving.tx_power = arriving.tx_power.clamp(MIN_TX_POWER, MAX_TX_POWER);
        self.active.push(arriving);
    }

    /// Drop the given fraction of the dormant pool from the front,
    /// returning how many stations were shed.
    pub fn shed_dormant(&mut self, fraction: f32) -> usize {
        let count = (self.dormant.len() as f32 * fraction) as usize;
        self.dormant.drain(0..count);
        count
    }

    /// Drop the given fraction of the active pool from the front.
    pub fn shed_active(&mut self, fraction: f32) -> usize {
        let count = (self.active.len() as f32 * fraction) as usize;
        self.active.drain(0..count);
        count
    }
}
