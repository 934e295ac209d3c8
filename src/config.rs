//! Runtime configuration.
//!
//! Everything the traffic model is allowed to vary lives here with the
//! deployment defaults inline, so a build for different hardware only has to
//! construct a different `Config`.

/// Feature switches. Each one disables a behavior cleanly without leaving a
/// hole in the traffic shape.
#[derive(Clone, Copy, Debug)]
pub struct Features {
    /// Learn nearby SSIDs from observed probe requests.
    pub passive_scan: bool,
    /// Feed learned SSIDs back into generated traffic.
    pub ssid_replication: bool,
    /// Rotate stations through the active/dormant pools.
    pub lifecycle_sim: bool,
    /// Occasionally skip ahead in sequence counters to simulate loss.
    pub sequence_gaps: bool,
    /// Emit fake access-point beacons.
    pub beacon_emulation: bool,
    /// Run full auth/assoc/data interaction sequences.
    pub interaction_sim: bool,
    /// Listen for and rebroadcast cooperating mesh traffic.
    pub mesh_relay: bool,
}

impl Default for Features {
    fn default() -> Features {
        Features {
            passive_scan: true,
            ssid_replication: true,
            lifecycle_sim: true,
            sequence_gaps: true,
            beacon_emulation: true,
            interaction_sim: true,
            mesh_relay: true,
        }
    }
}

/// The share of each identity category in the simulated crowd, in percent.
/// The remainder after the three listed categories is modern generic
/// (Intel/Google/Amazon) silicon.
///
/// These weights are part of the forensic model: they are compared against a
/// single uniform draw, never rolled independently.
#[derive(Clone, Copy, Debug)]
pub struct IdentityMix {
    pub apple: u8,
    pub samsung: u8,
    pub legacy_iot: u8,
}

impl Default for IdentityMix {
    fn default() -> IdentityMix {
        IdentityMix {
            apple: 40,
            samsung: 35,
            legacy_iot: 7,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub features: Features,
    pub identity_mix: IdentityMix,

    /// Soft target for the active pool. The governor may shrink it.
    pub target_active_pool: usize,
    /// Soft target for the dormant pool.
    pub target_dormant_pool: usize,
    /// Active-pool floor the lifecycle respects while memory is tight.
    pub low_memory_active_floor: usize,

    /// Learned SSIDs kept on top of the seed list.
    pub max_ssids_to_learn: usize,
    /// Minimum gap between learned-SSID replacements once the store is full.
    pub ssid_learn_interval_ms: u64,

    /// Packet burst bounds per channel dwell.
    pub min_packets_per_hop: u32,
    pub max_packets_per_hop: u32,
    /// Channel dwell bounds.
    pub min_channel_hop_ms: u64,
    pub max_channel_hop_ms: u64,
    /// Lifecycle tick bounds.
    pub min_lifecycle_ms: u64,
    pub max_lifecycle_ms: u64,

    /// Dual-band hardware interleaves 5 GHz hops; single-band stays on 2.4.
    pub dual_band: bool,

    /// Mesh relay timing.
    pub mesh_channel: u8,
    pub mesh_active_interval_ms: u64,
    pub mesh_standby_interval_ms: u64,
    pub mesh_check_duration_ms: u64,
    pub mesh_decay_timeout_ms: u64,
    pub mesh_sender_window_ms: u64,

    /// Heap watermark the governor starts shedding at, and the critical
    /// watermark below which the active pool is pruned too.
    pub heap_low_watermark: u32,
    pub heap_critical_watermark: u32,
    /// Nominal heap budget used to derive a free figure on hosted builds.
    pub heap_budget: usize,
}

pub const MIN_TX_POWER: i8 = 72;
pub const MAX_TX_POWER: i8 = 82;
/// The sticky per-station transmit powers, quarter-dBm.
pub const POWER_LEVELS: [i8; 6] = [72, 74, 76, 78, 80, 82];

pub const CHANNELS_2G: [u8; 11] = [1, 6, 11, 2, 7, 3, 8, 4, 9, 5, 10];
pub const CHANNELS_5G: [u8; 9] = [36, 149, 40, 153, 44, 157, 48, 161, 165];

impl Default for Config {
    fn default() -> Config {
        Config {
            features: Features::default(),
            identity_mix: IdentityMix::default(),
            target_active_pool: 1500,
            target_dormant_pool: 3000,
            low_memory_active_floor: 800,
            max_ssids_to_learn: 150,
            ssid_learn_interval_ms: 20_000,
            min_packets_per_hop: 20,
            max_packets_per_hop: 45,
            min_channel_hop_ms: 120,
            max_channel_hop_ms: 300,
            min_lifecycle_ms: 2000,
            max_lifecycle_ms: 4000,
            dual_band: true,
            mesh_channel: 1,
            mesh_active_interval_ms: 600_000,
            mesh_standby_interval_ms: 20_000,
            mesh_check_duration_ms: 100,
            mesh_decay_timeout_ms: 600_000,
            mesh_sender_window_ms: 300_000,
            heap_low_watermark: 25_000,
            heap_critical_watermark: 15_000,
            heap_budget: 512 * 1024,
        }
    }
}
