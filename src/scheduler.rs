//! The cooperative scheduler.
//!
//! One task owns everything: pools, stores, caches, metrics and TX. Each
//! `run_iteration` drains the sniffer queues, lets the governor look at the
//! heap, services the mesh listen cycle, churns the population when due,
//! and runs a channel dwell when due. The RX filters are the only code that
//! runs anywhere else.

use std::thread;
use std::time::{Duration, Instant};

use libchaff::frame::components::MacAddress;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{Config, CHANNELS_2G, CHANNELS_5G, MAX_TX_POWER};
use crate::devices::{DeviceGeneration, SwarmPools};
use crate::governor::ResourceGovernor;
use crate::mesh::{ListenState, MeshRelay};
use crate::radio::RadioDriver;
use crate::sniffer::SnifferQueues;
use crate::ssid::SsidStore;
use crate::status::{MessageLog, MessageType, StatusMessage, TrafficMetrics};
use crate::synth::{self, Band};

pub struct SwarmRuntime {
    pub config: Config,
    pub rng: StdRng,
    pub radio: Box<dyn RadioDriver>,
    pub pools: SwarmPools,
    pub ssids: SsidStore,
    pub governor: ResourceGovernor,
    pub mesh: MeshRelay,
    pub queues: SnifferQueues,
    pub metrics: TrafficMetrics,
    pub status_log: MessageLog,
    pub local_mac: MacAddress,
    pub paused: bool,

    current_channel: u8,
    band: Band,
    idx_2g: usize,
    idx_5g: usize,
    next_hop_is_5g: bool,
    next_hop_ms: u64,
    next_lifecycle_ms: u64,
    clock: Instant,
}

impl SwarmRuntime {
    pub fn new(config: Config, radio: Box<dyn RadioDriver>, seed: u64, headless: bool) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let ssids = SsidStore::new(&config);
        let pools = SwarmPools::new(&config);
        let local_mac = MacAddress::random_private(&mut rng);
        let mesh = MeshRelay::new(local_mac, &config);

        SwarmRuntime {
            rng,
            radio,
            pools,
            ssids,
            governor: ResourceGovernor::new(),
            mesh,
            queues: SnifferQueues::new(),
            metrics: TrafficMetrics::default(),
            status_log: MessageLog::new(headless, None),
            local_mac,
            paused: false,
            current_channel: CHANNELS_2G[0],
            band: Band::Band2Ghz,
            idx_2g: 0,
            idx_5g: 0,
            next_hop_is_5g: true,
            next_hop_ms: 0,
            next_lifecycle_ms: 0,
            clock: Instant::now(),
            config,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.elapsed().as_millis() as u64
    }

    pub fn current_channel(&self) -> u8 {
        self.current_channel
    }

    pub fn band(&self) -> Band {
        self.band
    }

    /// Bring the radio up and fill the initial population.
    pub fn start(&mut self, mut free_heap: impl FnMut() -> u32) {
        self.status_log.add_message(StatusMessage::new(
            MessageType::Info,
            format!("Local station address {}", self.local_mac),
        ));

        if self.config.features.passive_scan {
            self.radio.set_promiscuous(true);
            let filter = self.queues.probe_filter();
            self.radio.set_promiscuous_rx_cb(Some(filter));
            self.status_log.add_message(StatusMessage::new(
                MessageType::Info,
                "Promiscuous capture enabled, probe filter installed".to_string(),
            ));
        }

        self.radio.set_max_tx_power(crate::config::POWER_LEVELS[4]);

        self.pools
            .populate(&mut self.rng, &self.config, &self.ssids, &mut free_heap);
        self.status_log.add_message(StatusMessage::new(
            MessageType::Status,
            format!(
                "Population online: {} active, {} seed SSIDs",
                self.pools.active.len(),
                self.ssids.len()
            ),
        ));
    }

    /// One pass of the main loop. `free_heap` is whatever the platform
    /// reports; the governor takes it at face value.
    pub fn run_iteration(&mut self, free_heap: u32) {
        let now_ms = self.now_ms();

        self.drain_learned_ssids(now_ms);
        self.governor
            .tick(free_heap, &self.config, &mut self.pools);
        if self.config.features.mesh_relay {
            self.mesh_tick(now_ms);
        }
        self.lifecycle_tick(now_ms);

        if self.paused || self.listening() {
            return;
        }
        self.channel_hop_tick(now_ms);
    }

    pub fn listening(&self) -> bool {
        matches!(self.mesh.state, ListenState::Listening { .. })
    }

    fn drain_learned_ssids(&mut self, now_ms: u64) {
        while let Ok(record) = self.queues.ssid_rx.try_recv() {
            if !self.config.features.ssid_replication || self.governor.learning_paused {
                continue;
            }
            let Some(name) = record.as_str() else {
                continue;
            };
            if self.ssids.offer(name, &mut self.rng, now_ms) {
                self.status_log.add_message(StatusMessage::new(
                    MessageType::Priority,
                    format!("Learned SSID \"{name}\""),
                ));
            }
        }
    }

    /// Service the mesh listen cycle: open a window when a check is due,
    /// absorb whatever the filter queued, and put the radio back afterward.
    fn mesh_tick(&mut self, now_ms: u64) {
        while let Ok(frame) = self.queues.mesh_rx.try_recv() {
            self.mesh.observe(&frame, now_ms);
        }

        if self.listening() {
            if self.mesh.listen_expired(now_ms) {
                let filter = if self.config.features.passive_scan {
                    Some(self.queues.probe_filter())
                } else {
                    None
                };
                self.radio.set_promiscuous_rx_cb(filter);
                self.radio.set_channel(self.current_channel).ok();
                self.mesh.end_listen(now_ms, &self.config);
            }
        } else if self.mesh.check_due(now_ms) {
            let filter = self.queues.mesh_filter();
            self.radio.set_promiscuous_rx_cb(Some(filter));
            self.radio.set_channel(self.config.mesh_channel).ok();
            self.mesh.begin_listen(now_ms, &self.config);
        }

        self.mesh.decay(now_ms, &self.config);
    }

    pub fn lifecycle_tick(&mut self, now_ms: u64) {
        if !self.config.features.lifecycle_sim || now_ms < self.next_lifecycle_ms {
            return;
        }
        self.next_lifecycle_ms = now_ms
            + self
                .rng
                .gen_range(self.config.min_lifecycle_ms..self.config.max_lifecycle_ms);

        let rotations = self.rng.gen_range(3..8);
        for _ in 0..rotations {
            self.pools.rotate_once(
                &mut self.rng,
                &self.config,
                &self.ssids,
                self.governor.low_memory,
            );
        }
    }

    fn channel_hop_tick(&mut self, now_ms: u64) {
        if now_ms < self.next_hop_ms {
            return;
        }
        self.next_hop_ms = now_ms
            + self
                .rng
                .gen_range(self.config.min_channel_hop_ms..self.config.max_channel_hop_ms);

        if self.config.dual_band && self.next_hop_is_5g {
            self.band = Band::Band5Ghz;
            self.current_channel = CHANNELS_5G[self.idx_5g];
            self.idx_5g = (self.idx_5g + 1) % CHANNELS_5G.len();
            self.next_hop_is_5g = false;
        } else {
            self.band = Band::Band2Ghz;
            self.current_channel = CHANNELS_2G[self.idx_2g];
            self.idx_2g = (self.idx_2g + 1) % CHANNELS_2G.len();
            self.next_hop_is_5g = true;
        }

        // A refused channel just shortens this dwell; the hop plan moves on.
        if self.radio.set_channel(self.current_channel).is_err() {
            return;
        }

        let packets = self
            .rng
            .gen_range(self.config.min_packets_per_hop..self.config.max_packets_per_hop);
        for _ in 0..packets {
            self.transmit_slot();
        }
    }

    /// One packet slot inside a dwell.
    fn transmit_slot(&mut self) {
        if self.config.features.mesh_relay
            && self.band == Band::Band2Ghz
            && self.current_channel == self.config.mesh_channel
            && self.rng.gen_range(0..100) < 5
        {
            if let Some(frame) = self.mesh.pick_rebroadcast(&mut self.rng) {
                self.radio.set_max_tx_power(MAX_TX_POWER);
                if self.radio.tx_80211(frame).is_ok() {
                    self.metrics.total_packets += 1;
                    self.metrics.packets_2g += 1;
                    self.metrics.mesh_rebroadcasts += 1;
                }
            }
        }

        if !self.pools.active.is_empty() {
            let idx = self.rng.gen_range(0..self.pools.active.len());
            let device = self.pools.active[idx];

            // Era enforcement: WiFi 4 silicon does not exist on 5 GHz.
            if self.band == Band::Band5Ghz && device.generation == DeviceGeneration::Legacy {
                return;
            }

            self.radio.set_max_tx_power(device.tx_power);

            let wants_interaction = self.config.features.interaction_sim
                && self.rng.gen_range(0..100) < 2
                && device
                    .preferred_ssid
                    .and_then(|index| self.ssids.get(index))
                    .is_some();

            if wants_interaction {
                self.run_interaction(idx);
            } else {
                let frame = synth::build_probe_request(
                    &mut self.rng,
                    &device,
                    &self.ssids,
                    self.current_channel,
                    self.band,
                );
                if self.radio.tx_80211(&frame).is_ok() {
                    self.count_packet();
                }
                let step = if self.config.features.sequence_gaps && self.rng.gen_range(0..100) < 20
                {
                    self.rng.gen_range(2..8)
                } else {
                    1
                };
                self.pools.active[idx].bump_sequence(step);
            }
        }

        self.maybe_beacon();
        let micros = self.rng.gen_range(1500..5000);
        self.fill_silence(Duration::from_micros(micros));
    }

    /// The full fake handshake: authentication, association request, then a
    /// burst of cipher noise, each step separated by junk traffic. Nothing
    /// ever answers, and nothing needs to.
    pub fn run_interaction(&mut self, idx: usize) -> bool {
        let mut device = self.pools.active[idx];
        let Some(ssid) = device
            .preferred_ssid
            .and_then(|index| self.ssids.get(index))
            .map(str::to_string)
        else {
            return false;
        };
        device.has_connected = true;

        self.radio.set_max_tx_power(device.tx_power);
        let auth = synth::build_authentication(&device);
        if self.radio.tx_80211(&auth).is_ok() {
            self.count_packet();
        }
        device.bump_sequence(1);
        let pause = self.rng.gen_range(7..20);
        self.fill_silence(Duration::from_millis(pause));

        let assoc = synth::build_association_request(&device, &ssid, self.band);
        if self.radio.tx_80211(&assoc).is_ok() {
            self.count_packet();
        }
        device.bump_sequence(1);
        let pause = self.rng.gen_range(22..50);
        self.fill_silence(Duration::from_millis(pause));

        let bursts = self.rng.gen_range(3..12);
        for _ in 0..bursts {
            let data = synth::build_encrypted_data(&mut self.rng, &device);
            if self.radio.tx_80211(&data).is_ok() {
                self.count_packet();
            }
            device.bump_sequence(1);
            let pause = self.rng.gen_range(4..10);
            self.fill_silence(Duration::from_millis(pause));
        }

        self.pools.active[idx] = device;
        self.metrics.interactions += 1;
        true
    }

    fn maybe_beacon(&mut self) {
        if !self.config.features.beacon_emulation || self.ssids.is_empty() {
            return;
        }
        // Routers get chattier once the store is saturated with local names.
        let chance = if self.ssids.at_capacity() { 5 } else { 2 };
        if self.rng.gen_range(0..100) >= chance {
            return;
        }

        let index = self.ssids.random_index(&mut self.rng);
        let Some(ssid) = self.ssids.get(index).map(str::to_string) else {
            return;
        };
        let ap_mac = MacAddress([
            0x02,
            0x11,
            0x22,
            self.rng.gen(),
            self.rng.gen(),
            self.rng.gen(),
        ]);
        let sequence = self.rng.gen_range(0..4096);
        let frame = synth::build_beacon(ap_mac, &ssid, self.current_channel, self.band, sequence);

        self.radio.set_max_tx_power(MAX_TX_POWER);
        if self.radio.tx_80211(&frame).is_ok() {
            self.count_packet();
            self.metrics.beacons += 1;
        }
    }

    /// Airtime between deliberate packets is stuffed with throwaway probes
    /// at a lowered power floor, so the deliberate traffic never stands out
    /// as a rhythm.
    fn fill_silence(&mut self, duration: Duration) {
        let noise_power = 68 + self.rng.gen_range(0..6i8);
        self.radio.set_max_tx_power(noise_power);

        let started = Instant::now();
        while started.elapsed() < duration {
            let frame = synth::build_noise_probe(&mut self.rng, self.band);
            if self.radio.tx_80211(&frame).is_ok() {
                self.metrics.total_packets += 1;
                self.metrics.junk_packets += 1;
            }
            // Give the core away between junk frames; on real drivers the
            // TX path itself paces this loop.
            thread::sleep(Duration::from_micros(200));
        }
    }

    fn count_packet(&mut self) {
        self.metrics.total_packets += 1;
        match self.band {
            Band::Band2Ghz => self.metrics.packets_2g += 1,
            Band::Band5Ghz => self.metrics.packets_5g += 1,
        }
    }
}
