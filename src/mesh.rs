//! Cooperating-mesh relay.
//!
//! Other units of the same deployment announce themselves with vendor
//! action frames on a fixed channel. We periodically tune over, cache what
//! we hear, and later rebroadcast it verbatim so the mesh's reach grows
//! with every participating radio. Everything decays: an abandoned site
//! goes quiet again within the timeout.

use libchaff::frame::components::MacAddress;

use crate::config::Config;
use crate::sniffer::MeshFrame;

pub const MESH_CACHE_CAPACITY: usize = 40;

struct CacheEntry {
    payload: Vec<u8>,
    last_seen_ms: u64,
}

struct SenderRecord {
    mac: MacAddress,
    last_seen_ms: u64,
}

/// Where the relay currently is in its listen cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenState {
    /// On the hopping plan; next check is scheduled.
    Idle,
    /// Tuned to the mesh channel with the mesh filter installed.
    Listening { until_ms: u64 },
}

pub struct MeshRelay {
    cache: Vec<CacheEntry>,
    senders: Vec<SenderRecord>,
    pub detected: bool,
    pub state: ListenState,
    next_check_ms: u64,
    last_packet_ms: u64,
    local_mac: MacAddress,
}

impl MeshRelay {
    pub fn new(local_mac: MacAddress, config: &Config) -> MeshRelay {
        MeshRelay {
            cache: Vec::new(),
            senders: Vec::new(),
            detected: false,
            state: ListenState::Idle,
            next_check_ms: config.mesh_standby_interval_ms,
            last_packet_ms: 0,
            local_mac,
        }
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn sender_count(&self) -> usize {
        self.senders.len()
    }

    pub fn check_due(&self, now_ms: u64) -> bool {
        self.state == ListenState::Idle && now_ms >= self.next_check_ms
    }

    /// Open a listen window. The caller has already swapped the RX filter
    /// and tuned the radio.
    pub fn begin_listen(&mut self, now_ms: u64, config: &Config) {
        self.state = ListenState::Listening {
            until_ms: now_ms + config.mesh_check_duration_ms,
        };
    }

    pub fn listen_expired(&self, now_ms: u64) -> bool {
        matches!(self.state, ListenState::Listening { until_ms } if now_ms >= until_ms)
    }

    /// Close the window and schedule the next check. Re-checks come fast
    /// while nothing is heard and slow once a mesh is known to be around.
    pub fn end_listen(&mut self, now_ms: u64, config: &Config) {
        self.state = ListenState::Idle;
        self.next_check_ms = now_ms
            + if self.detected {
                config.mesh_active_interval_ms
            } else {
                config.mesh_standby_interval_ms
            };
    }

    /// Absorb one frame drained from the mesh queue. Our own transmissions
    /// come back to us on air; those are dropped before they can loop.
    pub fn observe(&mut self, frame: &MeshFrame, now_ms: u64) {
        let bytes = frame.as_bytes();
        let Some(transmitter) = bytes.get(10..16) else {
            return;
        };
        if transmitter == self.local_mac.0 {
            return;
        }

        let mac = MacAddress([
            transmitter[0],
            transmitter[1],
            transmitter[2],
            transmitter[3],
            transmitter[4],
            transmitter[5],
        ]);
        match self.senders.iter_mut().find(|record| record.mac == mac) {
            Some(record) => record.last_seen_ms = now_ms,
            None => self.senders.push(SenderRecord {
                mac,
                last_seen_ms: now_ms,
            }),
        }

        // Exact byte equality is the dedup key; a repeat only refreshes.
        match self
            .cache
            .iter_mut()
            .find(|entry| entry.payload == bytes)
        {
            Some(entry) => entry.last_seen_ms = now_ms,
            None => {
                if self.cache.len() >= MESH_CACHE_CAPACITY {
                    self.cache.remove(0);
                }
                self.cache.push(CacheEntry {
                    payload: bytes.to_vec(),
                    last_seen_ms: now_ms,
                });
            }
        }

        self.detected = true;
        self.last_packet_ms = now_ms;
    }

    /// A random cached frame for rebroadcast, verbatim.
    pub fn pick_rebroadcast(&self, rng: &mut impl rand::Rng) -> Option<&[u8]> {
        if self.cache.is_empty() {
            return None;
        }
        let index = rng.gen_range(0..self.cache.len());
        Some(&self.cache[index].payload)
    }

    /// Forget what has gone stale: senders beyond their window, cache
    /// entries beyond the decay timeout, and the detection flag itself when
    /// the mesh has stopped talking.
    pub fn decay(&mut self, now_ms: u64, config: &Config) {
        if self.detected
            && now_ms.saturating_sub(self.last_packet_ms) > config.mesh_decay_timeout_ms
        {
            self.detected = false;
            self.cache.clear();
        }

        let sender_window = config.mesh_sender_window_ms;
        self.senders
            .retain(|record| now_ms.saturating_sub(record.last_seen_ms) <= sender_window);
        let decay_timeout = config.mesh_decay_timeout_ms;
        self.cache
            .retain(|entry| now_ms.saturating_sub(entry.last_seen_ms) <= decay_timeout);
    }

    pub fn has_sender(&self, mac: &MacAddress) -> bool {
        self.senders.iter().any(|record| record.mac == *mac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio::RxPacketType;
    use crate::sniffer::{SnifferQueues, MESH_OUI, VENDOR_SPECIFIC_CATEGORY};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mesh_bytes(transmitter: [u8; 6], tag: u8) -> Vec<u8> {
        let mut frame = vec![0xD0, 0x00, 0x00, 0x00];
        frame.extend([0xFF; 6]);
        frame.extend(transmitter);
        frame.extend([0xFF; 6]);
        frame.extend([0x00, 0x00]);
        frame.push(VENDOR_SPECIFIC_CATEGORY);
        frame.extend(MESH_OUI);
        frame.extend([tag; 20]);
        frame
    }

    fn capture(bytes: &[u8]) -> MeshFrame {
        let queues = SnifferQueues::new();
        let mut filter = queues.mesh_filter();
        filter(bytes, RxPacketType::Mgmt);
        queues.mesh_rx.try_recv().expect("filter should accept")
    }

    fn relay() -> (MeshRelay, Config) {
        let config = Config::default();
        let local = MacAddress([0x02, 0x01, 0x02, 0x03, 0x04, 0x05]);
        (MeshRelay::new(local, &config), config)
    }

    #[test]
    fn test_observe_detects_and_caches() {
        let (mut relay, _) = relay();
        relay.observe(&capture(&mesh_bytes([0xAA; 6], 1)), 1000);

        assert!(relay.detected);
        assert_eq!(relay.cache_len(), 1);
        assert!(relay.has_sender(&MacAddress([0xAA; 6])));
    }

    #[test]
    fn test_self_echo_suppression() {
        let (mut relay, _) = relay();
        relay.observe(
            &capture(&mesh_bytes([0x02, 0x01, 0x02, 0x03, 0x04, 0x05], 1)),
            1000,
        );

        assert!(!relay.detected);
        assert_eq!(relay.cache_len(), 0);
        assert_eq!(relay.sender_count(), 0);
    }

    #[test]
    fn test_duplicate_refreshes_instead_of_growing() {
        let (mut relay, config) = relay();
        let frame = capture(&mesh_bytes([0xAA; 6], 7));
        relay.observe(&frame, 1000);
        relay.observe(&frame, 500_000);

        assert_eq!(relay.cache_len(), 1);
        // The refreshed timestamp keeps it alive past the original decay
        // horizon.
        relay.decay(700_000, &config);
        assert_eq!(relay.cache_len(), 1);
    }

    #[test]
    fn test_cache_capacity_is_bounded() {
        let (mut relay, _) = relay();
        for tag in 0..60u8 {
            relay.observe(&capture(&mesh_bytes([0xAA; 6], tag)), 1000);
        }
        assert_eq!(relay.cache_len(), MESH_CACHE_CAPACITY);
    }

    #[test]
    fn test_detection_decays() {
        let (mut relay, config) = relay();
        relay.observe(&capture(&mesh_bytes([0xAA; 6], 1)), 1000);

        relay.decay(1000 + config.mesh_decay_timeout_ms, &config);
        assert!(relay.detected);

        relay.decay(1001 + config.mesh_decay_timeout_ms, &config);
        assert!(!relay.detected);
        assert_eq!(relay.cache_len(), 0);
    }

    #[test]
    fn test_sender_window_pruning() {
        let (mut relay, config) = relay();
        relay.observe(&capture(&mesh_bytes([0xAA; 6], 1)), 1000);
        relay.observe(&capture(&mesh_bytes([0xBB; 6], 2)), 200_000);

        relay.decay(320_000, &config);
        assert!(!relay.has_sender(&MacAddress([0xAA; 6])));
        assert!(relay.has_sender(&MacAddress([0xBB; 6])));
    }

    #[test]
    fn test_listen_cycle_intervals() {
        let (mut relay, config) = relay();

        assert!(relay.check_due(config.mesh_standby_interval_ms));
        relay.begin_listen(20_000, &config);
        assert!(!relay.check_due(20_000));
        assert!(relay.listen_expired(20_000 + config.mesh_check_duration_ms));

        // Nothing heard: the next check comes at the standby cadence.
        relay.end_listen(20_100, &config);
        assert!(relay.check_due(20_100 + config.mesh_standby_interval_ms));

        // Once detected, checks back off to the active cadence.
        relay.observe(&capture(&mesh_bytes([0xAA; 6], 1)), 20_100);
        relay.begin_listen(40_000, &config);
        relay.end_listen(40_100, &config);
        assert!(!relay.check_due(40_100 + config.mesh_standby_interval_ms));
        assert!(relay.check_due(40_100 + config.mesh_active_interval_ms));
    }

    #[test]
    fn test_rebroadcast_pick() {
        let (mut relay, _) = relay();
        let mut rng = StdRng::seed_from_u64(5);
        assert!(relay.pick_rebroadcast(&mut rng).is_none());

        let original = mesh_bytes([0xAA; 6], 9);
        relay.observe(&capture(&original), 1000);
        assert_eq!(relay.pick_rebroadcast(&mut rng).unwrap(), &original[..]);
    }
}
