//! Passive capture filters.
//!
//! Both filters run inside the driver's RX context. The contract there is
//! strict: fixed-size records, one `try_send` into a bounded channel, and
//! nothing else. Pool and store mutation happens on the main task when the
//! queues are drained.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender};

use libchaff::parsers::{peek_probe_ssid, peek_vendor_action};

use crate::radio::{RxCallback, RxPacketType};

pub const SSID_QUEUE_DEPTH: usize = 20;
pub const MESH_QUEUE_DEPTH: usize = 5;

/// The vendor OUI carried by cooperating mesh action frames. Only this OUI
/// is ever accepted, so unrelated vendor traffic cannot be amplified.
pub const MESH_OUI: [u8; 3] = [0x18, 0xFE, 0x34];
pub const VENDOR_SPECIFIC_CATEGORY: u8 = 127;

const MESH_MIN_FRAME: usize = 40;
const MESH_MAX_FRAME: usize = 1024;

/// A network name lifted from someone else's probe request. Fixed storage;
/// the RX context owns no heap.
#[derive(Clone, Copy)]
pub struct SniffedSsid {
    bytes: [u8; 32],
    len: u8,
}

impl SniffedSsid {
    fn from_slice(slice: &[u8]) -> SniffedSsid {
        let mut bytes = [0u8; 32];
        bytes[..slice.len()].copy_from_slice(slice);
        SniffedSsid {
            bytes,
            len: slice.len() as u8,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes[..usize::from(self.len)]).ok()
    }
}

/// A verbatim copy of an accepted mesh frame.
#[derive(Clone, Copy)]
pub struct MeshFrame {
    bytes: [u8; MESH_MAX_FRAME],
    len: u16,
}

impl MeshFrame {
    fn from_slice(slice: &[u8]) -> MeshFrame {
        let mut bytes = [0u8; MESH_MAX_FRAME];
        bytes[..slice.len()].copy_from_slice(slice);
        MeshFrame {
            bytes,
            len: slice.len() as u16,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }
}

pub struct SnifferQueues {
    pub ssid_rx: Receiver<SniffedSsid>,
    pub mesh_rx: Receiver<MeshFrame>,
    ssid_tx: SyncSender<SniffedSsid>,
    mesh_tx: SyncSender<MeshFrame>,
}

impl SnifferQueues {
    pub fn new() -> SnifferQueues {
        let (ssid_tx, ssid_rx) = sync_channel(SSID_QUEUE_DEPTH);
        let (mesh_tx, mesh_rx) = sync_channel(MESH_QUEUE_DEPTH);
        SnifferQueues {
            ssid_rx,
            mesh_rx,
            ssid_tx,
            mesh_tx,
        }
    }

    /// The probe-learning filter: management frames with subtype Probe
    /// Request whose leading SSID element holds a usable name. Everything
    /// else is dropped on the spot.
    pub fn probe_filter(&self) -> RxCallback {
        let queue = self.ssid_tx.clone();
        Box::new(move |frame: &[u8], packet_type: RxPacketType| {
            if packet_type != RxPacketType::Mgmt {
                return;
            }
            let Some(ssid) = peek_probe_ssid(frame) else {
                return;
            };
            if ssid.len() <= 1 || ssid.len() >= 32 {
                return;
            }
            // Queue full means we are learning faster than we can absorb;
            // losing a record is fine.
            queue.try_send(SniffedSsid::from_slice(ssid)).ok();
        })
    }

    /// The mesh filter: vendor-specific action frames carrying the
    /// cooperating OUI, size-bounded, copied whole.
    pub fn mesh_filter(&self) -> RxCallback {
        let queue = self.mesh_tx.clone();
        Box::new(move |frame: &[u8], packet_type: RxPacketType| {
            if packet_type != RxPacketType::Mgmt {
                return;
            }
            if frame.len() < MESH_MIN_FRAME || frame.len() > MESH_MAX_FRAME {
                return;
            }
            let Some(view) = peek_vendor_action(frame) else {
                return;
            };
            if view.category != VENDOR_SPECIFIC_CATEGORY || view.oui != MESH_OUI {
                return;
            }
            queue.try_send(MeshFrame::from_slice(frame)).ok();
        })
    }
}

impl Default for SnifferQueues {
    fn default() -> Self {
        SnifferQueues::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe_frame(ssid: &[u8]) -> Vec<u8> {
        let mut frame = vec![0x40, 0x00, 0x00, 0x00];
        frame.extend([0xFF; 6]);
        frame.extend([0x02, 0x33, 0x44, 0x55, 0x66, 0x77]);
        frame.extend([0xFF; 6]);
        frame.extend([0x10, 0x00]);
        frame.push(0x00);
        frame.push(ssid.len() as u8);
        frame.extend_from_slice(ssid);
        frame
    }

    fn mesh_frame(oui: [u8; 3], padding: usize) -> Vec<u8> {
        let mut frame = vec![0xD0, 0x00, 0x00, 0x00];
        frame.extend([0xFF; 6]);
        frame.extend([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        frame.extend([0xFF; 6]);
        frame.extend([0x00, 0x00]);
        frame.push(VENDOR_SPECIFIC_CATEGORY);
        frame.extend(oui);
        frame.extend(std::iter::repeat(0x42).take(padding));
        frame
    }

    #[test]
    fn test_probe_filter_learns() {
        let queues = SnifferQueues::new();
        let mut filter = queues.probe_filter();

        filter(&probe_frame(b"CoffeeHaus"), RxPacketType::Mgmt);
        let learned = queues.ssid_rx.try_recv().expect("a record");
        assert_eq!(learned.as_str(), Some("CoffeeHaus"));
    }

    #[test]
    fn test_probe_filter_rejects_junk() {
        let queues = SnifferQueues::new();
        let mut filter = queues.probe_filter();

        // Wrong subtype.
        let mut beacon = probe_frame(b"CoffeeHaus");
        beacon[0] = 0x80;
        filter(&beacon, RxPacketType::Mgmt);
        // Wrong driver classification.
        filter(&probe_frame(b"CoffeeHaus"), RxPacketType::Data);
        // One-character and oversize names carry no replication value.
        filter(&probe_frame(b"x"), RxPacketType::Mgmt);
        filter(&probe_frame(&[b'y'; 32]), RxPacketType::Mgmt);
        // Wildcard.
        filter(&probe_frame(b""), RxPacketType::Mgmt);

        assert!(queues.ssid_rx.try_recv().is_err());
    }

    #[test]
    fn test_probe_queue_drops_on_full() {
        let queues = SnifferQueues::new();
        let mut filter = queues.probe_filter();

        for index in 0..SSID_QUEUE_DEPTH + 10 {
            let name = format!("net{index:02}");
            filter(&probe_frame(name.as_bytes()), RxPacketType::Mgmt);
        }

        let mut drained = 0;
        while queues.ssid_rx.try_recv().is_ok() {
            drained += 1;
        }
        assert_eq!(drained, SSID_QUEUE_DEPTH);
    }

    #[test]
    fn test_mesh_filter_accepts_only_cooperating_oui() {
        let queues = SnifferQueues::new();
        let mut filter = queues.mesh_filter();

        filter(&mesh_frame(MESH_OUI, 30), RxPacketType::Mgmt);
        filter(&mesh_frame([0x00, 0x17, 0xF2], 30), RxPacketType::Mgmt);

        let accepted = queues.mesh_rx.try_recv().expect("one mesh frame");
        assert_eq!(accepted.as_bytes()[25..28], MESH_OUI);
        assert!(queues.mesh_rx.try_recv().is_err());
    }

    #[test]
    fn test_mesh_filter_bounds_length() {
        let queues = SnifferQueues::new();
        let mut filter = queues.mesh_filter();

        // 28 header+category+oui bytes plus 5 is under the 40-byte floor.
        filter(&mesh_frame(MESH_OUI, 5), RxPacketType::Mgmt);
        filter(&mesh_frame(MESH_OUI, 1200), RxPacketType::Mgmt);
        assert!(queues.mesh_rx.try_recv().is_err());
    }
}
