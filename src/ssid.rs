//! Seeded and learned network names.
//!
//! The store opens with a fixed set of names every city block has seen, and
//! grows with whatever the sniffer overhears. Seeds are never evicted;
//! learned names cycle once the store is full.

use rand::Rng;

use crate::config::Config;

/// Names common enough that probing for them says nothing about anyone.
pub const SEED_SSIDS: [&str; 30] = [
    "xfinitywifi",
    "Starbucks WiFi",
    "attwifi",
    "Google Starbucks",
    "iPhone",
    "AndroidAP",
    "Guest",
    "linksys",
    "netgear",
    "Free Public WiFi",
    "T-Mobile",
    "Home",
    "Office",
    "Spectrum",
    "optimumwifi",
    "CoxWiFi",
    "Lowe's Wi-Fi",
    "Target Guest Wi-Fi",
    "McDonalds Free WiFi",
    "BURGER KING FREE WIFI",
    "Subway WiFi",
    "PaneraBread_WiFi",
    "Airport_Free_WiFi",
    "Marriott_Guest",
    "Hilton_Honors",
    "Walmart_WiFi",
    "DIRECTV_WIFI",
    "HP-Print-B2-LaserJet",
    "Roku-829",
    "Sonos_WiFi",
];

pub struct SsidStore {
    entries: Vec<String>,
    seed_count: usize,
    max_learned: usize,
    learn_interval_ms: u64,
    last_insert_ms: u64,
    learned_total: u64,
    last_learned: Option<String>,
}

impl SsidStore {
    pub fn new(config: &Config) -> SsidStore {
        SsidStore {
            entries: SEED_SSIDS.iter().map(|ssid| ssid.to_string()).collect(),
            seed_count: SEED_SSIDS.len(),
            max_learned: config.max_ssids_to_learn,
            learn_interval_ms: config.ssid_learn_interval_ms,
            last_insert_ms: 0,
            learned_total: 0,
            last_learned: None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn learned_count(&self) -> usize {
        self.entries.len() - self.seed_count
    }

    pub fn learned_total(&self) -> u64 {
        self.learned_total
    }

    pub fn last_learned(&self) -> Option<&str> {
        self.last_learned.as_deref()
    }

    pub fn at_capacity(&self) -> bool {
        self.learned_count() >= self.max_learned
    }

    pub fn contains(&self, ssid: &str) -> bool {
        self.entries.iter().any(|entry| entry == ssid)
    }

    /// Indexed access. Callers holding an index across replacements treat
    /// `None` and a changed name the same way: no preference.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn random_index(&self, rng: &mut impl Rng) -> usize {
        rng.gen_range(0..self.entries.len())
    }

    /// Try to take a learned name into the store. Below the cap it appends;
    /// at the cap a random non-seed slot is recycled, at most once per
    /// learn interval. Empty and oversized names are silently rejected.
    pub fn offer(&mut self, ssid: &str, rng: &mut impl Rng, now_ms: u64) -> bool {
        if ssid.is_empty() || ssid.len() > 32 {
            return false;
        }
        if self.contains(ssid) {
            return false;
        }

        if !self.at_capacity() {
            self.entries.push(ssid.to_string());
        } else {
            if now_ms.saturating_sub(self.last_insert_ms) < self.learn_interval_ms {
                return false;
            }
            let slot = rng.gen_range(self.seed_count..self.entries.len());
            self.entries[slot] = ssid.to_string();
        }

        self.last_insert_ms = now_ms;
        self.learned_total += 1;
        self.last_learned = Some(ssid.to_string());
        true
    }
}
