//! Weighted identity generation.
//!
//! A phantom crowd only survives inspection if its demographics look like a
//! real one: mostly phones from two vendors, a sliver of old IoT junk, and a
//! mix of modern generic silicon. Identities are drawn against cumulative
//! thresholds from a single uniform roll.

use libchaff::frame::components::MacAddress;
use rand::Rng;

use crate::config::{IdentityMix, POWER_LEVELS};
use crate::devices::{DeviceGeneration, Platform, VirtualDevice};

pub const OUI_APPLE: [[u8; 3]; 15] = [
    [0xFC, 0xFC, 0x48],
    [0xBC, 0xD0, 0x74],
    [0xAC, 0x1F, 0x0F],
    [0xF0, 0xD4, 0x15],
    [0xF0, 0x98, 0x9D],
    [0x34, 0x14, 0x5F],
    [0xDC, 0xA9, 0x04],
    [0x28, 0xCF, 0xE9],
    [0xAC, 0xBC, 0x32],
    [0xE4, 0xCE, 0x8F],
    [0xBC, 0x9F, 0xEF],
    [0x48, 0x4B, 0xAA],
    [0x88, 0x66, 0x5A],
    [0x1C, 0x91, 0x48],
    [0x60, 0xFA, 0xCD],
];

pub const OUI_SAMSUNG: [[u8; 3]; 10] = [
    [0x24, 0xFC, 0xE5],
    [0x8C, 0x96, 0xD4],
    [0x5C, 0xCB, 0x99],
    [0x34, 0x21, 0x09],
    [0x84, 0x25, 0xDB],
    [0x00, 0xE0, 0x64],
    [0x80, 0xEA, 0x96],
    [0x38, 0x01, 0x95],
    [0xB0, 0xC0, 0x90],
    [0xFC, 0xC2, 0xDE],
];

pub const OUI_LEGACY_IOT: [[u8; 3]; 7] = [
    [0x00, 0x14, 0x38],
    [0x00, 0x0D, 0x93],
    [0x00, 0x1F, 0x32],
    [0x00, 0x16, 0x35],
    [0x00, 0x04, 0xBD],
    [0x00, 0x17, 0xE0],
    [0x00, 0x1B, 0x7A],
];

pub const OUI_MODERN_GENERIC: [[u8; 3]; 8] = [
    [0x3C, 0x5C, 0x48],
    [0x8C, 0xF5, 0xA3],
    [0x74, 0xC6, 0x3B],
    [0xFC, 0xA6, 0x67],
    [0xE8, 0x6A, 0x64],
    [0x60, 0x55, 0xF9],
    [0xDC, 0x8C, 0x90],
    [0x40, 0x9F, 0x38],
];

/// The synthetic prefix every phantom BSS target starts with.
pub const BSSID_TARGET_PREFIX: [u8; 3] = [0x00, 0x11, 0x32];

/// Draw a complete station identity.
pub fn generate(rng: &mut impl Rng, mix: &IdentityMix, ssid_count: usize) -> VirtualDevice {
    let roll = rng.gen_range(0..100u32);

    let apple_below = u32::from(mix.apple);
    let samsung_below = apple_below + u32::from(mix.samsung);
    let iot_below = samsung_below + u32::from(mix.legacy_iot);

    let (oui, generation, platform) = if roll < apple_below {
        let generation = if rng.gen_range(0..100) < 20 {
            DeviceGeneration::Modern
        } else {
            DeviceGeneration::Common
        };
        (
            OUI_APPLE[rng.gen_range(0..OUI_APPLE.len())],
            generation,
            Platform::Ios,
        )
    } else if roll < samsung_below {
        let generation = if rng.gen_range(0..100) < 30 {
            DeviceGeneration::Modern
        } else {
            DeviceGeneration::Common
        };
        (
            OUI_SAMSUNG[rng.gen_range(0..OUI_SAMSUNG.len())],
            generation,
            Platform::Android,
        )
    } else if roll < iot_below {
        (
            OUI_LEGACY_IOT[rng.gen_range(0..OUI_LEGACY_IOT.len())],
            DeviceGeneration::Legacy,
            Platform::Other,
        )
    } else {
        (
            OUI_MODERN_GENERIC[rng.gen_range(0..OUI_MODERN_GENERIC.len())],
            DeviceGeneration::Modern,
            Platform::Android,
        )
    };

    let mac = if uses_private_mac(rng, generation) {
        MacAddress::random_private(rng)
    } else {
        MacAddress([
            oui[0],
            oui[1],
            oui[2],
            rng.gen(),
            rng.gen(),
            rng.gen(),
        ])
    };

    let bssid_target = MacAddress([
        BSSID_TARGET_PREFIX[0],
        BSSID_TARGET_PREFIX[1],
        BSSID_TARGET_PREFIX[2],
        rng.gen(),
        rng.gen(),
        rng.gen(),
    ]);

    let probe_chance = if generation == DeviceGeneration::Legacy {
        90
    } else {
        60
    };
    let preferred_ssid = if ssid_count > 0 && rng.gen_range(0..100) < probe_chance {
        Some(rng.gen_range(0..ssid_count))
    } else {
        None
    };

    VirtualDevice {
        mac,
        bssid_target,
        sequence_number: rng.gen_range(0..4096),
        preferred_ssid,
        generation,
        platform,
        has_connected: false,
        tx_power: POWER_LEVELS[rng.gen_range(0..POWER_LEVELS.len())],
    }
}

/// Privacy addressing by era: modern handsets randomize almost always,
/// WiFi 5 era about half the time, old IoT never.
fn uses_private_mac(rng: &mut impl Rng, generation: DeviceGeneration) -> bool {
    match generation {
        DeviceGeneration::Modern => rng.gen_range(0..100) < 85,
        DeviceGeneration::Common => rng.gen_range(0..100) < 50,
        DeviceGeneration::Legacy => false,
    }
}
