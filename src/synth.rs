//! Frame synthesis.
//!
//! Pure builders: `(station, context) -> bytes`, no shared buffers. Every
//! capability payload below is carried verbatim because DPI tooling keys on
//! the exact bytes, not on what the underlying radio could actually do at
//! link layer. Do not "improve" them.
//!
//! Element order inside each builder is equally load-bearing: the tag
//! sequence of a probe request is a device fingerprint on its own.

use libchaff::frame::components::*;
use libchaff::frame::{AssociationRequest, Authentication, Beacon, CipherData, ProbeRequest};
use libchaff::{FrameSubType, FrameType};
use rand::Rng;

use crate::devices::{DeviceGeneration, Platform, VirtualDevice};
use crate::ssid::SsidStore;

pub const HT_CAPS_PAYLOAD: [u8; 26] = [
    0xEF, 0x01, 0x1B, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

pub const VHT_CAPS_PAYLOAD: [u8; 12] = [
    0x91, 0x59, 0x82, 0x0F, 0xEA, 0xFF, 0x00, 0x00, 0xEA, 0xFF, 0x00, 0x00,
];

pub const HE_CAPS_PAYLOAD: [u8; 22] = [
    0x23, 0x09, 0x01, 0x00, 0x02, 0x40, 0x00, 0x04, 0x70, 0x0C, 0x89, 0x7F, 0x03, 0x80, 0x04,
    0x00, 0x00, 0x00, 0xAA, 0xAA, 0xAA, 0xAA,
];

pub const APPLE_VENDOR_PAYLOAD: [u8; 7] = [0x00, 0x17, 0xF2, 0x0A, 0x00, 0x01, 0x04];

pub const WFA_VENDOR_PAYLOAD: [u8; 9] = [0x00, 0x10, 0x18, 0x02, 0x00, 0x00, 0x1C, 0x00, 0x00];

/// CCMP pairwise and group ciphers, PSK key management.
pub const RSN_PAYLOAD: [u8; 20] = [
    0x01, 0x00, 0x00, 0x0F, 0xAC, 0x04, 0x01, 0x00, 0x00, 0x0F, 0xAC, 0x04, 0x01, 0x00, 0x00,
    0x0F, 0xAC, 0x02, 0x00, 0x00,
];

/// The two extended-capability variants differ only in byte 0. Both byte
/// strings are canonical; reproduce them exactly.
pub const EXT_CAPS_APPLE: [u8; 8] = [0x00, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00, 0x40];
pub const EXT_CAPS_GENERIC: [u8; 8] = [0x04, 0x00, 0x08, 0x00, 0x00, 0x00, 0x00, 0x40];

pub const RATES_LEGACY_2G: [u8; 4] = [0x82, 0x84, 0x8B, 0x96];
pub const RATES_MODERN_2G: [u8; 8] = [0x02, 0x04, 0x0B, 0x16, 0x0C, 0x12, 0x18, 0x24];
pub const RATES_5G: [u8; 8] = [0x0C, 0x12, 0x18, 0x24, 0x30, 0x48, 0x60, 0x6C];

/// Which half of the spectrum the radio currently sits in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    Band2Ghz,
    Band5Ghz,
}

fn rates_for(band: Band, generation: DeviceGeneration) -> &'static [u8] {
    match (band, generation) {
        (Band::Band5Ghz, _) => &RATES_5G,
        (Band::Band2Ghz, DeviceGeneration::Legacy) => &RATES_LEGACY_2G,
        (Band::Band2Ghz, _) => &RATES_MODERN_2G,
    }
}

fn management_header(
    subtype: FrameSubType,
    duration: [u8; 2],
    address_1: MacAddress,
    address_2: MacAddress,
    address_3: MacAddress,
    sequence: u16,
) -> ManagementHeader {
    ManagementHeader {
        frame_control: FrameControl {
            protocol_version: 0,
            frame_type: FrameType::Management,
            frame_subtype: subtype,
            flags: 0,
        },
        duration,
        address_1,
        address_2,
        address_3,
        sequence_control: SequenceControl {
            fragment_number: 0,
            sequence_number: sequence,
        },
    }
}

/// Pick the SSID a station probes for. `None` is the wildcard.
///
/// Only old or headless hardware broadcasts wildcards in public; phones
/// direct their probes. A station with no usable preference falls back to a
/// short random lowercase name, which reads as a hidden-network check.
pub fn choose_probe_ssid(
    rng: &mut impl Rng,
    device: &VirtualDevice,
    ssids: &SsidStore,
) -> Option<String> {
    let may_wildcard =
        device.generation == DeviceGeneration::Legacy || device.platform == Platform::Other;
    if may_wildcard && rng.gen_range(0..100) < 40 {
        return None;
    }

    if let Some(ssid) = device.preferred_ssid.and_then(|index| ssids.get(index)) {
        return Some(ssid.to_string());
    }
    if !ssids.is_empty() {
        let index = ssids.random_index(rng);
        if let Some(ssid) = ssids.get(index) {
            return Some(ssid.to_string());
        }
    }
    Some(random_lowercase(rng, 7))
}

fn random_lowercase(rng: &mut impl Rng, length: usize) -> String {
    (0..length)
        .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
        .collect()
}

/// Build a probe request with the full generation-consistent element set.
/// Rolls the SSID choice internally; see
/// [build_probe_request_with_ssid] for the deterministic core.
pub fn build_probe_request(
    rng: &mut impl Rng,
    device: &VirtualDevice,
    ssids: &SsidStore,
    channel: u8,
    band: Band,
) -> Vec<u8> {
    let ssid = choose_probe_ssid(rng, device, ssids);
    build_probe_request_with_ssid(device, ssid.as_deref(), channel, band)
}

/// The deterministic probe builder. Element order is a contract:
/// SSID, rates, DS, (Apple ExtCap), HT, VHT, (generic ExtCap), HE, WFA
/// vendor, Apple vendor.
pub fn build_probe_request_with_ssid(
    device: &VirtualDevice,
    ssid: Option<&str>,
    channel: u8,
    band: Band,
) -> Vec<u8> {
    let header = management_header(
        FrameSubType::ProbeRequest,
        [0x00, 0x00],
        MacAddress::broadcast(),
        device.mac,
        MacAddress::broadcast(),
        device.sequence_number,
    );

    let is_apple = device.platform == Platform::Ios;
    let mut elements = ElementList::new();

    elements.push(ELEMENT_ID_SSID, ssid.unwrap_or("").as_bytes().to_vec());
    elements.push(
        ELEMENT_ID_SUPPORTED_RATES,
        rates_for(band, device.generation).to_vec(),
    );
    elements.push(ELEMENT_ID_DS_PARAMETER, vec![channel]);

    if is_apple {
        elements.push(ELEMENT_ID_EXTENDED_CAPABILITIES, EXT_CAPS_APPLE.to_vec());
    }

    elements.push(ELEMENT_ID_HT_CAPABILITIES, HT_CAPS_PAYLOAD.to_vec());

    if device.generation.supports_vht() {
        elements.push(ELEMENT_ID_VHT_CAPABILITIES, VHT_CAPS_PAYLOAD.to_vec());
    }

    if !is_apple && device.generation != DeviceGeneration::Legacy {
        elements.push(ELEMENT_ID_EXTENDED_CAPABILITIES, EXT_CAPS_GENERIC.to_vec());
    }

    if device.generation.supports_he() {
        elements.push_extension(EXTENSION_ID_HE_CAPABILITIES, &HE_CAPS_PAYLOAD);
    }

    elements.push(ELEMENT_ID_VENDOR, WFA_VENDOR_PAYLOAD.to_vec());
    if is_apple {
        elements.push(ELEMENT_ID_VENDOR, APPLE_VENDOR_PAYLOAD.to_vec());
    }

    ProbeRequest { header, elements }.encode()
}

/// Open-system authentication, first transaction.
pub fn build_authentication(device: &VirtualDevice) -> Vec<u8> {
    let header = management_header(
        FrameSubType::Authentication,
        [0x00, 0x01],
        device.bssid_target,
        device.mac,
        device.bssid_target,
        device.sequence_number,
    );

    Authentication {
        header,
        auth_algorithm: 0,
        auth_seq: 1,
        status_code: 0,
    }
    .encode()
}

/// An association request that never gets an answer. RSN and the capability
/// ladder make it look like a credible join attempt to anything watching.
pub fn build_association_request(
    device: &VirtualDevice,
    ssid: &str,
    band: Band,
) -> Vec<u8> {
    let header = management_header(
        FrameSubType::AssociationRequest,
        [0x00, 0x00],
        device.bssid_target,
        device.mac,
        device.bssid_target,
        device.sequence_number,
    );

    let mut elements = ElementList::new();
    elements.push(ELEMENT_ID_SSID, ssid.as_bytes().to_vec());
    elements.push(
        ELEMENT_ID_SUPPORTED_RATES,
        rates_for(band, device.generation).to_vec(),
    );
    elements.push(ELEMENT_ID_RSN, RSN_PAYLOAD.to_vec());
    elements.push(ELEMENT_ID_HT_CAPABILITIES, HT_CAPS_PAYLOAD.to_vec());
    if device.generation.supports_vht() {
        elements.push(ELEMENT_ID_VHT_CAPABILITIES, VHT_CAPS_PAYLOAD.to_vec());
    }
    if device.generation.supports_he() {
        elements.push_extension(EXTENSION_ID_HE_CAPABILITIES, &HE_CAPS_PAYLOAD);
    }

    AssociationRequest {
        header,
        capability_info: 0x0431,
        listen_interval: 0x000A,
        elements,
    }
    .encode()
}

/// A protected QoS data frame full of noise. The two control bytes stand in
/// for a CCMP header; nothing ever decrypts this.
pub fn build_encrypted_data(rng: &mut impl Rng, device: &VirtualDevice) -> Vec<u8> {
    let header = DataHeader {
        frame_control: FrameControl {
            protocol_version: 0,
            frame_type: FrameType::Data,
            frame_subtype: FrameSubType::QosData,
            // to-DS, protected
            flags: 0x41,
        },
        duration: [0x00, 0x00],
        address_1: device.bssid_target,
        address_2: device.mac,
        address_3: device.bssid_target,
        sequence_control: SequenceControl {
            fragment_number: 0,
            sequence_number: device.sequence_number,
        },
        qos: Some([rng.gen_range(0..8), 0x00]),
    };

    let payload_len = rng.gen_range(64..512);
    let mut payload = vec![0u8; payload_len];
    rng.fill(payload.as_mut_slice());

    CipherData { header, payload }.encode()
}

/// A fake access point announcing one of our SSIDs. HT operation goes out on
/// both bands so 2.4 GHz beacons read as 802.11n rather than bare 802.11g;
/// VHT operation is 5 GHz only.
pub fn build_beacon(
    ap_mac: MacAddress,
    ssid: &str,
    channel: u8,
    band: Band,
    sequence: u16,
) -> Vec<u8> {
    let header = management_header(
        FrameSubType::Beacon,
        [0x00, 0x00],
        MacAddress::broadcast(),
        ap_mac,
        ap_mac,
        sequence,
    );

    let mut elements = ElementList::new();
    elements.push(ELEMENT_ID_SSID, ssid.as_bytes().to_vec());
    let rates: &[u8] = match band {
        Band::Band5Ghz => &RATES_5G,
        Band::Band2Ghz => &RATES_LEGACY_2G,
    };
    elements.push(ELEMENT_ID_SUPPORTED_RATES, rates.to_vec());
    elements.push(ELEMENT_ID_DS_PARAMETER, vec![channel]);

    let mut ht_operation = [0u8; 22];
    ht_operation[0] = channel;
    elements.push(ELEMENT_ID_HT_OPERATION, ht_operation.to_vec());

    if band == Band::Band5Ghz {
        elements.push(ELEMENT_ID_VHT_OPERATION, vec![0x00; 5]);
    }

    Beacon {
        header,
        timestamp: 0,
        beacon_interval: 0x0064,
        capability_info: 0x0431,
        elements,
    }
    .encode()
}

/// Silence filler: a throwaway station checking for a (maybe hidden)
/// network. Source address is a fresh private MAC per packet, so the noise
/// floor never coheres into trackable identities.
pub fn build_noise_probe(rng: &mut impl Rng, band: Band) -> Vec<u8> {
    let header = management_header(
        FrameSubType::ProbeRequest,
        [0x00, 0x00],
        MacAddress::broadcast(),
        MacAddress::random_private(rng),
        MacAddress::broadcast(),
        rng.gen_range(0..4096),
    );

    let mut elements = ElementList::new();
    if rng.gen_range(0..100) < 40 {
        let length = rng.gen_range(5..12);
        elements.push(ELEMENT_ID_SSID, random_lowercase(rng, length).into_bytes());
    } else {
        elements.push(ELEMENT_ID_SSID, Vec::new());
    }

    let rates: &[u8] = match band {
        Band::Band5Ghz => &RATES_5G,
        Band::Band2Ghz => &RATES_LEGACY_2G,
    };
    elements.push(ELEMENT_ID_SUPPORTED_RATES, rates.to_vec());

    ProbeRequest { header, elements }.encode()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::identity::BSSID_TARGET_PREFIX;
    use libchaff::{parse_frame, Frame};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn station(generation: DeviceGeneration, platform: Platform) -> VirtualDevice {
        VirtualDevice {
            mac: MacAddress([0x00, 0x14, 0x38, 0x10, 0x20, 0x30]),
            bssid_target: MacAddress([
                BSSID_TARGET_PREFIX[0],
                BSSID_TARGET_PREFIX[1],
                BSSID_TARGET_PREFIX[2],
                0xAA,
                0xBB,
                0xCC,
            ]),
            sequence_number: 100,
            preferred_ssid: Some(0),
            generation,
            platform,
            has_connected: false,
            tx_power: 78,
        }
    }

    fn probe_elements(bytes: &[u8]) -> ElementList {
        match parse_frame(bytes).expect("probe should parse") {
            Frame::ProbeRequest(probe) => probe.elements,
            other => panic!("expected probe request, got {other:?}"),
        }
    }

    #[test]
    fn test_legacy_probe_layout() {
        let device = station(DeviceGeneration::Legacy, Platform::Other);
        let bytes =
            build_probe_request_with_ssid(&device, Some("Home"), 6, Band::Band2Ghz);

        assert_eq!(&bytes[0..4], &[0x40, 0x00, 0x00, 0x00]);
        assert_eq!(&bytes[4..10], &[0xFF; 6]);
        assert_eq!(&bytes[10..16], &device.mac.0);
        assert_eq!(&bytes[16..22], &[0xFF; 6]);
        assert_eq!(&bytes[22..24], &[0x64, 0x00]);
        // SSID, legacy rates, DS parameter lead the tail.
        assert_eq!(&bytes[24..30], &[0x00, 0x04, b'H', b'o', b'm', b'e']);
        assert_eq!(&bytes[30..36], &[0x01, 0x04, 0x82, 0x84, 0x8B, 0x96]);
        assert_eq!(&bytes[36..39], &[0x03, 0x01, 0x06]);
        // HT capabilities follow immediately, then only the WFA vendor tag.
        assert_eq!(&bytes[39..46], &[45, 26, 0xEF, 0x01, 0x1B, 0xFF, 0xFF]);
        assert_eq!(bytes[67], 221);
        assert_eq!(bytes.len(), 24 + 6 + 6 + 3 + 28 + 11);
        assert!(bytes.len() <= 90);

        let elements = probe_elements(&bytes);
        assert!(elements.has(ELEMENT_ID_HT_CAPABILITIES));
        assert!(!elements.has(ELEMENT_ID_VHT_CAPABILITIES));
        assert!(!elements.has_extension(EXTENSION_ID_HE_CAPABILITIES));
        assert!(!elements.has(ELEMENT_ID_EXTENDED_CAPABILITIES));
        assert_eq!(elements.count(ELEMENT_ID_VENDOR), 1);
        assert_eq!(
            elements.first(ELEMENT_ID_VENDOR).unwrap().data,
            WFA_VENDOR_PAYLOAD.to_vec()
        );
    }

    #[test]
    fn test_modern_apple_probe_order() {
        let device = station(DeviceGeneration::Modern, Platform::Ios);
        let bytes =
            build_probe_request_with_ssid(&device, Some("Starbucks WiFi"), 36, Band::Band5Ghz);
        let elements = probe_elements(&bytes);

        let ids: Vec<u8> = elements.elements.iter().map(|element| element.id).collect();
        assert_eq!(
            ids,
            vec![
                ELEMENT_ID_SSID,
                ELEMENT_ID_SUPPORTED_RATES,
                ELEMENT_ID_DS_PARAMETER,
                ELEMENT_ID_EXTENDED_CAPABILITIES,
                ELEMENT_ID_HT_CAPABILITIES,
                ELEMENT_ID_VHT_CAPABILITIES,
                ELEMENT_ID_EXTENSION,
                ELEMENT_ID_VENDOR,
                ELEMENT_ID_VENDOR,
            ]
        );
        assert_eq!(
            elements.first(ELEMENT_ID_SUPPORTED_RATES).unwrap().data,
            RATES_5G.to_vec()
        );
        assert_eq!(
            elements.first(ELEMENT_ID_EXTENDED_CAPABILITIES).unwrap().data,
            EXT_CAPS_APPLE.to_vec()
        );
        // WFA first, Apple second.
        let vendors: Vec<&InformationElement> = elements
            .elements
            .iter()
            .filter(|element| element.id == ELEMENT_ID_VENDOR)
            .collect();
        assert_eq!(vendors[0].data, WFA_VENDOR_PAYLOAD.to_vec());
        assert_eq!(vendors[1].data, APPLE_VENDOR_PAYLOAD.to_vec());
    }

    #[test]
    fn test_common_android_probe_extcap_placement() {
        let device = station(DeviceGeneration::Common, Platform::Android);
        let bytes = build_probe_request_with_ssid(&device, Some("netgear"), 11, Band::Band2Ghz);
        let elements = probe_elements(&bytes);

        let ids: Vec<u8> = elements.elements.iter().map(|element| element.id).collect();
        assert_eq!(
            ids,
            vec![
                ELEMENT_ID_SSID,
                ELEMENT_ID_SUPPORTED_RATES,
                ELEMENT_ID_DS_PARAMETER,
                ELEMENT_ID_HT_CAPABILITIES,
                ELEMENT_ID_VHT_CAPABILITIES,
                ELEMENT_ID_EXTENDED_CAPABILITIES,
                ELEMENT_ID_VENDOR,
            ]
        );
        assert_eq!(
            elements.first(ELEMENT_ID_EXTENDED_CAPABILITIES).unwrap().data,
            EXT_CAPS_GENERIC.to_vec()
        );
        assert!(!elements.has_extension(EXTENSION_ID_HE_CAPABILITIES));
        assert_eq!(
            elements.first(ELEMENT_ID_SUPPORTED_RATES).unwrap().data,
            RATES_MODERN_2G.to_vec()
        );
    }

    #[test]
    fn test_association_request_contents() {
        let device = station(DeviceGeneration::Modern, Platform::Android);
        let bytes = build_association_request(&device, "Office", Band::Band2Ghz);

        assert_eq!(bytes[0], 0x00);
        assert_eq!(&bytes[4..10], &device.bssid_target.0);
        assert_eq!(&bytes[10..16], &device.mac.0);
        // Capability info and listen interval.
        assert_eq!(&bytes[24..28], &[0x31, 0x04, 0x0A, 0x00]);

        let Frame::AssociationRequest(request) = parse_frame(&bytes).unwrap() else {
            panic!("expected association request");
        };
        assert_eq!(request.elements.ssid().as_deref(), Some("Office"));
        assert!(request.elements.has(ELEMENT_ID_RSN));
        assert!(request.elements.has(ELEMENT_ID_HT_CAPABILITIES));
        assert!(request.elements.has(ELEMENT_ID_VHT_CAPABILITIES));
        assert!(request.elements.has_extension(EXTENSION_ID_HE_CAPABILITIES));
    }

    #[test]
    fn test_legacy_association_has_no_vht() {
        let device = station(DeviceGeneration::Legacy, Platform::Other);
        let bytes = build_association_request(&device, "Home", Band::Band2Ghz);

        let Frame::AssociationRequest(request) = parse_frame(&bytes).unwrap() else {
            panic!("expected association request");
        };
        assert!(!request.elements.has(ELEMENT_ID_VHT_CAPABILITIES));
        assert!(!request.elements.has_extension(EXTENSION_ID_HE_CAPABILITIES));
        assert_eq!(
            request.elements.first(ELEMENT_ID_SUPPORTED_RATES).unwrap().data,
            RATES_LEGACY_2G.to_vec()
        );
    }

    #[test]
    fn test_authentication_frame() {
        let device = station(DeviceGeneration::Common, Platform::Ios);
        let bytes = build_authentication(&device);

        assert_eq!(&bytes[0..2], &[0xB0, 0x00]);
        assert_eq!(bytes.len(), 30);
        assert_eq!(&bytes[24..30], &[0x00, 0x00, 0x01, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_encrypted_data_frame() {
        let device = station(DeviceGeneration::Common, Platform::Ios);
        let mut rng = StdRng::seed_from_u64(9);
        let bytes = build_encrypted_data(&mut rng, &device);

        assert_eq!(&bytes[0..2], &[0x88, 0x41]);
        assert_eq!(&bytes[4..10], &device.bssid_target.0);
        assert_eq!(&bytes[10..16], &device.mac.0);
        assert!(bytes[24] < 8);
        assert_eq!(bytes[25], 0x00);
        // 26 header bytes plus 64..512 of cipher noise, well under the
        // 1024-byte frame ceiling.
        assert!(bytes.len() >= 26 + 64 && bytes.len() < 26 + 512);
    }

    #[test]
    fn test_beacon_layout() {
        let ap = MacAddress([0x02, 0x11, 0x22, 1, 2, 3]);
        let bytes = build_beacon(ap, "linksys", 149, Band::Band5Ghz, 77);

        let Frame::Beacon(beacon) = parse_frame(&bytes).unwrap() else {
            panic!("expected beacon");
        };
        assert_eq!(beacon.timestamp, 0);
        assert_eq!(beacon.beacon_interval, 100);
        assert_eq!(beacon.elements.ssid().as_deref(), Some("linksys"));
        let ht_operation = beacon.elements.first(ELEMENT_ID_HT_OPERATION).unwrap();
        assert_eq!(ht_operation.data.len(), 22);
        assert_eq!(ht_operation.data[0], 149);
        assert!(beacon.elements.has(ELEMENT_ID_VHT_OPERATION));

        let bytes_2g = build_beacon(ap, "linksys", 6, Band::Band2Ghz, 77);
        let Frame::Beacon(beacon_2g) = parse_frame(&bytes_2g).unwrap() else {
            panic!("expected beacon");
        };
        assert!(beacon_2g.elements.has(ELEMENT_ID_HT_OPERATION));
        assert!(!beacon_2g.elements.has(ELEMENT_ID_VHT_OPERATION));
    }

    #[test]
    fn test_noise_probe_shape() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let bytes = build_noise_probe(&mut rng, Band::Band2Ghz);
            let elements = probe_elements(&bytes);

            // SSID and rates only, nothing else to fingerprint.
            assert_eq!(elements.elements.len(), 2);
            let ssid = elements.ssid_bytes().unwrap();
            assert!(ssid.is_empty() || (5..12).contains(&ssid.len()));
            let source = MacAddress([
                bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15],
            ]);
            assert!(source.is_locally_administered());
            assert!(source.is_unicast());
        }
    }

    #[test]
    fn test_ios_never_wildcards() {
        let config = Config::default();
        let ssids = SsidStore::new(&config);
        let mut rng = StdRng::seed_from_u64(21);
        let device = station(DeviceGeneration::Common, Platform::Ios);

        for _ in 0..500 {
            let ssid = choose_probe_ssid(&mut rng, &device, &ssids);
            assert!(ssid.is_some());
            assert!(!ssid.unwrap().is_empty());
        }
    }

    #[test]
    fn test_legacy_wildcards_sometimes() {
        let config = Config::default();
        let ssids = SsidStore::new(&config);
        let mut rng = StdRng::seed_from_u64(22);
        let device = station(DeviceGeneration::Legacy, Platform::Other);

        let wildcards = (0..1000)
            .filter(|_| choose_probe_ssid(&mut rng, &device, &ssids).is_none())
            .count();
        // Nominal 40%.
        assert!((250..550).contains(&wildcards), "wildcards {wildcards}");
    }

    #[test]
    fn test_every_frame_under_ceiling() {
        let mut rng = StdRng::seed_from_u64(33);
        for generation in [
            DeviceGeneration::Legacy,
            DeviceGeneration::Common,
            DeviceGeneration::Modern,
        ] {
            let device = station(generation, Platform::Android);
            for band in [Band::Band2Ghz, Band::Band5Ghz] {
                assert!(
                    build_probe_request_with_ssid(&device, Some("Target Guest Wi-Fi"), 1, band)
                        .len()
                        <= 1024
                );
                assert!(build_association_request(&device, "Target Guest Wi-Fi", band).len() <= 1024);
                assert!(build_encrypted_data(&mut rng, &device).len() <= 1024);
                assert!(build_noise_probe(&mut rng, band).len() <= 1024);
            }
        }
    }
}
