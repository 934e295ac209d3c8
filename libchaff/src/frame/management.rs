use crate::frame::components::*;

/// A station scanning for known or unknown networks. The entire body is the
/// ordered element list.
#[derive(Clone, Debug)]
pub struct ProbeRequest {
    pub header: ManagementHeader,
    pub elements: ElementList,
}

impl ProbeRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = self.header.encode();
        bytes.extend(self.elements.encode());
        bytes
    }
}

/// An access point announcing a BSS.
#[derive(Clone, Debug)]
pub struct Beacon {
    pub header: ManagementHeader,
    pub timestamp: u64,
    pub beacon_interval: u16,
    pub capability_info: u16,
    pub elements: ElementList,
}

impl Beacon {
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = self.header.encode();
        bytes.extend(self.timestamp.to_le_bytes());
        bytes.extend(self.beacon_interval.to_le_bytes());
        bytes.extend(self.capability_info.to_le_bytes());
        bytes.extend(self.elements.encode());
        bytes
    }
}

/// An open-system authentication exchange member. No challenge text is ever
/// carried here.
#[derive(Clone, Debug)]
pub struct Authentication {
    pub header: ManagementHeader,
    pub auth_algorithm: u16,
    pub auth_seq: u16,
    pub status_code: u16,
}

impl Authentication {
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = self.header.encode();
        bytes.extend(self.auth_algorithm.to_le_bytes());
        bytes.extend(self.auth_seq.to_le_bytes());
        bytes.extend(self.status_code.to_le_bytes());
        bytes
    }
}

/// A station asking to join a BSS.
#[derive(Clone, Debug)]
pub struct AssociationRequest {
    pub header: ManagementHeader,
    pub capability_info: u16,
    pub listen_interval: u16,
    pub elements: ElementList,
}

impl AssociationRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = self.header.encode();
        bytes.extend(self.capability_info.to_le_bytes());
        bytes.extend(self.listen_interval.to_le_bytes());
        bytes.extend(self.elements.encode());
        bytes
    }
}

/// A vendor-specific action frame. `body` holds everything after the
/// category code, OUI first.
#[derive(Clone, Debug)]
pub struct VendorAction {
    pub header: ManagementHeader,
    pub category: u8,
    pub body: Vec<u8>,
}

impl VendorAction {
    pub fn oui(&self) -> Option<[u8; 3]> {
        self.body
            .get(0..3)
            .map(|bytes| [bytes[0], bytes[1], bytes[2]])
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = self.header.encode();
        bytes.push(self.category);
        bytes.extend_from_slice(&self.body);
        bytes
    }
}
