use super::{FrameControl, MacAddress, SequenceControl};
use crate::traits::Addresses;

/// Representation of a management frame header. This format is used by all management frames!
///
/// Structure of a management header:
///
/// byte 0-1: Frame Control.
/// byte 2-3: Duration.
/// byte 4-9: Address 1. Always present!
/// byte 10-15: Address 2.
/// byte 16-21: Address 3.
/// byte 22-23: Sequence Control.
#[derive(Clone, Debug)]
pub struct ManagementHeader {
    pub frame_control: FrameControl,
    pub duration: [u8; 2],
    pub address_1: MacAddress,
    pub address_2: MacAddress,
    pub address_3: MacAddress,
    pub sequence_control: SequenceControl,
}

impl ManagementHeader {
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(24);
        bytes.extend(self.frame_control.encode());
        bytes.extend(self.duration);
        bytes.extend(self.address_1.0);
        bytes.extend(self.address_2.0);
        bytes.extend(self.address_3.0);
        bytes.extend(self.sequence_control.encode());
        bytes
    }
}

/// Which address is used in which way depends on the two DS flags in the
/// FrameControl header.
///
/// **Address 1:** the recipient station address.
/// **Address 2:** the transmitter station address.
/// **Address 3:** the remaining one of {destination, source, BSSID}.
impl Addresses for ManagementHeader {
    fn src(&self) -> Option<&MacAddress> {
        let frame_control = &self.frame_control;
        if frame_control.to_ds() {
            Some(&self.address_3)
        } else if frame_control.from_ds() {
            Some(&self.address_1)
        } else {
            Some(&self.address_2)
        }
    }

    fn dest(&self) -> &MacAddress {
        let frame_control = &self.frame_control;
        if frame_control.to_ds() {
            &self.address_2
        } else if frame_control.from_ds() {
            &self.address_3
        } else {
            &self.address_1
        }
    }

    fn bssid(&self) -> Option<&MacAddress> {
        let frame_control = &self.frame_control;
        if frame_control.to_ds() {
            Some(&self.address_1)
        } else if frame_control.from_ds() {
            Some(&self.address_2)
        } else {
            Some(&self.address_3)
        }
    }
}

/// Representation of a data frame header. Very similar to the management
/// header, except that QoS subtypes carry two extra control bytes after the
/// addresses.
#[derive(Clone, Debug)]
pub struct DataHeader {
    pub frame_control: FrameControl,
    pub duration: [u8; 2],
    pub address_1: MacAddress,
    pub address_2: MacAddress,
    pub address_3: MacAddress,
    pub sequence_control: SequenceControl,
    pub qos: Option<[u8; 2]>,
}

impl DataHeader {
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(26);
        bytes.extend(self.frame_control.encode());
        bytes.extend(self.duration);
        bytes.extend(self.address_1.0);
        bytes.extend(self.address_2.0);
        bytes.extend(self.address_3.0);
        bytes.extend(self.sequence_control.encode());
        if let Some(qos) = self.qos {
            bytes.extend(qos);
        }
        bytes
    }
}

impl Addresses for DataHeader {
    fn src(&self) -> Option<&MacAddress> {
        if self.frame_control.to_ds() {
            Some(&self.address_2)
        } else if self.frame_control.from_ds() {
            Some(&self.address_3)
        } else {
            Some(&self.address_2)
        }
    }

    fn dest(&self) -> &MacAddress {
        if self.frame_control.to_ds() {
            &self.address_3
        } else {
            &self.address_1
        }
    }

    fn bssid(&self) -> Option<&MacAddress> {
        if self.frame_control.to_ds() {
            Some(&self.address_1)
        } else if self.frame_control.from_ds() {
            Some(&self.address_2)
        } else {
            Some(&self.address_3)
        }
    }
}
