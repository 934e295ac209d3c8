/// The two-bit frame type from the FrameControl header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameType {
    Management,
    Control,
    Data,
    Extension,
}

impl FrameType {
    pub fn from_bits(bits: u8) -> FrameType {
        match bits & 0b11 {
            0 => FrameType::Management,
            1 => FrameType::Control,
            2 => FrameType::Data,
            _ => FrameType::Extension,
        }
    }
}

/// The four-bit frame subtype from the FrameControl header.
///
/// Only the subtypes this library forges or filters on get their own
/// variant; everything else is carried as [FrameSubType::Unhandled].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameSubType {
    AssociationRequest,
    ProbeRequest,
    Beacon,
    Authentication,
    Action,
    QosData,
    Unhandled(u8),
}

impl FrameSubType {
    pub fn to_bytes(self) -> u8 {
        match self {
            FrameSubType::AssociationRequest => 0,
            FrameSubType::ProbeRequest => 4,
            FrameSubType::Beacon => 8,
            FrameSubType::Authentication => 11,
            FrameSubType::Action => 13,
            // QoS Data shares nibble 8 with Beacon; the frame type
            // disambiguates.
            FrameSubType::QosData => 8,
            FrameSubType::Unhandled(bits) => bits,
        }
    }

    pub fn from_bits(frame_type: FrameType, bits: u8) -> FrameSubType {
        match (frame_type, bits & 0b1111) {
            (FrameType::Management, 0) => FrameSubType::AssociationRequest,
            (FrameType::Management, 4) => FrameSubType::ProbeRequest,
            (FrameType::Management, 8) => FrameSubType::Beacon,
            (FrameType::Management, 11) => FrameSubType::Authentication,
            (FrameType::Management, 13) => FrameSubType::Action,
            (FrameType::Data, 8) => FrameSubType::QosData,
            (_, bits) => FrameSubType::Unhandled(bits),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtype_round_trip() {
        for subtype in [
            FrameSubType::AssociationRequest,
            FrameSubType::ProbeRequest,
            FrameSubType::Beacon,
            FrameSubType::Authentication,
            FrameSubType::Action,
        ] {
            assert_eq!(
                FrameSubType::from_bits(FrameType::Management, subtype.to_bytes()),
                subtype
            );
        }
        assert_eq!(
            FrameSubType::from_bits(FrameType::Data, FrameSubType::QosData.to_bytes()),
            FrameSubType::QosData
        );
    }
}
