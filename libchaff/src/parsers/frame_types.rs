use nom::bytes::complete::take;
use nom::number::complete::{le_u16, le_u64, u8 as parse_u8};

use crate::error::Error;
use crate::frame::components::FrameControl;
use crate::frame::*;
use crate::parsers::{parse_elements, parse_management_header};

/// Parse a [ProbeRequest] frame.
///
/// The general structure is:
/// - ManagementHeader
/// - Dynamic fields
pub fn parse_probe_request(frame_control: FrameControl, input: &[u8]) -> Result<Frame, Error> {
    let (input, header) = parse_management_header(frame_control, input)?;
    let (_, elements) = parse_elements(input)?;

    Ok(Frame::ProbeRequest(ProbeRequest { header, elements }))
}

/// Parse a [Beacon] frame.
///
/// The general structure is:
/// - ManagementHeader
/// - Timestamp
/// - Beacon interval
/// - Capability info
/// - Dynamic fields
pub fn parse_beacon(frame_control: FrameControl, input: &[u8]) -> Result<Frame, Error> {
    let (input, header) = parse_management_header(frame_control, input)?;
    let (input, timestamp) = le_u64(input)?;
    let (input, beacon_interval) = le_u16(input)?;
    let (input, capability_info) = le_u16(input)?;
    let (_, elements) = parse_elements(input)?;

    Ok(Frame::Beacon(Beacon {
        header,
        timestamp,
        beacon_interval,
        capability_info,
        elements,
    }))
}

/// Parse an [Authentication] frame.
///
/// The general structure is:
/// - ManagementHeader
/// - Authentication Algorithm Number
/// - Authentication Transaction Sequence Number
/// - Status Code
pub fn parse_authentication(frame_control: FrameControl, input: &[u8]) -> Result<Frame, Error> {
    let (input, header) = parse_management_header(frame_control, input)?;
    let (input, auth_algorithm) = le_u16(input)?;
    let (input, auth_seq) = le_u16(input)?;
    let (_, status_code) = le_u16(input)?;

    Ok(Frame::Authentication(Authentication {
        header,
        auth_algorithm,
        auth_seq,
        status_code,
    }))
}

/// Parse an [AssociationRequest] frame.
///
/// The general structure is:
/// - ManagementHeader
/// - Capability info
/// - Listen interval
/// - Dynamic fields
pub fn parse_association_request(
    frame_control: FrameControl,
    input: &[u8],
) -> Result<Frame, Error> {
    let (input, header) = parse_management_header(frame_control, input)?;
    let (input, capability_info) = le_u16(input)?;
    let (input, listen_interval) = le_u16(input)?;
    let (_, elements) = parse_elements(input)?;

    Ok(Frame::AssociationRequest(AssociationRequest {
        header,
        capability_info,
        listen_interval,
        elements,
    }))
}

/// Parse a [VendorAction] frame.
///
/// The general structure is:
/// - ManagementHeader
/// - Category code
/// - Vendor body (OUI first)
pub fn parse_vendor_action(frame_control: FrameControl, input: &[u8]) -> Result<Frame, Error> {
    let (input, header) = parse_management_header(frame_control, input)?;
    let (input, category) = parse_u8(input)?;

    Ok(Frame::VendorAction(VendorAction {
        header,
        category,
        body: input.to_vec(),
    }))
}

/// Parse a [CipherData] frame. The two QoS control bytes are consumed into
/// the header; everything after is opaque cipher text.
pub fn parse_cipher_data(frame_control: FrameControl, input: &[u8]) -> Result<Frame, Error> {
    use crate::frame::components::DataHeader;
    use crate::parsers::{parse_mac_address, parse_sequence_control};

    let (input, duration) = take(2usize)(input)?;
    let (input, address_1) = parse_mac_address(input)?;
    let (input, address_2) = parse_mac_address(input)?;
    let (input, address_3) = parse_mac_address(input)?;
    let (input, sequence_control) = parse_sequence_control(input)?;
    let (input, qos) = take(2usize)(input)?;

    Ok(Frame::CipherData(CipherData {
        header: DataHeader {
            frame_control,
            duration: [duration[0], duration[1]],
            address_1,
            address_2,
            address_3,
            sequence_control,
            qos: Some([qos[0], qos[1]]),
        },
        payload: input.to_vec(),
    }))
}
