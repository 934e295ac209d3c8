use nom::bytes::complete::take;
use nom::number::complete::u8 as parse_u8;
use nom::IResult;

use crate::frame::components::{
    ElementList, FrameControl, InformationElement, MacAddress, ManagementHeader, SequenceControl,
};
use crate::frame_types::{FrameSubType, FrameType};

/// Parse the first two bytes of any frame.
pub fn parse_frame_control(input: &[u8]) -> IResult<&[u8], FrameControl> {
    let (input, first) = parse_u8(input)?;
    let (input, flags) = parse_u8(input)?;

    let frame_type = FrameType::from_bits(first >> 2);
    let frame_subtype = FrameSubType::from_bits(frame_type, first >> 4);

    Ok((
        input,
        FrameControl {
            protocol_version: first & 0b11,
            frame_type,
            frame_subtype,
            flags,
        },
    ))
}

pub fn parse_mac_address(input: &[u8]) -> IResult<&[u8], MacAddress> {
    let (input, bytes) = take(6usize)(input)?;
    Ok((
        input,
        MacAddress([bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5]]),
    ))
}

/// Inverse of [SequenceControl::encode]: the low byte of the counter comes
/// first, the top nibble of byte two folds back into bits 12..16.
pub fn parse_sequence_control(input: &[u8]) -> IResult<&[u8], SequenceControl> {
    let (input, low) = parse_u8(input)?;
    let (input, high) = parse_u8(input)?;

    Ok((
        input,
        SequenceControl {
            fragment_number: high & 0x0F,
            sequence_number: u16::from(low) | (u16::from(high & 0xF0) << 4),
        },
    ))
}

/// Parse the fixed 22 bytes that follow the FrameControl header of every
/// management frame.
pub fn parse_management_header(
    frame_control: FrameControl,
    input: &[u8],
) -> IResult<&[u8], ManagementHeader> {
    let (input, duration) = take(2usize)(input)?;
    let (input, address_1) = parse_mac_address(input)?;
    let (input, address_2) = parse_mac_address(input)?;
    let (input, address_3) = parse_mac_address(input)?;
    let (input, sequence_control) = parse_sequence_control(input)?;

    Ok((
        input,
        ManagementHeader {
            frame_control,
            duration: [duration[0], duration[1]],
            address_1,
            address_2,
            address_3,
            sequence_control,
        },
    ))
}

/// Parse the tagged element tail of a management frame, preserving order.
/// A truncated trailing element ends the list rather than failing the whole
/// frame; over-the-air corruption is routine.
pub fn parse_elements(mut input: &[u8]) -> IResult<&[u8], ElementList> {
    let mut elements = ElementList::new();

    while input.len() >= 2 {
        let id = input[0];
        let length = input[1] as usize;
        if input.len() < 2 + length {
            break;
        }
        elements
            .elements
            .push(InformationElement::new(id, input[2..2 + length].to_vec()));
        input = &input[2 + length..];
    }

    Ok((input, elements))
}
