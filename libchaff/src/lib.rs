/// Libchaff's own [Error](error::Error) implementation
pub mod error;
/// The [Frame](frame::Frame) enum and all frame structs.
pub mod frame;
/// Enums representing frame types and frame subtypes.
mod frame_types;
/// [nom] parsers for internal usage.
pub mod parsers;
/// All traits used or provided by this library.
mod traits;

use crate::error::Error;
use crate::parsers::*;

// Re-exports for user convenience
pub use crate::frame::Frame;
pub use crate::frame_types::*;
pub use crate::traits::*;

/// Parse IEEE 802.11 frames from raw bytes.
///
/// Only the frame subtypes this library can forge are handled; everything
/// else comes back as [Error::UnhandledFrameSubtype]. No FCS checks are done.
pub fn parse_frame(input: &[u8]) -> Result<Frame, Error> {
    let (input, frame_control) = parse_frame_control(input)?;

    match (frame_control.frame_type, frame_control.frame_subtype) {
        (FrameType::Management, FrameSubType::ProbeRequest) => {
            parse_probe_request(frame_control, input)
        }
        (FrameType::Management, FrameSubType::Beacon) => parse_beacon(frame_control, input),
        (FrameType::Management, FrameSubType::Authentication) => {
            parse_authentication(frame_control, input)
        }
        (FrameType::Management, FrameSubType::AssociationRequest) => {
            parse_association_request(frame_control, input)
        }
        (FrameType::Management, FrameSubType::Action) => parse_vendor_action(frame_control, input),
        (FrameType::Data, FrameSubType::QosData) => parse_cipher_data(frame_control, input),
        _ => Err(Error::UnhandledFrameSubtype(frame_control, input.to_vec())),
    }
}
