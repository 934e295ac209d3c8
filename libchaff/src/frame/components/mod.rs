mod frame_control;
mod header;
mod ie;
mod mac_address;
mod sequence_control;

pub use frame_control::FrameControl;
pub use header::{DataHeader, ManagementHeader};
pub use ie::*;
pub use mac_address::{MacAddress, MacParseError};
pub use sequence_control::SequenceControl;
