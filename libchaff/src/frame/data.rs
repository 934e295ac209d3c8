use crate::frame::components::DataHeader;

/// A protected QoS data frame whose body is opaque cipher text. Nothing ever
/// interprets the payload; only the outer header matters.
#[derive(Clone, Debug)]
pub struct CipherData {
    pub header: DataHeader,
    pub payload: Vec<u8>,
}

impl CipherData {
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = self.header.encode();
        bytes.extend_from_slice(&self.payload);
        bytes
    }
}
