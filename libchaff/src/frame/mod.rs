pub mod components;
mod data;
mod management;

pub use data::CipherData;
pub use management::{Authentication, AssociationRequest, Beacon, ProbeRequest, VendorAction};

use crate::traits::Addresses;
use components::MacAddress;

/// All frame variants this library understands.
#[derive(Clone, Debug)]
pub enum Frame {
    ProbeRequest(ProbeRequest),
    Beacon(Beacon),
    Authentication(Authentication),
    AssociationRequest(AssociationRequest),
    VendorAction(VendorAction),
    CipherData(CipherData),
}

impl Addresses for Frame {
    fn src(&self) -> Option<&MacAddress> {
        match self {
            Frame::ProbeRequest(inner) => inner.header.src(),
            Frame::Beacon(inner) => inner.header.src(),
            Frame::Authentication(inner) => inner.header.src(),
            Frame::AssociationRequest(inner) => inner.header.src(),
            Frame::VendorAction(inner) => inner.header.src(),
            Frame::CipherData(inner) => inner.header.src(),
        }
    }

    fn dest(&self) -> &MacAddress {
        match self {
            Frame::ProbeRequest(inner) => inner.header.dest(),
            Frame::Beacon(inner) => inner.header.dest(),
            Frame::Authentication(inner) => inner.header.dest(),
            Frame::AssociationRequest(inner) => inner.header.dest(),
            Frame::VendorAction(inner) => inner.header.dest(),
            Frame::CipherData(inner) => inner.header.dest(),
        }
    }

    fn bssid(&self) -> Option<&MacAddress> {
        match self {
            Frame::ProbeRequest(inner) => inner.header.bssid(),
            Frame::Beacon(inner) => inner.header.bssid(),
            Frame::Authentication(inner) => inner.header.bssid(),
            Frame::AssociationRequest(inner) => inner.header.bssid(),
            Frame::VendorAction(inner) => inner.header.bssid(),
            Frame::CipherData(inner) => inner.header.bssid(),
        }
    }
}
