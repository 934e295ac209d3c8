/// A single tagged information element: `{id, length, payload}`.
///
/// Element ID 255 introduces the extension namespace, where the first
/// payload byte is the extension id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InformationElement {
    pub id: u8,
    pub data: Vec<u8>,
}

pub const ELEMENT_ID_SSID: u8 = 0;
pub const ELEMENT_ID_SUPPORTED_RATES: u8 = 1;
pub const ELEMENT_ID_DS_PARAMETER: u8 = 3;
pub const ELEMENT_ID_HT_CAPABILITIES: u8 = 45;
pub const ELEMENT_ID_RSN: u8 = 48;
pub const ELEMENT_ID_HT_OPERATION: u8 = 61;
pub const ELEMENT_ID_EXTENDED_CAPABILITIES: u8 = 127;
pub const ELEMENT_ID_VHT_CAPABILITIES: u8 = 191;
pub const ELEMENT_ID_VHT_OPERATION: u8 = 192;
pub const ELEMENT_ID_VENDOR: u8 = 221;
pub const ELEMENT_ID_EXTENSION: u8 = 255;

pub const EXTENSION_ID_HE_CAPABILITIES: u8 = 35;

impl InformationElement {
    pub fn new(id: u8, data: impl Into<Vec<u8>>) -> InformationElement {
        InformationElement {
            id,
            data: data.into(),
        }
    }

    /// An element in the 802.11ax extension namespace. The extension id is
    /// folded into the payload, so the length byte covers `payload + 1`.
    pub fn extension(ext_id: u8, data: &[u8]) -> InformationElement {
        let mut payload = Vec::with_capacity(data.len() + 1);
        payload.push(ext_id);
        payload.extend_from_slice(data);
        InformationElement {
            id: ELEMENT_ID_EXTENSION,
            data: payload,
        }
    }

    pub fn extension_id(&self) -> Option<u8> {
        if self.id == ELEMENT_ID_EXTENSION {
            self.data.first().copied()
        } else {
            None
        }
    }

    pub fn encode_into(&self, bytes: &mut Vec<u8>) {
        bytes.push(self.id);
        bytes.push(self.data.len() as u8);
        bytes.extend_from_slice(&self.data);
    }
}

/// The ordered tail of a management frame.
///
/// The tag set *and its order* are a device fingerprint, so elements are
/// kept exactly in insertion order rather than in per-field slots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementList {
    pub elements: Vec<InformationElement>,
}

impl ElementList {
    pub fn new() -> ElementList {
        ElementList::default()
    }

    pub fn push(&mut self, id: u8, data: impl Into<Vec<u8>>) {
        self.elements.push(InformationElement::new(id, data));
    }

    pub fn push_extension(&mut self, ext_id: u8, data: &[u8]) {
        self.elements.push(InformationElement::extension(ext_id, data));
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        for element in &self.elements {
            element.encode_into(&mut bytes);
        }
        bytes
    }

    pub fn first(&self, id: u8) -> Option<&InformationElement> {
        self.elements.iter().find(|element| element.id == id)
    }

    pub fn has(&self, id: u8) -> bool {
        self.first(id).is_some()
    }

    pub fn has_extension(&self, ext_id: u8) -> bool {
        self.elements
            .iter()
            .any(|element| element.extension_id() == Some(ext_id))
    }

    pub fn count(&self, id: u8) -> usize {
        self.elements.iter().filter(|element| element.id == id).count()
    }

    /// The SSID element payload, if one is present. An empty slice is the
    /// wildcard SSID.
    pub fn ssid_bytes(&self) -> Option<&[u8]> {
        self.first(ELEMENT_ID_SSID)
            .map(|element| element.data.as_slice())
    }

    pub fn ssid(&self) -> Option<String> {
        self.ssid_bytes()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }
}
