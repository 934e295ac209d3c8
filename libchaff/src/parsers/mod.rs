mod components;
mod frame_types;

pub use components::*;
pub use frame_types::*;

/// Borrowed view of the fields the receive filters key on.
///
/// The filters run in the driver's RX context, so these helpers never
/// allocate; they hand back slices into the caller's buffer.
#[derive(Debug)]
pub struct VendorActionView<'a> {
    pub transmitter: &'a [u8],
    pub category: u8,
    pub oui: [u8; 3],
}

/// Extract the SSID payload of a raw probe request, if the frame carries a
/// non-wildcard SSID element in leading position.
pub fn peek_probe_ssid(frame: &[u8]) -> Option<&[u8]> {
    if frame.first() != Some(&0x40) {
        return None;
    }
    let elements = frame.get(24..)?;
    if *elements.first()? != 0 {
        return None;
    }
    let length = *elements.get(1)? as usize;
    elements.get(2..2 + length)
}

/// Extract the transmitter address, category code and OUI of a raw action
/// frame.
pub fn peek_vendor_action(frame: &[u8]) -> Option<VendorActionView<'_>> {
    if frame.first() != Some(&0xD0) {
        return None;
    }
    let transmitter = frame.get(10..16)?;
    let category = *frame.get(24)?;
    let oui = frame.get(25..28)?;
    Some(VendorActionView {
        transmitter,
        category,
        oui: [oui[0], oui[1], oui[2]],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_probe_ssid() {
        let mut frame = vec![0x40, 0x00, 0x00, 0x00];
        frame.extend([0xFF; 6]);
        frame.extend([0x02; 6]);
        frame.extend([0xFF; 6]);
        frame.extend([0x64, 0x00]);
        frame.extend([0x00, 0x04, b'H', b'o', b'm', b'e']);

        assert_eq!(peek_probe_ssid(&frame), Some(&b"Home"[..]));

        // Truncated element payloads are rejected rather than sliced short.
        frame.truncate(frame.len() - 2);
        assert_eq!(peek_probe_ssid(&frame), None);
    }

    #[test]
    fn test_peek_vendor_action() {
        let mut frame = vec![0xD0, 0x00, 0x00, 0x00];
        frame.extend([0xFF; 6]);
        frame.extend([0xAB; 6]);
        frame.extend([0xFF; 6]);
        frame.extend([0x00, 0x00]);
        frame.push(127);
        frame.extend([0x18, 0xFE, 0x34]);
        frame.extend([0x01, 0x02, 0x03]);

        let view = peek_vendor_action(&frame).expect("well-formed action frame");
        assert_eq!(view.category, 127);
        assert_eq!(view.oui, [0x18, 0xFE, 0x34]);
        assert_eq!(view.transmitter, &[0xAB; 6]);

        assert!(peek_vendor_action(&frame[..20]).is_none());
    }
}
