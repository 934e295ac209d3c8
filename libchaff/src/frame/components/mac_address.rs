use std::fmt;

use rand::Rng;

/// This is our representation of a MAC-address
///
/// ```
/// use libchaff::frame::components::MacAddress;
///
/// let address = MacAddress([255, 255, 255, 255, 255, 255]);
/// println!("{}", address.is_broadcast());
/// // -> true
/// ```
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    pub fn broadcast() -> MacAddress {
        MacAddress([255, 255, 255, 255, 255, 255])
    }

    /// Check whether this MAC addresses the whole network.
    pub fn is_broadcast(&self) -> bool {
        self.0 == [255, 255, 255, 255, 255, 255]
    }

    /// Bit 0 of the first byte is the group bit; station addresses keep it
    /// clear.
    pub fn is_unicast(&self) -> bool {
        self.0[0] & 0x01 == 0
    }

    /// Bit 1 of the first byte marks a locally administered address, the
    /// universally understood signal for a randomized identity.
    pub fn is_locally_administered(&self) -> bool {
        self.0[0] & 0x02 != 0
    }

    /// A fully random unicast address.
    pub fn random(rng: &mut impl Rng) -> MacAddress {
        let mut bytes = [0u8; 6];
        rng.fill(&mut bytes);
        bytes[0] &= 0xFE;
        MacAddress(bytes)
    }

    /// A random locally administered unicast address, the shape modern
    /// handsets use for privacy addressing.
    pub fn random_private(rng: &mut impl Rng) -> MacAddress {
        let mut bytes = [0u8; 6];
        rng.fill(&mut bytes);
        bytes[0] = (bytes[0] & 0xFE) | 0x02;
        MacAddress(bytes)
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MacParseError {
    InvalidDigit,
    InvalidLength,
}

impl fmt::Display for MacParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Encountered an error while parsing a mac address.")
    }
}

impl std::error::Error for MacParseError {}

impl std::str::FromStr for MacAddress {
    type Err = MacParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut array = [0u8; 6];

        let bytes: Vec<&str> = input.split(':').collect();
        if bytes.len() != 6 {
            return Err(MacParseError::InvalidLength);
        }

        for (count, byte) in bytes.iter().enumerate() {
            array[count] = u8::from_str_radix(byte, 16).map_err(|_| MacParseError::InvalidDigit)?;
        }

        Ok(MacAddress(array))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_broadcast() {
        let mac = MacAddress([255, 255, 255, 255, 255, 255]);
        assert!(mac.is_broadcast())
    }

    #[test]
    fn test_format() {
        let mac = MacAddress([12, 157, 146, 197, 170, 127]);
        assert_eq!("0c:9d:92:c5:aa:7f", mac.to_string())
    }

    #[test]
    fn test_random_private() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..512 {
            let mac = MacAddress::random_private(&mut rng);
            assert!(mac.is_unicast());
            assert!(mac.is_locally_administered());
        }
    }
}
