//! The radio seam.
//!
//! Channel control, TX and the promiscuous RX callback are owned by the
//! platform; everything above talks through [RadioDriver]. Hardware backends
//! live out of tree. [DryRunRadio] honors the same contract for development
//! soak runs and for tests that assert on the emitted frame stream.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RadioError {
    #[error("channel {0} rejected by driver")]
    ChannelRejected(u8),
    #[error("transmit failed: {0}")]
    TxFailed(String),
    #[error("radio initialization failed: {0}")]
    InitFailed(String),
}

/// What the driver saw the frame as. Management frames are the only kind
/// the filters care about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RxPacketType {
    Mgmt,
    Ctl,
    Data,
}

/// Installed RX filter. Runs in the driver's receive context: it must not
/// allocate, must not block, and may only push fixed-size records into a
/// bounded queue.
pub type RxCallback = Box<dyn FnMut(&[u8], RxPacketType) + Send>;

pub trait RadioDriver {
    /// Instantaneous channel switch, 5 GHz channels included on dual-band
    /// hardware.
    fn set_channel(&mut self, channel: u8) -> Result<(), RadioError>;

    /// Transmit ceiling in quarter-dBm units.
    fn set_max_tx_power(&mut self, power: i8);

    /// Raw frame out, no radiotap header. Failures are reported but callers
    /// ignore them by contract.
    fn tx_80211(&mut self, frame: &[u8]) -> Result<(), RadioError>;

    fn set_promiscuous(&mut self, enabled: bool);

    /// Swap the installed RX filter. Only the main task calls this, never
    /// from inside a callback.
    fn set_promiscuous_rx_cb(&mut self, callback: Option<RxCallback>);
}

/// A captured transmission, as the air would have seen it.
#[derive(Clone, Debug)]
pub struct CapturedFrame {
    pub channel: u8,
    pub power: i8,
    pub bytes: Vec<u8>,
}

/// Software backend: counts everything, optionally records frames, and lets
/// callers push received packets through the installed filter.
pub struct DryRunRadio {
    pub channel: u8,
    pub power: i8,
    pub promiscuous: bool,
    pub tx_count: u64,
    record: bool,
    frames: Vec<CapturedFrame>,
    callback: Option<RxCallback>,
}

impl DryRunRadio {
    pub fn new() -> DryRunRadio {
        DryRunRadio {
            channel: 1,
            power: 80,
            promiscuous: false,
            tx_count: 0,
            record: false,
            frames: Vec::new(),
            callback: None,
        }
    }

    /// A backend that keeps every transmitted frame. Test use only; an
    /// unbounded capture would eat the heap budget in a soak run.
    pub fn recording() -> DryRunRadio {
        DryRunRadio {
            record: true,
            ..DryRunRadio::new()
        }
    }

    pub fn frames(&self) -> &[CapturedFrame] {
        &self.frames
    }

    pub fn clear_frames(&mut self) {
        self.frames.clear();
    }

    /// Deliver a packet to the installed filter, as the driver would from
    /// its RX path.
    pub fn inject_rx(&mut self, frame: &[u8], packet_type: RxPacketType) {
        if !self.promiscuous {
            return;
        }
        if let Some(callback) = self.callback.as_mut() {
            callback(frame, packet_type);
        }
    }

    pub fn has_rx_callback(&self) -> bool {
        self.callback.is_some()
    }
}

impl Default for DryRunRadio {
    fn default() -> Self {
        DryRunRadio::new()
    }
}

impl RadioDriver for DryRunRadio {
    fn set_channel(&mut self, channel: u8) -> Result<(), RadioError> {
        self.channel = channel;
        Ok(())
    }

    fn set_max_tx_power(&mut self, power: i8) {
        self.power = power;
    }

    fn tx_80211(&mut self, frame: &[u8]) -> Result<(), RadioError> {
        self.tx_count += 1;
        if self.record {
            self.frames.push(CapturedFrame {
                channel: self.channel,
                power: self.power,
                bytes: frame.to_vec(),
            });
        }
        Ok(())
    }

    fn set_promiscuous(&mut self, enabled: bool) {
        self.promiscuous = enabled;
    }

    fn set_promiscuous_rx_cb(&mut self, callback: Option<RxCallback>) {
        self.callback = callback;
    }
}
