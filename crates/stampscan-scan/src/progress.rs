//! Scan progress reporting.

use tokio::sync::mpsc;

use stampscan_core::ProgressSink;

/// Decides when a percentage is worth emitting.
///
/// Percentages are recomputed once every `interval` entries from the entry
/// index over the enumerated total, and only values larger than the last one
/// emitted pass through. `finish` always yields 100.
#[derive(Debug, Clone)]
pub struct ProgressThrottle {
    total: usize,
    interval: usize,
    last: Option<u8>,
}

impl ProgressThrottle {
    /// Create a throttle for `total` entries.
    pub fn new(total: usize, interval: usize) -> Self {
        Self {
            total,
            interval: interval.max(1),
            last: None,
        }
    }

    /// Called after entry `index` has been handled.
    pub fn on_entry(&mut self, index: usize) -> Option<u8> {
        if self.total == 0 || index % self.interval != self.interval - 1 {
            return None;
        }
        let percent = ((index as u64 * 100) / self.total as u64).min(100) as u8;
        match self.last {
            Some(last) if percent <= last => None,
            _ => {
                self.last = Some(percent);
                Some(percent)
            }
        }
    }

    /// Final update.
    pub fn finish(&mut self) -> u8 {
        self.last = Some(100);
        100
    }

    /// Last value emitted, if any.
    pub fn last(&self) -> Option<u8> {
        self.last
    }
}

/// Forwards progress over a tokio channel.
///
/// Sending never blocks the scan, and updates are dropped once the receiver
/// is gone.
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    tx: mpsc::UnboundedSender<u8>,
}

impl ChannelProgress {
    /// Wrap an existing sender.
    pub fn new(tx: mpsc::UnboundedSender<u8>) -> Self {
        Self { tx }
    }

    /// Create a sink together with its receiver.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<u8>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl ProgressSink for ChannelProgress {
    fn update(&mut self, percent: u8) {
        let _ = self.tx.send(percent);
    }
}
