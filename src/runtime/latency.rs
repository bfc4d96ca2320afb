//! Stand-in for the wait a real network round-trip would incur.

use std::time::Duration;

/// How long a backend operation takes before it resolves.
///
/// `Simulated` sleeps on the tokio timer; a real backend would swap this for
/// its own I/O and keep callers unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Latency {
    /// Resolve without waiting.
    #[default]
    Immediate,
    /// Resolve after a fixed delay.
    Simulated(Duration),
}

impl Latency {
    /// Fixed delay in milliseconds; zero means [`Latency::Immediate`].
    pub fn from_millis(ms: u64) -> Self {
        if ms == 0 {
            Self::Immediate
        } else {
            Self::Simulated(Duration::from_millis(ms))
        }
    }

    /// Waits out the latency.
    pub async fn elapse(self) {
        if let Self::Simulated(delay) = self {
            tokio::time::sleep(delay).await;
        }
    }

    /// Waits out the latency, then yields `value`.
    pub async fn settle<T>(self, value: T) -> T {
        self.elapse().await;
        value
    }
}

/// Per-operation latencies for the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LatencyProfile {
    /// Before reading the listing collection.
    pub get_listings: Latency,
    /// Before creating a listing (on top of the re-read).
    pub add_listing: Latency,
    /// Before an OTP send or verify resolves.
    pub otp: Latency,
}

impl LatencyProfile {
    /// Delays matching the hosted mock backend: 800 ms, 1500 ms, 1000 ms.
    pub fn simulated() -> Self {
        Self {
            get_listings: Latency::from_millis(800),
            add_listing: Latency::from_millis(1500),
            otp: Latency::from_millis(1000),
        }
    }

    /// No delays at all.
    pub fn immediate() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn simulated_latency_advances_clock() {
        let start = tokio::time::Instant::now();
        let got = Latency::from_millis(800).settle(7).await;
        assert_eq!(got, 7);
        assert!(start.elapsed() >= Duration::from_millis(800));
    }

    #[test]
    fn zero_millis_is_immediate() {
        assert_eq!(Latency::from_millis(0), Latency::Immediate);
    }
}
