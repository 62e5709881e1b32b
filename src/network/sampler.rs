//! Rate computation over one monitored interface.
//!
//! An explicit state machine instead of ambient mutable counters, so the
//! whole thing is testable with fabricated timestamps and readings:
//! `Unbound` (nothing selected) → `Baselined` (one reading taken, no
//! elapsed time yet) → `Tracking` (rates computable) → back to `Unbound`
//! when the adapter disappears.

use std::time::SystemTime;

use crate::types::{Counters, InterfaceDescriptor, InterfaceKey, SampleEvent, UnavailableReason};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Baselined,
    Tracking,
}

/// Counter baseline plus totals accumulated since selection. Exclusively
/// owned by the sampler; discarded whenever the interface changes.
#[derive(Clone, Debug)]
struct ActiveSelection {
    key: InterfaceKey,
    phase: Phase,
    baseline_rx: u64,
    baseline_tx: u64,
    /// None until the first tick after selection.
    baseline_at: Option<SystemTime>,
    total_down: u64,
    total_up: u64,
}

#[derive(Default)]
pub struct Sampler {
    selection: Option<ActiveSelection>,
}

impl Sampler {
    pub fn new() -> Self {
        Self { selection: None }
    }

    /// Start monitoring `iface`. `reading` is the counter snapshot taken
    /// at selection time; a failed read is a valid start for a brand-new
    /// or transiently unreadable adapter, so None baselines at zero.
    /// Accumulated totals always restart from zero.
    pub fn bind(&mut self, iface: &InterfaceDescriptor, reading: Option<Counters>) {
        let counters = reading.unwrap_or(Counters { rx: 0, tx: 0 });
        self.selection = Some(ActiveSelection {
            key: iface.key(),
            phase: Phase::Baselined,
            baseline_rx: counters.rx,
            baseline_tx: counters.tx,
            baseline_at: None,
            total_down: 0,
            total_up: 0,
        });
    }

    /// Stop monitoring. Idempotent.
    pub fn unbind(&mut self) {
        self.selection = None;
    }

    pub fn is_bound(&self) -> bool {
        self.selection.is_some()
    }

    /// Identity of the monitored interface, if any.
    pub fn key(&self) -> Option<&InterfaceKey> {
        self.selection.as_ref().map(|s| &s.key)
    }

    /// Process one sampling tick. `reading` is the current counter
    /// snapshot for the monitored interface, None when the read failed.
    pub fn tick(&mut self, now: SystemTime, reading: Option<Counters>) -> SampleEvent {
        let Some(mut sel) = self.selection.take() else {
            return SampleEvent::Unavailable(UnavailableReason::NotSelected);
        };
        let Some(counters) = reading else {
            // Adapter removed, disabled, or asleep; the selection stays
            // dropped and the caller reselects from a fresh snapshot
            return SampleEvent::Unavailable(UnavailableReason::ReadFailed);
        };

        // Seconds since the baseline, if the clock moved forward. In
        // Baselined there is no baseline timestamp yet; after a backwards
        // or stalled clock (sleep/resume, adjustment) elapsed is useless.
        let elapsed = match (sel.phase, sel.baseline_at) {
            (Phase::Tracking, Some(at)) => now
                .duration_since(at)
                .ok()
                .map(|d| d.as_secs_f64())
                .filter(|&secs| secs > 0.0),
            _ => None,
        };

        let event = match elapsed {
            None => SampleEvent::Unavailable(UnavailableReason::NoElapsed),
            Some(secs) => {
                // A negative raw delta (32/64-bit counter wrap, driver
                // reset) clamps to zero: "no data this tick", never
                // negative throughput
                let delta_down = counters.rx.saturating_sub(sel.baseline_rx);
                let delta_up = counters.tx.saturating_sub(sel.baseline_tx);
                sel.total_down = sel.total_down.saturating_add(delta_down);
                sel.total_up = sel.total_up.saturating_add(delta_up);
                SampleEvent::Updated {
                    rate_down: delta_down as f64 / secs,
                    rate_up: delta_up as f64 / secs,
                    total_down: sel.total_down,
                    total_up: sel.total_up,
                }
            }
        };

        sel.baseline_rx = counters.rx;
        sel.baseline_tx = counters.tx;
        sel.baseline_at = Some(now);
        sel.phase = Phase::Tracking;
        self.selection = Some(sel);
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{InterfaceKind, OperationalStatus};
    use std::time::Duration;

    fn iface(name: &str) -> InterfaceDescriptor {
        InterfaceDescriptor {
            name: name.to_string(),
            description: name.to_string(),
            kind: InterfaceKind::Ethernet,
            status: OperationalStatus::Up,
            link_speed_bps: 0,
        }
    }

    fn t(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn counters(rx: u64, tx: u64) -> Option<Counters> {
        Some(Counters { rx, tx })
    }

    #[test]
    fn unbound_sampler_requests_reselection() {
        let mut sampler = Sampler::new();
        let event = sampler.tick(t(1), counters(100, 100));
        assert_eq!(
            event,
            SampleEvent::Unavailable(UnavailableReason::NotSelected)
        );
        assert!(matches!(
            event,
            SampleEvent::Unavailable(r) if r.needs_reselect()
        ));
    }

    #[test]
    fn first_tick_only_establishes_the_baseline() {
        let mut sampler = Sampler::new();
        sampler.bind(&iface("eth0"), counters(1000, 50));
        // Even with new counter values, no elapsed time exists yet
        let event = sampler.tick(t(10), counters(9999, 50));
        assert_eq!(event, SampleEvent::Unavailable(UnavailableReason::NoElapsed));
    }

    #[test]
    fn rates_are_delta_over_elapsed() {
        let mut sampler = Sampler::new();
        sampler.bind(&iface("eth0"), counters(1000, 0));
        sampler.tick(t(10), counters(1000, 0));
        let event = sampler.tick(t(12), counters(2000, 500));
        match event {
            SampleEvent::Updated {
                rate_down,
                rate_up,
                total_down,
                total_up,
            } => {
                assert_eq!(rate_down, 500.0);
                assert_eq!(rate_up, 250.0);
                assert_eq!(total_down, 1000);
                assert_eq!(total_up, 500);
            }
            other => panic!("expected Updated, got {:?}", other),
        }
    }

    #[test]
    fn totals_accumulate_across_ticks() {
        let mut sampler = Sampler::new();
        sampler.bind(&iface("eth0"), counters(0, 0));
        sampler.tick(t(1), counters(0, 0));
        sampler.tick(t(2), counters(300, 30));
        let event = sampler.tick(t(3), counters(1000, 100));
        match event {
            SampleEvent::Updated {
                total_down,
                total_up,
                ..
            } => {
                assert_eq!(total_down, 1000);
                assert_eq!(total_up, 100);
            }
            other => panic!("expected Updated, got {:?}", other),
        }
    }

    #[test]
    fn counter_reset_clamps_to_zero() {
        let mut sampler = Sampler::new();
        sampler.bind(&iface("eth0"), counters(5000, 5000));
        sampler.tick(t(1), counters(5000, 5000));
        // Driver reload reset the counters
        let event = sampler.tick(t(2), counters(100, 100));
        match event {
            SampleEvent::Updated {
                rate_down,
                rate_up,
                total_down,
                total_up,
            } => {
                assert_eq!(rate_down, 0.0);
                assert_eq!(rate_up, 0.0);
                assert_eq!(total_down, 0);
                assert_eq!(total_up, 0);
            }
            other => panic!("expected Updated, got {:?}", other),
        }
        // The reset reading became the new baseline
        let event = sampler.tick(t(3), counters(1124, 100));
        assert!(matches!(
            event,
            SampleEvent::Updated { rate_down, .. } if rate_down == 1024.0
        ));
    }

    #[test]
    fn backwards_clock_skips_rate_computation() {
        let mut sampler = Sampler::new();
        sampler.bind(&iface("eth0"), counters(0, 0));
        sampler.tick(t(100), counters(0, 0));
        // Clock jumped backwards (e.g. adjustment after resume)
        let event = sampler.tick(t(50), counters(4000, 0));
        assert_eq!(event, SampleEvent::Unavailable(UnavailableReason::NoElapsed));
        assert!(!UnavailableReason::NoElapsed.needs_reselect());
        // Baseline moved to the new reading, so tracking resumes cleanly
        let event = sampler.tick(t(52), counters(5000, 0));
        assert!(matches!(
            event,
            SampleEvent::Updated { rate_down, .. } if rate_down == 500.0
        ));
    }

    #[test]
    fn zero_elapsed_emits_no_rate() {
        let mut sampler = Sampler::new();
        sampler.bind(&iface("eth0"), counters(0, 0));
        sampler.tick(t(5), counters(0, 0));
        let event = sampler.tick(t(5), counters(1000, 0));
        assert_eq!(event, SampleEvent::Unavailable(UnavailableReason::NoElapsed));
    }

    #[test]
    fn read_failure_unbinds_until_reselection() {
        let mut sampler = Sampler::new();
        sampler.bind(&iface("eth0"), counters(0, 0));
        sampler.tick(t(1), counters(0, 0));

        let event = sampler.tick(t(2), None);
        assert_eq!(event, SampleEvent::Unavailable(UnavailableReason::ReadFailed));
        assert!(!sampler.is_bound());

        // Stays unavailable until a new selection is made
        let event = sampler.tick(t(3), counters(100, 100));
        assert_eq!(
            event,
            SampleEvent::Unavailable(UnavailableReason::NotSelected)
        );

        sampler.bind(&iface("eth0"), counters(100, 100));
        sampler.tick(t(4), counters(100, 100));
        assert!(matches!(
            sampler.tick(t(5), counters(200, 100)),
            SampleEvent::Updated { .. }
        ));
    }

    #[test]
    fn switching_interfaces_resets_totals() {
        let mut sampler = Sampler::new();
        sampler.bind(&iface("eth0"), counters(0, 0));
        sampler.tick(t(1), counters(0, 0));
        let event = sampler.tick(t(2), counters(10_000, 1000));
        assert!(matches!(
            event,
            SampleEvent::Updated { total_down: 10_000, total_up: 1000, .. }
        ));

        sampler.bind(&iface("wlan0"), counters(500, 500));
        assert_eq!(sampler.key().unwrap().name, "wlan0");
        sampler.tick(t(10), counters(500, 500));
        let event = sampler.tick(t(11), counters(600, 650));
        // Totals restarted from zero at selection, not carried over
        assert!(matches!(
            event,
            SampleEvent::Updated { total_down: 100, total_up: 150, .. }
        ));
    }

    #[test]
    fn failed_selection_read_baselines_at_zero() {
        let mut sampler = Sampler::new();
        sampler.bind(&iface("eth0"), None);
        assert!(sampler.is_bound());
        // First tick stores the real reading as baseline, no fabricated rate
        let event = sampler.tick(t(1), counters(7_000_000, 9000));
        assert_eq!(event, SampleEvent::Unavailable(UnavailableReason::NoElapsed));
    }

    #[test]
    fn unbind_is_idempotent() {
        let mut sampler = Sampler::new();
        sampler.bind(&iface("eth0"), counters(0, 0));
        sampler.unbind();
        sampler.unbind();
        assert!(!sampler.is_bound());
    }
}
