//! Platform interface enumeration and byte counters.
//!
//! Thin shim over `sysinfo::Networks`. On Linux the descriptors are
//! enriched from `/sys/class/net`; elsewhere kind and status fall back
//! to name heuristics and address presence. Classification itself lives
//! in `classify` and never touches the OS.

use std::fs;
use std::path::PathBuf;

use sysinfo::Networks;

use crate::error::{NetError, Result};
use crate::types::{
    Counters, InterfaceDescriptor, InterfaceKey, InterfaceKind, OperationalStatus, Platform,
};

pub struct SystemNetSource {
    networks: Networks,
    platform: Platform,
}

impl SystemNetSource {
    pub fn new() -> Self {
        Self {
            networks: Networks::new_with_refreshed_list(),
            platform: Platform::current(),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Re-enumerate all interfaces and describe them. A platform layer
    /// that reports nothing yields an empty snapshot, not an error.
    pub fn snapshot(&mut self) -> Vec<InterfaceDescriptor> {
        self.networks.refresh_list();
        self.networks
            .iter()
            .map(|(name, data)| describe(self.platform, name, data))
            .collect()
    }

    /// Refresh and read the cumulative byte counters for one interface.
    pub fn read_counters(&mut self, key: &InterfaceKey) -> Result<Counters> {
        self.networks.refresh();
        match self.networks.iter().find(|(name, _)| **name == key.name) {
            Some((_, data)) => Ok(Counters {
                rx: data.total_received(),
                tx: data.total_transmitted(),
            }),
            None => Err(NetError::InterfaceGone(key.name.clone())),
        }
    }
}

fn describe(platform: Platform, name: &str, data: &sysinfo::NetworkData) -> InterfaceDescriptor {
    match platform {
        Platform::Linux => describe_linux(name),
        _ => {
            // No operstate off Linux; treat an interface with at least one
            // assigned address as operational
            let status = if data.ip_networks().is_empty() {
                OperationalStatus::Other
            } else {
                OperationalStatus::Up
            };
            InterfaceDescriptor {
                name: name.to_string(),
                description: name.to_string(),
                kind: kind_from_name(platform, name),
                status,
                link_speed_bps: 0,
            }
        }
    }
}

// ─── Linux sysfs enrichment ──────────────────────────────────────────────────

fn sys_path(name: &str) -> PathBuf {
    PathBuf::from("/sys/class/net").join(name)
}

fn describe_linux(name: &str) -> InterfaceDescriptor {
    let base = sys_path(name);

    let status = match fs::read_to_string(base.join("operstate")) {
        Ok(s) => match s.trim() {
            "up" => OperationalStatus::Up,
            "down" => OperationalStatus::Down,
            // "unknown" is what loopback and point-to-point links report
            _ => OperationalStatus::Other,
        },
        Err(_) => OperationalStatus::Other,
    };

    let arp_type = fs::read_to_string(base.join("type"))
        .ok()
        .and_then(|s| s.trim().parse::<u32>().ok());
    let wireless = base.join("wireless").exists();

    // Link speed is reported in Mb/s; absent or -1 for interfaces that
    // do not negotiate (wireless, virtio, down links)
    let link_speed_bps = fs::read_to_string(base.join("speed"))
        .ok()
        .and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|&mbps| mbps > 0)
        .map(|mbps| mbps as u64 * 1_000_000)
        .unwrap_or(0);

    let kind = refine_ethernet(linux_kind(arp_type, wireless), link_speed_bps);

    let description = fs::read_to_string(base.join("device/uevent"))
        .ok()
        .and_then(|content| {
            content
                .lines()
                .find_map(|l| l.strip_prefix("DRIVER=").map(str::to_string))
        })
        .unwrap_or_else(|| name.to_string());

    InterfaceDescriptor {
        name: name.to_string(),
        description,
        kind,
        status,
        link_speed_bps,
    }
}

/// Sub-type Ethernet by negotiated link speed, matching the granularity
/// other platforms report natively.
fn refine_ethernet(kind: InterfaceKind, link_speed_bps: u64) -> InterfaceKind {
    if kind != InterfaceKind::Ethernet {
        return kind;
    }
    match link_speed_bps {
        s if s >= 1_000_000_000 => InterfaceKind::GigabitEthernet,
        100_000_000 => InterfaceKind::FastEthernetT,
        _ => InterfaceKind::Ethernet,
    }
}

/// Map an ARPHRD type (plus the presence of a `wireless` sysfs dir) to a
/// media kind. Ethernet-framed virtual devices stay Unknown-free here;
/// the classifier's denylist handles those by name.
fn linux_kind(arp_type: Option<u32>, wireless: bool) -> InterfaceKind {
    if wireless {
        return InterfaceKind::Wireless;
    }
    match arp_type {
        Some(1) => InterfaceKind::Ethernet,
        Some(512) => InterfaceKind::Ppp,
        Some(256) => InterfaceKind::Slip,
        Some(772) => InterfaceKind::Loopback,
        // sit/ipip/gre/ip6gre/ip6tnl and the tun/tap catch-all
        Some(768) | Some(769) | Some(776) | Some(778) | Some(823) | Some(65534) => {
            InterfaceKind::Tunnel
        }
        _ => InterfaceKind::Unknown,
    }
}

// ─── Name-based fallback (Windows, macOS, others) ────────────────────────────

fn kind_from_name(platform: Platform, name: &str) -> InterfaceKind {
    let lower = name.to_ascii_lowercase();
    if lower.contains("loopback") || lower == "lo" || lower == "lo0" {
        return InterfaceKind::Loopback;
    }
    if lower.contains("tun") || lower.contains("tap") {
        return InterfaceKind::Tunnel;
    }
    if lower.contains("ppp") {
        return InterfaceKind::Ppp;
    }
    if lower.contains("modem") || lower.contains("mobile broadband") {
        return InterfaceKind::Modem;
    }
    if lower.contains("isdn") {
        return InterfaceKind::Isdn;
    }
    if lower.contains("dsl") {
        return InterfaceKind::Dsl;
    }
    match platform {
        Platform::Windows => {
            if lower.contains("wi-fi") || lower.contains("wireless") || lower.contains("wlan") {
                InterfaceKind::Wireless
            } else if lower.contains("fiber") {
                InterfaceKind::FastEthernetFx
            } else {
                // Friendly names rarely say "Ethernet" for shims; the
                // classifier denylist weeds those out
                InterfaceKind::Ethernet
            }
        }
        // macOS en0 may be wired or Wi-Fi; leave it to the name-prefix rule
        _ => InterfaceKind::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linux_arp_types_map_to_kinds() {
        assert_eq!(linux_kind(Some(1), false), InterfaceKind::Ethernet);
        assert_eq!(linux_kind(Some(1), true), InterfaceKind::Wireless);
        assert_eq!(linux_kind(Some(512), false), InterfaceKind::Ppp);
        assert_eq!(linux_kind(Some(772), false), InterfaceKind::Loopback);
        assert_eq!(linux_kind(Some(65534), false), InterfaceKind::Tunnel);
        assert_eq!(linux_kind(Some(776), false), InterfaceKind::Tunnel);
        assert_eq!(linux_kind(None, false), InterfaceKind::Unknown);
    }

    #[test]
    fn ethernet_refines_by_link_speed() {
        assert_eq!(
            refine_ethernet(InterfaceKind::Ethernet, 10_000_000_000),
            InterfaceKind::GigabitEthernet
        );
        assert_eq!(
            refine_ethernet(InterfaceKind::Ethernet, 1_000_000_000),
            InterfaceKind::GigabitEthernet
        );
        assert_eq!(
            refine_ethernet(InterfaceKind::Ethernet, 100_000_000),
            InterfaceKind::FastEthernetT
        );
        // Unknown speed stays plain Ethernet
        assert_eq!(
            refine_ethernet(InterfaceKind::Ethernet, 0),
            InterfaceKind::Ethernet
        );
        // Non-ethernet kinds pass through
        assert_eq!(
            refine_ethernet(InterfaceKind::Wireless, 1_000_000_000),
            InterfaceKind::Wireless
        );
    }

    #[test]
    fn windows_names_guess_media_kind() {
        assert_eq!(
            kind_from_name(Platform::Windows, "Wi-Fi"),
            InterfaceKind::Wireless
        );
        assert_eq!(
            kind_from_name(Platform::Windows, "Ethernet 2"),
            InterfaceKind::Ethernet
        );
        assert_eq!(
            kind_from_name(Platform::Windows, "Loopback Pseudo-Interface 1"),
            InterfaceKind::Loopback
        );
        assert_eq!(
            kind_from_name(Platform::Windows, "TAP-Windows Adapter V9"),
            InterfaceKind::Tunnel
        );
    }

    #[test]
    fn macos_en_names_stay_unknown_for_prefix_rule() {
        assert_eq!(kind_from_name(Platform::MacOs, "en0"), InterfaceKind::Unknown);
        assert_eq!(
            kind_from_name(Platform::MacOs, "lo0"),
            InterfaceKind::Loopback
        );
        assert_eq!(
            kind_from_name(Platform::MacOs, "utun3"),
            InterfaceKind::Tunnel
        );
    }
}
