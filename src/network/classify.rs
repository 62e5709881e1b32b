//! Interface classification and selection.
//!
//! The OS reports a zoo of adapters: filter drivers, hypervisor NICs,
//! tunnels, shims. Everything here is a pure function of the snapshot:
//! filter to the interfaces that look like genuine physical uplinks,
//! rank them, and keep the selection stable across refreshes.

use std::cmp::Reverse;

use crate::types::{InterfaceDescriptor, InterfaceKey, InterfaceKind, OperationalStatus, Platform};

// ─── Denylists ───────────────────────────────────────────────────────────────

/// Windows ships many filter/miniport/shim drivers that enumerate as
/// ordinary adapters; the list is correspondingly long.
const WINDOWS_DENY: &[&str] = &[
    "virtual",
    "vmware",
    "virtualbox",
    "vbox",
    "hyper-v",
    "vethernet",
    "docker",
    "wsl",
    "loopback",
    "pseudo",
    "tunnel",
    "teredo",
    "isatap",
    "6to4",
    "tap",
    "tun",
    "vpn",
    "wireguard",
    "openvpn",
    "tailscale",
    "zerotier",
    "hamachi",
    "bluetooth",
    "miniport",
    "filter",
    "npcap",
    "winpcap",
    "qos",
    "scheduler",
    "lightweight",
    "debug",
    "bridge",
];

const LINUX_DENY: &[&str] = &[
    "docker",
    "veth",
    "virbr",
    "vmnet",
    "vbox",
    "bridge",
    "br-",
    "tun",
    "tap",
    "wg",
    "zt",
    "tailscale",
    "dummy",
    "ifb",
    "vnet",
];

const MACOS_DENY: &[&str] = &[
    "bridge",
    "utun",
    "awdl",
    "llw",
    "gif",
    "stf",
    "vmnet",
    "vnic",
    "vboxnet",
    "feth",
];

const GENERIC_DENY: &[&str] = &[
    "loopback",
    "tunnel",
    "tun",
    "tap",
    "vpn",
    "bridge",
    "docker",
    "virtual",
];

/// Windows reports synthetic Wi-Fi service components with the Wireless
/// kind; only canonically named adapters are real.
const WINDOWS_WIRELESS_NAMES: &[&str] = &["wi-fi", "wlan", "wireless network connection"];

fn deny_tokens(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Windows => WINDOWS_DENY,
        Platform::Linux => LINUX_DENY,
        Platform::MacOs => MACOS_DENY,
        Platform::Other => GENERIC_DENY,
    }
}

// ─── Filtering ───────────────────────────────────────────────────────────────

fn is_denied(iface: &InterfaceDescriptor, tokens: &[&str]) -> bool {
    let name = iface.name.to_ascii_lowercase();
    let desc = iface.description.to_ascii_lowercase();
    tokens
        .iter()
        .any(|t| name.contains(t) || desc.contains(t))
}

/// Name prefixes that physical adapters carry on unixy platforms, used
/// when the platform reports the kind as Unknown.
fn physical_name_prefix(name: &str, platform: Platform) -> bool {
    let name = name.to_ascii_lowercase();
    match platform {
        Platform::MacOs => name.starts_with("en") && !name.contains("bridge"),
        _ => ["eth", "en", "wlan", "wl"]
            .iter()
            .any(|p| name.starts_with(p)),
    }
}

fn kind_allowed(iface: &InterfaceDescriptor, platform: Platform) -> bool {
    match platform {
        Platform::Windows => match iface.kind {
            // Real Wi-Fi adapters carry a canonical name; filter/service
            // components that enumerate as Wireless do not.
            InterfaceKind::Wireless => {
                let name = iface.name.to_ascii_lowercase();
                WINDOWS_WIRELESS_NAMES.iter().any(|p| name.starts_with(p))
            }
            InterfaceKind::Ethernet
            | InterfaceKind::FastEthernetT
            | InterfaceKind::FastEthernetFx
            | InterfaceKind::GigabitEthernet => true,
            _ => false,
        },
        _ => match iface.kind {
            InterfaceKind::Unknown => physical_name_prefix(&iface.name, platform),
            InterfaceKind::Ethernet
            | InterfaceKind::FastEthernetT
            | InterfaceKind::FastEthernetFx
            | InterfaceKind::GigabitEthernet
            | InterfaceKind::Wireless
            | InterfaceKind::Ppp => true,
            // DSL/ISDN/modem/slip never carry the uplink we want to watch
            _ => false,
        },
    }
}

/// Whether one descriptor looks like a genuine physical uplink.
pub fn is_physical(iface: &InterfaceDescriptor, platform: Platform) -> bool {
    if iface.status != OperationalStatus::Up {
        return false;
    }
    // Kind-level rejects come before any platform rule
    if matches!(iface.kind, InterfaceKind::Loopback | InterfaceKind::Tunnel) {
        return false;
    }
    if is_denied(iface, deny_tokens(platform)) {
        return false;
    }
    kind_allowed(iface, platform)
}

// ─── Ranking ─────────────────────────────────────────────────────────────────

/// Sort key for candidates, higher = preferred.
pub fn priority(iface: &InterfaceDescriptor, platform: Platform) -> u8 {
    if platform == Platform::Linux {
        // Predictable-naming prefixes outrank whatever kind the platform
        // layer managed to guess
        let name = iface.name.to_ascii_lowercase();
        if name.starts_with("en") {
            return 10;
        }
        if name.starts_with("wl") {
            return 9;
        }
    }
    match iface.kind {
        InterfaceKind::Ethernet => 10,
        InterfaceKind::Wireless => 9,
        InterfaceKind::GigabitEthernet => 8,
        InterfaceKind::FastEthernetT => 7,
        InterfaceKind::Ppp => 6,
        _ => 5,
    }
}

/// Filter a raw snapshot down to physical-looking interfaces, ranked by
/// descending priority. The sort is stable, so ties keep enumeration
/// order and an unchanged snapshot classifies identically every time.
pub fn classify(snapshot: &[InterfaceDescriptor], platform: Platform) -> Vec<InterfaceDescriptor> {
    let mut candidates: Vec<InterfaceDescriptor> = snapshot
        .iter()
        .filter(|d| is_physical(d, platform))
        .cloned()
        .collect();
    candidates.sort_by_key(|d| Reverse(priority(d, platform)));
    candidates
}

// ─── Selection ───────────────────────────────────────────────────────────────

/// Best candidate, or None when nothing physical is up. "No interface"
/// is an ordinary state here, never an error.
pub fn select_default(candidates: &[InterfaceDescriptor]) -> Option<&InterfaceDescriptor> {
    candidates.first()
}

/// Pick the interface to monitor after a refresh. The previously selected
/// adapter wins while it is still present, so a refresh does not reset
/// accumulated totals needlessly; otherwise fall back to the best ranked.
pub fn reselect<'a>(
    previous: Option<&InterfaceKey>,
    candidates: &'a [InterfaceDescriptor],
) -> Option<&'a InterfaceDescriptor> {
    if let Some(prev) = previous {
        if let Some(same) = candidates.iter().find(|d| d.key() == *prev) {
            return Some(same);
        }
    }
    select_default(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iface(name: &str, kind: InterfaceKind, status: OperationalStatus) -> InterfaceDescriptor {
        InterfaceDescriptor {
            name: name.to_string(),
            description: name.to_string(),
            kind,
            status,
            link_speed_bps: 0,
        }
    }

    fn up(name: &str, kind: InterfaceKind) -> InterfaceDescriptor {
        iface(name, kind, OperationalStatus::Up)
    }

    #[test]
    fn down_interfaces_are_excluded_everywhere() {
        let snapshot = vec![
            iface("eth0", InterfaceKind::Ethernet, OperationalStatus::Down),
            iface("Ethernet", InterfaceKind::Ethernet, OperationalStatus::Other),
        ];
        for platform in [
            Platform::Windows,
            Platform::Linux,
            Platform::MacOs,
            Platform::Other,
        ] {
            assert!(classify(&snapshot, platform).is_empty());
        }
    }

    #[test]
    fn loopback_and_tunnel_kinds_never_pass() {
        let snapshot = vec![
            up("lo", InterfaceKind::Loopback),
            up("tun0", InterfaceKind::Tunnel),
        ];
        assert!(classify(&snapshot, Platform::Linux).is_empty());
        assert!(classify(&snapshot, Platform::Windows).is_empty());
    }

    #[test]
    fn denylisted_tokens_beat_any_kind() {
        let snapshot = vec![
            up("vEthernet (WSL)", InterfaceKind::Ethernet),
            up("VMware Network Adapter VMnet8", InterfaceKind::Ethernet),
        ];
        assert!(classify(&snapshot, Platform::Windows).is_empty());

        let snapshot = vec![
            up("docker0", InterfaceKind::Ethernet),
            up("veth1a2b3c", InterfaceKind::Ethernet),
        ];
        assert!(classify(&snapshot, Platform::Linux).is_empty());
    }

    #[test]
    fn windows_wireless_needs_canonical_name() {
        let filter = up("WLAN-Filter-Driver", InterfaceKind::Wireless);
        let real = up("Wi-Fi", InterfaceKind::Wireless);
        let real2 = up("Wireless Network Connection 2", InterfaceKind::Wireless);
        let candidates = classify(&[filter, real.clone(), real2.clone()], Platform::Windows);
        assert_eq!(candidates, vec![real, real2]);
    }

    #[test]
    fn windows_rejects_kinds_outside_the_whitelist() {
        let snapshot = vec![
            up("PPP adapter", InterfaceKind::Ppp),
            up("Mystery", InterfaceKind::Unknown),
            up("Ethernet", InterfaceKind::Ethernet),
        ];
        let candidates = classify(&snapshot, Platform::Windows);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Ethernet");
    }

    #[test]
    fn linux_unknown_kind_needs_physical_prefix() {
        let snapshot = vec![
            up("enp3s0", InterfaceKind::Unknown),
            up("wlp2s0", InterfaceKind::Unknown),
            up("sit0", InterfaceKind::Unknown),
        ];
        let candidates = classify(&snapshot, Platform::Linux);
        let names: Vec<&str> = candidates.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["enp3s0", "wlp2s0"]);
    }

    #[test]
    fn macos_unknown_kind_wants_en_and_no_bridge() {
        let snapshot = vec![
            up("en0", InterfaceKind::Unknown),
            up("en-bridge0", InterfaceKind::Unknown),
            up("gif0", InterfaceKind::Unknown),
        ];
        let candidates = classify(&snapshot, Platform::MacOs);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "en0");
    }

    #[test]
    fn unix_table_rejects_dialup_kinds() {
        let snapshot = vec![
            up("dsl0", InterfaceKind::Dsl),
            up("isdn0", InterfaceKind::Isdn),
            up("modem0", InterfaceKind::Modem),
            up("sl0", InterfaceKind::Slip),
        ];
        assert!(classify(&snapshot, Platform::Linux).is_empty());
        assert!(classify(&snapshot, Platform::MacOs).is_empty());
    }

    #[test]
    fn ranking_prefers_ethernet_then_wireless() {
        let snapshot = vec![
            up("ppp0", InterfaceKind::Ppp),
            up("Wi-Fi", InterfaceKind::Wireless),
            up("Ethernet", InterfaceKind::Ethernet),
        ];
        let candidates = classify(&snapshot, Platform::Windows);
        let names: Vec<&str> = candidates.iter().map(|d| d.name.as_str()).collect();
        // ppp0 is filtered on Windows; Ethernet outranks Wi-Fi
        assert_eq!(names, vec!["Ethernet", "Wi-Fi"]);
    }

    #[test]
    fn linux_name_prefix_overrides_kind_priority() {
        let en = up("enp3s0", InterfaceKind::Unknown);
        let wl = up("wlan0", InterfaceKind::Wireless);
        assert_eq!(priority(&en, Platform::Linux), 10);
        assert_eq!(priority(&wl, Platform::Linux), 9);
        // Same names off Linux fall back to kind
        assert_eq!(priority(&en, Platform::Other), 5);
        assert_eq!(priority(&wl, Platform::Other), 9);
    }

    #[test]
    fn classification_is_deterministic_and_order_stable() {
        let snapshot = vec![
            up("eth0", InterfaceKind::Ethernet),
            up("eth1", InterfaceKind::Ethernet),
            up("wlan0", InterfaceKind::Wireless),
        ];
        let first = classify(&snapshot, Platform::Other);
        let second = classify(&snapshot, Platform::Other);
        assert_eq!(first, second);
        // Equal-priority interfaces keep enumeration order
        assert_eq!(first[0].name, "eth0");
        assert_eq!(first[1].name, "eth1");
    }

    #[test]
    fn empty_snapshot_yields_empty_candidates() {
        assert!(classify(&[], Platform::Linux).is_empty());
        assert_eq!(select_default(&[]), None);
    }

    #[test]
    fn reselect_sticks_to_previous_interface() {
        let eth = up("eth0", InterfaceKind::Ethernet);
        let wlan = up("wlan0", InterfaceKind::Wireless);
        let candidates = classify(&[eth.clone(), wlan.clone()], Platform::Other);
        // wlan0 is not top-ranked, but it was selected before
        let picked = reselect(Some(&wlan.key()), &candidates).unwrap();
        assert_eq!(picked.name, "wlan0");
    }

    #[test]
    fn reselect_falls_back_when_previous_is_gone() {
        let eth = up("eth0", InterfaceKind::Ethernet);
        let gone = up("usb0", InterfaceKind::Ethernet).key();
        let candidates = classify(&[eth], Platform::Other);
        let picked = reselect(Some(&gone), &candidates).unwrap();
        assert_eq!(picked.name, "eth0");
        assert_eq!(reselect(Some(&gone), &[]), None);
    }
}
