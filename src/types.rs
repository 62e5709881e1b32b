use std::collections::VecDeque;

// ─── Platform ────────────────────────────────────────────────────────────────

/// Host platform, used to select the classification rule table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl Platform {
    /// Platform of the running binary.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }
}

// ─── Interface kind ──────────────────────────────────────────────────────────

/// Media type of a network interface, as reported by the platform.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InterfaceKind {
    Ethernet,
    FastEthernetT,
    FastEthernetFx,
    GigabitEthernet,
    Wireless,
    Ppp,
    Slip,
    Modem,
    Isdn,
    Dsl,
    Tunnel,
    Loopback,
    Unknown,
}

impl InterfaceKind {
    pub fn label(&self) -> &str {
        match self {
            Self::Ethernet => "Ethernet",
            Self::FastEthernetT => "FastEthernet",
            Self::FastEthernetFx => "FastEthernet(FX)",
            Self::GigabitEthernet => "GigabitEthernet",
            Self::Wireless => "Wireless",
            Self::Ppp => "PPP",
            Self::Slip => "SLIP",
            Self::Modem => "Modem",
            Self::Isdn => "ISDN",
            Self::Dsl => "DSL",
            Self::Tunnel => "Tunnel",
            Self::Loopback => "Loopback",
            Self::Unknown => "Unknown",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            Self::Ethernet | Self::GigabitEthernet => Color::Green,
            Self::FastEthernetT | Self::FastEthernetFx => Color::LightGreen,
            Self::Wireless => Color::Cyan,
            Self::Ppp | Self::Dsl | Self::Modem | Self::Isdn | Self::Slip => Color::Yellow,
            Self::Tunnel => Color::Magenta,
            Self::Loopback => Color::DarkGray,
            Self::Unknown => Color::Gray,
        }
    }
}

// ─── Operational status ──────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperationalStatus {
    Up,
    Down,
    Other,
}

impl OperationalStatus {
    pub fn label(&self) -> &str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Other => "OTHER",
        }
    }

    pub fn color(&self) -> ratatui::style::Color {
        use ratatui::style::Color;
        match self {
            Self::Up => Color::Green,
            Self::Down => Color::Red,
            Self::Other => Color::DarkGray,
        }
    }
}

// ─── Interface descriptor ────────────────────────────────────────────────────

/// Snapshot-time view of one network interface. Never mutated in place;
/// a fresh enumeration replaces the whole set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceDescriptor {
    pub name: String,
    /// Vendor/driver label; falls back to the name where the platform
    /// provides nothing better.
    pub description: String,
    pub kind: InterfaceKind,
    pub status: OperationalStatus,
    /// Link speed in bits per second, 0 = unknown.
    pub link_speed_bps: u64,
}

impl InterfaceDescriptor {
    pub fn key(&self) -> InterfaceKey {
        InterfaceKey {
            name: self.name.clone(),
            description: self.description.clone(),
        }
    }
}

/// Stable identity across snapshots. OS handles may be re-created between
/// enumerations, so name+description is the identity that survives.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InterfaceKey {
    pub name: String,
    pub description: String,
}

// ─── Counters & sample events ────────────────────────────────────────────────

/// One reading of an interface's cumulative byte counters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Counters {
    pub rx: u64,
    pub tx: u64,
}

/// Why a tick produced no rate figures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnavailableReason {
    /// No interface is selected.
    NotSelected,
    /// The counter read failed: adapter removed, disabled, or asleep.
    ReadFailed,
    /// Baseline just established, or the clock did not move forward.
    NoElapsed,
}

impl UnavailableReason {
    /// Whether the caller should re-resolve the active interface from a
    /// fresh snapshot.
    pub fn needs_reselect(&self) -> bool {
        matches!(self, Self::NotSelected | Self::ReadFailed)
    }
}

/// Outcome of one sampling tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SampleEvent {
    Updated {
        /// Bytes per second since the previous reading.
        rate_down: f64,
        rate_up: f64,
        /// Bytes accumulated since the interface was selected.
        total_down: u64,
        total_up: u64,
    },
    Unavailable(UnavailableReason),
}

// ─── Selection mode ──────────────────────────────────────────────────────────

/// How the active interface was chosen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionMode {
    /// Best candidate wins, sticky across refreshes.
    Auto,
    /// User pinned an interface by name from the Interfaces tab.
    Pinned(String),
}

// ─── Speed history ───────────────────────────────────────────────────────────

pub struct SpeedHistory {
    pub download: VecDeque<f64>,
    pub upload: VecDeque<f64>,
    pub max_points: usize,
}

impl SpeedHistory {
    pub fn new(max_points: usize) -> Self {
        Self {
            download: VecDeque::from(vec![0.0; max_points]),
            upload: VecDeque::from(vec![0.0; max_points]),
            max_points,
        }
    }

    pub fn push(&mut self, down: f64, up: f64) {
        self.download.push_back(down);
        self.upload.push_back(up);
        if self.download.len() > self.max_points {
            self.download.pop_front();
        }
        if self.upload.len() > self.max_points {
            self.upload.pop_front();
        }
    }
}

// ─── Bottom pane tab ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BottomTab {
    Interfaces,
    Events,
}

impl BottomTab {
    pub fn next(&self) -> Self {
        match self {
            Self::Interfaces => Self::Events,
            Self::Events => Self::Interfaces,
        }
    }
}
