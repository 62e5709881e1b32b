use std::time::{Instant, SystemTime};

use crossterm::event::KeyCode;

use crate::config::Config;
use crate::network::classify;
use crate::network::sampler::Sampler;
use crate::network::source::SystemNetSource;
use crate::types::*;
use crate::{logger, utils};

/// Re-enumerate the interface table every this many ticks; selection
/// stays sticky across refreshes.
const REFRESH_EVERY_TICKS: u32 = 5;
/// Sparkline window, one point per tick.
const HISTORY_POINTS: usize = 60;

/// Application state — owns all data, updated each tick.
pub struct App {
    // Speed monitoring
    pub speed_history: SpeedHistory,
    pub current_down_speed: f64,
    pub current_up_speed: f64,
    pub peak_down: f64,
    pub peak_up: f64,
    pub total_down: u64,
    pub total_up: u64,
    /// False while the sampler has nothing to report (no interface, lost
    /// adapter, baseline tick).
    pub have_rates: bool,

    // Interface selection
    pub candidates: Vec<InterfaceDescriptor>,
    pub active: Option<InterfaceDescriptor>,
    pub mode: SelectionMode,
    source: SystemNetSource,
    sampler: Sampler,
    tick_count: u32,
    reported_no_candidates: bool,

    // UI state
    pub bottom_tab: BottomTab,
    pub session_start: Instant,
    pub iface_cursor: usize,
    pub events_scroll: usize,
    pub events_auto_scroll: bool,

    pub config: Config,
}

impl App {
    pub fn platform(&self) -> Platform {
        self.source.platform()
    }

    pub fn new(config: Config) -> Self {
        let source = SystemNetSource::new();
        if let Some(name) = &config.pinned_interface {
            log::info!("pinned interface from config: {}", name);
        }
        let mode = match &config.pinned_interface {
            Some(name) => SelectionMode::Pinned(name.clone()),
            None => SelectionMode::Auto,
        };
        let mut app = Self {
            speed_history: SpeedHistory::new(HISTORY_POINTS),
            current_down_speed: 0.0,
            current_up_speed: 0.0,
            peak_down: 0.0,
            peak_up: 0.0,
            total_down: 0,
            total_up: 0,
            have_rates: false,

            candidates: Vec::new(),
            active: None,
            mode,
            source,
            sampler: Sampler::new(),
            tick_count: 0,
            reported_no_candidates: false,

            bottom_tab: BottomTab::Interfaces,
            session_start: Instant::now(),
            iface_cursor: 0,
            events_scroll: 0,
            events_auto_scroll: true,

            config,
        };
        app.refresh_interfaces();
        app
    }

    /// One sampling pass. Called from the event loop once per second,
    /// never concurrently, so a slow pass simply delays the next one.
    pub fn update(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);

        if !self.sampler.is_bound() || self.tick_count % REFRESH_EVERY_TICKS == 0 {
            self.refresh_interfaces();
        }

        let reading = self
            .sampler
            .key()
            .cloned()
            .and_then(|key| self.source.read_counters(&key).ok());

        match self.sampler.tick(SystemTime::now(), reading) {
            SampleEvent::Updated {
                rate_down,
                rate_up,
                total_down,
                total_up,
            } => {
                self.current_down_speed = rate_down;
                self.current_up_speed = rate_up;
                self.total_down = total_down;
                self.total_up = total_up;
                if rate_down > self.peak_down {
                    self.peak_down = rate_down;
                }
                if rate_up > self.peak_up {
                    self.peak_up = rate_up;
                }
                self.speed_history.push(rate_down, rate_up);
                self.have_rates = true;
            }
            SampleEvent::Unavailable(reason) => {
                self.have_rates = false;
                if reason == UnavailableReason::ReadFailed {
                    if let Some(iface) = self.active.take() {
                        log::warn!("lost {}: counters unreadable, reselecting", iface.name);
                    }
                }
                if reason.needs_reselect() {
                    self.refresh_interfaces();
                }
            }
        }

        if self.events_auto_scroll {
            self.events_scroll = logger::entries().len();
        }
    }

    // ─── Interface selection ─────────────────────────────────────────────

    /// Rebuild the candidate list from a fresh snapshot and re-resolve the
    /// active interface. The candidate list is never patched in place.
    pub fn refresh_interfaces(&mut self) {
        let snapshot = self.source.snapshot();
        let platform = self.source.platform();
        self.candidates = classify::classify(&snapshot, platform);

        if self.candidates.is_empty() {
            if !self.reported_no_candidates {
                if snapshot.is_empty() {
                    log::warn!("interface enumeration returned nothing");
                } else {
                    log::warn!("no physical interface available");
                }
                self.reported_no_candidates = true;
            }
            self.sampler.unbind();
            self.active = None;
        } else {
            self.reported_no_candidates = false;
            let chosen = match &self.mode {
                SelectionMode::Pinned(name) => self
                    .candidates
                    .iter()
                    .find(|d| &d.name == name)
                    // Pin survives the adapter's absence; monitor the best
                    // candidate until it comes back
                    .or_else(|| classify::reselect(self.sampler.key(), &self.candidates)),
                SelectionMode::Auto => classify::reselect(self.sampler.key(), &self.candidates),
            }
            .cloned();

            if let Some(iface) = chosen {
                if self.sampler.key() != Some(&iface.key()) {
                    self.bind(iface);
                }
            }
        }

        if self.iface_cursor >= self.candidates.len() {
            self.iface_cursor = self.candidates.len().saturating_sub(1);
        }
    }

    /// Start monitoring `iface`, resetting totals and peaks.
    fn bind(&mut self, iface: InterfaceDescriptor) {
        let reading = self.source.read_counters(&iface.key()).ok();
        self.sampler.bind(&iface, reading);
        log::info!(
            "monitoring {} ({}{})",
            iface.name,
            iface.kind.label(),
            utils::format_link_speed(iface.link_speed_bps)
                .map(|s| format!(", {}", s))
                .unwrap_or_default()
        );
        self.active = Some(iface);
        self.current_down_speed = 0.0;
        self.current_up_speed = 0.0;
        self.peak_down = 0.0;
        self.peak_up = 0.0;
        self.total_down = 0;
        self.total_up = 0;
        self.have_rates = false;
    }

    // ─── Input handling ──────────────────────────────────────────────────

    /// Handle a key press. Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            KeyCode::Tab => {
                self.bottom_tab = self.bottom_tab.next();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                log::info!("manual refresh");
                self.refresh_interfaces();
            }
            KeyCode::Char('a') | KeyCode::Char('A') => {
                if self.mode != SelectionMode::Auto {
                    log::info!("selection back to automatic");
                    self.mode = SelectionMode::Auto;
                    self.config.pinned_interface = None;
                    self.refresh_interfaces();
                }
            }
            KeyCode::Up => self.scroll_up(1),
            KeyCode::Down => self.scroll_down(1),
            KeyCode::PageUp => self.scroll_up(10),
            KeyCode::PageDown => self.scroll_down(10),
            KeyCode::Home => self.scroll_home(),
            KeyCode::End => self.scroll_end(),
            KeyCode::Enter => {
                if self.bottom_tab == BottomTab::Interfaces {
                    self.pin_cursor_interface();
                }
            }
            KeyCode::Char('c') | KeyCode::Char('C') => {
                if self.bottom_tab == BottomTab::Events {
                    logger::clear();
                    self.events_scroll = 0;
                }
            }
            _ => {}
        }
        false
    }

    /// Pin the candidate under the cursor and start monitoring it.
    fn pin_cursor_interface(&mut self) {
        let Some(iface) = self.candidates.get(self.iface_cursor).cloned() else {
            return;
        };
        log::info!("pinned {}", iface.name);
        self.mode = SelectionMode::Pinned(iface.name.clone());
        self.config.pinned_interface = Some(iface.name.clone());
        if self.sampler.key() != Some(&iface.key()) {
            self.bind(iface);
        }
    }

    fn scroll_up(&mut self, n: usize) {
        match self.bottom_tab {
            BottomTab::Interfaces => {
                self.iface_cursor = self.iface_cursor.saturating_sub(n);
            }
            BottomTab::Events => {
                self.events_auto_scroll = false;
                self.events_scroll = self.events_scroll.saturating_sub(n);
            }
        }
    }

    fn scroll_down(&mut self, n: usize) {
        match self.bottom_tab {
            BottomTab::Interfaces => {
                if !self.candidates.is_empty() {
                    self.iface_cursor =
                        (self.iface_cursor + n).min(self.candidates.len() - 1);
                }
            }
            BottomTab::Events => {
                self.events_scroll += n;
                let max = logger::entries().len();
                if self.events_scroll >= max {
                    self.events_scroll = max;
                    self.events_auto_scroll = true;
                }
            }
        }
    }

    fn scroll_home(&mut self) {
        match self.bottom_tab {
            BottomTab::Interfaces => self.iface_cursor = 0,
            BottomTab::Events => {
                self.events_auto_scroll = false;
                self.events_scroll = 0;
            }
        }
    }

    fn scroll_end(&mut self) {
        match self.bottom_tab {
            BottomTab::Interfaces => {
                self.iface_cursor = self.candidates.len().saturating_sub(1);
            }
            BottomTab::Events => {
                self.events_auto_scroll = true;
                self.events_scroll = logger::entries().len();
            }
        }
    }
}
