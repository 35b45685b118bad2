use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

/// Kind of link an active network interface runs over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transport {
    Wifi,
    Cellular,
    Ethernet,
    Bluetooth,
    Vpn,
    Loopback,
}

impl Transport {
    /// Only these transports can reach the weather API on their own.
    pub fn is_usable(&self) -> bool {
        matches!(
            self,
            Transport::Wifi | Transport::Cellular | Transport::Ethernet
        )
    }

    /// Classify a network interface by its kernel name.
    pub fn from_interface_name(name: &str) -> Option<Self> {
        const PREFIXES: &[(&str, Transport)] = &[
            ("lo", Transport::Loopback),
            ("wl", Transport::Wifi),
            ("wwan", Transport::Cellular),
            ("ww", Transport::Cellular),
            ("rmnet", Transport::Cellular),
            ("eth", Transport::Ethernet),
            ("en", Transport::Ethernet),
            ("tun", Transport::Vpn),
            ("tap", Transport::Vpn),
            ("wg", Transport::Vpn),
            ("bnep", Transport::Bluetooth),
        ];

        PREFIXES
            .iter()
            .find(|(prefix, _)| name.starts_with(prefix))
            .map(|(_, transport)| *transport)
    }
}

pub trait Connectivity: Send + Sync + Debug {
    /// Transports of the interfaces that are currently up.
    fn active_transports(&self) -> Vec<Transport>;
}

/// True when at least one Wi-Fi, cellular or Ethernet link is up.
pub fn is_network_available(connectivity: &dyn Connectivity) -> bool {
    connectivity
        .active_transports()
        .iter()
        .any(Transport::is_usable)
}

/// Reads interface state from `/sys/class/net`.
#[derive(Debug, Clone)]
pub struct SystemConnectivity {
    root: PathBuf,
}

impl SystemConnectivity {
    pub fn new() -> Self {
        Self::with_root("/sys/class/net")
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn is_up(dir: &Path) -> bool {
        fs::read_to_string(dir.join("operstate"))
            .map(|state| state.trim() == "up")
            .unwrap_or(false)
    }
}

impl Default for SystemConnectivity {
    fn default() -> Self {
        Self::new()
    }
}

impl Connectivity for SystemConnectivity {
    fn active_transports(&self) -> Vec<Transport> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Cannot list {}: {e}", self.root.display());
                return Vec::new();
            }
        };

        entries
            .filter_map(Result::ok)
            .filter(|entry| Self::is_up(&entry.path()))
            .filter_map(|entry| {
                let name = entry.file_name();
                let transport = Transport::from_interface_name(&name.to_string_lossy());
                debug!(interface = ?name, ?transport, "active interface");
                transport
            })
            .collect()
    }
}
