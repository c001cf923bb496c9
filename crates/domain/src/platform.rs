use std::fmt;

/// Operating-system family used to pick introspection commands.
///
/// Resolved once at startup and handed to every platform-dispatched
/// component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    Unsupported,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "linux") || cfg!(target_os = "android") {
            Self::Linux
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else {
            Self::Unsupported
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Windows => "windows",
            Self::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}
