use crate::mac_address::MacAddress;

/// Outcome of a single MAC lookup for one IP address.
///
/// There is no partial state: a resolver either found exactly one binding or
/// none. When a platform command lists several bindings the first one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionResult {
    Resolved(MacAddress),
    #[default]
    Unresolved,
}

impl ResolutionResult {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }
}

impl From<Option<MacAddress>> for ResolutionResult {
    fn from(mac: Option<MacAddress>) -> Self {
        match mac {
            Some(mac) => Self::Resolved(mac),
            None => Self::Unresolved,
        }
    }
}
