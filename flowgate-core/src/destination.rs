use serde::{Deserialize, Serialize};

/// One routable destination of a service.
///
/// A service may be split across several destinations, each with its own
/// internal port and, optionally, a distinct source (entry) port and ACL.
/// The owning service keeps destinations in insertion order; that order is
/// what multi-destination dispatch uses, and this crate never reorders or
/// deduplicates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDest {
    /// The internal port of the service. Used only in swarm mode.
    #[serde(default)]
    pub port: String,

    /// URL path segments of the service.
    #[serde(default)]
    pub service_path: Vec<String>,

    /// The source (entry) port. 0 = use the shared frontend port.
    /// Useful only when specifying multiple destinations of a single service.
    #[serde(default)]
    pub src_port: u16,

    #[serde(default)]
    pub src_port_acl: String,

    #[serde(default)]
    pub src_port_acl_name: String,
}

impl ServiceDest {
    /// Whether this destination enters through its own port.
    pub fn has_src_port(&self) -> bool {
        self.src_port != 0
    }
}
