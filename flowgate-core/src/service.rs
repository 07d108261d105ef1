use crate::credential::Credential;
use crate::destination::ServiceDest;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Desired configuration of one logical network service.
///
/// Built from external configuration input (flags, container labels,
/// environment), finalized once, then treated as immutable by every
/// downstream consumer. Wire field names are camelCase, matching the
/// label/flag grammar of the control plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// The name of the service. Must match the name of the Swarm service
    /// or the one stored in the registry.
    #[serde(default)]
    pub service_name: String,

    /// ACL name; ACL blocks are declared in alphabetical order of this field.
    /// Defaults to `service_name` when blank.
    #[serde(default)]
    pub acl_name: String,

    /// Fully qualified service name (swarm stack prefix included).
    #[serde(default)]
    pub full_service_name: String,

    /// Extra condition appended to the generated ACL.
    #[serde(default)]
    pub acl_condition: String,

    /// The request mode. Any mode the proxy supports is passed through;
    /// `"sni"` implies TCP with SNI-based routing, in which case URL-path
    /// and path-rewrite fields are ignored by the renderer.
    #[serde(default = "default_req_mode")]
    pub req_mode: String,

    /// The ACL derivative applied to URL paths. Defaults to `path_beg`.
    #[serde(default = "default_path_type")]
    pub path_type: String,

    /// A regular expression to search the content to be replaced.
    /// If set, `req_path_replace` must be set as well.
    #[serde(default, alias = "reqRepSearch")]
    pub req_path_search: Option<String>,

    /// The replacement applied where `req_path_search` matches.
    /// If set, `req_path_search` must be set as well.
    #[serde(default, alias = "reqRepReplace")]
    pub req_path_replace: Option<String>,

    /// Domains the service accepts requests for. Empty = no domain filter.
    /// Insertion order is preserved; operators put subdomains first.
    #[serde(default)]
    pub service_domain: Vec<String>,

    /// Whether subdomains and FQDN domains count as a match. Only has an
    /// effect when `service_domain` is non-empty.
    #[serde(default)]
    pub service_domain_match_all: bool,

    /// Whether to redirect all http requests to https.
    #[serde(default)]
    pub https_only: bool,

    /// The internal HTTPS port. If unset, the destination port is used
    /// instead. Used only in swarm mode.
    #[serde(default)]
    pub https_port: Option<u16>,

    /// Whether to redirect to https when X-Forwarded-Proto is http.
    #[serde(default)]
    pub redirect_when_http_proto: bool,

    /// If true, backend server certificates are not verified.
    #[serde(default)]
    pub ssl_verify_none: bool,

    /// Content of the PEM-encoded certificate served for this service.
    /// Stored verbatim; never parsed or validated here.
    #[serde(default)]
    pub service_cert: String,

    /// Path to the frontend template snippet.
    /// If set, `template_be_path` must be set as well.
    #[serde(default)]
    pub template_fe_path: Option<String>,

    /// Path to the backend template snippet.
    /// If set, `template_fe_path` must be set as well.
    #[serde(default)]
    pub template_be_path: Option<String>,

    /// Path to the Consul Template frontend snippet.
    /// If set, `consul_template_be_path` must be set as well.
    #[serde(default)]
    pub consul_template_fe_path: Option<String>,

    /// Path to the Consul Template backend snippet.
    /// If set, `consul_template_fe_path` must be set as well.
    #[serde(default)]
    pub consul_template_be_path: Option<String>,

    /// Server timeout in seconds, passed through to the renderer as-is.
    #[serde(default)]
    pub timeout_server: String,

    /// Tunnel timeout in seconds, passed through to the renderer as-is.
    #[serde(default)]
    pub timeout_tunnel: String,

    /// Whether to distribute a reconfigure request to all proxy instances.
    /// Used only in swarm mode.
    #[serde(default)]
    pub distribute: bool,

    /// Hostname where the service runs, e.g. on a separate swarm. If set,
    /// the proxy dispatches requests to that host.
    #[serde(default)]
    pub outbound_hostname: String,

    /// Whether to skip adding proxy health checks.
    #[serde(default)]
    pub skip_check: bool,

    /// Retries when the service address cannot be looked up.
    #[serde(default)]
    pub lookup_retry: u32,

    /// Seconds between lookup retries.
    #[serde(default)]
    pub lookup_retry_interval: u32,

    /// Blue-green deployment color of the running service.
    #[serde(default)]
    pub service_color: String,

    /// Port resolved for the running service.
    #[serde(default)]
    pub service_port: String,

    /// Host the running service was resolved to.
    #[serde(default)]
    pub host: String,

    /// Destinations of this service, in insertion order. Order is meaningful
    /// for multi-destination dispatch and is never changed here.
    #[serde(default)]
    pub service_dest: Vec<ServiceDest>,

    /// Basic-auth credentials for this service, in the order they were
    /// parsed. No deduplication.
    #[serde(default)]
    pub users: Vec<Credential>,
}

fn default_req_mode() -> String {
    "http".to_string()
}

fn default_path_type() -> String {
    "path_beg".to_string()
}

impl Default for Service {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            acl_name: String::new(),
            full_service_name: String::new(),
            acl_condition: String::new(),
            req_mode: default_req_mode(),
            path_type: default_path_type(),
            req_path_search: None,
            req_path_replace: None,
            service_domain: Vec::new(),
            service_domain_match_all: false,
            https_only: false,
            https_port: None,
            redirect_when_http_proto: false,
            ssl_verify_none: false,
            service_cert: String::new(),
            template_fe_path: None,
            template_be_path: None,
            consul_template_fe_path: None,
            consul_template_be_path: None,
            timeout_server: String::new(),
            timeout_tunnel: String::new(),
            distribute: false,
            outbound_hostname: String::new(),
            skip_check: false,
            lookup_retry: 0,
            lookup_retry_interval: 0,
            service_color: String::new(),
            service_port: String::new(),
            host: String::new(),
            service_dest: Vec::new(),
            users: Vec::new(),
        }
    }
}

impl Service {
    /// Fill in derived defaults. Repairs values that arrived as empty strings
    /// from labels or flags, not only missing keys.
    pub fn apply_defaults(&mut self) {
        if self.acl_name.is_empty() {
            self.acl_name = self.service_name.clone();
        }
        if self.req_mode.is_empty() {
            self.req_mode = default_req_mode();
        }
        if self.path_type.is_empty() {
            self.path_type = default_path_type();
        }
    }

    /// Check every co-required field pair. A pair with only one side set is a
    /// configuration error surfaced to the caller, never silently repaired.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.check_pair("reqPathSearch", &self.req_path_search, "reqPathReplace", &self.req_path_replace)?;
        self.check_pair("templateFePath", &self.template_fe_path, "templateBePath", &self.template_be_path)?;
        self.check_pair(
            "consulTemplateFePath",
            &self.consul_template_fe_path,
            "consulTemplateBePath",
            &self.consul_template_be_path,
        )?;
        Ok(())
    }

    /// Construction-phase entry point: defaults, then validation.
    /// After it succeeds the service is ready for the renderer and
    /// `acl_name` is non-empty whenever `service_name` is.
    pub fn finalize(&mut self) -> Result<(), ConfigError> {
        self.apply_defaults();
        self.validate()
    }

    /// Whether this service routes over TCP by SNI instead of URL paths.
    pub fn is_sni(&self) -> bool {
        self.req_mode.eq_ignore_ascii_case("sni")
    }

    /// Whether subdomain matching is in effect. `service_domain_match_all`
    /// is inert without a domain filter.
    pub fn domain_match_all(&self) -> bool {
        self.service_domain_match_all && !self.service_domain.is_empty()
    }

    fn check_pair(
        &self,
        left_name: &'static str,
        left: &Option<String>,
        right_name: &'static str,
        right: &Option<String>,
    ) -> Result<(), ConfigError> {
        match (is_set(left), is_set(right)) {
            (true, false) => Err(ConfigError::MissingCoDependentField {
                service: self.service_name.clone(),
                present: left_name,
                missing: right_name,
            }),
            (false, true) => Err(ConfigError::MissingCoDependentField {
                service: self.service_name.clone(),
                present: right_name,
                missing: left_name,
            }),
            _ => Ok(()),
        }
    }
}

// Empty strings from labels count as unset.
fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Ordered collection of services.
///
/// `sort_by_acl_name` produces the declaration order the renderer must emit
/// ACL blocks in: proxy ACL matching is top-down, first-match-wins, so this
/// order *is* routing behavior. The renderer must not re-sort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Services(pub Vec<Service>);

impl Services {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, service: Service) {
        self.0.push(service);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Service> {
        self.0.iter()
    }

    /// Sort in place by `acl_name`, ascending, plain code-point comparison.
    /// The sort is stable: services with equal ACL names keep their relative
    /// input order. Idempotent.
    pub fn sort_by_acl_name(&mut self) {
        self.0.sort_by(|a, b| a.acl_name.cmp(&b.acl_name));
    }
}

impl From<Vec<Service>> for Services {
    fn from(services: Vec<Service>) -> Self {
        Self(services)
    }
}

impl IntoIterator for Services {
    type Item = Service;
    type IntoIter = std::vec::IntoIter<Service>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Services {
    type Item = &'a Service;
    type IntoIter = std::slice::Iter<'a, Service>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
