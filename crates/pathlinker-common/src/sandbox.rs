use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use url::Url;

use crate::config::Config;
use crate::error::PathlinkerError;

/// An HTTP client that only talks to approved hosts.
///
/// One instance is built at startup and shared by every source client; it
/// carries the per-request timeout, so every remote call is bounded.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Builds the client from configuration: the source databases' public
    /// hosts, the hosts of the configured base URLs and any extra domains.
    pub fn new(config: &Config) -> Result<Self, PathlinkerError> {
        let client = ClientBuilder::new()
            .timeout(config.http.timeout())
            .user_agent(concat!("pathlinker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PathlinkerError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let mut sandbox = Self { client, allowlist: HashSet::new() };
        for host in DEFAULT_HOSTS {
            sandbox.allow_domain(host);
        }
        for base in [&config.string.base_url, &config.kegg.base_url] {
            let url = Url::parse(base)
                .map_err(|e| PathlinkerError::Config(format!("Invalid base URL {:?}: {}", base, e)))?;
            if let Some(host) = url.host_str() {
                sandbox.allow_domain(host);
            }
        }
        for extra in &config.http.extra_allowed_domains {
            sandbox.allow_domain(extra);
        }
        Ok(sandbox)
    }

    /// Allows a host and its subdomains. Case and a trailing dot are ignored.
    pub fn allow_domain(&mut self, domain: &str) {
        let domain = domain.trim().trim_end_matches('.').to_ascii_lowercase();
        if !domain.is_empty() {
            self.allowlist.insert(domain);
        }
    }

    pub fn is_allowed(&self, url: &str) -> bool {
        Url::parse(url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
            .is_some_and(|host| self.allowlist.iter().any(|allowed| host_matches(&host, allowed)))
    }

    /// GET request builder; refuses hosts outside the allowlist.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, PathlinkerError> {
        if self.is_allowed(url) {
            Ok(self.client.get(url))
        } else {
            Err(PathlinkerError::SecurityError(format!("host not allowed: {}", url)))
        }
    }
}

const DEFAULT_HOSTS: [&str; 4] = ["string-db.org", "rest.kegg.jp", "localhost", "127.0.0.1"];

fn host_matches(host: &str, allowed: &str) -> bool {
    host.strip_suffix(allowed)
        .is_some_and(|prefix| prefix.is_empty() || prefix.ends_with('.'))
}
