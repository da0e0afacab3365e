use std::fmt;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::error::PingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn default_port(self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scheme {
    type Err = PingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(Scheme::Http),
            "https" => Ok(Scheme::Https),
            other => Err(PingError::UnsupportedScheme(other.to_string())),
        }
    }
}

/// A fully-qualified probe target, built once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub scheme: Scheme,
    pub host: String,
    /// Set by `resolve` when `host` is a DNS name; `None` for literal IPs.
    pub resolved: Option<IpAddr>,
    pub port: u16,
    pub path: String,
    pub method: String,
}

impl Target {
    /// Normalize a raw user-supplied URI into a target. No name resolution
    /// happens here; call `resolve` before probing.
    pub fn parse(raw: &str, method: &str) -> Result<Self, PingError> {
        let url = parse_uri(raw)?;
        let scheme: Scheme = url.scheme().parse()?;
        let host = url
            .host_str()
            .ok_or_else(|| PingError::InvalidTarget(raw.to_string()))?
            .to_string();
        let port = url.port().unwrap_or_else(|| scheme.default_port());
        let path = if url.path().is_empty() {
            "/".to_string()
        } else {
            url.path().to_string()
        };

        Ok(Target {
            scheme,
            host,
            resolved: None,
            port,
            path,
            method: method.to_string(),
        })
    }

    /// Look up the hostname once and cache the first address for the whole
    /// run. Literal IP hosts and already-resolved targets pass through.
    pub fn resolve(mut self) -> Result<Self, PingError> {
        if self.resolved.is_none() && literal_ip(&self.host).is_none() {
            self.resolved = Some(resolve_host(&self.host, self.port)?);
        }
        Ok(self)
    }

    /// The normalized request URI.
    pub fn uri(&self) -> String {
        format!("{}://{}:{}{}", self.scheme, self.host, self.port, self.path)
    }

    /// Address shown in per-attempt output: the resolved IP, or the literal
    /// host itself.
    pub fn display_addr(&self) -> String {
        match self.resolved.or_else(|| literal_ip(&self.host)) {
            Some(ip) => ip.to_string(),
            None => self.host.clone(),
        }
    }
}

/// One timed request/response cycle, as reported to the output side.
#[derive(Debug)]
pub struct Attempt {
    pub seq: u32,
    pub duration: Duration,
    pub outcome: Outcome,
}

#[derive(Debug)]
pub enum Outcome {
    Success { bytes: u64, status: String },
    Timeout,
}

fn parse_uri(raw: &str) -> Result<Url, PingError> {
    let invalid = |_| PingError::InvalidTarget(raw.to_string());

    if raw.contains("://") {
        return Url::parse(raw).map_err(invalid);
    }

    // Treat bare input as host[:port][/path], not a relative path. Without
    // a scheme the target defaults to https, except for explicit port 80.
    let rest = raw.strip_prefix("//").unwrap_or(raw);
    let url = Url::parse(&format!("https://{}", rest)).map_err(invalid)?;
    if url.port() == Some(80) {
        return Url::parse(&format!("http://{}", rest)).map_err(invalid);
    }
    Ok(url)
}

fn literal_ip(host: &str) -> Option<IpAddr> {
    // IPv6 hosts carry URL brackets
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    host.parse().ok()
}

pub fn resolve_host(host: &str, port: u16) -> Result<IpAddr, PingError> {
    let addrs: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|_| PingError::UnresolvableHost(host.to_string()))?
        .collect();

    // Prefer IPv4 addresses
    if let Some(addr) = addrs.iter().find(|a| a.ip().is_ipv4()) {
        return Ok(addr.ip());
    }

    addrs
        .first()
        .map(|a| a.ip())
        .ok_or_else(|| PingError::UnresolvableHost(host.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_host_defaults_to_https() {
        let t = Target::parse("example.com", "GET").unwrap();
        assert_eq!(t.scheme, Scheme::Https);
        assert_eq!(t.host, "example.com");
        assert_eq!(t.port, 443);
        assert_eq!(t.path, "/");
    }

    #[test]
    fn explicit_port_80_implies_http() {
        let t = Target::parse("example.com:80", "GET").unwrap();
        assert_eq!(t.scheme, Scheme::Http);
        assert_eq!(t.port, 80);
        assert_eq!(t.path, "/");
    }

    #[test]
    fn explicit_scheme_keeps_default_port_and_path() {
        let t = Target::parse("https://example.com/status", "GET").unwrap();
        assert_eq!(t.scheme, Scheme::Https);
        assert_eq!(t.port, 443);
        assert_eq!(t.path, "/status");
    }

    #[test]
    fn explicit_port_wins_over_scheme_default() {
        let t = Target::parse("https://example.com:8443", "GET").unwrap();
        assert_eq!(t.port, 8443);
    }

    #[test]
    fn authority_marker_is_accepted() {
        let t = Target::parse("//example.com:80/x", "GET").unwrap();
        assert_eq!(t.scheme, Scheme::Http);
        assert_eq!(t.port, 80);
        assert_eq!(t.path, "/x");
    }

    #[test]
    fn parse_is_idempotent_for_normalized_targets() {
        let t = Target::parse("http://127.0.0.1:8080/health", "GET").unwrap();
        assert_eq!(t.uri(), "http://127.0.0.1:8080/health");
        let again = Target::parse(&t.uri(), "GET").unwrap();
        assert_eq!(again, t);
    }

    #[test]
    fn literal_ip_host_needs_no_resolution() {
        let t = Target::parse("127.0.0.1:8080", "GET")
            .unwrap()
            .resolve()
            .unwrap();
        assert_eq!(t.resolved, None);
        assert_eq!(t.display_addr(), "127.0.0.1");
    }

    #[test]
    fn ipv6_literal_keeps_brackets_in_uri() {
        let t = Target::parse("[::1]:8080", "GET").unwrap();
        assert_eq!(t.host, "[::1]");
        assert_eq!(t.uri(), "https://[::1]:8080/");
        assert_eq!(t.display_addr(), "::1");
    }

    #[test]
    fn garbage_is_an_invalid_target() {
        assert!(matches!(
            Target::parse("http://", "GET"),
            Err(PingError::InvalidTarget(_))
        ));
        assert!(matches!(
            Target::parse("", "GET"),
            Err(PingError::InvalidTarget(_))
        ));
    }

    #[test]
    fn non_http_scheme_is_rejected() {
        assert!(matches!(
            Target::parse("ftp://example.com", "GET"),
            Err(PingError::UnsupportedScheme(_))
        ));
    }
}
