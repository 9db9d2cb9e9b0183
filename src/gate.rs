//! Input gate run before assessment: http(s) only, no loopback hosts.

use crate::error::GateError;
use url::{Host, Url};

pub const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

pub fn validate_url(raw: &str) -> Result<(), GateError> {
    let parsed = Url::parse(raw)?;

    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(GateError::InvalidScheme(parsed.scheme().to_string()));
    }

    match parsed.host() {
        Some(Host::Domain(domain)) if domain.eq_ignore_ascii_case("localhost") => {
            Err(GateError::LocalAddress(domain.to_string()))
        }
        Some(Host::Ipv4(ip)) if ip.is_loopback() => Err(GateError::LocalAddress(ip.to_string())),
        Some(Host::Ipv6(ip)) if ip.is_loopback() => Err(GateError::LocalAddress(ip.to_string())),
        Some(_) => Ok(()),
        None => Err(GateError::InvalidFormat("missing host".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_public_http_urls() {
        assert!(validate_url("https://example.com/login").is_ok());
        assert!(validate_url("http://secure-login.example-bank.co/update").is_ok());
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert_eq!(
            validate_url("ftp://example.com/file"),
            Err(GateError::InvalidScheme("ftp".to_string()))
        );
        assert!(matches!(
            validate_url("javascript:alert(1)"),
            Err(GateError::InvalidScheme(_))
        ));
    }

    #[test]
    fn test_rejects_loopback() {
        assert!(matches!(
            validate_url("http://localhost:8080/"),
            Err(GateError::LocalAddress(_))
        ));
        assert!(matches!(
            validate_url("http://127.0.0.1/"),
            Err(GateError::LocalAddress(_))
        ));
        assert!(matches!(
            validate_url("http://127.1.2.3/"),
            Err(GateError::LocalAddress(_))
        ));
        assert!(matches!(
            validate_url("http://[::1]/"),
            Err(GateError::LocalAddress(_))
        ));
    }

    #[test]
    fn test_rejects_unparsable_input() {
        assert!(matches!(validate_url(""), Err(GateError::InvalidFormat(_))));
        assert!(matches!(
            validate_url("example.com"),
            Err(GateError::InvalidFormat(_))
        ));
    }
}
