//! `value_parser` functions for CLI arguments.

use std::net::IpAddr;
use std::path::PathBuf;

const MAX_ROLLBACK_STEPS: u32 = 100;
const MAX_HOSTNAME_LEN: usize = 253;

pub fn validate_port(value: &str) -> Result<u16, String> {
    match value.parse::<u16>() {
        Ok(0) => Err("Port must be between 1 and 65535, 0 is not allowed".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!(
            "Port must be a number between 1 and 65535, got '{}'",
            value
        )),
    }
}

/// Accepts an existing, readable regular file.
pub fn validate_config_file_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if !path.is_file() {
        return Err(format!("Configuration file not found: '{}'", value));
    }
    std::fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{}': {}", value, e))
}

pub fn validate_rollback_steps(value: &str) -> Result<u32, String> {
    let steps: u32 = value
        .parse()
        .map_err(|_| format!("Rollback steps must be a positive number, got '{}'", value))?;

    match steps {
        0 => Err("Rollback steps must be greater than 0".to_string()),
        n if n > MAX_ROLLBACK_STEPS => Err(format!(
            "Rollback steps cannot exceed {}",
            MAX_ROLLBACK_STEPS
        )),
        n => Ok(n),
    }
}

/// Accepts an IP address or a DNS hostname.
pub fn validate_host_address(value: &str) -> Result<String, String> {
    let host = value.trim();
    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }
    if host.parse::<IpAddr>().is_ok() {
        return Ok(host.to_string());
    }
    // Dotted digits that failed to parse are a malformed IPv4 address.
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(format!("Invalid IPv4 address: '{}'", host));
    }
    if host.len() > MAX_HOSTNAME_LEN {
        return Err(format!(
            "Host address is too long (maximum {} characters)",
            MAX_HOSTNAME_LEN
        ));
    }

    let valid_label = |label: &str| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };
    if host.split('.').all(valid_label) {
        Ok(host.to_string())
    } else {
        Err(format!("Invalid hostname: '{}'", host))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_port_bounds() {
        assert_eq!(validate_port("1"), Ok(1));
        assert_eq!(validate_port("65535"), Ok(65535));
        for bad in ["0", "65536", "-1", "abc", ""] {
            assert!(validate_port(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_hosts() {
        for good in ["localhost", "127.0.0.1", "0.0.0.0", "::1", "db.delfis.local", "my-server"] {
            assert!(validate_host_address(good).is_ok(), "{good} should be accepted");
        }
        let long = "x".repeat(300);
        for bad in ["", "   ", "host with spaces", "999.999.999.999", "-bad.host", long.as_str()] {
            assert!(validate_host_address(bad).is_err(), "'{bad}' should be rejected");
        }
    }

    #[test]
    fn test_rollback_steps() {
        assert_eq!(validate_rollback_steps("1"), Ok(1));
        assert_eq!(validate_rollback_steps("100"), Ok(100));
        for bad in ["0", "101", "-1", "abc"] {
            assert!(validate_rollback_steps(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_config_file_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap();
        assert_eq!(validate_config_file_path(path), Ok(file.path().to_path_buf()));

        let dir = tempfile::tempdir().unwrap();
        assert!(validate_config_file_path(dir.path().to_str().unwrap()).is_err());
        assert!(validate_config_file_path("/definitely/not/here.toml").is_err());
    }

    proptest! {
        #[test]
        fn prop_every_nonzero_port_is_accepted(port in 1u16..=u16::MAX) {
            prop_assert_eq!(validate_port(&port.to_string()), Ok(port));
        }

        #[test]
        fn prop_every_ipv4_is_accepted(a: u8, b: u8, c: u8, d: u8) {
            let host = format!("{a}.{b}.{c}.{d}");
            prop_assert_eq!(validate_host_address(&host), Ok(host.clone()));
        }
    }
}
