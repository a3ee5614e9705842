//! Unit tests for facade versions and accepted ranges

use logport_domain::{FacadeVersion, VersionRange};

#[test]
fn test_parse_full_version() {
    let version: FacadeVersion = "0.1.3".parse().unwrap();
    assert_eq!(version, FacadeVersion::new(0, 1, 3));
    assert_eq!(version.to_string(), "0.1.3");
}

#[test]
fn test_parse_with_qualifier() {
    let version: FacadeVersion = "0.1.0-beta".parse().unwrap();
    assert_eq!(version.qualifier(), Some("beta"));
    // Qualifiers do not affect ordering
    assert_eq!(version, FacadeVersion::new(0, 1, 0));
    assert_eq!(version.to_string(), "0.1.0-beta");
}

#[test]
fn test_parse_rejects_garbage() {
    assert!("".parse::<FacadeVersion>().is_err());
    assert!("abc".parse::<FacadeVersion>().is_err());
    assert!("1".parse::<FacadeVersion>().is_err());
    assert!("1.x".parse::<FacadeVersion>().is_err());
}

#[test]
fn test_version_ordering() {
    let a: FacadeVersion = "0.1.9".parse().unwrap();
    let b: FacadeVersion = "0.1.10".parse().unwrap();
    let c: FacadeVersion = "1.0".parse().unwrap();
    assert!(a < b);
    assert!(b < c);
}

#[test]
fn test_default_range_accepts_facade_line() {
    let range = VersionRange::default();
    assert!(range.contains(&"0.1.0".parse().unwrap()));
    assert!(range.contains(&"0.1.99".parse().unwrap()));
    assert!(!range.contains(&"0.2.0".parse().unwrap()));
    assert!(!range.contains(&"1.5.9.RC1".parse().unwrap()));
    assert!(!range.contains(&"0.0.9".parse().unwrap()));
}

#[test]
fn test_range_rejects_empty() {
    assert!(VersionRange::parse("0.2.0", "0.2.0").is_err());
    assert!(VersionRange::parse("0.3.0", "0.2.0").is_err());
    assert!(VersionRange::parse("0.1.0", "nope").is_err());
    let range = VersionRange::parse("1.0", "2.0").unwrap();
    assert_eq!(range.to_string(), "[1.0.0, 2.0.0)");
}

#[test]
fn test_version_serde_roundtrip_as_string() {
    let version: FacadeVersion = "0.1.2".parse().unwrap();
    let json = serde_json::to_string(&version).unwrap();
    assert_eq!(json, "\"0.1.2\"");
    let back: FacadeVersion = serde_json::from_str("\"0.1.2\"").unwrap();
    assert_eq!(back, version);
    assert!(serde_json::from_str::<FacadeVersion>("\"bogus\"").is_err());
}
