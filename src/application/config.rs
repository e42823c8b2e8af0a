//! Module Configuration
//!
//! Process-wide, admin-set configuration for the twofa module. The
//! admin surface stores driver and group lists as comma-joined
//! strings; the parsing helpers here turn those into typed values.

use crate::domain::value_object::group_id::GroupId;
use crate::drivers::DriverKind;

/// Twofa module configuration
#[derive(Debug, Clone)]
pub struct TwofaConfig {
    /// Driver used for enforced users who made no valid choice
    pub default_driver: DriverKind,
    /// Administratively enabled drivers, in display order
    pub enabled_drivers: Vec<DriverKind>,
    /// Groups whose members must use 2fa
    pub enforced_groups: EnforcedGroups,
    /// Display length of emailed codes. The TOTP algorithm is fixed at
    /// 6 digits and must never read this value.
    pub code_length: usize,
    /// Language used when a user has no preference
    pub default_language: String,
    /// Issuer label for TOTP provisioning (QR / otpauth URL)
    pub issuer: String,
    /// Route of the verification-check page, for redirect-loop detection
    pub check_route: String,
}

impl Default for TwofaConfig {
    fn default() -> Self {
        Self {
            default_driver: DriverKind::Email,
            enabled_drivers: vec![DriverKind::Email, DriverKind::Totp],
            enforced_groups: EnforcedGroups::AdminGroups,
            code_length: 6,
            default_language: "en".to_string(),
            issuer: "twofa".to_string(),
            check_route: "/twofa/check".to_string(),
        }
    }
}

impl TwofaConfig {
    /// Parse a comma-joined driver list from the admin settings
    ///
    /// Unknown identifiers are dropped silently, like any other stale
    /// driver reference.
    pub fn parse_drivers(value: &str) -> Vec<DriverKind> {
        value
            .split(',')
            .filter_map(|part| part.trim().parse().ok())
            .collect()
    }

    /// Check if the given route is the verification-check page
    ///
    /// Slash-insensitive, so a host comparing its requested route never
    /// redirects the check page to itself.
    pub fn is_check_route(&self, route: &str) -> bool {
        route.trim_matches('/') == self.check_route.trim_matches('/')
    }
}

/// Configured enforcement scope
///
/// Distinguishes "never configured" (defaults to every administrative
/// group) from "explicitly configured empty" (enforcement disabled).
#[derive(Debug, Clone)]
pub enum EnforcedGroups {
    /// Unset: all administrative groups are enforced
    AdminGroups,
    /// Explicit group list; empty disables enforcement
    Explicit(Vec<GroupId>),
}

impl EnforcedGroups {
    /// Parse the raw `enforcedGroups` module setting
    pub fn from_setting(value: Option<&str>) -> Self {
        match value {
            None => EnforcedGroups::AdminGroups,
            Some(raw) if raw.trim().is_empty() => EnforcedGroups::Explicit(Vec::new()),
            Some(raw) => EnforcedGroups::Explicit(
                raw.split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(GroupId::new)
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drivers() {
        assert_eq!(
            TwofaConfig::parse_drivers("email,totp"),
            vec![DriverKind::Email, DriverKind::Totp]
        );
        assert_eq!(
            TwofaConfig::parse_drivers(" totp , sms , email "),
            vec![DriverKind::Totp, DriverKind::Email]
        );
        assert!(TwofaConfig::parse_drivers("").is_empty());
    }

    #[test]
    fn test_enforced_groups_from_setting() {
        assert!(matches!(
            EnforcedGroups::from_setting(None),
            EnforcedGroups::AdminGroups
        ));

        match EnforcedGroups::from_setting(Some("")) {
            EnforcedGroups::Explicit(ids) => assert!(ids.is_empty()),
            other => panic!("expected explicit empty, got {:?}", other),
        }

        match EnforcedGroups::from_setting(Some("g1, g2")) {
            EnforcedGroups::Explicit(ids) => {
                assert_eq!(ids, vec![GroupId::new("g1"), GroupId::new("g2")]);
            }
            other => panic!("expected explicit list, got {:?}", other),
        }
    }

    #[test]
    fn test_is_check_route() {
        let config = TwofaConfig::default();
        assert!(config.is_check_route("/twofa/check"));
        assert!(config.is_check_route("twofa/check"));
        assert!(config.is_check_route("/twofa/check/"));
        assert!(!config.is_check_route("/twofa/settings"));
    }
}
