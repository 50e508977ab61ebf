//! Conversion of raw wallet grants into [`Permission`] records: capability
//! name mapping, caveat inspection, spend-limit extraction, and dApp
//! identity lookup by origin domain.

use chrono::{TimeZone, Utc};
use lib::types::permission::{AccessLevel, Permission, PermissionType, SpendLimit};
use lib::types::wallet::RawPermission;
use url::Url;

/// Caveat types that restrict a grant to read-only behavior.
const READONLY_CAVEATS: &[&str] = &["restrictReturnedAccounts", "filterResponse"];

/// Caveat type carrying a spend cap.
const SPEND_LIMIT_CAVEAT: &str = "spendLimit";

/// Well-known dApp origins, used to put a friendly name and icon on a grant.
/// Anything not listed here falls back to its bare domain.
const KNOWN_DAPPS: &[(&str, &str, &str)] = &[
    ("uniswap.org", "Uniswap", "https://app.uniswap.org/favicon.ico"),
    ("opensea.io", "OpenSea", "https://opensea.io/favicon.ico"),
    ("aave.com", "Aave", "https://aave.com/favicon.ico"),
    ("compound.finance", "Compound", "https://compound.finance/favicon.ico"),
    ("curve.fi", "Curve", "https://curve.fi/favicon.ico"),
];

/// Convert one raw grant into a [`Permission`]. `index` disambiguates ids
/// when a dApp holds several grants of the same capability.
pub fn from_raw(raw: &RawPermission, index: usize) -> Permission {
    let invoker = raw.invoker.as_deref().unwrap_or("unknown");
    let domain = extract_domain(invoker);
    let (dapp_name, dapp_icon) = match KNOWN_DAPPS.iter().find(|(d, _, _)| *d == domain) {
        Some((_, name, icon)) => (name.to_string(), Some(icon.to_string())),
        None => (domain, None),
    };

    Permission {
        id: format!("{invoker}-{}-{index}", raw.parent_capability),
        dapp_name,
        dapp_url: invoker.to_string(),
        dapp_icon,
        permission_type: map_permission_type(&raw.parent_capability),
        access_level: determine_access_level(raw),
        spend_limit: extract_spend_limit(raw),
        granted_at: raw
            .date
            .and_then(|ms| Utc.timestamp_millis_opt(ms as i64).single())
            .unwrap_or_else(Utc::now),
        expires_at: None,
    }
}

/// Host of the invoker origin, with a leading `www.` stripped. Non-URL
/// invokers pass through unchanged.
pub fn extract_domain(invoker: &str) -> String {
    match Url::parse(invoker) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) => host.strip_prefix("www.").unwrap_or(host).to_string(),
            None => invoker.to_string(),
        },
        Err(_) => invoker.to_string(),
    }
}

/// Map a wallet capability name onto the coarse permission type.
pub fn map_permission_type(capability: &str) -> PermissionType {
    if capability.contains("spend") || capability.contains("approve") {
        PermissionType::Spend
    } else if capability.contains("write") || capability.contains("sign") {
        PermissionType::Write
    } else {
        PermissionType::Read
    }
}

/// Derive the access level from a grant's caveats. No caveats means the
/// grant is unbounded; known restriction caveats cap it at read-only.
pub fn determine_access_level(raw: &RawPermission) -> AccessLevel {
    if raw.caveats.is_empty() {
        return AccessLevel::Unlimited;
    }
    let restricted = raw
        .caveats
        .iter()
        .any(|c| READONLY_CAVEATS.contains(&c.caveat_type.as_str()));
    if restricted {
        AccessLevel::Readonly
    } else {
        AccessLevel::Write
    }
}

/// Pull the spend cap out of a grant's caveats, if one is present. Missing
/// fields get conservative placeholders rather than failing the conversion.
pub fn extract_spend_limit(raw: &RawPermission) -> Option<SpendLimit> {
    let caveat = raw
        .caveats
        .iter()
        .find(|c| c.caveat_type == SPEND_LIMIT_CAVEAT)?;
    let value = caveat.value.as_object()?;

    let field = |key: &str, fallback: &str| {
        value
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(fallback)
            .to_string()
    };

    Some(SpendLimit {
        amount: field("amount", "0"),
        token: field("token", "ETH"),
        token_address: field("tokenAddress", "0x0"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib::types::permission::RiskLevel;
    use lib::types::wallet::Caveat;
    use serde_json::json;

    fn raw(capability: &str, invoker: &str, caveats: Vec<Caveat>) -> RawPermission {
        RawPermission {
            parent_capability: capability.to_string(),
            caveats,
            date: Some(1_700_000_000_000),
            invoker: Some(invoker.to_string()),
        }
    }

    fn caveat(caveat_type: &str, value: serde_json::Value) -> Caveat {
        Caveat {
            caveat_type: caveat_type.to_string(),
            value,
        }
    }

    #[test]
    fn test_extract_domain_strips_www() {
        assert_eq!(extract_domain("https://www.uniswap.org"), "uniswap.org");
        assert_eq!(extract_domain("https://app.uniswap.org"), "app.uniswap.org");
    }

    #[test]
    fn test_extract_domain_passes_non_urls_through() {
        assert_eq!(extract_domain("unknown"), "unknown");
    }

    #[test]
    fn test_capability_name_mapping() {
        assert_eq!(map_permission_type("spend_tokens"), PermissionType::Spend);
        assert_eq!(map_permission_type("token_approve"), PermissionType::Spend);
        assert_eq!(map_permission_type("personal_sign"), PermissionType::Write);
        assert_eq!(map_permission_type("state_write"), PermissionType::Write);
        assert_eq!(map_permission_type("eth_accounts"), PermissionType::Read);
    }

    #[test]
    fn test_caveat_less_grant_is_unlimited() {
        let p = from_raw(&raw("eth_accounts", "https://curve.fi", vec![]), 0);
        assert_eq!(p.access_level, AccessLevel::Unlimited);
        assert_eq!(p.risk_level(), RiskLevel::Dangerous);
    }

    #[test]
    fn test_restriction_caveats_mean_readonly() {
        for restriction in ["restrictReturnedAccounts", "filterResponse"] {
            let p = from_raw(
                &raw(
                    "eth_accounts",
                    "https://etherscan.io",
                    vec![caveat(restriction, json!(["0xabc"]))],
                ),
                0,
            );
            assert_eq!(p.access_level, AccessLevel::Readonly);
            assert_eq!(p.risk_level(), RiskLevel::Safe);
        }
    }

    #[test]
    fn test_other_caveats_mean_bounded_write() {
        let p = from_raw(
            &raw(
                "state_write",
                "https://opensea.io",
                vec![caveat("somethingElse", json!(null))],
            ),
            0,
        );
        assert_eq!(p.access_level, AccessLevel::Write);
    }

    #[test]
    fn test_spend_limit_extraction() {
        let p = from_raw(
            &raw(
                "state_write",
                "https://app.aave.com",
                vec![caveat(
                    "spendLimit",
                    json!({"amount": "2000", "token": "ETH", "tokenAddress": "0x0000"}),
                )],
            ),
            0,
        );
        let limit = p.spend_limit.as_ref().expect("limit should be extracted");
        assert_eq!(limit.amount, "2000");
        assert_eq!(limit.token, "ETH");
        assert_eq!(p.risk_level(), RiskLevel::Dangerous);
    }

    #[test]
    fn test_spend_limit_with_missing_fields_gets_placeholders() {
        let p = from_raw(
            &raw(
                "state_write",
                "https://opensea.io",
                vec![caveat("spendLimit", json!({"token": "USDC"}))],
            ),
            0,
        );
        let limit = p.spend_limit.expect("limit should be extracted");
        assert_eq!(limit.amount, "0");
        assert_eq!(limit.token, "USDC");
        assert_eq!(limit.token_address, "0x0");
    }

    #[test]
    fn test_known_dapp_lookup_and_id_shape() {
        let p = from_raw(&raw("eth_accounts", "https://opensea.io", vec![]), 3);
        assert_eq!(p.dapp_name, "OpenSea");
        assert!(p.dapp_icon.is_some());
        assert_eq!(p.id, "https://opensea.io-eth_accounts-3");
    }

    #[test]
    fn test_unknown_dapp_falls_back_to_domain() {
        let p = from_raw(&raw("eth_accounts", "https://dex.example.org", vec![]), 0);
        assert_eq!(p.dapp_name, "dex.example.org");
        assert!(p.dapp_icon.is_none());
    }
}
