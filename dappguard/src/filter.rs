//! Composable predicate chain over a permission collection. Each stage is an
//! identity when its selector is absent, so the full pipeline is equivalent
//! to a logical AND of whichever selectors are active. Filtering preserves
//! input order and is idempotent.

use lib::types::dashboard::FilterState;
use lib::types::permission::{Permission, PermissionType, RiskLevel};

/// Case-insensitive substring match against dApp name or URL. Leading and
/// trailing whitespace in the query is ignored; an empty or whitespace-only
/// query matches everything.
pub fn by_search(permissions: &[Permission], query: &str) -> Vec<Permission> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return permissions.to_vec();
    }
    permissions
        .iter()
        .filter(|p| {
            p.dapp_name.to_lowercase().contains(&query)
                || p.dapp_url.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Exact match against the derived risk tier; `None` matches everything.
pub fn by_risk_level(permissions: &[Permission], risk_level: Option<RiskLevel>) -> Vec<Permission> {
    match risk_level {
        None => permissions.to_vec(),
        Some(level) => permissions
            .iter()
            .filter(|p| p.risk_level() == level)
            .cloned()
            .collect(),
    }
}

/// Exact match against the permission type; `None` matches everything.
pub fn by_permission_type(
    permissions: &[Permission],
    permission_type: Option<PermissionType>,
) -> Vec<Permission> {
    match permission_type {
        None => permissions.to_vec(),
        Some(kind) => permissions
            .iter()
            .filter(|p| p.permission_type == kind)
            .cloned()
            .collect(),
    }
}

/// Apply search, then risk, then type. Stage order only affects intermediate
/// working-set size, never result membership.
pub fn apply(permissions: &[Permission], filters: &FilterState) -> Vec<Permission> {
    let result = by_search(permissions, &filters.search_query);
    let result = by_risk_level(&result, filters.risk_level);
    by_permission_type(&result, filters.permission_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lib::types::permission::{AccessLevel, SpendLimit};

    fn fixture() -> Vec<Permission> {
        let base = |id: &str, name: &str, url: &str| Permission {
            id: id.to_string(),
            dapp_name: name.to_string(),
            dapp_url: url.to_string(),
            dapp_icon: None,
            permission_type: PermissionType::Read,
            access_level: AccessLevel::Readonly,
            spend_limit: None,
            granted_at: Utc::now(),
            expires_at: None,
        };
        vec![
            Permission {
                permission_type: PermissionType::Spend,
                access_level: AccessLevel::Unlimited,
                ..base("1", "Uniswap", "https://app.uniswap.org")
            },
            Permission {
                permission_type: PermissionType::Write,
                access_level: AccessLevel::Write,
                spend_limit: Some(SpendLimit {
                    amount: "500".to_string(),
                    token: "USDC".to_string(),
                    token_address: "0xa0b8".to_string(),
                }),
                ..base("2", "OpenSea", "https://opensea.io")
            },
            base("3", "Etherscan", "https://etherscan.io"),
            Permission {
                permission_type: PermissionType::Write,
                access_level: AccessLevel::Write,
                ..base("4", "Compound", "https://compound.finance")
            },
        ]
    }

    fn ids(permissions: &[Permission]) -> Vec<&str> {
        permissions.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_empty_and_whitespace_queries_are_identity() {
        let permissions = fixture();
        assert_eq!(by_search(&permissions, ""), permissions);
        assert_eq!(by_search(&permissions, "   "), permissions);
    }

    #[test]
    fn test_search_matches_name_case_insensitively() {
        let permissions = fixture();
        assert_eq!(ids(&by_search(&permissions, "UNISWAP")), vec!["1"]);
        assert_eq!(ids(&by_search(&permissions, "  openSea ")), vec!["2"]);
    }

    #[test]
    fn test_search_matches_url_too() {
        let permissions = fixture();
        assert_eq!(ids(&by_search(&permissions, "etherscan.io")), vec!["3"]);
        // ".io" appears in two URLs
        assert_eq!(ids(&by_search(&permissions, ".io")), vec!["2", "3"]);
    }

    #[test]
    fn test_none_selectors_are_identity() {
        let permissions = fixture();
        assert_eq!(by_risk_level(&permissions, None), permissions);
        assert_eq!(by_permission_type(&permissions, None), permissions);
    }

    #[test]
    fn test_risk_filter_uses_derived_tier() {
        let permissions = fixture();
        assert_eq!(
            ids(&by_risk_level(&permissions, Some(RiskLevel::Dangerous))),
            vec!["1"]
        );
        assert_eq!(
            ids(&by_risk_level(&permissions, Some(RiskLevel::Moderate))),
            vec!["2", "4"]
        );
        assert_eq!(
            ids(&by_risk_level(&permissions, Some(RiskLevel::Safe))),
            vec!["3"]
        );
    }

    #[test]
    fn test_type_filter() {
        let permissions = fixture();
        assert_eq!(
            ids(&by_permission_type(&permissions, Some(PermissionType::Write))),
            vec!["2", "4"]
        );
    }

    #[test]
    fn test_combined_filters_and_together() {
        let permissions = fixture();
        let filters = FilterState {
            search_query: "o".to_string(), // matches all four by name or URL
            risk_level: Some(RiskLevel::Moderate),
            permission_type: Some(PermissionType::Write),
        };
        let result = apply(&permissions, &filters);
        assert_eq!(ids(&result), vec!["2", "4"]);
        for p in &result {
            assert_eq!(p.risk_level(), RiskLevel::Moderate);
            assert_eq!(p.permission_type, PermissionType::Write);
        }
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let permissions = fixture();
        let cases = vec![
            FilterState {
                search_query: "swap".to_string(),
                ..Default::default()
            },
            FilterState {
                risk_level: Some(RiskLevel::Moderate),
                ..Default::default()
            },
            FilterState {
                permission_type: Some(PermissionType::Spend),
                ..Default::default()
            },
            FilterState {
                search_query: " e ".to_string(),
                risk_level: Some(RiskLevel::Safe),
                permission_type: Some(PermissionType::Read),
            },
        ];
        for filters in cases {
            let once = apply(&permissions, &filters);
            let twice = apply(&once, &filters);
            // same membership, same order
            assert_eq!(once, twice, "filters {filters:?} not idempotent");
        }
    }

    #[test]
    fn test_no_false_negatives() {
        let permissions = fixture();
        let filters = FilterState {
            search_query: "e".to_string(),
            ..Default::default()
        };
        let result = apply(&permissions, &filters);
        let expected: Vec<&Permission> = permissions
            .iter()
            .filter(|p| {
                p.dapp_name.to_lowercase().contains('e') || p.dapp_url.to_lowercase().contains('e')
            })
            .collect();
        assert_eq!(result.len(), expected.len());
    }
}
