//! Pure request-field validators.
//!
//! Every predicate here is total: absent or malformed input yields `false`
//! rather than an error, so handlers can accumulate violations without
//! branching on failure modes.

use std::sync::LazyLock;

use regex::Regex;

use crate::registry::{AmountLimits, ClientRegistry};

/// Simplified RFC 5322 `local@domain` pattern, ASCII only.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~.-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

/// Whether the given id names a configured client.
///
/// False for absent or empty ids and for ids with no registry entry.
#[must_use]
pub fn is_valid_client(registry: &ClientRegistry, client_id: Option<&str>) -> bool {
    client_id.is_some_and(|id| !id.is_empty() && registry.contains(id))
}

/// Whether the given raw amount parses to an accepted donation amount.
///
/// The amount must parse as a finite, non-zero decimal and fall inside the
/// configured `[min, max]` bounds.
#[must_use]
pub fn is_amount_valid(amount: Option<&str>, limits: &AmountLimits) -> bool {
    let Some(raw) = amount else {
        return false;
    };
    let Ok(parsed) = raw.trim().parse::<f64>() else {
        return false;
    };
    if !parsed.is_finite() || parsed == 0.0 {
        return false;
    }
    parsed >= limits.min && parsed <= limits.max
}

/// Whether the given string is a syntactically plausible email address.
#[must_use]
pub fn is_email_valid(email: Option<&str>) -> bool {
    email.is_some_and(|e| EMAIL_RE.is_match(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ClientConfig, ClientId, MerchantCredentials};

    fn registry() -> ClientRegistry {
        let config = ClientConfig {
            display_name: "Stroke Research Fund".to_string(),
            credentials: MerchantCredentials {
                merchant_id: "m-1".to_string(),
                public_key: "pk-1".to_string(),
                private_key: "sk-1".to_string(),
            },
            topic_name: None,
        };
        ClientRegistry::from_clients(
            AmountLimits::default(),
            [(ClientId::new("stroke-research-fund"), config)],
        )
    }

    #[test]
    fn known_client_is_valid() {
        assert!(is_valid_client(&registry(), Some("stroke-research-fund")));
    }

    #[test]
    fn unknown_client_is_invalid() {
        assert!(!is_valid_client(&registry(), Some("nonvalidid")));
    }

    #[test]
    fn absent_or_empty_client_is_invalid() {
        assert!(!is_valid_client(&registry(), None));
        assert!(!is_valid_client(&registry(), Some("")));
    }

    #[test]
    fn non_numeric_amount_is_invalid() {
        let limits = AmountLimits::default();
        assert!(!is_amount_valid(Some("icknum"), &limits));
        assert!(!is_amount_valid(Some(""), &limits));
        assert!(!is_amount_valid(None, &limits));
    }

    #[test]
    fn zero_and_non_finite_amounts_are_invalid() {
        let limits = AmountLimits::default();
        assert!(!is_amount_valid(Some("0"), &limits));
        assert!(!is_amount_valid(Some("NaN"), &limits));
        assert!(!is_amount_valid(Some("inf"), &limits));
    }

    #[test]
    fn amount_below_minimum_is_invalid() {
        assert!(!is_amount_valid(Some("0.43"), &AmountLimits::default()));
    }

    #[test]
    fn amount_above_maximum_is_invalid() {
        assert!(!is_amount_valid(Some("1000001"), &AmountLimits::default()));
    }

    #[test]
    fn amount_in_range_is_valid() {
        let limits = AmountLimits::default();
        assert!(is_amount_valid(Some("10.95"), &limits));
        assert!(is_amount_valid(Some("1"), &limits));
        assert!(is_amount_valid(Some("1000000"), &limits));
    }

    #[test]
    fn custom_limits_are_honored() {
        let limits = AmountLimits { min: 5.0, max: 10.0 };
        assert!(!is_amount_valid(Some("4.99"), &limits));
        assert!(is_amount_valid(Some("5"), &limits));
        assert!(!is_amount_valid(Some("10.01"), &limits));
    }

    #[test]
    fn absent_email_is_invalid() {
        assert!(!is_email_valid(None));
        assert!(!is_email_valid(Some("")));
    }

    #[test]
    fn email_without_at_sign_is_invalid() {
        assert!(!is_email_valid(Some("jobloggs-jobloggs.com")));
    }

    #[test]
    fn email_without_domain_dot_is_invalid() {
        assert!(!is_email_valid(Some("jo@bloggs")));
    }

    #[test]
    fn well_formed_email_is_valid() {
        assert!(is_email_valid(Some("louise.ryan@addition.london")));
        assert!(is_email_valid(Some("jo+tag@example.co.uk")));
    }
}
