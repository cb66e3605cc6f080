//! # Authentication Module
//!
//! Maps the `api_key` query parameter onto a [`Requester`].
//!
//! ## Configuration
//!
//! Keys come from the `[[users]]` entries of the configuration file. A
//! missing key, or one that matches no user, makes the caller anonymous:
//! public datasets stay readable and private ones answer "No access granted".
//!
//! ## Usage
//!
//! ```text
//! GET /datasets/130?api_key=<your-api-key>
//! ```

use crate::config::UserConfig;
use mldcat_core::Requester;
use subtle::ConstantTimeEq;

// =============================================================================
// API KEY REGISTRY
// =============================================================================

/// Known API keys and the users they identify.
#[derive(Clone, Default)]
pub struct ApiKeys {
    users: Vec<UserConfig>,
}

impl ApiKeys {
    #[must_use]
    pub fn new(users: Vec<UserConfig>) -> Self {
        Self { users }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Resolve the caller behind an optional key.
    ///
    /// Every configured key is compared, match or not, so the time taken does
    /// not reveal which entry matched.
    #[must_use]
    pub fn resolve(&self, api_key: Option<&str>) -> Requester {
        let Some(provided) = api_key.filter(|k| !k.is_empty()) else {
            return Requester::Anonymous;
        };

        let mut found = None;
        for user in &self.users {
            if keys_match(provided, &user.api_key) && found.is_none() {
                found = Some(Requester::User {
                    id: user.user_id,
                    admin: user.admin,
                });
            }
        }

        match found {
            Some(requester) => requester,
            None => {
                tracing::warn!(
                    event = "auth_failure",
                    reason = "unknown_api_key",
                    "Unknown api_key, continuing as anonymous"
                );
                Requester::Anonymous
            }
        }
    }
}

/// Constant-time key comparison.
///
/// Both keys are padded to the same length so `ct_eq` always runs over the
/// same number of bytes.
fn keys_match(provided: &str, expected: &str) -> bool {
    let provided_bytes = provided.as_bytes();
    let expected_bytes = expected.as_bytes();

    let max_len = provided_bytes.len().max(expected_bytes.len());
    let mut padded_provided = vec![0u8; max_len];
    let mut padded_expected = vec![0u8; max_len];
    padded_provided[..provided_bytes.len()].copy_from_slice(provided_bytes);
    padded_expected[..expected_bytes.len()].copy_from_slice(expected_bytes);

    let bytes_match: bool = padded_provided.ct_eq(&padded_expected).into();
    bytes_match && provided_bytes.len() == expected_bytes.len()
}

// =============================================================================
// TESTS
// =============================================================================
