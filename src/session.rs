//! Session address: a random local-part bound to the currently selected domain.

use crate::{Error, Result};
use rand::Rng;
use std::fmt;

const LOCAL_PART_LEN: usize = 8;
const LOCAL_PART_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// The active disposable mailbox.
///
/// The local-part is fixed for the lifetime of the value and of every value derived
/// from it with [`SessionAddress::with_domain`]; only the domain ever changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionAddress {
    local_part: String,
    domain: String,
}

impl SessionAddress {
    /// Generate a fresh local-part and bind it to `domain`.
    pub fn generate(domain: impl Into<String>) -> Self {
        Self::generate_with(&mut rand::thread_rng(), domain)
    }

    /// Like [`SessionAddress::generate`], drawing randomness from `rng`.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, domain: impl Into<String>) -> Self {
        let local_part = (0..LOCAL_PART_LEN)
            .map(|_| LOCAL_PART_ALPHABET[rng.gen_range(0..LOCAL_PART_ALPHABET.len())] as char)
            .collect();
        Self {
            local_part,
            domain: domain.into(),
        }
    }

    /// Start a session from a full address supplied by the user.
    ///
    /// The input is split at the last `@`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidAddress`] when either side of the `@` is empty or
    /// there is no `@` at all.
    pub fn parse(address: &str) -> Result<Self> {
        let address = address.trim();
        match address.rsplit_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(Self {
                local_part: local.to_string(),
                domain: domain.to_string(),
            }),
            _ => Err(Error::InvalidAddress(address.to_string())),
        }
    }

    /// Same local-part, new domain.
    #[must_use]
    pub fn with_domain(&self, domain: impl Into<String>) -> Self {
        Self {
            local_part: self.local_part.clone(),
            domain: domain.into(),
        }
    }

    pub fn local_part(&self) -> &str {
        &self.local_part
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// The composite address, `local_part@domain`.
    pub fn address(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SessionAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local_part, self.domain)
    }
}
