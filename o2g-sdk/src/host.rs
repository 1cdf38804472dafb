use std::fmt;

use crate::error::{SdkError, SdkResult};

/// Addresses under which a gateway can be reached
///
/// The private address is tried first. The public one is used when the
/// private address is absent or does not answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostDescriptor {
    private_address: Option<String>,
    public_address: Option<String>,
}

impl HostDescriptor {
    /// Empty addresses are treated as absent.
    pub fn new(private_address: impl Into<String>, public_address: impl Into<String>) -> Self {
        Self {
            private_address: non_empty(private_address.into()),
            public_address: non_empty(public_address.into()),
        }
    }

    pub fn private_only(address: impl Into<String>) -> Self {
        Self {
            private_address: non_empty(address.into()),
            public_address: None,
        }
    }

    pub fn public_only(address: impl Into<String>) -> Self {
        Self {
            private_address: None,
            public_address: non_empty(address.into()),
        }
    }

    pub fn private_address(&self) -> Option<&str> {
        self.private_address.as_deref()
    }

    pub fn public_address(&self) -> Option<&str> {
        self.public_address.as_deref()
    }

    /// At least one address must be set
    pub fn validate(&self) -> SdkResult<()> {
        if self.private_address.is_none() && self.public_address.is_none() {
            return Err(SdkError::InvalidArgument(
                "privateAddress or publicAddress must be set".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for HostDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let addresses: Vec<&str> = self
            .private_address()
            .into_iter()
            .chain(self.public_address())
            .collect();
        write!(f, "[{}]", addresses.join(", "))
    }
}

fn non_empty(address: String) -> Option<String> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
