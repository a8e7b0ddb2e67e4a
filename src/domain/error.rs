use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("domain entity `{entity}` not found")]
    NotFound { entity: &'static str },
    #[error("invalid selector `{input}`: {reason}")]
    InvalidSelector { input: String, reason: &'static str },
}

impl DomainError {
    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    pub fn invalid_selector(input: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidSelector {
            input: input.into(),
            reason,
        }
    }
}
