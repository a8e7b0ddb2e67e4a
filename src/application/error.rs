use std::error::Error as StdError;

use thiserror::Error;

use crate::{
    config::LoadError,
    domain::{error::DomainError, validation::FieldErrors},
    infra::error::InfraError,
    presentation::views::TemplateRenderError,
};

/// Flattened `Display` output of an error and every `source()` below it.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(error: &dyn StdError) -> Self {
        let mut messages = Vec::new();
        messages.push(error.to_string());
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self { messages }
    }

    pub fn joined(&self) -> String {
        self.messages.join(": ")
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Render(#[from] TemplateRenderError),
    #[error("operation failed")]
    OperationFailed,
    #[error("validation failed: {0}")]
    ValidationFailed(FieldErrors),
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error("no {0} is open")]
    NothingOpen(&'static str),
}

impl AppError {
    /// Short text safe to show in place of the full error.
    pub fn presentation_message(&self) -> &'static str {
        match self {
            AppError::Domain(DomainError::NotFound { .. }) => "Post not found",
            AppError::Domain(DomainError::InvalidSelector { .. }) => "Unknown post selector",
            AppError::Config(_) => "Configuration could not be loaded",
            AppError::Render(_) => "View could not be rendered",
            AppError::Infra(InfraError::Telemetry(_)) => "Logging subsystem could not start",
            AppError::Infra(InfraError::Io(_)) => "I/O failure",
            AppError::Infra(InfraError::Http { .. }) => "HTTP client could not be built",
            AppError::OperationFailed => "Operation failed",
            AppError::ValidationFailed(_) => "Please fill in every required field",
            AppError::SubmissionInFlight => "Still saving, please wait",
            AppError::NothingOpen(_) => "Unexpected error occurred",
        }
    }
}
