//! User-facing failure notifications raised by the controller.

use crate::gateway::{GatewayError, Operation};

pub const MISSING_FIELDS_MESSAGE: &str = "Name and email are required.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    /// Rejected locally before any request was made.
    Validation,
    /// No response was received.
    Transport,
    /// The server answered with a non-success status.
    Server,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    Validation,
    Fetch,
    Create,
    Update,
    Delete,
}

impl From<Operation> for UiErrorContext {
    fn from(value: Operation) -> Self {
        match value {
            Operation::Fetch => Self::Fetch,
            Operation::Create => Self::Create,
            Operation::Update => Self::Update,
            Operation::Delete => Self::Delete,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn missing_fields() -> Self {
        Self {
            category: UiErrorCategory::Validation,
            context: UiErrorContext::Validation,
            message: MISSING_FIELDS_MESSAGE.to_string(),
        }
    }

    pub fn from_gateway(err: &GatewayError) -> Self {
        let category = if err.is_transport() {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Server
        };
        Self {
            category,
            context: err.operation().into(),
            message: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&GatewayError> for UiError {
    fn from(value: &GatewayError) -> Self {
        Self::from_gateway(value)
    }
}
