//! Per-ticket admission code.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`TicketCode`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum TicketCodeError {
    /// Code is empty.
    #[error("ticket code cannot be empty")]
    Empty,
    /// Code contains whitespace or control characters.
    #[error("ticket code contains invalid characters")]
    InvalidCharacters,
}

/// Unique admission code printed on a ticket.
///
/// Doubles as the QR payload and as the path segment of the scan
/// endpoint, so it must be non-empty and free of whitespace/control
/// characters. Otherwise opaque; the backend assigns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct TicketCode(String);

impl TicketCode {
    /// Parse a `TicketCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is empty or contains whitespace or
    /// control characters.
    pub fn parse(s: &str) -> Result<Self, TicketCodeError> {
        if s.is_empty() {
            return Err(TicketCodeError::Empty);
        }
        if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(TicketCodeError::InvalidCharacters);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TicketCode {
    type Err = TicketCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let code = TicketCode::parse("TG-2026-00042-9f3a").unwrap();
        assert_eq!(code.as_str(), "TG-2026-00042-9f3a");
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(TicketCode::parse(""), Err(TicketCodeError::Empty)));
    }

    #[test]
    fn test_parse_whitespace() {
        assert!(matches!(
            TicketCode::parse("TG 42"),
            Err(TicketCodeError::InvalidCharacters)
        ));
        assert!(matches!(
            TicketCode::parse("TG\n42"),
            Err(TicketCodeError::InvalidCharacters)
        ));
    }
}
