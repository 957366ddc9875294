//! ID generation utilities.

use uuid::Uuid;

/// Generates a time-ordered execution identifier (UUID v7).
///
/// Used to correlate the tracing output of one endpoint run.
#[must_use]
pub fn generate_execution_id() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_execution_id_format() {
        let id = generate_execution_id();
        assert_eq!(id.len(), 36);
        assert!(Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_execution_id_uniqueness() {
        assert_ne!(generate_execution_id(), generate_execution_id());
    }
}
