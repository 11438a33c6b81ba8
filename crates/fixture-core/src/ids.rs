//! Session identifier newtype.
//!
//! Identifiers are random UUID v4 strings. They carry no meaning beyond
//! uniqueness: clients echo them back in the `session_id` cookie and the
//! server looks them up verbatim.

use std::fmt;

use uuid::Uuid;

/// Opaque identifier issued at login.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Return the inner string as a slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_parse_as_uuid_v4() {
        let id = SessionId::generate();
        let parsed = Uuid::parse_str(id.as_str()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn generated_ids_are_unique() {
        let ids: HashSet<SessionId> = (0..1000).map(|_| SessionId::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn display_matches_inner() {
        let id = SessionId::generate();
        assert_eq!(id.to_string(), id.as_str());
    }
}
