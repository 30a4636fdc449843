//! Display-name registry for participants seen during accumulation.

use std::collections::HashMap;

use splitledger_common::{Participant, UserId};

/// Maps participant IDs to the most recently observed display name.
#[derive(Debug, Clone, Default)]
pub struct ParticipantRegistry {
    names: HashMap<UserId, String>,
}

impl ParticipantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a participant. Later registrations overwrite earlier names.
    pub fn register(&mut self, participant: &Participant) {
        self.names
            .insert(participant.user_id.clone(), participant.name.clone());
    }

    /// Resolve an ID to a participant reference. Falls back to the raw ID
    /// when no usable name was observed.
    pub fn resolve(&self, user_id: &UserId) -> Participant {
        let seen = Participant::new(
            user_id.clone(),
            self.names.get(user_id).cloned().unwrap_or_default(),
        );
        let name = seen.display_name().to_string();

        Participant { name, ..seen }
    }

    /// Number of distinct participants registered.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_name_wins() {
        let mut registry = ParticipantRegistry::new();
        registry.register(&Participant::new("u1", "Alice"));
        registry.register(&Participant::new("u1", "Alice B."));

        assert_eq!(registry.resolve(&UserId::new("u1")).name, "Alice B.");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_falls_back_to_id() {
        let mut registry = ParticipantRegistry::new();
        registry.register(&Participant::new("u2", ""));

        assert_eq!(registry.resolve(&UserId::new("u2")).name, "u2");
        assert_eq!(registry.resolve(&UserId::new("u3")).name, "u3");
    }
}
