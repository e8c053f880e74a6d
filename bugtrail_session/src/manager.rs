//! Typed access to the four client-local state slots.

use bugtrail_core::{BugTrail, ChatMessage, Persona, ScenarioId};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::Result;
use crate::store::KeyValueStore;

/// Named slots of persisted client state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Chat,
    Persona,
    Scenario,
    BugTrail,
}

impl Slot {
    pub const ALL: [Self; 4] = [Self::Chat, Self::Persona, Self::Scenario, Self::BugTrail];

    #[must_use]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Chat => "bugtrail_chat",
            Self::Persona => "bugtrail_persona",
            Self::Scenario => "bugtrail_scenario",
            Self::BugTrail => "bugtrail_report",
        }
    }
}

/// Client state on top of any [`KeyValueStore`].
///
/// Loads are lenient: a missing or unreadable slot yields its default
/// (empty chat, default persona, no scenario, no report) and is logged.
/// Saves overwrite the slot wholesale.
pub struct StateManager<S> {
    store: S,
}

impl<S: KeyValueStore> StateManager<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    async fn load_json<T: DeserializeOwned>(&self, slot: Slot) -> Option<T> {
        let raw = match self.store.get(slot.key()).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(slot = slot.key(), error = %e, "Failed to read state slot");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(slot = slot.key(), error = %e, "Ignoring corrupt state slot");
                None
            }
        }
    }

    async fn save_json<T: Serialize + ?Sized>(&self, slot: Slot, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(slot.key(), &json).await
    }

    pub async fn load_chat(&self) -> Vec<ChatMessage> {
        self.load_json(Slot::Chat).await.unwrap_or_default()
    }

    pub async fn save_chat(&self, messages: &[ChatMessage]) -> Result<()> {
        self.save_json(Slot::Chat, messages).await
    }

    /// Append one message to the persisted log and return the full log.
    pub async fn append_message(&self, message: ChatMessage) -> Result<Vec<ChatMessage>> {
        let mut messages = self.load_chat().await;
        messages.push(message);
        self.save_chat(&messages).await?;
        Ok(messages)
    }

    pub async fn load_persona(&self) -> Persona {
        self.load_json(Slot::Persona).await.unwrap_or_default()
    }

    pub async fn save_persona(&self, persona: &Persona) -> Result<()> {
        self.save_json(Slot::Persona, persona).await
    }

    /// Stored as the raw id string. Unknown ids read back as `None`.
    pub async fn load_scenario(&self) -> Option<ScenarioId> {
        match self.store.get(Slot::Scenario.key()).await {
            Ok(raw) => raw.and_then(|id| id.trim().parse().ok()),
            Err(e) => {
                warn!(error = %e, "Failed to read scenario slot");
                None
            }
        }
    }

    pub async fn save_scenario(&self, scenario: ScenarioId) -> Result<()> {
        self.store
            .set(Slot::Scenario.key(), scenario.as_str())
            .await
    }

    /// Switch scenario. The conversation and report belong to the previous
    /// scenario, so both are cleared.
    pub async fn select_scenario(&self, scenario: ScenarioId) -> Result<()> {
        self.save_scenario(scenario).await?;
        self.store.remove(Slot::Chat.key()).await?;
        self.store.remove(Slot::BugTrail.key()).await?;
        info!("Selected scenario {scenario}, cleared chat and report");
        Ok(())
    }

    pub async fn load_bugtrail(&self) -> Option<BugTrail> {
        self.load_json(Slot::BugTrail).await
    }

    pub async fn save_bugtrail(&self, bugtrail: &BugTrail) -> Result<()> {
        self.save_json(Slot::BugTrail, bugtrail).await
    }

    pub async fn clear_all(&self) -> Result<()> {
        for slot in Slot::ALL {
            self.store.remove(slot.key()).await?;
        }
        info!("Cleared all client state");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn slot_keys_are_distinct() {
        let mut keys: Vec<_> = Slot::ALL.iter().map(Slot::key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 4);
    }

    #[tokio::test]
    async fn defaults_when_empty() {
        let state = StateManager::new(MemoryStore::new());

        assert!(state.load_chat().await.is_empty());
        assert_eq!(state.load_persona().await, Persona::default());
        assert_eq!(state.load_scenario().await, None);
        assert_eq!(state.load_bugtrail().await, None);
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn corrupt_slots_fall_back_to_defaults() {
        let store = MemoryStore::new();
        store.set("bugtrail_chat", "{not json").await.expect("set");
        store.set("bugtrail_persona", "42").await.expect("set");
        store.set("bugtrail_scenario", "nope").await.expect("set");
        let state = StateManager::new(store);

        assert!(state.load_chat().await.is_empty());
        assert_eq!(state.load_persona().await, Persona::default());
        assert_eq!(state.load_scenario().await, None);
    }

    #[tokio::test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    async fn scenario_is_stored_as_raw_id() {
        let state = StateManager::new(MemoryStore::new());
        state
            .save_scenario(ScenarioId::Auth2faDelay)
            .await
            .expect("save");

        assert_eq!(
            state.store().get("bugtrail_scenario").await.expect("get"),
            Some("auth_2fa_delay".to_string())
        );
        assert_eq!(state.load_scenario().await, Some(ScenarioId::Auth2faDelay));
    }
}
