//! Integration tests for persisted client state over the file-backed store.

use bugtrail_core::{BugTrail, ChatMessage, Industry, Level, Persona, Role, ScenarioId};
use bugtrail_session::{FileStore, KeyValueStore, Slot, StateManager};

async fn file_state(dir: &tempfile::TempDir) -> StateManager<FileStore> {
    let store = FileStore::open(dir.path().join("state"))
        .await
        .expect("store opens");
    StateManager::new(store)
}

#[tokio::test]
async fn chat_survives_reopen() {
    let dir = tempfile::tempdir().expect("temp dir");

    {
        let state = file_state(&dir).await;
        state
            .append_message(ChatMessage::agent("Hi, how can I help?"))
            .await
            .expect("append");
        state
            .append_message(ChatMessage::customer("My reset link expired."))
            .await
            .expect("append");
    }

    let reopened = file_state(&dir).await;
    let chat = reopened.load_chat().await;
    assert_eq!(chat.len(), 2);
    assert_eq!(chat[0].role, Role::Agent);
    assert_eq!(chat[1].text, "My reset link expired.");
}

#[tokio::test]
async fn selecting_scenario_clears_chat_and_report_only() {
    let dir = tempfile::tempdir().expect("temp dir");
    let state = file_state(&dir).await;

    let persona = Persona {
        industry: Industry::Fintech,
        tech_savvy: Level::High,
        ..Persona::default()
    };
    state.save_persona(&persona).await.expect("save persona");
    state
        .append_message(ChatMessage::agent("Hello"))
        .await
        .expect("append");
    let report = BugTrail {
        title: "Login fails".to_string(),
        ..BugTrail::default()
    };
    state.save_bugtrail(&report).await.expect("save report");

    state
        .select_scenario(ScenarioId::MobileFaceidCrash)
        .await
        .expect("select");

    assert!(state.load_chat().await.is_empty());
    assert_eq!(state.load_bugtrail().await, None);
    assert_eq!(state.load_persona().await, persona);
    assert_eq!(
        state.load_scenario().await,
        Some(ScenarioId::MobileFaceidCrash)
    );
}

#[tokio::test]
async fn clear_all_removes_every_slot() {
    let dir = tempfile::tempdir().expect("temp dir");
    let state = file_state(&dir).await;

    state
        .select_scenario(ScenarioId::BillingDoubleCharge)
        .await
        .expect("select");
    state
        .save_persona(&Persona::default())
        .await
        .expect("save persona");
    state
        .save_bugtrail(&BugTrail::default())
        .await
        .expect("save report");
    state
        .append_message(ChatMessage::customer("charged twice"))
        .await
        .expect("append");

    state.clear_all().await.expect("clear");

    for slot in Slot::ALL {
        assert_eq!(
            state.store().get(slot.key()).await.expect("get"),
            None,
            "slot {} should be empty",
            slot.key()
        );
    }
}

#[tokio::test]
async fn report_round_trips_verbatim() {
    let dir = tempfile::tempdir().expect("temp dir");
    let state = file_state(&dir).await;

    let report = BugTrail {
        title: "Crash on Face ID".to_string(),
        tags: vec!["crash".to_string(), "ios".to_string()],
        ..BugTrail::default()
    };
    state.save_bugtrail(&report).await.expect("save");

    assert_eq!(state.load_bugtrail().await, Some(report));
}
