//! Roleplay the simulated customer from the terminal.
//!
//! The user plays the support agent. Every line typed is an agent message;
//! the reply comes from the model or, offline, from the disclosure script.
//! The conversation is persisted after each turn.

use bugtrail_conversation::{RoleplayRequest, RoleplayService};
use bugtrail_core::{ChatMessage, Persona, ScenarioId};
use bugtrail_session::{FileStore, StateManager};
use std::io::Write;
use tracing::info;

use super::{build_services, init_common_components};

#[derive(Debug, Clone)]
pub struct ChatInput {
    /// Switch to this scenario first. Switching clears the saved chat.
    pub scenario: Option<ScenarioId>,
    /// Never call the model.
    pub offline: bool,
    /// Single agent message (non-interactive mode)
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let common = init_common_components().await?;
        let (roleplay, _) = build_services(&common.config)?;
        let state = common.state;

        let scenario = resolve_scenario(&state, input.scenario).await?;
        let persona = state.load_persona().await;
        let session = ChatSession {
            roleplay: &roleplay,
            state: &state,
            scenario,
            persona,
            offline: input.offline,
        };

        if let Some(message) = input.message {
            let reply = session.turn(message).await?;
            println!("{reply}");
        } else {
            session.run_interactive().await?;
        }
        Ok(())
    }
}

/// Selected scenario, switching (and clearing) when a different one is asked
/// for. Defaults to the first scenario.
async fn resolve_scenario(
    state: &StateManager<FileStore>,
    requested: Option<ScenarioId>,
) -> anyhow::Result<ScenarioId> {
    let current = state.load_scenario().await;
    match (requested, current) {
        (Some(requested), Some(current)) if requested == current => Ok(current),
        (Some(requested), _) => {
            state.select_scenario(requested).await?;
            Ok(requested)
        }
        (None, Some(current)) => Ok(current),
        (None, None) => {
            let first = ScenarioId::ALL[0];
            state.save_scenario(first).await?;
            Ok(first)
        }
    }
}

struct ChatSession<'a> {
    roleplay: &'a RoleplayService,
    state: &'a StateManager<FileStore>,
    scenario: ScenarioId,
    persona: Persona,
    offline: bool,
}

impl ChatSession<'_> {
    /// Record one agent message, fetch and record the customer's reply.
    async fn turn(&self, agent_text: String) -> anyhow::Result<String> {
        let history = self
            .state
            .append_message(ChatMessage::agent(agent_text))
            .await?;

        let request = RoleplayRequest::new(self.scenario.as_str(), history)
            .offline(self.offline)
            .with_persona(self.persona);
        let reply = self.roleplay.reply(&request).await?;

        let text = reply.message.text.clone();
        self.state.append_message(reply.message).await?;

        Ok(if reply.offline {
            format!("CUSTOMER (offline): {text}")
        } else {
            format!("CUSTOMER: {text}")
        })
    }

    async fn run_interactive(&self) -> anyhow::Result<()> {
        let brief = self.scenario.brief();
        println!("=== {} ({}) ===", brief.title, self.scenario);
        println!("Customer: {}", self.persona);
        println!("You are the support agent. Type 'exit', 'quit', or Ctrl+C to end.\n");

        for message in self.state.load_chat().await {
            println!("{}", message.transcript_line());
        }

        loop {
            print!("AGENT> ");
            std::io::stdout().flush()?;

            let mut line = String::new();
            if std::io::stdin().read_line(&mut line)? == 0 {
                break;
            }
            let line = line.trim();

            if matches!(line, "exit" | "quit" | "q") {
                break;
            }
            if line.is_empty() {
                continue;
            }

            match self.turn(line.to_string()).await {
                Ok(reply) => println!("{reply}\n"),
                Err(e) => eprintln!("Error: {e}"),
            }
        }

        let turns = self.state.load_chat().await.len();
        info!("Conversation saved: {turns} messages");
        println!("\nConversation saved. Run 'bugtrail extract' to build the report.");
        Ok(())
    }
}
