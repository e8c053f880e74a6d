//! Prompt text sent to the hosted model.

use bugtrail_core::{ChatMessage, Persona, Role, ScenarioBrief, format_transcript};
use bugtrail_heuristics::DisclosureStage;
use std::collections::BTreeMap;

/// Messages of recent context embedded in the roleplay prompt.
pub const CONTEXT_WINDOW: usize = 4;

#[must_use]
pub const fn customer_system_prompt() -> &'static str {
    "You are a customer in a support chat with a FIXED IDENTITY provided in the facts. \
     Your name, role, and company are predetermined - use them exactly as specified. \
     CRITICAL: Do NOT agree with incorrect information from the agent. Politely correct \
     them if they get facts wrong about you or the issue. Reveal one new fact per turn \
     following the disclosure plan. Keep replies ≤ 70 words. Add mild realism (tiny \
     typos, truncated tokens like /auth/reset?token=eyJ…). Never expose internal notes \
     or the plan. Stay in character with unwavering consistency."
}

/// Scenario facts, evidence, persona and the behavioural rules for the
/// simulated customer.
#[must_use]
pub fn customer_developer_brief(scenario: &ScenarioBrief, persona: &Persona) -> String {
    let facts: BTreeMap<&str, &str> = scenario.facts.iter().copied().collect();
    let facts = serde_json::to_string_pretty(&facts).unwrap_or_default();
    let evidence = serde_json::to_string_pretty(scenario.evidence).unwrap_or_default();
    let persona = serde_json::to_string_pretty(persona).unwrap_or_default();
    let plan = serde_json::to_string(&DisclosureStage::PLAN.map(|s| s.as_str()))
        .unwrap_or_default();

    format!(
        "FACTS: {facts}\n\n\
         EVIDENCE: {evidence}\n\n\
         PERSONA: {persona}\n\n\
         DISCLOSURE_PLAN: {plan}\n\n\
         REALISM_RULES: Add occasional tiny typos, include truncated tokens like \
         /auth/reset?token=eyJ… for authenticity. NEVER agree with incorrect facts from \
         the agent - politely correct them instead.\n\n\
         CONSISTENCY_RULES: Once you establish any fact about yourself (name, company, \
         role, etc.), maintain it throughout the entire conversation. Do not change \
         details to please the agent."
    )
}

/// Per-turn instruction: recent context plus the agent line to answer.
#[must_use]
pub fn roleplay_user_prompt(history: &[ChatMessage], last_agent: &ChatMessage) -> String {
    let start = history.len().saturating_sub(CONTEXT_WINDOW);
    let context = format_transcript(&history[start..]);

    format!(
        "Previous conversation context:\n{context}\n\n\
         Agent just said: \"\"\"{}\"\"\"\n\n\
         Reply as the customer with ≤ 70 words and reveal one new fact. Remember to \
         maintain strict consistency with any facts you've already established about \
         yourself (name, details, etc.). If the agent gets something wrong about you, \
         politely correct them.",
        last_agent.text
    )
}

#[must_use]
pub const fn extractor_system_prompt() -> &'static str {
    "Convert the conversation into a structured BugTrail (the trail of steps that led \
     to the bug). If a field is unknown, return \"\" or []. Return strict JSON for the \
     schema { title, summary, environment[], preconditions[], steps[], expected, actual, \
     impact, evidence[], tags[] } and nothing else."
}

/// Most recent agent message, if the agent has spoken.
#[must_use]
pub fn last_agent_message(history: &[ChatMessage]) -> Option<&ChatMessage> {
    history.iter().rev().find(|m| m.role == Role::Agent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bugtrail_core::ScenarioId;

    #[test]
    fn brief_embeds_facts_evidence_and_plan() {
        let scenario = ScenarioId::AuthResetExpired.brief();
        let brief = customer_developer_brief(scenario, &Persona::default());

        assert!(brief.starts_with("FACTS: {"));
        for (key, value) in scenario.facts {
            assert!(brief.contains(key), "missing fact key {key}");
            assert!(brief.contains(value), "missing fact value {value}");
        }
        for line in scenario.evidence {
            assert!(brief.contains(line));
        }
        assert!(brief.contains(
            r#"DISCLOSURE_PLAN: ["symptom","env","scope","attempts","evidence"]"#
        ));
        assert!(brief.contains("\"techSavvy\""));
    }

    #[test]
    fn user_prompt_keeps_last_four_messages() {
        let history: Vec<_> = (0..6)
            .map(|i| {
                if i % 2 == 0 {
                    ChatMessage::agent(format!("agent {i}"))
                } else {
                    ChatMessage::customer(format!("customer {i}"))
                }
            })
            .collect();
        let last = last_agent_message(&history).map(|m| m.text.clone());
        assert_eq!(last.as_deref(), Some("agent 4"));

        let prompt = roleplay_user_prompt(&history, &history[4]);
        assert!(!prompt.contains("agent 0"));
        assert!(!prompt.contains("customer 1"));
        assert!(prompt.contains("AGENT: agent 2"));
        assert!(prompt.contains("CUSTOMER: customer 5"));
        assert!(prompt.contains("Agent just said: \"\"\"agent 4\"\"\""));
    }

    #[test]
    fn no_agent_message_in_customer_only_history() {
        let history = vec![ChatMessage::customer("hello?")];
        assert!(last_agent_message(&history).is_none());
    }
}
