//! Scripted customer replies for offline mode.
//!
//! The simulated customer reveals one kind of fact per turn, following the
//! disclosure plan symptom → environment → scope → attempts → evidence, and
//! then falls back to filler lines. The stage is a function of how many
//! customer turns the conversation already holds.

use bugtrail_core::{ChatMessage, Role, ScenarioBrief, ScenarioId, find_scenario};
use tracing::debug;

/// Reply used when the scenario id is not in the table.
pub const GENERIC_GREETING: &str = "I'm having some issues with your app. Can you help?";

const FILLER_LINES: [&str; 5] = [
    "Is there anything else you need to know?",
    "I can provide more details if needed.",
    "Let me know what other info would help.",
    "Should I try anything else while we troubleshoot?",
    "Actually, let me double-check that detail... yes, that's correct.",
];

/// Position in the disclosure plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisclosureStage {
    Symptom,
    Environment,
    Scope,
    Attempts,
    Evidence,
    /// Plan exhausted; absorbing.
    Filler,
}

impl DisclosureStage {
    /// The scripted stages, in disclosure order.
    pub const PLAN: [Self; 5] = [
        Self::Symptom,
        Self::Environment,
        Self::Scope,
        Self::Attempts,
        Self::Evidence,
    ];

    /// Stage for a reply given the number of prior customer turns.
    #[must_use]
    pub const fn for_turn(turn: usize) -> Self {
        if turn < Self::PLAN.len() {
            Self::PLAN[turn]
        } else {
            Self::Filler
        }
    }

    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Symptom => Self::Environment,
            Self::Environment => Self::Scope,
            Self::Scope => Self::Attempts,
            Self::Attempts => Self::Evidence,
            Self::Evidence | Self::Filler => Self::Filler,
        }
    }

    /// Name used in the disclosure plan handed to the model.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Symptom => "symptom",
            Self::Environment => "env",
            Self::Scope => "scope",
            Self::Attempts => "attempts",
            Self::Evidence => "evidence",
            Self::Filler => "filler",
        }
    }
}

fn fact(scenario: &ScenarioBrief, key: &str, fallback: &'static str) -> &'static str {
    scenario.fact(key).unwrap_or(fallback)
}

/// "Name from Company", or just the name when no company is on file.
fn identity(scenario: &ScenarioBrief) -> String {
    let name = fact(scenario, "customerName", "Customer");
    scenario
        .fact("customerCompany")
        .map_or_else(|| name.to_string(), |company| format!("{name} from {company}"))
}

fn symptom(scenario: &ScenarioBrief) -> String {
    let who = identity(scenario);
    match scenario.id {
        ScenarioId::AuthResetExpired => format!(
            "Hi, I'm {who}. I'm trying to reset my password but the link isn't working. It says the link has expired or is invalid."
        ),
        ScenarioId::Auth2faDelay => format!(
            "Hello, this is {who}. I'm not receiving my 2FA SMS codes. Been waiting like 20 minutes now and still nothing."
        ),
        ScenarioId::BillingDoubleCharge => format!(
            "Hi there, I'm {who}. I think I was charged twice for my premium upgrade. My card shows two $49.99 charges."
        ),
        ScenarioId::MobileFaceidCrash => format!(
            "Hey, this is {who}. Your iOS app keeps crashing when I try to use Face ID login. It worked fine before the update."
        ),
    }
}

fn environment(scenario: &ScenarioBrief) -> String {
    let env = fact(scenario, "environment", "my usual setup");
    match scenario.id {
        ScenarioId::AuthResetExpired => {
            format!("I'm using {env}. The error shows up right when I click the reset link.")
        }
        ScenarioId::Auth2faDelay => format!(
            "I'm on {env}. My carrier is {}. Email 2FA works fine though.",
            fact(scenario, "carrier", "a major carrier")
        ),
        ScenarioId::BillingDoubleCharge => {
            format!("Using {env}. Both charges happened within seconds of each other.")
        }
        ScenarioId::MobileFaceidCrash => {
            format!("{env}. The crash happens every single time I try Face ID authentication.")
        }
    }
}

const fn scope(scenario: &ScenarioBrief) -> &'static str {
    match scenario.id {
        ScenarioId::AuthResetExpired => {
            "This affects all password reset attempts. The link worked initially but stopped after about 2 hours."
        }
        ScenarioId::Auth2faDelay => {
            "Seems to be US mobile numbers only. The delay is usually 15-20 minutes, sometimes longer."
        }
        ScenarioId::BillingDoubleCharge => {
            "This was for the premium plan upgrade. The page seemed to freeze after I clicked, so maybe I clicked twice?"
        }
        ScenarioId::MobileFaceidCrash => {
            "Only happens with Face ID. Passcode login works perfectly fine. Started right after yesterday's app update."
        }
    }
}

fn attempts(scenario: &ScenarioBrief) -> String {
    match scenario.id {
        ScenarioId::AuthResetExpired => format!(
            "I tried 3 different browsers and cleared my cache. Same error every time. The link looks like {}",
            fact(scenario, "linkFormat", "/auth/reset?token=...")
        ),
        ScenarioId::Auth2faDelay => {
            "I've tried resending the SMS 4 times now. Still waiting. This started about 3 days ago."
                .to_string()
        }
        ScenarioId::BillingDoubleCharge => format!(
            "I only clicked the upgrade button once, I swear! The transaction IDs are {}.",
            fact(scenario, "transactionIds", "on my statement")
        ),
        ScenarioId::MobileFaceidCrash => format!(
            "I've tried restarting the app, restarting my phone. Nothing works. Error code is {}.",
            fact(scenario, "errorCode", "unknown")
        ),
    }
}

fn evidence(scenario: &ScenarioBrief) -> String {
    let first = scenario
        .evidence
        .first()
        .map_or_else(|| "some screenshots".to_string(), |e| e.to_lowercase());
    match scenario.id {
        ScenarioId::AuthResetExpired => {
            format!("I have {first} and browser console logs showing the 401 error.")
        }
        ScenarioId::Auth2faDelay => {
            format!("I have {first} and can show you the carrier delivery reports too.")
        }
        ScenarioId::BillingDoubleCharge => {
            format!("I have {first} and the payment gateway logs if you need them.")
        }
        ScenarioId::MobileFaceidCrash => {
            format!("I have {first} from iOS Settings and can send the crash symbolication.")
        }
    }
}

/// Scripted reply text for `scenario` when `turn` customer messages exist.
///
/// Pure: identical inputs always give identical text.
#[must_use]
pub fn offline_reply_text(scenario: &ScenarioBrief, turn: usize) -> String {
    match DisclosureStage::for_turn(turn) {
        DisclosureStage::Symptom => symptom(scenario),
        DisclosureStage::Environment => environment(scenario),
        DisclosureStage::Scope => scope(scenario).to_string(),
        DisclosureStage::Attempts => attempts(scenario),
        DisclosureStage::Evidence => evidence(scenario),
        DisclosureStage::Filler => FILLER_LINES[turn % FILLER_LINES.len()].to_string(),
    }
}

/// Next simulated customer message for the conversation so far.
///
/// Unknown scenario ids get [`GENERIC_GREETING`].
#[must_use]
pub fn generate_offline_reply(history: &[ChatMessage], scenario_id: &str) -> ChatMessage {
    let Some(scenario) = find_scenario(scenario_id) else {
        debug!(scenario_id, "unknown scenario, replying with generic greeting");
        return ChatMessage::customer(GENERIC_GREETING);
    };

    let turn = history.iter().filter(|m| m.role == Role::Customer).count();
    debug!(
        scenario_id,
        turn,
        stage = DisclosureStage::for_turn(turn).as_str(),
        "generating offline reply"
    );
    ChatMessage::customer(offline_reply_text(scenario, turn))
}
