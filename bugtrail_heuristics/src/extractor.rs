//! Rule-based BugTrail extraction.
//!
//! Used when no model is configured or the model's answer is unusable. Every
//! field comes from an ordered rule table evaluated against the transcript;
//! when several rules could apply, the earlier entry wins.

use bugtrail_core::{BugTrail, ChatMessage, Role, format_transcript};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::rules::{KeywordRule, all_matches, first_match};

static VERSION_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"\d+\.\d+(?:\.\d+)?").ok());

const MAX_VERSION_MARKERS: usize = 2;

const TITLE_RULES: &[KeywordRule] = &[
    KeywordRule::all(&["reset", "password"], "Password Reset Link Issues"),
    KeywordRule::any(&["2fa", "sms"], "2FA SMS Delivery Delays"),
    KeywordRule::any(&["charge", "billing"], "Duplicate Billing Charges"),
    KeywordRule::any(&["crash", "face id"], "iOS Face ID Authentication Crash"),
];
const DEFAULT_TITLE: &str = "User Reported Issue";

const SUMMARY_RULES: &[KeywordRule] = &[
    KeywordRule::all(
        &["reset", "expired"],
        "User unable to reset password due to expired or invalid reset links",
    ),
    KeywordRule::all(
        &["2fa", "delay"],
        "Significant delays in 2FA SMS code delivery affecting user authentication",
    ),
    KeywordRule::all(
        &["double", "charge"],
        "Users being charged multiple times for single transactions",
    ),
    KeywordRule::all(
        &["crash", "face id"],
        "iOS app crashes when attempting Face ID authentication",
    ),
];
const DEFAULT_SUMMARY: &str = "User experiencing technical difficulties with the application";

// Product names: matched case-sensitively against the raw transcript.
const ENVIRONMENT_RULES: &[KeywordRule] = &[
    KeywordRule::any(&["Chrome"], "Chrome Browser"),
    KeywordRule::any(&["Safari"], "Safari Browser"),
    KeywordRule::any(&["Firefox"], "Firefox Browser"),
    KeywordRule::any(&["Windows"], "Windows OS"),
    KeywordRule::any(&["macOS", "Mac"], "macOS"),
    KeywordRule::any(&["iOS"], "iOS"),
    KeywordRule::any(&["Android"], "Android"),
    KeywordRule::any(&["iPhone"], "iPhone Device"),
    KeywordRule::any(&["iPad"], "iPad Device"),
];
const DEFAULT_ENVIRONMENT: &[&str] = &["Web Browser", "Unknown OS"];

const PRECONDITIONS: &[&str] = &["User must be logged in", "Feature must be enabled"];

const EXPECTED: &str = "The feature should work as intended without errors";

const RESET_STEPS: &[&str] = &[
    "User requests password reset",
    "System sends reset email with link",
    "User clicks on reset link",
    "System displays expired/invalid error",
    "User attempts multiple browsers",
    "Error persists across all attempts",
];
const TWO_FACTOR_STEPS: &[&str] = &[
    "User attempts to log in",
    "System prompts for 2FA code",
    "User requests SMS code",
    "System sends code to carrier",
    "User waits for SMS delivery",
    "Code arrives with significant delay",
];
const BILLING_STEPS: &[&str] = &[
    "User opens the plan upgrade page",
    "User clicks the upgrade button",
    "Page stops responding while payment is processed",
    "Payment is submitted more than once",
    "User sees duplicate charges on their payment method",
];
const CRASH_STEPS: &[&str] = &[
    "User updates the app to the latest version",
    "User opens the app and chooses biometric login",
    "System presents the Face ID prompt",
    "Application crashes during authentication",
    "User falls back to passcode login",
];
const DEFAULT_STEPS: &[&str] = &[
    "User attempts to access the affected feature",
    "System processes the user request",
    "Error condition is triggered",
    "User observes unexpected behavior",
    "User attempts troubleshooting steps",
    "Issue persists across multiple attempts",
];
const STEP_RULES: &[KeywordRule<&[&str]>] = &[
    KeywordRule::any(&["reset"], RESET_STEPS),
    KeywordRule::any(&["2fa"], TWO_FACTOR_STEPS),
    KeywordRule::all(&["double", "charge"], BILLING_STEPS),
    KeywordRule::any(&["crash"], CRASH_STEPS),
];

const ACTUAL_RULES: &[KeywordRule] = &[
    KeywordRule::any(
        &["expired", "invalid"],
        "Reset links show as expired or invalid immediately upon use",
    ),
    KeywordRule::all(
        &["delay", "sms"],
        "2FA SMS codes arrive 15-20 minutes late or not at all",
    ),
    KeywordRule::all(
        &["double", "charge"],
        "Multiple charges appear on user's payment method for single transaction",
    ),
    KeywordRule::any(
        &["crash", "exc_bad_access"],
        "Application crashes with EXC_BAD_ACCESS error during Face ID prompt",
    ),
];
const DEFAULT_ACTUAL: &str = "System behaves differently than expected, causing user frustration";

const IMPACT_RULES: &[KeywordRule] = &[
    KeywordRule::any(
        &["can't", "unable"],
        "High - Users unable to complete critical workflows",
    ),
    KeywordRule::any(
        &["delay", "slow"],
        "Medium - Users experience delays but can eventually complete tasks",
    ),
    KeywordRule::any(
        &["crash", "error"],
        "High - Application crashes prevent users from accessing features",
    ),
];
const DEFAULT_IMPACT: &str = "Medium - Users experience degraded functionality";

const EVIDENCE_RULES: &[KeywordRule] = &[
    KeywordRule::any(&["screenshot"], "User screenshots"),
    KeywordRule::any(&["console"], "Browser console logs"),
    KeywordRule::any(&["error code"], "System error codes"),
    KeywordRule::any(&["transaction"], "Transaction records"),
    KeywordRule::any(&["crash log"], "Application crash logs"),
    KeywordRule::any(&["timestamp"], "Timestamp records"),
];
const DEFAULT_EVIDENCE: &[&str] = &["User report", "Support conversation"];

const TAG_RULES: &[KeywordRule] = &[
    KeywordRule::any(&["auth"], "authentication"),
    KeywordRule::any(&["billing"], "billing"),
    KeywordRule::any(&["mobile"], "mobile"),
    KeywordRule::any(&["crash", "exc_bad_access", "sigsegv"], "crash"),
    KeywordRule::any(&["2fa"], "2fa"),
    KeywordRule::any(&["sms"], "sms"),
    KeywordRule::any(&["ios", "iphone", "face id", "exc_bad_access"], "ios"),
    KeywordRule::any(&["face id", "touch id"], "biometric"),
];
const DEFAULT_TAGS: &[&str] = &["bug", "user-report"];

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

fn or_default(values: Vec<&str>, default: &[&str]) -> Vec<String> {
    if values.is_empty() {
        owned(default)
    } else {
        owned(&values)
    }
}

/// Title is taken from the first customer message only.
fn extract_title(messages: &[ChatMessage]) -> String {
    let first = messages
        .iter()
        .find(|m| m.role == Role::Customer)
        .map(|m| m.text.to_lowercase())
        .unwrap_or_default();
    first_match(TITLE_RULES, &first, DEFAULT_TITLE).to_string()
}

fn extract_environment(transcript: &str) -> Vec<String> {
    let mut env = owned(&all_matches(ENVIRONMENT_RULES, transcript));
    if let Some(re) = VERSION_RE.as_ref() {
        env.extend(
            re.find_iter(transcript)
                .take(MAX_VERSION_MARKERS)
                .map(|m| format!("Version {}", m.as_str())),
        );
    }
    if env.is_empty() {
        owned(DEFAULT_ENVIRONMENT)
    } else {
        env
    }
}

/// Derive a fully-populated [`BugTrail`] from a conversation.
#[must_use]
pub fn heuristic_extract(messages: &[ChatMessage]) -> BugTrail {
    let transcript = format_transcript(messages);
    let lowered = transcript.to_lowercase();

    let trail = BugTrail {
        title: extract_title(messages),
        summary: first_match(SUMMARY_RULES, &lowered, DEFAULT_SUMMARY).to_string(),
        environment: extract_environment(&transcript),
        preconditions: owned(PRECONDITIONS),
        steps: owned(first_match(STEP_RULES, &lowered, DEFAULT_STEPS)),
        expected: EXPECTED.to_string(),
        actual: first_match(ACTUAL_RULES, &lowered, DEFAULT_ACTUAL).to_string(),
        impact: first_match(IMPACT_RULES, &lowered, DEFAULT_IMPACT).to_string(),
        evidence: or_default(all_matches(EVIDENCE_RULES, &lowered), DEFAULT_EVIDENCE),
        tags: or_default(all_matches(TAG_RULES, &lowered), DEFAULT_TAGS),
    };

    debug!(
        title = %trail.title,
        tags = ?trail.tags,
        messages = messages.len(),
        "heuristic extraction complete"
    );
    trail
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convo(lines: &[(Role, &str)]) -> Vec<ChatMessage> {
        lines
            .iter()
            .map(|(role, text)| ChatMessage::new(*role, *text))
            .collect()
    }

    #[test]
    fn title_comes_from_first_customer_message() {
        let messages = convo(&[
            (Role::Agent, "Is this about a password reset?"),
            (Role::Customer, "My SMS codes never show up"),
            (Role::Customer, "Also my password reset failed"),
        ]);

        assert_eq!(extract_title(&messages), "2FA SMS Delivery Delays");
    }

    #[test]
    fn title_defaults_without_customer_messages() {
        let messages = convo(&[(Role::Agent, "Hello?")]);
        assert_eq!(extract_title(&messages), DEFAULT_TITLE);
    }

    #[test]
    fn environment_markers_are_case_sensitive() {
        let env = extract_environment("CUSTOMER: I use chrome on windows");
        assert_eq!(env, owned(DEFAULT_ENVIRONMENT));

        let env = extract_environment("CUSTOMER: I use Chrome on Windows");
        assert_eq!(env, vec!["Chrome Browser", "Windows OS"]);
    }

    #[test]
    fn environment_keeps_first_two_versions() {
        let env = extract_environment("Safari 17.1, macOS Sonoma 14.1 and app 2.1.3");
        assert_eq!(
            env,
            vec!["Safari Browser", "macOS", "Version 17.1", "Version 14.1"]
        );
    }

    #[test]
    fn versions_alone_are_enough() {
        let env = extract_environment("build 4.2.0 broke it");
        assert_eq!(env, vec!["Version 4.2.0"]);
    }

    #[test]
    fn mac_substring_counts_as_macos() {
        let env = extract_environment("on my Macbook");
        assert_eq!(env, vec!["macOS"]);
    }

    #[test]
    fn billing_conversation_uses_billing_steps() {
        let trail = heuristic_extract(&convo(&[(
            Role::Customer,
            "I got a double charge on my card",
        )]));

        assert_eq!(trail.steps, owned(BILLING_STEPS));
        assert_eq!(
            trail.actual,
            "Multiple charges appear on user's payment method for single transaction"
        );
        assert_eq!(trail.summary, "Users being charged multiple times for single transactions");
    }

    #[test]
    fn impact_precedence_prefers_blocking_language() {
        let trail = heuristic_extract(&convo(&[(
            Role::Customer,
            "The app crash means I'm unable to log in",
        )]));

        assert_eq!(trail.impact, "High - Users unable to complete critical workflows");
    }

    #[test]
    fn evidence_collects_every_match() {
        let trail = heuristic_extract(&convo(&[(
            Role::Customer,
            "I have a screenshot, the console output and the transaction id",
        )]));

        assert_eq!(
            trail.evidence,
            vec!["User screenshots", "Browser console logs", "Transaction records"]
        );
    }
}
