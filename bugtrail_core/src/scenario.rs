//! Canned support scenarios used to script the simulated customer.
//!
//! The table is static reference data: each brief carries the facts the
//! customer may disclose and the evidence they can offer.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioId {
    #[serde(rename = "auth_reset_expired")]
    AuthResetExpired,
    #[serde(rename = "auth_2fa_delay")]
    Auth2faDelay,
    #[serde(rename = "billing_double_charge")]
    BillingDoubleCharge,
    #[serde(rename = "mobile_faceid_crash")]
    MobileFaceidCrash,
}

impl ScenarioId {
    pub const ALL: [Self; 4] = [
        Self::AuthResetExpired,
        Self::Auth2faDelay,
        Self::BillingDoubleCharge,
        Self::MobileFaceidCrash,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AuthResetExpired => "auth_reset_expired",
            Self::Auth2faDelay => "auth_2fa_delay",
            Self::BillingDoubleCharge => "billing_double_charge",
            Self::MobileFaceidCrash => "mobile_faceid_crash",
        }
    }

    /// The brief for this scenario.
    #[must_use]
    pub fn brief(self) -> &'static ScenarioBrief {
        // Table order matches `ALL`.
        &SCENARIOS[self as usize]
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| format!("unknown scenario: {s}"))
    }
}

/// A predefined support situation.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScenarioBrief {
    pub id: ScenarioId,
    pub title: &'static str,
    #[serde(serialize_with = "serialize_facts")]
    pub facts: &'static [(&'static str, &'static str)],
    pub evidence: &'static [&'static str],
}

impl ScenarioBrief {
    /// Look up a fact by key.
    #[must_use]
    pub fn fact(&self, key: &str) -> Option<&'static str> {
        self.facts
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }
}

fn serialize_facts<S: Serializer>(
    facts: &&'static [(&'static str, &'static str)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(facts.iter().copied())
}

static SCENARIOS: [ScenarioBrief; 4] = [
    ScenarioBrief {
        id: ScenarioId::AuthResetExpired,
        title: "Reset link expires",
        facts: &[
            ("customerName", "Maya Chen"),
            ("customerCompany", "Brightline Analytics"),
            ("environment", "Chrome 120.0.6099.109, Windows 11 Pro"),
            (
                "errorString",
                "This password reset link has expired or is invalid",
            ),
            ("dateIssued", "2024-01-15 14:30 UTC"),
            (
                "linkFormat",
                "/auth/reset?token=eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
            ),
            ("scope", "All users requesting password reset"),
            ("attempts", "Tried 3 different browsers, cleared cache"),
            (
                "timing",
                "Link worked initially, stopped working after 2 hours",
            ),
        ],
        evidence: &[
            "Screenshot of error page",
            "Browser console showing 401 error",
            "Email timestamp showing reset request",
            "Network tab showing expired token response",
        ],
    },
    ScenarioBrief {
        id: ScenarioId::Auth2faDelay,
        title: "2FA SMS delay",
        facts: &[
            ("customerName", "Jordan Alvarez"),
            ("customerCompany", "Cobalt Logistics"),
            ("environment", "iPhone 15 Pro, iOS 17.5.1, Safari"),
            ("carrier", "Verizon"),
            ("delay", "15-20 minutes average delay"),
            ("scope", "US mobile numbers only"),
            ("attempts", "Tried resending 4 times"),
            ("workaround", "Email 2FA works instantly"),
            ("timing", "Started happening 3 days ago"),
        ],
        evidence: &[
            "SMS timestamps showing delay",
            "Carrier delivery reports",
            "Multiple test phone numbers affected",
            "Server logs showing SMS API latency",
        ],
    },
    ScenarioBrief {
        id: ScenarioId::BillingDoubleCharge,
        title: "Double charge",
        facts: &[
            ("customerName", "Priya Raman"),
            ("customerCompany", "Lumen Studio"),
            ("environment", "Safari 17.1, macOS Sonoma 14.1"),
            ("amount", "$49.99 charged twice"),
            ("paymentMethod", "Visa ending in 4532"),
            ("transactionIds", "txn_1234567890, txn_1234567891"),
            ("timing", "Both charges within 2 seconds"),
            ("scope", "Premium plan upgrade"),
            (
                "attempts",
                "Clicked upgrade button once, page seemed to freeze",
            ),
        ],
        evidence: &[
            "Bank statement showing duplicate charges",
            "Payment gateway transaction logs",
            "Browser network tab showing duplicate POST requests",
            "Session recording of the upgrade flow",
        ],
    },
    ScenarioBrief {
        id: ScenarioId::MobileFaceidCrash,
        title: "iOS Face ID crash",
        facts: &[
            ("customerName", "Sam Okafor"),
            ("customerCompany", "Tidewater Health"),
            ("environment", "iPhone 14, iOS 17.5, BugTrail app v2.1.3"),
            ("trigger", "Face ID authentication prompt"),
            ("errorCode", "EXC_BAD_ACCESS (SIGSEGV)"),
            ("scope", "Only devices with Face ID enabled"),
            ("frequency", "100% reproduction rate"),
            ("workaround", "Passcode login works fine"),
            ("timing", "Started after app update yesterday"),
        ],
        evidence: &[
            "Crash logs from iOS Settings",
            "Xcode crash symbolication",
            "Device console logs",
            "TestFlight crash reports from beta users",
        ],
    },
];

/// Every scenario, in presentation order.
#[must_use]
pub fn all_scenarios() -> &'static [ScenarioBrief] {
    &SCENARIOS
}

/// Find a scenario by its wire id. Unknown ids yield `None`.
#[must_use]
pub fn find_scenario(id: &str) -> Option<&'static ScenarioBrief> {
    id.parse::<ScenarioId>().ok().map(ScenarioId::brief)
}
