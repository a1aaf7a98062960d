use crate::dialogue::{Choice, DEFAULT_START, IntentOverride};
use serde::{Deserialize, Serialize};

/// A complete conversation described as data.
///
/// This is the target structure for custom formats (see [`super::IntoScript`]) and the
/// payload of compiled artifacts. Avoid `untagged`/skipped fields here: the same
/// type is encoded with bincode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptDefinition {
    #[serde(default = "default_start")]
    pub start: String,
    pub nodes: Vec<ScriptNode>,
    #[serde(default)]
    pub overrides: Vec<IntentOverride>,
}

fn default_start() -> String {
    DEFAULT_START.to_string()
}

/// One node. `message` may reference profile fields as `{industry}` or, with a
/// fallback, `{industry|jouw branche}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptNode {
    pub id: String,
    pub message: String,
    #[serde(default)]
    pub options: Option<Vec<Choice>>,
    /// Name of the profile field the reply is stored in, e.g. `"leadType"`.
    #[serde(default)]
    pub store: Option<String>,
    #[serde(default)]
    pub next: Option<ScriptTransition>,
    #[serde(default)]
    pub delay: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptTransition {
    Goto(String),
    Routes {
        arms: Vec<ScriptArm>,
        otherwise: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptArm {
    pub when: ScriptCondition,
    pub goto: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptCondition {
    Choice(String),
    Equals(String),
    Contains(String),
    FieldEquals { field: String, value: String },
    FieldSet(String),
    All(Vec<ScriptCondition>),
    Any(Vec<ScriptCondition>),
    Not(Box<ScriptCondition>),
}
