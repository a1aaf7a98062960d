use super::graph::DialogueGraph;
use super::node::{Choice, Reply, TERMINAL};
use super::transition::Route;
use crate::config::EngineConfig;
use crate::profile::UserProfile;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

pub const DEFAULT_DELAY_MS: u64 = 1500;

/// The next message the host should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextMessage {
    pub id: String,
    pub message: String,
    /// Reply buttons; empty when free text is expected.
    pub options: Vec<Choice>,
    pub delay: u64,
    pub route: Route,
}

impl NextMessage {
    /// The button labels in display order.
    pub fn labels(&self) -> Vec<&str> {
        self.options.iter().map(|c| c.label.as_str()).collect()
    }
}

/// A keyword rule that jumps to a fixed node from anywhere in the conversation.
///
/// It fires when the lower-cased reply contains every fragment of `all_of` and, if
/// `any_of` is non-empty, at least one of its fragments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentOverride {
    pub name: String,
    pub all_of: Vec<String>,
    #[serde(default)]
    pub any_of: Vec<String>,
    pub target: String,
}

impl IntentOverride {
    /// "What does a lead look like?" asked at any point in the chat.
    pub fn lead_examples() -> Self {
        Self {
            name: "lead_examples".to_string(),
            all_of: vec!["lead".to_string()],
            any_of: vec![
                "hoe ziet".to_string(),
                "uit".to_string(),
                "voorbeeld".to_string(),
            ],
            target: "lead_examples".to_string(),
        }
    }

    pub fn matches(&self, response: &str) -> bool {
        let response = response.to_lowercase();
        let contains = |fragment: &String| response.contains(&fragment.to_lowercase());
        self.all_of.iter().all(contains)
            && (self.any_of.is_empty() || self.any_of.iter().any(contains))
    }
}

/// Drives a [`DialogueGraph`].
///
/// The engine holds no per-conversation state: the host passes the current node id
/// and owns the profile. One engine can serve any number of conversations.
#[derive(Debug, Clone)]
pub struct DialogueEngine {
    graph: Arc<DialogueGraph>,
    default_delay: u64,
}

impl DialogueEngine {
    pub fn new(graph: impl Into<Arc<DialogueGraph>>) -> Self {
        Self {
            graph: graph.into(),
            default_delay: DEFAULT_DELAY_MS,
        }
    }

    pub fn with_config(graph: impl Into<Arc<DialogueGraph>>, config: &EngineConfig) -> Self {
        Self {
            graph: graph.into(),
            default_delay: config.default_delay_ms,
        }
    }

    pub fn graph(&self) -> &DialogueGraph {
        &self.graph
    }

    /// Processes a reply to `current_node_id` and returns the message to show next.
    ///
    /// In order: intent overrides are checked against the raw reply; the current
    /// node's action updates `profile`; its transition picks the next node; that
    /// node's message and options are resolved against the updated profile.
    ///
    /// Returns `None` when the current node is unknown, when the conversation
    /// reached the terminal, or when the transition points at a node that does not
    /// exist. Replies that match none of the offered options are not rejected; they
    /// take the transition's fallback.
    pub fn advance(
        &self,
        current_node_id: &str,
        user_response: &str,
        profile: &mut UserProfile,
    ) -> Option<NextMessage> {
        if let Some(rule) = self
            .graph
            .overrides()
            .iter()
            .find(|rule| rule.matches(user_response))
        {
            debug!(from = current_node_id, to = %rule.target, intent = %rule.name, "intent override");
            return self.present(&rule.target, profile, Route::Override);
        }

        let Some(node) = self.graph.get(current_node_id) else {
            warn!(node = current_node_id, "cannot advance from unknown node");
            return None;
        };

        let options = node.resolve_options(profile);
        let reply = Reply::recognize(user_response, &options);

        if let Some(action) = &node.action {
            action.apply(&reply, profile);
        }

        let (next_id, route) = match &node.next_step {
            Some(transition) => transition.resolve(&reply, profile),
            None => (TERMINAL, Route::Terminal),
        };
        debug!(from = current_node_id, to = next_id, ?route, "transition");

        if next_id == TERMINAL {
            return None;
        }
        self.present(next_id, profile, route)
    }

    /// The opening message of a conversation.
    pub fn start(&self, profile: &UserProfile) -> Option<NextMessage> {
        self.present(self.graph.start(), profile, Route::Start)
    }

    /// Resolves a node's display values without taking a transition.
    pub fn resolve(&self, node_id: &str, profile: &UserProfile) -> Option<NextMessage> {
        self.present(node_id, profile, Route::Start)
    }

    fn present(&self, node_id: &str, profile: &UserProfile, route: Route) -> Option<NextMessage> {
        let Some(node) = self.graph.get(node_id) else {
            warn!(node = node_id, "transition leads to an undefined node");
            return None;
        };
        Some(NextMessage {
            id: node.id.clone(),
            message: node.resolve_message(profile),
            options: node.resolve_options(profile),
            delay: node.delay.unwrap_or(self.default_delay),
            route,
        })
    }
}
