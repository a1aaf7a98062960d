use super::engine::IntentOverride;
use super::node::{ConversationNode, TERMINAL};
use crate::error::{GraphError, GraphIssue};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use std::collections::VecDeque;
use tracing::{info, warn};

pub const DEFAULT_START: &str = "welcome";

/// The node table of a scripted conversation.
///
/// A graph is immutable once built. Nodes keep the order in which they were added
/// so listings and reports are stable.
#[derive(Debug, Clone)]
pub struct DialogueGraph {
    nodes: AHashMap<String, ConversationNode>,
    order: Vec<String>,
    start: String,
    overrides: Vec<IntentOverride>,
}

impl DialogueGraph {
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new(DEFAULT_START)
    }

    pub fn get(&self, id: &str) -> Option<&ConversationNode> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn overrides(&self) -> &[IntentOverride] {
        &self.overrides
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Node ids in definition order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Nodes in definition order.
    pub fn nodes(&self) -> impl Iterator<Item = &ConversationNode> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    /// All `(from, to)` edges, including edges to the terminal.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        self.nodes()
            .flat_map(|node| {
                let targets = match &node.next_step {
                    Some(transition) => transition.targets(),
                    None => vec![TERMINAL],
                };
                targets
                    .into_iter()
                    .unique()
                    .map(move |target| (node.id.as_str(), target))
            })
            .collect()
    }

    /// Checks every transition target, every override and the start node.
    ///
    /// Routers are declarative, so every id a computed transition can return is
    /// checked, not just a sample.
    pub fn validate(&self) -> Vec<GraphIssue> {
        let mut issues = Vec::new();

        if !self.contains(&self.start) {
            issues.push(GraphIssue::MissingStart(self.start.clone()));
        }

        for (from, target) in self.edges() {
            if target != TERMINAL && !self.contains(target) {
                issues.push(GraphIssue::DanglingTransition {
                    from: from.to_string(),
                    target: target.to_string(),
                });
            }
        }

        for rule in &self.overrides {
            if rule.all_of.is_empty() && rule.any_of.is_empty() {
                issues.push(GraphIssue::EmptyOverride {
                    name: rule.name.clone(),
                });
            }
            if !self.contains(&rule.target) {
                issues.push(GraphIssue::DanglingOverride {
                    name: rule.name.clone(),
                    target: rule.target.clone(),
                });
            }
        }

        issues
    }

    /// Nodes that can be reached neither from the start node nor through an override.
    pub fn unreachable_nodes(&self) -> Vec<&str> {
        let mut seen: AHashSet<&str> = AHashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();

        let roots = std::iter::once(self.start.as_str())
            .chain(self.overrides.iter().map(|rule| rule.target.as_str()));
        for root in roots {
            if self.contains(root) && seen.insert(root) {
                queue.push_back(root);
            }
        }

        while let Some(id) = queue.pop_front() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            let Some(transition) = &node.next_step else {
                continue;
            };
            for target in transition.targets() {
                if self.contains(target) && seen.insert(target) {
                    queue.push_back(target);
                }
            }
        }

        self.node_ids().filter(|id| !seen.contains(id)).collect()
    }
}

/// Collects nodes and overrides, then validates them into a [`DialogueGraph`].
pub struct GraphBuilder {
    nodes: Vec<ConversationNode>,
    start: String,
    overrides: Vec<IntentOverride>,
}

impl GraphBuilder {
    pub fn new(start: impl Into<String>) -> Self {
        Self {
            nodes: Vec::new(),
            start: start.into(),
            overrides: Vec::new(),
        }
    }

    pub fn start(mut self, start: impl Into<String>) -> Self {
        self.start = start.into();
        self
    }

    pub fn node(mut self, node: ConversationNode) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn nodes(mut self, nodes: impl IntoIterator<Item = ConversationNode>) -> Self {
        self.nodes.extend(nodes);
        self
    }

    pub fn with_override(mut self, rule: IntentOverride) -> Self {
        self.overrides.push(rule);
        self
    }

    /// Builds the graph and fails on duplicate ids or any validation issue.
    pub fn build(self) -> Result<DialogueGraph, GraphError> {
        let mut seen = AHashSet::new();
        for node in &self.nodes {
            if node.id == TERMINAL {
                return Err(GraphError::ReservedId(node.id.clone()));
            }
            if !seen.insert(node.id.as_str()) {
                return Err(GraphError::DuplicateNode(node.id.clone()));
            }
        }

        let graph = self.assemble();
        let issues = graph.validate();
        if !issues.is_empty() {
            return Err(GraphError::Invalid(issues));
        }

        info!(
            nodes = graph.len(),
            overrides = graph.overrides.len(),
            start = %graph.start,
            "dialogue graph built"
        );
        Ok(graph)
    }

    /// Builds the graph without validation. Dangling targets become silent dead ends
    /// at runtime and a repeated id replaces the earlier node.
    pub fn build_unchecked(self) -> DialogueGraph {
        let graph = self.assemble();
        let issues = graph.validate();
        if !issues.is_empty() {
            warn!(
                issues = issues.len(),
                "dialogue graph built without validation has dead ends"
            );
        }
        graph
    }

    fn assemble(self) -> DialogueGraph {
        let mut nodes = AHashMap::with_capacity(self.nodes.len());
        let mut order = Vec::with_capacity(self.nodes.len());
        for node in self.nodes {
            if node.id == TERMINAL {
                warn!("ignoring node with reserved id '{}'", TERMINAL);
                continue;
            }
            if !nodes.contains_key(&node.id) {
                order.push(node.id.clone());
            }
            nodes.insert(node.id.clone(), node);
        }
        DialogueGraph {
            nodes,
            order,
            start: self.start,
            overrides: self.overrides,
        }
    }
}
