//! Conversations described as data.
//!
//! A [`ScriptDefinition`] is a serializable counterpart of a [`DialogueGraph`]:
//! messages are templates instead of closures and transitions are condition lists.
//! Scripts load from JSON, can be stored as bincode artifacts, and compile into a
//! validated graph that the same engine drives.

mod artifact;
pub mod conversion;
pub mod definition;
pub mod template;

pub use conversion::IntoScript;
pub use definition::*;
pub use template::Template;

use crate::dialogue::{
    Action, ConversationNode, DialogueGraph, GraphBuilder, Matcher, Resolvable, Router, Transition,
};
use crate::error::ScriptError;
use crate::profile::ProfileField;
use tracing::debug;

impl ScriptDefinition {
    /// Compiles the script into a validated graph.
    pub fn compile(&self) -> Result<DialogueGraph, ScriptError> {
        let mut builder = GraphBuilder::new(self.start.clone());
        for node in &self.nodes {
            builder = builder.node(compile_node(node)?);
        }
        for rule in &self.overrides {
            builder = builder.with_override(rule.clone());
        }
        let graph = builder.build()?;
        debug!(nodes = graph.len(), "script compiled");
        Ok(graph)
    }
}

/// Converts any supported format and compiles it in one step.
pub fn compile(source: impl IntoScript) -> Result<DialogueGraph, ScriptError> {
    source.into_script()?.compile()
}

fn compile_node(node: &ScriptNode) -> Result<ConversationNode, ScriptError> {
    let template = Template::parse(&node.message).map_err(|message| ScriptError::InvalidTemplate {
        node_id: node.id.clone(),
        message,
    })?;
    let message = if template.is_static() {
        Resolvable::Literal(template.render(&Default::default()))
    } else {
        Resolvable::computed(move |profile| template.render(profile))
    };

    let action = node
        .store
        .as_deref()
        .map(|name| parse_field(&node.id, name).map(Action::Store))
        .transpose()?;

    let next_step = node
        .next
        .as_ref()
        .map(|next| compile_transition(&node.id, next))
        .transpose()?;

    Ok(ConversationNode {
        id: node.id.clone(),
        message,
        options: node.options.clone().map(Resolvable::Literal),
        next_step,
        action,
        delay: node.delay,
    })
}

fn compile_transition(node_id: &str, next: &ScriptTransition) -> Result<Transition, ScriptError> {
    match next {
        ScriptTransition::Goto(target) => Ok(Transition::Literal(target.clone())),
        ScriptTransition::Routes { arms, otherwise } => {
            let mut router = Router::new(otherwise.clone());
            for arm in arms {
                router = router.when(compile_condition(node_id, &arm.when)?, arm.goto.clone());
            }
            Ok(router.into())
        }
    }
}

fn compile_condition(node_id: &str, condition: &ScriptCondition) -> Result<Matcher, ScriptError> {
    let compile_all = |conditions: &[ScriptCondition]| {
        conditions
            .iter()
            .map(|c| compile_condition(node_id, c))
            .collect::<Result<Vec<_>, _>>()
    };
    Ok(match condition {
        ScriptCondition::Choice(id) => Matcher::Choice(id.clone()),
        ScriptCondition::Equals(text) => Matcher::Equals(text.clone()),
        ScriptCondition::Contains(text) => Matcher::Contains(text.clone()),
        ScriptCondition::FieldEquals { field, value } => {
            Matcher::FieldEquals(parse_field(node_id, field)?, value.clone())
        }
        ScriptCondition::FieldSet(field) => Matcher::FieldSet(parse_field(node_id, field)?),
        ScriptCondition::All(inner) => Matcher::All(compile_all(inner)?),
        ScriptCondition::Any(inner) => Matcher::Any(compile_all(inner)?),
        ScriptCondition::Not(inner) => Matcher::Not(Box::new(compile_condition(node_id, inner)?)),
    })
}

fn parse_field(node_id: &str, name: &str) -> Result<ProfileField, ScriptError> {
    name.parse().map_err(|field| ScriptError::UnknownField {
        node_id: node_id.to_string(),
        field,
    })
}
