use super::transition::Transition;
use crate::profile::{ProfileField, UserProfile};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifier reserved for the end of a conversation. It is never a real node.
pub const TERMINAL: &str = "end";

/// A value that is either fixed or computed from the profile gathered so far.
pub enum Resolvable<T> {
    Literal(T),
    Computed(Arc<dyn Fn(&UserProfile) -> T + Send + Sync>),
}

impl<T: Clone> Resolvable<T> {
    pub fn computed(f: impl Fn(&UserProfile) -> T + Send + Sync + 'static) -> Self {
        Resolvable::Computed(Arc::new(f))
    }

    /// Produces the concrete value for display. Computed values never see a mutable
    /// profile, so resolving twice yields the same result.
    pub fn resolve(&self, profile: &UserProfile) -> T {
        match self {
            Resolvable::Literal(value) => value.clone(),
            Resolvable::Computed(f) => f(profile),
        }
    }
}

impl<T: Clone> Clone for Resolvable<T> {
    fn clone(&self) -> Self {
        match self {
            Resolvable::Literal(value) => Resolvable::Literal(value.clone()),
            Resolvable::Computed(f) => Resolvable::Computed(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Resolvable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolvable::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Resolvable::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<&str> for Resolvable<String> {
    fn from(value: &str) -> Self {
        Resolvable::Literal(value.to_string())
    }
}

impl From<String> for Resolvable<String> {
    fn from(value: String) -> Self {
        Resolvable::Literal(value)
    }
}

impl From<Vec<Choice>> for Resolvable<Vec<Choice>> {
    fn from(value: Vec<Choice>) -> Self {
        Resolvable::Literal(value)
    }
}

/// A reply button: a stable id used for routing and a display label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub label: String,
}

impl Choice {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// Whether a raw reply selects this choice, by id or by label.
    pub fn matches(&self, reply: &str) -> bool {
        let reply = reply.trim();
        reply == self.id || reply == self.label
    }
}

/// Side effect run on the profile when the node owning it receives a reply.
#[derive(Clone)]
pub enum Action {
    /// Stores the selected choice label, or the trimmed free text, in a profile field.
    Store(ProfileField),
    /// Stores a fixed value regardless of the reply.
    Assign(ProfileField, String),
    Custom(Arc<dyn Fn(&Reply<'_>, &mut UserProfile) + Send + Sync>),
}

impl Action {
    pub fn custom(f: impl Fn(&Reply<'_>, &mut UserProfile) + Send + Sync + 'static) -> Self {
        Action::Custom(Arc::new(f))
    }

    pub fn apply(&self, reply: &Reply<'_>, profile: &mut UserProfile) {
        match self {
            Action::Store(field) => profile.set(*field, reply.value()),
            Action::Assign(field, value) => profile.set(*field, value.as_str()),
            Action::Custom(f) => f(reply, profile),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Store(field) => f.debug_tuple("Store").field(field).finish(),
            Action::Assign(field, value) => {
                f.debug_tuple("Assign").field(field).field(value).finish()
            }
            Action::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// A user reply as seen by actions and routers.
#[derive(Debug, Clone, Copy)]
pub struct Reply<'a> {
    /// The text exactly as the host received it.
    pub raw: &'a str,
    /// The offered choice the reply selected, if any.
    pub choice: Option<&'a Choice>,
}

impl<'a> Reply<'a> {
    /// Recognizes `raw` against the options the current node offered.
    pub fn recognize(raw: &'a str, options: &'a [Choice]) -> Self {
        Reply {
            raw,
            choice: options.iter().find(|c| c.matches(raw)),
        }
    }

    pub fn free(raw: &'a str) -> Self {
        Reply { raw, choice: None }
    }

    /// The value stored by [`Action::Store`]: the choice label, else the trimmed text.
    pub fn value(&self) -> &'a str {
        match self.choice {
            Some(choice) => choice.label.as_str(),
            None => self.raw.trim(),
        }
    }

    pub fn choice_id(&self) -> Option<&'a str> {
        self.choice.map(|c| c.id.as_str())
    }
}

/// A single addressable step of the scripted conversation.
#[derive(Debug, Clone)]
pub struct ConversationNode {
    pub id: String,
    pub message: Resolvable<String>,
    /// `None` means the node expects free text.
    pub options: Option<Resolvable<Vec<Choice>>>,
    /// `None` ends the conversation after this node.
    pub next_step: Option<Transition>,
    pub action: Option<Action>,
    /// Milliseconds the host waits before showing the following message.
    pub delay: Option<u64>,
}

impl ConversationNode {
    pub fn new(id: impl Into<String>, message: impl Into<Resolvable<String>>) -> Self {
        Self {
            id: id.into(),
            message: message.into(),
            options: None,
            next_step: None,
            action: None,
            delay: None,
        }
    }

    pub fn with_message(
        mut self,
        f: impl Fn(&UserProfile) -> String + Send + Sync + 'static,
    ) -> Self {
        self.message = Resolvable::computed(f);
        self
    }

    /// Offers fixed `(id, label)` reply buttons.
    pub fn choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        let choices = choices
            .into_iter()
            .map(|(id, label)| Choice::new(id, label))
            .collect::<Vec<_>>();
        self.options = Some(Resolvable::Literal(choices));
        self
    }

    pub fn computed_choices(
        mut self,
        f: impl Fn(&UserProfile) -> Vec<Choice> + Send + Sync + 'static,
    ) -> Self {
        self.options = Some(Resolvable::computed(f));
        self
    }

    pub fn goto(mut self, target: impl Into<String>) -> Self {
        self.next_step = Some(Transition::Literal(target.into()));
        self
    }

    pub fn route(mut self, transition: Transition) -> Self {
        self.next_step = Some(transition);
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    pub fn store(self, field: ProfileField) -> Self {
        self.action(Action::Store(field))
    }

    pub fn delay(mut self, millis: u64) -> Self {
        self.delay = Some(millis);
        self
    }

    pub fn resolve_message(&self, profile: &UserProfile) -> String {
        self.message.resolve(profile)
    }

    pub fn resolve_options(&self, profile: &UserProfile) -> Vec<Choice> {
        self.options
            .as_ref()
            .map(|options| options.resolve(profile))
            .unwrap_or_default()
    }

    pub fn expects_free_text(&self) -> bool {
        self.options.is_none()
    }
}
