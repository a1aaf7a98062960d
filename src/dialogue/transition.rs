use super::node::Reply;
use crate::profile::{ProfileField, UserProfile};
use std::fmt;
use std::sync::Arc;

/// The rule that picks the node following the current one.
#[derive(Debug, Clone)]
pub enum Transition {
    Literal(String),
    Computed(Router),
}

impl Transition {
    /// Resolves the next node id for a reply, together with how it was chosen.
    pub fn resolve<'t>(&'t self, reply: &Reply<'_>, profile: &UserProfile) -> (&'t str, Route) {
        match self {
            Transition::Literal(target) => (target.as_str(), Route::Literal),
            Transition::Computed(router) => router.route(reply, profile),
        }
    }

    /// Every node id this transition can produce.
    pub fn targets(&self) -> Vec<&str> {
        match self {
            Transition::Literal(target) => vec![target.as_str()],
            Transition::Computed(router) => router.targets().collect(),
        }
    }
}

/// How a transition was taken; reported back to the host for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// A global intent override fired.
    Override,
    /// The node's fixed `next_step` was used.
    Literal,
    /// The router arm with this index matched.
    Matched(usize),
    /// No arm matched and the router fell back to its default.
    Fallback,
    /// No `next_step` was defined.
    Terminal,
    /// The node was resolved directly, without a transition.
    Start,
}

/// A response-dependent transition: ordered arms tried top to bottom, then a fallback.
///
/// Arms are data rather than an opaque closure so every possible target is known
/// up front and the graph can be validated exhaustively.
#[derive(Debug, Clone)]
pub struct Router {
    arms: Vec<Arm>,
    otherwise: String,
}

#[derive(Debug, Clone)]
pub struct Arm {
    pub matcher: Matcher,
    pub target: String,
}

impl Router {
    pub fn new(otherwise: impl Into<String>) -> Self {
        Self {
            arms: Vec::new(),
            otherwise: otherwise.into(),
        }
    }

    pub fn when(mut self, matcher: Matcher, target: impl Into<String>) -> Self {
        self.arms.push(Arm {
            matcher,
            target: target.into(),
        });
        self
    }

    /// Shorthand for an arm matching a choice id.
    pub fn on(self, choice_id: &str, target: impl Into<String>) -> Self {
        self.when(Matcher::Choice(choice_id.to_string()), target)
    }

    pub fn arms(&self) -> &[Arm] {
        &self.arms
    }

    pub fn otherwise(&self) -> &str {
        &self.otherwise
    }

    pub fn route(&self, reply: &Reply<'_>, profile: &UserProfile) -> (&str, Route) {
        self.arms
            .iter()
            .enumerate()
            .find(|(_, arm)| arm.matcher.matches(reply, profile))
            .map(|(i, arm)| (arm.target.as_str(), Route::Matched(i)))
            .unwrap_or((self.otherwise.as_str(), Route::Fallback))
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.arms
            .iter()
            .map(|arm| arm.target.as_str())
            .chain(std::iter::once(self.otherwise.as_str()))
    }
}

impl From<Router> for Transition {
    fn from(router: Router) -> Self {
        Transition::Computed(router)
    }
}

/// A condition on the reply and the profile.
#[derive(Clone)]
pub enum Matcher {
    /// The reply selected the offered choice with this id.
    Choice(String),
    /// The trimmed reply equals this text exactly.
    Equals(String),
    /// The lower-cased reply contains this (lower-cased) fragment.
    Contains(String),
    /// A profile field currently holds this value, compared case-insensitively.
    FieldEquals(ProfileField, String),
    /// A profile field has been answered.
    FieldSet(ProfileField),
    /// Every inner matcher holds.
    All(Vec<Matcher>),
    /// At least one inner matcher holds.
    Any(Vec<Matcher>),
    Not(Box<Matcher>),
    Predicate(Arc<dyn Fn(&Reply<'_>, &UserProfile) -> bool + Send + Sync>),
}

impl Matcher {
    pub fn predicate(f: impl Fn(&Reply<'_>, &UserProfile) -> bool + Send + Sync + 'static) -> Self {
        Matcher::Predicate(Arc::new(f))
    }

    pub fn matches(&self, reply: &Reply<'_>, profile: &UserProfile) -> bool {
        match self {
            Matcher::Choice(id) => reply.choice_id() == Some(id.as_str()),
            Matcher::Equals(text) => reply.raw.trim() == text,
            Matcher::Contains(fragment) => reply
                .raw
                .to_lowercase()
                .contains(&fragment.to_lowercase()),
            Matcher::FieldEquals(field, value) => profile
                .get(*field)
                .is_some_and(|v| v.eq_ignore_ascii_case(value)),
            Matcher::FieldSet(field) => profile.get(*field).is_some(),
            Matcher::All(inner) => inner.iter().all(|m| m.matches(reply, profile)),
            Matcher::Any(inner) => inner.iter().any(|m| m.matches(reply, profile)),
            Matcher::Not(inner) => !inner.matches(reply, profile),
            Matcher::Predicate(f) => f(reply, profile),
        }
    }
}

impl fmt::Debug for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::Choice(id) => write!(f, "choice == {:?}", id),
            Matcher::Equals(text) => write!(f, "reply == {:?}", text),
            Matcher::Contains(fragment) => write!(f, "reply ~ {:?}", fragment),
            Matcher::FieldEquals(field, value) => write!(f, "{} == {:?}", field, value),
            Matcher::FieldSet(field) => write!(f, "{} is set", field),
            Matcher::All(inner) => {
                write!(f, "all")?;
                f.debug_list().entries(inner).finish()
            }
            Matcher::Any(inner) => {
                write!(f, "any")?;
                f.debug_list().entries(inner).finish()
            }
            Matcher::Not(inner) => write!(f, "not {:?}", inner),
            Matcher::Predicate(_) => f.write_str("predicate(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialogue::node::Choice;

    #[test]
    fn test_router_tries_arms_in_order() {
        let options = vec![Choice::new("yes", "Ja"), Choice::new("no", "Nee")];
        let router = Router::new("fallback")
            .when(Matcher::Contains("ja".to_string()), "contains_ja")
            .on("yes", "chose_yes");
        let profile = UserProfile::default();

        let reply = Reply::recognize("Ja", &options);
        assert_eq!(router.route(&reply, &profile), ("contains_ja", Route::Matched(0)));

        let reply = Reply::recognize("weet ik niet", &options);
        assert_eq!(router.route(&reply, &profile), ("fallback", Route::Fallback));
    }

    #[test]
    fn test_field_matchers_read_profile() {
        let mut profile = UserProfile::default();
        let reply = Reply::free("");
        let set = Matcher::FieldSet(ProfileField::Industry);
        let not_set = Matcher::Not(Box::new(set.clone()));
        assert!(!set.matches(&reply, &profile));
        assert!(not_set.matches(&reply, &profile));

        profile.set(ProfileField::Industry, "Zonnepanelen");
        assert!(set.matches(&reply, &profile));
        assert!(
            Matcher::FieldEquals(ProfileField::Industry, "zonnepanelen".to_string())
                .matches(&reply, &profile)
        );
    }

    #[test]
    fn test_targets_include_fallback() {
        let router = Router::new("c").on("x", "a").on("y", "b");
        let targets: Vec<_> = router.targets().collect();
        assert_eq!(targets, vec!["a", "b", "c"]);
    }
}
