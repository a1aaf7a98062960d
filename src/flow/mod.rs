//! The WarmeLeads sales chat.
//!
//! The conversation is split by purpose: the guided sales funnel, express ordering
//! for visitors who already know what they want, support questions, and contact
//! capture before checkout. All parts share one price table, passed in by the caller.

use crate::config::EngineConfig;
use crate::dialogue::{Action, Choice, DialogueGraph, GraphBuilder, IntentOverride, Matcher, Router};
use crate::error::GraphError;
use crate::pricing::{LeadKind, PricingTable, Quote};
use crate::profile::{ProfileField, UserProfile};
use std::sync::Arc;

mod contact;
mod express;
mod sales;
mod support;

/// Builds and validates the complete chat.
pub fn warmeleads_flow(pricing: Arc<PricingTable>) -> Result<DialogueGraph, GraphError> {
    builder(pricing).build()
}

/// Builds the chat with the prices, start node and validation mode of `config`.
pub fn from_config(config: &EngineConfig) -> Result<DialogueGraph, GraphError> {
    let pricing = Arc::new(config.pricing_table());
    let builder = builder(pricing).start(config.start_node.clone());
    if config.strict_validation {
        builder.build()
    } else {
        Ok(builder.build_unchecked())
    }
}

/// All nodes of the chat, not yet validated. Useful to extend the flow with
/// extra nodes before building.
pub fn builder(pricing: Arc<PricingTable>) -> GraphBuilder {
    DialogueGraph::builder()
        .nodes(sales::nodes(&pricing))
        .nodes(express::nodes(&pricing))
        .nodes(support::nodes(&pricing))
        .nodes(contact::nodes())
        .with_override(IntentOverride::lead_examples())
}

/// Choice id of the "my industry is not listed" button.
const OTHER_INDUSTRY: &str = "other";

/// One button per priced industry plus a way out for unlisted ones.
fn industry_choices(pricing: &PricingTable) -> Vec<Choice> {
    pricing
        .industry_names()
        .map(|name| Choice::new(slug(name), name))
        .chain(std::iter::once(Choice::new(OTHER_INDUSTRY, "Andere branche")))
        .collect()
}

fn lead_type_choices() -> [(&'static str, &'static str); 2] {
    [
        ("exclusive", LeadKind::EXCLUSIVE_LABEL),
        ("shared", LeadKind::SHARED_LABEL),
    ]
}

/// Sets `leadType` when the reply names one of the two products.
fn store_lead_type() -> Action {
    Action::custom(|reply, profile| {
        if let Some(kind) = LeadKind::from_label(reply.value()) {
            profile.set(ProfileField::LeadType, kind.label());
        }
    })
}

/// Arms for an "order now" button: ask for the lead type first when it is unknown.
fn order_arms(router: Router, choice_id: &str) -> Router {
    router
        .when(
            Matcher::All(vec![
                Matcher::Choice(choice_id.to_string()),
                Matcher::Not(Box::new(Matcher::FieldSet(ProfileField::LeadType))),
            ]),
            "lead_type_selection",
        )
        .on(choice_id, "quantity_selection")
}

/// Prices the order in the profile. Shared orders below the minimum are raised to it.
fn order_quote(pricing: &PricingTable, profile: &UserProfile) -> Option<Quote> {
    let industry = profile.industry.as_deref()?;
    let kind = lead_kind(profile);
    let mut quantity = profile.quantity_count()?;
    if kind == LeadKind::Shared {
        quantity = quantity.max(pricing.get(industry)?.shared.minimum);
    }
    pricing.quote(industry, kind, quantity)
}

/// Visitors who have not chosen are treated as exclusive buyers.
fn lead_kind(profile: &UserProfile) -> LeadKind {
    profile
        .lead_type
        .as_deref()
        .and_then(LeadKind::from_label)
        .unwrap_or(LeadKind::Exclusive)
}

fn industry_or_default(profile: &UserProfile) -> &str {
    profile.industry.as_deref().unwrap_or("jouw branche")
}

fn name_or_default(profile: &UserProfile) -> &str {
    profile.contact_info.name.as_deref().unwrap_or("daar")
}

fn slug(name: &str) -> String {
    name.chars()
        .filter_map(|c| match c {
            c if c.is_alphanumeric() => Some(c.to_ascii_lowercase()),
            ' ' | '-' => Some('_'),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug() {
        assert_eq!(slug("Airco's"), "aircos");
        assert_eq!(slug("Financial Lease"), "financial_lease");
    }

    #[test]
    fn test_order_quote_raises_shared_minimum() {
        let pricing = PricingTable::default();
        let mut profile = UserProfile::default();
        profile.set(ProfileField::Industry, "Thuisbatterijen");
        profile.set(ProfileField::LeadType, "Gedeelde leads");
        profile.set(ProfileField::Quantity, "100 leads");

        let quote = order_quote(&pricing, &profile).unwrap();
        assert_eq!(quote.quantity, 500);
        assert_eq!(quote.unit_price, 1250);
        assert_eq!(quote.total, 625_000);
    }

    #[test]
    fn test_industry_choices_end_with_other() {
        let choices = industry_choices(&PricingTable::default());
        assert_eq!(choices.first().map(|c| c.label.as_str()), Some("Thuisbatterijen"));
        assert_eq!(choices.last().map(|c| c.id.as_str()), Some(OTHER_INDUSTRY));
    }
}
