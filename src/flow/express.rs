use super::{
    OTHER_INDUSTRY, industry_choices, industry_or_default, lead_type_choices, store_lead_type,
};
use crate::dialogue::{ConversationNode, Router};
use crate::pricing::{PricingTable, format_euro};
use crate::profile::ProfileField;
use std::sync::Arc;

pub(super) fn nodes(pricing: &Arc<PricingTable>) -> Vec<ConversationNode> {
    let choices = Arc::clone(pricing);
    let prices = Arc::clone(pricing);
    vec![
        ConversationNode::new(
            "express_welcome",
            "⚡ Snel bestellen, helemaal goed! Voor welke branche wil je leads?",
        )
        .computed_choices(move |_| industry_choices(&choices))
        .store(ProfileField::Industry)
        .route(
            Router::new("express_lead_type")
                .on(OTHER_INDUSTRY, "branch_details")
                .into(),
        )
        .delay(800),
        ConversationNode::new("express_lead_type", "")
            .with_message(move |profile| {
                let industry = industry_or_default(profile);
                match prices.get(industry) {
                    Some(pricing) => format!(
                        "Exclusieve {} leads heb je vanaf {} per lead, gedeelde leads voor {} per lead. Wat wordt het?",
                        pricing.name,
                        format_euro(u64::from(pricing.exclusive.tier_75)),
                        format_euro(u64::from(pricing.shared.price)),
                    ),
                    None => format!("Welke soort {industry} leads wil je bestellen?"),
                }
            })
            .choices(lead_type_choices())
            .action(store_lead_type())
            .goto("quantity_selection")
            .delay(800),
    ]
}
