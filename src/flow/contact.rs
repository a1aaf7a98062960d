use super::{industry_or_default, lead_kind, name_or_default};
use crate::dialogue::{Action, ConversationNode, Matcher, Router, TERMINAL};
use crate::profile::{ProfileField, is_valid_email, is_valid_phone};

/// Contact capture before checkout, one field per question. E-mail and phone are
/// only stored once they pass validation; invalid input loops through a retry node.
pub(super) fn nodes() -> Vec<ConversationNode> {
    vec![
        ConversationNode::new("contact_name", "Bijna klaar! 🎉 Wat is je naam?")
            .store(ProfileField::ContactName)
            .goto("contact_company"),
        ConversationNode::new("contact_company", "")
            .with_message(|profile| {
                format!(
                    "Leuk je te spreken, {}! Wat is de naam van je bedrijf?",
                    name_or_default(profile)
                )
            })
            .store(ProfileField::ContactCompany)
            .goto("contact_email"),
        validated_node(
            "contact_email",
            "Op welk e-mailadres wil je de bevestiging en je inloggegevens voor het portal ontvangen?",
            ProfileField::ContactEmail,
            is_valid_email,
            "contact_phone",
        ),
        validated_node(
            "contact_email_retry",
            "Hmm, dat e-mailadres lijkt niet te kloppen. Kun je het nog eens controleren?",
            ProfileField::ContactEmail,
            is_valid_email,
            "contact_phone",
        ),
        validated_node(
            "contact_phone",
            "En op welk telefoonnummer ben je bereikbaar? Dan kunnen we je bellen als er iets met je bestelling is.",
            ProfileField::ContactPhone,
            is_valid_phone,
            "checkout_ready",
        ),
        validated_node(
            "contact_phone_retry",
            "Dat telefoonnummer lijkt niet te kloppen. Probeer het nog eens, bijvoorbeeld 06 12345678.",
            ProfileField::ContactPhone,
            is_valid_phone,
            "checkout_ready",
        ),
        ConversationNode::new("checkout_ready", "")
            .with_message(|profile| {
                let amount = profile
                    .quantity_count()
                    .map_or_else(|| "je".to_string(), |n| n.to_string());
                format!(
                    "Dankjewel {}! ✅\n\nJe bestelling van {} {} voor {} staat klaar. Klik hieronder om veilig te betalen via iDEAL of creditcard.",
                    name_or_default(profile),
                    amount,
                    lead_kind(profile).label().to_lowercase(),
                    industry_or_default(profile),
                )
            })
            .choices([("pay", "Naar betalen"), ("question", "Ik heb nog een vraag")])
            .route(Router::new(TERMINAL).on("question", "questions").into()),
    ]
}

/// A free-text question that stores the answer only when `is_valid` accepts it and
/// otherwise moves to `<field question>_retry`.
fn validated_node(
    id: &str,
    question: &str,
    field: ProfileField,
    is_valid: fn(&str) -> bool,
    next: &str,
) -> ConversationNode {
    let retry = match id.strip_suffix("_retry") {
        Some(_) => id.to_string(),
        None => format!("{id}_retry"),
    };
    ConversationNode::new(id, question)
        .action(Action::custom(move |reply, profile| {
            if is_valid(reply.raw) {
                profile.set(field, reply.value());
            }
        }))
        .route(
            Router::new(retry)
                .when(Matcher::predicate(move |reply, _| is_valid(reply.raw)), next)
                .into(),
        )
}
