use super::{
    OTHER_INDUSTRY, industry_choices, industry_or_default, lead_kind, lead_type_choices, order_arms,
    order_quote, store_lead_type,
};
use crate::dialogue::{Action, Choice, ConversationNode, Matcher, Router};
use crate::pricing::{LeadKind, PricingTable, format_euro};
use crate::profile::{ProfileField, parse_count};
use itertools::Itertools;
use std::sync::Arc;

pub(super) fn nodes(pricing: &Arc<PricingTable>) -> Vec<ConversationNode> {
    let mut nodes = vec![
        ConversationNode::new(
            "welcome",
            "Hoi! 👋 Ik ben Lisa van WarmeLeads.\n\nWij leveren verse leads aan installateurs en adviseurs. Ben je op zoek naar meer klanten?",
        )
        .choices([
            ("yes", "Ja, absoluut!"),
            ("no", "Nee, niet echt"),
            ("order", "Direct leads bestellen"),
            ("question", "Ik heb eerst een vraag"),
        ])
        .route(
            Router::new("industry")
                .on("yes", "industry")
                .on("no", "reverse_psychology")
                .on("order", "express_welcome")
                .on("question", "questions")
                .into(),
        )
        .delay(1000),
        ConversationNode::new(
            "reverse_psychology",
            "Eerlijk, dat horen we vaker! 😄 Veel van onze klanten dachten eerst hetzelfde.\n\nMag ik vragen waarom niet?",
        )
        .choices([
            ("enough", "Ik heb al genoeg klanten"),
            ("bad", "Leads hebben bij mij nooit gewerkt"),
            ("curious", "Oké, vertel toch maar"),
        ])
        .route(
            Router::new("industry")
                .on("enough", "enough_customers")
                .on("bad", "bad_experience")
                .into(),
        ),
        ConversationNode::new(
            "enough_customers",
            "Mooi om te horen! 🎉 Dan draait je bedrijf goed.\n\nVeel ondernemers gebruiken leads juist om rustig door te groeien of een stille maand op te vangen. Zal ik laten zien hoe dat voor jouw branche werkt?",
        )
        .choices([("sure", "Laat maar zien"), ("no", "Nee, bedankt")])
        .route(Router::new("industry").on("no", "goodbye").into()),
        ConversationNode::new(
            "bad_experience",
            "Dat is vervelend, en helaas herkenbaar. Meestal komt het doordat dezelfde aanvraag aan vijf bedrijven wordt verkocht, of doordat leads al weken oud zijn.\n\nBij WarmeLeads is een exclusieve lead alleen van jou en komt hij real-time binnen.",
        )
        .choices([
            ("how", "Hoe zorgen jullie voor kwaliteit?"),
            ("example", "Laat een voorbeeld zien"),
            ("no", "Nee, bedankt"),
        ])
        .route(
            Router::new("quality_explanation")
                .on("example", "lead_examples")
                .on("no", "goodbye")
                .into(),
        ),
        ConversationNode::new(
            "quality_explanation",
            "Zo werken we:\n\n1️⃣ Eigen campagnes per branche, geen ingekochte lijsten\n2️⃣ Elke aanvraag wordt geverifieerd voordat je hem krijgt\n3️⃣ Levering binnen enkele minuten in je portal\n4️⃣ Ongeldige leads vervangen we gratis",
        )
        .choices([
            ("continue", "Klinkt goed, ga verder"),
            ("example", "Laat een voorbeeld zien"),
        ])
        .route(Router::new("industry").on("example", "lead_examples").into())
        .delay(2000),
        ConversationNode::new(
            "goodbye",
            "Helemaal goed! Mocht je later toch interesse hebben, dan vind je me hier altijd terug. Succes met je bedrijf! 👋",
        ),
    ];

    let p = Arc::clone(pricing);
    nodes.push(
        ConversationNode::new("industry", "Top! In welke branche ben je actief?")
            .computed_choices(move |_| industry_choices(&p))
            .store(ProfileField::Industry)
            .route(
                Router::new("current_leads")
                    .on(OTHER_INDUSTRY, "branch_details")
                    .into(),
            ),
    );

    nodes.push(
        ConversationNode::new("current_leads", "")
            .with_message(|profile| {
                format!(
                    "{} is een mooie markt! 👍 Hoeveel leads krijg je nu gemiddeld per maand?",
                    industry_or_default(profile)
                )
            })
            .choices([
                ("few", "0-10 leads"),
                ("some", "10-50 leads"),
                ("many", "50+ leads"),
                ("unknown", "Geen idee eigenlijk"),
            ])
            .store(ProfileField::CurrentLeads)
            .goto("challenges"),
    );

    nodes.push(
        ConversationNode::new("challenges", "")
            .with_message(|profile| {
                let opener = match profile.current_leads.as_deref() {
                    Some("50+ leads") => "Dat is al een flink volume!",
                    Some("0-10 leads") => "Daar is dus nog veel winst te halen.",
                    _ => "Duidelijk.",
                };
                format!("{opener} Wat is op dit moment je grootste uitdaging met leads?")
            })
            .choices([
                ("price", "Leads zijn te duur"),
                ("quality", "De kwaliteit is slecht"),
                ("volume", "Ik krijg te weinig leads"),
                ("resold", "Leads worden doorverkocht"),
            ])
            .store(ProfileField::Challenge)
            .goto("solution_intro"),
    );

    let p = Arc::clone(pricing);
    nodes.push(
        ConversationNode::new("solution_intro", "")
            .with_message(move |profile| {
                let answer = match profile.challenge.as_deref() {
                    Some("Leads zijn te duur") => {
                        let from = profile
                            .industry
                            .as_deref()
                            .and_then(|industry| p.get(industry))
                            .map(|pricing| format_euro(u64::from(pricing.shared.price)));
                        match from {
                            Some(price) => format!(
                                "Snap ik. Met gedeelde leads start je al vanaf {price} per lead, en bij exclusieve leads betaal je alleen voor klanten die echt van jou zijn."
                            ),
                            None => "Snap ik. We hebben opties voor elk budget.".to_string(),
                        }
                    }
                    Some("De kwaliteit is slecht") => {
                        "Daarom verifiëren we elke lead voordat hij bij jou binnenkomt.".to_string()
                    }
                    Some("Ik krijg te weinig leads") => {
                        "We draaien doorlopend campagnes, dus je kunt opschalen wanneer je wilt."
                            .to_string()
                    }
                    Some("Leads worden doorverkocht") => {
                        "Met exclusieve leads weet je zeker dat niemand anders dezelfde klant belt."
                            .to_string()
                    }
                    _ => "Daar kunnen we je zeker mee helpen.".to_string(),
                };
                format!("{answer}\n\nWe bieden twee soorten leads. Waar gaat je voorkeur naar?")
            })
            .choices([
                ("exclusive", LeadKind::EXCLUSIVE_LABEL),
                ("shared", LeadKind::SHARED_LABEL),
                ("both", "Vertel meer over beide"),
            ])
            .action(store_lead_type())
            .route(
                Router::new("pricing_presentation")
                    .on("both", "explain_both")
                    .into(),
            ),
    );

    nodes.push(
        ConversationNode::new(
            "explain_both",
            "🔒 Exclusieve leads: elke aanvraag gaat alleen naar jou. Hogere conversie, hogere prijs per lead.\n\n👥 Gedeelde leads: een aanvraag gaat naar maximaal 3 partijen. Lagere prijs, maar snel schakelen is belangrijk.\n\nWelke past het best bij jou?",
        )
        .choices(lead_type_choices())
        .action(store_lead_type())
        .goto("pricing_presentation")
        .delay(2500),
    );

    let p = Arc::clone(pricing);
    nodes.push(
        ConversationNode::new("pricing_presentation", "")
            .with_message(move |profile| {
                p.order_summary(
                    profile.industry.as_deref().unwrap_or_default(),
                    profile.lead_type.as_deref().unwrap_or_default(),
                )
            })
            .choices([
                ("order", "Bestellen"),
                ("more", "Ik wil eerst meer weten"),
                ("expensive", "Dat is te duur voor mij"),
            ])
            .route(
                order_arms(Router::new("quantity_selection"), "order")
                    .on("more", "more_details")
                    .on("expensive", "budget_objection")
                    .into(),
            )
            .delay(2000),
    );

    nodes.push(
        ConversationNode::new("more_details", "Natuurlijk! Waar wil je meer over weten?")
            .choices([
                ("delivery", "Hoe worden leads geleverd?"),
                ("guarantee", "Wat als een lead niet klopt?"),
                ("contract", "Zit ik ergens aan vast?"),
                ("order", "Terug naar bestellen"),
            ])
            .route(
                order_arms(Router::new("more_details"), "order")
                    .on("delivery", "delivery_info")
                    .on("guarantee", "guarantee_info")
                    .on("contract", "contract_info")
                    .into(),
            ),
    );

    for (id, text) in [
        (
            "delivery_info",
            "Leads komen real-time binnen in je persoonlijke portal en je krijgt direct een e-mail. In je pipeline zie je per lead de status: nieuw, gebeld, offerte of klant.",
        ),
        (
            "guarantee_info",
            "Klopt een telefoonnummer niet of is de aanvrager na 3 pogingen onbereikbaar? Meld het binnen 7 dagen in je portal, dan vervangen we de lead kosteloos.",
        ),
        (
            "contract_info",
            "Nee, je zit nergens aan vast. Je bestelt per batch en betaalt vooraf via iDEAL of creditcard. Geen abonnement, geen opzegtermijn.",
        ),
    ] {
        nodes.push(
            ConversationNode::new(id, text)
                .choices([("order", "Bestellen"), ("more", "Andere vraag")])
                .route(order_arms(Router::new("more_details"), "order").into()),
        );
    }

    nodes.push(
        ConversationNode::new(
            "budget_objection",
            "Dat begrijp ik. Wat is ongeveer je budget per maand voor nieuwe klanten?",
        )
        .choices([
            ("low", "Minder dan €500"),
            ("mid", "€500 - €1.500"),
            ("high", "Meer dan €1.500"),
        ])
        .store(ProfileField::Budget)
        .route(
            order_arms(order_arms(Router::new("quantity_selection"), "mid"), "high")
                .on("low", "shared_suggestion")
                .into(),
        ),
    );

    let p = Arc::clone(pricing);
    nodes.push(
        ConversationNode::new("shared_suggestion", "")
            .with_message(move |profile| {
                match profile.industry.as_deref().and_then(|industry| p.get(industry)) {
                    Some(pricing) => format!(
                        "Dan raad ik gedeelde {} leads aan: {} per lead, vanaf {} leads. Zo test je voordelig of leads voor jou werken.",
                        pricing.name,
                        format_euro(u64::from(pricing.shared.price)),
                        pricing.shared.minimum
                    ),
                    None => "Dan raad ik gedeelde leads aan. Zo test je voordelig of leads voor jou werken.".to_string(),
                }
            })
            .choices([("try", "Gedeelde leads proberen"), ("no", "Nee, bedankt")])
            .action(Action::custom(|reply, profile| {
                if reply.choice_id() == Some("try") {
                    profile.set(ProfileField::LeadType, LeadKind::Shared.label());
                }
            }))
            .route(Router::new("quantity_selection").on("no", "goodbye").into()),
    );

    nodes.push(
        ConversationNode::new("lead_type_selection", "Welke soort leads wil je bestellen?")
            .choices(lead_type_choices())
            .action(store_lead_type())
            .route(
                Router::new("lead_type_selection")
                    .when(
                        Matcher::FieldSet(ProfileField::LeadType),
                        "quantity_selection",
                    )
                    .into(),
            ),
    );

    nodes.push(quantity_node(
        pricing,
        "quantity_selection",
        "Hoeveel leads wil je ontvangen?",
    ));
    nodes.push(quantity_node(
        pricing,
        "quantity_retry",
        "Dat aantal begrijp ik niet helemaal. Kies een van de opties of typ een aantal, bijvoorbeeld 50.",
    ));

    let p = Arc::clone(pricing);
    nodes.push(
        ConversationNode::new("order_summary", "")
            .with_message(move |profile| {
                let mut lines = vec![
                    format!("• Branche: {}", industry_or_default(profile)),
                    format!("• Type: {}", lead_kind(profile).label()),
                ];
                match order_quote(&p, profile) {
                    Some(quote) => {
                        lines.push(format!("• Aantal: {} leads", quote.quantity));
                        lines.push(format!(
                            "• Prijs per lead: {}",
                            format_euro(u64::from(quote.unit_price))
                        ));
                        lines.push(format!("• Totaal: {} (excl. btw)", format_euro(quote.total)));
                    }
                    None => {
                        lines.push(format!(
                            "• Aantal: {}",
                            profile.quantity.as_deref().unwrap_or("onbekend")
                        ));
                        lines.push("• Prijs: op aanvraag".to_string());
                    }
                }
                format!("📝 Je bestelling:\n\n{}\n\nKlopt dit?", lines.iter().join("\n"))
            })
            .choices([
                ("confirm", "Ja, ga door naar betalen"),
                ("change", "Aantal aanpassen"),
                ("type", "Ander type leads"),
            ])
            .route(
                Router::new("contact_name")
                    .when(
                        Matcher::All(vec![
                            Matcher::Choice("confirm".to_string()),
                            Matcher::FieldSet(ProfileField::ContactEmail),
                            Matcher::FieldSet(ProfileField::ContactPhone),
                        ]),
                        "checkout_ready",
                    )
                    .on("change", "quantity_selection")
                    .on("type", "lead_type_selection")
                    .into(),
            )
            .delay(2000),
    );

    nodes
}

/// Quantity question whose buttons follow the chosen product: volume tiers for
/// exclusive leads, multiples of the minimum for shared leads.
fn quantity_node(pricing: &Arc<PricingTable>, id: &str, intro: &'static str) -> ConversationNode {
    let for_message = Arc::clone(pricing);
    let for_options = Arc::clone(pricing);
    ConversationNode::new(id, "")
        .with_message(move |profile| match lead_kind(profile) {
            LeadKind::Exclusive => format!(
                "{intro} Bij exclusieve leads geldt: hoe meer je bestelt, hoe lager de prijs per lead."
            ),
            LeadKind::Shared => {
                let minimum = profile
                    .industry
                    .as_deref()
                    .and_then(|industry| for_message.get(industry))
                    .map(|pricing| pricing.shared.minimum);
                match minimum {
                    Some(minimum) => {
                        format!("{intro} Voor gedeelde leads is de minimale afname {minimum} leads.")
                    }
                    None => intro.to_string(),
                }
            }
        })
        .computed_choices(move |profile| {
            let quantities = match lead_kind(profile) {
                LeadKind::Exclusive => vec![30, 50, 75],
                LeadKind::Shared => {
                    let minimum = profile
                        .industry
                        .as_deref()
                        .and_then(|industry| for_options.get(industry))
                        .map_or(250, |pricing| pricing.shared.minimum);
                    vec![minimum, minimum.saturating_mul(2), minimum.saturating_mul(4)]
                }
            };
            quantities
                .into_iter()
                .map(|q| Choice::new(q.to_string(), format!("{q} leads")))
                .collect()
        })
        .action(Action::custom(|reply, profile| {
            if parse_count(reply.value()).is_some() {
                profile.set(ProfileField::Quantity, reply.value());
            }
        }))
        .route(
            Router::new("quantity_retry")
                .when(
                    Matcher::predicate(|reply, _| parse_count(reply.value()).is_some()),
                    "order_summary",
                )
                .into(),
        )
}
