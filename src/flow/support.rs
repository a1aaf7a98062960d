use super::{industry_or_default, name_or_default};
use crate::dialogue::{Action, ConversationNode, Matcher, Router, TERMINAL};
use crate::pricing::{PricingTable, format_euro};
use crate::profile::{ProfileField, is_valid_phone};
use itertools::Itertools;
use std::sync::Arc;

pub(super) fn nodes(pricing: &Arc<PricingTable>) -> Vec<ConversationNode> {
    let overview = Arc::clone(pricing);
    let known = Arc::clone(pricing);

    vec![
        ConversationNode::new("questions", "Stel gerust je vraag! Waar kan ik je mee helpen?")
            .choices([
                ("how", "Hoe werkt WarmeLeads?"),
                ("price", "Wat kosten leads?"),
                ("example", "Hoe ziet een lead eruit?"),
                ("branch", "Mijn branche staat er niet tussen"),
                ("crm", "Kan ik leads in mijn CRM krijgen?"),
                ("demo", "Ik wil een demo"),
            ])
            .route(
                Router::new("human_handoff")
                    .on("how", "how_it_works")
                    .on("price", "pricing_question")
                    .on("example", "lead_examples")
                    .on("branch", "branch_details")
                    .on("crm", "crm_integration")
                    .on("demo", "demo_request")
                    .when(
                        Matcher::Any(vec![
                            Matcher::Contains("prijs".to_string()),
                            Matcher::Contains("kost".to_string()),
                        ]),
                        "pricing_question",
                    )
                    .when(Matcher::Contains("crm".to_string()), "crm_integration")
                    .when(Matcher::Contains("demo".to_string()), "demo_request")
                    .into(),
            ),
        ConversationNode::new(
            "human_handoff",
            "Goede vraag! Die beantwoordt een collega graag persoonlijk. Laat je gegevens achter, dan bellen we je binnen één werkdag terug.",
        )
        .choices([
            ("callback", "Ja, bel me terug"),
            ("order", "Liever direct bestellen"),
            ("back", "Andere vraag"),
        ])
        .route(
            Router::new("callback_name")
                .on("order", "express_welcome")
                .on("back", "questions")
                .into(),
        ),
        ConversationNode::new(
            "how_it_works",
            "In het kort:\n\n1️⃣ Je kiest je branche, het type leads en het aantal\n2️⃣ Je betaalt veilig online\n3️⃣ Wij starten campagnes in jouw regio\n4️⃣ Leads komen real-time binnen in je portal",
        )
        .choices([
            ("process", "Hoe verloopt een bestelling precies?"),
            ("order", "Direct bestellen"),
            ("back", "Andere vraag"),
        ])
        .route(
            Router::new("questions")
                .on("process", "order_process")
                .on("order", "express_welcome")
                .into(),
        )
        .delay(2000),
        ConversationNode::new(
            "order_process",
            "Na je bestelling krijg je direct een bevestiging per e-mail. Binnen 24 uur staan de campagnes live en zie je de eerste leads in je portal. Daar volg je elke lead in je pipeline: nieuw, gebeld, offerte, klant.",
        )
        .choices([("order", "Nu bestellen"), ("back", "Andere vraag")])
        .route(Router::new("questions").on("order", "express_welcome").into()),
        ConversationNode::new("pricing_question", "")
            .with_message(move |_| {
                let lines = overview
                    .industry_names()
                    .filter_map(|name| overview.get(name))
                    .map(|pricing| {
                        format!(
                            "• {}: exclusief vanaf {}, gedeeld {}",
                            pricing.name,
                            format_euro(u64::from(pricing.exclusive.tier_75)),
                            format_euro(u64::from(pricing.shared.price)),
                        )
                    })
                    .join("\n");
                format!("Onze prijzen per lead:\n\n{lines}\n\nAlle prijzen zijn exclusief btw.")
            })
            .choices([("order", "Bestellen"), ("back", "Andere vraag")])
            .route(
                Router::new("questions")
                    .when(
                        Matcher::All(vec![
                            Matcher::Choice("order".to_string()),
                            Matcher::FieldSet(ProfileField::Industry),
                        ]),
                        "express_lead_type",
                    )
                    .on("order", "express_welcome")
                    .into(),
            )
            .delay(2000),
        ConversationNode::new("lead_examples", "")
            .with_message(|profile| {
                let industry = industry_or_default(profile);
                format!(
                    "Zo ziet een {industry} lead eruit:\n\n👤 Naam: Mark de Vries\n📍 Postcode: 3821 AB, Amersfoort\n📞 Telefoon: 06-12345678 (geverifieerd)\n🏠 Woning: tussenwoning, koop\n💬 Interesse: {}\n⏰ Aangevraagd: 4 minuten geleden\n\nElke lead komt direct in je portal binnen.",
                    sample_interest(profile.industry.as_deref())
                )
            })
            .choices([
                ("order", "Ik wil bestellen"),
                ("continue", "Verder met het gesprek"),
                ("back", "Andere vraag"),
            ])
            .route(
                Router::new("questions")
                    .when(
                        Matcher::All(vec![
                            Matcher::Choice("order".to_string()),
                            Matcher::FieldSet(ProfileField::Industry),
                            Matcher::FieldSet(ProfileField::LeadType),
                        ]),
                        "quantity_selection",
                    )
                    .when(
                        Matcher::All(vec![
                            Matcher::Choice("order".to_string()),
                            Matcher::FieldSet(ProfileField::Industry),
                        ]),
                        "express_lead_type",
                    )
                    .on("order", "express_welcome")
                    .when(
                        Matcher::All(vec![
                            Matcher::Choice("continue".to_string()),
                            Matcher::FieldSet(ProfileField::Challenge),
                        ]),
                        "solution_intro",
                    )
                    .when(
                        Matcher::All(vec![
                            Matcher::Choice("continue".to_string()),
                            Matcher::FieldSet(ProfileField::Industry),
                        ]),
                        "current_leads",
                    )
                    .on("continue", "industry")
                    .into(),
            )
            .delay(2500),
        ConversationNode::new(
            "branch_details",
            "Welke branche zoek je? Typ hem hieronder, dan kijk ik of we daar leads voor kunnen leveren.",
        )
        .store(ProfileField::Industry)
        .route(
            Router::new("custom_branch")
                .when(
                    Matcher::predicate(move |reply, _| known.get(reply.value()).is_some()),
                    "current_leads",
                )
                .into(),
        ),
        ConversationNode::new("custom_branch", "")
            .with_message(|profile| {
                format!(
                    "Voor {} hebben we nog geen standaardprijzen, maar we draaien regelmatig campagnes op maat. Zal ik een specialist contact met je laten opnemen?",
                    industry_or_default(profile)
                )
            })
            .choices([
                ("yes", "Ja, graag"),
                ("other", "Toch een andere branche kiezen"),
                ("no", "Nee, bedankt"),
            ])
            .route(
                Router::new("callback_name")
                    .on("other", "industry")
                    .on("no", "goodbye")
                    .into(),
            ),
        ConversationNode::new(
            "crm_integration",
            "Zeker! Leads kun je automatisch doorsturen naar je CRM via een webhook of Zapier. Koppelingen met onder andere HubSpot, Pipedrive en Salesforce zetten we kosteloos voor je op. Exporteren naar Excel of Google Sheets kan ook.",
        )
        .choices([
            ("demo", "Demo aanvragen"),
            ("order", "Bestellen"),
            ("back", "Andere vraag"),
        ])
        .route(
            Router::new("questions")
                .on("demo", "demo_request")
                .on("order", "express_welcome")
                .into(),
        ),
        ConversationNode::new(
            "demo_request",
            "Leuk! In een demo van 15 minuten laten we het portal en een paar echte leads uit jouw branche zien. Zullen we een afspraak inplannen?",
        )
        .choices([
            ("plan", "Ja, plan een demo"),
            ("order", "Liever direct bestellen"),
            ("back", "Andere vraag"),
        ])
        .route(
            Router::new("questions")
                .on("plan", "callback_name")
                .on("order", "express_welcome")
                .into(),
        ),
        ConversationNode::new("callback_name", "Wat is je naam?")
            .store(ProfileField::ContactName)
            .goto("callback_phone"),
        callback_phone_node(
            "callback_phone",
            "Op welk telefoonnummer kunnen we je bereiken?",
        ),
        callback_phone_node(
            "callback_phone_retry",
            "Dat nummer lijkt niet te kloppen. Kun je het nog een keer invullen? Bijvoorbeeld 06 12345678.",
        ),
        ConversationNode::new("callback_confirmed", "")
            .with_message(|profile| {
                format!(
                    "Top, {}! We bellen je binnen één werkdag op {}. Tot snel! 📞",
                    name_or_default(profile),
                    profile.contact_info.phone.as_deref().unwrap_or("je nummer")
                )
            })
            .choices([("order", "Toch alvast bestellen"), ("done", "Bedankt!")])
            .route(Router::new(TERMINAL).on("order", "express_welcome").into()),
    ]
}

fn callback_phone_node(id: &str, question: &'static str) -> ConversationNode {
    ConversationNode::new(id, "")
        .with_message(move |profile| match profile.contact_info.name.as_deref() {
            Some(name) => format!("Bedankt {name}! {question}"),
            None => question.to_string(),
        })
        .action(Action::custom(|reply, profile| {
            if is_valid_phone(reply.raw) {
                profile.set(ProfileField::ContactPhone, reply.value());
            }
        }))
        .route(
            Router::new("callback_phone_retry")
                .when(
                    Matcher::predicate(|reply, _| is_valid_phone(reply.raw)),
                    "callback_confirmed",
                )
                .into(),
        )
}

fn sample_interest(industry: Option<&str>) -> &'static str {
    match industry.map(str::to_lowercase).as_deref() {
        Some("thuisbatterijen") => "thuisbatterij bij bestaande zonnepanelen",
        Some("zonnepanelen") => "12 zonnepanelen, offerte binnen 2 weken",
        Some("warmtepompen") => "hybride warmtepomp voor een jaren-30 woning",
        Some("airco's") => "airco voor 2 slaapkamers",
        Some("financial lease") => "lease van een bestelbus",
        _ => "offerte aangevraagd",
    }
}
