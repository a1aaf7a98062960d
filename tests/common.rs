//! Common test utilities for building engines, graphs and scripts.
use std::sync::Arc;
use warmeleads::prelude::*;

/// The built-in chat with the default price table.
#[allow(dead_code)]
pub fn default_engine() -> DialogueEngine {
    let pricing = Arc::new(PricingTable::default());
    DialogueEngine::new(warmeleads_flow(pricing).expect("built-in flow is valid"))
}

/// A three-node graph for engine mechanics.
///
/// `ask` offers two buttons and stores the label in `industry`; `yes` goes to
/// `thanks`, anything else to `sorry`, both of which end the chat.
#[allow(dead_code)]
pub fn small_graph() -> DialogueGraph {
    DialogueGraph::builder()
        .start("ask")
        .node(
            ConversationNode::new("ask", "Wil je leads?")
                .choices([("yes", "Ja"), ("no", "Nee")])
                .store(ProfileField::Industry)
                .route(Router::new("sorry").on("yes", "thanks").into()),
        )
        .node(
            ConversationNode::new("thanks", "")
                .with_message(|profile| {
                    format!("Top, {}!", profile.industry.as_deref().unwrap_or("?"))
                }),
        )
        .node(ConversationNode::new("sorry", "Jammer.").delay(200))
        .build()
        .expect("small graph is valid")
}

/// Runs a sequence of replies and returns the id of every node shown, start included.
#[allow(dead_code)]
pub fn walk(engine: &DialogueEngine, replies: &[&str], profile: &mut UserProfile) -> Vec<String> {
    let mut visited = Vec::new();
    let mut current = engine.start(profile).expect("start node exists");
    visited.push(current.id.clone());
    for reply in replies {
        match engine.advance(&current.id, reply, profile) {
            Some(next) => {
                visited.push(next.id.clone());
                current = next;
            }
            None => break,
        }
    }
    visited
}

/// A small script exercising templates, stores, routes and an override.
#[allow(dead_code)]
pub const SAMPLE_SCRIPT_JSON: &str = r#"{
    "start": "hello",
    "nodes": [
        {
            "id": "hello",
            "message": "Hallo! Welke branche?",
            "options": [
                { "id": "solar", "label": "Zonnepanelen" },
                { "id": "other", "label": "Iets anders" }
            ],
            "store": "industry",
            "next": {
                "routes": {
                    "arms": [ { "when": { "choice": "solar" }, "goto": "kind" } ],
                    "otherwise": "custom"
                }
            },
            "delay": 500
        },
        {
            "id": "kind",
            "message": "Leads voor {industry}. Exclusief of gedeeld?",
            "options": [
                { "id": "exclusive", "label": "Exclusieve leads" },
                { "id": "shared", "label": "Gedeelde leads" }
            ],
            "store": "leadType",
            "next": { "goto": "done" }
        },
        {
            "id": "custom",
            "message": "Voor {industry|jouw branche} maken we iets op maat.",
            "next": { "goto": "end" }
        },
        {
            "id": "done",
            "message": "Bedankt! Je koos {leadType}."
        },
        {
            "id": "help",
            "message": "Een medewerker helpt je verder."
        }
    ],
    "overrides": [
        { "name": "human", "all_of": ["medewerker"], "target": "help" }
    ]
}"#;

/// The sample script parsed.
#[allow(dead_code)]
pub fn sample_script() -> ScriptDefinition {
    ScriptDefinition::from_json(SAMPLE_SCRIPT_JSON).expect("sample script parses")
}

/// A profile that is complete enough for checkout.
#[allow(dead_code)]
pub fn complete_profile() -> UserProfile {
    let mut profile = UserProfile::default();
    profile.set(ProfileField::Industry, "Zonnepanelen");
    profile.set(ProfileField::LeadType, "Exclusieve leads");
    profile.set(ProfileField::Quantity, "50 leads");
    profile.set(ProfileField::ContactName, "Sanne");
    profile.set(ProfileField::ContactEmail, "sanne@example.nl");
    profile.set(ProfileField::ContactPhone, "06 12345678");
    profile
}
