//! Engine mechanics: advancing, overrides, profile updates and dead ends.
mod common;
use common::*;
use warmeleads::prelude::*;

#[cfg(test)]
mod engine_tests {
    use super::*;

    #[test]
    fn test_welcome_yes_goes_to_industry() {
        let engine = default_engine();
        let mut profile = UserProfile::default();

        let next = engine
            .advance("welcome", "Ja, absoluut!", &mut profile)
            .expect("welcome has a follow-up");

        assert_eq!(next.id, "industry");
        assert_eq!(next.route, Route::Matched(0));
        assert!(next.labels().contains(&"Thuisbatterijen"));
        assert_eq!(next.labels().last(), Some(&"Andere branche"));
    }

    #[test]
    fn test_welcome_no_goes_to_reverse_psychology() {
        let engine = default_engine();
        let mut profile = UserProfile::default();

        let next = engine
            .advance("welcome", "Nee, niet echt", &mut profile)
            .unwrap();

        assert_eq!(next.id, "reverse_psychology");
        assert_eq!(profile, UserProfile::default());
    }

    #[test]
    fn test_choice_id_is_accepted_like_its_label() {
        let engine = default_engine();
        let mut by_id = UserProfile::default();
        let mut by_label = UserProfile::default();

        let a = engine.advance("challenges", "quality", &mut by_id).unwrap();
        let b = engine
            .advance("challenges", "De kwaliteit is slecht", &mut by_label)
            .unwrap();

        assert_eq!(a.id, b.id);
        assert_eq!(by_id.challenge.as_deref(), Some("De kwaliteit is slecht"));
        assert_eq!(by_id, by_label);
    }

    #[test]
    fn test_unrecognized_reply_takes_fallback() {
        let engine = default_engine();
        let mut profile = UserProfile::default();

        let next = engine
            .advance("welcome", "Misschien, ik twijfel", &mut profile)
            .unwrap();

        assert_eq!(next.id, "industry");
        assert_eq!(next.route, Route::Fallback);
    }

    #[test]
    fn test_both_goes_to_explain_both() {
        let engine = default_engine();
        let mut profile = UserProfile::default();

        let next = engine
            .advance("solution_intro", "Vertel meer over beide", &mut profile)
            .unwrap();

        assert_eq!(next.id, "explain_both");
        assert!(profile.lead_type.is_none());
    }

    #[test]
    fn test_exclusive_choice_sets_lead_type_and_shows_prices() {
        let engine = default_engine();
        let mut profile = UserProfile::default();
        profile.set(ProfileField::Industry, "Zonnepanelen");

        let next = engine
            .advance("solution_intro", "Exclusieve leads", &mut profile)
            .unwrap();

        assert_eq!(next.id, "pricing_presentation");
        assert_eq!(profile.lead_type.as_deref(), Some("Exclusieve leads"));
        assert!(next.message.contains("exclusieve Zonnepanelen leads"));
        assert!(next.message.contains("€40,00"));
        assert!(!next.message.contains("gedeelde"));
    }

    #[test]
    fn test_message_resolution_is_idempotent() {
        let engine = default_engine();
        let mut profile = UserProfile::default();
        profile.set(ProfileField::Industry, "Warmtepompen");
        profile.set(ProfileField::LeadType, "Gedeelde leads");
        let snapshot = profile.clone();

        for id in engine.graph().node_ids() {
            let first = engine.resolve(id, &profile).unwrap();
            let second = engine.resolve(id, &profile).unwrap();
            assert_eq!(first, second, "node '{}' resolved differently", id);
        }
        assert_eq!(profile, snapshot);
    }

    #[test]
    fn test_lead_example_override_from_every_node() {
        let engine = default_engine();
        let ids: Vec<String> = engine.graph().node_ids().map(String::from).collect();

        for id in ids {
            let mut profile = UserProfile::default();
            let next = engine
                .advance(&id, "Heb je een voorbeeld van een lead?", &mut profile)
                .unwrap();
            assert_eq!(next.id, "lead_examples", "override did not fire at '{}'", id);
            assert_eq!(next.route, Route::Override);
            // The current node's action is skipped.
            assert_eq!(profile, UserProfile::default(), "profile changed at '{}'", id);
        }
    }

    #[test]
    fn test_no_option_label_triggers_the_override() {
        let engine = default_engine();
        let rule = IntentOverride::lead_examples();
        let profile = UserProfile::default();

        for id in engine.graph().node_ids() {
            let message = engine.resolve(id, &profile).unwrap();
            for choice in &message.options {
                let intended = choice.id == "example" && id == "questions";
                if !intended {
                    assert!(
                        !rule.matches(&choice.label),
                        "label '{}' at '{}' hijacks the chat",
                        choice.label,
                        id
                    );
                }
            }
        }
    }

    #[test]
    fn test_profile_accumulates_through_the_funnel() {
        let engine = default_engine();
        let mut profile = UserProfile::default();

        let visited = walk(
            &engine,
            &[
                "Ja, absoluut!",
                "Zonnepanelen",
                "10-50 leads",
                "Leads zijn te duur",
            ],
            &mut profile,
        );

        assert_eq!(
            visited,
            ["welcome", "industry", "current_leads", "challenges", "solution_intro"]
        );
        assert_eq!(profile.industry.as_deref(), Some("Zonnepanelen"));
        assert_eq!(profile.current_leads.as_deref(), Some("10-50 leads"));
        assert_eq!(profile.challenge.as_deref(), Some("Leads zijn te duur"));
        assert!(profile.lead_type.is_none());
    }

    #[test]
    fn test_later_nodes_see_earlier_answers() {
        let engine = default_engine();
        let mut profile = UserProfile::default();

        let next = engine
            .advance("industry", "Thuisbatterijen", &mut profile)
            .unwrap();
        assert!(next.message.starts_with("Thuisbatterijen is een mooie markt"));

        let next = engine
            .advance("challenges", "Leads zijn te duur", &mut profile)
            .unwrap();
        assert!(next.message.contains("€12,50"));
    }

    #[test]
    fn test_unknown_node_returns_none() {
        let engine = default_engine();
        let mut profile = UserProfile::default();

        assert!(engine.advance("nope", "Ja", &mut profile).is_none());
        assert_eq!(profile, UserProfile::default());
    }

    #[test]
    fn test_terminal_returns_none() {
        let engine = default_engine();
        let mut profile = UserProfile::default();

        assert!(engine.advance("goodbye", "Doei", &mut profile).is_none());
        assert!(
            engine
                .advance("checkout_ready", "Naar betalen", &mut profile)
                .is_none()
        );
    }

    #[test]
    fn test_dangling_target_is_a_runtime_dead_end() {
        let graph = DialogueGraph::builder()
            .start("a")
            .node(ConversationNode::new("a", "Hoi").goto("missing"))
            .build_unchecked();
        let engine = DialogueEngine::new(graph);
        let mut profile = UserProfile::default();

        assert!(engine.advance("a", "hallo", &mut profile).is_none());
    }

    #[test]
    fn test_small_graph_routes_and_delays() {
        let engine = DialogueEngine::new(small_graph());
        let mut profile = UserProfile::default();

        let start = engine.start(&profile).unwrap();
        assert_eq!(start.id, "ask");
        assert_eq!(start.delay, DEFAULT_DELAY_MS);
        assert_eq!(start.route, Route::Start);

        let thanks = engine.advance("ask", "yes", &mut profile).unwrap();
        assert_eq!(thanks.message, "Top, Ja!");
        assert!(thanks.options.is_empty());

        let sorry = engine.advance("ask", "weet niet", &mut profile).unwrap();
        assert_eq!(sorry.id, "sorry");
        assert_eq!(sorry.delay, 200);
        assert_eq!(profile.industry.as_deref(), Some("weet niet"));
    }

    #[test]
    fn test_configured_default_delay() {
        let config = EngineConfig {
            default_delay_ms: 10,
            ..EngineConfig::default()
        };
        let engine = DialogueEngine::with_config(small_graph(), &config);
        let profile = UserProfile::default();

        assert_eq!(engine.start(&profile).unwrap().delay, 10);
    }
}

#[cfg(test)]
mod conversation_tests {
    use super::*;
    use warmeleads::dialogue::Turn;

    #[test]
    fn test_conversation_tracks_position_and_transcript() {
        let engine = DialogueEngine::new(small_graph());
        let mut chat = Conversation::new(&engine);
        assert!(!chat.is_finished());

        chat.start();
        assert_eq!(chat.current_node(), Some("ask"));

        let reply = chat.reply("Ja").unwrap();
        assert_eq!(reply.id, "thanks");
        assert_eq!(chat.current_node(), Some("thanks"));

        assert!(chat.reply("ok").is_none());
        assert!(chat.is_finished());
        assert!(chat.reply("hallo?").is_none());

        assert_eq!(
            chat.transcript(),
            [
                Turn::Bot {
                    node: "ask".to_string(),
                    message: "Wil je leads?".to_string()
                },
                Turn::User {
                    text: "Ja".to_string()
                },
                Turn::Bot {
                    node: "thanks".to_string(),
                    message: "Top, Ja!".to_string()
                },
                Turn::User {
                    text: "ok".to_string()
                },
            ]
        );
        assert_eq!(chat.into_profile().industry.as_deref(), Some("Ja"));
    }

    #[test]
    fn test_conversation_with_known_profile() {
        let engine = default_engine();
        let mut known = UserProfile::default();
        known.set(ProfileField::Industry, "Airco's");
        let mut chat = Conversation::with_profile(&engine, known);

        chat.start();
        let next = chat.reply("Hoe ziet een lead eruit?").unwrap();

        assert_eq!(next.id, "lead_examples");
        assert!(next.message.contains("Airco's lead"));
        assert!(next.message.contains("airco voor 2 slaapkamers"));
    }
}
