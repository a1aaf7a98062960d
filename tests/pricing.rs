//! Price table lookups and the order summary text.
use warmeleads::pricing::{IndustryPricing, format_euro};
use warmeleads::prelude::*;

#[cfg(test)]
mod pricing_tests {
    use super::*;

    #[test]
    fn test_shared_summary_for_home_batteries() {
        let summary = order_summary("Thuisbatterijen", "Gedeelde leads");

        assert!(summary.contains("gedeelde Thuisbatterijen leads"));
        assert!(summary.contains("€12,50"));
        assert!(summary.contains("500"));
        assert!(!summary.contains("exclusieve"));
    }

    #[test]
    fn test_exclusive_summary_lists_all_tiers() {
        let summary = order_summary("Financial Lease", "Exclusieve leads");

        for price in ["€55,00", "€50,00", "€45,00"] {
            assert!(summary.contains(price), "missing {}", price);
        }
        assert!(!summary.contains("gedeelde"));
    }

    #[test]
    fn test_unknown_lead_type_lists_both_products() {
        let summary = order_summary("airco's", "");

        assert!(summary.contains("exclusieve Airco's leads"));
        assert!(summary.contains("gedeelde Airco's leads"));
        assert!(summary.contains("€10,00"));
    }

    #[test]
    fn test_unknown_industry_gets_custom_price_text() {
        let summary = order_summary("Dakkapellen", "Exclusieve leads");
        assert!(summary.contains("Voor Dakkapellen maken we graag een prijs op maat"));

        let summary = order_summary("", "");
        assert!(summary.contains("Voor jouw branche"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = PricingTable::default();
        assert_eq!(table.len(), 5);
        assert_eq!(
            table.get("ZONNEPANELEN").map(|p| p.name.as_str()),
            Some("Zonnepanelen")
        );
        assert!(table.get("Dakkapellen").is_none());
    }

    #[test]
    fn test_lead_kind_labels() {
        assert_eq!(LeadKind::from_label("Exclusieve leads"), Some(LeadKind::Exclusive));
        assert_eq!(LeadKind::from_label("gedeelde"), Some(LeadKind::Shared));
        assert_eq!(LeadKind::from_label("Vertel meer over beide"), None);
        assert_eq!(LeadKind::Shared.label(), "Gedeelde leads");
    }

    #[test]
    fn test_config_pricing_overrides_and_extends() {
        let config = EngineConfig::from_toml_str(
            r#"
            default_delay_ms = 800

            [[pricing]]
            name = "Zonnepanelen"
            exclusive = { tier_30 = 4100, tier_50 = 3900, tier_75 = 3600 }
            shared = { price = 1300, minimum = 200 }

            [[pricing]]
            name = "Laadpalen"
            exclusive = { tier_30 = 3000, tier_50 = 2800, tier_75 = 2600 }
            shared = { price = 900, minimum = 100 }
            "#,
        )
        .unwrap();

        let table = config.pricing_table();
        assert_eq!(table.len(), 6);
        assert_eq!(table.get("Zonnepanelen").unwrap().shared.minimum, 200);
        assert_eq!(
            table.industry_names().last(),
            Some("Laadpalen"),
        );
        assert!(table.order_summary("Laadpalen", "Gedeelde leads").contains("€9,00"));
        assert_eq!(config.default_delay_ms, 800);
    }

    #[test]
    fn test_inserted_industry_appears_in_chat() {
        let mut table = PricingTable::default();
        table.insert(IndustryPricing {
            name: "Laadpalen".to_string(),
            exclusive: warmeleads::pricing::ExclusiveTiers {
                tier_30: 3000,
                tier_50: 2800,
                tier_75: 2600,
            },
            shared: warmeleads::pricing::SharedOffer {
                price: 900,
                minimum: 100,
            },
        });
        let engine = DialogueEngine::new(warmeleads_flow(std::sync::Arc::new(table)).unwrap());
        let industry = engine.resolve("industry", &UserProfile::default()).unwrap();

        assert!(industry.labels().contains(&"Laadpalen"));
        assert_eq!(format_euro(123_456_789), "€1.234.567,89");
    }
}
