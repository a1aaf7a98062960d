//! Per-industry lead pricing.
//!
//! The table is plain data constructed by the caller and shared with the dialogue
//! flow through an `Arc`. `PricingTable::default()` carries the WarmeLeads prices;
//! a configuration file may replace it (see [`crate::config`]).

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Exclusive lead prices per volume tier, in euro cents per lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExclusiveTiers {
    pub tier_30: u32,
    pub tier_50: u32,
    pub tier_75: u32,
}

/// Shared lead offer: a flat price per lead with a minimum order quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedOffer {
    pub price: u32,
    pub minimum: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndustryPricing {
    pub name: String,
    pub exclusive: ExclusiveTiers,
    pub shared: SharedOffer,
}

impl IndustryPricing {
    /// Price per exclusive lead for the given order size.
    pub fn exclusive_unit_price(&self, quantity: u32) -> u32 {
        match quantity {
            q if q >= 75 => self.exclusive.tier_75,
            q if q >= 50 => self.exclusive.tier_50,
            _ => self.exclusive.tier_30,
        }
    }
}

/// The two products WarmeLeads sells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadKind {
    Exclusive,
    Shared,
}

impl LeadKind {
    pub const EXCLUSIVE_LABEL: &'static str = "Exclusieve leads";
    pub const SHARED_LABEL: &'static str = "Gedeelde leads";

    /// Recognizes the button labels as well as loosely typed variants.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.to_lowercase();
        if label.contains("exclusie") {
            Some(LeadKind::Exclusive)
        } else if label.contains("gedeeld") {
            Some(LeadKind::Shared)
        } else {
            None
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LeadKind::Exclusive => Self::EXCLUSIVE_LABEL,
            LeadKind::Shared => Self::SHARED_LABEL,
        }
    }
}

/// A priced order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub kind: LeadKind,
    pub quantity: u32,
    pub unit_price: u32,
    pub total: u64,
}

/// Industry prices keyed case-insensitively, kept in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<IndustryPricing>", into = "Vec<IndustryPricing>")]
pub struct PricingTable {
    industries: Vec<IndustryPricing>,
    index: AHashMap<String, usize>,
}

impl From<Vec<IndustryPricing>> for PricingTable {
    fn from(industries: Vec<IndustryPricing>) -> Self {
        let mut table = PricingTable {
            industries: Vec::with_capacity(industries.len()),
            index: AHashMap::new(),
        };
        for industry in industries {
            table.insert(industry);
        }
        table
    }
}

impl From<PricingTable> for Vec<IndustryPricing> {
    fn from(table: PricingTable) -> Self {
        table.industries
    }
}

impl Default for PricingTable {
    fn default() -> Self {
        let industry = |name: &str, tiers: [u32; 3], price: u32, minimum: u32| IndustryPricing {
            name: name.to_string(),
            exclusive: ExclusiveTiers {
                tier_30: tiers[0],
                tier_50: tiers[1],
                tier_75: tiers[2],
            },
            shared: SharedOffer { price, minimum },
        };
        PricingTable::from(vec![
            industry("Thuisbatterijen", [4250, 4000, 3750], 1250, 500),
            industry("Zonnepanelen", [4000, 3750, 3500], 1200, 250),
            industry("Warmtepompen", [4500, 4250, 4000], 1500, 250),
            industry("Airco's", [3500, 3250, 3000], 1000, 250),
            industry("Financial Lease", [5500, 5000, 4500], 1750, 100),
        ])
    }
}

impl PricingTable {
    pub fn new() -> Self {
        PricingTable::from(Vec::new())
    }

    /// Adds or replaces the pricing for an industry.
    pub fn insert(&mut self, pricing: IndustryPricing) {
        let key = pricing.name.to_lowercase();
        match self.index.get(&key) {
            Some(&slot) => self.industries[slot] = pricing,
            None => {
                self.index.insert(key, self.industries.len());
                self.industries.push(pricing);
            }
        }
    }

    pub fn get(&self, industry: &str) -> Option<&IndustryPricing> {
        self.index
            .get(&industry.trim().to_lowercase())
            .map(|&slot| &self.industries[slot])
    }

    /// Industry names in display order.
    pub fn industry_names(&self) -> impl Iterator<Item = &str> {
        self.industries.iter().map(|i| i.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.industries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.industries.is_empty()
    }

    /// Prices an order. Returns `None` for an unknown industry.
    pub fn quote(&self, industry: &str, kind: LeadKind, quantity: u32) -> Option<Quote> {
        let pricing = self.get(industry)?;
        let unit_price = match kind {
            LeadKind::Exclusive => pricing.exclusive_unit_price(quantity),
            LeadKind::Shared => pricing.shared.price,
        };
        Some(Quote {
            kind,
            quantity,
            unit_price,
            total: u64::from(unit_price) * u64::from(quantity),
        })
    }

    /// Formats the price block shown in the chat for an industry and lead type.
    ///
    /// An unrecognized lead type lists both products; an unknown industry yields a
    /// "price on request" text instead of failing.
    pub fn order_summary(&self, industry: &str, lead_type: &str) -> String {
        let Some(pricing) = self.get(industry) else {
            return format!(
                "📊 Voor {} maken we graag een prijs op maat.\n\nLaat je gegevens achter, dan neemt een specialist binnen 24 uur contact met je op.",
                display_or_default(industry)
            );
        };

        let mut out = String::new();
        match LeadKind::from_label(lead_type) {
            Some(LeadKind::Exclusive) => write_exclusive(&mut out, pricing),
            Some(LeadKind::Shared) => write_shared(&mut out, pricing),
            None => {
                write_exclusive(&mut out, pricing);
                out.push_str("\n\n");
                write_shared(&mut out, pricing);
            }
        }
        out
    }
}

fn write_exclusive(out: &mut String, pricing: &IndustryPricing) {
    let tiers = &pricing.exclusive;
    let _ = write!(
        out,
        "📊 Prijzen voor exclusieve {} leads:\n\n• 30+ leads: {} per lead\n• 50+ leads: {} per lead\n• 75+ leads: {} per lead\n\n✅ Alleen voor jou, nooit doorverkocht\n✅ Real-time levering in je persoonlijke portal",
        pricing.name,
        format_euro(u64::from(tiers.tier_30)),
        format_euro(u64::from(tiers.tier_50)),
        format_euro(u64::from(tiers.tier_75)),
    );
}

fn write_shared(out: &mut String, pricing: &IndustryPricing) {
    let _ = write!(
        out,
        "📊 Prijzen voor gedeelde {} leads:\n\n• {} per lead\n• Minimale afname: {} leads\n\n✅ Gedeeld met maximaal 2 andere partijen\n✅ Ideaal om voordelig te starten",
        pricing.name,
        format_euro(u64::from(pricing.shared.price)),
        pricing.shared.minimum,
    );
}

fn display_or_default(industry: &str) -> &str {
    let trimmed = industry.trim();
    if trimmed.is_empty() { "jouw branche" } else { trimmed }
}

/// Formats cents as a Dutch euro amount, e.g. `425000` -> `€4.250,00`.
pub fn format_euro(cents: u64) -> String {
    let euros = cents / 100;
    let rest = cents % 100;
    let digits = euros.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("€{},{:02}", grouped, rest)
}

/// Module-level shortcut over the default WarmeLeads table.
pub fn order_summary(industry: &str, lead_type: &str) -> String {
    PricingTable::default().order_summary(industry, lead_type)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_euro() {
        assert_eq!(format_euro(0), "€0,00");
        assert_eq!(format_euro(1250), "€12,50");
        assert_eq!(format_euro(425000), "€4.250,00");
        assert_eq!(format_euro(123456789), "€1.234.567,89");
    }

    #[test]
    fn test_exclusive_tier_boundaries() {
        let table = PricingTable::default();
        let pricing = table.get("zonnepanelen").unwrap();
        assert_eq!(pricing.exclusive_unit_price(30), 4000);
        assert_eq!(pricing.exclusive_unit_price(49), 4000);
        assert_eq!(pricing.exclusive_unit_price(50), 3750);
        assert_eq!(pricing.exclusive_unit_price(75), 3500);
    }

    #[test]
    fn test_insert_replaces_case_insensitively() {
        let mut table = PricingTable::default();
        let before = table.len();
        let mut pricing = table.get("Airco's").unwrap().clone();
        pricing.name = "AIRCO'S".to_string();
        pricing.shared.price = 999;
        table.insert(pricing);
        assert_eq!(table.len(), before);
        assert_eq!(table.get("airco's").unwrap().shared.price, 999);
    }
}
