use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Contact details collected during the conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.company.is_none()
    }
}

/// The answers a visitor has given so far.
///
/// The profile is owned by the host, never by the engine. It is created empty when a
/// conversation starts and each node action overwrites at most the fields it is
/// responsible for. Field names serialize in camelCase so the record can be handed
/// to web collaborators as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_leads: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(default, skip_serializing_if = "ContactInfo::is_empty")]
    pub contact_info: ContactInfo,
}

impl UserProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a field, returning `None` when it has not been answered yet.
    pub fn get(&self, field: ProfileField) -> Option<&str> {
        let slot = match field {
            ProfileField::Industry => &self.industry,
            ProfileField::CurrentLeads => &self.current_leads,
            ProfileField::Challenge => &self.challenge,
            ProfileField::LeadType => &self.lead_type,
            ProfileField::Budget => &self.budget,
            ProfileField::Quantity => &self.quantity,
            ProfileField::ContactName => &self.contact_info.name,
            ProfileField::ContactEmail => &self.contact_info.email,
            ProfileField::ContactPhone => &self.contact_info.phone,
            ProfileField::ContactCompany => &self.contact_info.company,
        };
        slot.as_deref()
    }

    /// Overwrites a field with a new value.
    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        let slot = match field {
            ProfileField::Industry => &mut self.industry,
            ProfileField::CurrentLeads => &mut self.current_leads,
            ProfileField::Challenge => &mut self.challenge,
            ProfileField::LeadType => &mut self.lead_type,
            ProfileField::Budget => &mut self.budget,
            ProfileField::Quantity => &mut self.quantity,
            ProfileField::ContactName => &mut self.contact_info.name,
            ProfileField::ContactEmail => &mut self.contact_info.email,
            ProfileField::ContactPhone => &mut self.contact_info.phone,
            ProfileField::ContactCompany => &mut self.contact_info.company,
        };
        *slot = Some(value.into());
    }

    /// Stores contact details that were collected and validated outside the chat,
    /// e.g. by a structured form. Fields that are `None` in `contact` are left untouched.
    pub fn merge_contact(&mut self, contact: ContactInfo) {
        let ContactInfo {
            name,
            email,
            phone,
            company,
        } = contact;
        if name.is_some() {
            self.contact_info.name = name;
        }
        if email.is_some() {
            self.contact_info.email = email;
        }
        if phone.is_some() {
            self.contact_info.phone = phone;
        }
        if company.is_some() {
            self.contact_info.company = company;
        }
    }

    /// The number of leads ordered, read from answers such as `"50 leads"`.
    pub fn quantity_count(&self) -> Option<u32> {
        self.quantity.as_deref().and_then(parse_count)
    }

    /// Whether the visitor picked exclusive leads.
    pub fn wants_exclusive(&self) -> bool {
        self.lead_type
            .as_deref()
            .is_some_and(|t| t.to_lowercase().contains("exclusie"))
    }
}

/// Addressable profile slots, used by declarative actions and message templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProfileField {
    Industry,
    CurrentLeads,
    Challenge,
    LeadType,
    Budget,
    Quantity,
    ContactName,
    ContactEmail,
    ContactPhone,
    ContactCompany,
}

impl ProfileField {
    pub const ALL: [ProfileField; 10] = [
        ProfileField::Industry,
        ProfileField::CurrentLeads,
        ProfileField::Challenge,
        ProfileField::LeadType,
        ProfileField::Budget,
        ProfileField::Quantity,
        ProfileField::ContactName,
        ProfileField::ContactEmail,
        ProfileField::ContactPhone,
        ProfileField::ContactCompany,
    ];

    /// The camelCase name used in scripts and templates.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Industry => "industry",
            ProfileField::CurrentLeads => "currentLeads",
            ProfileField::Challenge => "challenge",
            ProfileField::LeadType => "leadType",
            ProfileField::Budget => "budget",
            ProfileField::Quantity => "quantity",
            ProfileField::ContactName => "contactName",
            ProfileField::ContactEmail => "contactEmail",
            ProfileField::ContactPhone => "contactPhone",
            ProfileField::ContactCompany => "contactCompany",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProfileField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Reads the first run of digits in `input`, ignoring `.` thousands separators.
pub fn parse_count(input: &str) -> Option<u32> {
    let digits: String = input
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok().filter(|n| *n > 0)
}

/// Loose e-mail check: one `@`, a non-empty local part and a dotted domain.
pub fn is_valid_email(input: &str) -> bool {
    let input = input.trim();
    if input.contains(char::is_whitespace) {
        return false;
    }
    match input.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && tld.len() >= 2)
        }
        None => false,
    }
}

/// Accepts Dutch and international phone numbers: 10 to 13 digits after stripping
/// spaces, dashes, parentheses and a leading `+`.
pub fn is_valid_phone(input: &str) -> bool {
    let input = input.trim();
    let body = input.strip_prefix('+').unwrap_or(input);
    let mut digits = 0;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '(' | ')' => {}
            _ => return false,
        }
    }
    (10..=13).contains(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("jan@zonnebedrijf.nl"));
        assert!(is_valid_email("  info@warmeleads.eu "));
        assert!(!is_valid_email("jan@"));
        assert!(!is_valid_email("jan zonnebedrijf.nl"));
        assert!(!is_valid_email("jan@bedrijf"));
        assert!(!is_valid_email("a@b@c.nl"));
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("06 12345678"));
        assert!(is_valid_phone("+31 6 1234 5678"));
        assert!(is_valid_phone("(020) 123-4567"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("bel me maar"));
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("50 leads"), Some(50));
        assert_eq!(parse_count("ongeveer 1.000 stuks"), Some(1000));
        assert_eq!(parse_count("0"), None);
        assert_eq!(parse_count("veel"), None);
    }

    #[test]
    fn test_field_round_trip_by_name() {
        for field in ProfileField::ALL {
            assert_eq!(field.as_str().parse::<ProfileField>(), Ok(field));
        }
        assert!("favouriteColour".parse::<ProfileField>().is_err());
    }
}
