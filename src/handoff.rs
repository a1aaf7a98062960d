//! Contracts for the services a finished conversation is handed to.
//!
//! The engine never calls these. The host decides when a profile is complete enough,
//! builds a request from it and passes it to its own checkout or CRM integration.

use crate::error::HandoffError;
use crate::pricing::LeadKind;
use crate::profile::{ContactInfo, UserProfile};
use serde::{Deserialize, Serialize};

/// Input for the payment collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub industry: String,
    pub lead_type: String,
    pub quantity: u32,
    pub customer_info: ContactInfo,
}

impl CheckoutRequest {
    /// Requires industry, lead type, a numeric quantity, name and e-mail.
    pub fn from_profile(profile: &UserProfile) -> Result<Self, HandoffError> {
        let industry = profile
            .industry
            .clone()
            .ok_or(HandoffError::Missing("industry"))?;
        let lead_type = profile
            .lead_type
            .as_deref()
            .ok_or(HandoffError::Missing("leadType"))?;
        let lead_type = LeadKind::from_label(lead_type)
            .map(|kind| kind.label().to_string())
            .unwrap_or_else(|| lead_type.to_string());
        let raw_quantity = profile
            .quantity
            .as_deref()
            .ok_or(HandoffError::Missing("quantity"))?;
        let quantity = profile
            .quantity_count()
            .ok_or_else(|| HandoffError::InvalidQuantity(raw_quantity.to_string()))?;
        let contact = &profile.contact_info;
        if contact.name.is_none() {
            return Err(HandoffError::Missing("contactInfo.name"));
        }
        if contact.email.is_none() {
            return Err(HandoffError::Missing("contactInfo.email"));
        }

        Ok(Self {
            industry,
            lead_type,
            quantity,
            customer_info: contact.clone(),
        })
    }
}

/// Input for the CRM collaborator: the contact fragment plus what we learned about
/// the visitor's business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub contact_info: ContactInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challenge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
}

impl ContactSubmission {
    /// Requires a name and at least one way to reach the visitor.
    pub fn from_profile(profile: &UserProfile) -> Result<Self, HandoffError> {
        let contact = &profile.contact_info;
        if contact.name.is_none() {
            return Err(HandoffError::Missing("contactInfo.name"));
        }
        if contact.email.is_none() && contact.phone.is_none() {
            return Err(HandoffError::Missing("contactInfo.email|phone"));
        }
        Ok(Self {
            contact_info: contact.clone(),
            industry: profile.industry.clone(),
            challenge: profile.challenge.clone(),
            budget: profile.budget.clone(),
        })
    }
}

/// Where the host should send the visitor after creating a checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Redirect(String),
    Confirmed { order_id: String },
}

/// A payment service, e.g. a hosted checkout session.
pub trait CheckoutGateway {
    type Error: std::error::Error;

    fn create_checkout(&self, request: &CheckoutRequest) -> Result<CheckoutOutcome, Self::Error>;
}

/// A CRM or contact store.
pub trait ContactSink {
    type Error: std::error::Error;

    fn submit(&self, submission: &ContactSubmission) -> Result<(), Self::Error>;
}
