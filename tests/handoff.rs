//! Building checkout and CRM payloads from a finished profile.
mod common;
use common::*;
use std::cell::RefCell;
use warmeleads::error::ScriptConversionError;
use warmeleads::handoff::{CheckoutGateway, CheckoutOutcome, ContactSink};
use warmeleads::prelude::*;

/// Records requests instead of talking to a payment provider.
#[derive(Default)]
struct RecordingGateway {
    requests: RefCell<Vec<CheckoutRequest>>,
}

impl CheckoutGateway for RecordingGateway {
    type Error = ScriptConversionError;

    fn create_checkout(
        &self,
        request: &CheckoutRequest,
    ) -> std::result::Result<CheckoutOutcome, Self::Error> {
        self.requests.borrow_mut().push(request.clone());
        Ok(CheckoutOutcome::Redirect(format!(
            "https://pay.example/checkout/{}",
            self.requests.borrow().len()
        )))
    }
}

struct RejectingSink;

impl ContactSink for RejectingSink {
    type Error = ScriptConversionError;

    fn submit(&self, _submission: &ContactSubmission) -> std::result::Result<(), Self::Error> {
        Err(ScriptConversionError::ValidationError("CRM offline".to_string()))
    }
}

#[cfg(test)]
mod handoff_tests {
    use super::*;

    #[test]
    fn test_checkout_request_from_complete_profile() {
        let request = CheckoutRequest::from_profile(&complete_profile()).unwrap();

        assert_eq!(request.quantity, 50);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["leadType"], "Exclusieve leads");
        assert_eq!(json["customerInfo"]["email"], "sanne@example.nl");
    }

    #[test]
    fn test_checkout_reports_first_missing_field() {
        let cases: [(fn(&mut UserProfile), &str); 5] = [
            (|p: &mut UserProfile| p.industry = None, "industry"),
            (|p: &mut UserProfile| p.lead_type = None, "leadType"),
            (|p: &mut UserProfile| p.quantity = None, "quantity"),
            (|p: &mut UserProfile| p.contact_info.name = None, "contactInfo.name"),
            (|p: &mut UserProfile| p.contact_info.email = None, "contactInfo.email"),
        ];

        for (strip, field) in cases {
            let mut profile = complete_profile();
            strip(&mut profile);
            assert_eq!(
                CheckoutRequest::from_profile(&profile),
                Err(HandoffError::Missing(field))
            );
        }
    }

    #[test]
    fn test_checkout_rejects_non_numeric_quantity() {
        let mut profile = complete_profile();
        profile.set(ProfileField::Quantity, "veel");

        assert_eq!(
            CheckoutRequest::from_profile(&profile),
            Err(HandoffError::InvalidQuantity("veel".to_string()))
        );
    }

    #[test]
    fn test_contact_submission_needs_a_way_to_reach_the_visitor() {
        let mut profile = UserProfile::default();
        profile.set(ProfileField::ContactName, "Pieter");
        assert_eq!(
            ContactSubmission::from_profile(&profile),
            Err(HandoffError::Missing("contactInfo.email|phone"))
        );

        profile.set(ProfileField::ContactPhone, "0612345678");
        profile.set(ProfileField::Challenge, "Leads zijn te duur");
        let submission = ContactSubmission::from_profile(&profile).unwrap();
        let json = serde_json::to_value(&submission).unwrap();

        assert_eq!(json["challenge"], "Leads zijn te duur");
        assert!(json.get("industry").is_none());
        assert!(json["contactInfo"].get("email").is_none());
    }

    #[test]
    fn test_merged_contact_completes_checkout() {
        let mut profile = complete_profile();
        profile.contact_info = ContactInfo::default();
        assert!(CheckoutRequest::from_profile(&profile).is_err());

        profile.merge_contact(ContactInfo {
            name: Some("Sanne".to_string()),
            email: Some("sanne@example.nl".to_string()),
            phone: None,
            company: Some("Zonnig BV".to_string()),
        });
        let request = CheckoutRequest::from_profile(&profile).unwrap();
        assert_eq!(request.customer_info.company.as_deref(), Some("Zonnig BV"));
    }

    #[test]
    fn test_collaborators_receive_payloads() {
        let gateway = RecordingGateway::default();
        let request = CheckoutRequest::from_profile(&complete_profile()).unwrap();

        let outcome = gateway.create_checkout(&request).unwrap();
        assert_eq!(
            outcome,
            CheckoutOutcome::Redirect("https://pay.example/checkout/1".to_string())
        );
        assert_eq!(gateway.requests.borrow().as_slice(), [request]);

        let submission = ContactSubmission::from_profile(&complete_profile()).unwrap();
        assert!(RejectingSink.submit(&submission).is_err());
    }
}
