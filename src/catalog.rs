//! The community site's intake forms

use crate::forms::{FieldSpec, FormSchema, SchemaError};

const EXPERIENCE_LEVELS: &[&str] = &["beginner", "intermediate", "advanced", "expert"];

/// Every form the site offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    EventRegistration,
    MembershipApplication,
    SponsorshipInquiry,
    Contact,
    Question,
}

impl FormKind {
    pub const ALL: [FormKind; 5] = [
        FormKind::EventRegistration,
        FormKind::MembershipApplication,
        FormKind::SponsorshipInquiry,
        FormKind::Contact,
        FormKind::Question,
    ];

    /// Identifier used in submissions and gateway URLs
    pub fn slug(&self) -> &'static str {
        match self {
            Self::EventRegistration => "event-registration",
            Self::MembershipApplication => "membership-application",
            Self::SponsorshipInquiry => "sponsorship-inquiry",
            Self::Contact => "contact",
            Self::Question => "faq-question",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::EventRegistration => "Event Registration",
            Self::MembershipApplication => "Membership Application",
            Self::SponsorshipInquiry => "Become a Sponsor",
            Self::Contact => "Get in Touch",
            Self::Question => "Ask a Question",
        }
    }

    /// Label of the final action button
    pub fn submit_label(&self) -> &'static str {
        match self {
            Self::EventRegistration => "Complete Registration",
            Self::MembershipApplication => "Submit Application",
            Self::SponsorshipInquiry => "Submit Inquiry",
            Self::Contact => "Send Message",
            Self::Question => "Submit Question",
        }
    }

    /// Confirmation text shown once the submission is accepted
    pub fn success_message(&self) -> &'static str {
        match self {
            Self::EventRegistration => {
                "Thank you for registering. We've sent a confirmation email with all the details to your inbox."
            }
            Self::MembershipApplication => {
                "Your application has been submitted. We will contact you soon!"
            }
            Self::SponsorshipInquiry => {
                "Thanks for your interest in sponsoring. Our team will get back to you shortly."
            }
            Self::Contact => "Thank you! Your message has been sent. We'll get back to you soon.",
            Self::Question => "Thanks for your question! We'll get back to you by email.",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.slug() == slug)
    }

    pub fn schema(&self) -> Result<FormSchema, SchemaError> {
        match self {
            Self::EventRegistration => event_registration(),
            Self::MembershipApplication => membership_application(),
            Self::SponsorshipInquiry => sponsorship_inquiry(),
            Self::Contact => contact(),
            Self::Question => question(),
        }
    }
}

/// Three-step workshop registration: contact details, background, agreement
pub fn event_registration() -> Result<FormSchema, SchemaError> {
    let kind = FormKind::EventRegistration;
    FormSchema::new(
        kind.slug(),
        kind.title(),
        vec![
            vec![
                FieldSpec::text("name", "Full Name").required(),
                FieldSpec::email("email", "Email Address").required(),
                FieldSpec::phone("phone", "Phone Number"),
                FieldSpec::text("company", "Company/Organization"),
            ],
            vec![
                FieldSpec::select("experience", "Node.js Experience Level", EXPERIENCE_LEVELS)
                    .required(),
                FieldSpec::textarea("expectations", "What do you hope to learn?"),
                FieldSpec::text("dietary_restrictions", "Dietary Restrictions (if any)")
                    .with_placeholder("Vegetarian, vegan, gluten-free, etc."),
            ],
            vec![FieldSpec::checkbox(
                "agree_to_terms",
                "I agree to the Terms of Use and Code of Conduct",
            )
            .required()],
        ],
    )
}

pub fn membership_application() -> Result<FormSchema, SchemaError> {
    let kind = FormKind::MembershipApplication;
    FormSchema::single_step(
        kind.slug(),
        kind.title(),
        vec![
            FieldSpec::text("name", "Full Name").required(),
            FieldSpec::email("email", "Email Address").required(),
            FieldSpec::phone("phone", "Phone Number (optional)"),
            FieldSpec::select(
                "tier",
                "Membership Tier",
                &["general", "contributor", "organizer"],
            )
            .required(),
            FieldSpec::select(
                "experience",
                "Your Experience with Node.js",
                EXPERIENCE_LEVELS,
            )
            .required(),
            FieldSpec::checkbox_group(
                "interests",
                "Areas of Interest",
                &[
                    "backend",
                    "frontend",
                    "devops",
                    "databases",
                    "apis",
                    "serverless",
                    "testing",
                    "security",
                ],
            ),
            FieldSpec::textarea("message", "Why do you want to join our community?").required(),
            FieldSpec::checkbox("code_of_conduct", "I agree to follow the Code of Conduct")
                .required(),
        ],
    )
}

pub fn sponsorship_inquiry() -> Result<FormSchema, SchemaError> {
    let kind = FormKind::SponsorshipInquiry;
    FormSchema::single_step(
        kind.slug(),
        kind.title(),
        vec![
            FieldSpec::text("name", "Your Name").required(),
            FieldSpec::text("company", "Company").required(),
            FieldSpec::email("email", "Email Address").required(),
            FieldSpec::phone("phone", "Phone Number"),
            FieldSpec::select(
                "tier",
                "Sponsorship Tier",
                &["platinum", "gold", "silver", "bronze", "custom"],
            )
            .required(),
            FieldSpec::textarea("message", "Message").with_placeholder(
                "Tell us about your company, your goals, or any questions you have.",
            ),
        ],
    )
}

pub fn contact() -> Result<FormSchema, SchemaError> {
    let kind = FormKind::Contact;
    FormSchema::single_step(
        kind.slug(),
        kind.title(),
        vec![
            FieldSpec::text("name", "Your Name").required(),
            FieldSpec::email("email", "Email Address").required(),
            FieldSpec::select(
                "interest",
                "I'm interested in",
                &["attending", "speaking", "organizing", "mentoring", "sponsoring"],
            )
            .required(),
            FieldSpec::textarea("message", "Your Message")
                .with_placeholder("Let us know how you'd like to get involved..."),
        ],
    )
}

pub fn question() -> Result<FormSchema, SchemaError> {
    let kind = FormKind::Question;
    FormSchema::single_step(
        kind.slug(),
        kind.title(),
        vec![
            FieldSpec::text("name", "Your Name").required(),
            FieldSpec::email("email", "Email Address").required(),
            FieldSpec::textarea("question", "Your Question")
                .required()
                .with_placeholder("What would you like to know about our community?"),
        ],
    )
}
