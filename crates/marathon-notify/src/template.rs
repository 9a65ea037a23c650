use serde_json::{Value, json};

/// Shown when a participant has no rendered pass yet.
pub const DEFAULT_PASS_PLACEHOLDER: &str =
    "https://res.cloudinary.com/dxp7yksv6/image/upload/v1735824554/unchai-marathon/passes/placeholder.png";

const NOT_ASSIGNED: &str = "N/A";
const DEFAULT_CATEGORY: &str = "Marathon";

/// The message kinds the provider has approved templates for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    Otp {
        code: String,
    },
    RegistrationSuccess {
        name: String,
        distance: String,
        participant_id: String,
    },
    TicketConfirmation(TicketDetails),
}

/// Body parameters of the ticket confirmation message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDetails {
    pub name: String,
    pub category: String,
    pub bib_number: String,
    pub counter: String,
    pub pass_link: String,
}

impl TicketDetails {
    /// Fill the placeholders a half-processed participant would leave blank.
    pub fn new(
        first_name: &str,
        last_name: &str,
        distance: &str,
        bib_num: Option<&str>,
        counter_no: Option<&str>,
        pass_link: Option<&str>,
        placeholder: &str,
    ) -> Self {
        fn filled<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
            value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or(fallback)
        }
        Self {
            name: format!("{} {}", first_name.trim(), last_name.trim())
                .trim()
                .to_owned(),
            category: filled(Some(distance), DEFAULT_CATEGORY).to_owned(),
            bib_number: filled(bib_num, NOT_ASSIGNED).to_owned(),
            counter: filled(counter_no, NOT_ASSIGNED).to_owned(),
            pass_link: filled(pass_link, placeholder).to_owned(),
        }
    }
}

impl Template {
    /// Provider-side template name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Otp { .. } => "otp_verify",
            Self::RegistrationSuccess { .. } => "reg_confirm_success",
            Self::TicketConfirmation(_) => "ticket_purchase_confirmation",
        }
    }

    /// Human-readable success message for logs and CLI output.
    pub fn sent_message(&self) -> &'static str {
        match self {
            Self::Otp { .. } => "OTP sent successfully",
            Self::RegistrationSuccess { .. } => "Registration success message sent",
            Self::TicketConfirmation(_) => "Ticket confirmation message sent",
        }
    }

    fn components(&self) -> Value {
        match self {
            Self::Otp { code } => json!([
                { "type": "body", "parameters": [text(code)] },
                url_button(code),
            ]),
            Self::RegistrationSuccess {
                name,
                distance,
                participant_id,
            } => json!([
                header_image(&qr_link(participant_id)),
                { "type": "body", "parameters": [text(name), text(distance)] },
                url_button(participant_id),
            ]),
            Self::TicketConfirmation(t) => json!([
                header_image(&t.pass_link),
                {
                    "type": "body",
                    "parameters": [
                        text(&t.name),
                        text(&t.category),
                        text(&t.bib_number),
                        text(&t.counter),
                    ],
                },
            ]),
        }
    }
}

/// QR image of the participant id, rendered by quickchart.
pub fn qr_link(participant_id: &str) -> String {
    format!(
        "https://quickchart.io/qr?text={participant_id}&size=400&margin=4&dark=0c0a09&light=ffffff&format=png"
    )
}

/// The full request body for a WhatsApp template message.
pub fn template_payload(to: &str, template: &Template) -> Value {
    json!({
        "messaging_product": "whatsapp",
        "to": to,
        "type": "template",
        "template": {
            "name": template.name(),
            "language": { "code": "en", "policy": "deterministic" },
            "components": template.components(),
        },
    })
}

fn text(value: &str) -> Value {
    json!({ "type": "text", "text": value })
}

fn header_image(link: &str) -> Value {
    json!({
        "type": "header",
        "parameters": [{ "type": "image", "image": { "link": link } }],
    })
}

fn url_button(value: &str) -> Value {
    json!({
        "type": "button",
        "sub_type": "url",
        "index": 0,
        "parameters": [text(value)],
    })
}
