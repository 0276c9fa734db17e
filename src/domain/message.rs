use super::checkout::MERCHANT_NAME;
use super::donation::Amount;

pub const EMAIL_SUBJECT: &str = "Thank You for Your Generous Donation to Hope Foundation!";

/// Builds the instruction sent to the text generator for one donor.
pub fn thank_you_prompt(donor_name: &str, amount: Amount) -> String {
    format!(
        "You are a grateful representative of the '{MERCHANT_NAME}', a charity focused on community empowerment.\n\
         A donor named \"{donor_name}\" has just donated \u{20b9}{amount}.\n\n\
         Write two parts:\n\
         1. A short, personal thank you addressed to the donor (2-3 sentences).\n\
         2. A short paragraph (3-4 sentences) imagining the concrete impact \u{20b9}{amount} could have.\n\n\
         Keep the tone warm and sincere. Separate the two parts with a blank line. \
         Do not add a subject line, a greeting such as 'Dear...', or a closing signature. \
         Return only the body text."
    )
}

/// A rendered thank-you email ready for a delivery provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThankYouEmail {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl ThankYouEmail {
    pub fn new(to: &str, from: &str, message: &str) -> Self {
        Self {
            to: to.to_string(),
            from: from.to_string(),
            subject: EMAIL_SUBJECT.to_string(),
            text: message.to_string(),
            html: render_html(message),
        }
    }
}

fn render_html(message: &str) -> String {
    let body = escape_html(message).replace("\n\n", "<br><br>");
    format!(r#"<div style="font-family: sans-serif; line-height: 1.6;">{body}</div>"#)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
