use crate::domain::flow::{FlowState, Outcome};
use std::fmt;

pub const ERROR_TITLE: &str = "An Error Occurred";
pub const CONFIRMATION_FOOTER: &str = "A confirmation of your donation has been sent to your email. We are incredibly grateful for your support.";

/// What the dismissible outcome dialog shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub title: String,
    pub paragraphs: Vec<String>,
    pub footer: Option<&'static str>,
    pub is_error: bool,
}

impl ModalView {
    /// `None` while the modal is hidden.
    pub fn from_state(state: &FlowState) -> Option<Self> {
        if !state.modal_visible {
            return None;
        }

        let title = if state.is_error {
            ERROR_TITLE.to_string()
        } else {
            format!("Thank You, {}!", state.donor_name)
        };

        let paragraphs = state
            .result_message
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect();

        // Only a delivered message means the email actually went out.
        let footer = matches!(state.outcome, Some(Outcome::Delivered(_))).then_some(CONFIRMATION_FOOTER);

        Some(Self {
            title,
            paragraphs,
            footer,
            is_error: state.is_error,
        })
    }
}

impl fmt::Display for ModalView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;
        for paragraph in &self.paragraphs {
            writeln!(f)?;
            writeln!(f, "{}", paragraph)?;
        }
        if let Some(footer) = self.footer {
            writeln!(f)?;
            writeln!(f, "{}", footer)?;
        }
        Ok(())
    }
}
