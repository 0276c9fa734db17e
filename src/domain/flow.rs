//! State owned by the client flow controller.

pub const LOADING_MESSAGES: [&str; 5] = [
    "Processing your generous donation...",
    "Connecting to secure server...",
    "Generating your personalized thank you...",
    "Sending confirmation...",
    "Finalizing...",
];

pub const DELAYED_NOTICE: &str = "Your donation was successful, thank you! We're experiencing a slight delay generating your personalized message. It will be delivered to your email shortly.";

/// How a confirmation attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The endpoint returned the generated message.
    Delivered(String),
    /// The deadline fired first. The donation itself already went through.
    Delayed,
    /// The endpoint rejected the request or the transport failed.
    Failed(String),
}

impl Outcome {
    pub fn is_error(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    /// The text shown to the donor for this outcome.
    pub fn message(&self) -> String {
        match self {
            Outcome::Delivered(message) => message.clone(),
            Outcome::Delayed => DELAYED_NOTICE.to_string(),
            Outcome::Failed(reason) => format!(
                "We couldn't process the thank you email due to an error: {reason}. We deeply appreciate your donation and will ensure you receive a confirmation."
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowState {
    pub is_loading: bool,
    pub loading_text: &'static str,
    pub donor_name: String,
    pub result_message: String,
    pub is_error: bool,
    pub modal_visible: bool,
    pub outcome: Option<Outcome>,
}

impl Default for FlowState {
    fn default() -> Self {
        Self {
            is_loading: false,
            loading_text: LOADING_MESSAGES[0],
            donor_name: String::new(),
            result_message: String::new(),
            is_error: false,
            modal_visible: false,
            outcome: None,
        }
    }
}

impl FlowState {
    /// Enters the loading state for `donor_name`, clearing any previous result.
    pub fn begin(&mut self, donor_name: &str) {
        *self = Self {
            is_loading: true,
            donor_name: donor_name.to_string(),
            ..Self::default()
        };
    }

    /// Moves to the next loading message. Ignored once loading has ended.
    pub fn rotate_loading_text(&mut self) {
        if !self.is_loading {
            return;
        }
        let position = LOADING_MESSAGES
            .iter()
            .position(|m| *m == self.loading_text)
            .unwrap_or(0);
        self.loading_text = LOADING_MESSAGES[(position + 1) % LOADING_MESSAGES.len()];
    }

    pub fn settle(&mut self, outcome: Outcome) {
        self.is_loading = false;
        self.result_message = outcome.message();
        self.is_error = outcome.is_error();
        self.modal_visible = true;
        self.outcome = Some(outcome);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_clears_previous_result() {
        let mut state = FlowState::default();
        state.settle(Outcome::Failed("boom".to_string()));

        state.begin("Asha");
        assert!(state.is_loading);
        assert!(!state.is_error);
        assert!(!state.modal_visible);
        assert_eq!(state.donor_name, "Asha");
        assert_eq!(state.result_message, "");
    }

    #[test]
    fn test_rotation_wraps_and_stops_after_settle() {
        let mut state = FlowState::default();
        state.begin("Asha");
        for _ in 0..LOADING_MESSAGES.len() {
            state.rotate_loading_text();
        }
        assert_eq!(state.loading_text, LOADING_MESSAGES[0]);

        state.rotate_loading_text();
        state.settle(Outcome::Delayed);
        let settled_text = state.loading_text;
        state.rotate_loading_text();
        assert_eq!(state.loading_text, settled_text);
    }

    #[test]
    fn test_outcome_messages() {
        assert!(!Outcome::Delayed.is_error());
        assert_eq!(Outcome::Delayed.message(), DELAYED_NOTICE);

        let failed = Outcome::Failed("Y".to_string());
        assert!(failed.is_error());
        assert!(failed.message().contains("due to an error: Y."));
        assert!(failed.message().contains("We deeply appreciate your donation"));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = FlowState::default();
        state.begin("Asha");
        state.settle(Outcome::Delivered("X".to_string()));
        state.reset();
        assert_eq!(state, FlowState::default());
    }
}
