use crate::domain::donation::DonationDetails;
use crate::domain::flow::{FlowState, Outcome};
use crate::domain::ports::ConfirmationClientArc;
use crate::error::{DonationError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at, timeout};
use tracing::{error, info, warn};

pub const CONFIRMATION_DEADLINE: Duration = Duration::from_secs(25);
pub const LOADING_ROTATION_PERIOD: Duration = Duration::from_secs(3);
const REQUEST_ABORTED: &str = "the confirmation request stopped unexpectedly";

/// Drives one donation confirmation at a time and exposes its progress as [`FlowState`].
///
/// The confirmation request races a deadline. Whichever settles first decides
/// the outcome and the loser is dropped, so a late response can never
/// overwrite a timeout and a stale timer can never overwrite a response.
#[derive(Clone)]
pub struct FlowController {
    client: ConfirmationClientArc,
    state: Arc<RwLock<FlowState>>,
    deadline: Duration,
    rotation_period: Duration,
}

impl FlowController {
    pub fn new(client: ConfirmationClientArc) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(FlowState::default())),
            deadline: CONFIRMATION_DEADLINE,
            rotation_period: LOADING_ROTATION_PERIOD,
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_rotation_period(mut self, period: Duration) -> Self {
        self.rotation_period = period;
        self
    }

    pub async fn snapshot(&self) -> FlowState {
        self.state.read().await.clone()
    }

    /// Starts confirming `details` in the background.
    ///
    /// The state is already loading when this returns. The returned handle
    /// resolves once the outcome has been written; callers are free to drop it.
    pub async fn submit(&self, details: DonationDetails) -> Result<JoinHandle<()>> {
        {
            let mut state = self.state.write().await;
            if state.is_loading {
                return Err(DonationError::SubmissionInFlight);
            }
            state.begin(details.name());
        }

        let controller = self.clone();
        Ok(tokio::spawn(async move { controller.run(details).await }))
    }

    /// Closes the outcome presentation and returns to the initial state.
    ///
    /// Does nothing while a request is in flight. Never resubmits.
    pub async fn dismiss(&self) {
        let mut state = self.state.write().await;
        if state.is_loading {
            return;
        }
        state.reset();
    }

    async fn run(&self, details: DonationDetails) {
        let rotation = tokio::spawn(rotate_loading_text(
            Arc::clone(&self.state),
            self.rotation_period,
        ));

        // The request runs in its own task so a panicking client still settles the flow.
        let client = Arc::clone(&self.client);
        let payload = details.clone();
        let mut request = tokio::spawn(async move { client.confirm(&payload).await });

        let outcome = match timeout(self.deadline, &mut request).await {
            Ok(Ok(Ok(message))) => {
                info!(donor = details.name(), "thank-you confirmation received");
                Outcome::Delivered(message)
            }
            Ok(Ok(Err(e))) => {
                warn!(error = %e, "thank-you confirmation failed");
                Outcome::Failed(e.to_string())
            }
            Ok(Err(e)) => {
                error!(error = %e, "thank-you confirmation task did not complete");
                Outcome::Failed(REQUEST_ABORTED.to_string())
            }
            Err(_) => {
                request.abort();
                warn!(
                    deadline_secs = self.deadline.as_secs_f64(),
                    "thank-you confirmation timed out; donation already completed"
                );
                Outcome::Delayed
            }
        };

        rotation.abort();
        self.state.write().await.settle(outcome);
    }
}

async fn rotate_loading_text(state: Arc<RwLock<FlowState>>, period: Duration) {
    let mut ticker = interval_at(Instant::now() + period, period);
    loop {
        ticker.tick().await;
        let mut state = state.write().await;
        if !state.is_loading {
            break;
        }
        state.rotate_loading_text();
    }
}
