use clap::{Parser, Subcommand};
use hopefund::application::flow::FlowController;
use hopefund::application::form::DonationForm;
use hopefund::application::service::ConfirmationService;
use hopefund::config::ServiceConfig;
use hopefund::domain::checkout::{PaymentAcknowledgment, PaymentFailure};
use hopefund::domain::donation::DonationDetails;
use hopefund::infrastructure::http_client::HttpConfirmationClient;
use hopefund::infrastructure::in_memory::{OutboxSender, TemplateGenerator};
use hopefund::interfaces::http::{self, AppState};
use hopefund::interfaces::modal::ModalView;
use hopefund::telemetry;
use miette::{IntoDiagnostic, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the thank-you confirmation endpoint
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8888", env = "HOPEFUND_ADDR")]
        addr: SocketAddr,

        /// Use the built-in template generator and an in-memory outbox instead of
        /// the hosted AI and email services
        #[arg(long)]
        offline: bool,
    },
    /// Make a donation and wait for the personalized thank-you
    Donate {
        /// Donor name
        #[arg(long)]
        name: String,

        /// Donor email address
        #[arg(long)]
        email: String,

        /// Custom amount in rupees (defaults to the 500 preset)
        #[arg(long)]
        amount: Option<String>,

        /// Base URL of the confirmation endpoint
        #[arg(long, default_value = "http://127.0.0.1:8888", env = "HOPEFUND_ENDPOINT")]
        endpoint: String,

        /// Key id for the checkout widget
        #[arg(long, default_value = "rzp_test_key", env = "CHECKOUT_KEY_ID")]
        checkout_key: String,

        /// Payment id reported by the checkout widget
        #[arg(long, default_value = "pay_manual")]
        payment_id: String,

        /// Simulate the checkout widget declining the payment with this reason
        #[arg(long)]
        decline: Option<String>,

        /// Seconds to wait for the confirmation before reporting a delay
        #[arg(long, default_value_t = 25)]
        deadline_secs: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    match cli.command {
        Command::Serve { addr, offline } => serve(addr, offline).await,
        Command::Donate {
            name,
            email,
            amount,
            endpoint,
            checkout_key,
            payment_id,
            decline,
            deadline_secs,
        } => {
            let mut form = DonationForm::new();
            form.name = name;
            form.email = email;
            if let Some(amount) = amount {
                form.set_custom_amount(&amount);
            }

            let checkout = form.submit(&checkout_key).into_diagnostic()?;
            let options = serde_json::to_string(&checkout).into_diagnostic()?;
            debug!(%options, "opening checkout");

            if let Some(reason) = decline {
                let failure = form.payment_failed(&PaymentFailure {
                    description: reason,
                });
                return Err::<(), _>(failure).into_diagnostic();
            }

            let ack = PaymentAcknowledgment {
                payment_id,
                order_id: None,
                signature: None,
            };
            let details = form.payment_succeeded(&ack).into_diagnostic()?;

            let client = HttpConfirmationClient::new(&endpoint);
            let controller = FlowController::new(Arc::new(client))
                .with_deadline(Duration::from_secs(deadline_secs));
            confirm(&controller, details).await
        }
    }
}

async fn serve(addr: SocketAddr, offline: bool) -> Result<()> {
    let config = ServiceConfig::from_env();

    let service = if offline {
        let sender = config
            .sender_email
            .clone()
            .unwrap_or_else(|| "donations@localhost".to_string());
        Ok(ConfirmationService::new(
            Box::new(TemplateGenerator),
            Box::new(OutboxSender::new()),
            sender,
        ))
    } else {
        ConfirmationService::from_config(&config)
    };

    if let Err(e) = &service {
        warn!(error = %e, "starting without a usable confirmation service");
    }

    http::serve(addr, AppState::new(service))
        .await
        .into_diagnostic()
}

async fn confirm(controller: &FlowController, details: DonationDetails) -> Result<()> {
    let mut handle = controller.submit(details).await.into_diagnostic()?;

    let mut ticker = tokio::time::interval(Duration::from_millis(250));
    let mut shown = "";
    loop {
        tokio::select! {
            joined = &mut handle => {
                joined.into_diagnostic()?;
                break;
            }
            _ = ticker.tick() => {
                let state = controller.snapshot().await;
                if state.is_loading && state.loading_text != shown {
                    eprintln!("{}", state.loading_text);
                    shown = state.loading_text;
                }
            }
        }
    }

    let state = controller.snapshot().await;
    if let Some(view) = ModalView::from_state(&state) {
        print!("{}", view);
    }
    controller.dismiss().await;

    Ok(())
}
