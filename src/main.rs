use clap::{Parser, Subcommand};
use fxdesk::application::pipeline::SubmissionPipeline;
use fxdesk::config::DeskConfig;
use fxdesk::domain::conversion::ConversionRequest;
use fxdesk::domain::ports::{AttachmentSource, AttachmentSourceBox, MediaHostBox, NotifierBox};
use fxdesk::domain::submission::{PipelineState, SubmissionRequest};
use fxdesk::infrastructure::fs::FileAttachmentSource;
use fxdesk::infrastructure::in_memory::{InMemoryMediaHost, InMemoryNotifier};
use fxdesk::infrastructure::media_host::HttpMediaHost;
use fxdesk::infrastructure::notifier::HttpNotifier;
use miette::{IntoDiagnostic, Result, bail};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Desk configuration file (JSON)
    #[arg(long, default_value = "desk.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert an amount between the two configured currencies
    Convert {
        /// Amount to convert; empty or non-numeric input counts as 0
        amount: String,

        /// Source currency unit
        #[arg(long)]
        from: String,

        /// Target currency unit
        #[arg(long)]
        to: String,
    },
    /// Send a message, with an optional payment-proof attachment
    Submit {
        /// Sender name
        #[arg(long)]
        name: String,

        /// Sender email
        #[arg(long)]
        email: String,

        /// Message body
        #[arg(long)]
        message: String,

        /// Path to the attachment file (optional)
        #[arg(long)]
        attachment: Option<PathBuf>,

        /// Use in-memory collaborators instead of the real services
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = DeskConfig::from_file(&cli.config).into_diagnostic()?;

    match cli.command {
        Command::Convert { amount, from, to } => {
            let table = config.rate_table();
            let Some(direction) = table.direction_for(&from, &to) else {
                bail!("unsupported currency pair: {from} -> {to}");
            };
            let request = ConversionRequest::from_input(&amount, direction);
            println!("{}", table.convert(&request));
        }
        Command::Submit {
            name,
            email,
            message,
            attachment,
            dry_run,
        } => {
            let pipeline = if dry_run {
                // In-memory collaborators: record instead of sending
                SubmissionPipeline::new(
                    Box::new(InMemoryMediaHost::new()),
                    Box::new(InMemoryNotifier::new()),
                )
            } else {
                let media_host: MediaHostBox = Box::new(
                    HttpMediaHost::new(&config.media_host_namespace, &config.media_host_preset)
                        .into_diagnostic()?,
                );
                let notifier: NotifierBox = Box::new(
                    HttpNotifier::new(
                        &config.notifier_service_id,
                        &config.notifier_template_id,
                        &config.notifier_key,
                    )
                    .into_diagnostic()?,
                );
                SubmissionPipeline::new(media_host, notifier)
            };

            // One submission at a time per pipeline instance
            if pipeline.is_busy() {
                bail!("a submission is already in flight");
            }

            let source: AttachmentSourceBox = Box::new(FileAttachmentSource::new(attachment));
            let asset = source.select().into_diagnostic()?;
            let request =
                SubmissionRequest::new(name, email, message, asset, config.recipient_label);

            let mut progress = pipeline.subscribe();
            let render = tokio::spawn(async move {
                while progress.changed().await.is_ok() {
                    match *progress.borrow_and_update() {
                        PipelineState::Uploading => eprintln!("uploading attachment..."),
                        PipelineState::Dispatching => eprintln!("sending message..."),
                        _ => break,
                    }
                }
            });

            let terminal = pipeline.execute(request).await;
            render.abort();

            match terminal {
                PipelineState::Succeeded => println!("message sent"),
                PipelineState::Failed(reason) => bail!("submission failed: {reason}"),
                // execute only returns terminal states
                state => bail!("unexpected pipeline state: {state:?}"),
            }
        }
    }

    Ok(())
}
