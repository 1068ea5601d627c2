use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use herald_core::bootstrap::Services;
use herald_core::domain::TemplateRef;
use herald_core::{telemetry, Channel, Config, DispatchRequest, TemplateContext};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "herald", version, about = "Templated multi-channel notification dispatcher")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Dispatch one message
    Send(SendArgs),
    /// Render a template to stdout without sending anything
    Render(RenderArgs),
}

#[derive(Args)]
struct SendArgs {
    /// Recipient address (repeatable)
    #[arg(long = "to", required = true)]
    to: Vec<String>,

    #[arg(long)]
    subject: String,

    /// Plain body, or fallback text placed before the template
    #[arg(long)]
    body: Option<String>,

    /// Template identifier
    #[arg(long)]
    template: Option<String>,

    /// Placeholder value as key=value (repeatable)
    #[arg(long = "var", value_parser = parse_var)]
    vars: Vec<(String, String)>,

    /// File to attach (repeatable)
    #[arg(long = "attach")]
    attachments: Vec<PathBuf>,

    /// Delivery channel: email or sms
    #[arg(long, default_value = "email", value_parser = parse_channel)]
    channel: Channel,

    /// Wait this many seconds before dispatching
    #[arg(long)]
    delay_secs: Option<u64>,
}

#[derive(Args)]
struct RenderArgs {
    /// Template identifier
    template: String,

    /// Placeholder value as key=value (repeatable)
    #[arg(long = "var", value_parser = parse_var)]
    vars: Vec<(String, String)>,
}

fn parse_var(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

fn parse_channel(raw: &str) -> std::result::Result<Channel, String> {
    match raw.to_lowercase().as_str() {
        "email" => Ok(Channel::Email),
        "sms" => Ok(Channel::Sms),
        other => Err(format!("unknown channel '{}'", other)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = Config::from_env()?;
    telemetry::init(&config.telemetry);

    let services = Services::build(&config)?;

    match cli.command {
        Command::Send(args) => send(&services, args).await,
        Command::Render(args) => render(&services, args).await,
    }
}

async fn send(services: &Services, args: SendArgs) -> Result<()> {
    let mut request = DispatchRequest::new(args.to, args.subject)
        .with_channel(args.channel)
        .with_attachments(args.attachments);

    if let Some(body) = args.body {
        request = request.with_body(body);
    }
    if let Some(template) = args.template {
        request = request.with_template(template, args.vars.into_iter().collect());
    }

    let receipt = match args.delay_secs {
        Some(secs) => {
            info!(delay_secs = secs, "Waiting before dispatch");
            services
                .timer
                .schedule(request, Duration::from_secs(secs))
                .outcome()
                .await
                .context("Delayed dispatch failed")?
        }
        None => services
            .dispatcher
            .dispatch(&request)
            .await
            .context("Dispatch failed")?,
    };

    println!(
        "dispatched {} to {} recipient(s) with {} attachment(s)",
        receipt.dispatch_id, receipt.recipients, receipt.attachments
    );
    Ok(())
}

async fn render(services: &Services, args: RenderArgs) -> Result<()> {
    let context: TemplateContext = args.vars.into_iter().collect();
    let rendered = services
        .renderer
        .render(&TemplateRef {
            id: args.template,
            context,
        })
        .await
        .context("Render failed")?;

    println!("{}", rendered);
    Ok(())
}
