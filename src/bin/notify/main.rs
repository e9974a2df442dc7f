#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    missing_docs,
    rustdoc::broken_intra_doc_links,
    rustdoc::missing_crate_level_docs
)]

//! Sends one form notification described by a JSON submission file

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use form_mailer::{
    domain::{
        communication::mailer::TransportSettings,
        messages::{HostUrls, MessageProcessor, MessageProcessorImpl},
    },
    infrastructure::{
        catalog::JsonCatalog,
        email::smtp::{SMTPConfig, SMTPMailer},
        fields::DefaultFieldProvider,
    },
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use submission::Submission;

mod submission;

/// Command-line arguments / environment variables
#[derive(Debug, Parser)]
pub struct Args {
    /// Public URL of the site, used to make links absolute
    #[clap(long, env = "SERVER_URL")]
    pub server_url: String,

    /// JSON item catalog
    #[clap(long, env = "ITEM_CATALOG")]
    pub catalog: PathBuf,

    /// JSON submission to send
    #[clap(long)]
    pub submission: PathBuf,

    /// The SMTP configuration
    #[clap(flatten)]
    pub smtp: SMTPConfig,
}

#[mutants::skip]
#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = dotenv {
        debug!("no .env loaded: {}", e);
    }

    let args = Args::parse();

    let catalog = Arc::new(JsonCatalog::load(&args.catalog).await?);
    let submission = Submission::load(&args.submission).await?;
    let (mut draft, fields) = submission.into_draft(TransportSettings::from(&args.smtp));

    let processor = MessageProcessorImpl::new(
        HostUrls::new(&args.server_url)?,
        catalog.clone(),
        Arc::new(DefaultFieldProvider),
        catalog.clone(),
        catalog,
        Arc::new(SMTPMailer::new(&args.smtp)),
    );

    processor.process(&mut draft, &fields).await?;

    info!("notification sent");

    Ok(())
}
