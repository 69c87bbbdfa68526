use anyhow::Result;
use clap::Parser;
use reqwest::Client;
use wisales::{config::Args, logging, month::Month, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init();

    let settings = args.into_settings(Month::current())?;
    let client = Client::builder().build()?;

    run::run(&client, &settings).await?;
    Ok(())
}
