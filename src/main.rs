use std::io::{self, Write};
use std::time::Duration;

use clap::{ArgGroup, Parser};

use birdwatch_core::{render, CoreError, ErrorExt};
use x_client::{profile_url_for, ChromeDriver, ScrapeConfig, Scraper};

#[derive(Debug, Parser)]
#[command(
    name = "birdwatch",
    version,
    about = "Scrape X/Twitter post and profile data by intercepting the page's own API calls",
    group(ArgGroup::new("target").required(true).args(["post", "user", "embed"]))
)]
struct Cli {
    /// Post URL to scrape
    #[arg(long, value_name = "URL")]
    post: Option<String>,

    /// User handle or profile URL to scrape
    #[arg(long, value_name = "HANDLE")]
    user: Option<String>,

    /// Post URL to fetch the public oEmbed payload for
    #[arg(long, value_name = "URL")]
    embed: Option<String>,

    /// Emit records as JSON instead of key/value text
    #[arg(long)]
    json: bool,

    /// Seconds to wait for the page content marker
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<(), CoreError> {
    tracing_subscriber::fmt()
        .with_env_filter("birdwatch=info,x_client=info")
        .init();

    let cli = Cli::parse();
    run(cli).await.map_err(|e| {
        tracing::error!(code = %e.error_code(), "{}", e.user_friendly_message());
        e
    })
}

async fn run(cli: Cli) -> Result<(), CoreError> {
    let config = ScrapeConfig {
        ready_timeout: Duration::from_secs(cli.timeout),
        ..ScrapeConfig::default()
    };

    if let Some(post_url) = &cli.post {
        let (driver, responses) = ChromeDriver::launch(&config).await?;
        let scraper = Scraper::new(driver, responses, config.ready_timeout);
        let records = scraper.scrape_post(post_url).await?;

        let mut stdout = io::stdout().lock();
        if cli.json {
            serde_json::to_writer_pretty(&mut stdout, &records)?;
            writeln!(stdout)?;
        } else {
            for record in &records {
                render::write_report(&mut stdout, &record.to_report())?;
            }
        }
    } else if let Some(target) = &cli.user {
        let url = profile_url_for(target);
        let (driver, responses) = ChromeDriver::launch(&config).await?;
        let scraper = Scraper::new(driver, responses, config.ready_timeout);

        match scraper.scrape_profile(&url).await? {
            Some(profile) => {
                let mut stdout = io::stdout().lock();
                if cli.json {
                    serde_json::to_writer_pretty(&mut stdout, &profile)?;
                    writeln!(stdout)?;
                } else {
                    render::write_report(&mut stdout, &profile.to_report())?;
                }
            }
            None => tracing::warn!(%url, "no profile data captured"),
        }
    } else if let Some(embed_url) = &cli.embed {
        let payload = x_client::embed::fetch_embed(embed_url).await?;
        let mut stdout = io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, &payload)?;
        writeln!(stdout)?;
    }

    Ok(())
}
