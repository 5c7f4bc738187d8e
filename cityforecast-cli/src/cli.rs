use cityforecast_core::OpenWeatherClient;
use clap::Parser;
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

use crate::session::Session;

/// Top-level CLI struct. The tool takes no flags; everything happens
/// through the prompt loop.
#[derive(Debug, Parser)]
#[command(name = "cityforecast", version, about = "Interactive 5-day forecast lookup by city name")]
pub struct Cli {}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        init_tracing();

        let provider = OpenWeatherClient::new();
        let input = BufReader::new(tokio::io::stdin());
        let mut session = Session::new(Box::new(provider), input, std::io::stdout());

        tokio::select! {
            res = session.run() => res?,
            _ = tokio::signal::ctrl_c() => {
                // A pending stdin read would stall runtime shutdown, so
                // leave as soon as the farewell is out.
                println!("\nGoodbye!");
                std::process::exit(0);
            }
        }

        // Input ran dry (ctrl-d); same farewell as an interrupt.
        println!("\nGoodbye!");
        Ok(())
    }
}

/// Honor `RUST_LOG` when set, stay quiet otherwise.
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init();
}
