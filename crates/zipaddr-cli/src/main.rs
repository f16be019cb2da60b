use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use zipaddr_lookup::{encode_query, lookup, LookupConfig, LookupRequest, LookupView};

#[derive(Debug, Parser)]
#[command(name = "zipaddr-cli")]
#[command(about = "Look up Japanese addresses by postal code")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Query the upstream service once and print the result
    Lookup {
        /// Postal code as entered, e.g. 1000001
        zipcode: String,
        /// Print the rendered view as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the encoded query string without contacting upstream
    Query { zipcode: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = zipaddr_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Lookup { zipcode, json } => {
            let lookup_config = LookupConfig::from_app_config(&config);
            let view = lookup(&lookup_config, LookupRequest::new(zipcode)).await;
            print_view(&view, json)?;
        }
        Commands::Query { zipcode } => println!("{}", encode_query(&zipcode)),
    }

    Ok(())
}

fn print_view(view: &LookupView, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&view.render())?);
    } else {
        println!("query:    {}", view.query);
        for line in view.to_lines() {
            println!("{line}");
        }
    }
    Ok(())
}
