use clap::Parser;
use env_logger::Env;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = sipcalc::api::Cli::parse();
    if let Err(e) = sipcalc::api::run_cli(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
