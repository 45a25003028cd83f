use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
use self::args::Args;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default = if args.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let standings = yahtzee::cli_main(args.game_config(), args.seed, args.interactive)?;
    if args.json {
        serde_json::to_writer_pretty(std::io::stdout(), &standings)?;
        println!();
    } else {
        for standing in &standings {
            println!("{standing}");
        }
    }
    Ok(())
}
