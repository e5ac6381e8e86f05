use agrigenome_lib::app::App;
use agrigenome_lib::model::config::AppConfig;
use agrigenome_lib::model::metrics::init_logging;
use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "agrigenome.toml")]
    config: String,

    /// Number of ticks to simulate (overrides the config)
    #[arg(short, long)]
    ticks: Option<u64>,

    /// RNG seed (overrides the config)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the final census as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)?;
    if let Some(seed) = args.seed {
        config.field.seed = Some(seed);
    }
    let ticks = args.ticks.unwrap_or(config.field.ticks);

    let mut app = App::new(config)?;
    let spawned = app.run(ticks)?;
    let census = app.census();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&census)?);
        return Ok(());
    }

    println!("Ticks: {}  Descendants: {}", census.tick, spawned);
    println!("Cross-crop slots left: {}", census.cross_slots);
    println!("Mature crops: {}", census.mature);
    for (plant, count) in &census.species {
        println!("  {plant:<12} {count}");
    }
    Ok(())
}
