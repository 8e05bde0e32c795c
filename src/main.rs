use anyhow::Result;
use biotope_lib::model::config::AppConfig;
use biotope_lib::model::metrics::init_logging;
use biotope_lib::model::world::World;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Number of ticks to run. Stops early if the population dies out.
    #[arg(short, long, default_value_t = 10_000)]
    ticks: u64,

    /// Seed for every source of randomness
    #[arg(short, long)]
    seed: Option<u64>,

    /// Reseed the world stream every tick so runs replay exactly
    #[arg(long)]
    deterministic: bool,

    /// Directory for live.jsonl and lineages.json
    #[arg(short, long)]
    log_dir: Option<String>,

    /// Disable the telemetry log
    #[arg(long)]
    no_telemetry: bool,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = AppConfig::load_from(&args.config)?;
    if args.seed.is_some() {
        config.world.seed = args.seed;
    }
    if args.deterministic {
        config.world.deterministic = true;
    }
    if args.no_telemetry {
        config.telemetry.enabled = false;
    }
    if let Some(dir) = args.log_dir {
        config.telemetry.log_dir = dir;
    }

    let mut world = World::new(config)?;
    println!(
        "Running {} ticks with {} lifeforms in {} lineages...",
        args.ticks,
        world.get_population_count(),
        world.lineage_registry.len()
    );

    while world.tick < args.ticks {
        world.update()?;
        if world.get_population_count() == 0 {
            println!("Population died out at tick {}.", world.tick);
            break;
        }
    }

    if world.logger.is_enabled() {
        let path = format!("{}/lineages.json", world.log_dir);
        world.lineage_registry.save(&path)?;
    }

    let stats = &world.pop_stats;
    println!("Simulation finished at tick {}.", world.tick);
    println!("  population:       {}", stats.population);
    println!("  plants:           {}", stats.plant_count);
    println!(
        "  living lineages:  {} of {}",
        world.lineage_registry.living_lineages(),
        world.lineage_registry.len()
    );
    println!("  avg generation:   {:.2}", stats.avg_generation);
    println!("  avg death age:    {:.1}", stats.death_age_avg);
    println!("  births / deaths:  {} / {}", world.metrics.counter("births"), world.metrics.counter("deaths"));
    println!("  avg tick:         {:?}", world.metrics.average_tick());
    println!("Top lineages:");
    for record in world.lineage_registry.get_top_lineages(5) {
        println!(
            "  {:<12} produced {:>5}  alive {:>4}  peak {:>4}{}",
            record.id,
            record.total_produced,
            record.current_population,
            record.peak_population,
            if record.is_extinct { "  (extinct)" } else { "" }
        );
    }
    Ok(())
}
