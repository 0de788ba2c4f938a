use asteroids_simulator::simulation::{Input, Turn};
use clap::Parser as _;
use std::path::PathBuf;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq)]
enum TurnArg {
    None,
    Left,
    Right,
}

impl From<TurnArg> for Turn {
    fn from(turn: TurnArg) -> Turn {
        match turn {
            TurnArg::None => Turn::None,
            TurnArg::Left => Turn::Left,
            TurnArg::Right => Turn::Right,
        }
    }
}

#[derive(clap::Parser, Debug)]
struct Arguments {
    #[clap(short, long, value_parser, default_value = "asteroids")]
    scenario: String,

    #[clap(long, value_parser, default_value = "0")]
    seed: u32,

    #[clap(short, long, value_parser, default_value = "300")]
    ticks: u32,

    /// Thrust the selected ship for this many ticks at the start.
    #[clap(long, value_parser, default_value = "0")]
    thrust_ticks: u32,

    /// Turn held for the first `turn_ticks` ticks.
    #[clap(long, value_enum, default_value = "none")]
    turn: TurnArg,

    #[clap(long, value_parser, default_value = "0")]
    turn_ticks: u32,

    /// Select the n-th ship (in creation order) before starting.
    #[clap(long, value_parser, default_value = "0")]
    select: usize,

    #[clap(long, value_parser, default_value = "30")]
    report_every: u32,

    /// JSON file overriding the driver configuration.
    #[clap(long, value_parser)]
    config: Option<PathBuf>,

    /// Print the final snapshot as JSON instead of a table.
    #[clap(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("headless=info"))
        .init();

    let args = Arguments::parse();
    let config = asteroids_tools::load_config(args.config.as_deref())?;
    let mut sim = asteroids_tools::create_simulation(&args.scenario, args.seed, config)?;

    for _ in 0..args.select {
        sim.select_next();
    }
    log::info!(
        "Running {:?} with {} ships for {} ticks",
        args.scenario,
        sim.ships.len(),
        args.ticks
    );

    for tick in 0..args.ticks {
        let input = Input {
            thrust: tick < args.thrust_ticks,
            turn: if tick < args.turn_ticks {
                args.turn.into()
            } else {
                Turn::None
            },
        };
        sim.step(&input)?;

        if args.report_every > 0 && sim.tick() % args.report_every == 0 {
            match sim.next_collision() {
                Some(prediction) => log::info!(
                    "t={:.2} collision with {:?} in {:.3}s at ({:.1}, {:.1})",
                    sim.time(),
                    prediction.other,
                    prediction.time,
                    prediction.contact.x,
                    prediction.contact.y
                ),
                None => log::info!("t={:.2} no collision predicted", sim.time()),
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sim.snapshot())?);
    } else {
        println!("{}", asteroids_tools::collision_table(&sim));
    }
    Ok(())
}
