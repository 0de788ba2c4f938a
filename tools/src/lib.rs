use asteroids_simulator::scenario;
use asteroids_simulator::simulation::{Simulation, SimulationConfig};
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use std::path::Path;

/// Reads a JSON driver configuration, falling back to the defaults for any
/// missing field or when no path is given.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<SimulationConfig> {
    let path = match path {
        Some(path) => path,
        None => return Ok(SimulationConfig::default()),
    };
    log::info!("Reading config {:?}", path);
    let text = std::fs::read_to_string(path)?;
    let config: SimulationConfig = serde_json::from_str(&text)?;
    if !(config.tick_length > 0.0) {
        anyhow::bail!("tick_length must be positive, got {}", config.tick_length);
    }
    Ok(config)
}

pub fn create_simulation(
    scenario_name: &str,
    seed: u32,
    config: SimulationConfig,
) -> anyhow::Result<Simulation> {
    if scenario::load_safe(scenario_name).is_none() {
        anyhow::bail!(
            "Unknown scenario {:?}, expected one of {:?}",
            scenario_name,
            scenario::list()
        );
    }
    Ok(Simulation::with_config(scenario_name, seed, config))
}

fn format_time(t: f64) -> String {
    if t.is_finite() {
        format!("{t:.3}")
    } else {
        "never".to_string()
    }
}

/// Pairwise distances and collision predictions for every pair of ships.
pub fn collision_table(sim: &Simulation) -> Table {
    let handles: Vec<_> = sim.ships.iter().copied().collect();
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["a", "b", "distance", "overlap", "time", "contact"]);
    for (i, &a) in handles.iter().enumerate() {
        for (j, &b) in handles.iter().enumerate().skip(i + 1) {
            let contact = sim
                .collision_position(a, b)
                .map(|p| format!("({:.1}, {:.1})", p.x, p.y))
                .unwrap_or_default();
            table.add_row(vec![
                i.to_string(),
                j.to_string(),
                format!("{:.3}", sim.distance_between(a, b)),
                sim.overlap(a, b).to_string(),
                format_time(sim.time_to_collision(a, b)),
                contact,
            ]);
        }
    }
    table
}
