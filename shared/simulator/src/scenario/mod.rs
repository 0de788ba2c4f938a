mod asteroids;
mod belt;

use crate::ship::{Ship, ShipHandle};
use crate::simulation::Simulation;

pub mod prelude {
    pub use super::add_ship;
    pub use super::Scenario;
    pub use crate::rng::{new_rng, SeededRng};
    pub use crate::ship::{Ship, ShipHandle, MIN_RADIUS};
    pub use crate::simulation::Simulation;
    pub use rand::Rng;
    pub use std::f64::consts::{PI, TAU};
}

pub trait Scenario {
    fn name(&self) -> String;

    fn human_name(&self) -> String {
        self.name()
    }

    fn init(&mut self, sim: &mut Simulation, seed: u32);
}

/// Adds a ship to `sim`, logging and skipping it if the parameters are
/// rejected.
pub fn add_ship(
    sim: &mut Simulation,
    x: f64,
    y: f64,
    heading: f64,
    speed: f64,
    radius: f64,
) -> Option<ShipHandle> {
    match Ship::new(x, y, heading, speed, radius) {
        Ok(ship) => Some(sim.create_ship(ship)),
        Err(e) => {
            log::warn!("Ship creation error: {}", e);
            None
        }
    }
}

pub fn load_safe(name: &str) -> Option<Box<dyn Scenario>> {
    let scenario: Option<Box<dyn Scenario>> = match name {
        "test" => Some(Box::new(test::TestScenario {})),
        "head_on" => Some(Box::new(test::HeadOn {})),
        "asteroids" => Some(Box::new(asteroids::Asteroids {})),
        "belt" => Some(Box::new(belt::Belt::new())),
        _ => None,
    };
    if scenario.is_none() {
        log::warn!("Unknown scenario {:?}", name);
    }
    scenario
}

/// # Panics
///
/// Panics if `name` is not one of [`list`].
pub fn load(name: &str) -> Box<dyn Scenario> {
    match load_safe(name) {
        Some(scenario) => scenario,
        None => panic!("Unknown scenario {name:?}"),
    }
}

pub fn list() -> Vec<String> {
    vec!["asteroids", "belt", "head_on", "test"]
        .iter()
        .map(|x| x.to_string())
        .collect()
}
