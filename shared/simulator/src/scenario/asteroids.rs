use super::prelude::*;

/// The stock three-ship fleet, all at rest.
pub struct Asteroids {}

impl Scenario for Asteroids {
    fn name(&self) -> String {
        "asteroids".into()
    }

    fn human_name(&self) -> String {
        "Asteroids".into()
    }

    fn init(&mut self, sim: &mut Simulation, _seed: u32) {
        add_ship(sim, 200.0, 400.0, 0.0, 0.0, 50.0);
        add_ship(sim, 700.0, 400.0, PI, 0.0, 50.0);
        add_ship(sim, 450.0, 600.0, -PI / 2.0, 0.0, 75.0);
    }
}
