use super::prelude::*;
use crate::rng::Scatter;

/// A seeded field of drifting ships.
pub struct Belt {
    pub count: usize,
    pub scatter: Scatter,
}

impl Belt {
    pub fn new() -> Self {
        Self {
            count: 20,
            scatter: Scatter {
                extent: 2000.0,
                mean_speed: 30.0,
                speed_stddev: 10.0,
                max_radius: 60.0,
            },
        }
    }
}

impl Scenario for Belt {
    fn name(&self) -> String {
        "belt".into()
    }

    fn human_name(&self) -> String {
        "Asteroid belt".into()
    }

    fn init(&mut self, sim: &mut Simulation, seed: u32) {
        let mut rng = new_rng(seed);
        for _ in 0..self.count {
            match self.scatter.sample(&mut rng) {
                Ok(ship) => {
                    sim.create_ship(ship);
                }
                Err(e) => log::warn!("Ship creation error: {}", e),
            }
        }
    }
}
