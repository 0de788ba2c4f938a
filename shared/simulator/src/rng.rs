use crate::ship::{self, Ship, MIN_RADIUS};
use rand::Rng;
use rand_distr::StandardNormal;
use std::f64::consts::TAU;

pub use rand_chacha::ChaCha8Rng as SeededRng;

/// Deterministic generator for scenario set-up; the same seed always yields
/// the same fleet.
pub fn new_rng(seed: u32) -> SeededRng {
    rand_seeder::Seeder::from(seed).make_rng()
}

/// Parameters for scattering drifting ships over a square.
#[derive(Clone, Debug)]
pub struct Scatter {
    /// Half-width of the square, centered on the origin.
    pub extent: f64,
    pub mean_speed: f64,
    pub speed_stddev: f64,
    pub max_radius: f64,
}

impl Scatter {
    /// Samples one ship. Speeds are folded to be non-negative.
    pub fn sample(&self, rng: &mut SeededRng) -> Result<Ship, ship::Error> {
        let e = self.extent;
        let x = rng.gen_range(-e..e);
        let y = rng.gen_range(-e..e);
        let heading = rng.gen_range(0.0..TAU);
        let z: f64 = rng.sample(StandardNormal);
        let speed = (self.mean_speed + self.speed_stddev * z).abs();
        let radius = rng.gen_range(MIN_RADIUS..self.max_radius.max(MIN_RADIUS + 1.0));
        Ship::new(x, y, heading, speed, radius)
    }
}
