use asteroids_simulator::scenario;
use asteroids_simulator::simulation::{Input, Simulation, Turn};
use rand::Rng;
use rayon::prelude::*;
use test_log::test;

fn random_input(rng: &mut impl Rng) -> Input {
    let turn = match rng.gen_range(0..3) {
        0 => Turn::None,
        1 => Turn::Left,
        _ => Turn::Right,
    };
    Input {
        thrust: rng.gen_bool(0.3),
        turn,
    }
}

#[test]
fn test_fuzz() {
    (0..10u32).into_par_iter().for_each(|seed| {
        let mut rng = asteroids_simulator::rng::new_rng(seed);
        let mut sim = Simulation::new("belt", seed);
        for i in 0..200 {
            if i % 50 == 0 {
                sim.select_next();
            }
            sim.step(&random_input(&mut rng)).unwrap();
            if let Some(prediction) = sim.next_collision() {
                assert!(prediction.time.is_finite());
                assert!(sim.contains(prediction.other));
            }
            for &handle in sim.ships.iter() {
                let ship = sim.ship(handle);
                assert!(ship.x().is_finite() && ship.y().is_finite());
                assert!(ship.direction().abs() < std::f64::consts::TAU);
            }
        }
    });
}

#[test]
fn test_determinism() {
    for name in scenario::list() {
        let run = || {
            let mut sim = Simulation::new(&name, 7);
            let mut rng = asteroids_simulator::rng::new_rng(7);
            for _ in 0..100 {
                sim.step(&random_input(&mut rng)).unwrap();
            }
            sim.hash()
        };
        assert_eq!(run(), run(), "scenario {name} is not deterministic");
    }
}

#[test]
fn test_belt_seeds_differ() {
    let a = Simulation::new("belt", 1);
    let b = Simulation::new("belt", 2);
    assert_eq!(a.ships.len(), b.ships.len());
    assert_ne!(a.hash(), b.hash());
}
