use crate::collision;
use crate::index_set::{Arena, HasIndex, IndexSet};
use crate::scenario;
use crate::ship::{self, Ship, ShipHandle};
use crate::snapshot::{CollisionSnapshot, ShipSnapshot, Snapshot};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

pub const TICK_LENGTH: f64 = 1.0 / 30.0;
pub const THRUST_PER_SECOND: f64 = 150.0;
pub const TURN_PER_TICK: f64 = PI / 20.0;

/// Tunables for the per-tick driver.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seconds advanced by [`Simulation::step`].
    pub tick_length: f64,
    /// Speed gained per second while thrusting, in km/s².
    pub thrust_per_second: f64,
    /// Radians turned per tick while a turn is held.
    pub turn_per_tick: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_length: TICK_LENGTH,
            thrust_per_second: THRUST_PER_SECOND,
            turn_per_tick: TURN_PER_TICK,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    #[default]
    None,
    /// Counter-clockwise.
    Left,
    Right,
}

/// Controls applied to the selected ship for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub thrust: bool,
    pub turn: Turn,
}

impl Input {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn thrust() -> Self {
        Self {
            thrust: true,
            turn: Turn::None,
        }
    }

    pub fn turn(turn: Turn) -> Self {
        Self {
            thrust: false,
            turn,
        }
    }
}

/// The soonest upcoming collision involving the selected ship.
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionPrediction {
    pub other: ShipHandle,
    pub time: f64,
    /// Center of the selected ship at the moment of contact.
    pub selected_position: Point2<f64>,
    /// Center of the other ship at the moment of contact.
    pub other_position: Point2<f64>,
    pub contact: Point2<f64>,
}

pub struct Simulation {
    pub ships: IndexSet<ShipHandle>,
    ship_data: Arena<Ship>,
    selected: Option<ShipHandle>,
    config: SimulationConfig,
    scenario_name: String,
    tick: u32,
    time: f64,
    seed: u32,
}

impl Simulation {
    /// Creates a simulation populated by the named scenario.
    ///
    /// # Panics
    ///
    /// Panics if the scenario is unknown; see [`scenario::load_safe`].
    pub fn new(scenario_name: &str, seed: u32) -> Simulation {
        Simulation::with_config(scenario_name, seed, SimulationConfig::default())
    }

    pub fn with_config(scenario_name: &str, seed: u32, config: SimulationConfig) -> Simulation {
        log::info!("scenario {scenario_name} seed {seed}");
        let mut sim = Simulation {
            ships: IndexSet::new(),
            ship_data: Arena::new(),
            selected: None,
            config,
            scenario_name: scenario_name.to_string(),
            tick: 0,
            time: 0.0,
            seed,
        };

        let mut scenario = scenario::load(scenario_name);
        scenario.init(&mut sim, seed);
        sim
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn scenario_name(&self) -> &str {
        &self.scenario_name
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Adds a ship. The first ship added becomes the selection.
    pub fn create_ship(&mut self, ship: Ship) -> ShipHandle {
        let handle = ShipHandle(self.ship_data.insert(ship));
        self.ships.insert(handle);
        if self.selected.is_none() {
            self.selected = Some(handle);
        }
        log::debug!("created ship {:?}", handle);
        handle
    }

    /// Removes a ship, moving the selection on if it was selected.
    pub fn remove_ship(&mut self, handle: ShipHandle) -> Option<Ship> {
        if self.selected == Some(handle) {
            self.selected = self
                .ships
                .next_after(handle)
                .filter(|&next| next != handle);
        }
        self.ships.remove(handle);
        self.ship_data.remove(handle.index())
    }

    pub fn contains(&self, handle: ShipHandle) -> bool {
        self.ships.contains(handle)
    }

    pub fn get_ship(&self, handle: ShipHandle) -> Option<&Ship> {
        self.ship_data.get(handle.index())
    }

    /// # Panics
    ///
    /// Panics if the ship has been removed.
    pub fn ship(&self, handle: ShipHandle) -> &Ship {
        match self.ship_data.get(handle.index()) {
            Some(ship) => ship,
            None => panic!("Unknown ship {handle:?}"),
        }
    }

    /// # Panics
    ///
    /// Panics if the ship has been removed.
    pub fn ship_mut(&mut self, handle: ShipHandle) -> &mut Ship {
        match self.ship_data.get_mut(handle.index()) {
            Some(ship) => ship,
            None => panic!("Unknown ship {handle:?}"),
        }
    }

    pub fn selected(&self) -> Option<ShipHandle> {
        self.selected
    }

    pub fn select(&mut self, handle: ShipHandle) {
        if self.ships.contains(handle) {
            self.selected = Some(handle);
        } else {
            log::warn!("Ignoring selection of unknown ship {:?}", handle);
        }
    }

    /// Moves the selection to the next ship in creation order.
    pub fn select_next(&mut self) -> Option<ShipHandle> {
        self.selected = match self.selected {
            Some(handle) => self.ships.next_after(handle),
            None => self.ships.first(),
        };
        log::debug!("selected {:?}", self.selected);
        self.selected
    }

    /// Runs one tick of the configured length.
    pub fn step(&mut self, input: &Input) -> Result<(), ship::Error> {
        self.step_by(self.config.tick_length, input)
    }

    /// Runs one tick of `dt` seconds.
    ///
    /// The input is applied to the selected ship first, then every ship moves.
    /// Nothing changes if `dt` is rejected.
    pub fn step_by(&mut self, dt: f64, input: &Input) -> Result<(), ship::Error> {
        ship::check_duration(dt)?;

        if let Some(handle) = self.selected {
            let thrust = self.config.thrust_per_second * dt;
            let angle = match input.turn {
                Turn::None => 0.0,
                Turn::Left => self.config.turn_per_tick,
                Turn::Right => -self.config.turn_per_tick,
            };
            let ship = self.ship_mut(handle);
            if input.thrust {
                ship.thrust(thrust);
            }
            if angle != 0.0 {
                ship.turn(angle);
            }
        }

        for handle in self.ships.iter() {
            if let Some(ship) = self.ship_data.get_mut(handle.index()) {
                ship.advance(dt)?;
            }
        }

        self.tick += 1;
        self.time += dt;
        Ok(())
    }

    pub fn distance_between(&self, a: ShipHandle, b: ShipHandle) -> f64 {
        collision::distance_between(self.ship(a), self.ship(b))
    }

    pub fn overlap(&self, a: ShipHandle, b: ShipHandle) -> bool {
        collision::overlap(self.ship(a), self.ship(b))
    }

    pub fn time_to_collision(&self, a: ShipHandle, b: ShipHandle) -> f64 {
        collision::time_to_collision(self.ship(a), self.ship(b))
    }

    pub fn collision_position(&self, a: ShipHandle, b: ShipHandle) -> Option<Point2<f64>> {
        collision::collision_position(self.ship(a), self.ship(b))
    }

    /// Finds the ship the selection will hit first.
    ///
    /// Returns `None` when nothing is selected, nothing is on a collision
    /// course, or the selection already overlaps the nearest candidate.
    pub fn next_collision(&self) -> Option<CollisionPrediction> {
        let selected = self.selected?;
        let mut first: Option<(ShipHandle, f64)> = None;
        for &handle in self.ships.iter() {
            let t = self.time_to_collision(selected, handle);
            if t < first.map_or(f64::INFINITY, |(_, min)| min) {
                first = Some((handle, t));
            }
        }

        let (other, time) = first?;
        if self.overlap(selected, other) {
            return None;
        }
        let a = self.ship(selected);
        let b = self.ship(other);
        Some(CollisionPrediction {
            other,
            time,
            selected_position: (a.position() + a.velocity() * time).into(),
            other_position: (b.position() + b.velocity() * time).into(),
            contact: collision::collision_position(a, b)?,
        })
    }

    /// Contact points between the selection and every ship it does not
    /// currently overlap.
    pub fn collision_markers(&self) -> Vec<(ShipHandle, Point2<f64>)> {
        let selected = match self.selected {
            Some(handle) => handle,
            None => return vec![],
        };
        self.ships
            .iter()
            .filter(|&&handle| !self.overlap(selected, handle))
            .filter_map(|&handle| {
                self.collision_position(selected, handle)
                    .map(|p| (handle, p))
            })
            .collect()
    }

    pub fn hash(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::Hasher;
        let fixedpoint = |v: f64| (v * 1e9) as i64;
        let mut s = DefaultHasher::new();
        for &handle in self.ships.iter() {
            let ship = self.ship(handle);
            s.write_i64(fixedpoint(ship.x()));
            s.write_i64(fixedpoint(ship.y()));
            s.write_i64(fixedpoint(ship.direction()));
            s.write_i64(fixedpoint(ship.speed()));
            s.write_i64(fixedpoint(ship.radius()));
        }
        s.finish()
    }

    pub fn snapshot(&self) -> Snapshot {
        let ships = self
            .ships
            .iter()
            .map(|&handle| {
                let ship = self.ship(handle);
                ShipSnapshot {
                    id: handle.into(),
                    position: ship.position().into(),
                    velocity: ship.velocity(),
                    heading: ship.direction(),
                    speed: ship.speed(),
                    radius: ship.radius(),
                }
            })
            .collect();

        Snapshot {
            tick: self.tick,
            time: self.time,
            selected: self.selected.map(|handle| handle.into()),
            ships,
            next_collision: self.next_collision().map(|prediction| CollisionSnapshot {
                other: prediction.other.into(),
                time: prediction.time,
                contact: prediction.contact,
            }),
        }
    }
}
