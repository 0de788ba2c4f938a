//! Ships moving at constant velocity on a plane, with analytic prediction of
//! when and where pairs of them will collide.
//!
//! [`ship::Ship`] holds the kinematic state of a single ship and
//! [`collision`] answers pairwise questions about two of them. The
//! [`simulation::Simulation`] driver owns a fleet, applies player input to the
//! selected ship once per tick and finds the next collision to display.

pub mod collision;
pub mod index_set;
pub mod rng;
pub mod scenario;
pub mod ship;
pub mod simulation;
pub mod snapshot;
