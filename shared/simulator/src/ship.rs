use crate::index_set::{HasIndex, Index};
use nalgebra::{vector, Vector2};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Smallest radius a ship can have, in kilometers.
pub const MIN_RADIUS: f64 = 10.0;
/// Upper bound on ship speed, in kilometers per second.
pub const LIGHTSPEED: f64 = 299_800.0;

#[derive(Hash, PartialEq, Eq, Copy, Clone, Debug)]
pub struct ShipHandle(pub Index);

impl HasIndex for ShipHandle {
    fn index(self) -> Index {
        self.0
    }
}

impl From<ShipHandle> for u64 {
    fn from(handle: ShipHandle) -> u64 {
        let (idx, gen) = handle.0.into_raw_parts();
        ((gen as u64) << 32) | idx as u64
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid ship state: {0}")]
    InvalidState(String),

    #[error("Negative duration: {0}")]
    NegativeDuration(f64),

    #[error("Infinite duration: {0}")]
    InfiniteDuration(f64),
}

/// A circular ship moving at constant velocity.
///
/// Positions and radii are in kilometers, speeds in kilometers per second and
/// headings in radians. Velocity is not stored; it is derived from the scalar
/// speed and the heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ShipData", into = "ShipData")]
pub struct Ship {
    position: Vector2<f64>,
    heading: f64,
    speed: f64,
    radius: f64,
}

/// Serialized form of [`Ship`]. Decoding goes through [`Ship::new`].
#[derive(Serialize, Deserialize)]
struct ShipData {
    position: Vector2<f64>,
    heading: f64,
    speed: f64,
    radius: f64,
}

impl TryFrom<ShipData> for Ship {
    type Error = Error;

    fn try_from(data: ShipData) -> Result<Ship, Error> {
        if !(0.0..=LIGHTSPEED).contains(&data.speed) {
            return Err(Error::InvalidState(format!(
                "speed {} is out of range",
                data.speed
            )));
        }
        if !(data.radius >= MIN_RADIUS) {
            return Err(Error::InvalidState(format!(
                "radius {} is below {MIN_RADIUS}",
                data.radius
            )));
        }
        Ship::new(
            data.position.x,
            data.position.y,
            data.heading,
            data.speed,
            data.radius,
        )
    }
}

impl From<Ship> for ShipData {
    fn from(ship: Ship) -> ShipData {
        ShipData {
            position: ship.position,
            heading: ship.heading,
            speed: ship.speed,
            radius: ship.radius,
        }
    }
}

impl Ship {
    /// Creates a ship at `(x, y)` facing `heading` and moving at `speed`.
    ///
    /// The position must be finite and the radius must not be negative or
    /// NaN. A radius below [`MIN_RADIUS`] is raised to it and the speed is
    /// clamped to `[0, LIGHTSPEED]`.
    pub fn new(x: f64, y: f64, heading: f64, speed: f64, radius: f64) -> Result<Ship, Error> {
        if !x.is_finite() || !y.is_finite() {
            return Err(Error::InvalidState(format!(
                "position ({x}, {y}) is not finite"
            )));
        }
        if !heading.is_finite() {
            return Err(Error::InvalidState(format!(
                "heading {heading} is not finite"
            )));
        }
        if speed.is_nan() {
            return Err(Error::InvalidState("speed is NaN".to_string()));
        }
        if radius.is_nan() || radius < 0.0 || radius.is_infinite() {
            return Err(Error::InvalidState(format!("radius {radius} is invalid")));
        }
        Ok(Ship {
            position: vector![x, y],
            heading,
            speed: speed.clamp(0.0, LIGHTSPEED),
            radius: radius.max(MIN_RADIUS),
        })
    }

    /// Creates a ship from cartesian velocity components.
    ///
    /// The heading is taken from the direction of the velocity, so a ship
    /// created with zero velocity faces along +x.
    pub fn with_velocity(x: f64, y: f64, vx: f64, vy: f64, radius: f64) -> Result<Ship, Error> {
        if !vx.is_finite() || !vy.is_finite() {
            return Err(Error::InvalidState(format!(
                "velocity ({vx}, {vy}) is not finite"
            )));
        }
        Ship::new(x, y, vy.atan2(vx), vx.hypot(vy), radius)
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn position(&self) -> Vector2<f64> {
        self.position
    }

    pub fn velocity(&self) -> Vector2<f64> {
        vector![self.velocity_x(), self.velocity_y()]
    }

    pub fn velocity_x(&self) -> f64 {
        self.speed * self.heading.cos()
    }

    pub fn velocity_y(&self) -> f64 {
        self.speed * self.heading.sin()
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn direction(&self) -> f64 {
        self.heading
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Sets the speed, ignoring values outside `[0, LIGHTSPEED]`.
    pub fn set_speed(&mut self, speed: f64) {
        if (0.0..=LIGHTSPEED).contains(&speed) {
            self.speed = speed;
        }
    }

    pub fn is_valid_direction(angle: f64) -> bool {
        angle > -TAU && angle < TAU
    }

    /// Moves the ship along its velocity for `duration` seconds.
    pub fn advance(&mut self, duration: f64) -> Result<(), Error> {
        check_duration(duration)?;
        self.position += self.velocity() * duration;
        Ok(())
    }

    /// Adds `amount` to the speed along the current heading.
    ///
    /// Negative amounts have no effect; the result saturates at [`LIGHTSPEED`].
    pub fn thrust(&mut self, amount: f64) {
        if amount < 0.0 {
            return;
        }
        let speed = self.speed + amount;
        if speed > LIGHTSPEED {
            self.set_speed(LIGHTSPEED);
        } else {
            self.set_speed(speed);
        }
    }

    /// Rotates the heading by `angle` radians.
    ///
    /// `angle` is expected to lie within (-2π, 2π). The resulting heading is
    /// reduced by whole turns into (-2π, 2π); it is not wrapped into [0, 2π).
    pub fn turn(&mut self, angle: f64) {
        if !angle.is_finite() {
            return;
        }
        let mut heading = self.heading + angle;
        if !Ship::is_valid_direction(heading) {
            heading %= TAU;
        }
        self.heading = heading;
    }
}

/// Accepts any finite, non-negative time step.
pub fn check_duration(duration: f64) -> Result<(), Error> {
    // Also catches NaN.
    if !(duration >= 0.0) {
        return Err(Error::NegativeDuration(duration));
    }
    if duration.is_infinite() {
        return Err(Error::InfiniteDuration(duration));
    }
    Ok(())
}

impl Default for Ship {
    fn default() -> Ship {
        Ship {
            position: vector![0.0, 0.0],
            heading: 0.0,
            speed: 0.0,
            radius: MIN_RADIUS,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;
    use test_log::test;

    #[test]
    fn test_default() {
        let ship = Ship::default();
        assert_eq!(ship, Ship::new(0.0, 0.0, 0.0, 0.0, MIN_RADIUS).unwrap());
        assert_eq!(ship.radius(), 10.0);
        assert_eq!(ship.speed(), 0.0);
    }

    #[test]
    fn test_invalid_construction() {
        assert!(matches!(
            Ship::new(f64::NAN, 0.0, 0.0, 0.0, 20.0),
            Err(Error::InvalidState(_))
        ));
        assert!(matches!(
            Ship::new(0.0, f64::INFINITY, 0.0, 0.0, 20.0),
            Err(Error::InvalidState(_))
        ));
        assert!(matches!(
            Ship::new(0.0, 0.0, 0.0, 0.0, -20.0),
            Err(Error::InvalidState(_))
        ));
        assert!(matches!(
            Ship::new(0.0, 0.0, 0.0, 0.0, f64::NAN),
            Err(Error::InvalidState(_))
        ));
    }

    #[test]
    fn test_clamped_construction() {
        assert_eq!(Ship::new(0.0, 0.0, 0.0, 0.0, 5.0).unwrap().radius(), MIN_RADIUS);
        assert_eq!(Ship::new(0.0, 0.0, 0.0, 0.0, 0.0).unwrap().radius(), MIN_RADIUS);
        assert_eq!(Ship::new(0.0, 0.0, PI, -10.0, 20.0).unwrap().speed(), 0.0);
        assert_eq!(
            Ship::new(0.0, 0.0, 0.0, 1e9, 20.0).unwrap().speed(),
            LIGHTSPEED
        );
    }

    #[test]
    fn test_velocity_components() {
        let ship = Ship::new(0.0, 0.0, PI / 2.0, 50.0, 20.0).unwrap();
        assert_abs_diff_eq!(ship.velocity_x(), 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(ship.velocity_y(), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_set_speed_out_of_range() {
        let mut ship = Ship::new(0.0, 0.0, 0.0, 100.0, 20.0).unwrap();
        ship.set_speed(-1.0);
        assert_eq!(ship.speed(), 100.0);
        ship.set_speed(LIGHTSPEED + 1.0);
        assert_eq!(ship.speed(), 100.0);
        ship.set_speed(f64::NAN);
        assert_eq!(ship.speed(), 100.0);
        ship.set_speed(LIGHTSPEED);
        assert_eq!(ship.speed(), LIGHTSPEED);
    }

    #[test]
    fn test_advance_rejects_bad_duration() {
        let mut ship = Ship::new(1.0, 2.0, 0.0, 10.0, 20.0).unwrap();
        assert_eq!(ship.advance(-1.0), Err(Error::NegativeDuration(-1.0)));
        assert!(matches!(
            ship.advance(f64::NAN),
            Err(Error::NegativeDuration(_))
        ));
        assert_eq!(
            ship.advance(f64::INFINITY),
            Err(Error::InfiniteDuration(f64::INFINITY))
        );
        assert_eq!(ship.position(), vector![1.0, 2.0]);
    }

    #[test]
    fn test_deserialize_validates() {
        let ship: Ship = serde_json::from_str(
            r#"{"position":[1.0,2.0],"heading":0.5,"speed":30.0,"radius":20.0}"#,
        )
        .unwrap();
        assert_eq!(ship, Ship::new(1.0, 2.0, 0.5, 30.0, 20.0).unwrap());

        let json = serde_json::to_string(&ship).unwrap();
        assert_eq!(serde_json::from_str::<Ship>(&json).unwrap(), ship);

        assert!(serde_json::from_str::<Ship>(
            r#"{"position":[0.0,0.0],"heading":0.0,"speed":-5.0,"radius":0.0}"#
        )
        .is_err());
        assert!(serde_json::from_str::<Ship>(
            r#"{"position":[0.0,0.0],"heading":0.0,"speed":5.0,"radius":0.0}"#
        )
        .is_err());
        assert!(serde_json::from_str::<Ship>(
            r#"{"position":[0.0,0.0],"heading":0.0,"speed":1e9,"radius":20.0}"#
        )
        .is_err());
    }

    #[test]
    fn test_turn_wraps() {
        let mut ship = Ship::new(0.0, 0.0, 6.0, 0.0, 20.0).unwrap();
        ship.turn(1.0);
        assert_abs_diff_eq!(ship.direction(), 7.0 - TAU, epsilon = 1e-12);

        let mut ship = Ship::new(0.0, 0.0, -6.0, 0.0, 20.0).unwrap();
        ship.turn(-1.0);
        assert_abs_diff_eq!(ship.direction(), -7.0 + TAU, epsilon = 1e-12);
    }

    #[test]
    fn test_turn_keeps_negative_headings() {
        let mut ship = Ship::default();
        ship.turn(-PI / 2.0);
        assert_abs_diff_eq!(ship.direction(), -PI / 2.0);
    }

    #[test]
    fn test_turn_full_circle() {
        let mut ship = Ship::new(0.0, 0.0, PI, 0.0, 20.0).unwrap();
        ship.turn(PI);
        assert!(Ship::is_valid_direction(ship.direction()));
        assert_abs_diff_eq!(ship.direction(), 0.0);
    }

    #[test]
    fn test_turn_ignores_non_finite() {
        let mut ship = Ship::new(0.0, 0.0, 1.0, 0.0, 20.0).unwrap();
        ship.turn(f64::NAN);
        ship.turn(f64::INFINITY);
        assert_eq!(ship.direction(), 1.0);
    }
}
