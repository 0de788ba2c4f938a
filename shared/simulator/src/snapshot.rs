use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub tick: u32,
    pub time: f64,
    pub selected: Option<u64>,
    pub ships: Vec<ShipSnapshot>,
    pub next_collision: Option<CollisionSnapshot>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ShipSnapshot {
    pub id: u64,
    pub position: Point2<f64>,
    pub velocity: Vector2<f64>,
    pub heading: f64,
    pub speed: f64,
    pub radius: f64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CollisionSnapshot {
    pub other: u64,
    pub time: f64,
    pub contact: Point2<f64>,
}

/// Extrapolates a snapshot forward by `dt` seconds for display between ticks.
///
/// The predicted collision is left alone apart from its countdown.
pub fn interpolate(snapshot: &mut Snapshot, dt: f64) {
    snapshot.time += dt;

    for ship in snapshot.ships.iter_mut() {
        ship.position += ship.velocity * dt;
    }

    if let Some(collision) = snapshot.next_collision.as_mut() {
        collision.time -= dt;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::{point, vector};
    use test_log::test;

    #[test]
    fn test_interpolate() {
        let mut snapshot = Snapshot {
            tick: 3,
            time: 0.1,
            selected: Some(0),
            ships: vec![ShipSnapshot {
                id: 0,
                position: point![1.0, 2.0],
                velocity: vector![10.0, -20.0],
                heading: 0.0,
                speed: 22.36,
                radius: 10.0,
            }],
            next_collision: Some(CollisionSnapshot {
                other: 1,
                time: 2.0,
                contact: point![5.0, 5.0],
            }),
        };
        interpolate(&mut snapshot, 0.5);
        assert_eq!(snapshot.tick, 3);
        assert_abs_diff_eq!(snapshot.time, 0.6);
        assert_abs_diff_eq!(snapshot.ships[0].position.x, 6.0);
        assert_abs_diff_eq!(snapshot.ships[0].position.y, -8.0);
        let collision = snapshot.next_collision.unwrap();
        assert_abs_diff_eq!(collision.time, 1.5);
        assert_eq!(collision.contact, point![5.0, 5.0]);
    }
}
