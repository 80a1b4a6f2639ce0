use hashbrown::HashMap;

use crate::model::{Trajectory, Waypoint};

/// Builds per-vehicle waypoint sequences during the scan pass.
#[derive(Debug, Default)]
pub struct TrajectoryAccumulator {
    vehicles: HashMap<String, Vec<Waypoint>>,
}

impl TrajectoryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a waypoint to the vehicle's trajectory, creating it on first
    /// sight. A waypoint that does not strictly advance the vehicle's time
    /// is dropped, which keeps the per-trajectory ordering invariant
    /// enforced at the single writing site.
    pub fn push(&mut self, vehicle_id: &str, waypoint: Waypoint) {
        let points = self.vehicles.entry_ref(vehicle_id).or_default();
        if points
            .last()
            .is_some_and(|last| last.second >= waypoint.second)
        {
            return;
        }
        points.push(waypoint);
    }

    /// Distinct vehicles seen so far.
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Drops trajectories under `min_waypoints`, keeps at most
    /// `max_vehicles` of the rest (most waypoints first, vehicle id as the
    /// tie-break) and returns them sorted by vehicle id, so equal inputs
    /// produce byte-equal output.
    pub fn finish(self, min_waypoints: usize, max_vehicles: usize) -> Vec<Trajectory> {
        let mut kept: Vec<Trajectory> = self
            .vehicles
            .into_iter()
            .filter(|(_, waypoints)| waypoints.len() >= min_waypoints)
            .map(|(id, waypoints)| Trajectory { id, waypoints })
            .collect();

        if kept.len() > max_vehicles {
            kept.sort_unstable_by(|a, b| {
                b.waypoints
                    .len()
                    .cmp(&a.waypoints.len())
                    .then_with(|| a.id.cmp(&b.id))
            });
            kept.truncate(max_vehicles);
        }
        kept.sort_unstable_by(|a, b| a.id.cmp(&b.id));
        kept
    }
}
