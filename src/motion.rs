//! Discrete robot motion along a route.
//!
//! A leg between two waypoints is split into `ceil(len / step)` equal steps.
//! Each step becomes an integer displacement; rounding drift is removed by
//! snapping the robot onto the leg's endpoint after its last step.

use std::collections::VecDeque;

use log::{debug, trace};

use crate::core::{GridPoint, Point2D};
use crate::error::{MargaError, Result};

/// Intermediate points of `p1 → p2` at `step` spacing, ending exactly at `p2`.
///
/// `p1` itself is not included. A zero-length segment yields no points;
/// a non-positive or non-finite `step` yields `p2` alone.
pub fn split_segment(p1: Point2D, p2: Point2D, step: f64) -> Vec<Point2D> {
    let length = p1.distance(&p2);
    if length == 0.0 {
        return Vec::new();
    }
    if !(step > 0.0 && step.is_finite()) {
        return vec![p2];
    }
    let n = ((length / step).ceil() as usize).max(1);
    let delta = (p2 - p1) * (1.0 / n as f64);

    let mut points: Vec<Point2D> = (1..n).map(|k| p1 + delta * k as f64).collect();
    points.push(p2);
    points
}

/// Integer displacements that walk from `start` to `end` in steps of at most
/// about `step_size`.
///
/// Displacements are rounded differences between consecutive split points,
/// so their sum may differ from `end - start` by a few units.
pub fn create_robot_moves(start: GridPoint, end: GridPoint, step_size: i64) -> Vec<GridPoint> {
    let mut previous = start.to_point2d();
    split_segment(previous, end.to_point2d(), step_size as f64)
        .into_iter()
        .map(|p| {
            let diff = p - previous;
            previous = p;
            GridPoint::new(diff.x.round() as i64, diff.y.round() as i64)
        })
        .collect()
}

/// One queued motion step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstructionSet {
    /// Displacement to apply.
    pub motion: GridPoint,
    /// Position to snap to after the move; set on the last step of a leg.
    pub alignment_reference: Option<GridPoint>,
}

/// Build the instruction sets for one leg ending at `reference`.
pub fn create_instruction_sets(moves: &[GridPoint], reference: GridPoint) -> Vec<InstructionSet> {
    let last = moves.len().saturating_sub(1);
    moves
        .iter()
        .enumerate()
        .map(|(i, &motion)| InstructionSet {
            motion,
            alignment_reference: (i == last).then_some(reference),
        })
        .collect()
}

/// Queue of motion steps driving a point robot.
#[derive(Clone, Debug)]
pub struct RobotController {
    position: GridPoint,
    step_size: i64,
    queue: VecDeque<InstructionSet>,
}

impl RobotController {
    /// Fails unless `step_size` is positive.
    pub fn new(position: GridPoint, step_size: i64) -> Result<Self> {
        if step_size <= 0 {
            return Err(MargaError::Config(format!(
                "robot step size must be positive, got {}",
                step_size
            )));
        }
        Ok(Self {
            position,
            step_size,
            queue: VecDeque::new(),
        })
    }

    pub fn position(&self) -> GridPoint {
        self.position
    }

    /// Steps still queued.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queue legs through `points`.
    ///
    /// The first leg starts where the already queued motion ends, or at the
    /// robot if the queue is empty.
    pub fn push_route(&mut self, points: &[GridPoint]) {
        let mut from = self
            .queue
            .iter()
            .rev()
            .find_map(|s| s.alignment_reference)
            .unwrap_or(self.position);

        let before = self.queue.len();
        for &to in points {
            let moves = create_robot_moves(from, to, self.step_size);
            self.queue.extend(create_instruction_sets(&moves, to));
            from = to;
        }
        debug!(
            "[Motion] queued {} steps over {} legs",
            self.queue.len() - before,
            points.len()
        );
    }

    /// Apply one queued step. Returns the new position, or `None` when idle.
    pub fn tick(&mut self) -> Option<GridPoint> {
        let step = self.queue.pop_front()?;
        self.position = self.position + step.motion;
        if let Some(reference) = step.alignment_reference {
            trace!("[Motion] align {} -> {}", self.position, reference);
            self.position = reference;
        }
        Some(self.position)
    }

    /// Drop all queued steps.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
