//! Grid navigation: steer Thor onto the light of power before energy runs out.
//!
//! Initial data is one line `W H thorX thorY energy targetX targetY`. The
//! user program is initialized with `targetX targetY thorX thorY` and
//! receives the remaining energy each turn; it answers with a direction made
//! of `N`/`S` and `E`/`W`.
use crate::harness::{BatchSummary, Harness};
use crate::input::{lines_from, LineReceiver, LineSender};
use crate::map::{draw_map, MapObject, MapPoint};
use crate::output::Output;
use crate::target::{TargetProgram, TurnOutcome, UserProgram};
use std::path::{Path, PathBuf};

pub struct Ragnarok<U> {
    user: U,
    trace: bool,
    output: Output,
    dimensions: (i32, i32),
    thor: MapPoint,
    target: MapPoint,
    energy: i32,
    trail: Vec<MapPoint>,
}

impl<U: UserProgram> Ragnarok<U> {
    pub fn new(user: U, trace: bool, output: Output) -> Self {
        Self {
            user,
            trace,
            output,
            dimensions: (0, 0),
            thor: MapPoint::new(0, 0, "H"),
            target: MapPoint::new(0, 0, "T"),
            energy: 0,
            trail: Vec::new(),
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.thor.x, self.thor.y)
    }

    pub fn energy(&self) -> i32 {
        self.energy
    }
}

/// Unit step for a direction answer: `N`/`S` first, then `E`/`W`.
pub fn direction_step(answer: &str) -> (i32, i32) {
    let dy = if answer.contains('N') {
        -1
    } else if answer.contains('S') {
        1
    } else {
        0
    };
    let dx = if answer.contains('E') {
        1
    } else if answer.contains('W') {
        -1
    } else {
        0
    };
    (dx, dy)
}

fn parse_numbers<const N: usize>(line: &str) -> [i32; N] {
    let mut values = [0; N];
    for (slot, token) in values.iter_mut().zip(line.split_whitespace()) {
        *slot = token.parse().unwrap_or(0);
    }
    values
}

impl<U: UserProgram> TargetProgram for Ragnarok<U> {
    fn parse_initial_data(&mut self, input: &LineReceiver) {
        let line = input.recv().unwrap_or_default();
        let [width, height, thor_x, thor_y, energy, target_x, target_y] =
            parse_numbers::<7>(&line);
        self.dimensions = (width, height);
        self.thor = MapPoint::new(thor_x, thor_y, "H");
        self.target = MapPoint::new(target_x, target_y, "T");
        self.energy = energy;

        let init = lines_from([format!("{target_x} {target_y} {thor_x} {thor_y}")]);
        self.user.initialize(&init);
    }

    fn input(&self) -> LineReceiver {
        lines_from([self.energy.to_string()])
    }

    fn update(&mut self, input: &LineReceiver, output: &LineSender) {
        self.user.update(input, output);
    }

    fn set_output(&mut self, output: &[String]) -> String {
        self.trail.push(MapPoint::new(self.thor.x, self.thor.y, "+"));
        let (dx, dy) = output
            .first()
            .map_or((0, 0), |answer| direction_step(answer));
        self.thor.x = self.thor.x.saturating_add(dx);
        self.thor.y = self.thor.y.saturating_add(dy);
        self.energy = self.energy.saturating_sub(1);

        if !self.trace {
            return String::new();
        }

        let mut objects: Vec<&dyn MapObject> =
            self.trail.iter().map(|point| point as &dyn MapObject).collect();
        objects.push(&self.thor);
        objects.push(&self.target);
        let (width, height) = self.dimensions;
        draw_map(
            &self.output,
            width.max(0) as usize,
            height.max(0) as usize,
            ".",
            &objects,
        );

        format!(
            "Target = ({},{})\nThor = ({},{})\nEnergy = {}",
            self.target.x, self.target.y, self.thor.x, self.thor.y, self.energy
        )
    }

    fn lose_condition(&self) -> bool {
        let (width, height) = self.dimensions;
        self.energy <= 0
            || self.thor.x < 0
            || self.thor.x >= width
            || self.thor.y < 0
            || self.thor.y >= height
    }

    fn win_condition(&self) -> bool {
        self.thor.x == self.target.x && self.thor.y == self.target.y
    }
}

/// Walks diagonally toward the target, tracking its own position.
#[derive(Debug, Default)]
pub struct GreedyNavigator {
    target: (i32, i32),
    position: (i32, i32),
}

impl UserProgram for GreedyNavigator {
    fn initialize(&mut self, input: &LineReceiver) {
        let line = input.recv().unwrap_or_default();
        let [target_x, target_y, thor_x, thor_y] = parse_numbers::<4>(&line);
        self.target = (target_x, target_y);
        self.position = (thor_x, thor_y);
    }

    fn update(&mut self, input: &LineReceiver, output: &LineSender) {
        let _energy = input.recv();
        let (x, y) = self.position;
        let (target_x, target_y) = self.target;
        let mut answer = String::new();
        match y.cmp(&target_y) {
            std::cmp::Ordering::Less => answer.push('S'),
            std::cmp::Ordering::Greater => answer.push('N'),
            std::cmp::Ordering::Equal => {}
        }
        match x.cmp(&target_x) {
            std::cmp::Ordering::Less => answer.push('E'),
            std::cmp::Ordering::Greater => answer.push('W'),
            std::cmp::Ordering::Equal => {}
        }
        let (dx, dy) = direction_step(&answer);
        self.position = (x.saturating_add(dx), y.saturating_add(dy));
        let _ = output.send(answer);
    }
}

pub fn run_ragnarok_program<U: UserProgram>(
    harness: &Harness,
    input: &Path,
    trace: bool,
    user: U,
) -> TurnOutcome {
    let program = Ragnarok::new(user, trace, harness.output().clone());
    harness.run_target_program(input, trace, program)
}

pub fn run_ragnarok_programs<U, F>(
    harness: &Harness,
    inputs: &[PathBuf],
    trace: bool,
    mut make_user: F,
) -> BatchSummary
where
    U: UserProgram,
    F: FnMut() -> U,
{
    let output = harness.output().clone();
    harness.run_target_programs(inputs, trace, || {
        Ragnarok::new(make_user(), trace, output.clone())
    })
}

#[cfg(test)]
#[path = "ragnarok_tests.rs"]
mod tests;
