//! Artillery: clear every mountain before the descending ship hits one.
//!
//! Initial data is the ship's starting altitude followed by one line per
//! mountain listing its layer heights, bottom first. Each turn the user
//! program reads `shipX shipY` and the eight mountain heights, and answers
//! `FIRE` or anything else to hold. There is no user initialization step.
//!
//! Mountains are bit-packed into a `u32`: layer `i` occupies nibble `i` and
//! the live layer count sits in bits 12..16.
use crate::harness::{BatchSummary, Harness};
use crate::input::{lines_from, LineReceiver, LineSender};
use crate::map::{draw_map, MapObject, MapPoint};
use crate::output::Output;
use crate::target::{TargetProgram, TurnOutcome, UserProgram};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const MOUNTAINS: usize = 8;
pub const MAX_LAYERS: u32 = 3;
/// Default per-turn budget for artillery runs.
pub const KIRK_TIMEOUT: Duration = Duration::from_millis(100);

const LAYER_BITS: u32 = 4;
const LAYER_MASK: u32 = 0x000f;
const COUNT_SHIFT: u32 = 12;
const COUNT_MASK: u32 = 0xf000;

/// Pack up to [`MAX_LAYERS`] non-zero layers, each clamped to 15.
pub fn pack_mountain(layers: &[u32]) -> u32 {
    let mut packed = 0;
    let mut count = 0;
    for &layer in layers.iter().filter(|&&layer| layer > 0) {
        if count == MAX_LAYERS {
            break;
        }
        packed |= layer.min(LAYER_MASK) << (count * LAYER_BITS);
        count += 1;
    }
    packed | (count << COUNT_SHIFT)
}

pub fn layer_count(mountain: u32) -> u32 {
    (mountain & COUNT_MASK) >> COUNT_SHIFT
}

fn layer(mountain: u32, index: u32) -> u32 {
    (mountain >> (index * LAYER_BITS)) & LAYER_MASK
}

/// Total height of the live layers.
pub fn mountain_height(mountain: u32) -> u32 {
    (0..layer_count(mountain))
        .map(|index| layer(mountain, index))
        .sum()
}

/// Remove the top layer, returning the new mountain and the height removed.
pub fn destroy_top_layer(mountain: u32) -> (u32, u32) {
    let count = layer_count(mountain);
    if count == 0 {
        return (mountain, 0);
    }
    let top = count - 1;
    let damage = layer(mountain, top);
    let cleared = mountain & !(LAYER_MASK << (top * LAYER_BITS)) & !COUNT_MASK;
    (cleared | (top << COUNT_SHIFT), damage)
}

pub struct Kirk<U> {
    user: U,
    trace: bool,
    output: Output,
    max_height: i32,
    mountains: [u32; MOUNTAINS],
    ship: MapPoint,
    direction: i32,
    can_fire: bool,
}

impl<U: UserProgram> Kirk<U> {
    pub fn new(user: U, trace: bool, output: Output) -> Self {
        Self {
            user,
            trace,
            output,
            max_height: 0,
            mountains: [0; MOUNTAINS],
            ship: MapPoint::new(0, 0, "S"),
            direction: 1,
            can_fire: true,
        }
    }

    pub fn ship(&self) -> (i32, i32) {
        (self.ship.x, self.ship.y)
    }

    pub fn heights(&self) -> [u32; MOUNTAINS] {
        self.mountains.map(mountain_height)
    }

    fn height_under_ship(&self) -> i32 {
        usize::try_from(self.ship.x)
            .ok()
            .and_then(|x| self.mountains.get(x))
            .map_or(0, |&mountain| mountain_height(mountain) as i32)
    }

    fn fire(&mut self) -> u32 {
        let Some(slot) = usize::try_from(self.ship.x)
            .ok()
            .and_then(|x| self.mountains.get_mut(x))
        else {
            return 0;
        };
        let (mountain, damage) = destroy_top_layer(*slot);
        *slot = mountain;
        damage
    }

    fn draw(&self) {
        let rows = self.max_height.max(0);
        let ship_row = rows.saturating_sub(self.ship.y);
        let mut points = vec![MapPoint::new(self.ship.x, ship_row, "S")];
        for (x, height) in self.heights().iter().enumerate() {
            for altitude in 1..=*height as i32 {
                points.push(MapPoint::new(x as i32, rows - altitude, "^"));
            }
        }
        let objects: Vec<&dyn MapObject> =
            points.iter().map(|point| point as &dyn MapObject).collect();
        draw_map(&self.output, MOUNTAINS, rows as usize, ".", &objects);
    }
}

impl<U: UserProgram> TargetProgram for Kirk<U> {
    fn parse_initial_data(&mut self, input: &LineReceiver) {
        let first = input.recv().unwrap_or_default();
        self.max_height = first.trim().parse().unwrap_or(0);
        self.ship = MapPoint::new(0, self.max_height, "S");

        for slot in self.mountains.iter_mut() {
            let line = input.recv().unwrap_or_default();
            let layers: Vec<u32> = line
                .split_whitespace()
                .map(|token| token.parse().unwrap_or(0))
                .collect();
            *slot = pack_mountain(&layers);
        }
    }

    fn input(&self) -> LineReceiver {
        let mut lines = vec![format!("{} {}", self.ship.x, self.ship.y)];
        lines.extend(self.heights().iter().map(|height| height.to_string()));
        lines_from(lines)
    }

    fn update(&mut self, input: &LineReceiver, output: &LineSender) {
        self.user.update(input, output);
    }

    fn set_output(&mut self, output: &[String]) -> String {
        let fired = self.can_fire
            && output
                .first()
                .is_some_and(|answer| answer.trim() == "FIRE");
        let damage = if fired {
            self.can_fire = false;
            self.fire()
        } else {
            0
        };

        self.ship.x += self.direction;
        if self.ship.x < 0 || self.ship.x >= MOUNTAINS as i32 {
            self.ship.y = self.ship.y.saturating_sub(1);
            self.direction = -self.direction;
            self.ship.x += self.direction;
            self.can_fire = true;
        }

        if !self.trace {
            return String::new();
        }

        self.draw();
        let ship = format!("Ship = ({},{})", self.ship.x, self.ship.y);
        if fired {
            format!("{ship}\nShip fired and did {damage} damage.")
        } else {
            format!("{ship}\nShip hold fire.")
        }
    }

    /// Any altitude at or below the mountain under the ship is a crash, ground level included.
    fn lose_condition(&self) -> bool {
        self.ship.y <= self.height_under_ship()
    }

    fn win_condition(&self) -> bool {
        self.mountains
            .iter()
            .all(|&mountain| layer_count(mountain) == 0)
    }
}

/// Fires whenever the ship is over the tallest remaining mountain.
#[derive(Debug, Default)]
pub struct FireAtTallest;

impl UserProgram for FireAtTallest {
    fn update(&mut self, input: &LineReceiver, output: &LineSender) {
        let ship = input.recv().unwrap_or_default();
        let ship_x: usize = ship
            .split_whitespace()
            .next()
            .and_then(|token| token.parse().ok())
            .unwrap_or(0);
        let heights: Vec<u32> = input
            .iter()
            .take(MOUNTAINS)
            .map(|line| line.trim().parse().unwrap_or(0))
            .collect();
        let tallest = heights.iter().copied().max().unwrap_or(0);
        let under = heights.get(ship_x).copied().unwrap_or(0);
        let answer = if tallest > 0 && under == tallest {
            "FIRE"
        } else {
            "HOLD"
        };
        let _ = output.send(answer.to_string());
    }
}

/// Kirk's turn budget: [`KIRK_TIMEOUT`] unless the harness timeout was chosen explicitly.
fn kirk_harness(harness: &Harness) -> Harness {
    let config = harness.config().with_default_timeout(KIRK_TIMEOUT);
    Harness::new(config, harness.output().clone())
}

pub fn run_kirk_program<U: UserProgram>(
    harness: &Harness,
    input: &Path,
    trace: bool,
    user: U,
) -> TurnOutcome {
    let harness = kirk_harness(harness);
    let program = Kirk::new(user, trace, harness.output().clone());
    harness.run_target_program(input, trace, program)
}

pub fn run_kirk_programs<U, F>(
    harness: &Harness,
    inputs: &[PathBuf],
    trace: bool,
    mut make_user: F,
) -> BatchSummary
where
    U: UserProgram,
    F: FnMut() -> U,
{
    let harness = kirk_harness(harness);
    let output = harness.output().clone();
    harness.run_target_programs(inputs, trace, || {
        Kirk::new(make_user(), trace, output.clone())
    })
}

#[cfg(test)]
#[path = "kirk_tests.rs"]
mod tests;
