//! Character-grid rendering for trace output.
use crate::output::Output;
use std::fmt::Write;

/// Something drawable on the trace grid.
pub trait MapObject {
    /// Position formatted as `"x;y"`.
    fn map_coordinates(&self) -> String;
    /// Single-character glyph.
    fn map_icon(&self) -> &str;
}

/// A positioned glyph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapPoint {
    pub x: i32,
    pub y: i32,
    pub icon: &'static str,
}

impl MapPoint {
    pub fn new(x: i32, y: i32, icon: &'static str) -> Self {
        Self { x, y, icon }
    }
}

impl MapObject for MapPoint {
    fn map_coordinates(&self) -> String {
        format!("{};{}", self.x, self.y)
    }

    fn map_icon(&self) -> &str {
        self.icon
    }
}

/// Render a `width` x `height` grid; the first object listed at a cell wins.
pub fn render_map(
    width: usize,
    height: usize,
    background: &str,
    objects: &[&dyn MapObject],
) -> String {
    let positions: Vec<String> = objects
        .iter()
        .map(|object| object.map_coordinates())
        .collect();
    let mut grid = String::new();
    for y in 0..height {
        for x in 0..width {
            let cell = format!("{x};{y}");
            let icon = positions
                .iter()
                .position(|position| *position == cell)
                .map_or(background, |index| objects[index].map_icon());
            let _ = write!(grid, "{icon} ");
        }
        grid.push('\n');
    }
    grid.push('\n');
    grid
}

pub fn draw_map(
    output: &Output,
    width: usize,
    height: usize,
    background: &str,
    objects: &[&dyn MapObject],
) {
    output.print(&render_map(width, height, background, objects));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_background_and_objects() {
        let hero = MapPoint::new(0, 0, "H");
        let target = MapPoint::new(2, 1, "T");
        let grid = render_map(3, 2, ".", &[&hero, &target]);
        assert_eq!(grid, "H . . \n. . T \n\n");
    }

    #[test]
    fn first_listed_object_wins_ties() {
        let trail = MapPoint::new(1, 0, "+");
        let hero = MapPoint::new(1, 0, "H");
        assert_eq!(render_map(2, 1, ".", &[&trail, &hero]), ". + \n\n");
    }

    #[test]
    fn objects_outside_the_grid_are_ignored() {
        let lost = MapPoint::new(-1, 5, "H");
        assert_eq!(render_map(1, 1, "~", &[&lost]), "~ \n\n");
    }
}
