//! Local windows and coarse line-of-sight used by interest scoring.

use explorer_core::{CellState, MapOracle, Position, Window};

/// Copies the disc of radius `range` around `center` out of `map`.
///
/// Cells whose squared distance to `center` is strictly below `range²` take
/// the map's state; everything else, including positions outside the map,
/// stays [`CellState::Undefined`].
pub fn extract_window<M>(map: &M, center: Position, range: u32) -> Window
where
    M: MapOracle + ?Sized,
{
    let mut window = Window::new(center, range, CellState::Undefined);
    let radius_squared = f64::from(range) * f64::from(range);
    let side = window.side() as i32;

    for wy in 0..side {
        for wx in 0..side {
            let position = window.absolute(wx, wy);
            if position.distance_squared(center) >= radius_squared {
                continue;
            }
            if let Some(state) = map.cell(position) {
                window.set_local(wx, wy, state);
            }
        }
    }

    window
}

/// Coarse occlusion test between two cells of `window`, in window-local
/// coordinates.
///
/// Samples the straight line from `origin` toward `target` at whole-unit
/// steps and reports `false` if any sample lands on a Wall. Samples sharing a
/// row or a column with the target are not checked, so walls aligned with the
/// target never block it.
pub fn is_visible_from(window: &Window, origin: (i32, i32), target: (i32, i32)) -> bool {
    let dx = f64::from(target.0 - origin.0);
    let dy = f64::from(target.1 - origin.1);
    let angle = dy.atan2(dx);
    let distance = dx.hypot(dy);
    let (sin, cos) = angle.sin_cos();

    let mut step = 0u32;
    while f64::from(step) < distance {
        let x = (f64::from(origin.0) + f64::from(step) * cos).trunc() as i32;
        let y = (f64::from(origin.1) + f64::from(step) * sin).trunc() as i32;
        step += 1;

        if x == target.0 || y == target.1 {
            continue;
        }
        if window.get_local(x, y) == Some(CellState::Wall) {
            return false;
        }
    }

    true
}
