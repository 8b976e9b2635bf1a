//! Edge anchor points.

use flowsheet_core::{geometry::Point, semantic::Shape};

use crate::config::AnchorMode;

/// Returns where an edge leaves `source` and enters `target`.
///
/// Edges run from the right-center of the source to the left-center of the
/// target. In [`AnchorMode::Adaptive`], an edge whose vertical displacement
/// between shape centers is strictly larger than its horizontal one runs
/// bottom-to-top when the target is below the source and top-to-bottom
/// otherwise.
///
/// If either shape is missing, both points are the origin.
///
/// # Examples
///
/// ```
/// # use flowsheet::layout::connection_points;
/// # use flowsheet::config::AnchorMode;
/// # use flowsheet_core::geometry::Point;
/// assert_eq!(
///     connection_points(None, None, AnchorMode::Horizontal),
///     (Point::default(), Point::default())
/// );
/// ```
pub fn connection_points(
    source: Option<&Shape>,
    target: Option<&Shape>,
    mode: AnchorMode,
) -> (Point, Point) {
    let (Some(source), Some(target)) = (source, target) else {
        return (Point::default(), Point::default());
    };
    let from = source.bounds();
    let to = target.bounds();

    let delta = to.center().sub_point(from.center());
    let vertical = delta.abs().y() > delta.abs().x();

    match mode {
        AnchorMode::Adaptive if vertical && delta.y() > 0.0 => {
            (from.bottom_center(), to.top_center())
        }
        AnchorMode::Adaptive if vertical => (from.top_center(), to.bottom_center()),
        AnchorMode::Horizontal | AnchorMode::Adaptive => (from.right_center(), to.left_center()),
    }
}
