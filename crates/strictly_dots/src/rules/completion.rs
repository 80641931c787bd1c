//! Box completion detection.
//!
//! Only the boxes touching the edge just drawn are examined: at most two
//! boxes of four sides each, regardless of board size.

use super::super::{Board, BoxCoord, Edge, Orientation};
use tracing::instrument;

/// The four sides of a box: top, bottom, left, right.
pub fn bounding_edges(coord: BoxCoord) -> [Edge; 4] {
    let BoxCoord { row, col } = coord;
    [
        Edge::horizontal(row, col),
        Edge::horizontal(row + 1, col),
        Edge::vertical(row, col),
        Edge::vertical(row, col + 1),
    ]
}

/// Boxes bordered by an edge on a grid of `dots` dots per side.
///
/// A horizontal edge borders the box above and the box below, a vertical
/// edge the box to its left and the box to its right. Boxes outside the
/// grid are skipped, so boundary edges yield one box.
pub fn adjacent_boxes(dots: usize, edge: Edge) -> Vec<BoxCoord> {
    let span = dots.saturating_sub(1);
    let Edge {
        orientation,
        row,
        col,
    } = edge;

    let mut boxes = Vec::with_capacity(2);
    match orientation {
        Orientation::Horizontal => {
            if col >= span {
                return boxes;
            }
            if row > 0 && row - 1 < span {
                boxes.push(BoxCoord::new(row - 1, col));
            }
            if row < span {
                boxes.push(BoxCoord::new(row, col));
            }
        }
        Orientation::Vertical => {
            if row >= span {
                return boxes;
            }
            if col > 0 && col - 1 < span {
                boxes.push(BoxCoord::new(row, col - 1));
            }
            if col < span {
                boxes.push(BoxCoord::new(row, col));
            }
        }
    }
    boxes
}

/// Checks whether all four sides of an on-grid box are drawn.
pub fn is_box_complete(board: &Board, coord: BoxCoord) -> bool {
    bounding_edges(coord)
        .into_iter()
        .all(|edge| board.drawn_unchecked(edge))
}

/// Boxes whose last undrawn side is `edge`, given that `edge` was just drawn.
///
/// Boxes that already have an owner are not reported again.
#[instrument(skip(board), fields(edge = %edge))]
pub fn completed_by(board: &Board, edge: Edge) -> Vec<BoxCoord> {
    adjacent_boxes(board.dots(), edge)
        .into_iter()
        .filter(|coord| matches!(board.box_owner(*coord), Ok(None)))
        .filter(|coord| is_box_complete(board, *coord))
        .collect()
}
