//! Game rules for dots and boxes.
//!
//! Pure functions over the board and scores. Rules are kept apart from
//! board storage so contracts and invariants can reuse them.

pub mod completion;
pub mod outcome;

pub use completion::{adjacent_boxes, bounding_edges, completed_by, is_box_complete};
pub use outcome::decide;
