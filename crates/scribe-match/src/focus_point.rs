//! Focus points: phrases every acceptable answer must contain.

use crate::model::FocusPoint;

/// First focus point, in declared order, whose text does not appear in the
/// submission. Both sides are lowercased before the substring test.
pub fn first_violation<'a>(
    submission: &str,
    focus_points: &'a [FocusPoint],
) -> Option<&'a FocusPoint> {
    let lowered = submission.to_lowercase();
    focus_points
        .iter()
        .find(|fp| !lowered.contains(&fp.text.to_lowercase()))
}
