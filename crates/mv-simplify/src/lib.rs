//! Corner-cut simplification for traced boundary polylines.
//!
//! Two consecutive segments whose combined Euclidean length is at or below
//! a threshold are merged into one segment spanning from the first's start
//! to the second's end, dropping the shared corner vertex. Lengths are
//! summed rather than measured end-to-end, so the threshold bounds path
//! length, not displacement.

use mv_core::{Polyline, Segment};

/// Merges short consecutive segment pairs of one polyline.
///
/// The segment sequence is treated as cyclic when pairing (the last segment
/// may merge with the first), in a single forward pass: a merge writes its
/// result into the successor slot, so a chain of short runs keeps
/// collapsing as the pass advances. Non-consecutive pairs (segment end and
/// successor start differ, as happens across branch points) are never
/// merged. Polylines with fewer than two segments are returned unchanged.
pub fn cut_corners(line: &Polyline, min_dist: f32) -> Polyline {
    if line.len() < 2 {
        return line.clone();
    }

    let mut slots: Vec<Option<Segment>> = line.segments.iter().copied().map(Some).collect();
    let n = slots.len();
    for i in 0..n {
        let next = (i + 1) % n;
        let (Some(first), Some(second)) = (slots[i], slots[next]) else {
            continue;
        };
        if first.b != second.a {
            continue;
        }
        if first.length() + second.length() > min_dist {
            continue;
        }

        slots[i] = None;
        // A merge closing a whole loop would leave a zero-length segment;
        // drop both halves instead.
        slots[next] = (first.a != second.b).then_some(Segment::new(first.a, second.b));
    }

    Polyline::new(slots.into_iter().flatten().collect())
}

/// Applies [`cut_corners`] to every polyline in the list.
pub fn cut_all_corners(lines: &[Polyline], min_dist: f32) -> Vec<Polyline> {
    lines.iter().map(|line| cut_corners(line, min_dist)).collect()
}
