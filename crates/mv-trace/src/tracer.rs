use log::debug;
use mv_core::{Dir, Grid, Polyline, Segment, Vertex};

/// Traces every boundary component of `boundary` into a polyline.
///
/// The grid is cloned into a working copy owned by this call; each vertex
/// the walk passes over is cleared in the copy and never revisited, which
/// bounds the total work by the number of set vertices and guarantees
/// termination. The caller's grid is left untouched.
///
/// The outer scan is row-major and branch continuation probes the left turn
/// before the right turn, so the output order and contents are
/// deterministic. At a 3- or 4-way junction only the first set orthogonal
/// continuation is followed; the dropped arm is picked up later by the
/// outer scan as a separate polyline.
pub fn trace_boundaries(boundary: &Grid<u8>) -> Vec<Polyline> {
    let mut working = boundary.clone();
    let mut lines = Vec::new();

    while let Some(start) = first_set_vertex(&working) {
        let start_dir = if set_neighbor(&working, start, Dir::Right).is_some() {
            Dir::Right
        } else if set_neighbor(&working, start, Dir::Down).is_some() {
            Dir::Down
        } else {
            // Isolated boundary vertex: no connectivity, no segment.
            clear(&mut working, start);
            continue;
        };

        let line = walk_branches(&mut working, start, start_dir);
        // The start vertex is only cleared once its whole component is
        // done; a closing loop needs to see it still set.
        clear(&mut working, start);
        lines.push(line);
    }

    debug!(
        "traced {} polylines ({} segments)",
        lines.len(),
        lines.iter().map(Polyline::len).sum::<usize>()
    );
    lines
}

/// Depth-first branch walk from `start`, collecting one segment per
/// straight run.
fn walk_branches(working: &mut Grid<u8>, start: Vertex, start_dir: Dir) -> Polyline {
    let mut segments = Vec::new();
    let mut stack = vec![(start, start_dir)];

    while let Some((from, dir)) = stack.pop() {
        let mut cur = from;
        while let Some(next) = set_neighbor(working, cur, dir) {
            clear(working, next);
            cur = next;
        }

        // A continuation whose first step got blocked yields no run.
        if cur != from {
            segments.push(Segment::new(from, cur));
        }

        let left = dir.turn_left();
        let right = dir.turn_right();
        if set_neighbor(working, cur, left).is_some() {
            stack.push((cur, left));
        } else if set_neighbor(working, cur, right).is_some() {
            stack.push((cur, right));
        }
    }

    Polyline::new(segments)
}

/// First set vertex in row-major order, or `None` once the grid is clear.
fn first_set_vertex(grid: &Grid<u8>) -> Option<Vertex> {
    let w = grid.width();
    grid.data()
        .iter()
        .position(|&c| c != 0)
        .map(|idx| Vertex::new(idx / w, idx % w))
}

/// Neighbor of `v` one step along `dir`, if it is in bounds and set.
fn set_neighbor(grid: &Grid<u8>, v: Vertex, dir: Dir) -> Option<Vertex> {
    let (di, dj) = dir.delta();
    let i = v.i.checked_add_signed(di)?;
    let j = v.j.checked_add_signed(dj)?;
    match grid.get(i, j) {
        Some(&c) if c != 0 => Some(Vertex::new(i, j)),
        _ => None,
    }
}

fn clear(grid: &mut Grid<u8>, v: Vertex) {
    let w = grid.width();
    grid.data_mut()[v.i * w + v.j] = 0;
}

#[cfg(test)]
mod tests {
    use super::trace_boundaries;
    use mv_core::{Grid, Vertex};
    use mv_raster::{RasterView, boundary_from_raster};

    fn boundary_of(width: usize, height: usize, pixels: &[u8]) -> Grid<u8> {
        let raster = RasterView::new(width, height, 1, pixels).expect("valid raster");
        boundary_from_raster(&raster)
    }

    fn assert_axis_aligned_and_nondegenerate(lines: &[mv_core::Polyline]) {
        for line in lines {
            for seg in &line.segments {
                assert_ne!(seg.a, seg.b, "zero-length segment {seg:?}");
                assert!(
                    seg.a.i == seg.b.i || seg.a.j == seg.b.j,
                    "tracer segment {seg:?} is not axis-aligned"
                );
            }
        }
    }

    #[test]
    fn empty_grid_yields_no_polylines() {
        let boundary = boundary_of(3, 3, &[0; 9]);
        assert!(boundary.data().iter().all(|&c| c == 0));
        assert!(trace_boundaries(&boundary).is_empty());
    }

    #[test]
    fn rectangle_traces_to_one_perimeter_polyline() {
        // 3x2 occupied rectangle inside a 6x5 empty raster.
        let mut pixels = vec![0u8; 6 * 5];
        for i in 1..3 {
            for j in 1..4 {
                pixels[i * 6 + j] = 1;
            }
        }
        let boundary = boundary_of(6, 5, &pixels);
        let lines = trace_boundaries(&boundary);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 4);
        assert!((lines[0].total_length() - 10.0).abs() < 1e-6);
        assert_axis_aligned_and_nondegenerate(&lines);
    }

    #[test]
    fn center_pixel_traces_to_unit_square() {
        let boundary = boundary_of(3, 3, &[0, 0, 0, 0, 1, 0, 0, 0, 0]);
        let lines = trace_boundaries(&boundary);

        assert_eq!(lines.len(), 1);
        let square = &lines[0];
        assert_eq!(square.len(), 4);
        assert!((square.total_length() - 4.0).abs() < 1e-6);

        // Each square corner appears exactly twice across the segment
        // endpoints.
        for corner in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            let v = Vertex::new(corner.0, corner.1);
            let hits = square
                .segments
                .iter()
                .flat_map(|s| [s.a, s.b])
                .filter(|&e| e == v)
                .count();
            assert_eq!(hits, 2, "corner {corner:?}");
        }
        assert_axis_aligned_and_nondegenerate(&lines);
    }

    #[test]
    fn fragment_at_grid_origin_is_not_dropped() {
        // Occupied pixel in the raster corner puts a boundary vertex at
        // lattice (0, 0); the scan must still find and trace it.
        let boundary = boundary_of(2, 2, &[1, 0, 0, 0]);
        assert_eq!(boundary.get(0, 0), Some(&1));

        let lines = trace_boundaries(&boundary);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 4);
        assert!((lines[0].total_length() - 4.0).abs() < 1e-6);
        assert_axis_aligned_and_nondegenerate(&lines);
    }

    #[test]
    fn isolated_vertex_contributes_nothing() {
        let mut cells = vec![0u8; 5 * 5];
        cells[2 * 5 + 2] = 1;
        let boundary = Grid::from_vec(5, 5, cells).expect("valid grid");

        assert!(trace_boundaries(&boundary).is_empty());
    }

    #[test]
    fn junction_drops_one_arm_into_a_second_polyline() {
        // Vertical run through (0,2)..(4,2) with a horizontal arm
        // (2,2)..(2,4): a T junction at (2,2).
        let mut cells = vec![0u8; 5 * 5];
        for i in 0..5 {
            cells[i * 5 + 2] = 1;
        }
        for j in 3..5 {
            cells[2 * 5 + j] = 1;
        }
        let boundary = Grid::from_vec(5, 5, cells).expect("valid grid");
        let lines = trace_boundaries(&boundary);

        // The first walk runs straight through the junction; the arm is
        // recovered by the outer scan as its own polyline.
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].len(), 1);
        assert_eq!(lines[0].segments[0].a, Vertex::new(0, 2));
        assert_eq!(lines[0].segments[0].b, Vertex::new(4, 2));
        assert_eq!(lines[1].len(), 1);
        assert_eq!(lines[1].segments[0].a, Vertex::new(2, 3));
        assert_eq!(lines[1].segments[0].b, Vertex::new(2, 4));
    }

    #[test]
    fn l_shape_is_followed_around_the_corner() {
        // Horizontal run (3,0)..(3,3) turning up into (0,3)..(3,3).
        let mut cells = vec![0u8; 4 * 4];
        for j in 0..4 {
            cells[3 * 4 + j] = 1;
        }
        for i in 0..4 {
            cells[i * 4 + 3] = 1;
        }
        let boundary = Grid::from_vec(4, 4, cells).expect("valid grid");
        let lines = trace_boundaries(&boundary);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].len(), 2);
        assert_axis_aligned_and_nondegenerate(&lines);
        assert!((lines[0].total_length() - 6.0).abs() < 1e-6);
    }

    #[test]
    fn tracer_is_deterministic() {
        let mut pixels = vec![0u8; 8 * 8];
        for (i, j) in [(1, 1), (1, 2), (2, 1), (4, 4), (4, 5), (5, 5), (6, 2)] {
            pixels[i * 8 + j] = 1;
        }
        let boundary = boundary_of(8, 8, &pixels);

        let first = trace_boundaries(&boundary);
        let second = trace_boundaries(&boundary);
        assert_eq!(first, second);
        assert_axis_aligned_and_nondegenerate(&first);
    }

    #[test]
    fn working_copy_leaves_input_untouched() {
        let boundary = boundary_of(3, 3, &[0, 0, 0, 0, 1, 0, 0, 0, 0]);
        let snapshot = boundary.clone();
        let _ = trace_boundaries(&boundary);
        assert_eq!(boundary, snapshot);
    }
}
