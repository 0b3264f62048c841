use log::debug;
use mv_core::Grid;

use crate::{RasterView, occupancy_grid};

/// Marks lattice vertices that lie on an occupied/empty region edge.
///
/// For an `H x W` occupancy grid the result is `(H+1) x (W+1)`. Each vertex
/// sums the up-to-four pixels touching its corner, with out-of-bounds pixels
/// counting as empty; it is set iff the sum is strictly between 0 and 4.
/// This is the full 2D convolution of the occupancy grid with a 2x2 ones
/// kernel and implicit zero padding.
pub fn boundary_grid(occ: &Grid<u8>) -> Grid<u8> {
    let (w, h) = (occ.width(), occ.height());
    let out_w = w + 1;
    let mut out = Grid::new_fill(out_w, h + 1, 0u8);

    let cells = out.data_mut();
    let mut marked = 0usize;
    for i in 0..=h {
        for j in 0..=w {
            let mut sum = 0u8;
            for pi in i.saturating_sub(1)..=i {
                if pi >= h {
                    continue;
                }
                for pj in j.saturating_sub(1)..=j {
                    if pj >= w {
                        continue;
                    }
                    if occ.data()[pi * w + pj] != 0 {
                        sum += 1;
                    }
                }
            }

            if sum > 0 && sum < 4 {
                cells[i * out_w + j] = 1;
                marked += 1;
            }
        }
    }

    debug!("boundary grid {}x{}: {marked} boundary vertices", h + 1, out_w);
    out
}

/// Classifier entry: occupancy then boundary in one call.
pub fn boundary_from_raster(raster: &RasterView<'_>) -> Grid<u8> {
    boundary_grid(&occupancy_grid(raster))
}

#[cfg(test)]
mod tests {
    use super::{boundary_from_raster, boundary_grid};
    use crate::RasterView;
    use mv_core::Grid;

    fn grid(width: usize, height: usize, cells: &[u8]) -> Grid<u8> {
        Grid::from_vec(width, height, cells.to_vec()).expect("valid grid")
    }

    #[test]
    fn uniform_grids_have_no_boundary() {
        let empty = boundary_grid(&grid(3, 3, &[0; 9]));
        assert!(empty.data().iter().all(|&c| c == 0));
        assert_eq!(empty.width(), 4);
        assert_eq!(empty.height(), 4);

        // A fully occupied grid still has boundary vertices along its rim
        // (zero padding makes the outside empty); only the interior corners
        // see all four pixels occupied.
        let full = boundary_grid(&grid(3, 3, &[1; 9]));
        for i in 0..4 {
            for j in 0..4 {
                let interior = (1..3).contains(&i) && (1..3).contains(&j);
                let expected = u8::from(!interior);
                assert_eq!(full.get(i, j), Some(&expected), "vertex ({i}, {j})");
            }
        }
    }

    #[test]
    fn center_pixel_marks_its_four_corners() {
        let occ = grid(3, 3, &[0, 0, 0, 0, 1, 0, 0, 0, 0]);
        let boundary = boundary_grid(&occ);

        assert_eq!(boundary.width(), 4);
        assert_eq!(boundary.height(), 4);
        for i in 0..4 {
            for j in 0..4 {
                let corner = (1..=2).contains(&i) && (1..=2).contains(&j);
                assert_eq!(boundary.get(i, j), Some(&u8::from(corner)), "vertex ({i}, {j})");
            }
        }
    }

    #[test]
    fn classifier_is_idempotent() {
        let data = vec![
            0, 0, 0, 0, //
            0, 5, 9, 0, //
            0, 0, 2, 0, //
            0, 0, 0, 0,
        ];
        let raster = RasterView::new(4, 4, 1, &data).expect("valid raster");
        assert_eq!(boundary_from_raster(&raster), boundary_from_raster(&raster));
    }

    #[test]
    fn occupied_pixel_in_corner_marks_origin_vertex() {
        let occ = grid(2, 2, &[1, 0, 0, 0]);
        let boundary = boundary_grid(&occ);

        assert_eq!(boundary.get(0, 0), Some(&1));
        assert_eq!(boundary.get(0, 1), Some(&1));
        assert_eq!(boundary.get(1, 0), Some(&1));
        assert_eq!(boundary.get(1, 1), Some(&1));
        assert_eq!(boundary.get(2, 2), Some(&0));
    }
}
