//! Row-band partitioning for data-parallel filtering.
//!
//! An image with `rows` rows is cut into `band_count` contiguous bands of
//! `rows / band_count` rows each; the last band also takes the remainder.
//! When there are fewer rows than bands the leading bands are empty and the
//! last band holds every row.
//!
//! [`split_into_bands`] turns a mutable output buffer into one [`BandSlot`]
//! per band. Each slot owns a mutable view of its own rows only, so workers
//! writing through different slots cannot overlap.

use std::ops::Range;

use ndarray::{ArrayViewMut2, Axis};

/// Half-open row interval `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowBand {
    pub start: usize,
    pub end: usize,
}

impl RowBand {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn rows(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The band grown by `halo` rows on each side, clipped to `0..rows`.
    pub fn with_halo(&self, halo: usize, rows: usize) -> Range<usize> {
        self.start.saturating_sub(halo)..(self.end + halo).min(rows)
    }
}

/// Split `0..rows` into exactly `band_count` bands (at least one).
pub fn partition_rows(rows: usize, band_count: usize) -> Vec<RowBand> {
    let band_count = band_count.max(1);
    let rows_per_band = rows / band_count;

    (0..band_count)
        .map(|i| {
            let start = i * rows_per_band;
            let end = if i == band_count - 1 {
                rows
            } else {
                start + rows_per_band
            };
            RowBand::new(start, end)
        })
        .collect()
}

/// A band together with exclusive mutable access to its rows of a buffer.
#[derive(Debug)]
pub struct BandSlot<'a> {
    pub band: RowBand,
    pub view: ArrayViewMut2<'a, u8>,
}

/// Partition `output` by rows and hand out one slot per band.
pub fn split_into_bands(output: ArrayViewMut2<'_, u8>, band_count: usize) -> Vec<BandSlot<'_>> {
    let bands = partition_rows(output.nrows(), band_count);
    let mut slots = Vec::with_capacity(bands.len());

    let mut rest = output;
    for band in bands {
        let (head, tail) = rest.split_at(Axis(0), band.len());
        slots.push(BandSlot { band, view: head });
        rest = tail;
    }

    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn assert_covers(bands: &[RowBand], rows: usize) {
        assert_eq!(bands.first().map(|b| b.start), Some(0));
        assert_eq!(bands.last().map(|b| b.end), Some(rows));
        for pair in bands.windows(2) {
            assert_eq!(pair[0].end, pair[1].start, "bands not contiguous");
        }
    }

    #[test]
    fn test_partition_100_rows_4_bands() {
        let bands = partition_rows(100, 4);
        assert_eq!(
            bands,
            vec![
                RowBand::new(0, 25),
                RowBand::new(25, 50),
                RowBand::new(50, 75),
                RowBand::new(75, 100),
            ]
        );
    }

    #[test]
    fn test_partition_10_rows_4_bands_last_absorbs_remainder() {
        let bands = partition_rows(10, 4);
        assert_eq!(
            bands,
            vec![
                RowBand::new(0, 2),
                RowBand::new(2, 4),
                RowBand::new(4, 6),
                RowBand::new(6, 10),
            ]
        );
    }

    #[test]
    fn test_partition_coverage_and_sizing() {
        for rows in 0..40 {
            for n in 1..12 {
                let bands = partition_rows(rows, n);
                assert_eq!(bands.len(), n);
                assert_covers(&bands, rows);

                let last = bands[n - 1].len();
                assert_eq!(last, rows - (n - 1) * (rows / n));
                for band in &bands[..n - 1] {
                    assert_eq!(band.len(), rows / n);
                    assert!(last >= band.len());
                }
            }
        }
    }

    #[test]
    fn test_partition_fewer_rows_than_bands() {
        let bands = partition_rows(3, 8);
        assert_eq!(bands.len(), 8);
        assert!(bands[..7].iter().all(RowBand::is_empty));
        assert_eq!(bands[7], RowBand::new(0, 3));
    }

    #[test]
    fn test_partition_zero_bands_gives_one() {
        assert_eq!(partition_rows(5, 0), vec![RowBand::new(0, 5)]);
    }

    #[test]
    fn test_with_halo_clips_to_image() {
        let band = RowBand::new(2, 6);
        assert_eq!(band.with_halo(3, 7), 0..7);
        assert_eq!(band.with_halo(1, 20), 1..7);
        assert_eq!(RowBand::new(0, 0).with_halo(3, 0), 0..0);
    }

    #[test]
    fn test_split_into_bands_views_match_bands() {
        let mut buffer = Array2::<u8>::zeros((10, 3));
        let slots = split_into_bands(buffer.view_mut(), 4);

        assert_eq!(slots.len(), 4);
        for slot in &slots {
            assert_eq!(slot.view.nrows(), slot.band.len());
            assert_eq!(slot.view.ncols(), 3);
        }
    }

    #[test]
    fn test_split_into_bands_writes_land_at_offset() {
        let mut buffer = Array2::<u8>::zeros((10, 2));
        for (i, mut slot) in split_into_bands(buffer.view_mut(), 4).into_iter().enumerate() {
            slot.view.fill(i as u8 + 1);
        }

        let col: Vec<u8> = buffer.column(0).to_vec();
        assert_eq!(col, vec![1, 1, 2, 2, 3, 3, 4, 4, 4, 4]);
    }
}
