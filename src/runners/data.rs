//! Data parallelism: the image is cut into row bands and every band is
//! filtered by its own worker.
//!
//! A worker copies its band out of the input together with the filter's halo
//! rows, filters the copy, and writes the band's rows of the result through
//! its [`BandSlot`]. Because the halo carries all the context a row's output
//! depends on, the reassembled buffer is identical to filtering the whole
//! image at once.

use ndarray::{s, ArrayView2, ArrayViewMut2, ErrorKind, ShapeError};
use tracing::{debug, warn};

use super::{phase_pool, OutputBuffers};
use crate::error::Result;
use crate::filters::{Filter, FilterParams};
use crate::partition::{split_into_bands, BandSlot};

/// One unit of work: a filter applied to one band.
struct BandJob<'a> {
    filter: Filter,
    slot: BandSlot<'a>,
}

/// Band-parallel runner with a band count fixed at construction.
///
/// Keeping the count on the runner means both filters of a run see the same
/// partition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DataParallelRunner {
    band_count: usize,
}

impl DataParallelRunner {
    pub fn new(band_count: usize) -> Self {
        if band_count == 0 {
            warn!("band count 0 requested, using a single band");
        }
        Self {
            band_count: band_count.max(1),
        }
    }

    pub fn band_count(&self) -> usize {
        self.band_count
    }

    /// Apply `filter` to `input` band by band, writing into `output`.
    ///
    /// `output` must have the same shape as `input`. Empty bands get no
    /// worker. Returns once every band is written.
    pub fn run(
        &self,
        input: ArrayView2<u8>,
        output: ArrayViewMut2<u8>,
        filter: Filter,
        params: &FilterParams,
    ) -> Result<()> {
        check_shape(input.dim(), output.dim())?;
        let jobs = self.band_jobs(output, filter);
        execute(input, jobs, params)
    }

    /// Apply both filters band by band in a single phase.
    ///
    /// Spawns one edge worker and one blur worker per non-empty band, all
    /// running at the same time, and joins them together.
    pub fn run_both(
        &self,
        input: ArrayView2<u8>,
        buffers: &mut OutputBuffers,
        params: &FilterParams,
    ) -> Result<()> {
        let OutputBuffers { edges, blurred } = buffers;
        check_shape(input.dim(), edges.dim())?;
        check_shape(input.dim(), blurred.dim())?;

        let mut jobs = self.band_jobs(edges.view_mut(), Filter::EdgeDetection);
        jobs.extend(self.band_jobs(blurred.view_mut(), Filter::Blur));
        execute(input, jobs, params)
    }

    fn band_jobs<'a>(&self, output: ArrayViewMut2<'a, u8>, filter: Filter) -> Vec<BandJob<'a>> {
        split_into_bands(output, self.band_count)
            .into_iter()
            .filter(|slot| !slot.band.is_empty())
            .map(|slot| BandJob { filter, slot })
            .collect()
    }
}

fn check_shape(input: (usize, usize), output: (usize, usize)) -> Result<()> {
    if input != output {
        return Err(ShapeError::from_kind(ErrorKind::IncompatibleShape).into());
    }
    Ok(())
}

fn execute(input: ArrayView2<u8>, jobs: Vec<BandJob<'_>>, params: &FilterParams) -> Result<()> {
    if jobs.is_empty() {
        return Ok(());
    }

    let pool = phase_pool("band", jobs.len())?;
    debug!(workers = jobs.len(), "spawning band workers");

    pool.scope(|s| {
        for job in jobs {
            s.spawn(move |_| process_band(input, job, params));
        }
    });

    Ok(())
}

fn process_band(input: ArrayView2<u8>, job: BandJob<'_>, params: &FilterParams) {
    let BandJob { filter, mut slot } = job;
    let band = slot.band;
    let window = band.with_halo(filter.halo_rows(params), input.nrows());
    debug!(
        filter = %filter,
        start = band.start,
        end = band.end,
        window_start = window.start,
        window_end = window.end,
        "band worker started"
    );

    let segment = input.slice(s![window.clone(), ..]).to_owned();
    let filtered = filter.apply(segment.view(), params);

    let offset = band.start - window.start;
    slot.view
        .assign(&filtered.slice(s![offset..offset + band.len(), ..]));
}
