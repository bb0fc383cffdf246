//! Task parallelism: one worker per filter, each over the whole image.

use ndarray::ArrayView2;
use tracing::debug;

use super::{phase_pool, OutputBuffers};
use crate::error::Result;
use crate::filters::{Filter, FilterParams};

/// Run edge detection and blur concurrently on two dedicated threads.
///
/// The two workers write to different buffers. Returns after both finish.
pub fn run_task_parallel(
    input: ArrayView2<u8>,
    buffers: &mut OutputBuffers,
    params: &FilterParams,
) -> Result<()> {
    let pool = phase_pool("task", Filter::ALL.len())?;
    let OutputBuffers { edges, blurred } = buffers;

    pool.scope(|s| {
        s.spawn(|_| {
            debug!(filter = %Filter::EdgeDetection, "task worker started");
            edges.assign(&Filter::EdgeDetection.apply(input, params));
        });
        s.spawn(|_| {
            debug!(filter = %Filter::Blur, "task worker started");
            blurred.assign(&Filter::Blur.apply(input, params));
        });
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runners::run_sequential;
    use ndarray::Array2;

    #[test]
    fn test_task_parallel_matches_sequential() {
        let input = Array2::from_shape_fn((24, 17), |(y, x)| ((x * x + 5 * y) % 256) as u8);
        let params = FilterParams::default();

        let mut expected = OutputBuffers::from_input(input.view());
        run_sequential(input.view(), &mut expected, &params);

        let mut actual = OutputBuffers::from_input(input.view());
        run_task_parallel(input.view(), &mut actual, &params).unwrap();

        assert_eq!(actual, expected);
    }

    #[test]
    fn test_task_parallel_empty_image() {
        let input = Array2::<u8>::zeros((0, 5));
        let mut buffers = OutputBuffers::from_input(input.view());
        run_task_parallel(input.view(), &mut buffers, &FilterParams::default()).unwrap();
        assert_eq!(buffers.edges.dim(), (0, 5));
    }
}
