use rayon::prelude::*;

use crate::{
    foundation::core::{OutputSize, Raster, fallback_pixel},
    foundation::error::{TilewarpError, TilewarpResult},
    render::settings::RenderSettings,
    sample::tiled::TiledSampler,
    transform::affine::ScaleTranslate,
    transform::non_linear::ComplexMap,
};

/// Render `source` through the inverse map `map`.
///
/// For every output pixel: pixel -> plane (output window) -> `map` -> preimage -> tiled
/// sample. Points where the map or the sampler fail get the all-zero fallback pixel.
/// Configuration errors are returned before any pixel is computed.
pub fn render<P, M>(
    source: &Raster<P>,
    map: &M,
    settings: &RenderSettings,
) -> TilewarpResult<Raster<P>>
where
    P: image::Pixel<Subpixel = u8> + Send + Sync,
    M: ComplexMap + ?Sized,
{
    render_with_stats(source, map, settings).map(|(out, _)| out)
}

/// Aggregated render counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames rendered.
    pub frames: u64,
    /// Output pixels written.
    pub pixels_total: u64,
    /// Pixels that fell back because of a singularity or non-finite value.
    pub pixels_fallback: u64,
}

impl RenderStats {
    fn absorb(&mut self, other: RenderStats) {
        self.frames += other.frames;
        self.pixels_total += other.pixels_total;
        self.pixels_fallback += other.pixels_fallback;
    }
}

/// Render one frame and return it with its counters.
#[tracing::instrument(skip(source, map), fields(src_w = source.width(), src_h = source.height()))]
pub fn render_with_stats<P, M>(
    source: &Raster<P>,
    map: &M,
    settings: &RenderSettings,
) -> TilewarpResult<(Raster<P>, RenderStats)>
where
    P: image::Pixel<Subpixel = u8> + Send + Sync,
    M: ComplexMap + ?Sized,
{
    settings.validate()?;
    let job = FrameJob::prepare(source, settings)?;

    let out = if settings.threading.parallel {
        let pool = build_thread_pool(settings.threading.threads)?;
        pool.install(|| job.run(map, true))?
    } else {
        job.run(map, false)?
    };

    tracing::debug!(
        pixels = out.1.pixels_total,
        fallback = out.1.pixels_fallback,
        "render complete"
    );
    Ok(out)
}

/// Render a sequence of frames with the same map and settings, preserving input order.
pub fn render_frames<P, M>(
    frames: &[Raster<P>],
    map: &M,
    settings: &RenderSettings,
) -> TilewarpResult<Vec<Raster<P>>>
where
    P: image::Pixel<Subpixel = u8> + Send + Sync,
    M: ComplexMap + ?Sized,
{
    render_frames_with_stats(frames, map, settings).map(|(out, _)| out)
}

/// Render a frame sequence and return the frames plus combined counters.
///
/// In parallel mode whole frames are distributed across the pool; each frame's rows are then
/// rendered on the worker that owns it.
#[tracing::instrument(skip(frames, map), fields(frame_count = frames.len()))]
pub fn render_frames_with_stats<P, M>(
    frames: &[Raster<P>],
    map: &M,
    settings: &RenderSettings,
) -> TilewarpResult<(Vec<Raster<P>>, RenderStats)>
where
    P: image::Pixel<Subpixel = u8> + Send + Sync,
    M: ComplexMap + ?Sized,
{
    if frames.is_empty() {
        return Err(TilewarpError::validation("frame sequence must be non-empty"));
    }
    settings.validate()?;
    let jobs = frames
        .iter()
        .map(|f| FrameJob::prepare(f, settings))
        .collect::<TilewarpResult<Vec<_>>>()?;

    let rendered = if settings.threading.parallel {
        let pool = build_thread_pool(settings.threading.threads)?;
        pool.install(|| {
            jobs.par_iter()
                .map(|job| job.run(map, false))
                .collect::<Vec<_>>()
        })
    } else {
        jobs.iter().map(|job| job.run(map, false)).collect()
    };

    let mut out = Vec::with_capacity(rendered.len());
    let mut stats = RenderStats::default();
    for item in rendered {
        let (frame, frame_stats) = item?;
        stats.absorb(frame_stats);
        out.push(frame);
    }

    tracing::debug!(
        frames = stats.frames,
        pixels = stats.pixels_total,
        fallback = stats.pixels_fallback,
        "frame sequence complete"
    );
    Ok((out, stats))
}

/// Everything needed to fill one output raster.
struct FrameJob<'a, P>
where
    P: image::Pixel<Subpixel = u8>,
{
    sampler: TiledSampler<'a, P>,
    window: ScaleTranslate,
    size: OutputSize,
}

impl<'a, P> FrameJob<'a, P>
where
    P: image::Pixel<Subpixel = u8> + Send + Sync,
{
    fn prepare(source: &'a Raster<P>, settings: &RenderSettings) -> TilewarpResult<Self> {
        let sampler = match settings.tile_window {
            Some(window) => TiledSampler::with_window(source, window)?,
            None => TiledSampler::new(source)?,
        };
        Ok(Self {
            sampler,
            window: settings.output_window()?,
            size: settings.output_size()?,
        })
    }

    fn run<M>(&self, map: &M, parallel_rows: bool) -> TilewarpResult<(Raster<P>, RenderStats)>
    where
        M: ComplexMap + ?Sized,
    {
        let channels = usize::from(P::CHANNEL_COUNT);
        let stride = (self.size.width as usize)
            .checked_mul(channels)
            .ok_or_else(|| TilewarpError::validation("output row size overflow"))?;
        let len = stride
            .checked_mul(self.size.height as usize)
            .ok_or_else(|| TilewarpError::validation("output buffer size overflow"))?;
        let mut buf = vec![0u8; len];

        // Rows are disjoint slices of `buf`, so each cell has exactly one writer.
        let fallback: u64 = if parallel_rows {
            buf.par_chunks_exact_mut(stride)
                .enumerate()
                .map(|(y, row)| self.render_row(map, y as u32, row))
                .sum()
        } else {
            buf.chunks_exact_mut(stride)
                .enumerate()
                .map(|(y, row)| self.render_row(map, y as u32, row))
                .sum()
        };

        let out = Raster::<P>::from_raw(self.size.width, self.size.height, buf)
            .ok_or_else(|| TilewarpError::render("output buffer does not match raster size"))?;
        Ok((
            out,
            RenderStats {
                frames: 1,
                pixels_total: self.size.pixel_count(),
                pixels_fallback: fallback,
            },
        ))
    }

    /// Fill one output row; returns how many pixels fell back.
    fn render_row<M>(&self, map: &M, y: u32, row: &mut [u8]) -> u64
    where
        M: ComplexMap + ?Sized,
    {
        let channels = usize::from(P::CHANNEL_COUNT);
        let mut fallback = 0u64;
        for (x, cell) in row.chunks_exact_mut(channels).enumerate() {
            let z = self.window.pixel_to_plane(x as f64, f64::from(y));
            let px = match map.evaluate(z).and_then(|w| self.sampler.sample(w)) {
                Ok(px) => px,
                Err(_) => {
                    fallback += 1;
                    fallback_pixel::<P>()
                }
            };
            cell.copy_from_slice(px.channels());
        }
        fallback
    }
}

fn build_thread_pool(threads: Option<usize>) -> TilewarpResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(TilewarpError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| TilewarpError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
