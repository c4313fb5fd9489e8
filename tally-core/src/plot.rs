//! Rank/frequency bar chart.
//!
//! The chart is computed in two steps. [`layout`] maps the ranked entries to
//! bars and grid lines in unit coordinates (`0.0..=1.0` on both axes); this
//! part has no dependencies. [`save`] rasterizes the layout with `imageproc`
//! and writes a PNG, drawing the title, axis labels and tick values with an
//! embedded DejaVu Sans font. Without the `plot` feature, [`save`] reports
//! the capability as unavailable.
//!
//! ## Axes
//!
//! - **x (rank)**: bar `r` spans `[r - 1, r]` on a linear axis and
//!   `[log10 r, log10 (r + 1)]` on a log axis
//! - **y (count)**: bar height is `count` on a linear axis and `log10 count`
//!   on a log axis, whose floor sits at `log10 0.5` so count-1 bars stay visible

use tally_types::{PlotConfig, RankedEntry, Result};

/// Fraction of each bar slot left empty on either side.
const BAR_GAP: f64 = 0.1;

/// Lower bound of a log-scaled count axis.
const LOG_COUNT_FLOOR: f64 = -0.301_029_995_663_981_2;

/// One axis: maps data-space values to unit coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    log: bool,
    lo: f64,
    hi: f64,
}

impl Axis {
    /// Rank axis for `n` entries.
    pub fn rank(n: usize, log: bool) -> Self {
        let n = n.max(1) as f64;
        if log {
            Self {
                log,
                lo: 0.0,
                hi: (n + 1.0).log10(),
            }
        } else {
            Self { log, lo: 0.0, hi: n }
        }
    }

    /// Count axis for a largest count of `max`.
    pub fn count(max: u64, log: bool) -> Self {
        let max = max.max(1) as f64;
        if log {
            Self {
                log,
                lo: LOG_COUNT_FLOOR,
                hi: max.log10() + 0.1,
            }
        } else {
            Self {
                log,
                lo: 0.0,
                hi: max * 1.05,
            }
        }
    }

    /// Converts a data value to axis space (identity or `log10`).
    #[inline]
    pub fn scale(&self, value: f64) -> f64 {
        if self.log {
            value.log10()
        } else {
            value
        }
    }

    /// Maps an axis-space position to `0.0..=1.0`.
    #[inline]
    pub fn project(&self, position: f64) -> f64 {
        ((position - self.lo) / (self.hi - self.lo)).clamp(0.0, 1.0)
    }

    /// Grid lines with their data values.
    ///
    /// Decades on a log axis, a 1/2/5 step on a linear one.
    pub fn ticks(&self) -> Vec<Tick> {
        if self.log {
            let first = self.lo.max(0.0).ceil() as i32;
            let last = self.hi.floor() as i32;
            return (first..=last)
                .map(|k| Tick {
                    position: self.project(f64::from(k)),
                    value: 10f64.powi(k),
                })
                .collect();
        }

        let step = nice_step(self.hi - self.lo);
        let mut ticks = Vec::new();
        let mut v = self.lo + step;
        while v <= self.hi {
            ticks.push(Tick {
                position: self.project(v),
                value: v,
            });
            v += step;
        }
        ticks
    }
}

/// A grid line: where it sits and the data value it marks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// Position in unit coordinates.
    pub position: f64,
    /// Rank or count at that position.
    pub value: f64,
}

impl Tick {
    /// Text drawn next to the grid line: `1`, `20`, `1000`, `1e6`.
    pub fn label(&self) -> String {
        if self.value >= 1e5 {
            format!("{:.0e}", self.value)
        } else if self.value.fract() == 0.0 {
            format!("{}", self.value as u64)
        } else {
            format!("{:.1}", self.value)
        }
    }
}

/// A 1/2/5 × 10^k step giving roughly five intervals over `span`, never below 1.
fn nice_step(span: f64) -> f64 {
    let raw = span / 5.0;
    if raw <= 1.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = if normalized < 1.5 {
        1.0
    } else if normalized < 3.5 {
        2.0
    } else if normalized < 7.5 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

/// One bar in unit coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Left edge.
    pub x0: f64,
    /// Right edge.
    pub x1: f64,
    /// Height from the x axis.
    pub height: f64,
}

/// Bars and grid lines of a chart, in unit coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// One bar per ranked entry, in rank order.
    pub bars: Vec<Bar>,
    /// Vertical grid lines.
    pub x_ticks: Vec<Tick>,
    /// Horizontal grid lines.
    pub y_ticks: Vec<Tick>,
}

/// Computes the chart layout for `entries`.
pub fn layout(entries: &[RankedEntry], log_x: bool, log_y: bool) -> Layout {
    let max = entries.iter().map(|e| e.count).max().unwrap_or(0);
    let x = Axis::rank(entries.len(), log_x);
    let y = Axis::count(max, log_y);

    let bars = entries
        .iter()
        .map(|e| {
            let rank = e.rank as f64;
            let left = x.project(x.scale(rank) - if log_x { 0.0 } else { 1.0 });
            let right = x.project(x.scale(rank + if log_x { 1.0 } else { 0.0 }));
            let gap = (right - left) * BAR_GAP;
            Bar {
                x0: left + gap,
                x1: right - gap,
                height: y.project(y.scale(e.count as f64)),
            }
        })
        .collect();

    Layout {
        bars,
        x_ticks: x.ticks(),
        y_ticks: y.ticks(),
    }
}

/// Returns `true` if this build can write PNG plots.
pub const fn is_available() -> bool {
    cfg!(feature = "plot")
}

#[cfg(feature = "plot")]
mod raster {
    use ab_glyph::{FontRef, PxScale};
    use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut, draw_text_mut, text_size};
    use imageproc::image::imageops::{overlay, rotate270};
    use imageproc::image::{Rgb, RgbImage};
    use imageproc::rect::Rect;
    use once_cell::sync::Lazy;
    use tally_types::{PlotConfig, RankedEntry, Result, TallyError};
    use tracing::debug;

    use super::layout;

    const DEJAVU_SANS_BYTES: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

    static EMBEDDED_FONT: Lazy<Option<FontRef<'static>>> =
        Lazy::new(|| FontRef::try_from_slice(DEJAVU_SANS_BYTES).ok());

    pub(super) const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
    const GRID: Rgb<u8> = Rgb([225, 225, 225]);
    const AXIS: Rgb<u8> = Rgb([0, 0, 0]);
    const TEXT: Rgb<u8> = Rgb([0, 0, 0]);
    pub(super) const BAR: Rgb<u8> = Rgb([31, 119, 180]);

    pub(super) const MARGIN_LEFT: u32 = 80;
    pub(super) const MARGIN_RIGHT: u32 = 40;
    pub(super) const MARGIN_TOP: u32 = 50;
    pub(super) const MARGIN_BOTTOM: u32 = 70;

    const TITLE: &str = "Rank–Frequency Plot";
    const X_LABEL: &str = "Rank";
    const Y_LABEL: &str = "Frequency";

    const TITLE_SIZE: f32 = 20.0;
    const LABEL_SIZE: f32 = 15.0;
    const TICK_SIZE: f32 = 12.0;

    /// Rasterizes the chart.
    pub fn render(entries: &[RankedEntry], config: &PlotConfig) -> Result<RgbImage> {
        let (w, h) = (config.width, config.height);
        if w <= MARGIN_LEFT + MARGIN_RIGHT || h <= MARGIN_TOP + MARGIN_BOTTOM {
            return Err(TallyError::InvalidArgument(format!(
                "plot size {w}x{h} leaves no room for the chart"
            )));
        }
        let font = EMBEDDED_FONT
            .as_ref()
            .ok_or_else(|| TallyError::Plot("embedded font could not be parsed".into()))?;

        let pw = f64::from(w - MARGIN_LEFT - MARGIN_RIGHT);
        let ph = f64::from(h - MARGIN_TOP - MARGIN_BOTTOM);
        let left = MARGIN_LEFT as f32;
        let top = MARGIN_TOP as f32;
        let right = left + pw as f32;
        let bottom = top + ph as f32;

        let chart = layout(entries, config.log_x, config.log_y);
        let mut image = RgbImage::from_pixel(w, h, BACKGROUND);

        for tick in &chart.x_ticks {
            let x = left + (tick.position * pw) as f32;
            draw_line_segment_mut(&mut image, (x, top), (x, bottom), GRID);
        }
        for tick in &chart.y_ticks {
            let y = bottom - (tick.position * ph) as f32;
            draw_line_segment_mut(&mut image, (left, y), (right, y), GRID);
        }

        for bar in &chart.bars {
            let height = (bar.height * ph).round() as u32;
            if height == 0 {
                continue;
            }
            let x0 = MARGIN_LEFT as i32 + (bar.x0 * pw).round() as i32;
            let width = ((bar.x1 - bar.x0) * pw).round().max(1.0) as u32;
            let y0 = (MARGIN_TOP + (ph as u32).saturating_sub(height)) as i32;
            draw_filled_rect_mut(&mut image, Rect::at(x0, y0).of_size(width, height), BAR);
        }

        draw_line_segment_mut(&mut image, (left, bottom), (right, bottom), AXIS);
        draw_line_segment_mut(&mut image, (left, top), (left, bottom), AXIS);

        let tick_scale = PxScale::from(TICK_SIZE);
        for tick in &chart.x_ticks {
            let label = tick.label();
            let (tw, _) = text_size(tick_scale, font, &label);
            let x = left as i32 + (tick.position * pw) as i32 - tw as i32 / 2;
            draw_text_mut(&mut image, TEXT, x, bottom as i32 + 6, tick_scale, font, &label);
        }
        for tick in &chart.y_ticks {
            let label = tick.label();
            let (tw, th) = text_size(tick_scale, font, &label);
            let y = bottom as i32 - (tick.position * ph) as i32 - th as i32 / 2;
            draw_text_mut(&mut image, TEXT, left as i32 - 6 - tw as i32, y, tick_scale, font, &label);
        }

        let title_scale = PxScale::from(TITLE_SIZE);
        let (tw, th) = text_size(title_scale, font, TITLE);
        let title_x = (w as i32 - tw as i32) / 2;
        let title_y = (MARGIN_TOP as i32 - th as i32) / 2;
        draw_text_mut(&mut image, TEXT, title_x, title_y, title_scale, font, TITLE);

        let label_scale = PxScale::from(LABEL_SIZE);
        let (tw, _) = text_size(label_scale, font, X_LABEL);
        let x = left as i32 + (pw as i32 - tw as i32) / 2;
        draw_text_mut(&mut image, TEXT, x, bottom as i32 + 34, label_scale, font, X_LABEL);

        // Vertical label: draw flat, then turn it to read bottom to top.
        let (tw, th) = text_size(label_scale, font, Y_LABEL);
        let mut flat = RgbImage::from_pixel(tw + 2, th + 4, BACKGROUND);
        draw_text_mut(&mut flat, TEXT, 1, 0, label_scale, font, Y_LABEL);
        let upright = rotate270(&flat);
        let y = i64::from(MARGIN_TOP) + (ph as i64 - i64::from(upright.height())) / 2;
        overlay(&mut image, &upright, 6, y);

        debug!(bars = chart.bars.len(), width = w, height = h, "plot rendered");
        Ok(image)
    }

    pub fn save(entries: &[RankedEntry], config: &PlotConfig) -> Result<()> {
        let image = render(entries, config)?;
        image
            .save(&config.path)
            .map_err(|e| TallyError::Plot(format!("{}: {e}", config.path.display())))
    }
}

#[cfg(feature = "plot")]
pub use raster::render;

/// Renders the chart and writes it to `config.path` as PNG, replacing any
/// existing file.
///
/// # Errors
///
/// `Plot` if rendering or writing fails; `OptionalDependencyUnavailable`
/// when built without the `plot` feature.
#[cfg(feature = "plot")]
pub fn save(entries: &[RankedEntry], config: &PlotConfig) -> Result<()> {
    raster::save(entries, config)
}

/// Plotting is not compiled in; always fails.
#[cfg(not(feature = "plot"))]
pub fn save(_entries: &[RankedEntry], _config: &PlotConfig) -> Result<()> {
    Err(tally_types::TallyError::OptionalDependencyUnavailable {
        capability: tally_types::CapabilityKind::Plot,
        reason: "built without PNG support\n        Fix: rebuild with `--features plot`".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(counts: &[u64]) -> Vec<RankedEntry> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &c)| RankedEntry::new(format!("t{i}"), c, i + 1))
            .collect()
    }

    #[test]
    fn linear_bars_fill_slots_in_order() {
        let l = layout(&entries(&[4, 2, 1, 1]), false, false);
        assert_eq!(l.bars.len(), 4);
        for pair in l.bars.windows(2) {
            assert!(pair[0].x1 < pair[1].x0);
            assert!(pair[0].height >= pair[1].height);
        }
        let first = l.bars[0];
        assert!((first.x0 - 0.025).abs() < 1e-9);
        assert!((first.x1 - 0.225).abs() < 1e-9);
        assert!((first.height - 1.0 / 1.05).abs() < 1e-9);
    }

    #[test]
    fn log_count_keeps_single_occurrences_visible() {
        let l = layout(&entries(&[100, 1]), false, true);
        assert!(l.bars[1].height > 0.0);
        assert!(l.bars[0].height > l.bars[1].height);
    }

    #[test]
    fn log_rank_narrows_later_bars() {
        let l = layout(&entries(&[9, 5, 3, 2, 1]), true, false);
        let widths: Vec<f64> = l.bars.iter().map(|b| b.x1 - b.x0).collect();
        for pair in widths.windows(2) {
            assert!(pair[0] > pair[1]);
        }
        assert!(l.bars[0].x0 > 0.0);
        assert!(l.bars[4].x1 < 1.0);
    }

    #[test]
    fn empty_layout_has_no_bars() {
        let l = layout(&[], true, true);
        assert!(l.bars.is_empty());
    }

    #[test]
    fn coordinates_stay_in_unit_range() {
        for (lx, ly) in [(false, false), (true, false), (false, true), (true, true)] {
            let l = layout(&entries(&[50, 20, 20, 7, 3, 1]), lx, ly);
            for b in &l.bars {
                assert!((0.0..=1.0).contains(&b.x0));
                assert!((0.0..=1.0).contains(&b.x1));
                assert!((0.0..=1.0).contains(&b.height));
            }
            for t in l.x_ticks.iter().chain(&l.y_ticks) {
                assert!((0.0..=1.0).contains(&t.position));
            }
        }
    }

    #[test]
    fn log_ticks_are_decades() {
        let axis = Axis::count(1000, true);
        let values: Vec<f64> = axis.ticks().iter().map(|t| t.value).collect();
        assert_eq!(values, [1.0, 10.0, 100.0, 1000.0]);
    }

    #[test]
    fn linear_ticks_step_through_counts() {
        let labels: Vec<String> = Axis::count(100, false).ticks().iter().map(Tick::label).collect();
        assert_eq!(labels, ["20", "40", "60", "80", "100"]);
    }

    #[test]
    fn tick_labels() {
        let tick = |value| Tick { position: 0.0, value };
        assert_eq!(tick(1.0).label(), "1");
        assert_eq!(tick(1000.0).label(), "1000");
        assert_eq!(tick(2.5).label(), "2.5");
        assert_eq!(tick(1e6).label(), "1e6");
    }

    #[test]
    fn nice_steps() {
        assert_eq!(nice_step(3.0), 1.0);
        assert_eq!(nice_step(50.0), 10.0);
        assert_eq!(nice_step(100.0), 20.0);
        assert_eq!(nice_step(210.0), 50.0);
    }

    #[cfg(feature = "plot")]
    #[test]
    fn render_draws_bars() {
        use raster::{BAR, MARGIN_BOTTOM, MARGIN_LEFT};

        let config = PlotConfig {
            width: 400,
            height: 300,
            ..PlotConfig::default()
        };
        let image = render(&entries(&[10, 5]), &config).unwrap();
        assert_eq!(image.dimensions(), (400, 300));

        let pw = 400 - MARGIN_LEFT - raster::MARGIN_RIGHT;
        let x = MARGIN_LEFT + pw / 4;
        let y = 300 - MARGIN_BOTTOM - 5;
        assert_eq!(*image.get_pixel(x, y), BAR);
    }

    #[cfg(feature = "plot")]
    #[test]
    fn render_draws_title_and_labels() {
        use raster::{BACKGROUND, MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_TOP};

        let config = PlotConfig {
            width: 400,
            height: 300,
            ..PlotConfig::default()
        };
        let image = render(&entries(&[10, 5]), &config).unwrap();
        let inked = |x0: u32, y0: u32, x1: u32, y1: u32| {
            (y0..y1)
                .flat_map(|y| (x0..x1).map(move |x| (x, y)))
                .filter(|&(x, y)| *image.get_pixel(x, y) != BACKGROUND)
                .count()
        };

        // title band, y axis label strip, x axis label band
        assert!(inked(0, 0, 400, MARGIN_TOP) > 50);
        assert!(inked(0, MARGIN_TOP, 24, 300 - MARGIN_BOTTOM) > 30);
        assert!(inked(MARGIN_LEFT, 300 - MARGIN_BOTTOM + 30, 400, 300) > 20);
        // tick values left of the y axis
        assert!(inked(24, MARGIN_TOP, MARGIN_LEFT - 2, 300 - MARGIN_BOTTOM) > 20);
    }

    #[cfg(feature = "plot")]
    #[test]
    fn render_rejects_tiny_canvas() {
        let config = PlotConfig {
            width: 50,
            height: 50,
            ..PlotConfig::default()
        };
        assert!(render(&entries(&[1]), &config).is_err());
    }

    #[cfg(feature = "plot")]
    #[test]
    fn save_writes_png_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.png");
        std::fs::write(&path, b"stale").unwrap();

        let config = PlotConfig {
            path: path.clone(),
            width: 320,
            height: 240,
            ..PlotConfig::default()
        };
        save(&entries(&[3, 2, 1]), &config).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[cfg(not(feature = "plot"))]
    #[test]
    fn save_unavailable_without_feature() {
        assert!(!is_available());
        assert!(save(&entries(&[1]), &PlotConfig::default()).is_err());
    }
}
