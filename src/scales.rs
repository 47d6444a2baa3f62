use crate::model::Commit;
use chrono::{DateTime, FixedOffset};

pub const DEFAULT_CHART_WIDTH: f64 = 920.0;
pub const DEFAULT_CHART_HEIGHT: f64 = 530.0;

const MIN_RADIUS: f64 = 3.0;
/// Half-width of the time domain when every commit shares one instant.
const DEGENERATE_HALF_SPAN_MS: i64 = 24 * 60 * 60 * 1000;
const MAX_RADIUS: f64 = 30.0;

const HOUR_STOPS: [(f64, (u8, u8, u8)); 5] = [
    (0.0, (0x1E, 0x3A, 0x8A)),
    (6.0, (0x25, 0x63, 0xEB)),
    (12.0, (0xF5, 0x9E, 0x0B)),
    (18.0, (0xD9, 0x77, 0x06)),
    (24.0, (0x1E, 0x3A, 0x8A)),
];

/// Chart scales for the commit scatterplot: time on x, hour of day on y, radius by lines edited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScales {
    pub width: f64,
    pub height: f64,
    time_min_ms: i64,
    time_max_ms: i64,
    lines_min: f64,
    lines_max: f64,
}

impl ChartScales {
    pub fn fit<C: AsRef<Commit>>(commits: &[C], width: f64, height: f64) -> Self {
        let times = commits.iter().map(|c| c.as_ref().datetime.timestamp_millis());
        let mut time_min_ms = times.clone().min().unwrap_or(0);
        let mut time_max_ms = times.max().unwrap_or(0);
        if !commits.is_empty() && time_min_ms == time_max_ms {
            time_min_ms -= DEGENERATE_HALF_SPAN_MS;
            time_max_ms += DEGENERATE_HALF_SPAN_MS;
        }

        let lines = commits.iter().map(|c| c.as_ref().total_lines as f64);
        let lines_min = lines.clone().fold(f64::INFINITY, f64::min);
        let lines_max = lines.fold(f64::NEG_INFINITY, f64::max);

        Self {
            width,
            height,
            time_min_ms,
            time_max_ms,
            lines_min: if lines_min.is_finite() { lines_min } else { 0.0 },
            lines_max: if lines_max.is_finite() { lines_max } else { 0.0 },
        }
    }

    pub fn x(&self, datetime: &DateTime<FixedOffset>) -> f64 {
        if self.time_max_ms == self.time_min_ms {
            return self.width / 2.0;
        }
        let t = (datetime.timestamp_millis() - self.time_min_ms) as f64;
        t / (self.time_max_ms - self.time_min_ms) as f64 * self.width
    }

    /// Hour 0 sits at the bottom of the chart, hour 24 at the top.
    pub fn y(&self, hour_frac: f64) -> f64 {
        (24.0 - hour_frac) * self.height / 24.0
    }

    /// Timestamp (epoch milliseconds) at chart coordinate `x`.
    pub fn invert_x(&self, x: f64) -> i64 {
        if self.width <= 0.0 {
            return self.time_min_ms;
        }
        let span = (self.time_max_ms - self.time_min_ms) as f64;
        self.time_min_ms + (x / self.width * span).round() as i64
    }

    pub fn invert_y(&self, y: f64) -> f64 {
        if self.height <= 0.0 {
            return 0.0;
        }
        (self.height - y) * 24.0 / self.height
    }

    /// Square-root scale, so dot area tracks lines edited.
    pub fn radius(&self, total_lines: u64) -> f64 {
        let (lo, hi) = (self.lines_min.sqrt(), self.lines_max.sqrt());
        if hi <= lo {
            return (MIN_RADIUS + MAX_RADIUS) / 2.0;
        }
        let t = ((total_lines as f64).sqrt() - lo) / (hi - lo);
        MIN_RADIUS + t.clamp(0.0, 1.0) * (MAX_RADIUS - MIN_RADIUS)
    }

    pub fn project(&self, commit: &Commit) -> (f64, f64) {
        (self.x(&commit.datetime), self.y(commit.hour_frac))
    }
}

/// Dot color for a time of day: deep blue at night, orange around midday.
pub fn hour_color(hour_frac: f64) -> (u8, u8, u8) {
    let h = if hour_frac.is_finite() { hour_frac.clamp(0.0, 24.0) } else { 0.0 };
    for pair in HOUR_STOPS.windows(2) {
        let (h0, c0) = pair[0];
        let (h1, c1) = pair[1];
        if h <= h1 {
            let t = (h - h0) / (h1 - h0);
            let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
            return (lerp(c0.0, c1.0), lerp(c0.1, c1.1), lerp(c0.2, c1.2));
        }
    }
    HOUR_STOPS[HOUR_STOPS.len() - 1].1
}

/// Commits ordered for drawing: largest first, so small dots stay visible on top.
pub fn draw_order<'a, I>(commits: I) -> Vec<&'a Commit>
where
    I: IntoIterator<Item = &'a Commit>,
{
    let mut sorted: Vec<&Commit> = commits.into_iter().collect();
    sorted.sort_by(|a, b| b.total_lines.cmp(&a.total_lines));
    sorted
}
