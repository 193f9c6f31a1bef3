//! Bar geometry for grouped bar charts.
//!
//! A `BarLayout` holds everything needed to draw a chart (which series,
//! where each bar sits, how tall it is and how long its whisker is) without
//! touching any drawing backend, so the numbers can be checked directly.
use errors::*;
use measurement::{Environment, Measurement, Table};

/// Bar width when three environments share a cluster.
pub const BAR_WIDTH: f64 = 0.25;

/// Bar width when the unchecked JavAssembler build adds a fourth bar.
pub const NARROW_BAR_WIDTH: f64 = 0.2;

/// An RGB colour.
pub type Rgb = (u8, u8, u8);

/// `#252a36`
pub const COLOR1: Rgb = (0x25, 0x2a, 0x36);
/// `#68c8c6`
pub const COLOR2: Rgb = (0x68, 0xc8, 0xc6);
/// `#ff6166`
pub const COLOR3: Rgb = (0xff, 0x61, 0x66);
/// `#fcdf50`
pub const COLOR4: Rgb = (0xfc, 0xdf, 0x50);

/// Environment, legend text and colour of each bar in a cluster, left to
/// right.
const THREE_BARS: [(Environment, &str, Rgb); 3] = [
    (Environment::JavAssembler, "JavAssembler", COLOR1),
    (Environment::JavaScript, "JavaScript", COLOR2),
    (Environment::Cpp, "C++", COLOR3),
];

const FOUR_BARS: [(Environment, &str, Rgb); 4] = [
    (Environment::JavAssembler, "JavAssembler (with checks)", COLOR1),
    (Environment::JavAssemblerNoChecks, "JavAssembler (without checks)", COLOR4),
    (Environment::JavaScript, "JavaScript", COLOR2),
    (Environment::Cpp, "C++", COLOR3),
];

/// How to treat the positional link between rows and group labels.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Pair rows with labels by position; mismatches are only logged.
    Trust,
    /// Fail when an environment's row count differs from the number of
    /// labels, or when a recorded `Size` differs from its label.
    Strict,
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::Trust
    }
}

/// A single bar with its error whisker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Index of the cluster (group label) this bar belongs to.
    pub group: usize,

    /// Horizontal centre in axis units; cluster `i` is centred on `i`.
    pub x: f64,

    /// Bar width in axis units.
    pub width: f64,

    /// Mean time (ms).
    pub height: f64,

    /// Half-length of the whisker, the standard deviation (ms).
    pub error: f64,
}

impl Bar {
    /// Left edge.
    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Lower and upper whisker ends.
    pub fn whisker(&self) -> (f64, f64) {
        (self.height - self.error, self.height + self.error)
    }
}

/// All bars of one environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Environment measured.
    pub environment: Environment,

    /// Legend text.
    pub legend: &'static str,

    /// Fill colour.
    pub color: Rgb,

    /// One bar per group label that has a matching row.
    pub bars: Vec<Bar>,
}

/// Bar geometry for one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    groups: Vec<String>,
    bar_width: f64,
    series: Vec<Series>,
}

impl BarLayout {
    /// Lays out the rows of one benchmark against `groups`.
    ///
    /// The n-th row of an environment is drawn in the n-th group. Rows past
    /// the last group are dropped and groups without a row get no bar; under
    /// `Alignment::Strict` either case is an error instead.
    pub fn build(rows: &Table, groups: &[String], alignment: Alignment) -> Result<BarLayout> {
        let slots: &[(Environment, &'static str, Rgb)] =
            if rows.environment(Environment::JavAssemblerNoChecks).is_empty() {
                &THREE_BARS
            } else {
                &FOUR_BARS
            };
        let bar_width = if slots.len() == FOUR_BARS.len() {
            NARROW_BAR_WIDTH
        } else {
            BAR_WIDTH
        };
        let centre = (slots.len() as f64 - 1.0) / 2.0;

        let mut series = Vec::with_capacity(slots.len());
        for (slot, &(env, legend, color)) in slots.iter().enumerate() {
            let measurements = rows.environment(env);
            check_alignment(env, &measurements, groups, alignment)?;

            let offset = (slot as f64 - centre) * bar_width;
            let bars = measurements
                .iter()
                .zip(groups.iter())
                .enumerate()
                .map(|(group, (m, _))| {
                    Bar {
                        group: group,
                        x: group as f64 + offset,
                        width: bar_width,
                        height: m.mean,
                        error: m.std_dev,
                    }
                })
                .collect::<Vec<_>>();
            trace!("{}: {} bars at offset {}", env, bars.len(), offset);
            series.push(Series {
                environment: env,
                legend: legend,
                color: color,
                bars: bars,
            });
        }

        for m in rows.rows() {
            if m.env().is_none() {
                debug!("ignoring row for unknown environment {:?}", m.environment);
            }
        }

        Ok(BarLayout {
            groups: groups.to_vec(),
            bar_width: bar_width,
            series: series,
        })
    }

    /// Group labels, left to right.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// Series in legend order.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Width of every bar.
    pub fn bar_width(&self) -> f64 {
        self.bar_width
    }

    /// Number of bars in a full cluster.
    pub fn bars_per_group(&self) -> usize {
        self.series.len()
    }

    /// All bars, series by series.
    pub fn bars<'a>(&'a self) -> impl Iterator<Item = &'a Bar> + 'a {
        self.series.iter().flat_map(|s| s.bars.iter())
    }

    /// Bars drawn in group `group`, left to right.
    pub fn cluster(&self, group: usize) -> Vec<&Bar> {
        self.bars().filter(|b| b.group == group).collect()
    }

    /// Legend texts in series order.
    pub fn legend(&self) -> Vec<&'static str> {
        self.series.iter().map(|s| s.legend).collect()
    }

    /// Upper bound for the value axis: the tallest whisker plus headroom.
    pub fn y_max(&self) -> f64 {
        let top = self.bars()
            .map(|b| b.whisker().1)
            .fold(0.0_f64, |a, b| a.max(b));
        if top > 0.0 { top * 1.1 } else { 1.0 }
    }

    /// Lower bound for the value axis: zero, or the lowest whisker end plus
    /// headroom when a deviation exceeds its mean.
    pub fn y_min(&self) -> f64 {
        let bottom = self.bars()
            .map(|b| b.whisker().0)
            .fold(0.0_f64, |a, b| a.min(b));
        bottom * 1.1
    }
}

fn check_alignment(
    env: Environment,
    measurements: &[&Measurement],
    groups: &[String],
    alignment: Alignment,
) -> Result<()> {
    let mut problems = Vec::new();
    if !measurements.is_empty() && measurements.len() != groups.len() {
        problems.push(format!(
            "{} rows for {} group labels",
            measurements.len(),
            groups.len()
        ));
    }
    for (m, label) in measurements.iter().zip(groups.iter()) {
        match m.size {
            Some(ref size) if !size.is_empty() && size != label => {
                problems.push(format!("size {} in the slot of {}", size, label))
            }
            _ => {}
        }
    }

    if problems.is_empty() {
        return Ok(());
    }
    let detail = problems.join(", ");
    match alignment {
        Alignment::Trust => {
            warn!("{}: {}", env, detail);
            Ok(())
        }
        Alignment::Strict => bail!(ErrorKind::Misaligned(env.label().to_string(), detail)),
    }
}
