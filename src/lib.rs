//! benchcharts: grouped bar charts for JavAssembler benchmarking results.
//!
//! The pipeline is load, filter, lay out, draw. A results `Table` is split
//! per benchmark, each subset becomes a `BarLayout` (plain bar geometry, no
//! drawing involved) and the layout is drawn to an SVG chart.
#![recursion_limit = "1024"]
#![deny(missing_docs)]

extern crate csv;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
extern crate plotters;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate svg2pdf;
extern crate toml;

#[cfg(test)]
extern crate tempfile;

#[allow(missing_docs)]
pub mod errors;
pub mod layout;
pub mod measurement;
pub mod render;
mod report;
mod setting;

pub use errors::{Error, ErrorKind, Result, ResultExt};
pub use layout::{Alignment, Bar, BarLayout, Series};
pub use measurement::{Category, Environment, Measurement, Table};
pub use render::{plot_graph, OutputFormat};
pub use report::generate_charts;
pub use setting::{ChartSpec, Setting};
