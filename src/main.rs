//! Draws the benchmark comparison charts from
//! `benchmarking_results/benchmarking_results.csv`.
//!
//! Without arguments the four standard charts are written next to the input.
//! Set `RUST_LOG=info` (or `debug`) for progress logging.

extern crate benchcharts;
extern crate chrono;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate structopt;

use benchcharts::{Alignment, Setting};
use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::process;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "plot_graphs")]
#[structopt(about = "Draw grouped bar charts from benchmarking results.")]
struct Opt {
    /// A TOML report setting replacing the standard charts.
    #[structopt(short = "c", long = "config", parse(from_os_str))]
    config: Option<PathBuf>,

    /// The results table, overriding the setting.
    #[structopt(short = "i", long = "input", parse(from_os_str))]
    input: Option<PathBuf>,

    /// Write every chart into this directory instead.
    #[structopt(short = "o", long = "out", parse(from_os_str))]
    output_dir: Option<PathBuf>,

    /// Fail when rows do not line up with the group labels.
    #[structopt(long = "strict")]
    strict: bool,
}

fn init_logger() {
    let mut builder = env_logger::Builder::new();
    builder.format(|buf, record| {
        let t = chrono::Utc::now();
        writeln!(
            buf,
            "{} {}",
            t.format("%Y-%m-%d %H:%M:%S%.3f"),
            record.args()
        )
    });
    if let Ok(filters) = env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn run(opt: Opt) -> benchcharts::Result<()> {
    let mut setting = match opt.config {
        Some(ref path) => Setting::init(path)?,
        None => Setting::default(),
    };
    if let Some(input) = opt.input {
        setting.input = input;
    }
    if let Some(ref dir) = opt.output_dir {
        setting.redirect_output(dir);
    }
    if opt.strict {
        setting.alignment = Alignment::Strict;
    }

    let created = benchcharts::generate_charts(&setting)?;
    debug!("created {} charts", created.len());
    Ok(())
}

fn main() {
    init_logger();
    let opt = Opt::from_args();

    if let Err(ref e) = run(opt) {
        let stderr = &mut ::std::io::stderr();
        writeln!(stderr, "error: {}", e).ok();
        for cause in e.iter().skip(1) {
            writeln!(stderr, "caused by: {}", cause).ok();
        }
        process::exit(1);
    }
}
