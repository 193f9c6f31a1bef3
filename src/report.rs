//! The report driver: one chart per configured benchmark, in order.
use errors::*;
use measurement::Table;
use render::plot_graph;
use setting::Setting;
use std::io;
use std::path::PathBuf;

/// Loads the results table and draws every chart of `setting`.
///
/// Charts are drawn one after another; the first failure stops the run and
/// charts written before it stay on disk. Returns the written paths.
pub fn generate_charts(setting: &Setting) -> Result<Vec<PathBuf>> {
    let data = Table::from_path(&setting.input)?;
    info!(
        "loaded {} measurements from {}",
        data.len(),
        setting.input.display()
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut created = Vec::with_capacity(setting.charts.len());
    for chart in &setting.charts {
        let subset = data.filter(&chart.benchmark);
        if subset.is_empty() {
            warn!("no measurements for benchmark {:?}", chart.benchmark);
        }
        plot_graph(&subset, chart, setting.alignment, &mut out)
            .chain_err(|| format!("failed to draw chart '{}'", chart.title))?;
        created.push(chart.output.clone());
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout::{Alignment, BarLayout};
    use std::fs;
    use std::path::Path;
    use tempfile;

    const RESULTS: &str = "\
Benchmark,Environment,Size,Mean (ms),Standard Deviation (ms)
Sum of squares,JavAssembler,1000,0.011,0.001
Sum of squares,JavaScript,1000,0.015,0.002
Sum of squares,C++,1000,0.006,0.0005
Sum of squares,JavAssembler,10000,0.104,0.009
Sum of squares,JavaScript,10000,0.151,0.012
Sum of squares,C++,10000,0.058,0.004
Sum of squares,JavAssembler,50000,0.521,0.031
Sum of squares,JavaScript,50000,0.744,0.052
Sum of squares,C++,50000,0.290,0.017
";

    fn setting_in(dir: &Path) -> Setting {
        let input = dir.join("benchmarking_results.csv");
        fs::write(&input, RESULTS).unwrap();
        let mut setting = Setting::default();
        setting.input = input;
        setting.redirect_output(dir);
        setting
    }

    #[test]
    fn draws_every_chart_even_without_rows() {
        let dir = tempfile::tempdir().unwrap();
        let setting = setting_in(dir.path());
        let created = generate_charts(&setting).unwrap();
        assert_eq!(created.len(), 4);
        for path in &created {
            let meta = fs::metadata(path).unwrap();
            assert!(meta.len() > 0, "{} is empty", path.display());
        }
        assert_eq!(
            created[0],
            dir.path().join("sum_of_squares_benchmark.pdf")
        );
    }

    #[test]
    fn sum_of_squares_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let setting = setting_in(dir.path());
        generate_charts(&setting).unwrap();

        let chart = &setting.charts[0];
        let pdf = fs::read(&chart.output).unwrap();
        assert!(pdf.starts_with(b"%PDF"));

        let data = Table::from_path(&setting.input).unwrap();
        let subset = data.filter(&chart.benchmark);
        let layout = BarLayout::build(&subset, &chart.group_labels, Alignment::Strict).unwrap();
        assert_eq!(layout.groups().len(), 3);
        assert_eq!(layout.bars().count(), 9);
        let heights = layout.series()[0]
            .bars
            .iter()
            .map(|b| b.height)
            .collect::<Vec<_>>();
        assert_eq!(heights, vec![0.011, 0.104, 0.521]);
    }

    #[test]
    fn missing_input_aborts_before_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let mut setting = Setting::default();
        setting.input = dir.path().join("absent.csv");
        setting.redirect_output(dir.path());
        match generate_charts(&setting) {
            Err(Error(ErrorKind::MissingInput(_), _)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(!setting.charts[0].output.exists());
    }

    #[test]
    fn failure_stops_remaining_charts() {
        let dir = tempfile::tempdir().unwrap();
        let mut setting = setting_in(dir.path());
        setting.charts[1].output = dir.path().join("recursion_benchmark.png");
        assert!(generate_charts(&setting).is_err());
        assert!(setting.charts[0].output.exists());
        assert!(!setting.charts[2].output.exists());
    }
}
