//! Report setting in TOML.
//!
//! Without a setting file the report draws the four standard charts:
//!
//! ```toml
//! input = "benchmarking_results/benchmarking_results.csv"
//! alignment = "trust"
//!
//! [[chart]]
//! benchmark = "Sum of squares"
//! x_label = "n"
//! group_labels = ["1000", "10000", "50000"]
//! title = "Sum of Squares Benchmark"
//! output = "benchmarking_results/sum_of_squares_benchmark.pdf"
//! ```
use errors::*;
use layout::Alignment;
use measurement::Category;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use toml;

/// Default location of the results table.
pub const DEFAULT_INPUT: &str = "benchmarking_results/benchmarking_results.csv";

/// Default directory for the charts.
pub const DEFAULT_OUTPUT_DIR: &str = "benchmarking_results";

/// One chart to draw.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ChartSpec {
    /// `Benchmark` value selecting the rows.
    pub benchmark: String,

    /// Label of the horizontal axis.
    pub x_label: String,

    /// One label per cluster, in row order.
    pub group_labels: Vec<String>,

    /// Chart title.
    pub title: String,

    /// Where to write the chart; the extension picks the format.
    pub output: PathBuf,
}

impl ChartSpec {
    fn standard(category: Category) -> ChartSpec {
        let (x_label, groups, title, file): (&str, [&str; 3], &str, &str) = match category {
            Category::SumOfSquares => (
                "n",
                ["1000", "10000", "50000"],
                "Sum of Squares Benchmark",
                "sum_of_squares_benchmark.pdf",
            ),
            Category::Recursion => (
                "Depth",
                ["100", "1000", "5000"],
                "Recursion Benchmark",
                "recursion_benchmark.pdf",
            ),
            Category::LinkedListTraversal => (
                "List Length",
                ["1000", "5000", "20000"],
                "Linked-List Traversal Benchmark",
                "linked_list_traversal_benchmark.pdf",
            ),
            Category::ArrayTraversal => (
                "Array Length",
                ["1000", "5000", "20000"],
                "Array Traversal Benchmark",
                "array_traversal_benchmark.pdf",
            ),
        };
        ChartSpec {
            benchmark: category.label().to_string(),
            x_label: x_label.to_string(),
            group_labels: groups.iter().map(|g| g.to_string()).collect(),
            title: title.to_string(),
            output: Path::new(DEFAULT_OUTPUT_DIR).join(file),
        }
    }
}

/// The report setting.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Setting {
    /// Path to the results table.
    pub input: PathBuf,

    /// How rows are matched with group labels.
    pub alignment: Alignment,

    /// Charts, drawn in order.
    #[serde(rename = "chart")]
    pub charts: Vec<ChartSpec>,
}

impl Default for Setting {
    fn default() -> Self {
        Setting {
            input: PathBuf::from(DEFAULT_INPUT),
            alignment: Alignment::Trust,
            charts: Category::ALL.iter().map(|&c| ChartSpec::standard(c)).collect(),
        }
    }
}

impl Setting {
    /// Initialize from a file.
    pub fn init<P: AsRef<Path>>(path: P) -> Result<Setting> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .chain_err(|| ErrorKind::Setting(path.display().to_string()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .chain_err(|| ErrorKind::Setting(path.display().to_string()))?;
        Setting::parse(&contents).chain_err(|| ErrorKind::Setting(path.display().to_string()))
    }

    /// Parses a setting from TOML text. Missing keys keep their defaults.
    pub fn parse(contents: &str) -> Result<Setting> {
        let setting = toml::from_str(contents)?;
        Ok(setting)
    }

    /// Moves every chart into `dir`, keeping file names.
    pub fn redirect_output<P: AsRef<Path>>(&mut self, dir: P) {
        for chart in &mut self.charts {
            let name = chart.output.file_name().map(|n| n.to_owned());
            if let Some(name) = name {
                chart.output = dir.as_ref().join(name);
            }
        }
    }
}
