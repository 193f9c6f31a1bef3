//! Measurement rows of a benchmarking results table.
//!
//! The table is produced by the benchmark harness, one row per benchmark,
//! environment and input size:
//!
//! ```ignore
//! Benchmark,Environment,Size,Mean (ms),Standard Deviation (ms)
//! Sum of squares,JavAssembler,1000,0.0081,0.0004
//! Sum of squares,JavaScript,1000,0.0113,0.0009
//! Sum of squares,C++,1000,0.0042,0.0002
//! ```
use csv;
use errors::*;
use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Columns every results table must carry.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    "Benchmark",
    "Environment",
    "Mean (ms)",
    "Standard Deviation (ms)",
];

/// The benchmark workloads reported on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Sum of the first n squares.
    SumOfSquares,
    /// Recursion to a fixed depth.
    Recursion,
    /// Build then walk a linked list.
    LinkedListTraversal,
    /// Walk an array.
    ArrayTraversal,
}

impl Category {
    /// All categories, in report order.
    pub const ALL: [Category; 4] = [
        Category::SumOfSquares,
        Category::Recursion,
        Category::LinkedListTraversal,
        Category::ArrayTraversal,
    ];

    /// The `Benchmark` value used in the results table.
    pub fn label(&self) -> &'static str {
        match *self {
            Category::SumOfSquares => "Sum of squares",
            Category::Recursion => "Recursion",
            Category::LinkedListTraversal => "Linked list traversal",
            Category::ArrayTraversal => "Array traversal",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The runtime a measurement was taken under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// JavAssembler output with array bounds and null checks.
    JavAssembler,
    /// JavAssembler output with the runtime checks compiled out.
    JavAssemblerNoChecks,
    /// Hand-written JavaScript reference.
    JavaScript,
    /// C++ compiled with Emscripten.
    Cpp,
}

impl Environment {
    /// The `Environment` value used in the results table.
    pub fn label(&self) -> &'static str {
        match *self {
            Environment::JavAssembler => "JavAssembler",
            Environment::JavAssemblerNoChecks => "JavAssembler without checks",
            Environment::JavaScript => "JavaScript",
            Environment::Cpp => "C++",
        }
    }

    /// Parses a table label; unknown labels yield `None`.
    pub fn from_label(label: &str) -> Option<Environment> {
        match label {
            "JavAssembler" => Some(Environment::JavAssembler),
            "JavAssembler without checks" => Some(Environment::JavAssemblerNoChecks),
            "JavaScript" => Some(Environment::JavaScript),
            "C++" => Some(Environment::Cpp),
            _ => None,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the results table.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Measurement {
    /// Benchmark workload name.
    #[serde(rename = "Benchmark")]
    pub benchmark: String,

    /// Runtime label.
    #[serde(rename = "Environment")]
    pub environment: String,

    /// Input size, when the harness recorded it. Older tables only convey
    /// the size by row position.
    #[serde(rename = "Size", default)]
    pub size: Option<String>,

    /// Mean execution time in milliseconds.
    #[serde(rename = "Mean (ms)")]
    pub mean: f64,

    /// Standard deviation of the execution time in milliseconds.
    #[serde(rename = "Standard Deviation (ms)")]
    pub std_dev: f64,
}

impl Measurement {
    /// The parsed environment, if it is one we know how to plot.
    pub fn env(&self) -> Option<Environment> {
        Environment::from_label(&self.environment)
    }
}

/// An in-memory results table. Row order is significant.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    rows: Vec<Measurement>,
}

impl Table {
    /// Creates a table from rows, e.g. for testing.
    pub fn from_rows(rows: Vec<Measurement>) -> Table {
        Table { rows: rows }
    }

    /// Loads a headered CSV table from `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Table> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| -> Error {
            if e.kind() == io::ErrorKind::NotFound {
                ErrorKind::MissingInput(path.display().to_string()).into()
            } else {
                e.into()
            }
        })?;
        debug!("loading measurements from {}", path.display());
        Table::from_reader(file)
    }

    /// Loads a headered CSV table from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Table> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()
            .chain_err(|| ErrorKind::MalformedTable("unreadable header".to_string()))?
            .clone();
        for column in REQUIRED_COLUMNS.iter() {
            if !headers.iter().any(|h| h == *column) {
                bail!(ErrorKind::MissingColumn(column.to_string()));
            }
        }

        let mut rows = Vec::new();
        for (i, record) in rdr.deserialize().enumerate() {
            // Row numbers are 1-based and count the header.
            let row = i + 2;
            let m: Measurement =
                record.chain_err(|| ErrorKind::MalformedTable(format!("row {}", row)))?;
            check_value(row, "mean", m.mean)?;
            check_value(row, "standard deviation", m.std_dev)?;
            trace!("row {}: {:?}", row, m);
            rows.push(m);
        }
        Ok(Table { rows: rows })
    }

    /// Returns the rows whose `Benchmark` equals `benchmark`, in order.
    pub fn filter(&self, benchmark: &str) -> Table {
        let rows = self.rows
            .iter()
            .filter(|m| m.benchmark == benchmark)
            .cloned()
            .collect();
        Table { rows: rows }
    }

    /// Returns the rows measured under `env`, in order.
    pub fn environment(&self, env: Environment) -> Vec<&Measurement> {
        self.rows.iter().filter(|m| m.env() == Some(env)).collect()
    }

    /// All rows.
    pub fn rows(&self) -> &[Measurement] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn check_value(row: usize, what: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        bail!(ErrorKind::InvalidMeasurement(
            row,
            format!("{} must be a non-negative number, got {}", what, value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Benchmark,Environment,Size,Mean (ms),Standard Deviation (ms)
Sum of squares,JavAssembler,1000,0.5,0.05
Sum of squares,JavaScript,1000,0.7,0.07
Sum of squares,C++,1000,0.2,0.01
Recursion,JavAssembler,100,1.5,0.1
Recursion,JavaScript,100,1.1,0.2
Linked list traversal,C++,1000,3.0,0.3
Array traversal,JavaScript,1000,2.0,0.4
Sum of squares,JavAssembler,10000,5.0,0.5
";

    fn sample() -> Table {
        Table::from_reader(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn loads_all_rows_in_order() {
        let table = sample();
        assert_eq!(table.len(), 8);
        let first = &table.rows()[0];
        assert_eq!(first.benchmark, "Sum of squares");
        assert_eq!(first.env(), Some(Environment::JavAssembler));
        assert_eq!(first.size, Some("1000".to_string()));
        assert_eq!(first.mean, 0.5);
        assert_eq!(first.std_dev, 0.05);
        assert_eq!(table.rows()[7].mean, 5.0);
    }

    #[test]
    fn filter_keeps_only_its_category() {
        let table = sample();
        for category in Category::ALL.iter() {
            let subset = table.filter(category.label());
            assert!(!subset.is_empty());
            assert!(subset.rows().iter().all(|m| m.benchmark == category.label()));
        }
        let sums = table.filter("Sum of squares");
        let means = sums.rows().iter().map(|m| m.mean).collect::<Vec<_>>();
        assert_eq!(means, vec![0.5, 0.7, 0.2, 5.0]);
    }

    #[test]
    fn filter_without_match_is_empty() {
        assert!(sample().filter("Matrix multiplication").is_empty());
    }

    #[test]
    fn environment_selects_rows() {
        let sums = sample().filter("Sum of squares");
        let jas = sums.environment(Environment::JavAssembler);
        assert_eq!(jas.len(), 2);
        assert!(sums.environment(Environment::JavAssemblerNoChecks).is_empty());
    }

    #[test]
    fn size_column_is_optional() {
        let csv = "Benchmark,Environment,Mean (ms),Standard Deviation (ms)\n\
                   Recursion, C++ , 1.25, 0.5\n";
        let table = Table::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.rows()[0].size, None);
        assert_eq!(table.rows()[0].env(), Some(Environment::Cpp));
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "Benchmark,Environment,Mean (ms)\nRecursion,C++,1.0\n";
        match Table::from_reader(csv.as_bytes()) {
            Err(Error(ErrorKind::MissingColumn(ref c), _)) => {
                assert_eq!(c, "Standard Deviation (ms)")
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn unparsable_number_is_malformed() {
        let csv = "Benchmark,Environment,Mean (ms),Standard Deviation (ms)\n\
                   Recursion,C++,fast,0.1\n";
        match Table::from_reader(csv.as_bytes()) {
            Err(Error(ErrorKind::MalformedTable(_), _)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn negative_deviation_is_rejected() {
        let csv = "Benchmark,Environment,Mean (ms),Standard Deviation (ms)\n\
                   Recursion,C++,1.0,-0.1\n";
        match Table::from_reader(csv.as_bytes()) {
            Err(Error(ErrorKind::InvalidMeasurement(row, _), _)) => assert_eq!(row, 2),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn missing_file_is_reported() {
        match Table::from_path("/nonexistent/benchmarking_results.csv") {
            Err(Error(ErrorKind::MissingInput(_), _)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn environment_labels_round_trip() {
        for env in [
            Environment::JavAssembler,
            Environment::JavAssemblerNoChecks,
            Environment::JavaScript,
            Environment::Cpp,
        ].iter()
        {
            assert_eq!(Environment::from_label(env.label()), Some(*env));
        }
        assert_eq!(Environment::from_label("Python"), None);
    }
}
