//! Error types for benchcharts.

/// Creates the Error, ErrorKind, ResultExt, and Result types
error_chain!{
    errors {
        MissingInput(path: String) {
            description("input table not found")
            display("input table not found: {}", path)
        }
        MissingColumn(column: String) {
            description("input table lacks a required column")
            display("input table lacks required column '{}'", column)
        }
        MalformedTable(detail: String) {
            description("error in parsing the input table")
            display("malformed input table: {}", detail)
        }
        InvalidMeasurement(row: usize, detail: String) {
            description("measurement out of range")
            display("invalid measurement in row {}: {}", row, detail)
        }
        Misaligned(environment: String, detail: String) {
            description("rows do not line up with group labels")
            display("rows for '{}' do not line up with group labels: {}", environment, detail)
        }
        UnsupportedFormat(path: String) {
            description("unsupported output format")
            display("cannot infer a supported output format from '{}'", path)
        }
        Convert(detail: String) {
            description("error in converting the chart")
            display("failed to convert chart: {}", detail)
        }
        UnwritableOutput(path: String) {
            description("error in writing the chart")
            display("failed to write chart to {}", path)
        }
        Setting(path: String) {
            description("error in loading the report setting")
            display("failed to load report setting from {}", path)
        }
    }

    foreign_links {
        Io(::std::io::Error);
        Csv(::csv::Error);
        Toml(::toml::de::Error);
        Draw(::plotters::drawing::DrawingAreaErrorKind<::std::io::Error>);
    }
}
