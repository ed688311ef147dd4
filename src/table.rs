//! Parameter tables: the CSV boundary.
//!
//! One row per parameter. The mandatory `name` (or `NAME`) column names the
//! parameter; an optional `type` (or `TYPE`) column declares one of `int`,
//! `real`, `cat`, `bool`. The remaining columns carry either exactly two
//! numeric bounds (non-categorical rows) or any number of category labels
//! (categorical rows); trailing empty cells are ignored. Without a type
//! column the type is inferred from the values.
//!
//! The export direction is intentionally lossy: bounds or category names
//! only — resolution and default do not round-trip.
//!
//! ```text
//! NAME,TYPE,,,
//! a_real,real,0,1.1,
//! an_int,int,1,9,
//! a_categorical,cat,a,b,c
//! ```

use std::io::{Read, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::parameter::{Parameter, ParameterKind};
use crate::value::{Category, Value};

/// A parsed table cell.
enum Cell {
    Int(i64),
    Real(f64),
    Text(String),
}

impl Cell {
    fn classify(raw: &str) -> Cell {
        if let Ok(v) = raw.parse::<i64>() {
            Cell::Int(v)
        } else if let Ok(v) = raw.parse::<f64>() {
            Cell::Real(v)
        } else {
            Cell::Text(raw.to_string())
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Real(v) => Some(*v),
            Cell::Text(_) => None,
        }
    }

    fn is_integral(&self) -> bool {
        matches!(self, Cell::Int(_))
    }
}

/// Reads parameter definitions from a CSV table.
///
/// # Errors
///
/// Returns an error if the name column is missing, a type cell is
/// unrecognized, a declared non-categorical row does not carry exactly two
/// values, a bound cell is not numeric, or parameter construction itself
/// fails (inverted bounds, too few categories). Errors name the offending
/// row.
pub fn read_parameters(mut reader: impl Read) -> Result<Vec<Parameter>> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;

    let mut lines = raw
        .lines()
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty());

    let header = match lines.next() {
        Some(line) => parse_record(line),
        None => return Err(Error::MissingNameColumn),
    };

    let name_col = header
        .iter()
        .position(|cell| cell == "name" || cell == "NAME")
        .ok_or(Error::MissingNameColumn)?;
    let type_col = header.iter().position(|cell| cell == "type" || cell == "TYPE");

    let mut parameters = Vec::new();
    for line in lines {
        let record = parse_record(line);
        let cell = |idx: usize| record.get(idx).map_or("", String::as_str);

        let name = cell(name_col).to_string();
        let declared = type_col.map(|idx| cell(idx).to_string());

        let mut values: Vec<&str> = (0..record.len().max(header.len()))
            .filter(|&idx| idx != name_col && Some(idx) != type_col)
            .map(cell)
            .collect();
        while values.last().is_some_and(|v| v.is_empty()) {
            values.pop();
        }

        parameters.push(build_row(&name, declared.as_deref(), &values)?);
    }

    trace_info!(parameters = parameters.len(), "loaded parameter table");
    Ok(parameters)
}

/// Reads parameter definitions from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the table is invalid; see
/// [`read_parameters`].
pub fn read_parameters_from_path(path: impl AsRef<Path>) -> Result<Vec<Parameter>> {
    let file = std::fs::File::open(path)?;
    read_parameters(std::io::BufReader::new(file))
}

fn build_row(name: &str, declared: Option<&str>, values: &[&str]) -> Result<Parameter> {
    let cells: Vec<Cell> = values.iter().map(|raw| Cell::classify(raw)).collect();

    let kind = match declared {
        Some(declared) => {
            if !matches!(declared, "int" | "real" | "cat" | "bool") {
                return Err(Error::UnknownParameterType {
                    name: name.to_string(),
                    kind: declared.to_string(),
                });
            }
            if declared != "cat" && values.len() != 2 {
                return Err(Error::WrongValueCount {
                    name: name.to_string(),
                    got: values.len(),
                });
            }
            declared
        }
        None => infer_kind(name, &cells)?,
    };

    match kind {
        "int" => {
            let lower = integral_bound(name, values[0], &cells[0])?;
            let upper = integral_bound(name, values[1], &cells[1])?;
            Parameter::integer(name, lower, upper)
        }
        "real" => {
            let lower = numeric_bound(name, values[0], &cells[0])?;
            let upper = numeric_bound(name, values[1], &cells[1])?;
            Parameter::real(name, lower, upper)
        }
        "bool" => {
            let lower = numeric_bound(name, values[0], &cells[0])?;
            let upper = numeric_bound(name, values[1], &cells[1])?;
            if lower != 0.0 || upper != 1.0 {
                return Err(Error::InvalidBooleanSupport {
                    name: name.to_string(),
                    lower,
                    upper,
                });
            }
            Parameter::boolean(name)
        }
        _ => {
            let categories: Vec<Category> = values
                .iter()
                .zip(&cells)
                .map(|(raw, cell)| {
                    let value = match cell {
                        Cell::Int(v) => Value::Int(*v),
                        Cell::Real(v) => Value::Real(*v),
                        Cell::Text(v) => Value::Str(v.clone()),
                    };
                    Category::new(*raw, value)
                })
                .collect();
            Parameter::categorical(name, categories)
        }
    }
}

fn infer_kind(name: &str, cells: &[Cell]) -> Result<&'static str> {
    if cells.len() != 2 {
        return Ok("cat");
    }
    if cells.iter().all(Cell::is_integral) {
        return Ok("int");
    }
    for cell in cells {
        if let Cell::Text(raw) = cell {
            return Err(Error::NonNumericBound {
                name: name.to_string(),
                value: raw.clone(),
            });
        }
    }
    Ok("real")
}

fn numeric_bound(name: &str, raw: &str, cell: &Cell) -> Result<f64> {
    cell.as_f64().ok_or_else(|| Error::NonNumericBound {
        name: name.to_string(),
        value: raw.to_string(),
    })
}

#[allow(clippy::cast_possible_truncation)]
fn integral_bound(name: &str, raw: &str, cell: &Cell) -> Result<i64> {
    match cell {
        Cell::Int(v) => Ok(*v),
        Cell::Real(v) if v.fract() == 0.0 => Ok(*v as i64),
        Cell::Real(v) => Err(Error::NonIntegralBound {
            name: name.to_string(),
            value: *v,
        }),
        Cell::Text(_) => Err(Error::NonNumericBound {
            name: name.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Writes parameter definitions as a CSV table.
///
/// The name column comes first, followed by the bounds (non-categorical
/// parameters) or the full category list (categorical parameters). Rows are
/// padded with empty cells to a uniform width. Resolution and default are
/// intentionally omitted, so the export is lossy.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn write_parameters(parameters: &[Parameter], mut writer: impl Write) -> std::io::Result<()> {
    let row_cells: Vec<Vec<String>> = parameters.iter().map(parameter_cells).collect();
    let width = row_cells.iter().map(Vec::len).max().unwrap_or(0);

    write!(writer, "name")?;
    for idx in 0..width {
        write!(writer, ",{idx}")?;
    }
    writeln!(writer)?;

    for (parameter, cells) in parameters.iter().zip(&row_cells) {
        write!(writer, "{}", csv_escape(parameter.name()))?;
        for cell in cells {
            write!(writer, ",{}", csv_escape(cell))?;
        }
        for _ in cells.len()..width {
            write!(writer, ",")?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Writes parameter definitions to a CSV file.
///
/// Convenience wrapper around [`write_parameters`] that creates a buffered
/// file writer.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_parameters_to_path(
    parameters: &[Parameter],
    path: impl AsRef<Path>,
) -> std::io::Result<()> {
    let file = std::fs::File::create(path)?;
    write_parameters(parameters, std::io::BufWriter::new(file))
}

fn parameter_cells(parameter: &Parameter) -> Vec<String> {
    if matches!(parameter.kind(), ParameterKind::Categorical { .. }) {
        parameter
            .categories()
            .unwrap_or_default()
            .iter()
            .map(|cat| cat.name().to_string())
            .collect()
    } else {
        let integral = parameter.is_integer_like();
        vec![
            format_bound(parameter.lower_bound(), integral),
            format_bound(parameter.upper_bound(), integral),
        ]
    }
}

/// Formats a bound so the type survives a round trip: integer-like bounds
/// print without a decimal point, real bounds always keep one.
#[allow(clippy::cast_possible_truncation)]
fn format_bound(value: f64, integral: bool) -> String {
    if integral {
        (value as i64).to_string()
    } else if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Escape a string for CSV output. If the value contains a comma, quote, or
/// newline, wrap it in double-quotes and double any embedded quotes.
fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Splits one CSV record into fields, honoring the quoting dialect
/// [`csv_escape`] writes.
fn parse_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(c);
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(core::mem::take(&mut field)),
                _ => field.push(c),
            }
        }
    }
    fields.push(field);
    fields
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn parses_typed_rows() {
        let csv = "NAME,TYPE,,,\na_real,real,0,1.1,\nan_int,int,1,9,\na_categorical,cat,a,b,c\n";
        let parameters = read_parameters(csv.as_bytes()).unwrap();

        assert_eq!(parameters.len(), 3);
        assert_eq!(parameters[0].name(), "a_real");
        assert_eq!(parameters[0].lower_bound(), 0.0);
        assert_eq!(parameters[0].upper_bound(), 1.1);
        assert_eq!(parameters[1].lower_bound(), 1.0);
        assert_eq!(parameters[1].upper_bound(), 9.0);
        assert_eq!(parameters[2].index_for_cat("c").unwrap(), 2);
    }

    #[test]
    fn infers_types_without_type_column() {
        let csv = "name,,,\nan_int,1,9,\na_real,0,1.5,\ncats,a,b,c\n";
        let parameters = read_parameters(csv.as_bytes()).unwrap();

        assert!(matches!(parameters[0].kind(), ParameterKind::Integer));
        assert!(matches!(parameters[1].kind(), ParameterKind::Real));
        assert!(matches!(
            parameters[2].kind(),
            ParameterKind::Categorical { .. }
        ));
    }

    #[test]
    fn missing_name_column_is_rejected() {
        let csv = "label,0,1\nx,0,1\n";
        assert!(matches!(
            read_parameters(csv.as_bytes()),
            Err(Error::MissingNameColumn)
        ));
    }

    #[test]
    fn declared_non_cat_row_needs_two_values() {
        let csv = "name,type,0,1,2\nx,real,0,1,2\n";
        assert!(matches!(
            read_parameters(csv.as_bytes()),
            Err(Error::WrongValueCount { got: 3, .. })
        ));
    }

    #[test]
    fn non_numeric_bound_names_the_row() {
        let csv = "name,type,0,1\nx,real,low,1\n";
        assert!(matches!(
            read_parameters(csv.as_bytes()),
            Err(Error::NonNumericBound { name, .. }) if name == "x"
        ));
    }

    #[test]
    fn unknown_type_cell_is_rejected() {
        let csv = "name,type,0,1\nx,float,0,1\n";
        assert!(matches!(
            read_parameters(csv.as_bytes()),
            Err(Error::UnknownParameterType { kind, .. }) if kind == "float"
        ));
    }

    #[test]
    fn bool_rows_require_unit_support() {
        let good = "name,type,0,1\nflag,bool,0,1\n";
        let parameters = read_parameters(good.as_bytes()).unwrap();
        assert!(matches!(parameters[0].kind(), ParameterKind::Boolean { .. }));

        let bad = "name,type,0,1\nflag,bool,0,2\n";
        assert!(matches!(
            read_parameters(bad.as_bytes()),
            Err(Error::InvalidBooleanSupport { .. })
        ));
    }

    #[test]
    fn quoted_category_labels_round_trip() {
        let parameters = vec![Parameter::categorical("c", ["a,b", "plain"]).unwrap()];
        let mut buf = Vec::new();
        write_parameters(&parameters, &mut buf).unwrap();
        let reread = read_parameters(buf.as_slice()).unwrap();
        assert_eq!(reread[0].index_for_cat("a,b").unwrap(), 0);
    }

    #[test]
    fn export_pads_rows_to_uniform_width() {
        let parameters = vec![
            Parameter::real("x", 0.0, 1.0).unwrap(),
            Parameter::categorical("c", ["a", "b", "c"]).unwrap(),
        ];
        let mut buf = Vec::new();
        write_parameters(&parameters, &mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "name,0,1,2");
        assert_eq!(lines[1], "x,0.0,1.0,");
        assert_eq!(lines[2], "c,a,b,c");
    }
}
