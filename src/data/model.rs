use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Column – the known columns of a listing dataset
// ---------------------------------------------------------------------------

/// Columns the dashboard knows how to use. All of them are optional in the
/// source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Price,
    Odometer,
    ModelYear,
    Condition,
    Type,
}

/// How cells of a known column are parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Price,
        Column::Odometer,
        Column::ModelYear,
        Column::Condition,
        Column::Type,
    ];

    /// Header name in the source file.
    pub fn name(self) -> &'static str {
        match self {
            Column::Price => "price",
            Column::Odometer => "odometer",
            Column::ModelYear => "model_year",
            Column::Condition => "condition",
            Column::Type => "type",
        }
    }

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::Price | Column::Odometer | Column::ModelYear => ColumnKind::Numeric,
            Column::Condition | Column::Type => ColumnKind::Categorical,
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.name() == name)
    }
}

// ---------------------------------------------------------------------------
// Cell – a single value in a listing row
// ---------------------------------------------------------------------------

/// A dynamically-typed cell: text, number, or missing.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Missing,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.0}"),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Missing => Ok(()),
        }
    }
}

impl Cell {
    /// Numeric value, if this cell holds one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Text value, if this cell holds one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Parse raw text for a known numeric column. Unparsable text, `NaN` and
    /// infinities read as missing.
    pub fn numeric(raw: &str) -> Cell {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Cell::Number(v),
            _ => Cell::Missing,
        }
    }

    /// Parse raw text for a known categorical column.
    pub fn categorical(raw: &str) -> Cell {
        if raw.is_empty() {
            Cell::Missing
        } else {
            Cell::Text(raw.to_string())
        }
    }

    /// Best-effort parse for columns the dashboard does not know about.
    pub fn guess(raw: &str) -> Cell {
        if raw.is_empty() {
            return Cell::Missing;
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => Cell::Number(v),
            Ok(v) if v.is_nan() => Cell::Missing,
            _ => Cell::Text(raw.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Listing – one row of the table
// ---------------------------------------------------------------------------

/// A single advertisement (one row of the source file).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Listing {
    /// column_name → value. Columns absent from the row read as missing.
    pub cells: BTreeMap<String, Cell>,
}

static MISSING: Cell = Cell::Missing;

impl Listing {
    pub fn get(&self, column: &str) -> &Cell {
        self.cells.get(column).unwrap_or(&MISSING)
    }

    pub fn number(&self, column: Column) -> Option<f64> {
        self.get(column.name()).as_f64()
    }

    pub fn text(&self, column: Column) -> Option<&str> {
        self.get(column.name()).as_str()
    }
}

// ---------------------------------------------------------------------------
// Schema – which known columns are present
// ---------------------------------------------------------------------------

/// Capability descriptor built once at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    present: BTreeSet<Column>,
}

impl Schema {
    pub fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        Schema {
            present: headers.into_iter().filter_map(Column::from_name).collect(),
        }
    }

    pub fn has(&self, column: Column) -> bool {
        self.present.contains(&column)
    }

    pub fn has_all(&self, columns: &[Column]) -> bool {
        columns.iter().all(|c| self.has(*c))
    }
}

// ---------------------------------------------------------------------------
// ListingTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with its schema and categorical indices.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingTable {
    pub rows: Vec<Listing>,
    /// Header names in file order.
    pub column_names: Vec<String>,
    pub schema: Schema,
    /// For each categorical column present, the sorted distinct values.
    pub categories: BTreeMap<Column, BTreeSet<String>>,
}

impl ListingTable {
    /// Build the schema and category indices from parsed rows.
    pub fn new(column_names: Vec<String>, rows: Vec<Listing>) -> Self {
        let schema = Schema::from_headers(column_names.iter().map(String::as_str));

        let mut categories: BTreeMap<Column, BTreeSet<String>> = BTreeMap::new();
        for column in Column::ALL {
            if column.kind() != ColumnKind::Categorical || !schema.has(column) {
                continue;
            }
            let values = rows
                .iter()
                .filter_map(|row| row.text(column))
                .map(str::to_string)
                .collect();
            categories.insert(column, values);
        }

        ListingTable {
            rows,
            column_names,
            schema,
            categories,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorted distinct values of a categorical column (empty when absent).
    pub fn category_values(&self, column: Column) -> impl Iterator<Item = &str> {
        self.categories
            .get(&column)
            .into_iter()
            .flat_map(|values| values.iter().map(String::as_str))
    }

    /// Largest non-missing value of a numeric column.
    pub fn max_of(&self, column: Column) -> Option<f64> {
        self.rows
            .iter()
            .filter_map(|row| row.number(column))
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }

    /// Smallest non-missing value of a numeric column.
    pub fn min_of(&self, column: Column) -> Option<f64> {
        self.rows
            .iter()
            .filter_map(|row| row.number(column))
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.min(v))))
    }
}
