//! Table: ordered rows plus the ordered union of their field names.
//!
//! Every pipeline stage consumes tables and produces new ones; no operation
//! here mutates a table that another stage still holds.
//!
//! | Operation | Spreadsheet idiom |
//! |-----------|-------------------|
//! | [`Table::group_sum`] | pivot table with `sum` |
//! | [`Table::inner_join`] | inner merge on a key column |
//! | [`Table::concat`] | row union, absent filling gaps |
//! | [`Table::drop_duplicates`] | first occurrence wins |

use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use super::{Row, Value, ValueKey};
use crate::{Error, Result};

type GroupKey = SmallVec<[ValueKey; 2]>;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty table with a fixed header.
    pub fn with_columns<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn from_rows(rows: impl IntoIterator<Item = Row>) -> Self {
        let mut table = Self::new();
        for row in rows {
            table.push(row);
        }
        table
    }

    pub fn push(&mut self, row: Row) {
        for key in row.keys() {
            if !self.has_column(key) {
                self.columns.push(key.to_string());
            }
        }
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.rows.iter().map(move |r| r.get(name))
    }

    // ========================================================================
    // Row-wise transforms
    // ========================================================================

    /// Keep only `columns`, in that order. Columns the table lacks come back
    /// as `Null`.
    pub fn select(&self, columns: &[&str]) -> Table {
        let rows = self.rows.iter()
            .map(|row| columns.iter().map(|c| (*c, row.get(c).clone())).collect())
            .collect();
        Table { columns: columns.iter().map(|c| c.to_string()).collect(), rows }
    }

    pub fn filter(self, mut keep: impl FnMut(&Row) -> bool) -> Table {
        let Table { columns, rows } = self;
        Table { columns, rows: rows.into_iter().filter(|r| keep(r)).collect() }
    }

    /// Rewrite every value in place. `f` receives the field name.
    pub fn map_values(mut self, mut f: impl FnMut(&str, Value) -> Value) -> Table {
        for row in &mut self.rows {
            for (key, value) in row.iter_mut() {
                *value = f(key, std::mem::take(value));
            }
        }
        self
    }

    /// Set `name` on every row to the value computed from that row.
    pub fn with_column(mut self, name: &str, mut f: impl FnMut(&Row) -> Value) -> Table {
        for row in &mut self.rows {
            let value = f(row);
            row.set(name, value);
        }
        if !self.has_column(name) {
            self.columns.push(name.to_string());
        }
        self
    }

    pub fn try_with_column(
        self,
        name: &str,
        mut f: impl FnMut(&Row) -> Result<Value>,
    ) -> Result<Table> {
        let mut table = self.try_update(|row| {
            let value = f(row)?;
            row.set(name, value);
            Ok(())
        })?;
        if !table.has_column(name) {
            table.columns.push(name.to_string());
        }
        Ok(table)
    }

    /// Run `f` over every row in order, stopping at the first error. Fields
    /// `f` adds join the header.
    pub fn try_update(mut self, mut f: impl FnMut(&mut Row) -> Result<()>) -> Result<Table> {
        for row in &mut self.rows {
            f(row)?;
            for key in row.keys() {
                if !self.columns.iter().any(|c| c == key) {
                    self.columns.push(key.to_string());
                }
            }
        }
        Ok(self)
    }

    pub fn rename(mut self, pairs: &[(&str, &str)]) -> Table {
        for (from, to) in pairs {
            let Some(pos) = self.columns.iter().position(|c| c == from) else { continue };
            for row in &mut self.rows {
                row.rename(from, to);
            }
            if self.has_column(to) {
                self.columns.remove(pos);
            } else {
                self.columns[pos] = to.to_string();
            }
        }
        self
    }

    /// Remove the listed columns; names the table lacks are ignored.
    pub fn drop_columns(mut self, columns: &[&str]) -> Table {
        for row in &mut self.rows {
            for col in columns {
                row.remove(col);
            }
        }
        self.columns.retain(|c| !columns.contains(&c.as_str()));
        self
    }

    /// Replace `Null` with `value` in the listed columns, or in every column
    /// when `columns` is `None`. Missing fields are materialized first.
    pub fn fill_null(mut self, columns: Option<&[&str]>, value: &Value) -> Table {
        let targets: Vec<String> = match columns {
            Some(cols) => cols.iter().map(|c| c.to_string()).collect(),
            None => self.columns.clone(),
        };
        for row in &mut self.rows {
            for col in &targets {
                if row.get(col).is_null() {
                    row.set(col.as_str(), value.clone());
                }
            }
        }
        for col in targets {
            if !self.has_column(&col) {
                self.columns.push(col);
            }
        }
        self
    }

    // ========================================================================
    // Reshaping
    // ========================================================================

    /// Union of rows. The header is the ordered union of every input header;
    /// fields a row lacks stay absent.
    pub fn concat(tables: impl IntoIterator<Item = Table>) -> Table {
        let mut out = Table::new();
        for table in tables {
            for col in table.columns {
                if !out.has_column(&col) {
                    out.columns.push(col);
                }
            }
            out.rows.extend(table.rows);
        }
        out
    }

    /// Drop rows whose `subset` fields (all columns when `None`) repeat an
    /// earlier row. The first occurrence wins.
    pub fn drop_duplicates(self, subset: Option<&[&str]>) -> Table {
        let Table { columns, rows } = self;
        let key_cols: Vec<&str> = match subset {
            Some(cols) => cols.to_vec(),
            None => columns.iter().map(String::as_str).collect(),
        };
        let mut seen: HashSet<Vec<ValueKey>> = HashSet::with_capacity(rows.len());
        let rows = rows.into_iter()
            .filter(|row| seen.insert(key_cols.iter().map(|c| row.get(c).key()).collect()))
            .collect();
        Table { columns, rows }
    }

    /// Group by `keys` and sum `values` per group.
    ///
    /// Rows with an absent key are skipped. Absent values count as zero;
    /// non-numeric values are a [`Error::TypeError`]. Output is sorted by key
    /// and has the header `keys ++ values`.
    pub fn group_sum(&self, keys: &[&str], values: &[&str]) -> Result<Table> {
        let mut index: HashMap<GroupKey, usize> = HashMap::new();
        let mut groups: Vec<(Vec<Value>, Vec<f64>)> = Vec::new();

        for row in &self.rows {
            if keys.iter().any(|k| row.get(k).is_null()) {
                continue;
            }
            let key: GroupKey = keys.iter().map(|k| row.get(k).key()).collect();
            let slot = *index.entry(key).or_insert_with(|| {
                groups.push((
                    keys.iter().map(|k| row.get(k).clone()).collect(),
                    vec![0.0; values.len()],
                ));
                groups.len() - 1
            });
            for (i, col) in values.iter().enumerate() {
                groups[slot].1[i] += numeric(row.get(col))?;
            }
        }

        groups.sort_by(|(a, _), (b, _)| {
            a.iter().zip(b).map(|(x, y)| x.sort_cmp(y))
                .find(|o| o.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut out = Table::with_columns(&[keys, values].concat());
        out.rows = groups.into_iter()
            .map(|(key_vals, sums)| {
                keys.iter().copied().zip(key_vals)
                    .chain(values.iter().copied().zip(sums.into_iter().map(Value::Float)))
                    .collect()
            })
            .collect();
        Ok(out)
    }

    /// Inner join: every left row whose `left_on` equals some right row's
    /// `right_on` is emitted once per match, in left order, with the right
    /// row's other fields merged in (right-hand values win on a clash).
    ///
    /// Left rows without a match are dropped.
    pub fn inner_join(&self, right: &Table, left_on: &str, right_on: &str) -> Table {
        let mut index: HashMap<ValueKey, Vec<&Row>> = HashMap::new();
        for row in &right.rows {
            let key = row.get(right_on);
            if !key.is_null() {
                index.entry(key.key()).or_default().push(row);
            }
        }

        let mut columns = self.columns.clone();
        for col in &right.columns {
            if col != right_on && !columns.contains(col) {
                columns.push(col.clone());
            }
        }

        let mut rows = Vec::new();
        for left in &self.rows {
            let key = left.get(left_on);
            if key.is_null() {
                continue;
            }
            for matched in index.get(&key.key()).into_iter().flatten() {
                let mut merged = left.clone();
                for (k, v) in matched.iter().filter(|(k, _)| *k != right_on) {
                    merged.set(k, v.clone());
                }
                rows.push(merged);
            }
        }
        Table { columns, rows }
    }
}

fn numeric(value: &Value) -> Result<f64> {
    match value {
        Value::Null => Ok(0.0),
        v => v.as_float().ok_or_else(|| Error::TypeError {
            expected: "number".into(),
            got: v.type_name().into(),
        }),
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Table::from_rows(iter)
    }
}
