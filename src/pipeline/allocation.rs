//! SIC allocation: how much of each program's funding each prime
//! contractor channels into each sovereign industry capability.
//!
//! ```text
//! per program row:
//!   k        = number of declared SICs (SIC 1..3 holding text)
//!   share    = ShareTable[k]                  e.g. k=2 → (0.60, 0.40, 0)
//!   attrib   = AIC% × SIC% + ToT%
//!   rank r   → spending × share[r] × attrib, keyed (SIC r, Prime Contractor)
//! then sum per rank, rename SIC r → SIC, concat, sum again by (SIC, Prime)
//! ```

use serde::Deserialize;
use tracing::debug;

use super::{fraction, scale_spending};
use crate::model::columns::{AIC_OF_TOTAL, PRIME_CONTRACTOR, SIC, SIC_OF_AIC, SIC_RANKS, SPENDING, TOT_OF_TOTAL};
use crate::model::{Row, Table};
use crate::{Error, Result};

const SHARE_TOLERANCE: f64 = 1e-9;

/// Share of a program's attributable funding per SIC rank, indexed by the
/// number of SICs the program declares.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShareTable {
    pub shares: [[f64; 3]; 4],
}

impl Default for ShareTable {
    fn default() -> Self {
        Self {
            shares: [
                [0.00, 0.00, 0.00],
                [1.00, 0.00, 0.00],
                [0.60, 0.40, 0.00],
                [0.50, 0.35, 0.15],
            ],
        }
    }
}

impl ShareTable {
    /// Shares for a program declaring `count` SICs. Counts above 3 use the
    /// three-SIC row.
    pub fn for_count(&self, count: usize) -> [f64; 3] {
        self.shares[count.min(3)]
    }

    /// Every row with `k ≥ 1` must sum to 1 using only its first `k` ranks;
    /// the `k = 0` row must be all zero; no share may be negative.
    pub fn validate(&self) -> Result<()> {
        for (k, row) in self.shares.iter().enumerate() {
            if row.iter().any(|s| *s < 0.0 || !s.is_finite()) {
                return Err(Error::InvalidConfig(format!("share row {k} has a negative or non-finite share")));
            }
            if row[k.min(3)..].iter().any(|s| *s != 0.0) {
                return Err(Error::InvalidConfig(format!("share row {k} assigns funding beyond rank {k}")));
            }
            let expected = if k == 0 { 0.0 } else { 1.0 };
            let sum: f64 = row.iter().sum();
            if (sum - expected).abs() > SHARE_TOLERANCE {
                return Err(Error::InvalidConfig(format!("share row {k} sums to {sum}, expected {expected}")));
            }
        }
        Ok(())
    }
}

/// Number of SIC ranks holding non-empty text.
pub fn declared_sics(row: &Row) -> usize {
    SIC_RANKS.iter().filter(|col| row.get(col).is_text()).count()
}

/// `AIC% × SIC% + ToT%`: the fraction of a program's spending attributed to
/// its SICs.
pub fn attribution_fraction(row: &Row) -> Result<f64> {
    Ok(fraction(row, AIC_OF_TOTAL)? * fraction(row, SIC_OF_AIC)? + fraction(row, TOT_OF_TOTAL)?)
}

/// Funding per `(SIC, Prime Contractor)` with the five spending fields.
///
/// Rows without a prime contractor, and ranks without a declared SIC, are
/// left out before grouping so no blank-SIC rows reach the aggregate.
pub fn allocate_sic_funding(overview: &Table, shares: &ShareTable) -> Result<Table> {
    let mut per_rank = Vec::with_capacity(SIC_RANKS.len());

    for (rank, sic_col) in SIC_RANKS.iter().copied().enumerate() {
        let declared = overview.clone()
            .filter(|row| row.get(sic_col).is_text() && !row.get(PRIME_CONTRACTOR).is_null());
        let scaled = scale_spending(declared, |row| {
            Ok(shares.for_count(declared_sics(row))[rank] * attribution_fraction(row)?)
        })?;
        let grouped = scaled
            .group_sum(&[sic_col, PRIME_CONTRACTOR], &SPENDING)?
            .rename(&[(sic_col, SIC)]);
        debug!(rank = rank + 1, groups = grouped.len(), "allocated SIC rank");
        per_rank.push(grouped);
    }

    Table::concat(per_rank).group_sum(&[SIC, PRIME_CONTRACTOR], &SPENDING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::columns::{PROGRAM, TOTAL_SPENDING};
    use crate::model::Value;
    use pretty_assertions::assert_eq;

    fn program(name: &str, prime: &str, sics: [Option<&str>; 3], total: f64) -> Row {
        let mut row = Row::new()
            .with(PROGRAM, name)
            .with(PRIME_CONTRACTOR, prime)
            .with(AIC_OF_TOTAL, 0.8)
            .with(SIC_OF_AIC, 0.5)
            .with(TOT_OF_TOTAL, 0.1);
        for (col, sic) in SIC_RANKS.iter().zip(sics) {
            row.set(*col, sic);
        }
        for field in SPENDING {
            row.set(field, 0.0);
        }
        row.set(TOTAL_SPENDING, total);
        row
    }

    fn total_for(table: &Table, sic: &str, prime: &str) -> f64 {
        table.iter()
            .find(|r| r.get(SIC) == &Value::from(sic) && r.get(PRIME_CONTRACTOR) == &Value::from(prime))
            .and_then(|r| r.get(TOTAL_SPENDING).as_float())
            .unwrap_or_else(|| panic!("no row for ({sic}, {prime})"))
    }

    #[test]
    fn test_default_share_rows_are_normalized() {
        let shares = ShareTable::default();
        shares.validate().unwrap();
        assert_eq!(shares.for_count(0).iter().sum::<f64>(), 0.0);
        for k in 1..=3 {
            assert_eq!(shares.for_count(k).iter().sum::<f64>(), 1.0);
        }
    }

    #[test]
    fn test_single_sic_scenario() {
        let overview = Table::from_rows([program("Project X", "Acme", [Some("Sensors"), None, None], 100.0)]);
        let out = allocate_sic_funding(&overview, &ShareTable::default()).unwrap();
        assert_eq!(out.len(), 1);
        assert!((total_for(&out, "Sensors", "Acme") - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_sic_at_different_ranks_merges() {
        let overview = Table::from_rows([
            program("A", "Acme", [Some("Sensors"), Some("Steel"), None], 10.0),
            program("B", "Acme", [Some("Steel"), Some("Sensors"), Some("Space")], 20.0),
        ]);
        let out = allocate_sic_funding(&overview, &ShareTable::default()).unwrap();
        // attribution is 0.5 for every row
        assert!((total_for(&out, "Sensors", "Acme") - (10.0 * 0.6 + 20.0 * 0.35) * 0.5).abs() < 1e-9);
        assert!((total_for(&out, "Steel", "Acme") - (10.0 * 0.4 + 20.0 * 0.5) * 0.5).abs() < 1e-9);
        assert!((total_for(&out, "Space", "Acme") - 20.0 * 0.15 * 0.5).abs() < 1e-9);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_program_without_sics_adds_no_rows() {
        let overview = Table::from_rows([program("Y", "Acme", [None, None, None], 100.0)]);
        let out = allocate_sic_funding(&overview, &ShareTable::default()).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.columns().len(), 2 + SPENDING.len());
    }

    #[test]
    fn test_missing_percentage_fails_fast() {
        let mut row = program("Z", "Acme", [Some("Sensors"), None, None], 1.0);
        row.set(SIC_OF_AIC, Value::Null);
        let err = allocate_sic_funding(&Table::from_rows([row]), &ShareTable::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedPercentage { ref field, .. } if field == SIC_OF_AIC));
    }

    #[test]
    fn test_declared_sics_ignores_blank_text() {
        let row = Row::new().with("SIC 1", "Sensors").with("SIC 2", "").with("SIC 3", 4);
        assert_eq!(declared_sics(&row), 1);
    }
}
