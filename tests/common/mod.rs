//! Shared workbook fixture for the end-to-end tests.
//!
//! ```text
//! Program              Prime        SICs                          AIC   SIC   ToT   Total
//! Hunter Class Frigate BAE          Shipbuilding, Sensors         0.6   0.5   0.1   100
//! Triton               Northrop     Sensors, ISR                  0.2   0.5   0.0    10
//! NASAMS               Raytheon     Missiles, Sensors, Software   0.5   0.4   0.05   20
//! Boxer                Rheinmetall  -                             0.25  0.0   0.0    40
//! ```

#![allow(dead_code)]

use defence_network::model::columns::*;
use defence_network::{MemorySource, Row, Table, Value};

pub fn spending(row: Row, bands: [f64; 4]) -> Row {
    let mut row = row.with(TOTAL_SPENDING, bands.iter().sum::<f64>());
    for (field, amount) in SPENDING[1..].iter().zip(bands) {
        row.set(*field, amount);
    }
    row
}

#[allow(clippy::too_many_arguments)]
pub fn program(
    domain: &str,
    capability: &str,
    name: &str,
    prime: &str,
    sics: [Option<&str>; 3],
    aic: f64,
    sic: f64,
    tot: f64,
    bands: [f64; 4],
) -> Row {
    let mut row = Row::new()
        .with(MILITARY_DOMAIN, domain)
        .with(MILITARY_CAPABILITY, capability)
        .with(PROGRAM, name)
        .with(PRIME_CONTRACTOR, prime);
    for (col, value) in SIC_RANKS.iter().zip(sics) {
        row.set(*col, value);
    }
    let row = row
        .with(AIC_OF_TOTAL, aic)
        .with(SIC_OF_AIC, sic)
        .with(TOT_OF_TOTAL, tot);
    spending(row, bands)
}

pub fn overview() -> Table {
    Table::from_rows([
        program("Maritime", "ISR", "Hunter Class Frigate", "BAE",
            [Some("Shipbuilding"), Some("Sensors"), None], 0.6, 0.5, 0.1, [25.0, 25.0, 25.0, 25.0]),
        program("Air", "ISR", "Triton", "Northrop",
            [Some("Sensors"), Some("ISR"), None], 0.2, 0.5, 0.0, [10.0, 0.0, 0.0, 0.0]),
        program("Land", "GBAD", "NASAMS", "Raytheon",
            [Some("Missiles"), Some("Sensors"), Some("Software")], 0.5, 0.4, 0.05, [5.0, 5.0, 5.0, 5.0]),
        program("Land", "Armoured Vehicles", "Boxer", "Rheinmetall",
            [None, None, None], 0.25, 0.0, 0.0, [10.0, 10.0, 10.0, 10.0]),
    ])
}

fn named(names: &[&str]) -> Table {
    Table::from_rows(names.iter().map(|n| Row::new().with(NAME, *n).with(DESCRIPTION, format!("{n} "))))
}

pub fn workbook_with(overview: Table) -> MemorySource {
    MemorySource::new()
        .with_sheet(OVERVIEW_SHEET, overview)
        .with_sheet("Military Domain", named(&["Maritime", "Air", "Land", "Space"]))
        .with_sheet("Military Capability", named(&["ISR", "GBAD", "Armoured Vehicles"]))
        .with_sheet("Prime Contractor", named(&["BAE", "Northrop", "Raytheon", "Rheinmetall"]))
        .with_sheet(
            "Sovereign Industry Capability",
            named(&["Shipbuilding", "Sensors", "ISR", "Missiles", "Software", "Steel"]),
        )
        .with_sheet(
            "DSTG STaR Shot",
            Table::from_rows([Row::new()
                .with(NAME, "Quantum")
                .with(DESCRIPTION, "Quantum-assured PNT")
                .with("SIC 1", "Sensors")
                .with("SIC 2", "Software")
                .with("SIC 3", Value::Null)]),
        )
}

pub fn workbook() -> MemorySource {
    workbook_with(overview())
}

pub fn find<'a>(table: &'a Table, field: &str, value: &str) -> Vec<&'a Row> {
    table.iter().filter(|r| r.get(field) == &Value::from(value)).collect()
}

pub fn float(row: &Row, field: &str) -> f64 {
    row.get(field).as_float().unwrap_or_else(|| panic!("{field} is not numeric: {:?}", row.get(field)))
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
