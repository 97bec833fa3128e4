//! CSV-backed history store for lotto draw records.
//!
//! One row per draw, header row present, UTF-8. The store is append-only:
//! existing rows are never rewritten or reordered, and the file is replaced
//! atomically (write to a sibling temp file, then rename) so readers never
//! observe a partially written history.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Largest playable lotto number.
pub const LOTTO_MAX: u8 = 45;

/// One lotto draw as persisted in the history file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawRecord {
    /// Draw index, unique and contiguous from 1 once fully synced.
    pub draw_no: u32,
    /// Draw date as returned by the source (YYYY-MM-DD).
    pub draw_date: String,
    /// Six main numbers in 1..=45, stored in source order (not sorted).
    pub numbers: [u8; 6],
    /// Bonus number in 1..=45.
    pub bonus: u8,
}

const HEADER: [&str; 9] = [
    "draw_no", "draw_date", "n1", "n2", "n3", "n4", "n5", "n6", "bonus",
];

/// History store over a single CSV file.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load all persisted records in file order. Returns an empty vec when
    /// no history file exists yet; a malformed file is an error.
    pub fn load(&self) -> Result<Vec<DrawRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("failed to open history file {}", self.path.display()))?;

        let mut records = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let row = row.with_context(|| format!("bad CSV row {}", i + 1))?;
            records.push(parse_row(&row).with_context(|| format!("bad draw record at row {}", i + 1))?);
        }
        Ok(records)
    }

    /// Largest draw number in the store, or 0 when empty.
    pub fn max_draw_no(&self) -> Result<u32> {
        Ok(self.load()?.iter().map(|r| r.draw_no).max().unwrap_or(0))
    }

    /// Append a batch of new records after the existing ones and persist the
    /// combined set. Callers must already have validated `new_records` for
    /// distinct, increasing draw numbers.
    pub fn append_all(&self, new_records: &[DrawRecord]) -> Result<()> {
        let mut all = self.load()?;
        all.extend_from_slice(new_records);

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create data dir {}", dir.display()))?;
            }
        }

        let tmp = self.path.with_extension("csv.tmp");
        {
            let mut writer = csv::Writer::from_path(&tmp)
                .with_context(|| format!("failed to create temp file {}", tmp.display()))?;
            writer.write_record(HEADER)?;
            for record in &all {
                write_row(&mut writer, record)?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("failed to replace history file {}", self.path.display()))?;
        Ok(())
    }
}

fn parse_row(row: &csv::StringRecord) -> Result<DrawRecord> {
    let get = |idx: usize| -> Result<&str> {
        row.get(idx)
            .map(str::trim)
            .with_context(|| format!("missing column {idx}"))
    };
    let get_ball = |idx: usize| -> Result<u8> {
        let s = get(idx)?;
        let n = s
            .parse::<u8>()
            .with_context(|| format!("cannot parse '{s}' as a number (column {idx})"))?;
        anyhow::ensure!(
            (1..=LOTTO_MAX).contains(&n),
            "number {n} out of range 1..={LOTTO_MAX} (column {idx})"
        );
        Ok(n)
    };

    // Tolerate a UTF-8 BOM some spreadsheet tools prepend to the first cell.
    let draw_no_raw = get(0)?.trim_start_matches('\u{feff}');
    let draw_no = draw_no_raw
        .parse::<u32>()
        .with_context(|| format!("cannot parse draw number '{draw_no_raw}'"))?;

    Ok(DrawRecord {
        draw_no,
        draw_date: get(1)?.to_string(),
        numbers: [
            get_ball(2)?,
            get_ball(3)?,
            get_ball(4)?,
            get_ball(5)?,
            get_ball(6)?,
            get_ball(7)?,
        ],
        bonus: get_ball(8)?,
    })
}

fn write_row<W: std::io::Write>(writer: &mut csv::Writer<W>, record: &DrawRecord) -> Result<()> {
    let mut row = Vec::with_capacity(9);
    row.push(record.draw_no.to_string());
    row.push(record.draw_date.clone());
    for n in record.numbers {
        row.push(n.to_string());
    }
    row.push(record.bonus.to_string());
    writer.write_record(&row)?;
    Ok(())
}
