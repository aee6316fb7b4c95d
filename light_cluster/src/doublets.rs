// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Resolve cells that have more than one heavy chain, so that each cell has a single
// heavy clone assignment.

use light_cluster_core::defs::{CorrectControl, DoubletPolicy};
use light_cluster_core::errors::CorrectError;
use light_cluster_core::table::Table;
use log::debug;

pub struct Resolved {
    pub keep: Vec<usize>,     // indices of surviving heavy rows, in input order
    pub doublet_cells: usize, // number of cells having more than one heavy row
}

// Parse a UMI or consensus count.  Missing values, including NaN, count as zero.  An
// infinite count is not a count.

fn parse_count(heavy: &Table, row: usize, value: &str) -> Result<f64, CorrectError> {
    if value.is_empty() || value == "NA" {
        return Ok(0.0);
    }
    let bad = || CorrectError::BadCount {
        table: heavy.name.clone(),
        line: row + 2,
        value: value.to_string(),
    };
    let c = value.parse::<f64>().map_err(|_| bad())?;
    if c.is_nan() {
        Ok(0.0)
    } else if c.is_infinite() {
        Err(bad())
    } else {
        Ok(c)
    }
}

pub fn resolve_doublets(heavy: &Table, ctl: &CorrectControl) -> Result<Resolved, CorrectError> {
    let cell = heavy.column(&ctl.cols.cell_id)?;
    let count = match ctl.doublets {
        DoubletPolicy::Drop => None,
        DoubletPolicy::Count => Some(heavy.first_column(&ctl.cols.count).ok_or_else(|| {
            CorrectError::MissingCountColumn {
                table: heavy.name.clone(),
                columns: ctl.cols.count.clone(),
            }
        })?),
    };

    // Sort rows by cell.  Within a cell, rows stay in input order.  Rows without a cell
    // are not assigned to any cell and are discarded.

    let mut rows = Vec::<(&str, usize)>::with_capacity(heavy.len());
    for (i, row) in heavy.rows.iter().enumerate() {
        if !row[cell].is_empty() {
            rows.push((row[cell].as_str(), i));
        }
    }
    rows.sort_unstable();

    let mut keep = Vec::<usize>::with_capacity(rows.len());
    let mut doublet_cells = 0;
    let mut i = 0;
    while i < rows.len() {
        let mut j = i + 1;
        while j < rows.len() && rows[j].0 == rows[i].0 {
            j += 1;
        }
        if j - i == 1 {
            keep.push(rows[i].1);
        } else {
            doublet_cells += 1;
            if let Some(count) = count {
                let mut best = rows[i].1;
                let mut best_count = parse_count(heavy, best, &heavy.rows[best][count])?;
                for &(_, r) in &rows[i + 1..j] {
                    let c = parse_count(heavy, r, &heavy.rows[r][count])?;
                    if c > best_count {
                        best = r;
                        best_count = c;
                    }
                }
                debug!(
                    "cell {} has {} heavy chains, keeping line {}",
                    rows[i].0,
                    j - i,
                    best + 2
                );
                keep.push(best);
            } else {
                debug!("cell {} has {} heavy chains, dropping it", rows[i].0, j - i);
            }
        }
        i = j;
    }
    keep.sort_unstable();
    Ok(Resolved {
        keep,
        doublet_cells,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn heavy() -> Table {
        let text = "SEQUENCE_ID\tCELL\tCLONE\tCONSCOUNT\n\
                    h1\tc1\t1\t5\n\
                    h2\tc2\t2\t3\n\
                    h3\tc1\t3\t10\n\
                    h4\tc3\t4\t7\n\
                    h5\tc3\t5\t7\n";
        Table::from_reader("heavy", text.as_bytes()).unwrap()
    }

    #[test]
    fn test_drop_doublets() {
        let ctl = CorrectControl::default();
        let r = resolve_doublets(&heavy(), &ctl).unwrap();
        assert_eq!(r.keep, vec![1]);
        assert_eq!(r.doublet_cells, 2);
    }

    #[test]
    fn test_count_doublets() {
        let ctl = CorrectControl {
            doublets: DoubletPolicy::Count,
            ..Default::default()
        };
        let r = resolve_doublets(&heavy(), &ctl).unwrap();

        // c1 keeps its count 10 row; c3 has a tie and keeps the first row.

        assert_eq!(r.keep, vec![1, 2, 3]);
        assert_eq!(r.doublet_cells, 2);
    }

    #[test]
    fn test_count_column_required() {
        let ctl = CorrectControl {
            doublets: DoubletPolicy::Count,
            ..Default::default()
        };
        let t = Table::from_reader("heavy", "CELL\tCLONE\nc1\t1\n".as_bytes()).unwrap();
        let err = resolve_doublets(&t, &ctl).err().unwrap();
        assert!(matches!(err, CorrectError::MissingCountColumn { .. }));
    }

    #[test]
    fn test_bad_count() {
        let ctl = CorrectControl {
            doublets: DoubletPolicy::Count,
            ..Default::default()
        };
        let text = "CELL\tCLONE\tUMICOUNT\nc1\t1\tNA\nc1\t2\tmany\n";
        let t = Table::from_reader("heavy", text.as_bytes()).unwrap();
        let err = resolve_doublets(&t, &ctl).err().unwrap();
        assert_eq!(
            err.to_string(),
            "line 3 of heavy has count \"many\", which is not a number"
        );
    }

    #[test]
    fn test_rows_without_cell_are_discarded() {
        let text = "CELL\tCLONE\tUMICOUNT\n\
                    \t1\t4\n\
                    c2\t1\t3\n\
                    \t2\t9\n";
        let t = Table::from_reader("heavy", text.as_bytes()).unwrap();
        let r = resolve_doublets(&t, &CorrectControl::default()).unwrap();
        assert_eq!(r.keep, vec![1]);
        assert_eq!(r.doublet_cells, 0);
        let ctl = CorrectControl {
            doublets: DoubletPolicy::Count,
            ..Default::default()
        };
        assert_eq!(resolve_doublets(&t, &ctl).unwrap().keep, vec![1]);
    }

    #[test]
    fn test_nan_count_does_not_win() {
        let ctl = CorrectControl {
            doublets: DoubletPolicy::Count,
            ..Default::default()
        };
        let text = "CELL\tCLONE\tUMICOUNT\nc1\tA\tNaN\nc1\tB\t10\nc2\tC\tnan\nc2\tD\t0.5\n";
        let t = Table::from_reader("heavy", text.as_bytes()).unwrap();
        assert_eq!(resolve_doublets(&t, &ctl).unwrap().keep, vec![1, 3]);

        let text = "CELL\tCLONE\tUMICOUNT\nc1\tA\tinf\nc1\tB\t10\n";
        let t = Table::from_reader("heavy", text.as_bytes()).unwrap();
        let err = resolve_doublets(&t, &ctl).err().unwrap();
        assert_eq!(
            err.to_string(),
            "line 2 of heavy has count \"inf\", which is not a number"
        );
    }
}
