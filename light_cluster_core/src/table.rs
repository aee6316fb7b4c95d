// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// In-memory tab-separated table.  Every field is kept as text, so that columns we don't
// interpret pass through to the output exactly as they were read.

use crate::errors::CorrectError;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub name: String, // used to identify the table in error messages
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(name: &str, header: Vec<String>) -> Table {
        Table {
            name: name.to_string(),
            header,
            rows: Vec::new(),
        }
    }

    pub fn read_tsv(path: &Path) -> Result<Table, CorrectError> {
        let name = path.display().to_string();
        let f = File::open(path).map_err(|source| CorrectError::Io {
            path: name.clone(),
            source,
        })?;
        Table::from_reader(&name, f)
    }

    /// Parse a table from any reader.  The first line is the header.  A row whose length
    /// differs from the header is an error.
    pub fn from_reader<R: Read>(name: &str, r: R) -> Result<Table, CorrectError> {
        let tsv_err = |source| CorrectError::Tsv {
            path: name.to_string(),
            source,
        };
        let mut rdr = ReaderBuilder::new().delimiter(b'\t').from_reader(r);
        let header = rdr
            .headers()
            .map_err(tsv_err)?
            .iter()
            .map(str::to_string)
            .collect();
        let mut table = Table::new(name, header);
        for rec in rdr.records() {
            let rec = rec.map_err(tsv_err)?;
            table.rows.push(rec.iter().map(str::to_string).collect());
        }
        Ok(table)
    }

    pub fn write_tsv(&self, path: &Path) -> Result<(), CorrectError> {
        let name = path.display().to_string();
        let f = File::create(path).map_err(|source| CorrectError::Io {
            path: name.clone(),
            source,
        })?;
        self.to_writer(f).map_err(|source| CorrectError::Tsv { path: name, source })
    }

    pub fn to_writer<W: Write>(&self, w: W) -> Result<(), csv::Error> {
        let mut wtr = WriterBuilder::new().delimiter(b'\t').from_writer(w);
        wtr.write_record(&self.header)?;
        for row in self.rows.iter() {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Return the position of a column, or fail naming the column and this table.
    pub fn column(&self, col: &str) -> Result<usize, CorrectError> {
        self.header
            .iter()
            .position(|x| x == col)
            .ok_or_else(|| CorrectError::MissingColumn {
                table: self.name.clone(),
                column: col.to_string(),
            })
    }

    // Return the position of the first of the given columns that is present.

    pub fn first_column(&self, cols: &[String]) -> Option<usize> {
        cols.iter()
            .find_map(|c| self.header.iter().position(|x| x == c))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEAVY: &str = "SEQUENCE_ID\tCELL\tCLONE\tJUNCTION\n\
                         s1\tc1\t7\tTGTGCG\n\
                         s2\tc2\t8\t\n";

    #[test]
    fn test_read_table() {
        let t = Table::from_reader("heavy", HEAVY.as_bytes()).unwrap();
        assert_eq!(t.header, vec!["SEQUENCE_ID", "CELL", "CLONE", "JUNCTION"]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.rows[1], vec!["s2", "c2", "8", ""]);
        assert_eq!(t.column("CLONE").unwrap(), 2);
        assert_eq!(
            t.first_column(&["UMICOUNT".to_string(), "CELL".to_string()]),
            Some(1)
        );
        assert_eq!(t.first_column(&["UMICOUNT".to_string()]), None);
    }

    #[test]
    fn test_missing_column() {
        let t = Table::from_reader("light.tsv", HEAVY.as_bytes()).unwrap();
        let err = t.column("V_CALL").unwrap_err();
        assert_eq!(
            err.to_string(),
            "the table light.tsv does not have a column named V_CALL"
        );
    }

    #[test]
    fn test_ragged_row() {
        let text = "CELL\tCLONE\nc1\t1\nc2\n";
        let err = Table::from_reader("heavy", text.as_bytes()).unwrap_err();
        assert!(matches!(err, CorrectError::Tsv { .. }));
    }

    #[test]
    fn test_write_table() {
        let t = Table::from_reader("heavy", HEAVY.as_bytes()).unwrap();
        let mut out = Vec::<u8>::new();
        t.to_writer(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), HEAVY);

        // An empty table still carries its header.

        let empty = Table::new("out", t.header.clone());
        let mut out = Vec::<u8>::new();
        empty.to_writer(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "SEQUENCE_ID\tCELL\tCLONE\tJUNCTION\n"
        );
    }
}
