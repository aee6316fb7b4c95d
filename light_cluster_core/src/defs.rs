// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Control structure for a correction run, and the enumerated options that go into it.

use crate::errors::CorrectError;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

/// Column naming scheme of the input tables.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TsvFormat {
    /// Change-O style upper case names, e.g. CELL and V_CALL.
    #[default]
    Changeo,
    /// AIRR rearrangement schema names, e.g. cell_id and v_call.
    Airr,
}

impl FromStr for TsvFormat {
    type Err = CorrectError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "changeo" => Ok(TsvFormat::Changeo),
            "airr" => Ok(TsvFormat::Airr),
            _ => Err(CorrectError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for TsvFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TsvFormat::Changeo => write!(f, "changeo"),
            TsvFormat::Airr => write!(f, "airr"),
        }
    }
}

/// What to do with cells that have more than one heavy chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DoubletPolicy {
    /// Remove the cell entirely.
    #[default]
    Drop,
    /// Keep only the heavy chain having the highest UMI or consensus count.
    Count,
}

impl FromStr for DoubletPolicy {
    type Err = CorrectError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "drop" => Ok(DoubletPolicy::Drop),
            "count" => Ok(DoubletPolicy::Count),
            _ => Err(CorrectError::InvalidDoubletPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for DoubletPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoubletPolicy::Drop => write!(f, "drop"),
            DoubletPolicy::Count => write!(f, "count"),
        }
    }
}

/// How light chain signatures are turned into sub-clone labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strategy {
    /// Single linkage: signature groups sharing a cell are merged.
    #[default]
    Linkage,
    /// Each clone is labelled by its most frequent light chain signature.
    Majority,
}

impl FromStr for Strategy {
    type Err = CorrectError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linkage" => Ok(Strategy::Linkage),
            "majority" => Ok(Strategy::Majority),
            _ => Err(CorrectError::InvalidStrategy(s.to_string())),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Linkage => write!(f, "linkage"),
            Strategy::Majority => write!(f, "majority"),
        }
    }
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

/// Names of the columns read from the heavy and light chain tables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnNames {
    pub cell_id: String,
    pub clone_id: String,
    pub v_call: String,
    pub j_call: String,
    pub junction: String,
    // count columns in order of preference; the first one present in the heavy table is used
    pub count: Vec<String>,
}

impl ColumnNames {
    pub fn for_format(format: TsvFormat) -> ColumnNames {
        let (names, count): ([&str; 5], [&str; 3]) = match format {
            TsvFormat::Changeo => (
                ["CELL", "CLONE", "V_CALL", "J_CALL", "JUNCTION"],
                ["UMICOUNT", "CONSCOUNT", "DUPCOUNT"],
            ),
            TsvFormat::Airr => (
                ["cell_id", "clone_id", "v_call", "j_call", "junction"],
                ["umi_count", "consensus_count", "duplicate_count"],
            ),
        };
        ColumnNames {
            cell_id: names[0].to_string(),
            clone_id: names[1].to_string(),
            v_call: names[2].to_string(),
            j_call: names[3].to_string(),
            junction: names[4].to_string(),
            count: count.iter().map(|x| x.to_string()).collect(),
        }
    }

    /// Replace the cell, clone or count column names by those given.
    pub fn with_overrides(
        mut self,
        cell_id: Option<&str>,
        clone_id: Option<&str>,
        count: Option<&str>,
    ) -> ColumnNames {
        if let Some(x) = cell_id {
            self.cell_id = x.to_string();
        }
        if let Some(x) = clone_id {
            self.clone_id = x.to_string();
        }
        if let Some(x) = count {
            self.count = vec![x.to_string()];
        }
        self
    }
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames::for_format(TsvFormat::default())
    }
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

// Everything that controls a run.  This is the complete set of recognized settings.

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CorrectControl {
    pub heavy_path: PathBuf,
    pub light_path: PathBuf,
    pub out_path: PathBuf,
    pub summary_path: Option<PathBuf>, // optional JSON dump of run statistics
    pub format: TsvFormat,
    pub doublets: DoubletPolicy,
    pub strategy: Strategy,
    pub cols: ColumnNames,
}
