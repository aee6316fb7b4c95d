// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Command line arguments, and their conversion into a CorrectControl.

use clap::Parser;
use light_cluster_core::defs::{ColumnNames, CorrectControl, DoubletPolicy, Strategy, TsvFormat};
use std::path::PathBuf;
use std::str::FromStr;

/// Split heavy chain clones using the light chains of their cells.
#[derive(Parser, Debug, Clone)]
#[clap(name = "light_cluster")]
pub struct Arguments {
    /// Heavy chain table, with clone assignments.
    #[clap(short = 'H', long, value_name = "PATH")]
    pub heavy: PathBuf,

    /// Light chain table.
    #[clap(short = 'L', long, value_name = "PATH")]
    pub light: PathBuf,

    /// Output table: the heavy chain table with corrected clone assignments.
    #[clap(short = 'o', long, value_name = "PATH")]
    pub out: PathBuf,

    /// How to treat cells with more than one heavy chain: drop or count.
    #[clap(long, value_name = "POLICY", default_value = "drop", value_parser = DoubletPolicy::from_str)]
    pub doublets: DoubletPolicy,

    /// Column naming scheme of the tables: changeo or airr.
    #[clap(short = 'f', long, value_name = "FORMAT", default_value = "changeo", value_parser = TsvFormat::from_str)]
    pub format: TsvFormat,

    /// How sub-clones are defined: linkage or majority.
    #[clap(long, value_name = "STRATEGY", default_value = "linkage", value_parser = Strategy::from_str)]
    pub strategy: Strategy,

    /// Name of the cell column, replacing the default for the format.
    #[clap(long, value_name = "NAME")]
    pub cell_field: Option<String>,

    /// Name of the clone column, replacing the default for the format.
    #[clap(long, value_name = "NAME")]
    pub clone_field: Option<String>,

    /// Name of the count column used by --doublets count.
    #[clap(long, value_name = "NAME")]
    pub count_field: Option<String>,

    /// Write run statistics to this file, as JSON.
    #[clap(long, value_name = "PATH")]
    pub summary: Option<PathBuf>,

    /// Log debugging detail.
    #[clap(short = 'v', long)]
    pub verbose: bool,
}

impl Arguments {
    pub fn to_control(&self) -> CorrectControl {
        CorrectControl {
            heavy_path: self.heavy.clone(),
            light_path: self.light.clone(),
            out_path: self.out.clone(),
            summary_path: self.summary.clone(),
            format: self.format,
            doublets: self.doublets,
            strategy: self.strategy,
            cols: ColumnNames::for_format(self.format).with_overrides(
                self.cell_field.as_deref(),
                self.clone_field.as_deref(),
                self.count_field.as_deref(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args =
            Arguments::try_parse_from(["light_cluster", "-H", "h.tsv", "-L", "l.tsv", "-o", "o.tsv"])
                .unwrap();
        let ctl = args.to_control();
        assert_eq!(ctl.format, TsvFormat::Changeo);
        assert_eq!(ctl.doublets, DoubletPolicy::Drop);
        assert_eq!(ctl.strategy, Strategy::Linkage);
        assert_eq!(ctl.cols, ColumnNames::default());
        assert_eq!(ctl.out_path, PathBuf::from("o.tsv"));
        assert!(ctl.summary_path.is_none());
    }

    #[test]
    fn test_overrides() {
        let args = Arguments::try_parse_from([
            "light_cluster",
            "--heavy=h.tsv",
            "--light=l.tsv",
            "--out=o.tsv",
            "--format=airr",
            "--doublets=count",
            "--strategy=majority",
            "--cell-field=barcode",
            "--count-field=reads",
        ])
        .unwrap();
        let ctl = args.to_control();
        assert_eq!(ctl.cols.cell_id, "barcode");
        assert_eq!(ctl.cols.clone_id, "clone_id");
        assert_eq!(ctl.cols.v_call, "v_call");
        assert_eq!(ctl.cols.count, vec!["reads".to_string()]);
        assert_eq!(ctl.strategy, Strategy::Majority);
    }

    #[test]
    fn test_bad_values_rejected() {
        let base = ["light_cluster", "-H", "h", "-L", "l", "-o", "o"];
        for bad in ["--format=fasta", "--doublets=keep", "--strategy=mean"] {
            let mut argv = base.to_vec();
            argv.push(bad);
            assert!(Arguments::try_parse_from(argv).is_err());
        }
        assert!(Arguments::try_parse_from(["light_cluster", "-H", "h", "-L", "l"]).is_err());
    }
}
