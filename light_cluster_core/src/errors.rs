// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

use thiserror::Error;

/// Everything that can stop a correction run.  None of these are recoverable: the run
/// is abandoned and no output table is written.
#[derive(Debug, Error)]
pub enum CorrectError {
    #[error("invalid format \"{0}\", the format must be changeo or airr")]
    InvalidFormat(String),

    #[error("invalid doublet policy \"{0}\", the policy must be drop or count")]
    InvalidDoubletPolicy(String),

    #[error("invalid strategy \"{0}\", the strategy must be linkage or majority")]
    InvalidStrategy(String),

    #[error("the table {table} does not have a column named {column}")]
    MissingColumn { table: String, column: String },

    #[error(
        "the table {table} has none of the count columns {}, which are needed to resolve \
         doublets by count",
        .columns.join(", ")
    )]
    MissingCountColumn { table: String, columns: Vec<String> },

    #[error("line {line} of {table} has count \"{value}\", which is not a number")]
    BadCount {
        table: String,
        line: usize,
        value: String,
    },

    #[error("unable to access {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse {path} as a tab-separated table")]
    Tsv {
        path: String,
        #[source]
        source: csv::Error,
    },
}
