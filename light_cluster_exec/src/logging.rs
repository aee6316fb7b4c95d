// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Logger setup: timestamped lines on stderr.  If a logger is already installed, it is
// kept, and a warning is sent through it.

use chrono::Local;
use env_logger::Builder;
use log::{warn, LevelFilter};
use std::io::Write;

pub fn init_log(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let result = Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%dT%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        .try_init();
    if let Err(err) = result {
        warn!("logger not initialized, keeping the existing one: {err}");
    }
}
