// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

use crate::args::Arguments;
use anyhow::Context;
use light_cluster::correct::run_correction;
use log::info;

pub fn main_light_cluster(args: &Arguments) -> anyhow::Result<()> {
    let ctl = args.to_control();
    info!(
        "correcting {} using {} (format = {}, doublets = {}, strategy = {})",
        ctl.heavy_path.display(),
        ctl.light_path.display(),
        ctl.format,
        ctl.doublets,
        ctl.strategy
    );
    let stats = run_correction(&ctl).with_context(|| {
        format!(
            "light chain correction of {} failed",
            ctl.heavy_path.display()
        )
    })?;
    info!(
        "done: {} of {} heavy chains written",
        stats.rows_written, stats.heavy_rows
    );
    Ok(())
}
