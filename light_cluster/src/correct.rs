// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Correct heavy chain only clonotyping using light chain annotations.  Each heavy chain
// clone is split into sub-clones according to the light chains of its cells, and the clone
// column of the heavy table is rewritten as <clone>_<sub-clone label>.

use crate::doublets::resolve_doublets;
use crate::linkage::cluster_linkage;
use crate::majority::majority_assign;
use crate::signature::Signature;
use light_cluster_core::defs::{CorrectControl, Strategy};
use light_cluster_core::errors::CorrectError;
use light_cluster_core::table::Table;
use log::{debug, info};
use serde_derive::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CorrectionStats {
    pub heavy_rows: usize,
    pub light_rows: usize,
    pub doublet_cells: usize,
    pub heavy_rows_kept: usize,
    pub light_rows_matched: usize,
    pub clusters: usize,
    pub rows_written: usize,
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

/// Compute the corrected heavy table.  Nothing is written.  The output has the header of
/// the heavy table and one row for each heavy chain that survives doublet resolution and
/// whose cell has at least one light chain.
pub fn correct_clones(
    heavy: &Table,
    light: &Table,
    ctl: &CorrectControl,
) -> Result<(Table, CorrectionStats), CorrectError> {
    // Locate columns.  All are checked before any work is done.

    let cols = &ctl.cols;
    let h_cell = heavy.column(&cols.cell_id)?;
    let h_clone = heavy.column(&cols.clone_id)?;
    let l_cell = light.column(&cols.cell_id)?;
    let l_v = light.column(&cols.v_call)?;
    let l_j = light.column(&cols.j_call)?;
    let l_junction = light.column(&cols.junction)?;

    // Get one heavy clone per cell.

    let resolved = resolve_doublets(heavy, ctl)?;
    let mut to_clone = HashMap::<&str, &str>::with_capacity(resolved.keep.len());
    for &r in resolved.keep.iter() {
        to_clone.insert(&heavy.rows[r][h_cell], &heavy.rows[r][h_clone]);
    }

    // Find the light chains of those cells and compute their signatures.

    let mut cells = Vec::<&str>::new();
    let mut clones = Vec::<&str>::new();
    let mut sigs = Vec::<Signature>::new();
    for row in light.rows.iter() {
        if row[l_cell].is_empty() {
            continue;
        }
        if let Some(clone) = to_clone.get(row[l_cell].as_str()) {
            cells.push(&row[l_cell]);
            clones.push(*clone);
            sigs.push(Signature::new(&row[l_v], &row[l_j], &row[l_junction]));
        }
    }
    debug!(
        "{} of {} light chains belong to cells having a heavy clone",
        cells.len(),
        light.len()
    );

    // Label the cells.

    let (labels, nclusters) = match ctl.strategy {
        Strategy::Linkage => {
            let mut keys = Vec::<(&Signature, &str)>::with_capacity(sigs.len());
            for (sig, clone) in sigs.iter().zip(clones.iter()) {
                keys.push((sig, *clone));
            }
            let c = cluster_linkage(&cells, &keys);
            let labels = c
                .assign
                .into_iter()
                .map(|(cell, label)| (cell, label.to_string()))
                .collect::<HashMap<String, String>>();
            (labels, c.nclusters)
        }
        Strategy::Majority => majority_assign(&cells, &clones, &sigs),
    };

    // Rewrite the heavy table.

    let mut out = Table::new(&ctl.out_path.display().to_string(), heavy.header.clone());
    for &r in resolved.keep.iter() {
        let row = &heavy.rows[r];
        if let Some(label) = labels.get(row[h_cell].as_str()) {
            let mut row = row.clone();
            row[h_clone] = format!("{}_{}", row[h_clone], label);
            out.rows.push(row);
        }
    }

    let stats = CorrectionStats {
        heavy_rows: heavy.len(),
        light_rows: light.len(),
        doublet_cells: resolved.doublet_cells,
        heavy_rows_kept: resolved.keep.len(),
        light_rows_matched: cells.len(),
        clusters: nclusters,
        rows_written: out.len(),
    };
    Ok((out, stats))
}

// ▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓▓

/// Read both tables, correct, and write the statistics (if asked) and the output table.
/// The output table is written last, once everything else has succeeded.
pub fn run_correction(ctl: &CorrectControl) -> Result<CorrectionStats, CorrectError> {
    let t = Instant::now();
    let heavy = Table::read_tsv(&ctl.heavy_path)?;
    let light = Table::read_tsv(&ctl.light_path)?;
    info!(
        "read {} heavy chains and {} light chains",
        heavy.len(),
        light.len()
    );
    let (out, stats) = correct_clones(&heavy, &light, ctl)?;
    info!(
        "{} cells had more than one heavy chain (doublet policy = {})",
        stats.doublet_cells, ctl.doublets
    );
    info!(
        "strategy = {} gave {} sub-clone labels",
        ctl.strategy, stats.clusters
    );
    if let Some(path) = &ctl.summary_path {
        write_summary(&stats, path)?;
    }
    out.write_tsv(&ctl.out_path)?;
    info!(
        "wrote {} heavy chains to {}",
        stats.rows_written,
        ctl.out_path.display()
    );
    debug!("correction used {:.2} seconds", t.elapsed().as_secs_f64());
    Ok(stats)
}

fn write_summary(stats: &CorrectionStats, path: &std::path::Path) -> Result<(), CorrectError> {
    let io_err = |source| CorrectError::Io {
        path: path.display().to_string(),
        source,
    };
    let mut f = File::create(path).map_err(io_err)?;
    let json = serde_json::to_string_pretty(stats).map_err(|e| io_err(e.into()))?;
    writeln!(f, "{json}").map_err(io_err)
}
