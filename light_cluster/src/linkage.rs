// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Single linkage clustering of cells.  Cells are first grouped by a shared key (a light
// chain signature).  Then any two groups having a cell in common are merged.  This is what
// ties together the two light chain groups of a cell that has two light chains.

use equiv::EquivRel;
use std::collections::HashMap;
use std::hash::Hash;

pub struct Clusters {
    pub assign: HashMap<String, usize>, // cell to cluster label
    pub nclusters: usize,
}

/// Cluster the cells, given parallel vectors of cell ids and group keys, one entry per
/// light chain.
///
/// Cluster labels are 0, 1, ..., numbered in order of first appearance of the groups that
/// make up each cluster, so the labelling depends only on the input order.  The partition
/// itself does not depend on the order in which groups are merged.
pub fn cluster_linkage<K: Eq + Hash>(cells: &[&str], groups: &[K]) -> Clusters {
    assert_eq!(cells.len(), groups.len());

    // Number the groups in order of first appearance.

    let mut to_group = HashMap::<&K, usize>::new();
    let mut ids = Vec::<usize>::with_capacity(groups.len());
    for g in groups.iter() {
        let n = to_group.len();
        ids.push(*to_group.entry(g).or_insert(n));
    }
    let ngroups = to_group.len();

    // Join groups that share a cell.

    let mut cg = Vec::<(&str, usize)>::with_capacity(cells.len());
    for (cell, id) in cells.iter().zip(ids.iter()) {
        cg.push((*cell, *id));
    }
    cg.sort_unstable();
    let mut e: EquivRel = EquivRel::new(ngroups as i32);
    let mut i = 0;
    while i < cg.len() {
        let mut j = i + 1;
        while j < cg.len() && cg[j].0 == cg[i].0 {
            j += 1;
        }
        for k in i + 1..j {
            e.join(cg[i].1 as i32, cg[k].1 as i32);
        }
        i = j;
    }

    // Label the classes.

    let mut to_label = HashMap::<i32, usize>::new();
    let mut labels = Vec::<usize>::with_capacity(ngroups);
    for g in 0..ngroups {
        let n = to_label.len();
        labels.push(*to_label.entry(e.class_id(g as i32)).or_insert(n));
    }
    let mut assign = HashMap::<String, usize>::new();
    for (cell, g) in cg.iter() {
        assign.insert(cell.to_string(), labels[*g]);
    }
    Clusters {
        assign,
        nclusters: to_label.len(),
    }
}
