// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Majority vote labelling.  Each clone is represented by its most frequent light chain
// signature.  Cells carrying that signature are labelled by it; every other cell is
// labelled by the list of its own signatures.

use crate::signature::Signature;
use itertools::Itertools;
use std::collections::HashMap;
use vector_utils::{make_freq, unique_sort};

// Find the majority signature of each clone.  Ties go to the smallest signature.

pub fn majority_signatures<'a>(
    clones: &[&'a str],
    sigs: &'a [Signature],
) -> HashMap<&'a str, &'a Signature> {
    let mut cs = Vec::<(&str, &Signature)>::with_capacity(clones.len());
    for (clone, sig) in clones.iter().zip(sigs.iter()) {
        cs.push((*clone, sig));
    }
    cs.sort();
    let mut majority = HashMap::<&str, &Signature>::new();
    let mut freq = Vec::<(u32, &Signature)>::new();
    let mut i = 0;
    while i < cs.len() {
        let mut j = i + 1;
        while j < cs.len() && cs[j].0 == cs[i].0 {
            j += 1;
        }
        let x = cs[i..j].iter().map(|c| c.1).collect::<Vec<_>>();
        make_freq(&x, &mut freq);
        let top = freq[0].0;
        let best = freq.iter().filter(|f| f.0 == top).map(|f| f.1).min();
        if let Some(best) = best {
            majority.insert(cs[i].0, best);
        }
        i = j;
    }
    majority
}

/// Label cells, given parallel vectors of cell, heavy clone and signature, one entry per
/// light chain.  Returns the map from cell to label, and the number of sub-clones, i.e.
/// distinct (clone, label) pairs.
pub fn majority_assign(
    cells: &[&str],
    clones: &[&str],
    sigs: &[Signature],
) -> (HashMap<String, String>, usize) {
    assert!(cells.len() == clones.len() && cells.len() == sigs.len());
    let majority = majority_signatures(clones, sigs);

    // Gather the signatures of each cell, in order of appearance.

    let mut to_cell = HashMap::<&str, usize>::new();
    let mut per_cell = Vec::<(&str, &str, Vec<&Signature>)>::new();
    for i in 0..cells.len() {
        let n = per_cell.len();
        let p = *to_cell.entry(cells[i]).or_insert(n);
        if p == n {
            per_cell.push((cells[i], clones[i], Vec::new()));
        }
        if !per_cell[p].2.contains(&&sigs[i]) {
            per_cell[p].2.push(&sigs[i]);
        }
    }

    let mut assign = HashMap::<String, String>::new();
    let mut subclones = Vec::<(&str, String)>::with_capacity(per_cell.len());
    for (cell, clone, s) in per_cell.iter() {
        let label = match majority.get(clone) {
            Some(m) if s.contains(m) => m.to_string(),
            _ => s.iter().format(";").to_string(),
        };
        subclones.push((*clone, label.clone()));
        assign.insert(cell.to_string(), label);
    }
    unique_sort(&mut subclones);
    (assign, subclones.len())
}
