// Copyright (c) 2021 10X Genomics, Inc. All rights reserved.

// Light chain signatures.  Two light chains having the same signature plausibly derive
// from the same rearrangement.

use std::fmt;
use string_utils::TextUtils;

// Reduce a gene call to the gene name of its first allele, e.g.
// "IGKV1-5*01,IGKV1D-5*01" becomes "IGKV1-5".

pub fn gene_name(call: &str) -> &str {
    let first = call.split(',').next().unwrap_or("");
    if first.contains('*') {
        first.before("*")
    } else {
        first
    }
}

/// V gene, J gene and junction length of a light chain.  The ordering is the key order
/// used to break ties between equally frequent signatures.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Signature {
    pub v_gene: String,
    pub j_gene: String,
    pub junction_len: usize,
}

impl Signature {
    pub fn new(v_call: &str, j_call: &str, junction: &str) -> Signature {
        Signature {
            v_gene: gene_name(v_call).to_string(),
            j_gene: gene_name(j_call).to_string(),
            junction_len: junction.len(),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.v_gene, self.j_gene, self.junction_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gene_name() {
        assert_eq!(gene_name("IGKV1-5*01"), "IGKV1-5");
        assert_eq!(gene_name("IGKV1-5*01,IGKV1D-5*01"), "IGKV1-5");
        assert_eq!(gene_name("IGLJ2*01,IGLJ3*01"), "IGLJ2");
        assert_eq!(gene_name("IGKJ1"), "IGKJ1");
        assert_eq!(gene_name(""), "");
    }

    #[test]
    fn test_signature() {
        let s = Signature::new(
            "IGKV1-5*01,IGKV1-5*03",
            "IGKJ1*01",
            "TGTCAACAGTATAATAGTTATTCGTGGACGTTC",
        );
        assert_eq!(s.v_gene, "IGKV1-5");
        assert_eq!(s.junction_len, 33);
        assert_eq!(s.to_string(), "IGKV1-5,IGKJ1,33");
        assert_eq!(s, Signature::new("IGKV1-5*02", "IGKJ1*02", &"A".repeat(33)));
        assert!(
            Signature::new("IGKV1-5", "IGKJ1", "AAA") < Signature::new("IGKV1-5", "IGKJ2", "A")
        );
    }
}
