//! Codon frequency table: amino acid -> codon -> relative frequency.
//!
//! `BTreeMap` keeps both levels sorted, which is the row order the CSV format
//! requires ('*' sorts before the letters).

use std::collections::BTreeMap;

use crate::util::dna::{self, Alphabet};

pub type CodonFrequencies = BTreeMap<String, f64>;

pub type CodonTable = BTreeMap<char, CodonFrequencies>;

/// Rewrite every codon key into the given alphabet; frequencies are unchanged.
pub fn with_alphabet(table: &CodonTable, alphabet: Alphabet) -> CodonTable {
    table
        .iter()
        .map(|(&aa, codons)| {
            let codons = codons
                .iter()
                .map(|(codon, &freq)| (dna::normalize_seq(codon, alphabet), freq))
                .collect();
            (aa, codons)
        })
        .collect()
}

/// UAA -> TAA etc.
pub fn with_u_replaced_by_t(table: &CodonTable) -> CodonTable {
    with_alphabet(table, Alphabet::Dna)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_u_in_keys_only() {
        let mut table = CodonTable::new();
        table.entry('*').or_default().insert("UAA".into(), 0.6);
        table.entry('*').or_default().insert("UGA".into(), 0.4);
        table.entry('K').or_default().insert("AAA".into(), 1.0);

        let dna = with_u_replaced_by_t(&table);
        assert_eq!(dna[&'*'].keys().collect::<Vec<_>>(), vec!["TAA", "TGA"]);
        assert_eq!(dna[&'*']["TAA"], 0.6);
        assert_eq!(dna[&'K']["AAA"], 1.0);

        let back = with_alphabet(&dna, Alphabet::Rna);
        assert_eq!(back, table);
    }

    #[test]
    fn substitution_leaves_other_characters_alone() {
        let mut table = CodonTable::new();
        table.entry('X').or_default().insert("ÄUü".into(), 0.5);
        table.entry('X').or_default().insert("uUc".into(), 0.5);

        let dna = with_u_replaced_by_t(&table);
        assert_eq!(dna[&'X'].keys().collect::<Vec<_>>(), vec!["uTc", "ÄTü"]);
    }
}
