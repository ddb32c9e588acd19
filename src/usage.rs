//! Grouping raw codon counts by amino acid and normalizing them into
//! within-amino-acid relative frequencies.

use std::collections::BTreeMap;

use crate::table::{CodonFrequencies, CodonTable};
use crate::util::dna::Alphabet;
use crate::util::genetic_code;

/// Raw codon -> occurrence count, codons in the RNA alphabet.
pub type CodonCounts = BTreeMap<String, u64>;

/// Group counts under their amino acid (RNA genetic code) and divide each
/// count by its amino acid's total.
///
/// Codons absent from the genetic code are dropped. An amino acid whose total
/// is 0 gets 0.0 for every codon.
pub fn normalize(counts: &CodonCounts) -> CodonTable {
    let mut grouped: BTreeMap<char, BTreeMap<&str, u64>> = BTreeMap::new();
    for (codon, &count) in counts {
        if let Some(aa) = genetic_code::codon_to_amino_acid(codon, Alphabet::Rna) {
            grouped.entry(aa).or_default().insert(codon.as_str(), count);
        }
    }

    grouped
        .into_iter()
        .map(|(aa, codons)| {
            let total: u64 = codons.values().sum();
            let freqs: CodonFrequencies = codons
                .into_iter()
                .map(|(codon, count)| {
                    let freq = if total > 0 { count as f64 / total as f64 } else { 0.0 };
                    (codon.to_string(), freq)
                })
                .collect();
            (aa, freqs)
        })
        .collect()
}
