//! Standard (nuclear) genetic code.
//!
//! The DNA table is the source of truth; the RNA table is derived from it by
//! substituting U for T in every codon, so the two always agree.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::dna::{self, Alphabet};

/// Amino-acid code used for stop codons.
pub const STOP: char = '*';

/// The 20 amino acids plus the stop marker, in ascending code order.
pub const AMINO_ACIDS: [char; 21] = [
    '*', 'A', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'K', 'L', 'M', 'N', 'P', 'Q', 'R', 'S', 'T', 'V',
    'W', 'Y',
];

#[rustfmt::skip]
const CODON_TO_AA_DNA: [(&str, char); 64] = [
    ("GCA", 'A'), ("GCC", 'A'), ("GCG", 'A'), ("GCT", 'A'),
    ("TGC", 'C'), ("TGT", 'C'),
    ("GAC", 'D'), ("GAT", 'D'),
    ("GAA", 'E'), ("GAG", 'E'),
    ("TTC", 'F'), ("TTT", 'F'),
    ("GGA", 'G'), ("GGC", 'G'), ("GGG", 'G'), ("GGT", 'G'),
    ("CAC", 'H'), ("CAT", 'H'),
    ("ATA", 'I'), ("ATC", 'I'), ("ATT", 'I'),
    ("AAA", 'K'), ("AAG", 'K'),
    ("CTA", 'L'), ("CTC", 'L'), ("CTG", 'L'), ("CTT", 'L'), ("TTA", 'L'), ("TTG", 'L'),
    ("ATG", 'M'),
    ("AAC", 'N'), ("AAT", 'N'),
    ("CCA", 'P'), ("CCC", 'P'), ("CCG", 'P'), ("CCT", 'P'),
    ("CAA", 'Q'), ("CAG", 'Q'),
    ("AGA", 'R'), ("AGG", 'R'), ("CGA", 'R'), ("CGC", 'R'), ("CGG", 'R'), ("CGT", 'R'),
    ("AGC", 'S'), ("AGT", 'S'), ("TCA", 'S'), ("TCC", 'S'), ("TCG", 'S'), ("TCT", 'S'),
    ("ACA", 'T'), ("ACC", 'T'), ("ACG", 'T'), ("ACT", 'T'),
    ("GTA", 'V'), ("GTC", 'V'), ("GTG", 'V'), ("GTT", 'V'),
    ("TGG", 'W'),
    ("TAC", 'Y'), ("TAT", 'Y'),
    ("TAA", STOP), ("TAG", STOP), ("TGA", STOP),
];

static DNA_CODE: Lazy<HashMap<String, char>> = Lazy::new(|| {
    CODON_TO_AA_DNA
        .iter()
        .map(|&(codon, aa)| (codon.to_string(), aa))
        .collect()
});

static RNA_CODE: Lazy<HashMap<String, char>> = Lazy::new(|| {
    CODON_TO_AA_DNA
        .iter()
        .map(|&(codon, aa)| (dna::to_rna(codon), aa))
        .collect()
});

fn code(alphabet: Alphabet) -> &'static HashMap<String, char> {
    match alphabet {
        Alphabet::Dna => &DNA_CODE,
        Alphabet::Rna => &RNA_CODE,
    }
}

/// 密码子 -> 氨基酸单字母代码；不在该字母表 64 个密码子内时返回 None。
/// Lookup is exact: codons must be uppercase and use the requested alphabet.
pub fn codon_to_amino_acid(codon: &str, alphabet: Alphabet) -> Option<char> {
    code(alphabet).get(codon).copied()
}

/// All 64 `(codon, amino_acid)` pairs of the given alphabet, in no particular order.
pub fn codons(alphabet: Alphabet) -> impl Iterator<Item = (&'static str, char)> {
    code(alphabet).iter().map(|(c, &aa)| (c.as_str(), aa))
}
