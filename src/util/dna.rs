/// 核苷酸字母表：DNA 使用 T，RNA 使用 U。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Alphabet {
    Dna,
    Rna,
}

#[inline]
pub fn is_nucleotide(b: u8) -> bool {
    matches!(b.to_ascii_uppercase(), b'A' | b'C' | b'G' | b'T' | b'U')
}

/// Exactly three nucleotide symbols, either alphabet, any case.
pub fn is_codon(s: &str) -> bool {
    s.len() == 3 && s.bytes().all(is_nucleotide)
}

/// 统一到给定字母表：只改写大写 T <-> U，其他字符原样保留。
pub fn normalize_seq(seq: &str, alphabet: Alphabet) -> String {
    seq.chars()
        .map(|c| match (c, alphabet) {
            ('U', Alphabet::Dna) => 'T',
            ('T', Alphabet::Rna) => 'U',
            _ => c,
        })
        .collect()
}

#[inline]
pub fn to_rna(seq: &str) -> String {
    normalize_seq(seq, Alphabet::Rna)
}
