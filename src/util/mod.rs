pub mod dna;
pub mod genetic_code;
