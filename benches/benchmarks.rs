use criterion::{black_box, criterion_group, criterion_main, Criterion};

use codon_tables::io::csv;
use codon_tables::remote::kazusa;
use codon_tables::usage::{self, CodonCounts};
use codon_tables::util::dna::Alphabet;
use codon_tables::util::genetic_code;

fn make_counts() -> CodonCounts {
    let mut x: u32 = 42;
    genetic_code::codons(Alphabet::Rna)
        .map(|(codon, _)| {
            x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (codon.to_string(), u64::from(x >> 16) % 1000)
        })
        .collect()
}

fn make_kazusa_page(counts: &CodonCounts) -> String {
    let table = usage::normalize(counts);
    let mut page = String::from("<html><head><title>bench</title></head><body><pre>\n");
    for (aa, codons) in &table {
        for (codon, freq) in codons {
            page.push_str(&format!("{} {} {:.2} 12.3 (  456)\n", codon, aa, freq));
        }
    }
    page.push_str("</pre></body></html>");
    page
}

fn bench_normalize(c: &mut Criterion) {
    let counts = make_counts();
    c.bench_function("normalize_64_codons", |b| {
        b.iter(|| {
            black_box(usage::normalize(black_box(&counts)));
        })
    });
}

fn bench_csv(c: &mut Criterion) {
    let table = usage::normalize(&make_counts());
    let text = csv::serialize(&table);

    c.bench_function("csv_serialize", |b| {
        b.iter(|| {
            black_box(csv::serialize(black_box(&table)));
        })
    });
    c.bench_function("csv_parse", |b| {
        b.iter(|| {
            black_box(csv::parse(black_box(&text)).ok());
        })
    });
}

fn bench_kazusa_extract(c: &mut Criterion) {
    let page = make_kazusa_page(&make_counts());
    c.bench_function("kazusa_page_to_csv", |b| {
        b.iter(|| {
            black_box(kazusa::page_to_csv(316407, black_box(&page)).ok());
        })
    });
}

criterion_group!(benches, bench_normalize, bench_csv, bench_kazusa_extract);
criterion_main!(benches);
