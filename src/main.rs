use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use codon_tables::config::{self, Config, DEFAULT_TIMEOUT_SECS};
use codon_tables::io::{bundled::BundledTables, csv, organisms};
use codon_tables::remote::{cocoputs, HttpTransport, Source};
use codon_tables::resolve::Resolver;
use codon_tables::{download, logging};

#[derive(Parser, Debug)]
#[command(name = "codon-tables", author, version, about = "Codon usage tables by organism", arg_required_else_help = true)]
struct Cli {
    /// Directory holding organisms.csv and tables/<source>/
    #[arg(long = "data-dir", global = true, env = config::DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,
    /// Debug logging (CODON_TABLES_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a codon table: taxid, short name (e_coli) or full name (e_coli_316407)
    Get {
        table: String,
        /// kazusa or cocoputs
        #[arg(short, long, default_value = "kazusa")]
        source: String,
        /// Web request timeout in seconds
        #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,
        /// Keep RNA codons (UAA) instead of replacing U by T
        #[arg(long = "keep-u")]
        keep_u: bool,
        /// JSON instead of CSV
        #[arg(long)]
        json: bool,
    },
    /// List bundled tables of a source
    List {
        #[arg(short, long, default_value = "kazusa")]
        source: String,
    },
    /// CoCoPUTs usage summary (counts, GC content) as JSON
    Usage {
        taxid: u64,
        #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,
    },
    /// Download one table to a CSV file
    Download {
        taxid: u64,
        /// Target CSV path
        target: PathBuf,
        #[arg(short, long, default_value = "kazusa")]
        source: String,
        #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,
    },
    /// Regenerate every bundled table listed in organisms.csv, for both sources
    Refresh {
        /// Organism listing (defaults to <data-dir>/organisms.csv)
        #[arg(long)]
        organisms: Option<PathBuf>,
        #[arg(short, long, default_value_t = DEFAULT_TIMEOUT_SECS)]
        timeout: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(if cli.verbose { "codon_tables=debug" } else { "codon_tables=info" });

    let mut cfg = Config::default();
    if let Some(dir) = cli.data_dir {
        cfg.data_dir = dir;
    }

    match cli.command {
        Commands::Get { table, source, timeout, keep_u, json } => {
            cfg.source = source.parse()?;
            cfg.timeout = Duration::from_secs(timeout);
            run_get(&cfg, &table, !keep_u, json)
        }
        Commands::List { source } => {
            cfg.source = source.parse()?;
            run_list(&cfg)
        }
        Commands::Usage { taxid, timeout } => run_usage(taxid, Duration::from_secs(timeout)),
        Commands::Download { taxid, target, source, timeout } => {
            let source: Source = source.parse()?;
            let transport = HttpTransport::new()?;
            download::download_table(&transport, source, taxid, Duration::from_secs(timeout), &target)
                .with_context(|| format!("cannot download taxid {} from {}", taxid, source))
        }
        Commands::Refresh { organisms, timeout } => {
            cfg.timeout = Duration::from_secs(timeout);
            let listing = organisms.unwrap_or_else(|| cfg.organisms_file());
            run_refresh(&cfg, &listing)
        }
    }
}

fn run_get(cfg: &Config, table: &str, replace_u_by_t: bool, json: bool) -> Result<()> {
    let bundled = BundledTables::scan(cfg.tables_dir())
        .with_context(|| format!("cannot index bundled tables in '{}'", cfg.tables_dir().display()))?;
    let listing = cfg.organisms_file();
    let known = if listing.is_file() {
        organisms::read_organisms(&listing)
            .with_context(|| format!("cannot read organism listing '{}'", listing.display()))?
    } else {
        Vec::new()
    };
    let resolver = Resolver::new(bundled, Box::new(HttpTransport::new()?)).with_organisms(known);
    let codons = resolver
        .resolve(table, replace_u_by_t, cfg.timeout, cfg.source)
        .with_context(|| format!("cannot resolve codon table '{}' ({})", table, cfg.source))?;

    let mut out = std::io::BufWriter::new(std::io::stdout().lock());
    if json {
        serde_json::to_writer_pretty(&mut out, &codons)?;
        writeln!(out)?;
    } else {
        out.write_all(csv::serialize(&codons).as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

fn run_list(cfg: &Config) -> Result<()> {
    let bundled = BundledTables::scan(cfg.tables_dir())?;
    for name in bundled.names(cfg.source) {
        println!("{}", name);
    }
    Ok(())
}

fn run_usage(taxid: u64, timeout: Duration) -> Result<()> {
    let transport = HttpTransport::new()?;
    let usage = cocoputs::fetch_codon_usage(&transport, taxid, timeout)
        .with_context(|| format!("cannot fetch CoCoPUTs usage for taxid {}", taxid))?;
    println!("{}", serde_json::to_string_pretty(&usage)?);
    Ok(())
}

fn run_refresh(cfg: &Config, listing: &std::path::Path) -> Result<()> {
    let orgs = organisms::read_organisms(listing)
        .with_context(|| format!("cannot read organism listing '{}'", listing.display()))?;
    if orgs.is_empty() {
        anyhow::bail!("organism listing '{}' contains no organisms", listing.display());
    }
    let transport = HttpTransport::new()?;
    let written = download::refresh_bundled(&transport, &orgs, &cfg.tables_dir(), cfg.timeout)?;
    println!("organisms: {}", orgs.len());
    println!("tables written: {}", written.len());
    Ok(())
}
