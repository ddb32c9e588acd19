//! # codon-tables
//!
//! 按物种查询密码子使用频率表（codon usage table）。
//!
//! 对给定物种（taxonomy ID 或名称），返回 氨基酸 -> {同义密码子 -> 相对频率} 的映射。
//! 数据来源：
//!
//! - **内置表**：`codon_usage_data/tables/<source>/<organism>_<taxid>.csv`
//! - **Kazusa**：kazusa.or.jp 密码子使用数据库（HTML 页面，服务端已归一化）
//! - **CoCoPUTs**：FDA DNA-Hive API（原始密码子计数，本地分组并归一化）
//!
//! ## 快速示例
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use std::path::Path;
//! use codon_tables::io::{bundled::BundledTables, organisms};
//! use codon_tables::remote::{HttpTransport, Source};
//! use codon_tables::resolve::Resolver;
//!
//! let bundled = BundledTables::scan("codon_usage_data/tables")?;
//! let listing = organisms::read_organisms(Path::new("codon_usage_data/organisms.csv"))?;
//! let resolver = Resolver::new(bundled, Box::new(HttpTransport::new()?)).with_organisms(listing);
//!
//! // 内置表（短名），密码子使用 DNA 字母表；尚未下载的表按 organisms.csv 在线获取并写入内置目录
//! let e_coli = resolver.resolve("e_coli", true, Duration::from_secs(5), Source::Kazusa)?;
//! println!("TAA: {}", e_coli[&'*']["TAA"]);
//!
//! // taxid：从 CoCoPUTs 在线获取
//! let human = resolver.resolve_taxid(9606, true, Duration::from_secs(10), Source::Cocoputs)?;
//! println!("{} amino acids", human.len());
//! # Ok::<(), codon_tables::error::TableError>(())
//! ```
//!
//! ## 模块说明
//!
//! - [`util`] — 标准遗传密码表、DNA/RNA 字母表转换
//! - [`io`] — 码表 CSV 编解码、内置表目录索引、`organisms.csv`
//! - [`remote`] — Kazusa / CoCoPUTs 请求与响应解析
//! - [`usage`] — 按氨基酸分组并归一化密码子计数
//! - [`resolve`] — 表标识解析、来源选择与结果缓存
//! - [`download`] — 下载单个码表、批量刷新内置表

pub mod config;
pub mod download;
pub mod error;
pub mod io;
pub mod logging;
pub mod remote;
pub mod resolve;
pub mod table;
pub mod usage;
pub mod util;

pub use error::{ErrorKind, Result, TableError};
pub use remote::Source;
pub use table::CodonTable;
