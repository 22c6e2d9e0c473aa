// ==========================================
// KOL 导入系统 - 命令行入口
// ==========================================
// 命令: import / export / template / history / config
// ==========================================

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use kol_import::app::AppState;
use kol_import::config::config_keys;
use kol_import::db::default_db_path;
use kol_import::exporter::ExportFormat;
use kol_import::importer::ImportProgressListener;
use kol_import::{logging, ImportOutcome, ImportProgress};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "KOL 名录导入/导出工具", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// 数据库文件路径
    #[arg(long, global = true, value_name = "DB_PATH", env = "KOL_IMPORT_DB_PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 导入 KOL 表格（.csv/.txt/.json/.xlsx/.xls）
    #[command(arg_required_else_help = true)]
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// 不显示进度
        #[arg(long, default_value_t = false)]
        quiet: bool,
    },

    /// 导出全部 KOL 记录
    Export {
        /// 导出格式: csv / json
        #[arg(long, default_value = "csv")]
        format: ExportFormat,

        /// 输出目录
        #[arg(long, value_name = "DIRECTORY_PATH", default_value = ".")]
        out_dir: PathBuf,
    },

    /// 生成导入模板
    Template {
        #[arg(long, value_name = "DIRECTORY_PATH", default_value = ".")]
        out_dir: PathBuf,
    },

    /// 查看最近的导入批次
    History {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// 读写配置
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// 读取配置（不指定键时列出全部）
    Get { key: Option<String> },

    /// 写入配置
    Set { key: String, value: String },
}

/// 终端进度条（写 stderr）
struct TerminalProgress;

impl ImportProgressListener for TerminalProgress {
    fn on_progress(&self, progress: ImportProgress) {
        let mut stderr = std::io::stderr();
        let _ = write!(
            stderr,
            "\r导入进度: {:>3}% ({}/{})",
            progress.percent, progress.rows_processed, progress.total_rows
        );
        let _ = stderr.flush();
    }

    fn on_state(&self, state: kol_import::ImportState) {
        if state == kol_import::ImportState::Completed {
            eprintln!();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let db_path = cli.db.unwrap_or_else(default_db_path);
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("无法创建数据目录: {}", parent.display()))?;
        }
    }
    let db_path = db_path.to_string_lossy().into_owned();
    tracing::debug!(db_path = %db_path, version = kol_import::VERSION, "启动");

    match cli.command {
        Commands::Import { file, quiet } => {
            let listener: Option<Arc<dyn ImportProgressListener>> = if quiet {
                None
            } else {
                Some(Arc::new(TerminalProgress))
            };
            let state = AppState::with_import_listener(&db_path, listener).await?;

            let cancellation = state.import_api.cancellation();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancellation.cancel();
                }
            });

            let outcome = state.import_api.import_file(&file).await?;
            print_summary(&outcome);
        }
        Commands::Export { format, out_dir } => {
            let state = AppState::new(&db_path).await?;
            let path = state.export_api.export_to_dir(&out_dir, format).await?;
            println!("已导出: {}", path.display());
        }
        Commands::Template { out_dir } => {
            let state = AppState::new(&db_path).await?;
            let path = state.export_api.write_template(&out_dir).await?;
            println!("模板已生成: {}", path.display());
        }
        Commands::History { limit } => {
            let state = AppState::new(&db_path).await?;
            let batches = state.import_api.list_recent_batches(limit).await?;
            if batches.is_empty() {
                println!("暂无导入记录");
            }
            for batch in batches {
                println!(
                    "{}  {}  总计 {}  成功 {}  失败 {}  跳过 {}{}",
                    batch.imported_at.format("%Y-%m-%d %H:%M:%S"),
                    batch.file_name,
                    batch.total_rows,
                    batch.succeeded,
                    batch.failed,
                    batch.skipped,
                    if batch.cancelled { "  (已取消)" } else { "" }
                );
            }
        }
        Commands::Config(command) => {
            let state = AppState::new(&db_path).await?;
            match command {
                ConfigCommands::Get { key: Some(key) } => {
                    match state.config.get_global_config_value(&key).map_err(anyhow::Error::msg)? {
                        Some(value) => println!("{} = {}", key, value),
                        None => println!("{} 未设置（使用默认值）", key),
                    }
                }
                ConfigCommands::Get { key: None } => {
                    let configs = state.config.list_global_configs().map_err(anyhow::Error::msg)?;
                    for key in config_keys::ALL {
                        match configs.get(key) {
                            Some(value) => println!("{} = {}", key, value),
                            None => println!("{} （默认）", key),
                        }
                    }
                }
                ConfigCommands::Set { key, value } => {
                    if !config_keys::ALL.contains(&key.as_str()) {
                        bail!(
                            "未知配置键: {}（可用: {}）",
                            key,
                            config_keys::ALL.join(", ")
                        );
                    }
                    state
                        .config
                        .set_global_config_value(&key, &value)
                        .map_err(anyhow::Error::msg)?;
                    println!("{} = {}", key, value);
                }
            }
        }
    }

    Ok(())
}

fn print_summary(outcome: &ImportOutcome) {
    println!("文件: {}", outcome.file_name);
    println!(
        "成功 {} / 失败 {} / 跳过 {}（共 {} 行，耗时 {} ms）",
        outcome.succeeded, outcome.failed, outcome.skipped, outcome.total_rows, outcome.elapsed_ms
    );
    if outcome.cancelled {
        println!("导入已取消，剩余 {} 行未处理", outcome.total_rows - outcome.rows_processed());
    }
}
