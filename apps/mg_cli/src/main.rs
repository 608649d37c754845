// apps/mg_cli/src/main.rs

//! MagnoHydro 命令行界面
//!
//! 约束输运理想磁流体求解器的命令行工具。
//!
//! # 架构层级
//!
//! 本模块属于 **Layer 5: Application**：只接触 `SolverConfig` 与
//! `Simulation` 门面，不直接触碰核函数。

mod commands;
mod problems;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// MagnoHydro 磁流体求解器命令行工具
#[derive(Parser)]
#[command(name = "mg_cli")]
#[command(author = "MagnoHydro Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MagnoHydro constrained-transport MHD solver", long_about = None)]
struct Cli {
    /// 日志级别 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 运行模拟
    Run(commands::run::RunArgs),
    /// 显示配置与求解器信息
    Info(commands::info::InfoArgs),
    /// 校验配置文件
    Validate(commands::validate::ValidateArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::Info(args) => commands::info::execute(args),
        Commands::Validate(args) => commands::validate::execute(args),
    }
}
