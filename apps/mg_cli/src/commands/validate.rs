// apps/mg_cli/src/commands/validate.rs

//! 配置校验命令
//!
//! 加载配置文件并执行启动期校验，报告违规值。

use anyhow::Result;
use clap::Args;
use mg_config::SolverConfig;
use std::path::PathBuf;
use tracing::{error, info};

/// 校验参数
#[derive(Args)]
pub struct ValidateArgs {
    /// 配置文件路径
    #[arg(short, long)]
    pub config: PathBuf,
}

/// 执行校验命令
pub fn execute(args: ValidateArgs) -> Result<()> {
    match SolverConfig::from_json_file(&args.config) {
        Ok(config) => {
            info!("配置有效: {}", args.config.display());
            info!("求解器: {}, {} 维网格", config.solver, config.grid.dimensions);
            Ok(())
        }
        Err(err) => {
            error!("配置无效: {}", err);
            Err(err.into())
        }
    }
}
