// apps/mg_cli/src/commands/info.rs

//! 信息命令
//!
//! 打印配置摘要：网格范围、边界策略、求解器与状态方程。

use anyhow::{Context, Result};
use clap::Args;
use mg_config::SolverConfig;
use std::path::PathBuf;
use tracing::info;

use crate::problems::Problem;

/// 信息参数
#[derive(Args)]
pub struct InfoArgs {
    /// 配置文件路径（缺省打印内置问题配置）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 内置问题
    #[arg(short, long, value_enum, default_value_t = Problem::BrioWu)]
    pub problem: Problem,
}

/// 执行信息命令
pub fn execute(args: InfoArgs) -> Result<()> {
    let config: SolverConfig = match &args.config {
        Some(path) => SolverConfig::from_json_file(path)
            .with_context(|| format!("加载配置失败: {}", path.display()))?,
        None => args.problem.default_config(),
    };

    info!("求解器: {} ({}阶重构)", config.solver, match config.reconstruction {
        mg_config::ReconstructionOrder::Donor => 1,
        mg_config::ReconstructionOrder::Linear => 2,
    });
    info!(
        "网格: {} 维, {}x{}x{} + {} 层鬼单元",
        config.grid.dimensions,
        config.grid.n[0],
        config.grid.n[1],
        config.grid.n[2],
        config.grid.nghost,
    );
    for d in 0..config.grid.dimensions {
        info!(
            "  X{}: [{}, {}]",
            d + 1,
            config.grid.begin[d],
            config.grid.end[d],
        );
    }
    info!(
        "边界: x1=({}, {}), x2=({}, {}), x3=({}, {})",
        config.boundary.x1_beg,
        config.boundary.x1_end,
        config.boundary.x2_beg,
        config.boundary.x2_end,
        config.boundary.x3_beg,
        config.boundary.x3_end,
    );
    info!(
        "状态方程: {:?}, γ={}, C²_iso={}, CFL={}",
        config.hydro.eos, config.hydro.gamma, config.hydro.c2_iso, config.time.cfl,
    );

    Ok(())
}
