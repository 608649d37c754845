// apps/mg_cli/src/commands/run.rs

//! 运行模拟命令
//!
//! 以内置问题（可被配置文件覆盖）构建模拟并推进到结束时刻，
//! 按间隔输出诊断：时间步长、最大 |∇·B|、密度界。

use anyhow::{Context, Result};
use clap::Args;
use mg_config::SolverConfig;
use mg_physics::prelude::*;
use mg_physics::vars::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use crate::problems::{Problem, ProblemSetup};

/// 运行模拟参数
#[derive(Args)]
pub struct RunArgs {
    /// 内置问题
    #[arg(short, long, value_enum, default_value_t = Problem::BrioWu)]
    pub problem: Problem,

    /// 配置文件路径（JSON，覆盖内置默认）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 模拟结束时刻（缺省取问题推荐值）
    #[arg(short = 't', long)]
    pub t_end: Option<f64>,

    /// 诊断输出间隔 [模拟时间]
    #[arg(long, default_value = "1.0")]
    pub output_interval: f64,

    /// 串行执行（禁用 rayon）
    #[arg(long)]
    pub serial: bool,
}

/// 执行运行命令
pub fn execute(args: RunArgs) -> Result<()> {
    info!("=== MagnoHydro 模拟启动 ===");

    let config: SolverConfig = match &args.config {
        Some(path) => SolverConfig::from_json_file(path)
            .with_context(|| format!("加载配置失败: {}", path.display()))?,
        None => args.problem.default_config(),
    };
    let t_end = args.t_end.unwrap_or_else(|| args.problem.default_t_end());

    info!(
        "问题: {:?}, 求解器: {}, 网格: {}x{}x{}, γ={}",
        args.problem,
        config.solver,
        config.grid.n[0],
        config.grid.n[1],
        config.grid.n[2],
        config.hydro.gamma,
    );

    let mut sim = Simulation::new(&config, ProblemSetup::new(args.problem))
        .context("构建模拟失败")?;
    if args.serial {
        sim.data.exec = mg_runtime::ExecSpace::Serial;
    }

    let start = Instant::now();
    let mut last_output = 0.0;

    info!("推进至 t={} (CFL={})", t_end, config.time.cfl);

    while sim.t < t_end {
        let remaining = t_end - sim.t;
        if sim.rk.current_dt() > remaining {
            sim.rk.set_dt(remaining);
        }
        let result = match sim.step() {
            Ok(r) => r,
            Err(err) => {
                warn!("时间步失败: {}", err);
                return Err(err.into());
            }
        };
        if result.retries > 0 {
            warn!("t={:.4}: dt 折半重试 {} 次", sim.t, result.retries);
        }

        if sim.t - last_output >= args.output_interval || sim.t >= t_end {
            let (rho_min, rho_max) = density_bounds(&sim);
            info!(
                "t={:.4}, 步数={}, dt={:.3e}, ∇·B={:.3e}, ρ∈[{:.4}, {:.4}]",
                sim.t,
                sim.steps,
                result.dt,
                sim.max_div_b(),
                rho_min,
                rho_max,
            );
            last_output = sim.t;
        }
    }

    let elapsed = start.elapsed();
    info!("=== 模拟完成 ===");
    info!("总步数: {}, 计算时间: {:.2} s", sim.steps, elapsed.as_secs_f64());
    info!("最终 ∇·B = {:.3e}", sim.max_div_b());

    Ok(())
}

fn density_bounds(sim: &Simulation<ProblemSetup>) -> (Real, Real) {
    let g = &sim.data.grid;
    let mut lo = Real::MAX;
    let mut hi = Real::MIN;
    for k in g.beg[2]..g.end[2] {
        for j in g.beg[1]..g.end[1] {
            for i in g.beg[0]..g.end[0] {
                let rho = sim.data.vc.get(RHO, k, j, i);
                lo = lo.min(rho);
                hi = hi.max(rho);
            }
        }
    }
    (lo, hi)
}
