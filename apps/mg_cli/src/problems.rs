// apps/mg_cli/src/problems.rs

//! 内置测试问题
//!
//! 经典算例的初值与推荐配置：Sod 激波管、Brio-Wu 磁流体激波管、
//! Orszag-Tang 涡。配置文件可在此基础上覆盖。

use std::f64::consts::PI;

use clap::ValueEnum;
use mg_config::{BoundaryConfig, BoundaryPolicy, SolverConfig, SolverKind};
use mg_physics::prelude::*;
use mg_physics::vars::*;

/// 内置问题
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Problem {
    /// Sod 激波管（1D 纯流体）
    Sod,
    /// Brio-Wu 磁流体激波管（1D MHD）
    BrioWu,
    /// Orszag-Tang 涡（2D MHD）
    OrszagTang,
}

impl Problem {
    /// 推荐配置
    pub fn default_config(&self) -> SolverConfig {
        let mut config = SolverConfig::default();
        match self {
            Self::Sod => {
                config.solver = SolverKind::Hll;
                config.grid.n = [400, 1, 1];
                config.grid.end = [100.0, 1.0, 1.0];
                config.boundary = BoundaryConfig::uniform(BoundaryPolicy::Outflow);
                config.hydro.gamma = 1.4;
                config.time.cfl = 0.4;
            }
            Self::BrioWu => {
                config.solver = SolverKind::Hlld;
                config.grid.n = [400, 1, 1];
                config.grid.end = [100.0, 1.0, 1.0];
                config.boundary = BoundaryConfig::uniform(BoundaryPolicy::Outflow);
                config.hydro.gamma = 2.0;
                config.time.cfl = 0.4;
            }
            Self::OrszagTang => {
                config.solver = SolverKind::Hlld;
                config.grid.dimensions = 2;
                config.grid.n = [256, 256, 1];
                config.grid.end = [2.0 * PI, 2.0 * PI, 1.0];
                config.boundary = BoundaryConfig::uniform(BoundaryPolicy::Periodic);
                config.hydro.gamma = 5.0 / 3.0;
                config.time.cfl = 0.4;
            }
        }
        config
    }

    /// 推荐结束时刻
    pub fn default_t_end(&self) -> Real {
        match self {
            Self::Sod => 20.0,
            Self::BrioWu => 10.0,
            Self::OrszagTang => 0.5,
        }
    }
}

/// 内置问题的初值钩子
pub struct ProblemSetup {
    problem: Problem,
}

impl ProblemSetup {
    /// 创建
    pub fn new(problem: Problem) -> Self {
        Self { problem }
    }
}

impl Setup for ProblemSetup {
    fn init_flow(&mut self, data: &mut DataBlock) {
        match self.problem {
            Problem::Sod => init_sod(data),
            Problem::BrioWu => init_brio_wu(data),
            Problem::OrszagTang => init_orszag_tang(data),
        }
    }
}

fn init_sod(data: &mut DataBlock) {
    let g = data.grid.clone();
    for i in 0..g.np_tot[0] {
        let left = g.x[0].get(i) < 50.0;
        data.vc.set(RHO, 0, 0, i, if left { 1.0 } else { 0.125 });
        data.vc.set(PRS, 0, 0, i, if left { 1.0 } else { 0.1 });
    }
    for i in 0..=g.np_tot[0] {
        data.vs.set(0, 0, 0, i, 0.0);
    }
}

fn init_brio_wu(data: &mut DataBlock) {
    let g = data.grid.clone();
    for i in 0..g.np_tot[0] {
        let left = g.x[0].get(i) < 50.0;
        data.vc.set(RHO, 0, 0, i, if left { 1.0 } else { 0.125 });
        data.vc.set(PRS, 0, 0, i, if left { 1.0 } else { 0.1 });
        data.vc.set(BX1, 0, 0, i, 0.75);
        data.vc.set(BX2, 0, 0, i, if left { 1.0 } else { -1.0 });
    }
    for i in 0..=g.np_tot[0] {
        data.vs.set(0, 0, 0, i, 0.75);
    }
}

fn init_orszag_tang(data: &mut DataBlock) {
    let g = data.grid.clone();
    let rho0 = 25.0 / (36.0 * PI);
    let p0 = 5.0 / (12.0 * PI);
    let b0 = 1.0 / (4.0 * PI).sqrt();

    for j in 0..g.np_tot[1] {
        for i in 0..g.np_tot[0] {
            let x = g.x[0].get(i);
            let y = g.x[1].get(j);
            data.vc.set(RHO, 0, j, i, rho0);
            data.vc.set(PRS, 0, j, i, p0);
            data.vc.set(VX1, 0, j, i, -y.sin());
            data.vc.set(VX2, 0, j, i, x.sin());
            data.vc.set(BX1, 0, j, i, -b0 * y.sin());
            data.vc.set(BX2, 0, j, i, b0 * (2.0 * x).sin());
        }
    }
    for j in 0..g.np_tot[1] {
        for i in 0..=g.np_tot[0] {
            let y = g.x[1].get(j);
            data.vs.set(0, 0, j, i, -b0 * y.sin());
        }
    }
    for j in 0..=g.np_tot[1] {
        for i in 0..g.np_tot[0] {
            let x = g.x[0].get(i);
            data.vs.set(1, 0, j, i, b0 * (2.0 * x).sin());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs_valid() {
        for p in [Problem::Sod, Problem::BrioWu, Problem::OrszagTang] {
            assert!(p.default_config().validate().is_ok());
            assert!(p.default_t_end() > 0.0);
        }
    }
}
