//! Sod 激波管（1D 纯流体）
//!
//! 经典黎曼问题：γ=1.4，左 (ρ=1, P=1)，右 (ρ=0.125, P=0.1)，
//! B ≡ 0（MHD 核心以零磁场复现纯流体行为）。
//! t=20（域长 100）时解为稀疏波-接触-激波三元组，
//! 平台值与精确解比对，求解器分支不影响结论。

use mg_config::{BoundaryConfig, BoundaryPolicy, SolverConfig, SolverKind};
use mg_physics::prelude::*;
use mg_physics::vars::*;

struct SodSetup;

impl Setup for SodSetup {
    fn init_flow(&mut self, data: &mut DataBlock) {
        let g = data.grid.clone();
        for i in 0..g.np_tot[0] {
            let x = g.x[0].get(i);
            let left = x < 50.0;
            data.vc.set(RHO, 0, 0, i, if left { 1.0 } else { 0.125 });
            data.vc.set(VX1, 0, 0, i, 0.0);
            data.vc.set(PRS, 0, 0, i, if left { 1.0 } else { 0.1 });
        }
        for i in 0..=g.np_tot[0] {
            data.vs.set(0, 0, 0, i, 0.0);
        }
    }
}

fn sod_config(solver: SolverKind) -> SolverConfig {
    let mut config = SolverConfig::default();
    config.solver = solver;
    config.grid.n = [400, 1, 1];
    config.grid.end = [100.0, 1.0, 1.0];
    config.boundary = BoundaryConfig::uniform(BoundaryPolicy::Outflow);
    config.hydro.gamma = 1.4;
    config.time.cfl = 0.4;
    config
}

/// 按坐标取密度
fn rho_at(sim: &Simulation<SodSetup>, x: Real) -> Real {
    let g = &sim.data.grid;
    let mut best = g.beg[0];
    let mut dist = Real::MAX;
    for i in g.beg[0]..g.end[0] {
        let d = (g.x[0].get(i) - x).abs();
        if d < dist {
            dist = d;
            best = i;
        }
    }
    sim.data.vc.get(RHO, 0, 0, best)
}

fn total_mass(sim: &Simulation<SodSetup>) -> Real {
    let g = &sim.data.grid;
    let mut m = 0.0;
    for i in g.beg[0]..g.end[0] {
        m += sim.data.vc.get(RHO, 0, 0, i) * g.dx[0].get(i);
    }
    m
}

fn run(solver: SolverKind) -> Simulation<SodSetup> {
    let mut sim = Simulation::new(&sod_config(solver), SodSetup).unwrap();
    sim.run_until(20.0).unwrap();
    sim
}

#[test]
fn test_sod_wave_triplet_hll() {
    let sim = run(SolverKind::Hll);

    // 未扰动区
    assert!((rho_at(&sim, 10.0) - 1.0).abs() < 1e-10);
    assert!((rho_at(&sim, 97.0) - 0.125).abs() < 1e-10);

    // 接触两侧平台（精确解 ρ*L ≈ 0.4263, ρ*R ≈ 0.2656）
    let rho_star_l = rho_at(&sim, 55.0);
    let rho_star_r = rho_at(&sim, 78.0);
    assert!(
        (rho_star_l - 0.4263).abs() < 0.04,
        "接触左平台偏差过大: {}",
        rho_star_l
    );
    assert!(
        (rho_star_r - 0.2656).abs() < 0.04,
        "接触右平台偏差过大: {}",
        rho_star_r
    );

    // 平台间速度（精确解 u* ≈ 0.9274）
    let g = &sim.data.grid;
    let mut vx_mid = 0.0;
    let mut count = 0;
    for i in g.beg[0]..g.end[0] {
        let x = g.x[0].get(i);
        if (55.0..75.0).contains(&x) {
            vx_mid += sim.data.vc.get(VX1, 0, 0, i);
            count += 1;
        }
    }
    vx_mid /= count as Real;
    assert!((vx_mid - 0.9274).abs() < 0.05, "接触区速度: {}", vx_mid);

    // 全场正性
    for i in g.beg[0]..g.end[0] {
        assert!(sim.data.vc.get(RHO, 0, 0, i) > 0.0);
        assert!(sim.data.vc.get(PRS, 0, 0, i) > 0.0);
    }
}

#[test]
fn test_sod_solver_branch_irrelevant() {
    // 波未触界前：各求解器给出同一组平台（粗容差）
    let hll = run(SolverKind::Hll);
    let tvdlf = run(SolverKind::Tvdlf);
    let roe = run(SolverKind::Roe);
    for x in [30.0, 55.0, 78.0, 90.0] {
        let a = rho_at(&hll, x);
        let b = rho_at(&tvdlf, x);
        let c = rho_at(&roe, x);
        assert!((a - b).abs() < 0.08, "x={}: hll={}, tvdlf={}", x, a, b);
        assert!((a - c).abs() < 0.08, "x={}: hll={}, roe={}", x, a, c);
    }
}

#[test]
fn test_sod_mass_conserved_before_outflow() {
    // t=20 时激波仍在域内，出流边界尚未放走质量
    let sim = run(SolverKind::Hll);
    let m = total_mass(&sim);
    let m0 = 1.0 * 50.0 + 0.125 * 50.0;
    assert!((m - m0).abs() < 1e-9 * m0, "质量不守恒: {} vs {}", m, m0);
}
