// crates/mg_physics/src/riemann/mod.rs

//! 黎曼通量（C3）
//!
//! 对方向 dir 上活动范围内的每个界面，从左右原始态计算数值通量，
//! 并：
//!
//! 1. 把界面上垂直于 dir 的两个电动势分量（e = −v×B，即感应通量的
//!    ±号重排）写入面心电动势缓冲，供棱角平均（C5）使用；
//! 2. 向逆时间步累加器写入 c_max/dx，积分器据此换算 CFL 时间步。
//!
//! 求解器在初始化期选定一次，扫掠按选定分支单态化展开，
//! 内层循环没有逐界面的间接调用。
//!
//! 扫掠范围在垂直于 dir 的方向各加宽一个单元，与重构（C2）的
//! 加宽一致：棱角电动势平均需要读取横向界面的通量。
//!
//! 等温闭合下 HLLD 与 Roe 的五波/特征结构不成立，整个扫掠回退
//! 到 HLL（决策记录见 DESIGN.md）。

mod flux;
mod hll;
mod hlld;
mod roe;
mod tvdlf;

pub(crate) use flux::physical_flux;
pub use hll::hll_flux;

use mg_config::SolverKind;
use mg_runtime::{par_for_3d, Real};

use crate::data::DataBlock;
use crate::eos::EquationOfState;
use crate::error::{FirstFailure, PhysicsResult, FAIL_PRS, FAIL_RHO};
use crate::grid::Direction;
use crate::vars::*;

/// 逐界面求解函数签名：返回 (数值通量, c_max) 或违规量标签
type PointSolver =
    fn(&[Real; NVAR], &[Real; NVAR], Direction, &EquationOfState) -> Result<([Real; NVAR], Real), u64>;

/// 方向 dir 上的黎曼通量扫掠
pub fn calc_riemann_flux(
    data: &mut DataBlock,
    dir: Direction,
    kind: SolverKind,
    eos: &EquationOfState,
) -> PhysicsResult<()> {
    let effective = if eos.has_energy() {
        kind
    } else {
        match kind {
            SolverKind::Hlld | SolverKind::Roe => SolverKind::Hll,
            other => other,
        }
    };

    match effective {
        SolverKind::Tvdlf => sweep(data, dir, eos, tvdlf::solve),
        SolverKind::Hll => sweep(data, dir, eos, hll::solve),
        SolverKind::Hlld => sweep(data, dir, eos, hlld::solve),
        SolverKind::Roe => sweep(data, dir, eos, roe::solve),
    }
}

fn sweep(
    data: &mut DataBlock,
    dir: Direction,
    eos: &EquationOfState,
    solve: PointSolver,
) -> PhysicsResult<()> {
    let g = &data.grid;
    let (ko, jo, io) = dir.offsets();
    let d = dir.idx();

    let ie = usize::from(dir != Direction::I);
    let je = usize::from(dir != Direction::J && g.is_active(1));
    let ke = usize::from(dir != Direction::K && g.is_active(2));

    let kr = g.beg[2] - ke..g.end[2] + ko + ke;
    let jr = g.beg[1] - je..g.end[1] + jo + je;
    let ir = g.beg[0] - ie..g.end[0] + io + ie;

    let prim_l = data.prim_l.view();
    let prim_r = data.prim_r.view();
    let flux = data.flux.view();
    let inv_dt = data.inv_dt.view();
    let ezi = data.emf.ezi.view();
    let eyi = data.emf.eyi.view();
    let ezj = data.emf.ezj.view();
    let exj = data.emf.exj.view();
    let eyk = data.emf.eyk.view();
    let exk = data.emf.exk.view();
    let dx = &data.grid.dx[d];
    let eos = *eos;
    let has_energy = eos.has_energy();
    let fail = FirstFailure::new();

    par_for_3d(data.exec, kr, jr, ir, |k, j, i| {
        let mut vl = [0.0; NVAR];
        let mut vr = [0.0; NVAR];
        for nv in 0..NVAR {
            vl[nv] = prim_l.get(nv, k, j, i);
            vr[nv] = prim_r.get(nv, k, j, i);
        }

        if vl[RHO] <= 0.0 || vr[RHO] <= 0.0 {
            fail.record(FAIL_RHO, k, j, i);
            return;
        }
        if has_energy && (vl[PRS] <= 0.0 || vr[PRS] <= 0.0) {
            fail.record(FAIL_PRS, k, j, i);
            return;
        }

        match solve(&vl, &vr, dir, &eos) {
            Ok((fx, cmax)) => {
                for nv in 0..NVAR {
                    flux.set(nv, k, j, i, fx[nv]);
                }
                // 电动势捕获：感应通量即 ±E 的横向分量
                match dir {
                    Direction::I => {
                        ezi.set(k, j, i, -fx[BX2]);
                        eyi.set(k, j, i, fx[BX3]);
                    }
                    Direction::J => {
                        ezj.set(k, j, i, fx[BX1]);
                        exj.set(k, j, i, -fx[BX3]);
                    }
                    Direction::K => {
                        eyk.set(k, j, i, -fx[BX1]);
                        exk.set(k, j, i, fx[BX2]);
                    }
                }
                let ig = io * i + jo * j + ko * k;
                inv_dt.set(k, j, i, inv_dt.get(k, j, i) + cmax / dx.get(ig));
            }
            Err(code) => fail.record(code, k, j, i),
        }
    });

    if let Some(err) = fail.take(|what, k, j, i| {
        let nv = if what == "rho" { RHO } else { PRS };
        data.prim_l.get(nv, k, j, i).min(data.prim_r.get(nv, k, j, i))
    }) {
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::prim_to_cons_point;

    pub(crate) fn sample_left() -> [Real; NVAR] {
        let mut v = [0.0; NVAR];
        v[RHO] = 1.0;
        v[VX1] = 0.2;
        v[VX2] = -0.1;
        v[VX3] = 0.05;
        v[PRS] = 1.0;
        v[BX1] = 0.75;
        v[BX2] = 1.0;
        v[BX3] = 0.2;
        v
    }

    pub(crate) fn sample_right() -> [Real; NVAR] {
        let mut v = sample_left();
        v[RHO] = 0.125;
        v[VX1] = -0.3;
        v[PRS] = 0.1;
        v[BX2] = -1.0;
        v
    }

    /// 一致性：V_L = V_R 时数值通量等于物理通量（对所有求解器成立）
    #[test]
    fn test_consistency_all_solvers() {
        let eos = EquationOfState::Adiabatic { gamma: 5.0 / 3.0 };
        let v = sample_left();
        let mut u = [0.0; NVAR];
        prim_to_cons_point(&mut u, &v, &eos);
        let mut fexact = [0.0; NVAR];
        physical_flux(&mut fexact, &v, &u, &eos, Direction::I);

        let solvers: [(&str, PointSolver); 4] = [
            ("tvdlf", tvdlf::solve),
            ("hll", hll::solve),
            ("hlld", hlld::solve),
            ("roe", roe::solve),
        ];
        for (name, solve) in solvers {
            let (f, cmax) = solve(&v, &v, Direction::I, &eos).unwrap();
            for nv in 0..NVAR {
                assert!(
                    (f[nv] - fexact[nv]).abs() < 1e-11,
                    "{} 求解器通道 {} 不一致: {} vs {}",
                    name,
                    VAR_NAMES[nv],
                    f[nv],
                    fexact[nv]
                );
            }
            assert!(cmax > 0.0);
        }
    }

    /// 法向磁场通量恒为零（左右共享交错面值）
    #[test]
    fn test_normal_field_flux_vanishes() {
        let eos = EquationOfState::Adiabatic { gamma: 2.0 };
        let vl = sample_left();
        let vr = sample_right();
        let solvers: [PointSolver; 4] = [tvdlf::solve, hll::solve, hlld::solve, roe::solve];
        for solve in solvers {
            let (f, _) = solve(&vl, &vr, Direction::I, &eos).unwrap();
            assert!(f[BX1].abs() < 1e-12);
        }
    }

    /// 对称性：交换左右态并翻转法向速度与横向磁场给出镜像通量
    #[test]
    fn test_mirror_symmetry_hlld() {
        let eos = EquationOfState::Adiabatic { gamma: 5.0 / 3.0 };
        let vl = sample_left();
        let vr = sample_right();

        let mirror = |v: &[Real; NVAR]| {
            let mut m = *v;
            m[VX1] = -v[VX1];
            m[BX2] = -v[BX2];
            m[BX3] = -v[BX3];
            m
        };
        let (f, _) = hlld::solve(&vl, &vr, Direction::I, &eos).unwrap();
        let (fm, _) = hlld::solve(&mirror(&vr), &mirror(&vl), Direction::I, &eos).unwrap();

        // 质量与能量通量反号，法向动量通量不变
        assert!((f[RHO] + fm[RHO]).abs() < 1e-11);
        assert!((f[MX1] - fm[MX1]).abs() < 1e-11);
        assert!((f[ENG] + fm[ENG]).abs() < 1e-11);
    }
}
