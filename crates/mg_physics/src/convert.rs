// crates/mg_physics/src/convert.rs

//! 守恒量/原始量转换（C1）
//!
//! 逐点映射，不依赖邻居。磁场通道两种表示下同值，直接透传。
//! 转换失败（ρ ≤ 0 或 P ≤ 0）是物理性致命错误，核心不做任何
//! 静默钳制；是否缩小 dt 重试由积分器决定。

use mg_runtime::{par_for_3d, Real};

use crate::data::DataBlock;
use crate::eos::EquationOfState;
use crate::error::{FirstFailure, PhysicsResult, FAIL_PRS, FAIL_RHO};
use crate::vars::*;

/// 原始量 → 守恒量（逐点）
#[inline]
pub fn prim_to_cons_point(u: &mut [Real; NVAR], v: &[Real; NVAR], eos: &EquationOfState) {
    u[RHO] = v[RHO];
    u[MX1] = v[RHO] * v[VX1];
    u[MX2] = v[RHO] * v[VX2];
    u[MX3] = v[RHO] * v[VX3];
    u[BX1] = v[BX1];
    u[BX2] = v[BX2];
    u[BX3] = v[BX3];
    match eos {
        EquationOfState::Adiabatic { gamma } => {
            let kin = 0.5 * v[RHO] * (v[VX1] * v[VX1] + v[VX2] * v[VX2] + v[VX3] * v[VX3]);
            let mag = 0.5 * (v[BX1] * v[BX1] + v[BX2] * v[BX2] + v[BX3] * v[BX3]);
            u[ENG] = v[PRS] / (gamma - 1.0) + kin + mag;
        }
        EquationOfState::Isothermal { .. } => {
            u[ENG] = v[PRS];
        }
    }
}

/// 守恒量 → 原始量（逐点）
///
/// 失败返回违规量标签（`FAIL_RHO`/`FAIL_PRS`）。
#[inline]
pub(crate) fn cons_to_prim_point(
    v: &mut [Real; NVAR],
    u: &[Real; NVAR],
    eos: &EquationOfState,
) -> Result<(), u64> {
    let rho = u[RHO];
    if rho <= 0.0 {
        return Err(FAIL_RHO);
    }
    let inv_rho = 1.0 / rho;
    v[RHO] = rho;
    v[VX1] = u[MX1] * inv_rho;
    v[VX2] = u[MX2] * inv_rho;
    v[VX3] = u[MX3] * inv_rho;
    v[BX1] = u[BX1];
    v[BX2] = u[BX2];
    v[BX3] = u[BX3];
    match eos {
        EquationOfState::Adiabatic { gamma } => {
            let kin = 0.5 * inv_rho * (u[MX1] * u[MX1] + u[MX2] * u[MX2] + u[MX3] * u[MX3]);
            let mag = 0.5 * (u[BX1] * u[BX1] + u[BX2] * u[BX2] + u[BX3] * u[BX3]);
            let prs = (gamma - 1.0) * (u[ENG] - kin - mag);
            if prs <= 0.0 {
                return Err(FAIL_PRS);
            }
            v[PRS] = prs;
        }
        EquationOfState::Isothermal { .. } => {
            v[PRS] = u[ENG];
        }
    }
    Ok(())
}

/// 全数据块守恒量 → 原始量
pub fn convert_cons_to_prim(data: &mut DataBlock, eos: &EquationOfState) -> PhysicsResult<()> {
    let g = &data.grid;
    let (nk, nj, ni) = (g.np_tot[2], g.np_tot[1], g.np_tot[0]);
    let vc = data.vc.view();
    let uc = data.uc.view();
    let eos = *eos;
    let fail = FirstFailure::new();

    par_for_3d(data.exec, 0..nk, 0..nj, 0..ni, |k, j, i| {
        let mut u = [0.0; NVAR];
        for nv in 0..NVAR {
            u[nv] = uc.get(nv, k, j, i);
        }
        let mut v = [0.0; NVAR];
        match cons_to_prim_point(&mut v, &u, &eos) {
            Ok(()) => {
                for nv in 0..NVAR {
                    vc.set(nv, k, j, i, v[nv]);
                }
            }
            Err(code) => fail.record(code, k, j, i),
        }
    });

    if let Some(err) = fail.take(|what, k, j, i| match what {
        "rho" => data.uc.get(RHO, k, j, i),
        _ => {
            let mut u = [0.0; NVAR];
            for nv in 0..NVAR {
                u[nv] = data.uc.get(nv, k, j, i);
            }
            let kin =
                0.5 / u[RHO] * (u[MX1] * u[MX1] + u[MX2] * u[MX2] + u[MX3] * u[MX3]);
            let mag = 0.5 * (u[BX1] * u[BX1] + u[BX2] * u[BX2] + u[BX3] * u[BX3]);
            (eos.gamma() - 1.0) * (u[ENG] - kin - mag)
        }
    }) {
        return Err(err);
    }
    Ok(())
}

/// 全数据块原始量 → 守恒量
pub fn convert_prim_to_cons(data: &mut DataBlock, eos: &EquationOfState) {
    let g = &data.grid;
    let (nk, nj, ni) = (g.np_tot[2], g.np_tot[1], g.np_tot[0]);
    let vc = data.vc.view();
    let uc = data.uc.view();
    let eos = *eos;

    par_for_3d(data.exec, 0..nk, 0..nj, 0..ni, |k, j, i| {
        let mut v = [0.0; NVAR];
        for nv in 0..NVAR {
            v[nv] = vc.get(nv, k, j, i);
        }
        let mut u = [0.0; NVAR];
        prim_to_cons_point(&mut u, &v, &eos);
        for nv in 0..NVAR {
            uc.set(nv, k, j, i, u[nv]);
        }
    });
}
