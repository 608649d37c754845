// crates/mg_physics/src/riemann/hll.rs

//! HLL 双波求解器
//!
//! Davis 型波速估计 S_L = min(v_L − c_fL, v_R − c_fR)、
//! S_R = max(v_L + c_fL, v_R + c_fR)，中间只保留一个平均态。
//! 亦作为 HLLD 退化界面的本地回退。

use mg_runtime::Real;

use crate::convert::prim_to_cons_point;
use crate::eos::EquationOfState;
use crate::grid::Direction;
use crate::vars::*;

use super::flux::physical_flux;

/// 逐界面求解
pub(super) fn solve(
    vl: &[Real; NVAR],
    vr: &[Real; NVAR],
    dir: Direction,
    eos: &EquationOfState,
) -> Result<([Real; NVAR], Real), u64> {
    let mut ul = [0.0; NVAR];
    let mut ur = [0.0; NVAR];
    prim_to_cons_point(&mut ul, vl, eos);
    prim_to_cons_point(&mut ur, vr, eos);
    Ok(hll_flux(vl, vr, &ul, &ur, dir, eos))
}

/// HLL 数值通量（供 HLLD 退化回退复用）
pub fn hll_flux(
    vl: &[Real; NVAR],
    vr: &[Real; NVAR],
    ul: &[Real; NVAR],
    ur: &[Real; NVAR],
    dir: Direction,
    eos: &EquationOfState,
) -> ([Real; NVAR], Real) {
    let vxn = dir.vxn();

    let mut fl = [0.0; NVAR];
    let mut fr = [0.0; NVAR];
    physical_flux(&mut fl, vl, ul, eos, dir);
    physical_flux(&mut fr, vr, ur, eos, dir);

    let cfl = eos.fast_speed(vl, dir);
    let cfr = eos.fast_speed(vr, dir);
    let sl = (vl[vxn] - cfl).min(vr[vxn] - cfr);
    let sr = (vl[vxn] + cfl).max(vr[vxn] + cfr);
    let cmax = sl.abs().max(sr.abs());

    let mut f = [0.0; NVAR];
    if sl >= 0.0 {
        f.copy_from_slice(&fl);
    } else if sr <= 0.0 {
        f.copy_from_slice(&fr);
    } else {
        let inv = 1.0 / (sr - sl);
        for nv in 0..NVAR {
            f[nv] = (sr * fl[nv] - sl * fr[nv] + sl * sr * (ur[nv] - ul[nv])) * inv;
        }
    }
    (f, cmax)
}
