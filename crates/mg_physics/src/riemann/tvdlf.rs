// crates/mg_physics/src/riemann/tvdlf.rs

//! TVDLF / Rusanov 求解器
//!
//! 单波近似：以界面平均态的最大快磁声信号速度做中心耗散，
//! F = ½(F_L + F_R) − ½·c_max·(U_R − U_L)。
//! 最鲁棒、最耗散，亦是等温闭合下无条件可用的后备。

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
    let vxn = dir.vxn();

    let mut ul = [0.0; NVAR];
    let mut ur = [0.0; NVAR];
    prim_to_cons_point(&mut ul, vl, eos);
    prim_to_cons_point(&mut ur, vr, eos);

    let mut fl = [0.0; NVAR];
    let mut fr = [0.0; NVAR];
    physical_flux(&mut fl, vl, &ul, eos, dir);
    physical_flux(&mut fr, vr, &ur, eos, dir);

    // 界面平均态上的信号速度
    let mut vrl = [0.0; NVAR];
    for nv in 0..NVAR {
        vrl[nv] = 0.5 * (vl[nv] + vr[nv]);
    }
    let cf = eos.fast_speed(&vrl, dir);
    let cmax = (vrl[vxn] + cf).abs().max((vrl[vxn] - cf).abs());

    let mut f = [0.0; NVAR];
    for nv in 0..NVAR {
        f[nv] = 0.5 * (fl[nv] + fr[nv] - cmax * (ur[nv] - ul[nv]));
    }
    Ok((f, cmax))
}
