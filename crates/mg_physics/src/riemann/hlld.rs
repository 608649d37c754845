// crates/mg_physics/src/riemann/hlld.rs

//! HLLD 五波求解器
//!
//! Miyoshi & Kusano (2005) 的五波近似：(S_L, S_L*, S_M, S_R*, S_R)
//! 划分出四个中间区，接触速度 S_M 与总压 P* 由跳跃条件确定，
//! Alfvén 内区通过 √ρ* 加权旋转得到。按波速符号链选择返回区的通量。
//!
//! 退化界面（B_n ≈ 0、S_* 贴近 S_M、旋转分母趋零）就地回退到
//! HLL，退化不以错误形式离开核心。

use mg_runtime::Real;

use crate::convert::prim_to_cons_point;
use crate::eos::EquationOfState;
use crate::error::FAIL_RHO;
use crate::grid::Direction;
use crate::vars::*;

use super::flux::{physical_flux, total_pressure};
use super::hll::hll_flux;

/// B_n² 相对总压的退化阈值
const SMALL_BN: Real = 1e-12;
/// 波速/分母的相对退化阈值
const SMALL_WAVE: Real = 1e-9;

/// 逐界面求解
pub(super) fn solve(
    vl: &[Real; NVAR],
    vr: &[Real; NVAR],
    dir: Direction,
    eos: &EquationOfState,
) -> Result<([Real; NVAR], Real), u64> {
    let d = dir.idx();
    let vn = VX1 + d;
    let vt1 = VX1 + (d + 1) % 3;
    let vt2 = VX1 + (d + 2) % 3;
    let bni = BX1 + d;
    let bt1 = BX1 + (d + 1) % 3;
    let bt2 = BX1 + (d + 2) % 3;

    let mut ul = [0.0; NVAR];
    let mut ur = [0.0; NVAR];
    prim_to_cons_point(&mut ul, vl, eos);
    prim_to_cons_point(&mut ur, vr, eos);

    let mut fl = [0.0; NVAR];
    let mut fr = [0.0; NVAR];
    physical_flux(&mut fl, vl, &ul, eos, dir);
    physical_flux(&mut fr, vr, &ur, eos, dir);

    let cfl = eos.fast_speed(vl, dir);
    let cfr = eos.fast_speed(vr, dir);
    let sl = (vl[vn] - cfl).min(vr[vn] - cfr);
    let sr = (vl[vn] + cfl).max(vr[vn] + cfr);
    let cmax = sl.abs().max(sr.abs());

    if sl >= 0.0 {
        return Ok((fl, cmax));
    }
    if sr <= 0.0 {
        return Ok((fr, cmax));
    }

    let bn = vl[bni];
    let ptl = total_pressure(vl, eos);
    let ptr = total_pressure(vr, eos);

    // B_n ≈ 0：五波结构退化为 HLLC 型，按约定回退 HLL
    if bn * bn <= SMALL_BN * (ptl + ptr) {
        return Ok(hll_flux(vl, vr, &ul, &ur, dir, eos));
    }

    // 接触速度与星区总压（跳跃条件）
    let wl = vl[RHO] * (sl - vl[vn]);
    let wr = vr[RHO] * (sr - vr[vn]);
    let sm = (wr * vr[vn] - wl * vl[vn] - ptr + ptl) / (wr - wl);
    let pts = ptl + wl * (sm - vl[vn]);

    if (sl - sm).abs() <= SMALL_WAVE * cmax || (sr - sm).abs() <= SMALL_WAVE * cmax {
        return Ok(hll_flux(vl, vr, &ul, &ur, dir, eos));
    }

    // 单侧星区态
    let star = |v: &[Real; NVAR], u: &[Real; NVAR], s: Real, pt: Real| -> Result<[Real; NVAR], u64> {
        let rho_s = v[RHO] * (s - v[vn]) / (s - sm);
        if rho_s <= 0.0 {
            return Err(FAIL_RHO);
        }
        let denom = v[RHO] * (s - v[vn]) * (s - sm) - bn * bn;
        let scale = v[RHO] * (s - v[vn]) * (s - v[vn]) + bn * bn;
        if denom.abs() <= SMALL_WAVE * scale {
            // 旋转分母退化，由调用方回退 HLL
            return Err(u64::MAX);
        }
        let coef_v = bn * (sm - v[vn]) / denom;
        let coef_b = (v[RHO] * (s - v[vn]) * (s - v[vn]) - bn * bn) / denom;

        let vt1_s = v[vt1] - v[bt1] * coef_v;
        let vt2_s = v[vt2] - v[bt2] * coef_v;
        let bt1_s = v[bt1] * coef_b;
        let bt2_s = v[bt2] * coef_b;

        let vb = v[vn] * bn + v[vt1] * v[bt1] + v[vt2] * v[bt2];
        let vb_s = sm * bn + vt1_s * bt1_s + vt2_s * bt2_s;
        let e_s = ((s - v[vn]) * u[ENG] - pt * v[vn] + pts * sm + bn * (vb - vb_s)) / (s - sm);

        let mut us = [0.0; NVAR];
        us[RHO] = rho_s;
        us[vn] = rho_s * sm;
        us[vt1] = rho_s * vt1_s;
        us[vt2] = rho_s * vt2_s;
        us[ENG] = e_s;
        us[bni] = bn;
        us[bt1] = bt1_s;
        us[bt2] = bt2_s;
        Ok(us)
    };

    let (usl, usr) = match (star(vl, &ul, sl, ptl), star(vr, &ur, sr, ptr)) {
        (Ok(a), Ok(b)) => (a, b),
        (Err(u64::MAX), _) | (_, Err(u64::MAX)) => {
            return Ok(hll_flux(vl, vr, &ul, &ur, dir, eos));
        }
        (Err(code), _) | (_, Err(code)) => return Err(code),
    };

    // Alfvén 内波速
    let sq_rl = usl[RHO].sqrt();
    let sq_rr = usr[RHO].sqrt();
    let ssl = sm - bn.abs() / sq_rl;
    let ssr = sm + bn.abs() / sq_rr;

    let mut f = [0.0; NVAR];
    if ssl >= 0.0 {
        for nv in 0..NVAR {
            f[nv] = fl[nv] + sl * (usl[nv] - ul[nv]);
        }
        return Ok((f, cmax));
    }
    if ssr <= 0.0 {
        for nv in 0..NVAR {
            f[nv] = fr[nv] + sr * (usr[nv] - ur[nv]);
        }
        return Ok((f, cmax));
    }

    // 双星区（Alfvén 旋转内区）
    let sgn = if bn >= 0.0 { 1.0 } else { -1.0 };
    let inv = 1.0 / (sq_rl + sq_rr);
    let vt1_sl = usl[vt1] / usl[RHO];
    let vt2_sl = usl[vt2] / usl[RHO];
    let vt1_sr = usr[vt1] / usr[RHO];
    let vt2_sr = usr[vt2] / usr[RHO];

    let vt1_ss = (sq_rl * vt1_sl + sq_rr * vt1_sr + (usr[bt1] - usl[bt1]) * sgn) * inv;
    let vt2_ss = (sq_rl * vt2_sl + sq_rr * vt2_sr + (usr[bt2] - usl[bt2]) * sgn) * inv;
    let bt1_ss = (sq_rl * usr[bt1] + sq_rr * usl[bt1] + sq_rl * sq_rr * (vt1_sr - vt1_sl) * sgn) * inv;
    let bt2_ss = (sq_rl * usr[bt2] + sq_rr * usl[bt2] + sq_rl * sq_rr * (vt2_sr - vt2_sl) * sgn) * inv;

    let vb_ss = sm * bn + vt1_ss * bt1_ss + vt2_ss * bt2_ss;

    let assemble = |us: &[Real; NVAR], sq_r: Real, side: Real| -> [Real; NVAR] {
        let vb_s = sm * bn + (us[vt1] / us[RHO]) * us[bt1] + (us[vt2] / us[RHO]) * us[bt2];
        let mut uss = [0.0; NVAR];
        uss[RHO] = us[RHO];
        uss[vn] = us[RHO] * sm;
        uss[vt1] = us[RHO] * vt1_ss;
        uss[vt2] = us[RHO] * vt2_ss;
        uss[ENG] = us[ENG] - side * sq_r * (vb_s - vb_ss) * sgn;
        uss[bni] = bn;
        uss[bt1] = bt1_ss;
        uss[bt2] = bt2_ss;
        uss
    };

    if sm >= 0.0 {
        let ussl = assemble(&usl, sq_rl, 1.0);
        for nv in 0..NVAR {
            f[nv] = fl[nv] + sl * (usl[nv] - ul[nv]) + ssl * (ussl[nv] - usl[nv]);
        }
    } else {
        let ussr = assemble(&usr, sq_rr, -1.0);
        for nv in 0..NVAR {
            f[nv] = fr[nv] + sr * (usr[nv] - ur[nv]) + ssr * (ussr[nv] - usr[nv]);
        }
    }
    Ok((f, cmax))
}
