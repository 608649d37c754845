// crates/mg_physics/src/riemann/flux.rs

//! 物理通量
//!
//! 方向 d 上的理想 MHD 通量：守恒量被 v_d 平流，动量通道附加
//! 总压（气压 + 磁压），能量通道含 Poynting 项，横向磁场通道为
//! 感应项 v_d·B_t − v_t·B_d。法向磁场通道的表达式自然归零。

use mg_runtime::Real;

use crate::eos::EquationOfState;
use crate::grid::Direction;
use crate::vars::*;

/// 方向 dir 上的物理通量 F(V, U)
#[inline]
pub(crate) fn physical_flux(
    f: &mut [Real; NVAR],
    v: &[Real; NVAR],
    u: &[Real; NVAR],
    eos: &EquationOfState,
    dir: Direction,
) {
    let vxn = dir.vxn();
    let bxn = dir.bxn();
    let vn = v[vxn];
    let bn = v[bxn];

    let pgas = match eos {
        EquationOfState::Adiabatic { .. } => v[PRS],
        EquationOfState::Isothermal { c2_iso } => c2_iso * v[RHO],
    };
    let b2 = v[BX1] * v[BX1] + v[BX2] * v[BX2] + v[BX3] * v[BX3];
    let ptot = pgas + 0.5 * b2;

    f[RHO] = u[VX1 + dir.idx()];

    f[MX1] = u[MX1] * vn - bn * v[BX1];
    f[MX2] = u[MX2] * vn - bn * v[BX2];
    f[MX3] = u[MX3] * vn - bn * v[BX3];
    f[vxn] += ptot;

    f[ENG] = if eos.has_energy() {
        let vb = v[VX1] * v[BX1] + v[VX2] * v[BX2] + v[VX3] * v[BX3];
        (u[ENG] + ptot) * vn - bn * vb
    } else {
        0.0
    };

    // m = n 时感应项自然为零
    f[BX1] = vn * v[BX1] - v[VX1] * bn;
    f[BX2] = vn * v[BX2] - v[VX2] * bn;
    f[BX3] = vn * v[BX3] - v[VX3] * bn;
}

/// 总压（气压 + 磁压）
#[inline]
pub(crate) fn total_pressure(v: &[Real; NVAR], eos: &EquationOfState) -> Real {
    let pgas = match eos {
        EquationOfState::Adiabatic { .. } => v[PRS],
        EquationOfState::Isothermal { c2_iso } => c2_iso * v[RHO],
    };
    pgas + 0.5 * (v[BX1] * v[BX1] + v[BX2] * v[BX2] + v[BX3] * v[BX3])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::prim_to_cons_point;

    #[test]
    fn test_hydro_limit_momentum_flux() {
        // B = 0：动量通量退化为 ρv_n v_m + P δ_nm
        let eos = EquationOfState::Adiabatic { gamma: 1.4 };
        let mut v = [0.0; NVAR];
        v[RHO] = 2.0;
        v[VX1] = 3.0;
        v[VX2] = 1.0;
        v[PRS] = 5.0;
        let mut u = [0.0; NVAR];
        prim_to_cons_point(&mut u, &v, &eos);
        let mut f = [0.0; NVAR];
        physical_flux(&mut f, &v, &u, &eos, Direction::I);

        assert!((f[RHO] - 6.0).abs() < 1e-14);
        assert!((f[MX1] - (2.0 * 9.0 + 5.0)).abs() < 1e-14);
        assert!((f[MX2] - 2.0 * 3.0 * 1.0).abs() < 1e-14);
        assert!((f[ENG] - (u[ENG] + 5.0) * 3.0).abs() < 1e-13);
        assert_eq!(f[BX1], 0.0);
    }

    #[test]
    fn test_normal_induction_vanishes_each_direction() {
        let eos = EquationOfState::Adiabatic { gamma: 5.0 / 3.0 };
        let mut v = [0.0; NVAR];
        v[RHO] = 1.0;
        v[VX1] = 0.3;
        v[VX2] = -0.2;
        v[VX3] = 0.9;
        v[PRS] = 1.0;
        v[BX1] = 0.4;
        v[BX2] = -0.6;
        v[BX3] = 1.1;
        let mut u = [0.0; NVAR];
        prim_to_cons_point(&mut u, &v, &eos);
        for dir in [Direction::I, Direction::J, Direction::K] {
            let mut f = [0.0; NVAR];
            physical_flux(&mut f, &v, &u, &eos, dir);
            assert!(f[dir.bxn()].abs() < 1e-15);
        }
    }

    #[test]
    fn test_isothermal_pressure_contribution() {
        let eos = EquationOfState::Isothermal { c2_iso: 2.0 };
        let mut v = [0.0; NVAR];
        v[RHO] = 3.0;
        let mut u = [0.0; NVAR];
        prim_to_cons_point(&mut u, &v, &eos);
        let mut f = [0.0; NVAR];
        physical_flux(&mut f, &v, &u, &eos, Direction::I);
        // 静止态：F[MX1] = C²_iso·ρ
        assert!((f[MX1] - 6.0).abs() < 1e-14);
        assert_eq!(f[ENG], 0.0);
    }
}
