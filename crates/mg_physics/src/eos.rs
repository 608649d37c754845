// crates/mg_physics/src/eos.rs

//! 状态方程闭合
//!
//! 绝热闭合携带能量方程（声速 √(γP/ρ)）；等温闭合无能量方程，
//! 声速为常数 √C²_iso。快磁声速由两者与磁压共同决定。

use mg_config::HydroConfig;
use mg_runtime::Real;

use crate::grid::Direction;
use crate::vars::*;

/// 状态方程
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EquationOfState {
    /// 绝热理想气体
    Adiabatic {
        /// 绝热指数
        gamma: Real,
    },
    /// 等温
    Isothermal {
        /// 声速平方
        c2_iso: Real,
    },
}

impl EquationOfState {
    /// 由配置构建
    pub fn from_config(config: &HydroConfig) -> Self {
        match config.eos {
            mg_config::EosKind::Adiabatic => Self::Adiabatic {
                gamma: config.gamma,
            },
            mg_config::EosKind::Isothermal => Self::Isothermal {
                c2_iso: config.c2_iso,
            },
        }
    }

    /// 是否携带能量方程
    #[inline]
    pub fn has_energy(&self) -> bool {
        matches!(self, Self::Adiabatic { .. })
    }

    /// 绝热指数（等温闭合下无意义，返回 1）
    #[inline]
    pub fn gamma(&self) -> Real {
        match self {
            Self::Adiabatic { gamma } => *gamma,
            Self::Isothermal { .. } => 1.0,
        }
    }

    /// 声速平方 a² = γP/ρ（绝热）或 C²_iso（等温）
    #[inline]
    pub fn sound_speed2(&self, v: &[Real; NVAR]) -> Real {
        match self {
            Self::Adiabatic { gamma } => gamma * v[PRS] / v[RHO],
            Self::Isothermal { c2_iso } => *c2_iso,
        }
    }

    /// 沿方向 dir 的快磁声速
    ///
    /// c_f² 为 c⁴ − (a²+b²)c² + a²·b_n² = 0 的较大根，
    /// 其中 b² = |B|²/ρ，b_n = B_n/√ρ。
    #[inline]
    pub fn fast_speed(&self, v: &[Real; NVAR], dir: Direction) -> Real {
        let a2 = self.sound_speed2(v);
        let inv_rho = 1.0 / v[RHO];
        let b2 = (v[BX1] * v[BX1] + v[BX2] * v[BX2] + v[BX3] * v[BX3]) * inv_rho;
        let bn2 = v[dir.bxn()] * v[dir.bxn()] * inv_rho;
        let sum = a2 + b2;
        let disc = (sum * sum - 4.0 * a2 * bn2).max(0.0);
        (0.5 * (sum + disc.sqrt())).sqrt()
    }

    /// 沿方向 dir 的慢磁声速
    #[inline]
    pub fn slow_speed(&self, v: &[Real; NVAR], dir: Direction) -> Real {
        let a2 = self.sound_speed2(v);
        let inv_rho = 1.0 / v[RHO];
        let b2 = (v[BX1] * v[BX1] + v[BX2] * v[BX2] + v[BX3] * v[BX3]) * inv_rho;
        let bn2 = v[dir.bxn()] * v[dir.bxn()] * inv_rho;
        let sum = a2 + b2;
        let disc = (sum * sum - 4.0 * a2 * bn2).max(0.0);
        (0.5 * (sum - disc.sqrt())).max(0.0).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prim(rho: Real, prs: Real, b: [Real; 3]) -> [Real; NVAR] {
        let mut v = [0.0; NVAR];
        v[RHO] = rho;
        v[PRS] = prs;
        v[BX1] = b[0];
        v[BX2] = b[1];
        v[BX3] = b[2];
        v
    }

    #[test]
    fn test_sound_speed_adiabatic() {
        let eos = EquationOfState::Adiabatic { gamma: 5.0 / 3.0 };
        let v = prim(1.0, 0.6, [0.0; 3]);
        assert!((eos.sound_speed2(&v) - 1.0).abs() < 1e-14);
    }

    #[test]
    fn test_fast_speed_reduces_to_sound_without_field() {
        let eos = EquationOfState::Adiabatic { gamma: 1.4 };
        let v = prim(1.0, 1.0, [0.0; 3]);
        let cf = eos.fast_speed(&v, Direction::I);
        assert!((cf - (1.4f64).sqrt()).abs() < 1e-13);
    }

    #[test]
    fn test_fast_speed_aligned_field() {
        // B 沿传播方向：c_f = max(a, c_a)
        let eos = EquationOfState::Adiabatic { gamma: 2.0 };
        let v = prim(1.0, 0.5, [2.0, 0.0, 0.0]);
        // a² = 1, c_a² = 4 → c_f = 2
        let cf = eos.fast_speed(&v, Direction::I);
        assert!((cf - 2.0).abs() < 1e-12);
        let cs = eos.slow_speed(&v, Direction::I);
        assert!((cs - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_isothermal_constant_sound_speed() {
        let eos = EquationOfState::Isothermal { c2_iso: 4.0 };
        let v = prim(2.0, 0.0, [0.0; 3]);
        assert!((eos.sound_speed2(&v) - 4.0).abs() < 1e-14);
    }
}
