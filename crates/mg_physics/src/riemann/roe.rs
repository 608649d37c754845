// crates/mg_physics/src/riemann/roe.rs

//! Roe 特征分解求解器
//!
//! √ρ 加权的 Roe 型平均态上做理想 MHD 七波特征分解
//! （快/慢磁声 ×2、Alfvén ×2、熵波），
//! F = ½(F_L+F_R) − ½·Σ|λ_k|·α_k·r_k。
//!
//! 特征向量取 Roe & Balsara 归一化：α_f/α_s 因子消除三重退化点的
//! 病态，横向单位向量 β 在 B_t → 0 时取 (1/√2, 1/√2)。
//! 熵修正为 Harten 型：|λ| < δ 时以 (λ²+δ²)/(2δ) 抹平，
//! δ = 0.1·(|v_n|+c_f)，仅作用于非线性（磁声）波族。
//!
//! 波强以原始量投影计算，再经平均态雅可比映射回守恒增量；
//! 分解的完备性（Σ α_k r_k = ΔW）由单元测试逐通道验证。

use mg_runtime::Real;

use crate::convert::prim_to_cons_point;
use crate::eos::EquationOfState;
use crate::grid::Direction;
use crate::vars::*;

use super::flux::physical_flux;

/// 熵修正系数
const ENTROPY_EPS: Real = 0.1;
/// 退化阈值
const SMALL: Real = 1e-12;

/// 七波特征分解的中间量
struct RoeBasis {
    rho: Real,
    vn: Real,
    vt1: Real,
    vt2: Real,
    bt1: Real,
    bt2: Real,
    a2: Real,
    cf: Real,
    cs: Real,
    ca: Real,
    alpha_f: Real,
    alpha_s: Real,
    beta_y: Real,
    beta_z: Real,
    sgn: Real,
}

/// 波强（α_k），次序：快−、Alfvén−、慢−、熵、慢+、Alfvén+、快+
struct WaveStrengths([Real; 7]);

fn build_basis(vl: &[Real; NVAR], vr: &[Real; NVAR], dir: Direction, gamma: Real) -> RoeBasis {
    let d = dir.idx();
    let vn_i = VX1 + d;
    let vt1_i = VX1 + (d + 1) % 3;
    let vt2_i = VX1 + (d + 2) % 3;
    let bn_i = BX1 + d;
    let bt1_i = BX1 + (d + 1) % 3;
    let bt2_i = BX1 + (d + 2) % 3;

    let wl = vl[RHO].sqrt();
    let wr = vr[RHO].sqrt();
    let sd = 1.0 / (wl + wr);

    let rho = wl * wr;
    let vn = (wl * vl[vn_i] + wr * vr[vn_i]) * sd;
    let vt1 = (wl * vl[vt1_i] + wr * vr[vt1_i]) * sd;
    let vt2 = (wl * vl[vt2_i] + wr * vr[vt2_i]) * sd;
    // 磁场取交换权重的 Roe 平均
    let bt1 = (wr * vl[bt1_i] + wl * vr[bt1_i]) * sd;
    let bt2 = (wr * vl[bt2_i] + wl * vr[bt2_i]) * sd;
    let bn = vl[bn_i];
    let p = (wl * vl[PRS] + wr * vr[PRS]) * sd;

    let a2 = gamma * p / rho;
    let bn2r = bn * bn / rho;
    let b2r = (bn * bn + bt1 * bt1 + bt2 * bt2) / rho;
    let sum = a2 + b2r;
    let disc = (sum * sum - 4.0 * a2 * bn2r).max(0.0).sqrt();
    let cf2 = 0.5 * (sum + disc);
    let cs2 = (0.5 * (sum - disc)).max(0.0);
    let ca = bn2r.sqrt();

    // Roe–Balsara 归一化；三重退化点取 α_f = 1
    let df = cf2 - cs2;
    let (alpha_f, alpha_s) = if df > SMALL * cf2 {
        let af2 = ((a2 - cs2) / df).clamp(0.0, 1.0);
        (af2.sqrt(), (1.0 - af2).max(0.0).sqrt())
    } else {
        (1.0, 0.0)
    };

    let bt = (bt1 * bt1 + bt2 * bt2).sqrt();
    let (beta_y, beta_z) = if bt > SMALL {
        (bt1 / bt, bt2 / bt)
    } else {
        (std::f64::consts::FRAC_1_SQRT_2, std::f64::consts::FRAC_1_SQRT_2)
    };

    RoeBasis {
        rho,
        vn,
        vt1,
        vt2,
        bt1,
        bt2,
        a2,
        cf: cf2.sqrt(),
        cs: cs2.sqrt(),
        ca,
        alpha_f,
        alpha_s,
        beta_y,
        beta_z,
        sgn: if bn >= 0.0 { 1.0 } else { -1.0 },
    }
}

impl RoeBasis {
    /// 七个特征速度
    fn eigenvalues(&self) -> [Real; 7] {
        [
            self.vn - self.cf,
            self.vn - self.ca,
            self.vn - self.cs,
            self.vn,
            self.vn + self.cs,
            self.vn + self.ca,
            self.vn + self.cf,
        ]
    }

    /// 原始量差在左特征向量上的投影
    fn project(&self, dw: &PrimDelta) -> WaveStrengths {
        let b = self;
        let a = b.a2.sqrt();
        let sqr = b.rho.sqrt();
        let inv = 1.0 / (2.0 * b.a2 * b.rho);

        // β 平行/剪切分量
        let bdv = b.beta_y * dw.vt1 + b.beta_z * dw.vt2;
        let bdb = b.beta_y * dw.bt1 + b.beta_z * dw.bt2;
        let adv = b.beta_z * dw.vt1 - b.beta_y * dw.vt2;
        let adb = b.beta_z * dw.bt1 - b.beta_y * dw.bt2;

        let f_common = b.alpha_f * dw.p + sqr * b.alpha_s * a * bdb;
        let f_motion = b.rho * (b.alpha_f * b.cf * dw.vn - b.alpha_s * b.cs * b.sgn * bdv);
        let s_common = b.alpha_s * dw.p - sqr * b.alpha_f * a * bdb;
        let s_motion = b.rho * (b.alpha_s * b.cs * dw.vn + b.alpha_f * b.cf * b.sgn * bdv);

        WaveStrengths([
            (f_common - f_motion) * inv,
            0.5 * (adv + b.sgn / sqr * adb),
            (s_common - s_motion) * inv,
            dw.rho - dw.p / b.a2,
            (s_common + s_motion) * inv,
            0.5 * (adv - b.sgn / sqr * adb),
            (f_common + f_motion) * inv,
        ])
    }

    /// 波 k 的原始量右特征向量
    fn right_eigenvector(&self, k: usize) -> PrimDelta {
        let b = self;
        let a = b.a2.sqrt();
        let sqr = b.rho.sqrt();
        match k {
            // 快波 ∓
            0 | 6 => {
                let pm = if k == 6 { 1.0 } else { -1.0 };
                PrimDelta {
                    rho: b.rho * b.alpha_f,
                    vn: pm * b.alpha_f * b.cf,
                    vt1: -pm * b.alpha_s * b.cs * b.sgn * b.beta_y,
                    vt2: -pm * b.alpha_s * b.cs * b.sgn * b.beta_z,
                    bt1: b.alpha_s * sqr * a * b.beta_y,
                    bt2: b.alpha_s * sqr * a * b.beta_z,
                    p: b.alpha_f * b.rho * b.a2,
                }
            }
            // Alfvén ∓
            1 | 5 => {
                let pm = if k == 5 { 1.0 } else { -1.0 };
                PrimDelta {
                    rho: 0.0,
                    vn: 0.0,
                    vt1: b.beta_z,
                    vt2: -b.beta_y,
                    bt1: -pm * b.sgn * sqr * b.beta_z,
                    bt2: pm * b.sgn * sqr * b.beta_y,
                    p: 0.0,
                }
            }
            // 慢波 ∓
            2 | 4 => {
                let pm = if k == 4 { 1.0 } else { -1.0 };
                PrimDelta {
                    rho: b.rho * b.alpha_s,
                    vn: pm * b.alpha_s * b.cs,
                    vt1: pm * b.alpha_f * b.cf * b.sgn * b.beta_y,
                    vt2: pm * b.alpha_f * b.cf * b.sgn * b.beta_z,
                    bt1: -b.alpha_f * sqr * a * b.beta_y,
                    bt2: -b.alpha_f * sqr * a * b.beta_z,
                    p: b.alpha_s * b.rho * b.a2,
                }
            }
            // 熵波
            _ => PrimDelta {
                rho: 1.0,
                vn: 0.0,
                vt1: 0.0,
                vt2: 0.0,
                bt1: 0.0,
                bt2: 0.0,
                p: 0.0,
            },
        }
    }
}

/// 沿扫掠方向重排后的原始量增量
#[derive(Debug, Clone, Copy, Default)]
struct PrimDelta {
    rho: Real,
    vn: Real,
    vt1: Real,
    vt2: Real,
    bt1: Real,
    bt2: Real,
    p: Real,
}

/// 逐界面求解
pub(super) fn solve(
    vl: &[Real; NVAR],
    vr: &[Real; NVAR],
    dir: Direction,
    eos: &EquationOfState,
) -> Result<([Real; NVAR], Real), u64> {
    let d = dir.idx();
    let vn_i = VX1 + d;
    let vt1_i = VX1 + (d + 1) % 3;
    let vt2_i = VX1 + (d + 2) % 3;
    let bt1_i = BX1 + (d + 1) % 3;
    let bt2_i = BX1 + (d + 2) % 3;
    let gamma = eos.gamma();

    let mut ul = [0.0; NVAR];
    let mut ur = [0.0; NVAR];
    prim_to_cons_point(&mut ul, vl, eos);
    prim_to_cons_point(&mut ur, vr, eos);
    let mut fl = [0.0; NVAR];
    let mut fr = [0.0; NVAR];
    physical_flux(&mut fl, vl, &ul, eos, dir);
    physical_flux(&mut fr, vr, &ur, eos, dir);

    let basis = build_basis(vl, vr, dir, gamma);
    let lambda = basis.eigenvalues();
    let dw = PrimDelta {
        rho: vr[RHO] - vl[RHO],
        vn: vr[vn_i] - vl[vn_i],
        vt1: vr[vt1_i] - vl[vt1_i],
        vt2: vr[vt2_i] - vl[vt2_i],
        bt1: vr[bt1_i] - vl[bt1_i],
        bt2: vr[bt2_i] - vl[bt2_i],
        p: vr[PRS] - vl[PRS],
    };
    let strengths = basis.project(&dw);

    // Harten 熵修正，仅非线性波族
    let delta = ENTROPY_EPS * (basis.vn.abs() + basis.cf);
    let fix = |lam: Real, nonlinear: bool| -> Real {
        let al = lam.abs();
        if nonlinear && al < delta {
            0.5 * (al * al / delta + delta)
        } else {
            al
        }
    };

    // 耗散项：|λ_k| α_k r_k 经平均态雅可比映射回守恒增量
    let b = &basis;
    let g1 = gamma - 1.0;
    let mut diss = [0.0; NVAR];
    for (k, (&lam, &alpha)) in lambda.iter().zip(strengths.0.iter()).enumerate() {
        let nonlinear = matches!(k, 0 | 2 | 4 | 6);
        let al = fix(lam, nonlinear) * alpha;
        if al == 0.0 {
            continue;
        }
        let r = basis.right_eigenvector(k);

        diss[RHO] += al * r.rho;
        diss[vn_i] += al * (b.vn * r.rho + b.rho * r.vn);
        diss[vt1_i] += al * (b.vt1 * r.rho + b.rho * r.vt1);
        diss[vt2_i] += al * (b.vt2 * r.rho + b.rho * r.vt2);
        diss[ENG] += al
            * (0.5 * (b.vn * b.vn + b.vt1 * b.vt1 + b.vt2 * b.vt2) * r.rho
                + b.rho * (b.vn * r.vn + b.vt1 * r.vt1 + b.vt2 * r.vt2)
                + r.p / g1
                + b.bt1 * r.bt1
                + b.bt2 * r.bt2);
        diss[bt1_i] += al * r.bt1;
        diss[bt2_i] += al * r.bt2;
    }

    let mut f = [0.0; NVAR];
    for nv in 0..NVAR {
        f[nv] = 0.5 * (fl[nv] + fr[nv]) - 0.5 * diss[nv];
    }
    let cmax = basis.vn.abs() + basis.cf;
    Ok((f, cmax))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states() -> ([Real; NVAR], [Real; NVAR]) {
        let mut vl = [0.0; NVAR];
        vl[RHO] = 1.0;
        vl[VX1] = 0.3;
        vl[VX2] = -0.2;
        vl[VX3] = 0.15;
        vl[PRS] = 0.9;
        vl[BX1] = 0.6;
        vl[BX2] = 0.8;
        vl[BX3] = -0.4;
        let mut vr = [0.0; NVAR];
        vr[RHO] = 0.4;
        vr[VX1] = -0.1;
        vr[VX2] = 0.25;
        vr[VX3] = 0.05;
        vr[PRS] = 0.35;
        vr[BX1] = 0.6;
        vr[BX2] = -0.5;
        vr[BX3] = 0.7;
        (vl, vr)
    }

    /// 完备性：Σ α_k r_k 必须逐通道重建原始量差
    #[test]
    fn test_wave_expansion_reconstructs_jump() {
        let (vl, vr) = states();
        let basis = build_basis(&vl, &vr, Direction::I, 5.0 / 3.0);
        let dw = PrimDelta {
            rho: vr[RHO] - vl[RHO],
            vn: vr[VX1] - vl[VX1],
            vt1: vr[VX2] - vl[VX2],
            vt2: vr[VX3] - vl[VX3],
            bt1: vr[BX2] - vl[BX2],
            bt2: vr[BX3] - vl[BX3],
            p: vr[PRS] - vl[PRS],
        };
        let strengths = basis.project(&dw);

        let mut sum = PrimDelta::default();
        for k in 0..7 {
            let r = basis.right_eigenvector(k);
            let a = strengths.0[k];
            sum.rho += a * r.rho;
            sum.vn += a * r.vn;
            sum.vt1 += a * r.vt1;
            sum.vt2 += a * r.vt2;
            sum.bt1 += a * r.bt1;
            sum.bt2 += a * r.bt2;
            sum.p += a * r.p;
        }
        assert!((sum.rho - dw.rho).abs() < 1e-12, "rho: {} vs {}", sum.rho, dw.rho);
        assert!((sum.vn - dw.vn).abs() < 1e-12);
        assert!((sum.vt1 - dw.vt1).abs() < 1e-12);
        assert!((sum.vt2 - dw.vt2).abs() < 1e-12);
        assert!((sum.bt1 - dw.bt1).abs() < 1e-12);
        assert!((sum.bt2 - dw.bt2).abs() < 1e-12);
        assert!((sum.p - dw.p).abs() < 1e-12);
    }

    /// 特征速度次序：λ 单调不减
    #[test]
    fn test_eigenvalue_ordering() {
        let (vl, vr) = states();
        let basis = build_basis(&vl, &vr, Direction::I, 5.0 / 3.0);
        let lambda = basis.eigenvalues();
        for w in lambda.windows(2) {
            assert!(w[0] <= w[1] + 1e-14);
        }
        assert!(basis.cs <= basis.ca + 1e-14);
        assert!(basis.ca <= basis.cf + 1e-14);
    }

    /// B_t → 0 的退化：β 取 1/√2，分解仍重建跳跃
    #[test]
    fn test_degenerate_transverse_field() {
        let (mut vl, mut vr) = states();
        vl[BX2] = 0.0;
        vl[BX3] = 0.0;
        vr[BX2] = 0.0;
        vr[BX3] = 0.0;
        let basis = build_basis(&vl, &vr, Direction::I, 5.0 / 3.0);
        let dw = PrimDelta {
            rho: vr[RHO] - vl[RHO],
            vn: vr[VX1] - vl[VX1],
            vt1: vr[VX2] - vl[VX2],
            vt2: vr[VX3] - vl[VX3],
            bt1: 0.0,
            bt2: 0.0,
            p: vr[PRS] - vl[PRS],
        };
        let strengths = basis.project(&dw);
        let mut vt1 = 0.0;
        let mut bt1 = 0.0;
        for k in 0..7 {
            let r = basis.right_eigenvector(k);
            vt1 += strengths.0[k] * r.vt1;
            bt1 += strengths.0[k] * r.bt1;
        }
        assert!((vt1 - dw.vt1).abs() < 1e-12);
        assert!(bt1.abs() < 1e-12);
    }
}
