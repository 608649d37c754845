// crates/mg_runtime/src/exec.rs

//! 执行空间与并行 for 调度
//!
//! 所有热点核函数都表达为 1D/2D/3D/4D 索引空间上的并行 for，
//! 由本模块调度到所选后端：
//!
//! - `Serial`: 裸嵌套循环，无调度开销（小规模问题、调试）
//! - `Rayon`: 展平最外两维后交给 rayon 线程池；索引空间小于
//!   `min_parallel` 时自动退回串行，避免调度成本反超收益
//!
//! 规约（最大值）通过 f64 位表示的原子 fetch_max 实现，
//! 仅适用于非负值（波速、|∇·B| 等均满足）。

use rayon::prelude::*;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

/// 执行空间
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecSpace {
    /// 串行执行
    Serial,
    /// rayon 线程池；`min_parallel` 为启用并行的最小索引空间
    Rayon {
        /// 启用并行的最小迭代数
        min_parallel: usize,
    },
}

impl Default for ExecSpace {
    fn default() -> Self {
        Self::Rayon { min_parallel: 4096 }
    }
}

impl ExecSpace {
    #[inline]
    fn use_parallel(&self, total: usize) -> bool {
        match self {
            Self::Serial => false,
            Self::Rayon { min_parallel } => total >= *min_parallel,
        }
    }
}

/// 二维并行 for：`f(k, j)`
///
/// C7 的由内向外外推在 (k,j) 上并行、内维串行，即经由此函数。
pub fn par_for_2d<F>(space: ExecSpace, kr: Range<usize>, jr: Range<usize>, f: F)
where
    F: Fn(usize, usize) + Sync,
{
    let (nk, nj) = (kr.len(), jr.len());
    if space.use_parallel(nk * nj) {
        (0..nk * nj).into_par_iter().for_each(|kj| {
            let k = kr.start + kj / nj;
            let j = jr.start + kj % nj;
            f(k, j);
        });
    } else {
        for k in kr {
            for j in jr.clone() {
                f(k, j);
            }
        }
    }
}

/// 三维并行 for：`f(k, j, i)`
///
/// 并行路径展平 (k,j) 为外层迭代，i 在各工作线程内串行，
/// 以保持最快维的顺序访存。
pub fn par_for_3d<F>(space: ExecSpace, kr: Range<usize>, jr: Range<usize>, ir: Range<usize>, f: F)
where
    F: Fn(usize, usize, usize) + Sync,
{
    let (nk, nj, ni) = (kr.len(), jr.len(), ir.len());
    if space.use_parallel(nk * nj * ni) {
        (0..nk * nj).into_par_iter().for_each(|kj| {
            let k = kr.start + kj / nj;
            let j = jr.start + kj % nj;
            for i in ir.clone() {
                f(k, j, i);
            }
        });
    } else {
        for k in kr {
            for j in jr.clone() {
                for i in ir.clone() {
                    f(k, j, i);
                }
            }
        }
    }
}

/// 四维并行 for：`f(n, k, j, i)`，n 为通道维
pub fn par_for_4d<F>(
    space: ExecSpace,
    nr: Range<usize>,
    kr: Range<usize>,
    jr: Range<usize>,
    ir: Range<usize>,
    f: F,
) where
    F: Fn(usize, usize, usize, usize) + Sync,
{
    let (nn, nk, nj, ni) = (nr.len(), kr.len(), jr.len(), ir.len());
    if space.use_parallel(nn * nk * nj * ni) {
        (0..nn * nk * nj).into_par_iter().for_each(|nkj| {
            let n = nr.start + nkj / (nk * nj);
            let rem = nkj % (nk * nj);
            let k = kr.start + rem / nj;
            let j = jr.start + rem % nj;
            for i in ir.clone() {
                f(n, k, j, i);
            }
        });
    } else {
        for n in nr {
            for k in kr.clone() {
                for j in jr.clone() {
                    for i in ir.clone() {
                        f(n, k, j, i);
                    }
                }
            }
        }
    }
}

/// 三维最大值规约：`max f(k, j, i)`
///
/// 仅适用于非负返回值；原子更新借助 f64 位表示的单调性。
pub fn par_reduce_max_3d<F>(
    space: ExecSpace,
    kr: Range<usize>,
    jr: Range<usize>,
    ir: Range<usize>,
    f: F,
) -> f64
where
    F: Fn(usize, usize, usize) -> f64 + Sync,
{
    let (nk, nj, ni) = (kr.len(), jr.len(), ir.len());
    if space.use_parallel(nk * nj * ni) {
        let acc = AtomicU64::new(0u64);
        (0..nk * nj).into_par_iter().for_each(|kj| {
            let k = kr.start + kj / nj;
            let j = jr.start + kj % nj;
            let mut local = 0.0f64;
            for i in ir.clone() {
                local = local.max(f(k, j, i));
            }
            acc.fetch_max(local.to_bits(), Ordering::Relaxed);
        });
        f64::from_bits(acc.load(Ordering::Relaxed))
    } else {
        let mut acc = 0.0f64;
        for k in kr {
            for j in jr.clone() {
                for i in ir.clone() {
                    acc = acc.max(f(k, j, i));
                }
            }
        }
        acc
    }
}

// ============================================================
// 测试
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Array3D;

    #[test]
    fn test_par_for_3d_covers_range() {
        let mut a = Array3D::<f64>::new(4, 5, 6);
        let v = a.view();
        par_for_3d(ExecSpace::Serial, 0..4, 0..5, 0..6, |k, j, i| {
            v.set(k, j, i, (k * 100 + j * 10 + i) as f64);
        });
        assert_eq!(a.get(3, 4, 5), 345.0);
        assert_eq!(a.get(0, 0, 0), 0.0);
        assert_eq!(a.get(2, 1, 3), 213.0);
    }

    #[test]
    fn test_par_for_3d_rayon_matches_serial() {
        let mut a = Array3D::<f64>::new(8, 8, 8);
        let mut b = Array3D::<f64>::new(8, 8, 8);
        let va = a.view();
        let vb = b.view();
        let body = |v: crate::View3D<f64>| {
            move |k: usize, j: usize, i: usize| v.set(k, j, i, (k + 2 * j + 3 * i) as f64)
        };
        par_for_3d(ExecSpace::Serial, 0..8, 0..8, 0..8, body(va));
        par_for_3d(ExecSpace::Rayon { min_parallel: 1 }, 0..8, 0..8, 0..8, body(vb));
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn test_par_for_4d_channel_order() {
        let mut a = crate::Array4D::<f64>::new(3, 2, 2, 2);
        let v = a.view();
        par_for_4d(ExecSpace::Serial, 0..3, 0..2, 0..2, 0..2, |n, k, j, i| {
            v.set(n, k, j, i, n as f64);
        });
        assert_eq!(a.get(2, 1, 1, 1), 2.0);
        assert_eq!(a.get(0, 1, 0, 1), 0.0);
    }

    #[test]
    fn test_reduce_max() {
        let m = par_reduce_max_3d(ExecSpace::Serial, 0..4, 0..4, 0..4, |k, j, i| {
            (k + j + i) as f64
        });
        assert_eq!(m, 9.0);

        let m = par_reduce_max_3d(
            ExecSpace::Rayon { min_parallel: 1 },
            0..4,
            0..4,
            0..4,
            |k, j, i| (k * j * i) as f64,
        );
        assert_eq!(m, 27.0);
    }

    #[test]
    fn test_small_space_falls_back_to_serial() {
        // min_parallel 大于索引空间时走串行路径，结果一致即可
        let mut a = Array3D::<f64>::new(2, 2, 2);
        let v = a.view();
        par_for_3d(
            ExecSpace::Rayon { min_parallel: 1_000_000 },
            0..2,
            0..2,
            0..2,
            |k, j, i| v.set(k, j, i, 1.0),
        );
        assert!(a.as_slice().iter().all(|&x| x == 1.0));
    }
}
