// crates/mg_physics/src/reconcile.rs

//! 磁场重建（C7）
//!
//! 交错/胞心表示之间唯一被认可的桥：
//!
//! 1. [`reconstruct_vc_field`]：胞心磁场取左右面平均，
//!    Vc(BXd) = ½·(Vs(d, 左面) + Vs(d, 右面))。
//! 2. [`reconstruct_normal_field`]：边界应用（C8）不触碰鬼区的
//!    法向交错分量，此处从活动区由内向外逐单元施加 ∇·B = 0
//!    恢复缺失的法向面值。外侧索引对并行，外推方向串行。
//!
//! 三个方向的外推按 BX1s → BX2s → BX3s 顺序执行；
//! 每一趟对鬼区单元精确施加离散无散度恒等式。

use mg_runtime::{par_for_2d, par_for_3d};

use crate::data::DataBlock;

/// 胞心磁场 ← 交错面平均
pub fn reconstruct_vc_field(data: &mut DataBlock) {
    let g = &data.grid;
    let dims = g.dimensions;
    let (nk, nj, ni) = (g.np_tot[2], g.np_tot[1], g.np_tot[0]);

    let vc = data.vc.view();
    let vs = data.vs.view();

    par_for_3d(data.exec, 0..nk, 0..nj, 0..ni, |k, j, i| {
        vc.set(
            crate::vars::BX1,
            k,
            j,
            i,
            0.5 * (vs.get(0, k, j, i) + vs.get(0, k, j, i + 1)),
        );
        if dims >= 2 {
            vc.set(
                crate::vars::BX2,
                k,
                j,
                i,
                0.5 * (vs.get(1, k, j, i) + vs.get(1, k, j + 1, i)),
            );
        }
        if dims == 3 {
            vc.set(
                crate::vars::BX3,
                k,
                j,
                i,
                0.5 * (vs.get(2, k, j, i) + vs.get(2, k + 1, j, i)),
            );
        }
    });
}

/// 鬼区法向交错面外推
///
/// 对方向 1 的内向一侧：
/// Vs(BX1s, i) = Vs(BX1s, i+1) + dx1·[横向面差分之和]，
/// 自活动区边缘逐格推向网格边缘；高侧对称。方向 2、3 同构。
pub fn reconstruct_normal_field(data: &mut DataBlock) {
    let g = &data.grid;
    let dims = g.dimensions;
    let (nk, nj, ni) = (g.np_tot[2], g.np_tot[1], g.np_tot[0]);

    let vs = data.vs.view();
    let dx1 = &data.grid.dx[0];
    let dx2 = &data.grid.dx[1];
    let dx3 = &data.grid.dx[2];

    // BX1s
    {
        let nstart = g.nghost[0] as isize - 1;
        let nend = ni - g.nghost[0] - 1;
        par_for_2d(data.exec, 0..nk, 0..nj, |k, j| {
            let trans = |i: usize| {
                let mut t = 0.0;
                if dims >= 2 {
                    t += (vs.get(1, k, j + 1, i) - vs.get(1, k, j, i)) / dx2.get(j);
                }
                if dims == 3 {
                    t += (vs.get(2, k + 1, j, i) - vs.get(2, k, j, i)) / dx3.get(k);
                }
                t
            };
            let mut i = nstart;
            while i >= 0 {
                let iu = i as usize;
                vs.set(0, k, j, iu, vs.get(0, k, j, iu + 1) + dx1.get(iu) * trans(iu));
                i -= 1;
            }
            for i in nend..ni {
                vs.set(0, k, j, i + 1, vs.get(0, k, j, i) - dx1.get(i) * trans(i));
            }
        });
    }

    // BX2s
    if dims >= 2 {
        let nstart = g.nghost[1] as isize - 1;
        let nend = nj - g.nghost[1] - 1;
        par_for_2d(data.exec, 0..nk, 0..ni, |k, i| {
            let trans = |j: usize| {
                let mut t = (vs.get(0, k, j, i + 1) - vs.get(0, k, j, i)) / dx1.get(i);
                if dims == 3 {
                    t += (vs.get(2, k + 1, j, i) - vs.get(2, k, j, i)) / dx3.get(k);
                }
                t
            };
            let mut j = nstart;
            while j >= 0 {
                let ju = j as usize;
                vs.set(1, k, ju, i, vs.get(1, k, ju + 1, i) + dx2.get(ju) * trans(ju));
                j -= 1;
            }
            for j in nend..nj {
                vs.set(1, k, j + 1, i, vs.get(1, k, j, i) - dx2.get(j) * trans(j));
            }
        });
    }

    // BX3s（横向差分同样施加无散度恒等式）
    if dims == 3 {
        let nstart = g.nghost[2] as isize - 1;
        let nend = nk - g.nghost[2] - 1;
        par_for_2d(data.exec, 0..nj, 0..ni, |j, i| {
            let trans = |k: usize| {
                (vs.get(0, k, j, i + 1) - vs.get(0, k, j, i)) / dx1.get(i)
                    + (vs.get(1, k, j + 1, i) - vs.get(1, k, j, i)) / dx2.get(j)
            };
            let mut k = nstart;
            while k >= 0 {
                let ku = k as usize;
                vs.set(2, ku, j, i, vs.get(2, ku + 1, j, i) + dx3.get(ku) * trans(ku));
                k -= 1;
            }
            for k in nend..nk {
                vs.set(2, k + 1, j, i, vs.get(2, k, j, i) - dx3.get(k) * trans(k));
            }
        });
    }
}
