// crates/mg_physics/src/emf.rs

//! 棱角电动势平均（C5）
//!
//! 黎曼扫掠在面心留下六个电动势分量，此处取四个相邻面的算术
//! 平均得到棱角值。一维时 E_z 的 j 向平均退化为对唯一面值的
//! 复制（权重折算为 2·ezi）。

use mg_runtime::par_for_3d;

use crate::data::DataBlock;

/// 面心电动势 → 棱角电动势
pub fn calc_corner_emf(data: &mut DataBlock) {
    let g = &data.grid;
    let dims = g.dimensions;
    let (k1, j1, i1) = g.dim_offsets();

    let ex = data.emf.ex.view();
    let ey = data.emf.ey.view();
    let ez = data.emf.ez.view();
    let exj = data.emf.exj.view();
    let exk = data.emf.exk.view();
    let eyi = data.emf.eyi.view();
    let eyk = data.emf.eyk.view();
    let ezi = data.emf.ezi.view();
    let ezj = data.emf.ezj.view();

    let w = 0.25;

    par_for_3d(
        data.exec,
        g.beg[2]..g.end[2] + k1,
        g.beg[1]..g.end[1] + j1,
        g.beg[0]..g.end[0] + i1,
        |k, j, i| {
            if dims == 3 {
                ex.set(
                    k,
                    j,
                    i,
                    w * (exj.get(k, j, i) + exj.get(k - 1, j, i) + exk.get(k, j, i) + exk.get(k, j - 1, i)),
                );
                ey.set(
                    k,
                    j,
                    i,
                    w * (eyi.get(k, j, i) + eyi.get(k - 1, j, i) + eyk.get(k, j, i) + eyk.get(k, j, i - 1)),
                );
            }
            if dims >= 2 {
                ez.set(
                    k,
                    j,
                    i,
                    w * (ezi.get(k, j, i) + ezi.get(k, j - 1, i) + ezj.get(k, j, i) + ezj.get(k, j, i - 1)),
                );
            } else {
                ez.set(
                    k,
                    j,
                    i,
                    w * (2.0 * ezi.get(k, j, i) + ezj.get(k, j, i) + ezj.get(k, j, i - 1)),
                );
            }
        },
    );
}
