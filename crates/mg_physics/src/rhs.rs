// crates/mg_physics/src/rhs.rs

//! 通量散度（C4）
//!
//! 按黎曼通量的离散散度推进胞心守恒量：
//!
//! ```text
//! U(n,x) ← U(n,x) − dt/dx_d · (Flux(n, x+e_d) − Flux(n, x))
//! ```
//!
//! 各方向扫掠累加到同一个 U。由约束输运（C6）支配的磁场通道
//! （其方向存在交错对应者）在此跳过。

use mg_runtime::{par_for_3d, Real};

use crate::data::DataBlock;
use crate::grid::Direction;
use crate::vars::{BX1, NVAR};

/// 方向 dir 上的守恒量更新
pub fn calc_right_hand_side(data: &mut DataBlock, dir: Direction, dt: Real) {
    let g = &data.grid;
    let (ko, jo, io) = dir.offsets();
    let dims = g.dimensions;

    let uc = data.uc.view();
    let flux = data.flux.view();
    let dx = &data.grid.dx[dir.idx()];

    par_for_3d(
        data.exec,
        g.beg[2]..g.end[2],
        g.beg[1]..g.end[1],
        g.beg[0]..g.end[0],
        |k, j, i| {
            let ig = io * i + jo * j + ko * k;
            let dtdx = dt / dx.get(ig);
            for nv in 0..NVAR {
                // 交错演化的磁场分量不在此更新
                if nv >= BX1 && nv - BX1 < dims {
                    continue;
                }
                let div = flux.get(nv, k + ko, j + jo, i + io) - flux.get(nv, k, j, i);
                uc.set(nv, k, j, i, uc.get(nv, k, j, i) - dtdx * div);
            }
        },
    );
}
