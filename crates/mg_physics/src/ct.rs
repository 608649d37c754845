// crates/mg_physics/src/ct.rs

//! 交错磁场演化（C6，约束输运）
//!
//! 对每个面用 Stokes 定理把棱角电动势的环流折算成面平均磁通的
//! 变化。相邻两个面共享同一条棱上的同一个电动势值，离散散度
//! 的增量逐项相消，这正是约束输运维持 ∇·B = 0 的机制。
//!
//! 只有对应维数存在的更新行才激活。

use mg_runtime::{par_for_3d, Real};

use crate::data::DataBlock;

/// 由棱角电动势演化交错磁场
pub fn evolve_mag_field(data: &mut DataBlock, dt: Real) {
    let g = &data.grid;
    let dims = g.dimensions;
    let (k1, j1, i1) = g.dim_offsets();

    let ex = data.emf.ex.view();
    let ey = data.emf.ey.view();
    let ez = data.emf.ez.view();
    let vs = data.vs.view();
    let dx1 = &data.grid.dx[0];
    let dx2 = &data.grid.dx[1];
    let dx3 = &data.grid.dx[2];

    par_for_3d(
        data.exec,
        g.beg[2]..g.end[2] + k1,
        g.beg[1]..g.end[1] + j1,
        g.beg[0]..g.end[0] + i1,
        |k, j, i| {
            let mut db1 = 0.0;
            if dims >= 2 {
                db1 -= dt / dx2.get(j) * (ez.get(k, j + 1, i) - ez.get(k, j, i));
            }
            if dims == 3 {
                db1 += dt / dx3.get(k) * (ey.get(k + 1, j, i) - ey.get(k, j, i));
            }
            vs.set(0, k, j, i, vs.get(0, k, j, i) + db1);

            if dims >= 2 {
                let mut db2 = dt / dx1.get(i) * (ez.get(k, j, i + 1) - ez.get(k, j, i));
                if dims == 3 {
                    db2 -= dt / dx3.get(k) * (ex.get(k + 1, j, i) - ex.get(k, j, i));
                }
                vs.set(1, k, j, i, vs.get(1, k, j, i) + db2);
            }

            if dims == 3 {
                let db3 = -dt / dx1.get(i) * (ey.get(k, j, i + 1) - ey.get(k, j, i))
                    + dt / dx2.get(j) * (ex.get(k, j + 1, i) - ex.get(k, j, i));
                vs.set(2, k, j, i, vs.get(2, k, j, i) + db3);
            }
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use mg_config::SolverConfig;

    fn block_2d(nx: usize, ny: usize) -> DataBlock {
        let mut config = SolverConfig::default();
        config.grid.dimensions = 2;
        config.grid.n = [nx, ny, 1];
        config.grid.end = [nx as Real, ny as Real, 1.0];
        DataBlock::new(&config).unwrap()
    }

    #[test]
    fn test_uniform_emf_no_change() {
        let mut data = block_2d(4, 4);
        let (nj, ni) = (data.grid.np_tot[1], data.grid.np_tot[0]);
        for j in 0..nj {
            for i in 0..ni {
                data.emf.ez.set(0, j, i, 5.0);
            }
        }
        evolve_mag_field(&mut data, 0.3);
        let (jb, ib) = (data.grid.beg[1], data.grid.beg[0]);
        assert_eq!(data.vs.get(0, 0, jb, ib), 0.0);
        assert_eq!(data.vs.get(1, 0, jb, ib), 0.0);
    }

    #[test]
    fn test_divergence_increment_cancels_2d() {
        // 任意棱角 Ez：每个活动单元的散度增量必须逐项相消
        let mut data = block_2d(4, 4);
        let (nj, ni) = (data.grid.np_tot[1], data.grid.np_tot[0]);
        for j in 0..nj {
            for i in 0..ni {
                // 确定性的"随机"模式
                let v = ((i * 31 + j * 17) % 13) as Real * 0.1 - 0.6;
                data.emf.ez.set(0, j, i, v);
            }
        }
        evolve_mag_field(&mut data, 0.25);
        let g = &data.grid;
        for j in g.beg[1]..g.end[1] - 1 {
            for i in g.beg[0]..g.end[0] - 1 {
                let div = (data.vs.get(0, 0, j, i + 1) - data.vs.get(0, 0, j, i))
                    / g.dx[0].get(i)
                    + (data.vs.get(1, 0, j + 1, i) - data.vs.get(1, 0, j, i)) / g.dx[1].get(j);
                assert!(div.abs() < 1e-14, "散度增量未相消: {}", div);
            }
        }
    }
}
