// crates/mg_physics/src/divb.rs

//! ∇·B 诊断
//!
//! 活动区上交错场离散散度绝对值的最大值。约束输运的代数不变量：
//! 该值应保持在初值加上随步数线性累积的舍入误差以内。

use mg_runtime::{par_reduce_max_3d, Real};

use crate::data::DataBlock;

/// 活动区最大 |∇·B|
pub fn max_div_b(data: &DataBlock) -> Real {
    let g = &data.grid;
    let dims = g.dimensions;
    let vs = &data.vs;
    let dx1 = &g.dx[0];
    let dx2 = &g.dx[1];
    let dx3 = &g.dx[2];

    par_reduce_max_3d(
        data.exec,
        g.beg[2]..g.end[2],
        g.beg[1]..g.end[1],
        g.beg[0]..g.end[0],
        |k, j, i| {
            let mut div = (vs.get(0, k, j, i + 1) - vs.get(0, k, j, i)) / dx1.get(i);
            if dims >= 2 {
                div += (vs.get(1, k, j + 1, i) - vs.get(1, k, j, i)) / dx2.get(j);
            }
            if dims == 3 {
                div += (vs.get(2, k + 1, j, i) - vs.get(2, k, j, i)) / dx3.get(k);
            }
            div.abs()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mg_config::SolverConfig;

    #[test]
    fn test_uniform_field_divergence_free() {
        let mut config = SolverConfig::default();
        config.grid.dimensions = 2;
        config.grid.n = [8, 8, 1];
        config.grid.end = [1.0, 1.0, 1.0];
        let mut data = DataBlock::new(&config).unwrap();
        let (nj, ni) = (data.grid.np_tot[1], data.grid.np_tot[0]);
        for j in 0..=nj {
            for i in 0..=ni {
                if j < nj {
                    data.vs.set(0, 0, j, i, 1.0);
                }
                if i < ni {
                    data.vs.set(1, 0, j, i, -0.5);
                }
            }
        }
        assert_eq!(max_div_b(&data), 0.0);
    }

    #[test]
    fn test_detects_monopole() {
        let mut config = SolverConfig::default();
        config.grid.n = [8, 1, 1];
        config.grid.end = [8.0, 1.0, 1.0];
        let mut data = DataBlock::new(&config).unwrap();
        let i0 = data.grid.beg[0];
        data.vs.set(0, 0, 0, i0 + 1, 2.0); // 孤立的面跳跃
        let div = max_div_b(&data);
        assert!((div - 2.0).abs() < 1e-14);
    }
}
