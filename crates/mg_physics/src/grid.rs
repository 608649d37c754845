// crates/mg_physics/src/grid.rs

//! 网格范围与轴元数据
//!
//! 逻辑笛卡尔索引空间：每个方向 d 的范围三元组
//! `(np_tot, np_int, nghost)`，`np_tot = np_int + 2·nghost`。
//! 活动单元为 `[beg, end)`，鬼单元位于两侧。
//!
//! 未激活方向（`d >= dimensions`）坍缩为单单元、零鬼层，
//! 对应的循环自然退化为一次迭代。

use mg_config::{ConfigError, GridConfig};
use mg_runtime::{Array1D, Real};

/// 扫掠方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// X1 方向
    I,
    /// X2 方向
    J,
    /// X3 方向
    K,
}

/// 三个方向的固定次序
pub const DIRECTIONS: [Direction; 3] = [Direction::I, Direction::J, Direction::K];

impl Direction {
    /// 方向索引 0/1/2
    #[inline]
    pub fn idx(self) -> usize {
        match self {
            Self::I => 0,
            Self::J => 1,
            Self::K => 2,
        }
    }

    /// 单位偏移 `(koffset, joffset, ioffset)`
    #[inline]
    pub fn offsets(self) -> (usize, usize, usize) {
        match self {
            Self::I => (0, 0, 1),
            Self::J => (0, 1, 0),
            Self::K => (1, 0, 0),
        }
    }

    /// 法向速度通道
    #[inline]
    pub fn vxn(self) -> usize {
        crate::vars::VX1 + self.idx()
    }

    /// 法向磁场通道
    #[inline]
    pub fn bxn(self) -> usize {
        crate::vars::BX1 + self.idx()
    }

    /// 由索引构造
    #[inline]
    pub fn from_idx(d: usize) -> Self {
        match d {
            0 => Self::I,
            1 => Self::J,
            _ => Self::K,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::I => "X1",
            Self::J => "X2",
            Self::K => "X3",
        };
        write!(f, "{}", name)
    }
}

/// 网格：范围三元组与轴元数据
///
/// 数组按方向索引：`[0]`=X1(i)，`[1]`=X2(j)，`[2]`=X3(k)。
#[derive(Debug, Clone)]
pub struct Grid {
    /// 空间维数
    pub dimensions: usize,
    /// 各方向总单元数（含鬼层）
    pub np_tot: [usize; 3],
    /// 各方向活动单元数
    pub np_int: [usize; 3],
    /// 各方向鬼层厚度
    pub nghost: [usize; 3],
    /// 活动区起始索引
    pub beg: [usize; 3],
    /// 活动区终止索引（不含）
    pub end: [usize; 3],
    /// 单元宽度序列
    pub dx: [Array1D<Real>; 3],
    /// 单元中心坐标
    pub x: [Array1D<Real>; 3],
    /// 左面坐标（交错量用）
    pub xl: [Array1D<Real>; 3],
}

impl Grid {
    /// 由配置构建均匀网格
    pub fn from_config(config: &GridConfig) -> Result<Self, ConfigError> {
        if config.dimensions == 0 || config.dimensions > 3 {
            return Err(ConfigError::invalid(
                "grid.dimensions",
                config.dimensions,
                "必须在 1..=3",
            ));
        }

        let mut np_tot = [1usize; 3];
        let mut np_int = [1usize; 3];
        let mut nghost = [0usize; 3];
        let mut beg = [0usize; 3];
        let mut end = [1usize; 3];
        let mut dx: [Array1D<Real>; 3] = [Array1D::new(1), Array1D::new(1), Array1D::new(1)];
        let mut x: [Array1D<Real>; 3] = [Array1D::new(1), Array1D::new(1), Array1D::new(1)];
        let mut xl: [Array1D<Real>; 3] = [Array1D::new(1), Array1D::new(1), Array1D::new(1)];

        for d in 0..3 {
            if d < config.dimensions {
                let n = config.n[d];
                let width = config.end[d] - config.begin[d];
                if n == 0 || width <= 0.0 {
                    return Err(ConfigError::invalid(
                        "grid",
                        format!("n={}, domain=[{}, {}]", n, config.begin[d], config.end[d]),
                        "网格间距必须为正",
                    ));
                }
                np_int[d] = n;
                nghost[d] = config.nghost;
                np_tot[d] = n + 2 * config.nghost;
                beg[d] = config.nghost;
                end[d] = config.nghost + n;

                let h = width / n as Real;
                let mut dx_d = Array1D::new(np_tot[d]);
                let mut x_d = Array1D::new(np_tot[d]);
                let mut xl_d = Array1D::new(np_tot[d] + 1);
                for idx in 0..np_tot[d] {
                    let offset = idx as Real - config.nghost as Real;
                    dx_d.set(idx, h);
                    xl_d.set(idx, config.begin[d] + offset * h);
                    x_d.set(idx, config.begin[d] + (offset + 0.5) * h);
                }
                xl_d.set(np_tot[d], config.begin[d] + (np_tot[d] as Real - config.nghost as Real) * h);
                dx[d] = dx_d;
                x[d] = x_d;
                xl[d] = xl_d;
            } else {
                // 坍缩方向：单单元、单位宽度
                let mut dx_d = Array1D::new(1);
                dx_d.set(0, 1.0);
                dx[d] = dx_d;
                let mut xl_d = Array1D::new(2);
                xl_d.set(0, 0.0);
                xl_d.set(1, 1.0);
                xl[d] = xl_d;
                let mut x_d = Array1D::new(1);
                x_d.set(0, 0.5);
                x[d] = x_d;
            }
        }

        Ok(Self {
            dimensions: config.dimensions,
            np_tot,
            np_int,
            nghost,
            beg,
            end,
            dx,
            x,
            xl,
        })
    }

    /// 方向 d 是否激活
    #[inline]
    pub fn is_active(&self, d: usize) -> bool {
        d < self.dimensions
    }

    /// 各方向是否扩展一个界面（棱角电动势范围用）
    ///
    /// 返回 `(koffset3, joffset2, ioffset1)`：方向存在则为 1。
    #[inline]
    pub fn dim_offsets(&self) -> (usize, usize, usize) {
        (
            usize::from(self.dimensions == 3),
            usize::from(self.dimensions >= 2),
            1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_1d(n: usize) -> GridConfig {
        GridConfig {
            dimensions: 1,
            n: [n, 1, 1],
            begin: [0.0, 0.0, 0.0],
            end: [100.0, 1.0, 1.0],
            nghost: 2,
        }
    }

    #[test]
    fn test_grid_extents_1d() {
        let g = Grid::from_config(&config_1d(400)).unwrap();
        assert_eq!(g.np_tot[0], 404);
        assert_eq!(g.beg[0], 2);
        assert_eq!(g.end[0], 402);
        assert_eq!(g.np_tot[1], 1);
        assert_eq!(g.nghost[1], 0);
        assert_eq!(g.beg[1], 0);
        assert_eq!(g.end[1], 1);
    }

    #[test]
    fn test_grid_coordinates_uniform() {
        let g = Grid::from_config(&config_1d(100)).unwrap();
        let h = 1.0;
        // 首个活动单元中心在 begin + h/2
        assert!((g.x[0].get(g.beg[0]) - 0.5 * h).abs() < 1e-13);
        assert!((g.xl[0].get(g.beg[0]) - 0.0).abs() < 1e-13);
        assert!((g.dx[0].get(50) - h).abs() < 1e-13);
        // 末活动面在 domain 终点
        assert!((g.xl[0].get(g.end[0]) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_direction_offsets() {
        assert_eq!(Direction::I.offsets(), (0, 0, 1));
        assert_eq!(Direction::J.offsets(), (0, 1, 0));
        assert_eq!(Direction::K.offsets(), (1, 0, 0));
        assert_eq!(Direction::J.vxn(), crate::vars::VX2);
        assert_eq!(Direction::K.bxn(), crate::vars::BX3);
    }

    #[test]
    fn test_bad_dimensions_rejected() {
        let mut c = config_1d(8);
        c.dimensions = 4;
        assert!(Grid::from_config(&c).is_err());
    }
}
