// crates/mg_physics/src/data.rs

//! 数据块
//!
//! 求解器的全部场量容器，初始化时一次性分配、整个生命周期复用：
//!
//! - `vc`/`uc`: 胞心原始量/守恒量，(NVAR, k, j, i)
//! - `vs`: 面心交错磁场，(d, k, j, i)；通道 d 为面法向，
//!   自身方向多一个面槽位
//! - `prim_l`/`prim_r`/`flux`: 方向扫掠内的临时界面缓冲，
//!   下一次扫掠就地覆盖，不得跨扫掠持有
//! - `inv_dt`: 逆时间步累加器，积分器按 CFL 换算 dt
//! - `emf`: 面心与棱角电动势
//!
//! 一个完整时间步后 `vc` 为权威状态，`vs` 为磁场的权威状态；
//! 两者只经由 reconcile 桥接。

use mg_config::{BoundaryPolicy, SolverConfig};
use mg_runtime::{Array3D, Array4D, ExecSpace, Real};

use crate::error::PhysicsResult;
use crate::grid::Grid;
use crate::vars::NVAR;

/// 电动势缓冲
///
/// 面心分量 `e<轴><面法向>`：如 `ezi` 为 X1 法向面上的 E_z。
/// 棱角分量 `ex`/`ey`/`ez` 由四个相邻面平均得到。
#[derive(Debug, Clone)]
pub struct EmfSet {
    /// 棱角 E_x
    pub ex: Array3D<Real>,
    /// 棱角 E_y
    pub ey: Array3D<Real>,
    /// 棱角 E_z
    pub ez: Array3D<Real>,
    /// X2 法向面上的 E_x
    pub exj: Array3D<Real>,
    /// X3 法向面上的 E_x
    pub exk: Array3D<Real>,
    /// X1 法向面上的 E_y
    pub eyi: Array3D<Real>,
    /// X3 法向面上的 E_y
    pub eyk: Array3D<Real>,
    /// X1 法向面上的 E_z
    pub ezi: Array3D<Real>,
    /// X2 法向面上的 E_z
    pub ezj: Array3D<Real>,
}

impl EmfSet {
    fn new(nk: usize, nj: usize, ni: usize) -> Self {
        Self {
            ex: Array3D::new(nk, nj, ni),
            ey: Array3D::new(nk, nj, ni),
            ez: Array3D::new(nk, nj, ni),
            exj: Array3D::new(nk, nj, ni),
            exk: Array3D::new(nk, nj, ni),
            eyi: Array3D::new(nk, nj, ni),
            eyk: Array3D::new(nk, nj, ni),
            ezi: Array3D::new(nk, nj, ni),
            ezj: Array3D::new(nk, nj, ni),
        }
    }
}

/// 数据块：网格 + 场量 + 边界表
#[derive(Debug)]
pub struct DataBlock {
    /// 网格
    pub grid: Grid,
    /// 执行空间
    pub exec: ExecSpace,

    /// 胞心原始量
    pub vc: Array4D<Real>,
    /// 胞心守恒量
    pub uc: Array4D<Real>,
    /// 面心交错磁场（通道数 = 维数）
    pub vs: Array4D<Real>,

    /// 界面左态（索引 = 右邻单元索引）
    pub prim_l: Array4D<Real>,
    /// 界面右态
    pub prim_r: Array4D<Real>,
    /// 黎曼数值通量
    pub flux: Array4D<Real>,

    /// 逆时间步累加器
    pub inv_dt: Array3D<Real>,
    /// 电动势缓冲
    pub emf: EmfSet,

    /// 低侧边界策略
    pub lbound: [BoundaryPolicy; 3],
    /// 高侧边界策略
    pub rbound: [BoundaryPolicy; 3],
}

impl DataBlock {
    /// 由配置分配数据块
    pub fn new(config: &SolverConfig) -> PhysicsResult<Self> {
        config.validate()?;
        let grid = Grid::from_config(&config.grid)?;
        let (nk, nj, ni) = (grid.np_tot[2], grid.np_tot[1], grid.np_tot[0]);
        let (k1, j1, _) = grid.dim_offsets();

        let boundary = &config.boundary;
        let lbound = [boundary.x1_beg, boundary.x2_beg, boundary.x3_beg];
        let rbound = [boundary.x1_end, boundary.x2_end, boundary.x3_end];

        Ok(Self {
            vc: Array4D::new(NVAR, nk, nj, ni),
            uc: Array4D::new(NVAR, nk, nj, ni),
            vs: Array4D::new(grid.dimensions, nk + k1, nj + j1, ni + 1),
            prim_l: Array4D::new(NVAR, nk, nj, ni),
            prim_r: Array4D::new(NVAR, nk, nj, ni),
            flux: Array4D::new(NVAR, nk, nj, ni),
            inv_dt: Array3D::new(nk, nj, ni),
            emf: EmfSet::new(nk, nj, ni),
            grid,
            exec: ExecSpace::default(),
            lbound,
            rbound,
        })
    }

    /// 清零逆时间步累加器（每个时间步开始时调用）
    pub fn zero_inv_dt(&mut self) {
        self.inv_dt.fill(0.0);
    }

    /// 活动区逆时间步最大值
    pub fn max_inv_dt(&self) -> Real {
        let g = &self.grid;
        let mut acc: Real = 0.0;
        for k in g.beg[2]..g.end[2] {
            for j in g.beg[1]..g.end[1] {
                for i in g.beg[0]..g.end[0] {
                    acc = acc.max(self.inv_dt.get(k, j, i));
                }
            }
        }
        acc
    }
}
