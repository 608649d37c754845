// crates/mg_physics/src/lib.rs

//! MagnoHydro Physics Layer (Layer 4)
//!
//! 结构化逻辑笛卡尔网格上的可压缩理想磁流体（MHD）有限体积求解核心，
//! 通过约束输运（Constrained Transport）将 ∇·B = 0 维持到舍入误差。
//!
//! # 模块概览
//!
//! 双曲更新环，按调用次序：
//!
//! - [`convert`]: 守恒量 U 与原始量 V 的逐点互换
//! - [`reconstruct`]: 沿方向 d 的界面左右态外推（一阶/二阶 TVD）
//! - [`riemann`]: 近似黎曼求解器（TVDLF/HLL/HLLD/Roe），
//!   同时捕获面心电动势并累加逆时间步
//! - [`rhs`]: 通量散度更新胞心守恒量
//! - [`emf`]: 面心电动势平均到棱角
//! - [`ct`]: 交错磁场的约束输运演化
//! - [`reconcile`]: 胞心磁场重建与鬼区法向面外推
//! - [`boundary`]: 周期/出流/用户自定义边界
//!
//! 支撑模块：
//!
//! - [`grid`]/[`vars`]/[`data`]: 网格范围、通道索引、数据块
//! - [`eos`]: 绝热/等温状态方程闭合
//! - [`divb`]: ∇·B 诊断
//! - [`setup`]: 用户初值与自定义边界钩子
//! - [`solver`]: 求解器门面（初始化期选定算法，逐分量入口）
//! - [`integrator`]: RK2 时间积分外壳与 CFL 时间步控制
//!
//! # 交错/胞心二象性
//!
//! 胞心场 `Vc` 与面心交错场 `Vs` 是相互独立的数组，任何时刻都不从
//! 彼此隐式推导；时间步末尾的 [`reconcile`] 是两者之间唯一的桥。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod boundary;
pub mod convert;
pub mod ct;
pub mod data;
pub mod divb;
pub mod emf;
pub mod eos;
pub mod error;
pub mod grid;
pub mod integrator;
pub mod reconcile;
pub mod reconstruct;
pub mod rhs;
pub mod riemann;
pub mod setup;
pub mod solver;
pub mod vars;

/// 层级标识
pub const LAYER: u8 = 4;

pub use data::{DataBlock, EmfSet};
pub use eos::EquationOfState;
pub use error::{PhysicsError, PhysicsResult};
pub use grid::{Direction, Grid};
pub use integrator::{Rk2, Simulation, StepResult};
pub use setup::Setup;
pub use solver::Mhd;

/// Prelude 模块
pub mod prelude {
    //! 常用类型预导入
    pub use crate::{
        DataBlock, Direction, EquationOfState, Grid, Mhd, PhysicsError, PhysicsResult, Rk2,
        Setup, Simulation,
    };
    pub use mg_runtime::Real;
}
