// crates/mg_runtime/src/lib.rs

//! MagnoHydro Runtime Layer (Layer 2)
//!
//! 运行时抽象层，提供执行空间（并行 for）与多维数组视图。
//!
//! # 模块概览
//!
//! - [`array`]: Array1D/3D/4D 拥有型数组与 View3D/4D 核函数视图
//! - [`exec`]: ExecSpace 执行空间与 par_for 系列调度函数
//! - [`error`]: 运行时错误类型
//!
//! # 层级架构
//!
//! ```text
//! Layer 5: mg_cli      ─> 命令行应用
//! Layer 4: mg_physics  ─> 双曲核心 (C1..C8)
//! Layer 3: mg_config   ─> SolverConfig, 校验
//! Layer 2: mg_runtime  ─> ExecSpace, Array, View (本层)
//! ```
//!
//! # 设计原则
//!
//! 1. **单写者纪律**: 同一 par_for 内各迭代的写集合互不相交，
//!    由调用方（核函数作者）保证，视图类型只负责传递。
//! 2. **零成本抽象**: 串行路径为裸三重循环，无调度开销。
//! 3. **固定步距约定**: 四维数组按 (n,k,j,i) 排布，i 最快。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod array;
pub mod error;
pub mod exec;

/// 层级标识
pub const LAYER: u8 = 2;

/// 核心标量类型
///
/// 双曲核心统一使用 f64 计算（对应原型代码的 `real`）。
pub type Real = f64;

pub use array::{Array1D, Array3D, Array4D, View1D, View3D, View4D};
pub use error::RuntimeError;
pub use exec::{par_for_2d, par_for_3d, par_for_4d, par_reduce_max_3d, ExecSpace};

/// Prelude 模块
pub mod prelude {
    //! 常用类型预导入
    pub use crate::{
        par_for_2d, par_for_3d, par_for_4d, par_reduce_max_3d, Array1D, Array3D, Array4D,
        ExecSpace, Real, RuntimeError, View1D, View3D, View4D,
    };
}
