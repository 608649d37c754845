// crates/mg_config/src/lib.rs

//! MagnoHydro Config Layer (Layer 3)
//!
//! 求解器配置层：定义配置结构、序列化与启动期校验。
//!
//! 所有标量以 f64 存储以便 JSON 序列化；非法取值在
//! [`SolverConfig::validate`] 中以 [`ConfigError`] 报告违规值，
//! 属于致命的启动期错误（不进入时间推进循环）。

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod kinds;
pub mod solver_config;

/// 层级标识
pub const LAYER: u8 = 3;

pub use error::ConfigError;
pub use kinds::{BoundaryPolicy, BoundarySide, EosKind, ReconstructionOrder, SolverKind};
pub use solver_config::{BoundaryConfig, GridConfig, HydroConfig, SolverConfig, TimeConfig};
