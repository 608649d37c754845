// crates/mg_physics/src/setup.rs

//! 用户 Setup 钩子
//!
//! 外部协作者接口：初值、用户自定义边界与逐步分析。
//! 实现方直接写入数据块的 `vc` 与 `vs`（CPU 后端下即宿主内存）。

use mg_config::BoundarySide;
use mg_runtime::Real;

use crate::data::DataBlock;
use crate::error::{PhysicsError, PhysicsResult};
use crate::grid::Direction;

/// 用户钩子
pub trait Setup {
    /// 填充初始流场（`vc` 与 `vs` 全范围）
    fn init_flow(&mut self, data: &mut DataBlock);

    /// userdef 边界（默认未实现）
    fn userdef_boundary(
        &mut self,
        _data: &mut DataBlock,
        dir: Direction,
        side: BoundarySide,
        _t: Real,
    ) -> PhysicsResult<()> {
        Err(PhysicsError::UnsupportedBoundary {
            policy: "userdef".to_string(),
            dir: dir.idx(),
            side: match side {
                BoundarySide::Beg => "beg",
                BoundarySide::End => "end",
            },
        })
    }

    /// 是否提供 userdef 边界实现（启动期校验用）
    fn provides_userdef(&self) -> bool {
        false
    }

    /// 逐步分析钩子（积分器每步调用一次）
    fn make_analysis(&mut self, _data: &DataBlock, _t: Real) {}
}
