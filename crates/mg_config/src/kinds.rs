// crates/mg_config/src/kinds.rs

//! 配置枚举类型
//!
//! 求解器、边界策略、状态方程与重构阶数的封闭枚举。
//! 均派生 serde（小写标签）以进入 JSON 配置。

use serde::{Deserialize, Serialize};

/// 黎曼求解器类型
///
/// 在初始化时选定一次，内层循环按选定分支内联展开，
/// 不做逐界面的间接调用。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    /// TVDLF / Rusanov（最耗散，最鲁棒）
    Tvdlf,
    /// HLL 双波求解器
    Hll,
    /// HLLD 五波求解器（分辨接触与旋转间断）
    #[default]
    Hlld,
    /// Roe 特征分解求解器（需熵修正）
    Roe,
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Tvdlf => "tvdlf",
            Self::Hll => "hll",
            Self::Hlld => "hlld",
            Self::Roe => "roe",
        };
        write!(f, "{}", name)
    }
}

/// 边界策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryPolicy {
    /// 周期边界：鬼单元复制对侧活动单元
    #[default]
    Periodic,
    /// 自由出流：零梯度外推最近的活动层
    Outflow,
    /// 用户自定义：委托给 Setup 钩子
    Userdef,
}

impl std::fmt::Display for BoundaryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Periodic => "periodic",
            Self::Outflow => "outflow",
            Self::Userdef => "userdef",
        };
        write!(f, "{}", name)
    }
}

/// 边界侧别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundarySide {
    /// 低索引侧
    Beg,
    /// 高索引侧
    End,
}

/// 状态方程闭合
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EosKind {
    /// 绝热（理想气体，带能量方程）
    #[default]
    Adiabatic,
    /// 等温（无能量方程，声速为常数）
    Isothermal,
}

/// 界面重构阶数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReconstructionOrder {
    /// 一阶迎风（donor cell）
    Donor,
    /// 二阶 TVD（Van Leer 限制器）
    #[default]
    Linear,
}
