// crates/mg_config/src/solver_config.rs

//! SolverConfig - 求解器配置（全 f64）
//!
//! 定义求解器的全部配置参数。所有标量使用 f64 存储以便 JSON
//! 序列化；校验集中在 [`SolverConfig::validate`]。

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::kinds::{BoundaryPolicy, EosKind, ReconstructionOrder, SolverKind};

/// 求解器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SolverConfig {
    /// 黎曼求解器
    #[serde(default)]
    pub solver: SolverKind,

    /// 界面重构阶数
    #[serde(default)]
    pub reconstruction: ReconstructionOrder,

    /// 网格配置
    #[serde(default)]
    pub grid: GridConfig,

    /// 边界配置
    #[serde(default)]
    pub boundary: BoundaryConfig,

    /// 流体物理参数
    #[serde(default)]
    pub hydro: HydroConfig,

    /// 时间积分参数
    #[serde(default)]
    pub time: TimeConfig,
}

/// 网格配置
///
/// 逻辑笛卡尔索引空间：每个方向的活动单元数与物理范围。
/// 未激活的方向（`d >= dimensions`）强制为单单元、零鬼层。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// 空间维数（1..=3）
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,

    /// 各方向活动单元数
    #[serde(default = "default_cells")]
    pub n: [usize; 3],

    /// 各方向域起点
    #[serde(default = "default_begin")]
    pub begin: [f64; 3],

    /// 各方向域终点
    #[serde(default = "default_end")]
    pub end: [f64; 3],

    /// 鬼层厚度（激活方向）
    #[serde(default = "default_nghost")]
    pub nghost: usize,
}

fn default_dimensions() -> usize {
    1
}
fn default_cells() -> [usize; 3] {
    [64, 1, 1]
}
fn default_begin() -> [f64; 3] {
    [0.0; 3]
}
fn default_end() -> [f64; 3] {
    [1.0; 3]
}
fn default_nghost() -> usize {
    2
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            dimensions: default_dimensions(),
            n: default_cells(),
            begin: default_begin(),
            end: default_end(),
            nghost: default_nghost(),
        }
    }
}

/// 边界配置：每个方向、每侧一个策略
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BoundaryConfig {
    /// X1 低侧
    #[serde(default)]
    pub x1_beg: BoundaryPolicy,
    /// X1 高侧
    #[serde(default)]
    pub x1_end: BoundaryPolicy,
    /// X2 低侧
    #[serde(default)]
    pub x2_beg: BoundaryPolicy,
    /// X2 高侧
    #[serde(default)]
    pub x2_end: BoundaryPolicy,
    /// X3 低侧
    #[serde(default)]
    pub x3_beg: BoundaryPolicy,
    /// X3 高侧
    #[serde(default)]
    pub x3_end: BoundaryPolicy,
}

impl BoundaryConfig {
    /// 全域同一策略
    pub fn uniform(policy: BoundaryPolicy) -> Self {
        Self {
            x1_beg: policy,
            x1_end: policy,
            x2_beg: policy,
            x2_end: policy,
            x3_beg: policy,
            x3_end: policy,
        }
    }

    /// 按 (方向, 侧别) 取策略；方向 0..3，false=beg / true=end
    pub fn at(&self, dir: usize, end_side: bool) -> BoundaryPolicy {
        match (dir, end_side) {
            (0, false) => self.x1_beg,
            (0, true) => self.x1_end,
            (1, false) => self.x2_beg,
            (1, true) => self.x2_end,
            (2, false) => self.x3_beg,
            (2, true) => self.x3_end,
            _ => BoundaryPolicy::Periodic,
        }
    }
}

/// 流体物理参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HydroConfig {
    /// 状态方程闭合
    #[serde(default)]
    pub eos: EosKind,

    /// 绝热指数 γ
    #[serde(default = "default_gamma")]
    pub gamma: f64,

    /// 等温声速平方 C²_iso
    #[serde(default = "default_c2_iso")]
    pub c2_iso: f64,
}

fn default_gamma() -> f64 {
    5.0 / 3.0
}
fn default_c2_iso() -> f64 {
    1.0
}

impl Default for HydroConfig {
    fn default() -> Self {
        Self {
            eos: EosKind::default(),
            gamma: default_gamma(),
            c2_iso: default_c2_iso(),
        }
    }
}

/// 时间积分参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeConfig {
    /// CFL 数
    #[serde(default = "default_cfl")]
    pub cfl: f64,
}

fn default_cfl() -> f64 {
    0.9
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self { cfl: default_cfl() }
    }
}

impl SolverConfig {
    /// 从 JSON 文件加载
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// 启动期校验
    ///
    /// 报告第一个违规值；未激活方向的网格参数不参与校验。
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.grid;
        if g.dimensions == 0 || g.dimensions > 3 {
            return Err(ConfigError::invalid(
                "grid.dimensions",
                g.dimensions,
                "必须在 1..=3",
            ));
        }
        if g.nghost < 2 {
            return Err(ConfigError::invalid(
                "grid.nghost",
                g.nghost,
                "二阶重构至少需要 2 层鬼单元",
            ));
        }
        for d in 0..g.dimensions {
            if g.n[d] == 0 {
                return Err(ConfigError::invalid(
                    "grid.n",
                    g.n[d],
                    "激活方向的单元数必须为正",
                ));
            }
            if g.end[d] <= g.begin[d] {
                return Err(ConfigError::invalid(
                    "grid.domain",
                    format!("[{}, {}]", g.begin[d], g.end[d]),
                    "网格间距必须为正",
                ));
            }
        }
        if self.hydro.gamma <= 1.0 {
            return Err(ConfigError::invalid(
                "hydro.gamma",
                self.hydro.gamma,
                "必须大于 1",
            ));
        }
        if self.hydro.c2_iso <= 0.0 {
            return Err(ConfigError::invalid(
                "hydro.c2_iso",
                self.hydro.c2_iso,
                "必须为正",
            ));
        }
        if !(self.time.cfl > 0.0 && self.time.cfl <= 1.0) {
            return Err(ConfigError::invalid(
                "time.cfl",
                self.time.cfl,
                "必须在 (0, 1]",
            ));
        }
        Ok(())
    }
}
