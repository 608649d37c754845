// crates/mg_physics/src/error.rs

//! 物理层错误类型
//!
//! 错误分类遵循统一的分类法：
//!
//! - [`PhysicsError::NonPhysicalState`]: 转换或黎曼中间态出现非正的
//!   密度/压强。上抛给积分器，由其决定缩小 dt 重试还是终止。
//! - [`PhysicsError::UnsupportedBoundary`]: 配置了未实现的边界策略，
//!   启动期致命。
//! - [`PhysicsError::Config`]: 配置层错误的透传。
//!
//! HLLD 的退化波（分母趋零）在求解器内部就地回退到 HLL，
//! 不会以错误形式离开核心。

use std::sync::atomic::{AtomicU64, Ordering};

/// 统一结果类型别名
pub type PhysicsResult<T> = Result<T, PhysicsError>;

/// 物理层错误
#[derive(Debug, thiserror::Error)]
pub enum PhysicsError {
    /// 非物理状态：负密度或负压强
    #[error("非物理状态: {what} = {value:.6e} @ 单元 (k={k}, j={j}, i={i})")]
    NonPhysicalState {
        /// 违规量名称（"rho" 或 "prs"）
        what: &'static str,
        /// 违规值
        value: f64,
        /// 单元索引 k
        k: usize,
        /// 单元索引 j
        j: usize,
        /// 单元索引 i
        i: usize,
    },

    /// 不支持的边界策略
    #[error("不支持的边界策略 '{policy}' (方向 {dir}, {side} 侧)")]
    UnsupportedBoundary {
        /// 策略名称
        policy: String,
        /// 方向索引
        dir: usize,
        /// 侧别
        side: &'static str,
    },

    /// 配置错误透传
    #[error(transparent)]
    Config(#[from] mg_config::ConfigError),
}

// ============================================================
// 并行核函数内的首错记录
// ============================================================

/// 违规量标签
pub(crate) const FAIL_RHO: u64 = 1;
/// 压强标签
pub(crate) const FAIL_PRS: u64 = 2;

/// 并行 for 内的首个失败单元记录器
///
/// 核函数体不能携带 `Result` 返回值穿过 par_for，失败以
/// compare-exchange 方式记录第一个违规单元，循环结束后统一解码。
/// 编码：低 2 位为量标签，其上三段 20 位依次为 i, j, k。
pub(crate) struct FirstFailure {
    slot: AtomicU64,
}

impl FirstFailure {
    pub fn new() -> Self {
        Self {
            slot: AtomicU64::new(0),
        }
    }

    /// 记录一次违规（仅第一个生效）
    #[inline]
    pub fn record(&self, what: u64, k: usize, j: usize, i: usize) {
        let code = what | (i as u64) << 2 | (j as u64) << 22 | (k as u64) << 42;
        let _ = self
            .slot
            .compare_exchange(0, code, Ordering::Relaxed, Ordering::Relaxed);
    }

    /// 解码为错误；`value` 的取回由调用方根据单元索引完成
    pub fn take(&self, read_value: impl Fn(&'static str, usize, usize, usize) -> f64) -> Option<PhysicsError> {
        let code = self.slot.load(Ordering::Relaxed);
        if code == 0 {
            return None;
        }
        let what = match code & 0b11 {
            FAIL_RHO => "rho",
            _ => "prs",
        };
        let i = ((code >> 2) & 0xF_FFFF) as usize;
        let j = ((code >> 22) & 0xF_FFFF) as usize;
        let k = ((code >> 42) & 0xF_FFFF) as usize;
        Some(PhysicsError::NonPhysicalState {
            what,
            value: read_value(what, k, j, i),
            k,
            j,
            i,
        })
    }
}
