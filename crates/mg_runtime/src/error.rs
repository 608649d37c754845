// crates/mg_runtime/src/error.rs

//! 运行时层错误类型

/// 运行时错误
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// 数组形状不匹配
    #[error("形状不匹配 '{name}': 期望 {expected:?}, 实际 {actual:?}")]
    ShapeMismatch {
        /// 数据名称
        name: &'static str,
        /// 期望形状
        expected: (usize, usize, usize, usize),
        /// 实际形状
        actual: (usize, usize, usize, usize),
    },

    /// 零尺寸分配
    #[error("零尺寸分配 '{name}'")]
    EmptyExtent {
        /// 数据名称
        name: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RuntimeError::EmptyExtent { name: "Vc" };
        assert!(err.to_string().contains("Vc"));
    }
}
