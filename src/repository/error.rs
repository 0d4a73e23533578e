// ==========================================
// 订单包装计算服务 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    // ===== 数据校验错误 =====
    #[error("invalid pack size {value} at position {index}: pack sizes must be positive integers")]
    InvalidPackSize { index: usize, value: i64 },

    #[error("pack size {value} at position {index} is out of range")]
    PackSizeOutOfRange { index: usize, value: u64 },

    #[error("pack size set cannot be empty")]
    EmptyPackSizeSet,
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
