// ==========================================
// 订单包装计算服务 - 引擎层错误类型
// ==========================================
// 约束: 所有错误均在计算开始前检出,不返回部分方案
// ==========================================

use thiserror::Error;

/// 装箱引擎错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("order amount must be a positive integer, got {0}")]
    InvalidOrderAmount(i64),

    #[error("no pack sizes configured")]
    NoPackSizesConfigured,

    #[error("order amount {order_amount} exceeds the supported maximum of {limit}")]
    OrderAmountTooLarge { order_amount: u64, limit: u64 },

    #[error("pack sizes insufficient to fulfill order")]
    InsufficientPackSizes,
}

/// Result 类型别名
pub type PlannerResult<T> = Result<T, PlannerError>;
