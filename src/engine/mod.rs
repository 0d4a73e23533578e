// ==========================================
// 订单包装计算服务 - 引擎层
// ==========================================
// 职责: 根据订单数量与规格快照计算装箱方案
// 红线: 引擎无状态,不访问仓储
// ==========================================

pub mod error;
pub mod pack_planner;

// 重导出核心引擎
pub use error::{PlannerError, PlannerResult};
pub use pack_planner::{PackPlanner, DEFAULT_MAX_ORDER_AMOUNT, MAX_SUPPORTED_ORDER_AMOUNT};
