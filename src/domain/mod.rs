// ==========================================
// 订单包装计算服务 - 领域模型层
// ==========================================
// 职责: 定义包装规格集合、装箱方案等值对象
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod pack;

// 重导出核心类型
pub use pack::{FulfillmentPlan, PackSizeSet};
