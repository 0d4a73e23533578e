// ==========================================
// 订单包装计算服务 - 核心库
// ==========================================
// 系统定位: 维护可发货的包装规格,为订单计算最优装箱方案
// 目标: 发货件数最少,其次包装数最少
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 值对象
pub mod domain;

// 数据仓储层 - 规格存储
pub mod repository;

// 引擎层 - 装箱计算
pub mod engine;

// 配置层 - 启动配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态与路由
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use api::{ApiError, PackApi};
pub use app::{route, ApiReply, AppState};
pub use config::AppConfig;
pub use domain::{FulfillmentPlan, PackSizeSet};
pub use engine::{PackPlanner, PlannerError};
pub use repository::{PackSizeRegistry, PackSizeStore, RepositoryError};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "order-packs-calculator";
