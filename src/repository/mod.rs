// ==========================================
// 订单包装计算服务 - 数据仓储层
// ==========================================
// 职责: 持有当前包装规格集合,提供原子读取与整体替换
// 红线: Repository 不含装箱计算逻辑
// ==========================================

pub mod error;
pub mod pack_size_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use pack_size_repo::{validate_pack_sizes, PackSizeRegistry, PackSizeStore};
