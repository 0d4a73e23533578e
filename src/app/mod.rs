// ==========================================
// 订单包装计算服务 - 应用层
// ==========================================
// 职责: 组装共享状态,按路径分发请求
// ==========================================

pub mod routes;
pub mod state;

// 重导出
pub use routes::{route, ApiReply};
pub use state::AppState;
