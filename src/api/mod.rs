// ==========================================
// 订单包装计算服务 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供路由层调用
// ==========================================

pub mod dto;
pub mod error;
pub mod pack_api;

// 重导出核心类型
pub use dto::{
    CalculateRequest, CalculateResponse, MessageResponse, PackSizesResponse,
    UpdatePackSizesRequest,
};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use pack_api::{PackApi, PACK_SIZES_UPDATED_MESSAGE};
