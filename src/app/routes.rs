// ==========================================
// 订单包装计算服务 - 请求路由
// ==========================================
// 路由表（与前端约定一致）:
// - GET  /api/pack-sizes  → {"packSizes": [...]}
// - POST /api/pack-sizes  → {"message": "..."}
// - POST /api/calculate   → {"packs": {...}, "totalItems": n}
// 失败统一返回 {"error": "..."}
// ==========================================

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{ApiError, ApiResult};
use crate::app::state::AppState;

pub const PACK_SIZES_PATH: &str = "/api/pack-sizes";
pub const CALCULATE_PATH: &str = "/api/calculate";

/// 路由响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiReply {
    pub status: u16,
    pub body: Value,
}

impl ApiReply {
    fn ok<T: Serialize>(payload: T) -> Self {
        match serde_json::to_value(payload) {
            Ok(body) => Self { status: 200, body },
            Err(e) => {
                tracing::error!("响应序列化失败: {}", e);
                Self {
                    status: 500,
                    body: serde_json::json!({ "error": "Internal server error" }),
                }
            }
        }
    }

    fn no_content() -> Self {
        Self {
            status: 204,
            body: Value::Null,
        }
    }

    fn from_error(err: &ApiError) -> Self {
        Self {
            status: err.status_code(),
            body: serde_json::json!(err.to_response()),
        }
    }
}

/// 分发一个请求
///
/// # 参数
/// - method: HTTP 方法（大小写不敏感）
/// - path: 请求路径,查询串会被忽略
/// - body: 原始请求体
pub fn route(state: &AppState, method: &str, path: &str, body: &str) -> ApiReply {
    let path = path.split('?').next().unwrap_or(path);
    let method = method.to_ascii_uppercase();

    let result = match (method.as_str(), path) {
        ("OPTIONS", PACK_SIZES_PATH) | ("OPTIONS", CALCULATE_PATH) => {
            return ApiReply::no_content();
        }
        ("GET", PACK_SIZES_PATH) => handle("get pack sizes", || state.pack_api.get_pack_sizes()),
        ("POST", PACK_SIZES_PATH) => handle("update pack sizes", || {
            state.pack_api.update_pack_sizes(parse_body(body)?)
        }),
        ("POST", CALCULATE_PATH) => handle("calculate packs", || {
            state.pack_api.calculate(parse_body(body)?)
        }),
        (_, PACK_SIZES_PATH) | (_, CALCULATE_PATH) => Err(ApiError::MethodNotAllowed {
            method: method.clone(),
            path: path.to_string(),
        }),
        _ => Err(ApiError::NotFound(path.to_string())),
    };

    match result {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(method = %method, path = %path, "请求被拒绝: {}", err);
            ApiReply::from_error(&err)
        }
    }
}

fn handle<T, F>(action: &str, f: F) -> ApiResult<ApiReply>
where
    T: Serialize,
    F: FnOnce() -> ApiResult<T>,
{
    tracing::info!("收到请求: {}", action);
    let payload = f()?;
    tracing::info!("请求成功: {}", action);
    Ok(ApiReply::ok(payload))
}

/// 解析请求体; 空请求体按空对象处理
fn parse_body<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    let body = if body.trim().is_empty() { "{}" } else { body };
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!("请求体解析失败: {}", e);
        ApiError::InvalidRequest(e.to_string())
    })
}
