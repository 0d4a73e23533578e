// ==========================================
// 订单包装计算服务 - 请求/响应结构
// ==========================================
// 字段名与前端约定一致（camelCase）,不可随意改动
// ==========================================

use crate::domain::pack::FulfillmentPlan;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// GET /api/pack-sizes 响应
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackSizesResponse {
    pub pack_sizes: Vec<u64>,
}

/// POST /api/pack-sizes 请求
///
/// 元素保持原始 JSON 值,由 API 层逐个校验,以便指出具体违规项。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePackSizesRequest {
    #[serde(default)]
    pub pack_sizes: Vec<serde_json::Value>,
}

/// 通用成功消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /api/calculate 请求
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    #[serde(default)]
    pub order_amount: serde_json::Value,
}

/// POST /api/calculate 响应
///
/// packs 的键为规格（序列化为字符串）,值为数量。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateResponse {
    pub packs: BTreeMap<u64, u64>,
    pub total_items: u64,
}

impl From<FulfillmentPlan> for CalculateResponse {
    fn from(plan: FulfillmentPlan) -> Self {
        Self {
            packs: plan.packs,
            total_items: plan.total_items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_calculate_response_wire_format() {
        let plan = FulfillmentPlan::from_counts(501, vec![(500, 1), (250, 1)]);
        let value = serde_json::to_value(CalculateResponse::from(plan)).unwrap();
        assert_eq!(
            value,
            json!({"packs": {"250": 1, "500": 1}, "totalItems": 750})
        );
    }

    #[test]
    fn test_pack_sizes_response_wire_format() {
        let value = serde_json::to_value(PackSizesResponse {
            pack_sizes: vec![500, 250],
        })
        .unwrap();
        assert_eq!(value, json!({"packSizes": [500, 250]}));
    }

    #[test]
    fn test_missing_fields_default() {
        let req: CalculateRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.order_amount.is_null());

        let req: UpdatePackSizesRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.pack_sizes.is_empty());
    }
}
