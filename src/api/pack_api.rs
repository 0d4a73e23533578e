// ==========================================
// 订单包装计算服务 - 包装 API
// ==========================================
// 职责: 规格查询/替换、装箱计算
// 流程: 从仓储取规格快照 → 交给引擎计算
// ==========================================

use std::sync::Arc;

use serde_json::Value;

use crate::api::dto::{
    CalculateRequest, CalculateResponse, MessageResponse, PackSizesResponse,
    UpdatePackSizesRequest,
};
use crate::api::error::{ApiError, ApiResult};
use crate::engine::error::PlannerError;
use crate::engine::pack_planner::PackPlanner;
use crate::repository::pack_size_repo::PackSizeStore;

/// 规格替换成功提示
pub const PACK_SIZES_UPDATED_MESSAGE: &str = "Pack sizes updated successfully";

// ==========================================
// PackApi - 包装 API
// ==========================================
pub struct PackApi {
    store: Arc<dyn PackSizeStore>,
    planner: Arc<PackPlanner>,
}

impl PackApi {
    /// 创建新的PackApi实例
    pub fn new(store: Arc<dyn PackSizeStore>, planner: Arc<PackPlanner>) -> Self {
        Self { store, planner }
    }

    /// 查询当前规格（降序）
    pub fn get_pack_sizes(&self) -> ApiResult<PackSizesResponse> {
        Ok(PackSizesResponse {
            pack_sizes: self.store.load().to_vec(),
        })
    }

    /// 整体替换规格
    ///
    /// 非整数元素（小数、字符串、null 等）视为无效规格; 失败时原规格不变。
    pub fn update_pack_sizes(&self, request: UpdatePackSizesRequest) -> ApiResult<MessageResponse> {
        let candidate = request
            .pack_sizes
            .iter()
            .enumerate()
            .map(|(index, value)| {
                value.as_i64().ok_or_else(|| ApiError::MalformedPackSize {
                    index,
                    value: value.to_string(),
                })
            })
            .collect::<ApiResult<Vec<i64>>>()?;

        self.store.replace(&candidate)?;

        Ok(MessageResponse {
            message: PACK_SIZES_UPDATED_MESSAGE.to_string(),
        })
    }

    /// 计算装箱方案
    pub fn calculate(&self, request: CalculateRequest) -> ApiResult<CalculateResponse> {
        let order_amount = self.parse_order_amount(&request.order_amount)?;

        // 取一次快照,计算期间规格被替换也不影响本次结果
        let sizes = self.store.load();
        let plan = self.planner.compute(order_amount, &sizes)?;

        Ok(CalculateResponse::from(plan))
    }

    fn parse_order_amount(&self, value: &Value) -> ApiResult<i64> {
        if let Some(amount) = value.as_i64() {
            return Ok(amount);
        }
        // 超出 i64 的正整数按超限处理
        if let Some(amount) = value.as_u64() {
            return Err(ApiError::Planner(PlannerError::OrderAmountTooLarge {
                order_amount: amount,
                limit: self.planner.max_order_amount(),
            }));
        }
        Err(ApiError::MalformedOrderAmount(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::error::RepositoryError;
    use crate::repository::pack_size_repo::PackSizeRegistry;
    use serde_json::json;

    fn setup(sizes: &[i64]) -> (Arc<PackSizeRegistry>, PackApi) {
        let registry = Arc::new(PackSizeRegistry::with_sizes(sizes).unwrap());
        let api = PackApi::new(registry.clone(), Arc::new(PackPlanner::new()));
        (registry, api)
    }

    fn calc_request(value: Value) -> CalculateRequest {
        CalculateRequest {
            order_amount: value,
        }
    }

    #[test]
    fn test_get_pack_sizes_sorted_desc() {
        let (_registry, api) = setup(&[250, 5000, 1000]);
        assert_eq!(api.get_pack_sizes().unwrap().pack_sizes, vec![5000, 1000, 250]);
    }

    #[test]
    fn test_update_then_calculate() {
        let (registry, api) = setup(&[250, 500]);
        let resp = api
            .update_pack_sizes(UpdatePackSizesRequest {
                pack_sizes: vec![json!(23), json!(31), json!(53)],
            })
            .unwrap();
        assert_eq!(resp.message, PACK_SIZES_UPDATED_MESSAGE);
        assert_eq!(registry.revision(), 2);

        let resp = api.calculate(calc_request(json!(263))).unwrap();
        assert!(resp.total_items >= 263);
    }

    #[test]
    fn test_update_rejects_malformed_values() {
        let (registry, api) = setup(&[250, 500]);
        let err = api
            .update_pack_sizes(UpdatePackSizesRequest {
                pack_sizes: vec![json!(10), json!("abc")],
            })
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::MalformedPackSize {
                index: 1,
                value: "\"abc\"".to_string()
            }
        );

        let err = api
            .update_pack_sizes(UpdatePackSizesRequest {
                pack_sizes: vec![json!(12.5)],
            })
            .unwrap_err();
        assert!(matches!(err, ApiError::MalformedPackSize { index: 0, .. }));

        let err = api
            .update_pack_sizes(UpdatePackSizesRequest::default())
            .unwrap_err();
        assert_eq!(err, ApiError::Repository(RepositoryError::EmptyPackSizeSet));

        assert_eq!(registry.load().as_slice(), &[500, 250]);
    }

    #[test]
    fn test_calculate_order_amount_errors() {
        let (_registry, api) = setup(&[250, 500]);

        assert_eq!(
            api.calculate(calc_request(json!(0))).unwrap_err(),
            ApiError::Planner(PlannerError::InvalidOrderAmount(0))
        );
        assert_eq!(
            api.calculate(calc_request(Value::Null)).unwrap_err(),
            ApiError::MalformedOrderAmount("null".to_string())
        );
        assert!(matches!(
            api.calculate(calc_request(json!(u64::MAX))).unwrap_err(),
            ApiError::Planner(PlannerError::OrderAmountTooLarge { .. })
        ));
    }

    #[test]
    fn test_calculate_without_pack_sizes() {
        let api = PackApi::new(
            Arc::new(PackSizeRegistry::new()),
            Arc::new(PackPlanner::new()),
        );
        assert_eq!(
            api.calculate(calc_request(json!(10))).unwrap_err(),
            ApiError::Planner(PlannerError::NoPackSizesConfigured)
        );
    }
}
