// ==========================================
// 订单包装计算服务 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::Arc;

use crate::api::PackApi;
use crate::config::AppConfig;
use crate::engine::PackPlanner;
use crate::repository::{PackSizeRegistry, RepositoryError, RepositoryResult};

/// 应用状态
///
/// 规格仓储是唯一的共享可变状态,由此显式持有并注入 API。
pub struct AppState {
    /// 包装规格仓储
    pub pack_size_registry: Arc<PackSizeRegistry>,

    /// 装箱方案引擎
    pub pack_planner: Arc<PackPlanner>,

    /// 包装API
    pub pack_api: Arc<PackApi>,
}

impl AppState {
    /// 按启动配置创建AppState
    ///
    /// # 返回
    /// - Ok(AppState)
    /// - Err: 配置中的初始规格未通过仓储校验
    pub fn from_config(config: &AppConfig) -> RepositoryResult<Self> {
        tracing::info!("初始化AppState,初始规格: {:?}", config.pack_sizes);

        let initial = config
            .pack_sizes
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                i64::try_from(value)
                    .map_err(|_| RepositoryError::PackSizeOutOfRange { index, value })
            })
            .collect::<RepositoryResult<Vec<i64>>>()?;
        let pack_size_registry = Arc::new(PackSizeRegistry::with_sizes(&initial)?);
        let pack_planner = Arc::new(PackPlanner::with_max_order_amount(config.max_order_amount));

        Ok(Self::with_components(pack_size_registry, pack_planner))
    }

    /// 由已有组件创建AppState
    pub fn with_components(
        pack_size_registry: Arc<PackSizeRegistry>,
        pack_planner: Arc<PackPlanner>,
    ) -> Self {
        let pack_api = Arc::new(PackApi::new(
            pack_size_registry.clone(),
            pack_planner.clone(),
        ));

        Self {
            pack_size_registry,
            pack_planner,
            pack_api,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::PackSizeStore;

    #[test]
    fn test_from_default_config() {
        let state = AppState::from_config(&AppConfig::default()).unwrap();
        assert_eq!(
            state.pack_size_registry.load().as_slice(),
            &[5000, 2000, 1000, 500, 250]
        );
        assert_eq!(state.pack_size_registry.revision(), 1);
    }

    #[test]
    fn test_from_config_rejects_out_of_range_size() {
        let config = AppConfig {
            pack_sizes: vec![250, u64::MAX],
            ..AppConfig::default()
        };
        match AppState::from_config(&config) {
            Err(err) => assert_eq!(
                err,
                RepositoryError::PackSizeOutOfRange {
                    index: 1,
                    value: u64::MAX
                }
            ),
            Ok(_) => panic!("Expected PackSizeOutOfRange"),
        }
    }

    #[test]
    fn test_from_config_with_limit() {
        let config = AppConfig {
            max_order_amount: 42,
            ..AppConfig::default()
        };
        let state = AppState::from_config(&config).unwrap();
        assert_eq!(state.pack_planner.max_order_amount(), 42);
    }
}
