// ==========================================
// 订单包装计算服务 - 配置层
// ==========================================
// 职责: 启动配置加载（配置文件 → 环境变量覆写 → 默认值）
// 存储: config.yaml
// ==========================================

pub mod app_config;

// 重导出核心配置
pub use app_config::{
    parse_pack_sizes, AppConfig, ConfigError, ConfigResult, DEFAULT_PACK_SIZES,
};
