// ==========================================
// 订单包装计算服务 - 启动配置
// ==========================================
// 查找顺序（取第一个存在的文件）:
// 1) 显式路径（--config 或 ORDER_PACKS_CONFIG）
// 2) ./config.yaml
// 3) <用户配置目录>/order-packs-calculator/config.yaml
// 之后应用环境变量覆写: PACK_SIZES, MAX_ORDER_AMOUNT
// ==========================================

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::engine::pack_planner::DEFAULT_MAX_ORDER_AMOUNT;

/// 默认包装规格
pub const DEFAULT_PACK_SIZES: [u64; 5] = [250, 500, 1000, 2000, 5000];

/// 配置文件名
const CONFIG_FILE_NAME: &str = "config.yaml";

/// 用户配置目录下的子目录
const CONFIG_DIR_NAME: &str = "order-packs-calculator";

pub mod config_keys {
    pub const CONFIG_PATH_ENV: &str = "ORDER_PACKS_CONFIG";
    pub const PACK_SIZES_ENV: &str = "PACK_SIZES";
    pub const MAX_ORDER_AMOUNT_ENV: &str = "MAX_ORDER_AMOUNT";
}

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid {key} value {value}")]
    InvalidValue { key: String, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// AppConfig - 启动配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// 初始包装规格（已过滤无效项,非空,均不超过 i64::MAX）
    pub pack_sizes: Vec<u64>,
    /// 单次计算允许的最大订单数量
    pub max_order_amount: u64,
    /// 实际加载的配置文件
    pub source: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pack_sizes: DEFAULT_PACK_SIZES.to_vec(),
            max_order_amount: DEFAULT_MAX_ORDER_AMOUNT,
            source: None,
        }
    }
}

/// 配置文件内容（字段均可缺省）
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    pack_sizes: Option<RawPackSizes>,
    #[serde(default)]
    max_order_amount: Option<u64>,
}

/// pack_sizes 既可写成列表,也可写成逗号分隔字符串
///
/// 列表元素保留原始值,与字符串形式走同一套跳过规则。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPackSizes {
    List(Vec<serde_yaml::Value>),
    Text(String),
}

impl AppConfig {
    /// 加载配置
    ///
    /// 配置文件缺失不是错误; 文件存在但无法读取或解析时返回错误。
    pub fn load(explicit_path: Option<&Path>) -> ConfigResult<Self> {
        let explicit = explicit_path.map(PathBuf::from).or_else(|| {
            std::env::var(config_keys::CONFIG_PATH_ENV)
                .ok()
                .map(PathBuf::from)
        });

        let candidates = match explicit {
            Some(path) => vec![path],
            None => default_search_paths(),
        };

        let mut config = match candidates.into_iter().find(|p| p.exists()) {
            Some(path) => {
                let config = Self::from_file(&path)?;
                tracing::info!("已加载配置文件: {}", path.display());
                config
            }
            None => {
                tracing::info!("未找到配置文件,使用环境变量或默认值");
                Self::default()
            }
        };

        config.apply_env_overrides()?;
        tracing::info!(
            pack_sizes = ?config.pack_sizes,
            max_order_amount = config.max_order_amount,
            "配置加载完成"
        );
        Ok(config)
    }

    /// 读取单个配置文件（不应用环境变量）
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file: ConfigFile = if raw.trim().is_empty() {
            ConfigFile::default()
        } else {
            serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        };

        let mut config = Self {
            source: Some(path.to_path_buf()),
            ..Self::default()
        };
        match file.pack_sizes {
            Some(RawPackSizes::List(values)) => {
                config.pack_sizes = collect_pack_sizes(values.iter().map(yaml_entry_text));
            }
            Some(RawPackSizes::Text(text)) => config.pack_sizes = parse_pack_sizes(&text),
            None => {}
        }
        if let Some(limit) = file.max_order_amount {
            config.max_order_amount = check_max_order_amount("max_order_amount", limit)?;
        }
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> ConfigResult<()> {
        if let Ok(value) = std::env::var(config_keys::PACK_SIZES_ENV) {
            tracing::info!("环境变量 {} 原始值: {}", config_keys::PACK_SIZES_ENV, value);
            self.pack_sizes = parse_pack_sizes(&value);
        }
        if let Ok(value) = std::env::var(config_keys::MAX_ORDER_AMOUNT_ENV) {
            let limit = value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: config_keys::MAX_ORDER_AMOUNT_ENV.to_string(),
                    value,
                })?;
            self.max_order_amount =
                check_max_order_amount(config_keys::MAX_ORDER_AMOUNT_ENV, limit)?;
        }
        Ok(())
    }
}

/// 订单上限为 0 时任何订单都无法计算,视为配置错误
fn check_max_order_amount(key: &str, limit: u64) -> ConfigResult<u64> {
    if limit == 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: limit.to_string(),
        });
    }
    Ok(limit)
}

/// 列表元素转为文本; 字符串取原文,其余按 YAML 标量输出
fn yaml_entry_text(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(text) => text.clone(),
        serde_yaml::Value::Number(number) => number.to_string(),
        serde_yaml::Value::Bool(flag) => flag.to_string(),
        other => format!("{:?}", other),
    }
}

fn default_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
    }
    paths
}

/// 解析逗号分隔的规格字符串
///
/// 空白项跳过; 非整数或 <= 0 的项跳过并告警; 全部无效时回退到默认规格。
pub fn parse_pack_sizes(text: &str) -> Vec<u64> {
    collect_pack_sizes(text.split(',').map(str::to_string))
}

fn collect_pack_sizes<I>(entries: I) -> Vec<u64>
where
    I: IntoIterator<Item = String>,
{
    let mut sizes = Vec::new();
    for entry in entries {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        match entry.parse::<i64>() {
            Ok(size) if size > 0 => sizes.push(size as u64),
            _ => tracing::warn!("跳过无效包装规格: {}", entry),
        }
    }

    if sizes.is_empty() {
        tracing::warn!("没有有效的包装规格,使用默认值: {:?}", DEFAULT_PACK_SIZES);
        return DEFAULT_PACK_SIZES.to_vec();
    }
    sizes
}
