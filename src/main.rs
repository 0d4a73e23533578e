// ==========================================
// 订单包装计算服务 - 主入口
// ==========================================
// 协议: stdin/stdout 按行交换 JSON 信封
//   请求: {"method": "POST", "path": "/api/calculate", "body": {"orderAmount": 501}}
//   响应: {"status": 200, "body": {"packs": {...}, "totalItems": 750}}
// body 可以是 JSON 值,也可以是原始字符串
// ==========================================

use std::path::PathBuf;

use anyhow::{bail, Context};
use serde::Deserialize;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use order_packs_calculator::app::{route, ApiReply, AppState};
use order_packs_calculator::config::AppConfig;
use order_packs_calculator::logging;

/// 请求信封
#[derive(Debug, Deserialize)]
struct Envelope {
    method: String,
    path: String,
    #[serde(default)]
    body: Value,
}

impl Envelope {
    fn raw_body(&self) -> String {
        match &self.body {
            Value::Null => String::new(),
            Value::String(raw) => raw.clone(),
            other => other.to_string(),
        }
    }
}

/// 解析命令行: 仅支持 --config <path>
fn parse_args() -> anyhow::Result<Option<PathBuf>> {
    let mut args = std::env::args().skip(1);
    let mut config_path = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args.next().context("--config 需要一个路径参数")?;
                config_path = Some(PathBuf::from(path));
            }
            other => bail!("未知参数: {}", other),
        }
    }
    Ok(config_path)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("订单包装计算服务 ({})", order_packs_calculator::APP_NAME);
    tracing::info!("系统版本: {}", order_packs_calculator::VERSION);
    tracing::info!("==================================================");

    let config_path = parse_args()?;
    let config = AppConfig::load(config_path.as_deref()).context("加载配置失败")?;
    let state = AppState::from_config(&config).context("初始化AppState失败")?;
    tracing::info!("AppState初始化成功,等待请求");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await.context("读取请求失败")? {
        if line.trim().is_empty() {
            continue;
        }

        let reply = match serde_json::from_str::<Envelope>(&line) {
            Ok(envelope) => route(&state, &envelope.method, &envelope.path, &envelope.raw_body()),
            Err(e) => {
                tracing::warn!("请求信封解析失败: {}", e);
                ApiReply {
                    status: 400,
                    body: serde_json::json!({ "error": "Invalid request" }),
                }
            }
        };

        let mut out = serde_json::to_string(&reply).context("响应序列化失败")?;
        out.push('\n');
        stdout.write_all(out.as_bytes()).await?;
        stdout.flush().await?;
    }

    tracing::info!("输入结束,服务退出");
    Ok(())
}
