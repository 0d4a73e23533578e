// ==========================================
// 订单包装计算服务 - 包装规格仓储
// ==========================================
// 职责: 保存经过校验的包装规格集合
// 并发: 读多写少; 读取拿到完整快照,替换整体生效,不会读到半新半旧的集合
// ==========================================

use crate::domain::pack::PackSizeSet;
use crate::repository::error::{RepositoryError, RepositoryResult};
use std::sync::{Arc, PoisonError, RwLock};

// ==========================================
// Trait: PackSizeStore
// ==========================================
// 用途: API 层依赖的规格存储接口（便于替换实现与测试）
pub trait PackSizeStore: Send + Sync {
    /// 读取当前规格集合
    fn load(&self) -> PackSizeSet;

    /// 整体替换规格集合
    ///
    /// 校验失败时原集合保持不变。
    fn replace(&self, candidate: &[i64]) -> RepositoryResult<PackSizeSet>;

    /// 当前集合的修订号（每次成功替换 +1）
    fn revision(&self) -> u64;
}

/// 仓储内部快照
#[derive(Debug)]
struct Snapshot {
    sizes: PackSizeSet,
    revision: u64,
}

// ==========================================
// PackSizeRegistry - 内存规格仓储
// ==========================================
pub struct PackSizeRegistry {
    current: RwLock<Arc<Snapshot>>,
}

impl PackSizeRegistry {
    /// 创建空仓储（尚未配置规格,revision=0）
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(Snapshot {
                sizes: PackSizeSet::empty(),
                revision: 0,
            })),
        }
    }

    /// 以初始规格创建仓储
    ///
    /// # 参数
    /// - sizes: 初始规格（与 replace 使用同一套校验）
    pub fn with_sizes(sizes: &[i64]) -> RepositoryResult<Self> {
        let registry = Self::new();
        registry.replace(sizes)?;
        Ok(registry)
    }

    fn snapshot(&self) -> Arc<Snapshot> {
        // 锁内始终是完整快照,中毒后仍可安全读取
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }
}

impl Default for PackSizeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PackSizeStore for PackSizeRegistry {
    fn load(&self) -> PackSizeSet {
        self.snapshot().sizes.clone()
    }

    fn replace(&self, candidate: &[i64]) -> RepositoryResult<PackSizeSet> {
        let validated = match validate_pack_sizes(candidate) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(candidate = ?candidate, error = %e, "拒绝替换包装规格");
                return Err(e);
            }
        };
        let sizes = PackSizeSet::from_validated(validated);

        // 新快照在锁外构建,写锁内只做指针交换
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let old_revision = guard.revision;
        *guard = Arc::new(Snapshot {
            sizes: sizes.clone(),
            revision: old_revision + 1,
        });
        drop(guard);

        tracing::info!(
            old_revision,
            new_revision = old_revision + 1,
            sizes = %sizes,
            "包装规格已替换"
        );
        Ok(sizes)
    }

    fn revision(&self) -> u64 {
        self.snapshot().revision
    }
}

// ==========================================
// 规格校验
// ==========================================

/// 校验候选规格
///
/// 规则:
/// 1) 任一元素 <= 0 → InvalidPackSize（报告输入顺序中的第一个违规项）
/// 2) 去重后为空 → EmptyPackSizeSet
///
/// # 返回
/// 去重后的规格（降序）
pub fn validate_pack_sizes(candidate: &[i64]) -> RepositoryResult<Vec<u64>> {
    let mut sizes = Vec::with_capacity(candidate.len());
    for (index, &value) in candidate.iter().enumerate() {
        match u64::try_from(value) {
            Ok(size) if size > 0 => sizes.push(size),
            _ => return Err(RepositoryError::InvalidPackSize { index, value }),
        }
    }

    if sizes.is_empty() {
        return Err(RepositoryError::EmptyPackSizeSet);
    }

    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes.dedup();
    Ok(sizes)
}
