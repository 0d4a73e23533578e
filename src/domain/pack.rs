// ==========================================
// 订单包装计算服务 - 包装领域模型
// ==========================================
// 职责: 包装规格集合 (PackSizeSet) 与装箱方案 (FulfillmentPlan)
// 约束: 规格为正整数且互不重复; 方案中不出现数量为 0 的规格
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

// ==========================================
// PackSizeSet - 包装规格集合
// ==========================================
// 不可变快照: 克隆只增加引用计数
// 内部按降序存放,保证迭代顺序确定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackSizeSet {
    sizes: Arc<[u64]>,
}

impl PackSizeSet {
    /// 空集合（尚未配置任何规格）
    pub fn empty() -> Self {
        Self {
            sizes: Arc::from(Vec::new()),
        }
    }

    /// 由已校验的规格构造
    ///
    /// 调用方保证: 元素均 > 0 且无重复。此处仍会重新排序为降序。
    pub(crate) fn from_validated(mut sizes: Vec<u64>) -> Self {
        sizes.sort_unstable_by(|a, b| b.cmp(a));
        debug_assert!(sizes.iter().all(|&s| s > 0));
        debug_assert!(sizes.windows(2).all(|w| w[0] > w[1]));
        Self {
            sizes: sizes.into(),
        }
    }

    /// 规格列表（降序）
    pub fn as_slice(&self) -> &[u64] {
        &self.sizes
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// 最大规格
    pub fn max_size(&self) -> Option<u64> {
        self.sizes.first().copied()
    }

    pub fn contains(&self, size: u64) -> bool {
        self.sizes.contains(&size)
    }

    pub fn to_vec(&self) -> Vec<u64> {
        self.sizes.to_vec()
    }
}

impl Default for PackSizeSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for PackSizeSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_slice().serialize(serializer)
    }
}

impl fmt::Display for PackSizeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .sizes
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "[{}]", joined)
    }
}

// ==========================================
// FulfillmentPlan - 装箱方案
// ==========================================
// 每次计算新建,不持久化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentPlan {
    /// 请求的订单数量
    pub order_amount: u64,
    /// 规格 → 数量（数量恒 > 0）
    pub packs: BTreeMap<u64, u64>,
    /// 发货总件数 = Σ 规格 × 数量
    pub total_items: u64,
    /// 包装总数 = Σ 数量
    pub total_packs: u64,
}

impl FulfillmentPlan {
    /// 由各规格数量构造方案,并重新计算汇总字段
    ///
    /// 数量为 0 的规格会被丢弃。
    pub fn from_counts<I>(order_amount: u64, counts: I) -> Self
    where
        I: IntoIterator<Item = (u64, u64)>,
    {
        let mut packs = BTreeMap::new();
        for (size, quantity) in counts {
            if quantity > 0 {
                *packs.entry(size).or_insert(0) += quantity;
            }
        }

        let total_items = packs.iter().map(|(size, qty)| size * qty).sum();
        let total_packs = packs.values().sum();

        Self {
            order_amount,
            packs,
            total_items,
            total_packs,
        }
    }

    /// 指定规格的数量（未使用则为 0）
    pub fn quantity_of(&self, size: u64) -> u64 {
        self.packs.get(&size).copied().unwrap_or(0)
    }

    /// 超发件数
    pub fn overshoot(&self) -> u64 {
        self.total_items.saturating_sub(self.order_amount)
    }

    /// 按规格从大到小迭代
    pub fn packs_desc(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.packs.iter().rev().map(|(&size, &qty)| (size, qty))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_size_set_sorted_desc() {
        let set = PackSizeSet::from_validated(vec![500, 250, 5000, 1000]);
        assert_eq!(set.as_slice(), &[5000, 1000, 500, 250]);
        assert_eq!(set.max_size(), Some(5000));
        assert!(set.contains(250));
        assert!(!set.contains(251));
        assert_eq!(set.to_string(), "[5000,1000,500,250]");
    }

    #[test]
    fn test_empty_set() {
        let set = PackSizeSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.max_size(), None);
        assert_eq!(serde_json::to_string(&set).unwrap(), "[]");
    }

    #[test]
    fn test_plan_drops_zero_quantities() {
        let plan = FulfillmentPlan::from_counts(501, vec![(500, 1), (250, 1), (1000, 0)]);
        assert_eq!(plan.packs.len(), 2);
        assert_eq!(plan.total_items, 750);
        assert_eq!(plan.total_packs, 2);
        assert_eq!(plan.overshoot(), 249);
        assert_eq!(plan.quantity_of(1000), 0);
        assert_eq!(plan.packs_desc().collect::<Vec<_>>(), vec![(500, 1), (250, 1)]);
    }
}
