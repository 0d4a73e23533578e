// ==========================================
// 订单包装计算服务 - 装箱方案引擎
// ==========================================
// 职责: 给定订单数量与规格集合,计算发货包装组合
// 输入: order_amount + PackSizeSet 快照
// 输出: FulfillmentPlan
// ==========================================
// 目标（按优先级）:
// 1) 发货总件数 >= 订单数量
// 2) 发货总件数最小
// 3) 在 2) 的前提下包装数最少
// 平局: 动态规划松弛时优先保留较大规格
// ==========================================

use crate::domain::pack::{FulfillmentPlan, PackSizeSet};
use crate::engine::error::{PlannerError, PlannerResult};
use tracing::instrument;

/// 默认最大订单数量（搜索窗口与之线性相关）
pub const DEFAULT_MAX_ORDER_AMOUNT: u64 = 10_000_000;

/// 单次搜索的 cost 表内存上限（1 GiB）
const MAX_SEARCH_BYTES: u64 = 1 << 30;

/// 订单上限的硬性天花板
///
/// 搜索窗口 < 2 × 订单数量,每个总件数占一个 u32,
/// 因此窗口内存不超过 MAX_SEARCH_BYTES,包装数也不会溢出 u32。
pub const MAX_SUPPORTED_ORDER_AMOUNT: u64 =
    MAX_SEARCH_BYTES / (2 * std::mem::size_of::<u32>() as u64);

/// 不可达标记
const UNREACHABLE: u32 = u32::MAX;

// ==========================================
// PackPlanner - 装箱方案引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct PackPlanner {
    max_order_amount: u64,
}

/// 有界搜索的结果（仅含小于订单数量的规格）
struct SearchOutcome {
    total_items: u64,
    counts: Vec<(u64, u64)>,
}

impl PackPlanner {
    /// 创建引擎（默认订单上限）
    pub fn new() -> Self {
        Self {
            max_order_amount: DEFAULT_MAX_ORDER_AMOUNT,
        }
    }

    /// 指定订单上限（超过 MAX_SUPPORTED_ORDER_AMOUNT 时截断）
    pub fn with_max_order_amount(max_order_amount: u64) -> Self {
        Self {
            max_order_amount: max_order_amount.min(MAX_SUPPORTED_ORDER_AMOUNT),
        }
    }

    pub fn max_order_amount(&self) -> u64 {
        self.max_order_amount
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算装箱方案
    ///
    /// 规格分两类处理:
    /// - 覆盖规格（size >= 订单数量）: 只需考虑其中最小的一个,单独一包即可满足订单,
    ///   任何含更大规格的组合总件数都更多
    /// - 部分规格（size < 订单数量）: 在 [0, 订单数量 + 最大部分规格) 上做有界动态规划
    ///
    /// 两者取总件数更小者; 相等时覆盖规格只用一包,必然胜出。
    /// 搜索窗口因此不超过 2 × 订单数量,与规格本身的大小无关。
    ///
    /// # 参数
    /// - `order_amount`: 订单数量（必须 > 0）
    /// - `sizes`: 规格快照（不可为空）
    ///
    /// # 返回
    /// - Ok(FulfillmentPlan): 完整方案
    /// - Err(PlannerError): 校验失败,无部分结果
    #[instrument(skip(self, sizes), fields(pack_sizes = sizes.len()))]
    pub fn compute(&self, order_amount: i64, sizes: &PackSizeSet) -> PlannerResult<FulfillmentPlan> {
        if order_amount <= 0 {
            return Err(PlannerError::InvalidOrderAmount(order_amount));
        }
        if sizes.is_empty() {
            return Err(PlannerError::NoPackSizesConfigured);
        }
        let order = order_amount as u64;
        if order > self.max_order_amount {
            return Err(PlannerError::OrderAmountTooLarge {
                order_amount: order,
                limit: self.max_order_amount,
            });
        }

        let covering = sizes.as_slice().iter().copied().filter(|&s| s >= order).min();
        let partial: Vec<u64> = sizes
            .as_slice()
            .iter()
            .copied()
            .filter(|&s| s < order)
            .collect();

        let searched = if partial.is_empty() {
            None
        } else {
            Some(search_window(order, &partial)?)
        };

        let plan = match (covering, searched) {
            (Some(single), Some(found)) if found.total_items < single => {
                FulfillmentPlan::from_counts(order, found.counts)
            }
            (Some(single), _) => FulfillmentPlan::from_counts(order, [(single, 1)]),
            (None, Some(found)) => FulfillmentPlan::from_counts(order, found.counts),
            (None, None) => return Err(PlannerError::InsufficientPackSizes),
        };

        tracing::debug!(
            total_items = plan.total_items,
            total_packs = plan.total_packs,
            overshoot = plan.overshoot(),
            "装箱方案计算完成"
        );
        Ok(plan)
    }
}

impl Default for PackPlanner {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 有界动态规划
// ==========================================

/// 在 [0, order + max_size) 内求最小可达总件数及其最少包装数
///
/// `sizes` 必须非空且降序; 所有元素 < order。
/// cost[t] 只依赖更小的总件数,因此遇到第一个 >= order 的可达总件数即可停止。
/// 不单独记录"最后加入的规格": 回溯时按降序取第一个满足
/// cost[t - size] + 1 == cost[t] 的规格,与松弛时严格小于保留的规格一致。
fn search_window(order: u64, sizes: &[u64]) -> PlannerResult<SearchOutcome> {
    let max_size = sizes[0];
    let window = order
        .checked_add(max_size)
        .and_then(|w| usize::try_from(w).ok())
        .ok_or(PlannerError::InsufficientPackSizes)?;
    let target = order as usize;

    let mut cost = vec![UNREACHABLE; window];
    cost[0] = 0;

    let mut best = None;
    for total in 1..window {
        for &size in sizes {
            let size = size as usize;
            if size > total {
                continue;
            }
            let prev = cost[total - size];
            if prev == UNREACHABLE {
                continue;
            }
            // 严格小于: 先遍历到的较大规格在平局时保留
            if prev + 1 < cost[total] {
                cost[total] = prev + 1;
            }
        }

        if total >= target && cost[total] != UNREACHABLE {
            best = Some(total);
            break;
        }
    }

    let best = best.ok_or(PlannerError::InsufficientPackSizes)?;

    let mut quantities = vec![0u64; sizes.len()];
    let mut remaining = best;
    while remaining > 0 {
        let idx = last_pack_index(&cost, sizes, remaining)
            .ok_or(PlannerError::InsufficientPackSizes)?;
        quantities[idx] += 1;
        remaining -= sizes[idx] as usize;
    }

    Ok(SearchOutcome {
        total_items: best as u64,
        counts: sizes.iter().copied().zip(quantities).collect(),
    })
}

/// 到达 total 时最后加入的规格下标（降序中第一个取得最少包装数的规格）
fn last_pack_index(cost: &[u32], sizes: &[u64], total: usize) -> Option<usize> {
    let target = cost[total];
    sizes.iter().position(|&size| {
        let size = size as usize;
        size <= total && cost[total - size] != UNREACHABLE && cost[total - size] + 1 == target
    })
}
