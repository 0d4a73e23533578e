// ==========================================
// 并发控制测试
// ==========================================
// 职责: 验证规格仓储在并发读写下不出现半新半旧的集合
// ==========================================


use order_packs_calculator::engine::PackPlanner;
use order_packs_calculator::repository::{PackSizeRegistry, PackSizeStore};
use std::sync::Arc;
use std::thread;

const SET_A: [i64; 3] = [250, 500, 1000];
const SET_B: [i64; 4] = [23, 31, 53, 97];

#[test]
fn test_readers_never_observe_torn_sets() {
    let registry = Arc::new(PackSizeRegistry::with_sizes(&SET_A).unwrap());
    let expected_a = test_helpers::pack_sizes(&SET_A);
    let expected_b = test_helpers::pack_sizes(&SET_B);

    let writers: Vec<_> = (0..2)
        .map(|w| {
            let registry = registry.clone();
            thread::spawn(move || {
                for i in 0..500 {
                    let candidate: &[i64] = if (i + w) % 2 == 0 { &SET_A } else { &SET_B };
                    registry.replace(candidate).unwrap();
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            let expected_a = expected_a.clone();
            let expected_b = expected_b.clone();
            thread::spawn(move || {
                for _ in 0..2000 {
                    let seen = registry.load();
                    assert!(
                        seen == expected_a || seen == expected_b,
                        "torn set observed: {}",
                        seen
                    );
                }
            })
        })
        .collect();

    for handle in writers.into_iter().chain(readers) {
        handle.join().unwrap();
    }

    // 1 次初始化 + 2×500 次替换
    assert_eq!(registry.revision(), 1001);
    let last = registry.load();
    assert!(last == expected_a || last == expected_b);
}

#[test]
fn test_concurrent_compute_on_shared_snapshot() {
    let registry = Arc::new(PackSizeRegistry::with_sizes(&SET_B).unwrap());
    let planner = Arc::new(PackPlanner::new());
    let baseline = planner.compute(12_345, &registry.load()).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = registry.clone();
            let planner = planner.clone();
            thread::spawn(move || planner.compute(12_345, &registry.load()).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), baseline);
    }
}

#[test]
fn test_failed_replace_under_contention_keeps_valid_set() {
    let registry = Arc::new(PackSizeRegistry::with_sizes(&SET_A).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = registry.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    assert!(registry.replace(&[100, 0]).is_err());
                    assert!(registry.replace(&[]).is_err());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.revision(), 1);
    assert_eq!(registry.load().as_slice(), &[1000, 500, 250]);
}
