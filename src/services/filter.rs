//! # 订单搜索与筛选
//!
//! 纯函数：`(订单列表, 搜索词, 状态筛选) → 筛选后的订单列表`。
//!
//! ## 匹配规则
//! - 搜索词去除首尾空白并小写化后，与订单的 `id`、`customerName`、`styleCode`、
//!   `productName` 逐个字段做子串匹配，任一字段包含即视为命中
//! - 空搜索词命中所有订单
//! - 状态筛选为 `ALL` 时不限制状态，否则要求状态完全相等
//! - 两个条件取逻辑与，输出保持输入顺序
//!
//! 子串匹配使用 `memchr::memmem::Finder`，同一个搜索词只构建一次查找器。

use memchr::memmem::Finder;

use crate::models::order::{Order, StatusFilter};

/// 筛选订单列表
///
/// # 参数
/// - `orders` - 待筛选的订单（通常为 `OrderStore::list()`）
/// - `query` - 用户输入的搜索词
/// - `status` - 状态筛选
///
/// # 返回值
/// 命中的订单克隆，顺序与输入一致
pub fn filter_orders(orders: &[Order], query: &str, status: StatusFilter) -> Vec<Order> {
    let needle = query.trim().to_lowercase();
    let finder = Finder::new(needle.as_bytes());

    orders
        .iter()
        .filter(|order| status.matches(order.status))
        .filter(|order| matches_query(order, &finder))
        .cloned()
        .collect()
}

/// 判断订单是否有任一可搜索字段包含搜索词
fn matches_query(order: &Order, finder: &Finder<'_>) -> bool {
    if finder.needle().is_empty() {
        return true;
    }

    [
        &order.id,
        &order.customer_name,
        &order.style_code,
        &order.product_name,
    ]
    .into_iter()
    .any(|field| finder.find(field.to_lowercase().as_bytes()).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::{seed_orders, OrderStatus};

    fn ids(orders: &[Order]) -> Vec<&str> {
        orders.iter().map(|o| o.id.as_str()).collect()
    }

    #[test]
    fn test_style_code_query_is_case_insensitive() {
        let seeds = seed_orders();
        let result = filter_orders(&seeds, "csl-dx", StatusFilter::All);
        assert_eq!(ids(&result), vec!["ORD-2024-001"]);
        assert_eq!(result[0].style_code, "CSL-DX-101");
    }

    #[test]
    fn test_empty_query_with_status() {
        let seeds = seed_orders();
        let result = filter_orders(&seeds, "", StatusFilter::Only(OrderStatus::Processing));
        assert_eq!(ids(&result), vec!["ORD-2024-001", "ORD-2024-012"]);
    }

    #[test]
    fn test_empty_query_all_returns_everything_in_order() {
        let seeds = seed_orders();
        let result = filter_orders(&seeds, "   ", StatusFilter::All);
        assert_eq!(result, seeds);
    }

    #[test]
    fn test_query_is_trimmed_and_matches_any_field() {
        let seeds = seed_orders();

        // customerName
        let by_customer = filter_orders(&seeds, "  secure homes ", StatusFilter::All);
        assert_eq!(ids(&by_customer), vec!["ORD-2024-009"]);

        // productName
        let by_product = filter_orders(&seeds, "walnut", StatusFilter::All);
        assert_eq!(ids(&by_product), vec!["ORD-2024-012"]);

        // id
        let by_id = filter_orders(&seeds, "ord-2024-00", StatusFilter::All);
        assert_eq!(
            ids(&by_id),
            vec!["ORD-2024-001", "ORD-2024-005", "ORD-2024-009"]
        );
    }

    #[test]
    fn test_non_searchable_fields_are_ignored() {
        let seeds = seed_orders();
        // 位置和尺寸不参与搜索
        assert!(filter_orders(&seeds, "warehouse", StatusFilter::All).is_empty());
        assert!(filter_orders(&seeds, "2100 x 900", StatusFilter::All).is_empty());
    }

    #[test]
    fn test_query_and_status_are_combined() {
        let seeds = seed_orders();
        let result = filter_orders(&seeds, "csl", StatusFilter::Only(OrderStatus::Delivered));
        assert_eq!(ids(&result), vec!["ORD-2024-009"]);

        let none = filter_orders(&seeds, "csl-dx", StatusFilter::Only(OrderStatus::Shipped));
        assert!(none.is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let seeds = seed_orders();
        for status in [
            StatusFilter::All,
            StatusFilter::Only(OrderStatus::Processing),
            StatusFilter::Only(OrderStatus::ReadyToPickUp),
        ] {
            for query in ["", "csl", "ORD-2024-01", "modern", "zzz"] {
                let once = filter_orders(&seeds, query, status);
                let twice = filter_orders(&once, query, status);
                assert_eq!(once, twice, "query={query:?} status={status:?}");
            }
        }
    }

    #[test]
    fn test_all_filter_equals_naive_substring_subset() {
        let seeds = seed_orders();
        for query in ["", "o", "CSL-", "inc", "Arts", "nothing"] {
            let needle = query.trim().to_lowercase();
            let expected: Vec<Order> = seeds
                .iter()
                .filter(|o| {
                    [&o.id, &o.customer_name, &o.style_code, &o.product_name]
                        .iter()
                        .any(|f| f.to_lowercase().contains(&needle))
                })
                .cloned()
                .collect();
            assert_eq!(filter_orders(&seeds, query, StatusFilter::All), expected);
        }
    }
}
