//! 查询构建
//!
//! 把 `SearchCriteria` 翻译为存储无关的 `RemoteQuery`。

use crate::models::company::{GOOD_CREDIT_RATINGS, columns};
use crate::models::criteria::{CreditRating, SearchCriteria};
use crate::models::query::{Comparison, Predicate, RemoteQuery};

/// 产品标签匹配的列
pub const PRODUCT_COLUMNS: [&str; 2] = [columns::MAIN_PRODUCTS, columns::KEYWORDS];
/// 地区标签匹配的列
pub const LOCATION_COLUMNS: [&str; 2] = [columns::PROVINCE, columns::CITY];
/// 行业标签匹配的列
pub const INDUSTRY_COLUMNS: [&str; 2] = [columns::CATEGORY, columns::KEYWORDS];
/// 公司名称匹配的列
pub const NAME_COLUMNS: [&str; 2] = [columns::NAME_EN, columns::NAME_CN];

/// 候选池放大倍数，为评分排序留出余量
pub const CANDIDATE_POOL_FACTOR: usize = 2;

/// 根据条件构建远程查询，请求 `2 × limit` 行
pub fn build(criteria: &SearchCriteria, limit: usize) -> RemoteQuery {
    let mut query = RemoteQuery::new(limit.saturating_mul(CANDIDATE_POOL_FACTOR));

    for (tags, cols) in [
        (&criteria.products, PRODUCT_COLUMNS),
        (&criteria.location, LOCATION_COLUMNS),
        (&criteria.industry, INDUSTRY_COLUMNS),
    ] {
        if !tags.is_empty() {
            query = query.filter(Predicate::AnyContains {
                columns: cols.to_vec(),
                needles: tags.iter().cloned().collect(),
            });
        }
    }

    if let Some(range) = criteria.employee_range {
        query = query.filter(Predicate::Compare {
            column: columns::EMPLOYEE_COUNT,
            op: Comparison::from(range.operator),
            value: range.count,
        });
    }

    if let Some(year) = criteria.founded_after {
        query = query.filter(Predicate::Compare {
            column: columns::ESTABLISHMENT_YEAR,
            op: Comparison::Gte,
            value: i64::from(year),
        });
    }

    if criteria.has_website == Some(true) {
        query = query.filter(Predicate::NotNull {
            column: columns::WEBSITE,
        });
    }

    if criteria.credit_rating == Some(CreditRating::Good) {
        query = query.filter(Predicate::In {
            column: columns::CREDIT_RATING,
            values: GOOD_CREDIT_RATINGS.iter().map(|r| r.to_string()).collect(),
        });
    }

    if let Some(name) = &criteria.company_name {
        query = query.filter(Predicate::AnyContains {
            columns: NAME_COLUMNS.to_vec(),
            needles: vec![name.clone()],
        });
    }

    query
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::company::Company;
    use crate::models::criteria::{EmployeeOperator, EmployeeRange};
    use std::collections::BTreeSet;

    #[test]
    fn test_empty_criteria_has_no_filters() {
        let query = build(&SearchCriteria::default(), 10);
        assert!(query.filters.is_empty());
        assert_eq!(query.limit, 20);
    }

    #[test]
    fn test_categories_become_or_groups() {
        let criteria = SearchCriteria {
            products: BTreeSet::from(["pvc".to_string(), "flooring".to_string()]),
            location: BTreeSet::from(["Guangdong".to_string()]),
            ..Default::default()
        };

        let query = build(&criteria, 5);
        assert_eq!(query.limit, 10);
        assert_eq!(
            query.filters,
            vec![
                Predicate::AnyContains {
                    columns: vec![columns::MAIN_PRODUCTS, columns::KEYWORDS],
                    needles: vec!["flooring".into(), "pvc".into()],
                },
                Predicate::AnyContains {
                    columns: vec![columns::PROVINCE, columns::CITY],
                    needles: vec!["Guangdong".into()],
                },
            ]
        );
    }

    #[test]
    fn test_scalar_criteria() {
        let criteria = SearchCriteria {
            founded_after: Some(2010),
            has_website: Some(true),
            credit_rating: Some(CreditRating::Good),
            company_name: Some("sunrise".into()),
            ..Default::default()
        };

        let query = build(&criteria, 10);
        assert!(query.filters.contains(&Predicate::Compare {
            column: columns::ESTABLISHMENT_YEAR,
            op: Comparison::Gte,
            value: 2010,
        }));
        assert!(query.filters.contains(&Predicate::NotNull {
            column: columns::WEBSITE
        }));
        assert!(query.filters.contains(&Predicate::In {
            column: columns::CREDIT_RATING,
            values: vec!["A".into(), "AA".into(), "AAA".into()],
        }));
        assert!(query.filters.contains(&Predicate::AnyContains {
            columns: vec![columns::NAME_EN, columns::NAME_CN],
            needles: vec!["sunrise".into()],
        }));
    }

    #[test]
    fn test_medium_credit_and_false_website_add_no_filter() {
        let criteria = SearchCriteria {
            credit_rating: Some(CreditRating::Medium),
            has_website: Some(false),
            ..Default::default()
        };
        assert!(build(&criteria, 10).filters.is_empty());
    }

    /// "at most" 与 "less than" 在查询中保持不同的比较符（<= 与 <），
    /// 与评分阶段的复核一致。
    #[test]
    fn test_at_most_and_less_than_stay_distinct() {
        let at_most = SearchCriteria {
            employee_range: Some(EmployeeRange::new(EmployeeOperator::AtMost, 100)),
            ..Default::default()
        };
        let less_than = SearchCriteria {
            employee_range: Some(EmployeeRange::new(EmployeeOperator::LessThan, 100)),
            ..Default::default()
        };

        let boundary = Company {
            employee_count: Some(100),
            ..Default::default()
        };

        assert!(build(&at_most, 10).matches(&boundary));
        assert!(!build(&less_than, 10).matches(&boundary));
    }
}
