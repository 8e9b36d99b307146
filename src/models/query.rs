//! 远程查询描述
//!
//! 与具体存储无关的过滤条件树：可渲染为 PostgREST 查询参数，也可在内存中对记录求值。

use serde::Serialize;

use crate::models::company::Company;
use crate::models::criteria::EmployeeOperator;

/// 数值比较
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    Gte,
    Lte,
    Lt,
}

impl Comparison {
    pub fn as_postgrest(self) -> &'static str {
        match self {
            Comparison::Gte => "gte",
            Comparison::Lte => "lte",
            Comparison::Lt => "lt",
        }
    }

    pub fn holds(self, value: i64, threshold: i64) -> bool {
        match self {
            Comparison::Gte => value >= threshold,
            Comparison::Lte => value <= threshold,
            Comparison::Lt => value < threshold,
        }
    }
}

impl From<EmployeeOperator> for Comparison {
    fn from(op: EmployeeOperator) -> Self {
        match op {
            EmployeeOperator::AtLeast => Comparison::Gte,
            EmployeeOperator::AtMost => Comparison::Lte,
            EmployeeOperator::LessThan => Comparison::Lt,
        }
    }
}

/// 单个过滤谓词
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// 任一列包含任一关键词（不区分大小写）
    AnyContains {
        columns: Vec<&'static str>,
        needles: Vec<String>,
    },
    /// 数值列比较
    Compare {
        column: &'static str,
        op: Comparison,
        value: i64,
    },
    /// 列非空
    NotNull { column: &'static str },
    /// 列值属于集合
    In {
        column: &'static str,
        values: Vec<String>,
    },
}

impl Predicate {
    /// 在内存中对记录求值
    pub fn matches(&self, company: &Company) -> bool {
        match self {
            Predicate::AnyContains { columns, needles } => columns.iter().any(|column| {
                company.text(column).is_some_and(|text| {
                    let text = text.to_lowercase();
                    needles
                        .iter()
                        .any(|needle| text.contains(&needle.to_lowercase()))
                })
            }),
            Predicate::Compare { column, op, value } => company
                .number(column)
                .is_some_and(|actual| op.holds(actual, *value)),
            Predicate::NotNull { column } => company.text(column).is_some(),
            Predicate::In { column, values } => company
                .text(column)
                .is_some_and(|actual| values.iter().any(|v| v == actual.trim())),
        }
    }

    fn or_terms(&self) -> Option<String> {
        match self {
            Predicate::AnyContains { columns, needles } => {
                let terms: Vec<String> = columns
                    .iter()
                    .flat_map(|column| {
                        needles
                            .iter()
                            .map(move |needle| format!("{}.ilike.{}", column, ilike_value(needle)))
                    })
                    .collect();
                Some(terms.join(","))
            }
            _ => None,
        }
    }
}

/// 发往数据存储的查询
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct RemoteQuery {
    /// AND 组合的谓词
    pub filters: Vec<Predicate>,
    /// 最大返回行数
    pub limit: usize,
}

impl RemoteQuery {
    pub fn new(limit: usize) -> Self {
        Self {
            filters: Vec::new(),
            limit,
        }
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filters.push(predicate);
        self
    }

    /// 记录是否满足全部谓词
    pub fn matches(&self, company: &Company) -> bool {
        self.filters.iter().all(|predicate| predicate.matches(company))
    }

    /// 渲染为 PostgREST 查询参数
    pub fn to_postgrest_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];

        let or_groups: Vec<String> = self.filters.iter().filter_map(Predicate::or_terms).collect();
        match or_groups.len() {
            0 => {}
            1 => params.push(("or".to_string(), format!("({})", or_groups[0]))),
            _ => {
                let nested: Vec<String> = or_groups.iter().map(|g| format!("or({})", g)).collect();
                params.push(("and".to_string(), format!("({})", nested.join(","))));
            }
        }

        for predicate in &self.filters {
            match predicate {
                Predicate::AnyContains { .. } => {}
                Predicate::Compare { column, op, value } => {
                    params.push((column.to_string(), format!("{}.{}", op.as_postgrest(), value)));
                }
                Predicate::NotNull { column } => {
                    params.push((column.to_string(), "not.is.null".to_string()));
                }
                Predicate::In { column, values } => {
                    params.push((column.to_string(), format!("in.({})", values.join(","))));
                }
            }
        }

        params.push(("order".to_string(), "id.asc".to_string()));
        params.push(("limit".to_string(), self.limit.to_string()));
        params
    }
}

/// PostgREST 逻辑组内的保留字符需要加引号
fn ilike_value(needle: &str) -> String {
    let pattern = format!("*{}*", needle.replace('*', ""));
    if pattern.contains([',', '.', ':', '(', ')', '"', ' ']) {
        format!("\"{}\"", pattern.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        pattern
    }
}
