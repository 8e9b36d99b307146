use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 员工人数比较运算符
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeOperator {
    /// 不少于
    AtLeast,
    /// 不多于
    AtMost,
    /// 少于
    LessThan,
}

impl EmployeeOperator {
    /// 判断人数是否满足条件
    pub fn holds(self, value: i64, threshold: i64) -> bool {
        match self {
            EmployeeOperator::AtLeast => value >= threshold,
            EmployeeOperator::AtMost => value <= threshold,
            EmployeeOperator::LessThan => value < threshold,
        }
    }
}

/// 员工人数范围
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmployeeRange {
    pub operator: EmployeeOperator,
    pub count: i64,
}

impl EmployeeRange {
    pub fn new(operator: EmployeeOperator, count: i64) -> Self {
        Self { operator, count }
    }

    pub fn contains(&self, employees: i64) -> bool {
        self.operator.holds(employees, self.count)
    }
}

/// 信用评级档位
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CreditRating {
    Good,
    Medium,
    Low,
}

/// 结构化搜索条件
///
/// 列表字段默认为空集合；缺失的条件表示"不过滤"。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchCriteria {
    pub products: BTreeSet<String>,
    pub location: BTreeSet<String>,
    pub industry: BTreeSet<String>,
    pub employee_range: Option<EmployeeRange>,
    pub credit_rating: Option<CreditRating>,
    pub founded_after: Option<i32>,
    pub has_website: Option<bool>,
    pub company_name: Option<String>,
}

impl SearchCriteria {
    /// 是否没有任何条件
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// 合并语言模型给出的部分条件
    ///
    /// 列表字段取并集；标量字段只填补关键词提取留下的空缺。
    pub fn merge(&mut self, other: SearchCriteria) {
        self.products.extend(other.products);
        self.location.extend(other.location);
        self.industry.extend(other.industry);
        self.employee_range = self.employee_range.or(other.employee_range);
        self.credit_rating = self.credit_rating.or(other.credit_rating);
        self.founded_after = self.founded_after.or(other.founded_after);
        self.has_website = self.has_website.or(other.has_website);
        if self.company_name.is_none() {
            self.company_name = other.company_name;
        }
    }
}
