use serde::{Deserialize, Serialize};

/// 公司表字段名
pub mod columns {
    pub const ID: &str = "id";
    pub const NAME_EN: &str = "company_name_en";
    pub const NAME_CN: &str = "company_name_cn";
    pub const PROVINCE: &str = "province";
    pub const CITY: &str = "city";
    pub const ESTABLISHMENT_YEAR: &str = "establishment_year";
    pub const EMPLOYEE_COUNT: &str = "employee_count";
    pub const CATEGORY: &str = "company_category";
    pub const MAIN_PRODUCTS: &str = "main_products";
    pub const KEYWORDS: &str = "keywords";
    pub const CREDIT_RATING: &str = "credit_rating";
    pub const WEBSITE: &str = "official_website";
    pub const PHONE: &str = "contact_phone";
    pub const EMAIL: &str = "contact_email";
    pub const ADDRESS: &str = "address";
}

/// 被视为"良好"的信用评级
pub const GOOD_CREDIT_RATINGS: [&str; 3] = ["A", "AA", "AAA"];

/// 制造企业记录
///
/// 由数据存储分配 `id`，核心逻辑只读不写。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Company {
    pub id: i64,
    pub company_name_en: Option<String>,
    pub company_name_cn: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub establishment_year: Option<i32>,
    pub employee_count: Option<i64>,
    pub company_category: Option<String>,
    pub main_products: Option<String>,
    pub keywords: Option<String>,
    pub credit_rating: Option<String>,
    pub official_website: Option<String>,
    pub contact_phone: Option<String>,
    pub contact_email: Option<String>,
    pub address: Option<String>,
}

impl Company {
    /// 按列名读取文本字段
    pub fn text(&self, column: &str) -> Option<&str> {
        let value = match column {
            columns::NAME_EN => &self.company_name_en,
            columns::NAME_CN => &self.company_name_cn,
            columns::PROVINCE => &self.province,
            columns::CITY => &self.city,
            columns::CATEGORY => &self.company_category,
            columns::MAIN_PRODUCTS => &self.main_products,
            columns::KEYWORDS => &self.keywords,
            columns::CREDIT_RATING => &self.credit_rating,
            columns::WEBSITE => &self.official_website,
            columns::PHONE => &self.contact_phone,
            columns::EMAIL => &self.contact_email,
            columns::ADDRESS => &self.address,
            _ => return None,
        };
        value.as_deref()
    }

    /// 按列名读取数值字段
    pub fn number(&self, column: &str) -> Option<i64> {
        match column {
            columns::ID => Some(self.id),
            columns::EMPLOYEE_COUNT => self.employee_count,
            columns::ESTABLISHMENT_YEAR => self.establishment_year.map(i64::from),
            _ => None,
        }
    }

    /// 中英文名称拼接（小写）
    pub fn names_lower(&self) -> String {
        join_lower(&[&self.company_name_en, &self.company_name_cn])
    }

    /// 主营产品与关键词拼接（小写）
    pub fn products_lower(&self) -> String {
        join_lower(&[&self.main_products, &self.keywords])
    }

    /// 名称、产品、关键词、类别拼接后的可检索文本（小写）
    pub fn searchable_text(&self) -> String {
        join_lower(&[
            &self.company_name_en,
            &self.company_name_cn,
            &self.main_products,
            &self.keywords,
            &self.company_category,
        ])
    }

    /// 信用评级是否为 A 级及以上
    pub fn has_good_credit(&self) -> bool {
        self.credit_rating
            .as_deref()
            .map(|rating| GOOD_CREDIT_RATINGS.contains(&rating.trim()))
            .unwrap_or(false)
    }

    /// 是否有非空官网
    pub fn has_website(&self) -> bool {
        self.official_website
            .as_deref()
            .is_some_and(|site| !site.trim().is_empty())
    }
}

fn join_lower(fields: &[&Option<String>]) -> String {
    fields
        .iter()
        .filter_map(|field| field.as_deref())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
