//! 相关性评分
//!
//! 固定权重的加法评分：各信号独立计分，互不短路。

use std::collections::BTreeSet;

use crate::models::company::Company;
use crate::models::criteria::{CreditRating, SearchCriteria};
use crate::models::search::{MatchedField, ScoredCompany};

pub const QUERY_WORD_POINTS: u32 = 5;
pub const PRODUCT_POINTS: u32 = 10;
pub const LOCATION_POINTS: u32 = 8;
pub const EMPLOYEE_POINTS: u32 = 6;
pub const CREDIT_POINTS: u32 = 7;
pub const WEBSITE_POINTS: u32 = 3;

const HIGH_RELEVANCE_ABOVE: u32 = 15;
const MEDIUM_RELEVANCE_ABOVE: u32 = 8;

/// 查询中长度大于 2 的词（小写）
pub fn query_words(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split_whitespace()
        .filter(|word| word.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

/// 对单个公司评分
pub fn score(company: &Company, criteria: &SearchCriteria, query: &str) -> ScoredCompany {
    let words = query_words(query);
    let searchable = company.searchable_text();
    let products = company.products_lower();
    let province = company.province.as_deref().unwrap_or("").to_lowercase();

    let mut total = 0u32;

    total += QUERY_WORD_POINTS * count_hits(words.iter(), &searchable);
    total += PRODUCT_POINTS * count_hits(criteria.products.iter(), &products);
    total += LOCATION_POINTS * count_hits(criteria.location.iter(), &province);

    if let (Some(range), Some(employees)) = (criteria.employee_range, company.employee_count) {
        if range.contains(employees) {
            total += EMPLOYEE_POINTS;
        }
    }

    if criteria.credit_rating == Some(CreditRating::Good) && company.has_good_credit() {
        total += CREDIT_POINTS;
    }

    if criteria.has_website == Some(true) && company.has_website() {
        total += WEBSITE_POINTS;
    }

    let matched_fields = matched_fields(company, criteria, &words);
    let explanation = explain(total, &matched_fields);

    ScoredCompany {
        company: company.clone(),
        score: total,
        matched_fields,
        explanation,
    }
}

fn count_hits<'a>(needles: impl Iterator<Item = &'a String>, haystack: &str) -> u32 {
    needles
        .filter(|needle| haystack.contains(needle.to_lowercase().as_str()))
        .count() as u32
}

/// 重新核对哪些字段确实命中，与分数计算相互独立
fn matched_fields(
    company: &Company,
    criteria: &SearchCriteria,
    words: &[String],
) -> BTreeSet<MatchedField> {
    let mut fields = BTreeSet::new();

    let products = company.products_lower();
    if criteria
        .products
        .iter()
        .any(|tag| products.contains(&tag.to_lowercase()))
    {
        fields.insert(MatchedField::Products);
    }

    let province = company.province.as_deref().unwrap_or("").to_lowercase();
    if criteria
        .location
        .iter()
        .any(|tag| province.contains(&tag.to_lowercase()))
    {
        fields.insert(MatchedField::Location);
    }

    let names = company.names_lower();
    let name_hit = criteria
        .company_name
        .as_ref()
        .is_some_and(|name| names.contains(&name.to_lowercase()))
        || words.iter().any(|word| names.contains(word.as_str()));
    if name_hit {
        fields.insert(MatchedField::Name);
    }

    fields
}

/// 生成可读的评分说明
pub fn explain(score: u32, matched_fields: &BTreeSet<MatchedField>) -> String {
    let bucket = if score > HIGH_RELEVANCE_ABOVE {
        "High relevance"
    } else if score > MEDIUM_RELEVANCE_ABOVE {
        "Medium relevance"
    } else {
        "Low relevance"
    };

    if matched_fields.is_empty() {
        format!("{} (score {})", bucket, score)
    } else {
        let labels: Vec<&str> = matched_fields.iter().map(|f| f.as_str()).collect();
        format!("{} (score {}); matched: {}", bucket, score, labels.join(", "))
    }
}
