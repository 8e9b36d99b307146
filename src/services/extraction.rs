//! 搜索条件提取服务
//!
//! 基于静态关键词词典和正则表达式，将自然语言查询（西班牙语、英语、中文）
//! 解析为结构化的 `SearchCriteria`，可选地调用语言模型补充条件。

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::models::criteria::{CreditRating, EmployeeOperator, EmployeeRange, SearchCriteria};
use crate::services::assist::CriteriaAssist;

/// 标准标签 → 触发词
type Dictionary = &'static [(&'static str, &'static [&'static str])];

const PRODUCT_KEYWORDS: Dictionary = &[
    ("led", &["led"]),
    (
        "lighting",
        &["lighting", "iluminación", "iluminacion", "lámpara", "lampara", "照明", "灯具"],
    ),
    ("pvc", &["pvc"]),
    ("flooring", &["flooring", "floor", "piso", "suelo", "地板"]),
    ("furniture", &["furniture", "mueble", "家具"]),
    ("textile", &["textile", "textil", "fabric", "tela", "纺织", "面料"]),
    ("electronics", &["electronic", "electrónic", "电子"]),
    ("machinery", &["machinery", "machine", "maquinaria", "máquina", "机械", "设备"]),
    ("solar", &["solar", "photovoltaic", "fotovoltaic", "光伏", "太阳能"]),
    ("battery", &["battery", "batería", "bateria", "电池"]),
    ("packaging", &["packaging", "embalaje", "envase", "包装"]),
    ("plastic", &["plastic", "plástico", "plastico", "塑料"]),
    ("steel", &["steel", "acero", "钢材", "不锈钢"]),
    ("ceramic", &["ceramic", "cerámic", "ceramica", "tile", "azulejo", "陶瓷", "瓷砖"]),
    ("toys", &["toy", "juguete", "玩具"]),
    ("auto parts", &["auto parts", "autopartes", "repuestos", "汽车配件", "汽配"]),
];

const LOCATION_KEYWORDS: Dictionary = &[
    (
        "Guangdong",
        &[
            "guangdong", "广东", "cantón", "shenzhen", "深圳", "guangzhou", "广州", "dongguan",
            "东莞", "foshan", "佛山",
        ],
    ),
    (
        "Zhejiang",
        &["zhejiang", "浙江", "ningbo", "宁波", "hangzhou", "杭州", "yiwu", "义乌", "wenzhou", "温州"],
    ),
    ("Jiangsu", &["jiangsu", "江苏", "suzhou", "苏州", "nanjing", "南京", "wuxi", "无锡"]),
    ("Shandong", &["shandong", "山东", "qingdao", "青岛", "jinan", "济南"]),
    ("Fujian", &["fujian", "福建", "xiamen", "厦门", "fuzhou", "福州"]),
    ("Shanghai", &["shanghai", "shanghái", "上海"]),
    ("Beijing", &["beijing", "pekín", "pekin", "北京"]),
    ("Tianjin", &["tianjin", "天津"]),
    ("Hebei", &["hebei", "河北"]),
    ("Henan", &["henan", "河南"]),
    ("Anhui", &["anhui", "安徽"]),
    ("Sichuan", &["sichuan", "四川", "chengdu", "成都"]),
];

const INDUSTRY_KEYWORDS: Dictionary = &[
    ("electronics", &["electrónica", "electronica", "electronics", "电子"]),
    (
        "construction",
        &["construcción", "construccion", "construction", "building material", "建材", "建筑"],
    ),
    ("textile", &["textil", "textile", "garment", "ropa", "服装", "纺织"]),
    ("chemical", &["chemical", "químic", "quimic", "化工"]),
    ("automotive", &["automotive", "automotriz", "automóvil", "汽车"]),
    ("energy", &["energy", "energía", "energia", "能源"]),
    ("lighting", &["lighting", "iluminación", "iluminacion", "照明"]),
    ("furniture", &["furniture", "mueble", "家具"]),
    ("machinery", &["machinery", "maquinaria", "机械"]),
];

const EMPLOYEE_OPERATORS: &[(EmployeeOperator, &[&str])] = &[
    (
        EmployeeOperator::AtLeast,
        &[
            "más de", "mas de", "more than", "over", "at least", "al menos", "mínimo", "minimo",
            "超过", "至少", "不少于", "多于",
        ],
    ),
    (
        EmployeeOperator::AtMost,
        &[
            "no más de", "no mas de", "at most", "up to", "como máximo", "como maximo", "hasta",
            "不超过", "最多",
        ],
    ),
    (
        EmployeeOperator::LessThan,
        &["menos de", "less than", "fewer than", "under", "below", "少于", "不到", "低于"],
    ),
];

const CREDIT_PHRASES: &[(CreditRating, &[&str])] = &[
    (
        CreditRating::Good,
        &[
            "buena calificación", "buena calificacion", "buen crédito", "buen credito",
            "excelente calificación", "alta calificación", "good credit", "good rating",
            "high credit", "excellent credit", "信用好", "信用良好", "信用优秀", "高信用",
        ],
    ),
    (
        CreditRating::Medium,
        &[
            "calificación media", "calificacion media", "crédito medio", "credito medio",
            "medium credit", "average credit", "信用一般", "信用中等",
        ],
    ),
    (
        CreditRating::Low,
        &[
            "baja calificación", "baja calificacion", "mala calificación", "bajo crédito",
            "low credit", "poor credit", "bad credit", "信用差", "信用低",
        ],
    ),
];

const WEBSITE_PHRASES: &[&str] = &[
    "sitio web", "página web", "pagina web", "website", "web site", "官网", "网站",
];

static EMPLOYEE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let mut phrases: Vec<&str> = EMPLOYEE_OPERATORS
        .iter()
        .flat_map(|(_, phrases)| phrases.iter().copied())
        .collect();
    phrases.sort_by_key(|p| std::cmp::Reverse(p.len()));
    let alternation = phrases
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(
        r"({})\s*(\d+)\s*(?:名\s*)?(?:empleados|employees|trabajadores|workers|staff|personas|people|员工|雇员|职工|人)",
        alternation
    );
    Regex::new(&pattern).expect("employee pattern is valid")
});

static FOUNDED_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:fundad[ao]s?|establecid[ao]s?|cread[ao]s?|founded|established|incorporated)\s+(?:después de|despues de|desde|after|since)\s+(?:el\s+)?(?:año\s+)?(\d{4})",
        r"(\d{4})\s*年?\s*(?:以后|之后|后)成立",
        r"成立于\s*(\d{4})\s*年?\s*(?:以后|之后)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("founded pattern is valid"))
    .collect()
});

static COMPANY_NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?:empresa|compañía|compania)\s+(?:llamada|denominada|de nombre)\s+(.+)",
        r"(?:company|firm|manufacturer)\s+(?:named|called)\s+(.+)",
        r"(?:nombre de (?:la )?empresa|company name)\s*[:：]?\s*(.+)",
        r"名为\s*(.+?)\s*的(?:公司|企业|工厂)",
        r"(?:公司|企业)名称?\s*[:：是为]\s*(.+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("company name pattern is valid"))
    .collect()
});

/// 搜索条件提取器
#[derive(Clone)]
pub struct CriteriaExtractor {
    assist: Option<Arc<dyn CriteriaAssist>>,
    min_assist_chars: usize,
}

impl CriteriaExtractor {
    pub fn new(assist: Option<Arc<dyn CriteriaAssist>>, min_assist_chars: usize) -> Self {
        Self {
            assist,
            min_assist_chars,
        }
    }

    /// 仅使用关键词词典的提取器
    pub fn keyword_only() -> Self {
        Self::new(None, usize::MAX)
    }

    /// 提取搜索条件，永不失败
    ///
    /// 语言模型辅助出错时静默回退到关键词提取结果。
    pub async fn extract(&self, query: &str, use_assist: bool) -> SearchCriteria {
        let mut criteria = extract_basic(query);

        let Some(assist) = self.assist.as_ref() else {
            return criteria;
        };
        if !use_assist || query.trim().chars().count() <= self.min_assist_chars {
            return criteria;
        }

        match assist.suggest(query).await {
            Ok(suggested) => {
                debug!("Assist suggested criteria: {:?}", suggested);
                criteria.merge(suggested);
            }
            Err(e) => warn!("Criteria assist failed, using keyword criteria: {}", e),
        }

        criteria
    }
}

/// 基于关键词词典的提取
pub fn extract_basic(query: &str) -> SearchCriteria {
    let text = query.to_lowercase();

    SearchCriteria {
        products: match_dictionary(&text, PRODUCT_KEYWORDS),
        location: match_dictionary(&text, LOCATION_KEYWORDS),
        industry: match_dictionary(&text, INDUSTRY_KEYWORDS),
        employee_range: extract_employee_range(&text),
        credit_rating: extract_credit_rating(&text),
        founded_after: extract_founded_after(&text),
        has_website: WEBSITE_PHRASES
            .iter()
            .any(|phrase| text.contains(phrase))
            .then_some(true),
        company_name: extract_company_name(&text),
    }
}

fn match_dictionary(text: &str, dictionary: Dictionary) -> BTreeSet<String> {
    dictionary
        .iter()
        .filter(|(_, triggers)| triggers.iter().any(|t| contains_trigger(text, t)))
        .map(|(tag, _)| tag.to_string())
        .collect()
}

/// 拉丁字母触发词只在词首命中（"led" 不匹配 "called"），中文触发词按子串命中
fn contains_trigger(text: &str, trigger: &str) -> bool {
    let starts_latin = trigger.chars().next().is_some_and(is_latin_word_char);
    if !starts_latin {
        return text.contains(trigger);
    }

    text.match_indices(trigger).any(|(start, _)| {
        !text[..start]
            .chars()
            .next_back()
            .is_some_and(is_latin_word_char)
    })
}

fn is_latin_word_char(c: char) -> bool {
    c.is_alphanumeric() && !is_cjk(c)
}

fn is_cjk(c: char) -> bool {
    matches!(c, '\u{3400}'..='\u{4dbf}' | '\u{4e00}'..='\u{9fff}' | '\u{f900}'..='\u{faff}')
}

fn extract_employee_range(text: &str) -> Option<EmployeeRange> {
    let caps = EMPLOYEE_PATTERN.captures(text)?;
    let phrase = caps.get(1)?.as_str();
    let count = caps.get(2)?.as_str().parse::<i64>().ok()?;

    EMPLOYEE_OPERATORS
        .iter()
        .find(|(_, phrases)| phrases.contains(&phrase))
        .map(|(operator, _)| EmployeeRange::new(*operator, count))
}

fn extract_credit_rating(text: &str) -> Option<CreditRating> {
    CREDIT_PHRASES
        .iter()
        .find(|(_, phrases)| phrases.iter().any(|p| text.contains(p)))
        .map(|(rating, _)| *rating)
}

fn extract_founded_after(text: &str) -> Option<i32> {
    FOUNDED_PATTERNS
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn extract_company_name(text: &str) -> Option<String> {
    COMPANY_NAME_PATTERNS
        .iter()
        .find_map(|re| re.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::assist::{AssistError, MockCriteriaAssist};
    use rstest::rstest;

    #[test]
    fn test_empty_query_yields_empty_criteria() {
        let criteria = extract_basic("");
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_spanish_employee_range() {
        let criteria = extract_basic("empresas con más de 50 empleados");
        assert_eq!(
            criteria.employee_range,
            Some(EmployeeRange::new(EmployeeOperator::AtLeast, 50))
        );
    }

    #[rstest]
    #[case("fabricantes con menos de 100 empleados", EmployeeOperator::LessThan, 100)]
    #[case("suppliers with at most 200 employees", EmployeeOperator::AtMost, 200)]
    #[case("empresas con no más de 30 trabajadores", EmployeeOperator::AtMost, 30)]
    #[case("factories with more than 1000 workers", EmployeeOperator::AtLeast, 1000)]
    #[case("员工超过500人的工厂", EmployeeOperator::AtLeast, 500)]
    #[case("少于20名员工", EmployeeOperator::LessThan, 20)]
    fn test_employee_phrases(
        #[case] query: &str,
        #[case] operator: EmployeeOperator,
        #[case] count: i64,
    ) {
        let range = extract_basic(query).employee_range.unwrap();
        assert_eq!(range, EmployeeRange::new(operator, count));
    }

    #[test]
    fn test_employee_number_without_noun_is_ignored() {
        assert!(extract_basic("más de 50 productos").employee_range.is_none());
    }

    #[test]
    fn test_good_credit_phrase() {
        let criteria = extract_basic("empresas con buena calificación");
        assert_eq!(criteria.credit_rating, Some(CreditRating::Good));
    }

    #[rstest]
    #[case("proveedores con calificación media", CreditRating::Medium)]
    #[case("suppliers with poor credit", CreditRating::Low)]
    #[case("信用良好的企业", CreditRating::Good)]
    fn test_credit_phrases(#[case] query: &str, #[case] rating: CreditRating) {
        assert_eq!(extract_basic(query).credit_rating, Some(rating));
    }

    #[rstest]
    #[case("empresas fundadas después de 2010", 2010)]
    #[case("manufacturers founded after 1998", 1998)]
    #[case("2015年以后成立的公司", 2015)]
    fn test_founded_after(#[case] query: &str, #[case] year: i32) {
        assert_eq!(extract_basic(query).founded_after, Some(year));
    }

    #[test]
    fn test_dictionary_matches() {
        let criteria = extract_basic("Guangdong PVC flooring");
        assert_eq!(
            criteria.products,
            BTreeSet::from(["pvc".to_string(), "flooring".to_string()])
        );
        assert_eq!(criteria.location, BTreeSet::from(["Guangdong".to_string()]));
        assert!(criteria.industry.is_empty());
    }

    #[test]
    fn test_city_maps_to_province_tag() {
        let criteria = extract_basic("fábricas de juguetes en Shenzhen");
        assert!(criteria.location.contains("Guangdong"));
        assert!(criteria.products.contains("toys"));
    }

    #[test]
    fn test_chinese_query() {
        let criteria = extract_basic("浙江的照明企业，有官网");
        assert!(criteria.location.contains("Zhejiang"));
        assert!(criteria.products.contains("lighting"));
        assert!(criteria.industry.contains("lighting"));
        assert_eq!(criteria.has_website, Some(true));
    }

    #[rstest]
    #[case("company called Ningbo Sunrise", "led")]
    #[case("skilled workers wanted", "led")]
    #[case("textile factories in Zhejiang", "ceramic")]
    fn test_trigger_inside_word_does_not_match(#[case] query: &str, #[case] tag: &str) {
        assert!(!extract_basic(query).products.contains(tag));
    }

    #[test]
    fn test_trigger_at_word_start_matches() {
        let criteria = extract_basic("LEDs y azulejos, (tile) export");
        assert!(criteria.products.contains("led"));
        assert!(criteria.products.contains("ceramic"));
        assert_eq!(
            extract_basic("textile factories in Zhejiang").products,
            BTreeSet::from(["textile".to_string()])
        );
    }

    #[test]
    fn test_latin_trigger_after_chinese_text() {
        let criteria = extract_basic("广东LED灯具");
        assert!(criteria.products.contains("led"));
        assert!(criteria.location.contains("Guangdong"));
    }

    #[rstest]
    #[case("busco la empresa llamada  Foshan Ceramics ", "foshan ceramics")]
    #[case("company named Ningbo Sunrise", "ningbo sunrise")]
    #[case("名为华美照明的公司", "华美照明")]
    fn test_company_name(#[case] query: &str, #[case] expected: &str) {
        assert_eq!(extract_basic(query).company_name.as_deref(), Some(expected));
    }

    #[test]
    fn test_website_phrase() {
        let criteria = extract_basic("proveedores con sitio web");
        assert_eq!(criteria.has_website, Some(true));
        assert!(extract_basic("proveedores de acero").has_website.is_none());
    }

    #[tokio::test]
    async fn test_assist_results_are_merged() {
        let mut assist = MockCriteriaAssist::new();
        assist.expect_suggest().times(1).returning(|_| {
            Ok(SearchCriteria {
                products: BTreeSet::from(["led".to_string(), "solar".to_string()]),
                location: BTreeSet::from(["Jiangsu".to_string()]),
                founded_after: Some(2012),
                ..Default::default()
            })
        });

        let extractor = CriteriaExtractor::new(Some(Arc::new(assist)), 10);
        let criteria = extractor
            .extract("paneles LED para uso exterior", true)
            .await;

        assert!(criteria.products.contains("led"));
        assert!(criteria.products.contains("solar"));
        assert!(criteria.location.contains("Jiangsu"));
        assert_eq!(criteria.founded_after, Some(2012));
    }

    #[tokio::test]
    async fn test_assist_failure_is_swallowed() {
        let mut assist = MockCriteriaAssist::new();
        assist
            .expect_suggest()
            .returning(|_| Err(AssistError::Parse("not json".into())));

        let extractor = CriteriaExtractor::new(Some(Arc::new(assist)), 10);
        let query = "empresas con más de 50 empleados";
        let criteria = extractor.extract(query, true).await;

        assert_eq!(criteria, extract_basic(query));
    }

    #[tokio::test]
    async fn test_assist_requires_query_longer_than_threshold() {
        let mut assist = MockCriteriaAssist::new();
        assist
            .expect_suggest()
            .times(1)
            .returning(|_| Ok(SearchCriteria::default()));

        let extractor = CriteriaExtractor::new(Some(Arc::new(assist)), 10);
        extractor.extract("LED panels", true).await;
        extractor.extract("LED panels!", true).await;
    }

    #[tokio::test]
    async fn test_assist_skipped_for_short_query_or_when_disabled() {
        let mut assist = MockCriteriaAssist::new();
        assist.expect_suggest().never();

        let extractor = CriteriaExtractor::new(Some(Arc::new(assist)), 10);
        extractor.extract("LED", true).await;
        extractor
            .extract("empresas con más de 50 empleados", false)
            .await;
    }
}
