//! 内置演示数据
//!
//! 公司存储不可达或为空时使用的固定数据集。

use std::collections::BTreeSet;

use crate::models::company::Company;
use crate::models::search::ScoredCompany;
use crate::services::scoring::query_words;

/// 演示结果的固定分数
pub const DEMO_SCORE: u32 = 0;
/// 演示结果的固定说明
pub const DEMO_EXPLANATION: &str = "Demo data: live company store unavailable";

struct DemoRow {
    id: i64,
    name_en: &'static str,
    name_cn: &'static str,
    province: &'static str,
    city: &'static str,
    year: i32,
    employees: i64,
    category: &'static str,
    products: &'static str,
    keywords: &'static str,
    rating: &'static str,
    website: Option<&'static str>,
}

const DEMO_ROWS: &[DemoRow] = &[
    DemoRow {
        id: 1,
        name_en: "Shenzhen Brightway LED Technology Co., Ltd.",
        name_cn: "深圳明途LED科技有限公司",
        province: "Guangdong",
        city: "Shenzhen",
        year: 2009,
        employees: 320,
        category: "Lighting",
        products: "LED panel lights, LED strips, LED lighting fixtures",
        keywords: "led, lighting, indoor lighting",
        rating: "AA",
        website: Some("https://www.brightway-led.example.cn"),
    },
    DemoRow {
        id: 2,
        name_en: "Foshan Evergreen Flooring Co., Ltd.",
        name_cn: "佛山常青地板有限公司",
        province: "Guangdong",
        city: "Foshan",
        year: 2012,
        employees: 180,
        category: "Building Materials",
        products: "PVC flooring, SPC flooring, vinyl planks",
        keywords: "pvc, flooring, vinyl",
        rating: "A",
        website: Some("https://www.evergreen-floor.example.cn"),
    },
    DemoRow {
        id: 3,
        name_en: "Ningbo Sunrise Solar Energy Co., Ltd.",
        name_cn: "宁波日升太阳能有限公司",
        province: "Zhejiang",
        city: "Ningbo",
        year: 2015,
        employees: 540,
        category: "Energy",
        products: "Solar panels, photovoltaic modules, solar street lights",
        keywords: "solar, photovoltaic, energy",
        rating: "AAA",
        website: Some("https://www.sunrise-solar.example.cn"),
    },
    DemoRow {
        id: 4,
        name_en: "Suzhou Precision Machinery Manufacturing Co., Ltd.",
        name_cn: "苏州精密机械制造有限公司",
        province: "Jiangsu",
        city: "Suzhou",
        year: 2003,
        employees: 860,
        category: "Machinery",
        products: "CNC machines, injection molding machines",
        keywords: "machinery, cnc, industrial equipment",
        rating: "AA",
        website: None,
    },
    DemoRow {
        id: 5,
        name_en: "Yiwu Happy Kids Toys Factory",
        name_cn: "义乌快乐童年玩具厂",
        province: "Zhejiang",
        city: "Yiwu",
        year: 2011,
        employees: 45,
        category: "Toys",
        products: "Plush toys, plastic toys, educational toys",
        keywords: "toys, plastic, gifts",
        rating: "B",
        website: None,
    },
    DemoRow {
        id: 6,
        name_en: "Qingdao Ocean Textile Co., Ltd.",
        name_cn: "青岛海洋纺织有限公司",
        province: "Shandong",
        city: "Qingdao",
        year: 1998,
        employees: 1200,
        category: "Textile",
        products: "Cotton fabric, knitted garments, home textiles",
        keywords: "textile, fabric, garment",
        rating: "A",
        website: Some("https://www.ocean-textile.example.cn"),
    },
    DemoRow {
        id: 7,
        name_en: "Xiamen Greenpack Packaging Co., Ltd.",
        name_cn: "厦门绿包包装有限公司",
        province: "Fujian",
        city: "Xiamen",
        year: 2016,
        employees: 90,
        category: "Packaging",
        products: "Paper boxes, biodegradable packaging, plastic bags",
        keywords: "packaging, paper, plastic",
        rating: "BBB",
        website: Some("https://www.greenpack.example.cn"),
    },
    DemoRow {
        id: 8,
        name_en: "Dongguan Powercell Battery Co., Ltd.",
        name_cn: "东莞动力电池有限公司",
        province: "Guangdong",
        city: "Dongguan",
        year: 2014,
        employees: 410,
        category: "Electronics",
        products: "Lithium batteries, battery packs, power banks",
        keywords: "battery, lithium, electronics",
        rating: "AA",
        website: Some("https://www.powercell.example.cn"),
    },
];

impl DemoRow {
    fn to_company(&self) -> Company {
        Company {
            id: self.id,
            company_name_en: Some(self.name_en.to_string()),
            company_name_cn: Some(self.name_cn.to_string()),
            province: Some(self.province.to_string()),
            city: Some(self.city.to_string()),
            establishment_year: Some(self.year),
            employee_count: Some(self.employees),
            company_category: Some(self.category.to_string()),
            main_products: Some(self.products.to_string()),
            keywords: Some(self.keywords.to_string()),
            credit_rating: Some(self.rating.to_string()),
            official_website: self.website.map(str::to_string),
            contact_phone: None,
            contact_email: None,
            address: Some(format!("{}, {}, China", self.city, self.province)),
        }
    }
}

/// 全部演示公司
pub fn demo_companies() -> Vec<Company> {
    DEMO_ROWS.iter().map(DemoRow::to_company).collect()
}

/// 按查询词与演示数据做朴素子串匹配；无命中时返回前 `limit` 条
pub fn demo_results(query: &str, limit: usize) -> Vec<ScoredCompany> {
    let words = query_words(query);
    let companies = demo_companies();

    let overlapping: Vec<Company> = companies
        .iter()
        .filter(|company| {
            let text = format!(
                "{} {}",
                company.searchable_text(),
                company.province.as_deref().unwrap_or("").to_lowercase()
            );
            words.iter().any(|word| text.contains(word.as_str()))
        })
        .cloned()
        .collect();

    let selected = if overlapping.is_empty() {
        companies
    } else {
        overlapping
    };

    selected
        .into_iter()
        .take(limit)
        .map(|company| ScoredCompany {
            company,
            score: DEMO_SCORE,
            matched_fields: BTreeSet::new(),
            explanation: DEMO_EXPLANATION.to_string(),
        })
        .collect()
}
