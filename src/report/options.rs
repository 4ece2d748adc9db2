// ==========================================
// 生产单报表 - wkhtmltopdf 渲染选项
// ==========================================
// 选项名即 wkhtmltopdf 长参数名（不含前缀 --）
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// 页边距（四边一致）
pub const PAGE_MARGIN: &str = "0.50in";
/// 页脚字号
pub const FOOTER_FONT_SIZE: i64 = 8;
/// 页脚与正文间距
pub const FOOTER_SPACING: i64 = 5;
/// 页脚右侧: 当前页 / 总页数
pub const FOOTER_PAGE_COUNTER: &str = "[page]/[topage]";

/// 选项值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Text(String),
    Number(i64),
    /// 无值开关，如 `--footer-line`
    Flag,
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Text(s) => write!(f, "{}", s),
            OptionValue::Number(n) => write!(f, "{}", n),
            OptionValue::Flag => Ok(()),
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::Text(s)
    }
}

impl From<i64> for OptionValue {
    fn from(n: i64) -> Self {
        OptionValue::Number(n)
    }
}

/// 渲染选项集合（按名称有序）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions(BTreeMap<String, OptionValue>);

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: impl Into<OptionValue>) -> &mut Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    pub fn flag(&mut self, name: &str) -> &mut Self {
        self.0.insert(name.to_string(), OptionValue::Flag);
        self
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.0.get(name)
    }

    /// 展开为命令行参数
    ///
    /// 空字符串值保留为独立参数（wkhtmltopdf 据此清空对应页脚区）
    pub fn to_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.0.len() * 2);
        for (name, value) in &self.0 {
            args.push(format!("--{}", name));
            if !matches!(value, OptionValue::Flag) {
                args.push(value.to_string());
            }
        }
        args
    }
}

/// 生成固定的页面/页脚选项
///
/// 页脚左侧为公司名，中间留空，右侧为页码
pub fn footer_options(company_name: &str) -> RenderOptions {
    let mut options = RenderOptions::new();
    options
        .set("margin-top", PAGE_MARGIN)
        .set("margin-bottom", PAGE_MARGIN)
        .set("margin-left", PAGE_MARGIN)
        .set("margin-right", PAGE_MARGIN)
        .set("footer-font-size", FOOTER_FONT_SIZE)
        .set("footer-left", company_name)
        .set("footer-center", "")
        .set("footer-right", FOOTER_PAGE_COUNTER)
        .set("footer-spacing", FOOTER_SPACING)
        .flag("footer-line");
    options
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_options_fixed_set() {
        let options = footer_options("ACME Manufacturing");

        for side in ["top", "bottom", "left", "right"] {
            assert_eq!(
                options.get(&format!("margin-{}", side)),
                Some(&OptionValue::Text("0.50in".to_string()))
            );
        }
        assert_eq!(options.get("footer-font-size"), Some(&OptionValue::Number(8)));
        assert_eq!(
            options.get("footer-left"),
            Some(&OptionValue::Text("ACME Manufacturing".to_string()))
        );
        assert_eq!(options.get("footer-center"), Some(&OptionValue::Text(String::new())));
        assert_eq!(
            options.get("footer-right"),
            Some(&OptionValue::Text("[page]/[topage]".to_string()))
        );
        assert_eq!(options.get("footer-spacing"), Some(&OptionValue::Number(5)));
        assert_eq!(options.get("footer-line"), Some(&OptionValue::Flag));
    }

    #[test]
    fn test_to_args_keeps_empty_values_and_flags() {
        let mut options = RenderOptions::new();
        options.set("footer-center", "").flag("footer-line").set("footer-spacing", 5_i64);

        assert_eq!(
            options.to_args(),
            vec![
                "--footer-center".to_string(),
                String::new(),
                "--footer-line".to_string(),
                "--footer-spacing".to_string(),
                "5".to_string(),
            ]
        );
    }
}
