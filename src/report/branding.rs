// ==========================================
// 生产单报表 - 页脚品牌化渲染
// ==========================================
// 所有报表共享: 调用方选项一律被固定页边距/页脚选项取代
// ==========================================

use crate::engine::lookup::CompanyContext;
use crate::report::error::ReportResult;
use crate::report::options::{footer_options, RenderOptions};
use crate::report::renderer::PdfRenderer;

pub struct BrandedRenderer<R, C> {
    inner: R,
    company: C,
}

impl<R, C> BrandedRenderer<R, C>
where
    R: PdfRenderer,
    C: CompanyContext,
{
    pub fn new(inner: R, company: C) -> Self {
        Self { inner, company }
    }

    /// 当前上下文下实际生效的选项
    pub fn effective_options(&self) -> ReportResult<RenderOptions> {
        let company_name = self.company.company_name()?;
        Ok(footer_options(&company_name))
    }
}

impl<R, C> PdfRenderer for BrandedRenderer<R, C>
where
    R: PdfRenderer,
    C: CompanyContext,
{
    fn html_to_pdf(&self, html: &str, _options: &RenderOptions) -> ReportResult<Vec<u8>> {
        let options = self.effective_options()?;
        self.inner.html_to_pdf(html, &options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::options::OptionValue;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct CapturingRenderer {
        seen: Arc<Mutex<Vec<RenderOptions>>>,
    }

    impl PdfRenderer for CapturingRenderer {
        fn html_to_pdf(&self, _html: &str, options: &RenderOptions) -> ReportResult<Vec<u8>> {
            self.seen.lock().unwrap().push(options.clone());
            Ok(b"%PDF-1.4".to_vec())
        }
    }

    #[test]
    fn test_caller_options_are_replaced() {
        let inner = CapturingRenderer::default();
        let renderer = BrandedRenderer::new(inner.clone(), "ACME".to_string());

        let mut caller = RenderOptions::new();
        caller.set("margin-top", "3in").set("orientation", "Landscape");
        renderer.html_to_pdf("<html></html>", &caller).unwrap();

        let seen = inner.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], footer_options("ACME"));
        assert!(seen[0].get("orientation").is_none());
    }

    #[test]
    fn test_empty_company_name() {
        let renderer = BrandedRenderer::new(CapturingRenderer::default(), String::new());
        let options = renderer.effective_options().unwrap();
        assert_eq!(options.get("footer-left"), Some(&OptionValue::Text(String::new())));
    }
}
