// ==========================================
// 生产单报表 - HTML → PDF 渲染
// ==========================================
// 外部渲染器: wkhtmltopdf（stdin 输入 HTML，stdout 输出 PDF）
// ==========================================

use crate::report::error::{ReportError, ReportResult};
use crate::report::options::RenderOptions;
use std::io::Write;
use std::process::{Command, Stdio};

/// HTML → PDF 渲染接口
pub trait PdfRenderer: Send + Sync {
    fn html_to_pdf(&self, html: &str, options: &RenderOptions) -> ReportResult<Vec<u8>>;
}

impl<T: PdfRenderer + ?Sized> PdfRenderer for Box<T> {
    fn html_to_pdf(&self, html: &str, options: &RenderOptions) -> ReportResult<Vec<u8>> {
        (**self).html_to_pdf(html, options)
    }
}

// ==========================================
// WkhtmltopdfRenderer - 调用外部 wkhtmltopdf
// ==========================================
pub struct WkhtmltopdfRenderer {
    binary: String,
}

impl WkhtmltopdfRenderer {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// 完整命令行参数（不含可执行文件）
    pub fn command_args(options: &RenderOptions) -> Vec<String> {
        let mut args = vec!["--quiet".to_string()];
        args.extend(options.to_args());
        args.push("-".to_string());
        args.push("-".to_string());
        args
    }
}

impl PdfRenderer for WkhtmltopdfRenderer {
    fn html_to_pdf(&self, html: &str, options: &RenderOptions) -> ReportResult<Vec<u8>> {
        let args = Self::command_args(options);
        tracing::debug!(binary = %self.binary, args = ?args, "调用 wkhtmltopdf");

        let mut child = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ReportError::RenderError(format!("无法启动 {}: {}", self.binary, e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ReportError::RenderError("子进程 stdin 不可用".to_string()))?;

        // stdout 需与写入并行读取，避免管道缓冲区写满后互相等待
        let html_owned = html.to_owned();
        let writer = std::thread::spawn(move || stdin.write_all(html_owned.as_bytes()));

        let output = child.wait_with_output()?;
        let write_result = writer
            .join()
            .map_err(|_| ReportError::RenderError("HTML 写入线程异常退出".to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReportError::RenderError(format!(
                "{} 退出码 {:?}: {}",
                self.binary,
                output.status.code(),
                stderr.trim()
            )));
        }
        write_result?;

        if output.stdout.is_empty() {
            return Err(ReportError::RenderError(format!(
                "{} 未输出任何内容",
                self.binary
            )));
        }

        Ok(output.stdout)
    }
}
