// ==========================================
// 生产单报表 - 命令行入口
// ==========================================

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use production_report::app::{get_default_db_path, AppState};
use production_report::logging::{self, LogFormat};
use production_report::report::{RenderedReport, ReportAction, ReportRequest, ReportService, PRODUCTION_REPORT};
use production_report::wizard::start_form::START_DATE_FIELD;
use production_report::wizard::{ProductionsReportWizard, WizardState};

/// 生产单报表: 按日期区间汇总生产单并输出 PDF
#[derive(Parser)]
#[command(author, version, about = "Productions report generator")]
struct Cli {
    /// SQLite 数据库路径（默认取 PRODUCTION_REPORT_DB_PATH 或用户数据目录）
    #[arg(long, global = true)]
    db: Option<String>,

    /// 会话公司 ID（覆盖 context.company 配置）
    #[arg(long, global = true)]
    company: Option<i64>,

    /// 以 JSON 输出日志
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 初始化数据库表结构
    #[command(name = "init-db")]
    InitDb,

    /// 新建公司
    #[command(name = "add-company")]
    AddCompany {
        name: String,
        /// 同时设为默认会话公司
        #[arg(long)]
        set_default: bool,
    },

    /// 从 CSV 导入生产单
    Import { csv: PathBuf },

    /// 生成区间报表 (report.productions)
    Report {
        /// 开始日期 YYYY-MM-DD（默认本周周一）
        #[arg(long)]
        start: Option<NaiveDate>,
        /// 结束日期 YYYY-MM-DD（默认本周周六）
        #[arg(long)]
        end: Option<NaiveDate>,
        /// 计算默认值所用的“今天”
        #[arg(long)]
        today: Option<NaiveDate>,
        #[arg(long, short)]
        out: PathBuf,
    },

    /// 生成生产单明细 (production.report)
    Sheet {
        #[arg(required = true)]
        ids: Vec<i64>,
        #[arg(long, short)]
        out: PathBuf,
    },

    /// 交互式向导
    Wizard {
        #[arg(long, short)]
        out: PathBuf,
    },

    /// 写入配置项
    #[command(name = "config-set")]
    ConfigSet { key: String, value: String },
}

fn main() {
    let cli = Cli::parse();

    logging::init_with_format(if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    });

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {}", cause);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let db_path = cli.db.clone().unwrap_or_else(get_default_db_path);
    let state = AppState::new(db_path.clone())
        .with_context(|| format!("无法打开数据库: {}", db_path))?;
    state.apply_locale()?;

    match cli.command {
        Commands::InitDb => {
            println!("数据库已就绪: {}", state.db_path);
        }
        Commands::AddCompany { name, set_default } => {
            let id = state.company_repo.create(&name)?;
            if set_default {
                state.config.set_global_config_value(
                    production_report::config::config_keys::CONTEXT_COMPANY,
                    &id.to_string(),
                )?;
            }
            println!("{}", id);
        }
        Commands::Import { csv } => {
            let summary = state
                .importer()
                .import_from_csv(&csv)
                .with_context(|| format!("导入失败: {}", csv.display()))?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Commands::Report {
            start,
            end,
            today,
            out,
        } => {
            let service = build_service(&state, cli.company)?;
            let mut wizard =
                ProductionsReportWizard::new(today.unwrap_or_else(|| Local::now().date_naive()));
            if start.is_some() {
                wizard.start.start_date = start;
            }
            if end.is_some() {
                wizard.start.end_date = end;
            }
            match wizard.submit(WizardState::Generate, &service)? {
                Some(rendered) => write_report(&rendered, &out)?,
                None => bail!("向导未生成报表"),
            }
        }
        Commands::Sheet { ids, out } => {
            let service = build_service(&state, cli.company)?;
            let rendered = service.execute(
                &ReportAction::new(PRODUCTION_REPORT),
                &ReportRequest::for_records(ids),
            )?;
            write_report(&rendered, &out)?;
        }
        Commands::Wizard { out } => {
            let service = build_service(&state, cli.company)?;
            let mut wizard = ProductionsReportWizard::new(Local::now().date_naive());
            let stdin = std::io::stdin();
            let mut input = stdin.lock();

            let mut stdout = std::io::stdout();
            let target = prompt_wizard(&mut wizard, &mut input, &mut stdout)?;
            match wizard.submit(target, &service)? {
                Some(rendered) => write_report(&rendered, &out)?,
                None => println!("已取消"),
            }
        }
        Commands::ConfigSet { key, value } => {
            state.config.set_global_config_value(&key, &value)?;
        }
    }

    Ok(())
}

fn build_service(state: &AppState, company: Option<i64>) -> Result<ReportService> {
    let context = state.session_context(company)?;
    Ok(state.report_service(context)?)
}

fn write_report(rendered: &RenderedReport, out: &Path) -> Result<()> {
    std::fs::write(out, &rendered.content)
        .with_context(|| format!("无法写入 {}", out.display()))?;
    println!(
        "{} ({}) -> {} [{} bytes]",
        rendered.report_name,
        rendered.report_id,
        out.display(),
        rendered.content.len()
    );
    Ok(())
}

/// 逐项读取表单字段，最后选择按钮；直接回车保留默认值
fn prompt_wizard(
    wizard: &mut ProductionsReportWizard,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<WizardState> {
    let view = wizard.start_view();

    for field in &view.fields {
        loop {
            let current = match field.name {
                START_DATE_FIELD => wizard.start.start_date,
                _ => wizard.start.end_date,
            };
            let shown = current.map(|d| d.to_string()).unwrap_or_default();
            write!(out, "{} [{}]: ", field.label(), shown)?;
            out.flush()?;

            let line = read_answer(input)?;
            if line.is_empty() {
                break;
            }
            match NaiveDate::parse_from_str(&line, "%Y-%m-%d") {
                Ok(date) => {
                    match field.name {
                        START_DATE_FIELD => wizard.start.start_date = Some(date),
                        _ => wizard.start.end_date = Some(date),
                    }
                    break;
                }
                Err(_) => writeln!(out, "YYYY-MM-DD")?,
            }
        }
    }

    let labels: Vec<String> = view
        .buttons
        .iter()
        .map(|b| if b.default { format!("[{}]", b.label()) } else { b.label() })
        .collect();

    // 只有空行取默认按钮；无法匹配的输入重新提示
    loop {
        write!(out, "{}: ", labels.join(" / "))?;
        out.flush()?;

        let answer = read_answer(input)?.to_lowercase();
        let chosen = if answer.is_empty() {
            view.default_button()
        } else {
            view.buttons
                .iter()
                .find(|b| b.label().to_lowercase().starts_with(&answer))
        };

        match chosen {
            Some(button) => return Ok(button.target),
            None => writeln!(out, "{}", labels.join(" / "))?,
        }
    }
}

/// 读取一行并去除首尾空白；输入结束时报错
fn read_answer(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("输入已结束");
    }
    Ok(line.trim().to_string())
}
