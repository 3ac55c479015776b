//! 数据完整性检查 - 业务能力层
//!
//! 对扁平化后的题目列表做一次只读检查：重复 ID、缺失字段、空答案、
//! 答案与选项不一致、疑似占位题干、缺失图片

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::QuestionRecord;

/// 必须存在的字段
const REQUIRED_FIELDS: [&str; 4] = ["question", "subject", "subtopic", "year"];

/// 短于该字符数的题干视为疑似占位
const MIN_QUESTION_CHARS: usize = 20;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    pub total_questions: usize,
    pub duplicate_post_ids: usize,
    pub duplicate_global_indices: usize,
    pub missing_fields: usize,
    pub empty_answers: usize,
    pub inconsistent_choices: usize,
    pub missing_images: usize,
    pub placeholders: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditDetails {
    pub duplicates: Vec<String>,
    pub missing_fields: Vec<String>,
    pub inconsistent_answers: Vec<String>,
    pub missing_images: Vec<String>,
    pub placeholders: Vec<String>,
}

/// 检查报告
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub summary: AuditSummary,
    pub details: AuditDetails,
}

impl AuditReport {
    /// 是否发现任何问题
    pub fn is_clean(&self) -> bool {
        let s = &self.summary;
        s.duplicate_post_ids
            + s.duplicate_global_indices
            + s.missing_fields
            + s.empty_answers
            + s.inconsistent_choices
            + s.missing_images
            + s.placeholders
            == 0
    }
}

/// 数据完整性检查器
pub struct Auditor {
    images_dir: Option<PathBuf>,
    img_src: Regex,
}

impl Auditor {
    /// 创建检查器
    ///
    /// `images_dir` 为 None 时跳过图片存在性检查
    pub fn new(images_dir: Option<PathBuf>) -> Result<Self, regex::Error> {
        Ok(Self {
            images_dir,
            img_src: Regex::new(r#"<img\s+[^>]*src="([^"]+)""#)?,
        })
    }

    /// 执行检查
    pub fn run(&self, records: &[QuestionRecord]) -> AuditReport {
        let mut report = AuditReport::default();
        let mut seen_post_ids = HashSet::new();
        let mut seen_global_indices = HashSet::new();

        for record in records {
            report.summary.total_questions += 1;
            let post_id = record.post_id.as_str();

            // 1. 唯一性
            if !seen_post_ids.insert(post_id) {
                warn!("⚠️ 重复的 post_id: {}", post_id);
                report.summary.duplicate_post_ids += 1;
                report
                    .details
                    .duplicates
                    .push(format!("Duplicate post_id: {}", post_id));
            }
            if let Some(global_idx) = record.extra_text("global_idx") {
                if !seen_global_indices.insert(global_idx.clone()) {
                    report.summary.duplicate_global_indices += 1;
                    report
                        .details
                        .duplicates
                        .push(format!("Duplicate global_idx: {}", global_idx));
                }
            }

            // 2. 缺失字段
            let missing = missing_fields(record);
            if !missing.is_empty() {
                report.summary.missing_fields += 1;
                report
                    .details
                    .missing_fields
                    .push(format!("Post {} missing: {}", post_id, missing.join(", ")));
            }

            // 3. 答案一致性
            self.check_answer(record, &mut report);

            // 4. 疑似占位题干
            let question = record.question().unwrap_or_default();
            if is_placeholder(question) {
                report.summary.placeholders += 1;
                report
                    .details
                    .placeholders
                    .push(format!("Post {}: Potential placeholder/short text", post_id));
            }

            // 5. 图片
            if let Some(dir) = &self.images_dir {
                self.check_images(record, dir, &mut report);
            }
        }

        debug!("检查完成: {:?}", report.summary);
        report
    }

    fn check_answer(&self, record: &QuestionRecord, report: &mut AuditReport) {
        let Some(answer) = record.answer().map(str::trim).filter(|a| !a.is_empty()) else {
            report.summary.empty_answers += 1;
            return;
        };

        let options = record.option_entries();
        if options.is_empty() {
            return;
        }

        let labels: Vec<&str> = options.iter().map(|(label, _)| label.as_str()).collect();
        let consistent = answer
            .split(',')
            .map(str::trim)
            .all(|part| labels.contains(&part));
        if !consistent {
            report.summary.inconsistent_choices += 1;
            report.details.inconsistent_answers.push(format!(
                "Post {}: Answer '{}' not in options [{}]",
                record.post_id,
                answer,
                labels.join(", ")
            ));
        }
    }

    fn check_images(&self, record: &QuestionRecord, dir: &Path, report: &mut AuditReport) {
        let text = format!(
            "{}{}",
            record.question().unwrap_or_default(),
            record.solution().unwrap_or_default()
        );

        for caps in self.img_src.captures_iter(&text) {
            let src = unescape_entities(&caps[1]);
            let file_name = src.rsplit('/').next().unwrap_or(&src).to_string();
            if !dir.join(&file_name).exists() {
                report.summary.missing_images += 1;
                report
                    .details
                    .missing_images
                    .push(format!("Post {}: Missing image {}", record.post_id, file_name));
            }
        }
    }
}

fn missing_fields(record: &QuestionRecord) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| match *field {
            "question" => record.question().is_none(),
            "subject" => record.subject().is_none(),
            "subtopic" => record.subtopic().is_none(),
            "year" => record.year().is_none(),
            _ => false,
        })
        .collect()
}

fn is_placeholder(question: &str) -> bool {
    question.chars().count() < MIN_QUESTION_CHARS || question.contains("______") || question.contains("...")
}

/// 还原 src 属性中常见的 HTML 实体
fn unescape_entities(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
