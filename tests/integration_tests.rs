//! Integration tests for the resume screener

use cv_screener::config::Config;
use cv_screener::error::{Result, ScreenerError};
use cv_screener::input::source::FolderSource;
use cv_screener::input::{DocumentFormat, InputManager, ResumeDocument};
use cv_screener::llm::scoring::{parse_score_report, ComponentScores, ScoreReport, Scorer};
use cv_screener::output::feedback::FeedbackMessage;
use cv_screener::output::mailer::FeedbackSender;
use cv_screener::processing::{
    ResumeNormalizer, ResumeOutcome, ScreeningPipeline, BATCH_YEAR_NOT_FOUND,
};
use docx_rs::{Docx, Paragraph, Run};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

const RESUME_LINES: [&str; 4] = [
    "Jane Doe",
    "Email: jane.doe@example.com",
    "Batch of 2021",
    "Experience with machine learning and NLP.",
];

fn write_docx(path: &Path, lines: &[&str]) {
    let mut docx = Docx::new();
    for line in lines {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*line)));
    }
    let file = std::fs::File::create(path).unwrap();
    docx.build().pack(file).unwrap();
}

/// One page per entry; `None` is a page whose content stream is missing.
fn write_pdf(path: &Path, pages: &[Option<&str>]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let Some(text) = page else {
            let missing_id = doc.new_object_id();
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => missing_id,
            });
            kids.push(page_id.into());
            continue;
        };

        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

fn sample_report() -> ScoreReport {
    ScoreReport {
        overall_score: 84,
        component_scores: ComponentScores {
            work_experience: 80,
            education: 88,
            skills: 86,
            formatting: 70,
        },
        jd_match_score: 79,
        strengths: vec!["NLP background".to_string()],
        weaknesses: vec!["No Kubernetes".to_string()],
        suggestions: vec!["Add deployment work".to_string()],
        relevant_keywords_found: vec!["nlp".to_string()],
        missing_keywords: vec!["kubernetes".to_string()],
    }
}

/// Records every resume text it is asked to score. Text containing
/// `malformed-reply` gets a non-JSON reply, `slow-reply` never answers in time.
#[derive(Default)]
struct StubScorer {
    seen: Mutex<Vec<String>>,
}

impl Scorer for StubScorer {
    async fn score(&self, resume_text: &str, job_description: &str) -> Result<ScoreReport> {
        assert!(!job_description.is_empty());
        self.seen.lock().unwrap().push(resume_text.to_string());

        if resume_text.contains("malformed-reply") {
            return parse_score_report("Sure! Here is the evaluation: {'overall_score': 90}");
        }
        if resume_text.contains("slow-reply") {
            tokio::time::sleep(Duration::from_secs(30)).await;
        }
        Ok(sample_report())
    }
}

#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<FeedbackMessage>>,
    delay: Option<Duration>,
}

impl FeedbackSender for RecordingSender {
    async fn send(&self, message: &FeedbackMessage) -> Result<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

fn test_config() -> Config {
    let mut config = Config::default();
    config.mail.feedback_recipient = "candidate@example.com".to_string();
    config
}

fn pipeline(config: &Config) -> ScreeningPipeline<StubScorer, RecordingSender> {
    ScreeningPipeline::new(
        config,
        StubScorer::default(),
        RecordingSender::default(),
        "Machine Learning Engineer".to_string(),
    )
}

#[tokio::test]
async fn test_docx_resume_is_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jane.docx");
    write_docx(&path, &RESUME_LINES);

    let normalized = ResumeNormalizer::default().normalize(&path).await;

    assert!(normalized.masked_text.contains("[NAME]"));
    assert!(normalized.masked_text.contains("[EMAIL]"));
    assert!(!normalized.masked_text.contains("jane.doe@example.com"));
    assert!(!normalized.masked_text.contains("Jane Doe"));
    assert_eq!(normalized.batch_year, "2021");
    assert!(normalized
        .ai_experience_lines
        .contains(&"Experience with machine learning and NLP.".to_string()));
}

#[tokio::test]
async fn test_pdf_pages_are_joined_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jane.pdf");
    write_pdf(&path, &[Some("Graduated 2019"), Some("Built pytorch models")]);

    let text = InputManager::new().load_text(&path).await;
    let graduated = text.find("Graduated 2019").unwrap();
    let pytorch = text.find("Built pytorch models").unwrap();
    assert!(graduated < pytorch);

    let normalized = ResumeNormalizer::default().normalize(&path).await;
    assert_eq!(normalized.batch_year, "2019");
    assert_eq!(normalized.ai_experience_lines.len(), 1);
    assert!(normalized.ai_experience_lines[0].contains("pytorch"));
}

#[tokio::test]
async fn test_unreadable_pdf_page_contributes_empty_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jane.pdf");
    write_pdf(&path, &[None, Some("Graduated 2019")]);

    let document = ResumeDocument::read(&path).await.unwrap();
    assert_eq!(document.format, DocumentFormat::Pdf);

    let text = InputManager::new().document_text(&document);
    assert!(text.starts_with('\n'));
    assert!(text.contains("Graduated 2019"));

    let normalized = ResumeNormalizer::default().normalize(&path).await;
    assert_eq!(normalized.batch_year, "2019");
}

#[tokio::test]
async fn test_unsupported_extension_normalizes_to_empty() {
    let normalized = ResumeNormalizer::default()
        .normalize(Path::new("tests/fixtures/sample_resume.txt"))
        .await;

    assert_eq!(normalized.masked_text, "");
    assert_eq!(normalized.batch_year, BATCH_YEAR_NOT_FOUND);
    assert!(normalized.ai_experience_lines.is_empty());
}

#[tokio::test]
async fn test_corrupt_and_missing_files_read_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let corrupt = dir.path().join("broken.pdf");
    std::fs::write(&corrupt, b"%PDF-1.4 truncated").unwrap();

    let manager = InputManager::new();
    assert_eq!(manager.load_text(&corrupt).await, "");
    assert_eq!(manager.load_text(&dir.path().join("missing.docx")).await, "");
    assert!(ResumeNormalizer::default().normalize(&corrupt).await.is_empty());
}

#[tokio::test]
async fn test_job_description_loading() {
    let manager = InputManager::new();

    let text = manager
        .load_job_description(Path::new("tests/fixtures/job_description.md"))
        .await
        .unwrap();
    assert!(text.starts_with("Machine Learning Engineer"));
    assert!(text.contains("Python and PyTorch"));
    assert!(!text.contains("**"));

    let missing = manager
        .load_job_description(Path::new("tests/fixtures/nonexistent.txt"))
        .await;
    assert!(matches!(missing, Err(ScreenerError::InvalidInput(_))));
}

#[tokio::test]
async fn test_run_scores_masked_text_and_sends_feedback() {
    let dir = tempfile::tempdir().unwrap();
    write_docx(&dir.path().join("jane.docx"), &RESUME_LINES);

    let config = test_config();
    let pipeline = pipeline(&config);
    let files = FolderSource::new(dir.path()).list().unwrap();

    let summary = pipeline.run(&files, None).await.unwrap();
    assert_eq!(summary.delivered(), 1);
    assert_eq!(
        summary.outcomes[0],
        ResumeOutcome::Delivered {
            path: files[0].display().to_string(),
            overall_score: 84,
            jd_match_score: 79,
        }
    );

    let sent = pipeline.sender().sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "candidate@example.com");
    assert_eq!(sent[0].subject, "Your Resume Evaluation Results");
    assert!(sent[0].body.contains("OVERALL CV SCORE: 84/100"));
    assert!(sent[0].body.contains("BATCH YEAR: 2021"));
    assert!(sent[0].body.contains("- Experience with machine learning and NLP."));
}

#[tokio::test]
async fn test_scorer_never_sees_raw_pii() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jane.docx");
    write_docx(&path, &RESUME_LINES);

    let config = test_config();
    let pipeline = pipeline(&config);
    pipeline.screen_file(&path).await.unwrap();

    let seen = pipeline.scorer().seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(!seen[0].contains("jane.doe@example.com"));
    assert!(!seen[0].contains("Jane Doe"));
    assert!(seen[0].contains("Batch of 2021"));
}

#[tokio::test]
async fn test_unreadable_resume_is_still_scored_by_default() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "Jane Doe").unwrap();

    let config = test_config();
    let pipeline = pipeline(&config);
    let files = FolderSource::new(dir.path()).list().unwrap();

    let summary = pipeline.run(&files, None).await.unwrap();
    assert_eq!(summary.delivered(), 1);

    let sent = pipeline.sender().sent.lock().unwrap();
    assert!(sent[0].body.contains("BATCH YEAR: Not found"));
}

#[tokio::test]
async fn test_unreadable_resume_can_be_skipped() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "Jane Doe").unwrap();

    let mut config = test_config();
    config.screening.skip_unreadable = true;
    let pipeline = pipeline(&config);
    let files = FolderSource::new(dir.path()).list().unwrap();

    let summary = pipeline.run(&files, None).await.unwrap();
    assert_eq!(summary.skipped(), 1);
    assert!(pipeline.sender().sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_reply_fails_only_that_resume() {
    let dir = tempfile::tempdir().unwrap();
    write_docx(&dir.path().join("a_broken.docx"), &["malformed-reply"]);
    write_docx(&dir.path().join("b_jane.docx"), &RESUME_LINES);

    let config = test_config();
    let pipeline = pipeline(&config);
    let files = FolderSource::new(dir.path()).list().unwrap();

    let summary = pipeline.run(&files, None).await.unwrap();
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.delivered(), 1);

    match &summary.outcomes[0] {
        ResumeOutcome::Failed { path, error } => {
            assert!(path.ends_with("a_broken.docx"));
            assert!(error.starts_with("Malformed score response"));
        }
        other => panic!("expected failure, got {:?}", other),
    }
    assert_eq!(pipeline.sender().sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_stop_on_first_error_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    write_docx(&dir.path().join("a_broken.docx"), &["malformed-reply"]);
    write_docx(&dir.path().join("b_jane.docx"), &RESUME_LINES);

    let mut config = test_config();
    config.screening.continue_on_error = false;
    let pipeline = pipeline(&config);
    let files: Vec<PathBuf> = FolderSource::new(dir.path()).list().unwrap();

    let result = pipeline.run(&files, None).await;
    assert!(matches!(result, Err(ScreenerError::ScoreParse(_))));
    assert!(pipeline.sender().sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_slow_resume_times_out_and_run_continues() {
    let dir = tempfile::tempdir().unwrap();
    write_docx(&dir.path().join("a_slow.docx"), &["slow-reply"]);
    write_docx(&dir.path().join("b_jane.docx"), &RESUME_LINES);

    let mut config = test_config();
    config.screening.resume_timeout_secs = 1;
    let pipeline = pipeline(&config);
    let files = FolderSource::new(dir.path()).list().unwrap();

    let summary = pipeline.run(&files, None).await.unwrap();
    match &summary.outcomes[0] {
        ResumeOutcome::Failed { error, .. } => assert!(error.starts_with("Timed out after 1s")),
        other => panic!("expected timeout, got {:?}", other),
    }
    assert_eq!(summary.delivered(), 1);
}

#[tokio::test]
async fn test_slow_delivery_is_not_reported_as_timeout() {
    let dir = tempfile::tempdir().unwrap();
    write_docx(&dir.path().join("jane.docx"), &RESUME_LINES);

    let mut config = test_config();
    config.screening.resume_timeout_secs = 1;
    let sender = RecordingSender {
        delay: Some(Duration::from_millis(1500)),
        ..Default::default()
    };
    let pipeline = ScreeningPipeline::new(
        &config,
        StubScorer::default(),
        sender,
        "Machine Learning Engineer".to_string(),
    );
    let files = FolderSource::new(dir.path()).list().unwrap();

    let summary = pipeline.run(&files, None).await.unwrap();
    assert_eq!(summary.delivered(), 1);
    assert_eq!(summary.failed(), 0);
    assert_eq!(pipeline.sender().sent.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_timeout_during_scoring_sends_nothing() {
    let dir = tempfile::tempdir().unwrap();
    write_docx(&dir.path().join("slow.docx"), &["slow-reply"]);

    let mut config = test_config();
    config.screening.resume_timeout_secs = 1;
    let pipeline = pipeline(&config);
    let files = FolderSource::new(dir.path()).list().unwrap();

    let summary = pipeline.run(&files, None).await.unwrap();
    assert_eq!(summary.failed(), 1);
    assert!(pipeline.sender().sent.lock().unwrap().is_empty());
}
