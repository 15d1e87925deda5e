//! Text extraction from the supported document formats

use crate::error::{Result, ScreenerError};
use docx_rs::{
    DocumentChild, Paragraph, ParagraphChild, Run, RunChild, TableCellContent, TableChild,
    TableRowChild,
};
use log::{debug, warn};
use pulldown_cmark::{Event, Parser, Tag};

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Page-by-page PDF text. A page that cannot be decoded contributes an
/// empty string instead of failing the document.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let doc = lopdf::Document::load_mem(bytes)
            .map_err(|e| ScreenerError::Extraction(format!("Failed to open PDF: {}", e)))?;

        let pages: Vec<String> = doc
            .get_pages()
            .keys()
            .map(|&page_number| match doc.extract_text(&[page_number]) {
                Ok(text) => text,
                Err(e) => {
                    warn!("No text extracted from PDF page {}: {}", page_number, e);
                    String::new()
                }
            })
            .collect();

        debug!("Extracted {} PDF pages", pages.len());
        Ok(pages.join("\n"))
    }
}

/// Body text of a Word document; images and formatting are dropped.
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let docx = docx_rs::read_docx(bytes)
            .map_err(|e| ScreenerError::Extraction(format!("Failed to read DOCX: {:?}", e)))?;

        let mut text = String::new();
        for child in &docx.document.children {
            match child {
                DocumentChild::Paragraph(paragraph) => push_paragraph(paragraph, &mut text),
                DocumentChild::Table(table) => push_table(table, &mut text),
                _ => {}
            }
        }
        Ok(text)
    }
}

// Layout tables are common in resumes; each cell paragraph becomes a line.
#[allow(irrefutable_let_patterns)]
fn push_table(table: &docx_rs::Table, out: &mut String) {
    for row in &table.rows {
        let TableChild::TableRow(row) = row else { continue };
        for cell in &row.cells {
            let TableRowChild::TableCell(cell) = cell else { continue };
            for content in &cell.children {
                if let TableCellContent::Paragraph(paragraph) = content {
                    push_paragraph(paragraph, out);
                }
            }
        }
    }
}

fn push_paragraph(paragraph: &Paragraph, out: &mut String) {
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            push_run(run, out);
        }
    }
    out.push('\n');
}

fn push_run(run: &Run, out: &mut String) {
    for child in &run.children {
        match child {
            RunChild::Text(t) => out.push_str(&t.text),
            RunChild::Tab(_) => out.push('\t'),
            RunChild::Break(_) => out.push('\n'),
            _ => {}
        }
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

/// Renders Markdown to plain text, one line per block element.
pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let source = String::from_utf8_lossy(bytes);
        let mut text = String::new();

        for event in Parser::new(&source) {
            match event {
                Event::Text(t) | Event::Code(t) => text.push_str(&t),
                Event::SoftBreak => text.push(' '),
                Event::HardBreak => text.push('\n'),
                Event::End(Tag::Paragraph | Tag::Heading(..) | Tag::Item | Tag::CodeBlock(_)) => {
                    if !text.ends_with('\n') {
                        text.push('\n');
                    }
                }
                _ => {}
            }
        }

        Ok(text.trim_end().to_string())
    }
}
