//! Text extraction from various file formats

use crate::error::{InterviewAssistantError, Result};
use std::io::{Cursor, Read};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(InterviewAssistantError::Io)?;

        let text = pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
            InterviewAssistantError::PdfExtraction(format!(
                "Failed to extract text from PDF '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(text.trim().to_string())
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await.map_err(InterviewAssistantError::Io)?;

        let document_xml = read_document_xml(&bytes).map_err(|e| {
            InterviewAssistantError::DocxExtraction(format!(
                "Failed to read Word document '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(xml_to_text(&document_xml))
    }
}

/// Pull `word/document.xml` out of the OOXML container.
fn read_document_xml(bytes: &[u8]) -> anyhow::Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut file = archive.by_name("word/document.xml")?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(content)
}

/// Flatten the document XML to plain text: paragraph ends become newlines,
/// tabs become spaces, every remaining tag is stripped, entities decoded.
fn xml_to_text(xml: &str) -> String {
    let text = xml
        .replace("</w:p>", "\n")
        .replace("<w:tab/>", " ")
        .replace("<w:br/>", "\n");

    let re = regex::Regex::new(r"<[^>]*>").unwrap();
    let clean_text = re.replace_all(&text, "");

    let decoded = clean_text
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'");

    let lines: Vec<String> = decoded
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    lines.join("\n")
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .await
            .map_err(InterviewAssistantError::Io)?;
        Ok(content)
    }
}
