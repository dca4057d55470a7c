//! # Document Rendering
//!
//! The review document is produced from a minijinja template embedded at compile time
//! (`templates/document.tmp`). The template receives plain data only: title, date, region
//! count, the platform name, the manual steps and the ordered regions. Layout lives entirely
//! in the template, which uses explicit whitespace control so each section ends with a
//! `---` separator followed by one blank line.

use crate::config::DocumentConfig;
use crate::error::Result;
use crate::extract::Region;
use minijinja::{context, Environment};
use std::fs;
use std::path::Path;
use tracing::info;

pub const DOCUMENT_TEMPLATE: &str = include_str!("templates/document.tmp");

// The `.md` name keeps minijinja from auto-escaping region content.
const TEMPLATE_NAME: &str = "document.md";

#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    document: DocumentConfig,
}

impl DocumentRenderer {
    pub fn new(document: DocumentConfig) -> Self {
        Self { document }
    }

    pub fn render(&self, regions: &[Region]) -> Result<String> {
        let mut env = Environment::new();
        env.add_template(TEMPLATE_NAME, DOCUMENT_TEMPLATE)?;
        let template = env.get_template(TEMPLATE_NAME)?;

        let rendered = template.render(context! {
            title => &self.document.title,
            date => self.document.extraction_date.format("%Y-%m-%d").to_string(),
            count => regions.len(),
            platform => &self.document.platform,
            steps => &self.document.steps,
            regions => regions,
        })?;
        Ok(rendered)
    }

    /// Renders and writes the document in one go, replacing any existing file.
    pub fn write<P: AsRef<Path>>(&self, regions: &[Region], path: P) -> Result<()> {
        let rendered = self.render(regions)?;
        fs::write(path.as_ref(), rendered)?;
        info!(
            file = %path.as_ref().display(),
            regions = regions.len(),
            "document written"
        );
        Ok(())
    }
}
