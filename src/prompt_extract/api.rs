//! # API Facade
//!
//! [`PromptExtractor`] binds a configuration to a working directory and exposes the pipeline
//! step by step (`locate` → `extract` → `write_document`) as well as in one call (`run`).
//! Clients that report progress between steps, like the CLI, call the steps individually.
//!
//! Nothing here prints or exits. Every step returns a `Result` and errors are left for the
//! caller to present.

use crate::config::ExtractConfig;
use crate::error::Result;
use crate::extract::{Region, RegionExtractor};
use crate::locate::LogLocator;
use crate::render::DocumentRenderer;
use std::path::{Path, PathBuf};

/// Outcome of a full run.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub source: PathBuf,
    pub output: PathBuf,
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone)]
pub struct PromptExtractor {
    root: PathBuf,
    config: ExtractConfig,
    locator: LogLocator,
    extractor: RegionExtractor,
    renderer: DocumentRenderer,
}

impl PromptExtractor {
    pub fn new(root: impl Into<PathBuf>, config: ExtractConfig) -> Result<Self> {
        config.validate()?;
        let locator = LogLocator::new(config.input.clone())?;
        let extractor = RegionExtractor::new(config.markers.clone(), config.trailing)?;
        let renderer = DocumentRenderer::new(config.document.clone());
        Ok(Self {
            root: root.into(),
            config,
            locator,
            extractor,
            renderer,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Output path, resolved against the working directory when relative.
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.config.document.output_file)
    }

    pub fn locate(&self) -> Result<PathBuf> {
        self.locator.select(&self.root)
    }

    pub fn extract(&self, source: &Path) -> Result<Vec<Region>> {
        self.extractor.extract_file(source)
    }

    pub fn render(&self, regions: &[Region]) -> Result<String> {
        self.renderer.render(regions)
    }

    pub fn write_document(&self, regions: &[Region]) -> Result<PathBuf> {
        let output = self.output_path();
        self.renderer.write(regions, &output)?;
        Ok(output)
    }

    pub fn run(&self) -> Result<Extraction> {
        let source = self.locate()?;
        let regions = self.extract(&source)?;
        let output = self.write_document(&regions)?;
        Ok(Extraction {
            source,
            output,
            regions,
        })
    }
}
