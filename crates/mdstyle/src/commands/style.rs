//! Style options shared by all commands.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use mdstyle_cache::{HttpFetcher, StylesheetCache, StylesheetFetcher};
use mdstyle_config::{CliSettings, Config, FallbackPolicy};
use mdstyle_core::Converter;
use mdstyle_diagrams::{DiagramCache, FileCache, KrokiRenderer, MemoryCache};
use mdstyle_renderer::RenderOptions;

use crate::error::CliError;

/// Style flags. Each overrides the matching `[defaults]` value.
#[derive(Args)]
pub(crate) struct StyleArgs {
    /// Path to configuration file (default: auto-discover mdstyle.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Theme: `default` / `grace` (or 经典 / 优雅).
    #[arg(long)]
    theme: Option<String>,

    /// Font family: 无衬线 / 衬线 / 等宽 (or sans-serif / serif / monospace).
    #[arg(long)]
    font_family: Option<String>,

    /// Font size, 12px to 16px.
    #[arg(long)]
    font_size: Option<String>,

    /// Primary color: a named color such as 翡翠绿, or #rrggbb.
    #[arg(long)]
    primary_color: Option<String>,

    /// Image caption source: title-alt, alt-title, title, alt, none.
    #[arg(long)]
    legend: Option<String>,

    /// highlight.js theme for code blocks.
    #[arg(long)]
    code_theme: Option<String>,

    /// CSS file layered over the theme.
    #[arg(long)]
    custom_css: Option<PathBuf>,

    /// Indent the first line of paragraphs.
    #[arg(long)]
    indent: bool,

    /// Turn external links into numbered citations.
    #[arg(long)]
    citations: bool,

    /// Hide the macOS-style window dots on code blocks.
    #[arg(long)]
    no_mac: bool,

    /// What to do with unrecognized option values.
    #[arg(long, value_parser = clap::value_parser!(FallbackPolicy))]
    fallback: Option<FallbackPolicy>,

    /// Kroki server URL for diagram rendering (overrides config).
    #[arg(long, env = "MDSTYLE_KROKI_URL")]
    kroki_url: Option<String>,
}

impl StyleArgs {
    /// Load configuration and build the converter and render options.
    pub(crate) fn prepare(self) -> Result<(Converter, RenderOptions), CliError> {
        let cli_settings = CliSettings {
            theme: self.theme,
            font_family: self.font_family,
            font_size: self.font_size,
            primary_color: self.primary_color,
            legend: self.legend,
            code_theme: self.code_theme,
            use_indent: self.indent.then_some(true),
            citations: self.citations.then_some(true),
            mac_code_blocks: self.no_mac.then_some(false),
            fallback: self.fallback,
            custom_css: self.custom_css,
            kroki_url: self.kroki_url,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let mut options = config.render_options()?;
        if let Some(path) = &config.defaults.custom_css {
            options.custom_css = Some(std::fs::read_to_string(path)?);
        }

        Ok((build_converter(&config), options))
    }
}

fn build_converter(config: &Config) -> Converter {
    let fetcher: Box<dyn StylesheetFetcher> = Box::new(HttpFetcher::new(
        config.assets.stylesheet_url.clone(),
        config.assets.timeout(),
    ));
    let converter = Converter::new(Arc::new(StylesheetCache::new(fetcher)));

    let diagrams = &config.diagrams_resolved;
    let Some(kroki_url) = &diagrams.kroki_url else {
        return converter;
    };
    let cache: Box<dyn DiagramCache> = match &diagrams.cache_dir {
        Some(dir) => Box::new(FileCache::new(dir.clone())),
        None => Box::new(MemoryCache::default()),
    };
    converter.with_diagrams(Arc::new(
        KrokiRenderer::new(kroki_url.clone(), diagrams.timeout).with_cache(cache),
    ))
}
