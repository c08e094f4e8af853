use std::io::{self, Write};
use crossterm::style::{Color, Stylize};
use td_core::filter::TAG_PREVIEW_LIMIT;
use td_core::{max_score_for_tag, tag_score_preview, ArticleSummary, ArticleTag, ScoreBand, Tag, Weight};
use td_view::{DetailPanel, ViewState};

pub const BRAND: &str = "TD — Tagging";

pub fn band_color(band: ScoreBand) -> Color {
    match band {
        ScoreBand::High => Color::Green,
        ScoreBand::Medium => Color::Yellow,
        ScoreBand::Low => Color::Red,
    }
}

/// Plain-text or ANSI-colored output of catalog screens
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn banded(&self, text: String, score: Weight) -> String {
        if self.color {
            text.with(band_color(ScoreBand::from_score(score))).to_string()
        } else {
            text
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dark_grey().to_string()
        } else {
            text.to_string()
        }
    }

    fn alert(&self, text: &str) -> String {
        if self.color {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn tags(&self, out: &mut impl Write, tags: &[Tag]) -> io::Result<()> {
        for tag in tags {
            writeln!(out, "{} ({})", tag.name, tag.kind)?;
        }
        Ok(())
    }

    pub fn article_card(&self, out: &mut impl Write, index: usize, article: &ArticleSummary, tag: &str) -> io::Result<()> {
        let max_score = max_score_for_tag(article, tag);
        writeln!(out, "[{}] {}", index + 1, article.name)?;
        writeln!(
            out,
            "    {}  ID: {}  {}",
            self.banded(format!("{}%", max_score), max_score),
            article.id,
            article.source_name().unwrap_or("No source")
        )?;

        let (shown, hidden) = tag_score_preview(article, TAG_PREVIEW_LIMIT);
        if !shown.is_empty() {
            let mut pills: Vec<String> = shown
                .iter()
                .map(|s| format!("{}:{}", s.tag.name, s.weight))
                .collect();
            if hidden > 0 {
                pills.push(format!("+{}", hidden));
            }
            writeln!(out, "    {}", pills.join("  "))?;
        }
        if let Some(path) = &article.web_path {
            writeln!(out, "    {}", self.dim(path))?;
        }
        Ok(())
    }

    pub fn article_list(&self, out: &mut impl Write, state: &ViewState) -> io::Result<()> {
        if let Some(placeholder) = state.list_placeholder() {
            return writeln!(out, "{}", self.dim(&placeholder));
        }
        for (index, article) in state.filtered.iter().enumerate() {
            self.article_card(out, index, article, &state.criteria.selected_tag)?;
        }
        Ok(())
    }

    pub fn article_tags(&self, out: &mut impl Write, tags: &[ArticleTag]) -> io::Result<()> {
        for tag in tags {
            writeln!(
                out,
                "{} ({})",
                self.banded(format!("{}:{}", tag.tag_name, tag.weight), tag.weight),
                tag.model
            )?;
        }
        Ok(())
    }

    pub fn detail(&self, out: &mut impl Write, panel: &DetailPanel) -> io::Result<()> {
        let article = &panel.article;
        writeln!(out, "── {} ──", article.name)?;
        writeln!(
            out,
            "ID: {}  Source: {}  Content type: {}",
            article.id,
            article.source_name().unwrap_or_default(),
            article.content_type.as_deref().unwrap_or_default()
        )?;
        if let Some(path) = &article.web_path {
            writeln!(out, "Open source: {}", path)?;
        }
        if !panel.tags.is_empty() {
            writeln!(out, "Article tags:")?;
            self.article_tags(out, &panel.tags)?;
        }
        writeln!(out)?;
        writeln!(out, "{}", panel.content.text())
    }

    /// Whole browse screen
    pub fn screen(&self, out: &mut impl Write, state: &ViewState) -> io::Result<()> {
        writeln!(out, "{}", BRAND)?;

        let criteria = &state.criteria;
        let tag = if criteria.has_tag() {
            criteria.selected_tag.clone()
        } else {
            state.tag_selector_label().to_string()
        };
        writeln!(out, "Tag: {}   Score ≥ {}", tag, criteria.min_score)?;
        if !state.tags.is_empty() && !state.is_detail_open() {
            let options: Vec<String> = state.tags.iter().map(|t| format!("{} ({})", t.name, t.kind)).collect();
            writeln!(out, "{}", self.dim(&format!("Options: {}", options.join(", "))))?;
        }

        if state.can_pick_models_and_sources() {
            writeln!(out, "Models: {}  [selected: {}]", state.unique_models().join(", "), criteria.models.join(", "))?;
            writeln!(out, "Sources: {}  [selected: {}]", state.unique_sources().join(", "), criteria.sources.join(", "))?;
        } else {
            writeln!(out, "{}", self.dim("Load articles to choose models and sources"))?;
        }

        if let Some(error) = &state.error {
            writeln!(out, "{}", self.alert(&format!("⚠️ {}", error)))?;
        }
        let status = state.status_line();
        if !status.is_empty() {
            writeln!(out, "{}", status)?;
        }
        if !criteria.search_query.is_empty() {
            writeln!(out, "Search: {}", criteria.search_query)?;
        }
        writeln!(out)?;

        match &state.detail {
            Some(panel) => self.detail(out, panel),
            None => self.article_list(out, state),
        }
    }
}
