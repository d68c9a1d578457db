use std::collections::HashMap;
use std::io::stdout;
use std::ops::Range;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use scrollspy_core::{
    ActiveSectionTracker, PageDoc, PollSubscription, Subscription, ViewportObserver,
};
use scrollspy_protocol::{
    DEFAULT_VISIBILITY_THRESHOLD, DisplayMeta, NavCommand, ObservationBatch, ObserverOptions,
    SectionId, ThemeToken,
};

const SIDEBAR_WIDTH: u16 = 30;
const SCROLL_STEP: usize = 2;

fn tone_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::ToneSky => Color::Cyan,
        ThemeToken::ToneAmber => Color::Yellow,
        ThemeToken::ToneEmerald => Color::Green,
        ThemeToken::ToneViolet => Color::Magenta,
        ThemeToken::ToneRose => Color::LightRed,
        _ => Color::Gray,
    }
}

/// The article prewrapped for a given content width, with each section's
/// line range. Line ranges are the anchors the visibility check works on.
struct ArticleLayout {
    lines: Vec<Line<'static>>,
    ranges: Vec<(SectionId, Range<usize>)>,
    width: u16,
}

impl ArticleLayout {
    fn build(page: &PageDoc, width: u16) -> Self {
        let wrap_width = width.max(20) as usize;
        let mut lines: Vec<Line<'static>> = Vec::new();
        let mut ranges = Vec::new();

        if let Some(subtitle) = &page.subtitle {
            lines.push(Line::from(Span::styled(
                subtitle.clone(),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            )));
            lines.push(Line::default());
        }

        for body in &page.sections {
            let start = lines.len();
            let tone = tone_color(body.tone);

            lines.push(Line::from(Span::styled(
                format!("{} {}", body.icon, body.title),
                Style::default().fg(tone).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                "─".repeat(wrap_width.min(60)),
                Style::default().fg(Color::DarkGray),
            )));

            for paragraph in &body.paragraphs {
                lines.push(Line::default());
                for wrapped in wrap_text(paragraph, wrap_width) {
                    lines.push(Line::from(wrapped));
                }
            }
            for link in &body.links {
                lines.push(Line::default());
                lines.push(Line::from(Span::styled(
                    format!("→ {} ({})", link.label, link.url),
                    Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
                )));
            }
            lines.push(Line::default());
            lines.push(Line::default());

            ranges.push((body.id.clone(), start..lines.len()));
        }

        Self {
            lines,
            ranges,
            width,
        }
    }

    fn section_start(&self, id: &str) -> Option<usize> {
        self.ranges
            .iter()
            .find(|(section, _)| *section == id)
            .map(|(_, range)| range.start)
    }

    /// Visible fraction of each section for a viewport of article lines.
    fn visibility(&self, viewport: &Range<usize>) -> Vec<(SectionId, f64)> {
        self.ranges
            .iter()
            .map(|(id, range)| {
                let overlap = range.end.min(viewport.end).saturating_sub(range.start.max(viewport.start));
                let height = range.len().max(1);
                (id.clone(), overlap as f64 / height as f64)
            })
            .collect()
    }
}

/// Greedy word wrap by character count. Terminal cells are close enough
/// for article prose; no grapheme-width dependency needed here.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            out.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        out.push(line);
    }
    if out.is_empty() {
        out.push(String::new());
    }
    out
}

/// Polling host: visibility is re-derived from the scroll offset every
/// frame, so the subscription itself holds nothing.
struct FrameObserver;

impl ViewportObserver for FrameObserver {
    fn subscribe(
        &mut self,
        _anchor_ids: &[SectionId],
        _options: ObserverOptions,
    ) -> Box<dyn Subscription> {
        Box::new(PollSubscription)
    }
}

pub fn run(page: &PageDoc, mut tracker: ActiveSectionTracker<DisplayMeta>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Every section's "anchor" is its line range, known once the article is
    // laid out; line ranges always resolve, so this registers everything.
    {
        let registry = tracker.registry();
        let resolved = registry.resolve_anchors(|id| registry.position(id));
        let anchor_ids: Vec<SectionId> = resolved.into_iter().map(|(id, _)| id).collect();
        let subscription = FrameObserver.subscribe(&anchor_ids, ObserverOptions::default());
        tracker.attach_observation(subscription);
    }

    let mut scroll: usize = 0;
    let mut prev_visible: HashMap<SectionId, bool> = HashMap::new();

    let initial_size = terminal.size()?;
    let mut article =
        ArticleLayout::build(page, initial_size.width.saturating_sub(SIDEBAR_WIDTH + 4).max(20));

    loop {
        let term_size = terminal.size()?;
        let content_width = term_size.width.saturating_sub(SIDEBAR_WIDTH + 4).max(20);
        let content_height = term_size.height.saturating_sub(3) as usize;

        // Reflow on resize; section line ranges move with the wrap width.
        if article.width != content_width {
            article = ArticleLayout::build(page, content_width);
        }

        // Perform scrolls requested by the tracker (nav clicks, back to top).
        for command in tracker.drain_commands() {
            match command {
                NavCommand::ScrollIntoView { id, .. } => {
                    if let Some(start) = article.section_start(&id) {
                        scroll = start;
                    }
                }
                NavCommand::ScrollToTop { .. } => scroll = 0,
            }
        }
        let max_scroll = article.lines.len().saturating_sub(content_height);
        scroll = scroll.min(max_scroll);

        // Observation pass: report threshold crossings since last frame,
        // batched, in layout order.
        let viewport = scroll..scroll + content_height;
        let mut batch = ObservationBatch::new();
        for (id, fraction) in article.visibility(&viewport) {
            let visible = fraction >= DEFAULT_VISIBILITY_THRESHOLD;
            let was_visible = prev_visible.insert(id.clone(), visible).unwrap_or(false);
            if visible != was_visible {
                batch.push(id, visible);
            }
        }
        if !batch.is_empty() {
            tracker.apply_batch(&batch);
        }

        terminal.draw(|frame| {
            let [sidebar_area, content_area] =
                Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
                    .areas(frame.area());

            // Sidebar nav: one entry per section, active entry highlighted.
            let mut nav_lines: Vec<Line> = vec![Line::default()];
            for (i, section) in tracker.sections().iter().enumerate() {
                let active = tracker.is_active(&section.id);
                let marker = if active { "▸ " } else { "  " };
                let style = if active {
                    Style::default()
                        .fg(tone_color(section.meta.tone))
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };
                nav_lines.push(Line::from(Span::styled(
                    format!("{marker}{} {} {}", i + 1, section.meta.icon, section.title),
                    style,
                )));
            }
            nav_lines.push(Line::default());
            nav_lines.push(Line::from(Span::styled(
                " 1-9 jump · b top · q quit",
                Style::default().fg(Color::DarkGray),
            )));
            let sidebar = Paragraph::new(nav_lines).block(
                Block::default()
                    .title(" Sections ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(sidebar, sidebar_area);

            // Article pane: the visible slice of prewrapped lines.
            let end = (scroll + content_height).min(article.lines.len());
            let visible_lines: Vec<Line> = article.lines[scroll..end].to_vec();
            let title = if scroll > 0 {
                format!(" {} — ↑ b for top ", page.title)
            } else {
                format!(" {} ", page.title)
            };
            let content = Paragraph::new(visible_lines).block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
            frame.render_widget(content, content_area);
        })?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Up | KeyCode::Char('k') => scroll = scroll.saturating_sub(SCROLL_STEP),
                    KeyCode::Down | KeyCode::Char('j') => {
                        scroll = (scroll + SCROLL_STEP).min(max_scroll);
                    }
                    KeyCode::PageUp => scroll = scroll.saturating_sub(content_height),
                    KeyCode::PageDown => scroll = (scroll + content_height).min(max_scroll),
                    KeyCode::Home => scroll = 0,
                    KeyCode::End => scroll = max_scroll,
                    KeyCode::Char('b') => tracker.scroll_to_top(),
                    KeyCode::Char(c @ '1'..='9') => {
                        let index = c as usize - '1' as usize;
                        if let Some(section) = tracker.sections().get(index) {
                            let id = section.id.clone();
                            // Unknown ids are a nav no-op; these come from
                            // the registry, so this never actually fails.
                            let _ = tracker.navigate_to(&id);
                        }
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => scroll = (scroll + SCROLL_STEP).min(max_scroll),
                    MouseEventKind::ScrollUp => scroll = scroll.saturating_sub(SCROLL_STEP),
                    _ => {}
                },
                _ => {}
            }
        }
    }

    tracker.teardown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_width() {
        let wrapped = wrap_text("the quick brown fox jumps over the lazy dog", 15);
        assert!(wrapped.iter().all(|l| l.chars().count() <= 15));
        assert_eq!(wrapped.join(" "), "the quick brown fox jumps over the lazy dog");
    }

    #[test]
    fn layout_ranges_cover_sections_in_order() {
        let page = PageDoc::from_json(include_bytes!("../../../demos/sample-page.json"))
            .expect("demo page parses");
        let layout = ArticleLayout::build(&page, 60);

        assert_eq!(layout.ranges.len(), page.sections.len());
        for window in layout.ranges.windows(2) {
            assert!(window[0].1.end <= window[1].1.start);
            assert!(window[0].1.start < window[1].1.start);
        }
    }

    #[test]
    fn visibility_fraction_tracks_viewport() {
        let page = PageDoc::from_json(include_bytes!("../../../demos/sample-page.json"))
            .expect("demo page parses");
        let layout = ArticleLayout::build(&page, 60);

        let (first_id, first_range) = layout.ranges[0].clone();
        let fully_visible = layout.visibility(&(0..layout.lines.len()));
        assert!(fully_visible.iter().all(|(_, f)| (*f - 1.0).abs() < 1e-9));

        // Viewport past the first section: fraction drops to zero.
        let past = layout.visibility(&(first_range.end..layout.lines.len()));
        let first = past
            .iter()
            .find(|(id, _)| *id == first_id)
            .map(|(_, f)| *f)
            .unwrap_or(1.0);
        assert!(first.abs() < 1e-9);
    }
}
