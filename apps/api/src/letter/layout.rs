//! Greedy word-wrap and pagination of the normalized letter text.
//!
//! Each newline-delimited segment becomes a block of wrapped lines (an empty
//! segment is one blank line). Lines advance by a fixed line height and a new
//! page starts whenever the next line would cross the bottom margin.

use serde::Serialize;

use crate::letter::font_metrics::{get_metrics, FontMetricTable, PageConfig};

/// A single positioned line. Coordinates are PDF user space (origin bottom-left).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaidOutLine {
    pub text: String,
    pub x_pt: f32,
    pub baseline_pt: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageLayout {
    pub lines: Vec<LaidOutLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetterLayout {
    pub pages: Vec<PageLayout>,
}

impl LetterLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }
}

/// Lays out `text`, which must already be normalized. Leading and trailing
/// whitespace of the whole letter is dropped. Always yields at least one page.
pub fn layout_letter(text: &str, config: &PageConfig) -> LetterLayout {
    let metrics = get_metrics(&config.font);
    let max_width = config.text_width_em();

    let lines: Vec<String> = text
        .trim()
        .split('\n')
        .flat_map(|segment| wrap_segment(segment, metrics, max_width))
        .collect();

    let per_page = config.lines_per_page();
    let pages = lines
        .chunks(per_page)
        .map(|chunk| PageLayout {
            lines: chunk
                .iter()
                .enumerate()
                .map(|(row, text)| LaidOutLine {
                    text: text.clone(),
                    x_pt: config.margin_left_pt,
                    baseline_pt: baseline_for_row(row, config),
                })
                .collect(),
        })
        .collect::<Vec<_>>();

    if pages.is_empty() {
        return LetterLayout {
            pages: vec![PageLayout::default()],
        };
    }
    LetterLayout { pages }
}

/// Text sits vertically centred in its line box.
fn baseline_for_row(row: usize, config: &PageConfig) -> f32 {
    let top = config.margin_top_pt + row as f32 * config.line_height_pt;
    let baseline_from_top = top + 0.5 * config.line_height_pt + 0.3 * config.font_size_pt;
    config.page_height_pt - baseline_from_top
}

/// Greedy word-wrap of one segment to `max_width` em. Runs of whitespace
/// collapse to one space. A word wider than the line is split by character.
pub fn wrap_segment(segment: &str, metrics: &FontMetricTable, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in segment.split_whitespace() {
        let word_w = metrics.measure_str(word);
        let space_w = if current.is_empty() {
            0.0
        } else {
            metrics.space_width
        };

        if current_width + space_w + word_w <= max_width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width += space_w + word_w;
            continue;
        }

        // Word doesn't fit on this line.
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }

        if word_w <= max_width {
            current.push_str(word);
            current_width = word_w;
        } else {
            for c in word.chars() {
                let char_w = metrics.char_width(c);
                if !current.is_empty() && current_width + char_w > max_width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(c);
                current_width += char_w;
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
