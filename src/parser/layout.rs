//! Layout analysis for PDF pages.
//!
//! A page's content stream is interpreted into positioned text spans and
//! image placements, spans are grouped into lines by baseline and lines into
//! blocks by spacing. The result is the [`Page`] model read by the outline
//! engine.

use std::collections::{HashMap, HashSet};

use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::model::{Block, Line, Page, Span};

use super::backend::{ContentOp, PageId, PdfBackend, PdfValue};

/// A text span with position and style information.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Estimated width of the text
    pub width: f32,
    /// Font size in points
    pub font_size: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
}

impl TextSpan {
    /// Create a new text span. Width is estimated at half an em per
    /// character.
    pub fn new(text: String, x: f32, y: f32, font_size: f32, font_name: String) -> Self {
        let width = text.chars().count() as f32 * font_size * 0.5;
        Self {
            text,
            x,
            y,
            width,
            font_size,
            font_name,
        }
    }

    /// Right edge of the span.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    fn same_style(&self, other: &TextSpan) -> bool {
        self.font_name == other.font_name && (self.font_size - other.font_size).abs() < 0.01
    }
}

/// An image drawn on the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePlacement {
    /// Top edge in user space
    pub top: f32,
}

/// Raw positioned content of one page, before grouping.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
    /// Text spans in content-stream order
    pub spans: Vec<TextSpan>,
    /// Image placements
    pub images: Vec<ImagePlacement>,
}

/// A text line composed of spans on the same baseline.
#[derive(Debug, Clone)]
pub struct TextLine {
    /// The spans in this line, sorted by X position
    pub spans: Vec<TextSpan>,
    /// Y position (baseline)
    pub y: f32,
    /// Leftmost X position
    pub x: f32,
    /// Dominant font size in this line
    pub font_size: f32,
}

impl TextLine {
    /// Create a new text line from spans.
    pub fn from_spans(mut spans: Vec<TextSpan>) -> Self {
        if spans.is_empty() {
            return Self {
                spans,
                y: 0.0,
                x: 0.0,
                font_size: 0.0,
            };
        }

        spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

        // Dominant font size, weighted by text length
        let total_chars: usize = spans.iter().map(|s| s.text.len()).sum();
        let weighted_size: f32 = spans
            .iter()
            .map(|s| s.font_size * s.text.len() as f32)
            .sum();
        let font_size = if total_chars > 0 {
            weighted_size / total_chars as f32
        } else {
            spans[0].font_size
        };

        let y = spans[0].y;
        let x = spans[0].x;

        Self {
            spans,
            y,
            x,
            font_size,
        }
    }

    /// Convert into a model line, coalescing neighbouring spans that share
    /// font and size.
    pub fn into_line(self) -> Line {
        let mut spans: Vec<Span> = Vec::new();
        let mut prev: Option<&TextSpan> = None;

        for span in &self.spans {
            let space = prev.is_some_and(|p| needs_space(p, span));
            let same_style = prev.is_some_and(|p| p.same_style(span));
            prev = Some(span);

            if same_style {
                if let Some(last) = spans.last_mut() {
                    if space {
                        last.text.push(' ');
                    }
                    last.text.push_str(&span.text);
                    continue;
                }
            }

            let text = if space {
                format!(" {}", span.text)
            } else {
                span.text.clone()
            };
            spans.push(Span::new(
                text,
                f64::from(span.font_size),
                span.font_name.clone(),
            ));
        }

        Line::new(spans)
    }
}

/// Decide whether a space separates two spans on the same line.
fn needs_space(prev: &TextSpan, curr: &TextSpan) -> bool {
    if prev.text.ends_with(' ')
        || prev.text.ends_with('\u{00A0}')
        || curr.text.starts_with(' ')
        || curr.text.starts_with('\u{00A0}')
    {
        return false;
    }

    let gap = curr.x - prev.right();
    let char_count = curr.text.chars().count();
    let avg_char_width = if char_count > 0 && curr.width > 0.0 {
        curr.width / char_count as f32
    } else {
        curr.font_size * 0.5
    };

    if gap <= avg_char_width * 0.2 {
        return false;
    }

    // No spaces between Chinese/Japanese characters
    let prev_cjk = prev
        .text
        .chars()
        .last()
        .is_some_and(is_spaceless_script_char);
    let curr_cjk = curr
        .text
        .chars()
        .next()
        .is_some_and(is_spaceless_script_char);
    !(prev_cjk && curr_cjk)
}

/// A group of lines forming one text block.
#[derive(Debug, Clone)]
struct TextBlock {
    lines: Vec<TextLine>,
}

impl TextBlock {
    fn top(&self) -> f32 {
        self.lines
            .first()
            .map(|l| l.y + l.font_size * 0.8)
            .unwrap_or(0.0)
    }
}

/// Affine matrix `[a b c d e f]` in PDF row-vector convention.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix([f32; 6]);

impl Matrix {
    const IDENTITY: Matrix = Matrix([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    fn translation(tx: f32, ty: f32) -> Self {
        Matrix([1.0, 0.0, 0.0, 1.0, tx, ty])
    }

    fn from_op(op: &ContentOp) -> Option<Self> {
        let mut m = [0.0; 6];
        for (i, slot) in m.iter_mut().enumerate() {
            *slot = op.number(i)?;
        }
        Some(Matrix(m))
    }

    /// `self × other`
    fn multiply(&self, other: &Matrix) -> Matrix {
        let [a1, b1, c1, d1, e1, f1] = self.0;
        let [a2, b2, c2, d2, e2, f2] = other.0;
        Matrix([
            a1 * a2 + b1 * c2,
            a1 * b2 + b1 * d2,
            c1 * a2 + d1 * c2,
            c1 * b2 + d1 * d2,
            e1 * a2 + f1 * c2 + e2,
            e1 * b2 + f1 * d2 + f2,
        ])
    }

    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, c, d, e, f] = self.0;
        (x * a + y * c + e, x * b + y * d + f)
    }

    fn horizontal_scale(&self) -> f32 {
        let [a, b, ..] = self.0;
        (a * a + b * b).sqrt()
    }

    fn vertical_scale(&self) -> f32 {
        let [_, _, c, d, ..] = self.0;
        (c * c + d * d).sqrt()
    }
}

/// Text state tracked while walking a content stream.
#[derive(Debug, Clone)]
struct TextState {
    matrix: Matrix,
    line_matrix: Matrix,
    leading: f32,
    font_key: Vec<u8>,
    font_name: String,
    font_size: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
            leading: 0.0,
            font_key: Vec::new(),
            font_name: String::new(),
            font_size: 12.0,
        }
    }
}

impl TextState {
    fn begin_text(&mut self) {
        self.matrix = Matrix::IDENTITY;
        self.line_matrix = Matrix::IDENTITY;
    }

    fn move_line(&mut self, tx: f32, ty: f32) {
        self.line_matrix = Matrix::translation(tx, ty).multiply(&self.line_matrix);
        self.matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        let leading = if self.leading != 0.0 {
            self.leading
        } else {
            self.font_size * 1.2
        };
        self.move_line(0.0, -leading);
    }

    fn advance(&mut self, tx: f32) {
        self.matrix = Matrix::translation(tx, 0.0).multiply(&self.matrix);
    }
}

/// Walks a page's content stream and collects spans and image placements.
pub struct ContentInterpreter<'a, B: PdfBackend> {
    backend: &'a B,
    page: PageId,
    fonts: HashMap<Vec<u8>, String>,
    images: HashSet<Vec<u8>>,
}

/// Adjustment (in thousandths of an em) treated as a word break inside TJ.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

impl<'a, B: PdfBackend> ContentInterpreter<'a, B> {
    /// Create an interpreter for one page.
    pub fn new(
        backend: &'a B,
        page: PageId,
        fonts: HashMap<Vec<u8>, String>,
        images: HashSet<Vec<u8>>,
    ) -> Self {
        Self {
            backend,
            page,
            fonts,
            images,
        }
    }

    /// Interpret content operations.
    pub fn run(&self, ops: &[ContentOp]) -> (Vec<TextSpan>, Vec<ImagePlacement>) {
        let mut spans = Vec::new();
        let mut images = Vec::new();
        let mut ctm = Matrix::IDENTITY;
        let mut ctm_stack: Vec<Matrix> = Vec::new();
        let mut state = TextState::default();
        let mut in_text = false;

        for op in ops {
            match op.operator.as_str() {
                "q" => ctm_stack.push(ctm),
                "Q" => {
                    if let Some(saved) = ctm_stack.pop() {
                        ctm = saved;
                    }
                }
                "cm" => {
                    if let Some(m) = Matrix::from_op(op) {
                        ctm = m.multiply(&ctm);
                    }
                }
                "BT" => {
                    in_text = true;
                    state.begin_text();
                }
                "ET" => in_text = false,
                "Tf" => {
                    if let Some(PdfValue::Name(key)) = op.operands.first() {
                        state.font_name = self
                            .fonts
                            .get(key)
                            .cloned()
                            .unwrap_or_else(|| String::from_utf8_lossy(key).to_string());
                        state.font_key = key.clone();
                    }
                    if let Some(size) = op.number(1) {
                        state.font_size = size;
                    }
                }
                "TL" => {
                    if let Some(leading) = op.number(0) {
                        state.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if let (Some(tx), Some(ty)) = (op.number(0), op.number(1)) {
                        if op.operator == "TD" {
                            state.leading = -ty;
                        }
                        state.move_line(tx, ty);
                    }
                }
                "Tm" => {
                    if let Some(m) = Matrix::from_op(op) {
                        state.line_matrix = m;
                        state.matrix = m;
                    }
                }
                "T*" => state.next_line(),
                "Tj" | "TJ" | "'" | "\"" => {
                    if matches!(op.operator.as_str(), "'" | "\"") {
                        state.next_line();
                    }
                    if !in_text {
                        continue;
                    }
                    let operand = match op.operator.as_str() {
                        "\"" => op.operands.get(2),
                        _ => op.operands.first(),
                    };
                    if let Some(operand) = operand {
                        if let Some(span) = self.show_text(operand, &mut state, &ctm) {
                            spans.push(span);
                        }
                    }
                }
                "Do" => {
                    if let Some(PdfValue::Name(name)) = op.operands.first() {
                        if self.images.contains(name) {
                            let top = [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]
                                .iter()
                                .map(|&(x, y)| ctm.apply(x, y).1)
                                .fold(f32::MIN, f32::max);
                            images.push(ImagePlacement { top });
                        }
                    }
                }
                _ => {}
            }
        }

        (spans, images)
    }

    /// Decode a text-showing operand, advance the text matrix and return the
    /// positioned span.
    fn show_text(
        &self,
        operand: &PdfValue,
        state: &mut TextState,
        ctm: &Matrix,
    ) -> Option<TextSpan> {
        let mut text = String::new();
        // Advance in thousandths of an em
        let mut advance = 0.0f32;

        match operand {
            PdfValue::Str(bytes) => {
                let decoded = self.backend.decode_text(self.page, &state.font_key, bytes);
                advance += decoded.chars().count() as f32 * 500.0;
                text.push_str(&decoded);
            }
            PdfValue::Array(items) => {
                for item in items {
                    match item {
                        PdfValue::Str(bytes) => {
                            let decoded =
                                self.backend.decode_text(self.page, &state.font_key, bytes);
                            advance += decoded.chars().count() as f32 * 500.0;
                            text.push_str(&decoded);
                        }
                        other => {
                            let Some(n) = other.as_number() else {
                                continue;
                            };
                            advance -= n;
                            // Large negative adjustments are word breaks
                            if -n > TJ_SPACE_THRESHOLD
                                && !text.is_empty()
                                && !text.ends_with(' ')
                                && !text.ends_with('\u{00A0}')
                                && !text.chars().last().is_some_and(is_spaceless_script_char)
                            {
                                text.push(' ');
                            }
                        }
                    }
                }
            }
            _ => return None,
        }

        let render = state.matrix.multiply(ctm);
        let (x, y) = render.apply(0.0, 0.0);
        let size = state.font_size * render.vertical_scale();
        let tx = advance / 1000.0 * state.font_size;
        let width = tx * render.horizontal_scale();
        state.advance(tx);

        if text.trim().is_empty() {
            return None;
        }

        let mut span = TextSpan::new(text, x, y, size, state.font_name.clone());
        if width > 0.0 {
            span.width = width;
        }
        Some(span)
    }
}

/// Layout analyzer for extracting positioned content from PDF pages.
pub struct LayoutAnalyzer<'a, B: PdfBackend> {
    backend: &'a B,
}

impl<'a, B: PdfBackend> LayoutAnalyzer<'a, B> {
    /// Create a new layout analyzer.
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Interpret a page's content stream into positioned spans and images.
    pub fn extract_page(&self, page_id: PageId) -> Result<PageContent> {
        let (width, height) = self.backend.page_size(page_id);
        let fonts = self.backend.page_fonts(page_id)?;
        let images: HashSet<Vec<u8>> = self.backend.page_images(page_id).into_iter().collect();
        let data = self.backend.page_content(page_id)?;
        let ops = self.backend.decode_content(&data)?;

        let (spans, images) = ContentInterpreter::new(self.backend, page_id, fonts, images).run(&ops);
        log::debug!(
            "Page {:?}: {} spans, {} images",
            page_id,
            spans.len(),
            images.len()
        );

        Ok(PageContent {
            width,
            height,
            spans,
            images,
        })
    }
}

/// Group positioned content into the page model.
///
/// Text blocks and image blocks are ordered top to bottom.
pub fn layout_page(content: PageContent, normalize_unicode: bool) -> Page {
    let mut page = Page::new(content.width, content.height);

    let mut spans = content.spans;
    if normalize_unicode {
        for span in &mut spans {
            span.text = span.text.nfc().collect();
        }
    }

    let lines = group_spans_into_lines(spans);
    let blocks = group_lines_into_blocks(lines);

    let mut images = content.images;
    images.sort_by(|a, b| b.top.partial_cmp(&a.top).unwrap_or(std::cmp::Ordering::Equal));
    let mut images = images.into_iter().peekable();

    for block in blocks {
        let top = block.top();
        while images.next_if(|img| img.top > top).is_some() {
            page.add_block(Block::image());
        }
        let lines = block.lines.into_iter().map(TextLine::into_line).collect();
        page.add_block(Block::text(lines));
    }
    for _ in images {
        page.add_block(Block::image());
    }

    page
}

/// Group spans into lines by baseline, top to bottom.
fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<TextLine> {
    if spans.is_empty() {
        return vec![];
    }

    // PDF Y grows upwards: sort by Y descending, then X
    spans.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut lines: Vec<TextLine> = Vec::new();
    let mut current_line_spans: Vec<TextSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let y_tolerance = span.font_size * 0.3;

        match current_y {
            Some(y) if (span.y - y).abs() <= y_tolerance => current_line_spans.push(span),
            _ => {
                if !current_line_spans.is_empty() {
                    lines.push(TextLine::from_spans(std::mem::take(&mut current_line_spans)));
                }
                current_y = Some(span.y);
                current_line_spans.push(span);
            }
        }
    }

    if !current_line_spans.is_empty() {
        lines.push(TextLine::from_spans(current_line_spans));
    }

    lines
}

/// Group lines into blocks based on spacing, size and indentation.
fn group_lines_into_blocks(lines: Vec<TextLine>) -> Vec<TextBlock> {
    if lines.is_empty() {
        return vec![];
    }

    let avg_spacing = calculate_avg_line_spacing(&lines);
    let mut blocks: Vec<TextBlock> = Vec::new();
    let mut current: Vec<TextLine> = Vec::new();

    for line in lines {
        if let Some(prev) = current.last() {
            if should_break_block(prev, &line, avg_spacing) {
                blocks.push(TextBlock {
                    lines: std::mem::take(&mut current),
                });
            }
        }
        current.push(line);
    }

    if !current.is_empty() {
        blocks.push(TextBlock { lines: current });
    }

    blocks
}

/// Calculate average line spacing.
fn calculate_avg_line_spacing(lines: &[TextLine]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return 12.0;
    }

    spacings.iter().sum::<f32>() / spacings.len() as f32
}

/// Determine if a new block should start.
fn should_break_block(prev_line: &TextLine, curr_line: &TextLine, avg_spacing: f32) -> bool {
    // Large spacing indicates new paragraph
    let spacing = (prev_line.y - curr_line.y).abs();
    if spacing > avg_spacing * 1.5 {
        return true;
    }

    // Significant font size change
    if (prev_line.font_size - curr_line.font_size).abs() > 1.0 {
        return true;
    }

    // Significant left margin change (indentation)
    (prev_line.x - curr_line.x).abs() > 20.0
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and extensions
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}
