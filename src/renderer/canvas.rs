//! Half-block pixel canvas
//!
//! Each terminal cell shows two vertically stacked pixels using `▀` with the
//! top pixel as foreground and the bottom as background. Text labels are
//! printed over the pixels after they are flushed.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Color},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Mix toward black. `keep_256` is how much of the colour survives (256 = all).
    pub const fn darken(self, keep_256: u16) -> Rgb {
        Rgb(
            ((self.0 as u16 * keep_256) >> 8) as u8,
            ((self.1 as u16 * keep_256) >> 8) as u8,
            ((self.2 as u16 * keep_256) >> 8) as u8,
        )
    }

    fn to_color(self) -> Color {
        Color::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

/// Text drawn on top of the pixels, in cell coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub col: u16,
    pub row: u16,
    pub text: String,
    pub fg: Rgb,
}

#[derive(Debug, Clone)]
pub struct Canvas {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
    labels: Vec<Label>,
}

impl Canvas {
    /// Canvas covering `cols` x `rows` terminal cells
    pub fn new(cols: u16, rows: u16, fill: Rgb) -> Self {
        let w = cols as usize;
        let h = rows as usize * 2;
        Self {
            w,
            h,
            px: vec![fill; w * h],
            labels: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn rows(&self) -> u16 {
        (self.h / 2) as u16
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.w = cols as usize;
        self.h = rows as usize * 2;
        self.px.resize(self.w * self.h, Rgb(0, 0, 0));
    }

    pub fn clear(&mut self, fill: Rgb) {
        self.px.fill(fill);
        self.labels.clear();
    }

    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, c: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.set(x + dx, y + dy, c);
            }
        }
    }

    /// Darken every pixel (translucent black overlay)
    pub fn dim(&mut self, keep_256: u16) {
        for px in &mut self.px {
            *px = px.darken(keep_256);
        }
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn label(&mut self, col: u16, row: u16, text: impl Into<String>, fg: Rgb) {
        self.labels.push(Label {
            col,
            row,
            text: text.into(),
            fg,
        });
    }

    /// Label centred horizontally on `row`
    pub fn label_centered(&mut self, row: u16, text: impl Into<String>, fg: Rgb) {
        let text = text.into();
        let len = text.chars().count();
        let col = self.w.saturating_sub(len) / 2;
        self.label(col as u16, row, text, fg);
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;
        let mut prev_fg = Rgb(0, 0, 0);
        let mut prev_bg = Rgb(0, 0, 0);
        let mut need_fg = true;
        let mut need_bg = true;

        for row in 0..rows {
            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if top == bot {
                    if need_bg || prev_bg != top {
                        queue!(out, style::SetBackgroundColor(top.to_color()))?;
                        prev_bg = top;
                        need_bg = false;
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if need_fg || prev_fg != top {
                        queue!(out, style::SetForegroundColor(top.to_color()))?;
                        prev_fg = top;
                        need_fg = false;
                    }
                    if need_bg || prev_bg != bot {
                        queue!(out, style::SetBackgroundColor(bot.to_color()))?;
                        prev_bg = bot;
                        need_bg = false;
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                need_fg = true;
                need_bg = true;
            }
        }

        for label in &self.labels {
            if (label.row as usize) >= rows || (label.col as usize) >= self.w {
                continue;
            }
            let room = self.w.saturating_sub(label.col as usize);
            let text: String = label.text.chars().take(room).collect();
            // Background comes from the bottom pixel of the first cell under the text
            let bg = self.get(label.col as usize, label.row as usize * 2 + 1);
            queue!(
                out,
                cursor::MoveTo(label.col, label.row),
                style::SetBackgroundColor(bg.to_color()),
                style::SetForegroundColor(label.fg.to_color()),
                style::Print(text),
            )?;
        }

        queue!(out, style::ResetColor)?;
        out.flush()
    }
}
