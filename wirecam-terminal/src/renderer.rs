//! ASCII line canvas for terminal rendering

use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wirecam_core::DrawingPort;

/// Character used to mark segment endpoints
pub const ENDPOINT_CHAR: char = 'o';

/// Terminal-cell canvas. Pixel space has +y up; rows are flipped when
/// plotting so the picture is not upside down.
pub struct AsciiCanvas {
    width: usize,
    height: usize,
    char_buffer: Vec<char>,
}

impl AsciiCanvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            char_buffer: vec![' '; width * height],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.char_buffer = vec![' '; width * height];
    }

    /// Character at a terminal cell, row 0 at the top
    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        if col < self.width && row < self.height {
            Some(self.char_buffer[row * self.width + col])
        } else {
            None
        }
    }

    /// Row-major text dump, one line per row
    pub fn rows(&self) -> Vec<String> {
        if self.width == 0 {
            return vec![String::new(); self.height];
        }
        self.char_buffer
            .chunks(self.width)
            .map(|row| row.iter().collect())
            .collect()
    }

    fn plot(&mut self, x: f64, y: f64, c: char) {
        if self.width == 0 || self.height == 0 || !x.is_finite() || !y.is_finite() {
            return;
        }
        if x < 0.0 || y < 0.0 || x > self.width as f64 || y > self.height as f64 {
            return;
        }

        // x == width and y == height are on the canvas edge
        let col = (x.floor() as usize).min(self.width - 1);
        let row = self.height - 1 - (y.floor() as usize).min(self.height - 1);
        self.char_buffer[row * self.width + col] = c;
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let c = self.char_buffer[idx];

                let color = match c {
                    ENDPOINT_CHAR => Color::Red,
                    ' ' => Color::DarkGrey,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl DrawingPort for AsciiCanvas {
    fn clear(&mut self) {
        self.char_buffer.fill(' ');
    }

    fn draw_segment(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        let (dx, dy) = (x1 - x0, y1 - y0);
        let stroke = line_char(dx, dy);

        // One sample per cell along the longer axis
        let steps = dx.abs().max(dy.abs()).ceil();
        if steps.is_finite() && steps >= 1.0 {
            let steps = steps as usize;
            for i in 0..=steps {
                let t = i as f64 / steps as f64;
                self.plot(x0 + dx * t, y0 + dy * t, stroke);
            }
        }

        self.plot(x0, y0, ENDPOINT_CHAR);
        self.plot(x1, y1, ENDPOINT_CHAR);
    }
}

/// Pick a stroke character from the segment direction (+y up)
fn line_char(dx: f64, dy: f64) -> char {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ay < ax * 0.5 {
        '-'
    } else if ax < ay * 0.5 {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '/'
    } else {
        '\\'
    }
}
