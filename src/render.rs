use std::fmt::Write;

use crate::expand::aggregate;
use crate::types::{Bin, PackingResult};

const MAX_WIDTH: f64 = 80.0;

/// Stock count followed by one row per bin: index, then its cut lengths.
pub fn render_table(result: &PackingResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Stock units needed: {}", result.bin_count());
    for (i, bin) in result.bins.iter().enumerate() {
        let row: Vec<String> = std::iter::once((i + 1).to_string())
            .chain(bin.cuts.iter().map(u32::to_string))
            .collect();
        let _ = writeln!(out, "{}", row.join("\t"));
    }
    out
}

/// Same rows as [`render_table`] as CSV, with the count in the first row.
pub fn render_csv(result: &PackingResult) -> String {
    let mut out = String::from("stock_needed,bin,pieces\n");
    if result.bins.is_empty() {
        let _ = writeln!(out, "0,,");
        return out;
    }
    for (i, bin) in result.bins.iter().enumerate() {
        let count = if i == 0 {
            result.bin_count().to_string()
        } else {
            String::new()
        };
        let mut row = vec![count, (i + 1).to_string()];
        row.extend(bin.cuts.iter().map(u32::to_string));
        let _ = writeln!(out, "{}", row.join(","));
    }
    out
}

pub fn render_summary(result: &PackingResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Summary: {} stock unit{} of {} used, {} cuts, {:.1}% waste",
        result.bin_count(),
        if result.bin_count() == 1 { "" } else { "s" },
        result.stock_length,
        result.cut_count(),
        result.total_waste_percent(),
    );
    let cuts: Vec<u32> = result.bins.iter().flat_map(|b| b.cuts.iter().copied()).collect();
    for r in aggregate(&cuts) {
        let _ = writeln!(out, "  {:>8} x {}", r.length, r.quantity);
    }
    out
}

/// Draws one bin as a bar scaled to at most 80 columns.
///
/// Each cut is a `|`-delimited segment labelled with its length when there is
/// room; the offcut is filled with `.`.
pub fn render_bin(stock_length: u32, bin: &Bin) -> String {
    if stock_length == 0 {
        return String::new();
    }
    let scale = MAX_WIDTH / stock_length as f64;
    let grid_w = (stock_length as f64 * scale).round() as usize;
    let mut bar = vec![' '; grid_w + 1];

    let mut start = 0u64;
    for &cut in &bin.cuts {
        let end = start + cut as u64;
        let sx = (start as f64 * scale).round() as usize;
        let ex = ((end as f64 * scale).round() as usize).min(grid_w);
        draw_segment(&mut bar, sx, ex, '-');

        let label: Vec<char> = cut.to_string().chars().collect();
        let inner = ex.saturating_sub(sx + 1);
        if inner >= label.len() {
            let lx = sx + 1 + (inner - label.len()) / 2;
            for (i, &ch) in label.iter().enumerate() {
                bar[lx + i] = ch;
            }
        }
        start = end;
    }

    let used_x = ((start as f64 * scale).round() as usize).min(grid_w);
    if used_x < grid_w {
        for cell in &mut bar[used_x + 1..grid_w] {
            *cell = '.';
        }
        bar[used_x] = '|';
        bar[grid_w] = '|';
    }

    let mut line: String = bar.into_iter().collect();
    line.truncate(line.trim_end().len());
    line.push('\n');
    line
}

fn draw_segment(bar: &mut [char], sx: usize, ex: usize, fill: char) {
    if sx >= bar.len() {
        return;
    }
    for cell in bar.iter_mut().take(ex).skip(sx + 1) {
        *cell = fill;
    }
    bar[sx] = '|';
    if ex < bar.len() {
        bar[ex] = '|';
    }
}
