use std::cmp::max;

#[derive(Default, Debug, Clone)]
pub(crate) struct Table {
    widths: Vec<usize>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub(crate) fn push_row(&mut self, row: Vec<String>) {
        if row.len() > self.widths.len() {
            self.widths.resize(row.len(), 0);
        }
        for (width, cell) in self.widths.iter_mut().zip(&row) {
            *width = max(*width, cell.chars().count());
        }
        self.rows.push(row);
    }

    pub(crate) fn render(&self, separator: &str) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let mut line = String::new();
            for (cell, &width) in row.iter().zip(&self.widths) {
                line.push_str(cell);
                for _ in cell.chars().count()..width {
                    line.push(' ');
                }
                line.push_str(separator);
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }
}
