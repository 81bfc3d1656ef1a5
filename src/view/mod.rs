use colored::Colorize;

use crate::model::{Order, Product, Supplier};

pub const PRODUCT_HEADERS: &[&str] = &["id", "sku", "name", "price", "stock", "category"];
pub const SUPPLIER_HEADERS: &[&str] = &["id", "name", "contact", "email"];
pub const ORDER_HEADERS: &[&str] = &["id", "supplier", "items", "status", "total"];

pub fn notify_error(message: &str) {
    println!(
        "{}{}{} {}",
        "[".bold().white(),
        "ERR".bold().red(),
        "]".bold().white(),
        message.bold().white()
    );
}

pub fn notify_ok(message: &str) {
    println!(
        "{}{}{} {}",
        "[".bold().white(),
        "OK".bold().green(),
        "]".bold().white(),
        message
    );
}

/// Last 6 characters of an id, the form the backend ids are shown in.
pub fn short_id(id: &str) -> String {
    let count = id.chars().count();
    if count <= 6 {
        return id.to_string();
    }
    id.chars().skip(count - 6).collect()
}

fn money(currency: &str, amount: f64) -> String {
    format!("{currency}{amount}")
}

pub fn product_rows(products: &[Product], currency: &str) -> Vec<Vec<String>> {
    products
        .iter()
        .map(|p| {
            vec![
                p.id.clone(),
                p.sku.clone(),
                p.name.clone(),
                money(currency, p.price),
                p.stock.to_string(),
                p.category.clone(),
            ]
        })
        .collect()
}

pub fn supplier_rows(suppliers: &[Supplier]) -> Vec<Vec<String>> {
    suppliers
        .iter()
        .map(|s| {
            vec![
                s.id.clone(),
                s.name.clone(),
                s.contact.clone(),
                s.email.clone().unwrap_or_default(),
            ]
        })
        .collect()
}

pub fn order_rows(orders: &[Order], currency: &str) -> Vec<Vec<String>> {
    orders
        .iter()
        .map(|o| {
            let items = o
                .items
                .iter()
                .map(|i| format!("{} x{}", i.product.name(), i.quantity))
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                short_id(&o.id),
                o.supplier.name().to_string(),
                items,
                o.status.clone(),
                money(currency, o.total_amount),
            ]
        })
        .collect()
}

fn cell_width(cell: &str) -> usize {
    cell.chars().count()
}

/// Render a padded text table. Plain strings in, one string out; callers
/// decide where it goes.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| cell_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() && cell_width(cell) > widths[i] {
                widths[i] = cell_width(cell);
            }
        }
    }

    let mut out = String::new();
    for (i, header) in headers.iter().enumerate() {
        out.push_str(&format!("{:<width$}  ", header, width = widths[i]));
    }
    out.push('\n');
    for (i, _) in headers.iter().enumerate() {
        out.push_str(&"-".repeat(widths[i]));
        out.push_str("  ");
    }
    out.push('\n');
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            let width = widths.get(i).copied().unwrap_or(0);
            let pad = width.saturating_sub(cell_width(cell));
            out.push_str(cell);
            out.push_str(&" ".repeat(pad));
            out.push_str("  ");
        }
        out.push('\n');
    }
    out
}

/// A rendered collection snapshot. Every successful load throws away the
/// previous rows and rebuilds from scratch; rows keep whatever order the
/// backend returned. The generation counter decides races between
/// overlapping refreshes: only a response matching the newest issued load
/// is applied, stale ones are dropped.
#[derive(Clone, Debug)]
pub struct ListView {
    label: &'static str,
    headers: &'static [&'static str],
    generation: u64,
    rows: Vec<Vec<String>>,
    loaded: bool,
}

impl ListView {
    pub fn new(label: &'static str, headers: &'static [&'static str]) -> Self {
        Self {
            label,
            headers,
            generation: 0,
            rows: Vec::new(),
            loaded: false,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Issue a new load and return its generation token.
    pub fn begin_load(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Apply a completed load. Returns false (and leaves the table alone)
    /// when a newer load was issued after this one.
    pub fn apply(&mut self, generation: u64, rows: Vec<Vec<String>>) -> bool {
        if generation < self.generation {
            return false;
        }
        self.rows = rows;
        self.loaded = true;
        true
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn render(&self) -> String {
        let mut out = format!(":: {} ({})\n", self.label, self.rows.len());
        if !self.loaded {
            out.push_str("(not loaded)\n");
            return out;
        }
        if self.rows.is_empty() {
            out.push_str("(no rows)\n");
            return out;
        }
        out.push_str(&render_table(self.headers, &self.rows));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_keeps_last_six_chars() {
        assert_eq!(short_id("64f1c2a9d3e8b90012ab34cd"), "ab34cd");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn render_table_pads_to_widest_cell() {
        let rows = vec![
            vec!["a".to_string(), "long-cell".to_string()],
            vec!["bb".to_string(), "x".to_string()],
        ];
        let out = render_table(&["h1", "h2"], &rows);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("h1  h2"));
        assert!(lines[2].starts_with("a   long-cell"));
    }
}
