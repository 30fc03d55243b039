use std::fmt::Write as _;

/// Destination for rendered rows, one cell of text per row.
pub trait RowSink {
    fn append_row(&mut self, text: &str);

    fn clear(&mut self);
}

/// An HTML `<table>` whose body is built one row at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlTable {
    rows: Vec<String>,
}

impl HtmlTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut html = String::from("<table>\n  <tbody>\n");
        for row in &self.rows {
            // Writing into a String cannot fail.
            let _ = writeln!(html, "    <tr><td>{}</td></tr>", escape_html(row));
        }
        html.push_str("  </tbody>\n</table>\n");
        html
    }
}

impl RowSink for HtmlTable {
    fn append_row(&mut self, text: &str) {
        self.rows.push(text.to_string());
    }

    fn clear(&mut self) {
        self.rows.clear();
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_renders_empty_body() {
        let table = HtmlTable::new();
        assert_eq!(table.render(), "<table>\n  <tbody>\n  </tbody>\n</table>\n");
    }

    #[test]
    fn rows_render_in_order() {
        let mut table = HtmlTable::new();
        table.append_row("São Paulo");
        table.append_row("Natal");

        let html = table.render();
        let sp = html.find("<tr><td>São Paulo</td></tr>").expect("first row");
        let natal = html.find("<tr><td>Natal</td></tr>").expect("second row");
        assert!(sp < natal);
    }

    #[test]
    fn cell_text_is_escaped() {
        let mut table = HtmlTable::new();
        table.append_row("<script>alert('x')</script> & co");

        let html = table.render();
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn clear_removes_all_rows() {
        let mut table = HtmlTable::new();
        table.append_row("Belém");
        table.clear();

        assert!(table.is_empty());
    }
}
