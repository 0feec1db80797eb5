use html_escape::{encode_double_quoted_attribute, encode_single_quoted_attribute, encode_text};

use crate::{document::RackOutput, render::StructuralRow};

/// Serializes rendered racks into HTML table markup.
///
/// Each rack gets a hidden `<pre>` holding its CSV export, shown and hidden by
/// the toggle in the table footer. Element ids are numbered per writer.
#[derive(Debug, Default)]
pub struct HtmlWriter {
    exports: usize,
}

impl HtmlWriter {
    pub const TOGGLE_SCRIPT: &'static str = "function rack_toggle_vis(el, mode) {
  if (el.style.display === 'none') {
    el.style.display = mode;
    return true;
  }
  el.style.display = 'none';
  return false;
}";

    pub const DEFAULT_STYLE: &'static str = "table.rack { display: inline-table; border-collapse: collapse; margin: 0 1em 1em 0; font-size: 80%; }
table.rack th { background: #333; color: #fff; padding: 0 4px; text-align: right; }
table.rack th.title, table.rack th.bottom { text-align: center; }
table.rack td { border: 1px solid #333; width: 20em; padding: 0 4px; }
table.rack td.empty { background: #eee; }";

    pub fn new() -> Self {
        Self::default()
    }

    fn next_export_id(&mut self) -> String {
        self.exports += 1;
        format!("rack-csv-{}", self.exports)
    }

    /// Markup for one rack block: syntax errors in input order, the elevation
    /// table and its CSV export.
    pub fn rack(&mut self, output: &RackOutput) -> String {
        let mut html = String::new();

        if output.parsed.no_data {
            html.push_str("No data found\n");
        }
        for error in output.parsed.errors() {
            html.push_str(&format!(
                "Syntax error on the following line: <pre style=\"color:red\">{}</pre>\n",
                encode_text(&error.line)
            ));
        }

        let export_id = self.next_export_id();
        html.push_str("<table class='rack'>");
        for row in &output.rendered.rows {
            html.push_str(&Self::row(row, &export_id));
        }
        html.push_str("</table>&nbsp;\n");
        html.push_str(&format!(
            "<pre style='display:none;' id='{export_id}'>{}</pre>\n",
            encode_text(output.rendered.csv.as_str())
        ));

        html
    }

    fn row(row: &StructuralRow, export_id: &str) -> String {
        match row {
            StructuralRow::Title(name) => format!(
                "<tr><th colspan='2' class='title'>{}</th></tr>\n",
                encode_text(name)
            ),
            StructuralRow::Anchor { unit, block } => {
                let (open, close) = match &block.link {
                    Some(link) => {
                        let title = link
                            .title
                            .as_ref()
                            .map(|t| format!(" title=\"{t}\""))
                            .unwrap_or_default();
                        (
                            format!("<a href=\"{}\"{title}>", encode_double_quoted_attribute(&link.url)),
                            "</a>",
                        )
                    }
                    None => (String::new(), ""),
                };
                format!(
                    "<tr><th>{unit}</th><td class='item' rowspan='{rows}' style='background-color: {color};' title=\"{tooltip}\">\
                     {open}<div style='float: left; font-weight:bold;'>{label}</div>\
                     <div style='float: right; margin-left: 3em; '>{name}</div>{close}</td></tr>\n",
                    rows = block.rows,
                    color = encode_single_quoted_attribute(&block.color),
                    tooltip = encode_double_quoted_attribute(&block.tooltip),
                    label = encode_text(&block.label),
                    name = encode_text(&block.name),
                )
            }
            StructuralRow::Continuation { unit } => format!("<tr><th>{unit}</th></tr>\n"),
            StructuralRow::Empty { unit } => {
                format!("<tr><th>{unit}</th><td class='empty'></td></tr>\n")
            }
            StructuralRow::Footer => format!(
                "<tr><th colspan='2' class='bottom'><span style='cursor: pointer;' \
                 onclick=\"this.innerHTML = rack_toggle_vis(document.getElementById('{export_id}'),'block')\
                 ?'Hide CSV &uarr;':'Show CSV &darr;';\">Show CSV &darr;</span></th></tr>\n"
            ),
        }
    }

    /// Wraps rack fragments into a standalone page.
    pub fn page(&self, title: &str, fragments: &[String], stylesheet: Option<&str>) -> String {
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n\
             <style>\n{}\n</style>\n<script>\n{}\n</script>\n</head>\n<body>\n{}</body>\n</html>\n",
            encode_text(title),
            stylesheet.unwrap_or(Self::DEFAULT_STYLE),
            Self::TOGGLE_SCRIPT,
            fragments.concat(),
        )
    }
}
