//! Printable HTML report.
//!
//! Produces a self-contained HTML file with all CSS, JS and SVG charts
//! inlined, plus a print stylesheet so the page can go straight to paper.

use std::path::Path;

use anyhow::{Context, Result};

use gradekit_core::grade::{Grade, GradeDistribution};
use gradekit_core::results::{NormalizedSubject, ResultsSummary};
use gradekit_core::statistics::NO_DATA_NOTE;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from a results summary.
pub fn generate_html(results: &ResultsSummary) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>gradekit report</title>\n");
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>Grade report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} subjects | generated {}</p>\n",
        results.count,
        results.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    if results.is_empty() {
        html.push_str(&format!("<p class=\"empty\">{}</p>\n", html_escape(NO_DATA_NOTE)));
        push_recommendations(&mut html, &results.recommendations);
        html.push_str("</body>\n</html>");
        return html;
    }

    // Summary cards
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str("<div class=\"cards\">\n");
    push_card(&mut html, "Average", &format!("{:.2}", results.average));
    push_card(
        &mut html,
        "Passed",
        &format!("{}/{} ({:.1}%)", results.passed_count, results.count, results.pass_percentage),
    );
    push_card(&mut html, "Highest", &format!("{:.1}", results.highest));
    push_card(&mut html, "Lowest", &format!("{:.1}", results.lowest));
    push_card(&mut html, "Std. deviation", &format!("{:.2}", results.stddev));
    push_card(&mut html, "Range", &format!("{:.1}", results.range));
    if let Some(target) = results.target {
        push_card(
            &mut html,
            "Target",
            &format!("{:.1} ({:+.2})", target, results.difference),
        );
    }
    html.push_str("</div>\n");
    html.push_str("</section>\n");

    // Charts
    html.push_str("<section class=\"charts\">\n");
    html.push_str("<h2>Score vs KKM</h2>\n");
    html.push_str(&generate_score_chart(&results.subjects));
    html.push_str("<h2>Pass / fail</h2>\n");
    html.push_str(&generate_pass_fail_chart(results.passed_count, results.failed_count()));
    html.push_str("<h2>Grade distribution</h2>\n");
    html.push_str(&generate_distribution_chart(&results.grade_distribution()));
    html.push_str("</section>\n");

    // Per-subject results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Subjects</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Subject</th><th onclick=\"sortTable(1)\">Score</th><th onclick=\"sortTable(2)\">KKM</th><th onclick=\"sortTable(3)\">Difference</th><th onclick=\"sortTable(4)\">Grade</th><th onclick=\"sortTable(5)\">Status</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for s in &results.subjects {
        let class = if s.passed() { "pass" } else { "fail" };
        let grade = s.grade();
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{:.1}</td><td>{}</td><td>{:+.1}</td><td>{} ({})</td><td>{} {}</td></tr>\n",
            class,
            html_escape(&s.name),
            s.score,
            s.kkm,
            s.difference(),
            grade,
            grade.description(),
            s.status_mark().symbol(),
            if s.passed() { "PASS" } else { "FAIL" },
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Analysis
    html.push_str("<section class=\"analysis\">\n");
    html.push_str("<h2>Analysis</h2>\n");
    html.push_str(&format!("<p>{}</p>\n", html_escape(&results.analysis_note)));
    html.push_str("</section>\n");
    push_recommendations(&mut html, &results.recommendations);

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(&html_escape(
        &serde_json::to_string_pretty(results).unwrap_or_default(),
    ));
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(results: &ResultsSummary, path: &Path) -> Result<()> {
    let html = generate_html(results);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

fn push_card(html: &mut String, label: &str, value: &str) {
    html.push_str(&format!(
        "<div class=\"card\"><span class=\"label\">{}</span><span class=\"value\">{}</span></div>\n",
        label,
        html_escape(value)
    ));
}

fn push_recommendations(html: &mut String, recommendations: &[String]) {
    html.push_str("<section class=\"recommendations\">\n");
    html.push_str("<h2>Recommendations</h2>\n<ul>\n");
    for rec in recommendations {
        html.push_str(&format!("<li>{}</li>\n", html_escape(rec)));
    }
    html.push_str("</ul>\n</section>\n");
}

fn bar_color(subject: &NormalizedSubject) -> &'static str {
    if subject.passed() {
        "#22c55e"
    } else if subject.difference() >= -5.0 {
        "#eab308"
    } else {
        "#ef4444"
    }
}

/// Horizontal score bars on a 0-100 axis, with each subject's KKM marked.
fn generate_score_chart(subjects: &[NormalizedSubject]) -> String {
    let bar_height = 30;
    let max_width = 400.0;
    let padding = 10;
    let label_width = 200;

    let total_height = subjects.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg class=\"chart\" width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width as usize + 60,
        total_height
    );

    for (i, s) in subjects.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let width = (s.score.clamp(0.0, 100.0) / 100.0 * max_width) as usize;
        let kkm_x = label_width + (s.kkm.clamp(0, 100) as f64 / 100.0 * max_width) as usize;

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            html_escape(&s.name)
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width,
            y,
            width,
            bar_height,
            bar_color(s)
        ));
        svg.push_str(&format!(
            "  <line x1=\"{kkm_x}\" y1=\"{}\" x2=\"{kkm_x}\" y2=\"{}\" stroke=\"currentColor\" stroke-width=\"2\" stroke-dasharray=\"4 2\"><title>KKM {}</title></line>\n",
            y.saturating_sub(3),
            y + bar_height + 3,
            s.kkm
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}</text>\n",
            label_width + width.max(kkm_x - label_width) + 8,
            y + bar_height / 2,
            s.score
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// A single bar split into passed and failed shares.
fn generate_pass_fail_chart(passed: usize, failed: usize) -> String {
    let max_width = 600.0;
    let total = (passed + failed).max(1) as f64;
    let pass_width = (passed as f64 / total * max_width) as usize;
    let fail_width = max_width as usize - pass_width;

    let mut svg = String::from(
        "<svg class=\"chart\" width=\"620\" height=\"70\" xmlns=\"http://www.w3.org/2000/svg\">\n",
    );
    svg.push_str(&format!(
        "  <rect x=\"10\" y=\"10\" width=\"{pass_width}\" height=\"30\" fill=\"#22c55e\"/>\n"
    ));
    svg.push_str(&format!(
        "  <rect x=\"{}\" y=\"10\" width=\"{fail_width}\" height=\"30\" fill=\"#ef4444\"/>\n",
        10 + pass_width
    ));
    svg.push_str(&format!(
        "  <text x=\"10\" y=\"58\" font-size=\"12\" fill=\"currentColor\">Passed: {passed}</text>\n"
    ));
    svg.push_str(&format!(
        "  <text x=\"610\" y=\"58\" font-size=\"12\" fill=\"currentColor\" text-anchor=\"end\">Failed: {failed}</text>\n"
    ));
    svg.push_str("</svg>\n");
    svg
}

/// Vertical bars, one per grade category.
fn generate_distribution_chart(distribution: &GradeDistribution) -> String {
    let bar_width = 60;
    let gap = 30;
    let max_height = 160.0;
    let top = 20;
    let max_count = distribution.iter().map(|(_, n)| n).max().unwrap_or(0).max(1) as f64;

    let width = Grade::ALL.len() * (bar_width + gap) + gap;
    let baseline = top + max_height as usize;

    let mut svg = format!(
        "<svg class=\"chart\" width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        width,
        baseline + 40
    );

    for (i, (grade, count)) in distribution.iter().enumerate() {
        let x = gap + i * (bar_width + gap);
        let height = (count as f64 / max_count * max_height) as usize;
        let color = match grade {
            Grade::A => "#16a34a",
            Grade::BPlus => "#22c55e",
            Grade::B => "#3b82f6",
            Grade::C => "#eab308",
            Grade::D => "#ef4444",
        };

        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            x,
            baseline - height,
            bar_width,
            height,
            color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" text-anchor=\"middle\">{}</text>\n",
            x + bar_width / 2,
            baseline - height - 6,
            count
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"middle\">{}</text>\n",
            x + bar_width / 2,
            baseline + 20,
            grade
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta, .empty { color: #6b7280; }
.cards { display: flex; flex-wrap: wrap; gap: 1rem; }
.card { border: 1px solid var(--border); border-radius: 8px; padding: 0.75rem 1rem; min-width: 8rem; }
.card .label { display: block; font-size: 0.8rem; color: #6b7280; }
.card .value { display: block; font-size: 1.4rem; font-weight: bold; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
@media print {
  :root { --bg: #fff; --fg: #000; }
  body { padding: 0; }
  th { cursor: default; }
  .raw-data, script { display: none; }
  section { page-break-inside: avoid; }
}
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = parseFloat(va), nb = parseFloat(vb);
    const cmp = !isNaN(na) && !isNaN(nb) ? na - nb : va.localeCompare(vb);
    return asc ? cmp : -cmp;
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;
