//! Grid tables for terminal output.

use smartfit_ranking::ScoredCandidate;

/// Render `rows` under `headers` as a boxed grid. Column widths are measured
/// in characters; cells never wrap.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = vec![
        rule(&widths, '-'),
        table_row(headers.iter().copied(), &widths),
    ];
    out.push(rule(&widths, if rows.is_empty() { '-' } else { '=' }));
    for row in rows {
        out.push(table_row(row.iter().map(String::as_str), &widths));
        out.push(rule(&widths, '-'));
    }
    out.join("\n")
}

fn rule(widths: &[usize], fill: char) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.extend(std::iter::repeat_n(fill, width + 2));
        line.push('+');
    }
    line
}

fn table_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.zip(widths) {
        let pad = width.saturating_sub(cell.chars().count());
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(pad));
        line.push_str(" |");
    }
    line
}

/// Score with two decimals.
pub fn format_score(score: f32) -> String {
    format!("{score:.2}")
}

/// `Candidate | Match Score | Resume Snippet` rows. Unscored candidates show
/// their status where the snippet would be.
pub fn snippet_table(results: &[ScoredCandidate]) -> String {
    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|result| {
            vec![
                result.identifier.clone(),
                format_score(result.score),
                result
                    .preview
                    .clone()
                    .unwrap_or_else(|| result.status.to_string()),
            ]
        })
        .collect();
    render_table(&["Candidate", "Match Score", "Resume Snippet"], &rows)
}

/// Rows for ranked files, with the status and any failure detail.
pub fn results_table(results: &[ScoredCandidate]) -> String {
    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|result| {
            vec![
                result.identifier.clone(),
                format_score(result.score),
                result.status.to_string(),
                result
                    .preview
                    .clone()
                    .or_else(|| result.detail.clone())
                    .unwrap_or_default(),
            ]
        })
        .collect();
    render_table(&["Candidate", "Match Score", "Status", "Resume Snippet"], &rows)
}
