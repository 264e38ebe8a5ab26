//! Cell and header conventions shared by the spreadsheet and CSV readers

use calamine::Data;

/// Render a spreadsheet cell as an optional string
///
/// Integral floats lose their fractional part so numeric codes compare equal
/// to their textual form.
#[must_use]
pub fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => text_cell(s),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(format_float(*f)),
        Data::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
        Data::Error(e) => {
            log::warn!("Spreadsheet cell error {e:?} read as empty");
            None
        }
        other => text_cell(&other.to_string()),
    }
}

/// Trim a text cell, treating blank text as absent
#[must_use]
pub fn text_cell(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{f:.0}")
    } else {
        f.to_string()
    }
}

/// Make header names unique and non-empty
///
/// Empty headers become `Unnamed: <index>`; repeats get a `.1`, `.2`, ... suffix.
#[must_use]
pub fn unique_headers(raw: Vec<Option<String>>) -> Vec<String> {
    let mut headers: Vec<String> = Vec::with_capacity(raw.len());
    for (idx, name) in raw.into_iter().enumerate() {
        let base = name.unwrap_or_else(|| format!("Unnamed: {idx}"));
        let mut candidate = base.clone();
        let mut n = 0;
        while headers.contains(&candidate) {
            n += 1;
            candidate = format!("{base}.{n}");
        }
        headers.push(candidate);
    }
    headers
}
