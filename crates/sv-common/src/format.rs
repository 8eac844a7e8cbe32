//! Text and time formatting shared by the views.

/// Ellipsis inserted by [`middle_ellipsis`].
pub const ELLIPSIS: &str = "...";

/// Default number of leading characters kept by [`middle_ellipsis`].
pub const DEFAULT_ELLIPSIS_HEAD: usize = 12;

/// Caps `text` at `max_len` characters by replacing its middle with `...`.
///
/// The first `head` characters are kept, followed by the ellipsis and as
/// many trailing characters as still fit. Text that already fits is
/// returned unchanged. Lengths count `char`s, not bytes.
pub fn middle_ellipsis(text: &str, max_len: usize, head: usize) -> String {
    let len = text.chars().count();
    if len <= max_len {
        return text.to_string();
    }
    let head = head.min(len);
    let tail = max_len.saturating_sub(head + ELLIPSIS.len()).min(len - head);
    let mut out: String = text.chars().take(head).collect();
    out.push_str(ELLIPSIS);
    out.extend(text.chars().skip(len - tail));
    out
}

/// Formats a duration in milliseconds as elapsed time, e.g. `01 min 05.0 sec`.
///
/// Seconds always carry one decimal; minutes and hours are shown only when
/// non-zero (hours imply minutes). Components in `1..10` are zero-padded.
pub fn elapsed_string(msec: f64) -> String {
    let msec = msec.max(0.0);
    let sec = (msec / 1e3) % 60.0;
    let min = ((msec / (1e3 * 60.0)) % 60.0).floor() as u64;
    let hr = (msec / (1e3 * 60.0) / 60.0).floor() as u64;

    let pad = |v: f64| if (1.0..10.0).contains(&v) { "0" } else { "" };
    let mut out = format!("{}{:.1} sec", pad(sec), sec);
    if min > 0 || hr > 0 {
        out = format!("{}{} min {}", pad(min as f64), min, out);
    }
    if hr > 0 {
        out = format!("{}{} hr {}", pad(hr as f64), hr, out);
    }
    out
}

/// Formats a size in kilobytes as megabytes with one decimal.
pub fn kb_as_mb(kb: f64) -> String {
    format!("{:.1} MB", kb / 1024.0)
}

/// Formats a `(mean, stddev)` pair as `mean ± stddev unit`.
pub fn mean_stddev(stat: (f64, f64), unit: &str) -> String {
    format!("{:.1} ± {:.1} {}", stat.0, stat.1, unit)
}
