//! Small helpers shared by entities, the temp registry and the CLI.

const SIZE_UNITS: [&str; 7] = ["bytes", "KB", "MB", "GB", "TB", "PB", "EB"];

/// Format a byte count for humans.
///
/// The value is divided by 1024 while it exceeds 1024. `precision` decimal
/// places are shown for every unit except plain bytes, and the integer part
/// is grouped with `,`.
///
/// # Examples
///
/// ```
/// use fskit::util::format_size;
///
/// assert_eq!(format_size(1023, 0), "1,023 bytes");
/// assert_eq!(format_size(1001, 5), "1,001 bytes");
/// assert_eq!(format_size(2560, 1), "2.5 KB");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64, precision: usize) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value > 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let precision = if unit == 0 { 0 } else { precision };
    format!("{} {}", group_thousands(&format!("{value:.precision$}")), SIZE_UNITS[unit])
}

fn group_thousands(number: &str) -> String {
    let (int_part, frac_part) = match number.find('.') {
        Some(idx) => number.split_at(idx),
        None => (number, ""),
    };
    let mut grouped = String::with_capacity(number.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push_str(frac_part);
    grouped
}

/// Replace every byte of the final path component outside `[A-Za-z0-9._-]`
/// with `_`. The directory part is left alone.
///
/// Multi-byte characters become one `_` per byte.
///
/// # Examples
///
/// ```
/// use fskit::util::sanitize_name;
///
/// assert_eq!(sanitize_name("/some/dir/file~!@.txt"), "/some/dir/file___.txt");
/// assert_eq!(sanitize_name("/some/!!!/file.txt"), "/some/!!!/file.txt");
/// assert_eq!(sanitize_name("my build"), "my_build");
/// ```
#[must_use]
pub fn sanitize_name(name: &str) -> String {
    let (dir, base) = match name.rfind('/') {
        Some(idx) => name.split_at(idx + 1),
        None => ("", name),
    };
    let mut out = String::with_capacity(name.len());
    out.push_str(dir);
    for byte in base.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.') {
            out.push(char::from(byte));
        } else {
            out.push('_');
        }
    }
    out
}
