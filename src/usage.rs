use std::fmt::Write;

use crate::Entry;

macro_rules! w {
    ($($tt:tt)*) => {{
        // Writing into a `String` can't fail.
        let _ = write!($($tt)*);
    }};
}

/// Renders one `-name=default: usage` line per entry.
pub(crate) fn render<'a>(entries: impl Iterator<Item = &'a Entry>) -> String {
    let mut buf = String::new();
    for entry in entries {
        w!(buf, "-{}={}: {}\n", entry.name(), entry.default_value(), entry.usage());
    }
    buf
}
