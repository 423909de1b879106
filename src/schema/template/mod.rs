// smbcn: SMB connection helper driving `net use`
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `${name}` placeholder substitution.
//!
//! ```text
//! "${user}@${host}"  +  { user: "tuckn", host: null }
//!        |
//!        v
//! "tuckn@null"        (unknown names stay as written)
//! ```
//!
//! A name is any run of characters other than `{` and `}`. Substituted
//! values are never rescanned.


use std::ops::Range;

use super::Components;

/// Text a `null` component renders as.
pub const NULL_TEXT: &str = "null";

struct Placeholder<'a> {
    span: Range<usize>,
    name: &'a str,
}

/// Iterates over the well-formed placeholders of a template, left to right.
struct Placeholders<'a> {
    template: &'a str,
    pos: usize,
}

impl<'a> Iterator for Placeholders<'a> {
    type Item = Placeholder<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = self.pos + self.template[self.pos..].find("${")?;
            let name_start = start + 2;
            let close = self.template[name_start..].find(['{', '}'])?;
            let name_end = name_start + close;

            if self.template.as_bytes()[name_end] == b'{' {
                // "${a${b}" : the outer opener is not a placeholder
                self.pos = name_start;
                continue;
            }

            self.pos = name_end + 1;
            return Some(Placeholder {
                span: start..self.pos,
                name: &self.template[name_start..name_end],
            });
        }
    }
}

const fn scan(template: &str) -> Placeholders<'_> {
    Placeholders { template, pos: 0 }
}

/// Replaces every `${name}` found in `values`.
///
/// `null` values render as [`NULL_TEXT`]; names missing from `values` leave
/// the placeholder untouched.
///
/// ```
/// use smbcn::schema::Components;
/// use smbcn::schema::template::substitute;
///
/// let values = Components::from([
///     ("host".to_string(), Some("11.22.33.44".to_string())),
///     ("pass".to_string(), None),
/// ]);
/// assert_eq!(substitute(r"\\${host}\${share}", &values), r"\\11.22.33.44\${share}");
/// assert_eq!(substitute("${pass}", &values), "null");
/// ```
#[must_use]
pub fn substitute(template: &str, values: &Components) -> String {
    let mut out = String::with_capacity(template.len());
    let mut copied = 0;

    for placeholder in scan(template) {
        let Some(value) = values.get(placeholder.name) else {
            continue;
        };
        out.push_str(&template[copied..placeholder.span.start]);
        out.push_str(value.as_deref().unwrap_or(NULL_TEXT));
        copied = placeholder.span.end;
    }

    out.push_str(&template[copied..]);
    out
}

/// Names referenced by a template, in order of appearance.
#[must_use]
pub fn placeholders(template: &str) -> Vec<&str> {
    scan(template).map(|placeholder| placeholder.name).collect()
}
