//! Token-bounded substring replacement.

use std::borrow::Cow;

/// Which characters count as "part of the same token" around a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Dotted package identifiers.
    ///
    /// The match may not be preceded by a letter, digit, underscore or dot.
    /// It may not be followed by a letter, digit or underscore; a following
    /// dot is allowed so `com.foo` still matches in `com.foo.Main`.
    Package,
    /// Colon-delimited module references (`:lib:core`).
    ///
    /// Module characters are letters, digits, `_` and `-`. The match may not
    /// be preceded by a module character or dot (so `group:lib` Maven
    /// coordinates are left alone) and may not be followed by a module
    /// character.
    ModulePath,
}

impl Boundary {
    fn accepts(self, before: Option<char>, after: Option<char>) -> bool {
        match self {
            Boundary::Package => {
                !before.is_some_and(|c| is_word_char(c) || c == '.')
                    && !after.is_some_and(is_word_char)
            }
            Boundary::ModulePath => {
                !before.is_some_and(|c| is_module_char(c) || c == '.')
                    && !after.is_some_and(is_module_char)
            }
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_module_char(c: char) -> bool {
    is_word_char(c) || c == '-'
}

/// Replace every token-bounded occurrence of `from` with `to`.
///
/// Returns the (possibly borrowed) result and the number of replacements.
/// Case is preserved; `to` is inserted verbatim.
pub fn replace_bounded<'a>(
    content: &'a str,
    from: &str,
    to: &str,
    boundary: Boundary,
) -> (Cow<'a, str>, usize) {
    if from.is_empty() || from == to {
        return (Cow::Borrowed(content), 0);
    }

    let mut output = String::new();
    let mut copied_until = 0;
    let mut search_from = 0;
    let mut count = 0;

    while let Some(offset) = content[search_from..].find(from) {
        let start = search_from + offset;
        let end = start + from.len();
        let before = content[..start].chars().next_back();
        let after = content[end..].chars().next();

        if boundary.accepts(before, after) {
            if count == 0 {
                output.reserve(content.len());
            }
            output.push_str(&content[copied_until..start]);
            output.push_str(to);
            copied_until = end;
            search_from = end;
            count += 1;
        } else {
            // advance one char; a later match may start inside this one
            let step = content[start..].chars().next().map_or(1, char::len_utf8);
            search_from = start + step;
        }
    }

    if count == 0 {
        return (Cow::Borrowed(content), 0);
    }
    output.push_str(&content[copied_until..]);
    (Cow::Owned(output), count)
}
