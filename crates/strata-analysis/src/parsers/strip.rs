//! Comment/string stripping pre-passes for the lexical parsers.
//!
//! Both strippers preserve line counts exactly: every newline in the
//! input appears in the output, so line numbers computed over the
//! stripped text map 1:1 onto the original bytes.

/// Strip Python triple-quoted strings, `#` comments, and single-line
/// strings. String contents vanish entirely; the import grammar never
/// needs them.
pub fn strip_python(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let chars: Vec<char> = source.chars().collect();
    let mut i = 0;

    enum State {
        Code,
        Triple(char),
        Single(char),
    }
    let mut state = State::Code;

    while i < chars.len() {
        let c = chars[i];
        match state {
            State::Code => {
                if (c == '"' || c == '\'') && chars.get(i + 1) == Some(&c) && chars.get(i + 2) == Some(&c)
                {
                    state = State::Triple(c);
                    i += 3;
                    continue;
                }
                if c == '"' || c == '\'' {
                    state = State::Single(c);
                    i += 1;
                    continue;
                }
                if c == '#' {
                    while i < chars.len() && chars[i] != '\n' {
                        i += 1;
                    }
                    continue;
                }
                out.push(c);
                i += 1;
            }
            State::Triple(q) => {
                if c == q && chars.get(i + 1) == Some(&q) && chars.get(i + 2) == Some(&q) {
                    state = State::Code;
                    i += 3;
                    continue;
                }
                if c == '\\' {
                    i += 2;
                    continue;
                }
                if c == '\n' {
                    out.push('\n');
                }
                i += 1;
            }
            State::Single(q) => {
                if c == '\\' {
                    i += 2;
                    continue;
                }
                if c == q {
                    state = State::Code;
                    i += 1;
                    continue;
                }
                if c == '\n' {
                    // Unterminated single-line string; recover at EOL.
                    out.push('\n');
                    state = State::Code;
                    i += 1;
                    continue;
                }
                i += 1;
            }
        }
    }
    out
}

/// Strip `//` and `/* */` comments from C-family source while leaving
/// string literals intact (Go import paths live in string literals).
/// `raw_strings` additionally treats backtick strings as literals (Go).
pub fn strip_slash_comments(source: &str, raw_strings: bool) -> String {
    let mut out = String::with_capacity(source.len());
    let chars: Vec<char> = source.chars().collect();
    let mut i = 0;

    enum State {
        Code,
        Str(char),
        Block,
    }
    let mut state = State::Code;

    while i < chars.len() {
        let c = chars[i];
        match state {
            State::Code => match c {
                '/' if chars.get(i + 1) == Some(&'/') => {
                    while i < chars.len() && chars[i] != '\n' {
                        i += 1;
                    }
                }
                '/' if chars.get(i + 1) == Some(&'*') => {
                    state = State::Block;
                    i += 2;
                }
                '"' | '\'' => {
                    state = State::Str(c);
                    out.push(c);
                    i += 1;
                }
                '`' if raw_strings => {
                    state = State::Str('`');
                    out.push(c);
                    i += 1;
                }
                _ => {
                    out.push(c);
                    i += 1;
                }
            },
            State::Str(q) => {
                if c == '\\' && q != '`' {
                    out.push(c);
                    if let Some(&next) = chars.get(i + 1) {
                        out.push(next);
                    }
                    i += 2;
                    continue;
                }
                out.push(c);
                if c == q || (c == '\n' && q != '`') {
                    state = State::Code;
                }
                i += 1;
            }
            State::Block => {
                if c == '*' && chars.get(i + 1) == Some(&'/') {
                    state = State::Code;
                    i += 2;
                    continue;
                }
                if c == '\n' {
                    out.push('\n');
                }
                i += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_strip_preserves_line_count() {
        let src = "import os\n\"\"\"doc\nstring\nhere\"\"\"\nfrom a import b  # trailing\nx = 'str'\n";
        let stripped = strip_python(src);
        assert_eq!(src.lines().count(), stripped.lines().count());
        assert!(stripped.contains("import os"));
        assert!(stripped.contains("from a import b"));
        assert!(!stripped.contains("doc"));
        assert!(!stripped.contains("trailing"));
        assert!(!stripped.contains("str"));
    }

    #[test]
    fn python_hash_inside_string_is_not_a_comment() {
        let stripped = strip_python("x = '#not a comment'\nimport re\n");
        assert!(stripped.contains("import re"));
        assert!(!stripped.contains("not a comment"));
    }

    #[test]
    fn slash_comments_removed_strings_kept() {
        let src = "import \"fmt\" // stdlib\n/* block\ncomment */\nvar s = \"a//b\"\n";
        let stripped = strip_slash_comments(src, true);
        assert_eq!(src.lines().count(), stripped.lines().count());
        assert!(stripped.contains("import \"fmt\""));
        assert!(!stripped.contains("stdlib"));
        assert!(!stripped.contains("block"));
        assert!(stripped.contains("\"a//b\""));
    }

    #[test]
    fn go_raw_string_survives() {
        let stripped = strip_slash_comments("s := `raw /* not comment */`\n", true);
        assert!(stripped.contains("raw /* not comment */"));
    }
}
