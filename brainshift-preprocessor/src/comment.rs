//! Comment removal
//!
//! Comments run from one `"` to the next and do not nest. They are blanked
//! out rather than cut, so every remaining byte keeps its original offset
//! and line; a comment therefore also separates the tokens around it.

use crate::error::{Result, SourcePos, SyntaxError};
use brainshift_spec::COMMENT_DELIMITER;

/// Replace every comment in `source` with whitespace
///
/// Newlines inside a comment are kept, all other comment characters
/// (including both delimiters) become one space per byte.
pub fn strip_comments(source: &str) -> Result<String> {
    let mut out = String::with_capacity(source.len());
    let mut open: Option<usize> = None;

    for (idx, c) in source.char_indices() {
        match (open, c) {
            (None, COMMENT_DELIMITER) => {
                open = Some(idx);
                out.push(' ');
            }
            (None, _) => out.push(c),
            (Some(_), COMMENT_DELIMITER) => {
                open = None;
                out.push(' ');
            }
            (Some(_), '\n') => out.push('\n'),
            (Some(_), _) => {
                for _ in 0..c.len_utf8() {
                    out.push(' ');
                }
            }
        }
    }

    if let Some(start) = open {
        return Err(SyntaxError::UnterminatedComment {
            pos: SourcePos::locate(source, start),
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_comments() {
        assert_eq!(strip_comments("+-><").unwrap(), "+-><");
    }

    #[test]
    fn test_blanks_comment() {
        assert_eq!(strip_comments("+\"inc\"-").unwrap(), "+     -");
    }

    #[test]
    fn test_preserves_offsets_and_lines() {
        let source = "\"multi\nline é\"+";
        let stripped = strip_comments(source).unwrap();
        assert_eq!(stripped.len(), source.len());
        assert_eq!(stripped.find('+'), source.find('+'));
        assert_eq!(stripped.matches('\n').count(), 1);
    }

    #[test]
    fn test_opcodes_inside_comment_are_removed() {
        let stripped = strip_comments("\"[[ J *x\";").unwrap();
        assert_eq!(stripped.trim(), ";");
    }

    #[test]
    fn test_comments_do_not_nest() {
        // The second quote closes the first comment; `+` is code
        let stripped = strip_comments("\"a\"+\"b\"").unwrap();
        assert_eq!(stripped.trim(), "+");
    }

    #[test]
    fn test_unterminated() {
        let err = strip_comments("++\n  \"never closed").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::UnterminatedComment {
                pos: SourcePos::new(2, 3)
            }
        );
    }

    #[test]
    fn test_unterminated_after_closed() {
        let err = strip_comments("\"ok\" + \"").unwrap_err();
        assert!(matches!(err, SyntaxError::UnterminatedComment { .. }));
    }
}
