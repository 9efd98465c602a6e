//! Line and region buffers used by the markdown writer.

pub mod line;
pub mod region;

pub use line::Line;
pub use region::Region;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_push_and_prepend() {
        let mut l = Line::new();
        l.push("sub-command").push(" <arg>").prepend("tool ");
        assert_eq!(l.as_str(), "tool sub-command <arg>");
    }

    #[test]
    fn region_prefix_and_indent() {
        let mut r = Region::from_str("one\ntwo\nthree");
        r.prefix_each_line("> ");
        assert_eq!(r.to_string(), "> one\n> two\n> three");

        let mut r = Region::from_str("a\nb");
        r.prefix_first_then_indent_rest("10. ");
        assert_eq!(r.to_string(), "10. a\n    b");
    }

    #[test]
    fn suffix_lines_follow_body_and_take_prefix() {
        let mut r = Region::from_str("see [docs]");
        r.push_back_suffix_line(Line::from_str("[docs]: ./docs.md"));
        r.prefix_each_line("> ");
        assert_eq!(r.to_string(), "> see [docs]\n> [docs]: ./docs.md");
    }

    #[test]
    fn blank_lines_get_no_trailing_whitespace() {
        let mut r = Region::from_str("a\n\nb");
        r.prefix_each_line("> ");
        assert_eq!(r.to_string(), "> a\n>\n> b");

        let mut r = Region::from_str("a\n\nb");
        r.prefix_first_then_indent_rest("- ");
        assert_eq!(r.to_string(), "- a\n\n  b");
    }

    #[test]
    fn empty_string_is_empty_region() {
        assert!(Region::from_str("").is_empty());
        assert!(Line::from_str("   ").is_blank());
    }

    #[test]
    fn width_counts_columns() {
        assert_eq!(Line::from_str("命令").width(), 4);
    }
}
