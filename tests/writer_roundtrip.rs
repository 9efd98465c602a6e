use md_autodoc::ast::{parse, to_markdown};
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::path::Path;

fn collect_md_files(dir: &Path, out: &mut Vec<std::path::PathBuf>) {
    for entry in fs::read_dir(dir).unwrap() {
        let p = entry.unwrap().path();
        if p.is_dir() {
            collect_md_files(&p, out);
        } else if p.extension().is_some_and(|ext| ext == "md") {
            out.push(p);
        }
    }
}

fn print_diff(label: &str, left: &str, right: &str) {
    let diff = TextDiff::from_lines(left, right);
    eprintln!("diff for {label}:");
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        eprint!("{sign} {change}");
    }
}

// Writing then re-parsing must settle: the second rendering equals the
// first, and the block structure survives.
#[test]
fn fixtures_render_stably() {
    let mut files = Vec::new();
    collect_md_files(Path::new("tests/fixtures"), &mut files);
    assert!(!files.is_empty(), "no fixture files found");

    for f in files {
        let src = fs::read_to_string(&f).unwrap();
        let blocks = parse(&src);
        let first = to_markdown(&blocks).unwrap();
        let reparsed = parse(&first);
        let second = to_markdown(&reparsed).unwrap();
        if first != second {
            print_diff(&f.display().to_string(), &first, &second);
        }
        assert_eq!(first, second, "unstable rendering for {f:?}");
        assert_eq!(blocks.len(), reparsed.len(), "block count changed for {f:?}");
    }
}

#[test]
fn inline_markup_survives() {
    let src = "Use **bold**, *em*, ~~gone~~, `code` and [a link](docs/a.md \"A\").\n";
    let md = to_markdown(&parse(src)).unwrap();
    assert_eq!(md, src);
}

#[test]
fn reference_links_keep_definitions() {
    let src = "See [the guide][guide].\n\n[guide]: ./docs/guide.md\n";
    let md = to_markdown(&parse(src)).unwrap();
    assert_eq!(md, "See [the guide][guide].\n\n[guide]: ./docs/guide.md\n");
}
