use crate::command::{build_context, split_segments, CommandContext, Redirect};
use crate::tokenizer::tokenize;

fn ctx(line: &str) -> CommandContext {
    build_context(tokenize(line))
}

fn redirect(path: &str, append: bool) -> Option<Redirect> {
    Some(Redirect {
        path: path.to_string(),
        append,
    })
}

#[test]
fn extracts_stdout_redirect() {
    let ctx = ctx("echo hi > out.txt");
    assert_eq!(ctx.argv, ["echo", "hi"]);
    assert_eq!(ctx.stdout_to, redirect("out.txt", false));
    assert_eq!(ctx.stderr_to, None);
}

#[test]
fn fd_one_prefix_is_equivalent() {
    let ctx = ctx("echo hi 1> out.txt");
    assert_eq!(ctx.argv, ["echo", "hi"]);
    assert_eq!(ctx.stdout_to, redirect("out.txt", false));
}

#[test]
fn append_forms_set_the_flag() {
    assert_eq!(ctx("echo hi >> log").stdout_to, redirect("log", true));
    assert_eq!(ctx("echo hi 1>> log").stdout_to, redirect("log", true));
}

#[test]
fn extracts_stderr_redirect() {
    let truncate = ctx("ls missing 2> err.txt");
    assert_eq!(truncate.argv, ["ls", "missing"]);
    assert_eq!(truncate.stderr_to, redirect("err.txt", false));
    assert_eq!(truncate.stdout_to, None);

    assert_eq!(ctx("ls 2>> err.txt").stderr_to, redirect("err.txt", true));
}

#[test]
fn both_streams_can_redirect() {
    let ctx = ctx("cmd > out.txt 2> err.txt");
    assert_eq!(ctx.argv, ["cmd"]);
    assert_eq!(ctx.stdout_to, redirect("out.txt", false));
    assert_eq!(ctx.stderr_to, redirect("err.txt", false));
}

#[test]
fn last_redirect_wins() {
    let ctx = ctx("echo hi > first >> second");
    assert_eq!(ctx.argv, ["echo", "hi"]);
    assert_eq!(ctx.stdout_to, redirect("second", true));
}

#[test]
fn arguments_after_a_target_still_collect() {
    let ctx = ctx("echo a > f b");
    assert_eq!(ctx.argv, ["echo", "a", "b"]);
    assert_eq!(ctx.stdout_to, redirect("f", false));
}

#[test]
fn dangling_operator_becomes_an_argument() {
    let trailing = ctx("echo hi >");
    assert_eq!(trailing.argv, ["echo", "hi", ">"]);
    assert_eq!(trailing.stdout_to, None);

    let append = ctx("echo 2>>");
    assert_eq!(append.argv, ["echo", "2>>"]);
    assert_eq!(append.stderr_to, None);
}

#[test]
fn operators_must_stand_alone() {
    // No whitespace split means no operator.
    let ctx = ctx("echo hi2> f");
    assert_eq!(ctx.argv, ["echo", "hi2>", "f"]);
    assert_eq!(ctx.stdout_to, None);
}

#[test]
fn quoted_target_keeps_its_spaces() {
    let ctx = ctx("echo hi > 'my file.txt'");
    assert_eq!(ctx.argv, ["echo", "hi"]);
    assert_eq!(ctx.stdout_to, redirect("my file.txt", false));
}

#[test]
fn splits_line_into_trimmed_segments() {
    assert_eq!(split_segments("echo a | wc"), ["echo a", "wc"]);
    assert_eq!(split_segments("  ls  "), ["ls"]);
}

#[test]
fn drops_empty_segments() {
    assert_eq!(split_segments("a||b"), ["a", "b"]);
    assert!(split_segments("|").is_empty());
    assert!(split_segments("").is_empty());
    assert!(split_segments(" | | ").is_empty());
}

#[test]
fn segment_split_ignores_quoting() {
    // The raw line splits before tokenization; quotes do not protect a pipe.
    assert_eq!(split_segments("echo 'a|b'"), ["echo 'a", "b'"]);
}
