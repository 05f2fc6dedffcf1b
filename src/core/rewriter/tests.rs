use super::*;

fn rewriter() -> Rewriter {
    Rewriter::new(&RewriteConfig::default()).expect("default rules compile")
}

fn rewrite(text: &str) -> String {
    rewriter().rewrite(text).text
}

#[test]
fn wraps_single_line_literal() {
    let result = rewriter().rewrite("    \"hello\";");
    assert_eq!(result.text, "    ic_cdk::println!(\"hello\");");
    assert_eq!(result.blocks, 1);
    assert_eq!(result.skipped, 0);
}

#[test]
fn single_line_without_semicolon_gains_one() {
    assert_eq!(rewrite("        \"ready\""), "        ic_cdk::println!(\"ready\");");
}

#[test]
fn keeps_tab_indentation() {
    assert_eq!(rewrite("\t\"tabbed\";"), "\tic_cdk::println!(\"tabbed\");");
}

#[test]
fn unindented_literal_is_not_a_candidate() {
    let text = "\"top level\";";
    assert_eq!(rewrite(text), text);
}

#[test]
fn lines_with_macro_token_are_never_rewrapped() {
    let text = "    \"already\" // ic_cdk::println! was here";
    assert_eq!(rewrite(text), text);

    let fixed = rewrite("    \"once\";");
    assert_eq!(rewrite(&fixed), fixed);
}

#[test]
fn exclusion_substrings_block_candidates() {
    let cases = [
        "    \"x\"; return value;",
        "    \"{}\".len() + format!(\"a\").len();",
        "    \"boom\"; panic!(\"boom\");",
        "    \"a\"; assert!(ok);",
        "    \"key\" == \"value\";",
        "    \"a\"; let b = 1;",
        "    \"a\"; const B: u8 = 1;",
    ];
    let rewriter = rewriter();
    for line in cases {
        assert!(!rewriter.is_candidate_start(line), "{line:?} should be excluded");
        assert_eq!(rewriter.rewrite(line).text, line);
    }
}

#[test]
fn let_binding_passes_through_verbatim() {
    let text = "fn f() {\n    let x = \"literal\";\n}\n";
    assert_eq!(rewrite(text), text);
}

#[test]
fn rebuilds_multi_line_call_ending_in_paren() {
    let input = [
        "    \"Swap {} {} for {}\",",
        "        amount,",
        "        token,",
        "        target);",
        "    next_step();",
    ]
    .join("\n");
    let expected = [
        "    ic_cdk::println!(\"Swap {} {} for {}\",",
        "        amount,",
        "        token,",
        "        target);",
        "    next_step();",
    ]
    .join("\n");

    let result = rewriter().rewrite(&input);
    assert_eq!(result.text, expected);
    assert_eq!(result.blocks, 1);
    assert_eq!(result.text.lines().count(), input.lines().count());
}

#[test]
fn closes_trailing_comma_continuation() {
    let input = "    \"a {}\",\n        x,\n}";
    assert_eq!(rewrite(input), "    ic_cdk::println!(\"a {}\",\n        x);\n}");
}

#[test]
fn strips_every_trailing_comma_on_last_line() {
    let input = "    \"a {}\",\n        x,,  \n}";
    assert_eq!(rewrite(input), "    ic_cdk::println!(\"a {}\",\n        x);\n}");
}

#[test]
fn closing_paren_line_is_not_a_continuation() {
    let input = "    \"a {}\", x,\n    );";
    assert_eq!(rewrite(input), "    ic_cdk::println!(\"a {}\", x,);\n    );");
}

#[test]
fn unterminated_block_runs_to_end_of_input() {
    let input = "    \"a\",\n        b,\n        c,";
    assert_eq!(rewrite(input), "    ic_cdk::println!(\"a\",\n        b,\n        c);");
}

#[test]
fn continuation_guard_leaves_long_blocks_alone() {
    let config = RewriteConfig {
        max_continuation_lines: Some(1),
        ..RewriteConfig::default()
    };
    let rewriter = Rewriter::new(&config).unwrap();

    let long = "    \"a\",\n        b,\n        c,\n    \"short\";";
    let result = rewriter.rewrite(long);
    assert_eq!(result.skipped, 1);
    assert_eq!(result.blocks, 1);
    assert_eq!(
        result.text,
        "    \"a\",\n        b,\n        c,\n    ic_cdk::println!(\"short\");"
    );

    let within = "    \"a\",\n        b);";
    let result = rewriter.rewrite(within);
    assert_eq!(result.skipped, 0);
    assert_eq!(result.text, "    ic_cdk::println!(\"a\",\n        b);");
}

#[test]
fn classify_labels_every_line() {
    let lines = [
        "fn log() {",
        "    \"count {}\",",
        "        n);",
        "    let s = \"x\";",
        "}",
    ];
    assert_eq!(
        rewriter().classify(&lines),
        vec![
            LineKind::Unrelated,
            LineKind::CandidateStart,
            LineKind::Continuation,
            LineKind::Unrelated,
            LineKind::Unrelated,
        ]
    );
}

#[test]
fn plan_reports_block_ranges() {
    let lines = ["    \"a\";", "x", "    \"b\",", "    c);"];
    assert_eq!(
        rewriter().plan(&lines),
        vec![
            Segment::Block { start: 0, end: 1 },
            Segment::Unrelated(1),
            Segment::Block { start: 2, end: 4 },
        ]
    );
}

#[test]
fn preserves_trailing_newline_and_surrounding_lines() {
    let input = "fn f() {\n    \"hi\";\n}\n";
    assert_eq!(rewrite(input), "fn f() {\n    ic_cdk::println!(\"hi\");\n}\n");
}

#[test]
fn carriage_return_is_trimmed_from_rebuilt_line() {
    assert_eq!(rewrite("    \"hi\";\r\n}"), "    ic_cdk::println!(\"hi\");\n}");
}

#[test]
fn text_without_candidates_is_byte_identical() {
    let text = "use std::fmt;\n\nfn main() {\n    println!(\"ok\");\n}\n";
    let result = rewriter().rewrite(text);
    assert_eq!(result.text, text);
    assert_eq!(result.blocks, 0);

    assert_eq!(rewrite(""), "");
}

#[test]
fn custom_macro_name_is_used_and_respected() {
    let config = RewriteConfig {
        macro_name: "log::info!".to_string(),
        ..RewriteConfig::default()
    };
    let rewriter = Rewriter::new(&config).unwrap();
    assert_eq!(rewriter.macro_name(), "log::info!");
    assert_eq!(rewriter.rewrite("  \"up\";").text, "  log::info!(\"up\");");

    let already = "  \"up\" log::info!";
    assert!(!rewriter.is_candidate_start(already));
}

#[test]
fn continuation_detection() {
    assert!(is_continuation("        value,"));
    assert!(is_continuation("        value);  "));
    assert!(!is_continuation("    );"));
    assert!(!is_continuation("        value"));
    assert!(!is_continuation(""));
}

#[test]
fn quote_led_continuation_is_wrapped_again_on_a_second_pass() {
    let text = "    \"a {} {}\",\n        \"b\",\n        c);";

    let first = rewrite(text);
    assert_eq!(first, "    ic_cdk::println!(\"a {} {}\",\n        \"b\",\n        c);");

    let second = rewrite(&first);
    assert_eq!(
        second,
        "    ic_cdk::println!(\"a {} {}\",\n        ic_cdk::println!(\"b\",\n        c);"
    );
    assert_ne!(second, first);
}
