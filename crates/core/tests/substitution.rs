use fragpatch_core::rule::{FragmentRule, LineEnding};

fn jsx_block(indent: &str) -> String {
    format!("{indent}  <button onClick={{save}}>\n{indent}    Save\n{indent}  </button>\n{indent})}}\n")
}

#[test]
fn single_occurrence_gets_marker_before_delimiter() {
    let rule = FragmentRule::default().compile().expect("compile");
    let input = "<div>\n  {open && (\n    <>\n      <button>\n        Go\n      </button>\n  )}\n</div>\n";

    let outcome = rule.apply(input);

    let expected = "<div>\n  {open && (\n    <>\n      <button>\n        Go\n      </button>\n    </>\n  )}\n</div>\n";
    assert_eq!(outcome.content, expected);
    let insertion = outcome.insertion.expect("insertion");
    assert_eq!(insertion.line, 7);
    assert_eq!(insertion.indent, "  ");
    assert_eq!(insertion.inserted, "    </>");
    assert_eq!(insertion.line_ending, LineEnding::Lf);
}

#[test]
fn output_differs_from_input_only_by_inserted_line() {
    let rule = FragmentRule::default().compile().expect("compile");
    let input = jsx_block("    ");

    let outcome = rule.apply(&input);
    let insertion = outcome.insertion.clone().expect("insertion");

    let mut rebuilt = outcome.content.clone();
    let inserted = format!("{}\n", insertion.inserted);
    rebuilt.replace_range(insertion.offset..insertion.offset + inserted.len(), "");
    assert_eq!(rebuilt, input);
}

#[test]
fn only_first_of_two_occurrences_is_modified() {
    let rule = FragmentRule::default().compile().expect("compile");
    let first = jsx_block("  ");
    let second = jsx_block("    ");
    let input = format!("{first}{second}");

    let outcome = rule.apply(&input);

    assert!(outcome.content.starts_with(&first.replace("</button>\n  )}", "</button>\n    </>\n  )}")));
    assert!(outcome.content.ends_with(&second), "second occurrence must be untouched");
    assert_eq!(outcome.content.matches("</>").count(), 1);
    assert_eq!(rule.count_matches(&input), 2);
}

#[test]
fn no_occurrence_leaves_text_byte_identical() {
    let rule = FragmentRule::default().compile().expect("compile");
    let input = "<div>\n  <button>Ok</button>\n</div>\n";

    let outcome = rule.apply(input);

    assert_eq!(outcome.content, input);
    assert!(!outcome.applied());
    assert!(rule.find(input).is_none());
}

#[test]
fn inserted_indentation_follows_captured_indentation() {
    let rule = FragmentRule::default().compile().expect("compile");

    for indent in ["  ", "    "] {
        let outcome = rule.apply(&jsx_block(indent));
        let insertion = outcome.insertion.expect("insertion");
        assert_eq!(insertion.indent, indent);
        let expected_line = format!("{indent}  </>");
        assert!(
            outcome.content.contains(&format!("</button>\n{expected_line}\n{indent})}}")),
            "indent {:?} produced:\n{}",
            indent,
            outcome.content
        );
    }
}

#[test]
fn marker_indent_can_be_disabled() {
    let rule = FragmentRule::default().with_marker_indent("").compile().expect("compile");
    let outcome = rule.apply("  </button>\n    )}");
    assert_eq!(outcome.content, "  </button>\n    </>\n    )}");
}

#[test]
fn crlf_line_endings_are_preserved() {
    let rule = FragmentRule::default().compile().expect("compile");
    let input = "      </button>\r\n    )}\r\n";

    let outcome = rule.apply(input);

    assert_eq!(outcome.content, "      </button>\r\n      </>\r\n    )}\r\n");
    assert_eq!(outcome.insertion.expect("insertion").line_ending, LineEnding::Crlf);
}

#[test]
fn tabs_count_as_indentation() {
    let rule = FragmentRule::default().compile().expect("compile");
    let outcome = rule.apply("\t\t</button>\n\t)}");
    assert_eq!(outcome.content, "\t\t</button>\n\t  </>\n\t)}");
}

#[test]
fn blank_line_between_tag_and_delimiter_does_not_match() {
    let rule = FragmentRule::default().compile().expect("compile");
    let input = "  </button>\n\n  )}\n";
    assert_eq!(rule.apply(input).content, input);
}

#[test]
fn delimiter_without_indentation_does_not_match() {
    let rule = FragmentRule::default().compile().expect("compile");
    let input = "</button>\n)}\n";
    assert!(!rule.apply(input).applied());
}

#[test]
fn second_run_on_single_occurrence_is_a_no_op() {
    let rule = FragmentRule::default().compile().expect("compile");
    let once = rule.apply(&jsx_block("  ")).content;

    let twice = rule.apply(&once);

    assert!(!twice.applied());
    assert_eq!(twice.content, once);
}

#[test]
fn second_run_patches_next_occurrence_when_present() {
    let rule = FragmentRule::default().compile().expect("compile");
    let input = format!("{}{}", jsx_block("  "), jsx_block("    "));

    let once = rule.apply(&input);
    let twice = rule.apply(&once.content);

    assert!(twice.applied());
    assert_eq!(twice.content.matches("</>").count(), 2);
    assert!(twice.insertion.expect("insertion").line > once.insertion.expect("insertion").line);
}

#[test]
fn custom_rule_escapes_regex_metacharacters() {
    let rule = FragmentRule::default()
        .with_closing_tag("</Button.Group>")
        .with_closing_delimiter(")]")
        .with_marker("</React.Fragment>")
        .compile()
        .expect("compile");

    let outcome = rule.apply("  </Button.Group>\n  )]\n  </ButtonXGroup>\n  )]\n");

    assert_eq!(
        outcome.content,
        "  </Button.Group>\n    </React.Fragment>\n  )]\n  </ButtonXGroup>\n  )]\n"
    );
}
