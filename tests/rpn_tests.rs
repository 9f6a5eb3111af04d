// Postfix evaluation against trees produced by the infix parser

use exprtree::interpreter::errors::RpnError;
use exprtree::interpreter::rpn;
use exprtree::memory::SymbolTable;
use exprtree::parser::{parse, parse_with, ParseOptions, PostfixMode};

fn seeded() -> SymbolTable {
    let mut symbols = SymbolTable::new();
    symbols.add("a".to_string(), 7);
    symbols.add("b".to_string(), -3);
    symbols.add("c".to_string(), 12);
    symbols
}

#[test]
fn test_format_then_rpn_matches_tree() {
    let lines = [
        "a + b * c",
        "(a + b) * c",
        "a - -b",
        "c / b % a",
        "-(a - c) * -b",
        "a * (b - (c + 1)) / 2",
    ];

    for line in lines {
        let tree = parse(line).unwrap();
        let direct = tree.evaluate(&mut seeded());
        let via_rpn = rpn::evaluate(&tree.format(), &mut seeded());
        assert_eq!(via_rpn, direct.map_err(RpnError::from), "{}", line);
    }
}

#[test]
fn test_rpn_reproduces_side_effects() {
    let options = ParseOptions {
        postfix: PostfixMode::Apply,
        ..ParseOptions::default()
    };
    let tree = parse_with("a += b++ * ++c", options).unwrap();
    assert_eq!(tree.format(), "a b +++ c ++ * +=");

    let mut direct = seeded();
    let mut via_rpn = seeded();
    assert_eq!(tree.evaluate(&mut direct), Ok(7 + -3 * 13));
    assert_eq!(rpn::evaluate(&tree.format(), &mut via_rpn), Ok(7 + -3 * 13));

    for name in ["a", "b", "c"] {
        assert_eq!(direct.find(name), via_rpn.find(name), "{}", name);
    }
    assert_eq!(via_rpn.find("b"), Some(&-2));
}

#[test]
fn test_rpn_rebuilds_same_tree() {
    let tree = parse("total = -count * (step + 1)").unwrap();
    assert_eq!(rpn::build(&tree.format()), Ok(tree));
}

#[test]
fn test_rpn_errors() {
    let mut symbols = SymbolTable::new();
    assert_eq!(rpn::evaluate("", &mut symbols), Err(RpnError::Empty));
    assert!(matches!(
        rpn::evaluate("1 2 3 * + -", &mut symbols),
        Err(RpnError::MissingOperand { position: 5, .. })
    ));
    assert!(matches!(
        rpn::evaluate("5 x =", &mut symbols),
        Err(RpnError::NotAVariable(_))
    ));
    assert_eq!(symbols.size(), 0);
}
